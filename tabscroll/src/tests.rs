use crate::*;

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};

#[derive(Clone, Debug, Default)]
struct Pane(Rc<Cell<u64>>);

impl Pane {
    fn at(offset: u64) -> Self {
        Self(Rc::new(Cell::new(offset)))
    }

    fn get(&self) -> u64 {
        self.0.get()
    }

    fn scroll(&self, offset: u64) {
        self.0.set(offset);
    }
}

impl ScrollContainer for Pane {
    fn scroll_offset(&self) -> u64 {
        self.0.get()
    }

    fn set_scroll_offset(&self, offset: u64) {
        self.0.set(offset);
    }
}

/// A pane that reports every offset change through its scroll handler synchronously.
#[derive(Clone, Default)]
struct EchoPane {
    offset: Rc<Cell<u64>>,
    on_scroll: Rc<RefCell<Option<ScrollHandler>>>,
}

impl ScrollContainer for EchoPane {
    fn scroll_offset(&self) -> u64 {
        self.offset.get()
    }

    fn set_scroll_offset(&self, offset: u64) {
        if self.offset.replace(offset) == offset {
            return;
        }
        let handler = self.on_scroll.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

fn mounted(memory: &ScrollMemory<Tab, Pane>, tab: Tab) -> Pane {
    let pane = Pane::default();
    memory.register_container(tab)(Some(pane.clone()));
    pane
}

#[test]
fn untouched_tabs_start_at_zero() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    for &tab in Tab::ALL {
        assert_eq!(memory.position(tab), 0);
    }
    assert_eq!(memory.positions().len(), Tab::ALL.len());
    assert_eq!(memory.active_tab(), Tab::Feed);
}

#[test]
fn restore_waits_for_next_frame() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);

    feed.scroll(320);
    memory.save_position(Tab::Feed);
    feed.scroll(10);

    memory.restore_position(Tab::Feed);
    assert_eq!(feed.get(), 10);
    assert!(memory.has_pending_restore(Tab::Feed));

    assert_eq!(memory.flush_frame(), 1);
    assert_eq!(feed.get(), 320);
    assert!(!memory.has_pending_restore(Tab::Feed));
    assert_eq!(memory.flush_frame(), 0);
}

#[test]
fn repeated_restores_coalesce_into_one_write() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    feed.scroll(50);
    memory.save_position(Tab::Feed);

    memory.restore_position(Tab::Feed);
    memory.restore_position(Tab::Feed);
    assert_eq!(memory.pending_restores(), [Tab::Feed]);
    assert_eq!(memory.flush_frame(), 1);
}

#[test]
fn restore_uses_offset_stored_at_frame_time() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);

    memory.restore_position(Tab::Feed);
    feed.scroll(75);
    memory.create_scroll_handler(Tab::Feed)();
    feed.scroll(0);

    memory.flush_frame();
    assert_eq!(feed.get(), 75);
}

#[test]
fn reset_position_is_synchronous() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    feed.scroll(900);
    memory.save_position(Tab::Feed);
    memory.restore_position(Tab::Feed);

    memory.reset_position(Tab::Feed);
    assert_eq!(memory.position(Tab::Feed), 0);
    assert_eq!(feed.get(), 0);
    assert!(!memory.has_pending_restore(Tab::Feed));

    // Without a container only the store is touched.
    memory.reset_position(Tab::Profile);
    assert_eq!(memory.position(Tab::Profile), 0);
}

#[test]
fn reset_all_positions_zeroes_every_tab() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let panes: Vec<(Tab, Pane)> = Tab::ALL
        .iter()
        .map(|&tab| (tab, mounted(&memory, tab)))
        .collect();
    for (i, (tab, pane)) in panes.iter().enumerate() {
        pane.scroll(100 * (i as u64 + 1));
        memory.save_position(*tab);
    }
    assert_eq!(memory.position(Tab::Profile), 600);

    memory.reset_all_positions();
    for (tab, pane) in &panes {
        assert_eq!(memory.position(*tab), 0, "{tab}");
        assert_eq!(pane.get(), 0, "{tab}");
    }
}

#[test]
fn missing_container_is_a_silent_no_op() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    feed.scroll(42);
    memory.save_position(Tab::Feed);

    memory.save_position(Tab::Explore);
    memory.restore_position(Tab::Explore);
    memory.create_scroll_handler(Tab::Explore)();

    assert_eq!(memory.position(Tab::Explore), 0);
    assert_eq!(memory.position(Tab::Feed), 42);
    assert!(memory.pending_restores().is_empty());
    assert_eq!(memory.flush_frame(), 0);
    assert!(memory.get_container(Tab::Explore).is_none());
}

#[test]
fn container_unmounted_before_frame_is_skipped() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    feed.scroll(30);
    memory.save_position(Tab::Feed);
    feed.scroll(0);

    memory.restore_position(Tab::Feed);
    memory.register_container(Tab::Feed)(None);

    assert!(!memory.is_registered(Tab::Feed));
    assert_eq!(memory.flush_frame(), 0);
    assert_eq!(feed.get(), 0);
    assert_eq!(memory.position(Tab::Feed), 30);
}

#[test]
fn remount_replaces_the_registered_container() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let first = mounted(&memory, Tab::Feed);
    first.scroll(12);
    memory.save_position(Tab::Feed);

    let second = Pane::at(0);
    memory.register_container(Tab::Feed)(Some(second.clone()));
    memory.restore_position(Tab::Feed);
    memory.flush_frame();

    assert_eq!(second.get(), 12);
    assert!(Rc::ptr_eq(
        &memory.get_container(Tab::Feed).unwrap().0,
        &second.0
    ));
}

#[test]
fn callbacks_are_stable_per_tab() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);

    let a = memory.register_container(Tab::Feed);
    let b = memory.register_container(Tab::Feed);
    let c = memory.register_container(Tab::Explore);
    assert!(Rc::ptr_eq(&a, &b));
    assert!(!Rc::ptr_eq(&a, &c));

    let h1 = memory.create_scroll_handler(Tab::Feed);
    let h2 = memory.clone().create_scroll_handler(Tab::Feed);
    assert!(Rc::ptr_eq(&h1, &h2));
}

#[test]
fn scroll_handler_tracks_continuously() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    let on_scroll = memory.create_scroll_handler(Tab::Feed);

    for offset in [10, 80, 35] {
        feed.scroll(offset);
        on_scroll();
        assert_eq!(memory.position(Tab::Feed), offset);
    }
}

#[test]
fn unchanged_active_tab_does_nothing() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    feed.scroll(64);

    assert!(!memory.set_active_tab(Tab::Feed));
    assert_eq!(memory.position(Tab::Feed), 0);
    assert!(memory.pending_restores().is_empty());
}

#[test]
fn switching_away_and_back_restores_offset() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    let _explore = mounted(&memory, Tab::Explore);

    feed.scroll(220);
    assert!(memory.set_active_tab(Tab::Explore));
    memory.flush_frame();
    assert_eq!(memory.active_tab(), Tab::Explore);

    // The hidden surface loses its offset.
    feed.scroll(0);

    assert!(memory.set_active_tab(Tab::Feed));
    memory.flush_frame();
    assert_eq!(feed.get(), 220);
}

#[test]
fn feed_and_explore_keep_independent_offsets() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    let explore = mounted(&memory, Tab::Explore);

    feed.scroll(400);
    memory.set_active_tab(Tab::Explore);
    memory.flush_frame();
    explore.scroll(150);

    memory.set_active_tab(Tab::Feed);
    feed.scroll(0);
    memory.flush_frame();
    assert_eq!(feed.get(), 400);

    memory.set_active_tab(Tab::Explore);
    explore.scroll(0);
    memory.flush_frame();
    assert_eq!(explore.get(), 150);
    assert_eq!(memory.position(Tab::Feed), 400);
    assert_eq!(memory.position(Tab::Explore), 150);
}

#[test]
fn rapid_switching_keeps_initial_offsets() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let _feed = mounted(&memory, Tab::Feed);
    let _explore = mounted(&memory, Tab::Explore);

    for tab in [
        Tab::Explore,
        Tab::Messages,
        Tab::Notifications,
        Tab::Feed,
    ] {
        assert!(memory.set_active_tab(tab));
    }
    memory.flush_frame();

    for &tab in Tab::ALL {
        assert_eq!(memory.position(tab), 0);
    }
}

#[test]
fn save_during_pending_restore_keeps_live_offset() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);

    memory.restore_position(Tab::Feed);
    feed.scroll(500);
    memory.save_position(Tab::Feed);
    assert_eq!(memory.position(Tab::Feed), 500);

    memory.flush_frame();
    assert_eq!(feed.get(), 500);
}

#[test]
fn leaving_before_restore_saves_by_default() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let _feed = mounted(&memory, Tab::Feed);
    let explore = mounted(&memory, Tab::Explore);
    explore.scroll(500);
    memory.save_position(Tab::Explore);

    memory.set_active_tab(Tab::Explore);
    explore.scroll(0);
    memory.set_active_tab(Tab::Feed);

    assert_eq!(memory.position(Tab::Explore), 0);
}

#[test]
fn keep_pending_on_leave_preserves_unrestored_offset() {
    let memory = ScrollMemory::<Tab, Pane>::with_options(
        Tab::Feed,
        ScrollMemoryOptions::new().with_keep_pending_on_leave(true),
    );
    let _feed = mounted(&memory, Tab::Feed);
    let explore = mounted(&memory, Tab::Explore);
    explore.scroll(500);
    memory.save_position(Tab::Explore);

    memory.set_active_tab(Tab::Explore);
    // Shown but not laid out yet: the surface has no offset.
    explore.scroll(0);

    // Leave Explore again before its restore ever ran.
    memory.set_active_tab(Tab::Feed);
    assert_eq!(memory.position(Tab::Explore), 500);

    memory.set_active_tab(Tab::Explore);
    memory.flush_frame();
    assert_eq!(explore.get(), 500);

    // An explicit save is never skipped.
    memory.restore_position(Tab::Explore);
    explore.scroll(20);
    memory.save_position(Tab::Explore);
    assert_eq!(memory.position(Tab::Explore), 20);
}

#[test]
fn immediate_mode_writes_synchronously() {
    let memory = ScrollMemory::<Tab, Pane>::with_options(
        Tab::Feed,
        ScrollMemoryOptions::new().with_restore_mode(RestoreMode::Immediate),
    );
    let feed = mounted(&memory, Tab::Feed);
    let _explore = mounted(&memory, Tab::Explore);

    feed.scroll(128);
    memory.set_active_tab(Tab::Explore);
    feed.scroll(0);
    memory.set_active_tab(Tab::Feed);

    assert_eq!(feed.get(), 128);
    assert!(memory.pending_restores().is_empty());
}

#[test]
fn on_change_fires_only_for_new_values() {
    let seen = Rc::new(RefCell::new(Vec::new()));
    let memory = ScrollMemory::<Tab, Pane>::with_options(
        Tab::Feed,
        ScrollMemoryOptions::new().with_on_change(Some({
            let seen = Rc::clone(&seen);
            move |tab: Tab, offset: u64| seen.borrow_mut().push((tab, offset))
        })),
    );
    let feed = mounted(&memory, Tab::Feed);
    let on_scroll = memory.create_scroll_handler(Tab::Feed);

    feed.scroll(5);
    on_scroll();
    on_scroll();
    memory.reset_position(Tab::Feed);
    memory.reset_position(Tab::Feed);

    assert_eq!(*seen.borrow(), [(Tab::Feed, 5), (Tab::Feed, 0)]);
}

#[test]
fn on_change_may_reenter_the_memory() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let observed = Rc::new(Cell::new(0u64));
    memory.set_on_change(Some({
        let memory = memory.clone();
        let observed = Rc::clone(&observed);
        move |tab: Tab, _offset: u64| observed.set(memory.position(tab))
    }));
    let feed = mounted(&memory, Tab::Feed);

    feed.scroll(77);
    memory.save_position(Tab::Feed);
    assert_eq!(observed.get(), 77);
}

#[test]
fn reentrant_container_does_not_panic() {
    let memory = ScrollMemory::<Tab, EchoPane>::new(Tab::Feed);
    let feed = EchoPane::default();
    *feed.on_scroll.borrow_mut() = Some(memory.create_scroll_handler(Tab::Feed));
    memory.register_container(Tab::Feed)(Some(feed.clone()));

    feed.set_scroll_offset(310);
    assert_eq!(memory.position(Tab::Feed), 310);

    memory.set_active_tab(Tab::Explore);
    feed.offset.set(0);
    memory.set_active_tab(Tab::Feed);
    assert_eq!(memory.flush_frame(), 1);
    assert_eq!(feed.scroll_offset(), 310);

    memory.reset_all_positions();
    assert_eq!(feed.scroll_offset(), 0);
    assert_eq!(memory.position(Tab::Feed), 0);
}

#[test]
fn callbacks_outliving_memory_are_inert() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let setter = memory.register_container(Tab::Feed);
    let on_scroll = memory.create_scroll_handler(Tab::Feed);
    drop(memory);

    setter(Some(Pane::at(3)));
    on_scroll();
}

#[test]
fn snapshot_round_trips_through_memory() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let feed = mounted(&memory, Tab::Feed);
    let explore = mounted(&memory, Tab::Explore);
    feed.scroll(40);
    memory.set_active_tab(Tab::Explore);
    memory.flush_frame();
    explore.scroll(90);
    memory.save_position(Tab::Explore);

    let snapshot = memory.snapshot();
    assert_eq!(snapshot.active, Tab::Explore);
    assert_eq!(snapshot.offset(Tab::Feed), Some(40));
    assert_eq!(snapshot.offset(Tab::Explore), Some(90));
    assert_eq!(snapshot.positions.first().map(|p| p.tab), Some(Tab::Feed));

    let next = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    let next_feed = mounted(&next, Tab::Feed);
    next.restore_snapshot(&snapshot);
    assert_eq!(next.position(Tab::Explore), 90);
    assert_eq!(next.active_tab(), Tab::Feed);
    assert_eq!(next.flush_frame(), 1);
    assert_eq!(next_feed.get(), 40);
}

#[test]
fn snapshot_with_duplicates_keeps_last_entry() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);
    memory.restore_snapshot(&ScrollSnapshot {
        active: Tab::Feed,
        positions: alloc::vec![
            TabPosition {
                tab: Tab::Messages,
                offset: 1,
            },
            TabPosition {
                tab: Tab::Messages,
                offset: 2,
            },
        ],
    });
    assert_eq!(memory.position(Tab::Messages), 2);
    assert_eq!(memory.position(Tab::Feed), 0);
}

#[cfg(feature = "serde")]
#[test]
fn snapshot_serializes_with_tab_names() {
    let snapshot = ScrollSnapshot {
        active: Tab::Notifications,
        positions: alloc::vec![TabPosition {
            tab: Tab::Feed,
            offset: 400,
        }],
    };
    let json = serde_json::to_string(&snapshot).unwrap();
    assert_eq!(
        json,
        r#"{"active":"notifications","positions":[{"tab":"feed","offset":400}]}"#
    );
    let back: ScrollSnapshot<Tab> = serde_json::from_str(&json).unwrap();
    assert_eq!(back, snapshot);
}

#[test]
fn reconciler_reports_transitions_once() {
    let mut r = TabReconciler::new(Tab::Feed);
    assert_eq!(r.observe(Tab::Feed), None);

    let t = r.observe(Tab::Explore).unwrap();
    assert_eq!(
        t,
        TabTransition {
            from: Tab::Feed,
            to: Tab::Explore
        }
    );
    // Nothing changes until the transition is committed.
    assert_eq!(r.previous(), Tab::Feed);
    r.commit(t);
    assert_eq!(r.previous(), Tab::Explore);
    assert_eq!(r.observe(Tab::Explore), None);
}

#[test]
fn frame_queue_keeps_first_schedule_order() {
    let mut q = FrameQueue::new();
    assert!(q.schedule(Tab::Explore));
    assert!(q.schedule(Tab::Feed));
    assert!(!q.schedule(Tab::Explore));
    assert!(q.cancel(Tab::Feed));
    assert!(!q.cancel(Tab::Feed));
    assert!(q.schedule(Tab::Profile));

    assert_eq!(q.take(), [Tab::Explore, Tab::Profile]);
    assert!(q.is_empty());
}

#[test]
fn position_store_is_seeded_and_ordered() {
    let mut store = PositionStore::<Tab>::new();
    assert_eq!(store.len(), Tab::ALL.len());
    assert!(store.set(Tab::Profile, 8));
    assert!(!store.set(Tab::Profile, 8));
    assert!(store.reset(Tab::Profile));

    let tabs: Vec<Tab> = store.iter().map(|(t, _)| t).collect();
    assert_eq!(tabs, Tab::ALL);
}
