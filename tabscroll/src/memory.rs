use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::RefCell;

use crate::frame::FrameQueue;
use crate::key::TabMap;
use crate::{
    ContainerRegistry, PositionStore, RestoreMode, ScrollContainer, ScrollMemoryOptions,
    ScrollSnapshot, TabId, TabPosition, TabReconciler,
};

/// Registers (`Some`) or unregisters (`None`) the container of one tab.
///
/// Wire it to the mount/unmount lifecycle of that tab's scrollable surface.
pub type ContainerSetter<C> = Rc<dyn Fn(Option<C>)>;

/// Re-reads one tab's container offset into the position store.
///
/// Wire it to the surface's native scroll notification.
pub type ScrollHandler = Rc<dyn Fn()>;

struct Inner<T: TabId, C> {
    options: ScrollMemoryOptions<T>,
    positions: PositionStore<T>,
    containers: ContainerRegistry<T, C>,
    frames: FrameQueue<T>,
    reconciler: TabReconciler<T>,
    setters: TabMap<T, ContainerSetter<C>>,
    handlers: TabMap<T, ScrollHandler>,
}

/// Per-tab scroll position memory for a tabbed view.
///
/// One instance belongs to one tabbed view. It remembers the last scroll offset of every tab
/// and, when the active tab changes, saves the tab being left and restores the tab being shown.
///
/// This type is intentionally UI-agnostic:
/// - Containers are any [`ScrollContainer`] handle supplied by the host.
/// - Restores are deferred to the host's next frame (`flush_frame`) so the surface has been laid
///   out before its offset is written.
///
/// `ScrollMemory` is a cheap handle: clones share the same state. Callbacks returned by
/// `register_container` and `create_scroll_handler` only hold weak references, so they never
/// keep the state alive on their own.
///
/// A missing container is a normal condition (tab never shown, or unmounted); every operation
/// that needs one silently does nothing without it.
pub struct ScrollMemory<T: TabId, C> {
    inner: Rc<RefCell<Inner<T, C>>>,
}

impl<T: TabId, C> Clone for ScrollMemory<T, C> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<T: TabId, C: ScrollContainer + Clone + 'static> ScrollMemory<T, C> {
    pub fn new(initial_tab: T) -> Self {
        Self::with_options(initial_tab, ScrollMemoryOptions::default())
    }

    pub fn with_options(initial_tab: T, options: ScrollMemoryOptions<T>) -> Self {
        sdebug!(
            initial_tab = ?initial_tab,
            tabs = T::ALL.len(),
            restore_mode = ?options.restore_mode,
            "ScrollMemory::new"
        );
        Self {
            inner: Rc::new(RefCell::new(Inner {
                options,
                positions: PositionStore::new(),
                containers: ContainerRegistry::new(),
                frames: FrameQueue::new(),
                reconciler: TabReconciler::new(initial_tab),
                setters: TabMap::new(),
                handlers: TabMap::new(),
            })),
        }
    }

    fn from_weak(weak: &Weak<RefCell<Inner<T, C>>>) -> Option<Self> {
        weak.upgrade().map(|inner| Self { inner })
    }

    pub fn options(&self) -> ScrollMemoryOptions<T> {
        self.inner.borrow().options.clone()
    }

    pub fn set_restore_mode(&self, restore_mode: RestoreMode) {
        self.inner.borrow_mut().options.restore_mode = restore_mode;
    }

    pub fn set_on_change(&self, on_change: Option<impl Fn(T, u64) + 'static>) {
        self.inner.borrow_mut().options.on_change = on_change.map(|f| Rc::new(f) as _);
    }

    /// The tab the view currently shows, as last reported to `set_active_tab`.
    pub fn active_tab(&self) -> T {
        self.inner.borrow().reconciler.previous()
    }

    /// Returns the container setter for `tab`.
    ///
    /// Repeated calls with the same tab return the same `Rc` (`Rc::ptr_eq` holds), so hosts that
    /// re-run their wiring on every update do not churn registrations.
    pub fn register_container(&self, tab: T) -> ContainerSetter<C> {
        if let Some(setter) = self.inner.borrow().setters.get(&tab) {
            return Rc::clone(setter);
        }

        let weak = Rc::downgrade(&self.inner);
        let setter: ContainerSetter<C> = Rc::new(move |container: Option<C>| {
            let Some(memory) = Self::from_weak(&weak) else {
                swarn!(tab = ?tab, "container setter called after ScrollMemory was dropped");
                return;
            };
            strace!(tab = ?tab, mounted = container.is_some(), "register_container");
            // Dropped after the borrow ends; a handle's destructor may re-enter.
            let _previous = memory.inner.borrow_mut().containers.set(tab, container);
        });

        self.inner
            .borrow_mut()
            .setters
            .insert(tab, Rc::clone(&setter));
        setter
    }

    pub fn get_container(&self, tab: T) -> Option<C> {
        self.inner.borrow().containers.get(tab).cloned()
    }

    pub fn is_registered(&self, tab: T) -> bool {
        self.inner.borrow().containers.is_registered(tab)
    }

    /// The stored offset for `tab` (0 until something was saved).
    pub fn position(&self, tab: T) -> u64 {
        self.inner.borrow().positions.get(tab)
    }

    /// All stored offsets, in `T::ALL` order.
    pub fn positions(&self) -> Vec<TabPosition<T>> {
        self.inner
            .borrow()
            .positions
            .iter()
            .map(|(tab, offset)| TabPosition { tab, offset })
            .collect()
    }

    /// Captures the current offset of `tab`'s container into the store.
    ///
    /// A restore still pending for `tab` then writes this captured offset.
    pub fn save_position(&self, tab: T) {
        self.capture(tab);
    }

    /// Writes the stored offset of `tab` back onto its container.
    ///
    /// With [`RestoreMode::NextFrame`] the write happens on the next `flush_frame`, using the
    /// stored offset and the container registered at that time.
    pub fn restore_position(&self, tab: T) {
        let immediate = {
            let mut inner = self.inner.borrow_mut();
            if !inner.containers.is_registered(tab) {
                return;
            }
            match inner.options.restore_mode {
                RestoreMode::Immediate => true,
                RestoreMode::NextFrame => {
                    if inner.frames.schedule(tab) {
                        strace!(tab = ?tab, "restore_position: queued for next frame");
                    } else {
                        strace!(tab = ?tab, "restore_position: already queued");
                    }
                    false
                }
            }
        };
        if immediate {
            self.apply_restore(tab);
        }
    }

    /// Forgets the stored offset of `tab` and scrolls its container (if any) to the top now.
    pub fn reset_position(&self, tab: T) {
        if self.inner.borrow_mut().frames.cancel(tab) {
            strace!(tab = ?tab, "reset_position: dropped queued restore");
        }
        self.store(tab, 0);
        if let Some(container) = self.get_container(tab) {
            container.set_scroll_offset(0);
        }
    }

    pub fn reset_all_positions(&self) {
        sdebug!("reset_all_positions");
        for &tab in T::ALL {
            self.reset_position(tab);
        }
    }

    /// Returns the scroll handler for `tab`.
    ///
    /// Each call of the handler re-reads the container offset into the store, so an in-progress
    /// scroll survives an abrupt tab switch. Memoized per tab like `register_container`.
    pub fn create_scroll_handler(&self, tab: T) -> ScrollHandler {
        if let Some(handler) = self.inner.borrow().handlers.get(&tab) {
            return Rc::clone(handler);
        }

        let weak = Rc::downgrade(&self.inner);
        let handler: ScrollHandler = Rc::new(move || {
            let Some(memory) = Self::from_weak(&weak) else {
                swarn!(tab = ?tab, "scroll handler called after ScrollMemory was dropped");
                return;
            };
            memory.capture(tab);
        });

        self.inner
            .borrow_mut()
            .handlers
            .insert(tab, Rc::clone(&handler));
        handler
    }

    /// Reports the tab the host is showing. Call it on every update.
    ///
    /// When the tab differs from the previously reported one, the previous tab's position is
    /// saved, the new tab's position is restored, and then the new tab becomes the previous
    /// one. Returns `false` (and does nothing) when the tab is unchanged.
    ///
    /// With `keep_pending_on_leave`, the save is skipped when the tab being left still has a
    /// queued restore, since its container never received the remembered offset.
    pub fn set_active_tab(&self, active: T) -> bool {
        let (observed, skip_save) = {
            let inner = self.inner.borrow();
            let observed = inner.reconciler.observe(active);
            let skip_save = observed.is_some_and(|t| {
                inner.options.keep_pending_on_leave && inner.frames.contains(t.from)
            });
            (observed, skip_save)
        };
        let Some(transition) = observed else {
            return false;
        };
        sdebug!(from = ?transition.from, to = ?transition.to, "active tab changed");

        if skip_save {
            strace!(tab = ?transition.from, "set_active_tab: restore pending, keeping stored offset");
        } else {
            self.save_position(transition.from);
        }
        self.restore_position(transition.to);
        self.inner.borrow_mut().reconciler.commit(transition);
        true
    }

    /// Runs the restores queued before this call. Call it once per frame, after layout.
    ///
    /// Returns how many containers were written. Restores queued while flushing wait for the
    /// next frame.
    pub fn flush_frame(&self) -> usize {
        let due = self.inner.borrow_mut().frames.take();
        if due.is_empty() {
            return 0;
        }
        let mut applied = 0usize;
        for &tab in &due {
            if self.apply_restore(tab) {
                applied += 1;
            }
        }
        strace!(due = due.len(), applied, "flush_frame");
        applied
    }

    pub fn has_pending_restore(&self, tab: T) -> bool {
        self.inner.borrow().frames.contains(tab)
    }

    pub fn pending_restores(&self) -> Vec<T> {
        self.inner.borrow().frames.pending().to_vec()
    }

    pub fn snapshot(&self) -> ScrollSnapshot<T> {
        ScrollSnapshot {
            active: self.active_tab(),
            positions: self.positions(),
        }
    }

    /// Loads stored offsets from a snapshot and queues a restore of the active tab.
    ///
    /// Tabs absent from the snapshot keep their offset. The active tab is not changed.
    pub fn restore_snapshot(&self, snapshot: &ScrollSnapshot<T>) {
        sdebug!(
            entries = snapshot.positions.len(),
            active = ?snapshot.active,
            "restore_snapshot"
        );
        let mut seen: Vec<T> = Vec::with_capacity(snapshot.positions.len());
        for p in &snapshot.positions {
            if seen.contains(&p.tab) {
                swarn!(tab = ?p.tab, "restore_snapshot: duplicate tab entry, last one wins");
            } else {
                seen.push(p.tab);
            }
            self.store(p.tab, p.offset);
        }
        self.restore_position(self.active_tab());
    }

    fn capture(&self, tab: T) {
        let Some(container) = self.get_container(tab) else {
            return;
        };
        let offset = container.scroll_offset();
        strace!(tab = ?tab, offset, "capture");
        self.store(tab, offset);
    }

    fn store(&self, tab: T, offset: u64) {
        let on_change = {
            let mut inner = self.inner.borrow_mut();
            if !inner.positions.set(tab, offset) {
                return;
            }
            inner.options.on_change.clone()
        };
        if let Some(cb) = on_change {
            cb(tab, offset);
        }
    }

    fn apply_restore(&self, tab: T) -> bool {
        let (container, offset) = {
            let inner = self.inner.borrow();
            let Some(container) = inner.containers.get(tab) else {
                return false;
            };
            (container.clone(), inner.positions.get(tab))
        };
        strace!(tab = ?tab, offset, "apply_restore");
        container.set_scroll_offset(offset);
        true
    }
}

impl<T: TabId, C> core::fmt::Debug for ScrollMemory<T, C> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let Ok(inner) = self.inner.try_borrow() else {
            return f.write_str("ScrollMemory { <borrowed> }");
        };
        f.debug_struct("ScrollMemory")
            .field("active", &inner.reconciler.previous())
            .field("positions", &inner.positions)
            .field("registered", &inner.containers.len())
            .field("pending", &inner.frames.pending())
            .field("options", &inner.options)
            .finish_non_exhaustive()
    }
}
