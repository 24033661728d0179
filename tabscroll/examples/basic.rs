use std::cell::Cell;
use std::rc::Rc;

use tabscroll::{ScrollContainer, ScrollMemory, Tab};

#[derive(Clone, Default)]
struct Pane(Rc<Cell<u64>>);

impl ScrollContainer for Pane {
    fn scroll_offset(&self) -> u64 {
        self.0.get()
    }

    fn set_scroll_offset(&self, offset: u64) {
        self.0.set(offset);
    }
}

fn main() {
    let memory = ScrollMemory::<Tab, Pane>::new(Tab::Feed);

    // Host wiring: mount both surfaces, hook their scroll notifications.
    let feed = Pane::default();
    let explore = Pane::default();
    memory.register_container(Tab::Feed)(Some(feed.clone()));
    memory.register_container(Tab::Explore)(Some(explore.clone()));
    let on_feed_scroll = memory.create_scroll_handler(Tab::Feed);

    feed.set_scroll_offset(400);
    on_feed_scroll();

    memory.set_active_tab(Tab::Explore);
    memory.flush_frame();
    explore.set_scroll_offset(150);

    // Hidden surfaces lose their offset; the memory does not.
    feed.set_scroll_offset(0);
    memory.set_active_tab(Tab::Feed);
    println!("pending={:?}", memory.pending_restores());
    memory.flush_frame();

    println!("feed={} explore={}", feed.scroll_offset(), explore.scroll_offset());
    println!("snapshot={:?}", memory.snapshot());
}
