use tabscroll::{RestoreMode, ScrollContainer, ScrollMemoryOptions, Tab};
use tabscroll_adapter::{Extent, TabbedView};

fn run(mode: RestoreMode) -> u64 {
    let mut view = TabbedView::with_options(
        Tab::Feed,
        ScrollMemoryOptions::new().with_restore_mode(mode),
    );
    view.mount(Tab::Feed, Extent::new(800, 12_000));
    view.mount(Tab::Explore, Extent::new(800, 6_000));
    view.frame();

    view.scroll_to(400);
    view.select(Tab::Explore);
    view.frame();
    view.scroll_to(150);

    view.select(Tab::Feed);
    view.frame();
    view.active_surface().map_or(0, |s| s.scroll_offset())
}

fn main() {
    // Restoring before layout loses the offset: the shown surface has no range yet.
    println!("immediate: feed offset after switching back = {}", run(RestoreMode::Immediate));
    println!("next frame: feed offset after switching back = {}", run(RestoreMode::NextFrame));
}
