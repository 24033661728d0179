use alloc::vec::Vec;

use tabscroll::{ScrollMemory, ScrollMemoryOptions, TabId};

use crate::{Extent, Surface};

/// A reference host: one [`Surface`] per tab, wired to a [`ScrollMemory`].
///
/// Adapters drive it by calling:
/// - `mount` / `unmount` when a tab's content is created or torn down
/// - `select` when the user picks a tab
/// - `scroll_to` when the user scrolls the visible surface
/// - `frame` once per frame/timer tick (layout, then deferred restores)
///
/// On `select`, the memory hears about the switch before the old surface is hidden, so the
/// position being left is still readable.
#[derive(Debug)]
pub struct TabbedView<T: TabId> {
    memory: ScrollMemory<T, Surface>,
    surfaces: Vec<(T, Surface)>,
    active: T,
}

impl<T: TabId> TabbedView<T> {
    /// Creates a view whose memory keeps a tab's offset when that tab is left before its
    /// restore ran (see `ScrollMemoryOptions::keep_pending_on_leave`).
    pub fn new(initial: T) -> Self {
        Self::with_options(
            initial,
            ScrollMemoryOptions::default().with_keep_pending_on_leave(true),
        )
    }

    pub fn with_options(initial: T, options: ScrollMemoryOptions<T>) -> Self {
        Self {
            memory: ScrollMemory::with_options(initial, options),
            surfaces: Vec::new(),
            active: initial,
        }
    }

    /// The shared scroll memory. Tab changes belong to `select`; an active tab set directly
    /// here is adopted by the view on its next `select`.
    pub fn memory(&self) -> &ScrollMemory<T, Surface> {
        &self.memory
    }

    pub fn active(&self) -> T {
        self.active
    }

    pub fn surface(&self, tab: T) -> Option<&Surface> {
        self.surfaces.iter().find(|(t, _)| *t == tab).map(|(_, s)| s)
    }

    pub fn active_surface(&self) -> Option<&Surface> {
        self.surface(self.active)
    }

    /// Creates the surface for `tab` and wires it to the memory, replacing any previous one.
    ///
    /// A surface mounted for the active tab is shown and picks up its remembered offset on
    /// the next frame.
    pub fn mount(&mut self, tab: T, extent: Extent) -> Surface {
        self.unmount(tab);
        atrace!(tab = ?tab, viewport = extent.viewport, content = extent.content, "mount");

        let surface = Surface::new(extent);
        surface.set_on_scroll(Some(self.memory.create_scroll_handler(tab)));
        self.memory.register_container(tab)(Some(surface.clone()));
        self.surfaces.push((tab, surface.clone()));

        if tab == self.active {
            surface.show();
            self.memory.restore_position(tab);
        }
        surface
    }

    pub fn unmount(&mut self, tab: T) -> Option<Surface> {
        let pos = self.surfaces.iter().position(|(t, _)| *t == tab)?;
        let (_, surface) = self.surfaces.remove(pos);
        atrace!(tab = ?tab, "unmount");
        self.memory.register_container(tab)(None);
        surface.set_on_scroll(None);
        surface.hide();
        Some(surface)
    }

    /// Switches the visible tab. Returns `false` if `tab` was already active.
    ///
    /// A tab change made directly on `memory()` is picked up first, so the shown surface always
    /// follows the memory's active tab.
    pub fn select(&mut self, tab: T) -> bool {
        self.sync_active();
        if !self.memory.set_active_tab(tab) {
            return false;
        }
        adebug!(from = ?self.active, to = ?tab, "select");
        if let Some(old) = self.surface(self.active) {
            old.hide();
        }
        self.active = tab;
        if let Some(new) = self.surface(tab) {
            new.show();
        }
        true
    }

    fn sync_active(&mut self) {
        let reported = self.memory.active_tab();
        if reported == self.active {
            return;
        }
        adebug!(from = ?self.active, to = ?reported, "select: adopting memory's active tab");
        if let Some(old) = self.surface(self.active) {
            old.hide();
        }
        self.active = reported;
        if let Some(new) = self.surface(reported) {
            new.show();
        }
    }

    /// Scrolls the visible surface. Returns the applied offset, or `None` without a surface.
    pub fn scroll_to(&self, offset: u64) -> Option<u64> {
        self.active_surface().map(|s| s.scroll_to(offset))
    }

    pub fn scroll_by(&self, delta: i64) -> Option<u64> {
        self.active_surface().map(|s| s.scroll_by(delta))
    }

    /// Runs one frame: lays out visible surfaces, then applies deferred restores.
    ///
    /// Returns the number of restores applied.
    pub fn frame(&self) -> usize {
        for (_, surface) in &self.surfaces {
            surface.layout();
        }
        self.memory.flush_frame()
    }

    /// Forgets the active tab's position and jumps it to the top.
    pub fn scroll_to_top(&self) {
        self.memory.reset_position(self.active);
    }

    /// Forgets every position and selects the first tab.
    pub fn go_home(&mut self) {
        adebug!("go_home");
        self.memory.reset_all_positions();
        if let Some(&home) = T::ALL.first() {
            self.select(home);
        }
    }
}
