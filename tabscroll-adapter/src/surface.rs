use alloc::rc::Rc;
use core::cell::{Cell, RefCell};
use core::fmt;

use tabscroll::{ScrollContainer, ScrollHandler};

/// Viewport and content size of a surface along the scroll axis.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Extent {
    pub viewport: u32,
    pub content: u64,
}

impl Extent {
    pub fn new(viewport: u32, content: u64) -> Self {
        Self { viewport, content }
    }

    pub fn max_scroll(&self) -> u64 {
        self.content.saturating_sub(self.viewport as u64)
    }
}

struct SurfaceState {
    extent: Cell<Extent>,
    offset: Cell<u64>,
    visible: Cell<bool>,
    laid_out: Cell<bool>,
    on_scroll: RefCell<Option<ScrollHandler>>,
}

/// A simulated scrollable surface with toolkit-like layout rules.
///
/// - A hidden surface has no scroll range and drops its offset.
/// - A surface that was just shown has no scroll range until the next `layout`.
/// - Offsets are clamped to `[0, extent.max_scroll()]` while laid out.
/// - Every offset change caused by `set_scroll_offset`, `scroll_to` or a layout clamp fires the
///   scroll handler synchronously. Hiding does not.
///
/// `Surface` is a shared handle; clones refer to the same surface.
#[derive(Clone)]
pub struct Surface(Rc<SurfaceState>);

impl Surface {
    /// Creates a hidden surface.
    pub fn new(extent: Extent) -> Self {
        Self(Rc::new(SurfaceState {
            extent: Cell::new(extent),
            offset: Cell::new(0),
            visible: Cell::new(false),
            laid_out: Cell::new(false),
            on_scroll: RefCell::new(None),
        }))
    }

    pub fn ptr_eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }

    pub fn extent(&self) -> Extent {
        self.0.extent.get()
    }

    /// Changes the surface geometry. The new range applies from the next `layout`.
    pub fn set_extent(&self, extent: Extent) {
        self.0.extent.set(extent);
        self.0.laid_out.set(false);
    }

    pub fn is_visible(&self) -> bool {
        self.0.visible.get()
    }

    pub fn is_laid_out(&self) -> bool {
        self.0.laid_out.get()
    }

    /// The current maximum offset (0 until laid out).
    pub fn scroll_range(&self) -> u64 {
        if self.0.laid_out.get() {
            self.extent().max_scroll()
        } else {
            0
        }
    }

    pub fn set_on_scroll(&self, handler: Option<ScrollHandler>) {
        *self.0.on_scroll.borrow_mut() = handler;
    }

    pub fn show(&self) {
        self.0.visible.set(true);
    }

    pub fn hide(&self) {
        self.0.visible.set(false);
        self.0.laid_out.set(false);
        self.0.offset.set(0);
    }

    /// Lays the surface out if it is visible. Returns whether it is laid out afterwards.
    pub fn layout(&self) -> bool {
        if !self.0.visible.get() {
            return false;
        }
        self.0.laid_out.set(true);
        // Content may have shrunk below the current offset.
        self.write(self.0.offset.get());
        true
    }

    /// A user scroll (wheel, drag, keys). Returns the applied offset.
    pub fn scroll_to(&self, offset: u64) -> u64 {
        self.write(offset);
        self.0.offset.get()
    }

    pub fn scroll_by(&self, delta: i64) -> u64 {
        let current = self.0.offset.get();
        let target = if delta < 0 {
            current.saturating_sub(delta.unsigned_abs())
        } else {
            current.saturating_add(delta as u64)
        };
        self.scroll_to(target)
    }

    fn write(&self, offset: u64) {
        let clamped = offset.min(self.scroll_range());
        if self.0.offset.replace(clamped) == clamped {
            return;
        }
        let handler = self.0.on_scroll.borrow().clone();
        if let Some(handler) = handler {
            handler();
        }
    }
}

impl ScrollContainer for Surface {
    fn scroll_offset(&self) -> u64 {
        self.0.offset.get()
    }

    fn set_scroll_offset(&self, offset: u64) {
        self.write(offset);
    }
}

impl fmt::Debug for Surface {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Surface")
            .field("extent", &self.extent())
            .field("offset", &self.0.offset.get())
            .field("visible", &self.is_visible())
            .field("laid_out", &self.is_laid_out())
            .finish_non_exhaustive()
    }
}
