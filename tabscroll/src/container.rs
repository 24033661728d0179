use alloc::rc::Rc;

/// A live scrollable surface, addressed through a shared handle.
///
/// Setters take `&self`: handles behave like element references and are expected to use
/// interior mutability. Implementations may clamp the requested offset to their scroll range.
pub trait ScrollContainer {
    fn scroll_offset(&self) -> u64;
    fn set_scroll_offset(&self, offset: u64);
}

impl<C: ScrollContainer + ?Sized> ScrollContainer for Rc<C> {
    fn scroll_offset(&self) -> u64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&self, offset: u64) {
        (**self).set_scroll_offset(offset)
    }
}

impl<C: ScrollContainer + ?Sized> ScrollContainer for &C {
    fn scroll_offset(&self) -> u64 {
        (**self).scroll_offset()
    }

    fn set_scroll_offset(&self, offset: u64) {
        (**self).set_scroll_offset(offset)
    }
}
