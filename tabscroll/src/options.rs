use alloc::rc::Rc;

use crate::RestoreMode;

/// A callback fired after the stored offset of a tab changes value.
///
/// Arguments are the tab and its new stored offset. It runs after internal state is released,
/// so it may call back into the [`crate::ScrollMemory`] that fired it.
pub type OnChangeCallback<T> = Rc<dyn Fn(T, u64)>;

/// Configuration for [`crate::ScrollMemory`].
pub struct ScrollMemoryOptions<T> {
    /// Whether restores wait for the next frame (default) or are written immediately.
    pub restore_mode: RestoreMode,

    /// Optional callback fired when a stored offset changes (useful for persistence).
    pub on_change: Option<OnChangeCallback<T>>,

    /// When leaving a tab whose restore has not run yet, keep its stored offset instead of
    /// saving the (not yet restored) container offset. Off by default.
    pub keep_pending_on_leave: bool,
}

impl<T> ScrollMemoryOptions<T> {
    pub fn new() -> Self {
        Self {
            restore_mode: RestoreMode::default(),
            on_change: None,
            keep_pending_on_leave: false,
        }
    }

    pub fn with_restore_mode(mut self, restore_mode: RestoreMode) -> Self {
        self.restore_mode = restore_mode;
        self
    }

    pub fn with_keep_pending_on_leave(mut self, keep_pending_on_leave: bool) -> Self {
        self.keep_pending_on_leave = keep_pending_on_leave;
        self
    }

    pub fn with_on_change(mut self, on_change: Option<impl Fn(T, u64) + 'static>) -> Self {
        self.on_change = on_change.map(|f| Rc::new(f) as _);
        self
    }
}

impl<T> Default for ScrollMemoryOptions<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for ScrollMemoryOptions<T> {
    fn clone(&self) -> Self {
        Self {
            restore_mode: self.restore_mode,
            on_change: self.on_change.clone(),
            keep_pending_on_leave: self.keep_pending_on_leave,
        }
    }
}

impl<T> core::fmt::Debug for ScrollMemoryOptions<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ScrollMemoryOptions")
            .field("restore_mode", &self.restore_mode)
            .field("on_change", &self.on_change.is_some())
            .field("keep_pending_on_leave", &self.keep_pending_on_leave)
            .finish()
    }
}
