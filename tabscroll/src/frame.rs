use alloc::vec::Vec;

use crate::TabId;

/// Restores waiting for the host's next frame.
///
/// Holds at most one entry per tab, in the order tabs were first queued. The offset is not
/// captured here: it is read from the position store when the frame runs.
#[derive(Clone, Debug)]
pub struct FrameQueue<T> {
    pending: Vec<T>,
}

impl<T: TabId> FrameQueue<T> {
    pub fn new() -> Self {
        Self {
            pending: Vec::new(),
        }
    }

    /// Queues a restore for `tab`. Returns `false` if one was already pending.
    pub fn schedule(&mut self, tab: T) -> bool {
        if self.contains(tab) {
            return false;
        }
        self.pending.push(tab);
        true
    }

    pub fn contains(&self, tab: T) -> bool {
        self.pending.contains(&tab)
    }

    pub fn cancel(&mut self, tab: T) -> bool {
        let before = self.pending.len();
        self.pending.retain(|&t| t != tab);
        self.pending.len() != before
    }

    /// Takes everything queued so far. Restores scheduled afterwards belong to the next frame.
    pub fn take(&mut self) -> Vec<T> {
        core::mem::take(&mut self.pending)
    }

    pub fn pending(&self) -> &[T] {
        &self.pending
    }

    pub fn len(&self) -> usize {
        self.pending.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pending.is_empty()
    }
}

impl<T: TabId> Default for FrameQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}
