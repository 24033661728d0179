use alloc::vec::Vec;

/// The stored offset of one tab.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabPosition<T> {
    pub tab: T,
    pub offset: u64,
}

/// A snapshot of everything a [`crate::ScrollMemory`] remembers.
///
/// This is useful for keeping scroll memory across sessions without coupling the manager to
/// any storage. Live containers are not part of the snapshot.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ScrollSnapshot<T> {
    pub active: T,
    pub positions: Vec<TabPosition<T>>,
}

impl<T: PartialEq + Copy> ScrollSnapshot<T> {
    /// Returns the offset recorded for `tab`, if the snapshot has one.
    pub fn offset(&self, tab: T) -> Option<u64> {
        self.positions
            .iter()
            .rev()
            .find(|p| p.tab == tab)
            .map(|p| p.offset)
    }
}
