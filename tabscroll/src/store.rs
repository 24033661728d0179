use crate::TabId;
use crate::key::TabMap;

/// Last known scroll offset per tab.
///
/// Every tab in `T::ALL` is seeded at 0 on construction. Entries are overwritten or reset,
/// never removed.
#[derive(Clone, Debug)]
pub struct PositionStore<T: TabId> {
    offsets: TabMap<T, u64>,
}

impl<T: TabId> PositionStore<T> {
    pub fn new() -> Self {
        let mut offsets = TabMap::new();
        for &tab in T::ALL {
            offsets.insert(tab, 0);
        }
        Self { offsets }
    }

    pub fn get(&self, tab: T) -> u64 {
        self.offsets.get(&tab).copied().unwrap_or(0)
    }

    /// Stores `offset` for `tab`. Returns `true` if the stored value changed.
    pub fn set(&mut self, tab: T, offset: u64) -> bool {
        let prev = self.offsets.insert(tab, offset);
        prev != Some(offset)
    }

    pub fn reset(&mut self, tab: T) -> bool {
        self.set(tab, 0)
    }

    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }

    /// Iterates `(tab, offset)` pairs in `T::ALL` order.
    pub fn iter(&self) -> impl Iterator<Item = (T, u64)> + '_ {
        T::ALL.iter().map(|&tab| (tab, self.get(tab)))
    }
}

impl<T: TabId> Default for PositionStore<T> {
    fn default() -> Self {
        Self::new()
    }
}
