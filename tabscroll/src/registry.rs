use crate::TabId;
use crate::key::TabMap;

/// The live container currently representing each tab.
///
/// A tab without an entry has never been mounted or has been unmounted.
#[derive(Clone, Debug)]
pub struct ContainerRegistry<T: TabId, C> {
    containers: TabMap<T, C>,
}

impl<T: TabId, C> ContainerRegistry<T, C> {
    pub fn new() -> Self {
        Self {
            containers: TabMap::new(),
        }
    }

    /// Registers (`Some`) or unregisters (`None`) the container for `tab`.
    ///
    /// Returns the previously registered container, if any.
    pub fn set(&mut self, tab: T, container: Option<C>) -> Option<C> {
        match container {
            Some(c) => self.containers.insert(tab, c),
            None => self.containers.remove(&tab),
        }
    }

    pub fn get(&self, tab: T) -> Option<&C> {
        self.containers.get(&tab)
    }

    pub fn is_registered(&self, tab: T) -> bool {
        self.containers.contains_key(&tab)
    }

    pub fn len(&self) -> usize {
        self.containers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.containers.is_empty()
    }
}

impl<T: TabId, C> Default for ContainerRegistry<T, C> {
    fn default() -> Self {
        Self::new()
    }
}
