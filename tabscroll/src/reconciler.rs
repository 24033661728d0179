use crate::TabId;

/// A change of the active tab.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TabTransition<T> {
    pub from: T,
    pub to: T,
}

/// Detects active-tab changes reported by the host.
///
/// Hosts typically report the active tab on every update, so most reports are redundant.
/// `observe` filters those out; the caller performs save/restore for the returned transition
/// and then calls `commit`.
#[derive(Clone, Copy, Debug)]
pub struct TabReconciler<T> {
    previous: T,
}

impl<T: TabId> TabReconciler<T> {
    pub fn new(initial: T) -> Self {
        Self { previous: initial }
    }

    pub fn previous(&self) -> T {
        self.previous
    }

    pub fn observe(&self, active: T) -> Option<TabTransition<T>> {
        if active == self.previous {
            return None;
        }
        Some(TabTransition {
            from: self.previous,
            to: active,
        })
    }

    pub fn commit(&mut self, transition: TabTransition<T>) {
        debug_assert_eq!(
            transition.from, self.previous,
            "TabReconciler: committing a stale transition"
        );
        self.previous = transition.to;
    }
}
