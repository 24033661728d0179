#[cfg(not(feature = "std"))]
use alloc::collections::BTreeMap;
#[cfg(feature = "std")]
use std::collections::HashMap;

#[cfg(feature = "std")]
pub(crate) type TabMap<K, V> = HashMap<K, V>;
#[cfg(not(feature = "std"))]
pub(crate) type TabMap<K, V> = BTreeMap<K, V>;

/// Map-key requirements for tab identifiers (`Hash + Eq` with `std`, `Ord` without).
#[cfg(feature = "std")]
#[doc(hidden)]
pub trait TabKey: core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<K: core::hash::Hash + Eq> TabKey for K {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait TabKey: Ord {}
#[cfg(not(feature = "std"))]
impl<K: Ord> TabKey for K {}
