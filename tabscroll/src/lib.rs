//! Headless per-tab scroll position memory.
//!
//! A tabbed view shows one scrollable surface per tab. When the user leaves a tab and comes back,
//! the surface should be where they left it. This crate keeps that memory:
//!
//! - a position store (tab → last offset)
//! - a container registry (tab → live surface handle)
//! - save/restore of offsets, with restores deferred to the host's next frame
//! - a reconciler that turns "the active tab is now X" reports into save + restore
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - surface handles implementing [`ScrollContainer`]
//! - the active tab on every update
//! - a frame pump (`flush_frame`) after each layout pass
//!
//! For a simulated surface and a reference host view, see the `tabscroll-adapter` crate.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod container;
mod frame;
mod key;
mod memory;
mod options;
mod reconciler;
mod registry;
mod state;
mod store;
mod types;

#[cfg(test)]
mod tests;

pub use container::ScrollContainer;
pub use frame::FrameQueue;
pub use memory::{ContainerSetter, ScrollHandler, ScrollMemory};
pub use options::{OnChangeCallback, ScrollMemoryOptions};
pub use reconciler::{TabReconciler, TabTransition};
pub use registry::ContainerRegistry;
pub use state::{ScrollSnapshot, TabPosition};
pub use store::PositionStore;
pub use types::{RestoreMode, Tab, TabId};

#[doc(hidden)]
pub use key::TabKey;
