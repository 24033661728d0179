//! Host-side utilities for the `tabscroll` crate.
//!
//! The `tabscroll` crate is UI-agnostic and only keeps the scroll memory. This crate provides
//! small, framework-neutral pieces a host needs around it:
//!
//! - `Surface`: a scrollable surface with toolkit-like layout rules (useful for simulation,
//!   tests and as a model for real bindings)
//! - `TabbedView`: a host view wiring surfaces, scroll notifications, tab selection and the
//!   frame pump to a `ScrollMemory`
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(test)]
extern crate std;

#[macro_use]
mod macros;

mod host;
mod surface;


pub use host::TabbedView;
pub use surface::{Extent, Surface};
