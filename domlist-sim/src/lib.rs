//! Deterministic in-memory host and simulation harness for the `domlist` crate.
//!
//! The `domlist` engine talks to the document through its `Host` trait. This crate provides:
//!
//! - [`MemDom`]: an in-memory document with a node slab, a viewport, scroll state, and mutation
//!   counters, so scenarios can assert not just final structure but how much churn produced it.
//! - [`ListSim`]: a `DomList<String, MemDom>` plus a simulated clock, with gesture-level entry
//!   points (`user_scroll_to`, `resize`, `settle`).
//!
//! Everything is synchronous and clock-injected, which makes scenarios reproducible down to the
//! individual timer firing.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(all(not(feature = "std"), test))]
extern crate std;

mod memdom;
mod sim;

#[cfg(test)]
mod tests;

pub use memdom::{DomCounters, MemDom, NodeId};
pub use sim::ListSim;
