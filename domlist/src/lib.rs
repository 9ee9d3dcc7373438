//! A windowed DOM-list rendering engine with pluggable layout strategies.
//!
//! `domlist` keeps a long ordered list of item ids and materializes only the slice that is
//! visible in a scrollable container (plus a configurable overscan), adding and removing nodes
//! as the user scrolls. The document itself sits behind the [`Host`] trait, so the same engine
//! drives a browser DOM binding, a TUI region tree, or the deterministic in-memory host in
//! `domlist-sim`.
//!
//! The building blocks:
//! - [`DomList`]: the engine. Owns the id sequence, the memoized [`Geometry`], the rendered-node
//!   map, and the named debounce timers; every mutation and scroll reaction funnels through it.
//! - [`Host`]: the document boundary (node creation, attachment, measurement, scrolling, and
//!   the optional custom-scrollbar widget).
//! - [`RenderLayout`] with four built-ins selected by [`LayoutChoice`]: absolutely positioned
//!   items, and three natural-flow variants that stand in for off-screen rows with spacer
//!   elements.
//! - [`ListOptions`]: configuration around the one required capability, the render callback.
//!
//! Time is injected: hosts report scroll events through [`DomList::on_scroll_event`] and pump
//! deferred work through [`DomList::tick`] with their own monotonic milliseconds, which keeps
//! the engine deterministic under test.
#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

#[cfg(all(not(feature = "std"), test))]
extern crate std;

#[macro_use]
mod macros;

mod debounce;
mod engine;
mod events;
mod geometry;
mod host;
mod id;
mod layout;
mod options;
mod types;


pub use engine::DomList;
pub use events::{ListEvent, ListEventHandler};
pub use geometry::{Geometry, GeometryInputs};
pub use host::Host;
pub use layout::{
    AbsoluteLayout, GridLayout, LayoutChoice, LayoutFrame, ListLayout, RenderLayout, TableLayout,
};
pub use options::{ItemWidth, ListCallback, ListOptions, RemoveItemFn, RenderItemFn};
pub use types::{
    NodeKind, ScrollDirection, Scrollbar, ScrollbarOptions, ViewRange, ViewState, Viewport,
};

#[doc(hidden)]
pub use id::ItemId;
