#[cfg(not(feature = "std"))]
use alloc::collections::{BTreeMap, BTreeSet};
#[cfg(feature = "std")]
use std::collections::{HashMap, HashSet};

#[cfg(feature = "std")]
pub(crate) type RenderedMap<I, V> = HashMap<I, V>;
#[cfg(not(feature = "std"))]
pub(crate) type RenderedMap<I, V> = BTreeMap<I, V>;

#[cfg(feature = "std")]
pub(crate) type IdSet<I> = HashSet<I>;
#[cfg(not(feature = "std"))]
pub(crate) type IdSet<I> = BTreeSet<I>;

#[cfg(feature = "std")]
#[doc(hidden)]
pub trait ItemId: Clone + core::fmt::Debug + core::hash::Hash + Eq {}
#[cfg(feature = "std")]
impl<I: Clone + core::fmt::Debug + core::hash::Hash + Eq> ItemId for I {}

#[cfg(not(feature = "std"))]
#[doc(hidden)]
pub trait ItemId: Clone + core::fmt::Debug + Ord {}
#[cfg(not(feature = "std"))]
impl<I: Clone + core::fmt::Debug + Ord> ItemId for I {}
