// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! A skiplist implementation which keeps its elements sorted by a
//! caller-supplied comparator and tracks, for every link, how many elements it
//! skips over.
//!
//! SkipLists use a probabilistic distribution of nodes over the internal
//! levels, whereby the lowest level (level 0) contains all the nodes, and each
//! level `n > 0` will contain a random subset of the nodes on level `n - 1`.
//!
//! ```text
//! <head> ----------> [2] --------------------------------------------------> [9] ---------->
//! <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
//! <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
//! <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
//! ```
//!
//! Most commonly, a geometric distribution is used whereby the chance that a
//! node occupies level `n` is `p` times the chance of occupying level `n-1`
//! (with `0 < p < 1`). The default here is `p = 0.25` over at most 32 levels.
//!
//! Nodes live in an arena owned by the list and refer to each other by index,
//! so the level links and the backward link used for reverse traversal never
//! own anything.

mod iter;
mod level_generator;
#[allow(clippy::module_inception)]
mod skiplist;
mod skipnode;

pub use iter::{
    IntoIter,
    Iter,
};
pub use level_generator::{
    GeometricalLevelGenerator,
    LevelGenerator,
};
pub use skiplist::SkipList;
pub use skipnode::Node;
