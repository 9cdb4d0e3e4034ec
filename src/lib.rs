// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

//! An ordered, duplicate-free index built on a rank-aware [`skip list`], the
//! same structure that sits under the sorted-set type of in-memory data
//! stores.
//!
//! The list is a single-owner container: it does no locking of its own, so
//! share it behind one external mutex if more than one thread needs it.
//!
//! [`skip list`]: https://en.wikipedia.org/wiki/Skip_list

/// Shape parameters and their defaults.
pub mod config;
/// The skip list itself.
pub mod skiplist;

mod compare;
mod errs;

pub use compare::{
    Comparator,
    Natural,
};
pub use config::{
    Config,
    DEFAULT_MAX_LEVEL,
    DEFAULT_PROBABILITY,
    MAX_LEVEL_LIMIT,
};
pub use errs::SkipListError;
pub use skiplist::{
    GeometricalLevelGenerator,
    LevelGenerator,
    Node,
    SkipList,
};
