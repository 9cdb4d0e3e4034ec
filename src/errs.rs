// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SkipListError {
    #[error("max level must be non-zero")]
    ZeroMaxLevel,
    #[error("max level {0} exceeds the limit of {limit}", limit = crate::config::MAX_LEVEL_LIMIT)]
    MaxLevelTooLarge(usize),
    #[error("level probability {0} must be in (0, 1)")]
    InvalidProbability(f64),
    #[error("level {level} is corrupted: {reason}")]
    Corrupted { level: usize, reason: String },
}

impl SkipListError {
    pub(crate) fn corrupted(level: usize, reason: impl Into<String>) -> Self {
        SkipListError::Corrupted {
            level,
            reason: reason.into(),
        }
    }
}
