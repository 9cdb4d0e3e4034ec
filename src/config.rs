// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use getset::CopyGetters;

use crate::errs::SkipListError;

/// The default number of levels a list may grow to. With the default
/// probability this comfortably indexes 2^64 elements.
pub const DEFAULT_MAX_LEVEL: usize = 32;

/// The tallest list that can be configured. Even at `p = 0.5` a node reaches
/// level 64 with probability 2^-63.
pub const MAX_LEVEL_LIMIT: usize = 64;

/// The default chance that a node is promoted to the next level.
pub const DEFAULT_PROBABILITY: f64 = 0.25;

/// Shape parameters for a [`SkipList`](crate::SkipList).
#[derive(Debug, Clone, Copy, PartialEq, CopyGetters)]
#[getset(get_copy = "pub")]
pub struct Config {
    /// Height of the header, and so the tallest a node can be.
    max_level: usize,
    /// Probability that a node at level `n` also occupies level `n + 1`.
    probability: f64,
    /// Seed for the level generator. Entropy is used when unset.
    seed: Option<u64>,
}

impl Config {
    pub fn new(max_level: usize, probability: f64) -> Result<Self, SkipListError> {
        if max_level == 0 {
            return Err(SkipListError::ZeroMaxLevel);
        }
        if max_level > MAX_LEVEL_LIMIT {
            return Err(SkipListError::MaxLevelTooLarge(max_level));
        }
        // written this way so NaN is rejected too
        if !(probability > 0.0 && probability < 1.0) {
            return Err(SkipListError::InvalidProbability(probability));
        }
        Ok(Config {
            max_level,
            probability,
            seed: None,
        })
    }

    /// Pin the level generator to a seed so list shapes are reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default() {
        let config = Config::default();
        assert_eq!(config.max_level(), DEFAULT_MAX_LEVEL);
        assert_eq!(config.probability(), DEFAULT_PROBABILITY);
        assert_eq!(config.seed(), None);
    }

    #[test]
    fn test_with_seed() {
        let config = Config::new(8, 0.5).unwrap().with_seed(7);
        assert_eq!(config.max_level(), 8);
        assert_eq!(config.seed(), Some(7));
    }

    #[test]
    fn test_invalid_max_level() {
        assert_eq!(Config::new(0, 0.25), Err(SkipListError::ZeroMaxLevel));
    }

    #[test]
    fn test_max_level_limit() {
        assert!(Config::new(MAX_LEVEL_LIMIT, 0.25).is_ok());
        assert_eq!(
            Config::new(MAX_LEVEL_LIMIT + 1, 0.25),
            Err(SkipListError::MaxLevelTooLarge(MAX_LEVEL_LIMIT + 1))
        );
        assert_eq!(
            Config::new(usize::MAX / 16, 0.25),
            Err(SkipListError::MaxLevelTooLarge(usize::MAX / 16))
        );
    }

    #[test]
    fn test_invalid_probability() {
        for p in [0.0, 1.0, -0.5, 1.5] {
            assert_eq!(
                Config::new(4, p),
                Err(SkipListError::InvalidProbability(p))
            );
        }
        assert!(matches!(
            Config::new(4, f64::NAN),
            Err(SkipListError::InvalidProbability(_))
        ));
    }
}
