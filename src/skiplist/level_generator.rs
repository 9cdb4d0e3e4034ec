// Copyright (c) Sienna Satterwhite, CesiumDB Contributors
// SPDX-License-Identifier: GPL-3.0-only WITH Classpath-exception-2.0

use rand::{
    rngs::SmallRng,
    Rng,
    SeedableRng,
};

use crate::{
    config::Config,
    errs::SkipListError,
};

/// Upon the insertion of a new node in the list, the node is replicated to high
/// levels with a certain probability as determined by a `LevelGenerator`.
pub trait LevelGenerator {
    /// The total number of levels that are assumed to exist for this level
    /// generator.
    fn total(&self) -> usize;
    /// Generate the height of a new node in the range `[1, total]`.
    ///
    /// This must never return `0` or a level that is `> self.total()`.
    fn random(&mut self) -> usize;
}

/// A level generator which will produce geometrically distributed numbers.
///
/// The probability of generating level `n` is `p` times the probability of
/// generating level `n-1`, with the probability truncated at the maximum number
/// of levels allowed.
#[derive(Debug, Clone)]
pub struct GeometricalLevelGenerator<R = SmallRng> {
    total: usize,
    p: f64,
    rng: R,
}

impl GeometricalLevelGenerator<SmallRng> {
    /// Create a new GeometricalLevelGenerator with `total` number of levels,
    /// and `p` as the probability that a given node is present in the next
    /// level. The generator is seeded from system entropy.
    pub fn new(total: usize, p: f64) -> Result<Self, SkipListError> {
        Config::new(total, p).map(|config| Self::from_config(&config))
    }

    /// Build a generator from an already validated [`Config`], honouring its
    /// seed when one is set.
    pub fn from_config(config: &Config) -> Self {
        let rng = match config.seed() {
            | Some(seed) => SmallRng::seed_from_u64(seed),
            | None => SmallRng::from_entropy(),
        };
        GeometricalLevelGenerator {
            total: config.max_level(),
            p: config.probability(),
            rng,
        }
    }
}

impl<R: Rng> GeometricalLevelGenerator<R> {
    /// Same as [`GeometricalLevelGenerator::new`] but draws from the given
    /// random source.
    pub fn with_rng(total: usize, p: f64, rng: R) -> Result<Self, SkipListError> {
        let config = Config::new(total, p)?;
        Ok(GeometricalLevelGenerator {
            total: config.max_level(),
            p: config.probability(),
            rng,
        })
    }
}

impl Default for GeometricalLevelGenerator<SmallRng> {
    fn default() -> Self {
        Self::from_config(&Config::default())
    }
}

impl<R: Rng> LevelGenerator for GeometricalLevelGenerator<R> {
    fn random(&mut self) -> usize {
        let mut h = 1;
        let mut x = self.p;
        let f = 1.0 - self.rng.gen::<f64>();
        while x > f && h < self.total {
            h += 1;
            x *= self.p
        }
        h
    }

    fn total(&self) -> usize {
        self.total
    }
}

#[cfg(test)]
mod tests {
    use rand::{
        rngs::SmallRng,
        SeedableRng,
    };

    use super::{
        GeometricalLevelGenerator,
        LevelGenerator,
    };
    use crate::{
        config::Config,
        errs::SkipListError,
    };

    #[test]
    fn invalid_total() {
        assert!(matches!(
            GeometricalLevelGenerator::new(0, 0.5),
            Err(SkipListError::ZeroMaxLevel)
        ));
    }

    #[test]
    fn invalid_p_0() {
        assert!(matches!(
            GeometricalLevelGenerator::new(1, 0.0),
            Err(SkipListError::InvalidProbability(_))
        ));
    }

    #[test]
    fn invalid_p_1() {
        assert!(matches!(
            GeometricalLevelGenerator::new(1, 1.0),
            Err(SkipListError::InvalidProbability(_))
        ));
    }

    #[test]
    fn invalid_total_too_large() {
        assert!(matches!(
            GeometricalLevelGenerator::with_rng(65, 0.5, SmallRng::seed_from_u64(1)),
            Err(SkipListError::MaxLevelTooLarge(65))
        ));
    }

    #[test]
    fn new() {
        let lg = GeometricalLevelGenerator::new(1, 0.5).unwrap();
        assert_eq!(lg.total(), 1);
    }

    #[test]
    fn single_level_is_always_one() {
        let mut lg = GeometricalLevelGenerator::new(1, 0.99).unwrap();
        for _ in 0..1_000 {
            assert_eq!(lg.random(), 1);
        }
    }

    #[test]
    fn levels_stay_in_range() {
        let mut lg =
            GeometricalLevelGenerator::with_rng(4, 0.9, SmallRng::seed_from_u64(3)).unwrap();
        for _ in 0..10_000 {
            let level = lg.random();
            assert!((1..=4).contains(&level), "level {level} out of range");
        }
    }

    #[test]
    fn seeded_generators_agree() {
        let config = Config::default().with_seed(1234);
        let mut a = GeometricalLevelGenerator::from_config(&config);
        let mut b = GeometricalLevelGenerator::from_config(&config);
        let a = (0..256).map(|_| a.random()).collect::<Vec<_>>();
        let b = (0..256).map(|_| b.random()).collect::<Vec<_>>();
        assert_eq!(a, b);
    }

    #[test]
    fn distribution_is_geometric() {
        const SAMPLES: usize = 100_000;
        let mut lg =
            GeometricalLevelGenerator::with_rng(32, 0.25, SmallRng::seed_from_u64(42)).unwrap();

        let mut at_least = [0usize; 5];
        for _ in 0..SAMPLES {
            let level = lg.random();
            for (k, count) in at_least.iter_mut().enumerate() {
                if level > k {
                    *count += 1;
                }
            }
        }

        // P(level >= k + 1) = 0.25^k
        assert_eq!(at_least[0], SAMPLES);
        let mut expected = 1.0;
        for count in at_least {
            let observed = count as f64 / SAMPLES as f64;
            assert!(
                (observed - expected).abs() < 0.01,
                "observed {observed}, expected {expected}"
            );
            expected *= 0.25;
        }
    }
}
