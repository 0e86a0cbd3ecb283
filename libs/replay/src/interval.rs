use std::ops::RangeInclusive;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::config::ReplayOptions;

/// Генератор длительностей burst'ов в секундах.
pub trait IntervalSource {
    fn next_interval(&mut self) -> u64;

    /// Допустимый диапазон значений (включительно).
    fn range(&self) -> RangeInclusive<u64>;
}

/// Равномерно распределённые интервалы из `[min, max]`.
pub struct RandomIntervals {
    rng: StdRng,
    min: u64,
    max: u64,
}

impl RandomIntervals {
    pub fn new(min: u64, max: u64, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self { rng, min, max }
    }

    pub fn from_options(opts: &ReplayOptions) -> Self {
        Self::new(opts.min_interval, opts.max_interval, opts.seed)
    }
}

impl IntervalSource for RandomIntervals {
    fn next_interval(&mut self) -> u64 {
        self.rng.gen_range(self.min..=self.max)
    }

    fn range(&self) -> RangeInclusive<u64> {
        self.min..=self.max
    }
}
