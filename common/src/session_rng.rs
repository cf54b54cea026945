use std::ops::Range;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of randomness for food/boost/penalty placement and spawn rolls.
///
/// The engine only ever talks to this trait, so tests can substitute a scripted
/// source and drivers can reseed per game.
pub trait RandomSource {
    /// Uniform integer in `range` (start inclusive, end exclusive).
    fn random_range(&mut self, range: Range<i32>) -> i32;

    /// Returns true with probability `probability`.
    fn chance(&mut self, probability: f64) -> bool;

    fn coin_flip(&mut self) -> bool {
        self.chance(0.5)
    }
}

pub struct SessionRng {
    rng: StdRng,
    seed: u64,
}

impl SessionRng {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            seed,
        }
    }

    pub fn from_random() -> Self {
        let seed: u64 = rand::rng().random();
        Self::new(seed)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SessionRng {
    fn random_range(&mut self, range: Range<i32>) -> i32 {
        self.rng.random_range(range)
    }

    fn chance(&mut self, probability: f64) -> bool {
        self.rng.random::<f64>() < probability
    }

    fn coin_flip(&mut self) -> bool {
        self.rng.random()
    }
}
