//! Random sources for template selection.
//!
//! Every pick in the assistant goes through [`RandomSource`] so that tests can
//! pin the choice and assert exact replies.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait RandomSource: Send {
    /// Pick an index in `0..len`. Returns 0 when `len` is 0.
    fn pick(&mut self, len: usize) -> usize;
}

/// Thread-local RNG, the production default.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRandom;

impl RandomSource for ThreadRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        rand::thread_rng().gen_range(0..len)
    }
}

/// Reproducible RNG seeded from config (`assistant.seed`).
#[derive(Debug, Clone)]
pub struct SeededRandom(StdRng);

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl RandomSource for SeededRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.0.gen_range(0..len)
    }
}

/// Seeded RNG when a seed is configured, thread RNG otherwise.
pub fn from_seed(seed: Option<u64>) -> Box<dyn RandomSource> {
    match seed {
        Some(seed) => Box::new(SeededRandom::new(seed)),
        None => Box::new(ThreadRandom),
    }
}

/// Always picks the same slot (wrapped into range).
#[derive(Debug, Default, Clone, Copy)]
pub struct FixedRandom(pub usize);

impl RandomSource for FixedRandom {
    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.0 % len
    }
}
