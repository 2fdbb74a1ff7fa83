//! Injectable randomness for the simulation.
//!
//! Every stochastic draw in the engine (performance sampling, audit
//! triggers, utilization noise, cache-hit counts) goes through one
//! `RandomSource`, so a run is reproducible from a seed and tests can
//! substitute a scripted sequence.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// The single randomness seam of the simulator
pub trait RandomSource {
    /// Uniform draw in `[lo, hi)`
    fn uniform(&mut self, lo: f64, hi: f64) -> f64;

    /// Uniform integer draw in `[0, bound]` inclusive
    fn uniform_u64(&mut self, bound: u64) -> u64;

    /// Bernoulli trial with probability `p`
    fn chance(&mut self, p: f64) -> bool {
        self.uniform(0.0, 1.0) < p
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        (**self).uniform(lo, hi)
    }

    fn uniform_u64(&mut self, bound: u64) -> u64 {
        (**self).uniform_u64(bound)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

impl<R: RandomSource + ?Sized> RandomSource for Box<R> {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        (**self).uniform(lo, hi)
    }

    fn uniform_u64(&mut self, bound: u64) -> u64 {
        (**self).uniform_u64(bound)
    }

    fn chance(&mut self, p: f64) -> bool {
        (**self).chance(p)
    }
}

/// Seeded ChaCha-backed source for simulation runs
pub struct SeededSource {
    rng: ChaCha8Rng,
}

impl SeededSource {
    /// Create a source from a 64-bit seed
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }
}

impl RandomSource for SeededSource {
    fn uniform(&mut self, lo: f64, hi: f64) -> f64 {
        self.rng.gen_range(lo..hi)
    }

    fn uniform_u64(&mut self, bound: u64) -> u64 {
        self.rng.gen_range(0..=bound)
    }
}
