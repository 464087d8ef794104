//! Random sources for the Monte Carlo estimators.
//!
//! Estimators draw through [`RandomSource`] so callers choose between a
//! clock-seeded source (fresh per call, not reproducible) and a fixed-seed
//! one (reproducible, used by tests and by `seed` in the kernel config).

use rand::rngs::StdRng;
use rand::{Rng, RngCore, SeedableRng};

/// Uniform draws used by the estimators.
pub trait RandomSource {
    /// A float uniformly distributed in `[0, 1)`.
    fn next_f64(&mut self) -> f64;

    /// An integer uniformly distributed in `[0, n)`. `n` must be non-zero.
    fn next_below(&mut self, n: u32) -> u32;
}

impl<R: RngCore + ?Sized> RandomSource for R {
    fn next_f64(&mut self) -> f64 {
        self.gen::<f64>()
    }

    fn next_below(&mut self, n: u32) -> u32 {
        self.gen_range(0..n)
    }
}

/// A source seeded from the current wall-clock time in nanoseconds.
pub fn clock_seeded() -> StdRng {
    use std::time::{SystemTime, UNIX_EPOCH};
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or_default();
    StdRng::seed_from_u64(nanos)
}

/// A source with a fixed seed.
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}
