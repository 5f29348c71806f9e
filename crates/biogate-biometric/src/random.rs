//! Randomness seam shared by generators, the authentication gate and the
//! attack simulator.

use rand::{Rng, SeedableRng, rngs::StdRng};

/// Deterministic source for tests and reproducible runs.
#[must_use]
pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

/// Source seeded from operating system entropy.
#[must_use]
pub fn from_entropy() -> StdRng {
    StdRng::from_entropy()
}

/// Draw a uniform value in `[0, 1)`.
#[inline]
pub fn unit<R: Rng>(rng: &mut R) -> f64 {
    rng.gen_range(0.0..1.0)
}

/// Draw a uniform index in `0..len`.
///
/// `len` must be non-zero.
#[inline]
pub fn index<R: Rng>(rng: &mut R, len: usize) -> usize {
    rng.gen_range(0..len)
}
