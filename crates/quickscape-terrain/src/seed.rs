//! Deterministic seeded generation utilities.
//!
//! A run is driven by one `u64` seed: [`generation_rng`] turns it into a
//! ChaCha8 stream, and the terrain noise offset ([`TerrainSeed`]) is drawn
//! from that stream before any scattering happens.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Upper bound (exclusive) of the noise-space offset.
pub const TERRAIN_SEED_RANGE: f64 = 1000.0;

/// Offset added to both noise coordinates so each run samples a different
/// region of the noise field.
#[derive(Clone, Copy, Debug, PartialEq, PartialOrd)]
pub struct TerrainSeed(pub f64);

impl TerrainSeed {
    /// Draw a seed uniformly from `[0, TERRAIN_SEED_RANGE)`.
    pub fn draw<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self(rng.random_range(0.0..TERRAIN_SEED_RANGE))
    }

    /// The raw offset.
    pub fn value(self) -> f64 {
        self.0
    }
}

/// Build the RNG for a whole generation run.
///
/// The same seed produces the same sequence on every platform.
pub fn generation_rng(seed: u64) -> ChaCha8Rng {
    ChaCha8Rng::seed_from_u64(seed)
}

/// Draw a fresh run seed from the thread-local entropy source.
pub fn entropy_seed() -> u64 {
    rand::random()
}
