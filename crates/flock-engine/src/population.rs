//! Seeded initial populations.

use flock_core::{Agent, Bounds, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` agents with positions uniform in `bounds` and each velocity
/// component uniform in `[-1, 1]`.
///
/// Deterministic: the same `(count, bounds, seed)` always yields the
/// same population, on every platform.
pub fn seeded_population(count: usize, bounds: &Bounds, seed: u64) -> Vec<Agent> {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let (lo, hi) = (bounds.min, bounds.max);
    (0..count)
        .map(|_| {
            let position = Vec3::new(
                rng.random_range(lo.x..=hi.x),
                rng.random_range(lo.y..=hi.y),
                rng.random_range(lo.z..=hi.z),
            );
            let velocity = Vec3::new(
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
                rng.random_range(-1.0..=1.0),
            );
            Agent::new(position, velocity)
        })
        .collect()
}
