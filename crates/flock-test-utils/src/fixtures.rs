//! Reusable population fixtures.
//!
//! - [`random_population`]: uniform positions in a box, uniform
//!   velocities in `[-1, 1]³`, deterministic per seed.
//! - [`brute_force_neighbours`]: the O(N²) definition of "neighbour".
//! - [`two_agent_line`]: the two-boid separation scenario.

use flock_core::{Agent, Bounds, SpatialMessage, Vec3};
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// `count` agents with positions uniform in `bounds` and velocities
/// uniform in `[-1, 1]³`.
pub fn random_population(count: usize, bounds: Bounds, seed: u64) -> Vec<Agent> {
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

/// The step-start message of every agent, in population order.
pub fn messages_of(agents: &[Agent]) -> Vec<SpatialMessage> {
    agents.iter().map(Agent::message).collect()
}

/// Indices `j` with `0 < |messages[j].position - point|² < radius²`,
/// found by scanning every message. Sorted ascending.
///
/// Uses the same strict comparisons as the steering kernel, so a
/// message exactly at `point` (the agent itself) is never reported.
pub fn brute_force_neighbours(messages: &[SpatialMessage], point: Vec3, radius: f64) -> Vec<usize> {
    let r2 = radius * radius;
    messages
        .iter()
        .enumerate()
        .filter(|(_, m)| {
            let d2 = point.distance_squared(m.position);
            d2 > 0.0 && d2 < r2
        })
        .map(|(j, _)| j)
        .collect()
}

/// Two stationary agents at `(0,0,0)` and `(1,0,0)`.
pub fn two_agent_line() -> Vec<Agent> {
    vec![
        Agent::new(Vec3::ZERO, Vec3::ZERO),
        Agent::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
    ]
}
