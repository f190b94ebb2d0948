//! Steering phase: separation, alignment and cohesion from neighbours.

use flock_arena::{ArenaError, SealedMessages};
use flock_core::{Agent, Environment, SpatialMessage, SteeringWeights, Vec3};
use flock_space::NeighbourIndex;

use crate::executor::Executor;

/// Force on one agent and the number of neighbours that produced it.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Steering {
    /// Weighted sum of the three steering components.
    pub force: Vec3,
    /// Messages with `0 < d² < r²`.
    pub neighbours: u32,
}

/// Computes the classic three-rule steering force.
///
/// For an agent at `p`, every candidate message at `q` from the index
/// with `0 < |p − q|² < r²` contributes:
///
/// - separation: `(p − q) / |p − q|`
/// - alignment: the neighbour's velocity, averaged
/// - cohesion: the neighbour's position, averaged, minus `p`
///
/// The result is `w_s·sep + w_a·ali + w_c·coh`, or zero without
/// neighbours. A message at exactly `p` is skipped, which excludes the
/// agent's own message and any exact co-location.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringEvaluator {
    weights: SteeringWeights,
    radius_sq: f64,
}

impl SteeringEvaluator {
    /// Evaluator for the given weights and perception radius.
    pub fn new(weights: SteeringWeights, perception_radius: f64) -> Self {
        Self {
            weights,
            radius_sq: perception_radius * perception_radius,
        }
    }

    /// Evaluator configured from `env`.
    pub fn from_environment(env: &Environment) -> Self {
        Self {
            weights: env.weights,
            radius_sq: env.perception_radius_sq(),
        }
    }

    /// Kernel name for logs.
    pub fn name(&self) -> &str {
        "steering"
    }

    /// Steering for an agent at `point`.
    ///
    /// `index` must have been rebuilt from `messages`.
    pub fn force_for<I>(&self, point: Vec3, index: &I, messages: &[SpatialMessage]) -> Steering
    where
        I: NeighbourIndex + ?Sized,
    {
        let mut separation = Vec3::ZERO;
        let mut velocity_sum = Vec3::ZERO;
        let mut position_sum = Vec3::ZERO;
        let mut count = 0u32;

        index.for_each_candidate(point, &mut |j| {
            let Some(other) = messages.get(j) else {
                return;
            };
            let offset = point - other.position;
            let d2 = offset.length_squared();
            if d2 > 0.0 && d2 < self.radius_sq {
                separation += offset / d2.sqrt();
                velocity_sum += other.velocity;
                position_sum += other.position;
                count += 1;
            }
        });

        if count == 0 {
            return Steering::default();
        }
        let n = f64::from(count);
        let alignment = velocity_sum / n;
        let cohesion = position_sum / n - point;
        let w = self.weights;
        Steering {
            force: w.separation * separation + w.alignment * alignment + w.cohesion * cohesion,
            neighbours: count,
        }
    }

    /// Number of neighbours of `point` within the perception radius.
    pub fn neighbour_count<I>(&self, point: Vec3, index: &I, messages: &[SpatialMessage]) -> usize
    where
        I: NeighbourIndex + ?Sized,
    {
        let mut count = 0;
        index.for_each_candidate(point, &mut |j| {
            if let Some(other) = messages.get(j) {
                let d2 = point.distance_squared(other.position);
                if d2 > 0.0 && d2 < self.radius_sq {
                    count += 1;
                }
            }
        });
        count
    }

    /// Write every agent's force accumulator. Positions and velocities
    /// are left untouched.
    ///
    /// Returns the total neighbour count over the population.
    pub fn run<I>(
        &self,
        executor: &Executor,
        index: &I,
        messages: SealedMessages<'_>,
        agents: &mut [Agent],
    ) -> Result<u64, ArenaError>
    where
        I: NeighbourIndex + ?Sized,
    {
        if messages.len() != agents.len() {
            return Err(ArenaError::LengthMismatch {
                expected: agents.len(),
                actual: messages.len(),
            });
        }
        let messages = messages.as_slice();
        Ok(executor.sum_each_mut(agents, |i, agent| {
            let steering = self.force_for(messages[i].position, index, messages);
            agent.force = steering.force;
            u64::from(steering.neighbours)
        }))
    }
}
