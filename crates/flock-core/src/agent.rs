//! Per-agent records: the [`Agent`] state and the [`SpatialMessage`]
//! it broadcasts each step.

/// Double-precision 3-vector used for positions, velocities and forces.
pub type Vec3 = glam::DVec3;

/// One boid: position, velocity and the steering force accumulated
/// during the current step.
///
/// Agents carry no identity; a population is an ordered `Vec<Agent>`
/// and an agent's index is stable for the whole run.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Agent {
    /// Position in world coordinates.
    pub position: Vec3,
    /// Velocity in world units per step.
    pub velocity: Vec3,
    /// Steering force written by the steering phase, consumed by integration.
    pub force: Vec3,
}

impl Agent {
    /// Create an agent with the given position and velocity and a zero force.
    pub fn new(position: Vec3, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            force: Vec3::ZERO,
        }
    }

    /// The message this agent broadcasts at the start of a step.
    pub fn message(&self) -> SpatialMessage {
        SpatialMessage {
            position: self.position,
            velocity: self.velocity,
        }
    }

    /// Current speed (magnitude of velocity).
    pub fn speed(&self) -> f64 {
        self.velocity.length()
    }

    /// Whether position and velocity are free of NaN and infinities.
    pub fn is_finite(&self) -> bool {
        self.position.is_finite() && self.velocity.is_finite()
    }
}

/// Position and velocity broadcast by one agent for one step.
///
/// Written once during the emit phase and discarded after steering.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SpatialMessage {
    /// Sender position at the start of the step.
    pub position: Vec3,
    /// Sender velocity at the start of the step.
    pub velocity: Vec3,
}
