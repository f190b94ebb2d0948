//! The read-only simulation [`Environment`].
//!
//! Built once before the first step and shared immutably by every
//! phase. [`Environment::validate`] enforces the preconditions that the
//! integrator's boundary wrap and the steering radius test rely on.

use crate::agent::Vec3;
use crate::error::EnvironmentError;

/// Relative weights of the three classic steering components.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SteeringWeights {
    /// Weight of the separation (crowd avoidance) vector.
    pub separation: f64,
    /// Weight of the mean neighbour velocity.
    pub alignment: f64,
    /// Weight of the vector toward the neighbour centre of mass.
    pub cohesion: f64,
}

impl Default for SteeringWeights {
    fn default() -> Self {
        Self {
            separation: 1.5,
            alignment: 1.0,
            cohesion: 1.0,
        }
    }
}

/// Axis-aligned simulation domain.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Bounds {
    /// Lower corner.
    pub min: Vec3,
    /// Upper corner.
    pub max: Vec3,
}

impl Bounds {
    /// Create a box from its two corners. No validation is performed here.
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// A cube spanning `[lo, hi]` on every axis.
    pub fn cube(lo: f64, hi: f64) -> Self {
        Self::new(Vec3::splat(lo), Vec3::splat(hi))
    }

    /// Edge lengths of the box.
    pub fn extent(&self) -> Vec3 {
        self.max - self.min
    }

    /// Whether `p` lies inside the closed box.
    pub fn contains(&self, p: Vec3) -> bool {
        p.cmpge(self.min).all() && p.cmple(self.max).all()
    }

    /// Centre of the box.
    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::cube(-100.0, 100.0)
    }
}

/// Process-wide steering configuration, immutable during a run.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Environment {
    /// Steering component weights.
    pub weights: SteeringWeights,
    /// Maximum distance at which one agent senses another.
    pub perception_radius: f64,
    /// Speed cap applied after the steering force is added.
    pub max_speed: f64,
    /// Simulation domain; positions wrap at its faces.
    pub bounds: Bounds,
}

impl Default for Environment {
    fn default() -> Self {
        Self {
            weights: SteeringWeights::default(),
            perception_radius: 10.0,
            max_speed: 2.0,
            bounds: Bounds::default(),
        }
    }
}

impl Environment {
    /// Check all environment invariants.
    ///
    /// Weights may be any finite value (negative weights invert a
    /// component). The radius and speed cap must be finite and
    /// non-negative, and every axis must satisfy `min < max`.
    pub fn validate(&self) -> Result<(), EnvironmentError> {
        let w = &self.weights;
        for (name, value) in [
            ("separation", w.separation),
            ("alignment", w.alignment),
            ("cohesion", w.cohesion),
        ] {
            if !value.is_finite() {
                return Err(EnvironmentError::NonFiniteWeight { name, value });
            }
        }
        if !self.perception_radius.is_finite() || self.perception_radius < 0.0 {
            return Err(EnvironmentError::InvalidPerceptionRadius {
                value: self.perception_radius,
            });
        }
        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(EnvironmentError::InvalidMaxSpeed {
                value: self.max_speed,
            });
        }
        let (min, max) = (self.bounds.min.to_array(), self.bounds.max.to_array());
        for axis in 0..3 {
            if !min[axis].is_finite() || !max[axis].is_finite() || min[axis] >= max[axis] {
                return Err(EnvironmentError::InvalidBounds {
                    axis,
                    min: min[axis],
                    max: max[axis],
                });
            }
        }
        Ok(())
    }

    /// `perception_radius²`, the threshold used by the steering scan.
    pub fn perception_radius_sq(&self) -> f64 {
        self.perception_radius * self.perception_radius
    }
}
