//! Error types for environment validation.

use thiserror::Error;

/// Invariant violations detected by [`Environment::validate`](crate::Environment::validate).
#[derive(Clone, Debug, PartialEq, Error)]
pub enum EnvironmentError {
    /// A steering weight is NaN or infinite.
    #[error("{name} weight must be finite, got {value}")]
    NonFiniteWeight {
        /// Which weight.
        name: &'static str,
        /// The rejected value.
        value: f64,
    },
    /// Perception radius is negative or not finite.
    #[error("perception_radius must be finite and non-negative, got {value}")]
    InvalidPerceptionRadius {
        /// The rejected value.
        value: f64,
    },
    /// Speed cap is negative or not finite.
    #[error("max_speed must be finite and non-negative, got {value}")]
    InvalidMaxSpeed {
        /// The rejected value.
        value: f64,
    },
    /// An axis has `min >= max` or a non-finite corner.
    #[error("bounds axis {axis}: min ({min}) must be finite and below max ({max})")]
    InvalidBounds {
        /// Axis index (0 = x, 1 = y, 2 = z).
        axis: usize,
        /// Lower bound on that axis.
        min: f64,
        /// Upper bound on that axis.
        max: f64,
    },
}
