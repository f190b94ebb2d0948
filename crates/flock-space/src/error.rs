//! Error types for spatial index construction.

use thiserror::Error;

/// Errors arising from grid construction or rebuilds.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum SpaceError {
    /// Cell edge length is zero, negative, or not finite.
    #[error("cell_size must be finite and positive, got {value}")]
    InvalidCellSize {
        /// The rejected value.
        value: f64,
    },
    /// Grid origin has a non-finite component.
    #[error("grid origin must be finite, got {origin:?}")]
    InvalidOrigin {
        /// The rejected origin as `[x, y, z]`.
        origin: [f64; 3],
    },
    /// More messages than the index can address with `u32` slots.
    #[error("population of {len} exceeds u32::MAX index slots")]
    PopulationTooLarge {
        /// Number of messages passed to the rebuild.
        len: usize,
    },
}
