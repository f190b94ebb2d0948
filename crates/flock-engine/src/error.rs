//! Errors surfaced while executing a step.

use flock_arena::ArenaError;
use flock_space::SpaceError;
use thiserror::Error;

/// A step failed and was abandoned.
///
/// These are internal invariant failures, not numeric conditions: the
/// step kernels never fail on degenerate geometry. The published
/// population is exactly what it was before the failing call.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum StepError {
    /// Message buffer or population buffer misuse.
    #[error("arena: {0}")]
    Arena(#[from] ArenaError),
    /// The spatial index could not be rebuilt.
    #[error("spatial index: {0}")]
    Space(#[from] SpaceError),
}
