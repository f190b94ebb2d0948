//! Arena-specific error types.

use thiserror::Error;

/// Errors that can occur while staging or publishing a step.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ArenaError {
    /// A message slot was written after the buffer was sealed.
    #[error("message buffer is sealed; no writes until the next step")]
    BufferSealed,
    /// Steering asked for the messages before the emit phase sealed them.
    #[error("message buffer is still open; seal it before reading")]
    BufferNotSealed,
    /// A slot index beyond the population size.
    #[error("message slot {index} out of range for population of {len}")]
    SlotOutOfRange {
        /// The requested slot.
        index: usize,
        /// Number of slots.
        len: usize,
    },
    /// A per-agent buffer does not match the population size.
    #[error("buffer holds {actual} slots but the population has {expected} agents")]
    LengthMismatch {
        /// Population size.
        expected: usize,
        /// Buffer length.
        actual: usize,
    },
    /// `publish()` without a preceding `begin_step()`, or called twice.
    #[error("publish() called without a step in progress")]
    NoStepInProgress,
}
