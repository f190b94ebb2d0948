//! Step-scoped storage for Flock simulations.
//!
//! A step reads one committed population and produces the next. The
//! arena keeps the three buffers that make that isolation explicit:
//!
//! ```text
//! PopulationArena
//! ├── buffer A ─┐ alternate between "published" (read by observers,
//! ├── buffer B ─┘ source of this step's messages) and "staging"
//! │               (forces and integrated state for the next step)
//! └── MessageBuffer  one SpatialMessage per agent, sealed before steering
//! ```
//!
//! The lifecycle per step is:
//! 1. `begin_step()`: copy published into staging, reopen the message buffer
//! 2. emit into the open [`MessageBuffer`] via the [`StepGuard`]
//! 3. `seal()`: freeze the messages; steering reads [`SealedMessages`]
//! 4. steer and integrate into the staging slice
//! 5. `publish()`: swap buffers; staging becomes the committed population
//!
//! Dropping the guard without publishing abandons the step: the
//! published population is untouched.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod message;
pub mod pingpong;

pub use error::ArenaError;
pub use message::{MessageBuffer, SealedMessages};
pub use pingpong::{PopulationArena, StepGuard};
