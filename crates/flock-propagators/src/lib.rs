//! Per-agent kernels for the Flock step.
//!
//! # Phase order (each step)
//!
//! 1. [`Emit`]: published agents → open message buffer
//! 2. (seal the buffer, rebuild the spatial index from it)
//! 3. [`SteeringEvaluator`]: sealed messages + index → staging forces
//! 4. [`Integrator`]: staging force → velocity → position, wrap
//!
//! Each kernel runs through an [`Executor`], which returns only after
//! the whole population is done. Kernels are stateless apart from
//! their configuration and write only the slot of the agent they are
//! processing.

#![forbid(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod emit;
pub mod executor;
pub mod integrate;
pub mod steering;

pub use emit::Emit;
pub use executor::Executor;
pub use integrate::{IntegrationTally, Integrator};
pub use steering::{Steering, SteeringEvaluator};
