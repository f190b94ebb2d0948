//! Core types for the Flock boids simulation.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental data model shared by every other crate in the
//! workspace: the [`Vec3`] vector type, [`Agent`] and [`SpatialMessage`]
//! records, the read-only [`Environment`], tick identifiers, and the
//! environment validation error.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod agent;
pub mod environment;
pub mod error;
pub mod id;

pub use agent::{Agent, SpatialMessage, Vec3};
pub use environment::{Bounds, Environment, SteeringWeights};
pub use error::EnvironmentError;
pub use id::TickId;
