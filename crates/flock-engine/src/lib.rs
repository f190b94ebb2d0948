//! Step scheduler and lockstep world for Flock simulations.
//!
//! Provides [`FlockWorld`], which owns a population, validates a
//! [`FlockConfig`], and advances the flock one Emit → Steer → Integrate
//! step at a time, collecting [`StepMetrics`] along the way.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod config;
pub mod error;
pub mod lockstep;
pub mod metrics;
pub mod population;
pub mod stats;
pub mod tick;

pub use config::{validate_agents, ConfigError, ExecutionConfig, ExecutionMode, FlockConfig};
pub use error::StepError;
pub use lockstep::FlockWorld;
pub use metrics::{CumulativeMetrics, StepMetrics};
pub use population::seeded_population;
pub use stats::PopulationStats;
pub use tick::{StepResult, StepScheduler};
