//! Flock: a spatially-indexed 3-D boids simulation core.
//!
//! This is the top-level facade crate that re-exports the public API from all
//! Flock sub-crates. For most users, adding `flock` as a single dependency is
//! sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use flock::prelude::*;
//!
//! // Two boids one unit apart, pure separation.
//! let config = FlockConfig {
//!     environment: Environment {
//!         weights: SteeringWeights { separation: 1.0, alignment: 0.0, cohesion: 0.0 },
//!         ..Environment::default()
//!     },
//!     execution: ExecutionConfig::serial(),
//!     ..FlockConfig::default()
//! };
//! let agents = vec![
//!     Agent::new(Vec3::ZERO, Vec3::ZERO),
//!     Agent::new(Vec3::new(1.0, 0.0, 0.0), Vec3::ZERO),
//! ];
//! let mut world = FlockWorld::new(config, agents).unwrap();
//! let result = world.advance_one_step().unwrap();
//! assert_eq!(result.tick, TickId(1));
//! assert_eq!(world.positions()[0], Vec3::new(-1.0, 0.0, 0.0));
//! assert_eq!(world.positions()[1], Vec3::new(2.0, 0.0, 0.0));
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `flock-core` | `Vec3`, `Agent`, `SpatialMessage`, `Environment`, `TickId` |
//! | [`space`] | `flock-space` | Uniform grid, `NeighbourIndex`, brute-force index |
//! | [`arena`] | `flock-arena` | Message buffer and ping-pong population storage |
//! | [`propagators`] | `flock-propagators` | Emit, steering and integration kernels, `Executor` |
//! | [`engine`] | `flock-engine` | Configuration, step scheduler, `FlockWorld`, metrics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types (`flock-core`).
pub use flock_core as types;

/// Spatial indexing (`flock-space`).
///
/// [`space::SpatialGrid`] is the production index;
/// [`space::BruteForceIndex`] is the O(N²) reference.
pub use flock_space as space;

/// Message buffer and population storage (`flock-arena`).
pub use flock_arena as arena;

/// Per-agent kernels (`flock-propagators`).
pub use flock_propagators as propagators;

/// Configuration and the lockstep world (`flock-engine`).
pub use flock_engine as engine;

/// Common imports for typical Flock usage.
///
/// ```rust
/// use flock::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use flock_core::{
        Agent, Bounds, Environment, SpatialMessage, SteeringWeights, TickId, Vec3,
    };

    // Errors
    pub use flock_core::EnvironmentError;
    pub use flock_engine::{ConfigError, StepError};

    // Engine
    pub use flock_engine::{
        ExecutionConfig, ExecutionMode, FlockConfig, FlockWorld, PopulationStats, StepMetrics,
        StepResult,
    };
}
