//! World configuration, validation, and error types.
//!
//! [`FlockConfig`] is the constructor input for a
//! [`FlockWorld`](crate::FlockWorld). [`validate()`](FlockConfig::validate)
//! checks every invariant up front so that stepping never has to.

use flock_core::{Agent, Environment, EnvironmentError, Vec3};
use flock_space::{GridSpec, SpaceError};
use thiserror::Error;

/// Cell size used when the perception radius is zero and no explicit
/// size is configured.
const FALLBACK_CELL_SIZE: f64 = 1.0;

/// Upper bound on explicit worker counts.
const MAX_WORKERS: usize = 64;

// ── ExecutionConfig ───────────────────────────────────────────────

/// How each phase is spread across threads.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ExecutionMode {
    /// One thread, plain loops.
    Serial,
    /// A dedicated rayon pool.
    #[default]
    Parallel,
}

/// Threading configuration for the step phases.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ExecutionConfig {
    /// Serial or parallel phases. Default: parallel.
    pub mode: ExecutionMode,
    /// Number of pool threads in parallel mode. `None` = auto-detect
    /// (`available_parallelism`, clamped to `[1, 64]`).
    pub worker_count: Option<usize>,
}

impl ExecutionConfig {
    /// Single-threaded execution.
    pub fn serial() -> Self {
        Self {
            mode: ExecutionMode::Serial,
            worker_count: None,
        }
    }

    /// Parallel execution on `workers` threads.
    pub fn parallel(workers: usize) -> Self {
        Self {
            mode: ExecutionMode::Parallel,
            worker_count: Some(workers),
        }
    }

    /// Resolve the actual worker count, applying auto-detection if `None`.
    ///
    /// Explicit values are clamped to `[1, 64]`. Serial mode always
    /// resolves to 1.
    pub fn resolved_worker_count(&self) -> usize {
        if self.mode == ExecutionMode::Serial {
            return 1;
        }
        match self.worker_count {
            Some(n) => n.clamp(1, MAX_WORKERS),
            None => std::thread::available_parallelism()
                .map(|n| n.get())
                .unwrap_or(4)
                .clamp(1, MAX_WORKERS),
        }
    }
}

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected during [`FlockConfig::validate()`] or world construction.
#[derive(Debug, PartialEq, Error)]
pub enum ConfigError {
    /// The environment failed its own validation.
    #[error("environment: {0}")]
    Environment(#[from] EnvironmentError),
    /// The grid geometry is invalid.
    #[error("grid: {0}")]
    Space(#[from] SpaceError),
    /// Grid cells smaller than the perception radius would miss neighbours
    /// outside the 27-cell block.
    #[error("cell_size {cell_size} is below perception_radius {perception_radius}")]
    CellSizeBelowRadius {
        /// The configured cell size.
        cell_size: f64,
        /// The environment's perception radius.
        perception_radius: f64,
    },
    /// An initial agent has a NaN or infinite position or velocity.
    #[error("agent {index} has a non-finite position or velocity")]
    NonFiniteAgent {
        /// Population index of the first offending agent.
        index: usize,
    },
    /// Parallel mode with `worker_count: Some(0)`.
    #[error("worker_count must be at least 1")]
    ZeroWorkers,
    /// The worker pool could not be started.
    #[error("thread pool: {reason}")]
    ThreadPool {
        /// Description from the pool builder.
        reason: String,
    },
}

/// Check that every agent starts with a finite position and velocity.
///
/// A NaN coordinate never compares outside the bounds, so it would
/// escape the wrap and stay out of the domain for good.
pub fn validate_agents(agents: &[Agent]) -> Result<(), ConfigError> {
    match agents.iter().position(|a| !a.is_finite()) {
        Some(index) => Err(ConfigError::NonFiniteAgent { index }),
        None => Ok(()),
    }
}

// ── FlockConfig ────────────────────────────────────────────────────

/// Complete configuration for constructing a flock world.
///
/// Defaults reproduce the classic model: weights 1.5 / 1.0 / 1.0,
/// radius 10, max speed 2, bounds `[-100, 100]³`, cells as wide as
/// the radius, grid anchored at the lower bounds corner.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FlockConfig {
    /// Steering weights, radius, speed cap and domain.
    pub environment: Environment,
    /// Grid cell edge. `None` = the perception radius. Must be at least
    /// the perception radius.
    pub cell_size: Option<f64>,
    /// Corner of grid cell `(0, 0, 0)`. `None` = `environment.bounds.min`.
    pub grid_origin: Option<Vec3>,
    /// Threading.
    pub execution: ExecutionConfig,
    /// Seed for generated populations.
    pub seed: u64,
}

impl FlockConfig {
    /// Validate all invariants, returning the first violation.
    pub fn validate(&self) -> Result<(), ConfigError> {
        // 1. Environment: finite weights, radius/speed >= 0, min < max.
        self.environment.validate()?;
        // 2. Grid geometry.
        self.grid_spec()?;
        // 3. Cell size covers the perception radius.
        let radius = self.environment.perception_radius;
        let cell_size = self.resolved_cell_size();
        if cell_size < radius {
            return Err(ConfigError::CellSizeBelowRadius {
                cell_size,
                perception_radius: radius,
            });
        }
        // 4. Workers.
        if self.execution.mode == ExecutionMode::Parallel && self.execution.worker_count == Some(0)
        {
            return Err(ConfigError::ZeroWorkers);
        }
        Ok(())
    }

    /// Cell edge actually used by the grid.
    pub fn resolved_cell_size(&self) -> f64 {
        match self.cell_size {
            Some(c) => c,
            None if self.environment.perception_radius > 0.0 => {
                self.environment.perception_radius
            }
            None => FALLBACK_CELL_SIZE,
        }
    }

    /// Grid origin actually used by the grid.
    pub fn resolved_grid_origin(&self) -> Vec3 {
        self.grid_origin.unwrap_or(self.environment.bounds.min)
    }

    /// Grid geometry for this configuration.
    pub fn grid_spec(&self) -> Result<GridSpec, ConfigError> {
        Ok(GridSpec::new(
            self.resolved_grid_origin(),
            self.resolved_cell_size(),
        )?)
    }
}
