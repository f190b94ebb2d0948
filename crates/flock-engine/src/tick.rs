//! Step scheduler: the three-phase simulation loop.
//!
//! [`StepScheduler`] wires together the population arena, the spatial
//! grid and the three kernels into a deterministic step:
//!
//! ```text
//! begin_step ─► Emit ─► seal ─► grid rebuild ─► Steer ─► Integrate ─► publish
//! ```
//!
//! Each arrow is a barrier: a phase starts only after the previous one
//! has finished for every agent. A failure anywhere before `publish`
//! drops the staging buffer, leaving the published population as it
//! was.

use std::time::Instant;

use flock_arena::{PopulationArena, SealedMessages, StepGuard};
use flock_core::{Agent, Environment, TickId};
use flock_propagators::{Emit, Executor, Integrator, SteeringEvaluator};
use flock_space::{NeighbourIndex, SpatialGrid};
use tracing::{debug, warn};

use crate::config::{validate_agents, ConfigError, ExecutionMode, FlockConfig};
use crate::error::StepError;
use crate::metrics::{CumulativeMetrics, StepMetrics};

/// Result of a successful step.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StepResult {
    /// The tick that was just completed.
    pub tick: TickId,
    /// Performance metrics for this step.
    pub metrics: StepMetrics,
}

/// Owns all simulation state and executes steps synchronously.
#[derive(Debug)]
pub struct StepScheduler {
    environment: Environment,
    arena: PopulationArena,
    grid: SpatialGrid,
    emit: Emit,
    steering: SteeringEvaluator,
    integrator: Integrator,
    executor: Executor,
    current_tick: TickId,
    last_metrics: StepMetrics,
    cumulative: CumulativeMetrics,
}

impl StepScheduler {
    /// Construct a scheduler from a [`FlockConfig`] and initial agents.
    ///
    /// Validates the configuration and the agents, then starts the
    /// worker pool. Consumes the config.
    pub fn new(config: FlockConfig, agents: Vec<Agent>) -> Result<Self, ConfigError> {
        config.validate()?;
        validate_agents(&agents)?;
        let grid = SpatialGrid::new(config.grid_spec()?);
        let executor = match config.execution.mode {
            ExecutionMode::Serial => Executor::Serial,
            ExecutionMode::Parallel => {
                let workers = config.execution.resolved_worker_count();
                if let Some(requested) = config.execution.worker_count {
                    if requested != workers {
                        warn!(requested, workers, "worker_count clamped");
                    }
                }
                Executor::parallel(workers).map_err(|e| ConfigError::ThreadPool {
                    reason: e.to_string(),
                })?
            }
        };
        let env = config.environment;
        Ok(Self {
            environment: env,
            arena: PopulationArena::new(agents),
            grid,
            emit: Emit,
            steering: SteeringEvaluator::from_environment(&env),
            integrator: Integrator::from_environment(&env),
            executor,
            current_tick: TickId(0),
            last_metrics: StepMetrics::default(),
            cumulative: CumulativeMetrics::default(),
        })
    }

    /// Execute one step.
    ///
    /// On error nothing is published and the tick does not advance.
    pub fn execute_step(&mut self) -> Result<StepResult, StepError> {
        let step_start = Instant::now();
        let next_tick = self.current_tick.next();

        // 1. Begin step: staging = copy of published, messages reopened.
        let StepGuard {
            current,
            staging,
            messages,
        } = self.arena.begin_step();

        // 2. Emit.
        let emit_start = Instant::now();
        self.emit.run(&self.executor, current, messages)?;
        let emit_us = emit_start.elapsed().as_micros() as u64;

        // 3. Seal and rebuild the index from the sealed snapshot.
        let rebuild_start = Instant::now();
        let sealed = messages.seal()?;
        self.grid.rebuild(sealed.as_slice())?;
        let index_rebuild_us = rebuild_start.elapsed().as_micros() as u64;

        // 4. Steer: forces only.
        let steer_start = Instant::now();
        let neighbour_total = self
            .steering
            .run(&self.executor, &self.grid, sealed, staging)?;
        let steering_us = steer_start.elapsed().as_micros() as u64;

        // 5. Integrate in place on the staging buffer.
        let integrate_start = Instant::now();
        let tally = self.integrator.run(&self.executor, staging);
        let integrate_us = integrate_start.elapsed().as_micros() as u64;

        // 6. Publish.
        let publish_start = Instant::now();
        self.arena.publish(next_tick)?;
        let publish_us = publish_start.elapsed().as_micros() as u64;
        self.current_tick = next_tick;

        let metrics = StepMetrics {
            total_us: step_start.elapsed().as_micros() as u64,
            emit_us,
            index_rebuild_us,
            steering_us,
            integrate_us,
            publish_us,
            agents: self.arena.len(),
            occupied_cells: self.grid.occupied_cells(),
            neighbour_total,
            clamped: tally.clamped,
            wrapped: tally.wrapped,
        };
        debug!(
            tick = next_tick.0,
            agents = metrics.agents,
            occupied_cells = metrics.occupied_cells,
            mean_neighbours = metrics.mean_neighbours(),
            clamped = metrics.clamped,
            wrapped = metrics.wrapped,
            total_us = metrics.total_us,
            "step complete"
        );
        self.cumulative.record(&metrics);
        self.last_metrics = metrics.clone();

        Ok(StepResult {
            tick: next_tick,
            metrics,
        })
    }

    /// Replace the population and return to tick 0.
    ///
    /// On error the current population and tick are kept.
    pub fn reset(&mut self, agents: Vec<Agent>) -> Result<(), ConfigError> {
        validate_agents(&agents)?;
        self.arena.reset(agents);
        self.current_tick = TickId(0);
        self.last_metrics = StepMetrics::default();
        self.cumulative = CumulativeMetrics::default();
        Ok(())
    }

    /// The committed population.
    pub fn agents(&self) -> &[Agent] {
        self.arena.published()
    }

    /// Current tick ID (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.current_tick
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Counters since construction or the last reset.
    pub fn cumulative_metrics(&self) -> &CumulativeMetrics {
        &self.cumulative
    }

    /// The environment the kernels were built from.
    pub fn environment(&self) -> &Environment {
        &self.environment
    }

    /// The spatial index as of the last step.
    pub fn grid(&self) -> &SpatialGrid {
        &self.grid
    }

    /// Messages the last completed step was steered from, `None` before
    /// the first step or after a reset.
    pub fn last_messages(&self) -> Option<SealedMessages<'_>> {
        self.arena.messages().sealed().ok()
    }

    /// The steering kernel, for neighbour queries against [`grid`](Self::grid).
    pub fn steering(&self) -> &SteeringEvaluator {
        &self.steering
    }

    /// The phase executor.
    pub fn executor(&self) -> &Executor {
        &self.executor
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionConfig;
    use flock_core::Vec3;
    use flock_test_utils::two_agent_line;

    fn serial_config() -> FlockConfig {
        FlockConfig {
            execution: ExecutionConfig::serial(),
            ..FlockConfig::default()
        }
    }

    #[test]
    fn tick_advances_and_metrics_recorded() {
        let mut s = StepScheduler::new(serial_config(), two_agent_line()).unwrap();
        let r = s.execute_step().unwrap();
        assert_eq!(r.tick, TickId(1));
        assert_eq!(s.current_tick(), TickId(1));
        assert_eq!(r.metrics.agents, 2);
        assert_eq!(r.metrics.neighbour_total, 2);
        assert_eq!(r.metrics.occupied_cells, 1);
        assert_eq!(s.last_metrics(), &r.metrics);
        assert_eq!(s.cumulative_metrics().steps, 1);
    }

    #[test]
    fn forces_cleared_after_step() {
        let mut s = StepScheduler::new(serial_config(), two_agent_line()).unwrap();
        s.execute_step().unwrap();
        assert!(s.agents().iter().all(|a| a.force == Vec3::ZERO));
    }

    #[test]
    fn reset_returns_to_tick_zero() {
        let mut s = StepScheduler::new(serial_config(), two_agent_line()).unwrap();
        s.execute_step().unwrap();
        s.reset(vec![Agent::default()]).unwrap();
        assert_eq!(s.current_tick(), TickId(0));
        assert_eq!(s.agents().len(), 1);
        assert_eq!(s.cumulative_metrics(), &CumulativeMetrics::default());
    }

    #[test]
    fn non_finite_agents_rejected_at_construction() {
        let mut agents = two_agent_line();
        agents[1].velocity.x = f64::INFINITY;
        assert_eq!(
            StepScheduler::new(serial_config(), agents).unwrap_err(),
            ConfigError::NonFiniteAgent { index: 1 }
        );
    }

    #[test]
    fn rejected_reset_keeps_population() {
        let mut s = StepScheduler::new(serial_config(), two_agent_line()).unwrap();
        s.execute_step().unwrap();
        let before = s.agents().to_vec();
        let bad = vec![Agent::new(Vec3::new(f64::NAN, 0.0, 0.0), Vec3::ZERO)];
        assert_eq!(s.reset(bad), Err(ConfigError::NonFiniteAgent { index: 0 }));
        assert_eq!(s.current_tick(), TickId(1));
        assert_eq!(s.agents(), before.as_slice());
    }

    #[test]
    fn invalid_config_rejected() {
        let mut cfg = serial_config();
        cfg.environment.max_speed = f64::NAN;
        assert!(matches!(
            StepScheduler::new(cfg, Vec::new()),
            Err(ConfigError::Environment(_))
        ));
    }
}
