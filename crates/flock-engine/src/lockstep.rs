//! Lockstep (synchronous) flock world.
//!
//! [`FlockWorld`] is the primary user-facing API. Each call to
//! [`advance_one_step()`](FlockWorld::advance_one_step) runs one
//! complete Emit → Steer → Integrate step and returns its metrics.
//!
//! # Ownership model
//!
//! `FlockWorld` is [`Send`]. All mutating methods take `&mut self` and
//! [`agents()`](FlockWorld::agents) borrows from `self`, so a caller
//! cannot hold a view of the population across a step: external reads
//! only ever see completed steps.

use flock_core::{Agent, Environment, TickId, Vec3};
use tracing::info;

use crate::config::{ConfigError, FlockConfig};
use crate::error::StepError;
use crate::metrics::{CumulativeMetrics, StepMetrics};
use crate::population::seeded_population;
use crate::stats::PopulationStats;
use crate::tick::{StepResult, StepScheduler};

// Compile-time assertion: FlockWorld is Send.
const _: () = {
    #[allow(dead_code)]
    fn assert_send<T: Send>() {}
    #[allow(dead_code)]
    fn check() {
        assert_send::<FlockWorld>();
    }
};

/// Simulation world for lockstep execution.
///
/// # Example
///
/// ```
/// use flock_engine::{ExecutionConfig, FlockConfig, FlockWorld};
///
/// let config = FlockConfig {
///     execution: ExecutionConfig::serial(),
///     seed: 7,
///     ..FlockConfig::default()
/// };
/// let mut world = FlockWorld::seeded(config, 500).unwrap();
/// world.run(10).unwrap();
/// assert_eq!(world.current_tick().0, 10);
/// assert_eq!(world.agents().len(), 500);
/// ```
pub struct FlockWorld {
    scheduler: StepScheduler,
    seed: u64,
}

impl FlockWorld {
    /// Create a world from a [`FlockConfig`] and initial agent states.
    ///
    /// Force accumulators are zeroed on entry. Consumes the config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the config is invalid or any agent has
    /// a non-finite position or velocity.
    pub fn new(config: FlockConfig, agents: Vec<Agent>) -> Result<Self, ConfigError> {
        let seed = config.seed;
        let env = config.environment;
        let scheduler = StepScheduler::new(config, agents)?;
        info!(
            agents = scheduler.agents().len(),
            bounds_min = ?env.bounds.min,
            bounds_max = ?env.bounds.max,
            perception_radius = env.perception_radius,
            max_speed = env.max_speed,
            cell_size = scheduler.grid().spec().cell_size(),
            executor = scheduler.executor().name(),
            workers = scheduler.executor().workers(),
            "flock world created"
        );
        Ok(Self { scheduler, seed })
    }

    /// Create a world with `count` agents drawn from `config.seed`:
    /// positions uniform in the bounds, velocity components uniform in
    /// `[-1, 1]`.
    pub fn seeded(config: FlockConfig, count: usize) -> Result<Self, ConfigError> {
        config.validate()?;
        let agents = seeded_population(count, &config.environment.bounds, config.seed);
        Self::new(config, agents)
    }

    /// Execute one step.
    ///
    /// # Errors
    ///
    /// Returns [`StepError`] on an internal invariant failure. The step
    /// is abandoned: the population and tick are unchanged.
    pub fn advance_one_step(&mut self) -> Result<StepResult, StepError> {
        self.scheduler.execute_step()
    }

    /// Execute `steps` steps, stopping at the first error.
    ///
    /// Returns the result of the last step, or `None` when `steps == 0`.
    pub fn run(&mut self, steps: u64) -> Result<Option<StepResult>, StepError> {
        let mut last = None;
        for _ in 0..steps {
            last = Some(self.advance_one_step()?);
        }
        Ok(last)
    }

    /// Reinstall a population and return to tick 0.
    ///
    /// Clears the metrics. Configuration and the worker pool are kept.
    /// Non-finite agents are rejected with
    /// [`ConfigError::NonFiniteAgent`] and leave the world unchanged.
    pub fn reset(&mut self, agents: Vec<Agent>) -> Result<(), ConfigError> {
        self.scheduler.reset(agents)
    }

    /// The population after the last completed step.
    pub fn agents(&self) -> &[Agent] {
        self.scheduler.agents()
    }

    /// Positions of every agent, in population order.
    pub fn positions(&self) -> Vec<Vec3> {
        self.agents().iter().map(|a| a.position).collect()
    }

    /// Summary statistics of the current population.
    pub fn stats(&self) -> PopulationStats {
        PopulationStats::from_agents(self.agents())
    }

    /// Number of neighbours agent `index` had in the last step, or
    /// `None` if out of range or before the first step.
    pub fn neighbour_count(&self, index: usize) -> Option<usize> {
        let messages = self.scheduler.last_messages()?;
        let point = messages.get(index)?.position;
        Some(self.scheduler.steering().neighbour_count(
            point,
            self.scheduler.grid(),
            messages.as_slice(),
        ))
    }

    /// Current tick ID (0 after construction or reset).
    pub fn current_tick(&self) -> TickId {
        self.scheduler.current_tick()
    }

    /// Metrics from the most recent successful step.
    pub fn last_metrics(&self) -> &StepMetrics {
        self.scheduler.last_metrics()
    }

    /// Counters since construction or the last reset.
    pub fn cumulative_metrics(&self) -> &CumulativeMetrics {
        self.scheduler.cumulative_metrics()
    }

    /// The environment the world was built with.
    pub fn environment(&self) -> &Environment {
        self.scheduler.environment()
    }

    /// The configured seed.
    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl std::fmt::Debug for FlockWorld {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlockWorld")
            .field("current_tick", &self.current_tick())
            .field("agents", &self.agents().len())
            .field("seed", &self.seed)
            .field("executor", self.scheduler.executor())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ExecutionConfig;
    use flock_test_utils::two_agent_line;

    fn serial_config() -> FlockConfig {
        FlockConfig {
            execution: ExecutionConfig::serial(),
            ..FlockConfig::default()
        }
    }

    #[test]
    fn run_zero_steps_is_none() {
        let mut w = FlockWorld::new(serial_config(), two_agent_line()).unwrap();
        assert_eq!(w.run(0).unwrap(), None);
        assert_eq!(w.current_tick(), TickId(0));
    }

    #[test]
    fn run_reports_last_step() {
        let mut w = FlockWorld::new(serial_config(), two_agent_line()).unwrap();
        let last = w.run(5).unwrap().unwrap();
        assert_eq!(last.tick, TickId(5));
        assert_eq!(w.cumulative_metrics().steps, 5);
    }

    #[test]
    fn neighbour_count_after_step() {
        let mut w = FlockWorld::new(serial_config(), two_agent_line()).unwrap();
        assert_eq!(w.neighbour_count(0), None);
        w.advance_one_step().unwrap();
        assert_eq!(w.neighbour_count(0), Some(1));
        assert_eq!(w.neighbour_count(1), Some(1));
        assert_eq!(w.neighbour_count(2), None);
        w.reset(two_agent_line()).unwrap();
        assert_eq!(w.neighbour_count(0), None);
    }

    #[test]
    fn non_finite_start_rejected() {
        let agents = vec![
            Agent::new(Vec3::new(f64::NAN, 0.0, 0.0), Vec3::ZERO),
            Agent::new(Vec3::new(1.0, 0.0, 0.0), Vec3::new(f64::INFINITY, 0.0, 0.0)),
        ];
        assert_eq!(
            FlockWorld::new(serial_config(), agents).unwrap_err(),
            ConfigError::NonFiniteAgent { index: 0 }
        );
    }

    #[test]
    fn reset_rejects_non_finite_agents() {
        let mut w = FlockWorld::new(serial_config(), two_agent_line()).unwrap();
        w.run(2).unwrap();
        let mut bad = two_agent_line();
        bad[1].position.y = f64::NEG_INFINITY;
        assert_eq!(w.reset(bad), Err(ConfigError::NonFiniteAgent { index: 1 }));
        assert_eq!(w.current_tick(), TickId(2));
        let env = *w.environment();
        assert!(w.agents().iter().all(|a| env.bounds.contains(a.position)));
    }

    #[test]
    fn seeded_world_uses_config_seed() {
        let cfg = FlockConfig {
            seed: 3,
            ..serial_config()
        };
        let a = FlockWorld::seeded(cfg.clone(), 50).unwrap();
        let b = FlockWorld::seeded(cfg, 50).unwrap();
        assert_eq!(a.agents(), b.agents());
        assert_eq!(a.seed(), 3);
    }

    #[test]
    fn positions_follow_agents() {
        let w = FlockWorld::new(serial_config(), two_agent_line()).unwrap();
        assert_eq!(w.positions(), vec![Vec3::ZERO, Vec3::new(1.0, 0.0, 0.0)]);
        assert_eq!(w.stats().count, 2);
    }

    #[test]
    fn debug_reports_tick() {
        let w = FlockWorld::new(serial_config(), Vec::new()).unwrap();
        let s = format!("{w:?}");
        assert!(s.contains("current_tick"));
    }
}
