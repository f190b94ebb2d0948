//! Per-step performance metrics.
//!
//! [`StepMetrics`] captures timing and neighbourhood data for a single
//! step. [`CumulativeMetrics`] folds them over a run.

/// Timing and population metrics collected during a single step.
///
/// All durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Wall-clock time for the entire step.
    pub total_us: u64,
    /// Emit phase.
    pub emit_us: u64,
    /// Sealing the messages and rebuilding the spatial index.
    pub index_rebuild_us: u64,
    /// Steering phase.
    pub steering_us: u64,
    /// Integration phase.
    pub integrate_us: u64,
    /// Buffer swap.
    pub publish_us: u64,
    /// Population size.
    pub agents: usize,
    /// Grid cells holding at least one agent after the rebuild.
    pub occupied_cells: usize,
    /// Sum over agents of the number of neighbours within the radius.
    pub neighbour_total: u64,
    /// Agents whose speed was capped.
    pub clamped: u64,
    /// Agents that wrapped at a face of the domain.
    pub wrapped: u64,
}

impl StepMetrics {
    /// Mean neighbours per agent, zero for an empty population.
    pub fn mean_neighbours(&self) -> f64 {
        if self.agents == 0 {
            0.0
        } else {
            self.neighbour_total as f64 / self.agents as f64
        }
    }
}

/// Counters accumulated since construction or the last reset.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CumulativeMetrics {
    /// Completed steps.
    pub steps: u64,
    /// Sum of [`StepMetrics::total_us`].
    pub total_us: u64,
    /// Sum of [`StepMetrics::neighbour_total`].
    pub neighbour_total: u64,
    /// Sum of [`StepMetrics::clamped`].
    pub clamped: u64,
    /// Sum of [`StepMetrics::wrapped`].
    pub wrapped: u64,
}

impl CumulativeMetrics {
    /// Fold one completed step in.
    pub fn record(&mut self, step: &StepMetrics) {
        self.steps += 1;
        self.total_us += step.total_us;
        self.neighbour_total += step.neighbour_total;
        self.clamped += step.clamped;
        self.wrapped += step.wrapped;
    }

    /// Mean wall-clock time per step, zero before the first step.
    pub fn mean_step_us(&self) -> f64 {
        if self.steps == 0 {
            0.0
        } else {
            self.total_us as f64 / self.steps as f64
        }
    }
}
