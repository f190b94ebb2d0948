//! Parallel-for over the population.
//!
//! Every phase of a step is one call into the [`Executor`]. The call
//! returns only once every agent has been processed, which is the
//! barrier between phases.

use std::fmt;
use std::iter::Sum;
use std::sync::Arc;

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::debug;

/// Runs a per-agent closure over a slice, serially or on a rayon pool.
///
/// Closures receive the agent index and a mutable reference to that
/// agent's own slot only. Shared inputs are captured by reference and
/// must be `Sync`. Per-agent results are folded with [`Sum`]; integer
/// sums do not depend on scheduling, so both variants produce identical
/// output for the same input.
#[derive(Clone, Default)]
pub enum Executor {
    /// Plain loop on the calling thread.
    #[default]
    Serial,
    /// Work-stealing over a dedicated thread pool.
    Parallel(Arc<ThreadPool>),
}

impl Executor {
    /// Build a parallel executor with `workers` threads.
    pub fn parallel(workers: usize) -> Result<Self, ThreadPoolBuildError> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("flock-worker-{i}"))
            .build()?;
        debug!(workers = pool.current_num_threads(), "step worker pool started");
        Ok(Self::Parallel(Arc::new(pool)))
    }

    /// Number of threads that process a phase.
    pub fn workers(&self) -> usize {
        match self {
            Self::Serial => 1,
            Self::Parallel(pool) => pool.current_num_threads(),
        }
    }

    /// Short name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Serial => "serial",
            Self::Parallel(_) => "parallel",
        }
    }

    /// Apply `f` to every element of `items`.
    pub fn for_each_mut<T, F>(&self, items: &mut [T], f: F)
    where
        T: Send,
        F: Fn(usize, &mut T) + Send + Sync,
    {
        match self {
            Self::Serial => items.iter_mut().enumerate().for_each(|(i, x)| f(i, x)),
            Self::Parallel(pool) => {
                pool.install(|| items.par_iter_mut().enumerate().for_each(|(i, x)| f(i, x)))
            }
        }
    }

    /// Apply `f` to every element of `items` and sum what it returns.
    pub fn sum_each_mut<T, S, F>(&self, items: &mut [T], f: F) -> S
    where
        T: Send,
        S: Sum<S> + Send,
        F: Fn(usize, &mut T) -> S + Send + Sync,
    {
        match self {
            Self::Serial => items.iter_mut().enumerate().map(|(i, x)| f(i, x)).sum(),
            Self::Parallel(pool) => pool.install(|| {
                items
                    .par_iter_mut()
                    .enumerate()
                    .map(|(i, x)| f(i, x))
                    .sum()
            }),
        }
    }
}

impl fmt::Debug for Executor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Executor")
            .field("mode", &self.name())
            .field("workers", &self.workers())
            .finish()
    }
}
