//! Benchmark profiles and utilities for the Flock simulation.
//!
//! Provides pre-built [`FlockConfig`] profiles for benchmarking and the
//! demo:
//!
//! - [`classic_profile`]: the textbook flock, 1,000 agents in `[-100, 100]³`
//! - [`dense_profile`]: 7,000 agents in the same box
//! - [`build_world`]: seed a [`FlockWorld`] from a profile

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use flock_engine::{ExecutionConfig, FlockConfig, FlockWorld};

/// Population of [`classic_profile`].
pub const CLASSIC_AGENTS: usize = 1_000;

/// Population of [`dense_profile`].
pub const DENSE_AGENTS: usize = 7_000;

/// A configuration paired with the population size it is meant for.
#[derive(Clone, Debug)]
pub struct Profile {
    /// World configuration.
    pub config: FlockConfig,
    /// Number of agents to seed.
    pub agents: usize,
}

/// Default weights and domain, 1,000 agents.
pub fn classic_profile(seed: u64, execution: ExecutionConfig) -> Profile {
    Profile {
        config: FlockConfig {
            execution,
            seed,
            ..FlockConfig::default()
        },
        agents: CLASSIC_AGENTS,
    }
}

/// Default weights and domain, 7,000 agents: roughly seven neighbours
/// per agent at radius 10.
pub fn dense_profile(seed: u64, execution: ExecutionConfig) -> Profile {
    Profile {
        agents: DENSE_AGENTS,
        ..classic_profile(seed, execution)
    }
}

/// Seed a world from `profile`.
///
/// # Panics
///
/// Panics if the profile configuration is invalid. The built-in
/// profiles are always valid.
pub fn build_world(profile: Profile) -> FlockWorld {
    FlockWorld::seeded(profile.config, profile.agents).expect("benchmark profile must be valid")
}
