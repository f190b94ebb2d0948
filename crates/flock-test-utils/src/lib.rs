//! Test utilities and reference oracles for Flock development.
//!
//! Provides seeded population generators and an exhaustive neighbour
//! scan used to check the spatial index and steering kernel against a
//! definition that is obviously correct.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod fixtures;

pub use fixtures::{brute_force_neighbours, messages_of, random_population, two_agent_line};
