//! Uniform-grid spatial index for Flock neighbour queries.
//!
//! Every step the emitted [`SpatialMessage`](flock_core::SpatialMessage)s
//! are bucketed by integer cell coordinate. Because the cell edge is at
//! least the perception radius, every message within range of a point
//! lies in the 3×3×3 block of cells around that point's cell, so a
//! query touches 27 buckets instead of the whole population.
//!
//! # Backends
//!
//! - [`SpatialGrid`]: hash map from [`CellCoord`] to message indices.
//! - [`BruteForceIndex`]: yields every message; the O(N²) reference.
//!
//! Both implement [`NeighbourIndex`], the seam the steering kernel is
//! generic over.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod brute;
pub mod cell;
pub mod error;
pub mod grid;
pub mod index;

pub use brute::BruteForceIndex;
pub use cell::{CellCoord, GridSpec};
pub use error::SpaceError;
pub use grid::SpatialGrid;
pub use index::NeighbourIndex;
