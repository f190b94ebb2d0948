//! Exhaustive reference index.

use flock_core::{SpatialMessage, Vec3};

use crate::error::SpaceError;
use crate::index::NeighbourIndex;

/// Index that reports every message as a candidate for every query.
///
/// O(N) per query, O(N²) per step. Exists as the correctness oracle for
/// [`SpatialGrid`](crate::SpatialGrid) and for very small populations
/// where bucketing costs more than it saves.
#[derive(Clone, Debug, Default)]
pub struct BruteForceIndex {
    len: usize,
}

impl BruteForceIndex {
    /// Create an empty index.
    pub fn new() -> Self {
        Self::default()
    }
}

impl NeighbourIndex for BruteForceIndex {
    fn name(&self) -> &str {
        "brute_force"
    }

    fn rebuild(&mut self, messages: &[SpatialMessage]) -> Result<(), SpaceError> {
        self.len = messages.len();
        Ok(())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn for_each_candidate(&self, _point: Vec3, visit: &mut dyn FnMut(usize)) {
        for i in 0..self.len {
            visit(i);
        }
    }
}
