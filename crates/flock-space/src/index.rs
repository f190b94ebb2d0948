//! The [`NeighbourIndex`] trait.

use flock_core::{SpatialMessage, Vec3};

use crate::error::SpaceError;

/// A structure rebuilt from one step's messages that enumerates the
/// candidate neighbours of a query point.
///
/// # Contract
///
/// - After `rebuild(messages)`, `for_each_candidate(p, ..)` visits a
///   superset of every message index `j` with
///   `|messages[j].position - p| < r`, for the radius `r` the index was
///   configured for.
/// - Each index is visited at most once per call. Order is unspecified.
/// - An empty rebuild is valid and yields no candidates.
///
/// `Sync` is required because the steering phase queries one shared
/// index from many worker threads.
pub trait NeighbourIndex: Send + Sync {
    /// Human-readable backend name for logs and metrics.
    fn name(&self) -> &str;

    /// Discard the previous step's contents and index `messages`.
    fn rebuild(&mut self, messages: &[SpatialMessage]) -> Result<(), SpaceError>;

    /// Number of messages indexed by the last rebuild.
    fn len(&self) -> usize;

    /// Whether the last rebuild indexed no messages.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Visit the index of every candidate message near `point`.
    fn for_each_candidate(&self, point: Vec3, visit: &mut dyn FnMut(usize));
}
