//! Hashed uniform grid.

use flock_core::{SpatialMessage, Vec3};
use indexmap::IndexMap;
use smallvec::SmallVec;
use tracing::trace;

use crate::cell::{CellCoord, GridSpec};
use crate::error::SpaceError;
use crate::index::NeighbourIndex;

/// Message indices stored in one cell. Most cells hold a handful of
/// agents at flocking densities, so small buckets stay inline.
type Bucket = SmallVec<[u32; 8]>;

/// Uniform grid mapping [`CellCoord`] → indices of the messages whose
/// position falls in that cell.
///
/// Rebuilt from scratch every step. Bucket allocations are kept across
/// rebuilds; buckets left empty after a rebuild are dropped so the map
/// does not grow without bound as the flock drifts.
///
/// # Examples
///
/// ```
/// use flock_core::{SpatialMessage, Vec3};
/// use flock_space::{GridSpec, SpatialGrid};
///
/// let spec = GridSpec::new(Vec3::splat(-100.0), 10.0).unwrap();
/// let msgs = vec![
///     SpatialMessage { position: Vec3::ZERO, velocity: Vec3::ZERO },
///     SpatialMessage { position: Vec3::new(5.0, 0.0, 0.0), velocity: Vec3::ZERO },
///     SpatialMessage { position: Vec3::new(90.0, 0.0, 0.0), velocity: Vec3::ZERO },
/// ];
/// let grid = SpatialGrid::build(spec, &msgs).unwrap();
/// let mut near: Vec<usize> = grid.query_indices(Vec3::ZERO).collect();
/// near.sort_unstable();
/// assert_eq!(near, vec![0, 1]);
/// ```
#[derive(Clone, Debug)]
pub struct SpatialGrid {
    spec: GridSpec,
    buckets: IndexMap<CellCoord, Bucket>,
    len: usize,
}

impl SpatialGrid {
    /// Create an empty grid.
    pub fn new(spec: GridSpec) -> Self {
        Self {
            spec,
            buckets: IndexMap::new(),
            len: 0,
        }
    }

    /// Create a grid and index `messages` in one call.
    pub fn build(spec: GridSpec, messages: &[SpatialMessage]) -> Result<Self, SpaceError> {
        let mut grid = Self::new(spec);
        grid.rebuild(messages)?;
        Ok(grid)
    }

    /// Grid geometry.
    pub fn spec(&self) -> &GridSpec {
        &self.spec
    }

    /// Number of cells holding at least one message.
    pub fn occupied_cells(&self) -> usize {
        self.buckets.len()
    }

    /// Message indices stored in `cell`, empty if the cell is vacant.
    pub fn bucket(&self, cell: CellCoord) -> &[u32] {
        self.buckets.get(&cell).map_or(&[], |b| b.as_slice())
    }

    /// The 27 cells around `cell`, centre first.
    pub fn neighbourhood(&self, cell: CellCoord) -> SmallVec<[CellCoord; 27]> {
        cell.neighbourhood()
    }

    /// Indices of every message in the 27-cell block around `point`'s cell.
    ///
    /// Each index appears once. Messages beyond the perception radius
    /// are included; callers filter by distance.
    pub fn query_indices(&self, point: Vec3) -> impl Iterator<Item = usize> + '_ {
        self.neighbourhood(self.spec.cell_of(point))
            .into_iter()
            .filter_map(move |cell| self.buckets.get(&cell))
            .flat_map(|bucket| bucket.iter().map(|&i| i as usize))
    }

    /// Like [`query_indices`](Self::query_indices) but resolves each
    /// index against the message slice the grid was built from.
    pub fn query<'a>(
        &'a self,
        point: Vec3,
        messages: &'a [SpatialMessage],
    ) -> impl Iterator<Item = (usize, &'a SpatialMessage)> + 'a {
        debug_assert_eq!(messages.len(), self.len, "query against a different message set");
        self.query_indices(point)
            .filter_map(move |i| messages.get(i).map(|m| (i, m)))
    }
}

impl NeighbourIndex for SpatialGrid {
    fn name(&self) -> &str {
        "uniform_grid"
    }

    fn rebuild(&mut self, messages: &[SpatialMessage]) -> Result<(), SpaceError> {
        if u32::try_from(messages.len()).is_err() {
            return Err(SpaceError::PopulationTooLarge {
                len: messages.len(),
            });
        }
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }
        for (i, msg) in messages.iter().enumerate() {
            let cell = self.spec.cell_of(msg.position);
            // Cast is lossless: length checked against u32::MAX above.
            self.buckets.entry(cell).or_default().push(i as u32);
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
        self.len = messages.len();
        trace!(
            messages = self.len,
            occupied_cells = self.buckets.len(),
            "spatial grid rebuilt"
        );
        Ok(())
    }

    fn len(&self) -> usize {
        self.len
    }

    fn for_each_candidate(&self, point: Vec3, visit: &mut dyn FnMut(usize)) {
        for i in self.query_indices(point) {
            visit(i);
        }
    }
}
