//! Grid geometry: [`GridSpec`] maps world points to [`CellCoord`]s.

use std::fmt;

use flock_core::Vec3;
use smallvec::SmallVec;

use crate::error::SpaceError;

/// Integer coordinate of one grid cell.
///
/// Cells are unbounded: points below the grid origin map to negative
/// coordinates and points far outside the simulation box still get a
/// well-defined cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellCoord {
    /// Cell index along x.
    pub x: i64,
    /// Cell index along y.
    pub y: i64,
    /// Cell index along z.
    pub z: i64,
}

impl CellCoord {
    /// Construct from components.
    pub const fn new(x: i64, y: i64, z: i64) -> Self {
        Self { x, y, z }
    }

    /// Offset by `(dx, dy, dz)`, or `None` if any axis overflows.
    pub fn checked_offset(self, dx: i64, dy: i64, dz: i64) -> Option<Self> {
        Some(Self {
            x: self.x.checked_add(dx)?,
            y: self.y.checked_add(dy)?,
            z: self.z.checked_add(dz)?,
        })
    }

    /// This cell followed by its 26 surrounding cells.
    ///
    /// Offsets that would overflow `i64` are dropped rather than
    /// saturated, so the result never contains duplicates.
    pub fn neighbourhood(self) -> SmallVec<[CellCoord; 27]> {
        let mut cells = SmallVec::new();
        cells.push(self);
        for dx in -1..=1 {
            for dy in -1..=1 {
                for dz in -1..=1 {
                    if dx == 0 && dy == 0 && dz == 0 {
                        continue;
                    }
                    if let Some(c) = self.checked_offset(dx, dy, dz) {
                        cells.push(c);
                    }
                }
            }
        }
        cells
    }
}

impl fmt::Display for CellCoord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

/// Origin and edge length of a uniform cubic grid.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GridSpec {
    origin: Vec3,
    cell_size: f64,
}

impl GridSpec {
    /// Create a grid whose cell `(0, 0, 0)` starts at `origin`.
    ///
    /// Returns `Err(SpaceError::InvalidCellSize)` unless `cell_size` is
    /// finite and positive, and `Err(SpaceError::InvalidOrigin)` if the
    /// origin has a NaN or infinite component.
    pub fn new(origin: Vec3, cell_size: f64) -> Result<Self, SpaceError> {
        if !cell_size.is_finite() || cell_size <= 0.0 {
            return Err(SpaceError::InvalidCellSize { value: cell_size });
        }
        if !origin.is_finite() {
            return Err(SpaceError::InvalidOrigin {
                origin: origin.to_array(),
            });
        }
        Ok(Self { origin, cell_size })
    }

    /// World position of the corner of cell `(0, 0, 0)`.
    pub fn origin(&self) -> Vec3 {
        self.origin
    }

    /// Edge length of each cubic cell.
    pub fn cell_size(&self) -> f64 {
        self.cell_size
    }

    /// `floor((p - origin) / cell_size)` per axis.
    ///
    /// Non-finite inputs saturate (`as` casts), so a NaN coordinate maps
    /// to cell 0 on that axis instead of panicking.
    pub fn cell_of(&self, p: Vec3) -> CellCoord {
        let c = ((p - self.origin) / self.cell_size).floor();
        CellCoord::new(c.x as i64, c.y as i64, c.z as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexSet;

    #[test]
    fn rejects_bad_cell_size() {
        for bad in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                GridSpec::new(Vec3::ZERO, bad),
                Err(SpaceError::InvalidCellSize { .. })
            ));
        }
    }

    #[test]
    fn rejects_non_finite_origin() {
        assert!(matches!(
            GridSpec::new(Vec3::new(0.0, f64::NAN, 0.0), 1.0),
            Err(SpaceError::InvalidOrigin { .. })
        ));
    }

    #[test]
    fn cell_of_floors_relative_to_origin() {
        let g = GridSpec::new(Vec3::splat(-100.0), 10.0).unwrap();
        assert_eq!(g.cell_of(Vec3::splat(-100.0)), CellCoord::new(0, 0, 0));
        assert_eq!(g.cell_of(Vec3::new(-90.0, -95.0, 0.0)), CellCoord::new(1, 0, 10));
        assert_eq!(g.cell_of(Vec3::new(100.0, 99.999, -100.5)), CellCoord::new(20, 19, -1));
    }

    #[test]
    fn neighbourhood_has_27_distinct_cells_centre_first() {
        let c = CellCoord::new(3, -2, 0);
        let n = c.neighbourhood();
        assert_eq!(n.len(), 27);
        assert_eq!(n[0], c);
        let distinct: IndexSet<CellCoord> = n.iter().copied().collect();
        assert_eq!(distinct.len(), 27);
        for cell in &n {
            assert!((cell.x - c.x).abs() <= 1);
            assert!((cell.y - c.y).abs() <= 1);
            assert!((cell.z - c.z).abs() <= 1);
        }
    }

    #[test]
    fn neighbourhood_drops_overflowing_offsets() {
        let c = CellCoord::new(i64::MAX, 0, 0);
        let n = c.neighbourhood();
        // The +1 slab along x (9 cells) overflows and is dropped.
        assert_eq!(n.len(), 18);
        let distinct: IndexSet<CellCoord> = n.iter().copied().collect();
        assert_eq!(distinct.len(), 18);
    }
}
