//! Cube grids over the integer lattice in three dimensions.

use crate::grid::{bound_admits, offset_cell, Move};
use crate::{Bound, CubeBound};
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;
use tessera_core::{Aabb, Cell, CellType, Connection, Corner, Dir, GridError};

/// Neighbor deltas in [`tessera_core::CubeDir`] order: the four lateral
/// directions counter-clockwise from +X, then +Z and −Z.
const CUBE_DELTAS: [(i32, i32, i32); 6] = [
    (1, 0, 0),
    (0, 1, 0),
    (-1, 0, 0),
    (0, -1, 0),
    (0, 0, 1),
    (0, 0, -1),
];

/// Inverse of each cube direction: 0↔2, 1↔3, 4↔5.
const INVERSE: [u32; 6] = [2, 3, 0, 1, 5, 4];

/// An axis-aligned grid of boxes filling space.
///
/// Every integer triple is a cell; cell `(x, y, z)` is centered at
/// `(x·w, y·h, z·d)` for cell size `(w, h, d)`. This is the only
/// primitive grid whose cells have volume, so [`polygon`] is
/// unsupported and corner indices use the cube bit pattern
/// `x | y << 1 | z << 2`.
///
/// [`polygon`]: CubeGrid::polygon
#[derive(Debug, Clone, PartialEq)]
pub struct CubeGrid {
    cell_size: Vector3<f64>,
    bound: Option<Bound>,
}

impl CubeGrid {
    /// An unbounded cube grid with the given cell size.
    ///
    /// All three components must be positive and finite.
    pub fn new(cell_size: Vector3<f64>) -> Result<Self, GridError> {
        for v in [cell_size.x, cell_size.y, cell_size.z] {
            if !(v.is_finite() && v > 0.0) {
                return Err(GridError::invalid(format!(
                    "cube cell size must be positive and finite, got ({}, {}, {})",
                    cell_size.x, cell_size.y, cell_size.z
                )));
            }
        }
        Ok(Self {
            cell_size,
            bound: None,
        })
    }

    /// A cube grid restricted to a box of cells.
    pub fn bounded(cell_size: Vector3<f64>, bound: CubeBound) -> Result<Self, GridError> {
        let mut grid = Self::new(cell_size)?;
        grid.bound = Some(Bound::Cube(bound));
        Ok(grid)
    }

    /// World-space size of one cell.
    pub fn cell_size(&self) -> Vector3<f64> {
        self.cell_size
    }

    /// The restricting bound, if any.
    pub fn bound(&self) -> Option<&Bound> {
        self.bound.as_ref()
    }

    /// Whether `cell` belongs to the grid. Every triple is lattice
    /// valid, so only the bound can exclude a cell.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        bound_admits(self.bound.as_ref(), cell, || self.center_of(cell))
    }

    /// The cell type shared by every cell.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        self.require_cell(cell)?;
        Ok(CellType::Cube)
    }

    /// Steps from `cell` along `dir`. The connection is always the
    /// identity.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        self.require_cell(cell)?;
        let Some(&(dx, dy, dz)) = CUBE_DELTAS.get(dir.0 as usize) else {
            return Ok(None);
        };
        let Some(dest) = offset_cell(cell, dx, dy, dz) else {
            return Ok(None);
        };
        if !self.is_cell_in_grid(dest) {
            return Ok(None);
        }
        Ok(Some(Move {
            dest,
            inverse_dir: Dir(INVERSE[dir.0 as usize]),
            connection: Connection::identity(),
        }))
    }

    /// Directions leaving `cell`; all six for every cube cell.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        self.require_cell(cell)?;
        Ok((0..6).map(Dir).collect())
    }

    /// Corner indices of `cell`; all eight for every cube cell.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        self.require_cell(cell)?;
        Ok((0..8).map(Corner).collect())
    }

    /// World-space center of `cell`.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        self.require_cell(cell)?;
        Ok(self.center_of(cell))
    }

    /// World-space position of one corner of `cell`.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        self.require_cell(cell)?;
        if corner.0 >= 8 {
            return Err(GridError::invalid(format!(
                "cube corner index {corner} out of range 0..8"
            )));
        }
        let center = self.center_of(cell);
        let unit = CellType::Cube.corner_position(corner);
        Ok(Point3::new(
            center.x + unit.x * self.cell_size.x,
            center.y + unit.y * self.cell_size.y,
            center.z + unit.z * self.cell_size.z,
        ))
    }

    /// Cube cells have no planar outline.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        self.require_cell(cell)?;
        Err(GridError::Unsupported {
            op: "polygon of a volumetric cell",
        })
    }

    /// World-space box of `cell`; this is the cell itself.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        self.require_cell(cell)?;
        let center = self.center_of(cell);
        let half = self.cell_size / 2.0;
        Ok(Aabb::new(center - half, center + half))
    }

    /// The cell containing a world point, rounding each axis to the
    /// nearest center. Half-way points belong to the cell with the
    /// larger coordinate.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        let cell = Cell::new(
            ((point.x / self.cell_size.x + 0.5).floor()) as i32,
            ((point.y / self.cell_size.y + 0.5).floor()) as i32,
            ((point.z / self.cell_size.z + 0.5).floor()) as i32,
        );
        self.is_cell_in_grid(cell).then_some(cell)
    }

    /// All cells of a bounded grid, in the bound's enumeration order.
    pub fn cells(&self) -> Result<Vec<Cell>, GridError> {
        let bound = self.enumerable_bound()?;
        let mut cells = bound.cells()?;
        cells.retain(|&c| self.is_cell_in_grid(c));
        Ok(cells)
    }

    /// Number of cells, `None` when not enumerable.
    pub fn cell_count(&self) -> Option<usize> {
        let bound = self.bound.as_ref()?;
        if let Bound::Cube(b) = bound {
            return Some(b.cell_count());
        }
        bound
            .cells()
            .ok()
            .map(|cells| cells.into_iter().filter(|&c| self.is_cell_in_grid(c)).count())
    }

    /// Dense rank of `cell` in enumeration order.
    pub fn index(&self, cell: Cell) -> Result<usize, GridError> {
        self.require_cell(cell)?;
        let bound = self.enumerable_bound()?;
        if let Bound::Cube(b) = bound {
            return b.index_of(cell).ok_or(GridError::CellNotInGrid { cell });
        }
        self.cells()?
            .iter()
            .position(|&x| x == cell)
            .ok_or(GridError::CellNotInGrid { cell })
    }

    /// Inverse of [`index`](Self::index).
    pub fn cell_by_index(&self, index: usize) -> Result<Cell, GridError> {
        let bound = self.enumerable_bound()?;
        if let Bound::Cube(b) = bound {
            return b.cell_at(index).ok_or_else(|| {
                GridError::invalid(format!(
                    "index {index} out of range for {} cells",
                    b.cell_count()
                ))
            });
        }
        let cells = self.cells()?;
        let count = cells.len();
        cells
            .into_iter()
            .nth(index)
            .ok_or_else(|| GridError::invalid(format!("index {index} out of range for {count} cells")))
    }

    /// Number of dense indices; errors when not enumerable.
    pub fn index_count(&self) -> Result<usize, GridError> {
        self.cell_count().ok_or(GridError::Unbounded {
            what: "cube grid without an enumerable bound",
        })
    }

    /// This grid further restricted by `bound`.
    pub fn bound_by(&self, bound: &Bound) -> Self {
        let combined = match &self.bound {
            Some(existing) => existing.intersect(bound),
            None => bound.clone(),
        };
        Self {
            bound: Some(combined),
            ..self.clone()
        }
    }

    /// This grid with its bound removed.
    pub fn unbounded(&self) -> Self {
        Self {
            bound: None,
            ..self.clone()
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn require_cell(&self, cell: Cell) -> Result<(), GridError> {
        if self.is_cell_in_grid(cell) {
            Ok(())
        } else {
            Err(GridError::CellNotInGrid { cell })
        }
    }

    fn enumerable_bound(&self) -> Result<&Bound, GridError> {
        self.bound.as_ref().ok_or(GridError::Unbounded {
            what: "cube grid without an enumerable bound",
        })
    }

    fn center_of(&self, cell: Cell) -> Point3<f64> {
        Point3::new(
            f64::from(cell.x) * self.cell_size.x,
            f64::from(cell.y) * self.cell_size.y,
            f64::from(cell.z) * self.cell_size.z,
        )
    }
}
