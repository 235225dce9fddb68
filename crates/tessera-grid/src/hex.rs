//! Hexagonal grids in axial/cube coordinates.
//!
//! Cells are cube triples `(x, y, z)` with `x + y + z = 0`. The axial
//! form `(q, r, 0)` is accepted by every operation and normalized on
//! entry; results always carry the cube form.
//!
//! One neighbor-delta table serves both orientations: direction `d`
//! points at `dir0 + 60d` degrees counter-clockwise, where `dir0` is
//! 30° for flat-top cells and 0° for pointy-top cells. Corner `c` sits
//! at `corner0 + 60c` degrees with `corner0` 0° and −30° respectively.

use crate::grid::{bound_admits, offset_cell, Move};
use crate::{Bound, HexBound};
use nalgebra::Point3;
use smallvec::SmallVec;
use tessera_core::{
    Aabb, Cell, CellType, Connection, Corner, Dir, GridError, HexOrientation,
};

/// Cube-coordinate neighbor deltas; entry `d` points at `dir0 + 60d`
/// degrees for either orientation.
const HEX_DELTAS: [(i32, i32, i32); 6] = [
    (1, 0, -1),
    (0, 1, -1),
    (-1, 1, 0),
    (-1, 0, 1),
    (0, -1, 1),
    (1, -1, 0),
];

/// The cube triple for axial `(q, r)`.
pub fn axial_to_cube(q: i32, r: i32) -> Cell {
    Cell::new(q, r, -q - r)
}

/// The axial pair of a cell in either accepted form, or `None` when
/// the triple is neither cube nor axial.
pub fn cube_to_axial(cell: Cell) -> Option<(i32, i32)> {
    to_cube(cell).map(|c| (c.x, c.y))
}

/// Normalizes a cell to cube form: cube triples pass through, axial
/// `(q, r, 0)` gains its redundant axis, anything else is `None`.
pub fn to_cube(cell: Cell) -> Option<Cell> {
    let sum = i64::from(cell.x) + i64::from(cell.y) + i64::from(cell.z);
    if sum == 0 {
        return Some(cell);
    }
    if cell.z == 0 {
        let z = -(i64::from(cell.x) + i64::from(cell.y));
        return i32::try_from(z).ok().map(|z| Cell::new(cell.x, cell.y, z));
    }
    None
}

/// A hexagonal grid with uniform cell size.
///
/// `size` is the edge length, which for a regular hexagon equals the
/// circumradius. A flat-top cell then spans `2·size` horizontally and
/// `√3·size` vertically; pointy-top swaps the two.
///
/// # Examples
///
/// ```
/// use nalgebra::Point3;
/// use tessera_core::{Cell, HexOrientation};
/// use tessera_grid::HexGrid;
///
/// let grid = HexGrid::new(HexOrientation::FlatTop, 1.0).unwrap();
/// let center = grid.cell_center(Cell::new(2, -1, 0)).unwrap();
/// assert!((center - Point3::new(3.0, 0.0, 0.0)).norm() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct HexGrid {
    orientation: HexOrientation,
    size: f64,
    bound: Option<Bound>,
}

impl HexGrid {
    /// An unbounded hex grid.
    ///
    /// `size` is the cell edge length; it must be positive and finite.
    pub fn new(orientation: HexOrientation, size: f64) -> Result<Self, GridError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(GridError::invalid(format!(
                "hex size must be positive and finite, got {size}"
            )));
        }
        Ok(Self {
            orientation,
            size,
            bound: None,
        })
    }

    /// A hex grid restricted to a parallelogram bound.
    pub fn bounded(
        orientation: HexOrientation,
        size: f64,
        bound: HexBound,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(orientation, size)?;
        grid.bound = Some(Bound::Hex(bound));
        Ok(grid)
    }

    /// Cell orientation.
    pub fn orientation(&self) -> HexOrientation {
        self.orientation
    }

    /// Cell edge length.
    pub fn size(&self) -> f64 {
        self.size
    }

    /// The restricting bound, if any.
    pub fn bound(&self) -> Option<&Bound> {
        self.bound.as_ref()
    }

    /// Whether `cell`, in either accepted form, belongs to the grid.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        self.cube_in_grid(cell).is_some()
    }

    /// The cell type shared by every cell.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        self.require_cell(cell)?;
        Ok(CellType::Hex(self.orientation))
    }

    /// Steps from `cell` along `dir`.
    ///
    /// `Ok(None)` means the move is blocked by the bound or the
    /// direction index is out of range; a cell that is not in the grid
    /// at all is an error. Lattice frames are aligned, so the returned
    /// connection is always the identity.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        let c = self.require_cell(cell)?;
        let Some(&(dx, dy, dz)) = HEX_DELTAS.get(dir.0 as usize) else {
            return Ok(None);
        };
        let Some(dest) = offset_cell(c, dx, dy, dz) else {
            return Ok(None);
        };
        if !self.is_cell_in_grid(dest) {
            return Ok(None);
        }
        Ok(Some(Move {
            dest,
            inverse_dir: Dir((dir.0 + 3) % 6),
            connection: Connection::identity(),
        }))
    }

    /// Directions leaving `cell`; all six for every hex cell.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        self.require_cell(cell)?;
        Ok((0..6).map(Dir).collect())
    }

    /// Corner indices of `cell`; all six for every hex cell.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        self.require_cell(cell)?;
        Ok((0..6).map(Corner).collect())
    }

    /// World-space center of `cell`.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        let c = self.require_cell(cell)?;
        Ok(self.center_of(c))
    }

    /// World-space position of one corner of `cell`.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        let c = self.require_cell(cell)?;
        if corner.0 >= 6 {
            return Err(GridError::invalid(format!(
                "hex corner index {corner} out of range 0..6"
            )));
        }
        Ok(self.corner_of(c, corner.0))
    }

    /// The cell outline, six vertices in counter-clockwise order
    /// starting at corner 0.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        let c = self.require_cell(cell)?;
        Ok((0..6).map(|i| self.corner_of(c, i)).collect())
    }

    /// World-space box of `cell`; flat on the z axis.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        let c = self.require_cell(cell)?;
        let center = self.center_of(c);
        let half_height = 3.0_f64.sqrt() / 2.0 * self.size;
        let (hx, hy) = match self.orientation {
            HexOrientation::FlatTop => (self.size, half_height),
            HexOrientation::PointyTop => (half_height, self.size),
        };
        Ok(Aabb::new(
            Point3::new(center.x - hx, center.y - hy, 0.0),
            Point3::new(center.x + hx, center.y + hy, 0.0),
        ))
    }

    /// The cell containing a world point, by cube rounding: round each
    /// fractional axis, then rewrite the axis with the largest error so
    /// the triple sums to zero exactly.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        let s = self.size;
        let sqrt3 = 3.0_f64.sqrt();
        let (fx, fy) = match self.orientation {
            HexOrientation::FlatTop => {
                let fx = point.x / (1.5 * s);
                (fx, point.y / (sqrt3 * s) - fx / 2.0)
            }
            HexOrientation::PointyTop => {
                let fy = point.y / (1.5 * s);
                (point.x / (sqrt3 * s) - fy / 2.0, fy)
            }
        };
        let c = cube_round(fx, fy, -fx - fy);
        self.is_cell_in_grid(c).then_some(c)
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
        if let Bound::Hex(b) = bound {
            return Some(b.cell_count());
        }
        bound
            .cells()
            .ok()
            .map(|cells| cells.into_iter().filter(|&c| self.is_cell_in_grid(c)).count())
    }

    /// Dense rank of `cell` in enumeration order.
    pub fn index(&self, cell: Cell) -> Result<usize, GridError> {
        let c = self.require_cell(cell)?;
        let bound = self.enumerable_bound()?;
        if let Bound::Hex(b) = bound {
            return b.index_of(c).ok_or(GridError::CellNotInGrid { cell });
        }
        self.cells()?
            .iter()
            .position(|&x| x == c)
            .ok_or(GridError::CellNotInGrid { cell })
    }

    /// Inverse of [`index`](Self::index).
    pub fn cell_by_index(&self, index: usize) -> Result<Cell, GridError> {
        let bound = self.enumerable_bound()?;
        if let Bound::Hex(b) = bound {
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
            what: "hex grid without an enumerable bound",
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

    fn require_cell(&self, cell: Cell) -> Result<Cell, GridError> {
        self.cube_in_grid(cell)
            .ok_or(GridError::CellNotInGrid { cell })
    }

    /// Cube form of `cell` when the grid contains it.
    fn cube_in_grid(&self, cell: Cell) -> Option<Cell> {
        let c = to_cube(cell)?;
        bound_admits(self.bound.as_ref(), c, || self.center_of(c)).then_some(c)
    }

    fn enumerable_bound(&self) -> Result<&Bound, GridError> {
        self.bound.as_ref().ok_or(GridError::Unbounded {
            what: "hex grid without an enumerable bound",
        })
    }

    /// Center of a cube-form cell, bound ignored.
    fn center_of(&self, c: Cell) -> Point3<f64> {
        let (x, y) = (f64::from(c.x), f64::from(c.y));
        let s = self.size;
        let sqrt3 = 3.0_f64.sqrt();
        match self.orientation {
            HexOrientation::FlatTop => Point3::new(1.5 * s * x, sqrt3 * s * (y + x / 2.0), 0.0),
            HexOrientation::PointyTop => Point3::new(sqrt3 * s * (x + y / 2.0), 1.5 * s * y, 0.0),
        }
    }

    fn corner_of(&self, c: Cell, corner: u32) -> Point3<f64> {
        let center = self.center_of(c);
        let corner0 = match self.orientation {
            HexOrientation::FlatTop => 0.0,
            HexOrientation::PointyTop => -30.0,
        };
        let angle = (corner0 + 60.0 * f64::from(corner)).to_radians();
        Point3::new(
            center.x + self.size * angle.cos(),
            center.y + self.size * angle.sin(),
            0.0,
        )
    }
}

/// Rounds fractional cube coordinates to the nearest cell.
fn cube_round(fx: f64, fy: f64, fz: f64) -> Cell {
    let (mut rx, mut ry, rz) = (fx.round(), fy.round(), fz.round());
    let (dx, dy, dz) = ((rx - fx).abs(), (ry - fy).abs(), (rz - fz).abs());
    if dx > dy && dx > dz {
        rx = -ry - rz;
    } else if dy > dz {
        ry = -rx - rz;
    } else {
        return Cell::new(rx as i32, ry as i32, (-rx - ry) as i32);
    }
    Cell::new(rx as i32, ry as i32, rz as i32)
}
