//! Square grids on the integer plane.

use crate::grid::{bound_admits, offset_cell, Move};
use crate::{Bound, RectBound};
use nalgebra::{Point3, Vector2};
use smallvec::SmallVec;
use tessera_core::{Aabb, Cell, CellType, Connection, Corner, Dir, GridError};

/// Neighbor deltas, counter-clockwise from +X.
const SQUARE_DELTAS: [(i32, i32); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Unit corner offsets, counter-clockwise from the corner at −45°.
const CORNER_OFFSETS: [(f64, f64); 4] = [(0.5, -0.5), (0.5, 0.5), (-0.5, 0.5), (-0.5, -0.5)];

/// An axis-aligned square (or rectangle) grid.
///
/// Cells are `(x, y, 0)` and sit centered at `(x·w, y·h)` for cell size
/// `(w, h)`, so cell `(0, 0)` is centered on the world origin. Cells
/// with a nonzero z component are not part of the grid.
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector2};
/// use tessera_core::Cell;
/// use tessera_grid::SquareGrid;
///
/// let grid = SquareGrid::new(Vector2::new(2.0, 1.0)).unwrap();
/// assert_eq!(
///     grid.cell_center(Cell::new2(3, 2)).unwrap(),
///     Point3::new(6.0, 2.0, 0.0),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct SquareGrid {
    cell_size: Vector2<f64>,
    bound: Option<Bound>,
}

impl SquareGrid {
    /// An unbounded square grid with the given cell size.
    ///
    /// Both components must be positive and finite.
    pub fn new(cell_size: Vector2<f64>) -> Result<Self, GridError> {
        if !(cell_size.x.is_finite() && cell_size.x > 0.0)
            || !(cell_size.y.is_finite() && cell_size.y > 0.0)
        {
            return Err(GridError::invalid(format!(
                "square cell size must be positive and finite, got ({}, {})",
                cell_size.x, cell_size.y
            )));
        }
        Ok(Self {
            cell_size,
            bound: None,
        })
    }

    /// A square grid restricted to a rectangle of cells.
    pub fn bounded(cell_size: Vector2<f64>, bound: RectBound) -> Result<Self, GridError> {
        let mut grid = Self::new(cell_size)?;
        grid.bound = Some(Bound::Rect(bound));
        Ok(grid)
    }

    /// World-space size of one cell.
    pub fn cell_size(&self) -> Vector2<f64> {
        self.cell_size
    }

    /// The restricting bound, if any.
    pub fn bound(&self) -> Option<&Bound> {
        self.bound.as_ref()
    }

    /// Whether `cell` belongs to the grid.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        cell.z == 0 && bound_admits(self.bound.as_ref(), cell, || self.center_of(cell))
    }

    /// The cell type shared by every cell.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        self.require_cell(cell)?;
        Ok(CellType::Square)
    }

    /// Steps from `cell` along `dir`.
    ///
    /// `Ok(None)` means the move is blocked by the bound or the
    /// direction index is out of range. The connection is always the
    /// identity.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        self.require_cell(cell)?;
        let Some(&(dx, dy)) = SQUARE_DELTAS.get(dir.0 as usize) else {
            return Ok(None);
        };
        let Some(dest) = offset_cell(cell, dx, dy, 0) else {
            return Ok(None);
        };
        if !self.is_cell_in_grid(dest) {
            return Ok(None);
        }
        Ok(Some(Move {
            dest,
            inverse_dir: Dir((dir.0 + 2) % 4),
            connection: Connection::identity(),
        }))
    }

    /// Directions leaving `cell`; all four for every square cell.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        self.require_cell(cell)?;
        Ok((0..4).map(Dir).collect())
    }

    /// Corner indices of `cell`; all four for every square cell.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        self.require_cell(cell)?;
        Ok((0..4).map(Corner).collect())
    }

    /// World-space center of `cell`.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        self.require_cell(cell)?;
        Ok(self.center_of(cell))
    }

    /// World-space position of one corner of `cell`.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        self.require_cell(cell)?;
        let Some(&(ox, oy)) = CORNER_OFFSETS.get(corner.0 as usize) else {
            return Err(GridError::invalid(format!(
                "square corner index {corner} out of range 0..4"
            )));
        };
        let center = self.center_of(cell);
        Ok(Point3::new(
            center.x + ox * self.cell_size.x,
            center.y + oy * self.cell_size.y,
            0.0,
        ))
    }

    /// The cell outline, four vertices in counter-clockwise order
    /// starting at corner 0.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        self.require_cell(cell)?;
        let center = self.center_of(cell);
        Ok(CORNER_OFFSETS
            .iter()
            .map(|&(ox, oy)| {
                Point3::new(
                    center.x + ox * self.cell_size.x,
                    center.y + oy * self.cell_size.y,
                    0.0,
                )
            })
            .collect())
    }

    /// World-space box of `cell`; flat on the z axis.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        self.require_cell(cell)?;
        let center = self.center_of(cell);
        let (hx, hy) = (self.cell_size.x / 2.0, self.cell_size.y / 2.0);
        Ok(Aabb::new(
            Point3::new(center.x - hx, center.y - hy, 0.0),
            Point3::new(center.x + hx, center.y + hy, 0.0),
        ))
    }

    /// The cell containing a world point.
    ///
    /// The z component is ignored; points are projected onto the grid
    /// plane. Points exactly half-way between two centers belong to the
    /// cell with the larger coordinate.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        let x = (point.x / self.cell_size.x + 0.5).floor();
        let y = (point.y / self.cell_size.y + 0.5).floor();
        let cell = Cell::new2(x as i32, y as i32);
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
        if let Bound::Rect(b) = bound {
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
        if let Bound::Rect(b) = bound {
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
        if let Bound::Rect(b) = bound {
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
            what: "square grid without an enumerable bound",
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
            what: "square grid without an enumerable bound",
        })
    }

    /// Center of a cell, bound ignored.
    fn center_of(&self, cell: Cell) -> Point3<f64> {
        Point3::new(
            f64::from(cell.x) * self.cell_size.x,
            f64::from(cell.y) * self.cell_size.y,
            0.0,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tessera_core::{SquareCorner, SquareDir};

    fn unit() -> SquareGrid {
        SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap()
    }

    #[test]
    fn constructor_rejects_degenerate_sizes() {
        assert!(SquareGrid::new(Vector2::new(0.0, 1.0)).is_err());
        assert!(SquareGrid::new(Vector2::new(1.0, -2.0)).is_err());
        assert!(SquareGrid::new(Vector2::new(f64::NAN, 1.0)).is_err());
        assert!(SquareGrid::new(Vector2::new(0.25, 4.0)).is_ok());
    }

    #[test]
    fn centers_scale_by_cell_size() {
        let grid = SquareGrid::new(Vector2::new(2.0, 1.0)).unwrap();
        assert_eq!(
            grid.cell_center(Cell::new2(3, 2)).unwrap(),
            Point3::new(6.0, 2.0, 0.0)
        );
        assert_eq!(grid.cell_center(Cell::ORIGIN).unwrap(), Point3::origin());
    }

    #[test]
    fn cells_off_the_plane_are_rejected() {
        let grid = unit();
        assert!(!grid.is_cell_in_grid(Cell::new(0, 0, 1)));
        assert!(matches!(
            grid.cell_center(Cell::new(2, 2, -1)),
            Err(GridError::CellNotInGrid { .. })
        ));
    }

    #[test]
    fn moves_are_symmetric_with_identity_connections() {
        let grid = unit();
        for d in 0..4u32 {
            let mv = grid.try_move(Cell::new2(5, -3), Dir(d)).unwrap().unwrap();
            assert_eq!(mv.dest.z, 0);
            assert_eq!(mv.inverse_dir, Dir((d + 2) % 4));
            assert_eq!(mv.connection, Connection::identity());
            let back = grid.try_move(mv.dest, mv.inverse_dir).unwrap().unwrap();
            assert_eq!(back.dest, Cell::new2(5, -3));
        }
        assert_eq!(grid.try_move(Cell::ORIGIN, Dir(4)).unwrap(), None);
    }

    #[test]
    fn corners_run_counter_clockwise_from_bottom_right() {
        let grid = SquareGrid::new(Vector2::new(2.0, 4.0)).unwrap();
        let p = grid
            .corner_position(Cell::ORIGIN, SquareCorner::BOTTOM_RIGHT)
            .unwrap();
        assert_eq!(p, Point3::new(1.0, -2.0, 0.0));
        let poly = grid.polygon(Cell::ORIGIN).unwrap();
        assert_eq!(poly.len(), 4);
        let mut area = 0.0;
        for i in 0..4 {
            let (a, b) = (poly[i], poly[(i + 1) % 4]);
            area += a.x * b.y - b.x * a.y;
        }
        assert!((area / 2.0 - 8.0).abs() < 1e-12, "signed area must be +w·h");
        assert!(grid.corner_position(Cell::ORIGIN, Corner(4)).is_err());
    }

    #[test]
    fn aabb_matches_cell_footprint() {
        let grid = SquareGrid::new(Vector2::new(2.0, 1.0)).unwrap();
        let aabb = grid.cell_aabb(Cell::new2(1, 1)).unwrap();
        assert_eq!(aabb.min, Point3::new(1.0, 0.5, 0.0));
        assert_eq!(aabb.max, Point3::new(3.0, 1.5, 0.0));
    }

    #[test]
    fn find_cell_rounds_to_the_nearest_center() {
        let grid = unit();
        assert_eq!(grid.find_cell(Point3::new(0.4, -0.4, 0.0)), Some(Cell::ORIGIN));
        assert_eq!(
            grid.find_cell(Point3::new(0.6, -0.4, 3.0)),
            Some(Cell::new2(1, 0)),
            "z is projected away"
        );
        // Half-way points belong to the cell with the larger coordinate.
        assert_eq!(grid.find_cell(Point3::new(0.5, 0.0, 0.0)), Some(Cell::new2(1, 0)));
        assert_eq!(grid.find_cell(Point3::new(-0.5, 0.0, 0.0)), Some(Cell::ORIGIN));
    }

    #[test]
    fn bounded_grid_enumerates_row_major() {
        let bound = RectBound::new(Cell::new2(0, 0), Cell::new2(2, 1)).unwrap();
        let grid = SquareGrid::bounded(Vector2::new(1.0, 1.0), bound).unwrap();
        let cells = grid.cells().unwrap();
        assert_eq!(cells.len(), 6);
        assert_eq!(cells[0], Cell::new2(0, 0));
        assert_eq!(cells[1], Cell::new2(1, 0));
        assert_eq!(cells[3], Cell::new2(0, 1));
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(grid.index(*c).unwrap(), i);
            assert_eq!(grid.cell_by_index(i).unwrap(), *c);
        }
        assert_eq!(grid.index_count().unwrap(), 6);
        assert!(grid.cell_by_index(6).is_err());

        // The rim blocks outward moves; outsiders are hard errors.
        assert_eq!(grid.try_move(Cell::new2(2, 0), SquareDir::RIGHT).unwrap(), None);
        assert!(grid.try_move(Cell::new2(3, 0), SquareDir::LEFT).is_err());
        assert_eq!(grid.find_cell(Point3::new(3.2, 0.0, 0.0)), None);
    }

    #[test]
    fn unbounded_grid_refuses_enumeration() {
        let grid = unit();
        assert!(matches!(grid.cells(), Err(GridError::Unbounded { .. })));
        assert!(grid.index(Cell::ORIGIN).is_err());
        assert_eq!(grid.cell_count(), None);
    }

    proptest! {
        #[test]
        fn centers_find_their_own_cell(
            x in -40i32..40,
            y in -40i32..40,
            w in 0.25f64..4.0,
            h in 0.25f64..4.0,
        ) {
            let grid = SquareGrid::new(Vector2::new(w, h)).unwrap();
            let cell = Cell::new2(x, y);
            let center = grid.cell_center(cell).unwrap();
            prop_assert_eq!(grid.find_cell(center), Some(cell));
        }
    }
}
