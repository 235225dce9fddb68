//! Triangle grids on the three-axis lattice.
//!
//! Cells are triples `(x, y, z)` with `x + y + z ∈ {1, 2}`. Each
//! coordinate counts crossings of one family of parallel lattice lines,
//! the families normal to the three axis vectors. Sum-2 cells point up
//! (flat-topped) or right (flat-sides); sum-1 cells point the other
//! way. The parity picks which half of the shared direction and corner
//! index space a cell uses: sum-2 cells own the even directions and odd
//! corners, sum-1 cells the odd directions and even corners.

use crate::grid::{bound_admits, offset_cell, Move};
use crate::{Bound, TriBound};
use nalgebra::{Point3, Vector2};
use smallvec::SmallVec;
use tessera_core::{
    Aabb, Cell, CellType, Connection, Corner, Dir, GridError, TriangleOrientation,
};

/// A grid of equilateral triangles with uniform edge length.
///
/// # Examples
///
/// ```
/// use nalgebra::Point3;
/// use tessera_core::{Cell, TriangleOrientation};
/// use tessera_grid::TriangleGrid;
///
/// let grid = TriangleGrid::new(TriangleOrientation::FlatTopped, 1.0).unwrap();
/// // The up triangle with base from the origin to (1, 0).
/// let center = grid.cell_center(Cell::new(1, 0, 1)).unwrap();
/// assert!((center.x - 0.5).abs() < 1e-9);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TriangleGrid {
    orientation: TriangleOrientation,
    size: f64,
    bound: Option<Bound>,
}

impl TriangleGrid {
    /// An unbounded triangle grid.
    ///
    /// `size` is the cell edge length; it must be positive and finite.
    pub fn new(orientation: TriangleOrientation, size: f64) -> Result<Self, GridError> {
        if !(size.is_finite() && size > 0.0) {
            return Err(GridError::invalid(format!(
                "triangle size must be positive and finite, got {size}"
            )));
        }
        Ok(Self {
            orientation,
            size,
            bound: None,
        })
    }

    /// A triangle grid restricted to a box of cells.
    pub fn bounded(
        orientation: TriangleOrientation,
        size: f64,
        bound: TriBound,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(orientation, size)?;
        grid.bound = Some(Bound::Tri(bound));
        Ok(grid)
    }

    /// Cell orientation.
    pub fn orientation(&self) -> TriangleOrientation {
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

    /// Whether `cell` belongs to the grid.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        matches!(coord_sum(cell), 1 | 2)
            && bound_admits(self.bound.as_ref(), cell, || self.center_of(cell))
    }

    /// The cell type shared by every cell. Both parities use the same
    /// type; the parity only selects the live half of its index space.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        self.require_cell(cell)?;
        Ok(CellType::Triangle(self.orientation))
    }

    /// Steps from `cell` along `dir`.
    ///
    /// Sum-2 cells move along even directions by decrementing one axis;
    /// sum-1 cells move along odd directions by incrementing one.
    /// Probing a direction of the wrong parity is blocked (`Ok(None)`),
    /// not an error, so callers can scan `0..6` uniformly.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        self.require_cell(cell)?;
        let d = dir.0;
        if d >= 6 {
            return Ok(None);
        }
        let even = d % 2 == 0;
        if (coord_sum(cell) == 2) != even {
            return Ok(None);
        }
        let (axis, delta) = if even {
            ((d / 2 + 1) % 3, -1)
        } else {
            ((d - 1) / 2, 1)
        };
        let (dx, dy, dz) = match axis {
            0 => (delta, 0, 0),
            1 => (0, delta, 0),
            _ => (0, 0, delta),
        };
        let Some(dest) = offset_cell(cell, dx, dy, dz) else {
            return Ok(None);
        };
        if !self.is_cell_in_grid(dest) {
            return Ok(None);
        }
        Ok(Some(Move {
            dest,
            inverse_dir: Dir((d + 3) % 6),
            connection: Connection::identity(),
        }))
    }

    /// Directions leaving `cell`: `{0, 2, 4}` on sum-2 cells, `{1, 3, 5}`
    /// on sum-1 cells.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        self.require_cell(cell)?;
        let first = if coord_sum(cell) == 2 { 0 } else { 1 };
        Ok([first, first + 2, first + 4].into_iter().map(Dir).collect())
    }

    /// Corner indices of `cell`: `{1, 3, 5}` on sum-2 cells, `{0, 2, 4}`
    /// on sum-1 cells.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        self.require_cell(cell)?;
        let first = if coord_sum(cell) == 2 { 1 } else { 0 };
        Ok([first, first + 2, first + 4]
            .into_iter()
            .map(Corner)
            .collect())
    }

    /// World-space centroid of `cell`.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        self.require_cell(cell)?;
        Ok(self.center_of(cell))
    }

    /// World-space position of one corner of `cell`.
    ///
    /// Corners of the wrong parity do not exist on the cell and are an
    /// error.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        self.require_cell(cell)?;
        let live = if coord_sum(cell) == 2 { 1 } else { 0 };
        if corner.0 >= 6 || corner.0 % 2 != live {
            return Err(GridError::invalid(format!(
                "triangle corner {corner} does not exist on cell {cell}"
            )));
        }
        Ok(self.corner_of(cell, corner.0))
    }

    /// The cell outline, three vertices in counter-clockwise order.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        Ok(self
            .cell_corners(cell)?
            .into_iter()
            .map(|c| self.corner_of(cell, c.0))
            .collect())
    }

    /// World-space box of `cell`; flat on the z axis.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        let poly = self.polygon(cell)?;
        Ok(Aabb::new(poly[0], poly[1]).union(&Aabb::new(poly[2], poly[2])))
    }

    /// The cell containing a world point: the ceiling of the point
    /// projected onto each lattice axis.
    ///
    /// The z component is ignored. Points exactly on a lattice vertex
    /// project to a coordinate sum of 0 and belong to no cell; points on
    /// an edge consistently land in the adjacent sum-1 cell.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        let h = self.line_spacing();
        let (a0, a1, a2) = self.axes();
        let project = |a: Vector2<f64>| ((point.x * a.x + point.y * a.y) / h).ceil() as i32;
        let cell = Cell::new(project(a0), project(a1), project(a2));
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
        if let Bound::Tri(b) = bound {
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
        if let Bound::Tri(b) = bound {
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
        if let Bound::Tri(b) = bound {
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
            what: "triangle grid without an enumerable bound",
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
            what: "triangle grid without an enumerable bound",
        })
    }

    /// Distance between two adjacent parallel lattice lines.
    fn line_spacing(&self) -> f64 {
        3.0_f64.sqrt() / 2.0 * self.size
    }

    /// The three lattice axis vectors, 120° apart.
    fn axes(&self) -> (Vector2<f64>, Vector2<f64>, Vector2<f64>) {
        let base = match self.orientation {
            TriangleOrientation::FlatTopped => 90.0,
            TriangleOrientation::FlatSides => 0.0,
        };
        let axis = |i: f64| {
            let a = (base + 120.0 * i).to_radians();
            Vector2::new(a.cos(), a.sin())
        };
        (axis(0.0), axis(1.0), axis(2.0))
    }

    /// Centroid of a cell, bound ignored. Because the axis vectors sum
    /// to zero, one formula covers both parities.
    fn center_of(&self, cell: Cell) -> Point3<f64> {
        let k = 2.0 / 3.0 * self.line_spacing();
        let (a0, a1, a2) = self.axes();
        let v = f64::from(cell.x) * a0 + f64::from(cell.y) * a1 + f64::from(cell.z) * a2;
        Point3::new(k * v.x, k * v.y, 0.0)
    }

    fn corner_of(&self, cell: Cell, corner: u32) -> Point3<f64> {
        let center = self.center_of(cell);
        let corner0 = match self.orientation {
            TriangleOrientation::FlatTopped => 30.0,
            TriangleOrientation::FlatSides => -60.0,
        };
        let angle = (corner0 + 60.0 * f64::from(corner)).to_radians();
        let r = self.size / 3.0_f64.sqrt();
        Point3::new(center.x + r * angle.cos(), center.y + r * angle.sin(), 0.0)
    }
}

fn coord_sum(cell: Cell) -> i64 {
    i64::from(cell.x) + i64::from(cell.y) + i64::from(cell.z)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use tessera_core::TriangleCorner;

    fn flat_topped() -> TriangleGrid {
        TriangleGrid::new(TriangleOrientation::FlatTopped, 1.0).unwrap()
    }

    fn flat_sides() -> TriangleGrid {
        TriangleGrid::new(TriangleOrientation::FlatSides, 1.0).unwrap()
    }

    fn assert_close(p: Point3<f64>, x: f64, y: f64) {
        assert!(
            (p - Point3::new(x, y, 0.0)).norm() < 1e-9,
            "expected ({x}, {y}), got {p}"
        );
    }

    #[test]
    fn parity_gates_membership() {
        let grid = flat_topped();
        assert!(grid.is_cell_in_grid(Cell::new(1, 0, 1)));
        assert!(grid.is_cell_in_grid(Cell::new(1, 0, 0)));
        assert!(!grid.is_cell_in_grid(Cell::new(0, 0, 0)));
        assert!(!grid.is_cell_in_grid(Cell::new(1, 1, 1)));
        assert!(matches!(
            grid.cell_center(Cell::new(2, 2, 2)),
            Err(GridError::CellNotInGrid { .. })
        ));
    }

    #[test]
    fn flat_topped_up_cell_has_known_outline() {
        let grid = flat_topped();
        // The up triangle with base from the origin to (1, 0).
        let cell = Cell::new(1, 0, 1);
        assert_close(grid.cell_center(cell).unwrap(), 0.5, 3.0_f64.sqrt() / 6.0);
        assert_close(
            grid.corner_position(cell, TriangleCorner::UP).unwrap(),
            0.5,
            3.0_f64.sqrt() / 2.0,
        );
        assert_close(grid.corner_position(cell, Corner(3)).unwrap(), 0.0, 0.0);
        assert_close(grid.corner_position(cell, Corner(5)).unwrap(), 1.0, 0.0);
        // Even corners do not exist on a sum-2 cell.
        assert!(grid.corner_position(cell, Corner(0)).is_err());
        assert_eq!(
            grid.cell_corners(cell).unwrap().as_slice(),
            &[Corner(1), Corner(3), Corner(5)]
        );
    }

    #[test]
    fn flat_topped_down_cell_has_known_outline() {
        let grid = flat_topped();
        let cell = Cell::new(1, 0, 0);
        assert_close(grid.cell_center(cell).unwrap(), 0.0, 3.0_f64.sqrt() / 3.0);
        assert_close(grid.corner_position(cell, Corner(4)).unwrap(), 0.0, 0.0);
        assert!(grid.corner_position(cell, Corner(1)).is_err());
        assert_eq!(
            grid.cell_dirs(cell).unwrap().as_slice(),
            &[Dir(1), Dir(3), Dir(5)]
        );
    }

    #[test]
    fn polygons_are_counter_clockwise() {
        for grid in [flat_topped(), flat_sides()] {
            for cell in [Cell::new(1, 0, 1), Cell::new(1, 0, 0)] {
                let poly = grid.polygon(cell).unwrap();
                assert_eq!(poly.len(), 3);
                let mut area = 0.0;
                for i in 0..3 {
                    let (a, b) = (poly[i], poly[(i + 1) % 3]);
                    area += a.x * b.y - b.x * a.y;
                }
                let expected = 3.0_f64.sqrt() / 4.0;
                assert!(
                    (area / 2.0 - expected).abs() < 1e-9,
                    "signed area must be the positive triangle area"
                );
                let centroid = Point3::from(
                    (poly[0].coords + poly[1].coords + poly[2].coords) / 3.0,
                );
                let center = grid.cell_center(cell).unwrap();
                assert!((centroid - center).norm() < 1e-9, "vertices average to the center");
            }
        }
    }

    #[test]
    fn moves_flip_parity_and_return() {
        for grid in [flat_topped(), flat_sides()] {
            let up = Cell::new(1, 0, 1);
            for d in [0u32, 2, 4] {
                let mv = grid.try_move(up, Dir(d)).unwrap().unwrap();
                assert_eq!(coord_sum(mv.dest), 1);
                assert_eq!(mv.inverse_dir, Dir((d + 3) % 6));
                assert_eq!(mv.connection, Connection::identity());
                let back = grid.try_move(mv.dest, mv.inverse_dir).unwrap().unwrap();
                assert_eq!(back.dest, up);
                assert_eq!(back.inverse_dir, Dir(d));
            }
            // Wrong-parity and out-of-range probes block rather than fail.
            assert_eq!(grid.try_move(up, Dir(1)).unwrap(), None);
            assert_eq!(grid.try_move(up, Dir(6)).unwrap(), None);
        }
    }

    #[test]
    fn neighbor_centers_sit_along_the_direction_angles() {
        for (grid, dir0) in [(flat_topped(), 30.0_f64), (flat_sides(), -60.0)] {
            for (cell, dirs) in [
                (Cell::new(1, 0, 1), [0u32, 2, 4]),
                (Cell::new(1, 0, 0), [1, 3, 5]),
            ] {
                let from = grid.cell_center(cell).unwrap();
                for d in dirs {
                    let mv = grid.try_move(cell, Dir(d)).unwrap().unwrap();
                    let offset = grid.cell_center(mv.dest).unwrap() - from;
                    let angle = (dir0 + 60.0 * f64::from(d)).to_radians();
                    let step = 1.0 / 3.0_f64.sqrt();
                    assert!((offset.norm() - step).abs() < 1e-9);
                    assert!((offset.x - step * angle.cos()).abs() < 1e-9);
                    assert!((offset.y - step * angle.sin()).abs() < 1e-9);
                }
            }
        }
    }

    #[test]
    fn aabb_covers_the_three_corners() {
        let grid = flat_topped();
        let aabb = grid.cell_aabb(Cell::new(1, 0, 1)).unwrap();
        assert_close(aabb.min, 0.0, 0.0);
        assert_close(aabb.max, 1.0, 3.0_f64.sqrt() / 2.0);
    }

    #[test]
    fn find_cell_resolves_interior_edge_and_vertex_points() {
        let grid = flat_topped();
        assert_eq!(
            grid.find_cell(Point3::new(0.5, 0.2, 0.0)),
            Some(Cell::new(1, 0, 1))
        );
        assert_eq!(
            grid.find_cell(Point3::new(0.0, 0.5, 0.0)),
            Some(Cell::new(1, 0, 0)),
            "edge points land in the adjacent sum-1 cell"
        );
        assert_eq!(
            grid.find_cell(Point3::origin()),
            None,
            "lattice vertices belong to no cell"
        );
    }

    #[test]
    fn bounded_grid_enumerates_and_indexes() {
        let bound = TriBound::new(Cell::new(0, 0, 0), Cell::new(1, 1, 1)).unwrap();
        let grid = TriangleGrid::bounded(TriangleOrientation::FlatTopped, 1.0, bound).unwrap();
        let cells = grid.cells().unwrap();
        assert_eq!(cells.len(), 6);
        assert_eq!(grid.cell_count(), Some(6));
        for (i, c) in cells.iter().enumerate() {
            assert_eq!(grid.index(*c).unwrap(), i);
            assert_eq!(grid.cell_by_index(i).unwrap(), *c);
        }
        // Every move off the six-cell patch is blocked.
        let inside = Cell::new(1, 1, 0);
        for d in 0..6u32 {
            if let Some(mv) = grid.try_move(inside, Dir(d)).unwrap() {
                assert!(cells.contains(&mv.dest));
            }
        }
        assert!(grid.index(Cell::new(2, 0, 0)).is_err());
    }

    proptest! {
        #[test]
        fn centers_find_their_own_cell(
            x in -15i32..15,
            y in -15i32..15,
            sum in 1i32..=2,
            flat_sides_layout in proptest::bool::ANY,
        ) {
            let orientation = if flat_sides_layout {
                TriangleOrientation::FlatSides
            } else {
                TriangleOrientation::FlatTopped
            };
            let grid = TriangleGrid::new(orientation, 0.8).unwrap();
            let cell = Cell::new(x, y, sum - x - y);
            let center = grid.cell_center(cell).unwrap();
            prop_assert_eq!(grid.find_cell(center), Some(cell));
        }

        #[test]
        fn cell_dirs_match_move_availability(x in -5i32..5, y in -5i32..5, sum in 1i32..=2) {
            let grid = TriangleGrid::new(TriangleOrientation::FlatTopped, 1.0).unwrap();
            let cell = Cell::new(x, y, sum - x - y);
            let dirs = grid.cell_dirs(cell).unwrap();
            for d in 0..6u32 {
                let available = grid.try_move(cell, Dir(d)).unwrap().is_some();
                prop_assert_eq!(available, dirs.contains(&Dir(d)));
            }
        }
    }
}
