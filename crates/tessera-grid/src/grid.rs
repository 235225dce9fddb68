//! The `Grid` enum: one polymorphic handle over every grid kind.
//!
//! Code that works with "a grid" holds this enum and dispatches through
//! it; the concrete kinds stay available for construction and for the
//! few operations only one kind has (mesh adjacency, prism layers).

use crate::{
    CubeGrid, HexGrid, MeshGrid, PrismGrid, SquareGrid, TransformGrid, TriangleGrid,
};
use crate::Bound;
use nalgebra::Point3;
use smallvec::SmallVec;
use tessera_core::{Aabb, Cell, CellType, Connection, Corner, Dir, GridError};

/// One step from a cell to a neighbour.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    /// The cell the step lands on.
    pub dest: Cell,
    /// The direction that steps back from `dest` to the source.
    pub inverse_dir: Dir,
    /// How the destination frame relates to the source frame.
    pub connection: Connection,
}

/// Whether `bound` admits `cell`.
///
/// Lattice bounds test the cell coordinates; the continuous box bound
/// tests the cell's world center, supplied lazily so the common lattice
/// path never computes it.
pub(crate) fn bound_admits(
    bound: Option<&Bound>,
    cell: Cell,
    center: impl FnOnce() -> Point3<f64>,
) -> bool {
    match bound {
        None => true,
        Some(Bound::Aabb(b)) => b.aabb().map_or(false, |world| world.contains_point(center())),
        Some(b) => b.contains(cell),
    }
}

/// `cell` shifted by a lattice delta, `None` on coordinate overflow.
pub(crate) fn offset_cell(cell: Cell, dx: i32, dy: i32, dz: i32) -> Option<Cell> {
    Some(Cell::new(
        cell.x.checked_add(dx)?,
        cell.y.checked_add(dy)?,
        cell.z.checked_add(dz)?,
    ))
}

/// Any grid kind behind one interface.
///
/// # Examples
///
/// ```
/// use nalgebra::Vector2;
/// use tessera_core::{Cell, SquareDir};
/// use tessera_grid::{Grid, SquareGrid};
///
/// let grid = Grid::from(SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap());
/// let mv = grid.try_move(Cell::ORIGIN, SquareDir::RIGHT).unwrap().unwrap();
/// assert_eq!(mv.dest, Cell::new2(1, 0));
/// assert!(grid.is_planar());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Grid {
    /// Axis-aligned square lattice.
    Square(SquareGrid),
    /// Hexagonal lattice in axial/cube coordinates.
    Hex(HexGrid),
    /// Triangle lattice in parity coordinates.
    Triangle(TriangleGrid),
    /// 3D box lattice.
    Cube(CubeGrid),
    /// Polygon faces of an arbitrary mesh.
    Mesh(MeshGrid),
    /// Another grid viewed through a world transform.
    Transform(TransformGrid),
    /// A planar grid extruded into layers.
    Prism(PrismGrid),
}

impl Grid {
    /// Whether cells are two-dimensional shapes.
    pub fn is_2d(&self) -> bool {
        match self {
            Grid::Square(_) | Grid::Hex(_) | Grid::Triangle(_) | Grid::Mesh(_) => true,
            Grid::Cube(_) | Grid::Prism(_) => false,
            Grid::Transform(g) => g.base().is_2d(),
        }
    }

    /// Whether cells are volumes.
    pub fn is_3d(&self) -> bool {
        match self {
            Grid::Square(_) | Grid::Hex(_) | Grid::Triangle(_) | Grid::Mesh(_) => false,
            Grid::Cube(_) | Grid::Prism(_) => true,
            Grid::Transform(g) => g.base().is_3d(),
        }
    }

    /// Whether all cell geometry lies in the z = 0 plane.
    ///
    /// Mesh faces sit anywhere in space, so a mesh grid is never
    /// reported planar. A transform is planar when its base is and the
    /// matrix maps the plane onto itself.
    pub fn is_planar(&self) -> bool {
        match self {
            Grid::Square(_) | Grid::Hex(_) | Grid::Triangle(_) => true,
            Grid::Cube(_) | Grid::Mesh(_) | Grid::Prism(_) => false,
            Grid::Transform(g) => g.base().is_planar() && g.keeps_grid_plane(),
        }
    }

    /// Whether the cell population is finite and countable.
    pub fn is_finite(&self) -> bool {
        self.cell_count().is_some()
    }

    /// Number of cell coordinate components that carry information:
    /// 2 for square and hex cells (hex axial pairs suffice), 3 for
    /// triangle, cube, and prism cells, 1 for mesh faces.
    pub fn coord_dimension(&self) -> u32 {
        match self {
            Grid::Square(_) | Grid::Hex(_) => 2,
            Grid::Triangle(_) | Grid::Cube(_) | Grid::Prism(_) => 3,
            Grid::Mesh(_) => 1,
            Grid::Transform(g) => g.base().coord_dimension(),
        }
    }

    /// Whether `cell` belongs to the grid.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        match self {
            Grid::Square(g) => g.is_cell_in_grid(cell),
            Grid::Hex(g) => g.is_cell_in_grid(cell),
            Grid::Triangle(g) => g.is_cell_in_grid(cell),
            Grid::Cube(g) => g.is_cell_in_grid(cell),
            Grid::Mesh(g) => g.is_cell_in_grid(cell),
            Grid::Transform(g) => g.is_cell_in_grid(cell),
            Grid::Prism(g) => g.is_cell_in_grid(cell),
        }
    }

    /// The local shape of `cell`.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        match self {
            Grid::Square(g) => g.cell_type(cell),
            Grid::Hex(g) => g.cell_type(cell),
            Grid::Triangle(g) => g.cell_type(cell),
            Grid::Cube(g) => g.cell_type(cell),
            Grid::Mesh(g) => g.cell_type(cell),
            Grid::Transform(g) => g.cell_type(cell),
            Grid::Prism(g) => g.cell_type(cell),
        }
    }

    /// Steps from `cell` along `dir`; `Ok(None)` when the step leaves
    /// the grid or the direction does not apply to this cell.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        match self {
            Grid::Square(g) => g.try_move(cell, dir),
            Grid::Hex(g) => g.try_move(cell, dir),
            Grid::Triangle(g) => g.try_move(cell, dir),
            Grid::Cube(g) => g.try_move(cell, dir),
            Grid::Mesh(g) => g.try_move(cell, dir),
            Grid::Transform(g) => g.try_move(cell, dir),
            Grid::Prism(g) => g.try_move(cell, dir),
        }
    }

    /// Directions leaving `cell`.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        match self {
            Grid::Square(g) => g.cell_dirs(cell),
            Grid::Hex(g) => g.cell_dirs(cell),
            Grid::Triangle(g) => g.cell_dirs(cell),
            Grid::Cube(g) => g.cell_dirs(cell),
            Grid::Mesh(g) => g.cell_dirs(cell),
            Grid::Transform(g) => g.cell_dirs(cell),
            Grid::Prism(g) => g.cell_dirs(cell),
        }
    }

    /// Corner indices of `cell`.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        match self {
            Grid::Square(g) => g.cell_corners(cell),
            Grid::Hex(g) => g.cell_corners(cell),
            Grid::Triangle(g) => g.cell_corners(cell),
            Grid::Cube(g) => g.cell_corners(cell),
            Grid::Mesh(g) => g.cell_corners(cell),
            Grid::Transform(g) => g.cell_corners(cell),
            Grid::Prism(g) => g.cell_corners(cell),
        }
    }

    /// World-space center of `cell`.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        match self {
            Grid::Square(g) => g.cell_center(cell),
            Grid::Hex(g) => g.cell_center(cell),
            Grid::Triangle(g) => g.cell_center(cell),
            Grid::Cube(g) => g.cell_center(cell),
            Grid::Mesh(g) => g.cell_center(cell),
            Grid::Transform(g) => g.cell_center(cell),
            Grid::Prism(g) => g.cell_center(cell),
        }
    }

    /// World-space position of one corner of `cell`.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        match self {
            Grid::Square(g) => g.corner_position(cell, corner),
            Grid::Hex(g) => g.corner_position(cell, corner),
            Grid::Triangle(g) => g.corner_position(cell, corner),
            Grid::Cube(g) => g.corner_position(cell, corner),
            Grid::Mesh(g) => g.corner_position(cell, corner),
            Grid::Transform(g) => g.corner_position(cell, corner),
            Grid::Prism(g) => g.corner_position(cell, corner),
        }
    }

    /// The cell outline in counter-clockwise order; unsupported for
    /// volumetric cells.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        match self {
            Grid::Square(g) => g.polygon(cell),
            Grid::Hex(g) => g.polygon(cell),
            Grid::Triangle(g) => g.polygon(cell),
            Grid::Cube(g) => g.polygon(cell),
            Grid::Mesh(g) => g.polygon(cell),
            Grid::Transform(g) => g.polygon(cell),
            Grid::Prism(g) => g.polygon(cell),
        }
    }

    /// World-space box of `cell`.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        match self {
            Grid::Square(g) => g.cell_aabb(cell),
            Grid::Hex(g) => g.cell_aabb(cell),
            Grid::Triangle(g) => g.cell_aabb(cell),
            Grid::Cube(g) => g.cell_aabb(cell),
            Grid::Mesh(g) => g.cell_aabb(cell),
            Grid::Transform(g) => g.cell_aabb(cell),
            Grid::Prism(g) => g.cell_aabb(cell),
        }
    }

    /// The cell containing a world point, `None` when no admitted cell
    /// does.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        match self {
            Grid::Square(g) => g.find_cell(point),
            Grid::Hex(g) => g.find_cell(point),
            Grid::Triangle(g) => g.find_cell(point),
            Grid::Cube(g) => g.find_cell(point),
            Grid::Mesh(g) => g.find_cell(point),
            Grid::Transform(g) => g.find_cell(point),
            Grid::Prism(g) => g.find_cell(point),
        }
    }

    /// All cells of a finite grid, in its enumeration order.
    pub fn cells(&self) -> Result<Vec<Cell>, GridError> {
        match self {
            Grid::Square(g) => g.cells(),
            Grid::Hex(g) => g.cells(),
            Grid::Triangle(g) => g.cells(),
            Grid::Cube(g) => g.cells(),
            Grid::Mesh(g) => g.cells(),
            Grid::Transform(g) => g.cells(),
            Grid::Prism(g) => g.cells(),
        }
    }

    /// Number of cells, `None` when infinite or not countable.
    pub fn cell_count(&self) -> Option<usize> {
        match self {
            Grid::Square(g) => g.cell_count(),
            Grid::Hex(g) => g.cell_count(),
            Grid::Triangle(g) => g.cell_count(),
            Grid::Cube(g) => g.cell_count(),
            Grid::Mesh(g) => Some(g.cell_count()),
            Grid::Transform(g) => g.cell_count(),
            Grid::Prism(g) => g.cell_count(),
        }
    }

    /// Dense rank of `cell` in enumeration order.
    pub fn index(&self, cell: Cell) -> Result<usize, GridError> {
        match self {
            Grid::Square(g) => g.index(cell),
            Grid::Hex(g) => g.index(cell),
            Grid::Triangle(g) => g.index(cell),
            Grid::Cube(g) => g.index(cell),
            Grid::Mesh(g) => g.index(cell),
            Grid::Transform(g) => g.index(cell),
            Grid::Prism(g) => g.index(cell),
        }
    }

    /// Inverse of [`index`](Self::index).
    pub fn cell_by_index(&self, index: usize) -> Result<Cell, GridError> {
        match self {
            Grid::Square(g) => g.cell_by_index(index),
            Grid::Hex(g) => g.cell_by_index(index),
            Grid::Triangle(g) => g.cell_by_index(index),
            Grid::Cube(g) => g.cell_by_index(index),
            Grid::Mesh(g) => g.cell_by_index(index),
            Grid::Transform(g) => g.cell_by_index(index),
            Grid::Prism(g) => g.cell_by_index(index),
        }
    }

    /// Number of dense indices; errors when the grid cannot enumerate.
    pub fn index_count(&self) -> Result<usize, GridError> {
        match self {
            Grid::Square(g) => g.index_count(),
            Grid::Hex(g) => g.index_count(),
            Grid::Triangle(g) => g.index_count(),
            Grid::Cube(g) => g.index_count(),
            Grid::Mesh(g) => Ok(g.index_count()),
            Grid::Transform(g) => g.index_count(),
            Grid::Prism(g) => g.index_count(),
        }
    }

    /// The grid's own bound, if it carries one. Prisms bound through
    /// their layer range instead and report `None`.
    pub fn bound(&self) -> Option<Bound> {
        match self {
            Grid::Square(g) => g.bound().cloned(),
            Grid::Hex(g) => g.bound().cloned(),
            Grid::Triangle(g) => g.bound().cloned(),
            Grid::Cube(g) => g.bound().cloned(),
            Grid::Mesh(g) => g.bound().cloned(),
            Grid::Transform(g) => g.bound(),
            Grid::Prism(_) => None,
        }
    }

    /// This grid further restricted by `bound`, intersecting with any
    /// existing bound. Prism grids do not support bounds on their
    /// packed coordinates.
    pub fn bound_by(&self, bound: &Bound) -> Result<Grid, GridError> {
        match self {
            Grid::Square(g) => Ok(Grid::Square(g.bound_by(bound))),
            Grid::Hex(g) => Ok(Grid::Hex(g.bound_by(bound))),
            Grid::Triangle(g) => Ok(Grid::Triangle(g.bound_by(bound))),
            Grid::Cube(g) => Ok(Grid::Cube(g.bound_by(bound))),
            Grid::Mesh(g) => Ok(Grid::Mesh(g.bound_by(bound))),
            Grid::Transform(g) => g.bound_by(bound).map(Grid::Transform),
            Grid::Prism(g) => g.bound_by(bound).map(Grid::Prism),
        }
    }

    /// This grid with every bound removed.
    pub fn unbounded(&self) -> Grid {
        match self {
            Grid::Square(g) => Grid::Square(g.unbounded()),
            Grid::Hex(g) => Grid::Hex(g.unbounded()),
            Grid::Triangle(g) => Grid::Triangle(g.unbounded()),
            Grid::Cube(g) => Grid::Cube(g.unbounded()),
            Grid::Mesh(g) => Grid::Mesh(g.unbounded()),
            Grid::Transform(g) => Grid::Transform(g.unbounded()),
            Grid::Prism(g) => Grid::Prism(g.unbounded()),
        }
    }
}

impl From<SquareGrid> for Grid {
    fn from(g: SquareGrid) -> Self {
        Grid::Square(g)
    }
}

impl From<HexGrid> for Grid {
    fn from(g: HexGrid) -> Self {
        Grid::Hex(g)
    }
}

impl From<TriangleGrid> for Grid {
    fn from(g: TriangleGrid) -> Self {
        Grid::Triangle(g)
    }
}

impl From<CubeGrid> for Grid {
    fn from(g: CubeGrid) -> Self {
        Grid::Cube(g)
    }
}

impl From<MeshGrid> for Grid {
    fn from(g: MeshGrid) -> Self {
        Grid::Mesh(g)
    }
}

impl From<TransformGrid> for Grid {
    fn from(g: TransformGrid) -> Self {
        Grid::Transform(g)
    }
}

impl From<PrismGrid> for Grid {
    fn from(g: PrismGrid) -> Self {
        Grid::Prism(g)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compliance;
    use crate::{
        CubeBound, HexBound, MeshData, RectBound, TriBound,
    };
    use nalgebra::{Vector2, Vector3};
    use std::f64::consts::FRAC_PI_6;
    use tessera_core::{HexOrientation, TriangleOrientation};

    fn rect(min: (i32, i32), max: (i32, i32)) -> Bound {
        Bound::Rect(RectBound::new(Cell::new2(min.0, min.1), Cell::new2(max.0, max.1)).unwrap())
    }

    fn quad_strip() -> MeshData {
        MeshData {
            vertices: vec![
                Point3::new(0.0, 0.0, 0.0),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(1.0, 1.0, 0.0),
                Point3::new(0.0, 1.0, 0.0),
                Point3::new(2.0, 0.0, 0.0),
                Point3::new(2.0, 1.0, 0.0),
            ],
            faces: vec![vec![0, 1, 2, 3], vec![1, 4, 5, 2]],
            adjacency: None,
        }
    }

    #[test]
    fn property_queries_describe_each_kind() {
        let square = Grid::from(SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap());
        assert!(square.is_2d() && !square.is_3d() && square.is_planar());
        assert_eq!(square.coord_dimension(), 2);
        assert!(!square.is_finite());

        let hex = Grid::from(HexGrid::new(HexOrientation::PointyTop, 1.0).unwrap());
        assert!(hex.is_2d() && hex.is_planar());
        assert_eq!(hex.coord_dimension(), 2);

        let tri = Grid::from(TriangleGrid::new(TriangleOrientation::FlatTopped, 1.0).unwrap());
        assert!(tri.is_2d() && tri.is_planar());
        assert_eq!(tri.coord_dimension(), 3);

        let cube = Grid::from(CubeGrid::new(Vector3::new(1.0, 1.0, 1.0)).unwrap());
        assert!(!cube.is_2d() && cube.is_3d() && !cube.is_planar());
        assert_eq!(cube.coord_dimension(), 3);

        let mesh = Grid::from(MeshGrid::new(quad_strip()).unwrap());
        assert!(mesh.is_2d() && !mesh.is_3d() && !mesh.is_planar());
        assert_eq!(mesh.coord_dimension(), 1);
        assert!(mesh.is_finite());

        let spun = Grid::from(TransformGrid::rotated_z(square.clone(), FRAC_PI_6));
        assert!(spun.is_planar(), "z rotations keep the plane");
        let lifted = Grid::from(TransformGrid::translated(
            square.clone(),
            Vector3::new(0.0, 0.0, 1.0),
        ));
        assert!(!lifted.is_planar());
        assert_eq!(lifted.coord_dimension(), 2);

        let prism = Grid::from(PrismGrid::new(square, 1.0).unwrap());
        assert!(!prism.is_2d() && prism.is_3d() && !prism.is_planar());
        assert_eq!(prism.coord_dimension(), 3);
        assert_eq!(prism.bound(), None);
    }

    #[test]
    fn bound_by_narrows_and_unbounded_reopens() {
        let grid = Grid::from(SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap());
        let once = grid.bound_by(&rect((0, 0), (4, 4))).unwrap();
        let twice = once.bound_by(&rect((2, 2), (9, 9))).unwrap();
        assert!(matches!(twice, Grid::Square(_)));
        assert_eq!(twice.cell_count(), Some(9));
        assert!(twice.is_cell_in_grid(Cell::new2(3, 3)));
        assert!(!twice.is_cell_in_grid(Cell::new2(1, 1)));
        assert_eq!(twice.unbounded().cell_count(), None);

        let prism = Grid::from(
            PrismGrid::new(SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap().into(), 1.0).unwrap(),
        );
        assert!(matches!(
            prism.bound_by(&rect((0, 0), (1, 1))),
            Err(GridError::Unsupported { .. })
        ));
    }

    #[test]
    fn every_kind_passes_the_shared_contract() {
        let square_base = || {
            SquareGrid::bounded(
                Vector2::new(1.0, 1.0),
                RectBound::new(Cell::new2(-1, -1), Cell::new2(2, 1)).unwrap(),
            )
            .unwrap()
        };
        let grids: Vec<Grid> = vec![
            square_base().into(),
            HexGrid::bounded(
                HexOrientation::FlatTop,
                1.0,
                HexBound::new(Cell::new(-2, -2, -2), Cell::new(3, 3, 3)),
            )
            .unwrap()
            .into(),
            TriangleGrid::bounded(
                TriangleOrientation::FlatSides,
                1.0,
                TriBound::new(Cell::new(-1, -1, -1), Cell::new(2, 2, 2)).unwrap(),
            )
            .unwrap()
            .into(),
            CubeGrid::bounded(
                Vector3::new(1.0, 2.0, 1.0),
                CubeBound::new(Cell::new(0, 0, 0), Cell::new(2, 1, 1)).unwrap(),
            )
            .unwrap()
            .into(),
            MeshGrid::new(quad_strip()).unwrap().into(),
            TransformGrid::rotated_z(square_base().into(), FRAC_PI_6).into(),
            PrismGrid::bounded(square_base().into(), 0.5, -1, 1).unwrap().into(),
        ];
        for grid in &grids {
            compliance::run_grid_compliance(grid);
        }
    }
}
