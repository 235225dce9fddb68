//! Transform grids: a base grid viewed through an invertible matrix.
//!
//! Topology is delegated to the base unchanged; only world-space
//! queries pass through the matrix. Point queries go the other way
//! through the cached inverse, so a transform grid never needs to
//! invert per call.

use crate::grid::{Grid, Move};
use crate::Bound;
use nalgebra::{Matrix4, Point3, Vector3};
use smallvec::SmallVec;
use std::sync::Arc;
use tessera_core::{Aabb, Cell, CellType, Corner, Dir, GridError};

/// An invertible world transform applied to another grid.
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector2, Vector3};
/// use tessera_core::Cell;
/// use tessera_grid::{SquareGrid, TransformGrid};
///
/// let base = SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap();
/// let grid = TransformGrid::translated(base.into(), Vector3::new(10.0, 0.0, 0.0));
/// assert_eq!(
///     grid.cell_center(Cell::new2(0, 0)).unwrap(),
///     Point3::new(10.0, 0.0, 0.0),
/// );
/// assert_eq!(grid.find_cell(Point3::new(10.2, 0.0, 0.0)), Some(Cell::new2(0, 0)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct TransformGrid {
    base: Arc<Grid>,
    transform: Matrix4<f64>,
    inverse: Matrix4<f64>,
}

impl TransformGrid {
    /// Wraps `base` in an arbitrary homogeneous transform.
    ///
    /// Returns `Err(GridError::InvalidArgument)` when the matrix is not
    /// invertible.
    pub fn new(base: Grid, transform: Matrix4<f64>) -> Result<Self, GridError> {
        let inverse = transform
            .try_inverse()
            .ok_or_else(|| GridError::invalid("transform matrix is not invertible"))?;
        Ok(Self {
            base: Arc::new(base),
            transform,
            inverse,
        })
    }

    /// Wraps `base` in a translation.
    pub fn translated(base: Grid, offset: Vector3<f64>) -> Self {
        Self {
            base: Arc::new(base),
            transform: Matrix4::new_translation(&offset),
            inverse: Matrix4::new_translation(&-offset),
        }
    }

    /// Wraps `base` in a rotation about the z axis, in radians.
    pub fn rotated_z(base: Grid, angle: f64) -> Self {
        Self {
            base: Arc::new(base),
            transform: Matrix4::new_rotation(Vector3::new(0.0, 0.0, angle)),
            inverse: Matrix4::new_rotation(Vector3::new(0.0, 0.0, -angle)),
        }
    }

    /// Wraps `base` in a per-axis scale. Zero or non-finite factors are
    /// rejected as non-invertible.
    pub fn scaled(base: Grid, factors: Vector3<f64>) -> Result<Self, GridError> {
        Self::new(base, Matrix4::new_nonuniform_scaling(&factors))
    }

    /// The wrapped grid.
    pub fn base(&self) -> &Grid {
        &self.base
    }

    /// The forward matrix.
    pub fn transform(&self) -> Matrix4<f64> {
        self.transform
    }

    /// Whether `cell` belongs to the grid; purely a base property.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        self.base.is_cell_in_grid(cell)
    }

    /// The base cell type; a transform never changes topology.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        self.base.cell_type(cell)
    }

    /// Steps on the base grid; destinations and connections are
    /// coordinate data and pass through untouched.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        self.base.try_move(cell, dir)
    }

    /// Directions leaving `cell` on the base grid.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        self.base.cell_dirs(cell)
    }

    /// Corner indices of `cell` on the base grid.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        self.base.cell_corners(cell)
    }

    /// The transformed cell center.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        Ok(self.apply(self.base.cell_center(cell)?))
    }

    /// The transformed corner position.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        Ok(self.apply(self.base.corner_position(cell, corner)?))
    }

    /// The transformed cell outline.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        Ok(self
            .base
            .polygon(cell)?
            .into_iter()
            .map(|p| self.apply(p))
            .collect())
    }

    /// World-space box of `cell`, re-derived from all eight transformed
    /// corners of the base box so rotated cells stay covered.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        let b = self.base.cell_aabb(cell)?;
        let corners = (0..8u32).map(|i| {
            let pick = |bit: u32, lo: f64, hi: f64| if i >> bit & 1 == 1 { hi } else { lo };
            self.apply(Point3::new(
                pick(0, b.min.x, b.max.x),
                pick(1, b.min.y, b.max.y),
                pick(2, b.min.z, b.max.z),
            ))
        });
        Aabb::from_points(corners)
            .ok_or_else(|| GridError::invalid("transformed cell produced an empty box"))
    }

    /// The cell containing a world point, found by pulling the point
    /// back into base space.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        self.base.find_cell(self.inverse.transform_point(&point))
    }

    /// All cells of the base grid.
    pub fn cells(&self) -> Result<Vec<Cell>, GridError> {
        self.base.cells()
    }

    /// The base cell count.
    pub fn cell_count(&self) -> Option<usize> {
        self.base.cell_count()
    }

    /// The base dense rank.
    pub fn index(&self, cell: Cell) -> Result<usize, GridError> {
        self.base.index(cell)
    }

    /// The base rank inverse.
    pub fn cell_by_index(&self, index: usize) -> Result<Cell, GridError> {
        self.base.cell_by_index(index)
    }

    /// The base index count.
    pub fn index_count(&self) -> Result<usize, GridError> {
        self.base.index_count()
    }

    /// The base grid's bound.
    pub fn bound(&self) -> Option<Bound> {
        self.base.bound()
    }

    /// Restricts the base grid and rewraps it in the same transform.
    ///
    /// Cell-coordinate bounds pass straight down. A continuous box
    /// bound lives in world space, so it is pulled back through the
    /// inverse matrix first; for rotations the pulled-back box covers
    /// the original, making the restriction looser but never dropping
    /// an admitted cell's neighbourhood.
    pub fn bound_by(&self, bound: &Bound) -> Result<Self, GridError> {
        let base_bound = match bound {
            Bound::Aabb(b) => match b.aabb() {
                Some(world) => {
                    let corners = (0..8u32).map(|i| {
                        let pick =
                            |bit: u32, lo: f64, hi: f64| if i >> bit & 1 == 1 { hi } else { lo };
                        self.inverse.transform_point(&Point3::new(
                            pick(0, world.min.x, world.max.x),
                            pick(1, world.min.y, world.max.y),
                            pick(2, world.min.z, world.max.z),
                        ))
                    });
                    match Aabb::from_points(corners) {
                        Some(pulled) => Bound::Aabb(crate::AabbBound::new(pulled)),
                        None => bound.clone(),
                    }
                }
                None => bound.clone(),
            },
            other => other.clone(),
        };
        Ok(Self {
            base: Arc::new(self.base.bound_by(&base_bound)?),
            transform: self.transform,
            inverse: self.inverse,
        })
    }

    /// Removes the base grid's bound, keeping the transform.
    pub fn unbounded(&self) -> Self {
        Self {
            base: Arc::new(self.base.unbounded()),
            transform: self.transform,
            inverse: self.inverse,
        }
    }

    /// Whether the transform maps the z = 0 plane onto itself, which is
    /// what keeps a planar base planar in world space. Assumes an
    /// affine matrix.
    pub(crate) fn keeps_grid_plane(&self) -> bool {
        self.transform[(2, 0)] == 0.0
            && self.transform[(2, 1)] == 0.0
            && self.transform[(2, 3)] == 0.0
    }

    fn apply(&self, p: Point3<f64>) -> Point3<f64> {
        self.transform.transform_point(&p)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{RectBound, SquareGrid};
    use nalgebra::Vector2;
    use std::f64::consts::FRAC_PI_4;
    use tessera_core::{Connection, SquareDir};

    fn unit_square() -> Grid {
        SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap().into()
    }

    #[test]
    fn singular_matrices_are_rejected() {
        assert!(TransformGrid::new(unit_square(), Matrix4::zeros()).is_err());
        assert!(TransformGrid::scaled(unit_square(), Vector3::new(1.0, 0.0, 1.0)).is_err());
        assert!(TransformGrid::scaled(unit_square(), Vector3::new(2.0, 3.0, 1.0)).is_ok());
    }

    #[test]
    fn translation_shifts_geometry_but_not_topology() {
        let grid = TransformGrid::translated(unit_square(), Vector3::new(10.0, -2.0, 1.0));
        assert_eq!(
            grid.cell_center(Cell::new2(1, 0)).unwrap(),
            Point3::new(11.0, -2.0, 1.0)
        );
        let mv = grid.try_move(Cell::ORIGIN, SquareDir::RIGHT).unwrap().unwrap();
        assert_eq!(mv.dest, Cell::new2(1, 0));
        assert_eq!(mv.connection, Connection::identity());
        assert_eq!(
            grid.find_cell(Point3::new(11.2, -2.3, 1.0)),
            Some(Cell::new2(1, 0))
        );
    }

    #[test]
    fn rotated_cell_box_covers_the_diamond() {
        let grid = TransformGrid::rotated_z(unit_square(), FRAC_PI_4);
        let aabb = grid.cell_aabb(Cell::ORIGIN).unwrap();
        let e = aabb.extents();
        let sqrt2 = 2.0_f64.sqrt();
        assert!((e.x - sqrt2).abs() < 1e-9);
        assert!((e.y - sqrt2).abs() < 1e-9);
        assert!(e.z.abs() < 1e-9);

        // Corners land on the rotated axes.
        let p = grid.corner_position(Cell::ORIGIN, Corner(1)).unwrap();
        assert!(p.x.abs() < 1e-9);
        assert!((p.y - sqrt2 / 2.0).abs() < 1e-9);
    }

    #[test]
    fn scaling_changes_centers_and_round_trips_points() {
        let grid = TransformGrid::scaled(unit_square(), Vector3::new(2.0, 3.0, 1.0)).unwrap();
        assert_eq!(
            grid.cell_center(Cell::new2(2, -1)).unwrap(),
            Point3::new(4.0, -3.0, 0.0)
        );
        for cell in [Cell::ORIGIN, Cell::new2(3, 5), Cell::new2(-2, 1)] {
            let center = grid.cell_center(cell).unwrap();
            assert_eq!(grid.find_cell(center), Some(cell));
        }
    }

    #[test]
    fn transforms_compose_by_nesting() {
        let inner = TransformGrid::rotated_z(unit_square(), FRAC_PI_4);
        let outer = TransformGrid::translated(inner.into(), Vector3::new(5.0, 0.0, 0.0));
        let p = outer.cell_center(Cell::new2(1, 0)).unwrap();
        let sqrt2 = 2.0_f64.sqrt();
        assert!((p.x - (5.0 + sqrt2 / 2.0)).abs() < 1e-9);
        assert!((p.y - sqrt2 / 2.0).abs() < 1e-9);
        assert_eq!(outer.find_cell(p), Some(Cell::new2(1, 0)));
    }

    #[test]
    fn lattice_bounds_pass_through_to_the_base() {
        let grid = TransformGrid::translated(unit_square(), Vector3::new(10.0, 0.0, 0.0));
        let bounded = grid
            .bound_by(&Bound::Rect(
                RectBound::new(Cell::new2(0, 0), Cell::new2(1, 0)).unwrap(),
            ))
            .unwrap();
        assert_eq!(bounded.cell_count(), Some(2));
        assert_eq!(
            bounded.cells().unwrap(),
            vec![Cell::new2(0, 0), Cell::new2(1, 0)]
        );
        assert_eq!(bounded.index(Cell::new2(1, 0)).unwrap(), 1);
        assert!(!bounded.is_cell_in_grid(Cell::new2(2, 0)));
        assert!(bounded.unbounded().is_cell_in_grid(Cell::new2(2, 0)));
    }

    #[test]
    fn world_space_boxes_are_pulled_back_through_the_inverse() {
        let grid = TransformGrid::translated(unit_square(), Vector3::new(10.0, 0.0, 0.0));
        let world_box = Aabb::new(Point3::new(9.4, -0.6, 0.0), Point3::new(10.6, 0.6, 0.0));
        let bounded = grid
            .bound_by(&Bound::Aabb(crate::AabbBound::new(world_box)))
            .unwrap();
        assert!(bounded.is_cell_in_grid(Cell::ORIGIN));
        assert!(!bounded.is_cell_in_grid(Cell::new2(2, 0)));
        assert_eq!(bounded.cell_count(), None, "box bounds cannot count cells");
    }

    #[test]
    fn plane_preservation_depends_on_the_matrix() {
        let flat = TransformGrid::rotated_z(unit_square(), 1.0);
        assert!(flat.keeps_grid_plane());
        let lifted = TransformGrid::translated(unit_square(), Vector3::new(0.0, 0.0, 2.0));
        assert!(!lifted.keeps_grid_plane());
        let tilted =
            TransformGrid::new(unit_square(), Matrix4::new_rotation(Vector3::new(1.0, 0.0, 0.0)))
                .unwrap();
        assert!(!tilted.keeps_grid_plane());
    }
}
