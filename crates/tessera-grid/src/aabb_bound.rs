//! Continuous world-space bound.

use nalgebra::{Point2, Point3};
use tessera_core::{Aabb, Cell};

/// A float box treated as a bound. Unlike the lattice bounds it cannot
/// enumerate or count cells; it only answers membership.
///
/// Standalone membership tests the raw coordinate triple as a float
/// point. A grid interprets the box against true cell centers when the
/// bound is applied through `Grid::bound_by`.
///
/// # Examples
///
/// ```
/// use nalgebra::Point2;
/// use tessera_core::Cell;
/// use tessera_grid::AabbBound;
///
/// let b = AabbBound::planar(Point2::new(-0.5, -0.5), Point2::new(2.5, 0.5));
/// assert!(b.contains(Cell::new(2, 0, 0)));
/// assert!(!b.contains(Cell::new(3, 0, 0)));
/// assert!(!b.contains(Cell::new(0, 0, 1))); // z outside the planar box
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct AabbBound {
    aabb: Option<Aabb>,
}

impl AabbBound {
    /// Wraps a world-space box.
    pub fn new(aabb: Aabb) -> Self {
        Self { aabb: Some(aabb) }
    }

    /// A 2D box with the z range pinned to `[0, 0]`.
    pub fn planar(min: Point2<f64>, max: Point2<f64>) -> Self {
        Self::new(Aabb::new(
            Point3::new(min.x, min.y, 0.0),
            Point3::new(max.x, max.y, 0.0),
        ))
    }

    /// The empty bound.
    pub fn empty() -> Self {
        Self { aabb: None }
    }

    /// The underlying box, `None` when empty.
    pub fn aabb(&self) -> Option<Aabb> {
        self.aabb
    }

    /// Whether the box covers no space at all. A non-empty box can
    /// still select zero cells; only a grid can decide that.
    pub fn is_empty(&self) -> bool {
        self.aabb.is_none()
    }

    /// Whether the coordinate triple, read as a float point, lies in
    /// the box.
    pub fn contains(&self, cell: Cell) -> bool {
        match &self.aabb {
            Some(aabb) => aabb.contains_point(Point3::new(
                f64::from(cell.x),
                f64::from(cell.y),
                f64::from(cell.z),
            )),
            None => false,
        }
    }

    /// Overlap of both boxes; disjoint operands produce the empty
    /// bound.
    pub fn intersect(&self, other: &Self) -> Self {
        match (&self.aabb, &other.aabb) {
            (Some(a), Some(b)) => Self {
                aabb: a.intersection(b),
            },
            _ => Self::empty(),
        }
    }

    /// Smallest box covering both operands.
    pub fn union(&self, other: &Self) -> Self {
        match (&self.aabb, &other.aabb) {
            (Some(a), Some(b)) => Self::new(a.union(b)),
            (Some(a), None) => Self::new(*a),
            (None, Some(b)) => Self::new(*b),
            (None, None) => Self::empty(),
        }
    }
}
