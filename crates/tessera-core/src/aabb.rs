//! Axis-aligned bounding boxes in world space.

use nalgebra::{Point3, Vector3};

/// A closed axis-aligned box, `min` and `max` corners inclusive.
///
/// Planar grids produce boxes with zero extent on the z axis. A point
/// box with `min == max` is valid.
///
/// # Examples
///
/// ```
/// use nalgebra::Point3;
/// use tessera_core::Aabb;
///
/// let b = Aabb::new(Point3::new(0.0, 0.0, 0.0), Point3::new(2.0, 1.0, 0.0));
/// assert!(b.contains_point(Point3::new(2.0, 0.5, 0.0)));
/// assert!(!b.contains_point(Point3::new(2.1, 0.5, 0.0)));
/// assert_eq!(b.center(), Point3::new(1.0, 0.5, 0.0));
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    /// Componentwise smallest corner.
    pub min: Point3<f64>,
    /// Componentwise largest corner.
    pub max: Point3<f64>,
}

impl Aabb {
    /// Builds a box from two opposite corners, normalizing each
    /// component so `min <= max` holds on every axis.
    pub fn new(a: Point3<f64>, b: Point3<f64>) -> Self {
        Self {
            min: Point3::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Point3::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        }
    }

    /// Smallest box covering all of `points`, or `None` when empty.
    pub fn from_points(points: impl IntoIterator<Item = Point3<f64>>) -> Option<Self> {
        let mut iter = points.into_iter();
        let first = iter.next()?;
        let mut out = Self {
            min: first,
            max: first,
        };
        for p in iter {
            out.min = Point3::new(out.min.x.min(p.x), out.min.y.min(p.y), out.min.z.min(p.z));
            out.max = Point3::new(out.max.x.max(p.x), out.max.y.max(p.y), out.max.z.max(p.z));
        }
        Some(out)
    }

    /// Whether `p` lies inside the box, boundary included.
    pub fn contains_point(&self, p: Point3<f64>) -> bool {
        p.x >= self.min.x
            && p.x <= self.max.x
            && p.y >= self.min.y
            && p.y <= self.max.y
            && p.z >= self.min.z
            && p.z <= self.max.z
    }

    /// Smallest box covering both operands.
    pub fn union(&self, other: &Self) -> Self {
        Self {
            min: Point3::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Point3::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    /// The overlap of both operands, or `None` when they are disjoint.
    /// Boxes that only touch still overlap in a degenerate box.
    pub fn intersection(&self, other: &Self) -> Option<Self> {
        let min = Point3::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Point3::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x <= max.x && min.y <= max.y && min.z <= max.z {
            Some(Self { min, max })
        } else {
            None
        }
    }

    /// Geometric center of the box.
    pub fn center(&self) -> Point3<f64> {
        nalgebra::center(&self.min, &self.max)
    }

    /// Side lengths per axis.
    pub fn extents(&self) -> Vector3<f64> {
        self.max - self.min
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(x: f64, y: f64, z: f64) -> Point3<f64> {
        Point3::new(x, y, z)
    }

    #[test]
    fn corners_normalize_per_component() {
        let b = Aabb::new(p(2.0, -1.0, 0.0), p(0.0, 3.0, 0.0));
        assert_eq!(b.min, p(0.0, -1.0, 0.0));
        assert_eq!(b.max, p(2.0, 3.0, 0.0));
        assert_eq!(b.extents(), Vector3::new(2.0, 4.0, 0.0));
    }

    #[test]
    fn from_points_covers_exactly() {
        assert_eq!(Aabb::from_points(std::iter::empty()), None);
        let b = Aabb::from_points([p(1.0, 1.0, 1.0), p(-1.0, 2.0, 0.0), p(0.0, 0.0, 3.0)]).unwrap();
        assert_eq!(b.min, p(-1.0, 0.0, 0.0));
        assert_eq!(b.max, p(1.0, 2.0, 3.0));
    }

    #[test]
    fn union_and_intersection() {
        let a = Aabb::new(p(0.0, 0.0, 0.0), p(2.0, 2.0, 0.0));
        let b = Aabb::new(p(1.0, 1.0, 0.0), p(3.0, 3.0, 0.0));
        let u = a.union(&b);
        assert_eq!(u.min, p(0.0, 0.0, 0.0));
        assert_eq!(u.max, p(3.0, 3.0, 0.0));
        let i = a.intersection(&b).unwrap();
        assert_eq!(i.min, p(1.0, 1.0, 0.0));
        assert_eq!(i.max, p(2.0, 2.0, 0.0));

        let far = Aabb::new(p(10.0, 10.0, 10.0), p(11.0, 11.0, 11.0));
        assert_eq!(a.intersection(&far), None);

        // Touching boxes intersect in a zero-width box.
        let touch = Aabb::new(p(2.0, 0.0, 0.0), p(4.0, 2.0, 0.0));
        let edge = a.intersection(&touch).unwrap();
        assert_eq!(edge.min.x, 2.0);
        assert_eq!(edge.max.x, 2.0);
    }

    #[test]
    fn a_point_box_contains_only_itself() {
        let b = Aabb::new(p(1.0, 1.0, 1.0), p(1.0, 1.0, 1.0));
        assert!(b.contains_point(p(1.0, 1.0, 1.0)));
        assert!(!b.contains_point(p(1.0, 1.0, 1.0 + 1e-12)));
        assert_eq!(b.extents(), Vector3::zeros());
    }
}
