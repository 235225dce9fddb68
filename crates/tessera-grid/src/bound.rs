//! The `Bound` algebra: predicates with optional enumeration over cells.

use crate::grid::Grid;
use crate::{AabbBound, CubeBound, HexBound, MaskBound, RectBound, TriBound};
use tessera_core::{Aabb, Cell, GridError};

/// A constraint over the set of valid cells.
///
/// Every shape answers membership; all but [`Aabb`](Bound::Aabb) also
/// enumerate, count, and rank their cells. Set operations between two
/// bounds of the same shape are exact. Mixed-shape pairs fall back to
/// a box over the coordinate extents of both operands, which is looser
/// but always a usable bound, never a failure.
///
/// # Examples
///
/// ```
/// use tessera_core::Cell;
/// use tessera_grid::{Bound, RectBound};
///
/// let a = Bound::from(RectBound::new(Cell::new2(0, 0), Cell::new2(4, 4)).unwrap());
/// let b = Bound::from(RectBound::new(Cell::new2(3, 3), Cell::new2(9, 9)).unwrap());
/// let i = a.intersect(&b);
/// assert_eq!(i.cell_count(), Some(4));
/// assert!(i.contains(Cell::new2(4, 3)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Bound {
    /// Closed integer rectangle on x and y.
    Rect(RectBound),
    /// Closed integer box on x, y, and z.
    Cube(CubeBound),
    /// Hex parallelogram in cube coordinates.
    Hex(HexBound),
    /// Integer box filtered by the triangle parity rule.
    Tri(TriBound),
    /// Explicit finite cell set.
    Mask(MaskBound),
    /// Continuous world-space box; membership only.
    Aabb(AabbBound),
}

impl Bound {
    /// Whether `cell` satisfies the bound.
    pub fn contains(&self, cell: Cell) -> bool {
        match self {
            Bound::Rect(b) => b.contains(cell),
            Bound::Cube(b) => b.contains(cell),
            Bound::Hex(b) => b.contains(cell),
            Bound::Tri(b) => b.contains(cell),
            Bound::Mask(b) => b.contains(cell),
            Bound::Aabb(b) => b.contains(cell),
        }
    }

    /// Whether no cell satisfies the bound.
    pub fn is_empty(&self) -> bool {
        match self {
            Bound::Rect(b) => b.is_empty(),
            Bound::Cube(b) => b.is_empty(),
            Bound::Hex(b) => b.is_empty(),
            Bound::Tri(b) => b.is_empty(),
            Bound::Mask(b) => b.is_empty(),
            Bound::Aabb(b) => b.is_empty(),
        }
    }

    /// Number of cells, or `None` for the continuous shape whose cell
    /// population is not enumerable on its own.
    pub fn cell_count(&self) -> Option<usize> {
        match self {
            Bound::Rect(b) => Some(b.cell_count()),
            Bound::Cube(b) => Some(b.cell_count()),
            Bound::Hex(b) => Some(b.cell_count()),
            Bound::Tri(b) => Some(b.cell_count()),
            Bound::Mask(b) => Some(b.cell_count()),
            Bound::Aabb(_) => None,
        }
    }

    /// All cells in the shape's canonical order.
    ///
    /// Returns `Err(GridError::Unbounded)` for the continuous shape.
    pub fn cells(&self) -> Result<Vec<Cell>, GridError> {
        match self {
            Bound::Rect(b) => Ok(b.cells()),
            Bound::Cube(b) => Ok(b.cells()),
            Bound::Hex(b) => Ok(b.cells()),
            Bound::Tri(b) => Ok(b.cells()),
            Bound::Mask(b) => Ok(b.cells()),
            Bound::Aabb(_) => Err(GridError::Unbounded {
                what: "continuous aabb bound",
            }),
        }
    }

    /// Dense rank of `cell` in enumeration order; `None` when the cell
    /// is outside or the shape cannot enumerate.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        match self {
            Bound::Rect(b) => b.index_of(cell),
            Bound::Cube(b) => b.index_of(cell),
            Bound::Hex(b) => b.index_of(cell),
            Bound::Tri(b) => b.index_of(cell),
            Bound::Mask(b) => b.index_of(cell),
            Bound::Aabb(_) => None,
        }
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        match self {
            Bound::Rect(b) => b.cell_at(index),
            Bound::Cube(b) => b.cell_at(index),
            Bound::Hex(b) => b.cell_at(index),
            Bound::Tri(b) => b.cell_at(index),
            Bound::Mask(b) => b.cell_at(index),
            Bound::Aabb(_) => None,
        }
    }

    /// Cells satisfying both bounds. Exact for same-shape pairs;
    /// mixed shapes intersect their coordinate-extent boxes instead.
    pub fn intersect(&self, other: &Bound) -> Bound {
        match (self, other) {
            (Bound::Rect(a), Bound::Rect(b)) => Bound::Rect(a.intersect(b)),
            (Bound::Cube(a), Bound::Cube(b)) => Bound::Cube(a.intersect(b)),
            (Bound::Hex(a), Bound::Hex(b)) => Bound::Hex(a.intersect(b)),
            (Bound::Tri(a), Bound::Tri(b)) => Bound::Tri(a.intersect(b)),
            (Bound::Mask(a), Bound::Mask(b)) => Bound::Mask(a.intersect(b)),
            (Bound::Aabb(a), Bound::Aabb(b)) => Bound::Aabb(a.intersect(b)),
            _ => {
                let (Some(a), Some(b)) = (self.coord_extents(), other.coord_extents()) else {
                    return empty_box(self, other);
                };
                let min = Cell::new(
                    a.0.x.max(b.0.x),
                    a.0.y.max(b.0.y),
                    a.0.z.max(b.0.z),
                );
                let max = Cell::new(
                    a.1.x.min(b.1.x),
                    a.1.y.min(b.1.y),
                    a.1.z.min(b.1.z),
                );
                box_bound(min, max, planar(&a) && planar(&b))
            }
        }
    }

    /// Cells satisfying either bound. Exact for same-shape pairs;
    /// mixed shapes return the covering coordinate-extent box.
    pub fn union(&self, other: &Bound) -> Bound {
        match (self, other) {
            (Bound::Rect(a), Bound::Rect(b)) => Bound::Rect(a.union(b)),
            (Bound::Cube(a), Bound::Cube(b)) => Bound::Cube(a.union(b)),
            (Bound::Hex(a), Bound::Hex(b)) => Bound::Hex(a.union(b)),
            (Bound::Tri(a), Bound::Tri(b)) => Bound::Tri(a.union(b)),
            (Bound::Mask(a), Bound::Mask(b)) => Bound::Mask(a.union(b)),
            (Bound::Aabb(a), Bound::Aabb(b)) => Bound::Aabb(a.union(b)),
            _ => match (self.coord_extents(), other.coord_extents()) {
                (Some(a), Some(b)) => {
                    let min = Cell::new(
                        a.0.x.min(b.0.x),
                        a.0.y.min(b.0.y),
                        a.0.z.min(b.0.z),
                    );
                    let max = Cell::new(
                        a.1.x.max(b.1.x),
                        a.1.y.max(b.1.y),
                        a.1.z.max(b.1.z),
                    );
                    box_bound(min, max, planar(&a) && planar(&b))
                }
                (Some(_), None) => self.clone(),
                (None, _) => other.clone(),
            },
        }
    }

    /// World-space box covering the bound's cells on `grid`, or `None`
    /// when the bound is empty.
    ///
    /// Box shapes sample only their corner cells, which covers every
    /// cell whenever world position is affine in lattice coordinates
    /// (all lattice grids and their transforms). Other shapes fold over
    /// their full cell list. Cells the grid rejects are skipped.
    pub fn aabb(&self, grid: &Grid) -> Option<Aabb> {
        let corners: Vec<Cell> = match self {
            Bound::Aabb(b) => return b.aabb(),
            Bound::Rect(b) => {
                if b.is_empty() {
                    return None;
                }
                let (min, max) = (b.min(), b.max());
                vec![
                    min,
                    Cell::new2(max.x, min.y),
                    Cell::new2(min.x, max.y),
                    max,
                ]
            }
            Bound::Cube(b) => {
                if b.is_empty() {
                    return None;
                }
                let (min, max) = (b.min(), b.max());
                let mut v = Vec::with_capacity(8);
                for &x in &[min.x, max.x] {
                    for &y in &[min.y, max.y] {
                        for &z in &[min.z, max.z] {
                            v.push(Cell::new(x, y, z));
                        }
                    }
                }
                v
            }
            Bound::Hex(b) => b.cells(),
            Bound::Tri(b) => b.cells(),
            Bound::Mask(b) => b.cells(),
        };
        let mut out: Option<Aabb> = None;
        for cell in corners {
            if let Ok(bb) = grid.cell_aabb(cell) {
                out = Some(match out {
                    Some(acc) => acc.union(&bb),
                    None => bb,
                });
            }
        }
        out
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Inclusive min/max coordinates of the covered lattice region;
    /// `None` when empty. The continuous shape contributes the lattice
    /// points inside its box.
    fn coord_extents(&self) -> Option<(Cell, Cell)> {
        match self {
            Bound::Rect(b) => (!b.is_empty()).then(|| (b.min(), b.max())),
            Bound::Cube(b) => (!b.is_empty()).then(|| (b.min(), b.max())),
            Bound::Hex(b) => {
                if b.is_empty() {
                    return None;
                }
                let (min, mex) = (b.min(), b.mex());
                Some((min, Cell::new(mex.x - 1, mex.y - 1, mex.z - 1)))
            }
            Bound::Tri(b) => (!b.is_empty()).then(|| (b.min(), b.max())),
            Bound::Mask(b) => {
                let mut iter = b.iter();
                let first = iter.next()?;
                let mut min = first;
                let mut max = first;
                for c in iter {
                    min = Cell::new(min.x.min(c.x), min.y.min(c.y), min.z.min(c.z));
                    max = Cell::new(max.x.max(c.x), max.y.max(c.y), max.z.max(c.z));
                }
                Some((min, max))
            }
            Bound::Aabb(b) => {
                let aabb = b.aabb()?;
                let min = Cell::new(
                    lattice_ceil(aabb.min.x)?,
                    lattice_ceil(aabb.min.y)?,
                    lattice_ceil(aabb.min.z)?,
                );
                let max = Cell::new(
                    lattice_floor(aabb.max.x)?,
                    lattice_floor(aabb.max.y)?,
                    lattice_floor(aabb.max.z)?,
                );
                (min.x <= max.x && min.y <= max.y && min.z <= max.z).then_some((min, max))
            }
        }
    }
}

impl From<RectBound> for Bound {
    fn from(b: RectBound) -> Self {
        Bound::Rect(b)
    }
}

impl From<CubeBound> for Bound {
    fn from(b: CubeBound) -> Self {
        Bound::Cube(b)
    }
}

impl From<HexBound> for Bound {
    fn from(b: HexBound) -> Self {
        Bound::Hex(b)
    }
}

impl From<TriBound> for Bound {
    fn from(b: TriBound) -> Self {
        Bound::Tri(b)
    }
}

impl From<MaskBound> for Bound {
    fn from(b: MaskBound) -> Self {
        Bound::Mask(b)
    }
}

impl From<AabbBound> for Bound {
    fn from(b: AabbBound) -> Self {
        Bound::Aabb(b)
    }
}

fn planar(extents: &(Cell, Cell)) -> bool {
    extents.0.z == 0 && extents.1.z == 0
}

/// Builds the fallback box, degrading to the canonical empty when the
/// corners are inverted.
fn box_bound(min: Cell, max: Cell, planar: bool) -> Bound {
    if planar {
        match RectBound::new(Cell::new2(min.x, min.y), Cell::new2(max.x, max.y)) {
            Ok(b) => Bound::Rect(b),
            Err(_) => Bound::Rect(RectBound::empty()),
        }
    } else {
        match CubeBound::new(min, max) {
            Ok(b) => Bound::Cube(b),
            Err(_) => Bound::Cube(CubeBound::empty()),
        }
    }
}

/// The empty fallback result, planar when both operands are.
fn empty_box(a: &Bound, b: &Bound) -> Bound {
    let planar = matches!(a, Bound::Rect(_)) && matches!(b, Bound::Rect(_));
    if planar {
        Bound::Rect(RectBound::empty())
    } else {
        Bound::Cube(CubeBound::empty())
    }
}

fn lattice_ceil(v: f64) -> Option<i32> {
    let c = v.ceil();
    (c >= f64::from(i32::MIN) && c <= f64::from(i32::MAX)).then_some(c as i32)
}

fn lattice_floor(v: f64) -> Option<i32> {
    let f = v.floor();
    (f >= f64::from(i32::MIN) && f <= f64::from(i32::MAX)).then_some(f as i32)
}
