//! Closed integer rectangle bound for planar grids.

use tessera_core::{Cell, GridError};

/// An inclusive integer box over `(x, y)`, the bound shape of square
/// grids (and, after normalization, of planar modifier grids).
///
/// Cells are `(x, y, 0)`; the z component plays no part in membership.
/// The empty rectangle is representable and behaves as the absorbing
/// element of intersection.
///
/// Enumeration and dense indexing are row-major: outer loop over `y`,
/// inner loop over `x`.
///
/// # Examples
///
/// ```
/// use tessera_core::Cell;
/// use tessera_grid::RectBound;
///
/// let b = RectBound::new(Cell::new2(-2, -1), Cell::new2(3, 4)).unwrap();
/// assert_eq!(b.cell_count(), 36);
/// assert!(b.contains(Cell::new2(0, 0)));
/// assert!(!b.contains(Cell::new2(4, 0)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RectBound {
    min: Cell,
    max: Cell,
}

impl RectBound {
    /// Builds the rectangle spanning `min..=max` on x and y.
    ///
    /// Returns `Err(GridError::InvalidArgument)` when `min` exceeds
    /// `max` on either axis; use [`RectBound::empty`] for the empty
    /// rectangle. The z components of both corners are ignored.
    pub fn new(min: Cell, max: Cell) -> Result<Self, GridError> {
        if min.x > max.x || min.y > max.y {
            return Err(GridError::invalid(format!(
                "rect min {min} exceeds max {max}"
            )));
        }
        Ok(Self {
            min: Cell::new2(min.x, min.y),
            max: Cell::new2(max.x, max.y),
        })
    }

    /// The empty rectangle.
    pub fn empty() -> Self {
        Self {
            min: Cell::new2(0, 0),
            max: Cell::new2(-1, -1),
        }
    }

    /// Smallest corner, or the canonical inverted pair when empty.
    pub fn min(&self) -> Cell {
        self.min
    }

    /// Largest corner (inclusive).
    pub fn max(&self) -> Cell {
        self.max
    }

    /// Side lengths `(width, height)` in cells.
    pub fn size(&self) -> (u64, u64) {
        if self.is_empty() {
            return (0, 0);
        }
        (
            (i64::from(self.max.x) - i64::from(self.min.x) + 1) as u64,
            (i64::from(self.max.y) - i64::from(self.min.y) + 1) as u64,
        )
    }

    /// Whether no cell satisfies the bound.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y
    }

    /// Whether `cell` lies inside the rectangle. The z component is
    /// not examined.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x && cell.x <= self.max.x && cell.y >= self.min.y && cell.y <= self.max.y
    }

    /// Number of cells, saturating at `usize::MAX` for outsized boxes.
    pub fn cell_count(&self) -> usize {
        let (w, h) = self.size();
        usize::try_from(u128::from(w) * u128::from(h)).unwrap_or(usize::MAX)
    }

    /// All cells in row-major order.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.cell_count());
        if self.is_empty() {
            return out;
        }
        for y in self.min.y..=self.max.y {
            for x in self.min.x..=self.max.x {
                out.push(Cell::new2(x, y));
            }
        }
        out
    }

    /// Dense rank of `cell` in row-major order.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let (w, _) = self.size();
        let row = (i64::from(cell.y) - i64::from(self.min.y)) as u128;
        let col = (i64::from(cell.x) - i64::from(self.min.x)) as u128;
        usize::try_from(row * u128::from(w) + col).ok()
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if self.is_empty() || index >= self.cell_count() {
            return None;
        }
        let (w, _) = self.size();
        let w = w as u128;
        let y = i64::from(self.min.y) + (index as u128 / w) as i64;
        let x = i64::from(self.min.x) + (index as u128 % w) as i64;
        Some(Cell::new2(x as i32, y as i32))
    }

    /// Largest rectangle contained in both operands.
    pub fn intersect(&self, other: &Self) -> Self {
        let min = Cell::new2(self.min.x.max(other.min.x), self.min.y.max(other.min.y));
        let max = Cell::new2(self.max.x.min(other.max.x), self.max.y.min(other.max.y));
        if min.x > max.x || min.y > max.y {
            Self::empty()
        } else {
            Self { min, max }
        }
    }

    /// Smallest rectangle covering both operands. For disjoint inputs
    /// this is a strict superset of the set union.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self {
            min: Cell::new2(self.min.x.min(other.min.x), self.min.y.min(other.min.y)),
            max: Cell::new2(self.max.x.max(other.max.x), self.max.y.max(other.max.y)),
        }
    }
}
