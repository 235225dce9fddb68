//! Parallelogon bound over hex cube coordinates.

use crate::hex::to_cube;
use tessera_core::{Cell, GridError};

/// A bound over hex cells given by three coordinate strips: cube cell
/// `(x, y, z)` is in the bound when `min.i <= i < mex.i` holds for each
/// of the three axes. Because `x + y + z = 0`, the three strips cut out
/// a hexagon-shaped (or parallelogram-shaped) patch of cells.
///
/// `min` is inclusive and `mex` exclusive per axis; the triples are
/// strip limits, not cells, and need not sum to zero themselves.
/// Membership accepts the axial alias `(q, r, 0)` anywhere a cell is
/// passed in.
///
/// Enumeration and dense indexing walk x rows in ascending x, each row
/// in ascending y (z follows from the other two).
///
/// # Examples
///
/// ```
/// use tessera_core::Cell;
/// use tessera_grid::HexBound;
///
/// // Radius-1 disk around the origin: 7 cells.
/// let b = HexBound::new(Cell::new(-1, -1, -1), Cell::new(2, 2, 2));
/// assert_eq!(b.cell_count(), 7);
/// assert!(b.contains(Cell::new(1, -1, 0)));
/// assert!(b.contains(Cell::new2(1, -1))); // same cell, axial alias
/// assert!(!b.contains(Cell::new(2, -1, -1)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct HexBound {
    min: Cell,
    mex: Cell,
}

impl HexBound {
    /// Builds the bound with the given inclusive `min` and exclusive
    /// `mex` strip limits. Inverted strips simply produce an empty
    /// bound, so every input is meaningful.
    pub fn new(min: Cell, mex: Cell) -> Self {
        let b = Self { min, mex };
        if b.has_no_cells() {
            Self::empty()
        } else {
            b
        }
    }

    /// The empty bound.
    pub fn empty() -> Self {
        Self {
            min: Cell::new(0, 0, 0),
            mex: Cell::new(0, 0, 0),
        }
    }

    /// Smallest bound containing both cells, which may be given in
    /// axial or cube form.
    ///
    /// Returns `Err(GridError::CellNotInGrid)` when either reference is
    /// not a valid hex cell.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::Cell;
    /// use tessera_grid::HexBound;
    ///
    /// let b = HexBound::from_corners(Cell::new2(0, 0), Cell::new2(2, 1)).unwrap();
    /// assert!(b.contains(Cell::new2(0, 0)));
    /// assert!(b.contains(Cell::new2(2, 1)));
    /// assert!(b.contains(Cell::new2(1, 1)));
    /// ```
    pub fn from_corners(a: Cell, b: Cell) -> Result<Self, GridError> {
        let ca = to_cube(a).ok_or(GridError::CellNotInGrid { cell: a })?;
        let cb = to_cube(b).ok_or(GridError::CellNotInGrid { cell: b })?;
        let min = Cell::new(ca.x.min(cb.x), ca.y.min(cb.y), ca.z.min(cb.z));
        let mex = Cell::new(
            ca.x.max(cb.x) + 1,
            ca.y.max(cb.y) + 1,
            ca.z.max(cb.z) + 1,
        );
        Ok(Self::new(min, mex))
    }

    /// Inclusive per-axis lower strip limits.
    pub fn min(&self) -> Cell {
        self.min
    }

    /// Exclusive per-axis upper strip limits.
    pub fn mex(&self) -> Cell {
        self.mex
    }

    /// Whether no cell satisfies the bound.
    pub fn is_empty(&self) -> bool {
        self.has_no_cells()
    }

    /// Whether `cell` (cube or axial) lies in all three strips.
    pub fn contains(&self, cell: Cell) -> bool {
        let Some(c) = to_cube(cell) else {
            return false;
        };
        c.x >= self.min.x
            && c.x < self.mex.x
            && c.y >= self.min.y
            && c.y < self.mex.y
            && c.z >= self.min.z
            && c.z < self.mex.z
    }

    /// Number of cells, saturating at `usize::MAX`.
    pub fn cell_count(&self) -> usize {
        let (lo, hi) = self.x_bounds();
        let mut count: u128 = 0;
        for x in lo..=hi {
            count += self.row_len(x as i32) as u128;
        }
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// All cells in x-row order.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.cell_count());
        let (xlo, xhi) = self.x_bounds();
        for x in xlo..=xhi {
            let x = x as i32;
            let (lo, hi) = self.y_span(x);
            for y in lo..=hi {
                out.push(Cell::new(x, y, -x - y));
            }
        }
        out
    }

    /// Dense rank of `cell` in enumeration order.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        let c = to_cube(cell)?;
        if !self.contains(c) {
            return None;
        }
        let (xlo, xhi) = self.x_bounds();
        let mut rank: u128 = 0;
        for x in xlo..=xhi {
            let x = x as i32;
            if x == c.x {
                let (lo, _) = self.y_span(x);
                rank += (i64::from(c.y) - i64::from(lo)) as u128;
                return usize::try_from(rank).ok();
            }
            rank += self.row_len(x) as u128;
        }
        None
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        let (xlo, xhi) = self.x_bounds();
        let mut remaining = index as u128;
        for x in xlo..=xhi {
            let x = x as i32;
            let len = self.row_len(x) as u128;
            if remaining < len {
                let (lo, _) = self.y_span(x);
                let y = (i64::from(lo) + remaining as i64) as i32;
                return Some(Cell::new(x, y, -x - y));
            }
            remaining -= len;
        }
        None
    }

    /// Largest bound contained in both operands. Strip-wise clamping is
    /// exact for this shape.
    pub fn intersect(&self, other: &Self) -> Self {
        Self::new(
            Cell::new(
                self.min.x.max(other.min.x),
                self.min.y.max(other.min.y),
                self.min.z.max(other.min.z),
            ),
            Cell::new(
                self.mex.x.min(other.mex.x),
                self.mex.y.min(other.mex.y),
                self.mex.z.min(other.mex.z),
            ),
        )
    }

    /// Smallest strip cover of both operands; a superset of the set
    /// union when the operands are offset.
    pub fn union(&self, other: &Self) -> Self {
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
            return self.clone();
        }
        Self::new(
            Cell::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            Cell::new(
                self.mex.x.max(other.mex.x),
                self.mex.y.max(other.mex.y),
                self.mex.z.max(other.mex.z),
            ),
        )
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Inclusive range of x rows that can hold cells; empty when
    /// `lo > hi`.
    fn x_bounds(&self) -> (i64, i64) {
        // x must leave room for y and z: y >= min.y and z >= min.z cap
        // x from above, y < mex.y and z < mex.z from below.
        let lo = i64::from(self.min.x).max(2 - i64::from(self.mex.y) - i64::from(self.mex.z));
        let hi = (i64::from(self.mex.x) - 1).min(-i64::from(self.min.y) - i64::from(self.min.z));
        (lo, hi)
    }

    /// Inclusive y span of row `x`; never empty for rows inside
    /// [`x_bounds`](Self::x_bounds).
    fn y_span(&self, x: i32) -> (i32, i32) {
        let lo = i64::from(self.min.y).max(-i64::from(x) - i64::from(self.mex.z) + 1);
        let hi = (i64::from(self.mex.y) - 1).min(-i64::from(x) - i64::from(self.min.z));
        (lo as i32, hi as i32)
    }

    fn row_len(&self, x: i32) -> u64 {
        let (lo, hi) = self.y_span(x);
        if lo > hi {
            0
        } else {
            (i64::from(hi) - i64::from(lo) + 1) as u64
        }
    }

    fn has_no_cells(&self) -> bool {
        let (lo, hi) = self.x_bounds();
        self.min.x >= self.mex.x
            || self.min.y >= self.mex.y
            || self.min.z >= self.mex.z
            || lo > hi
    }
}
