//! Box bound over triangle parity coordinates.

use tessera_core::{Cell, GridError};

/// An inclusive integer box filtered by the triangle lattice rule
/// `x + y + z ∈ {1, 2}`: roughly half the raw box is valid.
///
/// Enumeration and dense indexing run x, then y, then the one or two
/// valid z values in ascending order.
///
/// # Examples
///
/// ```
/// use tessera_core::Cell;
/// use tessera_grid::TriBound;
///
/// let b = TriBound::new(Cell::new(0, 0, 0), Cell::new(1, 1, 1)).unwrap();
/// assert_eq!(b.cell_count(), 6);
/// assert!(b.contains(Cell::new(1, 0, 1)));
/// assert!(!b.contains(Cell::new(0, 0, 0))); // sum 0: not a cell
/// assert!(!b.contains(Cell::new(1, 1, 1))); // sum 3: not a cell
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TriBound {
    min: Cell,
    max: Cell,
}

impl TriBound {
    /// Builds the box spanning `min..=max` on every axis. The corners
    /// are box limits, not cells, and need not satisfy the parity rule.
    ///
    /// Returns `Err(GridError::InvalidArgument)` when `min` exceeds
    /// `max` on any axis; use [`TriBound::empty`] for the empty bound.
    pub fn new(min: Cell, max: Cell) -> Result<Self, GridError> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(GridError::invalid(format!(
                "triangle box min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// The empty bound.
    pub fn empty() -> Self {
        Self {
            min: Cell::new(0, 0, 0),
            max: Cell::new(-1, -1, -1),
        }
    }

    /// Smallest box covering both cells.
    ///
    /// Returns `Err(GridError::CellNotInGrid)` when either reference
    /// violates the parity rule.
    pub fn from_corners(a: Cell, b: Cell) -> Result<Self, GridError> {
        for c in [a, b] {
            let s = i64::from(c.x) + i64::from(c.y) + i64::from(c.z);
            if !(1..=2).contains(&s) {
                return Err(GridError::CellNotInGrid { cell: c });
            }
        }
        Ok(Self {
            min: Cell::new(a.x.min(b.x), a.y.min(b.y), a.z.min(b.z)),
            max: Cell::new(a.x.max(b.x), a.y.max(b.y), a.z.max(b.z)),
        })
    }

    /// Smallest corner of the raw box.
    pub fn min(&self) -> Cell {
        self.min
    }

    /// Largest corner of the raw box (inclusive).
    pub fn max(&self) -> Cell {
        self.max
    }

    /// Whether no cell satisfies the bound. A non-inverted box can
    /// still be empty when the parity rule excludes every lattice
    /// point it covers.
    pub fn is_empty(&self) -> bool {
        self.box_is_inverted() || self.cell_count() == 0
    }

    /// Whether `cell` lies in the box and satisfies the parity rule.
    pub fn contains(&self, cell: Cell) -> bool {
        let s = i64::from(cell.x) + i64::from(cell.y) + i64::from(cell.z);
        (1..=2).contains(&s)
            && cell.x >= self.min.x
            && cell.x <= self.max.x
            && cell.y >= self.min.y
            && cell.y <= self.max.y
            && cell.z >= self.min.z
            && cell.z <= self.max.z
    }

    /// Number of cells, saturating at `usize::MAX`. Computed per x row
    /// by interval overlap, without enumerating.
    pub fn cell_count(&self) -> usize {
        if self.box_is_inverted() {
            return 0;
        }
        let mut count: u128 = 0;
        for x in self.min.x..=self.max.x {
            count += u128::from(self.row_count(i64::from(x)));
        }
        usize::try_from(count).unwrap_or(usize::MAX)
    }

    /// All cells: x, then y, then ascending z.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.cell_count());
        if self.box_is_inverted() {
            return out;
        }
        for x in self.min.x..=self.max.x {
            for y in self.min.y..=self.max.y {
                for z in self.z_candidates(i64::from(x), i64::from(y)) {
                    out.push(Cell::new(x, y, z));
                }
            }
        }
        out
    }

    /// Dense rank of `cell` in enumeration order.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        if !self.contains(cell) {
            return None;
        }
        let (x, y, z) = (i64::from(cell.x), i64::from(cell.y), i64::from(cell.z));
        let mut rank: u128 = 0;
        for row in i64::from(self.min.x)..x {
            rank += u128::from(self.row_count(row));
        }
        // Earlier y positions in this row, by the same overlap trick.
        for s in [1i64, 2] {
            rank += u128::from(overlap(
                i64::from(self.min.y),
                y - 1,
                s - x - i64::from(self.max.z),
                s - x - i64::from(self.min.z),
            ));
        }
        // Within one (x, y) pair the sum-1 cell sorts first.
        if x + y + z == 2 && self.z_in_range(1 - x - y) {
            rank += 1;
        }
        usize::try_from(rank).ok()
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if self.box_is_inverted() {
            return None;
        }
        let mut remaining = index as u128;
        for x in self.min.x..=self.max.x {
            let row = u128::from(self.row_count(i64::from(x)));
            if remaining >= row {
                remaining -= row;
                continue;
            }
            for y in self.min.y..=self.max.y {
                for z in self.z_candidates(i64::from(x), i64::from(y)) {
                    if remaining == 0 {
                        return Some(Cell::new(x, y, z));
                    }
                    remaining -= 1;
                }
            }
        }
        None
    }

    /// Largest box contained in both operands; exact, since the parity
    /// filter is shared.
    pub fn intersect(&self, other: &Self) -> Self {
        let min = Cell::new(
            self.min.x.max(other.min.x),
            self.min.y.max(other.min.y),
            self.min.z.max(other.min.z),
        );
        let max = Cell::new(
            self.max.x.min(other.max.x),
            self.max.y.min(other.max.y),
            self.max.z.min(other.max.z),
        );
        if min.x > max.x || min.y > max.y || min.z > max.z {
            Self::empty()
        } else {
            Self { min, max }
        }
    }

    /// Smallest box covering both operands.
    pub fn union(&self, other: &Self) -> Self {
        if self.box_is_inverted() {
            return other.clone();
        }
        if other.box_is_inverted() {
            return self.clone();
        }
        Self {
            min: Cell::new(
                self.min.x.min(other.min.x),
                self.min.y.min(other.min.y),
                self.min.z.min(other.min.z),
            ),
            max: Cell::new(
                self.max.x.max(other.max.x),
                self.max.y.max(other.max.y),
                self.max.z.max(other.max.z),
            ),
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn box_is_inverted(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    fn z_in_range(&self, z: i64) -> bool {
        z >= i64::from(self.min.z) && z <= i64::from(self.max.z)
    }

    /// The valid z values for one (x, y) column, ascending: the sum-1
    /// cell sits below the sum-2 cell.
    fn z_candidates(&self, x: i64, y: i64) -> impl Iterator<Item = i32> + '_ {
        [1 - x - y, 2 - x - y]
            .into_iter()
            .filter(move |&z| self.z_in_range(z))
            .map(|z| z as i32)
    }

    /// Cells in row `x`: for each target sum, the y values whose z
    /// lands inside the box form one interval.
    fn row_count(&self, x: i64) -> u64 {
        let mut n = 0;
        for s in [1i64, 2] {
            n += overlap(
                i64::from(self.min.y),
                i64::from(self.max.y),
                s - x - i64::from(self.max.z),
                s - x - i64::from(self.min.z),
            );
        }
        n
    }
}

/// Length of the overlap of two inclusive integer intervals.
fn overlap(a_lo: i64, a_hi: i64, b_lo: i64, b_hi: i64) -> u64 {
    let lo = a_lo.max(b_lo);
    let hi = a_hi.min(b_hi);
    if lo > hi {
        0
    } else {
        (hi - lo + 1) as u64
    }
}
