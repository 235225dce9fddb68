//! Closed integer box bound for 3D grids.

use tessera_core::{Cell, GridError};

/// An inclusive integer box over all three axes, the bound shape of
/// cube grids and of prisms after normalization.
///
/// Enumeration and dense indexing run z, then y, then x: the x axis
/// varies fastest.
///
/// # Examples
///
/// ```
/// use tessera_core::Cell;
/// use tessera_grid::CubeBound;
///
/// let b = CubeBound::new(Cell::new(0, 0, 0), Cell::new(1, 1, 1)).unwrap();
/// assert_eq!(b.cell_count(), 8);
/// assert!(b.contains(Cell::new(1, 0, 1)));
/// assert!(!b.contains(Cell::new(0, 0, 2)));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CubeBound {
    min: Cell,
    max: Cell,
}

impl CubeBound {
    /// Builds the box spanning `min..=max` on every axis.
    ///
    /// Returns `Err(GridError::InvalidArgument)` when `min` exceeds
    /// `max` on any axis; use [`CubeBound::empty`] for the empty box.
    pub fn new(min: Cell, max: Cell) -> Result<Self, GridError> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(GridError::invalid(format!(
                "box min {min} exceeds max {max}"
            )));
        }
        Ok(Self { min, max })
    }

    /// The empty box.
    pub fn empty() -> Self {
        Self {
            min: Cell::new(0, 0, 0),
            max: Cell::new(-1, -1, -1),
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

    /// Side lengths `(x, y, z)` in cells.
    pub fn size(&self) -> (u64, u64, u64) {
        if self.is_empty() {
            return (0, 0, 0);
        }
        (
            (i64::from(self.max.x) - i64::from(self.min.x) + 1) as u64,
            (i64::from(self.max.y) - i64::from(self.min.y) + 1) as u64,
            (i64::from(self.max.z) - i64::from(self.min.z) + 1) as u64,
        )
    }

    /// Whether no cell satisfies the bound.
    pub fn is_empty(&self) -> bool {
        self.min.x > self.max.x || self.min.y > self.max.y || self.min.z > self.max.z
    }

    /// Whether `cell` lies inside the box.
    pub fn contains(&self, cell: Cell) -> bool {
        cell.x >= self.min.x
            && cell.x <= self.max.x
            && cell.y >= self.min.y
            && cell.y <= self.max.y
            && cell.z >= self.min.z
            && cell.z <= self.max.z
    }

    /// Number of cells, saturating at `usize::MAX` for outsized boxes.
    pub fn cell_count(&self) -> usize {
        let (sx, sy, sz) = self.size();
        usize::try_from(u128::from(sx) * u128::from(sy) * u128::from(sz)).unwrap_or(usize::MAX)
    }

    /// All cells, z then y then x.
    pub fn cells(&self) -> Vec<Cell> {
        let mut out = Vec::with_capacity(self.cell_count());
        if self.is_empty() {
            return out;
        }
        for z in self.min.z..=self.max.z {
            for y in self.min.y..=self.max.y {
                for x in self.min.x..=self.max.x {
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
        let (sx, sy, _) = self.size();
        let dx = (i64::from(cell.x) - i64::from(self.min.x)) as u128;
        let dy = (i64::from(cell.y) - i64::from(self.min.y)) as u128;
        let dz = (i64::from(cell.z) - i64::from(self.min.z)) as u128;
        usize::try_from((dz * u128::from(sy) + dy) * u128::from(sx) + dx).ok()
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        if self.is_empty() || index >= self.cell_count() {
            return None;
        }
        let (sx, sy, _) = self.size();
        let (sx, sy) = (sx as u128, sy as u128);
        let i = index as u128;
        let x = i64::from(self.min.x) + (i % sx) as i64;
        let y = i64::from(self.min.y) + ((i / sx) % sy) as i64;
        let z = i64::from(self.min.z) + (i / (sx * sy)) as i64;
        Some(Cell::new(x as i32, y as i32, z as i32))
    }

    /// Largest box contained in both operands.
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
        if self.is_empty() {
            return other.clone();
        }
        if other.is_empty() {
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
}
