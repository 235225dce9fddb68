//! Explicit cell-set bound.

use indexmap::IndexSet;
use tessera_core::Cell;

/// An arbitrary set of cells, kept in insertion order so enumeration
/// and dense indexing stay stable across queries.
///
/// # Examples
///
/// ```
/// use tessera_core::Cell;
/// use tessera_grid::MaskBound;
///
/// let mut m = MaskBound::new();
/// m.insert(Cell::new(0, 0, 0));
/// m.insert(Cell::new(4, -1, 0));
/// assert_eq!(m.cell_count(), 2);
/// assert_eq!(m.index_of(Cell::new(4, -1, 0)), Some(1));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MaskBound {
    cells: IndexSet<Cell>,
}

impl MaskBound {
    /// An empty mask.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a cell; returns whether it was newly inserted.
    pub fn insert(&mut self, cell: Cell) -> bool {
        self.cells.insert(cell)
    }

    /// Removes a cell; returns whether it was present. Later cells
    /// shift down one index slot.
    pub fn remove(&mut self, cell: Cell) -> bool {
        self.cells.shift_remove(&cell)
    }

    /// Whether the mask holds no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Membership test.
    pub fn contains(&self, cell: Cell) -> bool {
        self.cells.contains(&cell)
    }

    /// Number of cells.
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Cells in insertion order.
    pub fn cells(&self) -> Vec<Cell> {
        self.cells.iter().copied().collect()
    }

    /// Iterates without allocating.
    pub fn iter(&self) -> impl Iterator<Item = Cell> + '_ {
        self.cells.iter().copied()
    }

    /// Dense rank of `cell` in insertion order.
    pub fn index_of(&self, cell: Cell) -> Option<usize> {
        self.cells.get_index_of(&cell)
    }

    /// Inverse of [`index_of`](Self::index_of).
    pub fn cell_at(&self, index: usize) -> Option<Cell> {
        self.cells.get_index(index).copied()
    }

    /// Cells present in both masks, iterating the smaller operand so
    /// the result order follows it.
    pub fn intersect(&self, other: &Self) -> Self {
        let (small, large) = if self.cell_count() <= other.cell_count() {
            (self, other)
        } else {
            (other, self)
        };
        Self {
            cells: small
                .cells
                .iter()
                .filter(|c| large.cells.contains(*c))
                .copied()
                .collect(),
        }
    }

    /// Cells present in either mask: `self` first, then the cells only
    /// `other` has, in their own orders.
    pub fn union(&self, other: &Self) -> Self {
        let mut cells = self.cells.clone();
        cells.extend(other.cells.iter().copied());
        Self { cells }
    }
}

impl FromIterator<Cell> for MaskBound {
    fn from_iter<I: IntoIterator<Item = Cell>>(iter: I) -> Self {
        Self {
            cells: iter.into_iter().collect(),
        }
    }
}

impl Extend<Cell> for MaskBound {
    fn extend<I: IntoIterator<Item = Cell>>(&mut self, iter: I) {
        self.cells.extend(iter);
    }
}
