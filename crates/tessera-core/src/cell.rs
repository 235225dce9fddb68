//! The [`Cell`] coordinate triple.

use std::fmt;
use std::ops::{Add, Sub};

/// A cell reference: three integers whose interpretation belongs to the
/// grid that issued them.
///
/// Square grids use `(x, y, 0)`. Hex grids use cube coordinates with
/// `x + y + z == 0`. Triangle grids use a redundant triple with
/// `x + y + z` equal to 1 or 2. Cube and prism grids use all three
/// components. A `Cell` from one grid has no meaning on another.
///
/// # Examples
///
/// ```
/// use tessera_core::Cell;
///
/// let c = Cell::new(2, -1, -1);
/// assert_eq!(c.x + c.y + c.z, 0);
/// assert_eq!(c.to_string(), "(2, -1, -1)");
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cell {
    /// First component.
    pub x: i32,
    /// Second component.
    pub y: i32,
    /// Third component.
    pub z: i32,
}

impl Cell {
    /// The all-zero cell.
    pub const ORIGIN: Cell = Cell { x: 0, y: 0, z: 0 };

    /// Builds a cell from its three components.
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    /// Builds a planar cell with `z = 0`, the form square grids and
    /// axial hex references use.
    pub const fn new2(x: i32, y: i32) -> Self {
        Self { x, y, z: 0 }
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl From<(i32, i32, i32)> for Cell {
    fn from((x, y, z): (i32, i32, i32)) -> Self {
        Self::new(x, y, z)
    }
}

impl Add for Cell {
    type Output = Cell;

    fn add(self, rhs: Cell) -> Cell {
        Cell::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl Sub for Cell {
    type Output = Cell;

    fn sub(self, rhs: Cell) -> Cell {
        Cell::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}
