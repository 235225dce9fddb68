//! Direction and corner indices, with named constants per tessellation.
//!
//! A [`Dir`] is an index into a cell's direction space and a [`Corner`]
//! an index into its corner space. The meaning of an index depends on
//! the cell type that issued it; the constant groups below give the
//! conventional names for each tessellation so call sites never hardcode
//! raw indices.

use std::fmt;

/// Index of a direction out of a cell.
///
/// Directions are numbered counter-clockwise. Which angles the indices
/// stand for depends on the cell type; see the constant groups
/// ([`SquareDir`], [`FlatHexDir`], [`PointyHexDir`], [`TriangleDir`],
/// [`CubeDir`]) for the conventions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dir(pub u32);

impl fmt::Display for Dir {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Dir {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Index of a corner of a cell.
///
/// Corners are numbered counter-clockwise in the same index space as
/// directions: for square, hex, and n-gon cells, edge `d` runs between
/// corners `d` and `d + 1 (mod n)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Corner(pub u32);

impl fmt::Display for Corner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for Corner {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Directions of a square cell, counter-clockwise from +X.
pub struct SquareDir;

impl SquareDir {
    /// +X.
    pub const RIGHT: Dir = Dir(0);
    /// +Y.
    pub const UP: Dir = Dir(1);
    /// −X.
    pub const LEFT: Dir = Dir(2);
    /// −Y.
    pub const DOWN: Dir = Dir(3);
}

/// Corners of a square cell, counter-clockwise from the corner at −45°.
pub struct SquareCorner;

impl SquareCorner {
    /// (+, −).
    pub const BOTTOM_RIGHT: Corner = Corner(0);
    /// (+, +).
    pub const TOP_RIGHT: Corner = Corner(1);
    /// (−, +).
    pub const TOP_LEFT: Corner = Corner(2);
    /// (−, −).
    pub const BOTTOM_LEFT: Corner = Corner(3);
}

/// Directions of a flat-top hex cell. The first direction sits at 30°,
/// each subsequent one 60° further counter-clockwise.
pub struct FlatHexDir;

impl FlatHexDir {
    /// 30°.
    pub const UP_RIGHT: Dir = Dir(0);
    /// 90°.
    pub const UP: Dir = Dir(1);
    /// 150°.
    pub const UP_LEFT: Dir = Dir(2);
    /// 210°.
    pub const DOWN_LEFT: Dir = Dir(3);
    /// 270°.
    pub const DOWN: Dir = Dir(4);
    /// 330°.
    pub const DOWN_RIGHT: Dir = Dir(5);
}

/// Corners of a flat-top hex cell, at 0°, 60°, … 300°.
pub struct FlatHexCorner;

impl FlatHexCorner {
    /// 0°.
    pub const RIGHT: Corner = Corner(0);
    /// 60°.
    pub const UP_RIGHT: Corner = Corner(1);
    /// 120°.
    pub const UP_LEFT: Corner = Corner(2);
    /// 180°.
    pub const LEFT: Corner = Corner(3);
    /// 240°.
    pub const DOWN_LEFT: Corner = Corner(4);
    /// 300°.
    pub const DOWN_RIGHT: Corner = Corner(5);
}

/// Directions of a pointy-top hex cell. The first direction sits at 0°,
/// each subsequent one 60° further counter-clockwise.
pub struct PointyHexDir;

impl PointyHexDir {
    /// 0°.
    pub const RIGHT: Dir = Dir(0);
    /// 60°.
    pub const UP_RIGHT: Dir = Dir(1);
    /// 120°.
    pub const UP_LEFT: Dir = Dir(2);
    /// 180°.
    pub const LEFT: Dir = Dir(3);
    /// 240°.
    pub const DOWN_LEFT: Dir = Dir(4);
    /// 300°.
    pub const DOWN_RIGHT: Dir = Dir(5);
}

/// Corners of a pointy-top hex cell, at −30°, 30°, … 270°.
pub struct PointyHexCorner;

impl PointyHexCorner {
    /// −30°.
    pub const DOWN_RIGHT: Corner = Corner(0);
    /// 30°.
    pub const UP_RIGHT: Corner = Corner(1);
    /// 90°.
    pub const UP: Corner = Corner(2);
    /// 150°.
    pub const UP_LEFT: Corner = Corner(3);
    /// 210°.
    pub const DOWN_LEFT: Corner = Corner(4);
    /// 270°.
    pub const DOWN: Corner = Corner(5);
}

/// Directions of a flat-top triangle cell, at 30°, 90°, … 330°.
///
/// Up cells (coordinate sum 2) use the even directions, down cells
/// (sum 1) the odd ones; the six indices form one shared space so that
/// `(d + 3) mod 6` is always the inverse.
pub struct TriangleDir;

impl TriangleDir {
    /// 30°. Out of an up cell.
    pub const UP_RIGHT: Dir = Dir(0);
    /// 90°. Out of a down cell.
    pub const UP: Dir = Dir(1);
    /// 150°. Out of an up cell.
    pub const UP_LEFT: Dir = Dir(2);
    /// 210°. Out of a down cell.
    pub const DOWN_LEFT: Dir = Dir(3);
    /// 270°. Out of an up cell.
    pub const DOWN: Dir = Dir(4);
    /// 330°. Out of a down cell.
    pub const DOWN_RIGHT: Dir = Dir(5);
}

/// Corners of a flat-top triangle cell, at 30°, 90°, … 330°.
///
/// Up cells have corners at the odd indices, down cells at the even.
pub struct TriangleCorner;

impl TriangleCorner {
    /// 30°. On a down cell.
    pub const UP_RIGHT: Corner = Corner(0);
    /// 90°. On an up cell (the apex).
    pub const UP: Corner = Corner(1);
    /// 150°. On a down cell.
    pub const UP_LEFT: Corner = Corner(2);
    /// 210°. On an up cell.
    pub const DOWN_LEFT: Corner = Corner(3);
    /// 270°. On a down cell (the apex).
    pub const DOWN: Corner = Corner(4);
    /// 330°. On an up cell.
    pub const DOWN_RIGHT: Corner = Corner(5);
}

/// Directions of a flat-sides triangle cell, at 300°, 0°, … 240°.
///
/// Right-pointing cells (coordinate sum 2) use the even directions,
/// left-pointing cells (sum 1) the odd ones.
pub struct FlatSidesTriangleDir;

impl FlatSidesTriangleDir {
    /// 300°. Out of a right-pointing cell.
    pub const DOWN_RIGHT: Dir = Dir(0);
    /// 0°. Out of a left-pointing cell.
    pub const RIGHT: Dir = Dir(1);
    /// 60°. Out of a right-pointing cell.
    pub const UP_RIGHT: Dir = Dir(2);
    /// 120°. Out of a left-pointing cell.
    pub const UP_LEFT: Dir = Dir(3);
    /// 180°. Out of a right-pointing cell.
    pub const LEFT: Dir = Dir(4);
    /// 240°. Out of a left-pointing cell.
    pub const DOWN_LEFT: Dir = Dir(5);
}

/// Directions of a cube cell.
pub struct CubeDir;

impl CubeDir {
    /// +X.
    pub const RIGHT: Dir = Dir(0);
    /// +Y.
    pub const UP: Dir = Dir(1);
    /// −X.
    pub const LEFT: Dir = Dir(2);
    /// −Y.
    pub const DOWN: Dir = Dir(3);
    /// +Z.
    pub const FORWARD: Dir = Dir(4);
    /// −Z.
    pub const BACK: Dir = Dir(5);
}

/// Corners of a cube cell, indexed by the bit pattern
/// `x | y << 1 | z << 2` where a set bit means the positive side.
pub struct CubeCorner;

impl CubeCorner {
    /// (−, −, −).
    pub const LEFT_DOWN_BACK: Corner = Corner(0);
    /// (+, −, −).
    pub const RIGHT_DOWN_BACK: Corner = Corner(1);
    /// (−, +, −).
    pub const LEFT_UP_BACK: Corner = Corner(2);
    /// (+, +, −).
    pub const RIGHT_UP_BACK: Corner = Corner(3);
    /// (−, −, +).
    pub const LEFT_DOWN_FORWARD: Corner = Corner(4);
    /// (+, −, +).
    pub const RIGHT_DOWN_FORWARD: Corner = Corner(5);
    /// (−, +, +).
    pub const LEFT_UP_FORWARD: Corner = Corner(6);
    /// (+, +, +).
    pub const RIGHT_UP_FORWARD: Corner = Corner(7);
}

/// Direction helpers for prism grids, whose direction space is the base
/// grid's directions followed by an up/down pair.
pub struct PrismDir;

impl PrismDir {
    /// The +Z direction of a prism over a base with `base_dirs` directions.
    pub const fn up(base_dirs: u32) -> Dir {
        Dir(base_dirs)
    }

    /// The −Z direction of a prism over a base with `base_dirs` directions.
    pub const fn down(base_dirs: u32) -> Dir {
        Dir(base_dirs + 1)
    }
}
