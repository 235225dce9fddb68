//! Core types for the Tessera grid library.
//!
//! This is the leaf crate with no internal dependencies. It defines the
//! vocabulary the grid layer speaks: [`Cell`] references, [`Dir`] and
//! [`Corner`] indices with their named constant groups, the
//! [`Rotation`]/[`Connection`] symmetry algebra, the [`CellType`]
//! dispatch enum, world-space [`Aabb`] boxes, and the [`GridError`]
//! enum every fallible operation returns.
//!
//! # Conventions
//!
//! - Directions and corners are numbered counter-clockwise; for n-gon
//!   shapes, edge `d` runs between corners `d` and `d + 1 (mod n)`.
//! - Rotations are step counts in a cell type's direction space;
//!   reflections carry the same index range with a flag. The encoding
//!   that packs both into one integer is internal to this crate.
//! - Canonical cell shapes have unit edge length and sit centered at
//!   the origin in the z = 0 plane.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aabb;
pub mod cell;
pub mod cell_type;
pub mod dir;
pub mod error;
pub mod rotation;

mod cube;
mod ngon;

pub use aabb::Aabb;
pub use cell::Cell;
pub use cell_type::{CellType, HexOrientation, TriangleOrientation};
pub use dir::{
    Corner, CubeCorner, CubeDir, Dir, FlatHexCorner, FlatHexDir, FlatSidesTriangleDir,
    PointyHexCorner, PointyHexDir, PrismDir, SquareCorner, SquareDir, TriangleCorner, TriangleDir,
};
pub use error::GridError;
pub use rotation::{Connection, Rotation};
