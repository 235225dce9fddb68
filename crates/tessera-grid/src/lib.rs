//! Bounds and grids for the Tessera grid library.
//!
//! This crate builds the spatial layer on top of [`tessera_core`]'s
//! vocabulary. It has two halves:
//!
//! - The [`Bound`] algebra: closed shapes over the cell lattice
//!   ([`RectBound`], [`CubeBound`], [`HexBound`], [`TriBound`],
//!   [`MaskBound`], [`AabbBound`]) with membership, enumeration,
//!   counting, and set operations.
//! - The [`Grid`] kinds: the primitive tessellations ([`SquareGrid`],
//!   [`HexGrid`], [`TriangleGrid`], [`CubeGrid`], [`MeshGrid`]) and the
//!   modifiers that wrap another grid ([`TransformGrid`],
//!   [`PrismGrid`]), all behind the [`Grid`] enum's shared contract.
//!
//! # Conventions
//!
//! - Operations taking a [`Cell`](tessera_core::Cell) that is not in
//!   the grid return `Err(CellNotInGrid)`; a valid cell whose move or
//!   lookup merely has no result gets `Ok(None)`.
//! - Enumeration, counting, and dense indexing agree with each other
//!   and require a finite grid; infinite grids fail fast with
//!   `Unbounded`.
//! - Grids are immutable. `bound_by` and `unbounded` return new values,
//!   and modifiers share their base through `Arc`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod aabb_bound;
pub mod bound;
pub mod cube;
pub mod cube_bound;
pub mod grid;
pub mod hex;
pub mod hex_bound;
pub mod mask_bound;
pub mod mesh;
pub mod prism;
pub mod rect_bound;
pub mod square;
pub mod transform;
pub mod tri;
pub mod tri_bound;

#[cfg(test)]
pub(crate) mod compliance;

pub use aabb_bound::AabbBound;
pub use bound::Bound;
pub use cube::CubeGrid;
pub use cube_bound::CubeBound;
pub use grid::{Grid, Move};
pub use hex::HexGrid;
pub use hex_bound::HexBound;
pub use mask_bound::MaskBound;
pub use mesh::{MeshData, MeshGrid};
pub use prism::PrismGrid;
pub use rect_bound::RectBound;
pub use square::SquareGrid;
pub use transform::TransformGrid;
pub use tri::TriangleGrid;
pub use tri_bound::TriBound;
