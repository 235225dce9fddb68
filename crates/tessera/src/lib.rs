//! Tessera: a tessellation and topology engine for square, hex, triangle,
//! cube, and mesh grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the Tessera sub-crates. For most users, adding `tessera` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use tessera::prelude::*;
//!
//! // A flat-top hex grid with unit edge length, bounded to a 19-cell disk.
//! let bound = HexBound::new(Cell::new(-2, -2, -2), Cell::new(3, 3, 3));
//! let grid = Grid::from(HexGrid::bounded(HexOrientation::FlatTop, 1.0, bound).unwrap());
//! assert_eq!(grid.cell_count(), Some(19));
//!
//! // Step up-right, then take the returned inverse direction back.
//! let mv = grid.try_move(Cell::ORIGIN, FlatHexDir::UP_RIGHT).unwrap().unwrap();
//! assert_eq!(mv.dest, Cell::new(1, 0, -1));
//! let back = grid.try_move(mv.dest, mv.inverse_dir).unwrap().unwrap();
//! assert_eq!(back.dest, Cell::ORIGIN);
//!
//! // World-space geometry accepts the axial form too.
//! let center = grid.cell_center(Cell::new(2, -1, 0)).unwrap();
//! assert!((center.x - 3.0).abs() < 1e-9);
//! ```
//!
//! # Modules
//!
//! Each module corresponds to a sub-crate. Use them for types not in the
//! prelude:
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `tessera-core` | Cells, directions, corners, rotation algebra, cell types, errors |
//! | [`grid`] | `tessera-grid` | Bound set algebra, the grid kinds, and the [`grid::Grid`] wrapper |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types and the symmetry algebra (`tessera-core`).
///
/// Contains [`types::Cell`], the [`types::Dir`]/[`types::Corner`] indices
/// with their named constant groups, [`types::Rotation`] and
/// [`types::Connection`], the [`types::CellType`] dispatch enum, and
/// [`types::GridError`].
pub use tessera_core as types;

/// Bounds and grids (`tessera-grid`).
///
/// Provides the [`grid::Bound`] set algebra, the five grid kinds
/// ([`grid::SquareGrid`], [`grid::HexGrid`], [`grid::TriangleGrid`],
/// [`grid::CubeGrid`], [`grid::MeshGrid`]), the two modifiers
/// ([`grid::TransformGrid`], [`grid::PrismGrid`]), and the polymorphic
/// [`grid::Grid`] wrapper most callers hold.
pub use tessera_grid as grid;

/// Common imports for typical Tessera usage.
///
/// ```rust
/// use tessera::prelude::*;
/// ```
///
/// This imports the most frequently used types: the grid kinds and the
/// [`Grid`] wrapper, the bound types, cells, directions and their named
/// constant groups, and the rotation algebra.
pub mod prelude {
    // Cells, directions, corners
    pub use tessera_core::{Cell, Corner, Dir};

    // Named direction and corner groups
    pub use tessera_core::{
        CubeCorner, CubeDir, FlatHexCorner, FlatHexDir, FlatSidesTriangleDir, PointyHexCorner,
        PointyHexDir, PrismDir, SquareCorner, SquareDir, TriangleCorner, TriangleDir,
    };

    // Symmetry algebra and cell types
    pub use tessera_core::{CellType, Connection, HexOrientation, Rotation, TriangleOrientation};

    // Errors and world-space boxes
    pub use tessera_core::{Aabb, GridError};

    // Bounds
    pub use tessera_grid::{AabbBound, Bound, CubeBound, HexBound, MaskBound, RectBound, TriBound};

    // Grids
    pub use tessera_grid::{
        CubeGrid, Grid, HexGrid, MeshData, MeshGrid, Move, PrismGrid, SquareGrid, TransformGrid,
        TriangleGrid,
    };
}
