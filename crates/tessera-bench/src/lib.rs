//! Benchmark fixtures for the Tessera grid library.
//!
//! Provides pre-built grids and deterministic inputs for the criterion
//! benches:
//!
//! - [`square_10k`]: 100x100 square grid (10K cells)
//! - [`hex_10k`]: 100x100 axial parallelogram of flat-top hexes (10K cells)
//! - [`query_points`]: deterministic world-space points via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use nalgebra::{Point3, Vector2};
use tessera_core::Cell;
use tessera_core::HexOrientation;
use tessera_grid::{Grid, HexBound, HexGrid, RectBound, SquareGrid};

/// Build a 100x100 square grid (10K cells) with unit cell size.
pub fn square_10k() -> Grid {
    let bound = RectBound::new(Cell::new2(0, 0), Cell::new2(99, 99)).unwrap();
    Grid::from(SquareGrid::bounded(Vector2::new(1.0, 1.0), bound).unwrap())
}

/// Build a 100x100 axial parallelogram of flat-top hexes (10K cells)
/// with unit edge length.
///
/// Axial `(q, r)` with `q, r` in `0..100`; the z strip is wide enough
/// to admit every such pair.
pub fn hex_10k() -> Grid {
    let bound = HexBound::new(Cell::new(0, 0, -198), Cell::new(100, 100, 1));
    Grid::from(HexGrid::bounded(HexOrientation::FlatTop, 1.0, bound).unwrap())
}

/// Generate `n` deterministic world-space points from a seed.
///
/// Points land inside the [`square_10k`] footprint, on the grid plane.
pub fn query_points(n: usize, seed: u64) -> Vec<Point3<f64>> {
    let mut points = Vec::with_capacity(n);
    for i in 0..n as u64 {
        let h = seed
            .wrapping_add(i.wrapping_mul(6364136223846793005))
            .wrapping_mul(1442695040888963407);
        let x = (h % 9_900) as f64 / 100.0;
        let y = ((h >> 32) % 9_900) as f64 / 100.0;
        points.push(Point3::new(x, y, 0.0));
    }
    points
}
