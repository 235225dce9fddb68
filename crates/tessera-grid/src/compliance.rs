//! Reusable contract assertions shared by the grid kind tests.
//!
//! Every grid kind promises the same behavioural contract; these
//! helpers check the parts of it that hold regardless of kind, so each
//! test module can focus on the geometry that is specific to its
//! tessellation.

use crate::grid::{Grid, Move};
use tessera_core::Cell;

/// Asserts that every available move inverts exactly: stepping along
/// the returned inverse direction leads back to the source with the
/// inverse connection.
pub(crate) fn assert_move_symmetry(grid: &Grid, cells: &[Cell]) {
    for &cell in cells {
        for dir in grid.cell_dirs(cell).unwrap() {
            let Some(mv) = grid.try_move(cell, dir).unwrap() else {
                continue;
            };
            let back: Move = grid
                .try_move(mv.dest, mv.inverse_dir)
                .unwrap()
                .unwrap_or_else(|| panic!("move {cell} {dir} has no return from {}", mv.dest));
            assert_eq!(back.dest, cell, "return from {} {} misses {cell}", mv.dest, mv.inverse_dir);
            assert_eq!(
                back.inverse_dir, dir,
                "round trip {cell} {dir} changes the outgoing direction"
            );
            // The connection law needs one shared direction count, so it
            // is only checked where both cell types expose one.
            if let (Ok(a), Ok(b)) = (grid.cell_type(cell), grid.cell_type(mv.dest)) {
                if a.dir_count() == b.dir_count() {
                    assert_eq!(
                        back.connection,
                        mv.connection.invert(a.dir_count()),
                        "connections across {cell} {dir} do not invert"
                    );
                }
            }
        }
    }
}

/// Asserts that enumeration, membership, counting, and dense indexing
/// agree with each other.
pub(crate) fn assert_enumeration_matches_contains(grid: &Grid) {
    let cells = grid.cells().unwrap();
    assert_eq!(grid.cell_count(), Some(cells.len()));
    assert_eq!(grid.index_count().unwrap(), cells.len());
    for (i, &cell) in cells.iter().enumerate() {
        assert!(grid.is_cell_in_grid(cell), "enumerated cell {cell} not in grid");
        assert_eq!(grid.index(cell).unwrap(), i, "index of {cell} breaks enumeration order");
        assert_eq!(grid.cell_by_index(i).unwrap(), cell);
    }
    assert!(grid.cell_by_index(cells.len()).is_err());
}

/// Asserts that centers, boxes, corners, outlines, and point lookup
/// tell one consistent story per cell.
pub(crate) fn assert_geometry_self_consistent(grid: &Grid, cells: &[Cell]) {
    for &cell in cells {
        let center = grid.cell_center(cell).unwrap();
        let aabb = grid.cell_aabb(cell).unwrap();
        assert!(
            aabb.contains_point(center),
            "center of {cell} escapes its own box"
        );
        assert_eq!(
            grid.find_cell(center),
            Some(cell),
            "center of {cell} resolves to a different cell"
        );

        let inside = |p: nalgebra::Point3<f64>| {
            p.x >= aabb.min.x - 1e-9
                && p.x <= aabb.max.x + 1e-9
                && p.y >= aabb.min.y - 1e-9
                && p.y <= aabb.max.y + 1e-9
                && p.z >= aabb.min.z - 1e-9
                && p.z <= aabb.max.z + 1e-9
        };
        if let Ok(corners) = grid.cell_corners(cell) {
            for corner in corners {
                let p = grid.corner_position(cell, corner).unwrap();
                assert!(inside(p), "corner {corner} of {cell} escapes the cell box");
            }
        }
        if let Ok(poly) = grid.polygon(cell) {
            assert!(poly.len() >= 3);
            for p in poly {
                assert!(inside(p), "outline vertex of {cell} escapes the cell box");
            }
        }
    }
}

/// Runs the full shared contract over a finite grid.
pub(crate) fn run_grid_compliance(grid: &Grid) {
    let cells = grid.cells().expect("contract checks need a finite grid");
    assert!(!cells.is_empty(), "contract checks need at least one cell");
    assert_enumeration_matches_contains(grid);
    assert_move_symmetry(grid, &cells);
    assert_geometry_self_consistent(grid, &cells);
}
