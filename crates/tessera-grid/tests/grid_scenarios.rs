//! End-to-end scenarios across grid kinds.
//!
//! These tests drive whole grids through the polymorphic [`Grid`]
//! wrapper the way an application would: flood fills over masked
//! regions, frame-aware walks over a closed mesh surface, and layered
//! towers seen through a world transform.

use std::collections::{HashSet, VecDeque};

use nalgebra::{Point3, Vector2, Vector3};
use tessera_core::{
    Cell, CellType, Connection, Dir, FlatHexDir, GridError, HexOrientation, SquareDir,
};
use tessera_grid::{
    Bound, Grid, HexBound, HexGrid, MaskBound, MeshData, MeshGrid, PrismGrid, SquareGrid,
    TransformGrid,
};

/// A square grid masked down to the 12-cell ring around a 2x2 hole.
fn ring_grid() -> Grid {
    let mut mask = MaskBound::new();
    for y in 0..4 {
        for x in 0..4 {
            let interior = (1..=2).contains(&x) && (1..=2).contains(&y);
            if !interior {
                mask.insert(Cell::new2(x, y));
            }
        }
    }
    let grid = SquareGrid::new(Vector2::new(1.0, 1.0))
        .unwrap()
        .bound_by(&Bound::from(mask));
    Grid::from(grid)
}

/// The surface of the unit cube: six quads wound counter-clockwise
/// seen from outside, so every crossing is mirror-free.
fn cube_surface() -> MeshGrid {
    MeshGrid::new(MeshData {
        vertices: vec![
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(1.0, 0.0, 0.0),
            Point3::new(1.0, 1.0, 0.0),
            Point3::new(0.0, 1.0, 0.0),
            Point3::new(0.0, 0.0, 1.0),
            Point3::new(1.0, 0.0, 1.0),
            Point3::new(1.0, 1.0, 1.0),
            Point3::new(0.0, 1.0, 1.0),
        ],
        faces: vec![
            vec![0, 3, 2, 1], // bottom
            vec![4, 5, 6, 7], // top
            vec![0, 1, 5, 4], // front
            vec![2, 3, 7, 6], // back
            vec![0, 4, 7, 3], // left
            vec![1, 2, 6, 5], // right
        ],
        adjacency: None,
    })
    .unwrap()
}

#[test]
fn flood_fill_covers_the_masked_ring() {
    let grid = ring_grid();
    assert_eq!(grid.cell_count(), Some(12));

    let start = Cell::new2(0, 0);
    let mut seen = HashSet::from([start]);
    let mut queue = VecDeque::from([start]);
    while let Some(cell) = queue.pop_front() {
        for dir in grid.cell_dirs(cell).unwrap() {
            if let Some(mv) = grid.try_move(cell, dir).unwrap() {
                assert_eq!(mv.connection, Connection::identity());
                if seen.insert(mv.dest) {
                    queue.push_back(mv.dest);
                }
            }
        }
    }
    assert_eq!(seen.len(), 12, "the ring is one connected component");

    // The hole is not part of the grid: moves into it are blocked,
    // queries on it are errors, and lookups over it find nothing.
    assert_eq!(grid.try_move(Cell::new2(1, 0), SquareDir::UP).unwrap(), None);
    assert!(matches!(
        grid.cell_center(Cell::new2(1, 1)),
        Err(GridError::CellNotInGrid { .. })
    ));
    assert_eq!(grid.find_cell(Point3::new(2.0, 2.0, 0.0)), None);
    assert_eq!(grid.find_cell(Point3::new(3.0, 2.0, 0.0)), Some(Cell::new2(3, 2)));

    // Dense indexing walks the mask in insertion order.
    let cells = grid.cells().unwrap();
    assert_eq!(cells.len(), 12);
    for (i, c) in cells.iter().enumerate() {
        assert_eq!(grid.index(*c).unwrap(), i);
        assert_eq!(grid.cell_by_index(i).unwrap(), *c);
    }
}

#[test]
fn cube_surface_is_closed_and_symmetric() {
    let grid = Grid::from(cube_surface());
    assert_eq!(grid.cell_count(), Some(6));
    assert!(grid.is_2d() && !grid.is_planar());

    for f in 0..6 {
        let cell = Cell::new(f, 0, 0);
        assert_eq!(grid.cell_type(cell).unwrap(), CellType::NGon(4));
        for d in 0..4u32 {
            let mv = grid
                .try_move(cell, Dir(d))
                .unwrap()
                .expect("a closed surface has no boundary edges");
            let back = grid.try_move(mv.dest, mv.inverse_dir).unwrap().unwrap();
            assert_eq!(back.dest, cell);
            assert_eq!(back.inverse_dir, Dir(d));
            assert_eq!(back.connection, mv.connection.invert(4));
        }
    }

    // Nearest-centroid lookup resolves points hovering over a face.
    assert_eq!(
        grid.find_cell(Point3::new(0.5, 0.5, 1.3)),
        Some(Cell::new(1, 0, 0))
    );
}

#[test]
fn walking_straight_around_the_cube_restores_the_frame() {
    let grid = Grid::from(cube_surface());

    // Start on the front face and cross its top edge, then keep going
    // straight: leave each face through the edge opposite the one we
    // came in by. Four faces later we are back where we started.
    let start = Cell::new(2, 0, 0);
    let mut cell = start;
    let mut dir = Dir(2);
    let mut frame = Connection::identity();
    let mut visited = Vec::new();
    for _ in 0..4 {
        let mv = grid.try_move(cell, dir).unwrap().unwrap();
        assert!(!mv.connection.is_mirror, "consistent winding never mirrors");
        frame = mv.connection.multiply(frame, 4);
        visited.push(mv.dest);
        dir = Dir((mv.inverse_dir.0 + 2) % 4);
        cell = mv.dest;
    }

    // Front, over the top, down the back, across the bottom, home.
    assert_eq!(
        visited,
        vec![
            Cell::new(1, 0, 0),
            Cell::new(3, 0, 0),
            Cell::new(0, 0, 0),
            Cell::new(2, 0, 0),
        ]
    );
    assert_eq!(cell, start);
    assert_eq!(frame, Connection::identity(), "the loop has no holonomy");
}

#[test]
fn translated_hex_prism_tower_round_trips() {
    let disk = HexBound::new(Cell::new(-1, -1, -1), Cell::new(2, 2, 2));
    let base = Grid::from(HexGrid::bounded(HexOrientation::FlatTop, 1.0, disk).unwrap());
    let prism = PrismGrid::bounded(base, 2.0, 0, 2).unwrap();
    let up = prism.up();
    let tower = Grid::from(TransformGrid::translated(
        Grid::from(prism),
        Vector3::new(10.0, 0.0, 0.0),
    ));

    // Seven cells per layer, three layers.
    assert_eq!(tower.cell_count(), Some(21));
    assert!(tower.is_3d());

    // Climb two layers; the roof blocks further ascent.
    let mut cell = Cell::new(0, 0, 0);
    for _ in 0..2 {
        cell = tower.try_move(cell, up).unwrap().unwrap().dest;
    }
    assert_eq!(cell, Cell::new(0, 0, 2));
    assert_eq!(tower.try_move(cell, up).unwrap(), None);

    // One lateral step on the top layer.
    let mv = tower.try_move(cell, FlatHexDir::UP_RIGHT).unwrap().unwrap();
    assert_eq!(mv.dest, Cell::new(1, 0, 2));

    // World geometry carries the offset; lookups invert it.
    let center = tower.cell_center(mv.dest).unwrap();
    let expected = Point3::new(11.5, 3.0f64.sqrt() / 2.0, 4.0);
    assert!((center - expected).norm() < 1e-9, "center {center} != {expected}");
    assert_eq!(tower.find_cell(center), Some(mv.dest));

    // Dense indexing covers the tower layer by layer.
    let cells = tower.cells().unwrap();
    assert_eq!(cells.len(), 21);
    for (i, c) in cells.iter().enumerate() {
        assert_eq!(tower.index(*c).unwrap(), i);
        assert_eq!(tower.cell_by_index(i).unwrap(), *c);
    }
}
