//! Criterion micro-benchmarks for grid topology and lookup operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use tessera_bench::{hex_10k, query_points, square_10k};
use tessera_core::{Cell, Dir};
use tessera_grid::hex::axial_to_cube;

/// Benchmark: try_move() along all four directions from each of the 10K
/// cells of a 100x100 square grid.
fn bench_try_move_square_10k(c: &mut Criterion) {
    let grid = square_10k();

    c.bench_function("try_move_square_10k", |b| {
        b.iter(|| {
            for y in 0..100i32 {
                for x in 0..100i32 {
                    let cell = Cell::new2(x, y);
                    for d in 0..4u32 {
                        let mv = grid.try_move(cell, Dir(d));
                        black_box(&mv);
                    }
                }
            }
        });
    });
}

/// Benchmark: try_move() along all six directions from each of the 10K
/// cells of a 100x100 hex parallelogram.
fn bench_try_move_hex_10k(c: &mut Criterion) {
    let grid = hex_10k();

    c.bench_function("try_move_hex_10k", |b| {
        b.iter(|| {
            for r in 0..100i32 {
                for q in 0..100i32 {
                    let cell = axial_to_cube(q, r);
                    for d in 0..6u32 {
                        let mv = grid.try_move(cell, Dir(d));
                        black_box(&mv);
                    }
                }
            }
        });
    });
}

/// Benchmark: find_cell() for 1000 deterministic points on a 100x100
/// square grid.
fn bench_find_cell_square_1k_points(c: &mut Criterion) {
    let grid = square_10k();
    let points = query_points(1000, 42);

    c.bench_function("find_cell_square_1k_points", |b| {
        b.iter(|| {
            for &p in &points {
                let cell = grid.find_cell(p);
                black_box(cell);
            }
        });
    });
}

/// Benchmark: find_cell() at the centers of 1000 deterministic hex cells.
fn bench_find_cell_hex_1k_points(c: &mut Criterion) {
    let grid = hex_10k();

    // Pre-compute centers of deterministic in-bound cells.
    let mut points = Vec::with_capacity(1000);
    for i in 0u64..1000 {
        let q = (i.wrapping_mul(6364136223846793007) % 100) as i32;
        let r = (i.wrapping_mul(1442695040888963407) % 100) as i32;
        points.push(grid.cell_center(axial_to_cube(q, r)).unwrap());
    }

    c.bench_function("find_cell_hex_1k_points", |b| {
        b.iter(|| {
            for &p in &points {
                let cell = grid.find_cell(p);
                black_box(cell);
            }
        });
    });
}

criterion_group!(
    benches,
    bench_try_move_square_10k,
    bench_try_move_hex_10k,
    bench_find_cell_square_1k_points,
    bench_find_cell_hex_1k_points
);
criterion_main!(benches);
