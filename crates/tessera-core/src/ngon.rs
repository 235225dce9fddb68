//! Shared rotation algebra for regular n-gon cell types.
//!
//! Square (n = 4), hex and triangle (n = 6), and arbitrary mesh faces
//! all draw their symmetry group from here: rotations are step counts
//! `0..n-1`, reflections the same range with the reflection flag set,
//! and every operation reduces indices with `rem_euclid(n)` so callers
//! may pass unnormalized values.
//!
//! Composition follows the dihedral relations, with `multiply(a, b)`
//! meaning "apply `b`, then `a`":
//!
//! ```text
//! rot(i) ∘ rot(j) = rot(i + j)      rot(i) ∘ ref(j) = ref(i + j)
//! ref(i) ∘ rot(j) = ref(i - j)      ref(i) ∘ ref(j) = rot(i - j)
//! ```

use crate::dir::{Corner, Dir};
use crate::rotation::{Connection, Rotation};
use nalgebra::{Matrix3, Point3};

/// Corner reflection offset for shapes whose corners sit half a step
/// off the direction angles (square, hex, generic n-gon).
pub(crate) const CORNER_OFFSET_HALF_STEP: i32 = 1;

/// Corner reflection offset for shapes whose corner angles coincide
/// with direction angles (triangle).
pub(crate) const CORNER_OFFSET_ALIGNED: i32 = 0;

pub(crate) fn multiply(a: Rotation, b: Rotation, n: u32) -> Rotation {
    let n = n as i32;
    let (i, j) = (a.index(), b.index());
    match (a.is_reflection(), b.is_reflection()) {
        (false, false) => Rotation::rotation((i + j).rem_euclid(n)),
        (false, true) => Rotation::reflection((i + j).rem_euclid(n)),
        (true, false) => Rotation::reflection((i - j).rem_euclid(n)),
        (true, true) => Rotation::rotation((i - j).rem_euclid(n)),
    }
}

pub(crate) fn invert(r: Rotation, n: u32) -> Rotation {
    let n = n as i32;
    if r.is_reflection() {
        Rotation::reflection(r.index().rem_euclid(n))
    } else {
        Rotation::rotation((-r.index()).rem_euclid(n))
    }
}

/// Reduces an element's step count to `0..n`, keeping its kind.
pub(crate) fn normalize(r: Rotation, n: u32) -> Rotation {
    let k = r.index().rem_euclid(n as i32);
    if r.is_reflection() {
        Rotation::reflection(k)
    } else {
        Rotation::rotation(k)
    }
}

pub(crate) fn rotate_dir(d: Dir, r: Rotation, n: u32) -> Dir {
    let n = n as i32;
    let d = d.0 as i32;
    let k = r.index();
    let out = if r.is_reflection() { k - d } else { d + k };
    Dir(out.rem_euclid(n) as u32)
}

/// Rotates a corner index. `offset` is the shape's corner reflection
/// offset: under `ref(k)` a corner maps to `k + offset - c`.
pub(crate) fn rotate_corner(c: Corner, r: Rotation, n: u32, offset: i32) -> Corner {
    let n = n as i32;
    let c = c.0 as i32;
    let k = r.index();
    let out = if r.is_reflection() { k + offset - c } else { c + k };
    Corner(out.rem_euclid(n) as u32)
}

/// The opposite direction, defined only when `n` is even.
pub(crate) fn invert_dir(d: Dir, n: u32) -> Option<Dir> {
    if n % 2 != 0 {
        return None;
    }
    Some(Dir((d.0 + n / 2) % n))
}

pub(crate) fn rotations(n: u32, include_reflections: bool) -> Vec<Rotation> {
    let mut out = Vec::with_capacity(if include_reflections { 2 * n } else { n } as usize);
    out.extend((0..n as i32).map(Rotation::rotation));
    if include_reflections {
        out.extend((0..n as i32).map(Rotation::reflection));
    }
    out
}

/// Position of corner `c` on the canonical unit-edge shape: on the
/// circumcircle of radius `circumradius`, at `corner0_deg` plus `c`
/// whole steps, in the z = 0 plane.
pub(crate) fn corner_position(c: Corner, n: u32, corner0_deg: f64, circumradius: f64) -> Point3<f64> {
    let step = 360.0 / f64::from(n);
    let theta = (corner0_deg + step * f64::from(c.0 % n)).to_radians();
    Point3::new(circumradius * theta.cos(), circumradius * theta.sin(), 0.0)
}

/// Circumradius of a regular n-gon with unit edge length.
pub(crate) fn unit_edge_circumradius(n: u32) -> f64 {
    0.5 / (std::f64::consts::PI / f64::from(n)).sin()
}

/// Matrix form of a symmetry element, acting on the z = 0 plane.
///
/// A rotation by `k` steps is a plain z-axis rotation. A reflection
/// `ref(k)` fixes the line through direction angle `k/2` steps, i.e.
/// the axis at `dir0_deg + (step / 2) * k`.
pub(crate) fn rotation_matrix(r: Rotation, n: u32, dir0_deg: f64) -> Matrix3<f64> {
    let step = 360.0 / f64::from(n);
    let k = f64::from(r.index().rem_euclid(n as i32) as u32);
    if r.is_reflection() {
        let phi = (2.0 * (dir0_deg + step / 2.0 * k)).to_radians();
        Matrix3::new(
            phi.cos(),
            phi.sin(),
            0.0,
            phi.sin(),
            -phi.cos(),
            0.0,
            0.0,
            0.0,
            1.0,
        )
    } else {
        let theta = (step * k).to_radians();
        Matrix3::new(
            theta.cos(),
            -theta.sin(),
            0.0,
            theta.sin(),
            theta.cos(),
            0.0,
            0.0,
            0.0,
            1.0,
        )
    }
}

/// The group element that maps `from` onto `to` across a connection:
/// a rotation by the index difference, or the reflection summing the
/// two indices when the connection mirrors.
pub(crate) fn try_get_rotation(from: Dir, to: Dir, connection: Connection, n: u32) -> Option<Rotation> {
    let n_i = n as i32;
    let (from, to) = (from.0 as i32, to.0 as i32);
    if connection.is_mirror {
        Some(Rotation::reflection((from + to).rem_euclid(n_i)))
    } else {
        Some(Rotation::rotation((to - from).rem_euclid(n_i)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn element(k: i32, refl: bool) -> Rotation {
        if refl {
            Rotation::reflection(k)
        } else {
            Rotation::rotation(k)
        }
    }

    // ── Composition table ───────────────────────────────────────

    #[test]
    fn composition_follows_the_dihedral_relations() {
        let n = 6;
        let r = |k| Rotation::rotation(k);
        let s = |k| Rotation::reflection(k);
        assert_eq!(multiply(r(2), r(3), n), r(5));
        assert_eq!(multiply(r(4), r(4), n), r(2));
        assert_eq!(multiply(r(2), s(3), n), s(5));
        assert_eq!(multiply(s(2), r(3), n), s(5)); // 2 - 3 = -1 ≡ 5
        assert_eq!(multiply(s(2), s(3), n), r(5));
        assert_eq!(multiply(s(3), s(3), n), r(0));
    }

    #[test]
    fn composition_agrees_with_the_direction_action() {
        // (a ∘ b)(d) == a(b(d)) for every pair and direction.
        for n in [3u32, 4, 6] {
            for (ak, ar) in (0..n as i32).flat_map(|k| [(k, false), (k, true)]) {
                for (bk, br) in (0..n as i32).flat_map(|k| [(k, false), (k, true)]) {
                    let a = element(ak, ar);
                    let b = element(bk, br);
                    let ab = multiply(a, b, n);
                    for d in 0..n {
                        let step = rotate_dir(rotate_dir(Dir(d), b, n), a, n);
                        assert_eq!(rotate_dir(Dir(d), ab, n), step);
                    }
                }
            }
        }
    }

    #[test]
    fn inverse_laws_hold_for_every_element() {
        for n in [3u32, 4, 5, 6, 8] {
            for (k, refl) in (0..n as i32).flat_map(|k| [(k, false), (k, true)]) {
                let a = element(k, refl);
                assert_eq!(multiply(a, invert(a, n), n), Rotation::identity());
                assert_eq!(multiply(invert(a, n), a, n), Rotation::identity());
            }
        }
    }

    #[test]
    fn unnormalized_indices_reduce_mod_n() {
        assert_eq!(
            multiply(Rotation::rotation(7), Rotation::rotation(0), 4),
            Rotation::rotation(3)
        );
        assert_eq!(invert(Rotation::rotation(-1), 4), Rotation::rotation(1));
        assert_eq!(rotate_dir(Dir(1), Rotation::rotation(-2), 6), Dir(5));
    }

    // ── Direction and corner actions ────────────────────────────

    #[test]
    fn reflections_act_as_an_involution_on_dirs() {
        for n in [4u32, 6] {
            for k in 0..n as i32 {
                let s = Rotation::reflection(k);
                for d in 0..n {
                    let once = rotate_dir(Dir(d), s, n);
                    assert_eq!(rotate_dir(once, s, n), Dir(d));
                }
            }
        }
    }

    #[test]
    fn corner_reflection_respects_the_shape_offset() {
        // Square: ref(0) swaps the two corners flanking direction 0.
        let s0 = Rotation::reflection(0);
        assert_eq!(rotate_corner(Corner(0), s0, 4, CORNER_OFFSET_HALF_STEP), Corner(1));
        assert_eq!(rotate_corner(Corner(1), s0, 4, CORNER_OFFSET_HALF_STEP), Corner(0));
        // Triangle convention: ref(0) fixes corner 0.
        assert_eq!(rotate_corner(Corner(0), s0, 6, CORNER_OFFSET_ALIGNED), Corner(0));
        assert_eq!(rotate_corner(Corner(1), s0, 6, CORNER_OFFSET_ALIGNED), Corner(5));
    }

    #[test]
    fn invert_dir_requires_even_side_count() {
        assert_eq!(invert_dir(Dir(0), 4), Some(Dir(2)));
        assert_eq!(invert_dir(Dir(5), 6), Some(Dir(2)));
        assert_eq!(invert_dir(Dir(1), 5), None);
        assert_eq!(invert_dir(Dir(2), 7), None);
    }

    #[test]
    fn rotations_listing_has_the_group_order() {
        assert_eq!(rotations(4, false).len(), 4);
        assert_eq!(rotations(4, true).len(), 8);
        assert!(rotations(6, true).iter().filter(|r| r.is_reflection()).count() == 6);
    }

    // ── Geometry ────────────────────────────────────────────────

    #[test]
    fn unit_edge_circumradius_matches_known_shapes() {
        assert!((unit_edge_circumradius(4) - std::f64::consts::SQRT_2 / 2.0).abs() < 1e-12);
        assert!((unit_edge_circumradius(6) - 1.0).abs() < 1e-12);
        assert!((unit_edge_circumradius(3) - 1.0 / 3f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn rotation_matrix_agrees_with_the_corner_action() {
        // Applying the matrix to a corner position lands on the position
        // of the rotated corner index, for rotations and reflections.
        let n = 4;
        let radius = unit_edge_circumradius(n);
        for (k, refl) in (0..n as i32).flat_map(|k| [(k, false), (k, true)]) {
            let r = element(k, refl);
            let m = rotation_matrix(r, n, 0.0);
            for c in 0..n {
                let p = corner_position(Corner(c), n, -45.0, radius);
                let rotated = rotate_corner(Corner(c), r, n, CORNER_OFFSET_HALF_STEP);
                let q = corner_position(rotated, n, -45.0, radius);
                let mp = m * p;
                assert!((mp - q).norm() < 1e-9, "element {r} corner {c}: {mp:?} vs {q:?}");
            }
        }
    }

    #[test]
    fn try_get_rotation_maps_from_onto_to() {
        for n in [4u32, 6] {
            for from in 0..n {
                for to in 0..n {
                    for mirror in [false, true] {
                        let conn = Connection {
                            rotation: 0,
                            is_mirror: mirror,
                        };
                        let r = try_get_rotation(Dir(from), Dir(to), conn, n).unwrap();
                        assert_eq!(r.is_reflection(), mirror);
                        assert_eq!(rotate_dir(Dir(from), r, n), Dir(to));
                    }
                }
            }
        }
    }

    // ── Property tests ──────────────────────────────────────────

    proptest! {
        #[test]
        fn multiplication_is_associative(
            ka in 0i32..8, ra in proptest::bool::ANY,
            kb in 0i32..8, rb in proptest::bool::ANY,
            kc in 0i32..8, rc in proptest::bool::ANY,
            n in 1u32..9,
        ) {
            let a = element(ka, ra);
            let b = element(kb, rb);
            let c = element(kc, rc);
            prop_assert_eq!(
                multiply(multiply(a, b, n), c, n),
                multiply(a, multiply(b, c, n), n)
            );
        }

        #[test]
        fn inverse_of_a_product_reverses_the_factors(
            ka in 0i32..8, ra in proptest::bool::ANY,
            kb in 0i32..8, rb in proptest::bool::ANY,
            n in 1u32..9,
        ) {
            let a = element(ka, ra);
            let b = element(kb, rb);
            prop_assert_eq!(
                invert(multiply(a, b, n), n),
                multiply(invert(b, n), invert(a, n), n)
            );
        }
    }
}
