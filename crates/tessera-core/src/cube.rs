//! Rotation algebra for the cube cell type.
//!
//! The modeled symmetry group is the order-4 rotation subgroup about Z
//! together with its mirrors (reflections across vertical planes): the
//! four lateral directions behave exactly like a square's, and
//! Forward/Back are fixed by every element. Corners are the eight unit
//! cube vertices indexed by the bit pattern `x | y << 1 | z << 2`.

use crate::dir::{Corner, Dir};
use crate::ngon;
use crate::rotation::{Connection, Rotation};
use nalgebra::Point3;

/// Inverse of each cube direction: 0↔2, 1↔3, 4↔5.
const INVERSE: [u32; 6] = [2, 3, 0, 1, 5, 4];

pub(crate) fn invert_dir(d: Dir) -> Dir {
    Dir(INVERSE[d.0 as usize % 6])
}

pub(crate) fn rotate_dir(d: Dir, r: Rotation) -> Dir {
    let d = Dir(d.0 % 6);
    if d.0 >= 4 {
        // Vertical planes and z rotations both fix Forward and Back.
        d
    } else {
        ngon::rotate_dir(d, r, 4)
    }
}

pub(crate) fn rotate_corner(c: Corner, r: Rotation) -> Corner {
    let c = c.0 % 8;
    let mut x = c & 1;
    let mut y = (c >> 1) & 1;
    let z = (c >> 2) & 1;
    if r.is_reflection() {
        // ref(0) is the mirror across the XZ plane; the remaining
        // reflections follow by rotation: ref(k) = rot(k) ∘ ref(0).
        y ^= 1;
    }
    let steps = r.index().rem_euclid(4);
    for _ in 0..steps {
        // Quarter turn about Z: (x, y) ↦ (−y, x) on the sign bits.
        let nx = y ^ 1;
        let ny = x;
        x = nx;
        y = ny;
    }
    Corner(x | y << 1 | z << 2)
}

pub(crate) fn corner_position(c: Corner) -> Point3<f64> {
    let c = c.0 % 8;
    let side = |bit: u32| if bit != 0 { 0.5 } else { -0.5 };
    Point3::new(side(c & 1), side((c >> 1) & 1), side((c >> 2) & 1))
}

pub(crate) fn try_get_rotation(from: Dir, to: Dir, connection: Connection) -> Option<Rotation> {
    let (from, to) = (Dir(from.0 % 6), Dir(to.0 % 6));
    match (from.0 >= 4, to.0 >= 4) {
        (false, false) => ngon::try_get_rotation(from, to, connection, 4),
        (true, true) if from == to => {
            // Every modeled element fixes the verticals; the connection
            // itself names which one relates the two frames.
            Some(ngon::normalize(connection.to_rotation(), 4))
        }
        _ => None,
    }
}
