//! Rotations, reflections, and the [`Connection`] frame descriptor.

use std::fmt;

/// An element of a cell type's symmetry group: a rotation by some number
/// of steps, optionally composed with a reflection.
///
/// The step count is interpreted against a cell type's direction count
/// `n`; the [`CellType`](crate::CellType) operations `multiply_rotations`
/// and `invert_rotation` supply `n` and keep results normalized to
/// `0..n-1`. `Rotation` itself is a plain carrier with no modulus.
///
/// # Examples
///
/// ```
/// use tessera_core::Rotation;
///
/// let r = Rotation::rotation(2);
/// assert!(!r.is_reflection());
/// assert_eq!(r.index(), 2);
///
/// let s = Rotation::reflection(2);
/// assert!(s.is_reflection());
/// assert_eq!(s.index(), 2);
/// assert_ne!(r, s);
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Rotation(i32);

impl Rotation {
    /// The identity element: rotation by zero steps.
    pub const fn identity() -> Self {
        Self(0)
    }

    /// Rotation by `k` steps counter-clockwise.
    pub const fn rotation(k: i32) -> Self {
        Self(k)
    }

    /// Reflection variant `k`: the reflection whose axis passes through
    /// direction angle `k/2` steps. Stored as the bitwise complement of
    /// `k`, so reflections occupy the negative range.
    pub const fn reflection(k: i32) -> Self {
        Self(!k)
    }

    /// Whether this element includes a reflection.
    pub const fn is_reflection(self) -> bool {
        self.0 < 0
    }

    /// The step count with the reflection flag stripped.
    pub const fn index(self) -> i32 {
        if self.0 < 0 {
            !self.0
        } else {
            self.0
        }
    }
}

impl fmt::Display for Rotation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_reflection() {
            write!(f, "s{}", self.index())
        } else {
            write!(f, "r{}", self.index())
        }
    }
}

/// How the local frame of one cell relates to the local frame of its
/// neighbour across a shared edge or face.
///
/// This is the public face of [`Rotation`]: a plain step count plus
/// mirror flag, produced by `try_move` and consumed by
/// `CellType::try_get_rotation`. The identity connection means both
/// cells agree on orientation, which is the case everywhere on the
/// primitive coordinate grids; mesh grids produce non-trivial values.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Connection {
    /// Rotation step count, `0..n-1` for an `n`-direction cell type.
    pub rotation: u32,
    /// Whether the neighbouring frame is mirrored.
    pub is_mirror: bool,
}

impl Connection {
    /// The trivial connection: no rotation, no mirror.
    pub const fn identity() -> Self {
        Self {
            rotation: 0,
            is_mirror: false,
        }
    }

    /// Builds a connection from a symmetry element, normalizing the step
    /// count to `0..n_dirs`.
    pub fn from_rotation(r: Rotation, n_dirs: u32) -> Self {
        Self {
            rotation: r.index().rem_euclid(n_dirs as i32) as u32,
            is_mirror: r.is_reflection(),
        }
    }

    /// The symmetry element this connection encodes.
    pub const fn to_rotation(self) -> Rotation {
        if self.is_mirror {
            Rotation::reflection(self.rotation as i32)
        } else {
            Rotation::rotation(self.rotation as i32)
        }
    }

    /// The connection seen from the other side: traversing an edge and
    /// then traversing it back composes to the identity.
    ///
    /// # Examples
    ///
    /// ```
    /// use tessera_core::Connection;
    ///
    /// let c = Connection { rotation: 1, is_mirror: false };
    /// let back = c.invert(4);
    /// assert_eq!(back.rotation, 3);
    /// assert_eq!(c.multiply(back, 4), Connection::identity());
    ///
    /// let m = Connection { rotation: 1, is_mirror: true };
    /// assert_eq!(m.invert(4), m);
    /// ```
    pub fn invert(self, n_dirs: u32) -> Self {
        Self::from_rotation(crate::ngon::invert(self.to_rotation(), n_dirs), n_dirs)
    }

    /// Composes two connections: the result of crossing `other` first
    /// and then `self`, e.g. when folding connections along a path.
    pub fn multiply(self, other: Self, n_dirs: u32) -> Self {
        Self::from_rotation(
            crate::ngon::multiply(self.to_rotation(), other.to_rotation(), n_dirs),
            n_dirs,
        )
    }
}

impl fmt::Display for Connection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_mirror {
            write!(f, "s{}", self.rotation)
        } else {
            write!(f, "r{}", self.rotation)
        }
    }
}
