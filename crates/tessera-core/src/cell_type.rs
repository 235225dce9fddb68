//! The [`CellType`] enum: per-cell local topology and symmetry.

use crate::cube;
use crate::dir::{Corner, Dir};
use crate::ngon;
use crate::rotation::{Connection, Rotation};
use nalgebra::{Matrix3, Point3};

/// Which way a hexagon faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum HexOrientation {
    /// Flat edge up: vertices at 0°, 60°, … and the first direction at 30°.
    FlatTop,
    /// Vertex up: the first direction points along +X.
    PointyTop,
}

/// Which way a triangle pair faces.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TriangleOrientation {
    /// Cells point up or down; lattice axes at 90°, 210°, 330°.
    FlatTopped,
    /// Cells point right or left; lattice axes at 0°, 120°, 240°.
    FlatSides,
}

/// The local shape of a cell: how many directions and corners it has,
/// and the rotation/reflection group acting on them.
///
/// This is a closed enum; every operation matches it exhaustively. The
/// square, hex, and triangle kinds share the regular n-gon algebra with
/// different conventions, [`Cube`](CellType::Cube) models the order-4
/// z-axis group, and [`NGon`](CellType::NGon) covers mesh faces of any
/// side count.
///
/// # Examples
///
/// ```
/// use tessera_core::{CellType, Rotation, SquareDir};
///
/// let square = CellType::Square;
/// let quarter = Rotation::rotation(1);
/// assert_eq!(square.rotate_dir(SquareDir::RIGHT, quarter), SquareDir::UP);
/// assert_eq!(square.invert_dir(SquareDir::RIGHT), Some(SquareDir::LEFT));
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CellType {
    /// Unit square, 4 directions, 4 corners.
    Square,
    /// Regular hexagon in either orientation, 6 directions, 6 corners.
    Hex(HexOrientation),
    /// Triangle pair sharing one 6-slot direction space; a concrete
    /// cell uses the three slots matching its parity.
    Triangle(TriangleOrientation),
    /// Axis-aligned cube, 6 directions, 8 corners.
    Cube,
    /// Regular polygon with an arbitrary side count (mesh faces).
    NGon(u32),
}

/// Angle and radius conventions for one n-gon kind.
struct NgonShape {
    n: u32,
    dir0_deg: f64,
    corner0_deg: f64,
    corner_offset: i32,
    circumradius: f64,
}

impl CellType {
    /// Number of direction slots. Triangles report the shared 6-slot
    /// space even though each concrete cell uses three of them.
    pub fn dir_count(&self) -> u32 {
        match self {
            Self::Square => 4,
            Self::Hex(_) | Self::Triangle(_) | Self::Cube => 6,
            Self::NGon(n) => *n,
        }
    }

    /// Number of corner slots, in the same shared-slot sense as
    /// [`dir_count`](Self::dir_count).
    pub fn corner_count(&self) -> u32 {
        match self {
            Self::Square => 4,
            Self::Hex(_) | Self::Triangle(_) => 6,
            Self::Cube => 8,
            Self::NGon(n) => *n,
        }
    }

    /// Spatial dimension of the shape: 2 for everything except [`Cube`](Self::Cube).
    pub fn dimension(&self) -> u32 {
        match self {
            Self::Cube => 3,
            _ => 2,
        }
    }

    /// The opposite direction, when one exists. Odd-sided polygons have
    /// no opposite edges, so odd [`NGon`](Self::NGon)s yield `None`.
    pub fn invert_dir(&self, dir: Dir) -> Option<Dir> {
        match self {
            Self::Cube => Some(cube::invert_dir(dir)),
            _ => ngon::invert_dir(dir, self.modulus()),
        }
    }

    /// Applies a symmetry element to a direction index.
    pub fn rotate_dir(&self, dir: Dir, rotation: Rotation) -> Dir {
        match self {
            Self::Cube => cube::rotate_dir(dir, rotation),
            _ => ngon::rotate_dir(dir, rotation, self.modulus()),
        }
    }

    /// Applies a symmetry element to a corner index.
    pub fn rotate_corner(&self, corner: Corner, rotation: Rotation) -> Corner {
        match self {
            Self::Cube => cube::rotate_corner(corner, rotation),
            _ => {
                let shape = self.ngon_shape();
                ngon::rotate_corner(corner, rotation, shape.n.max(1), shape.corner_offset)
            }
        }
    }

    /// Group product: the element equal to applying `b` first, then `a`.
    pub fn multiply_rotations(&self, a: Rotation, b: Rotation) -> Rotation {
        ngon::multiply(a, b, self.modulus())
    }

    /// Group inverse.
    pub fn invert_rotation(&self, r: Rotation) -> Rotation {
        ngon::invert(r, self.modulus())
    }

    /// All elements of the modeled symmetry group, rotations first.
    ///
    /// Squares and hexes list their full dihedral group, the cube its
    /// z-axis subgroup, and triangles only the parity-preserving
    /// elements (even step counts), since odd steps would swap up and
    /// down cells.
    pub fn rotations(&self, include_reflections: bool) -> Vec<Rotation> {
        match self {
            Self::Triangle(_) => {
                let mut out: Vec<Rotation> = [0, 2, 4].iter().map(|&k| Rotation::rotation(k)).collect();
                if include_reflections {
                    out.extend([0, 2, 4].iter().map(|&k| Rotation::reflection(k)));
                }
                out
            }
            Self::Cube => ngon::rotations(4, include_reflections),
            _ => ngon::rotations(self.modulus(), include_reflections),
        }
    }

    /// Position of a corner on the canonical unit-edge shape, centered
    /// at the origin in the z = 0 plane (cube: unit cube in 3D).
    ///
    /// Triangle kinds place all six corner slots on their circumcircle;
    /// an up cell uses the odd slots and a down cell the even ones.
    pub fn corner_position(&self, corner: Corner) -> Point3<f64> {
        match self {
            Self::Cube => cube::corner_position(corner),
            _ => {
                let shape = self.ngon_shape();
                ngon::corner_position(corner, shape.n.max(1), shape.corner0_deg, shape.circumradius)
            }
        }
    }

    /// Matrix form of a symmetry element acting on canonical-shape
    /// space. Satisfies
    /// `matrix * corner_position(c) == corner_position(rotate_corner(c, r))`.
    pub fn rotation_matrix(&self, rotation: Rotation) -> Matrix3<f64> {
        match self {
            Self::Cube => ngon::rotation_matrix(rotation, 4, 0.0),
            _ => {
                let shape = self.ngon_shape();
                ngon::rotation_matrix(rotation, shape.n.max(1), shape.dir0_deg)
            }
        }
    }

    /// The group element that maps direction `from` in one cell's frame
    /// onto direction `to` in a neighbour's frame related by
    /// `connection`, or `None` when no modeled element does.
    ///
    /// `None` arises for cube moves mixing lateral and vertical
    /// directions, and for triangle pairs whose step would swap parity.
    pub fn try_get_rotation(&self, from: Dir, to: Dir, connection: Connection) -> Option<Rotation> {
        match self {
            Self::Cube => cube::try_get_rotation(from, to, connection),
            Self::Triangle(_) => {
                let r = ngon::try_get_rotation(from, to, connection, 6)?;
                if r.index() % 2 == 0 {
                    Some(r)
                } else {
                    None
                }
            }
            _ => ngon::try_get_rotation(from, to, connection, self.modulus()),
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    /// Modulus for the index arithmetic. Degenerate side counts clamp
    /// to 1 so the arithmetic stays total; cube laterals use 4.
    fn modulus(&self) -> u32 {
        match self {
            Self::Cube => 4,
            _ => self.dir_count().max(1),
        }
    }

    fn ngon_shape(&self) -> NgonShape {
        match self {
            Self::Square => NgonShape {
                n: 4,
                dir0_deg: 0.0,
                corner0_deg: -45.0,
                corner_offset: ngon::CORNER_OFFSET_HALF_STEP,
                circumradius: ngon::unit_edge_circumradius(4),
            },
            Self::Hex(HexOrientation::FlatTop) => NgonShape {
                n: 6,
                dir0_deg: 30.0,
                corner0_deg: 0.0,
                corner_offset: ngon::CORNER_OFFSET_HALF_STEP,
                circumradius: 1.0,
            },
            Self::Hex(HexOrientation::PointyTop) => NgonShape {
                n: 6,
                dir0_deg: 0.0,
                corner0_deg: -30.0,
                corner_offset: ngon::CORNER_OFFSET_HALF_STEP,
                circumradius: 1.0,
            },
            Self::Triangle(TriangleOrientation::FlatTopped) => NgonShape {
                n: 6,
                dir0_deg: 30.0,
                corner0_deg: 30.0,
                corner_offset: ngon::CORNER_OFFSET_ALIGNED,
                circumradius: ngon::unit_edge_circumradius(3),
            },
            Self::Triangle(TriangleOrientation::FlatSides) => NgonShape {
                n: 6,
                dir0_deg: -60.0,
                corner0_deg: -60.0,
                corner_offset: ngon::CORNER_OFFSET_ALIGNED,
                circumradius: ngon::unit_edge_circumradius(3),
            },
            Self::NGon(n) => NgonShape {
                n: *n,
                dir0_deg: 0.0,
                corner0_deg: -180.0 / f64::from((*n).max(1)),
                corner_offset: ngon::CORNER_OFFSET_HALF_STEP,
                circumradius: ngon::unit_edge_circumradius((*n).max(1)),
            },
            // Cube laterals behave like a square; only corner handling
            // differs, and that is dispatched before reaching here.
            Self::Cube => NgonShape {
                n: 4,
                dir0_deg: 0.0,
                corner0_deg: -45.0,
                corner_offset: ngon::CORNER_OFFSET_HALF_STEP,
                circumradius: ngon::unit_edge_circumradius(4),
            },
        }
    }
}
