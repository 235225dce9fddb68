//! Prism grids: a planar base extruded into stacked layers.
//!
//! The direction space is the base grid's directions followed by an
//! up/down pair, so a square prism moves along 0..=3 plus `Dir(4)` and
//! `Dir(5)`, a hex or triangle prism along 0..=5 plus `Dir(6)` and
//! `Dir(7)`.
//!
//! Cell coordinates reuse z for the layer. Square bases store
//! `(x, y, layer)` and hex bases `(q, r, layer)` in axial form. A
//! triangle base needs all three coordinates for itself, so its prisms
//! pack two cells per layer: `z = 2·layer + (sum − 1)`, where `sum` is
//! the parity sum of the base triple. Vertical steps there move z by 2.

use crate::grid::{Grid, Move};
use crate::hex::cube_to_axial;
use crate::Bound;
use nalgebra::Point3;
use smallvec::SmallVec;
use std::sync::Arc;
use tessera_core::{Aabb, Cell, CellType, Connection, Corner, Dir, GridError, PrismDir};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseKind {
    Square,
    Hex,
    Triangle,
}

/// A 2D grid extruded along the z axis.
///
/// # Examples
///
/// ```
/// use nalgebra::{Point3, Vector2};
/// use tessera_core::Cell;
/// use tessera_grid::{PrismGrid, SquareGrid};
///
/// let base = SquareGrid::new(Vector2::new(1.0, 1.0)).unwrap();
/// let prism = PrismGrid::new(base.into(), 2.0).unwrap();
/// assert_eq!(
///     prism.cell_center(Cell::new(1, 0, 3)).unwrap(),
///     Point3::new(1.0, 0.0, 6.0),
/// );
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PrismGrid {
    base: Arc<Grid>,
    kind: BaseKind,
    layer_height: f64,
    layers: Option<(i32, i32)>,
}

impl PrismGrid {
    /// Extrudes `base` into an unbounded stack of layers of the given
    /// height.
    ///
    /// The base must be a square, hex, or triangle grid; it may carry
    /// its own bound, which then applies within every layer.
    pub fn new(base: Grid, layer_height: f64) -> Result<Self, GridError> {
        let kind = match &base {
            Grid::Square(_) => BaseKind::Square,
            Grid::Hex(_) => BaseKind::Hex,
            Grid::Triangle(_) => BaseKind::Triangle,
            _ => {
                return Err(GridError::invalid(
                    "prism base must be a square, hex, or triangle grid",
                ))
            }
        };
        if !(layer_height.is_finite() && layer_height > 0.0) {
            return Err(GridError::invalid(format!(
                "prism layer height must be positive and finite, got {layer_height}"
            )));
        }
        Ok(Self {
            base: Arc::new(base),
            kind,
            layer_height,
            layers: None,
        })
    }

    /// Extrudes `base` into layers `min_layer..=max_layer`.
    pub fn bounded(
        base: Grid,
        layer_height: f64,
        min_layer: i32,
        max_layer: i32,
    ) -> Result<Self, GridError> {
        let mut grid = Self::new(base, layer_height)?;
        if min_layer > max_layer {
            return Err(GridError::invalid(format!(
                "prism layer range {min_layer}..={max_layer} is inverted"
            )));
        }
        if grid.kind == BaseKind::Triangle
            && (min_layer.checked_mul(2).is_none()
                || max_layer
                    .checked_mul(2)
                    .and_then(|v| v.checked_add(1))
                    .is_none())
        {
            return Err(GridError::invalid(format!(
                "prism layer range {min_layer}..={max_layer} overflows the packed z coordinate"
            )));
        }
        grid.layers = Some((min_layer, max_layer));
        Ok(grid)
    }

    /// The extruded grid.
    pub fn base(&self) -> &Grid {
        &self.base
    }

    /// Height of one layer.
    pub fn layer_height(&self) -> f64 {
        self.layer_height
    }

    /// The inclusive layer range, if the stack is bounded.
    pub fn layers(&self) -> Option<(i32, i32)> {
        self.layers
    }

    /// Number of directions of the base grid; the up/down pair follows
    /// at this index and the next.
    pub fn base_dir_count(&self) -> u32 {
        match self.kind {
            BaseKind::Square => 4,
            BaseKind::Hex | BaseKind::Triangle => 6,
        }
    }

    /// The direction stepping one layer up.
    pub fn up(&self) -> Dir {
        PrismDir::up(self.base_dir_count())
    }

    /// The direction stepping one layer down.
    pub fn down(&self) -> Dir {
        PrismDir::down(self.base_dir_count())
    }

    /// Whether `cell` belongs to the grid.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        self.split(cell).is_some()
    }

    /// The cell type: `Cube` over a square base. No cell type is
    /// modeled for hex or triangle prisms.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        self.require_cell(cell)?;
        match self.kind {
            BaseKind::Square => Ok(CellType::Cube),
            BaseKind::Hex | BaseKind::Triangle => Err(GridError::Unsupported {
                op: "cell type of a hex or triangle prism",
            }),
        }
    }

    /// Steps from `cell` along `dir`.
    ///
    /// Directions below [`base_dir_count`](Self::base_dir_count) move
    /// within the layer by delegating to the base; the up/down pair
    /// steps across layers with an identity connection.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        let (base_cell, layer) = self.require_cell(cell)?;
        let n = self.base_dir_count();
        if dir.0 >= n {
            let step = if dir == PrismDir::up(n) {
                1
            } else if dir == PrismDir::down(n) {
                -1
            } else {
                return Ok(None);
            };
            let Some(next) = layer.checked_add(step) else {
                return Ok(None);
            };
            if !self.layer_admits(next) {
                return Ok(None);
            }
            let Some(dest) = self.pack(base_cell, next) else {
                return Ok(None);
            };
            let inverse_dir = if step == 1 {
                PrismDir::down(n)
            } else {
                PrismDir::up(n)
            };
            return Ok(Some(Move {
                dest,
                inverse_dir,
                connection: Connection::identity(),
            }));
        }
        match self.base.try_move(base_cell, dir)? {
            Some(mv) => Ok(self.pack(mv.dest, layer).map(|dest| Move {
                dest,
                inverse_dir: mv.inverse_dir,
                connection: mv.connection,
            })),
            None => Ok(None),
        }
    }

    /// Directions leaving `cell`: the base cell's directions plus up
    /// and down.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        let (base_cell, _) = self.require_cell(cell)?;
        let mut dirs = self.base.cell_dirs(base_cell)?;
        dirs.push(self.up());
        dirs.push(self.down());
        Ok(dirs)
    }

    /// Corner indices of `cell`: the eight cube corners over a square
    /// base, unsupported otherwise.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        self.require_cell(cell)?;
        match self.kind {
            BaseKind::Square => Ok((0..8).map(Corner).collect()),
            BaseKind::Hex | BaseKind::Triangle => Err(GridError::Unsupported {
                op: "cell type of a hex or triangle prism",
            }),
        }
    }

    /// World-space center of `cell`: the base center lifted to its
    /// layer.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        let (base_cell, layer) = self.require_cell(cell)?;
        let base = self.base.cell_center(base_cell)?;
        Ok(Point3::new(
            base.x,
            base.y,
            f64::from(layer) * self.layer_height,
        ))
    }

    /// World-space position of one cube corner; square bases only.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        let (base_cell, layer) = self.require_cell(cell)?;
        let Grid::Square(base) = self.base.as_ref() else {
            return Err(GridError::Unsupported {
                op: "cell type of a hex or triangle prism",
            });
        };
        if corner.0 >= 8 {
            return Err(GridError::invalid(format!(
                "cube corner index {corner} out of range 0..8"
            )));
        }
        let center = base.cell_center(base_cell)?;
        let unit = CellType::Cube.corner_position(corner);
        let size = base.cell_size();
        Ok(Point3::new(
            center.x + unit.x * size.x,
            center.y + unit.y * size.y,
            f64::from(layer) * self.layer_height + unit.z * self.layer_height,
        ))
    }

    /// Prism cells have no planar outline.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        self.require_cell(cell)?;
        Err(GridError::Unsupported {
            op: "polygon of a volumetric cell",
        })
    }

    /// World-space box of `cell`: the base footprint over the layer's
    /// height.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        let (base_cell, layer) = self.require_cell(cell)?;
        let b = self.base.cell_aabb(base_cell)?;
        let z = f64::from(layer) * self.layer_height;
        let half = self.layer_height / 2.0;
        Ok(Aabb::new(
            Point3::new(b.min.x, b.min.y, z - half),
            Point3::new(b.max.x, b.max.y, z + half),
        ))
    }

    /// The cell containing a world point. The layer comes from z
    /// rounding, the in-layer cell from the base; half-way heights
    /// belong to the upper layer.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        let layer = (point.z / self.layer_height + 0.5).floor();
        if !(layer >= f64::from(i32::MIN) && layer <= f64::from(i32::MAX)) {
            return None;
        }
        let base_cell = self.base.find_cell(Point3::new(point.x, point.y, 0.0))?;
        let cell = self.pack(base_cell, layer as i32)?;
        self.is_cell_in_grid(cell).then_some(cell)
    }

    /// All cells, layer-major: each layer lists the base enumeration in
    /// order before the next layer starts.
    pub fn cells(&self) -> Result<Vec<Cell>, GridError> {
        let (lo, hi) = self.layer_range()?;
        let base_cells = self.base.cells()?;
        let mut out = Vec::with_capacity(base_cells.len().saturating_mul(layer_span(lo, hi)));
        for layer in lo..=hi {
            for &bc in &base_cells {
                if let Some(c) = self.pack(bc, layer) {
                    out.push(c);
                }
            }
        }
        Ok(out)
    }

    /// Number of cells; `None` unless both the layer range and the base
    /// are enumerable.
    pub fn cell_count(&self) -> Option<usize> {
        let (lo, hi) = self.layers?;
        let per = self.base.cell_count()?;
        Some(per.saturating_mul(layer_span(lo, hi)))
    }

    /// Dense rank of `cell` in layer-major order.
    pub fn index(&self, cell: Cell) -> Result<usize, GridError> {
        let (base_cell, layer) = self.require_cell(cell)?;
        let (lo, _) = self.layer_range()?;
        let per = self.base.index_count()?;
        let li = (i64::from(layer) - i64::from(lo)) as usize;
        Ok(li
            .saturating_mul(per)
            .saturating_add(self.base.index(base_cell)?))
    }

    /// Inverse of [`index`](Self::index).
    pub fn cell_by_index(&self, index: usize) -> Result<Cell, GridError> {
        let (lo, hi) = self.layer_range()?;
        let per = self.base.index_count()?;
        let count = per.saturating_mul(layer_span(lo, hi));
        if per == 0 || index >= count {
            return Err(GridError::invalid(format!(
                "index {index} out of range for {count} cells"
            )));
        }
        let layer = i32::try_from(i64::from(lo) + (index / per) as i64)
            .map_err(|_| GridError::invalid(format!("index {index} out of range for {count} cells")))?;
        let base_cell = self.base.cell_by_index(index % per)?;
        self.pack(base_cell, layer)
            .ok_or_else(|| GridError::invalid(format!("index {index} out of range for {count} cells")))
    }

    /// Number of dense indices; errors when not enumerable.
    pub fn index_count(&self) -> Result<usize, GridError> {
        let (lo, hi) = self.layer_range()?;
        let per = self.base.index_count()?;
        Ok(per.saturating_mul(layer_span(lo, hi)))
    }

    /// Prism cells mix base coordinates with the layer in z, so no
    /// bound shape addresses them coherently; restrict the base or the
    /// layer range instead.
    pub fn bound_by(&self, _bound: &Bound) -> Result<Self, GridError> {
        Err(GridError::Unsupported {
            op: "bounding a prism grid",
        })
    }

    /// This prism with the layer range and the base's bound removed.
    pub fn unbounded(&self) -> Self {
        Self {
            base: Arc::new(self.base.unbounded()),
            kind: self.kind,
            layer_height: self.layer_height,
            layers: None,
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn require_cell(&self, cell: Cell) -> Result<(Cell, i32), GridError> {
        self.split(cell).ok_or(GridError::CellNotInGrid { cell })
    }

    /// Base cell and layer of `cell` when the grid contains it.
    fn split(&self, cell: Cell) -> Option<(Cell, i32)> {
        let (base_cell, layer) = self.unpack(cell)?;
        (self.layer_admits(layer) && self.base.is_cell_in_grid(base_cell))
            .then_some((base_cell, layer))
    }

    fn layer_admits(&self, layer: i32) -> bool {
        self.layers.map_or(true, |(lo, hi)| lo <= layer && layer <= hi)
    }

    fn layer_range(&self) -> Result<(i32, i32), GridError> {
        self.layers.ok_or(GridError::Unbounded {
            what: "prism grid without a layer range",
        })
    }

    /// Splits a prism cell into its base cell and layer, membership
    /// unchecked. Hex bases come back in axial form, which the base
    /// accepts everywhere.
    fn unpack(&self, cell: Cell) -> Option<(Cell, i32)> {
        match self.kind {
            BaseKind::Square | BaseKind::Hex => Some((Cell::new2(cell.x, cell.y), cell.z)),
            BaseKind::Triangle => {
                let layer = cell.z.div_euclid(2);
                let sum = 1 + i64::from(cell.z.rem_euclid(2));
                let z = sum - i64::from(cell.x) - i64::from(cell.y);
                Some((Cell::new(cell.x, cell.y, i32::try_from(z).ok()?), layer))
            }
        }
    }

    /// Packs a base-form cell and a layer into a prism cell.
    fn pack(&self, base_cell: Cell, layer: i32) -> Option<Cell> {
        match self.kind {
            BaseKind::Square => Some(Cell::new(base_cell.x, base_cell.y, layer)),
            BaseKind::Hex => {
                let (q, r) = cube_to_axial(base_cell)?;
                Some(Cell::new(q, r, layer))
            }
            BaseKind::Triangle => {
                let sum = i64::from(base_cell.x) + i64::from(base_cell.y) + i64::from(base_cell.z);
                let parity = i32::try_from(sum).ok()? - 1;
                let z = layer.checked_mul(2)?.checked_add(parity)?;
                Some(Cell::new(base_cell.x, base_cell.y, z))
            }
        }
    }
}

fn layer_span(lo: i32, hi: i32) -> usize {
    usize::try_from(i64::from(hi) - i64::from(lo) + 1).unwrap_or(usize::MAX)
}
