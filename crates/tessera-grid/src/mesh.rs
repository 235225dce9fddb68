//! Mesh grids: an arbitrary polygon surface treated as a grid.
//!
//! Faces are the cells, addressed as `(face, 0, 0)`. Two faces are
//! neighbours when they share an undirected vertex pair as an edge;
//! direction `d` out of a face is its edge from corner `d` to corner
//! `d + 1 (mod n)` in stored winding order. Unlike the lattice grids,
//! crossing a mesh edge can rotate or mirror the local frame, so moves
//! carry non-trivial [`Connection`] values.

use crate::grid::{bound_admits, Move};
use crate::Bound;
use indexmap::map::Entry;
use indexmap::IndexMap;
use nalgebra::{Point3, Vector3};
use smallvec::SmallVec;
use std::sync::Arc;
use tessera_core::{Aabb, Cell, CellType, Connection, Corner, Dir, GridError};

/// Raw mesh geometry: shared vertices, faces as corner lists, and an
/// optional precomputed adjacency table.
///
/// Faces list vertex indices in winding order; consistent winding
/// across the mesh (counter-clockwise seen from the same side) yields
/// mirror-free connections. When `adjacency` is `None`,
/// [`MeshGrid::new`] derives it from shared edges and rejects
/// non-manifold input. A provided table must have one row per face, one
/// entry per edge, `-1` marking a boundary edge, and must be symmetric.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    /// Vertex positions.
    pub vertices: Vec<Point3<f64>>,
    /// Faces as lists of vertex indices, at least three per face.
    pub faces: Vec<Vec<u32>>,
    /// Neighbour face per edge, `-1` for boundary edges.
    pub adjacency: Option<Vec<Vec<i32>>>,
}

/// A grid over the faces of a polygon mesh.
///
/// Mesh grids are always finite; enumeration is in face-index order
/// regardless of any attached bound. Faces need not share a plane or a
/// side count, but the exact inverse relation between the connections
/// of a move and its reverse only holds across edges whose two faces
/// have the same degree.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGrid {
    data: Arc<MeshData>,
    adjacency: Vec<Vec<i32>>,
    centroids: Vec<Point3<f64>>,
    bound: Option<Bound>,
}

impl MeshGrid {
    /// Builds a grid from mesh data, validating it.
    ///
    /// Returns `Err(GridError::InvalidArgument)` for empty or repeated
    /// face corners, vertex references out of range, non-finite vertex
    /// positions, an edge shared by more than two faces, or a provided
    /// adjacency table with the wrong shape, out-of-range entries, or
    /// missing back links.
    pub fn new(data: MeshData) -> Result<Self, GridError> {
        if i32::try_from(data.faces.len()).is_err() {
            return Err(GridError::invalid(format!(
                "mesh has {} faces; face indices must fit in i32",
                data.faces.len()
            )));
        }
        for (i, v) in data.vertices.iter().enumerate() {
            if !(v.x.is_finite() && v.y.is_finite() && v.z.is_finite()) {
                return Err(GridError::invalid(format!(
                    "vertex {i} has non-finite coordinates {v}"
                )));
            }
        }
        for (f, face) in data.faces.iter().enumerate() {
            if face.len() < 3 {
                return Err(GridError::invalid(format!(
                    "face {f} has {} corners; at least 3 required",
                    face.len()
                )));
            }
            for &v in face {
                if v as usize >= data.vertices.len() {
                    return Err(GridError::invalid(format!(
                        "face {f} references vertex {v} but the mesh has {} vertices",
                        data.vertices.len()
                    )));
                }
            }
        }

        let adjacency = match &data.adjacency {
            Some(table) => {
                validate_adjacency(&data.faces, table)?;
                table.clone()
            }
            None => derive_adjacency(&data.faces)?,
        };

        let centroids = data
            .faces
            .iter()
            .map(|face| {
                let sum = face
                    .iter()
                    .fold(Vector3::zeros(), |acc, &v| acc + data.vertices[v as usize].coords);
                Point3::from(sum / face.len() as f64)
            })
            .collect();

        Ok(Self {
            data: Arc::new(data),
            adjacency,
            centroids,
            bound: None,
        })
    }

    /// The underlying mesh data.
    pub fn data(&self) -> &MeshData {
        &self.data
    }

    /// Number of faces, including any a bound excludes.
    pub fn face_count(&self) -> usize {
        self.data.faces.len()
    }

    /// The resolved adjacency table, derived or validated.
    pub fn adjacency(&self) -> &[Vec<i32>] {
        &self.adjacency
    }

    /// The restricting bound, if any.
    pub fn bound(&self) -> Option<&Bound> {
        self.bound.as_ref()
    }

    /// Whether `cell` names a face of the grid.
    pub fn is_cell_in_grid(&self, cell: Cell) -> bool {
        self.face_of(cell).is_some()
    }

    /// The cell type of a face: the n-gon of its side count.
    pub fn cell_type(&self, cell: Cell) -> Result<CellType, GridError> {
        let f = self.require_face(cell)?;
        Ok(CellType::NGon(self.data.faces[f].len() as u32))
    }

    /// Crosses the edge `dir` of the face `cell`.
    ///
    /// `Ok(None)` when the edge is a boundary, the neighbour is
    /// excluded by the bound, or the direction index is out of range.
    /// The returned connection relates the two face frames, expressed
    /// in the destination face's index space.
    pub fn try_move(&self, cell: Cell, dir: Dir) -> Result<Option<Move>, GridError> {
        let f = self.require_face(cell)?;
        let e = dir.0 as usize;
        let Some(&neighbour) = self.adjacency[f].get(e) else {
            return Ok(None);
        };
        if neighbour < 0 {
            return Ok(None);
        }
        let dest_face = neighbour as usize;
        let dest = face_cell(dest_face);
        if !self.is_cell_in_grid(dest) {
            return Ok(None);
        }
        let Some(back) = self.inverse_edge(f, e, dest_face) else {
            return Ok(None);
        };
        Ok(Some(Move {
            dest,
            inverse_dir: Dir(back as u32),
            connection: self.connection_for(f, e, dest_face, back),
        }))
    }

    /// Directions leaving `cell`, one per edge.
    pub fn cell_dirs(&self, cell: Cell) -> Result<SmallVec<[Dir; 8]>, GridError> {
        let f = self.require_face(cell)?;
        Ok((0..self.data.faces[f].len() as u32).map(Dir).collect())
    }

    /// Corner indices of `cell`, one per vertex.
    pub fn cell_corners(&self, cell: Cell) -> Result<SmallVec<[Corner; 8]>, GridError> {
        let f = self.require_face(cell)?;
        Ok((0..self.data.faces[f].len() as u32).map(Corner).collect())
    }

    /// Centroid of the face.
    pub fn cell_center(&self, cell: Cell) -> Result<Point3<f64>, GridError> {
        let f = self.require_face(cell)?;
        Ok(self.centroids[f])
    }

    /// Position of one corner of the face.
    pub fn corner_position(&self, cell: Cell, corner: Corner) -> Result<Point3<f64>, GridError> {
        let f = self.require_face(cell)?;
        let face = &self.data.faces[f];
        let Some(&v) = face.get(corner.0 as usize) else {
            return Err(GridError::invalid(format!(
                "corner {corner} out of range for a face with {} corners",
                face.len()
            )));
        };
        Ok(self.data.vertices[v as usize])
    }

    /// The face outline in stored winding order, which is not
    /// necessarily counter-clockwise.
    pub fn polygon(&self, cell: Cell) -> Result<Vec<Point3<f64>>, GridError> {
        let f = self.require_face(cell)?;
        Ok(self.data.faces[f]
            .iter()
            .map(|&v| self.data.vertices[v as usize])
            .collect())
    }

    /// World-space box of the face.
    pub fn cell_aabb(&self, cell: Cell) -> Result<Aabb, GridError> {
        let f = self.require_face(cell)?;
        let points = self.data.faces[f]
            .iter()
            .map(|&v| self.data.vertices[v as usize]);
        Aabb::from_points(points)
            .ok_or_else(|| GridError::invalid(format!("face {f} has no corners")))
    }

    /// The face whose centroid is nearest to `point`, searched by brute
    /// force over the faces the bound admits.
    pub fn find_cell(&self, point: Point3<f64>) -> Option<Cell> {
        let mut best: Option<(f64, Cell)> = None;
        for f in 0..self.data.faces.len() {
            let cell = face_cell(f);
            if !self.is_cell_in_grid(cell) {
                continue;
            }
            let d2 = (self.centroids[f] - point).norm_squared();
            if best.map_or(true, |(b, _)| d2 < b) {
                best = Some((d2, cell));
            }
        }
        best.map(|(_, c)| c)
    }

    /// All cells, in face-index order.
    pub fn cells(&self) -> Result<Vec<Cell>, GridError> {
        Ok((0..self.data.faces.len())
            .map(face_cell)
            .filter(|&c| self.is_cell_in_grid(c))
            .collect())
    }

    /// Number of cells. Always known: a mesh is finite.
    pub fn cell_count(&self) -> usize {
        match &self.bound {
            None => self.data.faces.len(),
            Some(_) => (0..self.data.faces.len())
                .filter(|&f| self.is_cell_in_grid(face_cell(f)))
                .count(),
        }
    }

    /// Dense rank of `cell`; the face index itself when no bound
    /// excludes faces.
    pub fn index(&self, cell: Cell) -> Result<usize, GridError> {
        let f = self.require_face(cell)?;
        if self.bound.is_none() {
            return Ok(f);
        }
        Ok((0..f)
            .filter(|&g| self.is_cell_in_grid(face_cell(g)))
            .count())
    }

    /// Inverse of [`index`](Self::index).
    pub fn cell_by_index(&self, index: usize) -> Result<Cell, GridError> {
        if self.bound.is_none() {
            if index < self.data.faces.len() {
                return Ok(face_cell(index));
            }
            return Err(GridError::invalid(format!(
                "index {index} out of range for {} cells",
                self.data.faces.len()
            )));
        }
        let cells = self.cells()?;
        let count = cells.len();
        cells
            .into_iter()
            .nth(index)
            .ok_or_else(|| GridError::invalid(format!("index {index} out of range for {count} cells")))
    }

    /// Number of dense indices.
    pub fn index_count(&self) -> usize {
        self.cell_count()
    }

    /// This grid further restricted by `bound`. A continuous box bound
    /// admits the faces whose centroids it contains.
    pub fn bound_by(&self, bound: &Bound) -> Self {
        let combined = match &self.bound {
            Some(existing) => existing.intersect(bound),
            None => bound.clone(),
        };
        Self {
            bound: Some(combined),
            ..self.clone()
        }
    }

    /// This grid with its bound removed, covering the whole mesh again.
    pub fn unbounded(&self) -> Self {
        Self {
            bound: None,
            ..self.clone()
        }
    }

    // ── Private helpers ──────────────────────────────────────────────

    fn require_face(&self, cell: Cell) -> Result<usize, GridError> {
        self.face_of(cell).ok_or(GridError::CellNotInGrid { cell })
    }

    fn face_of(&self, cell: Cell) -> Option<usize> {
        if cell.y != 0 || cell.z != 0 || cell.x < 0 {
            return None;
        }
        let f = cell.x as usize;
        if f >= self.data.faces.len() {
            return None;
        }
        bound_admits(self.bound.as_ref(), cell, || self.centroids[f]).then_some(f)
    }

    /// Directed edge `e` of face `f` as an unordered vertex pair.
    fn edge_pair(&self, f: usize, e: usize) -> (u32, u32) {
        let face = &self.data.faces[f];
        let a = face[e];
        let b = face[(e + 1) % face.len()];
        (a.min(b), a.max(b))
    }

    /// The edge of `dest` leading back to `src` across the same edge.
    ///
    /// Prefers a back link over the same vertex pair, and a different
    /// edge index when a face is glued to itself; falls back to the
    /// first back link.
    fn inverse_edge(&self, src: usize, e: usize, dest: usize) -> Option<usize> {
        let pair = self.edge_pair(src, e);
        let mut fallback = None;
        for (e2, &back) in self.adjacency[dest].iter().enumerate() {
            if back != src as i32 {
                continue;
            }
            if fallback.is_none() {
                fallback = Some(e2);
            }
            if self.edge_pair(dest, e2) == pair && (src != dest || e2 != e) {
                return Some(e2);
            }
        }
        fallback
    }

    /// The frame relation for crossing from edge `e` of `src` to edge
    /// `back` of `dest`.
    ///
    /// Both faces traversing the shared edge in the same vertex order
    /// means their windings disagree, so the frames are mirrored. The
    /// rotation index is chosen so that the reverse crossing yields the
    /// group inverse (for faces of equal degree).
    fn connection_for(&self, src: usize, e: usize, dest: usize, back: usize) -> Connection {
        let src_face = &self.data.faces[src];
        let dest_face = &self.data.faces[dest];
        let (a, b) = (src_face[e], src_face[(e + 1) % src_face.len()]);
        let (c, d) = (dest_face[back], dest_face[(back + 1) % dest_face.len()]);
        let is_mirror = (c, d) == (a, b);

        let n = dest_face.len() as i64;
        let (i, j) = (e as i64, back as i64);
        let half = if n % 2 == 0 { n / 2 } else { 0 };
        let rotation = if is_mirror {
            (i + j + half).rem_euclid(n)
        } else {
            (j - i + half).rem_euclid(n)
        };
        Connection {
            rotation: rotation as u32,
            is_mirror,
        }
    }
}

fn face_cell(f: usize) -> Cell {
    Cell::new(f as i32, 0, 0)
}

/// Builds the adjacency table by pairing faces over shared undirected
/// edges. An edge on more than two faces is rejected.
fn derive_adjacency(faces: &[Vec<u32>]) -> Result<Vec<Vec<i32>>, GridError> {
    enum Slot {
        Open(usize, usize),
        Linked,
    }
    let mut adjacency: Vec<Vec<i32>> = faces.iter().map(|f| vec![-1; f.len()]).collect();
    let mut edges: IndexMap<(u32, u32), Slot> = IndexMap::new();
    for (f, face) in faces.iter().enumerate() {
        for e in 0..face.len() {
            let a = face[e];
            let b = face[(e + 1) % face.len()];
            if a == b {
                return Err(GridError::invalid(format!(
                    "face {f} repeats vertex {a} on consecutive corners"
                )));
            }
            match edges.entry((a.min(b), a.max(b))) {
                Entry::Vacant(slot) => {
                    slot.insert(Slot::Open(f, e));
                }
                Entry::Occupied(mut slot) => match *slot.get() {
                    Slot::Open(f2, e2) => {
                        adjacency[f][e] = f2 as i32;
                        adjacency[f2][e2] = f as i32;
                        *slot.get_mut() = Slot::Linked;
                    }
                    Slot::Linked => {
                        return Err(GridError::invalid(format!(
                            "edge ({a}, {b}) is shared by more than two faces"
                        )));
                    }
                },
            }
        }
    }
    Ok(adjacency)
}

/// Checks a caller-provided adjacency table: one row per face, one
/// entry per edge, entries in range, and every link reciprocated.
fn validate_adjacency(faces: &[Vec<u32>], table: &[Vec<i32>]) -> Result<(), GridError> {
    if table.len() != faces.len() {
        return Err(GridError::invalid(format!(
            "adjacency has {} rows for {} faces",
            table.len(),
            faces.len()
        )));
    }
    for (f, row) in table.iter().enumerate() {
        if row.len() != faces[f].len() {
            return Err(GridError::invalid(format!(
                "adjacency row {f} has {} entries for a face with {} edges",
                row.len(),
                faces[f].len()
            )));
        }
        for &neighbour in row {
            if neighbour < -1 || neighbour as i64 >= faces.len() as i64 {
                return Err(GridError::invalid(format!(
                    "adjacency row {f} references face {neighbour} of {}",
                    faces.len()
                )));
            }
            if neighbour >= 0 {
                let back = &table[neighbour as usize];
                if !back.iter().any(|&x| x == f as i32) {
                    return Err(GridError::invalid(format!(
                        "adjacency is not symmetric: face {f} links to {neighbour} but not back"
                    )));
                }
            }
        }
    }
    Ok(())
}
