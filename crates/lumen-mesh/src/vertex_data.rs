//! Vertex/index buffer storage and the snapshot read interface.

use lumen_math::Vec3;
use serde::{Deserialize, Serialize};

use crate::MeshError;

/// A named per-vertex attribute kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VertexAttribute {
    /// Vertex positions, 3 floats per vertex. Always present.
    Position,
    /// Vertex normals, 3 floats per vertex.
    Normal,
    /// Texture coordinates, 2 floats per vertex.
    Uv,
}

/// Geometry snapshot storage: flat attribute buffers in GPU layout.
///
/// Positions are mandatory; normals, uvs, and the triangle index buffer
/// are optional. Buffers are `f32` (render layout); all consuming math is
/// done in `f64`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VertexData {
    /// Vertex positions: `[x0, y0, z0, x1, y1, z1, ...]`.
    pub positions: Vec<f32>,
    /// Vertex normals, same layout and length as `positions`.
    pub normals: Option<Vec<f32>>,
    /// Texture coordinates: `[u0, v0, u1, v1, ...]`.
    pub uvs: Option<Vec<f32>>,
    /// Triangle indices, 3 per face: `[i0, i1, i2, ...]`.
    pub indices: Option<Vec<u32>>,
}

impl VertexData {
    /// Create empty vertex data.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of vertices.
    pub fn num_vertices(&self) -> usize {
        self.positions.len() / 3
    }

    /// Number of indexed triangles (0 when no index buffer is present).
    pub fn num_triangles(&self) -> usize {
        self.indices.as_ref().map_or(0, |i| i.len() / 3)
    }

    /// Recompute per-vertex normals from positions and indices.
    ///
    /// No-op when the index buffer is absent.
    pub fn recompute_normals(&mut self) {
        if let Some(indices) = &self.indices {
            self.normals = Some(compute_normals(&self.positions, indices));
        }
    }

    /// Structural validation for ingested data.
    ///
    /// Checks buffer lengths and index ranges. Intended for asset-ingest
    /// call sites; query paths rely on bounds-checked reads instead.
    pub fn validate(&self) -> Result<(), MeshError> {
        if self.positions.len() % 3 != 0 {
            return Err(MeshError::PositionLength(self.positions.len()));
        }
        let vertices = self.num_vertices();
        if let Some(normals) = &self.normals {
            if normals.len() != self.positions.len() {
                return Err(MeshError::NormalLength {
                    got: normals.len(),
                    expected: self.positions.len(),
                });
            }
        }
        if let Some(uvs) = &self.uvs {
            if uvs.len() != vertices * 2 {
                return Err(MeshError::UvLength {
                    got: uvs.len(),
                    vertices,
                });
            }
        }
        if let Some(indices) = &self.indices {
            if indices.len() % 3 != 0 {
                return Err(MeshError::IndexLength(indices.len()));
            }
            for &index in indices {
                if index as usize >= vertices {
                    return Err(MeshError::IndexOutOfRange { index, vertices });
                }
            }
        }
        Ok(())
    }
}

/// Snapshot read capability over mesh geometry.
///
/// All accessors return `None` when the corresponding buffer is
/// unavailable; consumers must propagate that as an absent result and
/// never treat it as zero-length data. Reads are valid only for the
/// duration of the borrow; the owning mesh may be mutated afterward.
pub trait GeometrySource {
    /// Whether the named attribute is present.
    fn has_attribute(&self, attribute: VertexAttribute) -> bool;

    /// Vertex position buffer, 3 floats per vertex.
    fn positions(&self) -> Option<&[f32]>;

    /// Vertex normal buffer, 3 floats per vertex.
    fn normals(&self) -> Option<&[f32]>;

    /// Texture coordinate buffer, 2 floats per vertex.
    fn uvs(&self) -> Option<&[f32]>;

    /// Triangle index buffer, 3 indices per face.
    fn indices(&self) -> Option<&[u32]>;

    /// Number of indexed triangles (0 without an index buffer).
    fn triangle_count(&self) -> usize {
        self.indices().map_or(0, |i| i.len() / 3)
    }
}

impl GeometrySource for VertexData {
    fn has_attribute(&self, attribute: VertexAttribute) -> bool {
        match attribute {
            VertexAttribute::Position => !self.positions.is_empty(),
            VertexAttribute::Normal => self.normals.is_some(),
            VertexAttribute::Uv => self.uvs.is_some(),
        }
    }

    fn positions(&self) -> Option<&[f32]> {
        (!self.positions.is_empty()).then_some(self.positions.as_slice())
    }

    fn normals(&self) -> Option<&[f32]> {
        self.normals.as_deref()
    }

    fn uvs(&self) -> Option<&[f32]> {
        self.uvs.as_deref()
    }

    fn indices(&self) -> Option<&[u32]> {
        self.indices.as_deref()
    }
}

/// Compute per-vertex normals by facet accumulation.
///
/// Each facet contributes its unit normal `normalize(cross(p0 - p1, p2 - p1))`
/// to its three corner vertices; the sums are then normalized. Facet
/// orientation therefore follows index-buffer winding. Degenerate facets
/// (zero area) contribute nothing, and vertices referenced by no facet get
/// a zero normal.
pub fn compute_normals(positions: &[f32], indices: &[u32]) -> Vec<f32> {
    let vertex_count = positions.len() / 3;
    let mut sums = vec![Vec3::zeros(); vertex_count];

    let fetch = |vertex: usize| -> Option<Vec3> {
        let base = vertex * 3;
        let v = positions.get(base..base + 3)?;
        Some(Vec3::new(v[0] as f64, v[1] as f64, v[2] as f64))
    };

    for face in indices.chunks_exact(3) {
        let (i0, i1, i2) = (face[0] as usize, face[1] as usize, face[2] as usize);
        let (p0, p1, p2) = match (fetch(i0), fetch(i1), fetch(i2)) {
            (Some(p0), Some(p1), Some(p2)) => (p0, p1, p2),
            _ => continue,
        };
        let facet = (p0 - p1).cross(&(p2 - p1));
        if facet.norm_squared() < 1e-24 {
            continue;
        }
        let facet = facet.normalize();
        sums[i0] += facet;
        sums[i1] += facet;
        sums[i2] += facet;
    }

    let mut normals = Vec::with_capacity(positions.len());
    for sum in &sums {
        let n = if sum.norm_squared() > 1e-24 {
            sum.normalize()
        } else {
            Vec3::zeros()
        };
        normals.push(n.x as f32);
        normals.push(n.y as f32);
        normals.push(n.z as f32);
    }
    normals
}
