//! The hit record produced by the intersection search.

use lumen_math::Point3;
use lumen_mesh::Mesh;
use serde::{Deserialize, Serialize};

use crate::Ray;

/// Options for [`PickResult::resolve_normal`].
///
/// The default query returns the flat (per-face) normal in local object
/// space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalQuery {
    /// Map the normal into world space via the mesh's world transform.
    pub world_space: bool,
    /// Interpolate the per-vertex normals instead of computing the facet
    /// normal from positions.
    pub vertex_normals: bool,
}

/// The result of one pick query against the scene.
///
/// Populated by the intersection search and read by the caller; the mesh
/// reference is a plain borrow, so a result can never keep a mesh alive
/// past its scene lifetime. A result is created per query and discarded
/// when the caller is done with it.
#[derive(Debug, Clone)]
pub struct PickResult<'scene> {
    /// Whether the pick hit anything at all.
    pub hit: bool,
    /// The mesh that was hit, if any.
    pub picked_mesh: Option<&'scene Mesh>,
    /// Index of the intersected triangle; `face_id * 3` is the offset of
    /// its first entry in the index buffer.
    pub face_id: u32,
    /// Barycentric weight delivered by the intersection test.
    pub bu: f64,
    /// Barycentric weight delivered by the intersection test.
    pub bv: f64,
    /// Distance from the ray origin to the hit point.
    pub distance: f64,
    /// The hit point in world space, if the search computed it.
    pub picked_point: Option<Point3>,
    /// Submesh the hit triangle belongs to.
    pub sub_mesh_id: u32,
    /// The ray that produced this result.
    pub origin_ray: Option<Ray>,
}

impl<'scene> PickResult<'scene> {
    /// A result for a pick that hit empty space.
    pub fn miss() -> Self {
        Self {
            hit: false,
            picked_mesh: None,
            face_id: 0,
            bu: 0.0,
            bv: 0.0,
            distance: 0.0,
            picked_point: None,
            sub_mesh_id: 0,
            origin_ray: None,
        }
    }

    /// A result for a hit on `mesh` at the given triangle and barycentric
    /// location.
    pub fn hit_on(
        mesh: &'scene Mesh,
        face_id: u32,
        bu: f64,
        bv: f64,
        distance: f64,
        picked_point: Option<Point3>,
    ) -> Self {
        Self {
            hit: true,
            picked_mesh: Some(mesh),
            face_id,
            bu,
            bv,
            distance,
            picked_point,
            sub_mesh_id: 0,
            origin_ray: None,
        }
    }

    /// Builder-style attachment of the originating ray.
    pub fn with_ray(mut self, ray: Ray) -> Self {
        self.origin_ray = Some(ray);
        self
    }
}

impl Default for PickResult<'_> {
    fn default() -> Self {
        Self::miss()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_mesh::VertexData;

    #[test]
    fn test_miss_has_no_mesh() {
        let result = PickResult::miss();
        assert!(!result.hit);
        assert!(result.picked_mesh.is_none());
    }

    #[test]
    fn test_hit_on_populates_record() {
        let mesh = Mesh::new("m", VertexData::new());
        let result = PickResult::hit_on(&mesh, 7, 0.25, 0.5, 12.0, None);
        assert!(result.hit);
        assert_eq!(result.face_id, 7);
        assert!((result.bu - 0.25).abs() < 1e-12);
        assert!((result.bv - 0.5).abs() < 1e-12);
        assert_eq!(result.picked_mesh.unwrap().name(), "m");
    }
}
