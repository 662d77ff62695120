//! Normal resolution at a pick hit.

use lumen_math::{Dir3, Vec3};
use lumen_mesh::{GeometrySource, VertexAttribute};

use crate::{NormalQuery, PickResult};

/// Squared-magnitude floor below which a would-be normal is rejected as
/// degenerate instead of being normalized into NaN.
pub(crate) const DEGENERATE_EPS: f64 = 1e-12;

/// Bounds-checked read of vertex `vertex` from a 3-floats-per-vertex buffer.
fn read_vec3(buffer: &[f32], vertex: usize) -> Option<Vec3> {
    let base = vertex.checked_mul(3)?;
    let v = buffer.get(base..base + 3)?;
    Some(Vec3::new(v[0] as f64, v[1] as f64, v[2] as f64))
}

/// The three vertex indices of triangle `face_id`, or `None` when the
/// face is past the end of the index buffer.
fn triangle(indices: &[u32], face_id: u32) -> Option<[usize; 3]> {
    let base = (face_id as usize).checked_mul(3)?;
    let tri = indices.get(base..base + 3)?;
    Some([tri[0] as usize, tri[1] as usize, tri[2] as usize])
}

/// Facet normal of triangle `face_id`, unnormalized.
///
/// Orientation follows index-buffer winding: `cross(p0 - p1, p2 - p1)`,
/// the same facet convention vertex-normal accumulation uses, so the
/// result points out of the front face.
pub fn flat_normal(source: &dyn GeometrySource, face_id: u32) -> Option<Vec3> {
    let indices = source.indices()?;
    let positions = source.positions()?;
    let [i0, i1, i2] = triangle(indices, face_id)?;
    let p0 = read_vec3(positions, i0)?;
    let p1 = read_vec3(positions, i1)?;
    let p2 = read_vec3(positions, i2)?;
    Some((p0 - p1).cross(&(p2 - p1)))
}

/// Barycentric blend of triangle `face_id`'s vertex normals, unnormalized.
///
/// Weights as delivered by the intersection test: `bu` on the first
/// vertex, `bv` on the second, the remainder `1 - bu - bv` on the third.
pub fn interpolated_normal(
    source: &dyn GeometrySource,
    face_id: u32,
    bu: f64,
    bv: f64,
) -> Option<Vec3> {
    let indices = source.indices()?;
    let normals = source.normals()?;
    let [i0, i1, i2] = triangle(indices, face_id)?;
    let n0 = read_vec3(normals, i0)?;
    let n1 = read_vec3(normals, i1)?;
    let n2 = read_vec3(normals, i2)?;
    Some(n0 * bu + n1 * bv + n2 * (1.0 - bu - bv))
}

impl PickResult<'_> {
    /// Resolve the unit surface normal at this hit.
    ///
    /// Flat mode derives the normal from the triangle's positions; vertex
    /// mode interpolates the authored per-vertex normals at the hit's
    /// barycentric location. With [`NormalQuery::world_space`] set, the
    /// local normal is mapped through the mesh world transform's
    /// inverse-transpose and re-normalized.
    ///
    /// Returns `None` when nothing was picked, when vertex normals are
    /// requested but the mesh has none, when the index buffer is
    /// unavailable, when the face or a vertex index is out of range, or
    /// when the resolved vector is degenerate. The query is pure: it
    /// mutates neither the result nor the mesh.
    pub fn resolve_normal(&self, query: NormalQuery) -> Option<Dir3> {
        let mesh = self.picked_mesh?;
        if query.vertex_normals && !mesh.has_attribute(VertexAttribute::Normal) {
            log::trace!(
                "vertex normals requested but mesh '{}' has no normal attribute",
                mesh.name()
            );
            return None;
        }

        let local = if query.vertex_normals {
            interpolated_normal(mesh, self.face_id, self.bu, self.bv)?
        } else {
            flat_normal(mesh, self.face_id)?
        };

        let mapped = if query.world_space {
            mesh.world().apply_normal(&local)
        } else {
            local
        };

        if mapped.norm_squared() < DEGENERATE_EPS {
            log::trace!(
                "degenerate normal at face {} of mesh '{}'",
                self.face_id,
                mesh.name()
            );
            return None;
        }
        Some(Dir3::new_normalize(mapped))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_math::{Tolerance, Transform};
    use lumen_mesh::{Mesh, VertexData};
    use lumen_shapes::{
        build_box, build_sphere, build_torus_knot, BoxOptions, SphereOptions, TorusKnotOptions,
    };

    const FLAT: NormalQuery = NormalQuery {
        world_space: false,
        vertex_normals: false,
    };
    const SMOOTH: NormalQuery = NormalQuery {
        world_space: false,
        vertex_normals: true,
    };
    const ALL_QUERIES: [NormalQuery; 4] = [
        NormalQuery {
            world_space: false,
            vertex_normals: false,
        },
        NormalQuery {
            world_space: false,
            vertex_normals: true,
        },
        NormalQuery {
            world_space: true,
            vertex_normals: false,
        },
        NormalQuery {
            world_space: true,
            vertex_normals: true,
        },
    ];

    fn unit_box() -> Mesh {
        Mesh::new("box", build_box(&BoxOptions::cube(1.0)).unwrap())
    }

    fn knot() -> Mesh {
        let options = TorusKnotOptions {
            radius: 10.0,
            tube: 3.0,
            radial_segments: 32,
            tubular_segments: 8,
            p: 2,
            q: 3,
        };
        Mesh::new("knot", build_torus_knot(&options).unwrap())
    }

    fn center_hit(mesh: &Mesh) -> PickResult<'_> {
        PickResult::hit_on(mesh, 0, 0.5, 0.5, 0.0, None)
    }

    // Expected values are quoted to 2 decimals; the builders quantize to
    // f32, so compare at the same precision.
    fn assert_close(n: &Dir3, x: f64, y: f64, z: f64) {
        assert!((n.x - x).abs() < 5e-3, "x: {} vs {}", n.x, x);
        assert!((n.y - y).abs() < 5e-3, "y: {} vs {}", n.y, y);
        assert!((n.z - z).abs() < 5e-3, "z: {} vs {}", n.z, z);
    }

    #[test]
    fn test_miss_resolves_to_none() {
        let result = PickResult::miss();
        for query in ALL_QUERIES {
            assert!(result.resolve_normal(query).is_none());
        }
    }

    #[test]
    fn test_no_normal_attribute_resolves_to_none() {
        let mut data = build_box(&BoxOptions::cube(1.0)).unwrap();
        data.normals = None;
        let mesh = Mesh::new("box", data);
        assert!(center_hit(&mesh).resolve_normal(SMOOTH).is_none());
        // The flat path does not need the attribute.
        assert!(center_hit(&mesh).resolve_normal(FLAT).is_some());
    }

    #[test]
    fn test_no_index_buffer_resolves_to_none() {
        let mut data = build_box(&BoxOptions::cube(1.0)).unwrap();
        data.indices = None;
        let mesh = Mesh::new("box", data);
        for query in ALL_QUERIES {
            assert!(center_hit(&mesh).resolve_normal(query).is_none());
        }
    }

    #[test]
    fn test_box_flat_normal() {
        let mesh = unit_box();
        let n = center_hit(&mesh).resolve_normal(FLAT).unwrap();
        assert_close(&n, 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_box_interpolated_normal() {
        // Box vertex normals align with face normals on flat faces.
        let mesh = unit_box();
        let n = center_hit(&mesh).resolve_normal(SMOOTH).unwrap();
        assert_close(&n, 0.0, 0.0, 1.0);
    }

    #[test]
    fn test_torus_knot_flat_normal() {
        let mesh = knot();
        let n = center_hit(&mesh).resolve_normal(FLAT).unwrap();
        assert_close(&n, -0.89, -0.08, -0.45);
    }

    #[test]
    fn test_torus_knot_interpolated_normal() {
        let mesh = knot();
        let n = center_hit(&mesh).resolve_normal(SMOOTH).unwrap();
        assert_close(&n, -0.84, -0.24, -0.48);
        // Interpolation and facet computation diverge on curved geometry.
        let flat = center_hit(&mesh).resolve_normal(FLAT).unwrap();
        assert!((n.as_ref() - flat.as_ref()).norm() > 0.05);
    }

    #[test]
    fn test_resolved_normals_are_unit_length() {
        let tol = Tolerance::DEFAULT;
        let box_mesh = unit_box();
        let knot_mesh = knot();
        for mesh in [&box_mesh, &knot_mesh] {
            for face_id in [0, 3, 10] {
                let result = PickResult::hit_on(mesh, face_id, 0.3, 0.3, 0.0, None);
                for query in ALL_QUERIES {
                    let n = result.resolve_normal(query).unwrap();
                    assert!(tol.is_unit(n.as_ref()));
                }
            }
        }
    }

    #[test]
    fn test_resolution_is_idempotent() {
        let mesh = knot();
        let result = center_hit(&mesh);
        let a = result.resolve_normal(SMOOTH).unwrap();
        let b = result.resolve_normal(SMOOTH).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_world_space_under_nonuniform_scale() {
        let tol = Tolerance::DEFAULT;
        let mesh = knot().with_world(Transform::scale(3.0, 1.0, 0.5));
        let result = center_hit(&mesh);
        let local = result.resolve_normal(FLAT).unwrap();
        let world = result
            .resolve_normal(NormalQuery {
                world_space: true,
                vertex_normals: false,
            })
            .unwrap();
        assert!((world.as_ref() - local.as_ref()).norm() > 1e-3);
        assert!(tol.is_unit(world.as_ref()));
    }

    #[test]
    fn test_world_space_identity_matches_local() {
        let mesh = knot();
        let result = center_hit(&mesh);
        let local = result.resolve_normal(FLAT).unwrap();
        let world = result
            .resolve_normal(NormalQuery {
                world_space: true,
                vertex_normals: false,
            })
            .unwrap();
        assert!((world.as_ref() - local.as_ref()).norm() < 1e-12);
    }

    #[test]
    fn test_face_id_out_of_range_resolves_to_none() {
        let mesh = unit_box();
        let result = PickResult::hit_on(&mesh, 12, 0.5, 0.5, 0.0, None);
        for query in ALL_QUERIES {
            assert!(result.resolve_normal(query).is_none());
        }
    }

    #[test]
    fn test_vertex_index_out_of_range_resolves_to_none() {
        let data = VertexData {
            positions: vec![0.0; 9],
            normals: Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0, 0.0, 0.0, 1.0]),
            indices: Some(vec![0, 1, 100]),
            ..Default::default()
        };
        let mesh = Mesh::new("bad", data);
        assert!(center_hit(&mesh).resolve_normal(FLAT).is_none());
        assert!(center_hit(&mesh).resolve_normal(SMOOTH).is_none());
    }

    #[test]
    fn test_degenerate_facet_resolves_to_none() {
        // The first triangle of a UV sphere has two coincident pole
        // vertices and no area.
        let data = build_sphere(&SphereOptions {
            radius: 1.0,
            latitude_segments: 4,
            longitude_segments: 8,
        })
        .unwrap();
        let mesh = Mesh::new("sphere", data);
        assert!(center_hit(&mesh).resolve_normal(FLAT).is_none());
        // Its authored normals are still fine.
        assert!(center_hit(&mesh).resolve_normal(SMOOTH).is_some());
    }

    #[test]
    fn test_degenerate_authored_normals_resolve_to_none() {
        // Opposed vertex normals that cancel at the hit location.
        let data = VertexData {
            positions: vec![0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            normals: Some(vec![0.0, 0.0, 1.0, 0.0, 0.0, -1.0, 0.0, 0.0, 1.0]),
            indices: Some(vec![0, 1, 2]),
            ..Default::default()
        };
        let mesh = Mesh::new("authoring-defect", data);
        let result = PickResult::hit_on(&mesh, 0, 0.5, 0.5, 0.0, None);
        assert!(result.resolve_normal(SMOOTH).is_none());
    }

    #[test]
    fn test_sphere_interpolated_normal_is_radial() {
        let data = build_sphere(&SphereOptions {
            radius: 2.0,
            latitude_segments: 8,
            longitude_segments: 16,
        })
        .unwrap();
        let mesh = Mesh::new("sphere", data);
        // A mid-latitude face, away from the poles.
        let face_id = (4 * 16 * 2) as u32;
        let result = PickResult::hit_on(&mesh, face_id, 0.3, 0.3, 0.0, None);
        let n = result.resolve_normal(SMOOTH).unwrap();
        // Reconstruct the hit point from the same barycentric weights and
        // check the normal is radial there.
        let indices = mesh.indices().unwrap();
        let positions = mesh.positions().unwrap();
        let [i0, i1, i2] = [
            indices[face_id as usize * 3] as usize,
            indices[face_id as usize * 3 + 1] as usize,
            indices[face_id as usize * 3 + 2] as usize,
        ];
        let fetch = |i: usize| {
            Vec3::new(
                positions[i * 3] as f64,
                positions[i * 3 + 1] as f64,
                positions[i * 3 + 2] as f64,
            )
        };
        let point = fetch(i0) * 0.3 + fetch(i1) * 0.3 + fetch(i2) * 0.4;
        let radial = point.normalize();
        assert!((n.as_ref() - radial).norm() < 0.05);
    }
}
