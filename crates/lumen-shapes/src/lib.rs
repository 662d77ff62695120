#![warn(missing_docs)]

//! Procedural mesh builders for the lumen scene engine.
//!
//! Builds [`VertexData`] for the standard parametric shapes: axis-aligned
//! box, UV sphere, and (p, q) torus knot. Box and sphere author their
//! normals analytically; the torus knot derives them from its facets via
//! [`compute_normals`].
//!
//! All builders wind triangles so that `cross(p0 - p1, p2 - p1)` points
//! outward, the facet convention shared with normal accumulation and
//! flat-shaded picking.

use std::f64::consts::PI;

use lumen_math::Vec3;
use lumen_mesh::{compute_normals, VertexData};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors reported for invalid builder parameters.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A segment count is below the minimum needed to close the shape.
    #[error("segment count too low: {name} = {value}, minimum {min}")]
    SegmentCount {
        /// Parameter name.
        name: &'static str,
        /// Provided value.
        value: u32,
        /// Minimum accepted value.
        min: u32,
    },

    /// A length parameter that must be strictly positive is not.
    #[error("dimension must be positive: {name} = {value}")]
    NonPositiveDimension {
        /// Parameter name.
        name: &'static str,
        /// Provided value.
        value: f64,
    },
}

fn check_positive(name: &'static str, value: f64) -> Result<(), ShapeError> {
    if value > 0.0 {
        Ok(())
    } else {
        Err(ShapeError::NonPositiveDimension { name, value })
    }
}

fn check_segments(name: &'static str, value: u32, min: u32) -> Result<(), ShapeError> {
    if value >= min {
        Ok(())
    } else {
        Err(ShapeError::SegmentCount { name, value, min })
    }
}

// =============================================================================
// Box
// =============================================================================

/// Parameters for [`build_box`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoxOptions {
    /// Extent along X.
    pub width: f64,
    /// Extent along Y.
    pub height: f64,
    /// Extent along Z.
    pub depth: f64,
}

impl BoxOptions {
    /// A cube with equal extents.
    pub fn cube(size: f64) -> Self {
        Self {
            width: size,
            height: size,
            depth: size,
        }
    }
}

impl Default for BoxOptions {
    fn default() -> Self {
        Self::cube(1.0)
    }
}

/// Build an axis-aligned box centered at the origin.
///
/// 24 vertices (4 per face) so each face carries its own authored normal,
/// 12 triangles. Face order: +Z, -Z, +X, -X, +Y, -Y; face 0's first
/// triangle is therefore on the +Z side.
pub fn build_box(options: &BoxOptions) -> Result<VertexData, ShapeError> {
    check_positive("width", options.width)?;
    check_positive("height", options.height)?;
    check_positive("depth", options.depth)?;

    let hx = Vec3::new(options.width / 2.0, 0.0, 0.0);
    let hy = Vec3::new(0.0, options.height / 2.0, 0.0);
    let hz = Vec3::new(0.0, 0.0, options.depth / 2.0);

    // Per face: (outward normal, quad axes). The quad
    // [c + t1 + t2, c + t1 - t2, c - t1 - t2, c - t1 + t2] with
    // t1 x t2 along the normal gives outward-facing winding.
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::z(), hx, hy),
        (-Vec3::z(), hy, hx),
        (Vec3::x(), hy, hz),
        (-Vec3::x(), hz, hy),
        (Vec3::y(), hz, hx),
        (-Vec3::y(), hx, hz),
    ];

    let mut positions = Vec::with_capacity(24 * 3);
    let mut normals = Vec::with_capacity(24 * 3);
    let mut uvs = Vec::with_capacity(24 * 2);
    let mut indices = Vec::with_capacity(36);

    for (normal, t1, t2) in faces {
        let center = Vec3::new(
            normal.x * hx.x.abs(),
            normal.y * hy.y.abs(),
            normal.z * hz.z.abs(),
        );
        let corners = [
            center + t1 + t2,
            center + t1 - t2,
            center - t1 - t2,
            center - t1 + t2,
        ];
        let corner_uvs = [[1.0, 1.0], [1.0, 0.0], [0.0, 0.0], [0.0, 1.0]];

        let base = (positions.len() / 3) as u32;
        for (corner, uv) in corners.iter().zip(corner_uvs) {
            positions.extend_from_slice(&[corner.x as f32, corner.y as f32, corner.z as f32]);
            normals.extend_from_slice(&[normal.x as f32, normal.y as f32, normal.z as f32]);
            uvs.extend_from_slice(&[uv[0] as f32, uv[1] as f32]);
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    Ok(VertexData {
        positions,
        normals: Some(normals),
        uvs: Some(uvs),
        indices: Some(indices),
    })
}

// =============================================================================
// Sphere
// =============================================================================

/// Parameters for [`build_sphere`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct SphereOptions {
    /// Sphere radius.
    pub radius: f64,
    /// Number of latitude bands (pole to pole).
    pub latitude_segments: u32,
    /// Number of longitude segments around the equator.
    pub longitude_segments: u32,
}

impl Default for SphereOptions {
    fn default() -> Self {
        Self {
            radius: 1.0,
            latitude_segments: 16,
            longitude_segments: 32,
        }
    }
}

/// Build a UV sphere centered at the origin, poles on the Y axis.
///
/// Normals are authored radially (exact), not accumulated from facets.
pub fn build_sphere(options: &SphereOptions) -> Result<VertexData, ShapeError> {
    check_positive("radius", options.radius)?;
    check_segments("latitude_segments", options.latitude_segments, 2)?;
    check_segments("longitude_segments", options.longitude_segments, 3)?;

    let lat = options.latitude_segments as usize;
    let lon = options.longitude_segments as usize;
    let vertex_count = (lat + 1) * (lon + 1);

    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut normals = Vec::with_capacity(vertex_count * 3);
    let mut uvs = Vec::with_capacity(vertex_count * 2);

    for i in 0..=lat {
        let theta = i as f64 / lat as f64 * PI;
        for j in 0..=lon {
            let phi = j as f64 / lon as f64 * 2.0 * PI;
            let dir = Vec3::new(
                theta.sin() * phi.cos(),
                theta.cos(),
                theta.sin() * phi.sin(),
            );
            let p = dir * options.radius;
            positions.extend_from_slice(&[p.x as f32, p.y as f32, p.z as f32]);
            normals.extend_from_slice(&[dir.x as f32, dir.y as f32, dir.z as f32]);
            uvs.extend_from_slice(&[
                (j as f64 / lon as f64) as f32,
                (1.0 - i as f64 / lat as f64) as f32,
            ]);
        }
    }

    let mut indices = Vec::with_capacity(lat * lon * 6);
    for i in 0..lat {
        for j in 0..lon {
            let a = (i * (lon + 1) + j) as u32;
            let b = a + 1;
            let c = a + (lon + 1) as u32;
            let d = c + 1;
            indices.extend_from_slice(&[a, c, b, b, c, d]);
        }
    }

    Ok(VertexData {
        positions,
        normals: Some(normals),
        uvs: Some(uvs),
        indices: Some(indices),
    })
}

// =============================================================================
// Torus knot
// =============================================================================

/// Parameters for [`build_torus_knot`].
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TorusKnotOptions {
    /// Overall knot radius.
    pub radius: f64,
    /// Tube radius.
    pub tube: f64,
    /// Sample stations along the knot centerline.
    pub radial_segments: u32,
    /// Ring vertices around the tube at each station.
    pub tubular_segments: u32,
    /// Windings around the torus axis of symmetry.
    pub p: u32,
    /// Windings through the torus hole.
    pub q: u32,
}

impl Default for TorusKnotOptions {
    fn default() -> Self {
        Self {
            radius: 2.0,
            tube: 0.5,
            radial_segments: 32,
            tubular_segments: 32,
            p: 2,
            q: 3,
        }
    }
}

/// Build a (p, q) torus knot tube.
///
/// The centerline is sampled at `radial_segments` stations (plus a
/// duplicated seam ring for the UV wrap); the tube frame at each station
/// comes from a finite-difference tangent. Normals are accumulated from
/// the facets, so shading is smooth around the tube.
pub fn build_torus_knot(options: &TorusKnotOptions) -> Result<VertexData, ShapeError> {
    check_positive("radius", options.radius)?;
    check_positive("tube", options.tube)?;
    check_segments("radial_segments", options.radial_segments, 3)?;
    check_segments("tubular_segments", options.tubular_segments, 3)?;
    check_segments("p", options.p, 1)?;
    check_segments("q", options.q, 1)?;

    let radial = options.radial_segments as usize;
    let tubular = options.tubular_segments as usize;
    let p = options.p as f64;
    let q = options.q as f64;
    let radius = options.radius;
    let tube = options.tube;

    // Knot centerline.
    let center = |angle: f64| -> Vec3 {
        let cu = angle.cos();
        let su = angle.sin();
        let winding = q / p * angle;
        let cs = winding.cos();
        Vec3::new(
            radius * (2.0 + cs) * 0.5 * cu,
            radius * (2.0 + cs) * su * 0.5,
            radius * winding.sin() * 0.5,
        )
    };

    let vertex_count = (radial + 1) * tubular;
    let mut positions = Vec::with_capacity(vertex_count * 3);
    let mut uvs = Vec::with_capacity(vertex_count * 2);

    for i in 0..=radial {
        let u = (i % radial) as f64 / radial as f64 * 2.0 * p * PI;
        let p1 = center(u);
        let p2 = center(u + 0.01);
        let tangent = p2 - p1;
        let outward = p2 + p1;
        let binormal = tangent.cross(&outward);
        let normal = binormal.cross(&tangent);
        let binormal = binormal.normalize();
        let normal = normal.normalize();

        for j in 0..tubular {
            let v = j as f64 / tubular as f64 * 2.0 * PI;
            let cx = -tube * v.cos();
            let cy = tube * v.sin();
            let point = p1 + normal * cx + binormal * cy;
            positions.extend_from_slice(&[point.x as f32, point.y as f32, point.z as f32]);
            uvs.extend_from_slice(&[
                (i as f64 / radial as f64) as f32,
                (j as f64 / tubular as f64) as f32,
            ]);
        }
    }

    let mut indices = Vec::with_capacity(radial * tubular * 6);
    for i in 0..radial {
        for j in 0..tubular {
            let j_next = (j + 1) % tubular;
            let a = (i * tubular + j) as u32;
            let b = ((i + 1) * tubular + j) as u32;
            let c = ((i + 1) * tubular + j_next) as u32;
            let d = (i * tubular + j_next) as u32;
            indices.extend_from_slice(&[d, b, a]);
            indices.extend_from_slice(&[d, c, b]);
        }
    }

    let normals = compute_normals(&positions, &indices);

    Ok(VertexData {
        positions,
        normals: Some(normals),
        uvs: Some(uvs),
        indices: Some(indices),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_mesh::GeometrySource;

    #[test]
    fn test_box_structure() {
        let data = build_box(&BoxOptions::cube(1.0)).unwrap();
        assert_eq!(data.num_vertices(), 24);
        assert_eq!(data.num_triangles(), 12);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_box_face0_is_positive_z() {
        let data = build_box(&BoxOptions::cube(1.0)).unwrap();
        let normals = data.normals().unwrap();
        assert_eq!(&normals[0..3], &[0.0, 0.0, 1.0]);
        let positions = data.positions().unwrap();
        // All face-0 vertices sit on the z = +0.5 plane.
        for vertex in positions[0..12].chunks_exact(3) {
            assert!((vertex[2] - 0.5).abs() < 1e-6);
        }
    }

    #[test]
    fn test_box_authored_normals_match_facets() {
        // Each box vertex belongs to one face, so accumulation reproduces
        // the authored normals exactly.
        let data = build_box(&BoxOptions {
            width: 2.0,
            height: 3.0,
            depth: 4.0,
        })
        .unwrap();
        let computed = compute_normals(
            data.positions().unwrap(),
            data.indices().unwrap(),
        );
        for (a, b) in computed.iter().zip(data.normals().unwrap()) {
            assert!((a - b).abs() < 1e-6);
        }
    }

    #[test]
    fn test_box_rejects_flat_extent() {
        let err = build_box(&BoxOptions {
            width: 0.0,
            height: 1.0,
            depth: 1.0,
        })
        .unwrap_err();
        assert!(matches!(err, ShapeError::NonPositiveDimension { name: "width", .. }));
    }

    #[test]
    fn test_sphere_structure() {
        let options = SphereOptions {
            radius: 2.0,
            latitude_segments: 8,
            longitude_segments: 16,
        };
        let data = build_sphere(&options).unwrap();
        assert_eq!(data.num_vertices(), 9 * 17);
        assert_eq!(data.num_triangles(), 8 * 16 * 2);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_sphere_normals_are_radial() {
        let data = build_sphere(&SphereOptions::default()).unwrap();
        let positions = data.positions().unwrap();
        let normals = data.normals().unwrap();
        for (p, n) in positions.chunks_exact(3).zip(normals.chunks_exact(3)) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-5);
            // position == normal * radius
            assert!((p[0] - n[0]).abs() < 1e-5);
            assert!((p[1] - n[1]).abs() < 1e-5);
            assert!((p[2] - n[2]).abs() < 1e-5);
        }
    }

    #[test]
    fn test_sphere_rejects_degenerate_bands() {
        let err = build_sphere(&SphereOptions {
            radius: 1.0,
            latitude_segments: 1,
            longitude_segments: 16,
        })
        .unwrap_err();
        assert_eq!(
            err,
            ShapeError::SegmentCount {
                name: "latitude_segments",
                value: 1,
                min: 2
            }
        );
    }

    #[test]
    fn test_torus_knot_structure() {
        let options = TorusKnotOptions {
            radius: 10.0,
            tube: 3.0,
            radial_segments: 32,
            tubular_segments: 8,
            p: 2,
            q: 3,
        };
        let data = build_torus_knot(&options).unwrap();
        assert_eq!(data.num_vertices(), 33 * 8);
        assert_eq!(data.num_triangles(), 32 * 8 * 2);
        assert!(data.validate().is_ok());
    }

    #[test]
    fn test_torus_knot_normals_are_unit() {
        let data = build_torus_knot(&TorusKnotOptions::default()).unwrap();
        for n in data.normals().unwrap().chunks_exact(3) {
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_torus_knot_rejects_open_tube() {
        let err = build_torus_knot(&TorusKnotOptions {
            tubular_segments: 2,
            ..Default::default()
        })
        .unwrap_err();
        assert!(matches!(
            err,
            ShapeError::SegmentCount {
                name: "tubular_segments",
                ..
            }
        ));
    }
}
