#![warn(missing_docs)]

//! Math types for the lumen scene engine.
//!
//! Thin wrappers around nalgebra providing the types the engine's
//! geometry and picking layers share: points, vectors, unit directions,
//! and affine placement transforms. All engine math is `f64`; GPU-facing
//! vertex buffers quantize to `f32` at the mesh layer.

use nalgebra::{Matrix3, Matrix4, Unit, Vector3, Vector4};

/// A point in 3D space.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A 3x3 linear transformation matrix.
pub type Mat3 = Matrix3<f64>;

/// A 4x4 homogeneous transformation matrix.
pub type Mat4 = Matrix4<f64>;

/// An object's placement in the scene: a 4x4 affine transform mapping
/// local (object) space into world space.
#[derive(Debug, Clone, PartialEq)]
pub struct Transform {
    /// The underlying 4x4 matrix, column-major.
    pub matrix: Mat4,
}

impl Transform {
    /// Identity transform (local space == world space).
    pub fn identity() -> Self {
        Self {
            matrix: Mat4::identity(),
        }
    }

    /// Wrap an existing 4x4 matrix.
    pub fn from_matrix(matrix: Mat4) -> Self {
        Self { matrix }
    }

    /// Translation by `(dx, dy, dz)`.
    pub fn translation(dx: f64, dy: f64, dz: f64) -> Self {
        let mut m = Mat4::identity();
        m[(0, 3)] = dx;
        m[(1, 3)] = dy;
        m[(2, 3)] = dz;
        Self { matrix: m }
    }

    /// Non-uniform scale by `(sx, sy, sz)`.
    pub fn scale(sx: f64, sy: f64, sz: f64) -> Self {
        let mut m = Mat4::identity();
        m[(0, 0)] = sx;
        m[(1, 1)] = sy;
        m[(2, 2)] = sz;
        Self { matrix: m }
    }

    /// Uniform scale by `s` on all three axes.
    pub fn uniform_scale(s: f64) -> Self {
        Self::scale(s, s, s)
    }

    /// Rotation about the X axis by `angle` radians.
    pub fn rotation_x(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::identity();
        m[(1, 1)] = c;
        m[(1, 2)] = -s;
        m[(2, 1)] = s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Y axis by `angle` radians.
    pub fn rotation_y(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::identity();
        m[(0, 0)] = c;
        m[(0, 2)] = s;
        m[(2, 0)] = -s;
        m[(2, 2)] = c;
        Self { matrix: m }
    }

    /// Rotation about the Z axis by `angle` radians.
    pub fn rotation_z(angle: f64) -> Self {
        let (s, c) = angle.sin_cos();
        let mut m = Mat4::identity();
        m[(0, 0)] = c;
        m[(0, 1)] = -s;
        m[(1, 0)] = s;
        m[(1, 1)] = c;
        Self { matrix: m }
    }

    /// Compose: apply `other` first, then `self` (matrix product `self * other`).
    pub fn then(&self, other: &Transform) -> Self {
        Self {
            matrix: self.matrix * other.matrix,
        }
    }

    /// Transform a point (applies rotation, scale, and translation).
    pub fn apply_point(&self, p: &Point3) -> Point3 {
        let v = self.matrix * Vector4::new(p.x, p.y, p.z, 1.0);
        Point3::new(v.x, v.y, v.z)
    }

    /// Transform a direction vector (ignores translation).
    pub fn apply_vec(&self, v: &Vec3) -> Vec3 {
        let r = self.matrix * Vector4::new(v.x, v.y, v.z, 0.0);
        Vec3::new(r.x, r.y, r.z)
    }

    /// Transform a normal vector.
    ///
    /// Normals transform by the inverse transpose of the upper-left 3x3
    /// block; under non-uniform scale or shear the direct mapping would
    /// tilt them off the surface. The result is not re-normalized here.
    pub fn apply_normal(&self, n: &Vec3) -> Vec3 {
        match self.linear_inverse_transpose() {
            Some(m) => m * n,
            // Singular linear part: leave the normal unmapped
            None => *n,
        }
    }

    /// Inverse transpose of the upper-left 3x3 block, or `None` if the
    /// linear part is singular.
    pub fn linear_inverse_transpose(&self) -> Option<Mat3> {
        let m3 = self.matrix.fixed_view::<3, 3>(0, 0);
        m3.try_inverse().map(|inv| inv.transpose())
    }

    /// Inverse of this transform, if it exists.
    pub fn inverse(&self) -> Option<Self> {
        self.matrix.try_inverse().map(|matrix| Self { matrix })
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear distance tolerance in scene units.
    pub linear: f64,
    /// Unit-length tolerance for normalized vectors.
    pub unit_length: f64,
}

impl Tolerance {
    /// Default engine tolerances (1e-7 linear, 1e-5 unit length).
    pub const DEFAULT: Self = Self {
        linear: 1e-7,
        unit_length: 1e-5,
    };

    /// Check if a scalar distance is effectively zero.
    pub fn is_zero(&self, d: f64) -> bool {
        d.abs() < self.linear
    }

    /// Check if two vectors are equal within the linear tolerance.
    pub fn vecs_equal(&self, a: &Vec3, b: &Vec3) -> bool {
        (a - b).norm() < self.linear
    }

    /// Check if a vector has unit length within tolerance.
    pub fn is_unit(&self, v: &Vec3) -> bool {
        (v.norm() - 1.0).abs() < self.unit_length
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
