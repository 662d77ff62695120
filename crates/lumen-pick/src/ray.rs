//! Ray representation.

use lumen_math::{Dir3, Point3, Vec3};

/// A ray in 3D space defined by origin and unit direction.
///
/// Picking carries the originating ray on the result for callers that
/// need it (e.g. to re-derive the hit point at a different distance);
/// the intersection algorithms themselves live with the search, not here.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray {
    /// Origin point of the ray.
    pub origin: Point3,
    /// Unit direction of the ray.
    pub direction: Dir3,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: Dir3::new_normalize(direction),
        }
    }

    /// Evaluate the ray at parameter `t`: `origin + t * direction`.
    #[inline]
    pub fn at(&self, t: f64) -> Point3 {
        self.origin + t * self.direction.as_ref()
    }
}
