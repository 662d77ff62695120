//! World-space normal projection.

use lumen_math::{Dir3, Mat3, Mat4, Transform, Vec3};

use crate::resolve::DEGENERATE_EPS;

/// Map a local-space normal into world space and re-normalize.
///
/// Applies the inverse transpose of the world transform's 3x3 linear
/// block; without it, non-uniform scale or shear would tilt the normal
/// off the surface. Returns `None` for a degenerate input normal. For
/// many picks against the same frame, prefer [`NormalProjector`].
pub fn project_normal_to_world(normal: &Vec3, world: &Transform) -> Option<Dir3> {
    let mapped = world.apply_normal(normal);
    if mapped.norm_squared() < DEGENERATE_EPS {
        return None;
    }
    Some(Dir3::new_normalize(mapped))
}

/// Caches the inverse-transpose mapping per world-matrix value.
///
/// Per-frame pick bursts resolve many normals against the same handful
/// of world matrices; inverting a matrix per normal would dominate the
/// query cost. The cache key is the full matrix value, so a scene-graph
/// update naturally invalidates it on the next call.
#[derive(Debug, Default)]
pub struct NormalProjector {
    cached: Option<(Mat4, Mat3)>,
}

impl NormalProjector {
    /// Create a projector with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Map `normal` through `world`'s inverse-transpose, reusing the
    /// cached matrix when `world` is unchanged since the previous call.
    ///
    /// The result is unnormalized, like [`Transform::apply_normal`];
    /// callers re-normalize once after any further blending. A singular
    /// world matrix leaves the normal unmapped.
    pub fn project(&mut self, world: &Transform, normal: &Vec3) -> Vec3 {
        if let Some((key, inv_t)) = &self.cached {
            if *key == world.matrix {
                return inv_t * normal;
            }
        }
        let inv_t = world
            .linear_inverse_transpose()
            .unwrap_or_else(Mat3::identity);
        let mapped = inv_t * normal;
        self.cached = Some((world.matrix, inv_t));
        mapped
    }
}
