//! A renderable mesh: geometry snapshot plus scene placement.

use lumen_math::Transform;

use crate::{GeometrySource, VertexAttribute, VertexData};

/// A renderable surface in the scene.
///
/// Pairs a [`VertexData`] snapshot with the mesh's current world
/// transform (maintained by the scene graph). Implements
/// [`GeometrySource`] by delegation so queries such as picking stay
/// independent of where the buffers live.
#[derive(Debug, Clone)]
pub struct Mesh {
    name: String,
    data: VertexData,
    world: Transform,
}

impl Mesh {
    /// Create a mesh at the identity placement.
    pub fn new(name: impl Into<String>, data: VertexData) -> Self {
        Self {
            name: name.into(),
            data,
            world: Transform::identity(),
        }
    }

    /// Builder-style world placement.
    pub fn with_world(mut self, world: Transform) -> Self {
        self.world = world;
        self
    }

    /// Mesh name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current world transform.
    pub fn world(&self) -> &Transform {
        &self.world
    }

    /// Replace the world transform (scene-graph update).
    pub fn set_world(&mut self, world: Transform) {
        self.world = world;
    }

    /// The underlying geometry snapshot.
    pub fn data(&self) -> &VertexData {
        &self.data
    }

    /// Mutable access to the geometry snapshot.
    pub fn data_mut(&mut self) -> &mut VertexData {
        &mut self.data
    }
}

impl GeometrySource for Mesh {
    fn has_attribute(&self, attribute: VertexAttribute) -> bool {
        self.data.has_attribute(attribute)
    }

    fn positions(&self) -> Option<&[f32]> {
        self.data.positions()
    }

    fn normals(&self) -> Option<&[f32]> {
        self.data.normals()
    }

    fn uvs(&self) -> Option<&[f32]> {
        self.data.uvs()
    }

    fn indices(&self) -> Option<&[u32]> {
        self.data.indices()
    }
}
