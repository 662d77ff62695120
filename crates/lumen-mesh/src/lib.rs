#![warn(missing_docs)]

//! Mesh vertex/index buffer model for the lumen scene engine.
//!
//! A mesh is a geometry snapshot (flat `f32` attribute buffers plus a
//! `u32` triangle index buffer) paired with a world placement. Consumers
//! such as the picking core read it through the [`GeometrySource`]
//! capability trait: attribute presence is probed, never assumed, and a
//! missing buffer is a queryable outcome rather than an error.
//!
//! # Architecture
//!
//! - [`VertexData`] - attribute and index buffer storage
//! - [`GeometrySource`] - snapshot read capability interface
//! - [`Mesh`] - a renderable: vertex data + current world transform
//! - [`compute_normals`] - per-vertex normal accumulation from facets

mod error;
mod mesh;
mod vertex_data;

pub use error::MeshError;
pub use mesh::Mesh;
pub use vertex_data::{compute_normals, GeometrySource, VertexAttribute, VertexData};
