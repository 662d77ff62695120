#![warn(missing_docs)]

//! Surface-picking facade for the lumen scene engine.
//!
//! Re-exports the engine's mesh model, procedural shape builders, and the
//! pick-result/normal-resolution core behind one crate.
//!
//! # Example
//!
//! ```
//! use lumen::{build_box, BoxOptions, Mesh, NormalQuery, PickResult};
//!
//! // Geometry the intersection search reported a hit on.
//! let mesh = Mesh::new("box", build_box(&BoxOptions::cube(1.0)).unwrap());
//!
//! // The hit: triangle 0, barycentric center of its long edge.
//! let hit = PickResult::hit_on(&mesh, 0, 0.5, 0.5, 0.0, None);
//!
//! let normal = hit.resolve_normal(NormalQuery::default()).unwrap();
//! assert!((normal.z - 1.0).abs() < 1e-5);
//! ```

pub use lumen_math;
pub use lumen_mesh;
pub use lumen_pick;
pub use lumen_shapes;

pub use lumen_math::{Dir3, Mat3, Mat4, Point3, Tolerance, Transform, Vec3};
pub use lumen_mesh::{
    compute_normals, GeometrySource, Mesh, MeshError, VertexAttribute, VertexData,
};
pub use lumen_pick::{
    flat_normal, interpolated_normal, project_normal_to_world, NormalProjector, NormalQuery,
    PickResult, Ray,
};
pub use lumen_shapes::{
    build_box, build_sphere, build_torus_knot, BoxOptions, ShapeError, SphereOptions,
    TorusKnotOptions,
};
