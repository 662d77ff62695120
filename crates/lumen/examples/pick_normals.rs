//! Resolve flat, smooth, and world-space normals for a simulated pick.

use lumen::{
    build_torus_knot, Mesh, NormalQuery, PickResult, TorusKnotOptions, Transform,
};

fn main() {
    let options = TorusKnotOptions {
        radius: 10.0,
        tube: 3.0,
        radial_segments: 32,
        tubular_segments: 8,
        p: 2,
        q: 3,
    };
    let mesh = Mesh::new("knot", build_torus_knot(&options).unwrap())
        .with_world(Transform::scale(2.0, 1.0, 1.0));

    // A hit as the intersection search would deliver it: triangle 0,
    // barycentric location (0.5, 0.5).
    let hit = PickResult::hit_on(&mesh, 0, 0.5, 0.5, 0.0, None);

    let flat = hit.resolve_normal(NormalQuery::default()).unwrap();
    println!("flat   local: ({:+.3}, {:+.3}, {:+.3})", flat.x, flat.y, flat.z);

    let smooth = hit
        .resolve_normal(NormalQuery {
            vertex_normals: true,
            ..Default::default()
        })
        .unwrap();
    println!("smooth local: ({:+.3}, {:+.3}, {:+.3})", smooth.x, smooth.y, smooth.z);

    let world = hit
        .resolve_normal(NormalQuery {
            world_space: true,
            vertex_normals: true,
        })
        .unwrap();
    println!("smooth world: ({:+.3}, {:+.3}, {:+.3})", world.x, world.y, world.z);
}
