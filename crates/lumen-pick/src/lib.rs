#![warn(missing_docs)]

//! Surface-pick result model and normal resolution for the lumen scene
//! engine.
//!
//! The intersection search (broad/narrow phase, nearest-hit selection)
//! lives elsewhere; this crate consumes its output (which mesh, which
//! triangle, where inside it) and answers the one question downstream
//! code keeps asking: *what is the surface normal at the hit point?*
//!
//! # Architecture
//!
//! - [`Ray`] - the query ray, carried on the result as data
//! - [`PickResult`] - the hit record produced by the intersection search
//! - [`PickResult::resolve_normal`] - flat or interpolated normal at the
//!   hit, optionally mapped into world space
//! - [`NormalProjector`] - cached world-space normal mapping for many
//!   picks against one frame
//!
//! Resolution is a pure query: missing data (no hit, no index buffer, no
//! normal attribute) is a `None` outcome, never an error or a panic.

mod project;
mod ray;
mod resolve;
mod result;

pub use project::{project_normal_to_world, NormalProjector};
pub use ray::Ray;
pub use resolve::{flat_normal, interpolated_normal};
pub use result::{NormalQuery, PickResult};
