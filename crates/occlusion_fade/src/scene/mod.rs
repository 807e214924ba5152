//! Scene access for the occlusion system
//!
//! ## Architecture
//!
//! ```text
//! Frame source (render loop / tests)
//!      ↓
//! ObstructionManager ──► SceneQuery (ray casts, positions, materials)
//!      ↓                      ↑
//! Camera position         SceneTree (reference implementation)
//! ```
//!
//! The occlusion system only ever talks to the [`SceneQuery`] trait. Any
//! engine can implement it; [`SceneTree`] is a small hierarchical scene that
//! the demo and the tests use.

mod camera;
mod object;
mod scene_graph;
mod scene_tree;

pub use camera::Camera;
pub use object::{MaterialState, ObjectId, RenderLayers};
pub use scene_graph::{RayIntersection, SceneQuery};
pub use scene_tree::{NodeDesc, SceneError, SceneTree};
