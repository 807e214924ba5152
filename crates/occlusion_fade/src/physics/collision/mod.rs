//! Collision primitives and shapes
//!
//! Shapes are stored in model space and moved into world space on demand,
//! so a node can be moved every frame without rebuilding anything.

mod primitives;
mod shape;

pub use primitives::{BoundingBox, BoundingSphere, Ray};
pub use shape::{CollisionShape, WorldSpaceShape};
