//! Geometric queries used by the scene tree
//!
//! Only ray casting is needed here; there is no rigid-body simulation.

pub mod collision;

pub use collision::{BoundingBox, BoundingSphere, CollisionShape, Ray, WorldSpaceShape};
