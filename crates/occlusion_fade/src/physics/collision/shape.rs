//! High-level collision shape abstractions
//!
//! Shapes store their data in model space and transform to world space
//! on demand during ray tests.

use crate::foundation::math::{Quat, Transform, Vec3};
use super::primitives::{BoundingBox, BoundingSphere, Ray};

/// Collision shape types (stored in MODEL SPACE)
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CollisionShape {
    /// A sphere of the given radius around the node origin
    Sphere(f32),
    /// A box with the given half extents around the node origin
    Cuboid(Vec3),
}

impl CollisionShape {
    /// Creates a spherical collision shape with given radius
    pub fn sphere(radius: f32) -> Self {
        Self::Sphere(radius)
    }

    /// Creates a box shape from its full size along each axis
    pub fn cuboid(width: f32, height: f32, depth: f32) -> Self {
        Self::Cuboid(Vec3::new(width, height, depth) * 0.5)
    }

    /// Transform this shape to world space
    ///
    /// Sphere radii scale with the largest scale component; boxes scale per
    /// axis and keep the node rotation.
    pub fn to_world_space(&self, transform: &Transform) -> WorldSpaceShape {
        match self {
            Self::Sphere(radius) => {
                let scale = transform.scale.x.max(transform.scale.y).max(transform.scale.z);
                WorldSpaceShape::Sphere(BoundingSphere::new(transform.position, radius * scale))
            }
            Self::Cuboid(half_extents) => WorldSpaceShape::OrientedBox {
                center: transform.position,
                rotation: transform.rotation,
                half_extents: half_extents.component_mul(&transform.scale),
            },
        }
    }
}

/// World-space collision shape (temporary, for testing only)
#[derive(Debug, Clone, Copy)]
pub enum WorldSpaceShape {
    /// World-space sphere
    Sphere(BoundingSphere),
    /// World-space box that may be rotated
    OrientedBox {
        /// Box center
        center: Vec3,
        /// Box orientation
        rotation: Quat,
        /// Half size along each local axis
        half_extents: Vec3,
    },
}

impl WorldSpaceShape {
    /// Get center position
    pub fn center(&self) -> Vec3 {
        match self {
            Self::Sphere(sphere) => sphere.center,
            Self::OrientedBox { center, .. } => *center,
        }
    }

    /// Every distance along the ray where it crosses this shape's surface
    pub fn ray_crossings(&self, ray: &Ray) -> Vec<f32> {
        match self {
            Self::Sphere(sphere) => sphere.ray_crossings(ray),
            Self::OrientedBox { center, rotation, half_extents } => {
                // Rotation preserves length, so distances in box space are world distances
                let inverse = rotation.inverse();
                let local_ray = Ray {
                    origin: inverse * (ray.origin - center),
                    direction: inverse * ray.direction,
                };
                BoundingBox::from_center_extents(Vec3::zeros(), *half_extents).ray_crossings(&local_ray)
            }
        }
    }
}
