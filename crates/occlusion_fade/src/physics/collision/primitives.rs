//! Basic collision primitives and their ray tests
//!
//! Ray tests report every surface crossing in front of the origin, not just
//! the nearest one: a ray passing straight through a sphere yields both the
//! entry and the exit distance.

use crate::foundation::math::Vec3;

/// A ray for intersection testing
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    /// The origin point of the ray in world space
    pub origin: Vec3,
    /// The direction of the ray (normalized on construction)
    pub direction: Vec3,
}

impl Ray {
    /// Creates a new ray with the given origin and direction
    pub fn new(origin: Vec3, direction: Vec3) -> Self {
        Self {
            origin,
            direction: direction.normalize(),
        }
    }

    /// Get a point along the ray at distance t
    pub fn point_at(&self, t: f32) -> Vec3 {
        self.origin + self.direction * t
    }
}

/// A bounding sphere for collision detection
#[derive(Debug, Clone, Copy)]
pub struct BoundingSphere {
    /// The center position of the sphere in world space
    pub center: Vec3,
    /// The radius of the sphere
    pub radius: f32,
}

impl BoundingSphere {
    /// Creates a new bounding sphere with the given center and radius
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self { center, radius }
    }

    /// Distances along the ray where it crosses the sphere surface
    ///
    /// Crossings behind the origin are dropped. A tangent ray yields one
    /// crossing, a miss yields none.
    pub fn ray_crossings(&self, ray: &Ray) -> Vec<f32> {
        // Solve: |origin + t*direction - center|^2 = radius^2
        let oc = ray.origin - self.center;
        let a = ray.direction.dot(&ray.direction);
        let b = 2.0 * oc.dot(&ray.direction);
        let c = oc.dot(&oc) - self.radius * self.radius;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return Vec::new();
        }

        let sqrt_discriminant = discriminant.sqrt();
        let t1 = (-b - sqrt_discriminant) / (2.0 * a);
        let t2 = (-b + sqrt_discriminant) / (2.0 * a);

        let mut crossings = Vec::with_capacity(2);
        if t1 > 0.0 {
            crossings.push(t1);
        }
        if t2 > 0.0 && t2 > t1 {
            crossings.push(t2);
        }
        crossings
    }
}

/// Axis-aligned box given by its min and max corners
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    /// Minimum corner of the box
    pub min: Vec3,
    /// Maximum corner of the box
    pub max: Vec3,
}

impl BoundingBox {
    /// Create a new box from min and max points
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Create a box centered at a point with given half extents
    pub fn from_center_extents(center: Vec3, extents: Vec3) -> Self {
        Self {
            min: center - extents,
            max: center + extents,
        }
    }

    /// Check if this box contains a point
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x && point.x <= self.max.x &&
        point.y >= self.min.y && point.y <= self.max.y &&
        point.z >= self.min.z && point.z <= self.max.z
    }

    /// Distances along the ray where it enters and leaves the box
    ///
    /// Slab method, after "An Efficient and Robust Ray–Box Intersection
    /// Algorithm". A ray starting inside the box reports only its exit.
    pub fn ray_crossings(&self, ray: &Ray) -> Vec<f32> {
        let inv_dir = Vec3::new(
            if ray.direction.x != 0.0 { 1.0 / ray.direction.x } else { f32::INFINITY },
            if ray.direction.y != 0.0 { 1.0 / ray.direction.y } else { f32::INFINITY },
            if ray.direction.z != 0.0 { 1.0 / ray.direction.z } else { f32::INFINITY },
        );

        let t1 = (self.min.x - ray.origin.x) * inv_dir.x;
        let t2 = (self.max.x - ray.origin.x) * inv_dir.x;
        let t3 = (self.min.y - ray.origin.y) * inv_dir.y;
        let t4 = (self.max.y - ray.origin.y) * inv_dir.y;
        let t5 = (self.min.z - ray.origin.z) * inv_dir.z;
        let t6 = (self.max.z - ray.origin.z) * inv_dir.z;

        let tmin = t1.min(t2).max(t3.min(t4)).max(t5.min(t6));
        let tmax = t1.max(t2).min(t3.max(t4)).min(t5.max(t6));

        let mut crossings = Vec::with_capacity(2);
        if tmax < tmin || tmax <= 0.0 {
            return crossings;
        }
        if tmin > 0.0 {
            crossings.push(tmin);
        }
        if tmax > tmin {
            crossings.push(tmax);
        }
        crossings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_normalizes_direction() {
        let ray = Ray::new(Vec3::zeros(), Vec3::new(0.0, 0.0, 10.0));
        assert_relative_eq!(ray.direction.magnitude(), 1.0, epsilon = 1e-6);
        assert_relative_eq!(ray.point_at(2.0), Vec3::new(0.0, 0.0, 2.0), epsilon = 1e-6);
    }

    #[test]
    fn test_sphere_reports_entry_and_exit() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 0.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());

        let crossings = sphere.ray_crossings(&ray);
        assert_eq!(crossings.len(), 2);
        assert_relative_eq!(crossings[0], 4.0, epsilon = 1e-5);
        assert_relative_eq!(crossings[1], 6.0, epsilon = 1e-5);
    }

    #[test]
    fn test_sphere_miss_and_behind() {
        let sphere = BoundingSphere::new(Vec3::new(0.0, 3.0, 5.0), 1.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::z());
        assert!(sphere.ray_crossings(&ray).is_empty());

        let behind = BoundingSphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0);
        assert!(behind.ray_crossings(&ray).is_empty());
    }

    #[test]
    fn test_sphere_origin_inside_reports_exit_only() {
        let sphere = BoundingSphere::new(Vec3::zeros(), 2.0);
        let ray = Ray::new(Vec3::zeros(), Vec3::x());

        let crossings = sphere.ray_crossings(&ray);
        assert_eq!(crossings.len(), 1);
        assert_relative_eq!(crossings[0], 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_box_entry_and_exit() {
        let bbox = BoundingBox::from_center_extents(Vec3::new(0.0, 0.0, 5.0), Vec3::new(0.5, 0.5, 0.5));
        let ray = Ray::new(Vec3::zeros(), Vec3::z());

        let crossings = bbox.ray_crossings(&ray);
        assert_eq!(crossings.len(), 2);
        assert_relative_eq!(crossings[0], 4.5, epsilon = 1e-5);
        assert_relative_eq!(crossings[1], 5.5, epsilon = 1e-5);
        assert!(bbox.contains_point(Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn test_box_miss() {
        let bbox = BoundingBox::from_center_extents(Vec3::new(3.0, 0.0, 5.0), Vec3::new(0.5, 0.5, 0.5));
        let ray = Ray::new(Vec3::new(0.0, 0.1, 0.0), Vec3::z());
        assert!(bbox.ray_crossings(&ray).is_empty());
    }
}
