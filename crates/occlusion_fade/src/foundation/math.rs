//! Math utilities and types
//!
//! Thin aliases over `nalgebra` plus the transform type used by the scene tree.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Transform representing position, rotation, and scale
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    /// Position in 3D space
    pub position: Vec3,

    /// Rotation quaternion
    pub rotation: Quat,

    /// Scale factors
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            position: Vec3::zeros(),
            rotation: Quat::identity(),
            scale: Vec3::new(1.0, 1.0, 1.0),
        }
    }
}

impl Transform {
    /// Create a new identity transform
    pub fn identity() -> Self {
        Self::default()
    }

    /// Create a transform with only position
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Default::default()
        }
    }

    /// Create a transform with position and rotation
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            ..Default::default()
        }
    }

    /// Set a non-uniform scale
    #[must_use]
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Apply this transform to a point
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.position + self.rotation * self.scale.component_mul(&point)
    }

    /// Combine this (parent) transform with a child transform
    ///
    /// The result maps child-local coordinates straight into this transform's
    /// parent space. Non-uniform parent scale combined with child rotation is
    /// approximated (no shear), which is what the scene tree expects.
    pub fn combine(&self, other: &Self) -> Self {
        Self {
            position: self.transform_point(other.position),
            rotation: self.rotation * other.rotation,
            scale: self.scale.component_mul(&other.scale),
        }
    }
}

/// Math utility functions
pub mod utils {
    use super::Vec3;

    /// Clamp a value between min and max
    pub fn clamp(value: f32, min: f32, max: f32) -> f32 {
        if value < min { min } else if value > max { max } else { value }
    }

    /// Component-wise linear interpolation between two vectors
    pub fn lerp_vec3(a: &Vec3, b: &Vec3, t: f32) -> Vec3 {
        a + (b - a) * t
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_transform_point_applies_scale_then_rotation_then_translation() {
        let rotation = Quat::from_axis_angle(&Vec3::y_axis(), std::f32::consts::FRAC_PI_2);
        let transform = Transform::from_position_rotation(Vec3::new(1.0, 0.0, 0.0), rotation)
            .with_scale(Vec3::new(2.0, 2.0, 2.0));

        // +X scaled to 2, rotated 90° about Y lands on -Z, then offset by +X
        let p = transform.transform_point(Vec3::new(1.0, 0.0, 0.0));
        assert_relative_eq!(p, Vec3::new(1.0, 0.0, -2.0), epsilon = 1e-5);
    }

    #[test]
    fn test_combine_parent_child() {
        let parent = Transform::from_position(Vec3::new(0.0, 2.0, 0.0));
        let child = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));

        let world = parent.combine(&child);
        assert_relative_eq!(world.position, Vec3::new(0.0, 2.0, 5.0), epsilon = 1e-6);
        assert_relative_eq!(world.scale, Vec3::new(1.0, 1.0, 1.0), epsilon = 1e-6);
    }

    #[test]
    fn test_clamp_and_lerp() {
        assert_relative_eq!(utils::clamp(3.0, 0.0, 1.0), 1.0);
        let v = utils::lerp_vec3(&Vec3::zeros(), &Vec3::new(0.0, 0.0, 10.0), 0.1);
        assert_relative_eq!(v, Vec3::new(0.0, 0.0, 1.0), epsilon = 1e-6);
    }
}
