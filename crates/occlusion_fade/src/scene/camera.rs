//! Minimal camera: the occlusion system only needs its world position

use crate::foundation::math::Vec3;

/// A camera positioned in world space looking at a target point
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    /// Eye position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
}

impl Camera {
    /// Create a camera at `position` looking at `target`
    pub fn new(position: Vec3, target: Vec3) -> Self {
        Self { position, target }
    }

    /// Camera at `position` looking at the origin
    pub fn at(position: Vec3) -> Self {
        Self::new(position, Vec3::zeros())
    }

    /// Current world position of the eye
    pub fn world_position(&self) -> Vec3 {
        self.position
    }

    /// Unit view direction, or zero if position and target coincide
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position)
            .try_normalize(f32::EPSILON)
            .unwrap_or_else(Vec3::zeros)
    }

    /// Point the camera at a new target
    pub fn look_at(&mut self, target: Vec3) {
        self.target = target;
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(Vec3::new(0.0, 5.0, 10.0), Vec3::zeros())
    }
}
