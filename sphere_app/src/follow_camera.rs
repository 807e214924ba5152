//! Spring-damped chase camera

use occlusion_fade::foundation::math::{utils, Vec3};
use occlusion_fade::scene::Camera;

/// Keeps the camera at a fixed offset from a target, easing toward it
#[derive(Debug, Clone, Copy)]
pub struct FollowCamera {
    offset: Vec3,
    springiness: f32,
}

impl FollowCamera {
    /// `springiness` is clamped to `[0, 1]`; 1 snaps immediately
    pub fn new(offset: Vec3, springiness: f32) -> Self {
        Self {
            offset,
            springiness: utils::clamp(springiness, 0.0, 1.0),
        }
    }

    /// Camera placed exactly at its resting spot behind `target`
    pub fn spawn(&self, target: Vec3) -> Camera {
        Camera::new(target + self.offset, target)
    }

    /// Move the camera one step toward its resting spot and look at `target`
    pub fn update(&self, camera: &mut Camera, target: Vec3) {
        let desired = target + self.offset;
        camera.position = utils::lerp_vec3(&camera.position, &desired, self.springiness);
        camera.look_at(target);
    }
}
