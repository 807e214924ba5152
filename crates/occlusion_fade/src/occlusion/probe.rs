//! Line-of-sight probing and obstruction classification

use std::collections::HashSet;

use crate::foundation::math::Vec3;
use crate::physics::Ray;
use crate::scene::{ObjectId, RayIntersection, RenderLayers, SceneQuery};

/// Raw result of one target-to-camera ray cast
#[derive(Debug, Clone)]
pub struct ProbeResult {
    /// Ray from the target toward the camera
    pub ray: Ray,
    /// Distance from the target to the camera
    pub target_to_camera: f32,
    /// Every surface crossing along the ray, in the order the scene reported them
    pub hits: Vec<RayIntersection>,
}

/// Casts the line-of-sight ray
pub struct RayProbe;

impl RayProbe {
    /// Cast a ray from `target` toward `camera` through the whole scene
    ///
    /// Returns `None` when target and camera coincide and no direction exists.
    pub fn probe<S: SceneQuery + ?Sized>(
        scene: &S,
        target: Vec3,
        camera: Vec3,
        layers: RenderLayers,
    ) -> Option<ProbeResult> {
        let offset = camera - target;
        let target_to_camera = offset.magnitude();
        let direction = offset.try_normalize(f32::EPSILON)?;

        let ray = Ray { origin: target, direction };
        let hits = scene.cast_ray(&ray, layers);
        Some(ProbeResult { ray, target_to_camera, hits })
    }
}

/// Decides which hits genuinely block the view
#[derive(Debug, Clone, Copy)]
pub struct OcclusionClassifier {
    near_exclusion: f32,
}

impl OcclusionClassifier {
    /// Create a classifier ignoring hits within `near_exclusion` of the target
    pub fn new(near_exclusion: f32) -> Self {
        Self { near_exclusion: near_exclusion.max(0.0) }
    }

    /// Whether a hit at `distance` lies strictly between target and camera
    pub fn is_obstructing(&self, distance: f32, target_to_camera: f32) -> bool {
        distance > self.near_exclusion && distance > 0.0 && distance < target_to_camera
    }

    /// Obstructing objects, each listed once, in order of their first hit
    ///
    /// Objects without a material are skipped; they can never fade.
    pub fn classify<S: SceneQuery + ?Sized>(&self, probe: &ProbeResult, scene: &S) -> Vec<ObjectId> {
        let mut seen = HashSet::new();
        probe
            .hits
            .iter()
            .filter(|hit| self.is_obstructing(hit.distance, probe.target_to_camera))
            .map(|hit| hit.object)
            .filter(|object| scene.has_material(*object))
            .filter(|object| seen.insert(*object))
            .collect()
    }
}
