//! The collaborator seam between the occlusion system and a scene

use crate::foundation::math::Vec3;
use crate::physics::Ray;
use super::object::{MaterialState, ObjectId, RenderLayers};

/// One surface crossing reported by a ray cast
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RayIntersection {
    /// Object whose surface was crossed
    pub object: ObjectId,
    /// Distance from the ray origin to the crossing
    pub distance: f32,
}

/// Scene operations the occlusion system depends on
///
/// Implementors own the objects. The occlusion system borrows write access
/// to a material only for the duration of a single call.
pub trait SceneQuery {
    /// Cast a ray through the whole scene, recursing into groups
    ///
    /// Must report every crossing of objects whose layers intersect `layers`,
    /// including several records for the same object. Order is not relied on.
    fn cast_ray(&self, ray: &Ray, layers: RenderLayers) -> Vec<RayIntersection>;

    /// Current world position of an object, or `None` if it no longer exists
    fn world_position(&self, id: ObjectId) -> Option<Vec3>;

    /// Material of an object, `None` when it has no material capability
    fn material(&self, id: ObjectId) -> Option<&MaterialState>;

    /// Mutable material of an object, `None` when it has no material capability
    fn material_mut(&mut self, id: ObjectId) -> Option<&mut MaterialState>;

    /// Whether an object can be faded at all
    fn has_material(&self, id: ObjectId) -> bool {
        self.material(id).is_some()
    }
}
