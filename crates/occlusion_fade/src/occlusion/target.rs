//! Target resolution

use crate::foundation::math::Vec3;
use crate::scene::{ObjectId, SceneQuery};

/// What the camera should keep in view
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TrackedTarget {
    /// A scene node whose current world position is read every admitted frame
    Node(ObjectId),
    /// A fixed point in world space
    Point(Vec3),
}

impl From<ObjectId> for TrackedTarget {
    fn from(id: ObjectId) -> Self {
        Self::Node(id)
    }
}

impl From<Vec3> for TrackedTarget {
    fn from(point: Vec3) -> Self {
        Self::Point(point)
    }
}

/// Turns a tracked target into a world-space position
pub struct TargetResolver;

impl TargetResolver {
    /// Resolve the target against the scene as it is right now
    ///
    /// Returns `None` when there is no target, the node no longer exists,
    /// or the position is not finite. Callers skip the frame in that case.
    pub fn resolve<S: SceneQuery + ?Sized>(target: Option<&TrackedTarget>, scene: &S) -> Option<Vec3> {
        let position = match target? {
            TrackedTarget::Node(id) => scene.world_position(*id)?,
            TrackedTarget::Point(point) => *point,
        };
        position.iter().all(|c| c.is_finite()).then_some(position)
    }
}
