//! Scenario tests driving the whole occlusion pipeline against a scene tree

mod teardown;

use crate::foundation::math::Vec3;
use crate::physics::CollisionShape;
use crate::scene::{MaterialState, NodeDesc, ObjectId, SceneTree};

/// Add a unit-sized box with a material at `position`
fn add_crate(scene: &mut SceneTree, position: Vec3, material: MaterialState) -> ObjectId {
    scene
        .add(
            None,
            NodeDesc::new("crate")
                .at(position)
                .with_shape(CollisionShape::cuboid(1.0, 1.0, 1.0))
                .with_material(material),
        )
        .unwrap()
}
