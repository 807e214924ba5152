//! Headless level: checkerboard floor, street light, falling boxes and a glass sphere

use std::f32::consts::TAU;

use occlusion_fade::foundation::math::{Quat, Vec3};
use occlusion_fade::physics::CollisionShape;
use occlusion_fade::scene::{
    MaterialState, NodeDesc, ObjectId, RenderLayers, SceneError, SceneQuery, SceneTree,
};
use rand::Rng;

const GRAVITY: f32 = -9.81;
const SPHERE_RADIUS: f32 = 0.6;
const BOX_SIZE: f32 = 1.0;
const POLE_HEIGHT: f32 = 4.0;

/// Scripted stand-in for keyboard input, relative to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// Away from the camera
    Forward,
    /// Toward the camera
    Backward,
    /// Camera left
    Left,
    /// Camera right
    Right,
    /// No input
    Idle,
}

/// Moves replayed in a loop, each held for the given number of frames
pub const SCRIPT: &[(Move, u64)] = &[
    (Move::Idle, 30),
    (Move::Forward, 240),
    (Move::Right, 90),
    (Move::Backward, 120),
    (Move::Left, 180),
    (Move::Backward, 120),
    (Move::Right, 90),
];

/// Move held on `frame`
pub fn scripted_move(frame: u64) -> Move {
    let cycle: u64 = SCRIPT.iter().map(|(_, frames)| frames).sum();
    let mut at = frame % cycle;
    for (step, frames) in SCRIPT {
        if at < *frames {
            return *step;
        }
        at -= frames;
    }
    Move::Idle
}

/// World-space direction for `step`, projected onto the ground plane
pub fn move_direction(step: Move, camera_forward: Vec3) -> Vec3 {
    let forward = Vec3::new(camera_forward.x, 0.0, camera_forward.z)
        .try_normalize(f32::EPSILON)
        .unwrap_or_else(|| Vec3::new(0.0, 0.0, -1.0));
    let right = forward.cross(&Vec3::y());
    match step {
        Move::Forward => forward,
        Move::Backward => -forward,
        Move::Left => -right,
        Move::Right => right,
        Move::Idle => Vec3::zeros(),
    }
}

#[derive(Debug, Clone, Copy)]
struct FallingBox {
    id: ObjectId,
    velocity: f32,
    resting: bool,
}

/// Objects of the level that move each frame
#[derive(Debug)]
pub struct Level {
    /// The glass sphere the camera follows
    pub sphere: ObjectId,
    boxes: Vec<FallingBox>,
    initial: Vec<(ObjectId, MaterialState)>,
}

impl Level {
    /// Populate `scene` and remember every starting appearance
    pub fn build<R: Rng>(scene: &mut SceneTree, box_count: usize, rng: &mut R) -> Result<Self, SceneError> {
        scene.add(
            None,
            NodeDesc::new("checkerboard_floor")
                .at(Vec3::new(0.0, -0.1, 0.0))
                .with_shape(CollisionShape::cuboid(40.0, 0.2, 40.0))
                .with_material(MaterialState::opaque())
                .on_layers(RenderLayers::GROUND),
        )?;

        let street_light = scene.add_group("street_light", Vec3::new(0.0, 0.0, -4.0));
        scene.add(
            Some(street_light),
            NodeDesc::new("pole")
                .at(Vec3::new(0.0, POLE_HEIGHT * 0.5, 0.0))
                .with_shape(CollisionShape::cuboid(0.25, POLE_HEIGHT, 0.25))
                .with_material(MaterialState::opaque())
                .on_layers(RenderLayers::ENVIRONMENT),
        )?;
        scene.add(
            Some(street_light),
            NodeDesc::new("lamp")
                .at(Vec3::new(0.0, POLE_HEIGHT + 0.2, 0.0))
                .with_shape(CollisionShape::sphere(0.35))
                .with_material(MaterialState::translucent(0.85))
                .on_layers(RenderLayers::EFFECTS),
        )?;

        // Two fixed drops beside the start, then random ones along the path
        let mut drops = vec![Vec3::new(3.0, 5.0, 0.0), Vec3::new(-3.0, 7.0, 0.0)];
        drops.extend((2..box_count).map(|_| {
            Vec3::new(rng.gen_range(-2.5..2.5), rng.gen_range(4.0..9.0), rng.gen_range(-9.0..-1.0))
        }));
        let boxes = drops
            .into_iter()
            .take(box_count)
            .enumerate()
            .map(|(i, at)| {
                let yaw = Quat::from_axis_angle(&Vec3::y_axis(), rng.gen_range(0.0..TAU));
                let id = scene.add(
                    None,
                    NodeDesc::new(format!("falling_box_{}", i))
                        .at(at)
                        .with_rotation(yaw)
                        .with_shape(CollisionShape::cuboid(BOX_SIZE, BOX_SIZE, BOX_SIZE))
                        .with_material(MaterialState::opaque()),
                )?;
                Ok(FallingBox { id, velocity: 0.0, resting: false })
            })
            .collect::<Result<Vec<_>, SceneError>>()?;

        let sphere = scene.add(
            None,
            NodeDesc::new("glass_sphere")
                .at(Vec3::new(0.0, SPHERE_RADIUS, 0.0))
                .with_shape(CollisionShape::sphere(SPHERE_RADIUS))
                .with_material(MaterialState::translucent(0.6))
                .on_layers(RenderLayers::CHARACTERS),
        )?;

        let initial = scene
            .objects()
            .into_iter()
            .filter_map(|id| scene.material(id).map(|material| (id, *material)))
            .collect();

        log::info!("Level: {} nodes, {} boxes", scene.len(), boxes.len());
        Ok(Self { sphere, boxes, initial })
    }

    /// Advance boxes under gravity and roll the sphere by `velocity`
    pub fn step(&mut self, scene: &mut SceneTree, dt: f32, velocity: Vec3) -> Result<(), SceneError> {
        let rest_height = BOX_SIZE * 0.5;
        for falling in &mut self.boxes {
            if falling.resting {
                continue;
            }
            let Some(transform) = scene.local_transform(falling.id) else {
                continue;
            };
            falling.velocity += GRAVITY * dt;
            let mut position = transform.position;
            position.y = (position.y + falling.velocity * dt).max(rest_height);
            if position.y <= rest_height {
                falling.velocity = 0.0;
                falling.resting = true;
                log::debug!("Level: box {} landed at {:?}", falling.id, position);
            }
            scene.set_position(falling.id, position)?;
        }

        scene.translate(self.sphere, velocity * dt)
    }

    /// Whether every box has come to rest
    pub fn boxes_settled(&self) -> bool {
        self.boxes.iter().all(|falling| falling.resting)
    }

    /// Objects whose appearance differs from when the level was built
    pub fn altered(&self, scene: &SceneTree) -> Vec<ObjectId> {
        self.initial
            .iter()
            .filter(|(id, initial)| {
                scene
                    .material(*id)
                    .map_or(true, |material| !material.same_appearance(initial))
            })
            .map(|(id, _)| *id)
            .collect()
    }
}
