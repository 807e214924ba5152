//! # Occlusion Fade
//!
//! Keeps a tracked target visible by fading whatever stands between it and
//! the camera, and restoring each object's exact appearance once it stops
//! obstructing.
//!
//! ## Features
//!
//! - **Throttled probing**: one ray probe every N frames
//! - **Exact restoration**: pre-fade appearance snapshotted per object
//! - **Scoped teardown**: detaching always restores the scene
//! - **Engine agnostic**: runs against any [`scene::SceneQuery`]
//!
//! ## Quick Start
//!
//! ```rust
//! use occlusion_fade::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let mut scene = SceneTree::new();
//!     let player = scene.add_group("player", Vec3::zeros());
//!     scene.add(None, NodeDesc::new("pillar")
//!         .at(Vec3::new(0.0, 0.0, 4.0))
//!         .with_shape(CollisionShape::cuboid(1.0, 3.0, 1.0))
//!         .with_material(MaterialState::opaque()))?;
//!
//!     let camera = Camera::at(Vec3::new(0.0, 1.0, 8.0));
//!     let mut manager = ObstructionManager::new(FadeConfig::default())?;
//!     manager.attach(TrackedTarget::Node(player));
//!
//!     let mut scope = manager.scope(&mut scene);
//!     for _ in 0..6 {
//!         scope.tick(&camera);
//!     }
//!     scope.finish();
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names, clippy::cast_precision_loss)]

pub mod config;
pub mod foundation;
pub mod frame;
pub mod occlusion;
pub mod physics;
pub mod scene;

/// Common imports for users of the crate
pub mod prelude {
    pub use crate::{
        config::{Config, ConfigError},
        foundation::math::{Quat, Transform, Vec3},
        frame::{FrameContext, FrameScheduler, FrameSystem},
        occlusion::{FadeConfig, FadeReport, FadeScope, ObstructionManager, TrackedTarget},
        physics::CollisionShape,
        scene::{Camera, MaterialState, NodeDesc, ObjectId, RenderLayers, SceneQuery, SceneTree},
    };
}
