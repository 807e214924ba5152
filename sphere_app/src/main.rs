//! Sphere Follow Demo
//!
//! Headless run of the occlusion fade system:
//! - Glass sphere rolling along a scripted, camera-relative path
//! - Spring follow camera trailing it
//! - Street light and falling boxes fading while they block the view
//! - Floor excluded through render layers
//!
//! Usage: `sphere_demo [config.toml|config.ron]`

mod config;
mod follow_camera;
mod level;

use config::DemoConfig;
use follow_camera::FollowCamera;
use level::Level;
use occlusion_fade::config::{Config, ConfigError};
use occlusion_fade::foundation::logging;
use occlusion_fade::occlusion::{ObstructionManager, TrackedTarget};
use occlusion_fade::scene::{ObjectId, SceneError, SceneQuery, SceneTree};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[derive(thiserror::Error, Debug)]
enum DemoError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Scene(#[from] SceneError),

    #[error("objects left altered after detach: {0:?}")]
    NotRestored(Vec<ObjectId>),
}

fn run(config: &DemoConfig) -> Result<(), DemoError> {
    let mut scene = SceneTree::new();
    let mut rng = StdRng::seed_from_u64(config.seed);
    let mut level = Level::build(&mut scene, config.box_count, &mut rng)?;

    let follow = FollowCamera::new(config.camera_offset, config.springiness);
    let start = scene
        .world_position(level.sphere)
        .ok_or(SceneError::UnknownObject(level.sphere))?;
    let mut camera = follow.spawn(start);

    let mut manager = ObstructionManager::new(config.fade)?;
    manager.attach(TrackedTarget::Node(level.sphere));

    let mut scope = manager.scope(&mut scene);
    for frame in 0..config.frames {
        let step = level::scripted_move(frame);
        let velocity = level::move_direction(step, camera.forward()) * config.speed;
        level.step(scope.scene_mut(), config.frame_time, velocity)?;

        if let Some(sphere) = scope.scene().world_position(level.sphere) {
            follow.update(&mut camera, sphere);
        }

        let report = scope.tick(&camera);
        if !report.is_quiet() {
            log::info!(
                "Frame {}: {:?} faded {:?} restored {:?}",
                report.frame,
                step,
                report.faded,
                report.restored
            );
        }
    }

    let stats = scope.manager().stats();
    let restored = scope.finish();
    log::info!(
        "Done: {} admitted frames, {} fades, {} restores ({} at detach)",
        stats.admitted_frames,
        stats.fades,
        stats.restores + restored as u64,
        restored
    );

    let altered = level.altered(&scene);
    if !altered.is_empty() {
        return Err(DemoError::NotRestored(altered));
    }
    log::info!("All materials back to their initial appearance");
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = match std::env::args().nth(1) {
        Some(path) => DemoConfig::load_from_file(&path)?,
        None => DemoConfig::default(),
    };
    logging::init_with_level(&config.log_level);
    config.validate()?;

    println!("=== Sphere Follow Demo ===");
    println!("Frames: {}  Throttle: every {} frames  Fade opacity: {}",
        config.frames, config.fade.throttle_period, config.fade.fade_opacity);
    println!();

    run(&config)?;
    Ok(())
}
