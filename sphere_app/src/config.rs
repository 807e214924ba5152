//! Demo settings, loadable from TOML or RON

use occlusion_fade::config::{Config, ConfigError};
use occlusion_fade::foundation::math::Vec3;
use occlusion_fade::occlusion::FadeConfig;
use occlusion_fade::scene::RenderLayers;
use serde::{Deserialize, Serialize};

/// Settings for the headless sphere demo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Occlusion fade tuning
    pub fade: FadeConfig,
    /// Number of frames to simulate
    pub frames: u64,
    /// Simulated frame time in seconds
    pub frame_time: f32,
    /// Sphere speed in world units per second
    pub speed: f32,
    /// Fraction of the remaining distance the camera closes each frame
    pub springiness: f32,
    /// Camera position relative to the sphere
    pub camera_offset: Vec3,
    /// Number of falling boxes
    pub box_count: usize,
    /// Seed for box placement
    pub seed: u64,
    /// Default log level, overridable through `RUST_LOG`
    pub log_level: String,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            // The floor never obstructs and the sphere never hides itself
            fade: FadeConfig::default()
                .with_layers(RenderLayers::all() - RenderLayers::GROUND - RenderLayers::CHARACTERS),
            frames: 900,
            frame_time: 1.0 / 60.0,
            speed: 2.0,
            springiness: 0.1,
            camera_offset: Vec3::new(0.0, 5.0, 10.0),
            box_count: 4,
            seed: 7,
            log_level: "info".to_string(),
        }
    }
}

impl DemoConfig {
    /// Check every value is in range
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.fade.validate()?;
        if self.frames == 0 {
            return Err(ConfigError::Invalid("frames must be at least 1".to_string()));
        }
        if !(self.frame_time > 0.0 && self.frame_time.is_finite()) {
            return Err(ConfigError::Invalid(format!("frame_time {} must be positive", self.frame_time)));
        }
        if !(self.speed >= 0.0 && self.speed.is_finite()) {
            return Err(ConfigError::Invalid(format!("speed {} must be non-negative", self.speed)));
        }
        if !(self.springiness > 0.0 && self.springiness <= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "springiness {} must be in (0, 1]",
                self.springiness
            )));
        }
        Ok(())
    }
}

impl Config for DemoConfig {}
