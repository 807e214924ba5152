//! Tuning parameters for occlusion fading

use serde::{Deserialize, Serialize};

use crate::config::{Config, ConfigError};
use crate::scene::RenderLayers;

/// Occlusion fade configuration
///
/// Missing fields fall back to their defaults when deserializing, so a
/// config file only needs to list what it overrides.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FadeConfig {
    /// Run detection on every Nth frame
    pub throttle_period: u32,
    /// Opacity applied to obstructing objects
    pub fade_opacity: f32,
    /// Hits closer than this to the target are ignored (self-occlusion)
    pub near_exclusion: f32,
    /// Only objects on these layers can obstruct
    pub layers: RenderLayers,
}

impl FadeConfig {
    /// Default throttle period in frames
    pub const DEFAULT_THROTTLE_PERIOD: u32 = 3;
    /// Default fade opacity
    pub const DEFAULT_FADE_OPACITY: f32 = 0.3;
    /// Default near-exclusion distance in world units
    pub const DEFAULT_NEAR_EXCLUSION: f32 = 0.5;

    /// Create a configuration with the default values
    pub fn new() -> Self {
        Self {
            throttle_period: Self::DEFAULT_THROTTLE_PERIOD,
            fade_opacity: Self::DEFAULT_FADE_OPACITY,
            near_exclusion: Self::DEFAULT_NEAR_EXCLUSION,
            layers: RenderLayers::all(),
        }
    }

    /// Set the throttle period
    #[must_use]
    pub fn with_throttle_period(mut self, frames: u32) -> Self {
        self.throttle_period = frames;
        self
    }

    /// Set the fade opacity
    #[must_use]
    pub fn with_fade_opacity(mut self, opacity: f32) -> Self {
        self.fade_opacity = opacity;
        self
    }

    /// Set the near-exclusion distance
    #[must_use]
    pub fn with_near_exclusion(mut self, distance: f32) -> Self {
        self.near_exclusion = distance;
        self
    }

    /// Restrict which layers can obstruct
    #[must_use]
    pub fn with_layers(mut self, layers: RenderLayers) -> Self {
        self.layers = layers;
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.throttle_period == 0 {
            return Err(ConfigError::Invalid("throttle_period must be at least 1".to_string()));
        }

        if !self.fade_opacity.is_finite() || !(0.0..=1.0).contains(&self.fade_opacity) {
            return Err(ConfigError::Invalid(format!(
                "fade_opacity must be within [0, 1], got {}",
                self.fade_opacity
            )));
        }

        if !self.near_exclusion.is_finite() || self.near_exclusion < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "near_exclusion must be a non-negative distance, got {}",
                self.near_exclusion
            )));
        }

        Ok(())
    }
}

impl Default for FadeConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl Config for FadeConfig {}
