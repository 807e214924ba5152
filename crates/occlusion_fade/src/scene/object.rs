//! Scene object identity and the material surface the fader touches

use bitflags::bitflags;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable, engine-independent identifier of a scene object
///
/// Used as the cache key for material snapshots. Identifiers are never
/// reused by [`SceneTree`](super::SceneTree) within one scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObjectId(pub u64);

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

bitflags! {
    /// Render layer bits
    ///
    /// Objects on layers outside the probe mask are invisible to the
    /// occlusion ray and therefore never fade.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct RenderLayers: u32 {
        /// Default layer for ordinary geometry
        const DEFAULT = 1 << 0;
        /// Static level geometry (walls, poles, props)
        const ENVIRONMENT = 1 << 1;
        /// Ground surfaces
        const GROUND = 1 << 2;
        /// Player and NPC bodies
        const CHARACTERS = 1 << 3;
        /// Particles, decals and other effects
        const EFFECTS = 1 << 4;
    }
}

/// Mutable material state of a scene object
///
/// `transparent` and `opacity` are the only appearance fields the fader
/// reads or writes. `needs_update` is the redraw marker the renderer clears.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MaterialState {
    /// Whether the material is alpha blended
    pub transparent: bool,
    /// Opacity in `[0, 1]`
    pub opacity: f32,
    /// Set whenever the material changed since the renderer last looked
    pub needs_update: bool,
}

impl MaterialState {
    /// Fully opaque material
    pub fn opaque() -> Self {
        Self {
            transparent: false,
            opacity: 1.0,
            needs_update: false,
        }
    }

    /// Alpha-blended material with the given opacity
    pub fn translucent(opacity: f32) -> Self {
        Self {
            transparent: true,
            opacity,
            needs_update: false,
        }
    }

    /// Flag the material so the renderer recomputes it
    pub fn mark_dirty(&mut self) {
        self.needs_update = true;
    }

    /// Compare appearance only, ignoring the redraw marker
    pub fn same_appearance(&self, other: &Self) -> bool {
        self.transparent == other.transparent && self.opacity == other.opacity
    }
}

impl Default for MaterialState {
    fn default() -> Self {
        Self::opaque()
    }
}
