//! Occlusion fading
//!
//! Keeps a tracked target visible by fading whatever sits between it and the
//! camera, and puts every faded object back exactly as it was once it stops
//! obstructing or the manager detaches.
//!
//! ## Pipeline (per admitted frame)
//!
//! ```text
//! FrameGate → TargetResolver → RayProbe → OcclusionClassifier
//!     → diff against the previous faded set
//!     → restore objects that stopped obstructing
//!     → fade objects that started obstructing
//!     → keep the new faded set for the next diff
//! ```
//!
//! Per object the only transitions are `Normal → Faded` (snapshot captured)
//! and `Faded → Normal` (snapshot consumed).

mod config;
mod fader;
mod frame_gate;
mod manager;
mod material_store;
mod probe;
mod target;

#[cfg(test)]
mod tests;

pub use config::FadeConfig;
pub use fader::{apply_fade, restore};
pub use frame_gate::FrameGate;
pub use manager::{FadeReport, FadeScope, FadeStats, ObstructionManager};
pub use material_store::{MaterialSnapshot, MaterialStateStore};
pub use probe::{OcclusionClassifier, ProbeResult, RayProbe};
pub use target::{TargetResolver, TrackedTarget};
