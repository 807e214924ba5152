//! Obstruction manager: ties the pipeline together and owns its state
//!
//! One manager serves one tracked target. Its snapshot store and faded set
//! belong to that attachment alone, so several managers never share state.

use std::collections::HashSet;

use crate::config::ConfigError;
use crate::frame::{FrameContext, FrameSystem};
use crate::scene::{Camera, ObjectId, SceneQuery};
use super::config::FadeConfig;
use super::fader;
use super::frame_gate::FrameGate;
use super::material_store::{MaterialSnapshot, MaterialStateStore};
use super::probe::{OcclusionClassifier, RayProbe};
use super::target::{TargetResolver, TrackedTarget};

/// What happened during one call to [`ObstructionManager::update`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FadeReport {
    /// Tick number as counted by the manager's frame gate
    pub frame: u64,
    /// Whether the gate admitted this tick
    pub admitted: bool,
    /// Whether the target resolved to a position
    pub resolved: bool,
    /// Objects that started obstructing and were faded
    pub faded: Vec<ObjectId>,
    /// Objects that stopped obstructing and were restored
    pub restored: Vec<ObjectId>,
}

impl FadeReport {
    /// True when no material changed
    pub fn is_quiet(&self) -> bool {
        self.faded.is_empty() && self.restored.is_empty()
    }
}

/// Running totals since the manager was created
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FadeStats {
    /// Ticks admitted by the frame gate
    pub admitted_frames: u64,
    /// Admitted ticks skipped because the target did not resolve
    pub unresolved_frames: u64,
    /// `Normal → Faded` transitions
    pub fades: u64,
    /// `Faded → Normal` transitions, including teardown
    pub restores: u64,
}

/// Fades whatever stands between a tracked target and the camera
///
/// # Usage
/// ```
/// # use occlusion_fade::prelude::*;
/// let mut scene = SceneTree::new();
/// let wall = scene
///     .add(None, NodeDesc::new("wall")
///         .at(Vec3::new(0.0, 0.0, 5.0))
///         .with_shape(CollisionShape::cuboid(4.0, 4.0, 0.5))
///         .with_material(MaterialState::opaque()))
///     .unwrap();
/// let camera = Camera::at(Vec3::new(0.0, 0.0, 10.0));
///
/// let mut manager = ObstructionManager::new(FadeConfig::default().with_throttle_period(1)).unwrap();
/// manager.attach(TrackedTarget::Point(Vec3::zeros()));
///
/// let report = manager.update(&mut scene, &camera);
/// assert_eq!(report.faded, vec![wall]);
///
/// manager.detach(&mut scene);
/// assert_eq!(scene.material(wall).unwrap().opacity, 1.0);
/// ```
#[derive(Debug)]
pub struct ObstructionManager {
    config: FadeConfig,
    gate: FrameGate,
    classifier: OcclusionClassifier,
    target: Option<TrackedTarget>,
    store: MaterialStateStore,
    /// Faded as of the previous admitted frame, in first-hit order
    faded: Vec<ObjectId>,
    stats: FadeStats,
    last_report: FadeReport,
}

impl ObstructionManager {
    /// Create a detached manager after validating `config`
    pub fn new(config: FadeConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config,
            gate: FrameGate::new(config.throttle_period),
            classifier: OcclusionClassifier::new(config.near_exclusion),
            target: None,
            store: MaterialStateStore::new(),
            faded: Vec::new(),
            stats: FadeStats::default(),
            last_report: FadeReport::default(),
        })
    }

    /// Start tracking `target`
    ///
    /// Replacing an existing target keeps the current fades; the next
    /// admitted frame diffs them against the new line of sight.
    pub fn attach(&mut self, target: TrackedTarget) {
        if let Some(previous) = self.target.replace(target) {
            log::info!("Occlusion: retargeted from {:?} to {:?}", previous, target);
        } else {
            log::info!("Occlusion: attached to {:?}", target);
        }
    }

    /// Restore every faded object and forget all state
    ///
    /// Runs to completion synchronously. Afterwards no object carries the fade
    /// appearance, the snapshot store is empty and the manager is detached.
    /// Returns the number of objects restored.
    pub fn detach<S: SceneQuery + ?Sized>(&mut self, scene: &mut S) -> usize {
        let faded = std::mem::take(&mut self.faded);
        let restored = faded
            .iter()
            .filter(|id| fader::restore(scene, &mut self.store, **id))
            .count();

        if !self.store.is_empty() {
            log::warn!("Occlusion: dropping {} unpaired snapshots on detach", self.store.len());
        }
        self.store.clear();
        self.gate.reset();
        self.stats.restores += restored as u64;

        if let Some(target) = self.target.take() {
            log::info!("Occlusion: detached from {:?}, restored {} objects", target, restored);
        }
        restored
    }

    /// Run one frame tick
    ///
    /// Only admitted ticks with a resolvable target touch the scene. Never
    /// fails: anything abnormal is treated as "nothing obstructs".
    pub fn update<S: SceneQuery + ?Sized>(&mut self, scene: &mut S, camera: &Camera) -> FadeReport {
        let admitted = self.gate.tick();
        let mut report = FadeReport {
            frame: self.gate.frames_seen(),
            admitted,
            ..FadeReport::default()
        };
        if !admitted {
            return report;
        }
        self.stats.admitted_frames += 1;

        let Some(origin) = TargetResolver::resolve(self.target.as_ref(), scene) else {
            log::trace!("Occlusion: frame {} skipped, target unresolved", report.frame);
            self.stats.unresolved_frames += 1;
            return report;
        };
        report.resolved = true;

        let current = RayProbe::probe(scene, origin, camera.world_position(), self.config.layers)
            .map(|probe| self.classifier.classify(&probe, scene))
            .unwrap_or_default();
        let current_set: HashSet<ObjectId> = current.iter().copied().collect();

        // Diff against the previous set before it is replaced
        for id in &self.faded {
            if !current_set.contains(id) && fader::restore(scene, &mut self.store, *id) {
                report.restored.push(*id);
            }
        }

        for id in &current {
            if fader::apply_fade(scene, &mut self.store, *id, self.config.fade_opacity) {
                report.faded.push(*id);
            }
        }

        // Only objects holding a snapshot count as faded
        self.faded = current.into_iter().filter(|id| self.store.contains(*id)).collect();

        self.stats.fades += report.faded.len() as u64;
        self.stats.restores += report.restored.len() as u64;
        log::trace!(
            "Occlusion: frame {} obstructing={} faded={} restored={}",
            report.frame,
            self.faded.len(),
            report.faded.len(),
            report.restored.len()
        );
        report
    }

    /// Borrow the manager and a scene together; dropping the scope detaches
    pub fn scope<'a, S: SceneQuery + ?Sized>(&'a mut self, scene: &'a mut S) -> FadeScope<'a, S> {
        FadeScope {
            manager: self,
            scene,
            finished: false,
        }
    }

    /// Whether a target is attached
    pub fn is_attached(&self) -> bool {
        self.target.is_some()
    }

    /// Current target, if any
    pub fn target(&self) -> Option<&TrackedTarget> {
        self.target.as_ref()
    }

    /// Objects faded as of the last admitted frame
    pub fn faded(&self) -> &[ObjectId] {
        &self.faded
    }

    /// Whether `id` is currently faded by this manager
    pub fn is_faded(&self, id: ObjectId) -> bool {
        self.faded.contains(&id)
    }

    /// Pre-fade appearance held for `id`
    pub fn snapshot(&self, id: ObjectId) -> Option<MaterialSnapshot> {
        self.store.get(id).copied()
    }

    /// Number of snapshots held
    pub fn snapshot_count(&self) -> usize {
        self.store.len()
    }

    /// Active configuration
    pub fn config(&self) -> &FadeConfig {
        &self.config
    }

    /// Running totals
    pub fn stats(&self) -> FadeStats {
        self.stats
    }

    /// Report from the most recent tick driven through [`FrameSystem`]
    pub fn last_report(&self) -> &FadeReport {
        &self.last_report
    }
}

impl<S: SceneQuery + ?Sized> FrameSystem<S> for ObstructionManager {
    fn on_frame(&mut self, ctx: &mut FrameContext<'_, S>) {
        let report = self.update(ctx.scene, ctx.camera);
        if !report.is_quiet() {
            log::debug!(
                "Occlusion: scheduler frame {} faded {:?} restored {:?}",
                ctx.frame,
                report.faded,
                report.restored
            );
        }
        self.last_report = report;
    }

    fn name(&self) -> &str {
        "obstruction-manager"
    }
}

impl Drop for ObstructionManager {
    fn drop(&mut self) {
        if !self.faded.is_empty() {
            log::warn!(
                "Occlusion: manager dropped with {} faded objects still altered; call detach first",
                self.faded.len()
            );
        }
    }
}

/// Scoped attachment that always restores the scene when it ends
///
/// Dropping the scope, including during unwinding, detaches the manager
/// and restores every faded object.
pub struct FadeScope<'a, S: SceneQuery + ?Sized> {
    manager: &'a mut ObstructionManager,
    scene: &'a mut S,
    finished: bool,
}

impl<'a, S: SceneQuery + ?Sized> FadeScope<'a, S> {
    /// Run one frame tick against the borrowed scene
    pub fn tick(&mut self, camera: &Camera) -> FadeReport {
        self.manager.update(self.scene, camera)
    }

    /// The borrowed scene
    pub fn scene(&self) -> &S {
        &*self.scene
    }

    /// The borrowed scene, for moving objects between ticks
    pub fn scene_mut(&mut self) -> &mut S {
        &mut *self.scene
    }

    /// The borrowed manager
    pub fn manager(&self) -> &ObstructionManager {
        &*self.manager
    }

    /// Detach now and report how many objects were restored
    pub fn finish(mut self) -> usize {
        self.finished = true;
        self.manager.detach(self.scene)
    }
}

impl<S: SceneQuery + ?Sized> Drop for FadeScope<'_, S> {
    fn drop(&mut self) {
        if !self.finished {
            self.manager.detach(self.scene);
        }
    }
}
