//! Frame scheduling
//!
//! Runs registered systems in registration order, once per frame, on the
//! thread that owns the scene.

use super::{FrameContext, FrameSystem};
use crate::scene::Camera;

/// Drives a list of frame systems with a monotonically increasing counter
pub struct FrameScheduler<'s, S: ?Sized> {
    systems: Vec<&'s mut dyn FrameSystem<S>>,
    frame: u64,
}

impl<'s, S: ?Sized> FrameScheduler<'s, S> {
    /// Create a scheduler with no systems
    pub fn new() -> Self {
        Self {
            systems: Vec::new(),
            frame: 0,
        }
    }

    /// Register a system; it runs after every system registered before it
    pub fn add_system(&mut self, system: &'s mut dyn FrameSystem<S>) {
        log::debug!("FrameScheduler: registered '{}'", system.name());
        self.systems.push(system);
    }

    /// Advance one frame and run every system against `scene`
    ///
    /// Returns the number of the frame that was just run.
    pub fn step(&mut self, scene: &mut S, camera: &Camera) -> u64 {
        self.frame += 1;
        let mut ctx = FrameContext {
            frame: self.frame,
            scene,
            camera,
        };
        for system in &mut self.systems {
            system.on_frame(&mut ctx);
        }
        self.frame
    }

    /// Number of frames run so far
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Number of registered systems
    pub fn system_count(&self) -> usize {
        self.systems.len()
    }
}

impl<S: ?Sized> Default for FrameScheduler<'_, S> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct Recorder {
        frames: Vec<u64>,
    }

    impl FrameSystem<Vec<u64>> for Recorder {
        fn on_frame(&mut self, ctx: &mut FrameContext<'_, Vec<u64>>) {
            self.frames.push(ctx.frame);
            ctx.scene.push(ctx.frame * 10);
        }
    }

    #[test]
    fn test_systems_run_in_order_with_increasing_frames() {
        let mut first = Recorder::default();
        let mut second = Recorder::default();
        let mut log = Vec::new();
        let camera = Camera::default();

        {
            let mut scheduler = FrameScheduler::new();
            scheduler.add_system(&mut first);
            scheduler.add_system(&mut second);
            assert_eq!(scheduler.system_count(), 2);

            assert_eq!(scheduler.step(&mut log, &camera), 1);
            assert_eq!(scheduler.step(&mut log, &camera), 2);
            assert_eq!(scheduler.frame(), 2);
        }

        assert_eq!(first.frames, vec![1, 2]);
        assert_eq!(second.frames, vec![1, 2]);
        assert_eq!(log, vec![10, 10, 20, 20]);
    }
}
