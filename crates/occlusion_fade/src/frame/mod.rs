//! Frame tick interface
//!
//! Per-frame systems are driven through [`FrameSystem`] instead of hooking a
//! specific engine callback, so a render loop and a unit test drive them the
//! same way.

mod scheduler;

pub use scheduler::FrameScheduler;

use crate::scene::Camera;

/// Everything a system sees during one frame
pub struct FrameContext<'a, S: ?Sized> {
    /// Monotonically increasing frame number, starting at 1
    pub frame: u64,
    /// Scene the system may query and mutate
    pub scene: &'a mut S,
    /// Active camera for this frame
    pub camera: &'a Camera,
}

/// A system invoked once per rendered frame
pub trait FrameSystem<S: ?Sized> {
    /// Run the system for one frame
    fn on_frame(&mut self, ctx: &mut FrameContext<'_, S>);

    /// Name used in logs
    fn name(&self) -> &str {
        "frame-system"
    }
}
