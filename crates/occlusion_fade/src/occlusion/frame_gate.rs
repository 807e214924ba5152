//! Frame throttling

/// Admits exactly one frame out of every `period` ticks
///
/// Ticks are counted from 1, so with period 3 the admitted ticks are
/// 3, 6, 9 and so on. Detection is sparse in time: an object that stops
/// obstructing may stay faded for up to `period - 1` frames.
#[derive(Debug, Clone)]
pub struct FrameGate {
    period: u32,
    frames_seen: u64,
}

impl FrameGate {
    /// Create a gate admitting every `period`th tick
    ///
    /// A period of 0 is treated as 1 (every tick admitted).
    pub fn new(period: u32) -> Self {
        Self {
            period: period.max(1),
            frames_seen: 0,
        }
    }

    /// Count one tick and report whether it is admitted
    pub fn tick(&mut self) -> bool {
        self.frames_seen += 1;
        self.admits(self.frames_seen)
    }

    /// Whether tick number `frame` would be admitted
    pub fn admits(&self, frame: u64) -> bool {
        frame != 0 && frame % u64::from(self.period) == 0
    }

    /// Ticks counted so far
    pub fn frames_seen(&self) -> u64 {
        self.frames_seen
    }

    /// Configured period
    pub fn period(&self) -> u32 {
        self.period
    }

    /// Start counting from zero again
    pub fn reset(&mut self) {
        self.frames_seen = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_three_admits_multiples_only() {
        let mut gate = FrameGate::new(3);
        let admitted: Vec<u64> = (1..=9).filter(|_| gate.tick()).collect();
        assert_eq!(admitted, vec![3, 6, 9]);
    }

    #[test]
    fn test_no_drift_over_long_runs() {
        let mut gate = FrameGate::new(4);
        let admitted = (0..4000).filter(|_| gate.tick()).count();
        assert_eq!(admitted, 1000);
        assert!(gate.admits(4000));
        assert!(!gate.admits(0));
    }

    #[test]
    fn test_period_one_and_zero_admit_everything() {
        let mut every = FrameGate::new(1);
        assert!((0..5).all(|_| every.tick()));

        let mut zero = FrameGate::new(0);
        assert_eq!(zero.period(), 1);
        assert!(zero.tick());
    }

    #[test]
    fn test_reset() {
        let mut gate = FrameGate::new(3);
        gate.tick();
        gate.tick();
        gate.reset();
        assert_eq!(gate.frames_seen(), 0);
        assert!(!gate.tick());
        assert!(!gate.tick());
        assert!(gate.tick());
    }
}
