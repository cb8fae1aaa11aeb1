use std::num::NonZeroU32;
use strum::{Display as StrumDisplay, EnumIter};

/// Progress at which every session ends.
pub const PROGRESS_MAX: u32 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, StrumDisplay, EnumIter)]
pub enum Profile {
    Entering,
    Leaving,
}

/// Step-counting animation driver. The host calls [`tick`](Self::tick) at
/// whatever rate its scheduler manages; progress never depends on elapsed
/// time, so identical tick counts always land on identical progress.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnimationClock {
    profile: Profile,
    progress: u32,
    step: NonZeroU32,
    running: bool,
}

impl AnimationClock {
    /// A dormant clock. Nothing happens until [`start`](Self::start).
    pub fn new(step: NonZeroU32) -> Self {
        Self {
            profile: Profile::Entering,
            progress: 0,
            step,
            running: false,
        }
    }

    /// Begins a new session, discarding whatever was in flight.
    pub fn start(&mut self, profile: Profile) {
        self.profile = profile;
        self.progress = 0;
        self.running = true;
    }

    /// Advances by one step, saturating at [`PROGRESS_MAX`]. The tick after
    /// saturation stops the clock instead of advancing.
    pub fn tick(&mut self) -> u32 {
        if !self.running {
            return self.progress;
        }

        if self.progress >= PROGRESS_MAX {
            self.running = false;
        } else {
            self.progress = self
                .progress
                .saturating_add(self.step.get())
                .min(PROGRESS_MAX);
        }
        self.progress
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn progress(&self) -> u32 {
        self.progress
    }

    pub fn profile(&self) -> Profile {
        self.profile
    }

    pub fn step(&self) -> NonZeroU32 {
        self.step
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn clock(step: u32) -> AnimationClock {
        AnimationClock::new(NonZeroU32::new(step).unwrap())
    }

    #[test]
    fn test_new_clock_is_dormant() {
        let mut c = clock(4);
        assert!(!c.is_running());
        assert_eq!(c.tick(), 0);
        assert!(!c.is_running());
    }

    #[test]
    fn test_default_step_reaches_bound_then_settles() {
        let mut c = clock(4);
        c.start(Profile::Entering);
        assert!(c.is_running());

        for expected in (4..=60).step_by(4) {
            assert_eq!(c.tick(), expected);
            assert!(c.is_running());
        }
        assert_eq!(c.progress(), PROGRESS_MAX);

        // one settling tick at the bound
        assert_eq!(c.tick(), PROGRESS_MAX);
        assert!(!c.is_running());

        assert_eq!(c.tick(), PROGRESS_MAX);
        assert!(!c.is_running());
    }

    #[test]
    fn test_uneven_step_saturates_without_overshoot() {
        let mut c = clock(7);
        c.start(Profile::Leaving);
        let mut seen = Vec::new();
        while c.is_running() {
            seen.push(c.tick());
        }
        assert_eq!(seen, [7, 14, 21, 28, 35, 42, 49, 56, 60, 60]);
    }

    #[test]
    fn test_huge_step() {
        let mut c = clock(u32::MAX);
        c.start(Profile::Entering);
        assert_eq!(c.tick(), PROGRESS_MAX);
        c.tick();
        assert!(!c.is_running());
    }

    #[test]
    fn test_restart_discards_progress() {
        let mut c = clock(4);
        c.start(Profile::Entering);
        c.tick();
        c.tick();
        assert_eq!(c.progress(), 8);

        c.start(Profile::Leaving);
        assert_eq!(c.progress(), 0);
        assert_eq!(c.step().get(), 4);
        assert_eq!(c.profile(), Profile::Leaving);
        assert!(c.is_running());
    }

    #[test]
    fn test_identical_clocks_stay_in_lockstep() {
        let (mut a, mut b) = (clock(3), clock(3));
        a.start(Profile::Entering);
        b.start(Profile::Entering);
        for _ in 0..12 {
            assert_eq!(a.tick(), b.tick());
        }
        assert_eq!(a, b);
    }

    #[test]
    fn test_profile_display() {
        assert_eq!(Profile::Entering.to_string(), "Entering");
        assert_eq!(Profile::Leaving.to_string(), "Leaving");
    }
}
