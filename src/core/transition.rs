use super::timer::Countdown;
use crate::math::{interpolate_pose, Easing};
use crate::types::Pose;

/// Identifies one transition request; lets callers tell a completion apart
/// from that of a transition it superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionToken(u64);

impl TransitionToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn value(self) -> u64 {
        self.0
    }
}

/// In-flight interpolation between two poses
#[derive(Debug, Clone)]
pub struct Transition {
    start: Pose,
    target: Pose,
    easing: Easing,
    countdown: Countdown,
    token: TransitionToken,
}

impl Transition {
    pub fn new(start: Pose, target: Pose, duration: f32, easing: Easing, token: TransitionToken) -> Self {
        Self {
            start,
            target,
            easing,
            countdown: Countdown::new(duration),
            token,
        }
    }

    /// Advance by `delta` seconds, returns true once complete
    pub fn advance(&mut self, delta: f32) -> bool {
        self.countdown.tick(delta)
    }

    /// Pose at the current progress. Exactly the target once complete.
    pub fn sample(&self) -> Pose {
        if self.countdown.is_finished() {
            return self.target;
        }
        let eased = self.easing.apply(self.countdown.progress());
        interpolate_pose(&self.start, &self.target, eased)
    }

    pub fn is_complete(&self) -> bool {
        self.countdown.is_finished()
    }

    /// Linear progress [0, 1] before easing
    pub fn progress(&self) -> f32 {
        self.countdown.progress()
    }

    pub fn start(&self) -> &Pose {
        &self.start
    }

    pub fn target(&self) -> &Pose {
        &self.target
    }

    pub fn duration(&self) -> f32 {
        self.countdown.duration()
    }

    pub fn token(&self) -> TransitionToken {
        self.token
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    fn transition(duration: f32, easing: Easing) -> Transition {
        Transition::new(
            Pose::at(Vec3::new(0.0, 0.0, 12.0)),
            Pose::at(Vec3::new(0.0, -1.0, 8.0)),
            duration,
            easing,
            TransitionToken::new(1),
        )
    }

    #[test]
    fn linear_midpoint() {
        let mut t = transition(2.0, Easing::Linear);
        assert!(!t.advance(1.0));
        assert_eq!(t.sample().position, Vec3::new(0.0, -0.5, 10.0));
    }

    #[test]
    fn sample_before_advance_is_start() {
        let t = transition(1.0, Easing::EaseOut);
        assert_eq!(t.sample().position, Vec3::new(0.0, 0.0, 12.0));
    }

    #[test]
    fn completion_snaps_to_target() {
        let mut t = transition(0.3, Easing::EaseInOut);
        t.advance(0.1);
        t.advance(0.1);
        assert!(t.advance(0.2));
        assert_eq!(t.sample(), *t.target());
    }

    #[test]
    fn zero_duration_completes_on_first_advance() {
        let mut t = transition(0.0, Easing::Linear);
        assert!(t.advance(0.0));
        assert_eq!(t.sample().position, Vec3::new(0.0, -1.0, 8.0));
    }
}
