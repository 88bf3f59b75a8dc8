use log::debug;

use super::transition::{Transition, TransitionToken};
use crate::math::Easing;
use crate::types::Pose;

/// Reported by [`TransitionEngine::update`] on the frame a transition lands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionEvent {
    Completed(TransitionToken),
}

#[derive(Debug, Clone)]
enum EngineState {
    Idle,
    Transitioning(Transition),
}

/// Owns the live camera pose and at most one in-flight transition.
///
/// A new request always starts from the pose the camera shows right now, so
/// interrupting a transition never makes the camera jump. The engine has no
/// clock of its own; it only moves when the host calls [`update`](Self::update).
#[derive(Debug, Clone)]
pub struct TransitionEngine {
    pose: Pose,
    state: EngineState,
    next_token: u64,
}

impl TransitionEngine {
    pub fn new(initial: Pose) -> Self {
        Self {
            pose: initial,
            state: EngineState::Idle,
            next_token: 0,
        }
    }

    /// Current (possibly interpolated) pose
    pub fn pose(&self) -> Pose {
        self.pose
    }

    pub fn is_transitioning(&self) -> bool {
        matches!(self.state, EngineState::Transitioning(_))
    }

    pub fn active(&self) -> Option<&Transition> {
        match &self.state {
            EngineState::Idle => None,
            EngineState::Transitioning(transition) => Some(transition),
        }
    }

    /// Start moving towards `target`, superseding any transition in flight.
    ///
    /// Fields `target` leaves unspecified keep their current value. Returns
    /// `None` when the camera is already exactly there; any previous
    /// transition is still cleared in that case.
    pub fn request_transition(
        &mut self,
        target: Pose,
        duration: f32,
        easing: Easing,
    ) -> Option<TransitionToken> {
        let target = target.completed_from(&self.pose);
        self.cancel();

        if target == self.pose {
            debug!("Transition target equals current pose, nothing to do");
            return None;
        }

        self.next_token += 1;
        let token = TransitionToken::new(self.next_token);
        debug!(
            "Transition {} started: {:?} -> {:?} over {:.2}s ({})",
            token.value(),
            self.pose.position,
            target.position,
            duration,
            easing
        );
        self.state = EngineState::Transitioning(Transition::new(
            self.pose, target, duration, easing, token,
        ));
        Some(token)
    }

    /// Stop where the camera currently is
    pub fn cancel(&mut self) -> Option<TransitionToken> {
        match std::mem::replace(&mut self.state, EngineState::Idle) {
            EngineState::Idle => None,
            EngineState::Transitioning(transition) => {
                debug!(
                    "Transition {} cancelled at {:.0}%",
                    transition.token().value(),
                    transition.progress() * 100.0
                );
                Some(transition.token())
            }
        }
    }

    /// Overwrite the live pose directly, cancelling any transition
    pub fn set_pose(&mut self, pose: Pose) {
        self.cancel();
        self.pose = pose;
    }

    /// Advance the active transition by the wall-clock time since the last frame
    pub fn update(&mut self, delta_seconds: f32) -> Option<TransitionEvent> {
        let delta = if delta_seconds.is_finite() { delta_seconds.max(0.0) } else { 0.0 };

        let EngineState::Transitioning(transition) = &mut self.state else {
            return None;
        };

        let finished = transition.advance(delta);
        self.pose = transition.sample();
        if !finished {
            return None;
        }

        let token = transition.token();
        self.state = EngineState::Idle;
        debug!("Transition {} completed at {:?}", token.value(), self.pose.position);
        Some(TransitionEvent::Completed(token))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::{Quat, Vec3};

    #[test]
    fn idle_update_does_nothing() {
        let mut engine = TransitionEngine::new(Pose::at(Vec3::Z));
        assert_eq!(engine.update(1.0), None);
        assert_eq!(engine.pose(), Pose::at(Vec3::Z));
    }

    #[test]
    fn request_to_current_pose_is_noop_and_clears() {
        let mut engine = TransitionEngine::new(Pose::at(Vec3::ZERO));
        engine.request_transition(Pose::at(Vec3::X), 1.0, Easing::Linear);
        engine.update(0.5);
        let here = engine.pose();

        assert_eq!(engine.request_transition(here, 1.0, Easing::Linear), None);
        assert!(!engine.is_transitioning());
        assert_eq!(engine.update(1.0), None);
        assert_eq!(engine.pose(), here);
    }

    #[test]
    fn unspecified_target_fields_are_kept() {
        let rotation = Quat::from_rotation_y(0.5);
        let mut engine = TransitionEngine::new(Pose::at(Vec3::ZERO).with_orientation(rotation).with_zoom(2.0));
        engine.request_transition(Pose::at(Vec3::Y), 1.0, Easing::Linear);
        assert_eq!(engine.active().unwrap().target().orientation, Some(rotation));
        assert_eq!(engine.active().unwrap().target().zoom, Some(2.0));
    }

    #[test]
    fn completion_reports_token() {
        let mut engine = TransitionEngine::new(Pose::at(Vec3::ZERO));
        let token = engine.request_transition(Pose::at(Vec3::X), 0.5, Easing::EaseOut).unwrap();
        assert_eq!(engine.update(0.25), None);
        assert_eq!(engine.update(0.25), Some(TransitionEvent::Completed(token)));
        assert_eq!(engine.pose().position, Vec3::X);
        assert!(!engine.is_transitioning());
    }

    #[test]
    fn negative_delta_does_not_rewind() {
        let mut engine = TransitionEngine::new(Pose::at(Vec3::ZERO));
        engine.request_transition(Pose::at(Vec3::X), 1.0, Easing::Linear);
        engine.update(0.5);
        let before = engine.pose();
        engine.update(-0.3);
        assert_eq!(engine.pose(), before);
    }

    #[test]
    fn set_pose_cancels() {
        let mut engine = TransitionEngine::new(Pose::at(Vec3::ZERO));
        engine.request_transition(Pose::at(Vec3::X), 1.0, Easing::Linear);
        engine.set_pose(Pose::at(Vec3::NEG_Y));
        assert!(!engine.is_transitioning());
        assert_eq!(engine.update(1.0), None);
        assert_eq!(engine.pose().position, Vec3::NEG_Y);
    }
}
