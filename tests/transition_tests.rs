use gallery_viewer::core::{TransitionEngine, TransitionEvent};
use gallery_viewer::math::{interpolate_pose, Easing};
use gallery_viewer::types::Pose;
use glam::{Quat, Vec3};

#[cfg(test)]
mod transition_tests {
    use super::*;

    fn engine_at(position: Vec3) -> TransitionEngine {
        TransitionEngine::new(Pose::at(position))
    }

    #[test]
    fn test_every_easing_lands_exactly_on_target() {
        let target = Pose::at(Vec3::new(-1.5, -1.5, -10.0))
            .with_orientation(Quat::from_rotation_y(0.7))
            .with_zoom(2.0);

        for easing in Easing::ALL {
            let mut engine = engine_at(Vec3::new(0.0, 0.0, 12.0));
            engine.request_transition(target, 1.5, easing);

            let mut completed = None;
            for _ in 0..200 {
                if let Some(event) = engine.update(1.0 / 60.0) {
                    completed = Some(event);
                    break;
                }
            }
            assert!(completed.is_some(), "{easing} never completed");
            assert_eq!(engine.pose(), target, "{easing} did not snap");
        }
    }

    #[test]
    fn test_progress_is_monotonic_along_path() {
        let start = Vec3::new(0.0, 0.0, 12.0);
        let target = Vec3::new(0.0, -1.0, 8.0);
        let mut engine = engine_at(start);
        engine.request_transition(Pose::at(target), 1.5, Easing::EaseOut);

        let mut last = 0.0;
        while engine.is_transitioning() {
            engine.update(0.05);
            let travelled = (engine.pose().position - start).length();
            assert!(travelled >= last - 1e-5);
            last = travelled;
        }
        assert_eq!(engine.pose().position, target);
    }

    #[test]
    fn test_superseded_token_never_completes() {
        let mut engine = engine_at(Vec3::ZERO);
        let first = engine.request_transition(Pose::at(Vec3::X), 1.0, Easing::Linear).unwrap();
        engine.update(0.5);
        let second = engine.request_transition(Pose::at(Vec3::Y), 1.0, Easing::Linear).unwrap();
        assert_ne!(first, second);

        let mut events = Vec::new();
        for _ in 0..10 {
            events.extend(engine.update(0.25));
        }
        assert_eq!(events, vec![TransitionEvent::Completed(second)]);
    }

    #[test]
    fn test_interrupted_transition_has_no_jump() {
        let mut engine = engine_at(Vec3::ZERO);
        engine.request_transition(Pose::at(Vec3::new(10.0, 0.0, 0.0)), 1.0, Easing::EaseInOut);
        engine.update(0.4);
        let live = engine.pose();

        engine.request_transition(Pose::at(Vec3::new(0.0, 10.0, 0.0)), 1.0, Easing::EaseInOut);
        assert_eq!(engine.pose(), live);
        engine.update(0.0);
        assert_eq!(engine.pose().position, live.position);
    }

    #[test]
    fn test_interpolation_uses_shortest_arc() {
        let start = Pose::at(Vec3::ZERO).with_orientation(Quat::from_rotation_y(0.1));
        // Same rotation as -0.1 rad, stored on the far hemisphere
        let target = Pose::at(Vec3::ZERO).with_orientation(-Quat::from_rotation_y(-0.1));

        let halfway = interpolate_pose(&start, &target, 0.5);
        let angle = halfway.orientation.unwrap().angle_between(Quat::IDENTITY);
        assert!(angle < 1e-3, "halfway should be near identity, got {angle}");
    }

    #[test]
    fn test_unspecified_zoom_interpolates_from_neutral() {
        let start = Pose::at(Vec3::ZERO);
        let target = Pose::at(Vec3::ZERO).with_zoom(3.0);
        let halfway = interpolate_pose(&start, &target, 0.5);
        assert_eq!(halfway.zoom, Some(2.0));
    }
}
