use glam::Quat;

use crate::types::Pose;

/// Zoom assumed for a pose that never specified one
const NEUTRAL_ZOOM: f32 = 1.0;

/// Blend two poses at eased progress `t`.
///
/// Position and zoom interpolate linearly; orientation follows the shortest
/// arc. A side without orientation starts from identity (or holds the other
/// side's rotation when it is the target).
pub fn interpolate_pose(start: &Pose, target: &Pose, t: f32) -> Pose {
    let position = start.position.lerp(target.position, t);

    let orientation = match (start.orientation, target.orientation) {
        (None, None) => None,
        (from, to) => {
            let from = from.unwrap_or(Quat::IDENTITY);
            let to = to.unwrap_or(from);
            Some(slerp_shortest(from, to, t))
        }
    };

    let zoom = match (start.zoom, target.zoom) {
        (None, None) => None,
        (from, to) => {
            let from = from.unwrap_or(NEUTRAL_ZOOM);
            let to = to.unwrap_or(from);
            Some(from + (to - from) * t)
        }
    };

    Pose {
        position,
        orientation,
        zoom,
    }
}

/// Spherical interpolation that never takes the long way around
pub fn slerp_shortest(from: Quat, to: Quat, t: f32) -> Quat {
    let to = if from.dot(to) < 0.0 { -to } else { to };
    from.slerp(to, t).normalize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;
    use std::f32::consts::PI;

    #[test]
    fn position_lerps() {
        let a = Pose::at(Vec3::ZERO);
        let b = Pose::at(Vec3::new(10.0, 0.0, -4.0));
        let mid = interpolate_pose(&a, &b, 0.5);
        assert_eq!(mid.position, Vec3::new(5.0, 0.0, -2.0));
        assert_eq!(mid.orientation, None);
        assert_eq!(mid.zoom, None);
    }

    #[test]
    fn zoom_starts_from_neutral_when_unspecified() {
        let a = Pose::at(Vec3::ZERO);
        let b = Pose::at(Vec3::ZERO).with_zoom(3.0);
        assert_eq!(interpolate_pose(&a, &b, 0.5).zoom, Some(2.0));
    }

    #[test]
    fn rotation_takes_shortest_arc() {
        // 350 degrees one way is 10 degrees the other way
        let from = Quat::from_rotation_y(0.0);
        let to = Quat::from_rotation_y(350.0_f32.to_radians());
        let half = slerp_shortest(from, to, 0.5);
        let expected = Quat::from_rotation_y(-5.0_f32.to_radians());
        assert!(half.angle_between(expected) < 1e-4);
    }

    #[test]
    fn rotation_handles_negated_quaternions() {
        let from = Quat::from_rotation_x(PI / 4.0);
        let to = -Quat::from_rotation_x(PI / 2.0);
        let half = slerp_shortest(from, to, 0.5);
        let expected = Quat::from_rotation_x(3.0 * PI / 8.0);
        assert!(half.angle_between(expected) < 1e-4);
    }

    #[test]
    fn missing_target_orientation_holds_start() {
        let rotation = Quat::from_rotation_z(0.3);
        let a = Pose::at(Vec3::ZERO).with_orientation(rotation);
        let b = Pose::at(Vec3::ONE);
        let sampled = interpolate_pose(&a, &b, 0.7).orientation.unwrap();
        assert!(sampled.angle_between(rotation) < 1e-5);
    }
}
