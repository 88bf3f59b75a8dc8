use glam::{Mat3, Mat4, Quat, Vec2, Vec3};

use crate::types::Pose;

/// Orbiting stops this far short of straight up/down (radians from horizon)
pub const MAX_ORBIT_PITCH: f32 = 1.5;
/// 50 degrees, the usual default of web viewers
pub const DEFAULT_FOV_Y: f32 = 0.872_664_6;

const NEAR_PLANE: f32 = 0.1;
const FAR_PLANE: f32 = 1000.0;

/// Rotation whose -Z axis points from `eye` towards `target`, Y up
pub fn look_rotation(eye: Vec3, target: Vec3) -> Quat {
    let forward = target - eye;
    if forward.length_squared() <= f32::EPSILON {
        return Quat::IDENTITY;
    }
    let forward = forward.normalize();
    let world_up = if forward.y.abs() > 0.999 { Vec3::Z } else { Vec3::Y };
    let right = forward.cross(world_up).normalize();
    let up = right.cross(forward);
    Quat::from_mat3(&Mat3::from_cols(right, up, -forward)).normalize()
}

/// Rotate the camera around `pivot` by yaw (about world Y) and pitch,
/// keeping its distance. Pitch is clamped short of the poles.
pub fn orbit(pose: &Pose, pivot: Vec3, yaw: f32, pitch: f32) -> Pose {
    let offset = pose.position - pivot;
    let radius = offset.length();
    if radius <= f32::EPSILON {
        return *pose;
    }

    let start_yaw = offset.x.atan2(offset.z);
    let start_pitch = (offset.y / radius).clamp(-1.0, 1.0).asin();
    let yaw = start_yaw + yaw;
    let pitch = (start_pitch + pitch).clamp(-MAX_ORBIT_PITCH, MAX_ORBIT_PITCH);

    let new_offset = Vec3::new(pitch.cos() * yaw.sin(), pitch.sin(), pitch.cos() * yaw.cos()) * radius;
    let orientation = pose.orientation.map(|rotation| {
        (Quat::from_rotation_arc(offset / radius, new_offset / radius) * rotation).normalize()
    });

    Pose {
        position: pivot + new_offset,
        orientation,
        zoom: pose.zoom,
    }
}

/// Slide camera and pivot together along the camera's right/up axes (world units)
pub fn pan(pose: &Pose, pivot: Vec3, right_amount: f32, up_amount: f32) -> (Pose, Vec3) {
    let rotation = pose
        .orientation
        .unwrap_or_else(|| look_rotation(pose.position, pivot));
    let shift = rotation * Vec3::X * right_amount + rotation * Vec3::Y * up_amount;
    let moved = Pose {
        position: pose.position + shift,
        ..*pose
    };
    (moved, pivot + shift)
}

/// Multiply the zoom factor, clamped to `[min_zoom, max_zoom]`
pub fn zoom(pose: &Pose, factor: f32, min_zoom: f32, max_zoom: f32) -> Pose {
    let current = pose.zoom.unwrap_or(1.0);
    let factor = if factor.is_finite() && factor > 0.0 { factor } else { 1.0 };
    Pose {
        zoom: Some((current * factor).clamp(min_zoom, max_zoom)),
        ..*pose
    }
}

/// Render-facing camera built from a pose
#[derive(Debug, Clone, Copy)]
pub struct ViewCamera {
    pub pose: Pose,
    pub pivot: Vec3,
    pub fov_y: f32,
}

impl ViewCamera {
    pub fn new(pose: Pose, pivot: Vec3) -> Self {
        Self {
            pose,
            pivot,
            fov_y: DEFAULT_FOV_Y,
        }
    }

    /// Explicit orientation, or looking at the pivot when the pose has none
    pub fn rotation(&self) -> Quat {
        self.pose
            .orientation
            .unwrap_or_else(|| look_rotation(self.pose.position, self.pivot))
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.rotation(), self.pose.position).inverse()
    }

    /// Perspective projection; zoom narrows the field of view
    pub fn projection(&self, aspect: f32) -> Mat4 {
        let zoom = self.pose.zoom.unwrap_or(1.0).max(f32::EPSILON);
        Mat4::perspective_rh(self.fov_y / zoom, aspect.max(f32::EPSILON), NEAR_PLANE, FAR_PLANE)
    }

    pub fn view_projection(&self, aspect: f32) -> Mat4 {
        self.projection(aspect) * self.view_matrix()
    }

    /// Screen position (origin top-left) of a world point, `None` when behind the camera
    pub fn project(&self, point: Vec3, viewport: Vec2) -> Option<Vec2> {
        let aspect = viewport.x / viewport.y.max(1.0);
        let clip = self.view_projection(aspect) * point.extend(1.0);
        if clip.w <= NEAR_PLANE {
            return None;
        }
        let ndc = clip.truncate() / clip.w;
        Some(Vec2::new(
            (ndc.x * 0.5 + 0.5) * viewport.x,
            (0.5 - ndc.y * 0.5) * viewport.y,
        ))
    }
}
