use crate::types::Pose;

/// Camera driven once per rendered frame by the render host
pub trait CameraRig {
    /// Advance by the wall-clock time since the previous frame
    fn update(&mut self, delta_seconds: f32);

    /// Pose to apply to the renderable camera this frame
    fn pose(&self) -> Pose;

    /// Whether the camera is still moving on its own
    fn is_animating(&self) -> bool;
}
