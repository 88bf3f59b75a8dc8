use glam::Vec3;
use log::debug;
use serde::{Deserialize, Serialize};

use super::engine::TransitionEngine;
use super::gesture::{GestureKind, InputEvent};
use crate::camera;
use crate::types::InputMode;

/// What happens to programmatic navigation while the user is dragging
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum InputPriority {
    /// Refuse requests; the UI shows them as busy
    #[default]
    GestureWins,
    /// Keep the latest request and run it on release
    QueueRequests,
}

/// Verdict on a programmatic navigation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    Proceed,
    Refuse,
    Queue,
}

/// Effect of one input event on camera ownership
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureOutcome {
    /// Nothing changed
    Ignored,
    /// A button is held, but the camera has not moved yet
    Armed,
    /// The user just took the camera over, cancelling any transition
    TookControl,
    /// The user moved a camera they already own
    Moved,
    /// The user let go of the camera
    Released,
    /// Wheel or pinch step: took control, moved and released in one go
    Momentary,
}

impl GestureOutcome {
    pub fn took_control(self) -> bool {
        matches!(self, GestureOutcome::TookControl | GestureOutcome::Momentary)
    }

    pub fn released(self) -> bool {
        matches!(self, GestureOutcome::Released | GestureOutcome::Momentary)
    }
}

/// Gesture sensitivities and zoom bounds
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureSettings {
    /// Radians per pixel
    pub orbit_speed: f32,
    /// World units per pixel
    pub pan_speed: f32,
    /// Relative zoom per wheel line
    pub zoom_speed: f32,
    pub min_zoom: f32,
    pub max_zoom: f32,
}

impl Default for GestureSettings {
    fn default() -> Self {
        Self {
            orbit_speed: 0.005,
            pan_speed: 0.01,
            zoom_speed: 0.1,
            min_zoom: 1.0,
            max_zoom: 3.0,
        }
    }
}

/// Decides who owns the camera: the user's gestures or programmatic transitions.
///
/// Gestures always win. The first real movement of a held button (or any
/// wheel/pinch step) cancels the active transition on the spot, and from then
/// on the arbiter writes the pose straight into the engine until release.
#[derive(Debug, Clone)]
pub struct InputArbiter {
    priority: InputPriority,
    settings: GestureSettings,
    pivot: Vec3,
    held: Option<GestureKind>,
    driving: bool,
}

impl InputArbiter {
    pub fn new(priority: InputPriority, settings: GestureSettings, pivot: Vec3) -> Self {
        Self {
            priority,
            settings,
            pivot,
            held: None,
            driving: false,
        }
    }

    pub fn handle(&mut self, event: InputEvent, engine: &mut TransitionEngine) -> GestureOutcome {
        match event {
            InputEvent::Press(kind) => {
                self.held = Some(kind);
                GestureOutcome::Armed
            }
            InputEvent::Drag { dx, dy } => {
                let Some(kind) = self.held else {
                    return GestureOutcome::Ignored;
                };
                if dx == 0.0 && dy == 0.0 {
                    return GestureOutcome::Ignored;
                }
                let took = self.take_control(engine);
                self.apply_drag(kind, dx, dy, engine);
                if took {
                    GestureOutcome::TookControl
                } else {
                    GestureOutcome::Moved
                }
            }
            InputEvent::Wheel(lines) => {
                if lines == 0.0 || !lines.is_finite() {
                    return GestureOutcome::Ignored;
                }
                let factor = (1.0 + self.settings.zoom_speed).powf(lines);
                self.apply_momentary_zoom(factor, engine)
            }
            InputEvent::Pinch(delta) => {
                if delta == 0.0 || !delta.is_finite() {
                    return GestureOutcome::Ignored;
                }
                self.apply_momentary_zoom(1.0 + delta, engine)
            }
            InputEvent::Release => {
                self.held = None;
                if self.driving {
                    self.driving = false;
                    debug!("Gesture released, camera back to idle");
                    GestureOutcome::Released
                } else {
                    GestureOutcome::Ignored
                }
            }
        }
    }

    /// Whether a programmatic request may start now
    pub fn admit(&self) -> Admission {
        if !self.driving {
            return Admission::Proceed;
        }
        match self.priority {
            InputPriority::GestureWins => Admission::Refuse,
            InputPriority::QueueRequests => Admission::Queue,
        }
    }

    pub fn mode(&self, transitioning: bool) -> InputMode {
        if self.driving {
            InputMode::UserDrag
        } else if transitioning {
            InputMode::Programmatic
        } else {
            InputMode::Idle
        }
    }

    pub fn is_user_driving(&self) -> bool {
        self.driving
    }

    pub fn priority(&self) -> InputPriority {
        self.priority
    }

    pub fn settings(&self) -> &GestureSettings {
        &self.settings
    }

    /// Point the camera orbits around and looks at
    pub fn pivot(&self) -> Vec3 {
        self.pivot
    }

    fn take_control(&mut self, engine: &mut TransitionEngine) -> bool {
        if self.driving {
            return false;
        }
        if let Some(token) = engine.cancel() {
            debug!("Gesture interrupted transition {}", token.value());
        }
        self.driving = true;
        true
    }

    fn apply_drag(&mut self, kind: GestureKind, dx: f32, dy: f32, engine: &mut TransitionEngine) {
        let pose = engine.pose();
        let settings = self.settings;
        let moved = match kind {
            GestureKind::Orbit => camera::orbit(
                &pose,
                self.pivot,
                -dx * settings.orbit_speed,
                dy * settings.orbit_speed,
            ),
            GestureKind::Pan => {
                let (moved, pivot) = camera::pan(
                    &pose,
                    self.pivot,
                    -dx * settings.pan_speed,
                    dy * settings.pan_speed,
                );
                self.pivot = pivot;
                moved
            }
            GestureKind::Zoom => {
                let factor = (1.0 + settings.zoom_speed).powf(-dy * 0.1);
                camera::zoom(&pose, factor, settings.min_zoom, settings.max_zoom)
            }
        };
        engine.set_pose(moved);
    }

    fn apply_momentary_zoom(&mut self, factor: f32, engine: &mut TransitionEngine) -> GestureOutcome {
        let already_driving = self.driving;
        self.take_control(engine);
        let settings = self.settings;
        let zoomed = camera::zoom(&engine.pose(), factor, settings.min_zoom, settings.max_zoom);
        engine.set_pose(zoomed);

        if already_driving {
            GestureOutcome::Moved
        } else if self.held.is_some() {
            GestureOutcome::TookControl
        } else {
            self.driving = false;
            GestureOutcome::Momentary
        }
    }
}
