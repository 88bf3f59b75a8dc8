use std::collections::HashMap;

use winit::dpi::PhysicalPosition;
use winit::event::{ElementState, MouseButton, MouseScrollDelta, Touch, TouchPhase, WindowEvent};

use super::gesture::{GestureKind, InputEvent};

/// Pixel-precise wheels report this many pixels per notch
const PIXELS_PER_LINE: f32 = 50.0;

/// Adapter that turns winit window events into camera gestures.
///
/// Mouse: left drag orbits, right drag pans, middle drag zooms, wheel zooms.
/// Touch: one finger orbits, two fingers pinch-zoom.
#[derive(Debug, Clone, Default)]
pub struct WinitGestureAdapter {
    /// Mouse button driving the current gesture
    held: Option<MouseButton>,
    /// Last cursor position (relative to window)
    cursor: Option<(f32, f32)>,
    /// Active touch points by id
    touches: HashMap<u64, (f32, f32)>,
    /// Finger spread at the previous pinch step
    pinch_distance: Option<f32>,
}

impl WinitGestureAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a Winit WindowEvent, returning the gesture it represents (if any)
    pub fn process_event(&mut self, event: &WindowEvent) -> Option<InputEvent> {
        match event {
            WindowEvent::MouseInput { state, button, .. } => {
                let kind = Self::mouse_button_to_gesture(*button)?;
                match state {
                    ElementState::Pressed => {
                        self.held = Some(*button);
                        Some(InputEvent::Press(kind))
                    }
                    ElementState::Released if self.held == Some(*button) => {
                        self.held = None;
                        Some(InputEvent::Release)
                    }
                    ElementState::Released => None,
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let new_pos = (position.x as f32, position.y as f32);
                let old_pos = self.cursor.replace(new_pos);
                match (self.held, old_pos) {
                    (Some(_), Some(old)) => Some(InputEvent::Drag {
                        dx: new_pos.0 - old.0,
                        dy: new_pos.1 - old.1,
                    }),
                    _ => None,
                }
            }
            WindowEvent::CursorLeft { .. } | WindowEvent::Focused(false) => {
                self.cursor = None;
                self.held.take().map(|_| InputEvent::Release)
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let lines = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(position) => position.y as f32 / PIXELS_PER_LINE,
                };
                Some(InputEvent::Wheel(lines))
            }
            WindowEvent::PinchGesture { delta, .. } => Some(InputEvent::Pinch(*delta as f32)),
            WindowEvent::Touch(Touch {
                id, phase, location, ..
            }) => self.process_touch(*id, *phase, *location),
            _ => None,
        }
    }

    /// Events a running gesture must see even when the UI overlay consumed
    /// them: the pointer may cross a panel mid-drag.
    pub fn tracks_consumed(event: &WindowEvent) -> bool {
        matches!(
            event,
            WindowEvent::MouseInput {
                state: ElementState::Released,
                ..
            } | WindowEvent::CursorMoved { .. }
                | WindowEvent::CursorLeft { .. }
                | WindowEvent::Focused(false)
                | WindowEvent::Touch(Touch {
                    phase: TouchPhase::Moved | TouchPhase::Ended | TouchPhase::Cancelled,
                    ..
                })
        )
    }

    /// Whether a mouse button or touch is currently held
    pub fn is_pressed(&self) -> bool {
        self.held.is_some() || !self.touches.is_empty()
    }

    pub fn cursor_position(&self) -> Option<(f32, f32)> {
        self.cursor
    }

    fn process_touch(
        &mut self,
        id: u64,
        phase: TouchPhase,
        location: PhysicalPosition<f64>,
    ) -> Option<InputEvent> {
        let point = (location.x as f32, location.y as f32);
        match phase {
            TouchPhase::Started => {
                self.touches.insert(id, point);
                match self.touches.len() {
                    1 => Some(InputEvent::Press(GestureKind::Orbit)),
                    2 => {
                        self.pinch_distance = self.touch_spread();
                        Some(InputEvent::Press(GestureKind::Zoom))
                    }
                    _ => None,
                }
            }
            TouchPhase::Moved => {
                let old = self.touches.insert(id, point)?;
                match self.touches.len() {
                    1 => Some(InputEvent::Drag {
                        dx: point.0 - old.0,
                        dy: point.1 - old.1,
                    }),
                    2 => {
                        let spread = self.touch_spread()?;
                        let previous = self.pinch_distance.replace(spread)?;
                        (previous > 0.0).then(|| InputEvent::Pinch(spread / previous - 1.0))
                    }
                    _ => None,
                }
            }
            TouchPhase::Ended | TouchPhase::Cancelled => {
                self.touches.remove(&id)?;
                self.pinch_distance = None;
                match self.touches.len() {
                    0 => Some(InputEvent::Release),
                    1 => Some(InputEvent::Press(GestureKind::Orbit)),
                    _ => None,
                }
            }
        }
    }

    /// Distance between the two active touches
    fn touch_spread(&self) -> Option<f32> {
        let mut points = self.touches.values();
        let a = points.next()?;
        let b = points.next()?;
        Some(((a.0 - b.0).powi(2) + (a.1 - b.1).powi(2)).sqrt())
    }

    /// Map Winit MouseButton to a gesture
    fn mouse_button_to_gesture(button: MouseButton) -> Option<GestureKind> {
        match button {
            MouseButton::Left => Some(GestureKind::Orbit),
            MouseButton::Right => Some(GestureKind::Pan),
            MouseButton::Middle => Some(GestureKind::Zoom),
            _ => None,
        }
    }
}
