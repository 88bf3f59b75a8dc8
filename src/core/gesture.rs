/// What a held pointer or touch does to the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GestureKind {
    Orbit,
    Pan,
    Zoom,
}

/// Raw user input, already decoded from the windowing system
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum InputEvent {
    /// Button or touch went down; the gesture starts with the first drag.
    /// Pressing again while held switches the gesture kind.
    Press(GestureKind),
    /// Pointer motion in physical pixels while pressed
    Drag { dx: f32, dy: f32 },
    /// Wheel steps in lines, positive zooms in
    Wheel(f32),
    /// Pinch magnification delta, positive zooms in
    Pinch(f32),
    /// All buttons and touches released
    Release,
}
