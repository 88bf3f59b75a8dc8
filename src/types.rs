use glam::{Quat, Vec3};

/// Camera placement snapshot: where the camera sits, optionally how it is
/// rotated and how far it is zoomed in.
///
/// A pose without orientation looks at the orbit pivot; a pose without zoom
/// keeps whatever zoom the camera already has.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub orientation: Option<Quat>,
    pub zoom: Option<f32>,
}

impl Pose {
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: None,
            zoom: None,
        }
    }

    pub const fn with_orientation(mut self, orientation: Quat) -> Self {
        self.orientation = Some(orientation);
        self
    }

    pub const fn with_zoom(mut self, zoom: f32) -> Self {
        self.zoom = Some(zoom);
        self
    }

    /// Fill the fields this pose leaves unspecified from `base`
    pub fn completed_from(&self, base: &Pose) -> Pose {
        Pose {
            position: self.position,
            orientation: self.orientation.or(base.orientation),
            zoom: self.zoom.or(base.zoom),
        }
    }

    pub fn is_finite(&self) -> bool {
        self.position.is_finite()
            && self.orientation.map_or(true, |q| q.is_finite())
            && self.zoom.map_or(true, f32::is_finite)
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::at(Vec3::ZERO)
    }
}

/// Where a viewpoint came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewpointSource {
    /// Declared in the viewpoint table
    Static,
    /// Computed from a named scene object on demand
    DerivedFromObject,
}

/// A named target camera pose
#[derive(Debug, Clone, PartialEq)]
pub struct Viewpoint {
    pub id: String,
    pub pose: Pose,
    pub source: ViewpointSource,
}

impl Viewpoint {
    pub fn new(id: impl Into<String>, pose: Pose) -> Self {
        Self {
            id: id.into(),
            pose,
            source: ViewpointSource::Static,
        }
    }

    pub fn derived(id: impl Into<String>, pose: Pose) -> Self {
        Self {
            id: id.into(),
            pose,
            source: ViewpointSource::DerivedFromObject,
        }
    }
}

/// Who currently drives the camera
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum InputMode {
    #[default]
    Idle,
    UserDrag,
    Programmatic,
}

/// Presentation hints for a hotspot marker, taken from the object's local transform
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarkerHint {
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for MarkerHint {
    fn default() -> Self {
        Self {
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}
