use std::path::Path;

use glam::{EulerRot, Quat, Vec3};
use log::info;
use serde::{Deserialize, Serialize};

use crate::core::{GestureSettings, InputPriority, DEFAULT_MAX_DELTA};
use crate::error::ConfigError;
use crate::math::Easing;
use crate::registry::{ViewpointRegistry, GALLERY_VIEWPOINTS};
use crate::scene::NodeTransform;
use crate::types::{Pose, Viewpoint};

/// One entry of the viewpoint table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewpointDef {
    pub id: String,
    pub position: [f32; 3],
    /// Euler angles (XYZ order, radians)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rotation: Option<[f32; 3]>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub zoom: Option<f32>,
}

impl ViewpointDef {
    pub fn to_viewpoint(&self) -> Viewpoint {
        let mut pose = Pose::at(Vec3::from_array(self.position));
        if let Some([x, y, z]) = self.rotation {
            pose = pose.with_orientation(Quat::from_euler(EulerRot::XYZ, x, y, z));
        }
        if let Some(zoom) = self.zoom {
            pose = pose.with_zoom(zoom);
        }
        Viewpoint::new(self.id.clone(), pose)
    }
}

/// Opening camera move: start `dolly` units back and glide in
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IntroConfig {
    pub dolly: f32,
    pub duration: f32,
}

impl Default for IntroConfig {
    fn default() -> Self {
        Self {
            dolly: 10.0,
            duration: 1.6,
        }
    }
}

/// Everything the navigation core can be configured with.
///
/// Loaded from JSON with camelCase keys; every field has a default, so an
/// empty object `{}` yields the stock gallery setup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NavigationConfig {
    /// Transition length in seconds
    pub duration: f32,
    pub easing: Easing,
    pub min_zoom: f32,
    pub max_zoom: f32,
    pub input_priority: InputPriority,
    pub orbit_speed: f32,
    pub pan_speed: f32,
    pub zoom_speed: f32,
    /// Initial orbit pivot
    pub pivot: [f32; 3],
    /// Longest frame step in seconds
    pub max_frame_delta: f32,
    /// Camera offset applied to object-derived viewpoints
    pub standoff: [f32; 3],
    pub viewpoints: Vec<ViewpointDef>,
    /// Scene objects shown as clickable markers
    pub hotspots: Vec<String>,
    /// Translation of the group the scene is mounted under
    pub scene_offset: [f32; 3],
    pub intro: Option<IntroConfig>,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self {
            duration: 1.5,
            easing: Easing::EaseOut,
            min_zoom: 1.0,
            max_zoom: 3.0,
            input_priority: InputPriority::GestureWins,
            orbit_speed: 0.005,
            pan_speed: 0.01,
            zoom_speed: 0.1,
            pivot: [0.0, 0.0, 0.0],
            max_frame_delta: DEFAULT_MAX_DELTA,
            standoff: [0.0, 0.0, 0.0],
            viewpoints: GALLERY_VIEWPOINTS
                .iter()
                .map(|(id, position)| ViewpointDef {
                    id: id.to_string(),
                    position: *position,
                    rotation: None,
                    zoom: None,
                })
                .collect(),
            hotspots: Vec::new(),
            scene_offset: [0.0, -3.0, 1.0],
            intro: Some(IntroConfig::default()),
        }
    }
}

impl NavigationConfig {
    /// Read and validate a JSON config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)?;
        let config = Self::from_json(&text)?;
        info!(
            "Loaded navigation config from {:?}: {} viewpoints, {} hotspots",
            path,
            config.viewpoints.len(),
            config.hotspots.len()
        );
        Ok(config)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.min_zoom.is_finite() && self.min_zoom > 0.0) {
            return Err(ConfigError::invalid(format!("minZoom must be positive, got {}", self.min_zoom)));
        }
        if !(self.max_zoom.is_finite() && self.max_zoom > 0.0) {
            return Err(ConfigError::invalid(format!("maxZoom must be positive, got {}", self.max_zoom)));
        }
        if self.min_zoom > self.max_zoom {
            return Err(ConfigError::invalid(format!(
                "minZoom {} exceeds maxZoom {}",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.duration.is_finite() && self.duration >= 0.0) {
            return Err(ConfigError::invalid(format!("duration must be >= 0, got {}", self.duration)));
        }
        if !(self.max_frame_delta.is_finite() && self.max_frame_delta > 0.0) {
            return Err(ConfigError::invalid(format!(
                "maxFrameDelta must be positive, got {}",
                self.max_frame_delta
            )));
        }
        for (name, speed) in [
            ("orbitSpeed", self.orbit_speed),
            ("panSpeed", self.pan_speed),
            ("zoomSpeed", self.zoom_speed),
        ] {
            if !(speed.is_finite() && speed >= 0.0) {
                return Err(ConfigError::invalid(format!("{name} must be >= 0, got {speed}")));
            }
        }
        if let Some(intro) = self.intro {
            if !(intro.dolly.is_finite() && intro.duration.is_finite() && intro.duration >= 0.0) {
                return Err(ConfigError::invalid("intro needs a finite dolly and a duration >= 0"));
            }
        }
        if let Some(zoom) = self.viewpoints.iter().filter_map(|def| def.zoom).find(|zoom| *zoom <= 0.0) {
            return Err(ConfigError::invalid(format!("viewpoint zoom must be positive, got {zoom}")));
        }
        // Empty and duplicate tables are rejected by the registry itself
        self.registry().map(|_| ())
    }

    pub fn registry(&self) -> Result<ViewpointRegistry, ConfigError> {
        ViewpointRegistry::new(self.viewpoints.iter().map(ViewpointDef::to_viewpoint).collect())
    }

    pub fn gesture_settings(&self) -> GestureSettings {
        GestureSettings {
            orbit_speed: self.orbit_speed,
            pan_speed: self.pan_speed,
            zoom_speed: self.zoom_speed,
            min_zoom: self.min_zoom,
            max_zoom: self.max_zoom,
        }
    }

    pub fn pivot(&self) -> Vec3 {
        Vec3::from_array(self.pivot)
    }

    pub fn standoff(&self) -> Vec3 {
        Vec3::from_array(self.standoff)
    }

    /// Transform of the group the loaded scene hangs under
    pub fn scene_root(&self) -> NodeTransform {
        NodeTransform::from_translation(Vec3::from_array(self.scene_offset))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_json_gives_gallery_defaults() {
        let config = NavigationConfig::from_json("{}").unwrap();
        assert_eq!(config, NavigationConfig::default());
        assert_eq!(config.registry().unwrap().len(), 6);
    }

    #[test]
    fn camel_case_keys_are_read() {
        let config = NavigationConfig::from_json(
            r#"{
                "duration": 0.8,
                "easing": "ease-in-out",
                "minZoom": 0.5,
                "maxZoom": 4,
                "inputPriority": "queue-requests",
                "viewpoints": [
                    { "id": "front", "position": [0, 0, 5] },
                    { "id": "top", "position": [0, 5, 0], "rotation": [-1.5707964, 0, 0], "zoom": 2 }
                ],
                "intro": null
            }"#,
        )
        .unwrap();

        assert_eq!(config.duration, 0.8);
        assert_eq!(config.easing, Easing::EaseInOut);
        assert_eq!(config.input_priority, InputPriority::QueueRequests);
        assert_eq!(config.intro, None);

        let registry = config.registry().unwrap();
        let top = registry.get("top").unwrap();
        assert_eq!(top.zoom, Some(2.0));
        assert!(top.orientation.is_some());
    }

    #[test]
    fn rejects_bad_zoom_bounds() {
        for json in [
            r#"{ "minZoom": 0 }"#,
            r#"{ "maxZoom": -1 }"#,
            r#"{ "minZoom": 4, "maxZoom": 3 }"#,
        ] {
            let result = NavigationConfig::from_json(json);
            assert!(
                matches!(result, Err(ConfigError::InvalidConfiguration(_))),
                "{json} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_empty_and_duplicate_tables() {
        assert!(matches!(
            NavigationConfig::from_json(r#"{ "viewpoints": [] }"#),
            Err(ConfigError::InvalidConfiguration(_))
        ));
        assert!(matches!(
            NavigationConfig::from_json(
                r#"{ "viewpoints": [ { "id": "a", "position": [0,0,0] }, { "id": "a", "position": [1,0,0] } ] }"#
            ),
            Err(ConfigError::InvalidConfiguration(_))
        ));
    }

    #[test]
    fn rejects_unknown_easing_and_priority() {
        assert!(matches!(
            NavigationConfig::from_json(r#"{ "easing": "wobble" }"#),
            Err(ConfigError::Json(_))
        ));
        assert!(matches!(
            NavigationConfig::from_json(r#"{ "inputPriority": "first-come" }"#),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn rejects_negative_duration() {
        assert!(NavigationConfig::from_json(r#"{ "duration": -1 }"#).is_err());
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = NavigationConfig::load("/definitely/not/here.json");
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
