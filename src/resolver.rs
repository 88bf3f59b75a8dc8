use glam::Vec3;
use log::debug;

use crate::traits::SceneLookup;
use crate::types::{MarkerHint, Pose, Viewpoint};

/// Prefix of ids synthesized for object-derived viewpoints
pub const OBJECT_ID_PREFIX: &str = "object:";

/// Result of resolving a named scene object
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedObject {
    pub viewpoint: Viewpoint,
    pub world_position: Vec3,
    pub marker: MarkerHint,
}

/// Turns named scene objects into ad-hoc viewpoints.
///
/// Nothing is cached: every call looks the name up again, because the scene
/// graph belongs to the asset loader and may be replaced or still loading.
#[derive(Debug, Clone, Copy, Default)]
pub struct ObjectResolver {
    standoff: Vec3,
}

impl ObjectResolver {
    /// `standoff` is added to the object's world position to place the camera
    pub fn new(standoff: Vec3) -> Self {
        Self { standoff }
    }

    pub fn synthetic_id(name: &str) -> String {
        format!("{OBJECT_ID_PREFIX}{name}")
    }

    /// `None` when there is no scene yet or the name is absent from it
    pub fn resolve(&self, scene: Option<&dyn SceneLookup>, name: &str) -> Option<ResolvedObject> {
        let Some(scene) = scene else {
            debug!("No scene graph loaded, cannot resolve '{}'", name);
            return None;
        };

        let id = scene.object_by_name(name)?;
        let world = scene.world_transform(id)?;
        let local = scene.local_transform(id)?;

        let world_position = world.transform_point3(Vec3::ZERO);
        let pose = Pose::at(world_position + self.standoff);

        Some(ResolvedObject {
            viewpoint: Viewpoint::derived(Self::synthetic_id(name), pose),
            world_position,
            marker: MarkerHint {
                rotation: local.rotation,
                scale: local.scale,
            },
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{NodeTransform, SceneGraph};
    use crate::types::ViewpointSource;
    use glam::Quat;

    fn gallery_scene() -> SceneGraph {
        let mut scene = SceneGraph::new();
        let root = scene
            .add_node(None, None, NodeTransform::from_translation(Vec3::new(0.0, -3.0, 1.0)))
            .unwrap();
        scene
            .add_node(
                Some("Plant004"),
                Some(root),
                NodeTransform {
                    translation: Vec3::new(2.0, 0.5, -4.0),
                    rotation: Quat::from_rotation_y(0.25),
                    scale: Vec3::splat(2.0),
                },
            )
            .unwrap();
        scene
    }

    #[test]
    fn resolves_world_position_through_root() {
        let scene = gallery_scene();
        let resolved = ObjectResolver::default()
            .resolve(Some(&scene), "Plant004")
            .unwrap();

        assert!((resolved.world_position - Vec3::new(2.0, -2.5, -3.0)).length() < 1e-5);
        assert_eq!(resolved.viewpoint.pose.position, resolved.world_position);
        assert_eq!(resolved.viewpoint.id, "object:Plant004");
        assert_eq!(resolved.viewpoint.source, ViewpointSource::DerivedFromObject);
    }

    #[test]
    fn marker_uses_local_rotation_and_scale() {
        let scene = gallery_scene();
        let resolved = ObjectResolver::default()
            .resolve(Some(&scene), "Plant004")
            .unwrap();
        assert_eq!(resolved.marker.rotation, Quat::from_rotation_y(0.25));
        assert_eq!(resolved.marker.scale, Vec3::splat(2.0));
    }

    #[test]
    fn standoff_offsets_camera_only() {
        let scene = gallery_scene();
        let resolved = ObjectResolver::new(Vec3::new(0.0, 0.0, 3.0))
            .resolve(Some(&scene), "Plant004")
            .unwrap();
        let offset = resolved.viewpoint.pose.position - resolved.world_position;
        assert!((offset - Vec3::new(0.0, 0.0, 3.0)).length() < 1e-5);
    }

    #[test]
    fn missing_scene_or_name_is_none() {
        let resolver = ObjectResolver::default();
        assert!(resolver.resolve(None, "Plant004").is_none());

        let scene = gallery_scene();
        assert!(resolver.resolve(Some(&scene), "Plant005").is_none());
    }
}
