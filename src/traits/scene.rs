use glam::Mat4;

use crate::scene::{NodeTransform, ObjectId};

/// Read-only view of a scene graph owned by the asset loader.
///
/// Ids are only meaningful for the graph that produced them and are never
/// held across frames by the navigation core.
pub trait SceneLookup {
    /// Find a node by name
    fn object_by_name(&self, name: &str) -> Option<ObjectId>;

    /// World transform, composed over the full ancestor chain
    fn world_transform(&self, id: ObjectId) -> Option<Mat4>;

    /// Transform relative to the parent node
    fn local_transform(&self, id: ObjectId) -> Option<NodeTransform>;
}
