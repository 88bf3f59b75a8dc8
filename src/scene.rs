use std::collections::HashMap;

use glam::{Mat4, Quat, Vec3};

use crate::traits::SceneLookup;

/// Handle into a [`SceneGraph`] table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObjectId(usize);

/// Local translation / rotation / scale of a node relative to its parent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl NodeTransform {
    pub const IDENTITY: Self = Self {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub const fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

impl Default for NodeTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: Option<String>,
    pub parent: Option<ObjectId>,
    pub local: NodeTransform,
}

/// Flat table of scene nodes with parent links and a name index.
///
/// Parents are always inserted before their children, so every ancestor
/// chain is finite. When several nodes share a name the first one inserted
/// wins, like a depth-first search of the source hierarchy.
#[derive(Debug, Clone, Default)]
pub struct SceneGraph {
    nodes: Vec<SceneNode>,
    by_name: HashMap<String, ObjectId>,
}

impl SceneGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a node. Returns `None` when `parent` does not belong to this graph.
    pub fn add_node(
        &mut self,
        name: Option<&str>,
        parent: Option<ObjectId>,
        local: NodeTransform,
    ) -> Option<ObjectId> {
        if parent.is_some_and(|parent| parent.0 >= self.nodes.len()) {
            return None;
        }

        let id = ObjectId(self.nodes.len());
        if let Some(name) = name {
            self.by_name.entry(name.to_string()).or_insert(id);
        }
        self.nodes.push(SceneNode {
            name: name.map(str::to_string),
            parent,
            local,
        });
        Some(id)
    }

    pub fn node(&self, id: ObjectId) -> Option<&SceneNode> {
        self.nodes.get(id.0)
    }

    /// Replace a node's local transform, e.g. from an animation frame.
    /// Returns `false` when `id` does not belong to this graph.
    pub fn set_local_transform(&mut self, id: ObjectId, local: NodeTransform) -> bool {
        match self.nodes.get_mut(id.0) {
            Some(node) => {
                node.local = local;
                true
            }
            None => false,
        }
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Names of every named node, in insertion order
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.nodes.iter().filter_map(|node| node.name.as_deref())
    }

    /// Compose local transforms from the root down to `id`
    pub fn world_matrix(&self, id: ObjectId) -> Option<Mat4> {
        let mut node = self.node(id)?;
        let mut world = node.local.to_matrix();
        while let Some(parent) = node.parent {
            node = self.node(parent)?;
            world = node.local.to_matrix() * world;
        }
        Some(world)
    }
}

impl SceneLookup for SceneGraph {
    fn object_by_name(&self, name: &str) -> Option<ObjectId> {
        self.by_name.get(name).copied()
    }

    fn world_transform(&self, id: ObjectId) -> Option<Mat4> {
        self.world_matrix(id)
    }

    fn local_transform(&self, id: ObjectId) -> Option<NodeTransform> {
        self.node(id).map(|node| node.local)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn world_matrix_walks_full_chain() {
        let mut scene = SceneGraph::new();
        let root = scene
            .add_node(None, None, NodeTransform::from_translation(Vec3::new(0.0, -3.0, 1.0)))
            .unwrap();
        let group = scene
            .add_node(Some("Group"), Some(root), NodeTransform::from_translation(Vec3::X))
            .unwrap();
        let leaf = scene
            .add_node(Some("Leaf"), Some(group), NodeTransform::from_translation(Vec3::Z))
            .unwrap();

        let world = scene.world_matrix(leaf).unwrap();
        assert_eq!(world.transform_point3(Vec3::ZERO), Vec3::new(1.0, -3.0, 2.0));
    }

    #[test]
    fn parent_rotation_affects_child_position() {
        let mut scene = SceneGraph::new();
        let parent = scene
            .add_node(
                Some("Turntable"),
                None,
                NodeTransform {
                    rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_2),
                    ..NodeTransform::IDENTITY
                },
            )
            .unwrap();
        let child = scene
            .add_node(Some("Item"), Some(parent), NodeTransform::from_translation(Vec3::X))
            .unwrap();

        let position = scene.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert!((position - Vec3::new(0.0, 0.0, -1.0)).length() < 1e-5);
    }

    #[test]
    fn first_name_wins() {
        let mut scene = SceneGraph::new();
        let first = scene.add_node(Some("Dup"), None, NodeTransform::IDENTITY).unwrap();
        scene.add_node(Some("Dup"), None, NodeTransform::IDENTITY).unwrap();
        assert_eq!(scene.object_by_name("Dup"), Some(first));
        assert_eq!(scene.names().count(), 2);
    }

    #[test]
    fn moving_a_parent_moves_its_children() {
        let mut scene = SceneGraph::new();
        let parent = scene.add_node(Some("Cart"), None, NodeTransform::IDENTITY).unwrap();
        let child = scene
            .add_node(Some("Vase"), Some(parent), NodeTransform::from_translation(Vec3::Y))
            .unwrap();

        assert!(scene.set_local_transform(parent, NodeTransform::from_translation(Vec3::X)));
        let position = scene.world_matrix(child).unwrap().transform_point3(Vec3::ZERO);
        assert_eq!(position, Vec3::new(1.0, 1.0, 0.0));
        assert!(!scene.set_local_transform(ObjectId(9), NodeTransform::IDENTITY));
    }

    #[test]
    fn foreign_parent_is_rejected() {
        let mut scene = SceneGraph::new();
        assert!(scene
            .add_node(Some("Orphan"), Some(ObjectId(3)), NodeTransform::IDENTITY)
            .is_none());
        assert!(scene.is_empty());
    }
}
