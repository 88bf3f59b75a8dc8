use anyhow::{Context, Result};
use glam::{Quat, Vec3};
use gltf::animation::util::ReadOutputs;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::path::Path;

use crate::animation::{AnimationChannel, AnimationClip, ChannelValues, Interpolation};
use crate::scene::{NodeTransform, ObjectId, SceneGraph};

/// Node hierarchy of a glTF file plus its first animation clip
#[derive(Debug, Clone)]
pub struct LoadedScene {
    pub graph: SceneGraph,
    pub animation: Option<AnimationClip>,
}

/// Loads a glTF file with its buffers, so the first animation clip can be
/// read alongside the node hierarchy.
pub fn load_scene(path: impl AsRef<Path>, root: NodeTransform) -> Result<LoadedScene> {
    let path = path.as_ref();
    info!("Loading glTF scene: {:?}", path);

    let (document, buffers, _images) =
        gltf::import(path).context(format!("Failed to load glTF file: {:?}", path))?;
    let scene = scene_from_document(&document, &buffers, root)?;

    info!(
        "glTF loaded: {} scenes, {} nodes, {} named, {} animations",
        document.scenes().count(),
        scene.graph.len(),
        scene.graph.names().count(),
        document.animations().count()
    );
    Ok(scene)
}

/// Build graph and animation from an imported document
pub fn scene_from_document(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    root: NodeTransform,
) -> Result<LoadedScene> {
    let (graph, ids) = build_graph(document, root)?;
    let animation = first_animation(document, buffers, &ids);
    Ok(LoadedScene { graph, animation })
}

/// Build only the graph from an already parsed document.
///
/// Every scene of the document is mounted under one unnamed group node
/// carrying `root`. Meshes are not read; only names and transforms matter
/// for navigation.
pub fn scene_graph_from_document(document: &gltf::Document, root: NodeTransform) -> Result<SceneGraph> {
    build_graph(document, root).map(|(graph, _)| graph)
}

fn build_graph(document: &gltf::Document, root: NodeTransform) -> Result<(SceneGraph, HashMap<usize, ObjectId>)> {
    let mut graph = SceneGraph::new();
    let mut ids = HashMap::new();
    let group = graph
        .add_node(None, None, root)
        .context("Failed to create scene root")?;

    for scene in document.scenes() {
        debug!("Processing scene: {:?}", scene.name());
        for node in scene.nodes() {
            add_node(&node, group, &mut graph, &mut ids)?;
        }
    }

    if graph.names().next().is_none() {
        warn!("glTF document has no named nodes; object navigation will find nothing");
    }
    Ok((graph, ids))
}

/// Recursively copies a glTF node and its children
fn add_node(
    node: &gltf::Node,
    parent: ObjectId,
    graph: &mut SceneGraph,
    ids: &mut HashMap<usize, ObjectId>,
) -> Result<()> {
    let (translation, rotation, scale) = node.transform().decomposed();
    let local = NodeTransform {
        translation: Vec3::from_array(translation),
        rotation: Quat::from_array(rotation),
        scale: Vec3::from_array(scale),
    };

    let id = graph
        .add_node(node.name(), Some(parent), local)
        .context(format!("Invalid parent for glTF node {}", node.index()))?;
    ids.entry(node.index()).or_insert(id);

    for child in node.children() {
        add_node(&child, id, graph, ids)?;
    }
    Ok(())
}

/// Reads the node channels of the first animation; other clips are ignored
fn first_animation(
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
    ids: &HashMap<usize, ObjectId>,
) -> Option<AnimationClip> {
    let animation = document.animations().next()?;
    let name = animation.name().unwrap_or("unnamed").to_string();
    debug!("Loading animation: {:?}", name);

    let mut channels = Vec::new();
    for channel in animation.channels() {
        let node = channel.target().node().index();
        let Some(&target) = ids.get(&node) else {
            warn!("Animation '{}' targets node {} outside every scene", name, node);
            continue;
        };

        let reader = channel.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
        let Some(inputs) = reader.read_inputs() else {
            warn!("Animation '{}' channel for node {} has no keyframes", name, node);
            continue;
        };
        let keyframes: Vec<f32> = inputs.collect();

        let values = match reader.read_outputs() {
            Some(ReadOutputs::Translations(values)) => {
                ChannelValues::Translations(values.map(Vec3::from_array).collect())
            }
            Some(ReadOutputs::Rotations(values)) => {
                ChannelValues::Rotations(values.into_f32().map(Quat::from_array).collect())
            }
            Some(ReadOutputs::Scales(values)) => ChannelValues::Scales(values.map(Vec3::from_array).collect()),
            Some(ReadOutputs::MorphTargetWeights(_)) => {
                debug!("Skipping morph target weights on node {}", node);
                continue;
            }
            None => {
                warn!("Animation '{}' channel for node {} has no values", name, node);
                continue;
            }
        };

        // Cubic splines are played back linearly through their keyframe values
        let (values, interpolation) = match channel.sampler().interpolation() {
            gltf::animation::Interpolation::Step => (values, Interpolation::Step),
            gltf::animation::Interpolation::Linear => (values, Interpolation::Linear),
            gltf::animation::Interpolation::CubicSpline => (values.spline_points(), Interpolation::Linear),
        };

        match AnimationChannel::new(target, keyframes, values, interpolation) {
            Some(channel) => channels.push(channel),
            None => warn!("Animation '{}' channel for node {} is malformed", name, node),
        }
    }

    if channels.is_empty() {
        warn!("Animation '{}' has no playable channels", name);
        return None;
    }
    let clip = AnimationClip::new(name, channels);
    info!("Animation '{}': {} channels over {:.2}s", clip.name, clip.channels().len(), clip.duration);
    Some(clip)
}
