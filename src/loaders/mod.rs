pub mod gltf;

pub use gltf::{load_scene, scene_from_document, scene_graph_from_document, LoadedScene};
