use std::collections::HashMap;

use glam::Vec3;
use log::debug;

use crate::error::ConfigError;
use crate::types::{Pose, Viewpoint};

/// Stock gallery table: ids and camera positions in navigation order
pub const GALLERY_VIEWPOINTS: [(&str, [f32; 3]); 6] = [
    ("default", [0.0, 0.0, 12.0]),
    ("hotspot", [0.0, -1.0, 8.0]),
    ("Art001", [0.5, -0.005, 0.01]),
    ("Art002", [-0.5, -0.005, -0.01]),
    ("Art003", [0.5, 0.005, -8.0]),
    ("Art004", [-1.5, -1.5, -10.0]),
];

/// Ordered, immutable table of named viewpoints.
///
/// Insertion order defines the cycle walked by [`next`](Self::next) and
/// [`previous`](Self::previous). Both are total: an id the registry does not
/// know (an ad-hoc pose, or no id at all) enters the cycle at the first or
/// last entry respectively.
#[derive(Debug, Clone)]
pub struct ViewpointRegistry {
    entries: Vec<Viewpoint>,
    index: HashMap<String, usize>,
}

impl ViewpointRegistry {
    pub fn new(viewpoints: Vec<Viewpoint>) -> Result<Self, ConfigError> {
        if viewpoints.is_empty() {
            return Err(ConfigError::invalid("viewpoint registry is empty"));
        }

        let mut index = HashMap::with_capacity(viewpoints.len());
        for (position, viewpoint) in viewpoints.iter().enumerate() {
            if !viewpoint.pose.is_finite() {
                return Err(ConfigError::invalid(format!(
                    "viewpoint '{}' has a non-finite pose",
                    viewpoint.id
                )));
            }
            if index.insert(viewpoint.id.clone(), position).is_some() {
                return Err(ConfigError::invalid(format!(
                    "duplicate viewpoint id '{}'",
                    viewpoint.id
                )));
            }
        }

        debug!("Viewpoint registry built with {} entries", viewpoints.len());
        Ok(Self {
            entries: viewpoints,
            index,
        })
    }

    /// Registry holding the stock gallery viewpoints
    pub fn gallery() -> Self {
        let entries = GALLERY_VIEWPOINTS
            .iter()
            .map(|(id, position)| Viewpoint::new(*id, Pose::at(Vec3::from_array(*position))))
            .collect::<Vec<_>>();
        let index = entries
            .iter()
            .enumerate()
            .map(|(position, viewpoint)| (viewpoint.id.clone(), position))
            .collect();
        Self { entries, index }
    }

    pub fn get(&self, id: &str) -> Option<&Pose> {
        self.viewpoint(id).map(|viewpoint| &viewpoint.pose)
    }

    pub fn viewpoint(&self, id: &str) -> Option<&Viewpoint> {
        self.index.get(id).map(|&position| &self.entries[position])
    }

    /// Ids in navigation order
    pub fn list(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|viewpoint| viewpoint.id.as_str())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Entry at `index`, wrapping modulo the registry size
    pub fn at(&self, index: usize) -> &Viewpoint {
        &self.entries[index % self.entries.len()]
    }

    pub fn first(&self) -> &Viewpoint {
        &self.entries[0]
    }

    pub fn next(&self, current: Option<&str>) -> &str {
        match current.and_then(|id| self.index_of(id)) {
            Some(position) => &self.at(position + 1).id,
            None => &self.entries[0].id,
        }
    }

    pub fn previous(&self, current: Option<&str>) -> &str {
        let len = self.entries.len();
        match current.and_then(|id| self.index_of(id)) {
            Some(position) => &self.at(position + len - 1).id,
            None => &self.entries[len - 1].id,
        }
    }
}
