use thiserror::Error;

/// Recoverable outcomes of a navigation request that did not move the camera
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NavError {
    /// Unknown viewpoint id, or the named object is absent from the current scene graph
    #[error("not found: {0}")]
    NotFound(String),
    /// Refused because the user is interacting with the camera
    #[error("navigation disabled while interacting")]
    Busy,
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidConfiguration(message.into())
    }
}

pub type NavResult<T> = std::result::Result<T, NavError>;
