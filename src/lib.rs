pub mod animation;
pub mod camera;
pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod loaders;
pub mod math;
pub mod navigation;
pub mod registry;
pub mod resolver;
pub mod scene;
pub mod traits;
pub mod types;
pub mod ui;
pub mod window;

pub use config::NavigationConfig;
pub use error::{ConfigError, NavError, NavResult};
pub use navigation::{Navigation, Navigator};
pub use registry::ViewpointRegistry;
pub use types::{InputMode, Pose, Viewpoint};
