// cli.rs - Command-line interface configuration
use clap::Parser;
use std::path::PathBuf;

use crate::config::NavigationConfig;
use crate::math::Easing;

#[derive(Parser, Debug, Clone)]
#[command(name = "gallery-viewer")]
#[command(about = "3D gallery viewer with animated camera navigation", long_about = None)]
pub struct Cli {
    /// glTF scene to show
    #[arg(long)]
    pub scene: Option<PathBuf>,

    /// Navigation config (JSON); built-in gallery defaults when absent
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the transition duration in seconds
    #[arg(long)]
    pub duration: Option<f32>,

    /// Override the easing curve (linear, ease-in, ease-out, ease-in-out)
    #[arg(long)]
    pub easing: Option<Easing>,

    /// Disable UI elements
    #[arg(long = "no-ui", default_value = "false")]
    pub no_ui: bool,
}

impl Cli {
    /// Apply command-line overrides on top of a loaded config
    pub fn apply_overrides(&self, config: &mut NavigationConfig) {
        if let Some(duration) = self.duration {
            config.duration = duration;
        }
        if let Some(easing) = self.easing {
            config.easing = easing;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_flags() {
        let cli = Cli::parse_from([
            "gallery-viewer",
            "--scene",
            "gallery.glb",
            "--duration",
            "0.75",
            "--easing",
            "ease-in-out",
            "--no-ui",
        ]);
        assert_eq!(cli.scene, Some(PathBuf::from("gallery.glb")));
        assert!(cli.no_ui);

        let mut config = NavigationConfig::default();
        cli.apply_overrides(&mut config);
        assert_eq!(config.duration, 0.75);
        assert_eq!(config.easing, Easing::EaseInOut);
    }

    #[test]
    fn rejects_unknown_easing() {
        assert!(Cli::try_parse_from(["gallery-viewer", "--easing", "bouncy"]).is_err());
    }
}
