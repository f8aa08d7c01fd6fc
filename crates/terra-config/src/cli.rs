//! Command-line argument parsing for Terrain Toggle.

use std::path::PathBuf;

use clap::Parser;

use crate::{Config, NotificationMode};

/// Terrain Toggle command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug, Default)]
#[command(name = "terra-toggle", about = "Terrain Toggle")]
pub struct CliArgs {
    /// Master terrain toggle.
    #[arg(long)]
    pub enable_terrain: Option<bool>,

    /// Apply per-region show/hide rules.
    #[arg(long)]
    pub enable_region_toggle: Option<bool>,

    /// Comma-separated region ids where terrain is always shown.
    #[arg(long)]
    pub show_regions: Option<String>,

    /// Comma-separated region ids where terrain is always hidden.
    #[arg(long)]
    pub hide_regions: Option<String>,

    /// How visibility changes are announced.
    #[arg(long, value_enum)]
    pub notification_mode: Option<NotificationMode>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(enabled) = args.enable_terrain {
            self.terrain.enable_terrain = enabled;
        }
        if let Some(enabled) = args.enable_region_toggle {
            self.terrain.enable_region_toggle = enabled;
        }
        if let Some(ref show) = args.show_regions {
            self.terrain.show_regions = show.clone();
        }
        if let Some(ref hide) = args.hide_regions {
            self.terrain.hide_regions = hide.clone();
        }
        if let Some(mode) = args.notification_mode {
            self.terrain.notification_mode = mode;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_override() {
        let mut config = Config::default();
        let args = CliArgs {
            enable_region_toggle: Some(true),
            hide_regions: Some("7,8".to_string()),
            notification_mode: Some(NotificationMode::Text),
            ..CliArgs::default()
        };
        config.apply_cli_overrides(&args);
        assert!(config.terrain.enable_region_toggle);
        assert_eq!(config.terrain.hide_regions, "7,8");
        assert_eq!(config.terrain.notification_mode, NotificationMode::Text);
        // Non-overridden fields retain defaults
        assert!(config.terrain.enable_terrain);
        assert!(config.terrain.show_regions.is_empty());
    }

    #[test]
    fn test_cli_no_override() {
        let original = Config::default();
        let mut config = Config::default();
        config.apply_cli_overrides(&CliArgs::default());
        assert_eq!(config, original);
    }

    #[test]
    fn test_cli_parses_flags() {
        let args = CliArgs::parse_from([
            "terra-toggle",
            "--enable-terrain",
            "false",
            "--notification-mode",
            "both",
            "--show-regions",
            "5",
        ]);
        assert_eq!(args.enable_terrain, Some(false));
        assert_eq!(args.notification_mode, Some(NotificationMode::Both));
        assert_eq!(args.show_regions.as_deref(), Some("5"));
    }
}
