//! Configuration structs with sensible defaults and RON persistence.

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Configuration group name used by the host's key-value settings store.
pub const CONFIG_GROUP: &str = "terraintoggle";

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Terrain visibility settings.
    pub terrain: TerrainConfig,
    /// Debug/development settings.
    pub debug: DebugConfig,
}

/// Terrain visibility settings, one field per key in the `terraintoggle` group.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TerrainConfig {
    /// Manual master toggle for terrain rendering.
    pub enable_terrain: bool,
    /// Allow the toggle hotkey to flip `enable_terrain`.
    pub enable_hotkey: bool,
    /// Keybinding text (e.g. `"Ctrl+KeyT"`); empty means unset.
    pub toggle_terrain_hotkey: String,
    /// Apply per-region show/hide rules.
    pub enable_region_toggle: bool,
    /// Offer the shift-right-click region menu.
    pub enable_right_click_region: bool,
    /// How visibility changes are announced.
    pub notification_mode: NotificationMode,
    /// Comma-separated region ids where terrain is always shown.
    pub show_regions: String,
    /// Comma-separated region ids where terrain is always hidden.
    pub hide_regions: String,
    /// Always display the current region id in the overlay.
    pub show_region_in_overlay: bool,
}

/// Debug/development configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DebugConfig {
    /// Log level override (e.g., "debug", "info", "warn").
    pub log_level: String,
}

/// How terrain visibility changes are announced to the user.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum,
)]
pub enum NotificationMode {
    /// No announcements.
    #[default]
    None,
    /// Chat line only.
    Text,
    /// Overlay panel only.
    Overlay,
    /// Chat line and overlay panel.
    Both,
}

impl NotificationMode {
    /// Returns `true` if changes are written to chat.
    #[must_use]
    pub fn shows_text(self) -> bool {
        matches!(self, Self::Text | Self::Both)
    }

    /// Returns `true` if the overlay panel is rendered.
    #[must_use]
    pub fn shows_overlay(self) -> bool {
        matches!(self, Self::Overlay | Self::Both)
    }

    fn as_str(self) -> &'static str {
        match self {
            Self::None => "None",
            Self::Text => "Text",
            Self::Overlay => "Overlay",
            Self::Both => "Both",
        }
    }
}

impl fmt::Display for NotificationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "None" => Ok(Self::None),
            "Text" => Ok(Self::Text),
            "Overlay" => Ok(Self::Overlay),
            "Both" => Ok(Self::Both),
            _ => Err(ConfigError::InvalidValue {
                key: ConfigKey::NotificationMode.name(),
                value: s.to_string(),
            }),
        }
    }
}

/// Keys of the `terraintoggle` configuration group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    EnableTerrain,
    EnableHotkey,
    ToggleTerrainHotkey,
    EnableRegionToggle,
    EnableRightClickRegion,
    NotificationMode,
    ShowRegions,
    HideRegions,
    ShowRegionInOverlay,
}

impl ConfigKey {
    /// Every key in the group, in settings-panel order.
    pub const ALL: [ConfigKey; 9] = [
        Self::EnableTerrain,
        Self::EnableHotkey,
        Self::ToggleTerrainHotkey,
        Self::EnableRegionToggle,
        Self::EnableRightClickRegion,
        Self::NotificationMode,
        Self::ShowRegions,
        Self::HideRegions,
        Self::ShowRegionInOverlay,
    ];

    /// The key name as stored by the host.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::EnableTerrain => "enableTerrain",
            Self::EnableHotkey => "enableHotkey",
            Self::ToggleTerrainHotkey => "toggleTerrainHotkey",
            Self::EnableRegionToggle => "enableRegionToggle",
            Self::EnableRightClickRegion => "enableRightClickRegion",
            Self::NotificationMode => "notificationMode",
            Self::ShowRegions => "showRegions",
            Self::HideRegions => "hideRegions",
            Self::ShowRegionInOverlay => "showRegionInOverlay",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.name() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

// --- Default implementations ---

impl Default for TerrainConfig {
    fn default() -> Self {
        Self {
            enable_terrain: true,
            enable_hotkey: false,
            toggle_terrain_hotkey: String::new(),
            enable_region_toggle: false,
            enable_right_click_region: false,
            notification_mode: NotificationMode::None,
            show_regions: String::new(),
            hide_regions: String::new(),
            show_region_in_overlay: false,
        }
    }
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

// --- String-keyed access ---

fn parse_bool(key: ConfigKey, value: &str) -> Result<bool, ConfigError> {
    value.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key: key.name(),
        value: value.to_string(),
    })
}

impl Config {
    /// Update one key of the `terraintoggle` group from its stored string form.
    pub fn set_value(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        let terrain = &mut self.terrain;
        match key {
            ConfigKey::EnableTerrain => terrain.enable_terrain = parse_bool(key, value)?,
            ConfigKey::EnableHotkey => terrain.enable_hotkey = parse_bool(key, value)?,
            ConfigKey::ToggleTerrainHotkey => terrain.toggle_terrain_hotkey = value.to_string(),
            ConfigKey::EnableRegionToggle => {
                terrain.enable_region_toggle = parse_bool(key, value)?;
            }
            ConfigKey::EnableRightClickRegion => {
                terrain.enable_right_click_region = parse_bool(key, value)?;
            }
            ConfigKey::NotificationMode => {
                terrain.notification_mode = value.parse()?;
            }
            ConfigKey::ShowRegions => terrain.show_regions = value.to_string(),
            ConfigKey::HideRegions => terrain.hide_regions = value.to_string(),
            ConfigKey::ShowRegionInOverlay => {
                terrain.show_region_in_overlay = parse_bool(key, value)?;
            }
        }
        Ok(())
    }

    /// Read one key of the `terraintoggle` group in its stored string form.
    #[must_use]
    pub fn get_value(&self, key: ConfigKey) -> String {
        let terrain = &self.terrain;
        match key {
            ConfigKey::EnableTerrain => terrain.enable_terrain.to_string(),
            ConfigKey::EnableHotkey => terrain.enable_hotkey.to_string(),
            ConfigKey::ToggleTerrainHotkey => terrain.toggle_terrain_hotkey.clone(),
            ConfigKey::EnableRegionToggle => terrain.enable_region_toggle.to_string(),
            ConfigKey::EnableRightClickRegion => terrain.enable_right_click_region.to_string(),
            ConfigKey::NotificationMode => terrain.notification_mode.to_string(),
            ConfigKey::ShowRegions => terrain.show_regions.clone(),
            ConfigKey::HideRegions => terrain.hide_regions.clone(),
            ConfigKey::ShowRegionInOverlay => terrain.show_region_in_overlay.to_string(),
        }
    }
}

// --- Load / Save / Reload ---

impl Config {
    /// Load config from the given directory, or create a default config file.
    pub fn load_or_create(config_dir: &Path) -> Result<Self, ConfigError> {
        let config_path = config_dir.join("config.ron");

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
            let config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;
            log::info!("Loaded config from {}", config_path.display());
            Ok(config)
        } else {
            let config = Config::default();
            config.save(config_dir)?;
            log::info!("Created default config at {}", config_path.display());
            Ok(config)
        }
    }

    /// Save config to the given directory as `config.ron`.
    pub fn save(&self, config_dir: &Path) -> Result<(), ConfigError> {
        std::fs::create_dir_all(config_dir).map_err(ConfigError::WriteError)?;

        let config_path = config_dir.join("config.ron");
        let pretty = ron::ser::PrettyConfig::new().depth_limit(2);

        let serialized =
            ron::ser::to_string_pretty(self, pretty).map_err(ConfigError::SerializeError)?;

        std::fs::write(&config_path, serialized).map_err(ConfigError::WriteError)?;
        Ok(())
    }

    /// Hot-reload: returns `Some(new_config)` if the file changed, `None` otherwise.
    pub fn reload(&self, config_dir: &Path) -> Result<Option<Self>, ConfigError> {
        let config_path = config_dir.join("config.ron");
        let contents = std::fs::read_to_string(&config_path).map_err(ConfigError::ReadError)?;
        let new_config: Config = ron::from_str(&contents).map_err(ConfigError::ParseError)?;

        if &new_config != self {
            log::info!("Config reloaded with changes");
            Ok(Some(new_config))
        } else {
            Ok(None)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_settings_panel() {
        let terrain = TerrainConfig::default();
        assert!(terrain.enable_terrain);
        assert!(!terrain.enable_hotkey);
        assert!(terrain.toggle_terrain_hotkey.is_empty());
        assert!(!terrain.enable_region_toggle);
        assert!(!terrain.enable_right_click_region);
        assert_eq!(terrain.notification_mode, NotificationMode::None);
        assert!(terrain.show_regions.is_empty());
        assert!(terrain.hide_regions.is_empty());
        assert!(!terrain.show_region_in_overlay);
    }

    #[test]
    fn test_default_config_serializes() {
        let config = Config::default();
        let ron_str =
            ron::ser::to_string_pretty(&config, ron::ser::PrettyConfig::new().depth_limit(2))
                .unwrap();
        assert!(ron_str.contains("enable_terrain: true"));
        assert!(ron_str.contains("log_level: \"info\""));
    }

    #[test]
    fn test_config_roundtrip() {
        let mut config = Config::default();
        config.terrain.notification_mode = NotificationMode::Both;
        config.terrain.show_regions = "12850,12851".to_string();
        let ron_str = ron::to_string(&config).unwrap();
        let deserialized: Config = ron::from_str(&ron_str).unwrap();
        assert_eq!(config, deserialized);
    }

    #[test]
    fn test_missing_field_uses_default() {
        let ron_str = "(terrain: (enable_region_toggle: true))";
        let config: Config = ron::from_str(ron_str).unwrap();
        assert!(config.terrain.enable_region_toggle);
        assert!(config.terrain.enable_terrain);
        assert_eq!(config.debug, DebugConfig::default());
    }

    #[test]
    fn test_extra_field_ignored() {
        let result: Result<Config, _> = ron::from_str("(future_setting: true)");
        assert!(result.is_ok());
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.terrain.enable_hotkey = true;
        config.terrain.toggle_terrain_hotkey = "Ctrl+KeyT".to_string();
        config.terrain.hide_regions = "7".to_string();

        config.save(dir.path()).unwrap();
        let loaded = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, loaded);
    }

    #[test]
    fn test_load_or_create_writes_default() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_create(dir.path()).unwrap();
        assert_eq!(config, Config::default());
        assert!(dir.path().join("config.ron").exists());
    }

    #[test]
    fn test_reload_detects_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        let mut modified = config.clone();
        modified.terrain.enable_terrain = false;
        modified.save(dir.path()).unwrap();

        let result = config.reload(dir.path()).unwrap();
        assert!(!result.unwrap().terrain.enable_terrain);
    }

    #[test]
    fn test_reload_no_changes() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::default();
        config.save(dir.path()).unwrap();

        assert!(config.reload(dir.path()).unwrap().is_none());
    }

    #[test]
    fn test_invalid_ron_produces_error() {
        let result: Result<Config, _> = ron::from_str("{{not valid}}");
        assert!(result.is_err());
    }

    #[test]
    fn test_key_names_roundtrip() {
        for key in ConfigKey::ALL {
            assert_eq!(key.name().parse::<ConfigKey>().unwrap(), key);
        }
        assert!(matches!(
            "enable_terrain".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
    }

    #[test]
    fn test_set_and_get_value() {
        let mut config = Config::default();
        config.set_value(ConfigKey::EnableTerrain, "false").unwrap();
        config.set_value(ConfigKey::NotificationMode, "Overlay").unwrap();
        config.set_value(ConfigKey::ShowRegions, "1,2").unwrap();

        assert!(!config.terrain.enable_terrain);
        assert_eq!(config.terrain.notification_mode, NotificationMode::Overlay);
        assert_eq!(config.get_value(ConfigKey::EnableTerrain), "false");
        assert_eq!(config.get_value(ConfigKey::NotificationMode), "Overlay");
        assert_eq!(config.get_value(ConfigKey::ShowRegions), "1,2");
    }

    #[test]
    fn test_set_value_rejects_bad_input() {
        let mut config = Config::default();
        let err = config.set_value(ConfigKey::EnableHotkey, "yes").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { key: "enableHotkey", .. }));
        let err = config
            .set_value(ConfigKey::NotificationMode, "Loud")
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "invalid value \"Loud\" for config key notificationMode"
        );
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_notification_mode_routing() {
        assert!(!NotificationMode::None.shows_text());
        assert!(!NotificationMode::None.shows_overlay());
        assert!(NotificationMode::Text.shows_text());
        assert!(!NotificationMode::Text.shows_overlay());
        assert!(NotificationMode::Overlay.shows_overlay());
        assert!(NotificationMode::Both.shows_text() && NotificationMode::Both.shows_overlay());
    }
}
