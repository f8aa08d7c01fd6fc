//! Persistence sink for values emitted by the visibility engine.

use std::path::{Path, PathBuf};

use crate::{Config, ConfigError, ConfigKey};

/// Key-value persistence for the `terraintoggle` group.
pub trait ConfigStore {
    /// Persist `value` under `key`.
    fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError>;
}

/// In-memory store: updates the snapshot without touching disk.
impl ConfigStore for Config {
    fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        self.set_value(key, value)
    }
}

/// Store backed by `config.ron` in a config directory. Every update is
/// written through immediately.
#[derive(Debug)]
pub struct FileConfigStore {
    dir: PathBuf,
    config: Config,
}

impl FileConfigStore {
    /// Open the store, creating a default `config.ron` if none exists.
    pub fn open(dir: &Path) -> Result<Self, ConfigError> {
        let config = Config::load_or_create(dir)?;
        Ok(Self {
            dir: dir.to_path_buf(),
            config,
        })
    }

    /// The last persisted snapshot.
    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Re-read `config.ron`. Returns the new snapshot if it was edited
    /// outside this store.
    pub fn reload(&mut self) -> Result<Option<Config>, ConfigError> {
        let changed = self.config.reload(&self.dir)?;
        if let Some(config) = &changed {
            self.config = config.clone();
        }
        Ok(changed)
    }

    /// Directory holding `config.ron`.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl ConfigStore for FileConfigStore {
    fn set(&mut self, key: ConfigKey, value: &str) -> Result<(), ConfigError> {
        self.config.set_value(key, value)?;
        self.config.save(&self.dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_updates_snapshot() {
        let mut config = Config::default();
        ConfigStore::set(&mut config, ConfigKey::HideRegions, "3,4").unwrap();
        assert_eq!(config.terrain.hide_regions, "3,4");
    }

    #[test]
    fn test_file_store_writes_through() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(dir.path()).unwrap();
        store.set(ConfigKey::EnableTerrain, "false").unwrap();

        let on_disk = Config::load_or_create(dir.path()).unwrap();
        assert!(!on_disk.terrain.enable_terrain);
        assert_eq!(store.config(), &on_disk);
    }

    #[test]
    fn test_file_store_picks_up_external_edit() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(dir.path()).unwrap();
        assert!(store.reload().unwrap().is_none());

        let mut edited = Config::default();
        edited.terrain.hide_regions = "7".to_string();
        edited.save(dir.path()).unwrap();

        let fresh = store.reload().unwrap().unwrap();
        assert_eq!(fresh.terrain.hide_regions, "7");
        assert_eq!(store.config(), &fresh);
        assert!(store.reload().unwrap().is_none());
    }

    #[test]
    fn test_file_store_rejects_invalid_value() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileConfigStore::open(dir.path()).unwrap();
        assert!(store.set(ConfigKey::ShowRegionInOverlay, "maybe").is_err());
        assert_eq!(store.config(), &Config::default());
    }
}
