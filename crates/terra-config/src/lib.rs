//! Configuration system for Terrain Toggle.
//!
//! Holds the settings snapshot the visibility engine reads, persisted to disk
//! as a RON file. Supports CLI overrides via clap, hot-reload detection,
//! string-keyed updates for host configuration-changed events, and
//! forward/backward compatible serialization.

mod cli;
mod config;
mod error;
mod store;

pub use cli::CliArgs;
pub use config::{CONFIG_GROUP, Config, ConfigKey, DebugConfig, NotificationMode, TerrainConfig};
pub use error::ConfigError;
pub use store::{ConfigStore, FileConfigStore};
