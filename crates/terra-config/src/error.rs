//! Configuration error types.

/// Errors that can occur when loading, saving, parsing, or updating configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the config file from disk.
    #[error("failed to read config: {0}")]
    ReadError(#[source] std::io::Error),

    /// Failed to write the config file to disk.
    #[error("failed to write config: {0}")]
    WriteError(#[source] std::io::Error),

    /// Failed to parse RON content.
    #[error("failed to parse config: {0}")]
    ParseError(#[source] ron::error::SpannedError),

    /// Failed to serialize config to RON.
    #[error("failed to serialize config: {0}")]
    SerializeError(#[source] ron::Error),

    /// A key name that does not belong to the `terraintoggle` group.
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// A value that cannot be converted to the key's type.
    #[error("invalid value {value:?} for config key {key}")]
    InvalidValue { key: &'static str, value: String },
}
