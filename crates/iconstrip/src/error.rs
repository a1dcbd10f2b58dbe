//! Error types for the icon strip.

use std::path::PathBuf;

use iconstrip_core::SceneError;

/// Result type alias for strip operations.
pub type Result<T> = std::result::Result<T, StripError>;

/// Errors reported by [`IconStrip`](crate::IconStrip) operations.
#[derive(Debug, thiserror::Error)]
pub enum StripError {
    /// Attaching needs a container node to install the recognizer on.
    #[error("no container to attach the icon strip to")]
    NoContainer,

    /// A scene operation failed.
    #[error(transparent)]
    Scene(#[from] SceneError),

    /// The strip configuration is unusable.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// Errors raised while loading or validating an
/// [`IconStripConfig`](crate::IconStripConfig).
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File I/O error.
    #[error("Failed to read strip config '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parse error.
    #[error("Failed to parse strip config: {0}")]
    Parse(#[from] toml::de::Error),

    /// TOML serialization error.
    #[error("Failed to serialize strip config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A field holds a value the strip cannot use.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },

    /// A color string is not `#RRGGBB` or `#RRGGBBAA`.
    #[error("Invalid color '{0}': expected #RRGGBB or #RRGGBBAA")]
    InvalidColor(String),
}

impl ConfigError {
    /// Create an I/O error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a value error.
    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}
