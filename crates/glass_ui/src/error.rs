//! # Glass Error Types
//!
//! Geometry and event handling never fail loudly: a missing or detached
//! element is a no-op. Errors only come from loading configuration and from
//! building element trees by label.

use thiserror::Error;

/// Errors that can occur while configuring the glass engine.
#[derive(Error, Debug)]
pub enum GlassError {
    /// A configuration value is out of range.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The configuration file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// A configuration or session file is not valid TOML for its schema.
    #[error("invalid TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// A scripted event referred to an element that does not exist.
    #[error("unknown element: {0}")]
    UnknownElement(String),
}

/// Result type for glass operations.
pub type GlassResult<T> = Result<T, GlassError>;
