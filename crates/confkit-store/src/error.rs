//! Error types for the store subsystem.

use thiserror::Error;

/// Errors that can occur while loading or flushing configuration files.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Failed to read a configuration file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse a configuration file
    #[error("failed to parse config TOML in {path}: {source}")]
    ParseError {
        /// Path to the configuration file
        path: String,
        /// TOML parse error
        #[source]
        source: toml::de::Error,
    },

    /// Failed to serialize the in-memory entries
    #[error("failed to serialize config: {0}")]
    SerializeError(#[from] toml::ser::Error),

    /// Failed to write a configuration file
    #[error("failed to write config file {path}: {source}")]
    WriteError {
        /// Path to the configuration file
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// The file is marked immutable and cannot be written
    #[error("config file {path} is immutable")]
    Immutable {
        /// Path to the configuration file
        path: String,
    },

    /// Storage location could not be resolved
    #[error("location error: {0}")]
    Location(#[from] confkit_core::ConfigError),
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
