//! Core error types for confkit.
//!
//! Errors raised while resolving where configuration files live. The store
//! and skeleton crates wrap these in their own error enums.

use thiserror::Error;

/// Errors raised while resolving storage locations and library settings.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine the platform directory for a storage location
    #[error("could not determine {location} directory (base directories not available)")]
    NoConfigDir {
        /// Storage location that could not be resolved
        location: String,
    },

    /// Failed to parse the library settings TOML
    #[error("failed to parse location settings TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    /// Invalid configuration value
    #[error("invalid config value for {field}: {reason}")]
    InvalidValue {
        /// Field name
        field: String,
        /// Reason for invalidity
        reason: String,
    },
}

/// Result type alias for location configuration operations.
pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ConfigError::NoConfigDir {
            location: "config".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "could not determine config directory (base directories not available)"
        );

        let err = ConfigError::InvalidValue {
            field: "application_name".to_string(),
            reason: "must not be empty".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "invalid config value for application_name: must not be empty"
        );
    }

    #[test]
    fn test_error_from_toml() {
        let toml_err = toml::from_str::<toml::Table>("= broken").expect_err("invalid TOML");
        let err: ConfigError = toml_err.into();
        assert!(matches!(err, ConfigError::ParseError(_)));
    }
}
