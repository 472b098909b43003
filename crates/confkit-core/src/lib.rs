//! Confkit Core - Foundation crate for the confkit preference framework.
//!
//! This crate provides the types shared by the store and skeleton crates:
//! error handling, the untyped [`Value`], geometry types, write/open flags and
//! storage location resolution.
//!
//! # Modules
//!
//! - [`error`] - Location error types using thiserror
//! - [`config`] - Where configuration files live, with environment overrides
//! - [`types`] - `Value`, `Rect`/`Point`/`Size`, `WriteFlags`, `OpenFlags`
//!
//! # Example
//!
//! ```rust
//! use confkit_core::{LocationConfig, StorageLocation, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let settings = LocationConfig {
//!     application_name: "demo".to_string(),
//!     home_override: Some("/tmp/demo-home".into()),
//!     ..LocationConfig::default()
//! };
//! let dir = StorageLocation::AppConfig.directory_for(&settings)?;
//! assert!(dir.ends_with("config/demo"));
//!
//! assert!(Value::Int(3).semantic_eq(&Value::ULongLong(3)));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod config;
pub mod error;
pub mod types;

// Re-export commonly used types
pub use config::{is_test_mode, set_test_mode, LocationConfig, StorageLocation};
pub use error::{ConfigError, ConfigResult};
pub use types::{OpenFlags, Point, Rect, Size, Value, WriteFlags};
