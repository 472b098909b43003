//! Confkit Store - Backing configuration store for the confkit preference framework.
//!
//! This crate provides the store preference items read from and write to:
//! a narrow trait, a TOML-file implementation, the text encoding of typed
//! values, and a per-thread cache that shares open configurations.
//!
//! # Architecture
//!
//! - **Backend** ([`backend`]): The [`ConfigStore`] trait and typed helpers
//! - **File** ([`file`]): [`Config`], an in-memory store optionally backed by a TOML file
//! - **Entry** ([`entry`]): Text encoding of typed values ([`ConfigValue`])
//! - **Shared** ([`shared`]): Per-thread cache keyed by file name, flags and location
//! - **Errors** ([`error`]): Store-specific error types
//!
//! # Example
//!
//! ```rust
//! use confkit_core::WriteFlags;
//! use confkit_store::{Config, ConfigStore, ConfigStoreExt};
//!
//! let mut config = Config::in_memory("demo");
//! config.set_default_entry("View", "Zoom", "100");
//! assert_eq!(config.read_value::<i32>("View", "Zoom"), Some(100));
//!
//! config.write_value("View", "Zoom", &150_i32, WriteFlags::NORMAL);
//! assert!(config.is_dirty());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod backend;
pub mod entry;
pub mod error;
pub mod file;
pub mod shared;

// Re-export commonly used types
pub use backend::{ConfigStore, ConfigStoreExt};
pub use entry::{join_list, split_list, value_from_entry, value_to_entry, ConfigValue};
pub use error::{Result, StoreError};
pub use file::Config;
pub use shared::{
    cached_config_count, main_config, open_config, open_state_config, sync_main_config,
    MainConfigGuard, SharedConfigPtr,
};
