//! Per-thread cache of shared configuration handles.
//!
//! Opening the same `(file name, open flags, location)` twice on one thread
//! yields the same [`SharedConfigPtr`] as long as a handle is still alive.
//! The application's main configuration is additionally held by the cache
//! itself and flushed when the thread's cache is torn down or when
//! [`sync_main_config`] is called.

use crate::backend::{ConfigStore, ConfigStoreExt};
use crate::error::Result;
use crate::file::Config;
use confkit_core::{is_test_mode, LocationConfig, OpenFlags, StorageLocation};
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, trace, warn};

/// Shared handle to a cached configuration.
pub type SharedConfigPtr = Rc<RefCell<Config>>;

struct Slot {
    name: String,
    flags: OpenFlags,
    location: StorageLocation,
    config: Weak<RefCell<Config>>,
}

impl Slot {
    fn matches(&self, name: &str, flags: OpenFlags, location: StorageLocation) -> bool {
        self.name == name && self.flags == flags && self.location == location
    }
}

#[derive(Default)]
struct Registry {
    slots: Vec<Slot>,
    main: Option<SharedConfigPtr>,
    was_test_mode: bool,
}

impl Registry {
    fn lookup(&mut self, name: &str, flags: OpenFlags, location: StorageLocation) -> Option<SharedConfigPtr> {
        self.slots.retain(|slot| slot.config.strong_count() > 0);
        self.slots
            .iter()
            .find(|slot| slot.matches(name, flags, location))
            .and_then(|slot| slot.config.upgrade())
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.main = None;
    }
}

impl Drop for Registry {
    fn drop(&mut self) {
        if let Some(main) = self.main.take() {
            if let Ok(mut config) = main.try_borrow_mut() {
                if let Err(e) = config.sync() {
                    warn!(name = %config.name(), error = %e, "failed to sync main config on shutdown");
                }
            }
        }
    }
}

thread_local! {
    static REGISTRY: RefCell<Registry> = RefCell::new(Registry::default());
}

static UNWRITABLE_WARNED: AtomicBool = AtomicBool::new(false);

/// Open a configuration through the per-thread cache.
///
/// An empty `file_name` opened without [`OpenFlags::SIMPLE`] semantics refers
/// to the application's main configuration (`<app>rc`). Opening it with
/// [`OpenFlags::FULL`] in [`StorageLocation::GenericConfig`] also installs it as
/// the main configuration held until the thread's cache is dropped.
///
/// # Errors
/// Returns error if the configuration has to be created and its file cannot
/// be read or parsed.
pub fn open_config(
    file_name: &str,
    flags: OpenFlags,
    location: StorageLocation,
) -> Result<SharedConfigPtr> {
    let name = if file_name.is_empty() && !flags.is_simple() {
        LocationConfig::current().main_config_name()
    } else {
        file_name.to_string()
    };

    let cached = REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        if !registry.was_test_mode && is_test_mode() {
            debug!("test mode enabled, clearing shared config cache");
            registry.was_test_mode = true;
            registry.clear();
        }
        registry.lookup(&name, flags, location)
    });
    if let Some(config) = cached {
        trace!(name = %name, "reusing shared config");
        return Ok(config);
    }

    let config = Rc::new(RefCell::new(Config::open(&name, flags, location)?));
    let is_main =
        file_name.is_empty() && flags == OpenFlags::FULL && location == StorageLocation::GenericConfig;

    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        registry.slots.push(Slot {
            name: name.clone(),
            flags,
            location,
            config: Rc::downgrade(&config),
        });
        if is_main {
            registry.main = Some(Rc::clone(&config));
        }
    });

    debug!(name = %name, location = location.as_str(), main = is_main, "created shared config");

    if is_main {
        warn_if_unwritable(&config.borrow());
    }

    Ok(config)
}

/// Open the application's state configuration (`<app>staterc` in the app
/// data directory) or a named one in the same place.
pub fn open_state_config(file_name: &str) -> Result<SharedConfigPtr> {
    let name = if file_name.is_empty() {
        LocationConfig::current().state_config_name()
    } else {
        file_name.to_string()
    };
    open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppData)
}

/// The main configuration, if it has been opened on this thread.
#[must_use]
pub fn main_config() -> Option<SharedConfigPtr> {
    REGISTRY
        .try_with(|registry| registry.borrow().main.clone())
        .ok()
        .flatten()
}

/// Flush the main configuration of this thread, if any.
pub fn sync_main_config() -> Result<()> {
    match main_config() {
        Some(main) => main.borrow_mut().sync(),
        None => Ok(()),
    }
}

/// Number of live configurations cached on this thread.
#[must_use]
pub fn cached_config_count() -> usize {
    REGISTRY.with(|registry| {
        let mut registry = registry.borrow_mut();
        registry.slots.retain(|slot| slot.config.strong_count() > 0);
        registry.slots.len()
    })
}

/// Flushes the main configuration when dropped.
///
/// Hold one for the lifetime of `main` to guarantee the final sync happens
/// before the process exits.
#[derive(Debug, Default)]
#[must_use]
pub struct MainConfigGuard {
    _private: (),
}

impl MainConfigGuard {
    /// Create a guard.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Drop for MainConfigGuard {
    fn drop(&mut self) {
        if let Err(e) = sync_main_config() {
            warn!(error = %e, "failed to sync main config");
        }
    }
}

fn warn_if_unwritable(config: &Config) {
    if UNWRITABLE_WARNED.swap(true, Ordering::Relaxed) {
        return;
    }
    if std::env::var_os("CONFKIT_HOME_READONLY").is_some() {
        return;
    }
    if !config.read_value_or("General", "warn_unwritable_config", true) {
        return;
    }
    if !config.is_config_writable() {
        warn!(
            path = ?config.path(),
            "main configuration file is not writable, changes will not be saved"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confkit_core::WriteFlags;
    use tempfile::TempDir;

    fn path_in(dir: &TempDir, name: &str) -> String {
        dir.path().join(name).display().to_string()
    }

    #[test]
    fn test_same_key_shares_handle() {
        let tmp = TempDir::new().expect("create temp dir");
        let name = path_in(&tmp, "sharedrc");

        let first = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
            .expect("open first handle");
        let second = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
            .expect("open second handle");
        assert!(Rc::ptr_eq(&first, &second));

        first
            .borrow_mut()
            .write_entry("General", "Key", "v", WriteFlags::NORMAL);
        assert_eq!(
            second.borrow().read_entry("General", "Key").as_deref(),
            Some("v")
        );
    }

    #[test]
    fn test_different_flags_are_distinct() {
        let tmp = TempDir::new().expect("create temp dir");
        let name = path_in(&tmp, "flagsrc");

        let simple = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
            .expect("open simple");
        let full = open_config(&name, OpenFlags::FULL, StorageLocation::AppConfig)
            .expect("open full");
        let elsewhere = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppData)
            .expect("open other location");

        assert!(!Rc::ptr_eq(&simple, &full));
        assert!(!Rc::ptr_eq(&simple, &elsewhere));
    }

    #[test]
    fn test_dropped_handle_is_not_reused() {
        let tmp = TempDir::new().expect("create temp dir");
        let name = path_in(&tmp, "droppedrc");

        let first = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
            .expect("open first handle");
        first
            .borrow_mut()
            .write_entry("General", "Key", "memory", WriteFlags::NONE);
        let before = cached_config_count();
        drop(first);
        assert_eq!(cached_config_count(), before - 1);

        let second = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
            .expect("reopen");
        assert!(second.borrow().read_entry("General", "Key").is_none());
    }

    #[test]
    fn test_sync_main_config_without_main() {
        std::thread::spawn(|| {
            assert!(main_config().is_none());
            sync_main_config().expect("sync with no main config");
        })
        .join()
        .expect("join worker thread");
    }
}
