//! Entering test mode drops every cached configuration once.

use confkit_core::{set_test_mode, OpenFlags, StorageLocation, WriteFlags};
use confkit_store::{cached_config_count, open_config, ConfigStore};
use std::rc::Rc;
use tempfile::TempDir;

#[test]
fn test_entering_test_mode_clears_cache() {
    let tmp = TempDir::new().expect("create temp dir");
    let name = tmp.path().join("moderc").display().to_string();

    set_test_mode(false);
    let before = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
        .expect("open before test mode");
    before
        .borrow_mut()
        .write_entry("General", "Key", "memory", WriteFlags::NONE);
    assert_eq!(cached_config_count(), 1);

    set_test_mode(true);
    let after = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
        .expect("open after test mode");
    assert!(!Rc::ptr_eq(&before, &after));
    assert!(after.borrow().read_entry("General", "Key").is_none());
    assert_eq!(cached_config_count(), 1);

    // Only the first open in test mode clears
    let again = open_config(&name, OpenFlags::SIMPLE, StorageLocation::AppConfig)
        .expect("open again in test mode");
    assert!(Rc::ptr_eq(&after, &again));
}
