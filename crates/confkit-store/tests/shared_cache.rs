//! Integration tests for the shared config cache
//!
//! Exercises the main configuration lifecycle against a throwaway home
//! directory: creation through the cache, explicit syncs, the drop guard and
//! the flush when a thread's cache is torn down.

use confkit_core::{LocationConfig, OpenFlags, StorageLocation, WriteFlags};
use confkit_store::{
    main_config, open_config, open_state_config, sync_main_config, Config, ConfigStore,
    MainConfigGuard,
};
use std::rc::Rc;
use tempfile::TempDir;

fn install_home(tmp: &TempDir) {
    LocationConfig {
        application_name: "cachetest".to_string(),
        home_override: Some(tmp.path().to_path_buf()),
        ..LocationConfig::default()
    }
    .install()
    .expect("install location config");
}

fn reread(path: &std::path::Path, group: &str, key: &str) -> Option<String> {
    Config::open_path(path)
        .expect("reopen config file")
        .read_entry(group, key)
}

#[test]
fn test_main_config_lifecycle() {
    let tmp = TempDir::new().expect("create temp dir");
    install_home(&tmp);
    let main_path = tmp.path().join("config").join("cachetestrc");

    // Explicit sync from the owning thread
    std::thread::spawn(|| {
        assert!(main_config().is_none());

        let main = open_config("", OpenFlags::FULL, StorageLocation::GenericConfig)
            .expect("open main config");
        let cached = main_config().expect("main config registered");
        assert!(Rc::ptr_eq(&main, &cached));

        let by_name = open_config("cachetestrc", OpenFlags::FULL, StorageLocation::GenericConfig)
            .expect("open main config by name");
        assert!(Rc::ptr_eq(&main, &by_name));

        main.borrow_mut()
            .write_entry("General", "Synced", "yes", WriteFlags::NORMAL);
        sync_main_config().expect("sync main config");
        assert!(!main.borrow().is_dirty());
    })
    .join()
    .expect("join sync thread");
    assert_eq!(reread(&main_path, "General", "Synced").as_deref(), Some("yes"));

    // Guard flushes on drop
    std::thread::spawn(|| {
        let _guard = MainConfigGuard::new();
        let main = open_config("", OpenFlags::FULL, StorageLocation::GenericConfig)
            .expect("open main config");
        main.borrow_mut()
            .write_entry("General", "Guarded", "yes", WriteFlags::NORMAL);
    })
    .join()
    .expect("join guard thread");
    assert_eq!(reread(&main_path, "General", "Guarded").as_deref(), Some("yes"));

    // Thread exit flushes the main config held by the cache
    std::thread::spawn(|| {
        let main = open_config("", OpenFlags::FULL, StorageLocation::GenericConfig)
            .expect("open main config");
        main.borrow_mut()
            .write_entry("General", "OnExit", "yes", WriteFlags::NORMAL);
        drop(main);
        assert!(main_config().is_some());
    })
    .join()
    .expect("join exit thread");
    assert_eq!(reread(&main_path, "General", "OnExit").as_deref(), Some("yes"));

    // Simple configs with an empty name are in-memory and never become main
    std::thread::spawn(|| {
        let scratch = open_config("", OpenFlags::SIMPLE, StorageLocation::GenericConfig)
            .expect("open in-memory config");
        assert!(scratch.borrow().path().is_none());
        assert!(main_config().is_none());
    })
    .join()
    .expect("join scratch thread");

    // State config lives in the app data directory
    std::thread::spawn(move || {
        let state = open_state_config("").expect("open state config");
        let expected = tmp.path().join("data").join("cachetest").join("cacheteststaterc");
        assert_eq!(state.borrow().path(), Some(expected.as_path()));
        assert_eq!(state.borrow().open_flags(), OpenFlags::SIMPLE);
        assert!(main_config().is_none());
    })
    .join()
    .expect("join state thread");
}
