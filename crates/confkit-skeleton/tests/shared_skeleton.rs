//! Skeletons opened by name share one configuration per thread.

use confkit_core::LocationConfig;
use confkit_skeleton::{ItemInt, Skeleton};
use confkit_store::{main_config, ConfigStore};
use tempfile::TempDir;

#[test]
fn test_skeletons_share_named_config() {
    let tmp = TempDir::new().expect("create temp dir");
    LocationConfig {
        application_name: "skeletontest".to_string(),
        home_override: Some(tmp.path().to_path_buf()),
        ..LocationConfig::default()
    }
    .install()
    .expect("install location config");

    let mut first = Skeleton::open("sharedrc").expect("open first skeleton");
    let mut second = Skeleton::open("sharedrc").expect("open second skeleton");

    first.set_current_group("Editor");
    first
        .add_item_int("TabWidth", 4)
        .expect("add tab width")
        .set_value(8);
    first.save().expect("save first skeleton");

    assert_eq!(
        second.config().borrow().read_entry("Editor", "TabWidth").as_deref(),
        Some("8")
    );

    second.set_current_group("Editor");
    second.add_item_int("TabWidth", 4).expect("add tab width");
    assert_eq!(second.item::<ItemInt>("TabWidth").map(|i| *i.value()), Some(8));
    assert!(tmp.path().join("config").join("sharedrc").exists());

    let mut main = Skeleton::open("").expect("open main skeleton");
    assert!(main_config().is_some());
    main.add_item_int("Launches", 0)
        .expect("add launches")
        .set_value(1);
    main.save().expect("save main skeleton");
    assert!(tmp.path().join("config").join("skeletontestrc").exists());
}
