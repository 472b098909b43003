//! TOML-backed configuration store.
//!
//! Each group is a TOML table and each entry a string. Hand-edited files may
//! use any TOML scalar (or an array of scalars, read as a list); they are
//! turned into entry text on load. Immutability is marked with a `$immutable`
//! key: `true` at the top level locks the file, `true` inside a group locks the
//! group, and an array of key names inside a group locks those keys.

use crate::backend::ConfigStore;
use crate::entry::join_list;
use crate::error::{Result, StoreError};
use confkit_core::{OpenFlags, StorageLocation, WriteFlags};
use std::collections::{BTreeMap, BTreeSet};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

const IMMUTABLE_MARKER: &str = "$immutable";

#[derive(Debug, Clone, PartialEq)]
struct Entry {
    value: String,
    immutable: bool,
    persistent: bool,
    /// On-disk text shadowed by a non-persistent write.
    persisted: Option<String>,
}

impl Entry {
    fn loaded(value: String, immutable: bool) -> Self {
        Self {
            value,
            immutable,
            persistent: true,
            persisted: None,
        }
    }

    fn locked_placeholder() -> Self {
        Self {
            value: String::new(),
            immutable: true,
            persistent: false,
            persisted: None,
        }
    }

    /// Text that belongs in the file, if any.
    fn stored(&self) -> Option<&str> {
        if self.persistent {
            Some(&self.value)
        } else {
            self.persisted.as_deref()
        }
    }
}

#[derive(Debug, Default)]
struct Layer {
    groups: BTreeMap<String, BTreeMap<String, Entry>>,
    immutable_groups: BTreeSet<String>,
}

impl Layer {
    fn get(&self, group: &str, key: &str) -> Option<&Entry> {
        self.groups.get(group).and_then(|entries| entries.get(key))
    }

    fn merge(&mut self, other: Layer) {
        for (group, entries) in other.groups {
            self.groups.entry(group).or_default().extend(entries);
        }
        self.immutable_groups.extend(other.immutable_groups);
    }
}

/// A configuration file held in memory.
///
/// Created with [`Config::open`] (resolving the file name against a storage
/// location), [`Config::open_path`] or [`Config::in_memory`]. Changes stay in
/// memory until [`ConfigStore::sync`].
#[derive(Debug)]
pub struct Config {
    name: String,
    path: Option<PathBuf>,
    flags: OpenFlags,
    location: StorageLocation,
    entries: Layer,
    defaults: Layer,
    read_defaults: bool,
    immutable: bool,
    dirty: bool,
}

impl Config {
    /// Create a store that is never written to disk.
    #[must_use]
    pub fn in_memory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            path: None,
            flags: OpenFlags::SIMPLE,
            location: StorageLocation::GenericConfig,
            entries: Layer::default(),
            defaults: Layer::default(),
            read_defaults: false,
            immutable: false,
            dirty: false,
        }
    }

    /// Open a configuration file.
    ///
    /// Absolute names are used as-is, relative names are resolved in
    /// `location`, and an empty name gives an in-memory store. A missing file
    /// is not an error: the store starts empty and the file is created on the
    /// first sync.
    ///
    /// # Errors
    /// Returns error if the location cannot be resolved or the file exists but
    /// cannot be read or parsed.
    pub fn open(file_name: &str, flags: OpenFlags, location: StorageLocation) -> Result<Self> {
        let path = if file_name.is_empty() {
            None
        } else if Path::new(file_name).is_absolute() {
            Some(PathBuf::from(file_name))
        } else {
            Some(location.directory()?.join(file_name))
        };

        let mut config = Self {
            path,
            flags,
            location,
            ..Self::in_memory(file_name)
        };
        config.reparse()?;

        debug!(
            name = %config.name,
            path = ?config.path,
            "opened config"
        );

        Ok(config)
    }

    /// Open a configuration file at an explicit path.
    pub fn open_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let mut config = Self {
            path: Some(path.to_path_buf()),
            ..Self::in_memory(path.display().to_string())
        };
        config.reparse()?;
        Ok(config)
    }

    /// Path of the backing file, `None` for in-memory stores.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    /// Flags the store was opened with.
    #[must_use]
    pub fn open_flags(&self) -> OpenFlags {
        self.flags
    }

    /// Location the file name was resolved in.
    #[must_use]
    pub fn location(&self) -> StorageLocation {
        self.location
    }

    /// Load a TOML file into the defaults layer.
    ///
    /// Later sources win over earlier ones. A missing file is ignored.
    pub fn add_defaults_source(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        if let Some((layer, _)) = load_layer(path)? {
            debug!(path = %path.display(), "loaded defaults source");
            self.defaults.merge(layer);
        }
        Ok(())
    }

    /// Set one entry of the defaults layer.
    pub fn set_default_entry(&mut self, group: &str, key: &str, value: impl Into<String>) {
        self.defaults
            .groups
            .entry(group.to_string())
            .or_default()
            .insert(key.to_string(), Entry::loaded(value.into(), false));
    }

    /// Mark an entry immutable in memory.
    pub fn set_entry_immutable(&mut self, group: &str, key: &str) {
        let entries = self.entries.groups.entry(group.to_string()).or_default();
        match entries.get_mut(key) {
            Some(entry) => entry.immutable = true,
            None => {
                // Placeholder keeps the marker; it never reaches the file as a value.
                entries.insert(key.to_string(), Entry::locked_placeholder());
            }
        }
    }

    /// Mark a whole group immutable in memory.
    pub fn set_group_immutable(&mut self, group: &str) {
        self.entries.immutable_groups.insert(group.to_string());
    }

    /// Names of all groups holding at least one entry, in either layer.
    #[must_use]
    pub fn group_list(&self) -> Vec<String> {
        let mut groups: BTreeSet<&String> = BTreeSet::new();
        for layer in [&self.entries, &self.defaults] {
            groups.extend(
                layer
                    .groups
                    .iter()
                    .filter(|(_, entries)| entries.values().any(|e| !e.value.is_empty() || e.persistent))
                    .map(|(name, _)| name),
            );
        }
        groups.into_iter().cloned().collect()
    }

    /// Keys of a group, in either layer.
    #[must_use]
    pub fn key_list(&self, group: &str) -> Vec<String> {
        let mut keys: BTreeSet<&String> = BTreeSet::new();
        for layer in [&self.entries, &self.defaults] {
            if let Some(entries) = layer.groups.get(group) {
                keys.extend(
                    entries
                        .iter()
                        .filter(|(_, e)| !e.value.is_empty() || e.persistent)
                        .map(|(k, _)| k),
                );
            }
        }
        keys.into_iter().cloned().collect()
    }

    /// Remove every user entry of a group.
    pub fn delete_group(&mut self, group: &str) {
        if self.is_group_immutable(group) {
            warn!(group, "rejecting delete of immutable group");
            return;
        }
        if let Some(entries) = self.entries.groups.remove(group) {
            if entries.values().any(|e| e.stored().is_some()) {
                self.dirty = true;
            }
        }
    }

    /// Whether the backing file (or the directory it would be created in)
    /// can be written.
    #[must_use]
    pub fn is_config_writable(&self) -> bool {
        if self.immutable {
            return false;
        }
        let Some(path) = &self.path else {
            return true;
        };

        let mut candidate = Some(path.as_path());
        while let Some(current) = candidate {
            if let Ok(metadata) = fs::metadata(current) {
                return !metadata.permissions().readonly();
            }
            candidate = current.parent();
        }
        false
    }

    fn write_file(&self, path: &Path) -> Result<()> {
        let mut root = toml::Table::new();

        for (group, entries) in &self.entries.groups {
            let mut table = toml::Table::new();
            let mut locked_keys = Vec::new();

            for (key, entry) in entries {
                if entry.immutable {
                    locked_keys.push(toml::Value::String(key.clone()));
                }
                if let Some(text) = entry.stored() {
                    table.insert(key.clone(), toml::Value::String(text.to_string()));
                }
            }

            if self.entries.immutable_groups.contains(group) {
                table.insert(IMMUTABLE_MARKER.to_string(), toml::Value::Boolean(true));
            } else if !locked_keys.is_empty() {
                table.insert(IMMUTABLE_MARKER.to_string(), toml::Value::Array(locked_keys));
            }

            if !table.is_empty() {
                root.insert(group.clone(), toml::Value::Table(table));
            }
        }

        let contents = toml::to_string(&root)?;
        let write_error = |source| StoreError::WriteError {
            path: path.display().to_string(),
            source,
        };

        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir).map_err(write_error)?;
        }

        let mut staging = path.as_os_str().to_owned();
        staging.push(".new");
        let staging = PathBuf::from(staging);
        fs::write(&staging, contents).map_err(write_error)?;
        fs::rename(&staging, path).map_err(write_error)?;

        Ok(())
    }
}

impl ConfigStore for Config {
    fn name(&self) -> &str {
        &self.name
    }

    fn read_entry(&self, group: &str, key: &str) -> Option<String> {
        if !self.read_defaults {
            if let Some(entry) = self.entries.get(group, key) {
                if entry.persistent || !entry.value.is_empty() || !entry.immutable {
                    return Some(entry.value.clone());
                }
            }
        }
        self.defaults.get(group, key).map(|e| e.value.clone())
    }

    fn write_entry(&mut self, group: &str, key: &str, value: &str, flags: WriteFlags) {
        if self.is_entry_immutable(group, key) {
            warn!(group, key, "rejecting write to immutable entry");
            return;
        }

        let persistent = flags.is_persistent();
        let entries = self.entries.groups.entry(group.to_string()).or_default();
        if let Some(existing) = entries.get(key) {
            if existing.value == value && existing.persistent == persistent {
                trace!(group, key, "entry unchanged");
                return;
            }
        }

        let persisted = if persistent {
            None
        } else {
            entries
                .get(key)
                .and_then(Entry::stored)
                .map(ToString::to_string)
        };
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                immutable: false,
                persistent,
                persisted,
            },
        );
        if persistent {
            self.dirty = true;
        }
    }

    fn revert_to_default(&mut self, group: &str, key: &str, _flags: WriteFlags) {
        if self.is_entry_immutable(group, key) {
            warn!(group, key, "rejecting revert of immutable entry");
            return;
        }

        let removed = self
            .entries
            .groups
            .get_mut(group)
            .and_then(|entries| entries.remove(key));
        if let Some(entry) = removed {
            trace!(group, key, "reverted entry to default");
            if entry.stored().is_some() {
                self.dirty = true;
            }
        }
    }

    fn has_default(&self, group: &str, key: &str) -> bool {
        self.defaults.get(group, key).is_some()
    }

    fn has_key(&self, group: &str, key: &str) -> bool {
        self.read_entry(group, key).is_some()
    }

    fn set_read_defaults(&mut self, enabled: bool) {
        self.read_defaults = enabled;
    }

    fn read_defaults(&self) -> bool {
        self.read_defaults
    }

    fn is_immutable(&self) -> bool {
        self.immutable
    }

    fn is_group_immutable(&self, group: &str) -> bool {
        self.immutable
            || self.entries.immutable_groups.contains(group)
            || self.defaults.immutable_groups.contains(group)
    }

    fn is_entry_immutable(&self, group: &str, key: &str) -> bool {
        self.is_group_immutable(group)
            || self.entries.get(group, key).is_some_and(|e| e.immutable)
            || self.defaults.get(group, key).is_some_and(|e| e.immutable)
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }

    fn reparse(&mut self) -> Result<()> {
        if self.dirty {
            self.sync()?;
        }

        let Some(path) = self.path.clone() else {
            return Ok(());
        };

        match load_layer(&path)? {
            Some((layer, immutable)) => {
                // Entries written without the persistent flag survive a reload.
                let volatile: Vec<(String, String, Entry)> = self
                    .entries
                    .groups
                    .iter()
                    .flat_map(|(group, entries)| {
                        entries
                            .iter()
                            .filter(|(_, e)| !e.persistent && !e.immutable)
                            .map(move |(key, e)| (group.clone(), key.clone(), e.clone()))
                    })
                    .collect();

                self.entries = layer;
                for (group, key, mut entry) in volatile {
                    let entries = self.entries.groups.entry(group).or_default();
                    entry.persisted = entries
                        .get(&key)
                        .and_then(Entry::stored)
                        .map(ToString::to_string);
                    entries.insert(key, entry);
                }
                self.immutable = immutable;
                debug!(path = %path.display(), "reparsed config");
            }
            None => {
                trace!(path = %path.display(), "config file does not exist yet");
            }
        }

        Ok(())
    }

    fn sync(&mut self) -> Result<()> {
        if !self.dirty {
            return Ok(());
        }

        let Some(path) = self.path.clone() else {
            self.dirty = false;
            return Ok(());
        };

        if self.immutable {
            return Err(StoreError::Immutable {
                path: path.display().to_string(),
            });
        }

        self.write_file(&path)?;
        self.dirty = false;
        debug!(path = %path.display(), "synced config");
        Ok(())
    }
}

/// Read a TOML file into a layer; `None` if the file does not exist.
fn load_layer(path: &Path) -> Result<Option<(Layer, bool)>> {
    if !path.exists() {
        return Ok(None);
    }

    let contents = fs::read_to_string(path).map_err(|source| StoreError::ReadError {
        path: path.display().to_string(),
        source,
    })?;
    let root: toml::Table = contents.parse().map_err(|source| StoreError::ParseError {
        path: path.display().to_string(),
        source,
    })?;

    let mut layer = Layer::default();
    let mut file_immutable = false;

    for (name, value) in root {
        match value {
            toml::Value::Boolean(locked) if name == IMMUTABLE_MARKER => file_immutable = locked,
            toml::Value::Table(table) => {
                let group = load_group(path, &name, table, &mut layer);
                layer.groups.insert(name, group);
            }
            _ => {
                warn!(path = %path.display(), key = %name, "ignoring entry outside of any group");
            }
        }
    }

    Ok(Some((layer, file_immutable)))
}

fn load_group(
    path: &Path,
    group: &str,
    table: toml::Table,
    layer: &mut Layer,
) -> BTreeMap<String, Entry> {
    let mut locked_keys = BTreeSet::new();
    let mut entries = BTreeMap::new();

    for (key, value) in table {
        if key == IMMUTABLE_MARKER {
            match value {
                toml::Value::Boolean(true) => {
                    layer.immutable_groups.insert(group.to_string());
                }
                toml::Value::Array(keys) => {
                    locked_keys.extend(
                        keys.into_iter()
                            .filter_map(|k| k.as_str().map(ToString::to_string)),
                    );
                }
                _ => {}
            }
            continue;
        }

        match scalar_text(&value) {
            Some(text) => {
                entries.insert(key, Entry::loaded(text, false));
            }
            None => {
                warn!(path = %path.display(), group, key = %key, "ignoring nested table");
            }
        }
    }

    for key in locked_keys {
        match entries.get_mut(&key) {
            Some(entry) => entry.immutable = true,
            None => {
                entries.insert(key, Entry::locked_placeholder());
            }
        }
    }

    entries
}

fn scalar_text(value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(s) => Some(s.clone()),
        toml::Value::Integer(i) => Some(i.to_string()),
        toml::Value::Float(f) => Some(f.to_string()),
        toml::Value::Boolean(b) => Some(b.to_string()),
        toml::Value::Datetime(d) => Some(d.to_string()),
        toml::Value::Array(items) => {
            let texts: Option<Vec<String>> = items.iter().map(scalar_text).collect();
            texts.map(|texts| join_list(&texts))
        }
        toml::Value::Table(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::ConfigStoreExt;
    use tempfile::TempDir;

    fn write_file(dir: &TempDir, name: &str, contents: &str) -> PathBuf {
        let path = dir.path().join(name);
        fs::write(&path, contents).expect("write config file");
        path
    }

    #[test]
    fn test_in_memory_read_write() {
        let mut config = Config::in_memory("scratch");
        assert!(config.read_entry("General", "Width").is_none());

        config.write_value("General", "Width", &640_i32, WriteFlags::NORMAL);
        assert_eq!(config.read_value::<i32>("General", "Width"), Some(640));
        assert!(config.is_dirty());

        config.sync().expect("sync in-memory config");
        assert!(!config.is_dirty());
    }

    #[test]
    fn test_equal_write_keeps_clean() {
        let mut config = Config::in_memory("scratch");
        config.write_entry("General", "Name", "demo", WriteFlags::NORMAL);
        config.sync().expect("sync");

        config.write_entry("General", "Name", "demo", WriteFlags::NORMAL);
        assert!(!config.is_dirty());
    }

    #[test]
    fn test_non_persistent_write_not_dirty() {
        let mut config = Config::in_memory("scratch");
        config.write_entry("General", "Session", "1", WriteFlags::NONE);
        assert!(!config.is_dirty());
        assert_eq!(config.read_entry("General", "Session").as_deref(), Some("1"));
    }

    #[test]
    fn test_session_write_keeps_stored_value() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = write_file(&tmp, "sessionrc", "[General]\nKept = \"disk\"\n");

        let mut config = Config::open_path(&path).expect("open file");
        config.write_entry("General", "Kept", "session", WriteFlags::NONE);
        config.write_entry("General", "Other", "x", WriteFlags::NORMAL);
        assert_eq!(config.read_entry("General", "Kept").as_deref(), Some("session"));
        config.sync().expect("sync");

        let reopened = Config::open_path(&path).expect("reopen file");
        assert_eq!(reopened.read_entry("General", "Kept").as_deref(), Some("disk"));
        assert_eq!(reopened.read_entry("General", "Other").as_deref(), Some("x"));

        config.reparse().expect("reparse");
        assert_eq!(config.read_entry("General", "Kept").as_deref(), Some("session"));
        config.write_entry("General", "Other", "y", WriteFlags::NORMAL);
        config.sync().expect("sync again");
        let reopened = Config::open_path(&path).expect("reopen file");
        assert_eq!(reopened.read_entry("General", "Kept").as_deref(), Some("disk"));
    }

    #[test]
    fn test_defaults_layer() {
        let mut config = Config::in_memory("scratch");
        config.set_default_entry("View", "Zoom", "100");
        assert!(config.has_default("View", "Zoom"));
        assert_eq!(config.read_value::<i32>("View", "Zoom"), Some(100));

        config.write_entry("View", "Zoom", "150", WriteFlags::NORMAL);
        assert_eq!(config.read_value::<i32>("View", "Zoom"), Some(150));

        config.set_read_defaults(true);
        assert_eq!(config.read_value::<i32>("View", "Zoom"), Some(100));
        config.set_read_defaults(false);

        config.revert_to_default("View", "Zoom", WriteFlags::NORMAL);
        assert_eq!(config.read_value::<i32>("View", "Zoom"), Some(100));
    }

    #[test]
    fn test_save_and_reload() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("nested").join("demorc");

        let mut config = Config::open_path(&path).expect("open missing file");
        config.write_entry("No Group", "Enabled", "true", WriteFlags::NORMAL);
        config.write_entry("Window", "Geometry", "0,0,800,600", WriteFlags::NORMAL);
        config.write_entry("Window", "Transient", "x", WriteFlags::NONE);
        config.sync().expect("sync to disk");

        let contents = fs::read_to_string(&path).expect("read written file");
        assert!(contents.contains("[\"No Group\"]"));
        assert!(!contents.contains("Transient"));

        let reloaded = Config::open_path(&path).expect("reopen file");
        assert_eq!(
            reloaded.read_entry("No Group", "Enabled").as_deref(),
            Some("true")
        );
        assert_eq!(
            reloaded.read_entry("Window", "Geometry").as_deref(),
            Some("0,0,800,600")
        );
        assert!(reloaded.read_entry("Window", "Transient").is_none());
    }

    #[test]
    fn test_hand_edited_scalars() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = write_file(
            &tmp,
            "handrc",
            r#"
[General]
Count = 3
Ratio = 0.5
Enabled = true
Tags = ["a", "b,c"]
"#,
        );

        let config = Config::open_path(&path).expect("open file");
        assert_eq!(config.read_value::<i32>("General", "Count"), Some(3));
        assert_eq!(config.read_value::<f64>("General", "Ratio"), Some(0.5));
        assert_eq!(config.read_value::<bool>("General", "Enabled"), Some(true));
        assert_eq!(
            config.read_value::<Vec<String>>("General", "Tags"),
            Some(vec!["a".to_string(), "b,c".to_string()])
        );
    }

    #[test]
    fn test_immutability_markers() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = write_file(
            &tmp,
            "lockedrc",
            r#"
[Locked]
"$immutable" = true
Key = "fixed"

[Partial]
"$immutable" = ["Frozen"]
Frozen = "1"
Free = "2"
"#,
        );

        let mut config = Config::open_path(&path).expect("open file");
        assert!(config.is_group_immutable("Locked"));
        assert!(config.is_entry_immutable("Locked", "Key"));
        assert!(config.is_entry_immutable("Partial", "Frozen"));
        assert!(!config.is_entry_immutable("Partial", "Free"));

        config.write_entry("Partial", "Frozen", "9", WriteFlags::NORMAL);
        assert_eq!(config.read_entry("Partial", "Frozen").as_deref(), Some("1"));
        assert!(!config.is_dirty());

        config.write_entry("Partial", "Free", "9", WriteFlags::NORMAL);
        config.sync().expect("sync partially locked file");

        let reloaded = Config::open_path(&path).expect("reopen file");
        assert!(reloaded.is_entry_immutable("Partial", "Frozen"));
        assert!(reloaded.is_group_immutable("Locked"));
        assert_eq!(reloaded.read_entry("Partial", "Free").as_deref(), Some("9"));
    }

    #[test]
    fn test_immutable_file_refuses_sync() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = write_file(
            &tmp,
            "frozenrc",
            r#"
"$immutable" = true

[General]
Key = "v"
"#,
        );

        let mut config = Config::open_path(&path).expect("open file");
        assert!(config.is_immutable());
        assert!(!config.is_config_writable());

        config.write_entry("General", "Key", "w", WriteFlags::NORMAL);
        assert!(!config.is_dirty());
        assert!(config.sync().is_ok());
    }

    #[test]
    fn test_parse_error() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = write_file(&tmp, "brokenrc", "[General\nKey = ");

        let result = Config::open_path(&path);
        assert!(matches!(result, Err(StoreError::ParseError { .. })));
    }

    #[test]
    fn test_reparse_picks_up_external_changes() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = write_file(&tmp, "liverc", "[General]\nKey = \"old\"\n");

        let mut config = Config::open_path(&path).expect("open file");
        config.write_entry("General", "Volatile", "kept", WriteFlags::NONE);
        fs::write(&path, "[General]\nKey = \"new\"\n").expect("rewrite file");

        config.reparse().expect("reparse");
        assert_eq!(config.read_entry("General", "Key").as_deref(), Some("new"));
        assert_eq!(
            config.read_entry("General", "Volatile").as_deref(),
            Some("kept")
        );
    }

    #[test]
    fn test_defaults_source_and_listing() {
        let tmp = TempDir::new().expect("create temp dir");
        let defaults = write_file(&tmp, "defaultsrc", "[View]\nZoom = \"100\"\n");

        let mut config = Config::in_memory("scratch");
        config
            .add_defaults_source(&defaults)
            .expect("load defaults source");
        config.write_entry("Window", "Width", "10", WriteFlags::NORMAL);

        assert_eq!(config.group_list(), vec!["View".to_string(), "Window".to_string()]);
        assert_eq!(config.key_list("View"), vec!["Zoom".to_string()]);

        config.delete_group("Window");
        assert_eq!(config.group_list(), vec!["View".to_string()]);
    }

    #[test]
    fn test_open_resolves_absolute_names() {
        let tmp = TempDir::new().expect("create temp dir");
        let path = tmp.path().join("absrc");
        let name = path.display().to_string();

        let config = Config::open(&name, OpenFlags::SIMPLE, StorageLocation::AppData)
            .expect("open absolute path");
        assert_eq!(config.path(), Some(path.as_path()));
        assert_eq!(config.name(), name);
        assert_eq!(config.location(), StorageLocation::AppData);
    }
}
