//! The narrow store interface preference items read and write through.

use crate::entry::ConfigValue;
use crate::error::Result;
use confkit_core::WriteFlags;

/// Backing configuration store.
///
/// Entries are addressed by `(group, key)` and held as text. The store keeps
/// two layers: the user's entries and a defaults layer that reads fall back
/// to. While read-defaults mode is on, reads see only the defaults layer.
pub trait ConfigStore {
    /// File name the store was opened with (empty for in-memory stores).
    fn name(&self) -> &str;

    /// Raw text of an entry, falling back to the defaults layer.
    fn read_entry(&self, group: &str, key: &str) -> Option<String>;

    /// Set an entry. Rejected when the entry is immutable; equal re-writes do
    /// not mark the store dirty.
    fn write_entry(&mut self, group: &str, key: &str, value: &str, flags: WriteFlags);

    /// Drop the user's entry so the defaults layer (or nothing) applies.
    fn revert_to_default(&mut self, group: &str, key: &str, flags: WriteFlags);

    /// Whether the defaults layer holds the entry.
    fn has_default(&self, group: &str, key: &str) -> bool;

    /// Whether a read of the entry would find anything.
    fn has_key(&self, group: &str, key: &str) -> bool;

    /// Switch read-defaults mode.
    fn set_read_defaults(&mut self, enabled: bool);

    /// Whether read-defaults mode is on.
    fn read_defaults(&self) -> bool;

    /// Whether the whole store is read-only.
    fn is_immutable(&self) -> bool;

    /// Whether every entry of a group is read-only.
    fn is_group_immutable(&self, group: &str) -> bool;

    /// Whether a single entry is read-only.
    fn is_entry_immutable(&self, group: &str, key: &str) -> bool;

    /// Whether there are persistent changes not yet synced.
    fn is_dirty(&self) -> bool;

    /// Reload from persistent storage, syncing pending changes first.
    fn reparse(&mut self) -> Result<()>;

    /// Flush pending changes to persistent storage.
    fn sync(&mut self) -> Result<()>;
}

/// Typed access on top of [`ConfigStore`].
pub trait ConfigStoreExt: ConfigStore {
    /// Read and parse an entry; `None` when absent or malformed.
    fn read_value<T: ConfigValue>(&self, group: &str, key: &str) -> Option<T> {
        self.read_entry(group, key)
            .and_then(|raw| T::from_entry(&raw))
    }

    /// Read and parse an entry, falling back to `default`.
    fn read_value_or<T: ConfigValue>(&self, group: &str, key: &str, default: T) -> T {
        self.read_value(group, key).unwrap_or(default)
    }

    /// Encode and write an entry.
    fn write_value<T: ConfigValue>(&mut self, group: &str, key: &str, value: &T, flags: WriteFlags) {
        self.write_entry(group, key, &value.to_entry(), flags);
    }
}

impl<S: ConfigStore + ?Sized> ConfigStoreExt for S {}
