//! The contract every preference item fulfils.

use confkit_core::{Value, WriteFlags};
use confkit_store::ConfigStore;
use std::any::Any;

/// Identity and UI metadata shared by every item.
#[derive(Debug, Clone, PartialEq)]
pub struct ItemBase {
    group: String,
    key: String,
    name: String,
    label: String,
    tool_tip: String,
    whats_this: String,
    write_flags: WriteFlags,
    immutable: bool,
    group_override: Option<String>,
}

impl ItemBase {
    /// Create the identity for the entry `key` in `group`.
    ///
    /// The name defaults to the key.
    pub fn new(group: impl Into<String>, key: impl Into<String>) -> Self {
        let key = key.into();
        Self {
            group: group.into(),
            name: key.clone(),
            key,
            label: String::new(),
            tool_tip: String::new(),
            whats_this: String::new(),
            write_flags: WriteFlags::NORMAL,
            immutable: false,
            group_override: None,
        }
    }

    /// Group the item was registered in.
    #[must_use]
    pub fn group(&self) -> &str {
        &self.group
    }

    /// Change the group.
    pub fn set_group(&mut self, group: impl Into<String>) {
        self.group = group.into();
    }

    /// Group the entry is actually read from and written to.
    #[must_use]
    pub fn store_group(&self) -> &str {
        self.group_override.as_deref().unwrap_or(&self.group)
    }

    /// Route reads and writes to another group without changing [`group`](Self::group).
    pub fn set_group_override(&mut self, group: Option<String>) {
        self.group_override = group;
    }

    /// Entry key.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Change the entry key.
    pub fn set_key(&mut self, key: impl Into<String>) {
        self.key = key.into();
    }

    /// Internal name, unique within a skeleton.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Change the internal name.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
    }

    /// Human readable label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Set the label.
    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    /// Short help text.
    #[must_use]
    pub fn tool_tip(&self) -> &str {
        &self.tool_tip
    }

    /// Set the tool tip.
    pub fn set_tool_tip(&mut self, tool_tip: impl Into<String>) {
        self.tool_tip = tool_tip.into();
    }

    /// Long help text.
    #[must_use]
    pub fn whats_this(&self) -> &str {
        &self.whats_this
    }

    /// Set the long help text.
    pub fn set_whats_this(&mut self, whats_this: impl Into<String>) {
        self.whats_this = whats_this.into();
    }

    /// Flags passed to the store on write.
    #[must_use]
    pub fn write_flags(&self) -> WriteFlags {
        self.write_flags
    }

    /// Set the write flags.
    pub fn set_write_flags(&mut self, flags: WriteFlags) {
        self.write_flags = flags;
    }

    /// Whether the store marked the entry read-only at the last read.
    #[must_use]
    pub fn is_immutable(&self) -> bool {
        self.immutable
    }

    pub(crate) fn refresh_immutability(&mut self, store: &dyn ConfigStore) {
        self.immutable = store.is_entry_immutable(self.store_group(), &self.key);
    }
}

/// A single preference.
///
/// Implementations track a current value and a default. Reads and writes go
/// through a [`ConfigStore`] at `(store_group, key)`.
pub trait ConfigItem: Any {
    /// Identity and metadata.
    fn base(&self) -> &ItemBase;

    /// Mutable identity and metadata.
    fn base_mut(&mut self) -> &mut ItemBase;

    /// Load the current value from the store.
    fn read_config(&mut self, store: &dyn ConfigStore);

    /// Write the current value to the store if it changed since the last read
    /// or write.
    fn write_config(&mut self, store: &mut dyn ConfigStore);

    /// Replace the default with what the store's defaults layer holds.
    fn read_default(&mut self, store: &mut dyn ConfigStore);

    /// Assign from an untyped value. Mismatched types are ignored.
    fn set_property(&mut self, value: &Value);

    /// Untyped view of the current value.
    fn property(&self) -> Value;

    /// Whether `value` equals the current value under the item's equality.
    fn is_equal(&self, value: &Value) -> bool;

    /// Lower bound, `Value::Invalid` when unbounded.
    fn min_value(&self) -> Value {
        Value::Invalid
    }

    /// Upper bound, `Value::Invalid` when unbounded.
    fn max_value(&self) -> Value {
        Value::Invalid
    }

    /// Reset the current value to the default.
    fn set_default(&mut self);

    /// Exchange the current value and the default.
    fn swap_default(&mut self);

    /// Whether the current value equals the default.
    fn is_default(&self) -> bool;

    /// Whether the current value differs from the last read or written one.
    fn is_save_needed(&self) -> bool;

    /// Untyped view of the default.
    fn default_value(&self) -> Value;

    /// Concrete item, for typed lookup.
    fn as_any(&self) -> &dyn Any;

    /// Mutable concrete item, for typed lookup.
    fn as_any_mut(&mut self) -> &mut dyn Any;

    /// Item this one decorates, if any.
    fn inner(&self) -> Option<&dyn ConfigItem> {
        None
    }

    /// Mutable item this one decorates, if any.
    fn inner_mut(&mut self) -> Option<&mut dyn ConfigItem> {
        None
    }

    /// Group the item was registered in.
    fn group(&self) -> &str {
        self.base().group()
    }

    /// Entry key.
    fn key(&self) -> &str {
        self.base().key()
    }

    /// Internal name.
    fn name(&self) -> &str {
        self.base().name()
    }

    /// Whether the entry is read-only in the store.
    fn is_immutable(&self) -> bool {
        self.base().is_immutable()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confkit_store::Config;

    #[test]
    fn test_base_defaults() {
        let base = ItemBase::new("General", "Enabled");
        assert_eq!(base.group(), "General");
        assert_eq!(base.key(), "Enabled");
        assert_eq!(base.name(), "Enabled");
        assert_eq!(base.write_flags(), WriteFlags::NORMAL);
        assert!(!base.is_immutable());
    }

    #[test]
    fn test_group_override() {
        let mut base = ItemBase::new("General", "Enabled");
        base.set_group_override(Some("General][Nested".to_string()));
        assert_eq!(base.group(), "General");
        assert_eq!(base.store_group(), "General][Nested");

        base.set_group_override(None);
        assert_eq!(base.store_group(), "General");
    }

    #[test]
    fn test_refresh_immutability() {
        let mut config = Config::in_memory("scratch");
        config.set_entry_immutable("General", "Locked");

        let mut base = ItemBase::new("General", "Locked");
        base.refresh_immutability(&config);
        assert!(base.is_immutable());
    }
}
