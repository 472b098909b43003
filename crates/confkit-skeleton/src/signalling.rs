//! Decorator that reports value changes of another item.

use crate::item::{ConfigItem, ItemBase};
use confkit_core::Value;
use confkit_store::ConfigStore;
use std::any::Any;
use std::fmt;

/// Wraps an item and calls a notifier with a fixed tag whenever an
/// operation changed the wrapped item's value.
///
/// Reads, default reads, property assignment and the default operations
/// notify; writes and queries never do. Identity is the wrapped item's.
pub struct SignallingItem {
    inner: Box<dyn ConfigItem>,
    notify: Box<dyn FnMut(u64)>,
    user_data: u64,
}

impl SignallingItem {
    /// Wrap `inner`, calling `notify(user_data)` on changes.
    pub fn new(inner: Box<dyn ConfigItem>, notify: impl FnMut(u64) + 'static, user_data: u64) -> Self {
        Self {
            inner,
            notify: Box::new(notify),
            user_data,
        }
    }

    /// Tag passed to the notifier.
    #[must_use]
    pub fn user_data(&self) -> u64 {
        self.user_data
    }

    /// Unwrap the decorated item.
    #[must_use]
    pub fn into_inner(self) -> Box<dyn ConfigItem> {
        self.inner
    }

    fn notifying(&mut self, op: impl FnOnce(&mut dyn ConfigItem)) {
        let before = self.inner.property();
        let item: &mut dyn ConfigItem = self.inner.as_mut();
        op(item);
        if !self.inner.is_equal(&before) {
            (self.notify)(self.user_data);
        }
    }
}

impl fmt::Debug for SignallingItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignallingItem")
            .field("inner", self.inner.base())
            .field("user_data", &self.user_data)
            .finish_non_exhaustive()
    }
}

impl ConfigItem for SignallingItem {
    fn base(&self) -> &ItemBase {
        self.inner.base()
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        self.inner.base_mut()
    }

    fn read_config(&mut self, store: &dyn ConfigStore) {
        self.notifying(|item| item.read_config(store));
    }

    fn write_config(&mut self, store: &mut dyn ConfigStore) {
        self.inner.write_config(store);
    }

    fn read_default(&mut self, store: &mut dyn ConfigStore) {
        self.notifying(|item| item.read_default(store));
    }

    fn set_property(&mut self, value: &Value) {
        self.notifying(|item| item.set_property(value));
    }

    fn property(&self) -> Value {
        self.inner.property()
    }

    fn is_equal(&self, value: &Value) -> bool {
        self.inner.is_equal(value)
    }

    fn min_value(&self) -> Value {
        self.inner.min_value()
    }

    fn max_value(&self) -> Value {
        self.inner.max_value()
    }

    fn set_default(&mut self) {
        self.notifying(|item| item.set_default());
    }

    fn swap_default(&mut self) {
        self.notifying(|item| item.swap_default());
    }

    fn is_default(&self) -> bool {
        self.inner.is_default()
    }

    fn is_save_needed(&self) -> bool {
        self.inner.is_save_needed()
    }

    fn default_value(&self) -> Value {
        self.inner.default_value()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }

    fn inner(&self) -> Option<&dyn ConfigItem> {
        Some(self.inner.as_ref())
    }

    fn inner_mut(&mut self) -> Option<&mut dyn ConfigItem> {
        let item: &mut dyn ConfigItem = self.inner.as_mut();
        Some(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::generic::ItemInt;
    use confkit_core::WriteFlags;
    use confkit_store::Config;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording(default: i32) -> (SignallingItem, Rc<RefCell<Vec<u64>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let item = SignallingItem::new(
            Box::new(ItemInt::new("General", "Count", default)),
            move |tag| sink.borrow_mut().push(tag),
            42,
        );
        (item, seen)
    }

    #[test]
    fn test_notifies_on_change() {
        let (mut item, seen) = recording(1);

        item.set_property(&Value::Int(1));
        assert!(seen.borrow().is_empty());

        item.set_property(&Value::Int(2));
        assert_eq!(*seen.borrow(), vec![42]);

        item.set_default();
        item.swap_default();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[test]
    fn test_read_notifies_only_when_value_changes() {
        let (mut item, seen) = recording(1);
        let mut config = Config::in_memory("scratch");

        item.read_config(&config);
        assert!(seen.borrow().is_empty());

        config.write_entry("General", "Count", "5", WriteFlags::NORMAL);
        item.read_config(&config);
        assert_eq!(*seen.borrow(), vec![42]);
        assert_eq!(item.property(), Value::Int(5));
    }

    #[test]
    fn test_write_never_notifies() {
        let (mut item, seen) = recording(1);
        let mut config = Config::in_memory("scratch");

        item.set_property(&Value::Int(3));
        seen.borrow_mut().clear();

        item.write_config(&mut config);
        assert!(seen.borrow().is_empty());
        assert_eq!(config.read_entry("General", "Count").as_deref(), Some("3"));
    }

    #[test]
    fn test_identity_is_inner() {
        let (item, _) = recording(1);
        assert_eq!(item.name(), "Count");
        assert_eq!(item.group(), "General");
        assert!(item.inner().is_some());
    }
}
