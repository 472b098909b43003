//! Items whose value lives in another object's named property.

use crate::item::{ConfigItem, ItemBase};
use confkit_core::Value;
use confkit_store::ConfigStore;
use std::any::Any;
use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;
use tracing::trace;

/// An object exposing named properties.
pub trait PropertyHost {
    /// Current value of a property, `Value::Invalid` if unknown.
    fn property(&self, name: &str) -> Value;

    /// Assign a property.
    fn set_property(&mut self, name: &str, value: Value);
}

/// Shared handle to a property host.
pub type PropertyHostPtr = Rc<RefCell<dyn PropertyHost>>;

/// Item that proxies a property of a [`PropertyHost`].
///
/// The value is never persisted: reading, writing and reading defaults
/// against a store do nothing, and a save is never needed.
pub struct PropertyItem {
    base: ItemBase,
    host: PropertyHostPtr,
    property_name: String,
    default: Value,
    notify: Option<Box<dyn FnMut()>>,
}

impl PropertyItem {
    /// Proxy `property_name` of `host`.
    pub fn new(
        group: impl Into<String>,
        key: impl Into<String>,
        host: PropertyHostPtr,
        property_name: impl Into<String>,
        default: Value,
    ) -> Self {
        Self {
            base: ItemBase::new(group, key),
            host,
            property_name: property_name.into(),
            default,
            notify: None,
        }
    }

    /// Call `notify` whenever [`ConfigItem::set_property`] changes the value.
    pub fn set_notify_function(&mut self, notify: impl FnMut() + 'static) {
        self.notify = Some(Box::new(notify));
    }

    /// Name of the proxied property.
    #[must_use]
    pub fn property_name(&self) -> &str {
        &self.property_name
    }

    fn current(&self) -> Value {
        self.host.borrow().property(&self.property_name)
    }
}

impl fmt::Debug for PropertyItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PropertyItem")
            .field("base", &self.base)
            .field("property_name", &self.property_name)
            .field("default", &self.default)
            .finish_non_exhaustive()
    }
}

impl ConfigItem for PropertyItem {
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn read_config(&mut self, _store: &dyn ConfigStore) {
        trace!(property = %self.property_name, "property items are not read from the store");
    }

    fn write_config(&mut self, _store: &mut dyn ConfigStore) {
        trace!(property = %self.property_name, "property items are not written to the store");
    }

    fn read_default(&mut self, _store: &mut dyn ConfigStore) {}

    fn set_property(&mut self, value: &Value) {
        if self.is_equal(value) {
            return;
        }
        self.host
            .borrow_mut()
            .set_property(&self.property_name, value.clone());
        if let Some(notify) = self.notify.as_mut() {
            notify();
        }
    }

    fn property(&self) -> Value {
        self.current()
    }

    fn is_equal(&self, value: &Value) -> bool {
        self.current().semantic_eq(value)
    }

    fn set_default(&mut self) {
        let default = self.default.clone();
        self.set_property(&default);
    }

    fn swap_default(&mut self) {
        let current = self.current();
        let default = std::mem::replace(&mut self.default, current);
        self.set_property(&default);
    }

    fn is_default(&self) -> bool {
        self.is_equal(&self.default)
    }

    fn is_save_needed(&self) -> bool {
        false
    }

    fn default_value(&self) -> Value {
        self.default.clone()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
