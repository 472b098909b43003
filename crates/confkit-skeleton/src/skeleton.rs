//! The container that owns items and loads and saves them together.

use crate::codec::Choice;
use crate::error::{Result, SkeletonError};
use crate::generic::{
    ItemBool, ItemDateTime, ItemDouble, ItemEnum, ItemInt, ItemIntList, ItemLongLong, ItemPoint,
    ItemProperty, ItemRect, ItemSize, ItemString, ItemStringList, ItemUInt, ItemULongLong,
    ItemUrl, ItemUrlList,
};
use crate::item::ConfigItem;
use chrono::NaiveDateTime;
use confkit_core::{OpenFlags, Point, Rect, Size, StorageLocation, Value};
use confkit_store::{open_config, ConfigStore};
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use tracing::{debug, trace, warn};
use url::Url;

/// Group new items are registered in until [`Skeleton::set_current_group`]
/// is called.
pub const DEFAULT_GROUP: &str = "No Group";

/// Shared handle to the store a skeleton reads from and writes to.
pub type ConfigHandle = Rc<RefCell<dyn ConfigStore>>;

/// Extension points called by [`Skeleton`] after its own work.
///
/// Every method defaults to doing nothing.
pub trait SkeletonHooks {
    /// Called after every item was read.
    fn usr_read(&mut self, _store: &dyn ConfigStore) {}

    /// Called after every item was written and before the store is synced.
    /// Returning `false` aborts the save.
    fn usr_save(&mut self, _store: &mut dyn ConfigStore) -> bool {
        true
    }

    /// Called after every item was reset to its default.
    fn usr_set_defaults(&mut self) {}

    /// Called after the use-defaults state changed.
    fn usr_use_defaults(&mut self, _enabled: bool) {}
}

struct NoHooks;

impl SkeletonHooks for NoHooks {}

/// An ordered set of named items over one configuration store.
///
/// Items are owned by the skeleton and looked up by name. `load` and `save`
/// run over every item in registration order.
pub struct Skeleton {
    config: ConfigHandle,
    items: Vec<Box<dyn ConfigItem>>,
    index: HashMap<String, usize>,
    current_group: String,
    use_defaults: bool,
    hooks: Box<dyn SkeletonHooks>,
    listeners: Vec<Box<dyn FnMut()>>,
}

impl Skeleton {
    /// Create an empty skeleton over `config`.
    pub fn new(config: ConfigHandle) -> Self {
        Self {
            config,
            items: Vec::new(),
            index: HashMap::new(),
            current_group: DEFAULT_GROUP.to_string(),
            use_defaults: false,
            hooks: Box::new(NoHooks),
            listeners: Vec::new(),
        }
    }

    /// Create an empty skeleton over a shared configuration.
    ///
    /// An empty name opens the application's main configuration.
    pub fn open(config_name: &str) -> Result<Self> {
        let config = open_config(config_name, OpenFlags::FULL, StorageLocation::GenericConfig)?;
        Ok(Self::new(config))
    }

    /// Install extension hooks.
    #[must_use]
    pub fn with_hooks(mut self, hooks: impl SkeletonHooks + 'static) -> Self {
        self.hooks = Box::new(hooks);
        self
    }

    /// Register a listener called after every read and every save that
    /// changed the store.
    pub fn on_config_changed(&mut self, listener: impl FnMut() + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// The backing store.
    #[must_use]
    pub fn config(&self) -> ConfigHandle {
        Rc::clone(&self.config)
    }

    /// Switch to another backing store. Items keep their values until the
    /// next read.
    pub fn set_shared_config(&mut self, config: ConfigHandle) {
        self.config = config;
    }

    /// Group used by the `add_item_*` helpers.
    #[must_use]
    pub fn current_group(&self) -> &str {
        &self.current_group
    }

    /// Change the group used by later `add_item_*` calls. Items already
    /// registered keep their group.
    pub fn set_current_group(&mut self, group: impl Into<String>) {
        self.current_group = group.into();
    }

    /// Register an item under `name`, or under its key when `name` is empty.
    ///
    /// The item's default and current value are read from the store
    /// immediately.
    ///
    /// # Errors
    /// Returns [`SkeletonError::DuplicateItem`] if the name is taken; the
    /// registered item is left untouched.
    pub fn add_item(&mut self, item: Box<dyn ConfigItem>, name: &str) -> Result<&mut dyn ConfigItem> {
        let index = self.insert(item, name)?;
        let item: &mut dyn ConfigItem = self.items[index].as_mut();
        Ok(item)
    }

    fn insert(&mut self, mut item: Box<dyn ConfigItem>, name: &str) -> Result<usize> {
        let name = if name.is_empty() {
            item.key().to_string()
        } else {
            name.to_string()
        };
        if self.index.contains_key(&name) {
            warn!(name = %name, "item name already registered");
            return Err(SkeletonError::DuplicateItem { name });
        }

        item.base_mut().set_name(name.clone());
        {
            let mut store = self.config.borrow_mut();
            item.read_default(&mut *store);
            item.read_config(&*store);
        }

        trace!(name = %name, group = item.group(), key = item.key(), "registered item");
        let index = self.items.len();
        self.items.push(item);
        self.index.insert(name, index);
        Ok(index)
    }

    /// Register a typed item and get it back with its concrete type.
    ///
    /// Use this when the entry key differs from the item name; the
    /// `add_item_*` helpers key every item by its name.
    ///
    /// ```rust
    /// use confkit_skeleton::{ItemInt, Skeleton};
    /// use confkit_store::{Config, ConfigStore};
    /// use std::cell::RefCell;
    /// use std::rc::Rc;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = Rc::new(RefCell::new(Config::in_memory("demo")));
    /// let mut skeleton = Skeleton::new(config.clone());
    ///
    /// let item = ItemInt::new("View", "zoom_percent", 100);
    /// skeleton.add_item_typed(item, "Zoom")?.set_value(150);
    /// skeleton.save()?;
    ///
    /// assert_eq!(config.borrow().read_entry("View", "zoom_percent").as_deref(), Some("150"));
    /// # Ok(())
    /// # }
    /// ```
    pub fn add_item_typed<T: ConfigItem>(&mut self, item: T, name: &str) -> Result<&mut T> {
        let index = self.insert(Box::new(item), name)?;
        Ok(self.items[index]
            .as_any_mut()
            .downcast_mut::<T>()
            .expect("item was just inserted with this type"))
    }

    /// Add a boolean item keyed `name` in the current group.
    pub fn add_item_bool(&mut self, name: &str, default: bool) -> Result<&mut ItemBool> {
        let item = ItemBool::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a 32-bit signed integer item.
    pub fn add_item_int(&mut self, name: &str, default: i32) -> Result<&mut ItemInt> {
        let item = ItemInt::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a 32-bit unsigned integer item.
    pub fn add_item_uint(&mut self, name: &str, default: u32) -> Result<&mut ItemUInt> {
        let item = ItemUInt::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a 64-bit signed integer item.
    pub fn add_item_long_long(&mut self, name: &str, default: i64) -> Result<&mut ItemLongLong> {
        let item = ItemLongLong::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a 64-bit unsigned integer item.
    pub fn add_item_u_long_long(&mut self, name: &str, default: u64) -> Result<&mut ItemULongLong> {
        let item = ItemULongLong::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a double precision item.
    pub fn add_item_double(&mut self, name: &str, default: f64) -> Result<&mut ItemDouble> {
        let item = ItemDouble::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a text item.
    pub fn add_item_string(&mut self, name: &str, default: &str) -> Result<&mut ItemString> {
        let item = ItemString::string(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a password item.
    pub fn add_item_password(&mut self, name: &str, default: &str) -> Result<&mut ItemString> {
        let item = ItemString::password(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a path item.
    pub fn add_item_path(&mut self, name: &str, default: &str) -> Result<&mut ItemString> {
        let item = ItemString::path(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a string list item.
    pub fn add_item_string_list(&mut self, name: &str, default: Vec<String>) -> Result<&mut ItemStringList> {
        let item = ItemStringList::string_list(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a path list item.
    pub fn add_item_path_list(&mut self, name: &str, default: Vec<String>) -> Result<&mut ItemStringList> {
        let item = ItemStringList::path_list(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add an integer list item.
    pub fn add_item_int_list(&mut self, name: &str, default: Vec<i32>) -> Result<&mut ItemIntList> {
        let item = ItemIntList::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a URL item.
    pub fn add_item_url(&mut self, name: &str, default: Option<Url>) -> Result<&mut ItemUrl> {
        let item = ItemUrl::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a URL list item.
    pub fn add_item_url_list(&mut self, name: &str, default: Vec<Url>) -> Result<&mut ItemUrlList> {
        let item = ItemUrlList::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a rectangle item.
    pub fn add_item_rect(&mut self, name: &str, default: Rect) -> Result<&mut ItemRect> {
        let item = ItemRect::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a point item.
    pub fn add_item_point(&mut self, name: &str, default: Point) -> Result<&mut ItemPoint> {
        let item = ItemPoint::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a size item.
    pub fn add_item_size(&mut self, name: &str, default: Size) -> Result<&mut ItemSize> {
        let item = ItemSize::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add a date-time item.
    pub fn add_item_date_time(
        &mut self,
        name: &str,
        default: Option<NaiveDateTime>,
    ) -> Result<&mut ItemDateTime> {
        let item = ItemDateTime::new(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Add an enum item over `choices`.
    pub fn add_item_enum(&mut self, name: &str, choices: Vec<Choice>, default: i32) -> Result<&mut ItemEnum> {
        let item = ItemEnum::with_choices(self.current_group.clone(), name, choices, default);
        self.add_item_typed(item, name)
    }

    /// Add an untyped item; entry text is parsed as the default's type.
    pub fn add_item_property(&mut self, name: &str, default: Value) -> Result<&mut ItemProperty> {
        let item = ItemProperty::property(self.current_group.clone(), name, default);
        self.add_item_typed(item, name)
    }

    /// Remove and drop an item. Returns whether it existed.
    pub fn remove_item(&mut self, name: &str) -> bool {
        let Some(index) = self.index.remove(name) else {
            return false;
        };
        self.items.remove(index);
        self.reindex();
        true
    }

    /// Remove and drop every item.
    pub fn clear_items(&mut self) {
        self.items.clear();
        self.index.clear();
    }

    fn reindex(&mut self) {
        self.index = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| (item.name().to_string(), i))
            .collect();
    }

    /// Item registered under `name`.
    #[must_use]
    pub fn find_item(&self, name: &str) -> Option<&dyn ConfigItem> {
        self.index.get(name).map(|&i| self.items[i].as_ref())
    }

    /// Mutable item registered under `name`.
    pub fn find_item_mut(&mut self, name: &str) -> Option<&mut dyn ConfigItem> {
        let index = *self.index.get(name)?;
        let item: &mut dyn ConfigItem = self.items[index].as_mut();
        Some(item)
    }

    /// Item registered under `name` as its concrete type, looking through a
    /// signalling wrapper.
    #[must_use]
    pub fn item<T: ConfigItem>(&self, name: &str) -> Option<&T> {
        let item = self.find_item(name)?;
        if let Some(typed) = item.as_any().downcast_ref::<T>() {
            return Some(typed);
        }
        item.inner()?.as_any().downcast_ref::<T>()
    }

    /// Mutable item registered under `name` as its concrete type, looking
    /// through a signalling wrapper.
    pub fn item_mut<T: ConfigItem>(&mut self, name: &str) -> Option<&mut T> {
        let item = self.find_item_mut(name)?;
        if item.as_any().is::<T>() {
            return item.as_any_mut().downcast_mut::<T>();
        }
        item.inner_mut()?.as_any_mut().downcast_mut::<T>()
    }

    /// Items in registration order.
    #[must_use]
    pub fn items(&self) -> &[Box<dyn ConfigItem>] {
        &self.items
    }

    /// Number of items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether no item is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the named item is read-only in the store. Unknown names are
    /// not immutable.
    #[must_use]
    pub fn is_immutable(&self, name: &str) -> bool {
        self.find_item(name).is_some_and(|item| item.is_immutable())
    }

    /// Reload the store from disk, then [`read`](Self::read).
    pub fn load(&mut self) -> Result<()> {
        self.config.borrow_mut().reparse()?;
        self.read();
        Ok(())
    }

    /// Read the default and current value of every item from the store.
    pub fn read(&mut self) {
        {
            let mut store = self.config.borrow_mut();
            for item in &mut self.items {
                item.read_default(&mut *store);
                item.read_config(&*store);
            }
            self.hooks.usr_read(&*store);
        }
        debug!(items = self.items.len(), "read configuration");
        self.notify_changed();
    }

    /// Write every changed item and sync the store.
    ///
    /// Item writes that completed stay in the store's memory even when the
    /// hook rejects the save or the sync fails.
    ///
    /// # Errors
    /// Returns [`SkeletonError::SaveRejected`] if the save hook refused, or
    /// the store's error if syncing failed.
    pub fn save(&mut self) -> Result<()> {
        let synced = {
            let mut store = self.config.borrow_mut();
            for item in &mut self.items {
                item.write_config(&mut *store);
            }
            if !self.hooks.usr_save(&mut *store) {
                warn!("save rejected by hook");
                return Err(SkeletonError::SaveRejected);
            }
            if store.is_dirty() {
                store.sync()?;
                true
            } else {
                false
            }
        };

        if synced {
            debug!(items = self.items.len(), "saved configuration");
            self.notify_changed();
        } else {
            trace!("nothing to save");
        }
        Ok(())
    }

    /// Reset every item to its default.
    pub fn set_defaults(&mut self) {
        for item in &mut self.items {
            item.set_default();
        }
        self.hooks.usr_set_defaults();
    }

    /// Show defaults instead of the real values, or switch back.
    ///
    /// Swaps every item's value with its default when the state changes;
    /// repeated calls with the same state do nothing. Returns the previous
    /// state.
    pub fn use_defaults(&mut self, enabled: bool) -> bool {
        if enabled == self.use_defaults {
            return self.use_defaults;
        }

        self.use_defaults = enabled;
        for item in &mut self.items {
            item.swap_default();
        }
        self.hooks.usr_use_defaults(enabled);
        !enabled
    }

    /// Whether every item holds its default. True when empty.
    #[must_use]
    pub fn is_defaults(&self) -> bool {
        self.items.iter().all(|item| item.is_default())
    }

    /// Whether any item changed since it was last read or written.
    #[must_use]
    pub fn is_save_needed(&self) -> bool {
        self.items.iter().any(|item| item.is_save_needed())
    }

    fn notify_changed(&mut self) {
        for listener in &mut self.listeners {
            listener();
        }
    }
}

impl fmt::Debug for Skeleton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Skeleton")
            .field("items", &self.items.iter().map(|i| i.name()).collect::<Vec<_>>())
            .field("current_group", &self.current_group)
            .field("use_defaults", &self.use_defaults)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use confkit_store::Config;

    fn skeleton() -> Skeleton {
        Skeleton::new(Rc::new(RefCell::new(Config::in_memory("scratch"))))
    }

    #[test]
    fn test_current_group_applies_to_later_items() {
        let mut skel = skeleton();
        assert_eq!(skel.current_group(), DEFAULT_GROUP);
        skel.add_item_bool("First", false).expect("add first");

        skel.set_current_group("View");
        skel.add_item_int("Second", 1).expect("add second");

        assert_eq!(skel.find_item("First").map(|i| i.group()), Some(DEFAULT_GROUP));
        assert_eq!(skel.find_item("Second").map(|i| i.group()), Some("View"));
    }

    #[test]
    fn test_add_item_uses_key_when_unnamed() {
        let mut skel = skeleton();
        let item = skel
            .add_item(Box::new(ItemInt::new("General", "Width", 3)), "")
            .expect("add item");
        assert_eq!(item.name(), "Width");
        assert!(skel.find_item("Width").is_some());
    }

    #[test]
    fn test_typed_item_with_distinct_key() {
        let config = Rc::new(RefCell::new(Config::in_memory("scratch")));
        config
            .borrow_mut()
            .write_entry("View", "zoom_percent", "125", confkit_core::WriteFlags::NORMAL);
        let mut skel = Skeleton::new(config);

        let item = skel
            .add_item_typed(ItemInt::new("View", "zoom_percent", 100), "Zoom")
            .expect("add zoom");
        assert_eq!(*item.value(), 125);
        assert_eq!(item.key(), "zoom_percent");

        assert_eq!(skel.item::<ItemInt>("Zoom").map(|i| *i.value()), Some(125));
        assert!(skel.find_item("zoom_percent").is_none());
        assert!(matches!(
            skel.add_item_int("Zoom", 1),
            Err(SkeletonError::DuplicateItem { .. })
        ));
    }

    #[test]
    fn test_remove_item_keeps_index_consistent() {
        let mut skel = skeleton();
        skel.add_item_int("A", 1).expect("add a");
        skel.add_item_int("B", 2).expect("add b");
        skel.add_item_int("C", 3).expect("add c");

        assert!(skel.remove_item("A"));
        assert!(!skel.remove_item("A"));
        assert_eq!(skel.len(), 2);
        assert_eq!(skel.item::<ItemInt>("C").map(|i| *i.value()), Some(3));

        skel.clear_items();
        assert!(skel.is_empty());
        assert!(skel.find_item("B").is_none());
    }

    #[test]
    fn test_typed_lookup_checks_type() {
        let mut skel = skeleton();
        skel.add_item_int("Count", 1).expect("add count");
        assert!(skel.item::<ItemInt>("Count").is_some());
        assert!(skel.item::<ItemBool>("Count").is_none());

        if let Some(item) = skel.item_mut::<ItemInt>("Count") {
            item.set_value(4);
        }
        assert!(skel.is_save_needed());
    }

    #[test]
    fn test_use_defaults_is_idempotent() {
        let mut skel = skeleton();
        skel.add_item_int("Count", 1).expect("add count").set_value(7);

        assert!(!skel.use_defaults(true));
        assert_eq!(skel.item::<ItemInt>("Count").map(|i| *i.value()), Some(1));
        assert!(skel.use_defaults(true));
        assert_eq!(skel.item::<ItemInt>("Count").map(|i| *i.value()), Some(1));

        assert!(skel.use_defaults(false));
        assert_eq!(skel.item::<ItemInt>("Count").map(|i| *i.value()), Some(7));
    }

    #[test]
    fn test_set_defaults() {
        let mut skel = skeleton();
        skel.add_item_string("Name", "demo")
            .expect("add name")
            .set_value("other".to_string());
        assert!(!skel.is_defaults());

        skel.set_defaults();
        assert!(skel.is_defaults());
    }
}
