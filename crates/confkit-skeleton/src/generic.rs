//! The typed item every concrete kind is an alias of.

use crate::codec::{
    Choice, EntryCodec, EnumCodec, Plain, PropertyCodec, StringCodec, StringKind, StringListCodec,
};
use crate::item::{ConfigItem, ItemBase};
use crate::value::{Bounded, ItemValue};
use chrono::NaiveDateTime;
use confkit_core::{Point, Rect, Size, Value};
use confkit_store::ConfigStore;
use std::any::Any;
use tracing::{trace, warn};
use url::Url;

/// A preference holding a value of type `T`, encoded with codec `C`.
///
/// Tracks three values: the current one, the default, and the one last read
/// from or written to the store. `is_default` compares current with default,
/// `is_save_needed` compares current with loaded, both through
/// [`ItemValue::same_as`].
#[derive(Debug, Clone)]
pub struct GenericItem<T, C = Plain> {
    base: ItemBase,
    value: T,
    default: T,
    loaded: T,
    min: Option<T>,
    max: Option<T>,
    codec: C,
}

/// Boolean item.
pub type ItemBool = GenericItem<bool>;
/// 32-bit signed integer item.
pub type ItemInt = GenericItem<i32>;
/// 32-bit unsigned integer item.
pub type ItemUInt = GenericItem<u32>;
/// 64-bit signed integer item.
pub type ItemLongLong = GenericItem<i64>;
/// 64-bit unsigned integer item.
pub type ItemULongLong = GenericItem<u64>;
/// Double precision item.
pub type ItemDouble = GenericItem<f64>;
/// Text item, also used for passwords and paths.
pub type ItemString = GenericItem<String, StringCodec>;
/// String list item, also used for path lists.
pub type ItemStringList = GenericItem<Vec<String>, StringListCodec>;
/// Integer list item.
pub type ItemIntList = GenericItem<Vec<i32>>;
/// URL item; `None` is the empty URL.
pub type ItemUrl = GenericItem<Option<Url>>;
/// URL list item.
pub type ItemUrlList = GenericItem<Vec<Url>>;
/// Rectangle item.
pub type ItemRect = GenericItem<Rect>;
/// Point item.
pub type ItemPoint = GenericItem<Point>;
/// Size item.
pub type ItemSize = GenericItem<Size>;
/// Date-time item; `None` is the null date-time.
pub type ItemDateTime = GenericItem<Option<NaiveDateTime>>;
/// Enum item; the value is an index into the choices.
pub type ItemEnum = GenericItem<i32, EnumCodec>;
/// Untyped item; entry text is parsed as the default's type.
pub type ItemProperty = GenericItem<Value, PropertyCodec>;

impl<T: ItemValue, C> GenericItem<T, C> {
    /// Create an item with the given codec. The current and loaded values
    /// start at the default.
    pub fn with_codec(group: impl Into<String>, key: impl Into<String>, default: T, codec: C) -> Self {
        Self {
            base: ItemBase::new(group, key),
            value: default.clone(),
            loaded: default.clone(),
            default,
            min: None,
            max: None,
            codec,
        }
    }

    /// Current value.
    #[must_use]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Mutable access to the current value.
    pub fn value_mut(&mut self) -> &mut T {
        &mut self.value
    }

    /// Replace the current value.
    pub fn set_value(&mut self, value: T) {
        self.value = value;
    }

    /// Default value.
    #[must_use]
    pub fn default_ref(&self) -> &T {
        &self.default
    }

    /// Replace the default. The current value is left alone.
    pub fn set_default_value(&mut self, default: T) {
        self.default = default;
    }

    /// Value at the last read or write.
    #[must_use]
    pub fn loaded(&self) -> &T {
        &self.loaded
    }

    /// Codec used for entry text.
    #[must_use]
    pub fn codec(&self) -> &C {
        &self.codec
    }

    /// Mutable codec.
    pub fn codec_mut(&mut self) -> &mut C {
        &mut self.codec
    }
}

impl<T: ItemValue> GenericItem<T, Plain> {
    /// Create an item using the store's encoding for `T`.
    pub fn new(group: impl Into<String>, key: impl Into<String>, default: T) -> Self {
        Self::with_codec(group, key, default, Plain)
    }
}

impl<T: Bounded, C> GenericItem<T, C> {
    /// Set the lower bound. The current and default values are not checked.
    pub fn set_min_value(&mut self, min: T) {
        self.min = Some(min);
    }

    /// Set the upper bound. The current and default values are not checked.
    pub fn set_max_value(&mut self, max: T) {
        self.max = Some(max);
    }

    /// Lower bound, if set.
    #[must_use]
    pub fn min(&self) -> Option<&T> {
        self.min.as_ref()
    }

    /// Upper bound, if set.
    #[must_use]
    pub fn max(&self) -> Option<&T> {
        self.max.as_ref()
    }

    /// Whether the current value lies within the bounds.
    #[must_use]
    pub fn in_bounds(&self) -> bool {
        self.min.as_ref().map_or(true, |min| self.value >= *min)
            && self.max.as_ref().map_or(true, |max| self.value <= *max)
    }
}

impl ItemString {
    /// Plain text item.
    pub fn string(group: impl Into<String>, key: impl Into<String>, default: impl Into<String>) -> Self {
        Self::with_codec(group, key, default.into(), StringCodec::new(StringKind::Normal))
    }

    /// Password item, obscured in the file.
    pub fn password(group: impl Into<String>, key: impl Into<String>, default: impl Into<String>) -> Self {
        Self::with_codec(group, key, default.into(), StringCodec::new(StringKind::Password))
    }

    /// Path item.
    pub fn path(group: impl Into<String>, key: impl Into<String>, default: impl Into<String>) -> Self {
        Self::with_codec(group, key, default.into(), StringCodec::new(StringKind::Path))
    }

    /// Kind of string held.
    #[must_use]
    pub fn kind(&self) -> StringKind {
        self.codec.kind()
    }
}

impl ItemStringList {
    /// String list item.
    pub fn string_list(group: impl Into<String>, key: impl Into<String>, default: Vec<String>) -> Self {
        Self::with_codec(group, key, default, StringListCodec::strings())
    }

    /// Path list item.
    pub fn path_list(group: impl Into<String>, key: impl Into<String>, default: Vec<String>) -> Self {
        Self::with_codec(group, key, default, StringListCodec::paths())
    }
}

impl ItemEnum {
    /// Enum item over `choices` with the default index `default`.
    pub fn with_choices(
        group: impl Into<String>,
        key: impl Into<String>,
        choices: Vec<Choice>,
        default: i32,
    ) -> Self {
        Self::with_codec(group, key, default, EnumCodec::new(choices))
    }

    /// Choices in index order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        self.codec.choices()
    }

    /// Text stored for a choice, `None` if no choice has that name.
    #[must_use]
    pub fn value_for_choice(&self, name: &str) -> Option<String> {
        self.codec.value_for_choice(name)
    }

    /// Change the text stored for a choice. Unknown names change nothing.
    pub fn set_value_for_choice(&mut self, name: &str, value: impl Into<String>) {
        if !self.codec.set_value_for_choice(name, value) {
            warn!(item = %self.base.name(), choice = name, "no such choice");
        }
    }

    /// Select the first choice named `name`. Returns whether one matched;
    /// otherwise the value is unchanged.
    pub fn select_choice(&mut self, name: &str) -> bool {
        match self.codec.index_of(name).and_then(|i| i32::try_from(i).ok()) {
            Some(index) => {
                self.value = index;
                true
            }
            None => false,
        }
    }

    /// The currently selected choice, `None` when the value is out of range.
    #[must_use]
    pub fn selected_choice(&self) -> Option<&Choice> {
        usize::try_from(self.value)
            .ok()
            .and_then(|i| self.codec.choices().get(i))
    }
}

impl ItemProperty {
    /// Untyped item with a default of any variant.
    pub fn property(group: impl Into<String>, key: impl Into<String>, default: Value) -> Self {
        Self::with_codec(group, key, default, PropertyCodec)
    }
}

impl<T, C> ConfigItem for GenericItem<T, C>
where
    T: ItemValue,
    C: EntryCodec<T> + 'static,
{
    fn base(&self) -> &ItemBase {
        &self.base
    }

    fn base_mut(&mut self) -> &mut ItemBase {
        &mut self.base
    }

    fn read_config(&mut self, store: &dyn ConfigStore) {
        let group = self.base.store_group();
        let key = self.base.key();

        self.value = match store.read_entry(group, key) {
            None => self.default.clone(),
            Some(raw) => self.codec.decode(&raw, &self.default).unwrap_or_else(|| {
                warn!(group, key, raw = %raw, "malformed entry, using default");
                self.default.clone()
            }),
        };
        self.loaded = self.value.clone();
        self.base.refresh_immutability(store);
    }

    fn write_config(&mut self, store: &mut dyn ConfigStore) {
        if self.value.same_as(&self.loaded) {
            return;
        }

        let group = self.base.store_group();
        let key = self.base.key();
        let flags = self.base.write_flags();

        if self.value.same_as(&self.default) && !store.has_default(group, key) {
            trace!(group, key, "value is default, reverting entry");
            store.revert_to_default(group, key, flags);
        } else if let Some(text) = self.codec.encode(&self.value) {
            store.write_entry(group, key, &text, flags);
        } else {
            warn!(group, key, "value cannot be stored, reverting entry");
            store.revert_to_default(group, key, flags);
        }

        self.loaded = self.value.clone();
    }

    fn read_default(&mut self, store: &mut dyn ConfigStore) {
        store.set_read_defaults(true);
        self.read_config(store);
        store.set_read_defaults(false);
        self.default = self.value.clone();
    }

    fn set_property(&mut self, value: &Value) {
        match T::from_value(value) {
            Some(v) => self.value = v,
            None => warn!(
                item = %self.base.name(),
                got = value.type_name(),
                "ignoring property of the wrong type"
            ),
        }
    }

    fn property(&self) -> Value {
        self.value.to_value()
    }

    fn is_equal(&self, value: &Value) -> bool {
        T::from_value(value).is_some_and(|v| v.same_as(&self.value))
    }

    fn min_value(&self) -> Value {
        self.min.as_ref().map_or(Value::Invalid, ItemValue::to_value)
    }

    fn max_value(&self) -> Value {
        self.max.as_ref().map_or(Value::Invalid, ItemValue::to_value)
    }

    fn set_default(&mut self) {
        self.value = self.default.clone();
    }

    fn swap_default(&mut self) {
        std::mem::swap(&mut self.value, &mut self.default);
    }

    fn is_default(&self) -> bool {
        self.value.same_as(&self.default)
    }

    fn is_save_needed(&self) -> bool {
        !self.value.same_as(&self.loaded)
    }

    fn default_value(&self) -> Value {
        self.default.to_value()
    }

    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
