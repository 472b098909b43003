//! Confkit Skeleton - Typed preference items and the container that owns them.
//!
//! Applications declare named items (booleans, numbers, strings, lists,
//! geometry, date-times, URLs, enums, untyped properties), load them from a
//! configuration store, and save back only what changed.
//!
//! # Architecture
//!
//! - **Items** ([`item`]): The [`ConfigItem`] contract and shared [`ItemBase`] identity
//! - **Generic** ([`generic`]): [`GenericItem`] and the aliases for every item kind
//! - **Codecs** ([`codec`]): Entry text encoding, including passwords, paths and enums
//! - **Values** ([`value`]): Conversion between item values and the untyped [`Value`](confkit_core::Value)
//! - **Property** ([`property`]): Items proxying a property of another object
//! - **Signalling** ([`signalling`]): Decorator reporting value changes
//! - **Skeleton** ([`skeleton`]): The container that loads and saves items together
//! - **Errors** ([`error`]): Skeleton-specific error types
//!
//! # Example
//!
//! ```rust
//! use confkit_skeleton::{ItemBool, Skeleton};
//! use confkit_store::{Config, ConfigStore};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Rc::new(RefCell::new(Config::in_memory("demo")));
//! let mut skeleton = Skeleton::new(config.clone());
//!
//! skeleton.set_current_group("General");
//! skeleton.add_item_bool("Enabled", false)?.set_value(true);
//! skeleton.save()?;
//!
//! assert_eq!(config.borrow().read_entry("General", "Enabled").as_deref(), Some("true"));
//! assert_eq!(skeleton.item::<ItemBool>("Enabled").map(|i| *i.value()), Some(true));
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod codec;
pub mod error;
pub mod generic;
pub mod item;
pub mod property;
pub mod signalling;
pub mod skeleton;
pub mod value;

// Re-export commonly used types
pub use codec::{Choice, EntryCodec, EnumCodec, Plain, PropertyCodec, StringCodec, StringKind, StringListCodec};
pub use error::{Result, SkeletonError};
pub use generic::{
    GenericItem, ItemBool, ItemDateTime, ItemDouble, ItemEnum, ItemInt, ItemIntList,
    ItemLongLong, ItemPoint, ItemProperty, ItemRect, ItemSize, ItemString, ItemStringList,
    ItemUInt, ItemULongLong, ItemUrl, ItemUrlList,
};
pub use item::{ConfigItem, ItemBase};
pub use property::{PropertyHost, PropertyHostPtr, PropertyItem};
pub use signalling::SignallingItem;
pub use skeleton::{ConfigHandle, Skeleton, SkeletonHooks, DEFAULT_GROUP};
pub use value::{Bounded, ItemValue};
