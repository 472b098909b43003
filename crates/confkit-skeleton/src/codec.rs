//! How item values are rendered to and parsed from entry text.
//!
//! Most item kinds use [`Plain`], the store's own text encoding. Strings,
//! string lists, enums and property items carry a codec with extra state.

use confkit_core::Value;
use confkit_store::{join_list, split_list, value_from_entry, value_to_entry, ConfigValue};
use directories::BaseDirs;
use once_cell::sync::Lazy;
use regex::{Captures, Regex};
use std::collections::HashMap;
use std::path::Path;

/// Encoding between an item value and entry text.
pub trait EntryCodec<T> {
    /// Parse entry text. `None` makes the item fall back to its default.
    fn decode(&self, raw: &str, default: &T) -> Option<T>;

    /// Render a value. `None` reverts the entry to the store's default
    /// instead of writing.
    fn encode(&self, value: &T) -> Option<String>;
}

/// The store's encoding for the value type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Plain;

impl<T: ConfigValue> EntryCodec<T> for Plain {
    fn decode(&self, raw: &str, _default: &T) -> Option<T> {
        T::from_entry(raw)
    }

    fn encode(&self, value: &T) -> Option<String> {
        Some(value.to_entry())
    }
}

/// What a string item holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum StringKind {
    /// Arbitrary text
    #[default]
    Normal,
    /// Text obscured in the file
    Password,
    /// A filesystem path; the home directory is written as `$HOME` and
    /// environment references are expanded on read
    Path,
}

/// Codec for string items.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringCodec {
    kind: StringKind,
}

impl StringCodec {
    /// Codec for the given kind of string.
    #[must_use]
    pub fn new(kind: StringKind) -> Self {
        Self { kind }
    }

    /// Kind of string handled.
    #[must_use]
    pub fn kind(&self) -> StringKind {
        self.kind
    }
}

impl EntryCodec<String> for StringCodec {
    fn decode(&self, raw: &str, _default: &String) -> Option<String> {
        Some(match self.kind {
            StringKind::Normal => raw.to_string(),
            StringKind::Password => obscure(raw),
            StringKind::Path => expand_path(raw),
        })
    }

    fn encode(&self, value: &String) -> Option<String> {
        Some(match self.kind {
            StringKind::Normal => value.clone(),
            StringKind::Password => obscure(value),
            StringKind::Path => collapse_home(value),
        })
    }
}

/// Codec for string lists, optionally treating every element as a path.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StringListCodec {
    paths: bool,
}

impl StringListCodec {
    /// Codec for plain string lists.
    #[must_use]
    pub fn strings() -> Self {
        Self { paths: false }
    }

    /// Codec for lists of paths.
    #[must_use]
    pub fn paths() -> Self {
        Self { paths: true }
    }

    /// Whether elements are paths.
    #[must_use]
    pub fn is_path_list(&self) -> bool {
        self.paths
    }
}

impl EntryCodec<Vec<String>> for StringListCodec {
    fn decode(&self, raw: &str, _default: &Vec<String>) -> Option<Vec<String>> {
        let items = split_list(raw);
        if self.paths {
            Some(items.iter().map(|item| expand_path(item)).collect())
        } else {
            Some(items)
        }
    }

    fn encode(&self, value: &Vec<String>) -> Option<String> {
        if self.paths {
            let collapsed: Vec<String> = value.iter().map(|item| collapse_home(item)).collect();
            Some(join_list(&collapsed))
        } else {
            Some(join_list(value))
        }
    }
}

/// One selectable value of an enum item.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Choice {
    /// Symbolic name, written to the store
    pub name: String,
    /// Human readable label
    pub label: String,
    /// Short help text
    pub tool_tip: String,
    /// Long help text
    pub whats_this: String,
}

impl Choice {
    /// A choice with only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Set the label.
    #[must_use]
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// Codec for enum items: the value is an index into the choices.
///
/// Each choice is stored as its text, which is the choice name unless
/// overridden with [`EnumCodec::set_value_for_choice`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnumCodec {
    choices: Vec<Choice>,
    values: HashMap<String, String>,
}

impl EnumCodec {
    /// Codec over the given choices.
    #[must_use]
    pub fn new(choices: Vec<Choice>) -> Self {
        Self {
            choices,
            values: HashMap::new(),
        }
    }

    /// Choices in index order.
    #[must_use]
    pub fn choices(&self) -> &[Choice] {
        &self.choices
    }

    /// Index of the first choice with the given name.
    #[must_use]
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.choices.iter().position(|choice| choice.name == name)
    }

    /// Text stored for a choice, `None` if no choice has that name.
    #[must_use]
    pub fn value_for_choice(&self, name: &str) -> Option<String> {
        self.index_of(name)?;
        Some(
            self.values
                .get(name)
                .cloned()
                .unwrap_or_else(|| name.to_string()),
        )
    }

    /// Change the text stored for a choice. Unknown names are ignored.
    ///
    /// Returns whether a choice matched.
    pub fn set_value_for_choice(&mut self, name: &str, value: impl Into<String>) -> bool {
        if self.index_of(name).is_none() {
            return false;
        }
        self.values.insert(name.to_string(), value.into());
        true
    }

    fn text_at(&self, index: usize) -> Option<String> {
        let choice = self.choices.get(index)?;
        self.value_for_choice(&choice.name)
    }
}

impl EntryCodec<i32> for EnumCodec {
    fn decode(&self, raw: &str, _default: &i32) -> Option<i32> {
        let matched = (0..self.choices.len()).find(|&i| self.text_at(i).as_deref() == Some(raw));
        if let Some(index) = matched {
            return i32::try_from(index).ok();
        }

        let ordinal: i32 = raw.trim().parse().ok()?;
        let in_range = usize::try_from(ordinal).is_ok_and(|i| i < self.choices.len());
        in_range.then_some(ordinal)
    }

    fn encode(&self, value: &i32) -> Option<String> {
        usize::try_from(*value).ok().and_then(|i| self.text_at(i))
    }
}

/// Codec for untyped property items: text is parsed as the default's type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PropertyCodec;

impl EntryCodec<Value> for PropertyCodec {
    fn decode(&self, raw: &str, default: &Value) -> Option<Value> {
        value_from_entry(raw, default)
    }

    fn encode(&self, value: &Value) -> Option<String> {
        Some(value_to_entry(value))
    }
}

/// Reversible scramble applied to passwords in the file.
///
/// Maps each code point `c` in `0x22..=0xFFFD` to `0x1001F - c`. Code points
/// whose image is not a valid `char` are left alone, so applying the function
/// twice restores the input.
#[must_use]
pub fn obscure(text: &str) -> String {
    text.chars()
        .map(|c| {
            let code = u32::from(c);
            if (0x22..=0xFFFD).contains(&code) {
                char::from_u32(0x1_001F - code).unwrap_or(c)
            } else {
                c
            }
        })
        .collect()
}

static ENV_REFERENCE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\$(?:\{([A-Za-z_][A-Za-z0-9_]*)\}|([A-Za-z_][A-Za-z0-9_]*))")
        .expect("environment reference regex is hardcoded and valid")
});

/// Expand `$VAR` and `${VAR}` references. Unset variables are kept verbatim.
#[must_use]
pub fn expand_path(raw: &str) -> String {
    ENV_REFERENCE
        .replace_all(raw, |caps: &Captures<'_>| {
            let name = caps
                .get(1)
                .or_else(|| caps.get(2))
                .map_or("", |m| m.as_str());
            std::env::var(name).unwrap_or_else(|_| caps[0].to_string())
        })
        .into_owned()
}

/// Replace a leading home directory with `$HOME`.
#[must_use]
pub fn collapse_home(path: &str) -> String {
    match BaseDirs::new() {
        Some(dirs) => collapse_prefix(path, dirs.home_dir()),
        None => path.to_string(),
    }
}

fn collapse_prefix(path: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    let home = home.trim_end_matches('/');
    if home.is_empty() {
        return path.to_string();
    }

    match path.strip_prefix(home) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => format!("$HOME{rest}"),
        _ => path.to_string(),
    }
}
