//! Text encoding of typed values.
//!
//! The store keeps every entry as text. [`ConfigValue`] converts typed values
//! to and from that text: lists are comma separated with `\` escaping,
//! geometry is a comma separated tuple and date-times use ISO 8601, with a
//! fractional second part only when one is set. Parsing never panics; malformed text yields `None` so callers
//! can fall back to a default.

use chrono::{NaiveDate, NaiveDateTime};
use confkit_core::{Point, Rect, Size, Value};
use url::Url;

const DATE_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.f";

/// A value that can be stored as a configuration entry.
pub trait ConfigValue: Sized {
    /// Render the value as entry text.
    fn to_entry(&self) -> String;

    /// Parse entry text, `None` when malformed.
    fn from_entry(raw: &str) -> Option<Self>;
}

impl ConfigValue for bool {
    fn to_entry(&self) -> String {
        self.to_string()
    }

    fn from_entry(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "on" | "yes" | "1" => Some(true),
            "false" | "off" | "no" | "0" => Some(false),
            _ => None,
        }
    }
}

macro_rules! numeric_entry {
    ($($ty:ty),*) => {
        $(
            impl ConfigValue for $ty {
                fn to_entry(&self) -> String {
                    self.to_string()
                }

                fn from_entry(raw: &str) -> Option<Self> {
                    raw.trim().parse().ok()
                }
            }
        )*
    };
}

numeric_entry!(i32, u32, i64, u64, f64);

impl ConfigValue for String {
    fn to_entry(&self) -> String {
        self.clone()
    }

    fn from_entry(raw: &str) -> Option<Self> {
        Some(raw.to_string())
    }
}

impl ConfigValue for Vec<String> {
    fn to_entry(&self) -> String {
        join_list(self)
    }

    fn from_entry(raw: &str) -> Option<Self> {
        Some(split_list(raw))
    }
}

impl ConfigValue for Vec<i32> {
    fn to_entry(&self) -> String {
        join_ints(self)
    }

    fn from_entry(raw: &str) -> Option<Self> {
        parse_ints(raw)
    }
}

impl ConfigValue for Rect {
    fn to_entry(&self) -> String {
        join_ints(&[self.x, self.y, self.width, self.height])
    }

    fn from_entry(raw: &str) -> Option<Self> {
        match parse_ints(raw)?.as_slice() {
            [x, y, width, height] => Some(Rect::new(*x, *y, *width, *height)),
            _ => None,
        }
    }
}

impl ConfigValue for Point {
    fn to_entry(&self) -> String {
        join_ints(&[self.x, self.y])
    }

    fn from_entry(raw: &str) -> Option<Self> {
        match parse_ints(raw)?.as_slice() {
            [x, y] => Some(Point::new(*x, *y)),
            _ => None,
        }
    }
}

impl ConfigValue for Size {
    fn to_entry(&self) -> String {
        join_ints(&[self.width, self.height])
    }

    fn from_entry(raw: &str) -> Option<Self> {
        match parse_ints(raw)?.as_slice() {
            [width, height] => Some(Size::new(*width, *height)),
            _ => None,
        }
    }
}

impl ConfigValue for NaiveDateTime {
    fn to_entry(&self) -> String {
        self.format(DATE_TIME_FORMAT).to_string()
    }

    fn from_entry(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if let Ok(dt) = raw.parse::<NaiveDateTime>() {
            return Some(dt);
        }

        // Older files store `year,month,day[,hour,minute,second]`.
        let parts = parse_ints(raw)?;
        let (date, time) = match parts.as_slice() {
            [y, m, d] => ((*y, *m, *d), (0, 0, 0)),
            [y, m, d, h, min, s] => ((*y, *m, *d), (*h, *min, *s)),
            _ => return None,
        };
        NaiveDate::from_ymd_opt(
            date.0,
            u32::try_from(date.1).ok()?,
            u32::try_from(date.2).ok()?,
        )?
        .and_hms_opt(
            u32::try_from(time.0).ok()?,
            u32::try_from(time.1).ok()?,
            u32::try_from(time.2).ok()?,
        )
    }
}

impl ConfigValue for Url {
    fn to_entry(&self) -> String {
        self.to_string()
    }

    fn from_entry(raw: &str) -> Option<Self> {
        Url::parse(raw.trim()).ok()
    }
}

impl ConfigValue for Vec<Url> {
    fn to_entry(&self) -> String {
        let urls: Vec<String> = self.iter().map(Url::to_string).collect();
        join_list(&urls)
    }

    fn from_entry(raw: &str) -> Option<Self> {
        split_list(raw)
            .iter()
            .map(|s| Url::from_entry(s))
            .collect()
    }
}

/// Empty text is the empty value; anything else must parse.
impl<T: ConfigValue> ConfigValue for Option<T> {
    fn to_entry(&self) -> String {
        self.as_ref().map(ConfigValue::to_entry).unwrap_or_default()
    }

    fn from_entry(raw: &str) -> Option<Self> {
        if raw.trim().is_empty() {
            Some(None)
        } else {
            T::from_entry(raw).map(Some)
        }
    }
}

/// Render an untyped value as entry text.
#[must_use]
pub fn value_to_entry(value: &Value) -> String {
    match value {
        Value::Invalid => String::new(),
        Value::Bool(v) => v.to_entry(),
        Value::Int(v) => v.to_entry(),
        Value::UInt(v) => v.to_entry(),
        Value::LongLong(v) => v.to_entry(),
        Value::ULongLong(v) => v.to_entry(),
        Value::Double(v) => v.to_entry(),
        Value::String(v) => v.clone(),
        Value::StringList(v) => v.to_entry(),
        Value::IntList(v) => v.to_entry(),
        Value::Url(v) => v.to_entry(),
        Value::UrlList(v) => v.to_entry(),
        Value::Rect(v) => v.to_entry(),
        Value::Point(v) => v.to_entry(),
        Value::Size(v) => v.to_entry(),
        Value::DateTime(v) => v.to_entry(),
    }
}

/// Parse entry text into the same variant as `like`.
///
/// An `Invalid` template reads the text as a string.
#[must_use]
pub fn value_from_entry(raw: &str, like: &Value) -> Option<Value> {
    Some(match like {
        Value::Invalid | Value::String(_) => Value::String(raw.to_string()),
        Value::Bool(_) => Value::Bool(bool::from_entry(raw)?),
        Value::Int(_) => Value::Int(i32::from_entry(raw)?),
        Value::UInt(_) => Value::UInt(u32::from_entry(raw)?),
        Value::LongLong(_) => Value::LongLong(i64::from_entry(raw)?),
        Value::ULongLong(_) => Value::ULongLong(u64::from_entry(raw)?),
        Value::Double(_) => Value::Double(f64::from_entry(raw)?),
        Value::StringList(_) => Value::StringList(Vec::<String>::from_entry(raw)?),
        Value::IntList(_) => Value::IntList(Vec::<i32>::from_entry(raw)?),
        Value::Url(_) => Value::Url(Url::from_entry(raw)?),
        Value::UrlList(_) => Value::UrlList(Vec::<Url>::from_entry(raw)?),
        Value::Rect(_) => Value::Rect(Rect::from_entry(raw)?),
        Value::Point(_) => Value::Point(Point::from_entry(raw)?),
        Value::Size(_) => Value::Size(Size::from_entry(raw)?),
        Value::DateTime(_) => Value::DateTime(NaiveDateTime::from_entry(raw)?),
    })
}

/// Join list elements with `,`, escaping `\` and `,`.
///
/// A list holding one empty string is written as `\0` so it does not read
/// back as an empty list.
#[must_use]
pub fn join_list<S: AsRef<str>>(items: &[S]) -> String {
    if let [only] = items {
        if only.as_ref().is_empty() {
            return "\\0".to_string();
        }
    }

    items
        .iter()
        .map(|item| item.as_ref().replace('\\', "\\\\").replace(',', "\\,"))
        .collect::<Vec<_>>()
        .join(",")
}

/// Inverse of [`join_list`].
#[must_use]
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.is_empty() {
        return Vec::new();
    }
    if raw == "\\0" {
        return vec![String::new()];
    }

    let mut items = Vec::new();
    let mut current = String::new();
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                if let Some(escaped) = chars.next() {
                    current.push(escaped);
                }
            }
            ',' => items.push(std::mem::take(&mut current)),
            _ => current.push(c),
        }
    }
    items.push(current);
    items
}

fn join_ints(values: &[i32]) -> String {
    values
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

fn parse_ints(raw: &str) -> Option<Vec<i32>> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Some(Vec::new());
    }
    raw.split(',').map(|part| part.trim().parse().ok()).collect()
}
