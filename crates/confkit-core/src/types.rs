//! Shared types used across confkit.
//!
//! This module defines the untyped [`Value`] used by reflection-style callers,
//! the small geometry types that preference items can hold, and the write/open
//! flag sets passed to the backing store.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::BitOr;
use url::Url;

/// Untyped preference value.
///
/// Items expose their value through this type for callers that do not know
/// the concrete item kind (property editors, generated bindings). `Invalid`
/// is the "no value" marker returned for unset bounds and empty properties.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    /// No value
    #[default]
    Invalid,
    /// Boolean
    Bool(bool),
    /// 32-bit signed integer
    Int(i32),
    /// 32-bit unsigned integer
    UInt(u32),
    /// 64-bit signed integer
    LongLong(i64),
    /// 64-bit unsigned integer
    ULongLong(u64),
    /// Double precision float
    Double(f64),
    /// Text
    String(String),
    /// List of text values
    StringList(Vec<String>),
    /// List of 32-bit integers
    IntList(Vec<i32>),
    /// Absolute URL
    Url(Url),
    /// List of absolute URLs
    UrlList(Vec<Url>),
    /// Rectangle
    Rect(Rect),
    /// Point
    Point(Point),
    /// Size
    Size(Size),
    /// Local date and time without zone
    DateTime(NaiveDateTime),
}

impl Value {
    /// Whether this value holds anything.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        !matches!(self, Self::Invalid)
    }

    /// Name of the held variant, used in log messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Invalid => "invalid",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::UInt(_) => "uint",
            Self::LongLong(_) => "longlong",
            Self::ULongLong(_) => "ulonglong",
            Self::Double(_) => "double",
            Self::String(_) => "string",
            Self::StringList(_) => "stringlist",
            Self::IntList(_) => "intlist",
            Self::Url(_) => "url",
            Self::UrlList(_) => "urllist",
            Self::Rect(_) => "rect",
            Self::Point(_) => "point",
            Self::Size(_) => "size",
            Self::DateTime(_) => "datetime",
        }
    }

    /// Integer view of any integral variant.
    #[must_use]
    pub fn as_integer(&self) -> Option<i128> {
        match *self {
            Self::Int(v) => Some(i128::from(v)),
            Self::UInt(v) => Some(i128::from(v)),
            Self::LongLong(v) => Some(i128::from(v)),
            Self::ULongLong(v) => Some(i128::from(v)),
            _ => None,
        }
    }

    /// Floating point view of any numeric variant.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(&self) -> Option<f64> {
        match *self {
            Self::Double(v) => Some(v),
            _ => self.as_integer().map(|v| v as f64),
        }
    }

    /// Text view of string-like variants.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            Self::Url(u) => Some(u.as_str()),
            _ => None,
        }
    }

    /// Semantic equality.
    ///
    /// Numbers compare by value regardless of width (`Int(5)` equals
    /// `ULongLong(5)`), NaN equals NaN, and a URL equals its own text. All
    /// other variants compare structurally.
    #[must_use]
    pub fn semantic_eq(&self, other: &Value) -> bool {
        match (self, other) {
            (Self::Double(_), _) | (_, Self::Double(_)) => {
                match (self.as_f64(), other.as_f64()) {
                    (Some(a), Some(b)) => a == b || (a.is_nan() && b.is_nan()),
                    _ => false,
                }
            }
            _ => {
                if let (Some(a), Some(b)) = (self.as_integer(), other.as_integer()) {
                    return a == b;
                }
                if let (Some(a), Some(b)) = (self.as_str(), other.as_str()) {
                    return a == b;
                }
                self == other
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Invalid => write!(f, "<invalid>"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Int(v) => write!(f, "{v}"),
            Self::UInt(v) => write!(f, "{v}"),
            Self::LongLong(v) => write!(f, "{v}"),
            Self::ULongLong(v) => write!(f, "{v}"),
            Self::Double(v) => write!(f, "{v}"),
            Self::String(v) => write!(f, "{v}"),
            Self::StringList(v) => write!(f, "{v:?}"),
            Self::IntList(v) => write!(f, "{v:?}"),
            Self::Url(v) => write!(f, "{v}"),
            Self::UrlList(v) => {
                let urls: Vec<&str> = v.iter().map(Url::as_str).collect();
                write!(f, "{urls:?}")
            }
            Self::Rect(v) => write!(f, "{v}"),
            Self::Point(v) => write!(f, "{v}"),
            Self::Size(v) => write!(f, "{v}"),
            Self::DateTime(v) => write!(f, "{}", v.format("%Y-%m-%dT%H:%M:%S%.f")),
        }
    }
}

macro_rules! value_from {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Self::$variant(v)
                }
            }
        )*
    };
}

value_from! {
    bool => Bool,
    i32 => Int,
    u32 => UInt,
    i64 => LongLong,
    u64 => ULongLong,
    f64 => Double,
    String => String,
    Vec<String> => StringList,
    Vec<i32> => IntList,
    Url => Url,
    Vec<Url> => UrlList,
    Rect => Rect,
    Point => Point,
    Size => Size,
    NaiveDateTime => DateTime,
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

/// Integer rectangle: origin plus extent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Left edge
    pub x: i32,
    /// Top edge
    pub y: i32,
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// A rectangle with no area.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Top left corner.
    #[must_use]
    pub fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Extent.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl fmt::Display for Rect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{} {}x{}", self.x, self.y, self.width, self.height)
    }
}

/// Integer point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: i32,
    /// Vertical coordinate
    pub y: i32,
}

impl Point {
    /// Create a point.
    #[must_use]
    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Integer size.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: i32,
    /// Height
    pub height: i32,
}

impl Size {
    /// Create a size.
    #[must_use]
    pub fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Both dimensions are non-negative.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.width >= 0 && self.height >= 0
    }
}

impl fmt::Display for Size {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Write policy bitmask passed along with every store write.
///
/// Only [`WriteFlags::PERSISTENT`] changes store behaviour: entries written
/// without it live in memory and are never synced to disk. The remaining
/// bits are carried through for callers that inspect them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WriteFlags(u8);

impl WriteFlags {
    /// Entry is written to disk on sync.
    pub const PERSISTENT: Self = Self(0x01);
    /// Entry belongs to the global (desktop wide) file.
    pub const GLOBAL: Self = Self(0x02);
    /// Entry is written with a locale suffix.
    pub const LOCALIZED: Self = Self(0x04);
    /// Change is announced to other processes; implies persistence.
    pub const NOTIFY: Self = Self(0x08 | 0x01);
    /// Default policy.
    pub const NORMAL: Self = Self::PERSISTENT;
    /// No flags at all: in-memory only.
    pub const NONE: Self = Self(0);

    /// Whether every bit of `other` is set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// Whether entries written with these flags reach the disk.
    #[must_use]
    pub fn is_persistent(self) -> bool {
        self.contains(Self::PERSISTENT)
    }

    /// Raw bits.
    #[must_use]
    pub fn bits(self) -> u8 {
        self.0
    }
}

impl Default for WriteFlags {
    fn default() -> Self {
        Self::NORMAL
    }
}

impl BitOr for WriteFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

/// Flags a configuration file is opened with.
///
/// Part of the shared-config cache key. The file store itself does not
/// cascade, so the flags only distinguish otherwise identical handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OpenFlags(u8);

impl OpenFlags {
    /// Only the named file, no globals, no cascade.
    pub const SIMPLE: Self = Self(0x00);
    /// Also read the global file.
    pub const INCLUDE_GLOBALS: Self = Self(0x01);
    /// Cascade over system configuration directories.
    pub const CASCADE: Self = Self(0x02);
    /// Globals plus cascade.
    pub const FULL: Self = Self(0x03);

    /// Whether every bit of `other` is set.
    #[must_use]
    pub fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }

    /// True for [`OpenFlags::SIMPLE`].
    #[must_use]
    pub fn is_simple(self) -> bool {
        self.0 == 0
    }
}

impl Default for OpenFlags {
    fn default() -> Self {
        Self::FULL
    }
}

impl BitOr for OpenFlags {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}
