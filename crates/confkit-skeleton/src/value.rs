//! Conversion between item value types and the untyped [`Value`].

use chrono::NaiveDateTime;
use confkit_core::{Point, Rect, Size, Value};
use url::Url;

/// A type a [`GenericItem`](crate::GenericItem) can hold.
///
/// `same_as` is the equality items use for their default/loaded tracking. It
/// is structural equality unless a type needs something looser.
pub trait ItemValue: Clone + PartialEq + 'static {
    /// Untyped view of the value.
    fn to_value(&self) -> Value;

    /// Convert from an untyped value, `None` on a type mismatch.
    fn from_value(value: &Value) -> Option<Self>;

    /// Item equality.
    fn same_as(&self, other: &Self) -> bool {
        self == other
    }
}

impl ItemValue for bool {
    fn to_value(&self) -> Value {
        Value::Bool(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }
}

macro_rules! integer_item_value {
    ($($ty:ty),*) => {
        $(
            impl ItemValue for $ty {
                fn to_value(&self) -> Value {
                    Value::from(*self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    value.as_integer().and_then(|v| <$ty>::try_from(v).ok())
                }
            }
        )*
    };
}

integer_item_value!(i32, u32, i64, u64);

impl ItemValue for f64 {
    fn to_value(&self) -> Value {
        Value::Double(*self)
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_f64()
    }

    fn same_as(&self, other: &Self) -> bool {
        self == other || (self.is_nan() && other.is_nan())
    }
}

impl ItemValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        value.as_str().map(ToString::to_string)
    }
}

impl ItemValue for Vec<String> {
    fn to_value(&self) -> Value {
        Value::StringList(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::StringList(list) => Some(list.clone()),
            Value::UrlList(urls) => Some(urls.iter().map(Url::to_string).collect()),
            _ => None,
        }
    }
}

impl ItemValue for Vec<i32> {
    fn to_value(&self) -> Value {
        Value::IntList(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::IntList(list) => Some(list.clone()),
            _ => None,
        }
    }
}

impl ItemValue for Option<Url> {
    fn to_value(&self) -> Value {
        self.clone().map_or(Value::Invalid, Value::Url)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Invalid => Some(None),
            Value::Url(url) => Some(Some(url.clone())),
            Value::String(s) if s.is_empty() => Some(None),
            Value::String(s) => Url::parse(s).ok().map(Some),
            _ => None,
        }
    }
}

impl ItemValue for Vec<Url> {
    fn to_value(&self) -> Value {
        Value::UrlList(self.clone())
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::UrlList(urls) => Some(urls.clone()),
            Value::StringList(list) => list.iter().map(|s| Url::parse(s).ok()).collect(),
            _ => None,
        }
    }
}

impl ItemValue for Option<NaiveDateTime> {
    fn to_value(&self) -> Value {
        self.map_or(Value::Invalid, Value::DateTime)
    }

    fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Invalid => Some(None),
            Value::DateTime(dt) => Some(Some(*dt)),
            _ => None,
        }
    }
}

macro_rules! geometry_item_value {
    ($($ty:ident),*) => {
        $(
            impl ItemValue for $ty {
                fn to_value(&self) -> Value {
                    Value::$ty(*self)
                }

                fn from_value(value: &Value) -> Option<Self> {
                    match value {
                        Value::$ty(v) => Some(*v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

geometry_item_value!(Rect, Point, Size);

impl ItemValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }

    fn from_value(value: &Value) -> Option<Self> {
        Some(value.clone())
    }

    fn same_as(&self, other: &Self) -> bool {
        self.semantic_eq(other)
    }
}

/// Numeric types that carry min/max bounds.
pub trait Bounded: ItemValue + PartialOrd {}

impl Bounded for i32 {}
impl Bounded for u32 {}
impl Bounded for i64 {}
impl Bounded for u64 {}
impl Bounded for f64 {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integer_conversion_checks_range() {
        assert_eq!(i32::from_value(&Value::ULongLong(7)), Some(7));
        assert_eq!(u32::from_value(&Value::Int(-1)), None);
        assert_eq!(i64::from_value(&Value::String("7".to_string())), None);
    }

    #[test]
    fn test_double_nan_is_same() {
        assert!(f64::NAN.same_as(&f64::NAN));
        assert!(!1.0_f64.same_as(&2.0));
    }

    #[test]
    fn test_optional_url() {
        let url = Url::parse("https://kde.org/").expect("parse url");
        assert_eq!(
            Option::<Url>::from_value(&Value::String("https://kde.org/".to_string())),
            Some(Some(url.clone()))
        );
        assert_eq!(Option::<Url>::from_value(&Value::Invalid), Some(None));
        assert_eq!(Some(url.clone()).to_value(), Value::Url(url));
    }

    #[test]
    fn test_value_uses_semantic_equality() {
        assert!(Value::Int(3).same_as(&Value::LongLong(3)));
        assert!(!Value::Int(3).same_as(&Value::String("3".to_string())));
    }
}
