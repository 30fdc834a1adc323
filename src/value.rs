//! The dynamic element type carried by every sequence.
//!
//! A [`Sequence`](crate::Sequence) can be backed by byte buffers, strings,
//! ranges or heterogeneous lists, and a combinator such as `map` may change
//! the element type on the fly. [`Value`] is the closed set of element shapes
//! that can flow through those combinators.
//!
//! # Equality
//!
//! `Value` has a *total* structural ordering: variants are ranked in
//! declaration order and compared by content within a variant. Floats are
//! compared with [`f64::total_cmp`], so `NaN == NaN` and `-0.0 != 0.0`.
//! Values of different variants are never equal, so `Int(1)` and
//! `Float(1.0)` are distinct keys.
//!
//! # Examples
//!
//! ```rust
//! use seqwise::Value;
//!
//! let value = Value::from(42);
//! assert_eq!(value.as_int(), Some(42));
//! assert_eq!(value.type_name(), "int");
//! assert_eq!(value.to_string(), "42");
//!
//! let text = Value::from("hi");
//! assert_eq!(text.as_str(), Some("hi"));
//! assert_ne!(Value::from(1), Value::from(1.0));
//! ```

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet};
use std::hash::{Hash, Hasher};

/// A single sequence element.
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// The absent value.
    #[default]
    None,
    /// A boolean.
    Bool(bool),
    /// A signed integer.
    Int(i64),
    /// A double-precision float.
    Float(f64),
    /// A UTF-8 string.
    Str(String),
    /// An immutable byte string.
    Bytes(Vec<u8>),
    /// A mutable, growable list.
    List(Vec<Value>),
    /// A fixed-length tuple.
    Tuple(Vec<Value>),
    /// An ordered set.
    Set(BTreeSet<Value>),
    /// A string-keyed mapping.
    Map(BTreeMap<String, Value>),
}

impl Value {
    /// Returns the conventional name of this value's type.
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Str(_) => "str",
            Self::Bytes(_) => "bytes",
            Self::List(_) => "list",
            Self::Tuple(_) => "tuple",
            Self::Set(_) => "set",
            Self::Map(_) => "map",
        }
    }

    /// Returns `true` for [`Value::None`].
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns the integer payload, treating booleans as `0`/`1`.
    pub const fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(value) => Some(*value),
            Self::Bool(value) => Some(*value as i64),
            _ => None,
        }
    }

    /// Returns the float payload, widening integers.
    #[allow(clippy::cast_precision_loss)]
    pub fn as_float(&self) -> Option<f64> {
        match self {
            Self::Float(value) => Some(*value),
            Self::Int(value) => Some(*value as f64),
            _ => None,
        }
    }

    /// Returns the string payload.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the byte-string payload.
    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            Self::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// Returns the value as a single byte when it is an integer in `0..=255`.
    pub fn as_byte(&self) -> Option<u8> {
        self.as_int().and_then(|value| u8::try_from(value).ok())
    }

    /// Returns the items of a list or tuple.
    pub fn as_items(&self) -> Option<&[Self]> {
        match self {
            Self::List(items) | Self::Tuple(items) => Some(items),
            _ => None,
        }
    }

    const fn rank(&self) -> u8 {
        match self {
            Self::None => 0,
            Self::Bool(_) => 1,
            Self::Int(_) => 2,
            Self::Float(_) => 3,
            Self::Str(_) => 4,
            Self::Bytes(_) => 5,
            Self::List(_) => 6,
            Self::Tuple(_) => 7,
            Self::Set(_) => 8,
            Self::Map(_) => 9,
        }
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Self::None, Self::None) => Ordering::Equal,
            (Self::Bool(left), Self::Bool(right)) => left.cmp(right),
            (Self::Int(left), Self::Int(right)) => left.cmp(right),
            (Self::Float(left), Self::Float(right)) => left.total_cmp(right),
            (Self::Str(left), Self::Str(right)) => left.cmp(right),
            (Self::Bytes(left), Self::Bytes(right)) => left.cmp(right),
            (Self::List(left), Self::List(right)) | (Self::Tuple(left), Self::Tuple(right)) => {
                left.cmp(right)
            }
            (Self::Set(left), Self::Set(right)) => left.cmp(right),
            (Self::Map(left), Self::Map(right)) => left.cmp(right),
            _ => self.rank().cmp(&other.rank()),
        }
    }
}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.rank().hash(state);
        match self {
            Self::None => {}
            Self::Bool(value) => value.hash(state),
            Self::Int(value) => value.hash(state),
            Self::Float(value) => value.to_bits().hash(state),
            Self::Str(value) => value.hash(state),
            Self::Bytes(value) => value.hash(state),
            Self::List(items) | Self::Tuple(items) => items.hash(state),
            Self::Set(items) => items.hash(state),
            Self::Map(entries) => entries.hash(state),
        }
    }
}

impl From<()> for Value {
    fn from((): ()) -> Self {
        Self::None
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<u8> for Value {
    fn from(value: u8) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<usize> for Value {
    #[allow(clippy::cast_possible_wrap)]
    fn from(value: usize) -> Self {
        Self::Int(value as i64)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Self::Float(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Self::Str(value.to_owned())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Self::Str(value)
    }
}

impl From<char> for Value {
    fn from(value: char) -> Self {
        Self::Str(value.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(value: &[u8]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl<const N: usize> From<&[u8; N]> for Value {
    fn from(value: &[u8; N]) -> Self {
        Self::Bytes(value.to_vec())
    }
}

impl From<Vec<Self>> for Value {
    fn from(items: Vec<Self>) -> Self {
        Self::List(items)
    }
}

impl From<BTreeSet<Self>> for Value {
    fn from(items: BTreeSet<Self>) -> Self {
        Self::Set(items)
    }
}

impl From<BTreeMap<String, Self>> for Value {
    fn from(entries: BTreeMap<String, Self>) -> Self {
        Self::Map(entries)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Self::None, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_variants_of_different_type_are_unequal() {
        assert_ne!(Value::Int(1), Value::Float(1.0));
        assert_ne!(Value::Int(1), Value::Str("1".to_owned()));
        assert_ne!(Value::List(vec![]), Value::Tuple(vec![]));
    }

    #[test]
    fn test_float_equality_is_total() {
        assert_eq!(Value::Float(f64::NAN), Value::Float(f64::NAN));
        assert_ne!(Value::Float(0.0), Value::Float(-0.0));
    }

    #[test]
    fn test_hash_agrees_with_equality() {
        let mut keys = FxHashSet::default();
        keys.insert(Value::from(vec![Value::Int(1), Value::from("a")]));
        assert!(keys.contains(&Value::from(vec![Value::Int(1), Value::from("a")])));
        assert!(!keys.contains(&Value::Tuple(vec![Value::Int(1), Value::from("a")])));
    }

    #[test]
    fn test_ordering_ranks_variants_then_contents() {
        assert!(Value::None < Value::Bool(false));
        assert!(Value::Int(100) < Value::Float(0.0));
        assert!(Value::Int(1) < Value::Int(2));
        assert!(Value::from("a") < Value::from("b"));
    }

    #[test]
    fn test_as_byte_rejects_out_of_range() {
        assert_eq!(Value::Int(255).as_byte(), Some(255));
        assert_eq!(Value::Int(256).as_byte(), None);
        assert_eq!(Value::Int(-1).as_byte(), None);
        assert_eq!(Value::from("a").as_byte(), None);
    }

    #[test]
    fn test_option_conversion() {
        assert_eq!(Value::from(None::<i64>), Value::None);
        assert_eq!(Value::from(Some(3)), Value::Int(3));
    }
}
