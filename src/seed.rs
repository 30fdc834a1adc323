//! Zero-value seeds for folds without an explicit initial value.
//!
//! When `reduce` is called without an initial accumulator, the seed is
//! derived from the first element through [`AutoSeed`]:
//!
//! | First element | `Value` seed     |
//! |---------------|------------------|
//! | byte string   | `b''`            |
//! | int or bool   | `0`              |
//! | float         | `0.0`            |
//! | string        | `''`             |
//! | set           | empty set        |
//! | map           | empty map        |
//!
//! Anything else has no seed, and `reduce` fails with
//! [`SeqError::NoAutoSeed`](crate::SeqError::NoAutoSeed).
//!
//! Typed accumulators implement only the row that produces their own type:
//! an `i64` accumulator can be seeded from an integer element but not from
//! a string.

use std::collections::{BTreeMap, BTreeSet};

use crate::value::Value;

/// Accumulator types that can derive a zero value from a sequence's first
/// element.
pub trait AutoSeed: Sized {
    /// Returns the zero value for a fold whose first element is `first`.
    fn auto_seed(first: &Value) -> Option<Self>;
}

impl AutoSeed for Value {
    fn auto_seed(first: &Value) -> Option<Self> {
        match first {
            Value::Bytes(_) => Some(Self::Bytes(Vec::new())),
            Value::Int(_) | Value::Bool(_) => Some(Self::Int(0)),
            Value::Float(_) => Some(Self::Float(0.0)),
            Value::Str(_) => Some(Self::Str(String::new())),
            Value::Set(_) => Some(Self::Set(BTreeSet::new())),
            Value::Map(_) => Some(Self::Map(BTreeMap::new())),
            Value::None | Value::List(_) | Value::Tuple(_) => None,
        }
    }
}

impl AutoSeed for i64 {
    fn auto_seed(first: &Value) -> Option<Self> {
        matches!(first, Value::Int(_) | Value::Bool(_)).then_some(0)
    }
}

impl AutoSeed for f64 {
    fn auto_seed(first: &Value) -> Option<Self> {
        matches!(first, Value::Float(_)).then_some(0.0)
    }
}

impl AutoSeed for String {
    fn auto_seed(first: &Value) -> Option<Self> {
        matches!(first, Value::Str(_)).then(Self::new)
    }
}

impl AutoSeed for Vec<u8> {
    fn auto_seed(first: &Value) -> Option<Self> {
        matches!(first, Value::Bytes(_)).then(Self::new)
    }
}

impl AutoSeed for BTreeSet<Value> {
    fn auto_seed(first: &Value) -> Option<Self> {
        matches!(first, Value::Set(_)).then(Self::new)
    }
}

impl AutoSeed for BTreeMap<String, Value> {
    fn auto_seed(first: &Value) -> Option<Self> {
        matches!(first, Value::Map(_)).then(Self::new)
    }
}
