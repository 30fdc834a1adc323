//! Concrete sequence storage.
//!
//! [`Sequence`] is a closed sum over the six supported representations.
//! Each variant keeps its native storage, and all of them expose their
//! contents as [`Value`] elements:
//!
//! | Variant          | Element yielded                  |
//! |------------------|----------------------------------|
//! | `MutableBytes`   | `Value::Int` in `0..=255`        |
//! | `ImmutableBytes` | `Value::Int` in `0..=255`        |
//! | `List`           | the stored `Value`               |
//! | `Range`          | `Value::Int`                     |
//! | `Str`            | one-character `Value::Str`       |
//! | `Tuple`          | the stored `Value`               |
//!
//! # Examples
//!
//! ```rust
//! use seqwise::{Kind, Sequence, Value};
//!
//! let text = Sequence::from("Hi!");
//! assert_eq!(text.kind(), Kind::CharacterString);
//! assert_eq!(text.get(2), Some(Value::from("!")));
//! assert_eq!(text.slice(1..3), Sequence::from("i!"));
//!
//! let bytes = Sequence::bytes(b"abc");
//! assert_eq!(bytes.iter().collect::<Vec<_>>(), vec![Value::from(97), Value::from(98), Value::from(99)]);
//! assert!(bytes.contains(&Value::from(b"bc")));
//! ```

use std::fmt::{self, Write};
use std::iter::FusedIterator;
use std::ops::Range;

use crate::error::{Result, SeqError};
use crate::kind::{Kind, classify};
use crate::range::{IntRange, RangeIter};
use crate::render::{write_bytes_literal, write_items};
use crate::value::Value;

/// A concrete, ordered sequence in one of six representations.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Sequence {
    /// Growable byte buffer.
    MutableBytes(Vec<u8>),
    /// Immutable byte string.
    ImmutableBytes(Box<[u8]>),
    /// Growable heterogeneous list.
    List(Vec<Value>),
    /// Unmaterialized integer range.
    Range(IntRange),
    /// UTF-8 string of characters.
    Str(String),
    /// Immutable fixed-length tuple.
    Tuple(Box<[Value]>),
}

impl Sequence {
    /// Creates a mutable byte buffer.
    pub fn bytearray(bytes: impl Into<Vec<u8>>) -> Self {
        Self::MutableBytes(bytes.into())
    }

    /// Creates an immutable byte string.
    pub fn bytes(bytes: impl AsRef<[u8]>) -> Self {
        Self::ImmutableBytes(bytes.as_ref().into())
    }

    /// Creates a list from anything convertible to values.
    pub fn list<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    /// Creates a tuple from anything convertible to values.
    pub fn tuple<I>(items: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<Value>,
    {
        Self::Tuple(items.into_iter().map(Into::into).collect())
    }

    /// Creates the range `start..stop` with step `1`.
    pub fn range(start: i64, stop: i64) -> Self {
        Self::Range(IntRange::from(start..stop))
    }

    /// Creates a stepped range.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidConstructorArgument`] when `step` is zero.
    pub fn stepped_range(start: i64, stop: i64, step: i64) -> Result<Self> {
        IntRange::new(start, stop, step).map(Self::Range)
    }

    /// The representation backing this sequence.
    pub const fn kind(&self) -> Kind {
        classify(self)
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        match self {
            Self::MutableBytes(bytes) => bytes.len(),
            Self::ImmutableBytes(bytes) => bytes.len(),
            Self::List(items) => items.len(),
            Self::Range(range) => range.len(),
            Self::Str(text) => text.chars().count(),
            Self::Tuple(items) => items.len(),
        }
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Str(text) => text.is_empty(),
            other => other.len() == 0,
        }
    }

    /// Returns the element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        match self {
            Self::MutableBytes(bytes) => bytes.get(index).copied().map(Value::from),
            Self::ImmutableBytes(bytes) => bytes.get(index).copied().map(Value::from),
            Self::List(items) => items.get(index).cloned(),
            Self::Range(range) => range.get(index).map(Value::Int),
            Self::Str(text) => text.chars().nth(index).map(Value::from),
            Self::Tuple(items) => items.get(index).cloned(),
        }
    }

    /// Returns the elements at positions `span`, in the same representation.
    ///
    /// Bounds are clamped to the sequence length; a range slice is still a
    /// range.
    pub fn slice(&self, span: Range<usize>) -> Self {
        let (from, to) = clamp_span(span, self.len());
        match self {
            Self::MutableBytes(bytes) => Self::MutableBytes(bytes[from..to].to_vec()),
            Self::ImmutableBytes(bytes) => Self::ImmutableBytes(bytes[from..to].into()),
            Self::List(items) => Self::List(items[from..to].to_vec()),
            Self::Range(range) => Self::Range(range.slice(from, to)),
            Self::Str(text) => Self::Str(text.chars().skip(from).take(to - from).collect()),
            Self::Tuple(items) => Self::Tuple(items[from..to].into()),
        }
    }

    /// Forward iterator over the elements. Call `.rev()` for the reverse.
    pub fn iter(&self) -> Iter<'_> {
        let inner = match self {
            Self::MutableBytes(bytes) => IterInner::Bytes(bytes.iter()),
            Self::ImmutableBytes(bytes) => IterInner::Bytes(bytes.iter()),
            Self::List(items) => IterInner::Values(items.iter()),
            Self::Range(range) => IterInner::Range(range.iter()),
            Self::Str(text) => IterInner::Chars(text.chars()),
            Self::Tuple(items) => IterInner::Values(items.iter()),
        };
        Iter { inner }
    }

    /// Native membership test.
    ///
    /// Byte kinds accept a single byte (`Value::Int`) or a byte string
    /// searched as a contiguous run; strings search for a substring.
    pub fn contains(&self, item: &Value) -> bool {
        match self {
            Self::MutableBytes(bytes) => bytes_contain(bytes, item),
            Self::ImmutableBytes(bytes) => bytes_contain(bytes, item),
            Self::List(items) => items.contains(item),
            Self::Tuple(items) => items.contains(item),
            Self::Range(range) => item.as_int().is_some_and(|value| range.contains(value)),
            Self::Str(text) => item.as_str().is_some_and(|needle| text.contains(needle)),
        }
    }

    /// Copies the elements into a `Vec`.
    pub fn to_values(&self) -> Vec<Value> {
        self.iter().collect()
    }

    /// Moves the elements into a `Vec`, reusing list storage when possible.
    pub fn into_values(self) -> Vec<Value> {
        match self {
            Self::List(items) => items,
            Self::Tuple(items) => items.into_vec(),
            other => other.to_values(),
        }
    }
}

pub(crate) fn clamp_span(span: Range<usize>, length: usize) -> (usize, usize) {
    let to = span.end.min(length);
    (span.start.min(to), to)
}

fn bytes_contain(bytes: &[u8], item: &Value) -> bool {
    match item {
        Value::Bytes(needle) => find_subslice(bytes, needle).is_some(),
        other => other.as_byte().is_some_and(|byte| bytes.contains(&byte)),
    }
}

/// Position of the first occurrence of `needle` within `haystack`.
pub(crate) fn find_subslice(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    haystack
        .windows(needle.len())
        .position(|window| window == needle)
}

/// Number of non-overlapping occurrences of `needle` within `haystack`.
pub(crate) fn count_subslice(haystack: &[u8], needle: &[u8]) -> usize {
    if needle.is_empty() {
        return haystack.len() + 1;
    }
    let mut count = 0;
    let mut position = 0;
    while position + needle.len() <= haystack.len() {
        if &haystack[position..position + needle.len()] == needle {
            count += 1;
            position += needle.len();
        } else {
            position += 1;
        }
    }
    count
}

/// The substring of `text` between character positions `from` and `to`.
pub(crate) fn char_window(text: &str, from: usize, to: usize) -> &str {
    let offset_of = |position: usize| {
        text.char_indices()
            .nth(position)
            .map_or(text.len(), |(offset, _)| offset)
    };
    let (start, end) = (offset_of(from), offset_of(to));
    if start >= end { "" } else { &text[start..end] }
}

impl From<&str> for Sequence {
    fn from(text: &str) -> Self {
        Self::Str(text.to_owned())
    }
}

impl From<String> for Sequence {
    fn from(text: String) -> Self {
        Self::Str(text)
    }
}

impl From<Vec<Value>> for Sequence {
    fn from(items: Vec<Value>) -> Self {
        Self::List(items)
    }
}

impl From<IntRange> for Sequence {
    fn from(range: IntRange) -> Self {
        Self::Range(range)
    }
}

impl From<Range<i64>> for Sequence {
    fn from(range: Range<i64>) -> Self {
        Self::Range(range.into())
    }
}

impl TryFrom<Value> for Sequence {
    type Error = SeqError;

    /// Accepts byte strings, lists, strings and tuples.
    ///
    /// Scalars are rejected as constructor errors; sets and maps are
    /// unordered and reported as unsupported representations.
    fn try_from(value: Value) -> Result<Self> {
        match value {
            Value::Bytes(bytes) => Ok(Self::ImmutableBytes(bytes.into())),
            Value::List(items) => Ok(Self::List(items)),
            Value::Str(text) => Ok(Self::Str(text)),
            Value::Tuple(items) => Ok(Self::Tuple(items.into())),
            Value::Set(_) | Value::Map(_) => {
                Err(SeqError::UnsupportedRepresentation(value.type_name()))
            }
            scalar => Err(SeqError::InvalidConstructorArgument(format!(
                "expected a sequence, got {}",
                scalar.type_name()
            ))),
        }
    }
}

impl<'a> IntoIterator for &'a Sequence {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MutableBytes(bytes) => {
                formatter.write_str("bytearray(")?;
                write_bytes_literal(formatter, bytes)?;
                formatter.write_char(')')
            }
            Self::ImmutableBytes(bytes) => write_bytes_literal(formatter, bytes),
            Self::List(items) => {
                formatter.write_char('[')?;
                write_items(formatter, items.iter())?;
                formatter.write_char(']')
            }
            Self::Range(range) => write!(formatter, "{range}"),
            Self::Str(text) => formatter.write_str(text),
            Self::Tuple(items) => {
                formatter.write_char('(')?;
                write_items(formatter, items.iter())?;
                if items.len() == 1 {
                    formatter.write_char(',')?;
                }
                formatter.write_char(')')
            }
        }
    }
}

/// Iterator over the elements of a [`Sequence`].
///
/// Created by [`Sequence::iter`]; a fresh iterator observes the storage as
/// it was when iteration began.
#[derive(Debug, Clone)]
pub struct Iter<'a> {
    inner: IterInner<'a>,
}

#[derive(Debug, Clone)]
enum IterInner<'a> {
    Bytes(std::slice::Iter<'a, u8>),
    Values(std::slice::Iter<'a, Value>),
    Range(RangeIter),
    Chars(std::str::Chars<'a>),
}

impl Iterator for Iter<'_> {
    type Item = Value;

    fn next(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Bytes(bytes) => bytes.next().copied().map(Value::from),
            IterInner::Values(items) => items.next().cloned(),
            IterInner::Range(range) => range.next().map(Value::Int),
            IterInner::Chars(chars) => chars.next().map(Value::from),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match &self.inner {
            IterInner::Bytes(bytes) => bytes.size_hint(),
            IterInner::Values(items) => items.size_hint(),
            IterInner::Range(range) => range.size_hint(),
            IterInner::Chars(chars) => chars.size_hint(),
        }
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        match &mut self.inner {
            IterInner::Bytes(bytes) => bytes.next_back().copied().map(Value::from),
            IterInner::Values(items) => items.next_back().cloned(),
            IterInner::Range(range) => range.next_back().map(Value::Int),
            IterInner::Chars(chars) => chars.next_back().map(Value::from),
        }
    }
}

impl FusedIterator for Iter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_string_elements_are_characters() {
        let text = Sequence::from("héllo");
        assert_eq!(text.len(), 5);
        assert_eq!(text.get(1), Some(Value::from("é")));
        assert_eq!(text.slice(1..3), Sequence::from("él"));
    }

    #[test]
    fn test_reverse_iteration_for_every_kind() {
        assert_eq!(
            Sequence::range(0, 3).iter().rev().collect::<Vec<_>>(),
            vec![Value::Int(2), Value::Int(1), Value::Int(0)]
        );
        assert_eq!(
            Sequence::from("ab").iter().rev().collect::<Vec<_>>(),
            vec![Value::from("b"), Value::from("a")]
        );
        assert_eq!(
            Sequence::bytearray(vec![1u8, 2]).iter().rev().collect::<Vec<_>>(),
            vec![Value::Int(2), Value::Int(1)]
        );
    }

    #[test]
    fn test_iteration_is_restartable() {
        let list = Sequence::list([1, 2, 3]);
        let first: Vec<Value> = list.iter().collect();
        let second: Vec<Value> = list.iter().collect();
        assert_eq!(first, second);
    }

    #[rstest]
    #[case(Sequence::bytes(b"hello"), Value::from(b"ll"), true)]
    #[case(Sequence::bytes(b"hello"), Value::from(104), true)]
    #[case(Sequence::bytes(b"hello"), Value::from(300), false)]
    #[case(Sequence::from("hello"), Value::from("ell"), true)]
    #[case(Sequence::from("hello"), Value::from(1), false)]
    #[case(Sequence::range(0, 10), Value::from(9), true)]
    #[case(Sequence::range(0, 10), Value::from(10), false)]
    #[case(Sequence::tuple(["a", "b"]), Value::from("b"), true)]
    fn test_native_membership(#[case] sequence: Sequence, #[case] item: Value, #[case] expected: bool) {
        assert_eq!(sequence.contains(&item), expected);
    }

    #[test]
    fn test_slice_clamps_and_keeps_kind() {
        assert_eq!(Sequence::tuple([1, 2, 3]).slice(1..10), Sequence::tuple([2, 3]));
        assert_eq!(Sequence::range(0, 10).slice(2..4), Sequence::range(2, 4));
        assert_eq!(Sequence::list([1, 2]).slice(5..9), Sequence::List(vec![]));
    }

    #[test]
    fn test_range_slice_at_upper_bound() {
        let range = Sequence::stepped_range(i64::MAX - 1, i64::MAX, 2).unwrap();
        let head = range.slice(0..1);
        assert_eq!(head.len(), 1);
        assert_eq!(head.get(0), Some(Value::Int(i64::MAX - 1)));
    }

    #[test]
    fn test_kinds_are_structurally_distinct() {
        assert_ne!(Sequence::list([1, 2]), Sequence::tuple([1, 2]));
        assert_ne!(Sequence::bytes(b"a"), Sequence::bytearray(b"a".to_vec()));
        assert_eq!(Sequence::range(3, 3), Sequence::range(7, 2));
    }

    #[test]
    fn test_try_from_value() {
        assert_eq!(
            Sequence::try_from(Value::from(b"ab")).unwrap(),
            Sequence::bytes(b"ab")
        );
        assert!(matches!(
            Sequence::try_from(Value::Int(1)),
            Err(SeqError::InvalidConstructorArgument(_))
        ));
        assert!(matches!(
            Sequence::try_from(Value::Map(std::collections::BTreeMap::new())),
            Err(SeqError::UnsupportedRepresentation("map"))
        ));
    }

    #[test]
    fn test_subslice_helpers() {
        assert_eq!(count_subslice(b"123455555", b"5"), 5);
        assert_eq!(count_subslice(b"aaaa", b"aa"), 2);
        assert_eq!(count_subslice(b"abc", b""), 4);
        assert_eq!(find_subslice(b"abcabc", b"ca"), Some(2));
        assert_eq!(char_window("héllo", 1, 3), "él");
        assert_eq!(char_window("abc", 2, 1), "");
    }

    #[test]
    fn test_display() {
        assert_eq!(Sequence::bytearray(vec![104u8, 105]).to_string(), "bytearray(b'hi')");
        assert_eq!(Sequence::tuple([1]).to_string(), "(1,)");
        assert_eq!(Sequence::list(["a", "b"]).to_string(), "['a', 'b']");
        assert_eq!(Sequence::range(0, 5).to_string(), "range(0, 5)");
    }
}
