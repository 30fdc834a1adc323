//! The fluent, self-mutating façade.
//!
//! Transforming combinators on [`Seq`] replace the stored sequence and
//! return `&mut Self`, so calls chain with `?`:
//!
//! ```rust
//! use seqwise::{Callback, Seq, Sequence};
//!
//! # fn main() -> seqwise::Result<()> {
//! let mut numbers = Seq::new(Sequence::list([1, 2, 2, 3, 4, 4, 5]));
//! numbers
//!     .deduplicate()?
//!     .filter(Callback::unary(|value| value.as_int().is_some_and(|number| number % 2 == 1)))?
//!     .map(Callback::binary(|value, index| value.as_int().unwrap_or(0) * 10 + index as i64))?;
//! assert_eq!(numbers, Sequence::list([10, 31, 52]));
//! # Ok(())
//! # }
//! ```
//!
//! Queries (`all`, `any`, `find`, `count`, `index`, `fold`, `reduce`, conversions)
//! leave the stored sequence untouched.

use std::fmt;
use std::ops::Range;

use crate::arity::{Callback, Reducer};
use crate::config::SeqConfig;
use crate::engine::SequenceCore;
use crate::error::Result;
use crate::kind::Kind;
use crate::seed::AutoSeed;
use crate::sequence::{Iter, Sequence};
use crate::value::Value;

/// A sequence whose combinators transform it in place.
#[derive(Debug, Clone)]
pub struct Seq {
    core: SequenceCore,
}

impl Seq {
    /// Wraps `storage` with the default configuration (ranges materialize
    /// into tuples, duplicates are keyed structurally).
    pub fn new(storage: impl Into<Sequence>) -> Self {
        Self::with_config(storage, SeqConfig::default())
    }

    /// Wraps `storage` with an explicit configuration.
    pub fn with_config(storage: impl Into<Sequence>, config: SeqConfig) -> Self {
        Self {
            core: SequenceCore::new(storage.into(), config),
        }
    }

    /// Wraps `storage`, materializing ranges into `coerce_into`.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidConstructorArgument`](crate::SeqError::InvalidConstructorArgument)
    /// when `coerce_into` is [`Kind::IntegerRange`].
    pub fn coercing(storage: impl Into<Sequence>, coerce_into: Kind) -> Result<Self> {
        let config = SeqConfig::default().with_coerce_target(coerce_into)?;
        Ok(Self::with_config(storage, config))
    }

    /// Wraps a raw value that should hold a sequence.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidConstructorArgument`](crate::SeqError::InvalidConstructorArgument)
    /// for scalars and
    /// [`SeqError::UnsupportedRepresentation`](crate::SeqError::UnsupportedRepresentation)
    /// for sets and maps.
    pub fn from_value(value: Value, config: SeqConfig) -> Result<Self> {
        Ok(Self::with_config(Sequence::try_from(value)?, config))
    }

    /// The stored sequence.
    pub const fn value(&self) -> &Sequence {
        self.core.storage()
    }

    /// Consumes the façade, returning the stored sequence.
    pub fn into_value(self) -> Sequence {
        self.core.into_storage()
    }

    /// The configuration this façade was built with.
    pub const fn config(&self) -> SeqConfig {
        self.core.config()
    }

    /// The current representation.
    pub const fn kind(&self) -> Kind {
        self.core.kind()
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.value().len()
    }

    /// Returns `true` if there are no elements.
    pub fn is_empty(&self) -> bool {
        self.value().is_empty()
    }

    /// The first element.
    pub fn first(&self) -> Option<Value> {
        self.value().get(0)
    }

    /// The last element.
    pub fn last(&self) -> Option<Value> {
        self.value().iter().next_back()
    }

    /// The element at `index`.
    pub fn get(&self, index: usize) -> Option<Value> {
        self.value().get(index)
    }

    /// The elements at positions `span`, in the same representation.
    pub fn slice(&self, span: Range<usize>) -> Sequence {
        self.value().slice(span)
    }

    /// Native membership test.
    pub fn contains(&self, item: &Value) -> bool {
        self.value().contains(item)
    }

    /// Forward iterator over the elements.
    pub fn iter(&self) -> Iter<'_> {
        self.value().iter()
    }

    /// Reverse iterator over the elements.
    pub fn iter_rev(&self) -> std::iter::Rev<Iter<'_>> {
        self.value().iter().rev()
    }

    /// See [`SequenceCore::all`].
    ///
    /// # Errors
    ///
    /// Propagates callback arity errors.
    pub fn all(&self, predicate: Callback<'_, bool>) -> Result<bool> {
        self.core.all(predicate)
    }

    /// See [`SequenceCore::any`].
    ///
    /// # Errors
    ///
    /// Propagates callback arity errors.
    pub fn any(&self, predicate: Callback<'_, bool>) -> Result<bool> {
        self.core.any(predicate)
    }

    /// See [`SequenceCore::find`].
    ///
    /// # Errors
    ///
    /// Propagates callback arity errors.
    pub fn find(&self, predicate: Callback<'_, bool>) -> Result<Option<Value>> {
        self.core.find(predicate)
    }

    /// See [`SequenceCore::count`].
    ///
    /// # Errors
    ///
    /// Fails when bounds are given for a kind that does not take them.
    pub fn count(&self, item: &Value, start: Option<usize>, end: Option<usize>) -> Result<usize> {
        self.core.count(item, start, end)
    }

    /// See [`SequenceCore::index`].
    ///
    /// # Errors
    ///
    /// Fails when `item` is absent or bounds are given for a range.
    pub fn index(&self, item: &Value, start: Option<usize>, stop: Option<usize>) -> Result<usize> {
        self.core.index(item, start, stop)
    }

    /// See [`SequenceCore::fold`].
    ///
    /// # Errors
    ///
    /// Fails when the reducer's arity is outside 2–4.
    pub fn fold<A>(&self, reducer: Reducer<'_, A>, initial: A) -> Result<A> {
        self.core.fold(reducer, initial)
    }

    /// See [`SequenceCore::reduce`].
    ///
    /// # Errors
    ///
    /// Fails when no seed can be derived or the reducer's arity is outside
    /// 2–4.
    pub fn reduce<A: AutoSeed>(&self, reducer: Reducer<'_, A>, initial: Option<A>) -> Result<Option<A>> {
        self.core.reduce(reducer, initial)
    }

    /// Keeps the elements for which `predicate` holds.
    ///
    /// # Errors
    ///
    /// Propagates callback arity errors; the stored sequence is unchanged
    /// on error.
    pub fn filter(&mut self, predicate: Callback<'_, bool>) -> Result<&mut Self> {
        let filtered = self.core.filter(predicate)?;
        self.core.replace(filtered);
        Ok(self)
    }

    /// Transforms every element.
    ///
    /// # Errors
    ///
    /// Propagates callback arity and reconstruction errors; the stored
    /// sequence is unchanged on error.
    pub fn map<R: Into<Value>>(&mut self, mapper: Callback<'_, R>) -> Result<&mut Self> {
        let mapped = self.core.map(mapper)?;
        self.core.replace(mapped);
        Ok(self)
    }

    /// Keeps the first occurrence of each element.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn deduplicate(&mut self) -> Result<&mut Self> {
        let deduplicated = self.core.deduplicate()?;
        self.core.replace(deduplicated);
        Ok(self)
    }

    /// Replaces the contents with one entry per repeated element.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn duplicates(&mut self) -> Result<&mut Self> {
        let repeated = self.core.duplicates()?;
        self.core.replace(repeated);
        Ok(self)
    }

    /// Keeps only the elements that occur exactly once.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn unique(&mut self) -> Result<&mut Self> {
        let singles = self.core.unique()?;
        self.core.replace(singles);
        Ok(self)
    }

    /// Returns a new façade holding this sequence followed by `other`.
    ///
    /// # Errors
    ///
    /// Fails when `other` cannot be converted into this sequence's kind.
    pub fn concat(&self, other: &Sequence) -> Result<Self> {
        let joined = self.core.concat(other)?;
        Ok(Self::with_config(joined, self.config()))
    }

    /// Deletes the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::IndexOutOfBounds`](crate::SeqError::IndexOutOfBounds)
    /// when `index` is past the end.
    pub fn remove(&mut self, index: usize) -> Result<()> {
        if index >= self.len() {
            return Err(crate::SeqError::IndexOutOfBounds {
                index,
                len: self.len(),
            });
        }
        self.core.remove_span(index..index + 1)
    }

    /// Deletes the elements at positions `span`.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::IndexOutOfBounds`](crate::SeqError::IndexOutOfBounds)
    /// when `span` does not lie within the sequence.
    pub fn remove_range(&mut self, span: Range<usize>) -> Result<()> {
        self.core.remove_span(span)
    }

    /// Deletes every element. A range becomes an empty value of the
    /// coercion target.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn clear(&mut self) -> Result<()> {
        let length = self.len();
        self.core.remove_span(0..length)
    }

    /// See [`SequenceCore::join_into_str`].
    pub fn join_into_str(&self, separator: Option<&str>) -> String {
        self.core.join_into_str(separator)
    }

    /// Alias of [`Seq::join_into_str`].
    pub fn to_str(&self, separator: Option<&str>) -> String {
        self.core.join_into_str(separator)
    }

    /// The elements as a list.
    pub fn to_list(&self) -> Vec<Value> {
        self.core.to_list()
    }

    /// The elements as a tuple.
    pub fn to_tuple(&self) -> Box<[Value]> {
        self.core.to_tuple()
    }

    /// The UTF-8 bytes of the unseparated rendering.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.core.to_bytes()
    }

    /// See [`crate::to_json`].
    ///
    /// # Errors
    ///
    /// Propagates JSON encoding errors.
    pub fn to_json(&self) -> Result<String> {
        self.core.to_json()
    }
}

impl PartialEq for Seq {
    fn eq(&self, other: &Self) -> bool {
        self.core == other.core
    }
}

impl Eq for Seq {}

impl PartialEq<Sequence> for Seq {
    fn eq(&self, other: &Sequence) -> bool {
        self.value() == other
    }
}

impl From<Sequence> for Seq {
    fn from(storage: Sequence) -> Self {
        Self::new(storage)
    }
}

impl From<Seq> for Sequence {
    fn from(seq: Seq) -> Self {
        seq.into_value()
    }
}

impl<'a> IntoIterator for &'a Seq {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for Seq {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SeqError;

    #[test]
    fn test_failed_combinator_leaves_storage_unchanged() {
        let mut bytes = Seq::new(Sequence::bytearray(vec![1u8, 2]));
        assert!(bytes.map(Callback::unary(|_| -1)).is_err());
        assert_eq!(bytes, Sequence::bytearray(vec![1u8, 2]));
    }

    #[test]
    fn test_remove_past_end() {
        let mut list = Seq::new(Sequence::list([1]));
        assert!(matches!(
            list.remove(1),
            Err(SeqError::IndexOutOfBounds { index: 1, len: 1 })
        ));
    }

    #[test]
    fn test_clear_range_becomes_empty_target() {
        let mut range = Seq::coercing(Sequence::range(0, 4), Kind::DynamicList).unwrap();
        range.clear().unwrap();
        assert_eq!(range, Sequence::List(vec![]));
        assert_eq!(range.kind(), Kind::DynamicList);
    }

    #[test]
    fn test_concat_keeps_config() {
        let left = Seq::coercing(Sequence::range(0, 2), Kind::DynamicList).unwrap();
        let joined = left.concat(&Sequence::list(["a"])).unwrap();
        assert_eq!(joined, Sequence::list([Value::from(0), Value::from(1), Value::from("a")]));
        assert_eq!(joined.config(), left.config());
    }
}
