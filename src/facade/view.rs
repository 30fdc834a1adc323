//! The immutable façade.
//!
//! [`SeqView`] never changes the sequence it wraps: transforming
//! combinators return a freshly materialized [`Sequence`].
//!
//! ```rust
//! use seqwise::{Callback, SeqView, Sequence};
//!
//! let view = SeqView::new(Sequence::tuple([1, 2, 2, 3, 4, 4, 5]));
//! assert_eq!(view.duplicates().unwrap(), Sequence::tuple([2, 4]));
//! assert_eq!(view.unique().unwrap(), Sequence::tuple([1, 3, 5]));
//! assert_eq!(view, Sequence::tuple([1, 2, 2, 3, 4, 4, 5]));
//! ```

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

/// A read-only sequence whose combinators return new sequences.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeqView {
    core: SequenceCore,
}

impl SeqView {
    /// Wraps `storage` with the default configuration.
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
    /// Fails for values that are not ordered sequences.
    pub fn from_value(value: Value, config: SeqConfig) -> Result<Self> {
        Ok(Self::with_config(Sequence::try_from(value)?, config))
    }

    /// The wrapped sequence.
    pub const fn value(&self) -> &Sequence {
        self.core.storage()
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

    /// The elements at positions `span`.
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

    /// # Errors
    ///
    /// Propagates callback arity errors.
    pub fn all(&self, predicate: Callback<'_, bool>) -> Result<bool> {
        self.core.all(predicate)
    }

    /// # Errors
    ///
    /// Propagates callback arity errors.
    pub fn any(&self, predicate: Callback<'_, bool>) -> Result<bool> {
        self.core.any(predicate)
    }

    /// # Errors
    ///
    /// Propagates callback arity errors.
    pub fn find(&self, predicate: Callback<'_, bool>) -> Result<Option<Value>> {
        self.core.find(predicate)
    }

    /// # Errors
    ///
    /// Propagates callback arity errors.
    pub fn filter(&self, predicate: Callback<'_, bool>) -> Result<Sequence> {
        self.core.filter(predicate)
    }

    /// # Errors
    ///
    /// Propagates callback arity and reconstruction errors.
    pub fn map<R: Into<Value>>(&self, mapper: Callback<'_, R>) -> Result<Sequence> {
        self.core.map(mapper)
    }

    /// # Errors
    ///
    /// Fails when the reducer's arity is outside 2–4.
    pub fn fold<A>(&self, reducer: Reducer<'_, A>, initial: A) -> Result<A> {
        self.core.fold(reducer, initial)
    }

    /// # Errors
    ///
    /// Fails when no seed can be derived or the reducer's arity is outside
    /// 2–4.
    pub fn reduce<A: AutoSeed>(&self, reducer: Reducer<'_, A>, initial: Option<A>) -> Result<Option<A>> {
        self.core.reduce(reducer, initial)
    }

    /// # Errors
    ///
    /// Fails when bounds are given for a kind that does not take them.
    pub fn count(&self, item: &Value, start: Option<usize>, end: Option<usize>) -> Result<usize> {
        self.core.count(item, start, end)
    }

    /// # Errors
    ///
    /// Fails when `item` is absent or bounds are given for a range.
    pub fn index(&self, item: &Value, start: Option<usize>, stop: Option<usize>) -> Result<usize> {
        self.core.index(item, start, stop)
    }

    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn deduplicate(&self) -> Result<Sequence> {
        self.core.deduplicate()
    }

    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn duplicates(&self) -> Result<Sequence> {
        self.core.duplicates()
    }

    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn unique(&self) -> Result<Sequence> {
        self.core.unique()
    }

    /// Renders every element and joins them with `separator`.
    pub fn join_into_str(&self, separator: Option<&str>) -> String {
        self.core.join_into_str(separator)
    }

    /// Alias of [`SeqView::join_into_str`].
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

    /// # Errors
    ///
    /// Propagates JSON encoding errors.
    pub fn to_json(&self) -> Result<String> {
        self.core.to_json()
    }
}

impl PartialEq<Sequence> for SeqView {
    fn eq(&self, other: &Sequence) -> bool {
        self.value() == other
    }
}

impl From<Sequence> for SeqView {
    fn from(storage: Sequence) -> Self {
        Self::new(storage)
    }
}

impl<'a> IntoIterator for &'a SeqView {
    type Item = Value;
    type IntoIter = Iter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for SeqView {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}", self.value())
    }
}
