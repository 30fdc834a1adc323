//! The combinator engine shared by both façades.
//!
//! [`SequenceCore`] owns one [`Sequence`] together with the policies fixed at
//! construction. Every combinator iterates the storage once, left to right,
//! hands each element to the user callback through the arity adapter, and
//! rebuilds the resulting element list into the storage's kind (or the
//! coercion target, for ranges).
//!
//! The engine never mutates its storage inside a combinator; the fluent
//! façade stores the returned sequence with [`SequenceCore::replace`].

use std::ops::Range;

use rustc_hash::FxHashMap;

use crate::arity::{Callback, ElementArgs, FoldArgs, Reducer};
use crate::coerce::CoercionPolicy;
use crate::config::{KeyPolicy, SeqConfig};
use crate::error::{Result, SeqError};
use crate::json;
use crate::kind::{Kind, classify};
use crate::render::repr;
use crate::seed::AutoSeed;
use crate::sequence::{Sequence, char_window, clamp_span, count_subslice, find_subslice};
use crate::value::Value;

/// Smallest parameter count accepted from predicates and mappers.
const ELEMENT_MIN_ARITY: usize = 1;
/// Smallest parameter count accepted from reducers.
const FOLD_MIN_ARITY: usize = 2;

/// Storage plus policies; the engine behind [`Seq`](crate::Seq) and
/// [`SeqView`](crate::SeqView).
#[derive(Debug, Clone)]
pub struct SequenceCore {
    storage: Sequence,
    policy: CoercionPolicy,
    key_policy: KeyPolicy,
}

#[derive(Debug, PartialEq, Eq, Hash)]
enum ElementKey {
    Structural(Value),
    Rendering(String),
}

impl SequenceCore {
    /// Wraps `storage` with the policies from `config`.
    pub fn new(storage: Sequence, config: SeqConfig) -> Self {
        Self {
            storage,
            policy: CoercionPolicy::new(config.coerce_target),
            key_policy: config.key_policy,
        }
    }

    /// The current storage.
    pub const fn storage(&self) -> &Sequence {
        &self.storage
    }

    /// Replaces the storage.
    pub fn replace(&mut self, storage: Sequence) {
        self.storage = storage;
    }

    /// Consumes the engine, returning its storage.
    pub fn into_storage(self) -> Sequence {
        self.storage
    }

    /// The coercion policy.
    pub const fn policy(&self) -> &CoercionPolicy {
        &self.policy
    }

    /// The configuration this engine was built with.
    pub const fn config(&self) -> SeqConfig {
        SeqConfig {
            coerce_target: self.policy.target(),
            key_policy: self.key_policy,
        }
    }

    /// The current representation.
    pub const fn kind(&self) -> Kind {
        classify(&self.storage)
    }

    fn rebuild(&self, elements: Vec<Value>) -> Result<Sequence> {
        self.policy.rebuild(elements, classify(&self.storage))
    }

    /// Returns `true` if `predicate` holds for every element.
    ///
    /// Stops at the first element for which it does not hold.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::ArityMismatch`] for a callback outside the 1–3
    /// parameter band.
    pub fn all(&self, mut predicate: Callback<'_, bool>) -> Result<bool> {
        for (index, value) in self.storage.iter().enumerate() {
            let arguments = ElementArgs::new(&value, index, &self.storage);
            if !predicate.invoke(arguments, ELEMENT_MIN_ARITY)? {
                return Ok(false);
            }
        }
        Ok(true)
    }

    /// Returns `true` if `predicate` holds for some element.
    ///
    /// Stops at the first element for which it holds.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::ArityMismatch`] for a callback outside the 1–3
    /// parameter band.
    pub fn any(&self, mut predicate: Callback<'_, bool>) -> Result<bool> {
        for (index, value) in self.storage.iter().enumerate() {
            let arguments = ElementArgs::new(&value, index, &self.storage);
            if predicate.invoke(arguments, ELEMENT_MIN_ARITY)? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Keeps the elements for which `predicate` holds, in order.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::ArityMismatch`] for a callback outside the 1–3
    /// parameter band.
    pub fn filter(&self, mut predicate: Callback<'_, bool>) -> Result<Sequence> {
        let mut kept = Vec::new();
        for (index, value) in self.storage.iter().enumerate() {
            let arguments = ElementArgs::new(&value, index, &self.storage);
            if predicate.invoke(arguments, ELEMENT_MIN_ARITY)? {
                kept.push(value);
            }
        }
        self.rebuild(kept)
    }

    /// Transforms every element.
    ///
    /// # Errors
    ///
    /// - [`SeqError::ArityMismatch`] for a callback outside the 1–3
    ///   parameter band.
    /// - [`SeqError::InvalidByteElement`] when a byte kind is rebuilt from
    ///   mapped values that are not bytes.
    pub fn map<R: Into<Value>>(&self, mut mapper: Callback<'_, R>) -> Result<Sequence> {
        let mut mapped = Vec::with_capacity(self.storage.len());
        for (index, value) in self.storage.iter().enumerate() {
            let arguments = ElementArgs::new(&value, index, &self.storage);
            mapped.push(mapper.invoke(arguments, ELEMENT_MIN_ARITY)?.into());
        }
        self.rebuild(mapped)
    }

    /// Returns the first element for which `predicate` holds.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::ArityMismatch`] for a callback outside the 1–3
    /// parameter band.
    pub fn find(&self, mut predicate: Callback<'_, bool>) -> Result<Option<Value>> {
        for (index, value) in self.storage.iter().enumerate() {
            let arguments = ElementArgs::new(&value, index, &self.storage);
            if predicate.invoke(arguments, ELEMENT_MIN_ARITY)? {
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    /// Left fold from an explicit `initial` accumulator of any type.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::ArityMismatch`] for a reducer outside the 2–4
    /// parameter band.
    pub fn fold<A>(&self, mut reducer: Reducer<'_, A>, initial: A) -> Result<A> {
        let mut accumulator = initial;
        for (index, value) in self.storage.iter().enumerate() {
            let element = ElementArgs::new(&value, index, &self.storage);
            accumulator = reducer.invoke(FoldArgs::new(accumulator, element), FOLD_MIN_ARITY)?;
        }
        Ok(accumulator)
    }

    /// Left fold, seeding the accumulator through [`AutoSeed`] when no
    /// `initial` value is given.
    ///
    /// The result is `None` only for an empty sequence folded without an
    /// initial value. Use [`SequenceCore::fold`] for accumulators without a
    /// seed.
    ///
    /// # Errors
    ///
    /// - [`SeqError::NoAutoSeed`] when no initial value is given and the
    ///   first element has no seed for `A`.
    /// - [`SeqError::ArityMismatch`] for a reducer outside the 2–4
    ///   parameter band.
    pub fn reduce<A: AutoSeed>(
        &self,
        reducer: Reducer<'_, A>,
        initial: Option<A>,
    ) -> Result<Option<A>> {
        let seed = match initial {
            Some(initial) => initial,
            None => match self.storage.get(0) {
                Some(first) => {
                    A::auto_seed(&first).ok_or_else(|| SeqError::NoAutoSeed(repr(&first)))?
                }
                None => return Ok(None),
            },
        };
        self.fold(reducer, seed).map(Some)
    }

    /// Counts occurrences of `item`, optionally within positions
    /// `start..end`.
    ///
    /// Byte and string kinds count non-overlapping runs of `item`; other
    /// kinds count equal elements.
    ///
    /// # Errors
    ///
    /// - [`SeqError::UnsupportedRangeArgs`] when `start` or `end` is given
    ///   for a kind other than byte buffer, byte string or string.
    /// - [`SeqError::InvalidByteElement`] when a byte kind is searched for
    ///   something that is neither a byte nor a byte string.
    pub fn count(&self, item: &Value, start: Option<usize>, end: Option<usize>) -> Result<usize> {
        let kind = self.kind();
        if (start.is_some() || end.is_some()) && !kind.accepts_bounds() {
            return Err(SeqError::UnsupportedRangeArgs(kind));
        }
        if start.is_some_and(|from| from > self.storage.len()) {
            return Ok(0);
        }
        let from = start.unwrap_or(0);
        match &self.storage {
            Sequence::MutableBytes(bytes) => count_bytes(bytes, item, from, end),
            Sequence::ImmutableBytes(bytes) => count_bytes(bytes, item, from, end),
            Sequence::Str(text) => Ok(item.as_str().map_or(0, |needle| {
                let to = end.unwrap_or(usize::MAX);
                char_window(text, from, to).matches(needle).count()
            })),
            Sequence::Range(range) => {
                Ok(usize::from(item.as_int().is_some_and(|value| range.contains(value))))
            }
            Sequence::List(items) => Ok(items.iter().filter(|element| *element == item).count()),
            Sequence::Tuple(items) => Ok(items.iter().filter(|element| *element == item).count()),
        }
    }

    /// Position of the first occurrence of `item` within positions
    /// `start..stop`.
    ///
    /// Byte and string kinds search for `item` as a contiguous run.
    ///
    /// # Errors
    ///
    /// - [`SeqError::NotFound`] when `item` does not occur.
    /// - [`SeqError::UnsupportedRangeArgs`] when `start` or `stop` is given
    ///   for a range.
    pub fn index(&self, item: &Value, start: Option<usize>, stop: Option<usize>) -> Result<usize> {
        let not_found = || SeqError::NotFound(repr(item));
        let past_end = start.is_some_and(|from| from > self.storage.len());
        if past_end && self.kind() != Kind::IntegerRange {
            return Err(not_found());
        }
        let from = start.unwrap_or(0);
        let (from, to) = clamp_span(from..stop.unwrap_or(usize::MAX), self.storage.len());
        let found = match &self.storage {
            Sequence::Range(range) => {
                if start.is_some() || stop.is_some() {
                    return Err(SeqError::UnsupportedRangeArgs(Kind::IntegerRange));
                }
                item.as_int().and_then(|value| range.index_of(value))
            }
            Sequence::MutableBytes(bytes) => index_bytes(bytes, item, from, to)?,
            Sequence::ImmutableBytes(bytes) => index_bytes(bytes, item, from, to)?,
            Sequence::Str(text) => item.as_str().and_then(|needle| {
                let window = char_window(text, from, to);
                window
                    .find(needle)
                    .map(|offset| from + window[..offset].chars().count())
            }),
            Sequence::List(items) => position_of(&items[from..to], item, from),
            Sequence::Tuple(items) => position_of(&items[from..to], item, from),
        };
        found.ok_or_else(not_found)
    }

    fn key_of(&self, value: &Value) -> ElementKey {
        match self.key_policy {
            KeyPolicy::Structural => ElementKey::Structural(value.clone()),
            KeyPolicy::Rendering => ElementKey::Rendering(value.to_string()),
        }
    }

    fn key_counts(&self) -> FxHashMap<ElementKey, usize> {
        let mut counts = FxHashMap::default();
        for value in &self.storage {
            *counts.entry(self.key_of(&value)).or_insert(0) += 1;
        }
        counts
    }

    /// Keeps the first occurrence of every element, in first-seen order.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn deduplicate(&self) -> Result<Sequence> {
        let mut seen: FxHashMap<ElementKey, usize> = FxHashMap::default();
        let mut kept = Vec::new();
        for value in &self.storage {
            let count = seen.entry(self.key_of(&value)).or_insert(0);
            *count += 1;
            if *count == 1 {
                kept.push(value);
            }
        }
        self.rebuild(kept)
    }

    /// One entry per element that occurs at least twice, in order of the
    /// second occurrence.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn duplicates(&self) -> Result<Sequence> {
        let mut seen: FxHashMap<ElementKey, usize> = FxHashMap::default();
        let mut repeated = Vec::new();
        for value in &self.storage {
            let count = seen.entry(self.key_of(&value)).or_insert(0);
            *count += 1;
            if *count == 2 {
                repeated.push(value);
            }
        }
        self.rebuild(repeated)
    }

    /// The elements that occur exactly once, in order.
    ///
    /// # Errors
    ///
    /// Propagates reconstruction errors.
    pub fn unique(&self) -> Result<Sequence> {
        let counts = self.key_counts();
        let singles = self
            .storage
            .iter()
            .filter(|value| counts.get(&self.key_of(value)) == Some(&1))
            .collect();
        self.rebuild(singles)
    }

    /// Renders every element and joins them with `separator`.
    pub fn join_into_str(&self, separator: Option<&str>) -> String {
        let separator = separator.unwrap_or("");
        let mut joined = String::new();
        for (index, value) in self.storage.iter().enumerate() {
            if index > 0 {
                joined.push_str(separator);
            }
            joined.push_str(&value.to_string());
        }
        joined
    }

    /// The elements as a list.
    pub fn to_list(&self) -> Vec<Value> {
        self.storage.to_values()
    }

    /// The elements as a fixed-length tuple.
    pub fn to_tuple(&self) -> Box<[Value]> {
        self.storage.to_values().into_boxed_slice()
    }

    /// The UTF-8 bytes of the unseparated rendering.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.join_into_str(None).into_bytes()
    }

    /// The storage as JSON text.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::Json`] if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        json::to_json(&self.storage)
    }

    /// Concatenates `other` onto the storage.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidByteElement`] when joining non-byte
    /// elements onto a byte kind.
    pub fn concat(&self, other: &Sequence) -> Result<Sequence> {
        self.policy.concat(&self.storage, other)
    }

    /// Deletes positions `span` from the storage.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::IndexOutOfBounds`] when `span` does not lie
    /// within the storage.
    pub fn remove_span(&mut self, span: Range<usize>) -> Result<()> {
        self.policy.remove_span(&mut self.storage, span)
    }
}

impl PartialEq for SequenceCore {
    fn eq(&self, other: &Self) -> bool {
        self.storage == other.storage
    }
}

impl Eq for SequenceCore {}

fn byte_needle(item: &Value) -> Result<Vec<u8>> {
    match item {
        Value::Bytes(bytes) => Ok(bytes.clone()),
        other => other
            .as_byte()
            .map(|byte| vec![byte])
            .ok_or_else(|| SeqError::InvalidByteElement(repr(other))),
    }
}

fn count_bytes(bytes: &[u8], item: &Value, from: usize, end: Option<usize>) -> Result<usize> {
    let needle = byte_needle(item)?;
    let (from, to) = clamp_span(from..end.unwrap_or(usize::MAX), bytes.len());
    Ok(count_subslice(&bytes[from..to], &needle))
}

fn index_bytes(bytes: &[u8], item: &Value, from: usize, to: usize) -> Result<Option<usize>> {
    let needle = byte_needle(item)?;
    Ok(find_subslice(&bytes[from..to], &needle).map(|offset| from + offset))
}

fn position_of(items: &[Value], item: &Value, offset: usize) -> Option<usize> {
    items
        .iter()
        .position(|element| element == item)
        .map(|position| offset + position)
}
