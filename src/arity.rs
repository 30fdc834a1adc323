//! Variable-arity callback dispatch.
//!
//! Combinators accept callbacks of several shapes. A predicate may look at
//! only the element, at the element and its position, or at the element,
//! its position and the whole container. The shape is chosen at the call
//! site by wrapping the closure in one of the variants of [`Callback`] (or
//! [`Reducer`] for folds); at invocation time the adapter reads the declared
//! parameter count and passes exactly that many leading candidate
//! arguments.
//!
//! | Combinator family       | Candidate arguments                         | Band |
//! |-------------------------|---------------------------------------------|------|
//! | predicates and mappers  | `value, index, container`                   | 1–3  |
//! | reducers                | `accumulator, value, index, container`      | 2–4  |
//!
//! A callback whose declared count falls outside the band fails with
//! [`SeqError::ArityMismatch`].
//!
//! # Examples
//!
//! ```rust
//! use seqwise::{Callback, Seq, Value};
//!
//! let numbers = Seq::new(seqwise::Sequence::list([10, 20, 30]));
//!
//! // Value only.
//! assert!(numbers.all(Callback::unary(|value| value.as_int() > Some(5))).unwrap());
//!
//! // Value and index.
//! assert!(numbers
//!     .any(Callback::binary(|value, index| value.as_int() == Some(20) && index == 1))
//!     .unwrap());
//!
//! // Nothing at all is outside the accepted band.
//! assert!(numbers.all(Callback::nullary(|| true)).is_err());
//! ```

use std::fmt;

use crate::error::{Result, SeqError};
use crate::sequence::Sequence;
use crate::value::Value;

/// A predicate or mapper callback in one of its accepted shapes.
pub enum Callback<'f, R> {
    /// Takes no arguments. Always rejected, since every combinator requires
    /// at least the element.
    Nullary(Box<dyn FnMut() -> R + 'f>),
    /// Takes the element.
    Unary(Box<dyn FnMut(&Value) -> R + 'f>),
    /// Takes the element and its position.
    Binary(Box<dyn FnMut(&Value, usize) -> R + 'f>),
    /// Takes the element, its position and the whole container.
    Ternary(Box<dyn FnMut(&Value, usize, &Sequence) -> R + 'f>),
}

impl<'f, R> Callback<'f, R> {
    /// Wraps a callback that declares no parameters.
    pub fn nullary(function: impl FnMut() -> R + 'f) -> Self {
        Self::Nullary(Box::new(function))
    }

    /// Wraps a callback over the element.
    pub fn unary(function: impl FnMut(&Value) -> R + 'f) -> Self {
        Self::Unary(Box::new(function))
    }

    /// Wraps a callback over the element and its position.
    pub fn binary(function: impl FnMut(&Value, usize) -> R + 'f) -> Self {
        Self::Binary(Box::new(function))
    }

    /// Wraps a callback over the element, its position and the container.
    pub fn ternary(function: impl FnMut(&Value, usize, &Sequence) -> R + 'f) -> Self {
        Self::Ternary(Box::new(function))
    }

    /// The number of parameters the callback declares.
    pub const fn arity(&self) -> usize {
        match self {
            Self::Nullary(_) => 0,
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
            Self::Ternary(_) => 3,
        }
    }

    /// Invokes the callback with as many leading candidate arguments as it
    /// declares.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::ArityMismatch`] when the declared count is below
    /// `min_arity` or above the number of candidates.
    pub fn invoke(&mut self, arguments: ElementArgs<'_>, min_arity: usize) -> Result<R> {
        resolve_arity(self.arity(), min_arity, ElementArgs::LEN)?;
        Ok(match self {
            Self::Nullary(function) => function(),
            Self::Unary(function) => function(arguments.value),
            Self::Binary(function) => function(arguments.value, arguments.index),
            Self::Ternary(function) => {
                function(arguments.value, arguments.index, arguments.container)
            }
        })
    }
}

impl<R> fmt::Debug for Callback<'_, R> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Callback")
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// A fold callback in one of its accepted shapes.
pub enum Reducer<'f, A> {
    /// Takes only the accumulator. Always rejected, since a fold must see
    /// the element.
    Unary(Box<dyn FnMut(A) -> A + 'f>),
    /// Takes the accumulator and the element.
    Binary(Box<dyn FnMut(A, &Value) -> A + 'f>),
    /// Takes the accumulator, the element and its position.
    Ternary(Box<dyn FnMut(A, &Value, usize) -> A + 'f>),
    /// Takes the accumulator, the element, its position and the container.
    Quaternary(Box<dyn FnMut(A, &Value, usize, &Sequence) -> A + 'f>),
}

impl<'f, A> Reducer<'f, A> {
    /// Wraps a reducer that only sees the accumulator.
    pub fn unary(function: impl FnMut(A) -> A + 'f) -> Self {
        Self::Unary(Box::new(function))
    }

    /// Wraps a reducer over the accumulator and the element.
    pub fn binary(function: impl FnMut(A, &Value) -> A + 'f) -> Self {
        Self::Binary(Box::new(function))
    }

    /// Wraps a reducer over the accumulator, the element and its position.
    pub fn ternary(function: impl FnMut(A, &Value, usize) -> A + 'f) -> Self {
        Self::Ternary(Box::new(function))
    }

    /// Wraps a reducer over the accumulator, the element, its position and
    /// the container.
    pub fn quaternary(function: impl FnMut(A, &Value, usize, &Sequence) -> A + 'f) -> Self {
        Self::Quaternary(Box::new(function))
    }

    /// The number of parameters the reducer declares.
    pub const fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
            Self::Ternary(_) => 3,
            Self::Quaternary(_) => 4,
        }
    }

    /// Invokes the reducer with as many leading candidate arguments as it
    /// declares.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::ArityMismatch`] when the declared count is below
    /// `min_arity` or above the number of candidates.
    pub fn invoke(&mut self, arguments: FoldArgs<'_, A>, min_arity: usize) -> Result<A> {
        resolve_arity(self.arity(), min_arity, FoldArgs::<A>::LEN)?;
        let FoldArgs {
            accumulator,
            element,
        } = arguments;
        Ok(match self {
            Self::Unary(function) => function(accumulator),
            Self::Binary(function) => function(accumulator, element.value),
            Self::Ternary(function) => function(accumulator, element.value, element.index),
            Self::Quaternary(function) => {
                function(accumulator, element.value, element.index, element.container)
            }
        })
    }
}

impl<A> fmt::Debug for Reducer<'_, A> {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter
            .debug_struct("Reducer")
            .field("arity", &self.arity())
            .finish_non_exhaustive()
    }
}

/// Candidate arguments for predicates and mappers.
#[derive(Debug, Clone, Copy)]
pub struct ElementArgs<'s> {
    /// The current element.
    pub value: &'s Value,
    /// Its zero-based position.
    pub index: usize,
    /// The sequence being iterated.
    pub container: &'s Sequence,
}

impl<'s> ElementArgs<'s> {
    /// Number of candidate arguments.
    pub const LEN: usize = 3;

    /// Bundles the candidates for one element.
    pub const fn new(value: &'s Value, index: usize, container: &'s Sequence) -> Self {
        Self {
            value,
            index,
            container,
        }
    }
}

/// Candidate arguments for reducers: the accumulator followed by the
/// element candidates.
#[derive(Debug)]
pub struct FoldArgs<'s, A> {
    /// The running accumulator.
    pub accumulator: A,
    /// The element candidates.
    pub element: ElementArgs<'s>,
}

impl<'s, A> FoldArgs<'s, A> {
    /// Number of candidate arguments.
    pub const LEN: usize = ElementArgs::LEN + 1;

    /// Bundles the candidates for one fold step.
    pub const fn new(accumulator: A, element: ElementArgs<'s>) -> Self {
        Self {
            accumulator,
            element,
        }
    }
}

/// Picks the number of leading candidates to pass to a callback that
/// declares `declared` parameters.
///
/// Walks the band `min_arity..=max_arity` and accepts the first count equal
/// to `declared`.
///
/// # Errors
///
/// Returns [`SeqError::ArityMismatch`] when no count in the band matches.
pub fn resolve_arity(declared: usize, min_arity: usize, max_arity: usize) -> Result<usize> {
    let resolved = (min_arity..=max_arity).find(|&count| count == declared);
    tracing::trace!(declared, min_arity, max_arity, ?resolved, "resolving callback arity");
    resolved.ok_or(SeqError::ArityMismatch {
        min: min_arity,
        max: max_arity,
        got: declared,
    })
}
