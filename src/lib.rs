//! # seqwise
//!
//! Chainable functional combinators over ordered sequences.
//!
//! ## Overview
//!
//! A [`Sequence`] holds one of six representations: a mutable byte buffer,
//! an immutable byte string, a dynamic list, a lazy integer range, a text
//! string, or a fixed tuple. Combinators work on all of them and rebuild
//! their result in the input's own representation. Ranges cannot hold
//! arbitrary elements, so any result derived from a range is materialized
//! into the configured coercion target (a tuple by default).
//!
//! - **Façades**: [`Seq`] mutates itself and chains, [`SeqView`] returns
//!   new sequences and never changes its input.
//! - **Callbacks**: [`Callback`] and [`Reducer`] take one to four
//!   positional arguments (accumulator, element, index, container); the
//!   shape is checked against what each combinator can supply.
//! - **Coercion**: [`CoercionPolicy`] decides the representation of derived
//!   and concatenated results.
//! - **Conversions**: text, list, tuple, bytes and JSON renderings.
//!
//! ## Example
//!
//! ```rust
//! use seqwise::prelude::*;
//!
//! # fn main() -> seqwise::Result<()> {
//! let numbers = SeqView::new(Sequence::range(1, 6));
//! let evens = numbers.filter(Callback::unary(|value| value.as_int().is_some_and(|n| n % 2 == 0)))?;
//! assert_eq!(evens, Sequence::tuple([2, 4]));
//!
//! let total = numbers.reduce(Reducer::binary(|sum: i64, value| sum + value.as_int().unwrap_or(0)), None)?;
//! assert_eq!(total, Some(15));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::redundant_closure_for_method_calls)]

/// Prelude module for convenient imports.
///
/// Re-exports the façades, the storage types and the callback wrappers.
///
/// # Usage
///
/// ```rust
/// use seqwise::prelude::*;
/// ```
pub mod prelude {
    pub use crate::arity::{Callback, Reducer};
    pub use crate::config::{KeyPolicy, SeqConfig};
    pub use crate::error::{Result, SeqError};
    pub use crate::facade::{Seq, SeqView};
    pub use crate::kind::{CoerceTarget, Kind};
    pub use crate::range::IntRange;
    pub use crate::seed::AutoSeed;
    pub use crate::sequence::Sequence;
    pub use crate::value::Value;
}

pub mod arity;
pub mod coerce;
pub mod config;
pub mod engine;
pub mod error;
pub mod facade;
pub mod json;
pub mod kind;
pub mod range;
pub mod render;
pub mod seed;
pub mod sequence;
pub mod value;

pub use arity::{Callback, ElementArgs, FoldArgs, Reducer, resolve_arity};
pub use coerce::{CoercionPolicy, materialize, materialize_into};
pub use config::{KeyPolicy, SeqConfig};
pub use engine::SequenceCore;
pub use error::{Result, SeqError};
pub use facade::{Seq, SeqView};
pub use json::to_json;
pub use kind::{CoerceTarget, Kind, classify, classify_value};
pub use range::{IntRange, RangeIter};
pub use render::repr;
pub use seed::AutoSeed;
pub use sequence::{Iter, Sequence};
pub use value::Value;
