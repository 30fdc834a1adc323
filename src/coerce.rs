//! Materialization and reconstruction of sequences.
//!
//! Combinators compute a plain element list and then rebuild it into a
//! concrete representation. Reconstructible kinds are rebuilt into
//! themselves; a range cannot hold arbitrary elements and is rebuilt into
//! the configured [`CoerceTarget`] instead.
//!
//! # Examples
//!
//! ```rust
//! use seqwise::{materialize, CoerceTarget, CoercionPolicy, Kind, Sequence, Value};
//!
//! let text = materialize(vec![Value::from("a"), Value::from(1)], Kind::CharacterString).unwrap();
//! assert_eq!(text, Sequence::from("a1"));
//!
//! let policy = CoercionPolicy::new(CoerceTarget::DynamicList);
//! let rebuilt = policy
//!     .rebuild(vec![Value::from(2), Value::from(4)], Kind::IntegerRange)
//!     .unwrap();
//! assert_eq!(rebuilt, Sequence::list([2, 4]));
//! ```

use std::ops::Range;

use crate::error::{Result, SeqError};
use crate::kind::{CoerceTarget, Kind};
use crate::sequence::Sequence;
use crate::value::Value;

/// Builds a concrete sequence of `kind` from `elements`.
///
/// # Errors
///
/// - [`SeqError::NonReconstructibleTarget`] if `kind` is
///   [`Kind::IntegerRange`].
/// - [`SeqError::InvalidByteElement`] if a byte kind receives an element
///   that is not an integer in `0..=255`.
pub fn materialize(elements: Vec<Value>, kind: Kind) -> Result<Sequence> {
    let target = CoerceTarget::try_from(kind)?;
    materialize_into(elements, target)
}

/// Builds a concrete sequence of a reconstructible kind from `elements`.
///
/// # Errors
///
/// Returns [`SeqError::InvalidByteElement`] if a byte kind receives an
/// element that is not an integer in `0..=255`.
pub fn materialize_into(elements: Vec<Value>, target: CoerceTarget) -> Result<Sequence> {
    Ok(match target {
        CoerceTarget::MutableBytes => Sequence::MutableBytes(collect_bytes(&elements)?),
        CoerceTarget::ImmutableBytes => {
            Sequence::ImmutableBytes(collect_bytes(&elements)?.into_boxed_slice())
        }
        CoerceTarget::DynamicList => Sequence::List(elements),
        CoerceTarget::CharacterString => {
            Sequence::Str(elements.iter().map(ToString::to_string).collect())
        }
        CoerceTarget::FixedTuple => Sequence::Tuple(elements.into_boxed_slice()),
    })
}

fn collect_bytes(elements: &[Value]) -> Result<Vec<u8>> {
    elements
        .iter()
        .map(|element| {
            element
                .as_byte()
                .ok_or_else(|| SeqError::InvalidByteElement(crate::render::repr(element)))
        })
        .collect()
}

/// Decides how element lists are turned back into concrete sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct CoercionPolicy {
    target: CoerceTarget,
}

impl CoercionPolicy {
    /// Creates a policy that materializes ranges into `target`.
    pub const fn new(target: CoerceTarget) -> Self {
        Self { target }
    }

    /// The configured range target.
    pub const fn target(&self) -> CoerceTarget {
        self.target
    }

    /// The kind `current` is rebuilt into: itself when reconstructible,
    /// otherwise the range target.
    pub fn rebuild_kind(&self, current: Kind) -> CoerceTarget {
        CoerceTarget::try_from(current).unwrap_or(self.target)
    }

    /// Rebuilds `elements` into the same kind as before, or into the range
    /// target when the previous kind was a range.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidByteElement`] if a byte kind receives a
    /// non-byte element.
    pub fn rebuild(&self, elements: Vec<Value>, current: Kind) -> Result<Sequence> {
        let target = self.rebuild_kind(current);
        if current == Kind::IntegerRange {
            tracing::debug!(coerce_target = %target, length = elements.len(), "materializing range result");
        }
        materialize_into(elements, target)
    }

    /// Returns `sequence` unchanged unless it is a range, which is
    /// materialized into the range target.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidByteElement`] if a range element does not
    /// fit a byte target.
    pub fn coerce(&self, sequence: &Sequence) -> Result<Sequence> {
        match sequence {
            Sequence::Range(range) => {
                tracing::debug!(coerce_target = %self.target, %range, "materializing range");
                materialize_into(sequence.to_values(), self.target)
            }
            other => Ok(other.clone()),
        }
    }

    /// Concatenates two sequences.
    ///
    /// Operands of the same reconstructible kind are joined natively. A range
    /// on the left is materialized into the range target first; the right
    /// operand is then converted into the left operand's (possibly
    /// materialized) kind.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidByteElement`] when joining non-byte
    /// elements onto a byte kind.
    pub fn concat(&self, left: &Sequence, right: &Sequence) -> Result<Sequence> {
        let common = self.rebuild_kind(left.kind());
        let left = self.coerce(left)?;
        let right = if right.kind() == common.kind() {
            right.clone()
        } else {
            materialize_into(right.to_values(), common)?
        };
        Ok(join_native(left, right))
    }

    /// Deletes the elements at positions `span` from `storage`.
    ///
    /// Mutable kinds are edited in place. Immutable kinds are copied into a
    /// list, edited and rebuilt into their own kind. A range is first
    /// materialized into the range target and stays in that kind
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::IndexOutOfBounds`] when `span` does not lie
    /// within the sequence.
    pub fn remove_span(&self, storage: &mut Sequence, span: Range<usize>) -> Result<()> {
        let length = storage.len();
        if span.start > span.end || span.end > length {
            return Err(SeqError::IndexOutOfBounds {
                index: span.end.max(span.start),
                len: length,
            });
        }
        match storage {
            Sequence::MutableBytes(bytes) => {
                bytes.drain(span);
            }
            Sequence::List(items) => {
                items.drain(span);
            }
            other => {
                let target = self.rebuild_kind(other.kind());
                if other.kind() == Kind::IntegerRange {
                    tracing::debug!(coerce_target = %target, "materializing range for deletion");
                }
                let mut elements = other.to_values();
                elements.drain(span);
                *other = materialize_into(elements, target)?;
            }
        }
        Ok(())
    }
}

fn join_native(left: Sequence, right: Sequence) -> Sequence {
    match (left, right) {
        (Sequence::MutableBytes(mut left), Sequence::MutableBytes(right)) => {
            left.extend_from_slice(&right);
            Sequence::MutableBytes(left)
        }
        (Sequence::ImmutableBytes(left), Sequence::ImmutableBytes(right)) => {
            Sequence::ImmutableBytes([&left[..], &right[..]].concat().into_boxed_slice())
        }
        (Sequence::List(mut left), Sequence::List(right)) => {
            left.extend(right);
            Sequence::List(left)
        }
        (Sequence::Str(mut left), Sequence::Str(right)) => {
            left.push_str(&right);
            Sequence::Str(left)
        }
        (Sequence::Tuple(left), Sequence::Tuple(right)) => {
            let mut items = left.into_vec();
            items.extend(right.into_vec());
            Sequence::Tuple(items.into_boxed_slice())
        }
        (left, right) => {
            let mut items = left.into_values();
            items.extend(right.into_values());
            Sequence::List(items)
        }
    }
}
