//! Representation kinds and the classifier.
//!
//! Every [`Sequence`] is backed by exactly one of six storage kinds. Five of
//! them can be rebuilt from an arbitrary element list; the integer range
//! cannot, so the types here keep the two notions apart:
//!
//! - [`Kind`] names any of the six kinds.
//! - [`CoerceTarget`] names only the five reconstructible kinds, so a
//!   coercion target of `integer-range` cannot be represented at all.
//!
//! # Examples
//!
//! ```rust
//! use seqwise::{classify, CoerceTarget, Kind, Sequence};
//!
//! assert_eq!(classify(&Sequence::from("abc")), Kind::CharacterString);
//! assert_eq!(classify(&Sequence::range(0, 5)), Kind::IntegerRange);
//!
//! let kind: Kind = "bytearray".parse().unwrap();
//! assert_eq!(kind, Kind::MutableBytes);
//! assert!(CoerceTarget::try_from(Kind::IntegerRange).is_err());
//! ```

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqError};
use crate::sequence::Sequence;
use crate::value::Value;

/// One of the six concrete sequence representations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Kind {
    /// Growable byte buffer.
    #[serde(alias = "bytearray")]
    MutableBytes,
    /// Immutable byte string.
    #[serde(alias = "bytes")]
    ImmutableBytes,
    /// Growable heterogeneous list.
    #[serde(alias = "list")]
    DynamicList,
    /// Unmaterialized stepped integer range.
    #[serde(alias = "range")]
    IntegerRange,
    /// UTF-8 character string.
    #[serde(alias = "str")]
    CharacterString,
    /// Immutable fixed-length tuple.
    #[serde(alias = "tuple")]
    FixedTuple,
}

impl Kind {
    /// All six kinds.
    pub const ALL: [Self; 6] = [
        Self::MutableBytes,
        Self::ImmutableBytes,
        Self::DynamicList,
        Self::IntegerRange,
        Self::CharacterString,
        Self::FixedTuple,
    ];

    /// The canonical kebab-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::MutableBytes => "mutable-bytes",
            Self::ImmutableBytes => "immutable-bytes",
            Self::DynamicList => "dynamic-list",
            Self::IntegerRange => "integer-range",
            Self::CharacterString => "character-string",
            Self::FixedTuple => "fixed-tuple",
        }
    }

    const fn alias(self) -> &'static str {
        match self {
            Self::MutableBytes => "bytearray",
            Self::ImmutableBytes => "bytes",
            Self::DynamicList => "list",
            Self::IntegerRange => "range",
            Self::CharacterString => "str",
            Self::FixedTuple => "tuple",
        }
    }

    /// Returns `true` for every kind except [`Kind::IntegerRange`].
    pub const fn is_reconstructible(self) -> bool {
        !matches!(self, Self::IntegerRange)
    }

    /// Returns `true` for kinds that support in-place deletion.
    pub const fn is_mutable(self) -> bool {
        matches!(self, Self::MutableBytes | Self::DynamicList)
    }

    /// Returns `true` for kinds whose `count` accepts `start`/`end` bounds.
    pub const fn accepts_bounds(self) -> bool {
        matches!(
            self,
            Self::MutableBytes | Self::ImmutableBytes | Self::CharacterString
        )
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.name())
    }
}

impl FromStr for Kind {
    type Err = SeqError;

    fn from_str(name: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == name || kind.alias() == name)
            .ok_or_else(|| {
                SeqError::InvalidConstructorArgument(format!("unknown sequence kind \"{name}\""))
            })
    }
}

/// A reconstructible kind, used as the materialization target for ranges.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CoerceTarget {
    /// Materialize into a byte buffer.
    #[serde(alias = "bytearray")]
    MutableBytes,
    /// Materialize into a byte string.
    #[serde(alias = "bytes")]
    ImmutableBytes,
    /// Materialize into a list.
    #[serde(alias = "list")]
    DynamicList,
    /// Materialize into a string of concatenated renderings.
    #[serde(alias = "str")]
    CharacterString,
    /// Materialize into a tuple.
    #[default]
    #[serde(alias = "tuple")]
    FixedTuple,
}

impl CoerceTarget {
    /// The corresponding [`Kind`].
    pub const fn kind(self) -> Kind {
        match self {
            Self::MutableBytes => Kind::MutableBytes,
            Self::ImmutableBytes => Kind::ImmutableBytes,
            Self::DynamicList => Kind::DynamicList,
            Self::CharacterString => Kind::CharacterString,
            Self::FixedTuple => Kind::FixedTuple,
        }
    }
}

impl TryFrom<Kind> for CoerceTarget {
    type Error = SeqError;

    fn try_from(kind: Kind) -> Result<Self> {
        match kind {
            Kind::MutableBytes => Ok(Self::MutableBytes),
            Kind::ImmutableBytes => Ok(Self::ImmutableBytes),
            Kind::DynamicList => Ok(Self::DynamicList),
            Kind::CharacterString => Ok(Self::CharacterString),
            Kind::FixedTuple => Ok(Self::FixedTuple),
            Kind::IntegerRange => Err(SeqError::NonReconstructibleTarget(kind)),
        }
    }
}

impl From<CoerceTarget> for Kind {
    fn from(target: CoerceTarget) -> Self {
        target.kind()
    }
}

impl fmt::Display for CoerceTarget {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        formatter.write_str(self.kind().name())
    }
}

/// Identifies the representation backing `sequence`.
///
/// Never cached: a range-backed sequence changes kind once it has been
/// materialized.
pub const fn classify(sequence: &Sequence) -> Kind {
    match sequence {
        Sequence::MutableBytes(_) => Kind::MutableBytes,
        Sequence::ImmutableBytes(_) => Kind::ImmutableBytes,
        Sequence::List(_) => Kind::DynamicList,
        Sequence::Range(_) => Kind::IntegerRange,
        Sequence::Str(_) => Kind::CharacterString,
        Sequence::Tuple(_) => Kind::FixedTuple,
    }
}

/// Identifies the representation a raw [`Value`] would have as a sequence.
///
/// # Errors
///
/// Returns [`SeqError::UnsupportedRepresentation`] for values that are not
/// ordered sequences.
pub fn classify_value(value: &Value) -> Result<Kind> {
    match value {
        Value::Bytes(_) => Ok(Kind::ImmutableBytes),
        Value::List(_) => Ok(Kind::DynamicList),
        Value::Str(_) => Ok(Kind::CharacterString),
        Value::Tuple(_) => Ok(Kind::FixedTuple),
        other => Err(SeqError::UnsupportedRepresentation(other.type_name())),
    }
}
