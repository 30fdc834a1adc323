//! Error types for sequence combinators.
//!
//! Every fallible operation in this crate returns [`SeqError`]. Errors are
//! raised at the point of detection and handed straight back to the caller;
//! nothing is retried, recovered or logged internally.

use crate::kind::Kind;

/// Errors produced while constructing, classifying, rebuilding or
/// transforming a sequence.
///
/// # Examples
///
/// ```rust
/// use seqwise::SeqError;
///
/// let error = SeqError::ArityMismatch { min: 1, max: 3, got: 0 };
/// assert_eq!(
///     format!("{error}"),
///     "callback must declare 1 to 3 parameters, but declares 0"
/// );
/// ```
#[derive(Debug, thiserror::Error)]
pub enum SeqError {
    /// The constructor received a non-sequence value or an invalid
    /// coercion target.
    #[error("invalid constructor argument: {0}")]
    InvalidConstructorArgument(String),

    /// A value was handed to the classifier that is not one of the six
    /// supported representations.
    #[error("unsupported representation: {0}")]
    UnsupportedRepresentation(&'static str),

    /// Materialization was requested into a kind that cannot hold
    /// arbitrary elements.
    #[error("cannot materialize elements into {0}")]
    NonReconstructibleTarget(Kind),

    /// The callback's declared parameter count is outside the combinator's
    /// accepted band.
    #[error("callback must declare {min} to {max} parameters, but declares {got}")]
    ArityMismatch {
        /// Smallest accepted parameter count.
        min: usize,
        /// Largest accepted parameter count.
        max: usize,
        /// Parameter count the callback declares.
        got: usize,
    },

    /// `reduce` was called without an initial value and the accumulator
    /// type has no seed for the first element.
    #[error("cannot derive an initial value from the first element {0}; provide one explicitly")]
    NoAutoSeed(String),

    /// `start`/`end` bounds were supplied for a kind that does not take them.
    #[error("{0} does not accept start/end arguments")]
    UnsupportedRangeArgs(Kind),

    /// The searched item does not occur in the sequence.
    #[error("{0} is not in the sequence")]
    NotFound(String),

    /// A byte-like kind was rebuilt from an element outside `0..=255`.
    #[error("byte elements must be integers in 0..=255, got {0}")]
    InvalidByteElement(String),

    /// A positional access or deletion fell outside the sequence.
    #[error("index {index} out of bounds for length {len}")]
    IndexOutOfBounds {
        /// The requested position.
        index: usize,
        /// The sequence length at the time of the request.
        len: usize,
    },

    /// JSON rendering failed.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SeqError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arity_mismatch_display() {
        let error = SeqError::ArityMismatch {
            min: 2,
            max: 4,
            got: 1,
        };
        assert_eq!(
            format!("{error}"),
            "callback must declare 2 to 4 parameters, but declares 1"
        );
    }

    #[test]
    fn test_non_reconstructible_target_display_names_kind() {
        let error = SeqError::NonReconstructibleTarget(Kind::IntegerRange);
        assert_eq!(
            format!("{error}"),
            "cannot materialize elements into integer-range"
        );
    }

    #[test]
    fn test_index_out_of_bounds_display() {
        let error = SeqError::IndexOutOfBounds { index: 7, len: 3 };
        assert_eq!(format!("{error}"), "index 7 out of bounds for length 3");
    }

    #[test]
    fn test_json_error_is_transparent() {
        let json_error = serde_json::from_str::<i64>("not json").unwrap_err();
        let expected = json_error.to_string();
        let error = SeqError::from(json_error);
        assert!(matches!(error, SeqError::Json(_)));
        assert_eq!(error.to_string(), expected);
    }
}
