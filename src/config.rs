//! Construction-time configuration.
//!
//! A [`SeqConfig`] fixes two policies for the lifetime of a façade:
//!
//! - the [`CoerceTarget`] a range is materialized into whenever it has to
//!   hold transformed elements (default `fixed-tuple`), and
//! - the [`KeyPolicy`] used by `deduplicate`, `duplicates` and `unique`.
//!
//! Configurations deserialize from any serde format:
//!
//! ```rust
//! use seqwise::{CoerceTarget, KeyPolicy, SeqConfig};
//!
//! let config: SeqConfig =
//!     serde_json::from_str(r#"{"coerce_target": "list", "key_policy": "rendering"}"#).unwrap();
//! assert_eq!(config.coerce_target, CoerceTarget::DynamicList);
//! assert_eq!(config.key_policy, KeyPolicy::Rendering);
//!
//! let defaults: SeqConfig = serde_json::from_str("{}").unwrap();
//! assert_eq!(defaults, SeqConfig::default());
//! ```

use serde::{Deserialize, Serialize};

use crate::error::{Result, SeqError};
use crate::kind::{CoerceTarget, Kind};

/// How elements are keyed when detecting duplicates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KeyPolicy {
    /// Structural equality and hashing of [`Value`](crate::Value).
    #[default]
    Structural,
    /// The textual rendering of each element. `1` and `"1"` collide.
    Rendering,
}

/// Policies fixed when a façade is constructed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct SeqConfig {
    /// Where ranges are materialized.
    pub coerce_target: CoerceTarget,
    /// How duplicates are detected.
    pub key_policy: KeyPolicy,
}

impl SeqConfig {
    /// Sets the coercion target.
    ///
    /// # Errors
    ///
    /// Returns [`SeqError::InvalidConstructorArgument`] for
    /// [`Kind::IntegerRange`].
    pub fn with_coerce_target(mut self, kind: Kind) -> Result<Self> {
        self.coerce_target = CoerceTarget::try_from(kind).map_err(|_| {
            SeqError::InvalidConstructorArgument(format!(
                "coercion target must be a reconstructible kind, got {kind}"
            ))
        })?;
        Ok(self)
    }

    /// Sets the duplicate key policy.
    #[must_use]
    pub const fn with_key_policy(mut self, key_policy: KeyPolicy) -> Self {
        self.key_policy = key_policy;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_targets_fixed_tuple_with_structural_keys() {
        let config = SeqConfig::default();
        assert_eq!(config.coerce_target, CoerceTarget::FixedTuple);
        assert_eq!(config.key_policy, KeyPolicy::Structural);
    }

    #[test]
    fn test_range_coerce_target_is_rejected() {
        let error = SeqConfig::default()
            .with_coerce_target(Kind::IntegerRange)
            .unwrap_err();
        assert!(matches!(error, SeqError::InvalidConstructorArgument(_)));
    }

    #[test]
    fn test_builder_chain() {
        let config = SeqConfig::default()
            .with_coerce_target(Kind::CharacterString)
            .unwrap()
            .with_key_policy(KeyPolicy::Rendering);
        assert_eq!(config.coerce_target, CoerceTarget::CharacterString);
        assert_eq!(config.key_policy, KeyPolicy::Rendering);
    }

    #[test]
    fn test_deserialize_rejects_range_target() {
        assert!(serde_json::from_str::<SeqConfig>(r#"{"coerce_target": "range"}"#).is_err());
    }
}
