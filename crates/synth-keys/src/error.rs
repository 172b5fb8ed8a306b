//! Error types for the query key registry.
//!
//! The typed key builders are total and never fail. Errors only arise on the
//! dynamic surfaces: building a registry with a custom configuration,
//! resolving catalog leaves by name, and decoding serialized keys.
//!
//! # Example
//!
//! ```
//! use synth_keys::{KeyError, QueryKeys};
//!
//! let keys = QueryKeys::new();
//! let err = keys.leaf("Rates", "Nope").unwrap_err();
//! assert!(err.is_unknown_leaf());
//! ```

use thiserror::Error;

use crate::catalog::ParamKind;

/// Errors produced by the registry's dynamic surfaces.
#[derive(Debug, Error)]
pub enum KeyError {
    /// The list delimiter cannot be used to join identifiers.
    #[error("Invalid list delimiter '{delimiter}': {reason}")]
    InvalidDelimiter {
        /// The rejected delimiter
        delimiter: char,
        /// Why it was rejected
        reason: String,
    },

    /// No leaf with the given namespace and name exists.
    #[error("Unknown leaf '{namespace}.{name}'")]
    UnknownLeaf {
        /// Namespace that was requested
        namespace: String,
        /// Leaf name that was requested
        name: String,
    },

    /// A builder was resolved with the wrong number of parameters.
    #[error("Leaf '{leaf}' expects {expected} parameter(s), got {actual}")]
    ArityMismatch {
        /// Qualified leaf name
        leaf: String,
        /// Declared parameter count
        expected: usize,
        /// Supplied parameter count
        actual: usize,
    },

    /// A builder parameter has the wrong kind.
    #[error("Leaf '{leaf}' parameter {index} expects {expected:?}, got {actual:?}")]
    ParamKindMismatch {
        /// Qualified leaf name
        leaf: String,
        /// Zero-based parameter position
        index: usize,
        /// Declared kind
        expected: ParamKind,
        /// Supplied kind
        actual: ParamKind,
    },

    /// Parameters passed the signature checks but the builder rejected them.
    #[error("Leaf '{leaf}' could not be built from the given parameters")]
    Unresolved {
        /// Qualified leaf name
        leaf: String,
    },

    /// A serialized key could not be decoded.
    #[error("Failed to decode query key: {0}")]
    Decode(#[from] serde_json::Error),
}

impl KeyError {
    /// Creates an InvalidDelimiter error.
    pub fn invalid_delimiter(delimiter: char, reason: impl Into<String>) -> Self {
        Self::InvalidDelimiter {
            delimiter,
            reason: reason.into(),
        }
    }

    /// Creates an UnknownLeaf error.
    pub fn unknown_leaf(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self::UnknownLeaf {
            namespace: namespace.into(),
            name: name.into(),
        }
    }

    /// Creates an ArityMismatch error.
    pub fn arity_mismatch(leaf: impl Into<String>, expected: usize, actual: usize) -> Self {
        Self::ArityMismatch {
            leaf: leaf.into(),
            expected,
            actual,
        }
    }

    /// Creates a ParamKindMismatch error.
    pub fn param_kind_mismatch(
        leaf: impl Into<String>,
        index: usize,
        expected: ParamKind,
        actual: ParamKind,
    ) -> Self {
        Self::ParamKindMismatch {
            leaf: leaf.into(),
            index,
            expected,
            actual,
        }
    }

    /// Creates an Unresolved error.
    pub fn unresolved(leaf: impl Into<String>) -> Self {
        Self::Unresolved { leaf: leaf.into() }
    }

    /// Returns true if a catalog lookup failed.
    pub fn is_unknown_leaf(&self) -> bool {
        matches!(self, Self::UnknownLeaf { .. })
    }

    /// Returns true if resolved parameters did not match the builder signature.
    pub fn is_param_error(&self) -> bool {
        matches!(
            self,
            Self::ArityMismatch { .. }
                | Self::ParamKindMismatch { .. }
                | Self::Unresolved { .. }
        )
    }

    /// Returns true if a serialized key could not be decoded.
    pub fn is_decode_error(&self) -> bool {
        matches!(self, Self::Decode(_))
    }
}

/// Type alias for Results with KeyError.
pub type Result<T> = std::result::Result<T, KeyError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_leaf_display() {
        let error = KeyError::unknown_leaf("Rates", "Volume");
        let msg = error.to_string();

        assert!(msg.contains("Rates.Volume"));
        assert!(error.is_unknown_leaf());
    }

    #[test]
    fn test_arity_mismatch_display() {
        let error = KeyError::arity_mismatch("Synths.Suspension", 1, 3);
        let msg = error.to_string();

        assert!(msg.contains("expects 1"));
        assert!(msg.contains("got 3"));
        assert!(error.is_param_error());
    }

    #[test]
    fn test_param_kind_mismatch_is_param_error() {
        let error =
            KeyError::param_kind_mismatch("Network.X", 0, ParamKind::Number, ParamKind::Text);

        assert!(error.is_param_error());
        assert!(!error.is_unknown_leaf());
    }

    #[test]
    fn test_unresolved_is_param_error() {
        let error = KeyError::unresolved("Convert.Quote1Inch");

        assert_eq!(
            error.to_string(),
            "Leaf 'Convert.Quote1Inch' could not be built from the given parameters"
        );
        assert!(error.is_param_error());
    }

    #[test]
    fn test_decode_error_conversion() {
        let json_error = serde_json::from_str::<Vec<String>>("{").unwrap_err();
        let error: KeyError = json_error.into();

        assert!(error.is_decode_error());

        use std::error::Error;
        assert!(error.source().is_some());
    }

    #[test]
    fn test_result_with_question_mark() {
        fn inner() -> Result<()> {
            Err(KeyError::invalid_delimiter('a', "alphanumeric"))
        }

        fn outer() -> Result<String> {
            inner()?;
            Ok("success".into())
        }

        assert!(outer().is_err());
    }
}
