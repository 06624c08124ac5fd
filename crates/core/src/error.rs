//! Error types for the wrapper layer
//!
//! This module defines all error types used throughout the system.
//! We use `thiserror` for automatic `Display` and `Error` trait
//! implementations.
//!
//! All validation is eager: errors surface at construction or at the start
//! of an operation, before any mutation, so no partial state is observable.

use crate::key::Key;
use thiserror::Error;

/// Result type alias for wrapper operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for the wrapper layer
#[derive(Debug, Error, PartialEq)]
pub enum Error {
    /// Supplied metadata count does not match array dimensionality
    #[error("arity mismatch: expected {expected} per-dimension entries, got {actual}")]
    Arity {
        /// Expected entry count (the array's rank)
        expected: usize,
        /// Entries actually supplied
        actual: usize,
    },

    /// Malformed key-sequence specification
    #[error("invalid key sequence: {0}")]
    InvalidKeys(String),

    /// Key-sequence length irreconcilable with the array extent
    #[error("dimension {dim}: key sequence of length {keys_len} cannot be reconciled with extent {extent}")]
    DimensionMismatch {
        /// Dimension being validated
        dim: usize,
        /// Length of the supplied key sequence
        keys_len: usize,
        /// Extent of the array in that dimension
        extent: usize,
    },

    /// A dimension name appears more than once in a name tuple
    #[error("duplicate dimension name: {0:?}")]
    DuplicateName(String),

    /// A dimension name is not a usable identifier
    #[error("invalid dimension name: {0:?}")]
    InvalidName(String),

    /// A dimension name is not present in the name tuple
    #[error("unknown dimension name: {0:?}")]
    UnknownName(String),

    /// Exact-value query found no matching key
    #[error("dimension {dim}: no key equal to {key}")]
    KeyLookup {
        /// Dimension that was queried
        dim: usize,
        /// The key that had no match
        key: Key,
    },

    /// Selector unsupported for the given key kind or dimension count
    #[error("dimension {dim}: invalid selector: {reason}")]
    InvalidSelector {
        /// Dimension that was queried
        dim: usize,
        /// What was wrong with the query
        reason: String,
    },

    /// Growth cannot determine the next key value
    #[error("dimension {dim}: cannot extend key sequence without a new key")]
    UnextendableKeys {
        /// Dimension the growth targeted
        dim: usize,
    },

    /// Positional index outside the array extent
    #[error("dimension {dim}: index {index} out of bounds for extent {extent}")]
    IndexOutOfBounds {
        /// Dimension being indexed
        dim: usize,
        /// The offending index
        index: usize,
        /// Extent of the array in that dimension
        extent: usize,
    },

    /// Element count does not match the shape it must fill
    #[error("shape mismatch: {actual} elements do not fill {expected}")]
    ShapeMismatch {
        /// Element count the shape requires
        expected: usize,
        /// Elements actually supplied
        actual: usize,
    },

    /// Two wrappers' key sequences disagree along a dimension
    #[error("dimension {dim}: operand key sequences disagree")]
    KeyConflict {
        /// First dimension where the sequences differ
        dim: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_arity() {
        let err = Error::Arity {
            expected: 2,
            actual: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("arity mismatch"));
        assert!(msg.contains('2'));
        assert!(msg.contains('3'));
    }

    #[test]
    fn test_error_display_dimension_mismatch() {
        let err = Error::DimensionMismatch {
            dim: 1,
            keys_len: 4,
            extent: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("dimension 1"));
        assert!(msg.contains("length 4"));
        assert!(msg.contains("extent 3"));
    }

    #[test]
    fn test_error_display_names() {
        assert!(Error::DuplicateName("row".into())
            .to_string()
            .contains("duplicate"));
        assert!(Error::UnknownName("col".into())
            .to_string()
            .contains("unknown"));
        assert!(Error::InvalidName(String::new())
            .to_string()
            .contains("invalid"));
    }

    #[test]
    fn test_error_display_key_lookup() {
        let err = Error::KeyLookup {
            dim: 0,
            key: Key::Str("missing".into()),
        };
        let msg = err.to_string();
        assert!(msg.contains("dimension 0"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_error_display_invalid_selector() {
        let err = Error::InvalidSelector {
            dim: 2,
            reason: "nearest requires numeric keys".into(),
        };
        let msg = err.to_string();
        assert!(msg.contains("dimension 2"));
        assert!(msg.contains("nearest requires numeric keys"));
    }

    #[test]
    fn test_error_display_unextendable() {
        let err = Error::UnextendableKeys { dim: 0 };
        assert!(err.to_string().contains("cannot extend"));
    }

    #[test]
    fn test_error_display_out_of_bounds() {
        let err = Error::IndexOutOfBounds {
            dim: 1,
            index: 5,
            extent: 3,
        };
        let msg = err.to_string();
        assert!(msg.contains("index 5"));
        assert!(msg.contains("extent 3"));
    }

    #[test]
    fn test_error_pattern_matching() {
        let err = Error::ShapeMismatch {
            expected: 6,
            actual: 5,
        };
        match err {
            Error::ShapeMismatch { expected, actual } => {
                assert_eq!(expected, 6);
                assert_eq!(actual, 5);
            }
            _ => panic!("Wrong error variant"),
        }
    }

    #[test]
    fn test_result_type_alias() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }

        fn returns_error() -> Result<i32> {
            Err(Error::KeyConflict { dim: 0 })
        }

        assert_eq!(returns_result().unwrap(), 42);
        assert!(returns_error().is_err());
    }
}
