//! Error types for plain encoding and decoding.
//!
//! Every error aborts the whole top-level call. The decoder's leniency towards
//! lines without a `:` and keys without a matching field is structural and never
//! surfaces here (unless [`DecodeOptions::deny_unknown_keys`] is switched on).
//!
//! ## Error Categories
//!
//! - **Encode errors**: [`Error::NilReference`] and whatever an override reports
//! - **Target errors**: [`Error::InvalidTarget`], [`Error::UnsettableField`]
//! - **Value errors**: [`Error::Parse`] for scalar literals that do not fit their kind
//! - **Path errors**: [`Error::InvalidPath`] when a dotted key walks through a non-record
//!
//! ## Examples
//!
//! ```rust
//! use plainkv::{from_str, plain_record, Error};
//!
//! #[derive(Debug, Default)]
//! struct Counter {
//!     hits: u32,
//! }
//!
//! plain_record!(Counter { hits => "hits" });
//!
//! let result: Result<Counter, Error> = from_str("hits: many");
//! assert!(matches!(result, Err(Error::Parse { .. })));
//! ```
//!
//! [`DecodeOptions::deny_unknown_keys`]: crate::DecodeOptions::deny_unknown_keys

use crate::scalar::ScalarKind;
use crate::tag::Path;
use std::fmt;
use thiserror::Error;

/// Represents all possible errors that can occur during plain encoding/decoding.
#[derive(Debug, Clone, Error)]
pub enum Error {
    /// An absent reference (`None`) was reached while encoding.
    #[error("Nil reference encountered at {path}")]
    NilReference { path: Path },

    /// The decode target cannot be written at all.
    #[error("Invalid decode target: {0}")]
    InvalidTarget(String),

    /// A scalar literal does not match the kind of the field it was matched to.
    #[error("Cannot parse `{literal}` as {kind} at {key}: {message}")]
    Parse {
        key: Path,
        kind: ScalarKind,
        literal: String,
        message: String,
    },

    /// A dotted key tried to descend into a field that is not a record.
    #[error("Invalid path `{key}`: field `{segment}` is not a record")]
    InvalidPath { key: String, segment: String },

    /// The matched field cannot be written.
    #[error("Field `{key}` cannot be written")]
    UnsettableField { key: String },

    /// A key had no matching field and unknown keys were denied.
    #[error("Unknown key `{key}`")]
    UnknownKey { key: String },

    /// Unsupported shape when bridging from serde
    #[error("Unsupported type: {0}")]
    UnsupportedType(String),

    /// IO error during reading or writing
    #[error("IO error: {0}")]
    Io(String),

    /// Custom error, typically reported by an override
    #[error("Error: {0}")]
    Custom(String),

    /// Generic message
    #[error("{0}")]
    Message(String),
}

impl Error {
    /// Creates a parse error for a literal read at the document root.
    ///
    /// The decoder re-anchors it to the offending key with [`Error::at_key`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plainkv::{Error, ScalarKind};
    ///
    /// let err = Error::parse(ScalarKind::Integer, "abc", "invalid digit found in string");
    /// assert!(err.to_string().contains("`abc` as integer"));
    /// ```
    pub fn parse<M: fmt::Display>(kind: ScalarKind, literal: &str, message: M) -> Self {
        Error::Parse {
            key: Path::root(),
            kind,
            literal: literal.to_string(),
            message: message.to_string(),
        }
    }

    /// Attaches the dotted key of the line being decoded to a parse error.
    ///
    /// Other variants are returned unchanged.
    #[must_use]
    pub fn at_key(self, key: &str) -> Self {
        match self {
            Error::Parse {
                kind,
                literal,
                message,
                ..
            } => Error::Parse {
                key: Path::from(key),
                kind,
                literal,
                message,
            },
            other => other,
        }
    }

    pub fn nil_reference(path: &Path) -> Self {
        Error::NilReference { path: path.clone() }
    }

    pub fn invalid_target(msg: &str) -> Self {
        Error::InvalidTarget(msg.to_string())
    }

    pub fn invalid_path(key: &str, segment: &str) -> Self {
        Error::InvalidPath {
            key: key.to_string(),
            segment: segment.to_string(),
        }
    }

    pub fn unsettable_field(key: &str) -> Self {
        Error::UnsettableField {
            key: key.to_string(),
        }
    }

    pub fn unknown_key(key: &str) -> Self {
        Error::UnknownKey {
            key: key.to_string(),
        }
    }

    /// Creates an unsupported type error for serde shapes with no plain rendering.
    pub fn unsupported_type(msg: &str) -> Self {
        Error::UnsupportedType(msg.to_string())
    }

    /// Creates a custom error with a display message.
    ///
    /// Overrides report their failures through this constructor; the codec passes
    /// them through unchanged.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use plainkv::Error;
    ///
    /// let err = Error::custom("something went wrong");
    /// assert!(err.to_string().contains("something went wrong"));
    /// ```
    pub fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }

    /// Creates an I/O error for reader/writer failures.
    pub fn io(msg: &str) -> Self {
        Error::Io(msg.to_string())
    }
}

impl serde::ser::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

impl serde::de::Error for Error {
    fn custom<T: fmt::Display>(msg: T) -> Self {
        Error::Custom(msg.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_reanchored_to_key() {
        let err = Error::parse(ScalarKind::Boolean, "maybe", "invalid boolean literal")
            .at_key("sub.active");
        match &err {
            Error::Parse { key, literal, .. } => {
                assert_eq!(key.as_str(), "sub.active");
                assert_eq!(literal, "maybe");
            }
            other => panic!("Expected parse error, got {other:?}"),
        }
        assert!(err.to_string().contains("at sub.active"));
    }

    #[test]
    fn test_at_key_leaves_other_errors_alone() {
        let err = Error::custom("boom").at_key("name");
        assert!(matches!(err, Error::Custom(ref msg) if msg == "boom"));
    }

    #[test]
    fn test_root_path_display() {
        let err = Error::nil_reference(&Path::root());
        assert_eq!(err.to_string(), "Nil reference encountered at <root>");
    }
}
