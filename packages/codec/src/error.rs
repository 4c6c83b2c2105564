//! Error types for the codec layer.
//!
//! Store-level lookups signal absence with `Option`; everything that
//! touches bytes, text, or files reports through [`Error`] instead, so a
//! caller can tell a missing file from a malformed payload from a tree the
//! target format cannot carry.

use crate::format::Format;

/// Errors from encoding, decoding, and file round-trips.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O failure reading or writing a file.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// Input bytes or text do not parse under the requested format.
    #[error("malformed {format} input: {message}")]
    Malformed { format: Format, message: String },

    /// The tree is well-formed but contains a variant the target format
    /// cannot represent. Checked before encoding; nothing is emitted.
    #[error("value cannot be represented as {format}: {message}")]
    Unrepresentable { format: Format, message: String },

    /// The encoded payload is not UTF-8 text.
    #[error("{format} output is not utf-8 text")]
    NotText { format: Format },

    /// The input decoded cleanly but the top-level value has the wrong
    /// shape for the caller (e.g. a record constructor fed an array).
    #[error("decoded {format} value is not {expected}")]
    UnexpectedShape {
        format: Format,
        expected: &'static str,
    },

    /// A record (or one element of a batch of records) refused
    /// construction: a required property was missing or mistyped.
    #[error("record is missing required properties")]
    IncompleteRecord,
}

impl Error {
    /// Shorthand for a `Malformed` error.
    pub fn malformed(format: Format, message: impl Into<String>) -> Self {
        Error::Malformed {
            format,
            message: message.into(),
        }
    }

    /// Shorthand for an `Unrepresentable` error.
    pub fn unrepresentable(format: Format, message: impl Into<String>) -> Self {
        Error::Unrepresentable {
            format,
            message: message.into(),
        }
    }
}
