//! Error types for encoding and highlighting.

use thiserror::Error;

/// Errors produced while serializing a [`crate::Document`] to text.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum EncodeError {
    /// A scalar could not be represented by the YAML emitter.
    #[error("cannot encode scalar at {path}: {message}")]
    Scalar {
        /// Logical path of the offending value
        path: String,
        /// Emitter message
        message: String,
    },

    /// The value is not representable as YAML at all.
    #[error("unsupported value: {0}")]
    Unsupported(String),
}

/// Errors produced by a [`crate::Highlighter`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum HighlightError {
    /// The highlighter does not understand the input.
    #[error("cannot highlight input: {0}")]
    Unrecognized(String),
}
