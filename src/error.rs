//! Error types shared by every coder in the crate.

use thiserror::Error;

/// Errors returned by entropy estimation and the encode/decode pairs.
///
/// Every error is local to the call that produced it; no coder keeps state
/// between calls, so a failed decode never affects a later one.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The input is outside the domain of the operation (e.g. the entropy of
    /// an empty buffer).
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The encoded data contradicts the coder's own invariants (e.g. a bit
    /// string ending mid code word, or a back-reference before the start of
    /// the output).
    #[error("malformed input: {0}")]
    MalformedInput(String),
}

impl Error {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Error::InvalidInput(message.into())
    }

    pub fn malformed(message: impl Into<String>) -> Self {
        Error::MalformedInput(message.into())
    }
}

/// Result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
