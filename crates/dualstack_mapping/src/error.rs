use std::fmt;

use thiserror::Error;

/// What kind of value failed to parse. Used in length errors so the caller
/// can tell an identifier problem from an address problem.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    AccountId,
    ChainAddress,
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValueKind::AccountId => f.write_str("account identifier"),
            ValueKind::ChainAddress => f.write_str("chain address"),
        }
    }
}

/// The only failure a conversion can produce: the input was not shaped the
/// way the operation requires. Never retried, never coerced.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    #[error("invalid {kind} length: expected {expected} bytes, got {actual}")]
    InvalidLength {
        kind: ValueKind,
        expected: usize,
        actual: usize,
    },

    #[error("invalid hex: {0}")]
    InvalidHex(String),

    #[error("address checksum mismatch: {0}")]
    ChecksumMismatch(String),

    #[error("invalid SS58 address: {0}")]
    InvalidSs58(String),

    #[error("invalid {0}")]
    InvalidUrl(String),
}

impl FormatError {
    pub(crate) fn length(kind: ValueKind, expected: usize, actual: usize) -> Self {
        Self::InvalidLength {
            kind,
            expected,
            actual,
        }
    }
}

impl From<hex::FromHexError> for FormatError {
    fn from(err: hex::FromHexError) -> Self {
        Self::InvalidHex(err.to_string())
    }
}
