//! Error types for the Chronos Kernel Core.

use thiserror::Error;

/// Validation and decoding errors raised by the numeric kernels and the
/// byte probe.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CoreError {
    #[error("invalid matrix format: matrix must have at least one row and one column")]
    EmptyMatrix,

    #[error("invalid matrix format: row {row} has {got} columns, expected {expected}")]
    RaggedMatrix {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("matrix dimensions incompatible for multiplication: {left_cols} columns vs {right_rows} rows")]
    DimensionMismatch { left_cols: usize, right_rows: usize },

    #[error("iterations must be positive, got {0}")]
    NonPositiveIterations(i64),

    #[error("number of dice must be between 1 and 10, got {0}")]
    DiceOutOfRange(i64),

    #[error("unknown simulation type: {0}")]
    UnknownSimulation(String),

    #[error("base64 decode failed: {0}")]
    Base64(String),
}

/// Errors from RSA key handling, signing and verification.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("invalid {role} key format: {reason}")]
    InvalidKey { role: KeyRole, reason: String },

    #[error("signing failed: message too long for RSA key size")]
    MessageTooLong,

    #[error("signing failed: {0}")]
    SigningFailed(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    #[error("verification error")]
    VerificationFailed,
}

/// Which half of a key pair a key error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyRole {
    Private,
    Public,
}

impl std::fmt::Display for KeyRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            KeyRole::Private => f.write_str("private"),
            KeyRole::Public => f.write_str("public"),
        }
    }
}

impl From<base64::DecodeError> for CoreError {
    fn from(e: base64::DecodeError) -> Self {
        CoreError::Base64(e.to_string())
    }
}
