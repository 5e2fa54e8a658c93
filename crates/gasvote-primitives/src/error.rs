//! Common error types for primitives

use thiserror::Error;

/// Primitive operation error
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    /// Empty numeric string
    #[error("empty numeric value")]
    Empty,

    /// Value is not a valid decimal or hex number
    #[error("invalid number: {0}")]
    InvalidNumber(String),

    /// Value does not fit in 256 bits
    #[error("number does not fit in 256 bits: {0}")]
    Overflow(String),

    /// Epoch length of zero
    #[error("epoch length must be non-zero")]
    ZeroEpochLength,
}
