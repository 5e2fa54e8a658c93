//! Error types for stack checking and schedule voting

use crate::schedule::GasClass;
use gasvote_primitives::{BlockHeight, PrimitiveError, U256};
use std::fmt;
use thiserror::Error;

/// Which lower bound a gas vote fell below
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteBound {
    /// Protocol-wide minimum for the class
    Floor,
    /// Half of the currently active value
    HalfOfActive,
}

impl fmt::Display for VoteBound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VoteBound::Floor => f.write_str("floor"),
            VoteBound::HalfOfActive => f.write_str("half of active"),
        }
    }
}

/// Errors raised by the stack guard, schedule voting and configuration
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EvmError {
    /// Fewer items on the stack than the instruction pops
    #[error("stack underflow: required {required}, actual {actual}")]
    StackUnderflow {
        /// Items the instruction pops
        required: usize,
        /// Current stack depth
        actual: usize,
    },

    /// Instruction would leave the stack deeper than the limit
    #[error("stack limit reached: limit {limit}, attempted {attempted}")]
    StackOverflow {
        /// Protocol stack limit
        limit: usize,
        /// Depth the instruction would produce
        attempted: usize,
    },

    /// Voted class value is below one of its lower bounds
    #[error("gas vote too low for {class}: {value} < {bound} ({kind})")]
    GasVoteTooLow {
        /// Class being voted on
        class: GasClass,
        /// Proposed value
        value: U256,
        /// Violated bound
        bound: U256,
        /// Which bound was violated
        kind: VoteBound,
    },

    /// Voted class value exceeds twice the active value
    #[error("gas vote too high for {class}: {value} > {bound}")]
    GasVoteTooHigh {
        /// Class being voted on
        class: GasClass,
        /// Proposed value
        value: U256,
        /// Violated bound
        bound: U256,
    },

    /// Gas accumulator would exceed 2^256 - 1
    #[error("gas accumulator overflow")]
    GasOverflow,

    /// Retarget requested off an epoch boundary
    #[error("block {height} is not an epoch boundary (epoch length {epoch_length})")]
    NotEpochBoundary {
        /// Requested block height
        height: BlockHeight,
        /// Configured epoch length
        epoch_length: u64,
    },

    /// Retarget built on a snapshot that is no longer current, or for an
    /// epoch that already has a published schedule
    #[error("retarget for epoch {epoch} is stale")]
    StaleRetarget {
        /// Epoch the retarget would have started
        epoch: u64,
    },

    /// Invalid protocol configuration
    #[error("invalid config: {0}")]
    InvalidConfig(String),
}

impl From<PrimitiveError> for EvmError {
    fn from(err: PrimitiveError) -> Self {
        EvmError::InvalidConfig(err.to_string())
    }
}

/// Result type for gas accounting operations
pub type EvmResult<T> = Result<T, EvmError>;
