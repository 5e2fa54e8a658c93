//! CLI error types

use gasvote_evm::EvmError;
use gasvote_primitives::PrimitiveError;
use thiserror::Error;

/// CLI error type
#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid opcode
    #[error("Invalid opcode: {0}")]
    InvalidOpcode(String),

    /// Invalid number
    #[error("Invalid number: {0}")]
    InvalidNumber(#[from] PrimitiveError),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Stack check or vote failure
    #[error("{0}")]
    Evm(#[from] EvmError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Config error
    #[error("Config error: {0}")]
    Config(String),
}
