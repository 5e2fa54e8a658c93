//! CLI command implementations

pub mod check;
pub mod table;
pub mod vote;
pub mod words;

use crate::CliError;
use gasvote_evm::{GasClassSchedule, Opcode};
use std::path::Path;

/// Read a schedule from a `.json` or `.toml` file
pub fn load_schedule(path: &Path) -> Result<GasClassSchedule, CliError> {
    let content = std::fs::read_to_string(path)?;
    match path.extension().and_then(|e| e.to_str()) {
        Some("json") => Ok(serde_json::from_str(&content)?),
        Some("toml") => Ok(toml::from_str(&content)?),
        _ => Err(CliError::InvalidInput(format!(
            "{}: schedule files must end in .json or .toml",
            path.display()
        ))),
    }
}

/// Parse an opcode given as a mnemonic (`add`) or a byte (`0x01`)
pub fn parse_opcode(s: &str) -> Result<u8, CliError> {
    if let Some(hex) = s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        return u8::from_str_radix(hex, 16).map_err(|_| CliError::InvalidOpcode(s.to_string()));
    }
    Opcode::from_name(s)
        .map(Opcode::as_byte)
        .ok_or_else(|| CliError::InvalidOpcode(s.to_string()))
}
