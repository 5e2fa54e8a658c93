//! Word-size calculation

use crate::{output::Output, CliError};
use gasvote_evm::word_size;
use gasvote_primitives::parse_u256;

/// Print the 32-byte word count of a byte length
pub fn execute(bytes: &str, json: bool) -> Result<(), CliError> {
    let size = parse_u256(bytes)?;
    let words = word_size(size);
    Output::new(json)
        .field_u256("bytes", size)
        .field_u256("words", words)
        .message(&format!("{} bytes = {} words", size, words))
        .print();
    Ok(())
}
