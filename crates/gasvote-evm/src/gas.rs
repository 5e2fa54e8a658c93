//! Protocol gas parameters and word-size arithmetic

use crate::error::{EvmError, EvmResult};
use gasvote_primitives::U256;

/// Protocol constants
pub mod params {
    /// Max stack size
    pub const STACK_LIMIT: usize = 1024;
    /// Blocks per schedule retarget epoch
    pub const EPOCH_LENGTH: u64 = gasvote_primitives::EPOCH_LENGTH;
    /// Bytes per memory word
    pub const WORD_SIZE: u64 = 32;
    /// RETURN base gas (not voteable)
    pub const GAS_RETURN: u64 = 0;
    /// STOP base gas (not voteable)
    pub const GAS_STOP: u64 = 0;
    /// Code deposit gas per byte of created contract code
    pub const GAS_CONTRACT_BYTE: u64 = 200;
}

/// Number of 32-byte words needed to hold `size` bytes, rounded up.
///
/// Computed as quotient plus remainder flag so no intermediate value ever
/// exceeds `size`; the result is exact for every 256-bit input.
pub fn word_size(size: U256) -> U256 {
    let word = U256::from(params::WORD_SIZE);
    let words = size / word;
    if (size % word).is_zero() {
        words
    } else {
        // words <= U256::MAX / 32, so this cannot wrap
        words + U256::one()
    }
}

/// Gas charged for depositing `code_len` bytes of contract code
pub fn code_deposit_gas(code_len: U256) -> EvmResult<U256> {
    code_len
        .checked_mul(U256::from(params::GAS_CONTRACT_BYTE))
        .ok_or(EvmError::GasOverflow)
}
