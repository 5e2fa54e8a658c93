//! Epoch arithmetic over block heights

use crate::{BlockHeight, PrimitiveError};
use std::fmt;

/// Number of blocks between gas schedule retargets
pub const EPOCH_LENGTH: u64 = 64;

/// Index of a fixed-size span of blocks.
///
/// Blocks `1..=len` form epoch 0, blocks `len+1..=2*len` epoch 1 and so on.
/// The genesis block belongs to epoch 0 and is never a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Epoch(u64);

impl Epoch {
    /// Genesis epoch
    pub const GENESIS: Epoch = Epoch(0);

    /// Create from a raw index
    pub const fn new(index: u64) -> Self {
        Epoch(index)
    }

    /// Raw epoch index
    pub const fn index(&self) -> u64 {
        self.0
    }

    /// Epoch that contains `height`
    pub fn containing(height: BlockHeight, epoch_length: u64) -> Result<Self, PrimitiveError> {
        if epoch_length == 0 {
            return Err(PrimitiveError::ZeroEpochLength);
        }
        Ok(Epoch(height.saturating_sub(1) / epoch_length))
    }

    /// Whether `height` closes an epoch, i.e. a retarget may happen there
    pub fn is_boundary(height: BlockHeight, epoch_length: u64) -> Result<bool, PrimitiveError> {
        if epoch_length == 0 {
            return Err(PrimitiveError::ZeroEpochLength);
        }
        Ok(height > 0 && height % epoch_length == 0)
    }

    /// Epoch that follows this one
    pub fn next(&self) -> Self {
        Epoch(self.0.saturating_add(1))
    }

    /// First block height of this epoch
    pub fn first_block(&self, epoch_length: u64) -> BlockHeight {
        self.0.saturating_mul(epoch_length).saturating_add(1)
    }
}

impl fmt::Display for Epoch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "epoch #{}", self.0)
    }
}
