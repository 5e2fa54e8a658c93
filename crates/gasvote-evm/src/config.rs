//! Protocol configuration

use crate::error::{EvmError, EvmResult};
use crate::gas::params::{EPOCH_LENGTH, STACK_LIMIT};
use crate::schedule::{GasClass, GasClassSchedule};
use serde::{Deserialize, Serialize};

/// Tunable protocol parameters for the gas subsystem
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Maximum operand stack depth
    #[serde(default = "default_stack_limit")]
    pub stack_limit: usize,
    /// Blocks per retarget epoch
    #[serde(default = "default_epoch_length")]
    pub epoch_length: u64,
    /// Genesis schedule override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub genesis: Option<GasClassSchedule>,
}

fn default_stack_limit() -> usize {
    STACK_LIMIT
}

fn default_epoch_length() -> u64 {
    EPOCH_LENGTH
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            stack_limit: default_stack_limit(),
            epoch_length: default_epoch_length(),
            genesis: None,
        }
    }
}

impl ProtocolConfig {
    /// Schedule in force at genesis
    pub fn genesis_schedule(&self) -> GasClassSchedule {
        self.genesis.clone().unwrap_or_else(GasClassSchedule::genesis)
    }

    /// Reject configurations the subsystem cannot run with
    pub fn validate(&self) -> EvmResult<()> {
        if self.stack_limit == 0 {
            return Err(EvmError::InvalidConfig("stack_limit must be non-zero".into()));
        }
        if self.epoch_length == 0 {
            return Err(EvmError::InvalidConfig("epoch_length must be non-zero".into()));
        }
        if let Some(genesis) = &self.genesis {
            let floor = GasClassSchedule::floor();
            if let Some(class) = GasClass::ALL
                .into_iter()
                .find(|c| genesis.get(*c) < floor.get(*c))
            {
                return Err(EvmError::InvalidConfig(format!(
                    "genesis {} = {} is below its floor {}",
                    class,
                    genesis.get(class),
                    floor.get(class)
                )));
            }
        }
        Ok(())
    }
}
