//! # gasvote-evm
//!
//! Stack safety and base gas accounting for a stack-based bytecode VM, with
//! epoch-bounded retargeting of the per-class fee schedule.
//!
//! This crate provides:
//! - Opcode stack shapes and the opcode to gas class mapping
//! - The per-instruction stack guard that checks depth and charges base gas
//! - Schedule voting: bounds checking of proposed schedules
//! - An atomically replaced cost table snapshot for concurrent readers
//! - Word-size arithmetic for memory costing
//!
//! ```
//! use gasvote_evm::{OpcodeCostTable, Opcode, StackGuard, Stack, U256};
//!
//! let table = OpcodeCostTable::genesis();
//! let guard = StackGuard::new(&table);
//! let mut gas = U256::zero();
//! guard.check_opcode(Opcode::ADD, &Stack::with_depth(2), &mut gas).unwrap();
//! assert_eq!(gas, U256::from(3u64));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod active;
pub mod config;
pub mod error;
pub mod gas;
pub mod guard;
pub mod opcode;
pub mod schedule;
pub mod stack;
pub mod table;
pub mod voting;

pub use active::{ActiveSchedule, PreparedRetarget, ScheduleSnapshot};
pub use config::ProtocolConfig;
pub use error::{EvmError, EvmResult, VoteBound};
pub use gas::{code_deposit_gas, params, word_size};
pub use guard::{base_check, StackGuard};
pub use opcode::Opcode;
pub use schedule::{GasClass, GasClassSchedule};
pub use stack::{Stack, StackDepth};
pub use table::{CostSource, OpcodeCostTable, OpcodeRequirement};

pub use gasvote_primitives::{BlockHeight, Epoch, U256};
