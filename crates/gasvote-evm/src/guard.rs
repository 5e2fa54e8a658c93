//! Per-instruction stack bounds checking and base gas charging

use crate::error::{EvmError, EvmResult};
use crate::gas::params::STACK_LIMIT;
use crate::opcode::Opcode;
use crate::stack::StackDepth;
use crate::table::OpcodeCostTable;
use gasvote_primitives::U256;
use tracing::trace;

/// Checks stack depth and charges base gas against one cost table snapshot.
///
/// Holds a borrowed snapshot, so an interpreter keeps using the table it
/// started a transaction with even if a retarget publishes a new one.
#[derive(Debug, Clone, Copy)]
pub struct StackGuard<'a> {
    table: &'a OpcodeCostTable,
    stack_limit: usize,
}

impl<'a> StackGuard<'a> {
    /// Guard with the protocol stack limit
    pub fn new(table: &'a OpcodeCostTable) -> Self {
        Self::with_stack_limit(table, STACK_LIMIT)
    }

    /// Guard with a custom stack limit
    pub fn with_stack_limit(table: &'a OpcodeCostTable, stack_limit: usize) -> Self {
        Self { table, stack_limit }
    }

    /// Table this guard checks against
    pub fn table(&self) -> &'a OpcodeCostTable {
        self.table
    }

    /// Stack limit this guard enforces
    pub fn stack_limit(&self) -> usize {
        self.stack_limit
    }

    /// Check and charge a raw instruction byte.
    ///
    /// Undefined bytes have no table entry and pass unchecked, like any other
    /// uncovered instruction.
    pub fn check_and_charge<S>(&self, byte: u8, stack: &S, gas: &mut U256) -> EvmResult<()>
    where
        S: StackDepth + ?Sized,
    {
        match Opcode::from_byte(byte) {
            Some(op) => self.check_opcode(op, stack, gas),
            None => {
                trace!("undefined opcode 0x{:02x} bypasses base check", byte);
                Ok(())
            }
        }
    }

    /// Check and charge a decoded instruction.
    ///
    /// Fails with `StackUnderflow` when the stack holds fewer items than the
    /// instruction pops, and with `StackOverflow` when an instruction that
    /// pushes would leave more than the stack limit. On success the base fee is
    /// added to `gas`; on failure `gas` is untouched. The stack is never
    /// modified.
    pub fn check_opcode<S>(&self, op: Opcode, stack: &S, gas: &mut U256) -> EvmResult<()>
    where
        S: StackDepth + ?Sized,
    {
        let Some(req) = self.table.lookup(op) else {
            trace!("{} has no cost table entry, bypassing base check", op);
            return Ok(());
        };

        let depth = stack.depth();
        let Some(remaining) = depth.checked_sub(req.stack_pop) else {
            return Err(EvmError::StackUnderflow {
                required: req.stack_pop,
                actual: depth,
            });
        };

        if req.stack_push > 0 {
            let attempted = remaining.saturating_add(req.stack_push);
            if attempted > self.stack_limit {
                return Err(EvmError::StackOverflow {
                    limit: self.stack_limit,
                    attempted,
                });
            }
        }

        *gas = gas.checked_add(req.base_gas).ok_or(EvmError::GasOverflow)?;
        Ok(())
    }
}

/// One-shot form of [`StackGuard::check_opcode`] with the protocol stack limit
pub fn base_check<S>(
    table: &OpcodeCostTable,
    op: Opcode,
    stack: &S,
    gas: &mut U256,
) -> EvmResult<()>
where
    S: StackDepth + ?Sized,
{
    StackGuard::new(table).check_opcode(op, stack, gas)
}
