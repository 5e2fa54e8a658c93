//! Single-instruction stack guard dry-run

use crate::{config::Config, output::Output, CliError};
use gasvote_evm::{Opcode, OpcodeCostTable, StackGuard};
use gasvote_primitives::parse_u256;
use std::path::PathBuf;

/// Run the stack guard for one instruction on a stack of `depth` items
pub fn execute(
    config: &Config,
    opcode: &str,
    depth: usize,
    gas: &str,
    schedule: Option<PathBuf>,
    json: bool,
) -> Result<(), CliError> {
    let byte = super::parse_opcode(opcode)?;
    let schedule = match schedule {
        Some(path) => super::load_schedule(&path)?,
        None => config.protocol.genesis_schedule(),
    };
    let table = OpcodeCostTable::derive(&schedule);
    let guard = StackGuard::with_stack_limit(&table, config.protocol.stack_limit);

    let name = Opcode::from_byte(byte)
        .map(|op| op.to_string())
        .unwrap_or_else(|| format!("0x{:02x}", byte));
    let requirement = Opcode::from_byte(byte).and_then(|op| table.lookup(op).copied());

    let before = parse_u256(gas)?;
    let mut after = before;
    guard.check_and_charge(byte, &depth, &mut after)?;
    let charged = after - before;

    let out = Output::new(json)
        .field("opcode", &name)
        .field_bool("covered", requirement.is_some())
        .field_u256("charged", charged)
        .field_u256("gas", after);

    match requirement {
        Some(req) => {
            let result_depth = depth - req.stack_pop + req.stack_push;
            out.field_u64("depth_before", depth as u64)
                .field_u64("depth_after", result_depth as u64)
                .message(&format!(
                    "{}: ok, charged {} (gas {}), depth {} -> {}",
                    name, charged, after, depth, result_depth
                ))
                .print();
        }
        None => {
            out.message(&format!("{}: not in cost table, no check and no charge", name))
                .print();
        }
    }
    Ok(())
}
