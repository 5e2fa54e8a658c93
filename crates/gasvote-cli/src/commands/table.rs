//! Cost table display

use crate::{config::Config, output::Output, CliError};
use gasvote_evm::OpcodeCostTable;
use serde_json::json;
use std::path::PathBuf;

/// Print the cost table for the genesis schedule or a schedule file
pub fn execute(config: &Config, schedule: Option<PathBuf>, json: bool) -> Result<(), CliError> {
    let schedule = match schedule {
        Some(path) => super::load_schedule(&path)?,
        None => config.protocol.genesis_schedule(),
    };
    let table = OpcodeCostTable::derive(&schedule);

    let rows: Vec<_> = table
        .iter()
        .map(|(op, req)| {
            json!({
                "opcode": op.to_string(),
                "byte": format!("0x{:02x}", op.as_byte()),
                "stack_pop": req.stack_pop,
                "stack_push": req.stack_push,
                "base_gas": req.base_gas.to_string(),
            })
        })
        .collect();

    let mut text = format!("{:<6} {:<14} {:>4} {:>5} {:>10}\n", "BYTE", "OPCODE", "POP", "PUSH", "GAS");
    for (op, req) in table.iter() {
        text.push_str(&format!(
            "0x{:02x}   {:<14} {:>4} {:>5} {:>10}\n",
            op.as_byte(),
            op.to_string(),
            req.stack_pop,
            req.stack_push,
            req.base_gas
        ));
    }
    text.push_str(&format!("{} opcodes", table.len()));

    Output::new(json)
        .field_value("schedule", serde_json::to_value(&schedule)?)
        .field_value("opcodes", json!(rows))
        .message(&text)
        .print();
    Ok(())
}
