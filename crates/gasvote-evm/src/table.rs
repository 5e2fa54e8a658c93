//! Opcode stack shapes, class mapping and the derived cost table

use crate::opcode::Opcode;
use crate::schedule::{GasClass, GasClassSchedule};
use gasvote_primitives::U256;

/// Where an instruction's base fee comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostSource {
    /// Voteable class fee
    Class(GasClass),
    /// Fixed fee, never voted
    Fixed(u64),
}

use CostSource::{Class, Fixed};

/// Protocol-fixed rows: opcode | stack pop | cost source | stack push.
///
/// Families appear once, under their canonical representative. CALLDATACOPY
/// keeps its historical push count of 1; it only affects the overflow check.
const OPCODE_ROWS: &[(Opcode, usize, CostSource, usize)] = &[
    (Opcode::ADD, 2, Class(GasClass::FastestStep), 1),
    (Opcode::LT, 2, Class(GasClass::FastestStep), 1),
    (Opcode::GT, 2, Class(GasClass::FastestStep), 1),
    (Opcode::SLT, 2, Class(GasClass::FastestStep), 1),
    (Opcode::SGT, 2, Class(GasClass::FastestStep), 1),
    (Opcode::EQ, 2, Class(GasClass::FastestStep), 1),
    (Opcode::ISZERO, 1, Class(GasClass::FastestStep), 1),
    (Opcode::SUB, 2, Class(GasClass::FastestStep), 1),
    (Opcode::AND, 2, Class(GasClass::FastestStep), 1),
    (Opcode::OR, 2, Class(GasClass::FastestStep), 1),
    (Opcode::XOR, 2, Class(GasClass::FastestStep), 1),
    (Opcode::NOT, 1, Class(GasClass::FastestStep), 1),
    (Opcode::BYTE, 2, Class(GasClass::FastestStep), 1),
    (Opcode::CALLDATALOAD, 1, Class(GasClass::FastestStep), 1),
    (Opcode::CALLDATACOPY, 3, Class(GasClass::FastestStep), 1),
    (Opcode::MLOAD, 1, Class(GasClass::FastestStep), 1),
    (Opcode::MSTORE, 2, Class(GasClass::FastestStep), 0),
    (Opcode::MSTORE8, 2, Class(GasClass::FastestStep), 0),
    (Opcode::CODECOPY, 3, Class(GasClass::FastestStep), 0),
    (Opcode::PUSH1, 0, Class(GasClass::FastestStep), 1),
    (Opcode::MUL, 2, Class(GasClass::FastStep), 1),
    (Opcode::DIV, 2, Class(GasClass::FastStep), 1),
    (Opcode::SDIV, 2, Class(GasClass::FastStep), 1),
    (Opcode::MOD, 2, Class(GasClass::FastStep), 1),
    (Opcode::SMOD, 2, Class(GasClass::FastStep), 1),
    (Opcode::SIGNEXTEND, 2, Class(GasClass::FastStep), 1),
    (Opcode::ADDMOD, 3, Class(GasClass::MidStep), 1),
    (Opcode::MULMOD, 3, Class(GasClass::MidStep), 1),
    (Opcode::JUMP, 1, Class(GasClass::MidStep), 0),
    (Opcode::JUMPI, 2, Class(GasClass::SlowStep), 0),
    (Opcode::EXP, 2, Class(GasClass::SlowStep), 1),
    (Opcode::ADDRESS, 0, Class(GasClass::QuickStep), 1),
    (Opcode::ORIGIN, 0, Class(GasClass::QuickStep), 1),
    (Opcode::CALLER, 0, Class(GasClass::QuickStep), 1),
    (Opcode::CALLVALUE, 0, Class(GasClass::QuickStep), 1),
    (Opcode::CODESIZE, 0, Class(GasClass::QuickStep), 1),
    (Opcode::GASPRICE, 0, Class(GasClass::QuickStep), 1),
    (Opcode::COINBASE, 0, Class(GasClass::QuickStep), 1),
    (Opcode::TIMESTAMP, 0, Class(GasClass::QuickStep), 1),
    (Opcode::NUMBER, 0, Class(GasClass::QuickStep), 1),
    (Opcode::CALLDATASIZE, 0, Class(GasClass::QuickStep), 1),
    (Opcode::DIFFICULTY, 0, Class(GasClass::QuickStep), 1),
    (Opcode::GASLIMIT, 0, Class(GasClass::QuickStep), 1),
    (Opcode::POP, 1, Class(GasClass::QuickStep), 0),
    (Opcode::PC, 0, Class(GasClass::QuickStep), 1),
    (Opcode::MSIZE, 0, Class(GasClass::QuickStep), 1),
    (Opcode::GAS, 0, Class(GasClass::QuickStep), 1),
    (Opcode::BLOCKHASH, 1, Class(GasClass::ExtStep), 1),
    (Opcode::BALANCE, 1, Class(GasClass::Balance), 1),
    (Opcode::EXTCODESIZE, 1, Class(GasClass::Extcodesize), 1),
    (Opcode::EXTCODECOPY, 4, Class(GasClass::Extcodecopy), 0),
    (Opcode::SLOAD, 1, Class(GasClass::Sload), 1),
    (Opcode::SSTORE, 2, Class(GasClass::Sstore), 0),
    (Opcode::SHA3, 2, Class(GasClass::Sha3), 1),
    (Opcode::CREATE, 3, Class(GasClass::Create), 1),
    (Opcode::CALL, 7, Class(GasClass::Call), 1),
    (Opcode::CALLCODE, 7, Class(GasClass::Call), 1),
    (Opcode::DELEGATECALL, 6, Class(GasClass::Call), 1),
    (Opcode::JUMPDEST, 0, Class(GasClass::Jumpdest), 0),
    (Opcode::SUICIDE, 1, Class(GasClass::Suicide), 0),
    (Opcode::RETURN, 2, Fixed(0), 0),
    (Opcode::DUP1, 0, Fixed(0), 1),
];

fn row(op: Opcode) -> Option<&'static (Opcode, usize, CostSource, usize)> {
    OPCODE_ROWS.iter().find(|(o, ..)| *o == op)
}

/// Stack shape `(pop, push)` of a canonical opcode, if it is covered
pub fn shape(op: Opcode) -> Option<(usize, usize)> {
    row(op).map(|&(_, pop, _, push)| (pop, push))
}

/// Cost source of a canonical opcode, if it is covered
pub fn cost_source(op: Opcode) -> Option<CostSource> {
    row(op).map(|&(_, _, source, _)| source)
}

/// Opcodes that belong to `class`
pub fn opcodes_in(class: GasClass) -> impl Iterator<Item = Opcode> {
    OPCODE_ROWS
        .iter()
        .filter(move |(_, _, source, _)| *source == Class(class))
        .map(|(op, ..)| *op)
}

/// Stack and gas requirement of one canonical instruction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OpcodeRequirement {
    /// Items the instruction needs on the stack
    pub stack_pop: usize,
    /// Base fee charged before execution
    pub base_gas: U256,
    /// Items the instruction leaves on the stack
    pub stack_push: usize,
}

/// Immutable per-opcode requirement table derived from one schedule.
///
/// Never mutated after construction; a new schedule produces a new table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpcodeCostTable {
    schedule: GasClassSchedule,
    entries: Box<[Option<OpcodeRequirement>; 256]>,
}

impl OpcodeCostTable {
    /// Derive the table for `schedule`.
    ///
    /// Performs no bounds checking; votes go through
    /// [`voting::apply`](crate::voting::apply).
    pub fn derive(schedule: &GasClassSchedule) -> Self {
        let mut entries = Box::new([None; 256]);
        for &(op, stack_pop, source, stack_push) in OPCODE_ROWS {
            let base_gas = match source {
                Class(class) => schedule.get(class),
                Fixed(gas) => U256::from(gas),
            };
            entries[op as usize] = Some(OpcodeRequirement {
                stack_pop,
                base_gas,
                stack_push,
            });
        }
        Self {
            schedule: schedule.clone(),
            entries,
        }
    }

    /// Table for the genesis schedule
    pub fn genesis() -> Self {
        Self::derive(&GasClassSchedule::genesis())
    }

    /// Schedule this table was derived from
    pub fn schedule(&self) -> &GasClassSchedule {
        &self.schedule
    }

    /// Requirement of an already-canonical opcode
    pub fn get(&self, op: Opcode) -> Option<&OpcodeRequirement> {
        self.entries[op as usize].as_ref()
    }

    /// Requirement of any opcode, after family normalization
    pub fn lookup(&self, op: Opcode) -> Option<&OpcodeRequirement> {
        self.get(op.canonical())
    }

    /// Whether the guard checks and charges `op`
    pub fn covers(&self, op: Opcode) -> bool {
        self.lookup(op).is_some()
    }

    /// Covered canonical opcodes and their requirements, in byte order
    pub fn iter(&self) -> impl Iterator<Item = (Opcode, &OpcodeRequirement)> + '_ {
        self.entries.iter().enumerate().filter_map(|(byte, entry)| {
            let req = entry.as_ref()?;
            Opcode::from_byte(byte as u8).map(|op| (op, req))
        })
    }

    /// Number of covered canonical opcodes
    pub fn len(&self) -> usize {
        self.entries.iter().filter(|e| e.is_some()).count()
    }

    /// Whether the table covers nothing
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for OpcodeCostTable {
    fn default() -> Self {
        Self::genesis()
    }
}
