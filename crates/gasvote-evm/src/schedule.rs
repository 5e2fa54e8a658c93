//! Voteable gas classes and schedules
//!
//! A [`GasClassSchedule`] holds one base fee per [`GasClass`]. The compiled-in
//! [`GasClassSchedule::floor`] is the protocol minimum for every class and is
//! also the genesis schedule.

use gasvote_primitives::{serde_u256, U256};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Named group of instructions sharing one voteable base fee
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GasClass {
    /// Environment and context reads
    QuickStep,
    /// Cheap arithmetic, comparison, bitwise and memory-local ops
    FastestStep,
    /// Multiplication, division and modulo
    FastStep,
    /// Modular arithmetic and JUMP
    MidStep,
    /// JUMPI and EXP
    SlowStep,
    /// BLOCKHASH
    ExtStep,
    /// SLOAD
    Sload,
    /// SSTORE
    Sstore,
    /// SHA3
    Sha3,
    /// CREATE
    Create,
    /// CALL, CALLCODE and DELEGATECALL
    Call,
    /// JUMPDEST
    Jumpdest,
    /// SUICIDE
    Suicide,
    /// BALANCE
    Balance,
    /// EXTCODESIZE
    Extcodesize,
    /// EXTCODECOPY
    Extcodecopy,
}

impl GasClass {
    /// Every class, in schedule order
    pub const ALL: [GasClass; 16] = [
        GasClass::QuickStep,
        GasClass::FastestStep,
        GasClass::FastStep,
        GasClass::MidStep,
        GasClass::SlowStep,
        GasClass::ExtStep,
        GasClass::Sload,
        GasClass::Sstore,
        GasClass::Sha3,
        GasClass::Create,
        GasClass::Call,
        GasClass::Jumpdest,
        GasClass::Suicide,
        GasClass::Balance,
        GasClass::Extcodesize,
        GasClass::Extcodecopy,
    ];

    /// Snake-case name used in config files and diagnostics
    pub fn name(self) -> &'static str {
        match self {
            GasClass::QuickStep => "quick_step",
            GasClass::FastestStep => "fastest_step",
            GasClass::FastStep => "fast_step",
            GasClass::MidStep => "mid_step",
            GasClass::SlowStep => "slow_step",
            GasClass::ExtStep => "ext_step",
            GasClass::Sload => "sload",
            GasClass::Sstore => "sstore",
            GasClass::Sha3 => "sha3",
            GasClass::Create => "create",
            GasClass::Call => "call",
            GasClass::Jumpdest => "jumpdest",
            GasClass::Suicide => "suicide",
            GasClass::Balance => "balance",
            GasClass::Extcodesize => "extcodesize",
            GasClass::Extcodecopy => "extcodecopy",
        }
    }

    /// Look up a class by its snake-case name
    pub fn from_name(name: &str) -> Option<Self> {
        GasClass::ALL.into_iter().find(|c| c.name() == name)
    }
}

impl fmt::Display for GasClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// One base fee per gas class.
///
/// Always complete: a schedule cannot be built with a class missing, so a
/// vote either replaces every class or none.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GasClassSchedule {
    /// Environment and context reads
    #[serde(with = "serde_u256")]
    pub quick_step: U256,
    /// Cheap arithmetic, comparison, bitwise and memory-local ops
    #[serde(with = "serde_u256")]
    pub fastest_step: U256,
    /// Multiplication, division and modulo
    #[serde(with = "serde_u256")]
    pub fast_step: U256,
    /// Modular arithmetic and JUMP
    #[serde(with = "serde_u256")]
    pub mid_step: U256,
    /// JUMPI and EXP
    #[serde(with = "serde_u256")]
    pub slow_step: U256,
    /// BLOCKHASH
    #[serde(with = "serde_u256")]
    pub ext_step: U256,
    /// SLOAD
    #[serde(with = "serde_u256")]
    pub sload: U256,
    /// SSTORE
    #[serde(with = "serde_u256")]
    pub sstore: U256,
    /// SHA3
    #[serde(with = "serde_u256")]
    pub sha3: U256,
    /// CREATE
    #[serde(with = "serde_u256")]
    pub create: U256,
    /// CALL, CALLCODE and DELEGATECALL
    #[serde(with = "serde_u256")]
    pub call: U256,
    /// JUMPDEST
    #[serde(with = "serde_u256")]
    pub jumpdest: U256,
    /// SUICIDE
    #[serde(with = "serde_u256")]
    pub suicide: U256,
    /// BALANCE
    #[serde(with = "serde_u256")]
    pub balance: U256,
    /// EXTCODESIZE
    #[serde(with = "serde_u256")]
    pub extcodesize: U256,
    /// EXTCODECOPY
    #[serde(with = "serde_u256")]
    pub extcodecopy: U256,
}

impl GasClassSchedule {
    /// Protocol minimum for every class. Never changes.
    pub fn floor() -> Self {
        Self {
            quick_step: U256::from(2u64),
            fastest_step: U256::from(3u64),
            fast_step: U256::from(5u64),
            mid_step: U256::from(8u64),
            slow_step: U256::from(10u64),
            ext_step: U256::from(20u64),
            sload: U256::from(500u64),
            sstore: U256::from(500u64),
            sha3: U256::from(30u64),
            create: U256::from(500u64),
            call: U256::from(500u64),
            jumpdest: U256::from(10u64),
            suicide: U256::from(0u64),
            balance: U256::from(20u64),
            extcodesize: U256::from(20u64),
            extcodecopy: U256::from(20u64),
        }
    }

    /// Schedule in force from the genesis block
    pub fn genesis() -> Self {
        Self::floor()
    }

    /// Schedule with every class set to `value`
    pub fn uniform(value: U256) -> Self {
        let mut schedule = Self::floor();
        for class in GasClass::ALL {
            schedule.set(class, value);
        }
        schedule
    }

    /// Fee of one class
    pub fn get(&self, class: GasClass) -> U256 {
        match class {
            GasClass::QuickStep => self.quick_step,
            GasClass::FastestStep => self.fastest_step,
            GasClass::FastStep => self.fast_step,
            GasClass::MidStep => self.mid_step,
            GasClass::SlowStep => self.slow_step,
            GasClass::ExtStep => self.ext_step,
            GasClass::Sload => self.sload,
            GasClass::Sstore => self.sstore,
            GasClass::Sha3 => self.sha3,
            GasClass::Create => self.create,
            GasClass::Call => self.call,
            GasClass::Jumpdest => self.jumpdest,
            GasClass::Suicide => self.suicide,
            GasClass::Balance => self.balance,
            GasClass::Extcodesize => self.extcodesize,
            GasClass::Extcodecopy => self.extcodecopy,
        }
    }

    /// Set the fee of one class
    pub fn set(&mut self, class: GasClass, value: U256) {
        let slot = match class {
            GasClass::QuickStep => &mut self.quick_step,
            GasClass::FastestStep => &mut self.fastest_step,
            GasClass::FastStep => &mut self.fast_step,
            GasClass::MidStep => &mut self.mid_step,
            GasClass::SlowStep => &mut self.slow_step,
            GasClass::ExtStep => &mut self.ext_step,
            GasClass::Sload => &mut self.sload,
            GasClass::Sstore => &mut self.sstore,
            GasClass::Sha3 => &mut self.sha3,
            GasClass::Create => &mut self.create,
            GasClass::Call => &mut self.call,
            GasClass::Jumpdest => &mut self.jumpdest,
            GasClass::Suicide => &mut self.suicide,
            GasClass::Balance => &mut self.balance,
            GasClass::Extcodesize => &mut self.extcodesize,
            GasClass::Extcodecopy => &mut self.extcodecopy,
        };
        *slot = value;
    }

    /// Builder form of [`set`](Self::set)
    pub fn with(mut self, class: GasClass, value: U256) -> Self {
        self.set(class, value);
        self
    }

    /// Iterate `(class, fee)` pairs in schedule order
    pub fn iter(&self) -> impl Iterator<Item = (GasClass, U256)> + '_ {
        GasClass::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Classes whose fee differs from `other`, as `(class, ours, theirs)`
    pub fn diff(&self, other: &GasClassSchedule) -> Vec<(GasClass, U256, U256)> {
        self.iter()
            .filter_map(|(class, ours)| {
                let theirs = other.get(class);
                (ours != theirs).then_some((class, ours, theirs))
            })
            .collect()
    }
}

impl Default for GasClassSchedule {
    fn default() -> Self {
        Self::genesis()
    }
}
