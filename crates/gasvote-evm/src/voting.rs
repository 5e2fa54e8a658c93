//! Bounded gas schedule retargeting
//!
//! Each epoch a proposed schedule may move every class by at most a factor of
//! two relative to the active schedule, and never below the class floor. This
//! keeps fees from collapsing toward zero (free unbounded loops) or spiking
//! in a single epoch.

use crate::error::{EvmError, EvmResult, VoteBound};
use crate::schedule::{GasClass, GasClassSchedule};
use crate::table::OpcodeCostTable;
use gasvote_primitives::U256;
use tracing::{debug, warn};

/// Lowest value `class` may take next epoch.
///
/// Reports the floor when it is the binding bound, otherwise half of the
/// active value (truncating).
pub fn lower_bound(class: GasClass, active: &GasClassSchedule) -> (U256, VoteBound) {
    let floor = GasClassSchedule::floor().get(class);
    let half = active.get(class) / U256::from(2u64);
    if half > floor {
        (half, VoteBound::HalfOfActive)
    } else {
        (floor, VoteBound::Floor)
    }
}

/// Highest value `class` may take next epoch
pub fn upper_bound(class: GasClass, active: &GasClassSchedule) -> U256 {
    // Saturates only for active values above 2^255, where no proposal can exceed it anyway
    active
        .get(class)
        .checked_mul(U256::from(2u64))
        .unwrap_or(U256::MAX)
}

/// Check one class of a proposal against the floor and the active value
fn check_class(
    class: GasClass,
    proposed: &GasClassSchedule,
    active: &GasClassSchedule,
    floor: &GasClassSchedule,
) -> EvmResult<()> {
    let value = proposed.get(class);

    let min = floor.get(class);
    if value < min {
        return Err(EvmError::GasVoteTooLow {
            class,
            value,
            bound: min,
            kind: VoteBound::Floor,
        });
    }

    let half = active.get(class) / U256::from(2u64);
    if value < half {
        return Err(EvmError::GasVoteTooLow {
            class,
            value,
            bound: half,
            kind: VoteBound::HalfOfActive,
        });
    }

    let max = upper_bound(class, active);
    if value > max {
        return Err(EvmError::GasVoteTooHigh {
            class,
            value,
            bound: max,
        });
    }

    Ok(())
}

/// Validate a proposed schedule against the active one.
///
/// Classes are checked in schedule order and the first violation is
/// returned. Bounds are inclusive: with an active value of 10 both 5 and 20
/// are accepted.
pub fn validate(proposed: &GasClassSchedule, active: &GasClassSchedule) -> EvmResult<()> {
    let floor = GasClassSchedule::floor();
    for class in GasClass::ALL {
        if let Err(err) = check_class(class, proposed, active, &floor) {
            warn!("rejected gas vote: {}", err);
            return Err(err);
        }
    }
    debug!("gas vote within bounds");
    Ok(())
}

/// Validate `proposed` against the schedule of `active` and derive its table.
///
/// On error nothing is produced and `active` is untouched.
pub fn apply(proposed: &GasClassSchedule, active: &OpcodeCostTable) -> EvmResult<OpcodeCostTable> {
    validate(proposed, active.schedule())?;
    let table = OpcodeCostTable::derive(proposed);
    debug!(
        "derived cost table, {} classes changed",
        proposed.diff(active.schedule()).len()
    );
    Ok(table)
}
