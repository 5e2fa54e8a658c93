//! The shared, atomically replaced cost table snapshot
//!
//! Readers call [`ActiveSchedule::snapshot`] once per transaction and keep the
//! returned `Arc` for its whole execution, so they never take the lock on the
//! per-instruction path and never observe a half-built table. An epoch
//! transition builds a complete new snapshot and swaps the reference.

use crate::config::ProtocolConfig;
use crate::error::{EvmError, EvmResult};
use crate::guard::StackGuard;
use crate::schedule::GasClassSchedule;
use crate::table::OpcodeCostTable;
use crate::voting;
use gasvote_primitives::{BlockHeight, Epoch};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info};

/// Cost table together with the epoch it is in force for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleSnapshot {
    epoch: Epoch,
    table: OpcodeCostTable,
}

impl ScheduleSnapshot {
    /// Epoch from which this snapshot applies
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Cost table of this snapshot
    pub fn table(&self) -> &OpcodeCostTable {
        &self.table
    }

    /// Schedule of this snapshot
    pub fn schedule(&self) -> &GasClassSchedule {
        self.table.schedule()
    }
}

/// A validated retarget that has not been published yet
#[derive(Debug, Clone)]
pub struct PreparedRetarget {
    base: Arc<ScheduleSnapshot>,
    next: ScheduleSnapshot,
}

impl PreparedRetarget {
    /// Snapshot that will be published
    pub fn next(&self) -> &ScheduleSnapshot {
        &self.next
    }

    /// Snapshot the retarget was validated against
    pub fn base(&self) -> &ScheduleSnapshot {
        &self.base
    }
}

/// Owner of the single shared cost table reference
pub struct ActiveSchedule {
    config: ProtocolConfig,
    current: RwLock<Arc<ScheduleSnapshot>>,
}

impl ActiveSchedule {
    /// Start from the configured genesis schedule
    pub fn new(config: ProtocolConfig) -> EvmResult<Self> {
        config.validate()?;
        let table = OpcodeCostTable::derive(&config.genesis_schedule());
        Ok(Self {
            config,
            current: RwLock::new(Arc::new(ScheduleSnapshot {
                epoch: Epoch::GENESIS,
                table,
            })),
        })
    }

    /// Protocol configuration in use
    pub fn config(&self) -> &ProtocolConfig {
        &self.config
    }

    /// Current snapshot
    pub fn snapshot(&self) -> Arc<ScheduleSnapshot> {
        Arc::clone(&self.current.read())
    }

    /// Guard over `snapshot`'s table with the configured stack limit
    pub fn guard<'a>(&self, snapshot: &'a ScheduleSnapshot) -> StackGuard<'a> {
        StackGuard::with_stack_limit(snapshot.table(), self.config.stack_limit)
    }

    /// Per-block check of a proposed schedule against the current snapshot
    pub fn check_vote(&self, proposed: &GasClassSchedule) -> EvmResult<()> {
        voting::validate(proposed, self.snapshot().schedule())
    }

    /// Validate and derive the snapshot for the epoch following `height`,
    /// without publishing it
    pub fn prepare(
        &self,
        height: BlockHeight,
        proposed: &GasClassSchedule,
    ) -> EvmResult<PreparedRetarget> {
        let epoch_length = self.config.epoch_length;
        if !Epoch::is_boundary(height, epoch_length)? {
            return Err(EvmError::NotEpochBoundary {
                height,
                epoch_length,
            });
        }
        let epoch = Epoch::containing(height, epoch_length)?.next();

        let base = self.snapshot();
        if epoch <= base.epoch {
            return Err(EvmError::StaleRetarget {
                epoch: epoch.index(),
            });
        }

        let table = voting::apply(proposed, base.table())?;
        debug!("prepared schedule for {} at block {}", epoch, height);
        Ok(PreparedRetarget {
            base,
            next: ScheduleSnapshot { epoch, table },
        })
    }

    /// Swap in a prepared snapshot.
    ///
    /// Fails if another snapshot was published since the retarget was prepared.
    pub fn publish(&self, prepared: PreparedRetarget) -> EvmResult<Arc<ScheduleSnapshot>> {
        let mut current = self.current.write();
        if !Arc::ptr_eq(&*current, &prepared.base) {
            return Err(EvmError::StaleRetarget {
                epoch: prepared.next.epoch.index(),
            });
        }
        let changed = prepared.next.schedule().diff(prepared.base.schedule());
        let next = Arc::new(prepared.next);
        *current = Arc::clone(&next);
        drop(current);

        info!(
            "gas schedule retargeted: {} -> {}, {} classes changed",
            prepared.base.epoch,
            next.epoch,
            changed.len()
        );
        for (class, new, old) in changed {
            debug!("{}: {} -> {}", class, old, new);
        }
        Ok(next)
    }

    /// Validate, derive and publish a proposed schedule at an epoch boundary
    pub fn retarget(
        &self,
        height: BlockHeight,
        proposed: &GasClassSchedule,
    ) -> EvmResult<Arc<ScheduleSnapshot>> {
        let prepared = self.prepare(height, proposed)?;
        self.publish(prepared)
    }
}

impl Default for ActiveSchedule {
    fn default() -> Self {
        Self {
            config: ProtocolConfig::default(),
            current: RwLock::new(Arc::new(ScheduleSnapshot {
                epoch: Epoch::GENESIS,
                table: OpcodeCostTable::genesis(),
            })),
        }
    }
}
