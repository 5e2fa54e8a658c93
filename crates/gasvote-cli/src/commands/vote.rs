//! Schedule vote commands

use clap::Subcommand;
use gasvote_evm::{voting, ActiveSchedule, GasClass, GasClassSchedule, ProtocolConfig};
use gasvote_primitives::BlockHeight;
use serde_json::json;
use std::path::{Path, PathBuf};

use crate::{config::Config, output::Output, CliError};

/// Vote subcommands
#[derive(Debug, Subcommand)]
pub enum VoteCommand {
    /// Check a proposed schedule against the active one
    Check {
        /// Proposed schedule (.json or .toml)
        #[arg(long)]
        proposed: PathBuf,
        /// Active schedule, defaults to genesis
        #[arg(long)]
        active: Option<PathBuf>,
    },
    /// Show the allowed range of every class for the next epoch
    Bounds {
        /// Active schedule, defaults to genesis
        #[arg(long)]
        active: Option<PathBuf>,
    },
    /// Apply a proposed schedule at an epoch boundary
    Apply {
        /// Proposed schedule (.json or .toml)
        #[arg(long)]
        proposed: PathBuf,
        /// Active schedule, defaults to genesis
        #[arg(long)]
        active: Option<PathBuf>,
        /// Block height of the retarget
        #[arg(long)]
        height: BlockHeight,
    },
}

impl VoteCommand {
    pub fn execute(self, config: &Config, json: bool) -> Result<(), CliError> {
        match self {
            VoteCommand::Check { proposed, active } => {
                vote_check(config, &proposed, active.as_deref(), json)
            }
            VoteCommand::Bounds { active } => vote_bounds(config, active.as_deref(), json),
            VoteCommand::Apply {
                proposed,
                active,
                height,
            } => vote_apply(config, &proposed, active.as_deref(), height, json),
        }
    }
}

/// Active schedule from `path` or the configured genesis.
///
/// Voting can never produce a schedule below the class floors, so such a
/// file is rejected before any subcommand uses it.
fn active_schedule(config: &Config, path: Option<&Path>) -> Result<GasClassSchedule, CliError> {
    let Some(path) = path else {
        return Ok(config.protocol.genesis_schedule());
    };
    let active = super::load_schedule(path)?;
    let floor = GasClassSchedule::floor();
    if let Some(class) = GasClass::ALL
        .into_iter()
        .find(|c| active.get(*c) < floor.get(*c))
    {
        return Err(CliError::InvalidInput(format!(
            "active schedule {}: {} = {} is below its floor {}",
            path.display(),
            class,
            active.get(class),
            floor.get(class)
        )));
    }
    Ok(active)
}

fn vote_check(
    config: &Config,
    proposed: &Path,
    active: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let proposed = super::load_schedule(proposed)?;
    let active = active_schedule(config, active)?;

    voting::validate(&proposed, &active)?;

    let changed = proposed.diff(&active);
    Output::new(json)
        .field_bool("valid", true)
        .field_u64("changed", changed.len() as u64)
        .message(&format!("vote is valid, {} classes changed", changed.len()))
        .print();
    Ok(())
}

fn vote_bounds(config: &Config, active: Option<&Path>, json: bool) -> Result<(), CliError> {
    let active = active_schedule(config, active)?;

    let mut rows = Vec::with_capacity(GasClass::ALL.len());
    let mut text = format!("{:<16} {:>10} {:>10} {:>10}\n", "CLASS", "MIN", "ACTIVE", "MAX");
    for class in GasClass::ALL {
        let (lower, bound) = voting::lower_bound(class, &active);
        let upper = voting::upper_bound(class, &active);
        rows.push(json!({
            "class": class.name(),
            "min": lower.to_string(),
            "min_bound": bound.to_string(),
            "active": active.get(class).to_string(),
            "max": upper.to_string(),
        }));
        text.push_str(&format!(
            "{:<16} {:>10} {:>10} {:>10}\n",
            class.name(),
            lower,
            active.get(class),
            upper
        ));
    }

    Output::new(json)
        .field_value("bounds", json!(rows))
        .message(text.trim_end())
        .print();
    Ok(())
}

fn vote_apply(
    config: &Config,
    proposed: &Path,
    active: Option<&Path>,
    height: BlockHeight,
    json: bool,
) -> Result<(), CliError> {
    let proposed = super::load_schedule(proposed)?;
    let active = active_schedule(config, active)?;

    let schedule = ActiveSchedule::new(ProtocolConfig {
        genesis: Some(active),
        ..config.protocol.clone()
    })?;
    let previous = schedule.snapshot();
    let next = schedule.retarget(height, &proposed)?;

    let changed = next.schedule().diff(previous.schedule());
    let changes: Vec<_> = changed
        .iter()
        .map(|(class, new, old)| {
            json!({
                "class": class.name(),
                "old": old.to_string(),
                "new": new.to_string(),
            })
        })
        .collect();

    let mut text = format!(
        "{} active from block {}",
        next.epoch(),
        next.epoch().first_block(config.protocol.epoch_length)
    );
    for (class, new, old) in &changed {
        text.push_str(&format!("\n  {}: {} -> {}", class, old, new));
    }

    Output::new(json)
        .field_u64("epoch", next.epoch().index())
        .field_u64("height", height)
        .field_value("changes", json!(changes))
        .field_value("schedule", serde_json::to_value(next.schedule())?)
        .message(&text)
        .print();
    Ok(())
}
