//! # gasvote
//!
//! Command-line tool for inspecting gas schedules and dry-running votes.
//!
//! ## Usage
//!
//! ```bash
//! # Cost table
//! gasvote table
//! gasvote table --schedule proposed.toml
//!
//! # Votes
//! gasvote vote check --proposed proposed.toml
//! gasvote vote bounds --active active.json
//! gasvote vote apply --proposed proposed.toml --height 64
//!
//! # Helpers
//! gasvote words 33
//! gasvote check ADD --depth 2
//! ```

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod commands;
mod config;
mod error;
mod output;

pub use config::Config;
pub use error::CliError;
pub use output::Output;

/// Gas schedule voting CLI
#[derive(Parser, Debug)]
#[command(name = "gasvote")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output in JSON format
    #[arg(long, global = true)]
    json: bool,

    /// Config file, defaults to ~/.gasvote/config.toml
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

/// CLI commands
#[derive(Debug, Subcommand)]
enum Commands {
    /// Print the opcode cost table
    Table {
        /// Schedule file (.json or .toml), defaults to genesis
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
    /// Check, bound or apply schedule votes
    #[command(subcommand)]
    Vote(commands::vote::VoteCommand),
    /// Convert a byte length to 32-byte words
    Words {
        /// Byte length, decimal or 0x-prefixed hex
        bytes: String,
    },
    /// Run the stack guard for one instruction
    Check {
        /// Mnemonic (ADD) or byte (0x01)
        opcode: String,
        /// Stack depth before the instruction
        #[arg(long, default_value_t = 0)]
        depth: usize,
        /// Gas used before the instruction
        #[arg(long, default_value = "0")]
        gas: String,
        /// Schedule file (.json or .toml), defaults to genesis
        #[arg(long)]
        schedule: Option<PathBuf>,
    },
    /// Show the effective configuration
    Config,
}

fn main() {
    let cli = Cli::parse();

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let result = run(cli.command, cli.config.as_deref(), cli.json);

    if let Err(e) = result {
        if cli.json {
            println!(
                "{}",
                serde_json::json!({
                    "error": e.to_string(),
                    "success": false
                })
            );
        } else {
            eprintln!("Error: {}", e);
        }
        std::process::exit(1);
    }
}

fn run(command: Commands, config: Option<&std::path::Path>, json: bool) -> Result<(), CliError> {
    let config = Config::load(config)?;
    tracing::debug!(
        "stack limit {}, epoch length {}",
        config.protocol.stack_limit,
        config.protocol.epoch_length
    );

    match command {
        Commands::Table { schedule } => commands::table::execute(&config, schedule, json),
        Commands::Vote(cmd) => cmd.execute(&config, json),
        Commands::Words { bytes } => commands::words::execute(&bytes, json),
        Commands::Check {
            opcode,
            depth,
            gas,
            schedule,
        } => commands::check::execute(&config, &opcode, depth, &gas, schedule, json),
        Commands::Config => show_config(&config, json),
    }
}

fn show_config(config: &Config, json: bool) -> Result<(), CliError> {
    let genesis = config.protocol.genesis_schedule();
    Output::new(json)
        .field_u64("stack_limit", config.protocol.stack_limit as u64)
        .field_u64("epoch_length", config.protocol.epoch_length)
        .field_value("genesis", serde_json::to_value(&genesis)?)
        .message(&format!(
            "Stack limit: {}\nEpoch length: {}\nGenesis: {}",
            config.protocol.stack_limit,
            config.protocol.epoch_length,
            if config.protocol.genesis.is_some() {
                "custom"
            } else {
                "class floors"
            }
        ))
        .print();
    Ok(())
}
