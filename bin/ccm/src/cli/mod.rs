pub mod constants;
pub mod fork_id;
pub mod schedule;
pub mod validate;
pub mod verbosity;

use clap::{Parser, Subcommand};

use crate::cli::{fork_id::ForkIdConfig, schedule::ScheduleConfig, validate::ValidateConfig};

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Print the fork id announced at a given height
    #[command(name = "fork-id")]
    ForkId(ForkIdConfig),

    /// Print the fork schedule and every checksum along it
    #[command(name = "schedule")]
    Schedule(ScheduleConfig),

    /// Check a remote RLP encoded fork id against the local chain
    #[command(name = "validate")]
    Validate(ValidateConfig),
}
