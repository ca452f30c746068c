use std::process;

use alloy_primitives::hex;
use anyhow::ensure;
use ccm::cli::{
    Cli, Commands, fork_id::ForkIdConfig, schedule::ScheduleConfig, validate::ValidateConfig,
    verbosity::Verbosity,
};
use ccm_fork_id::{ForkFilter, ForkHistory};
use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn setup_logging(verbosity: Verbosity) {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(verbosity.directive()));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::ForkId(config) => {
            setup_logging(config.verbosity);
            run_fork_id(config)
        }
        Commands::Schedule(config) => {
            setup_logging(config.verbosity);
            run_schedule(config)
        }
        Commands::Validate(config) => {
            setup_logging(config.verbosity);
            run_validate(config)
        }
    };

    if let Err(err) = result {
        error!("{err}");
        process::exit(1);
    }
}

fn run_fork_id(config: ForkIdConfig) -> anyhow::Result<()> {
    info!(
        network = ?config.network.network,
        height = config.height,
        "Computing fork id"
    );

    let filter = ForkFilter::new_static(
        config.network.genesis_hash,
        config.network.fork_schedule(),
        config.height,
    );
    let fork_id = filter.current();

    if config.json {
        println!("{}", serde_json::to_string_pretty(&fork_id)?);
    } else {
        println!("{fork_id} {}", hex::encode_prefixed(fork_id.encoded()));
    }
    Ok(())
}

fn run_schedule(config: ScheduleConfig) -> anyhow::Result<()> {
    info!(network = ?config.network.network, "Listing fork schedule");

    let history = ForkHistory::new(config.network.genesis_hash, config.network.fork_schedule());
    let mut activation = 0;
    for entry in history.entries() {
        println!("{activation:>12} {}", entry.hash);
        activation = entry.next;
    }
    Ok(())
}

fn run_validate(config: ValidateConfig) -> anyhow::Result<()> {
    info!(
        network = ?config.network.network,
        height = config.height,
        remote = %config.remote,
        "Validating remote fork id"
    );

    let filter = ForkFilter::new_static(
        config.network.genesis_hash,
        config.network.fork_schedule(),
        config.height,
    );
    let verdict = filter.validate(config.remote);
    println!("{verdict}");

    ensure!(
        verdict.is_compatible(),
        "Remote fork id {} rejected by local fork id {}: {verdict}",
        config.remote,
        filter.current()
    );
    Ok(())
}
