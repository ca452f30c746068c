use std::sync::Arc;

use ccm_chain_spec::{cli::network_parser, networks::NetworkSpec};
use clap::Parser;

use crate::cli::{
    constants::{DEFAULT_HEIGHT, DEFAULT_NETWORK, DEFAULT_VERBOSITY},
    verbosity::{Verbosity, verbosity_parser},
};

#[derive(Debug, Parser)]
pub struct ForkIdConfig {
    /// Verbosity level
    #[arg(short, long, default_value = DEFAULT_VERBOSITY, value_parser = verbosity_parser)]
    pub verbosity: Verbosity,

    #[arg(
        long,
        help = "Choose mainnet or ropsten, or provide a path to a YAML network spec",
        default_value = DEFAULT_NETWORK,
        value_parser = network_parser
    )]
    pub network: Arc<NetworkSpec>,

    #[arg(long, help = "Local chain height", default_value_t = DEFAULT_HEIGHT)]
    pub height: u64,

    #[arg(long, help = "Print the fork id as JSON")]
    pub json: bool,
}
