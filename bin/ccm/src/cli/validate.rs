use std::sync::Arc;

use alloy_primitives::hex;
use ccm_chain_spec::{cli::network_parser, networks::NetworkSpec};
use ccm_fork_id::ForkId;
use clap::Parser;

use crate::cli::{
    constants::{DEFAULT_HEIGHT, DEFAULT_NETWORK, DEFAULT_VERBOSITY},
    verbosity::{Verbosity, verbosity_parser},
};

#[derive(Debug, Parser)]
pub struct ValidateConfig {
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

    #[arg(
        long,
        help = "Hex encoded RLP fork id announced by the remote peer",
        value_parser = fork_id_parser
    )]
    pub remote: ForkId,
}

pub fn fork_id_parser(s: &str) -> Result<ForkId, String> {
    let bytes = hex::decode(s).map_err(|err| format!("Invalid hex: {err}"))?;
    ForkId::decode_exact(&bytes).map_err(|err| err.to_string())
}
