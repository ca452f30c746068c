use std::sync::Arc;

use crate::networks::{MAINNET, NetworkSpec, ROPSTEN};

pub fn network_parser(network_string: &str) -> Result<Arc<NetworkSpec>, String> {
    match network_string {
        "mainnet" => Ok(MAINNET.clone()),
        "ropsten" => Ok(ROPSTEN.clone()),
        path => NetworkSpec::from_yaml_file(path)
            .map(Arc::new)
            .map_err(|err| format!("Failed to load network spec from {path}: {err}")),
    }
}
