use std::{
    fs,
    path::Path,
    sync::{Arc, LazyLock},
};

use alloy_primitives::{B256, b256};
use serde::Deserialize;

use crate::{chain_config::ChainConfig, error::ChainSpecError, fork_schedule::ForkSchedule};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Network {
    Mainnet,
    Ropsten,
    Custom(String),
}

impl<'de> Deserialize<'de> for Network {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        match String::deserialize(deserializer)?.as_str() {
            "mainnet" => Ok(Network::Mainnet),
            "ropsten" => Ok(Network::Ropsten),
            custom => Ok(Network::Custom(custom.to_string())),
        }
    }
}

/// Everything the fork identifier needs to know about a chain.
#[derive(Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub struct NetworkSpec {
    #[serde(rename = "CONFIG_NAME")]
    pub network: Network,
    pub genesis_hash: B256,
    #[serde(flatten)]
    pub config: ChainConfig,
}

impl NetworkSpec {
    pub fn from_yaml_file(path: impl AsRef<Path>) -> Result<Self, ChainSpecError> {
        let contents = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&contents)?)
    }

    pub fn fork_schedule(&self) -> ForkSchedule {
        ForkSchedule::from_config(&self.config)
    }
}

pub static MAINNET: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Mainnet,
        genesis_hash: b256!("0xd4e56740f876aef8c010b86a40d5f56745a118d0906a34e69aec8c0db1cb8fa3"),
        config: ChainConfig {
            chain_id: 1,
            homestead_block: Some(1_150_000),
            dao_fork_block: Some(1_920_000),
            eip150_block: Some(2_463_000),
            eip155_block: Some(2_675_000),
            eip158_block: Some(2_675_000),
            byzantium_block: Some(4_370_000),
            constantinople_block: Some(7_280_000),
            petersburg_block: Some(7_280_000),
            istanbul_block: Some(9_069_000),
            muir_glacier_block: Some(9_200_000),
            berlin_block: Some(12_244_000),
            london_block: Some(12_965_000),
            arrow_glacier_block: Some(13_773_000),
            gray_glacier_block: Some(15_050_000),
        },
    }
    .into()
});

pub static ROPSTEN: LazyLock<Arc<NetworkSpec>> = LazyLock::new(|| {
    NetworkSpec {
        network: Network::Ropsten,
        genesis_hash: b256!("0x41941023680923e0fe4d74a34bdac8141f2540e3ae90623718e47d66d1ca4a2d"),
        config: ChainConfig {
            chain_id: 3,
            homestead_block: Some(0),
            dao_fork_block: None,
            eip150_block: Some(0),
            eip155_block: Some(10),
            eip158_block: Some(10),
            byzantium_block: Some(1_700_000),
            constantinople_block: Some(4_230_000),
            petersburg_block: Some(4_939_394),
            istanbul_block: Some(6_485_846),
            muir_glacier_block: Some(7_117_117),
            berlin_block: Some(9_812_189),
            london_block: Some(10_499_401),
            arrow_glacier_block: None,
            gray_glacier_block: None,
        },
    }
    .into()
});
