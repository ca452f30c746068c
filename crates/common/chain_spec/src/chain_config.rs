use serde::Deserialize;

/// Block heights at which the execution rules of a chain change.
///
/// Every field is optional: `None` and `Some(0)` both mean the rule set is not
/// scheduled as a fork (a rule active from genesis is not a transition). Several
/// fields may share a height when rule sets activate together.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "UPPERCASE", default)]
pub struct ChainConfig {
    pub chain_id: u64,

    pub homestead_block: Option<u64>,
    pub dao_fork_block: Option<u64>,
    pub eip150_block: Option<u64>,
    pub eip155_block: Option<u64>,
    pub eip158_block: Option<u64>,
    pub byzantium_block: Option<u64>,
    pub constantinople_block: Option<u64>,
    pub petersburg_block: Option<u64>,
    pub istanbul_block: Option<u64>,
    pub muir_glacier_block: Option<u64>,
    pub berlin_block: Option<u64>,
    pub london_block: Option<u64>,
    pub arrow_glacier_block: Option<u64>,
    pub gray_glacier_block: Option<u64>,
}

impl ChainConfig {
    /// Fork fields in declaration order, unset ones included.
    pub fn fork_blocks(&self) -> [Option<u64>; 14] {
        [
            self.homestead_block,
            self.dao_fork_block,
            self.eip150_block,
            self.eip155_block,
            self.eip158_block,
            self.byzantium_block,
            self.constantinople_block,
            self.petersburg_block,
            self.istanbul_block,
            self.muir_glacier_block,
            self.berlin_block,
            self.london_block,
            self.arrow_glacier_block,
            self.gray_glacier_block,
        ]
    }
}
