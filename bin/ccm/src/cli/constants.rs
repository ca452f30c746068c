pub const DEFAULT_HEIGHT: u64 = 0;
pub const DEFAULT_NETWORK: &str = "mainnet";
pub const DEFAULT_VERBOSITY: &str = "3";
