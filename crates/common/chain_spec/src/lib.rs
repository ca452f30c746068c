pub mod chain_config;
pub mod cli;
pub mod error;
pub mod fork_schedule;
pub mod networks;
