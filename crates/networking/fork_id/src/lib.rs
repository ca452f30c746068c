//! Fork identifiers exchanged during the peer handshake.
//!
//! A [`ForkId`] summarizes the genesis hash and the forks a node has activated
//! at its current head, together with the next fork it knows about. The
//! [`ForkFilter`] decides whether a remote peer's identifier is compatible with
//! the local chain before any block data is exchanged.

pub mod error;
pub mod filter;
pub mod fork_hash;
pub mod fork_id;
pub mod history;

pub use filter::{ForkFilter, HeadReader, Verdict};
pub use fork_hash::ForkHash;
pub use fork_id::ForkId;
pub use history::{ForkHistory, compute};
