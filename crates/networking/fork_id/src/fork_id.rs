use std::fmt;

use alloy_rlp::{Decodable, RlpDecodable, RlpEncodable};
use serde::{Deserialize, Serialize};

use crate::{error::ForkIdError, fork_hash::ForkHash};

/// Identifier a node announces during the handshake.
///
/// Encoded as the RLP list `[hash, next]`, where `next` is a minimal big-endian
/// integer and zero means no further fork is known.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    RlpEncodable,
    RlpDecodable,
)]
pub struct ForkId {
    pub hash: ForkHash,
    pub next: u64,
}

impl ForkId {
    pub fn encoded(&self) -> Vec<u8> {
        alloy_rlp::encode(self)
    }

    /// Decodes a fork id that must span the whole input.
    pub fn decode_exact(bytes: &[u8]) -> Result<Self, ForkIdError> {
        let mut buf = bytes;
        let fork_id = Self::decode(&mut buf)?;
        if !buf.is_empty() {
            return Err(ForkIdError::TrailingBytes(buf.len()));
        }
        Ok(fork_id)
    }
}

impl fmt::Display for ForkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.hash, self.next)
    }
}
