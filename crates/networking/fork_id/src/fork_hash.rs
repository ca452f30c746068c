use std::fmt;

use alloy_primitives::{B256, aliases::B32};
use alloy_rlp::{BufMut, Decodable, Encodable};
use crc32fast::Hasher;
use serde::{Deserialize, Serialize};

/// CRC-32 checksum over a genesis hash and the fork heights activated on top of
/// it.
///
/// Always encoded as a 4-byte string on the wire, never as an integer, so
/// leading zero bytes survive.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ForkHash(pub B32);

impl ForkHash {
    pub const fn to_u32(self) -> u32 {
        u32::from_be_bytes(self.0.0)
    }
}

impl From<u32> for ForkHash {
    fn from(checksum: u32) -> Self {
        Self(B32::new(checksum.to_be_bytes()))
    }
}

impl fmt::Display for ForkHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#010x}", self.to_u32())
    }
}

impl Encodable for ForkHash {
    fn encode(&self, out: &mut dyn BufMut) {
        self.0.0.encode(out);
    }

    fn length(&self) -> usize {
        self.0.0.length()
    }
}

impl Decodable for ForkHash {
    fn decode(buf: &mut &[u8]) -> alloy_rlp::Result<Self> {
        <[u8; 4]>::decode(buf).map(|bytes| Self(B32::new(bytes)))
    }
}

/// Rolling checksum seeded with the genesis hash.
///
/// Each [`ForkHasher::fold`] appends the big-endian height of one more
/// activated fork.
#[derive(Clone)]
pub struct ForkHasher(Hasher);

impl ForkHasher {
    pub fn new(genesis_hash: B256) -> Self {
        let mut hasher = Hasher::new();
        hasher.update(genesis_hash.as_slice());
        Self(hasher)
    }

    pub fn fold(&mut self, fork: u64) {
        self.0.update(&fork.to_be_bytes());
    }

    pub fn fork_hash(&self) -> ForkHash {
        ForkHash::from(self.0.clone().finalize())
    }
}
