use alloy_primitives::B256;
use ccm_chain_spec::fork_schedule::ForkSchedule;

use crate::{
    fork_hash::{ForkHash, ForkHasher},
    fork_id::ForkId,
};

/// Computes the fork id a node at `height` announces.
pub fn compute(genesis_hash: B256, schedule: &ForkSchedule, height: u64) -> ForkId {
    let mut hasher = ForkHasher::new(genesis_hash);
    for &fork in schedule.iter() {
        if fork > height {
            return ForkId {
                hash: hasher.fork_hash(),
                next: fork,
            };
        }
        hasher.fold(fork);
    }
    ForkId {
        hash: hasher.fork_hash(),
        next: 0,
    }
}

/// Every fork id a chain can ever present, indexed by the number of activated
/// forks.
///
/// `sums[i]` is the checksum after folding the first `i` forks, so there is one
/// more checksum than there are forks.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ForkHistory {
    schedule: ForkSchedule,
    sums: Vec<ForkHash>,
}

impl ForkHistory {
    pub fn new(genesis_hash: B256, schedule: ForkSchedule) -> Self {
        let mut hasher = ForkHasher::new(genesis_hash);
        let mut sums = Vec::with_capacity(schedule.len() + 1);
        sums.push(hasher.fork_hash());
        for &fork in schedule.iter() {
            hasher.fold(fork);
            sums.push(hasher.fork_hash());
        }
        Self { schedule, sums }
    }

    pub fn schedule(&self) -> &ForkSchedule {
        &self.schedule
    }

    /// Number of forks activated at `height`.
    pub fn position(&self, height: u64) -> usize {
        self.schedule.activated(height).len()
    }

    pub fn entry(&self, position: usize) -> Option<ForkId> {
        self.sums.get(position).map(|&hash| ForkId {
            hash,
            next: self.schedule.get(position).copied().unwrap_or(0),
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = ForkId> + '_ {
        (0..self.sums.len()).filter_map(|position| self.entry(position))
    }

    pub fn fork_id(&self, height: u64) -> ForkId {
        ForkId {
            hash: self.sums[self.position(height)],
            next: self.schedule.next_after(height),
        }
    }

    /// Checksums of every schedule prefix activated at `height`, genesis first.
    pub fn checksums_at(&self, height: u64) -> &[ForkHash] {
        &self.sums[..=self.position(height)]
    }

    pub fn next_after(&self, height: u64) -> u64 {
        self.schedule.next_after(height)
    }
}
