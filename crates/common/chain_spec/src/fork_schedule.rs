use std::{ops::Deref, slice::Iter};

use itertools::Itertools;

use crate::chain_config::ChainConfig;

/// Ordered fork activation heights of a chain.
///
/// Entries are non-zero, distinct and strictly ascending. A schedule is never
/// mutated once built; reloading a configuration builds a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ForkSchedule(Vec<u64>);

impl ForkSchedule {
    /// Collects every defined non-zero height, dropping duplicates.
    pub fn new<I>(heights: I) -> Self
    where
        I: IntoIterator<Item = Option<u64>>,
    {
        Self(
            heights
                .into_iter()
                .flatten()
                .filter(|height| *height != 0)
                .sorted_unstable()
                .dedup()
                .collect(),
        )
    }

    pub fn from_config(config: &ChainConfig) -> Self {
        Self::new(config.fork_blocks())
    }

    pub fn iter(&self) -> Iter<'_, u64> {
        self.0.iter()
    }

    /// Forks already activated at `height`.
    pub fn activated(&self, height: u64) -> &[u64] {
        &self.0[..self.0.partition_point(|fork| *fork <= height)]
    }

    /// First fork strictly after `height`, or 0 if none is scheduled.
    pub fn next_after(&self, height: u64) -> u64 {
        self.0
            .get(self.0.partition_point(|fork| *fork <= height))
            .copied()
            .unwrap_or(0)
    }
}

impl Deref for ForkSchedule {
    type Target = [u64];

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromIterator<u64> for ForkSchedule {
    fn from_iter<T: IntoIterator<Item = u64>>(iter: T) -> Self {
        Self::new(iter.into_iter().map(Some))
    }
}
