use std::{fmt, sync::Arc};

use alloy_primitives::B256;
use ccm_chain_spec::{fork_schedule::ForkSchedule, networks::NetworkSpec};
use tracing::debug;

use crate::{fork_id::ForkId, history::ForkHistory};

/// Reads the current head of the local chain.
pub type HeadReader = Arc<dyn Fn() -> u64 + Send + Sync>;

/// Outcome of checking a remote fork id against the local chain.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    Compatible,
    /// The remote is on our chain but has not scheduled a fork we already
    /// activated.
    RemoteNeedsUpgrade,
    /// The remote is on another chain, or announces a fork we passed without
    /// activating it.
    LocalIncompatibleOrStale,
}

impl Verdict {
    pub fn is_compatible(&self) -> bool {
        matches!(self, Verdict::Compatible)
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Verdict::Compatible => write!(f, "compatible"),
            Verdict::RemoteNeedsUpgrade => {
                write!(f, "remote is stale and needs a software update")
            }
            Verdict::LocalIncompatibleOrStale => {
                write!(f, "local node is on an incompatible chain or needs a software update")
            }
        }
    }
}

/// Classifies remote fork ids against the local fork history.
///
/// The head is read once per [`ForkFilter::validate`] call and never cached,
/// since it advances while the node syncs.
#[derive(Clone)]
pub struct ForkFilter {
    history: Arc<ForkHistory>,
    head: HeadReader,
}

impl ForkFilter {
    pub fn new<F>(genesis_hash: B256, schedule: ForkSchedule, head: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        Self {
            history: Arc::new(ForkHistory::new(genesis_hash, schedule)),
            head: Arc::new(head),
        }
    }

    /// Filter for a node whose head never moves.
    pub fn new_static(genesis_hash: B256, schedule: ForkSchedule, head: u64) -> Self {
        Self::new(genesis_hash, schedule, move || head)
    }

    pub fn for_network<F>(network_spec: &NetworkSpec, head: F) -> Self
    where
        F: Fn() -> u64 + Send + Sync + 'static,
    {
        Self::new(network_spec.genesis_hash, network_spec.fork_schedule(), head)
    }

    pub fn history(&self) -> &ForkHistory {
        &self.history
    }

    /// Fork id to announce at the current head.
    pub fn current(&self) -> ForkId {
        self.history.fork_id((self.head)())
    }

    pub fn validate(&self, remote: ForkId) -> Verdict {
        let head = (self.head)();
        let position = self.history.position(head);
        let verdict = self.classify(remote, head, position);
        debug!(%remote, head, position, %verdict, "Validated remote fork id");
        verdict
    }

    fn classify(&self, remote: ForkId, head: u64, position: usize) -> Verdict {
        let mut entries = self.history.entries();

        // Remote is behind us: its checksum is one we announced in the past.
        for earlier in entries.by_ref().take(position) {
            if earlier.hash != remote.hash {
                continue;
            }
            if remote.next == earlier.next {
                return Verdict::Compatible;
            }
            if remote.next == 0 && head >= earlier.next {
                return Verdict::RemoteNeedsUpgrade;
            }
            debug!(
                %remote,
                expected_next = earlier.next,
                "Accepting remote with unexpected next fork"
            );
            return Verdict::Compatible;
        }

        let Some(local) = entries.next() else {
            return Verdict::LocalIncompatibleOrStale;
        };
        if local.hash == remote.hash {
            if remote.next == local.next || local.next == 0 {
                return Verdict::Compatible;
            }
            // Remote activates a fork at a height we already passed without it.
            if remote.next != 0 && head >= remote.next {
                return Verdict::LocalIncompatibleOrStale;
            }
            return Verdict::Compatible;
        }

        // Remote is ahead of us on the same chain, we can't verify its future.
        if entries.any(|later| later.hash == remote.hash) {
            return Verdict::Compatible;
        }

        Verdict::LocalIncompatibleOrStale
    }
}

impl fmt::Debug for ForkFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ForkFilter")
            .field("history", &self.history)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::{
        sync::atomic::{AtomicU64, AtomicUsize, Ordering},
        thread,
    };

    use ccm_chain_spec::networks::{MAINNET, ROPSTEN};
    use rstest::rstest;
    use tracing_test::traced_test;

    use super::*;
    use crate::fork_hash::ForkHash;

    fn id(hash: u32, next: u64) -> ForkId {
        ForkId {
            hash: ForkHash::from(hash),
            next,
        }
    }

    fn mainnet_filter(head: u64) -> ForkFilter {
        ForkFilter::new_static(MAINNET.genesis_hash, MAINNET.fork_schedule(), head)
    }

    #[rstest]
    // Local is mainnet Petersburg, remote announces the same. No future fork is announced.
    #[case(7_987_396, id(0x668db0af, 0), Verdict::Compatible)]
    // Local is mainnet Petersburg, remote announces the same. Remote also announces a next fork
    // at block 0xffffffff, but that is uncertain.
    #[case(7_987_396, id(0x668db0af, u64::MAX), Verdict::Compatible)]
    // Local is mainnet currently in Byzantium only (so it's aware of Petersburg), remote announces
    // also Byzantium, but it's not yet aware of Petersburg (e.g. non updated node before the fork).
    #[case(7_279_999, id(0xa00bc324, 0), Verdict::Compatible)]
    // Local is mainnet currently in Byzantium only, remote announces also Byzantium, and it's also
    // aware of Petersburg (e.g. updated node before the fork).
    #[case(7_279_999, id(0xa00bc324, 7_280_000), Verdict::Compatible)]
    // Local is mainnet currently in Byzantium only, remote announces also Byzantium, and it's also
    // aware of some random fork (e.g. misconfigured Petersburg). As neither forks passed at either
    // nodes, they may mismatch, but we still connect for now.
    #[case(7_279_999, id(0xa00bc324, u64::MAX), Verdict::Compatible)]
    // Local is mainnet Petersburg, remote announces Byzantium + knowledge about Petersburg. Remote
    // is simply out of sync, accept.
    #[case(7_987_396, id(0xa00bc324, 7_280_000), Verdict::Compatible)]
    // Local is mainnet Petersburg, remote announces Spurious + knowledge about Byzantium. Remote
    // is definitely out of sync. It may or may not need the Petersburg update, we don't know yet.
    #[case(7_987_396, id(0x3edd5b10, 4_370_000), Verdict::Compatible)]
    // Local is mainnet Byzantium, remote announces Petersburg. Local is out of sync, accept.
    #[case(7_279_999, id(0x668db0af, 0), Verdict::Compatible)]
    // Local is mainnet Spurious, remote announces Byzantium, but is not aware of Petersburg. Local
    // out of sync. Local also knows about a future fork, but that is uncertain yet.
    #[case(4_369_999, id(0xa00bc324, 0), Verdict::Compatible)]
    // Local is mainnet Petersburg. Remote announces Byzantium but is not aware of further forks.
    // Remote needs software update.
    #[case(7_987_396, id(0xa00bc324, 0), Verdict::RemoteNeedsUpgrade)]
    // Local is mainnet Petersburg, remote announces a checksum that includes a fork we have never
    // heard of (Petersburg + 0xffffffff). Local needs software update, reject.
    #[case(7_987_396, id(0x5cddc0e1, 0), Verdict::LocalIncompatibleOrStale)]
    // Local is mainnet Byzantium, and is aware of Petersburg. Remote announces Petersburg +
    // 0xffffffff, which is not on our timeline at all. Reject.
    #[case(7_279_999, id(0x5cddc0e1, 0), Verdict::LocalIncompatibleOrStale)]
    // Local is mainnet Petersburg, remote is Petersburg on a different genesis.
    #[case(7_987_396, id(0xafec6b27, 0), Verdict::LocalIncompatibleOrStale)]
    // Local is mainnet Petersburg, remote announces the same checksum but a next fork at a block
    // we already passed. Local missed a fork, reject.
    #[case(7_987_396, id(0x668db0af, 7_279_999), Verdict::LocalIncompatibleOrStale)]
    // Local is mainnet Gray Glacier and knows no further fork. Remote announces the same checksum
    // and a fork we already passed; we cannot refute it, accept.
    #[case(20_000_000, id(0xf0afd0e3, 16_000_000), Verdict::Compatible)]
    // Local is past every known fork, remote announces the same checksum and no future fork.
    #[case(20_000_000, id(0xf0afd0e3, 0), Verdict::Compatible)]
    // Local is mainnet Gray Glacier. Remote announces Arrow Glacier without knowing about Gray
    // Glacier. Remote needs software update.
    #[case(20_000_000, id(0x20c327fc, 0), Verdict::RemoteNeedsUpgrade)]
    // Local is mainnet Gray Glacier, remote announces Arrow Glacier + Gray Glacier.
    #[case(20_000_000, id(0x20c327fc, 15_050_000), Verdict::Compatible)]
    fn test_mainnet_validation(
        #[case] head: u64,
        #[case] remote: ForkId,
        #[case] expected: Verdict,
    ) {
        assert_eq!(mainnet_filter(head).validate(remote), expected);
    }

    #[test]
    fn test_remote_on_another_chain_is_rejected() {
        let ropsten = ForkFilter::new_static(ROPSTEN.genesis_hash, ROPSTEN.fork_schedule(), 0);
        let mainnet = mainnet_filter(7_987_396);

        assert_eq!(
            mainnet.validate(ropsten.current()),
            Verdict::LocalIncompatibleOrStale
        );
        assert_eq!(
            ropsten.validate(mainnet.current()),
            Verdict::LocalIncompatibleOrStale
        );
    }

    #[test]
    fn test_self_compatibility_at_every_boundary() {
        let head = Arc::new(AtomicU64::new(0));
        let reader = head.clone();
        let filter = ForkFilter::for_network(&MAINNET, move || reader.load(Ordering::Relaxed));

        let mut heights = vec![0, u64::MAX];
        for &fork in MAINNET.fork_schedule().iter() {
            heights.extend([fork - 1, fork, fork + 1]);
        }
        for height in heights {
            head.store(height, Ordering::Relaxed);
            assert_eq!(
                filter.validate(filter.current()),
                Verdict::Compatible,
                "height {height}"
            );
        }
    }

    #[test]
    fn test_chain_without_forks() {
        let filter =
            ForkFilter::new_static(MAINNET.genesis_hash, ForkSchedule::default(), 1_769_535);

        assert_eq!(filter.current(), id(0xfc64ec04, 0));
        assert_eq!(filter.validate(id(0xfc64ec04, 0)), Verdict::Compatible);
        assert_eq!(
            filter.validate(id(0x92e789d0, 0)),
            Verdict::LocalIncompatibleOrStale
        );
    }

    #[test]
    fn test_head_is_read_once_per_validation() {
        let reads = Arc::new(AtomicUsize::new(0));
        let counter = reads.clone();
        let filter = ForkFilter::for_network(&MAINNET, move || {
            counter.fetch_add(1, Ordering::SeqCst);
            7_987_396
        });

        for remote in [
            id(0x668db0af, 0),
            id(0xa00bc324, 0),
            id(0x3edd5b10, 4_370_000),
            id(0xdeadbeef, 0),
        ] {
            filter.validate(remote);
        }

        assert_eq!(reads.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_validation_follows_live_head() {
        let head = Arc::new(AtomicU64::new(7_279_999));
        let reader = head.clone();
        let filter = ForkFilter::for_network(&MAINNET, move || reader.load(Ordering::Relaxed));
        let stale_remote = id(0xa00bc324, 0);

        assert_eq!(filter.validate(stale_remote), Verdict::Compatible);

        head.store(7_280_000, Ordering::Relaxed);
        assert_eq!(filter.validate(stale_remote), Verdict::RemoteNeedsUpgrade);
    }

    #[test]
    fn test_concurrent_validation() {
        let head = Arc::new(AtomicU64::new(0));
        let reader = head.clone();
        let filter = ForkFilter::for_network(&MAINNET, move || reader.load(Ordering::Relaxed));

        let handles = (0..4)
            .map(|_| {
                let filter = filter.clone();
                thread::spawn(move || {
                    (0..100)
                        .map(|_| filter.validate(id(0xfc64ec04, 1_150_000)))
                        .all(|verdict| verdict.is_compatible())
                })
            })
            .collect::<Vec<_>>();
        head.store(1_000_000, Ordering::Relaxed);

        for handle in handles {
            assert_eq!(handle.join().ok(), Some(true));
        }
    }

    #[test]
    #[traced_test]
    fn test_validation_is_logged() {
        mainnet_filter(7_987_396).validate(id(0xa00bc324, 0));

        assert!(logs_contain("Validated remote fork id"));
        assert!(logs_contain("remote is stale"));
    }

    #[test]
    fn test_verdict_helpers() {
        assert!(Verdict::Compatible.is_compatible());
        assert!(!Verdict::RemoteNeedsUpgrade.is_compatible());
        assert!(!Verdict::LocalIncompatibleOrStale.is_compatible());
        assert_eq!(Verdict::Compatible.to_string(), "compatible");
    }
}
