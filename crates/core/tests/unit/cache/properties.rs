//! Property tests over arbitrary access streams.

use cachesim_core::trace::AccessRecord;
use cachesim_core::{CacheGeometry, CacheSim, Outcome, Simulator};
use proptest::prelude::*;

/// Small power-of-two geometries so random streams actually collide.
fn geometry() -> impl Strategy<Value = CacheGeometry> {
    (0u32..4, 2u32..7, 0u32..4).prop_map(|(ways_log, block_log, sets_log)| {
        let ways = 1u64 << ways_log;
        let block = 1u64 << block_log;
        let sets = 1u64 << sets_log;
        CacheGeometry::new(sets * ways * block, block, ways).unwrap()
    })
}

/// Addresses drawn from a narrow window so blocks repeat.
fn addresses() -> impl Strategy<Value = Vec<u64>> {
    prop::collection::vec(0u64..4096, 0..300)
}

proptest! {
    #[test]
    fn hits_plus_misses_equals_accesses(g in geometry(), addrs in addresses()) {
        let mut sim = Simulator::with_cache(CacheSim::new(g).unwrap());
        let stats = sim.run(addrs.iter().copied().map(AccessRecord::read));
        prop_assert_eq!(stats.hits + stats.misses, addrs.len() as u64);
        prop_assert_eq!(stats.cold_misses + stats.capacity_misses, stats.misses);
        prop_assert_eq!(sim.cache().clock(), addrs.len() as u64);
    }

    #[test]
    fn immediate_repeat_always_hits(g in geometry(), addrs in addresses()) {
        let mut cache = CacheSim::new(g).unwrap();
        for addr in addrs {
            let _ = cache.access(addr);
            prop_assert_eq!(cache.access(addr), Outcome::Hit);
        }
    }

    #[test]
    fn set_never_holds_duplicate_tags(g in geometry(), addrs in addresses()) {
        let mut cache = CacheSim::new(g).unwrap();
        for addr in addrs {
            let _ = cache.access(addr);
        }
        for index in 0..g.num_sets() {
            let mut tags = cache.resident_tags(index);
            let before = tags.len();
            tags.sort_unstable();
            tags.dedup();
            prop_assert_eq!(tags.len(), before);
            prop_assert!(before as u64 <= g.associativity());
        }
    }

    #[test]
    fn valid_recencies_are_distinct_and_bounded(g in geometry(), addrs in addresses()) {
        let mut cache = CacheSim::new(g).unwrap();
        for addr in &addrs {
            let _ = cache.access(*addr);
        }
        let mut stamps: Vec<u64> = (0..g.num_sets())
            .filter_map(|i| cache.set(i))
            .flatten()
            .filter(|w| w.valid)
            .map(|w| w.recency)
            .collect();
        let before = stamps.len();
        stamps.sort_unstable();
        stamps.dedup();
        prop_assert_eq!(stamps.len(), before);
        prop_assert!(stamps.iter().all(|&r| r >= 1 && r <= cache.clock()));
    }

    #[test]
    fn most_recent_access_is_always_resident(g in geometry(), addrs in addresses()) {
        let mut cache = CacheSim::new(g).unwrap();
        for addr in addrs {
            let _ = cache.access(addr);
            prop_assert!(cache.contains(addr));
        }
    }
}
