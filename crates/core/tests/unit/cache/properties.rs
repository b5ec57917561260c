//! Shadow-Model Property Tests.
//!
//! Randomized load/store sequences are replayed against a plain map of
//! word values. Whatever the organization and whatever the eviction churn,
//! a load must observe the latest store to its address (or zero for a cold
//! word) — this subsumes read-after-write and write-back correctness.

use std::collections::HashMap;

use proptest::prelude::*;

use cachesim_core::common::Word;

use crate::common::{direct_cache, fully_assoc_cache, set_assoc_cache};

/// One randomized request over the 1 KiB test region.
#[derive(Debug, Clone, Copy)]
enum Op {
    Load(u64),
    Store(u64, Word),
}

/// Word-aligned addresses inside the region, biased to a few blocks so
/// conflict evictions actually happen.
fn op_strategy() -> impl Strategy<Value = Op> {
    let addr = (0u64..64).prop_map(|word| word * 4);
    prop_oneof![
        addr.clone().prop_map(Op::Load),
        (addr, any::<Word>()).prop_map(|(addr, value)| Op::Store(addr, value)),
    ]
}

proptest! {
    /// Loads agree with the shadow model across all three organizations,
    /// and every request ticks exactly one query counter.
    #[test]
    fn loads_observe_latest_store(ops in proptest::collection::vec(op_strategy(), 1..200)) {
        for mut cache in [direct_cache(2), set_assoc_cache(2, 2), fully_assoc_cache(4)] {
            let mut shadow: HashMap<u64, Word> = HashMap::new();

            for op in &ops {
                match *op {
                    Op::Load(addr) => {
                        let expected = shadow.get(&addr).copied().unwrap_or(0);
                        prop_assert_eq!(cache.load_word(addr).unwrap(), expected);
                    }
                    Op::Store(addr, value) => {
                        cache.store_word(addr, value).unwrap();
                        let _ = shadow.insert(addr, value);
                    }
                }
            }

            let stats = cache.stats();
            prop_assert_eq!(stats.queries(), ops.len() as u64);
            prop_assert!(stats.misses() <= stats.queries());
        }
    }

    /// Read-after-write on a fresh cache, for any aligned address and value.
    #[test]
    fn read_after_write(word in 0u64..256, value in any::<Word>()) {
        let addr = word * 4;
        let mut cache = set_assoc_cache(2, 2);
        cache.store_word(addr, value).unwrap();
        prop_assert_eq!(cache.load_word(addr).unwrap(), value);
    }
}
