//! Statistics Unit Tests.
//!
//! Derived metrics over hand-built counter states, plus the accounting a
//! short request sequence leaves behind.

use cachesim_core::stats::CacheStats;

use crate::common::direct_cache;

/// Derived hit counts and rates follow the counters.
#[test]
fn derived_metrics() {
    let stats = CacheStats {
        read_queries: 8,
        read_misses: 2,
        write_queries: 2,
        write_misses: 2,
    };

    assert_eq!(stats.read_hits(), 6);
    assert_eq!(stats.write_hits(), 0);
    assert_eq!(stats.queries(), 10);
    assert_eq!(stats.misses(), 4);
    assert!((stats.hit_rate() - 60.0).abs() < f64::EPSILON);
}

/// No queries means a 0% hit rate, not a division by zero.
#[test]
fn empty_stats_rate_is_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.queries(), 0);
    assert!(stats.hit_rate().abs() < f64::EPSILON);
}

/// Counters only ever grow across a request sequence.
#[test]
fn counters_are_monotonic() {
    let mut cache = direct_cache(2);
    let mut previous = cache.stats();

    for addr in [0u64, 4, 32, 0, 32, 4] {
        cache.load_word(addr).unwrap();
        let current = cache.stats();
        assert!(current.read_queries > previous.read_queries);
        assert!(current.read_misses >= previous.read_misses);
        previous = current;
    }
}

/// The report printer holds up on populated and empty counters alike.
#[test]
fn report_prints() {
    CacheStats::default().print();
    CacheStats {
        read_queries: 3,
        read_misses: 1,
        write_queries: 1,
        write_misses: 1,
    }
    .print();
}
