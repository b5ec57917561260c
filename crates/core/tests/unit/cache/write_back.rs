//! Write-Back Protocol Unit Tests.
//!
//! These tests watch the backing-store boundary through the recording mock:
//! every block transfer is journaled, so the ordering of write-backs and
//! refills — not just their end result — is asserted.
//!
//! Geometry: 16-byte blocks at address 0, direct-mapped with 2 sets, so
//! blocks 0 and 32 fight over set 0.

use std::sync::{Arc, Mutex};

use cachesim_core::Cache;

use crate::common::mocks::{BlockEvent, RecordingState, RecordingStore};
use crate::common::small_geometry;

/// A 2-set direct-mapped cache over a recording store, plus the journal.
fn recording_cache() -> (Cache, Arc<Mutex<RecordingState>>) {
    let geometry = small_geometry();
    let (store, state) = RecordingStore::new(&geometry);
    let cache = Cache::direct_mapped(2, &geometry, Box::new(store)).unwrap();
    (cache, state)
}

/// A store hit touches only the cached copy: the single fill is the only
/// traffic the backing store ever sees.
#[test]
fn store_hits_cause_no_io() {
    let (mut cache, state) = recording_cache();

    cache.store_word(0, 1).unwrap();
    cache.store_word(4, 2).unwrap();
    cache.store_word(0, 3).unwrap();

    let state = state.lock().unwrap();
    assert_eq!(state.events, vec![BlockEvent::Read(0)]);
}

/// Replacing a dirty occupant writes the old block back before the new
/// block is read — in that order.
#[test]
fn dirty_replacement_writes_back_before_refill() {
    let (mut cache, state) = recording_cache();

    cache.store_word(0, 7).unwrap();
    cache.store_word(32, 9).unwrap();

    let state = state.lock().unwrap();
    assert_eq!(
        state.events,
        vec![
            BlockEvent::Read(0),
            BlockEvent::Write(0),
            BlockEvent::Read(32),
        ]
    );
}

/// Clean occupants are replaced silently: loads never dirty a line, so
/// load-only conflict traffic performs no write-backs.
#[test]
fn clean_replacement_skips_write_back() {
    let (mut cache, state) = recording_cache();

    cache.load_word(0).unwrap();
    cache.load_word(32).unwrap();
    cache.load_word(0).unwrap();

    let state = state.lock().unwrap();
    assert_eq!(
        state.events,
        vec![
            BlockEvent::Read(0),
            BlockEvent::Read(32),
            BlockEvent::Read(0),
        ]
    );
}

/// The deferred write lands in memory only at eviction time, and a line
/// refilled after its write-back is clean again.
#[test]
fn write_back_is_deferred_then_lands() {
    let (mut cache, state) = recording_cache();

    cache.store_word(0, 7).unwrap();
    assert_eq!(
        state.lock().unwrap().memory.word_at(0),
        0,
        "write-back must be deferred until eviction"
    );

    cache.load_word(32).unwrap(); // evicts dirty block 0
    assert_eq!(state.lock().unwrap().memory.word_at(0), 7);

    cache.load_word(0).unwrap(); // evicts block 32, which stayed clean
    let state = state.lock().unwrap();
    assert_eq!(
        state.events,
        vec![
            BlockEvent::Read(0),
            BlockEvent::Write(0),
            BlockEvent::Read(32),
            BlockEvent::Read(0),
        ],
        "the clean block 32 must not be written back"
    );
}

/// Reloading an evicted dirty block returns the stored word: the write-back
/// completed before the slot was reused.
#[test]
fn reload_after_write_back_observes_stored_value() {
    let (mut cache, _state) = recording_cache();

    cache.store_word(12, 0xfeed).unwrap();
    cache.store_word(44, 1).unwrap(); // evicts dirty block 0
    assert_eq!(cache.load_word(12).unwrap(), 0xfeed);
}
