//! Word-granularity cache simulator library.
//!
//! This crate models the cache layer of a processor's memory hierarchy with the following:
//! 1. **Addressing:** Decomposition of byte addresses into block base and word index.
//! 2. **Organizations:** Direct-mapped, set-associative, and fully associative caches
//!    built on one shared engine.
//! 3. **Protocol:** Write-back with write-allocate, LRU victim selection, and a
//!    block-granular backing-store contract.
//! 4. **Statistics:** Read/write query and miss counters with a report printer.
//!
//! The simulator is synchronous and single-threaded: every [`Cache::load_word`] or
//! [`Cache::store_word`] call completes fully (including any write-back and refill)
//! before returning.

/// Cache engine (line store, way locator, LRU, load/store paths).
pub mod cache;
/// Common types (addresses, words, errors).
pub mod common;
/// Simulator configuration (defaults, organization enum, geometry).
pub mod config;
/// Backing-store contract and flat main-memory model.
pub mod mem;
/// Hit/miss statistics collection and reporting.
pub mod stats;

/// Main cache type; construct with [`Cache::new`] or an organization-specific constructor.
pub use crate::cache::Cache;
/// Root configuration type; use `Config::default()` or deserialize from JSON.
pub use crate::config::Config;
/// Flat word-addressed main memory; the default [`mem::BackingStore`] implementation.
pub use crate::mem::MainMemory;
