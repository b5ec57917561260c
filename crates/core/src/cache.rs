//! Cache engine.
//!
//! This module implements the word-granularity cache simulator shared by the
//! direct-mapped, set-associative, and fully associative organizations. It
//! models line lookup, Least-Recently-Used victim selection, and the
//! write-back/write-allocate protocol against a block-granular backing store.
//!
//! The organization only fixes the shape of the slot grid: direct-mapped is
//! `num_sets × 1`, fully associative is `1 × num_ways`, and set-associative
//! is the general case. One engine serves all three.

use std::fmt;

use tracing::trace;

use crate::common::addr::{self, BlockOffset};
use crate::common::data::Word;
use crate::common::error::CacheError;
use crate::config::{CacheConfig, MemoryConfig, Organization};
use crate::mem::BackingStore;
use crate::stats::CacheStats;

/// Per-way line state: the resident block's words, tag, and status bits.
///
/// Lines are allocated once at cache construction and overwritten in place;
/// `base_addr` and `words` are meaningful only while `valid` is set.
#[derive(Clone)]
struct CacheLine {
    words: Box<[Word]>,
    valid: bool,
    dirty: bool,
    base_addr: u64,
    last_use: u64,
}

impl CacheLine {
    /// An invalid, clean, untagged line with a zeroed word buffer.
    fn new(words_per_block: usize) -> Self {
        Self {
            words: vec![0; words_per_block].into_boxed_slice(),
            valid: false,
            dirty: false,
            base_addr: 0,
            last_use: 0,
        }
    }

    /// Whether this line currently holds the block at `base`.
    fn holds(&self, base: u64) -> bool {
        self.valid && self.base_addr == base
    }
}

/// Word-granularity cache in front of a block-granular backing store.
///
/// All state is owned: the `num_sets × num_ways` line grid, the logical
/// clock driving LRU, the statistics counters, and the backing store itself.
/// Calls are synchronous; a `load_word`/`store_word` completes fully
/// (including any write-back and refill) before returning. The model is
/// single-threaded — wrap the cache in external mutual exclusion if it must
/// be shared.
pub struct Cache {
    /// Line grid, row-major: slot `(set, way)` lives at `set * num_ways + way`.
    lines: Box<[CacheLine]>,
    num_sets: usize,
    num_ways: usize,
    geometry: MemoryConfig,
    /// Monotonic logical clock backing the `last_use` timestamps.
    clock: u64,
    stats: CacheStats,
    backing: Box<dyn BackingStore>,
}

impl Cache {
    /// Creates a cache with the organization given in the configuration.
    ///
    /// Direct-mapped fixes the way count to 1 and fully associative fixes the
    /// set count to 1, regardless of what the configuration carries for the
    /// ignored dimension.
    ///
    /// # Arguments
    ///
    /// * `cache` - Organization and shape.
    /// * `memory` - Region and block geometry, shared with the backing store.
    /// * `backing` - The block-granular store behind this cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] if the geometry fails
    /// [`MemoryConfig::validate`] or the shape has zero sets or ways.
    pub fn new(
        cache: &CacheConfig,
        memory: &MemoryConfig,
        backing: Box<dyn BackingStore>,
    ) -> Result<Self, CacheError> {
        match cache.organization {
            Organization::DirectMapped => Self::direct_mapped(cache.num_sets, memory, backing),
            Organization::SetAssociative => {
                Self::set_associative(cache.num_sets, cache.num_ways, memory, backing)
            }
            Organization::FullyAssociative => {
                Self::fully_associative(cache.num_ways, memory, backing)
            }
        }
    }

    /// Creates a direct-mapped cache: one way per set.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] on a zero set count or an
    /// inconsistent memory geometry.
    pub fn direct_mapped(
        num_sets: usize,
        memory: &MemoryConfig,
        backing: Box<dyn BackingStore>,
    ) -> Result<Self, CacheError> {
        Self::with_shape(num_sets, 1, memory, backing)
    }

    /// Creates a set-associative cache of `num_sets` sets × `num_ways` ways.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] on a zero set or way count or an
    /// inconsistent memory geometry.
    pub fn set_associative(
        num_sets: usize,
        num_ways: usize,
        memory: &MemoryConfig,
        backing: Box<dyn BackingStore>,
    ) -> Result<Self, CacheError> {
        Self::with_shape(num_sets, num_ways, memory, backing)
    }

    /// Creates a fully associative cache: a single set in which all
    /// `num_ways` ways compete under LRU.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] on a zero way count or an
    /// inconsistent memory geometry.
    pub fn fully_associative(
        num_ways: usize,
        memory: &MemoryConfig,
        backing: Box<dyn BackingStore>,
    ) -> Result<Self, CacheError> {
        Self::with_shape(1, num_ways, memory, backing)
    }

    /// Shared constructor; allocates the full line grid up front.
    fn with_shape(
        num_sets: usize,
        num_ways: usize,
        memory: &MemoryConfig,
        backing: Box<dyn BackingStore>,
    ) -> Result<Self, CacheError> {
        memory.validate()?;
        if num_sets == 0 {
            return Err(CacheError::InvalidConfig("cache needs at least one set"));
        }
        if num_ways == 0 {
            return Err(CacheError::InvalidConfig("cache needs at least one way"));
        }

        let line = CacheLine::new(memory.words_per_block());
        Ok(Self {
            lines: vec![line; num_sets * num_ways].into_boxed_slice(),
            num_sets,
            num_ways,
            geometry: *memory,
            clock: 0,
            stats: CacheStats::default(),
            backing,
        })
    }

    /// Number of sets in the line grid.
    #[inline]
    pub const fn num_sets(&self) -> usize {
        self.num_sets
    }

    /// Number of ways per set.
    #[inline]
    pub const fn num_ways(&self) -> usize {
        self.num_ways
    }

    /// Current statistics snapshot.
    #[inline]
    pub const fn stats(&self) -> CacheStats {
        self.stats
    }

    /// Gives up the cache and returns its backing store, without flushing
    /// dirty lines.
    pub fn into_backing(self) -> Box<dyn BackingStore> {
        self.backing
    }

    /// Set index for a block base address: `(base / block_size) % num_sets`.
    fn set_index(&self, base: u64) -> usize {
        ((base / self.geometry.block_bytes) as usize) % self.num_sets
    }

    /// Resolves a base address to a way within `set`.
    ///
    /// Priority: tag match (refreshes `last_use`), then first empty way
    /// (clock untouched; the caller installs immediately), then the LRU
    /// victim — strictly minimum `last_use`, ties to the lowest way index —
    /// which is stamped with a fresh tick as part of selection.
    fn locate_way(&mut self, set: usize, base: u64) -> usize {
        let row = set * self.num_ways;

        for way in 0..self.num_ways {
            if self.lines[row + way].holds(base) {
                self.clock += 1;
                self.lines[row + way].last_use = self.clock;
                return way;
            }
        }

        for way in 0..self.num_ways {
            if !self.lines[row + way].valid {
                return way;
            }
        }

        let mut victim = 0;
        let mut min_use = u64::MAX;
        for way in 0..self.num_ways {
            let last_use = self.lines[row + way].last_use;
            if last_use < min_use {
                min_use = last_use;
                victim = way;
            }
        }
        trace!(
            "evicting set {set} way {victim} (last_use {min_use}, block {:#x})",
            self.lines[row + victim].base_addr
        );
        self.clock += 1;
        self.lines[row + victim].last_use = self.clock;
        victim
    }

    /// Writes one word through the cache.
    ///
    /// A write to a resident block touches only the cached copy and marks the
    /// line dirty; the backing store catches up when the line is evicted
    /// (write-back). A write to a non-resident block first fills the line
    /// from the backing store (write-allocate), writing back any dirty
    /// occupant beforehand.
    ///
    /// The write-query counter is incremented exactly once per accepted call;
    /// the write-miss counter only when a fill was needed.
    ///
    /// # Arguments
    ///
    /// * `addr` - Word-aligned byte address.
    /// * `data` - The word to store.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Misaligned`] or [`CacheError::OutOfRange`] if
    /// the address violates the request contract; no state changes in that
    /// case.
    pub fn store_word(&mut self, addr: u64, data: Word) -> Result<(), CacheError> {
        let BlockOffset { base, word_index } = addr::decompose(addr, &self.geometry)?;
        let set = self.set_index(base);
        let way = self.locate_way(set, base);
        let slot = set * self.num_ways + way;

        let backing = &mut self.backing;
        let line = &mut self.lines[slot];

        if line.holds(base) {
            line.words[word_index] = data;
            line.dirty = true;
        } else {
            if line.valid && line.dirty {
                trace!("write-back of dirty block {:#x}", line.base_addr);
                backing.write_block(line.base_addr, &line.words);
            }
            trace!("write miss: filling block {base:#x} into set {set} way {way}");
            line.words = backing.read_block(base);
            line.words[word_index] = data;
            line.valid = true;
            line.dirty = true;
            line.base_addr = base;
            self.stats.write_misses += 1;
        }
        self.stats.write_queries += 1;
        Ok(())
    }

    /// Reads one word through the cache.
    ///
    /// A read of a resident block is served from the cached copy with no
    /// backing-store traffic. Otherwise the line is filled from the backing
    /// store — writing back any dirty occupant first — and installed clean:
    /// a load never dirties a line.
    ///
    /// The read-query counter is incremented exactly once per accepted call;
    /// the read-miss counter only when a fill was needed.
    ///
    /// # Arguments
    ///
    /// * `addr` - Word-aligned byte address.
    ///
    /// # Returns
    ///
    /// The word at `addr` as currently visible through the cache.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::Misaligned`] or [`CacheError::OutOfRange`] if
    /// the address violates the request contract; no state changes in that
    /// case.
    pub fn load_word(&mut self, addr: u64) -> Result<Word, CacheError> {
        let BlockOffset { base, word_index } = addr::decompose(addr, &self.geometry)?;
        let set = self.set_index(base);
        let way = self.locate_way(set, base);
        let slot = set * self.num_ways + way;

        let backing = &mut self.backing;
        let line = &mut self.lines[slot];

        let word = if line.holds(base) {
            line.words[word_index]
        } else {
            if line.valid && line.dirty {
                line.dirty = false;
                trace!("write-back of dirty block {:#x}", line.base_addr);
                backing.write_block(line.base_addr, &line.words);
            }
            trace!("read miss: filling block {base:#x} into set {set} way {way}");
            line.words = backing.read_block(base);
            line.valid = true;
            line.base_addr = base;
            self.stats.read_misses += 1;
            line.words[word_index]
        };
        self.stats.read_queries += 1;
        Ok(word)
    }
}

impl fmt::Debug for Cache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cache")
            .field("num_sets", &self.num_sets)
            .field("num_ways", &self.num_ways)
            .field("clock", &self.clock)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}
