//! Configuration system for the cache simulator.
//!
//! This module defines the configuration structures and enums used to
//! parameterize a simulation. It provides:
//! 1. **Defaults:** Baseline geometry constants (memory region, block and word
//!    sizes, sets and ways).
//! 2. **Structures:** Per-section config for the memory region and the cache
//!    organization.
//! 3. **Enums:** The three supported cache organizations.
//!
//! Configuration is supplied as JSON (see the example on [`Config`]) or built
//! with `Config::default()`.

use serde::Deserialize;

use crate::common::error::CacheError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline geometry when not explicitly overridden
/// in a JSON configuration file.
mod defaults {
    /// Base byte address of the modeled memory region.
    pub const MEM_START_ADDR: u64 = 0;

    /// Total size of the modeled memory region (64 KiB).
    ///
    /// Accesses at or beyond `MEM_START_ADDR + MEM_SIZE` are rejected as
    /// out of range.
    pub const MEM_SIZE: u64 = 64 * 1024;

    /// Block (cache line) size in bytes: four words.
    pub const BLOCK_BYTES: u64 = 16;

    /// Word size in bytes.
    ///
    /// Every request address must be a multiple of this value.
    pub const WORD_BYTES: u64 = 4;

    /// Default number of sets.
    pub const NUM_SETS: usize = 8;

    /// Default associativity for the set-associative organization.
    pub const NUM_WAYS: usize = 2;
}

/// Cache organization types.
///
/// Selects how block base addresses map onto (set, way) slots. All three
/// organizations share one engine; the organization only fixes the shape of
/// the slot grid at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum Organization {
    /// One way per set; a block has exactly one possible slot.
    #[default]
    #[serde(alias = "Direct")]
    DirectMapped,
    /// Multiple sets of multiple ways; LRU arbitrates within a set.
    #[serde(alias = "SetAssoc")]
    SetAssociative,
    /// A single set containing every way; all ways compete under LRU.
    #[serde(alias = "FullyAssoc")]
    FullyAssociative,
}

/// Geometry of the modeled memory region and of the blocks moved between the
/// cache and the backing store.
///
/// These values are the constants of the backing-store contract: block reads
/// and writes always transfer `block_bytes / word_bytes` words at
/// block-aligned addresses offset from `start_addr`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    /// Base byte address of the memory region.
    pub start_addr: u64,
    /// Region size in bytes.
    pub size: u64,
    /// Block size in bytes; must be a multiple of `word_bytes`.
    pub block_bytes: u64,
    /// Word size in bytes; request addresses must be multiples of this.
    pub word_bytes: u64,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            start_addr: defaults::MEM_START_ADDR,
            size: defaults::MEM_SIZE,
            block_bytes: defaults::BLOCK_BYTES,
            word_bytes: defaults::WORD_BYTES,
        }
    }
}

impl MemoryConfig {
    /// Number of words in one block.
    #[inline]
    pub const fn words_per_block(&self) -> usize {
        (self.block_bytes / self.word_bytes) as usize
    }

    /// First byte address past the end of the region.
    #[inline]
    pub const fn end_addr(&self) -> u64 {
        self.start_addr + self.size
    }

    /// Checks the geometry for internal consistency.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::InvalidConfig`] if any size is zero, the block
    /// size is not a multiple of the word size, or the region start/size are
    /// not block-aligned (which would leave partial blocks at the edges).
    pub const fn validate(&self) -> Result<(), CacheError> {
        if self.word_bytes == 0 {
            return Err(CacheError::InvalidConfig("word size must be non-zero"));
        }
        if self.block_bytes == 0 || self.block_bytes % self.word_bytes != 0 {
            return Err(CacheError::InvalidConfig(
                "block size must be a non-zero multiple of the word size",
            ));
        }
        if self.start_addr % self.block_bytes != 0 {
            return Err(CacheError::InvalidConfig(
                "region start must be block-aligned",
            ));
        }
        if self.size == 0 || self.size % self.block_bytes != 0 {
            return Err(CacheError::InvalidConfig(
                "region size must be a non-zero multiple of the block size",
            ));
        }
        Ok(())
    }
}

/// Cache shape configuration.
///
/// `num_sets` and `num_ways` are both carried regardless of organization;
/// [`crate::Cache::new`] fixes one of them to 1 where the organization
/// demands it (ways for direct-mapped, sets for fully associative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Slot-grid organization.
    pub organization: Organization,
    /// Number of sets (ignored by the fully associative organization).
    pub num_sets: usize,
    /// Number of ways per set (ignored by the direct-mapped organization).
    pub num_ways: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            organization: Organization::default(),
            num_sets: defaults::NUM_SETS,
            num_ways: defaults::NUM_WAYS,
        }
    }
}

/// Root configuration structure containing all simulator settings.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use cachesim_core::config::Config;
///
/// let config = Config::default();
/// assert_eq!(config.memory.word_bytes, 4);
/// assert_eq!(config.memory.words_per_block(), 4);
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use cachesim_core::config::{Config, Organization};
///
/// let json = r#"{
///     "cache": {
///         "organization": "SetAssociative",
///         "num_sets": 4,
///         "num_ways": 2
///     },
///     "memory": {
///         "start_addr": 0,
///         "size": 65536,
///         "block_bytes": 16,
///         "word_bytes": 4
///     }
/// }"#;
///
/// let config: Config = serde_json::from_str(json).unwrap();
/// assert_eq!(config.cache.organization, Organization::SetAssociative);
/// assert_eq!(config.cache.num_sets, 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Cache organization and shape.
    pub cache: CacheConfig,
    /// Memory region and block geometry.
    pub memory: MemoryConfig,
}
