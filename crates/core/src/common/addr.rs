//! Address decomposition.
//!
//! Every request address is split into the base address of the block that
//! contains it and the index of the requested word inside that block. The
//! arithmetic is shared by all three cache organizations and is the single
//! place where the alignment contract is enforced.

use crate::common::error::CacheError;
use crate::config::MemoryConfig;

/// A byte address resolved against the block grid of the memory region.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BlockOffset {
    /// Block-aligned base address of the containing block.
    pub base: u64,
    /// Index of the requested word within the block.
    pub word_index: usize,
}

/// Splits a byte address into its block base address and in-block word index.
///
/// Pure and side-effect free. The base address is always congruent to the
/// region start modulo the block size, so resident tags line up with the
/// backing store's block grid.
///
/// # Arguments
///
/// * `addr` - The requested byte address.
/// * `mem` - Geometry of the memory region.
///
/// # Errors
///
/// Returns [`CacheError::Misaligned`] if `addr` is not a multiple of the word
/// size (a caller bug; the address is never rounded), or
/// [`CacheError::OutOfRange`] if `addr` does not fall inside the modeled
/// region.
pub fn decompose(addr: u64, mem: &MemoryConfig) -> Result<BlockOffset, CacheError> {
    if addr % mem.word_bytes != 0 {
        return Err(CacheError::Misaligned(addr));
    }
    if addr < mem.start_addr || addr >= mem.end_addr() {
        return Err(CacheError::OutOfRange(addr));
    }

    let offset = (addr - mem.start_addr) % mem.block_bytes;
    Ok(BlockOffset {
        base: addr - offset,
        word_index: (offset / mem.word_bytes) as usize,
    })
}
