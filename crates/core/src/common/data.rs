//! Word payload definitions.
//!
//! All cache and backing-store traffic is made of whole, aligned words. The
//! payload width is fixed; the byte width used for address arithmetic comes
//! from [`crate::config::MemoryConfig`] and defaults to the same four bytes.

/// A single memory word as stored in cache lines and main memory.
///
/// Requests narrower than a word are outside the simulator's contract, so no
/// sub-word masking is ever applied to this type.
pub type Word = u32;
