//! Error definitions for the cache simulator.
//!
//! This module defines the failure surface of the library. It provides:
//! 1. **Contract Violations:** Misaligned or out-of-region request addresses,
//!    which signal a caller bug and are never silently corrected.
//! 2. **Configuration Errors:** Impossible geometries rejected at construction.
//!
//! Hit/miss outcomes are not errors; they are reported only through
//! [`crate::stats::CacheStats`].

use thiserror::Error;

/// Errors surfaced by cache construction and the load/store operations.
///
/// Every variant is fatal to the operation that produced it: the simulator
/// performs no retries and never rounds an offending address.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum CacheError {
    /// The requested address is not a multiple of the word size.
    ///
    /// Raised before any cache state is touched; the query counters are not
    /// incremented for a rejected request.
    #[error("misaligned address {0:#x}: not a multiple of the word size")]
    Misaligned(u64),

    /// The requested address falls outside the modeled memory region.
    #[error("address {0:#x} is outside the modeled memory region")]
    OutOfRange(u64),

    /// The cache or memory geometry is impossible to construct.
    #[error("invalid geometry: {0}")]
    InvalidConfig(&'static str),
}
