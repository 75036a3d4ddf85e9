//! Read-only dictionary structures for radixspell.
//!
//! Everything here is built once while a dictionary loads and is only read
//! afterwards, so every type is safe to share between lookup sessions.
//!
//! # Architecture
//!
//! - [`bitset`] -- Fixed-width bit sets and packed bit matrices
//! - [`radix`] -- Arena radix trie of word forms with per-word counters
//! - [`cursor`] -- Resumable depth-first enumeration of stored words
//! - [`affix`] -- Per-class affix rule condition tables
//! - [`compound`] -- Compound rule jump/retry automaton

pub mod affix;
pub mod bitset;
pub mod compound;
pub mod cursor;
pub mod radix;

use radixspell_core::CharIdx;

/// Error type for building the dictionary structures.
///
/// Lookups never fail: a character outside the alphabet is a miss. Only
/// construction reports errors, and any of them aborts the dictionary load.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StoreError {
    #[error("out of memory while allocating {what}")]
    OutOfMemory { what: &'static str },
    #[error("character index {index} is outside the alphabet of {char_count} characters")]
    CharOutOfRange { index: CharIdx, char_count: usize },
    #[error("affix rule {rule} out of range: class has {count} rules")]
    RuleOutOfRange { rule: usize, count: usize },
    #[error("condition position {position} is beyond rule {rule}'s condition length {len}")]
    PositionOutOfRange {
        rule: usize,
        position: usize,
        len: usize,
    },
    #[error("condition tables have not been allocated")]
    TablesNotAllocated,
    #[error("invalid compound rule: {0}")]
    InvalidCompoundRule(String),
}

/// Reserve room for `additional` more elements or report which structure
/// could not grow.
pub(crate) fn try_grow<T>(
    v: &mut Vec<T>,
    additional: usize,
    what: &'static str,
) -> Result<(), StoreError> {
    v.try_reserve(additional)
        .map_err(|_| StoreError::OutOfMemory { what })
}
