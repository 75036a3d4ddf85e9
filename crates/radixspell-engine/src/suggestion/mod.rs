// Suggestion search: edit distance, bounded heap and resumable session

pub mod distance;
pub mod heap;
pub mod session;

use std::cmp::Reverse;

use radixspell_core::CharIdx;

/// A ranked suggestion candidate.
///
/// Field order is the ranking: smaller distance first, then the form produced
/// more often, then the index sequence so equal keys never depend on
/// enumeration order.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Candidate {
    pub distance: u32,
    pub count: Reverse<u32>,
    pub word: Vec<CharIdx>,
}
