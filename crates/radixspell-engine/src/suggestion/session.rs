// Resumable, deadline-bounded suggestion search
//
// A session is the whole suspended search as data: the trie cursor, the
// bounded heap and the edit-distance rows. Each call to `search` resumes
// where the previous one stopped.

use std::cmp::Reverse;

use hashbrown::HashSet;
use radixspell_core::{CharIdx, CharacterIndex};
use radixspell_store::cursor::{Terminal, TrieCursor};
use radixspell_store::radix::RadixTrie;

use super::Candidate;
use super::distance::EditRows;
use super::heap::BoundedHeap;
use crate::clock::Clock;
use crate::engine::SpellEngine;
use crate::error::SpellError;
use crate::options::SuggestOptions;

/// Buffers allocated on the first increment of a session.
#[derive(Debug, Clone)]
struct Scratch {
    heap: BoundedHeap<Candidate>,
    rows: EditRows,
}

impl Scratch {
    /// Largest distance a new candidate may have, or `None` when the heap
    /// admits nothing.
    fn bound(&self, max_distance: Option<u32>) -> Option<u32> {
        let bound = max_distance.unwrap_or(u32::MAX);
        if !self.heap.is_full() {
            return Some(bound);
        }
        self.heap.worst().map(|worst| bound.min(worst.distance))
    }

    fn offer(&mut self, query: &[CharIdx], word: &[CharIdx], count: u32, bound: u32) {
        let Some(distance) = self.rows.distance_within(query, word, bound) else {
            return;
        };
        if distance == 0 {
            return;
        }
        self.heap.offer(Candidate {
            distance,
            count: Reverse(count),
            word: word.to_vec(),
        });
    }
}

/// Map `word` onto `alphabet`. Characters outside it get indices past its
/// end, numbered in order of first appearance in `extra`.
fn map_extended(alphabet: &CharacterIndex, extra: &mut Vec<char>, word: &str) -> Vec<CharIdx> {
    word.chars()
        .map(|c| {
            if let Some(idx) = alphabet.map_read_only(c) {
                return idx;
            }
            let slot = match extra.iter().position(|&e| e == c) {
                Some(slot) => slot,
                None => {
                    extra.push(c);
                    extra.len() - 1
                }
            };
            CharIdx::try_from(alphabet.char_count() + slot).unwrap_or(CharIdx::MAX)
        })
        .collect()
}

/// Search state for one misspelled word.
///
/// A session must only be resumed against the engine that created it.
#[derive(Debug, Clone)]
pub struct SuggestionSession {
    word: Vec<CharIdx>,
    /// Characters of the word and added candidates missing from the alphabet.
    extra_chars: Vec<char>,
    /// Candidates supplied by the caller, offered before the trie walk.
    extras: Vec<Vec<CharIdx>>,
    next_extra: usize,
    excluded: HashSet<Vec<CharIdx>>,
    scratch: Option<Scratch>,
    cursor: TrieCursor,
    buf: Vec<CharIdx>,
    max_suggestions: usize,
    check_interval: usize,
    max_distance: Option<u32>,
    examined: usize,
    finished: bool,
}

impl SuggestionSession {
    /// Session for `word` over the alphabet of `engine`.
    ///
    /// Characters outside the alphabet get indices no stored form uses, so
    /// they count as substitutions.
    pub fn new(engine: &SpellEngine, word: &str, options: &SuggestOptions) -> Self {
        let mut extra_chars = Vec::new();
        let word = map_extended(engine.alphabet(), &mut extra_chars, word);
        Self {
            word,
            extra_chars,
            extras: Vec::new(),
            next_extra: 0,
            excluded: HashSet::new(),
            scratch: None,
            cursor: TrieCursor::new(),
            buf: Vec::new(),
            max_suggestions: options.max_suggestions,
            check_interval: options.check_interval.max(1),
            max_distance: options.max_distance,
            examined: 0,
            finished: false,
        }
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Candidates pulled from the trie so far.
    #[inline]
    pub fn examined(&self) -> usize {
        self.examined
    }

    /// Rank `word` alongside the stored forms, as if stored once.
    ///
    /// Used for words the dictionary does not hold, such as a user's own
    /// additions. Adding to a finished search reopens it.
    pub fn add_candidate(&mut self, engine: &SpellEngine, word: &str) {
        let word = map_extended(engine.alphabet(), &mut self.extra_chars, word);
        if word.is_empty() || self.extras.contains(&word) {
            return;
        }
        self.extras.push(word);
        self.finished = false;
    }

    /// Never suggest `word`, even when the dictionary stores it.
    ///
    /// Applies to candidates considered after the call.
    pub fn exclude(&mut self, engine: &SpellEngine, word: &str) {
        let chars: Vec<char> = word.chars().collect();
        if let Some(word) = engine.alphabet().map_chars(&chars) {
            self.excluded.insert(word);
        }
    }

    /// Run one increment of the search.
    ///
    /// The clock is read every `check_interval` candidates; once it reaches
    /// `deadline_ms` the call returns `Ok(false)` with all state kept, unless
    /// `must_finish` is set. `Ok(true)` means every stored form has been
    /// considered.
    pub fn search<C: Clock + ?Sized>(
        &mut self,
        engine: &SpellEngine,
        clock: &C,
        deadline_ms: f64,
        must_finish: bool,
    ) -> Result<bool, SpellError> {
        if self.finished {
            return Ok(true);
        }
        let trie = engine.trie();
        let mut scratch = match self.scratch.take() {
            Some(scratch) => scratch,
            None => Scratch {
                heap: BoundedHeap::try_with_capacity(self.max_suggestions)?,
                rows: EditRows::try_new(trie.longest_word().max(self.word.len()) + 1)?,
            },
        };
        let outcome = self.run(trie, &mut scratch, clock, deadline_ms, must_finish);
        self.scratch = Some(scratch);
        let finished = outcome?;
        self.finished = finished;
        if finished {
            tracing::trace!(examined = self.examined, "suggestion search finished");
        } else {
            tracing::trace!(examined = self.examined, deadline_ms, "suggestion search yielded");
        }
        Ok(finished)
    }

    fn run<C: Clock + ?Sized>(
        &mut self,
        trie: &RadixTrie,
        scratch: &mut Scratch,
        clock: &C,
        deadline_ms: f64,
        must_finish: bool,
    ) -> Result<bool, SpellError> {
        while let Some(word) = self.extras.get(self.next_extra) {
            self.next_extra += 1;
            let Some(bound) = scratch.bound(self.max_distance) else {
                continue;
            };
            if word.len().abs_diff(self.word.len()) > bound as usize
                || self.excluded.contains(word)
            {
                continue;
            }
            scratch.rows.fit(word.len())?;
            scratch.offer(&self.word, word, 1, bound);
        }

        let mut countdown = self.check_interval;
        while let Some(terminal) = self.cursor.next(trie) {
            self.examined += 1;
            self.consider(trie, terminal, scratch);
            countdown -= 1;
            if countdown == 0 {
                countdown = self.check_interval;
                if !must_finish && clock.now_ms() >= deadline_ms {
                    return Ok(false);
                }
            }
        }
        Ok(true)
    }

    fn consider(&mut self, trie: &RadixTrie, terminal: Terminal, scratch: &mut Scratch) {
        let counter = trie.counter(terminal.counter);
        if !counter.attrs.suggestible() {
            return;
        }
        let Some(bound) = scratch.bound(self.max_distance) else {
            return;
        };
        if terminal.len.abs_diff(self.word.len()) > bound as usize {
            return;
        }
        self.cursor.word_into(trie, terminal, &mut self.buf);
        if !self.excluded.is_empty() && self.excluded.contains(&self.buf) {
            return;
        }
        scratch.offer(&self.word, &self.buf, counter.count, bound);
    }

    fn spell_out(&self, alphabet: &CharacterIndex, word: &[CharIdx]) -> String {
        word.iter()
            .filter_map(|&idx| match alphabet.char_of(idx) {
                Some(c) => Some(c),
                None => self.extra_chars.get(idx as usize - alphabet.char_count()).copied(),
            })
            .collect()
    }

    /// Ranked suggestions, or nothing while the search is unfinished.
    pub fn results(&self, engine: &SpellEngine) -> Vec<String> {
        if !self.finished {
            return Vec::new();
        }
        self.partial(engine)
    }

    /// Best suggestions found so far, ranked.
    pub fn partial(&self, engine: &SpellEngine) -> Vec<String> {
        let Some(scratch) = &self.scratch else {
            return Vec::new();
        };
        scratch
            .heap
            .to_sorted_vec()
            .iter()
            .map(|c| self.spell_out(engine.alphabet(), &c.word))
            .collect()
    }

    /// Ranked candidates with their distances.
    pub fn ranked(&self) -> Vec<Candidate> {
        self.scratch
            .as_ref()
            .map(|s| s.heap.to_sorted_vec())
            .unwrap_or_default()
    }
}
