// SpellEngine: the built, read-only dictionary and its lookups

use radixspell_core::enums::SpellResult;
use radixspell_core::{CharIdx, CharacterIndex};
use radixspell_store::radix::{RadixTrie, WordAttrs};
use serde::Serialize;

use crate::clock::{Clock, MonotonicClock};
use crate::dictionary::{DictionaryData, builder};
use crate::error::SpellError;
use crate::options::{SpellOptions, SuggestOptions};
use crate::speller::Speller;
use crate::speller::compound::CompoundChecker;
use crate::speller::pipeline::spell_check;
use crate::suggestion::session::SuggestionSession;

/// Figures collected while building a dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct DictionaryStats {
    pub stems: usize,
    /// Forms produced by expansion, repeats included.
    pub forms: usize,
    pub distinct_forms: usize,
    pub nodes: usize,
    pub alphabet: usize,
    pub affix_classes: usize,
    pub affix_rules: usize,
    pub compound_rules: usize,
    pub trie_bytes: usize,
}

/// Outcome of one suggestion increment.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Suggestions {
    /// Ranked words; empty until `finished`.
    pub words: Vec<String>,
    pub finished: bool,
}

/// A built dictionary.
///
/// Affix rules are applied while building: every derived form is stored in
/// the trie, so lookups never consult the rules again. Nothing mutates an
/// engine after [`build`](Self::build) returns, so one engine can serve any
/// number of lookups and suggestion sessions, also from several threads.
#[derive(Debug, Clone)]
pub struct SpellEngine {
    alphabet: CharacterIndex,
    trie: RadixTrie,
    compounds: CompoundChecker,
    stats: DictionaryStats,
}

impl SpellEngine {
    pub fn build(data: &DictionaryData) -> Result<Self, SpellError> {
        builder::build(data)
    }

    pub(crate) fn from_parts(
        alphabet: CharacterIndex,
        trie: RadixTrie,
        compounds: CompoundChecker,
        stats: DictionaryStats,
    ) -> Self {
        Self {
            alphabet,
            trie,
            compounds,
            stats,
        }
    }

    #[inline]
    pub fn alphabet(&self) -> &CharacterIndex {
        &self.alphabet
    }

    #[inline]
    pub fn trie(&self) -> &RadixTrie {
        &self.trie
    }

    #[inline]
    pub fn compounds(&self) -> &CompoundChecker {
        &self.compounds
    }

    #[inline]
    pub fn stats(&self) -> &DictionaryStats {
        &self.stats
    }

    /// Verdict for `word` exactly as written.
    pub fn check(&self, word: &str) -> SpellResult {
        let chars: Vec<char> = word.chars().collect();
        self.spell(&chars)
    }

    /// Verdict for a word already mapped to the alphabet.
    pub fn check_indices(&self, word: &[CharIdx]) -> SpellResult {
        if let Some(id) = self.trie.find(word) {
            let attrs = self.trie.counter(id).attrs;
            if attrs.contains(WordAttrs::FORBIDDEN) {
                return SpellResult::Forbidden;
            }
            if !attrs.contains(WordAttrs::ONLY_IN_COMPOUND) {
                return SpellResult::Ok;
            }
        }
        if self.compounds.check(&self.trie, word) {
            SpellResult::Compound
        } else {
            SpellResult::Failed
        }
    }

    /// True when `word` is valid under the default [`SpellOptions`].
    pub fn is_valid(&self, word: &str) -> bool {
        self.is_valid_with(word, &SpellOptions::default())
    }

    pub fn is_valid_with(&self, word: &str, options: &SpellOptions) -> bool {
        let chars: Vec<char> = word.chars().collect();
        spell_check(&chars, self, options)
    }

    /// Start a suggestion search for `word`.
    pub fn new_session(&self, word: &str, options: &SuggestOptions) -> SuggestionSession {
        SuggestionSession::new(self, word, options)
    }

    /// Run one increment of `session` until `deadline_ms` on the
    /// [`MonotonicClock`].
    pub fn suggest(
        &self,
        session: &mut SuggestionSession,
        deadline_ms: f64,
    ) -> Result<Suggestions, SpellError> {
        self.suggest_with_clock(session, &MonotonicClock, deadline_ms, false)
    }

    pub fn suggest_with_clock<C: Clock + ?Sized>(
        &self,
        session: &mut SuggestionSession,
        clock: &C,
        deadline_ms: f64,
        must_finish: bool,
    ) -> Result<Suggestions, SpellError> {
        let finished = session.search(self, clock, deadline_ms, must_finish)?;
        Ok(Suggestions {
            words: session.results(self),
            finished,
        })
    }

    /// Complete suggestion list for `word`, ignoring any deadline.
    pub fn suggest_all(
        &self,
        word: &str,
        options: &SuggestOptions,
    ) -> Result<Vec<String>, SpellError> {
        let mut session = self.new_session(word, options);
        let done = self.suggest_with_clock(&mut session, &MonotonicClock, 0.0, true)?;
        Ok(done.words)
    }
}

impl Speller for SpellEngine {
    fn spell(&self, word: &[char]) -> SpellResult {
        match self.alphabet.map_chars(word) {
            Some(indices) => self.check_indices(&indices),
            None => SpellResult::Failed,
        }
    }
}
