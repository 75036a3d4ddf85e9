// SpellHandle: engine plus runtime options and a personal word list

use hashbrown::HashMap;
use radixspell_core::case::{CaseType, detect_case, with_case};
use radixspell_core::enums::SpellResult;

use crate::clock::{Clock, MonotonicClock};
use crate::dictionary::DictionaryData;
use crate::engine::SpellEngine;
use crate::error::SpellError;
use crate::options::{EngineOptions, SpellOptions, SuggestOptions};
use crate::speller::Speller;
use crate::speller::pipeline::spell_check;

/// What the user said about a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PersonalMark {
    Added,
    Ignored,
    Removed,
}

/// Engine verdicts overridden by the personal word list.
struct PersonalSpeller<'a> {
    engine: &'a SpellEngine,
    personal: &'a HashMap<String, PersonalMark>,
}

impl Speller for PersonalSpeller<'_> {
    fn spell(&self, word: &[char]) -> SpellResult {
        if !self.personal.is_empty() {
            let key: String = word.iter().collect();
            match self.personal.get(&key) {
                Some(PersonalMark::Added | PersonalMark::Ignored) => return SpellResult::Ok,
                Some(PersonalMark::Removed) => return SpellResult::Failed,
                None => {}
            }
        }
        self.engine.spell(word)
    }
}

/// Convenience front end for interactive use.
///
/// Holds one engine, the caller's options and the words the user added,
/// ignored or removed. Suggestions are computed within
/// [`SuggestOptions::time_budget_ms`].
#[derive(Debug, Clone)]
pub struct SpellHandle<C: Clock = MonotonicClock> {
    engine: SpellEngine,
    options: EngineOptions,
    clock: C,
    personal: HashMap<String, PersonalMark>,
}

impl SpellHandle {
    pub fn new(engine: SpellEngine) -> Self {
        Self::with_clock(engine, MonotonicClock)
    }

    pub fn from_data(data: &DictionaryData) -> Result<Self, SpellError> {
        Ok(Self::new(SpellEngine::build(data)?))
    }
}

impl<C: Clock> SpellHandle<C> {
    pub fn with_clock(engine: SpellEngine, clock: C) -> Self {
        Self {
            engine,
            options: EngineOptions::default(),
            clock,
            personal: HashMap::new(),
        }
    }

    #[inline]
    pub fn engine(&self) -> &SpellEngine {
        &self.engine
    }

    #[inline]
    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn set_options(&mut self, options: EngineOptions) {
        self.options = options;
    }

    pub fn set_spell_options(&mut self, options: SpellOptions) {
        self.options.spell = options;
    }

    pub fn set_suggest_options(&mut self, options: SuggestOptions) {
        self.options.suggest = options;
    }

    pub fn set_max_suggestions(&mut self, max: usize) {
        self.options.suggest.max_suggestions = max;
    }

    /// Accept `word` from now on and offer it as a suggestion. Undoes an
    /// earlier removal.
    ///
    /// Returns false when there was nothing to do.
    pub fn add_word(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        match self.personal.get(word) {
            Some(PersonalMark::Added) => false,
            Some(PersonalMark::Removed) => {
                self.personal.remove(word);
                true
            }
            _ if self.engine.check(word).is_valid() => false,
            _ => {
                self.personal.insert(word.to_string(), PersonalMark::Added);
                true
            }
        }
    }

    /// Accept `word` without offering it as a suggestion.
    pub fn ignore_word(&mut self, word: &str) -> bool {
        if word.is_empty() || self.personal.contains_key(word) {
            return false;
        }
        self.personal.insert(word.to_string(), PersonalMark::Ignored);
        true
    }

    /// Reject `word` from now on. Undoes an earlier addition or ignore.
    ///
    /// Only words the dictionary accepts can be removed; a removed word is
    /// also never suggested.
    pub fn remove_word(&mut self, word: &str) -> bool {
        match self.personal.get(word) {
            Some(PersonalMark::Removed) => false,
            Some(PersonalMark::Added | PersonalMark::Ignored) => {
                self.personal.remove(word);
                true
            }
            None if self.engine.check(word).is_valid() => {
                self.personal.insert(word.to_string(), PersonalMark::Removed);
                true
            }
            None => false,
        }
    }

    /// True when `word` is correctly spelled.
    pub fn spell(&self, word: &str) -> bool {
        let chars: Vec<char> = word.chars().collect();
        let speller = PersonalSpeller {
            engine: &self.engine,
            personal: &self.personal,
        };
        spell_check(&chars, &speller, &self.options.spell)
    }

    /// Suggestions for `word`, best first.
    ///
    /// The search runs in increments until it completes or the time budget
    /// is spent; in the latter case the best words found so far are returned.
    /// Capitalized and all-uppercase words are searched in lowercase and the
    /// suggestions are given the word's casing.
    pub fn suggest(&self, word: &str) -> Result<Vec<String>, SpellError> {
        let chars: Vec<char> = word.chars().collect();
        let case = detect_case(&chars);
        let query: String = match case {
            CaseType::FirstUpper | CaseType::AllUpper => {
                with_case(&chars, CaseType::AllLower).into_iter().collect()
            }
            _ => word.to_string(),
        };

        let opts = &self.options.suggest;
        let deadline = self.clock.deadline_in(opts.time_budget_ms);
        let mut session = self.engine.new_session(&query, opts);
        for (personal, mark) in &self.personal {
            match mark {
                PersonalMark::Added => session.add_candidate(&self.engine, personal),
                PersonalMark::Removed => session.exclude(&self.engine, personal),
                PersonalMark::Ignored => {}
            }
        }
        let mut finished = session.search(&self.engine, &self.clock, deadline, false)?;
        while !finished && self.clock.now_ms() < deadline {
            finished = session.search(&self.engine, &self.clock, deadline, false)?;
        }
        if !finished {
            tracing::debug!(
                word,
                examined = session.examined(),
                "suggestion time budget spent"
            );
        }

        let words = session
            .partial(&self.engine)
            .into_iter()
            .map(|w| match case {
                CaseType::FirstUpper | CaseType::AllUpper => {
                    let cased: Vec<char> = w.chars().collect();
                    with_case(&cased, case).into_iter().collect()
                }
                _ => w,
            })
            .collect();
        Ok(words)
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;

    /// Time stands still unless advanced by hand.
    #[derive(Default)]
    struct FrozenClock(Cell<f64>);

    impl Clock for FrozenClock {
        fn now_ms(&self) -> f64 {
            self.0.get()
        }
    }

    /// Every read moves time past any budget.
    struct RunawayClock(Cell<f64>);

    impl Clock for RunawayClock {
        fn now_ms(&self) -> f64 {
            let now = self.0.get();
            self.0.set(now + 1000.0);
            now
        }
    }

    fn handle() -> SpellHandle<FrozenClock> {
        let engine =
            SpellEngine::build(&DictionaryData::from_words(["cat", "cats", "dog", "paris"]))
                .unwrap();
        SpellHandle::with_clock(engine, FrozenClock::default())
    }

    #[test]
    fn spell_with_case_variants() {
        let h = handle();
        assert!(h.spell("cat"));
        assert!(h.spell("Cat"));
        assert!(h.spell("CATS"));
        assert!(!h.spell("cAt"));
        assert!(h.spell(""));
    }

    #[test]
    fn personal_words_override_the_dictionary() {
        let mut h = handle();
        assert!(!h.spell("kat"));
        assert!(h.add_word("kat"));
        assert!(!h.add_word("kat"));
        assert!(h.spell("kat"));
        assert!(h.spell("Kat"));

        assert!(!h.add_word("cat"));
        assert!(h.remove_word("cat"));
        assert!(!h.spell("cat"));
        assert!(!h.remove_word("cat"));
        assert!(h.add_word("cat"));
        assert!(h.spell("cat"));

        assert!(h.remove_word("kat"));
        assert!(!h.spell("kat"));
        assert!(!h.remove_word("zebra"));

        assert!(h.ignore_word("zebra"));
        assert!(!h.ignore_word("zebra"));
        assert!(h.spell("zebra"));
    }

    #[test]
    fn suggestions_respect_case_and_removals() {
        let mut h = handle();
        assert_eq!(h.suggest("caat").unwrap(), vec!["cat", "cats", "dog"]);
        assert_eq!(h.suggest("Caat").unwrap(), vec!["Cat", "Cats", "Dog"]);
        assert_eq!(h.suggest("CAAT").unwrap()[..2], ["CAT", "CATS"]);
        h.remove_word("cats");
        assert_eq!(h.suggest("caat").unwrap()[..2], ["cat", "dog"]);
        h.set_max_suggestions(1);
        assert_eq!(h.suggest("caat").unwrap(), vec!["cat"]);
    }

    #[test]
    fn added_words_are_suggested_and_ignored_words_are_not() {
        let engine = SpellEngine::build(&DictionaryData::from_words(["cat", "dog"])).unwrap();
        let mut h = SpellHandle::with_clock(engine, FrozenClock::default());
        assert!(h.add_word("kat"));
        assert!(h.ignore_word("kaet"));
        assert_eq!(h.suggest("kaat").unwrap(), vec!["kat", "cat", "dog"]);
        assert_eq!(h.suggest("Kaat").unwrap(), vec!["Kat", "Cat", "Dog"]);
        h.remove_word("kat");
        assert_eq!(h.suggest("kaat").unwrap(), vec!["cat", "dog"]);
    }

    #[test]
    fn removed_words_do_not_take_suggestion_slots() {
        let engine =
            SpellEngine::build(&DictionaryData::from_words(["cat", "cats", "cot", "dog"]))
                .unwrap();
        let mut h = SpellHandle::with_clock(engine, FrozenClock::default());
        h.set_max_suggestions(2);
        assert_eq!(h.suggest("caat").unwrap(), vec!["cat", "cats"]);
        assert!(h.remove_word("cat"));
        assert_eq!(h.suggest("caat").unwrap(), vec!["cats", "cot"]);
    }

    #[test]
    fn spent_budget_returns_partial_results() {
        let words: Vec<String> = (0..200).map(|i| format!("w{i}")).collect();
        let engine = SpellEngine::build(&DictionaryData::from_words(words)).unwrap();
        let mut h = SpellHandle::with_clock(engine, RunawayClock(Cell::new(0.0)));
        h.set_suggest_options(SuggestOptions {
            check_interval: 1,
            ..SuggestOptions::default()
        });
        let partial = h.suggest("w1").unwrap();
        assert!(partial.len() <= 10);
        assert!(!partial.is_empty());
    }
}
