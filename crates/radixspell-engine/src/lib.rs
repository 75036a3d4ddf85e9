//! Spell checking engine built on a radix trie of word forms.
//!
//! A [`SpellEngine`] is built once from already parsed dictionary data
//! ([`dictionary::DictionaryData`]): stems, affix rules and compound rules.
//! Affix rules are expanded into concrete forms at build time, so validity is
//! a trie lookup with a compound-word fallback. Suggestions come from a
//! resumable, deadline-bounded edit-distance search over every stored form.
//!
//! - [`dictionary`] -- Input types and dictionary building
//! - [`speller`] -- Validity checks, case handling and compound splitting
//! - [`suggestion`] -- Edit distance, bounded heap and resumable search
//! - [`handle`] -- Convenience handle with options and a personal word list

pub mod clock;
pub mod dictionary;
pub mod engine;
pub mod error;
pub mod handle;
pub mod options;
pub mod speller;
pub mod suggestion;

pub use clock::{Clock, MonotonicClock};
pub use engine::{DictionaryStats, SpellEngine, Suggestions};
pub use error::SpellError;
pub use handle::SpellHandle;
pub use options::{CompoundOptions, EngineOptions, SpellOptions, SuggestOptions};
pub use radixspell_core::enums::{AffixKind, SpellResult};
pub use suggestion::session::SuggestionSession;
