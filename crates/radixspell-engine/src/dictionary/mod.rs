// Dictionary input types
//
// These are the already parsed records a dictionary loader hands over. Files,
// encodings and format versions are the loader's business.

pub mod affixes;
pub mod builder;
pub mod condition;

use radixspell_core::Flag;
use radixspell_core::enums::AffixKind;
use serde::{Deserialize, Serialize};

use crate::options::CompoundOptions;

/// A stem and the flags attached to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DictionaryEntry {
    pub stem: String,
    #[serde(default)]
    pub flags: Vec<Flag>,
}

impl DictionaryEntry {
    pub fn new(stem: impl Into<String>, flags: &[Flag]) -> Self {
        Self {
            stem: stem.into(),
            flags: flags.to_vec(),
        }
    }
}

/// One affix rule.
///
/// The rule belongs to the class named by `class`; a stem carrying that flag
/// may take the rule. `condition` uses the usual notation: `.` for any
/// character, `[abc]` and `[^abc]` for sets, anything else literally. For a
/// suffix the condition is anchored at the end of the stem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AffixRuleSpec {
    pub kind: AffixKind,
    pub class: Flag,
    #[serde(default)]
    pub strip: String,
    #[serde(default)]
    pub append: String,
    #[serde(default)]
    pub condition: String,
    /// Flag carried by the derived form: a further affix class, a special
    /// flag or a compound flag.
    #[serde(default)]
    pub flag: Option<Flag>,
    /// May be combined with an affix of the opposite kind.
    #[serde(default)]
    pub combinable: bool,
}

/// One position of a compound rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompoundConditionSpec {
    pub flag: Flag,
    #[serde(default)]
    pub negative: bool,
    #[serde(default)]
    pub repeatable: bool,
}

/// An ordered compound rule.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CompoundRuleSpec {
    pub conditions: Vec<CompoundConditionSpec>,
}

/// Flags with a fixed meaning for this dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SpecialFlags {
    /// The form is valid only with an affix attached.
    pub need_affix: Option<Flag>,
    /// The affix is valid only together with another circumfix affix.
    pub circumfix: Option<Flag>,
    pub no_suggest: Option<Flag>,
    pub only_in_compound: Option<Flag>,
    pub forbidden: Option<Flag>,
}

impl SpecialFlags {
    /// True when `special` is set and occurs in `flags`.
    #[inline]
    pub fn marks(special: Option<Flag>, flags: &[Flag]) -> bool {
        special.is_some_and(|s| flags.contains(&s))
    }

    /// True when `flag` has one of the fixed meanings.
    pub fn is_special(&self, flag: Flag) -> bool {
        [
            self.need_affix,
            self.circumfix,
            self.no_suggest,
            self.only_in_compound,
            self.forbidden,
        ]
        .contains(&Some(flag))
    }
}

/// Everything needed to build a [`SpellEngine`](crate::SpellEngine).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DictionaryData {
    pub words: Vec<DictionaryEntry>,
    #[serde(default)]
    pub affixes: Vec<AffixRuleSpec>,
    #[serde(default)]
    pub compound_rules: Vec<CompoundRuleSpec>,
    #[serde(default)]
    pub special_flags: SpecialFlags,
    #[serde(default)]
    pub compound: CompoundOptions,
}

impl DictionaryData {
    /// Plain word list without affixes or compounds.
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            words: words
                .into_iter()
                .map(|w| DictionaryEntry::new(w, &[]))
                .collect(),
            ..Self::default()
        }
    }
}
