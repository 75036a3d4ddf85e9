// Runtime and build options

use serde::{Deserialize, Serialize};

/// Options controlling how words are evaluated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellOptions {
    /// Accept "Cat" when "cat" is valid.
    pub accept_first_uppercase: bool,
    /// Accept "CAT" when "cat" or "Cat" is valid.
    pub accept_all_uppercase: bool,
    /// Accept any word containing a digit without checking.
    pub ignore_numbers: bool,
}

impl Default for SpellOptions {
    fn default() -> Self {
        Self {
            accept_first_uppercase: true,
            accept_all_uppercase: true,
            ignore_numbers: false,
        }
    }
}

/// Options for the suggestion search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SuggestOptions {
    /// Capacity of the bounded heap, and the length of the final list.
    pub max_suggestions: usize,
    /// Candidates examined between two clock reads.
    pub check_interval: usize,
    /// Total time a [`SpellHandle`](crate::SpellHandle) spends on one word.
    pub time_budget_ms: f64,
    /// Candidates further away than this are never suggested.
    pub max_distance: Option<u32>,
}

impl Default for SuggestOptions {
    fn default() -> Self {
        Self {
            max_suggestions: 10,
            check_interval: 32,
            time_budget_ms: 100.0,
            max_distance: None,
        }
    }
}

/// Compound word limits, supplied with the dictionary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CompoundOptions {
    /// Shortest allowed compound part, in characters.
    pub min_part_len: usize,
    /// Most parts a compound may have.
    pub max_parts: usize,
}

impl Default for CompoundOptions {
    fn default() -> Self {
        Self {
            min_part_len: 3,
            max_parts: 3,
        }
    }
}

/// Runtime options held by a [`SpellHandle`](crate::SpellHandle).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    pub spell: SpellOptions,
    pub suggest: SuggestOptions,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let opts = EngineOptions::default();
        assert!(opts.spell.accept_first_uppercase);
        assert!(opts.spell.accept_all_uppercase);
        assert!(!opts.spell.ignore_numbers);
        assert_eq!(opts.suggest.max_suggestions, 10);
        assert_eq!(opts.suggest.time_budget_ms, 100.0);
        assert_eq!(CompoundOptions::default().min_part_len, 3);
        assert_eq!(CompoundOptions::default().max_parts, 3);
    }

    #[test]
    fn partial_config_fills_defaults() {
        let opts: EngineOptions =
            serde_json::from_str(r#"{"suggest": {"max_suggestions": 3}}"#).unwrap();
        assert_eq!(opts.suggest.max_suggestions, 3);
        assert_eq!(opts.suggest.check_interval, 32);
        assert_eq!(opts.spell, SpellOptions::default());
    }
}
