// Affix classes: rules grouped by kind and class flag

use hashbrown::HashMap;
use radixspell_core::enums::AffixKind;
use radixspell_core::{CharIdx, CharacterIndex, Flag};
use radixspell_store::affix::AffixTable;
use radixspell_store::bitset::BitSet;

use super::AffixRuleSpec;
use super::condition::parse_condition;
use crate::error::SpellError;

/// One rule with its strings mapped to the alphabet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffixRule {
    pub strip: Vec<CharIdx>,
    pub append: Vec<CharIdx>,
    pub flag: Option<Flag>,
    pub combinable: bool,
}

/// All rules sharing a kind and a class flag, with their condition table.
#[derive(Debug, Clone)]
pub struct AffixClass {
    kind: AffixKind,
    flag: Flag,
    rules: Vec<AffixRule>,
    table: AffixTable,
}

impl AffixClass {
    #[inline]
    pub fn kind(&self) -> AffixKind {
        self.kind
    }

    #[inline]
    pub fn flag(&self) -> Flag {
        self.flag
    }

    #[inline]
    pub fn rules(&self) -> &[AffixRule] {
        &self.rules
    }

    #[inline]
    pub fn table(&self) -> &AffixTable {
        &self.table
    }

    /// Attach `rule` to `stem`.
    ///
    /// `None` when the stem does not carry the strip string at the attachment
    /// end, or when stripping would consume the whole stem.
    pub fn apply(&self, rule: &AffixRule, stem: &[CharIdx]) -> Option<Vec<CharIdx>> {
        if rule.strip.len() >= stem.len() {
            return None;
        }
        let keep = stem.len() - rule.strip.len();
        let mut word = Vec::with_capacity(keep + rule.append.len());
        match self.kind {
            AffixKind::Prefix => {
                if !stem.starts_with(&rule.strip) {
                    return None;
                }
                word.extend_from_slice(&rule.append);
                word.extend_from_slice(&stem[rule.strip.len()..]);
            }
            AffixKind::Suffix => {
                if !stem.ends_with(&rule.strip) {
                    return None;
                }
                word.extend_from_slice(&stem[..keep]);
                word.extend_from_slice(&rule.append);
            }
        }
        Some(word)
    }

    /// Every `(rule, derived form)` this class produces from `stem`.
    pub fn derive(
        &self,
        stem: &[CharIdx],
        scratch: &mut BitSet,
        matched: &mut Vec<usize>,
        out: &mut Vec<(usize, Vec<CharIdx>)>,
    ) {
        matched.clear();
        self.table.matching_rules(stem, scratch, matched);
        matched.sort_unstable();
        for &rule in matched.iter() {
            if let Some(word) = self.apply(&self.rules[rule], stem) {
                out.push((rule, word));
            }
        }
    }
}

/// False when the condition rules out the very characters the rule strips.
///
/// Both `condition` and the strip are read from the attachment end.
fn strip_fits_condition(
    kind: AffixKind,
    strip: &[CharIdx],
    condition: &[(Vec<CharIdx>, bool)],
) -> bool {
    condition.iter().enumerate().take(strip.len()).all(|(pos, (chars, negative))| {
        let c = strip[kind.word_position(pos, strip.len())];
        chars.contains(&c) != *negative
    })
}

/// Rules of one class collected before the alphabet is final.
struct PendingClass {
    kind: AffixKind,
    flag: Flag,
    rules: Vec<AffixRule>,
    /// Per rule, per position from the attachment end: characters and negation.
    conditions: Vec<Vec<(Vec<CharIdx>, bool)>>,
}

/// All affix classes of a dictionary.
#[derive(Debug, Clone, Default)]
pub struct AffixSet {
    classes: Vec<AffixClass>,
    by_flag: HashMap<Flag, Vec<usize>>,
}

impl AffixSet {
    /// Group `specs` into classes and build their condition tables.
    ///
    /// Every character of the rules is mapped first; the tables are sized
    /// for the alphabet as it stands afterwards, so callers must not map new
    /// characters once this returns.
    pub fn build(
        specs: &[AffixRuleSpec],
        alphabet: &mut CharacterIndex,
    ) -> Result<Self, SpellError> {
        let mut index: HashMap<(AffixKind, Flag), usize> = HashMap::new();
        let mut grouped: Vec<PendingClass> = Vec::new();

        for spec in specs {
            let slots = parse_condition(&spec.condition)?;
            let mut condition = Vec::with_capacity(slots.len());
            for slot in &slots {
                let chars = slot
                    .chars
                    .iter()
                    .map(|&c| alphabet.map(c))
                    .collect::<Result<Vec<_>, _>>()?;
                condition.push((chars, slot.negative));
            }
            // Tables count positions from the attachment end.
            if spec.kind == AffixKind::Suffix {
                condition.reverse();
            }
            let rule = AffixRule {
                strip: alphabet.map_all(&spec.strip)?,
                append: alphabet.map_all(&spec.append)?,
                flag: spec.flag,
                combinable: spec.combinable,
            };
            if !strip_fits_condition(spec.kind, &rule.strip, &condition) {
                tracing::warn!(
                    class = spec.class,
                    strip = %spec.strip,
                    condition = %spec.condition,
                    "affix rule can never apply"
                );
            }
            let class = *index.entry((spec.kind, spec.class)).or_insert_with(|| {
                grouped.push(PendingClass {
                    kind: spec.kind,
                    flag: spec.class,
                    rules: Vec::new(),
                    conditions: Vec::new(),
                });
                grouped.len() - 1
            });
            grouped[class].rules.push(rule);
            grouped[class].conditions.push(condition);
        }

        let char_count = alphabet.char_count();
        let mut set = AffixSet::default();
        for PendingClass {
            kind,
            flag,
            rules,
            conditions,
        } in grouped
        {
            let mut table = AffixTable::new(kind, conditions.iter().map(Vec::len).collect());
            table.set_condition_properties(char_count)?;
            for (rule, condition) in conditions.iter().enumerate() {
                for (position, (chars, negative)) in condition.iter().enumerate() {
                    table.set_rule_condition(rule, chars, position, *negative)?;
                }
            }
            set.by_flag.entry(flag).or_default().push(set.classes.len());
            set.classes.push(AffixClass {
                kind,
                flag,
                rules,
                table,
            });
        }
        Ok(set)
    }

    #[inline]
    pub fn classes(&self) -> &[AffixClass] {
        &self.classes
    }

    #[inline]
    pub fn class(&self, id: usize) -> &AffixClass {
        &self.classes[id]
    }

    /// Ids of the classes enabled by `flag`.
    pub fn classes_for(&self, flag: Flag) -> &[usize] {
        self.by_flag.get(&flag).map_or(&[], Vec::as_slice)
    }

    pub fn rule_count(&self) -> usize {
        self.classes.iter().map(|c| c.rules.len()).sum()
    }

    /// One scratch buffer per class, for [`AffixClass::derive`].
    pub fn scratch(&self) -> Result<Vec<BitSet>, SpellError> {
        self.classes
            .iter()
            .map(|c| c.table.scratch().map_err(SpellError::from))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn suffix(class: Flag, strip: &str, append: &str, condition: &str) -> AffixRuleSpec {
        AffixRuleSpec {
            kind: AffixKind::Suffix,
            class,
            strip: strip.into(),
            append: append.into(),
            condition: condition.into(),
            flag: None,
            combinable: false,
        }
    }

    fn derive_all(
        set: &AffixSet,
        alphabet: &CharacterIndex,
        flag: Flag,
        stem: &str,
    ) -> Vec<String> {
        let stem: Vec<CharIdx> = alphabet.map_chars(&stem.chars().collect::<Vec<_>>()).unwrap();
        let mut scratch = set.scratch().unwrap();
        let mut matched = Vec::new();
        let mut out = Vec::new();
        for &class in set.classes_for(flag) {
            set.class(class)
                .derive(&stem, &mut scratch[class], &mut matched, &mut out);
        }
        out.iter().map(|(_, w)| alphabet.word_of(w)).collect()
    }

    #[test]
    fn english_plural_rules() {
        let mut alphabet = CharacterIndex::new();
        alphabet.map_all("catflybox").unwrap();
        let set = AffixSet::build(
            &[
                suffix(1, "", "s", "[^sxy]"),
                suffix(1, "y", "ies", "[^aeiou]y"),
                suffix(1, "", "es", "[sx]"),
            ],
            &mut alphabet,
        )
        .unwrap();
        assert_eq!(set.classes().len(), 1);
        assert_eq!(set.rule_count(), 3);
        assert_eq!(derive_all(&set, &alphabet, 1, "cat"), vec!["cats"]);
        assert_eq!(derive_all(&set, &alphabet, 1, "fly"), vec!["flies"]);
        assert_eq!(derive_all(&set, &alphabet, 1, "box"), vec!["boxes"]);
        assert!(derive_all(&set, &alphabet, 2, "cat").is_empty());
    }

    #[test]
    fn prefix_and_suffix_share_a_flag() {
        let mut alphabet = CharacterIndex::new();
        alphabet.map_all("do").unwrap();
        let mut prefix = suffix(5, "", "re", "");
        prefix.kind = AffixKind::Prefix;
        let set =
            AffixSet::build(&[prefix, suffix(5, "", "ne", "")], &mut alphabet).unwrap();
        assert_eq!(set.classes_for(5).len(), 2);
        assert!(set.class(0).table().is_unconditional());
        assert_eq!(derive_all(&set, &alphabet, 5, "do"), vec!["redo", "done"]);
    }

    #[test]
    fn strip_must_be_present_and_shorter_than_stem() {
        let mut alphabet = CharacterIndex::new();
        alphabet.map_all("ay").unwrap();
        let set = AffixSet::build(
            &[suffix(1, "y", "ies", ""), suffix(1, "ay", "x", "")],
            &mut alphabet,
        )
        .unwrap();
        assert_eq!(derive_all(&set, &alphabet, 1, "aa"), Vec::<String>::new());
        assert_eq!(derive_all(&set, &alphabet, 1, "ay"), vec!["aies"]);
    }

    #[test]
    fn strip_checked_against_condition() {
        let cond = |chars: &[CharIdx], negative| (chars.to_vec(), negative);
        // "y" stripped under condition "[^aeiou]y" (read from the end: y, then [^aeiou]).
        let y_after_consonant = [cond(&[5], false), cond(&[0, 1], true)];
        assert!(strip_fits_condition(AffixKind::Suffix, &[5], &y_after_consonant));
        assert!(!strip_fits_condition(AffixKind::Suffix, &[5], &[cond(&[6], false)]));
        assert!(strip_fits_condition(AffixKind::Prefix, &[1, 2], &[cond(&[1], false)]));
        let not_second = [cond(&[], true), cond(&[2], true)];
        assert!(!strip_fits_condition(AffixKind::Prefix, &[1, 2], &not_second));
        assert!(strip_fits_condition(AffixKind::Suffix, &[], &[cond(&[3], false)]));
    }

    #[test]
    fn malformed_condition_aborts_build() {
        let mut alphabet = CharacterIndex::new();
        let err = AffixSet::build(&[suffix(1, "", "s", "[^s")], &mut alphabet).unwrap_err();
        assert!(matches!(err, SpellError::InvalidCondition { .. }));
    }
}
