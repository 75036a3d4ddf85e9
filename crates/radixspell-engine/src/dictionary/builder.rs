// Dictionary building: alphabet, affix tables, inflection expansion, trie
//
// Every stem is expanded into all the forms its affix flags allow, and each
// form goes into the trie with its usage attributes and compound flags.
// Lookups afterwards never apply affix rules.

use radixspell_core::enums::AffixKind;
use radixspell_core::{CharIdx, CharacterIndex, Flag};
use radixspell_store::bitset::BitSet;
use radixspell_store::radix::{RadixTrie, WordAttrs};

use super::affixes::AffixSet;
use super::{DictionaryData, SpecialFlags};
use crate::engine::{DictionaryStats, SpellEngine};
use crate::error::SpellError;
use crate::speller::compound::CompoundChecker;

/// A form produced by one affix rule, kept for prefix/suffix cross products.
struct Derived {
    class: usize,
    rule: usize,
    word: Vec<CharIdx>,
    attrs: WordAttrs,
    compound: u32,
    circumfix: bool,
}

/// Expands stems into forms and stores them.
struct Expander<'a> {
    affixes: &'a AffixSet,
    special: SpecialFlags,
    compounds: &'a mut CompoundChecker,
    trie: &'a mut RadixTrie,
    scratch: Vec<BitSet>,
    matched: Vec<usize>,
    forms: usize,
}

impl Expander<'_> {
    fn attrs_of(&self, flags: &[Flag]) -> WordAttrs {
        let mut attrs = WordAttrs::NONE;
        if SpecialFlags::marks(self.special.no_suggest, flags) {
            attrs.insert(WordAttrs::NO_SUGGEST);
        }
        if SpecialFlags::marks(self.special.only_in_compound, flags) {
            attrs.insert(WordAttrs::ONLY_IN_COMPOUND);
        }
        if SpecialFlags::marks(self.special.forbidden, flags) {
            attrs.insert(WordAttrs::FORBIDDEN);
        }
        attrs
    }

    fn store(
        &mut self,
        word: &[CharIdx],
        attrs: WordAttrs,
        compound: u32,
    ) -> Result<(), SpellError> {
        let inserted = self.trie.insert(word)?;
        self.forms += 1;
        if inserted.fresh {
            let counter = self.trie.counter_mut(inserted.counter);
            counter.attrs = attrs;
            counter.compound_flags = compound;
        } else {
            let previous = self.trie.counter(inserted.counter).compound_flags;
            let merged = self.compounds.merge(previous, compound);
            let counter = self.trie.counter_mut(inserted.counter);
            counter.attrs = counter.attrs.merge(attrs);
            counter.compound_flags = merged;
        }
        Ok(())
    }

    /// Forms produced by affix class `class` from `stem`.
    fn derive(&mut self, class: usize, stem: &[CharIdx]) -> Vec<(usize, Vec<CharIdx>)> {
        let mut out = Vec::new();
        self.affixes
            .class(class)
            .derive(stem, &mut self.scratch[class], &mut self.matched, &mut out);
        out
    }

    /// Affix classes enabled by `flags`, each once.
    fn classes_for(&self, flags: &[Flag]) -> Vec<usize> {
        let mut classes: Vec<usize> = flags
            .iter()
            .flat_map(|&f| self.affixes.classes_for(f).iter().copied())
            .collect();
        classes.sort_unstable();
        classes.dedup();
        classes
    }

    fn expand(&mut self, stem: &[CharIdx], flags: &[Flag]) -> Result<(), SpellError> {
        let affixes = self.affixes;
        let attrs = self.attrs_of(flags);
        let compound = self.compounds.intern(flags);
        if !SpecialFlags::marks(self.special.need_affix, flags) {
            self.store(stem, attrs, compound)?;
        }

        let mut prefixed = Vec::new();
        let mut suffixed = Vec::new();
        for class in self.classes_for(flags) {
            for (rule_id, word) in self.derive(class, stem) {
                let rule = &affixes.class(class).rules()[rule_id];
                let rule_flags = rule.flag.as_slice();
                let combinable = rule.combinable;
                let next_flag = rule.flag;
                let derived = Derived {
                    class,
                    rule: rule_id,
                    attrs: attrs.union(self.attrs_of(rule_flags)),
                    compound: {
                        let own = self.compounds.intern(rule_flags);
                        self.compounds.merge(compound, own)
                    },
                    circumfix: SpecialFlags::marks(self.special.circumfix, rule_flags),
                    word,
                };
                let needs_affix = SpecialFlags::marks(self.special.need_affix, rule_flags);
                if !needs_affix && !derived.circumfix {
                    self.store(&derived.word, derived.attrs, derived.compound)?;
                }
                if let Some(next) = next_flag {
                    self.expand_second_level(&derived, next)?;
                }
                if combinable {
                    match affixes.class(class).kind() {
                        AffixKind::Prefix => prefixed.push(derived),
                        AffixKind::Suffix => suffixed.push(derived),
                    }
                }
            }
        }

        for prefix in &prefixed {
            for suffix in &suffixed {
                if prefix.circumfix != suffix.circumfix {
                    continue;
                }
                // The prefix condition is checked against the suffixed form.
                let Some((_, word)) = self
                    .derive(prefix.class, &suffix.word)
                    .into_iter()
                    .find(|(rule, _)| *rule == prefix.rule)
                else {
                    continue;
                };
                let compound = self.compounds.merge(prefix.compound, suffix.compound);
                self.store(&word, prefix.attrs.union(suffix.attrs), compound)?;
            }
        }
        Ok(())
    }

    /// Apply the classes named by a rule's continuation flag to its form.
    fn expand_second_level(&mut self, first: &Derived, flag: Flag) -> Result<(), SpellError> {
        let affixes = self.affixes;
        for &class in affixes.classes_for(flag) {
            for (rule_id, word) in self.derive(class, &first.word) {
                let rule_flags = affixes.class(class).rules()[rule_id].flag.as_slice();
                if SpecialFlags::marks(self.special.circumfix, rule_flags) != first.circumfix
                    || SpecialFlags::marks(self.special.need_affix, rule_flags)
                {
                    continue;
                }
                let attrs = first.attrs.union(self.attrs_of(rule_flags));
                let own = self.compounds.intern(rule_flags);
                let compound = self.compounds.merge(first.compound, own);
                self.store(&word, attrs, compound)?;
            }
        }
        Ok(())
    }
}

/// Build a [`SpellEngine`] from parsed dictionary data.
///
/// Any error leaves nothing behind: the engine only exists once every table
/// has been built.
pub fn build(data: &DictionaryData) -> Result<SpellEngine, SpellError> {
    let mut alphabet = CharacterIndex::new();
    let mut stems = Vec::with_capacity(data.words.len());
    for entry in &data.words {
        if entry.stem.is_empty() {
            return Err(SpellError::InvalidInput("empty stem".to_string()));
        }
        stems.push(alphabet.map_all(&entry.stem)?);
    }

    let affixes = AffixSet::build(&data.affixes, &mut alphabet)?;
    let mut compounds = CompoundChecker::build(&data.compound_rules, data.compound)?;
    warn_unused_continuations(&affixes, &data.special_flags, &compounds);

    let mut trie = RadixTrie::new(alphabet.char_count())?;
    let mut expander = Expander {
        affixes: &affixes,
        special: data.special_flags,
        compounds: &mut compounds,
        trie: &mut trie,
        scratch: affixes.scratch()?,
        matched: Vec::new(),
        forms: 0,
    };
    for (entry, stem) in data.words.iter().zip(&stems) {
        expander.expand(stem, &entry.flags)?;
    }
    let forms = expander.forms;

    let stats = DictionaryStats {
        stems: data.words.len(),
        forms,
        distinct_forms: trie.counter_count(),
        nodes: trie.node_count(),
        alphabet: alphabet.char_count(),
        affix_classes: affixes.classes().len(),
        affix_rules: affixes.rule_count(),
        compound_rules: compounds.rule_count(),
        trie_bytes: trie.memory_size(),
    };
    tracing::debug!(
        stems = stats.stems,
        forms = stats.forms,
        distinct_forms = stats.distinct_forms,
        nodes = stats.nodes,
        alphabet = stats.alphabet,
        affix_classes = stats.affix_classes,
        affix_rules = stats.affix_rules,
        compound_rules = stats.compound_rules,
        trie_bytes = stats.trie_bytes,
        "dictionary built"
    );

    Ok(SpellEngine::from_parts(alphabet, trie, compounds, stats))
}

/// Continuation flags that mean nothing are almost always loader mistakes.
fn warn_unused_continuations(
    affixes: &AffixSet,
    special: &SpecialFlags,
    compounds: &CompoundChecker,
) {
    for class in affixes.classes() {
        for rule in class.rules() {
            let Some(flag) = rule.flag else { continue };
            if affixes.classes_for(flag).is_empty()
                && !special.is_special(flag)
                && !compounds.is_compound_flag(flag)
            {
                tracing::warn!(class = class.flag(), flag, "affix rule flag has no meaning");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dictionary::{AffixRuleSpec, DictionaryEntry};
    use radixspell_core::enums::SpellResult;

    const PLURAL: Flag = 1;
    const UN: Flag = 2;
    const NESS: Flag = 3;
    const NEED_AFFIX: Flag = 20;
    const CIRCUMFIX: Flag = 21;
    const FORBIDDEN: Flag = 22;
    const NO_SUGGEST: Flag = 23;
    const GE: Flag = 4;
    const T: Flag = 5;

    fn rule(
        kind: AffixKind,
        class: Flag,
        strip: &str,
        append: &str,
        condition: &str,
    ) -> AffixRuleSpec {
        AffixRuleSpec {
            kind,
            class,
            strip: strip.into(),
            append: append.into(),
            condition: condition.into(),
            flag: None,
            combinable: true,
        }
    }

    fn special() -> SpecialFlags {
        SpecialFlags {
            need_affix: Some(NEED_AFFIX),
            circumfix: Some(CIRCUMFIX),
            forbidden: Some(FORBIDDEN),
            no_suggest: Some(NO_SUGGEST),
            only_in_compound: None,
        }
    }

    fn data(words: Vec<DictionaryEntry>, affixes: Vec<AffixRuleSpec>) -> DictionaryData {
        DictionaryData {
            words,
            affixes,
            special_flags: special(),
            ..DictionaryData::default()
        }
    }

    #[test]
    fn stems_and_single_affixes() {
        let engine = build(&data(
            vec![DictionaryEntry::new("cat", &[PLURAL])],
            vec![rule(AffixKind::Suffix, PLURAL, "", "s", "")],
        ))
        .unwrap();
        assert!(engine.is_valid("cat"));
        assert!(engine.is_valid("cats"));
        assert!(!engine.is_valid("catss"));
        assert_eq!(engine.stats().distinct_forms, 2);
    }

    #[test]
    fn combinable_prefix_and_suffix_cross() {
        let engine = build(&data(
            vec![DictionaryEntry::new("happy", &[UN, NESS])],
            vec![
                rule(AffixKind::Prefix, UN, "", "un", "."),
                rule(AffixKind::Suffix, NESS, "y", "iness", "y"),
            ],
        ))
        .unwrap();
        for word in ["happy", "unhappy", "happiness", "unhappiness"] {
            assert!(engine.is_valid(word), "{word}");
        }
        assert!(!engine.is_valid("happyness"));
    }

    #[test]
    fn non_combinable_rules_do_not_cross() {
        let mut un = rule(AffixKind::Prefix, UN, "", "un", "");
        un.combinable = false;
        let engine = build(&data(
            vec![DictionaryEntry::new("happy", &[UN, NESS])],
            vec![un, rule(AffixKind::Suffix, NESS, "y", "iness", "y")],
        ))
        .unwrap();
        assert!(engine.is_valid("unhappy"));
        assert!(!engine.is_valid("unhappiness"));
    }

    #[test]
    fn need_affix_hides_the_bare_stem() {
        let engine = build(&data(
            vec![DictionaryEntry::new("lov", &[NEED_AFFIX, PLURAL])],
            vec![rule(AffixKind::Suffix, PLURAL, "", "ed", "")],
        ))
        .unwrap();
        assert!(!engine.is_valid("lov"));
        assert!(engine.is_valid("loved"));
    }

    #[test]
    fn continuation_flags_apply_a_second_class() {
        let mut er = rule(AffixKind::Suffix, PLURAL, "", "er", "");
        er.flag = Some(NESS);
        let engine = build(&data(
            vec![DictionaryEntry::new("walk", &[PLURAL])],
            vec![er, rule(AffixKind::Suffix, NESS, "", "s", "")],
        ))
        .unwrap();
        assert!(engine.is_valid("walker"));
        assert!(engine.is_valid("walkers"));
        assert!(!engine.is_valid("walks"));
    }

    #[test]
    fn circumfix_needs_both_sides() {
        let mut ge = rule(AffixKind::Prefix, GE, "", "ge", "");
        ge.flag = Some(CIRCUMFIX);
        let mut t = rule(AffixKind::Suffix, T, "", "t", "");
        t.flag = Some(CIRCUMFIX);
        let words = vec![DictionaryEntry::new("sag", &[GE, T])];
        let engine = build(&data(words, vec![ge, t])).unwrap();
        assert!(engine.is_valid("sag"));
        assert!(engine.is_valid("gesagt"));
        assert!(!engine.is_valid("gesag"));
        assert!(!engine.is_valid("sagt"));
    }

    #[test]
    fn forbidden_and_no_suggest_attributes() {
        let engine = build(&data(
            vec![
                DictionaryEntry::new("irregardless", &[FORBIDDEN]),
                DictionaryEntry::new("darn", &[NO_SUGGEST, PLURAL]),
            ],
            vec![rule(AffixKind::Suffix, PLURAL, "", "s", "")],
        ))
        .unwrap();
        assert_eq!(engine.check("irregardless"), SpellResult::Forbidden);
        assert!(engine.is_valid("darn"));
        assert!(engine.is_valid("darns"));
        let darns = engine.alphabet().map_chars(&['d', 'a', 'r', 'n', 's']).unwrap();
        let id = engine.trie().find(&darns).unwrap();
        assert!(engine.trie().counter(id).attrs.contains(WordAttrs::NO_SUGGEST));
    }

    #[test]
    fn repeated_productions_count_and_merge() {
        let engine = build(&data(
            vec![
                DictionaryEntry::new("cat", &[NO_SUGGEST]),
                DictionaryEntry::new("cat", &[]),
            ],
            vec![],
        ))
        .unwrap();
        let cat = engine.alphabet().map_chars(&['c', 'a', 't']).unwrap();
        let id = engine.trie().find(&cat).unwrap();
        let counter = engine.trie().counter(id);
        assert_eq!(counter.count, 2);
        assert!(counter.attrs.suggestible());
    }

    #[test]
    fn invalid_input_aborts_build() {
        let err = build(&DictionaryData::from_words([""])).unwrap_err();
        assert!(matches!(err, SpellError::InvalidInput(_)));

        let err = build(&data(
            vec![DictionaryEntry::new("cat", &[PLURAL])],
            vec![rule(AffixKind::Suffix, PLURAL, "", "s", "[s")],
        ))
        .unwrap_err();
        assert!(matches!(err, SpellError::InvalidCondition { .. }));
    }
}
