// Compound word splitting and rule checking

use hashbrown::HashMap;
use radixspell_core::{CharIdx, Flag};
use radixspell_store::compound::{CompoundCondition, CompoundFlag, CompoundRule};
use radixspell_store::radix::{CounterId, RadixTrie, WordAttrs};

use crate::dictionary::CompoundRuleSpec;
use crate::error::SpellError;
use crate::options::CompoundOptions;

/// Upper bound on flag combinations tried for one split of a word.
const MAX_FLAG_COMBINATIONS: usize = 4096;

/// Interned sets of compound flags. Id 0 is the empty set.
#[derive(Debug, Clone)]
struct FlagSets {
    sets: Vec<Vec<CompoundFlag>>,
    ids: HashMap<Vec<CompoundFlag>, u32>,
}

impl Default for FlagSets {
    fn default() -> Self {
        let mut ids = HashMap::new();
        ids.insert(Vec::new(), 0);
        Self {
            sets: vec![Vec::new()],
            ids,
        }
    }
}

impl FlagSets {
    fn intern(&mut self, mut set: Vec<CompoundFlag>) -> u32 {
        set.sort_unstable();
        set.dedup();
        if let Some(&id) = self.ids.get(&set) {
            return id;
        }
        let id = self.sets.len() as u32;
        self.sets.push(set.clone());
        self.ids.insert(set, id);
        id
    }

    fn get(&self, id: u32) -> &[CompoundFlag] {
        self.sets.get(id as usize).map_or(&[], Vec::as_slice)
    }
}

/// One level of the split search: where the part starts and which stored
/// prefixes of the remaining word can end it.
struct Frame {
    start: usize,
    ends: Vec<(usize, CounterId)>,
    next: usize,
}

/// Compiled compound rules plus the limits on compound parts.
#[derive(Debug, Clone)]
pub struct CompoundChecker {
    flag_ids: HashMap<Flag, CompoundFlag>,
    rules: Vec<CompoundRule>,
    sets: FlagSets,
    min_part_len: usize,
    max_parts: usize,
}

impl CompoundChecker {
    /// Compile `specs`. Flags named by a rule get dense ids from 1 in order
    /// of first use; 0 stands for every other flag.
    pub fn build(specs: &[CompoundRuleSpec], options: CompoundOptions) -> Result<Self, SpellError> {
        let mut flag_ids: HashMap<Flag, CompoundFlag> = HashMap::new();
        for spec in specs {
            for cond in &spec.conditions {
                let next = flag_ids.len() + 1;
                if next >= CompoundFlag::MAX as usize {
                    return Err(SpellError::InvalidInput(
                        "too many distinct compound flags".to_string(),
                    ));
                }
                flag_ids.entry(cond.flag).or_insert(next as CompoundFlag);
            }
        }
        let flag_count = flag_ids.len() + 1;
        let rules = specs
            .iter()
            .map(|spec| {
                let conditions: Vec<CompoundCondition> = spec
                    .conditions
                    .iter()
                    .map(|c| CompoundCondition {
                        flag: flag_ids[&c.flag],
                        negative: c.negative,
                        repeatable: c.repeatable,
                    })
                    .collect();
                CompoundRule::compile(&conditions, flag_count)
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            flag_ids,
            rules,
            sets: FlagSets::default(),
            min_part_len: options.min_part_len.max(1),
            max_parts: options.max_parts,
        })
    }

    pub fn rule_count(&self) -> usize {
        self.rules.len()
    }

    /// True when some compound rule mentions `flag`.
    #[inline]
    pub fn is_compound_flag(&self, flag: Flag) -> bool {
        self.flag_ids.contains_key(&flag)
    }

    /// Id of the set of compound flags among `flags`; 0 when there are none.
    pub fn intern(&mut self, flags: &[Flag]) -> u32 {
        let dense: Vec<CompoundFlag> = flags
            .iter()
            .filter_map(|f| self.flag_ids.get(f).copied())
            .collect();
        if dense.is_empty() {
            return 0;
        }
        self.sets.intern(dense)
    }

    /// Id of the union of two interned sets.
    pub fn merge(&mut self, a: u32, b: u32) -> u32 {
        if a == b || b == 0 {
            return a;
        }
        if a == 0 {
            return b;
        }
        let mut union = self.sets.get(a).to_vec();
        union.extend_from_slice(self.sets.get(b));
        self.sets.intern(union)
    }

    pub fn flag_set(&self, id: u32) -> &[CompoundFlag] {
        self.sets.get(id)
    }

    /// True when some choice of one flag per part satisfies some rule.
    pub fn accepts(&self, parts: &[&[CompoundFlag]]) -> bool {
        if parts.is_empty() || parts.iter().any(|p| p.is_empty()) {
            return false;
        }
        let mut choice = vec![0usize; parts.len()];
        let mut sequence = vec![0 as CompoundFlag; parts.len()];
        for _ in 0..MAX_FLAG_COMBINATIONS {
            for (k, part) in parts.iter().enumerate() {
                sequence[k] = part[choice[k]];
            }
            if self.rules.iter().any(|r| r.matches(&sequence)) {
                return true;
            }
            // Next combination, last part fastest.
            let mut k = parts.len();
            loop {
                if k == 0 {
                    return false;
                }
                k -= 1;
                choice[k] += 1;
                if choice[k] < parts[k].len() {
                    break;
                }
                choice[k] = 0;
            }
        }
        tracing::trace!(parts = parts.len(), "compound flag combinations exhausted");
        false
    }

    /// Stored prefixes of `word[start..]` usable as a compound part.
    fn frame(&self, trie: &RadixTrie, word: &[CharIdx], start: usize) -> Frame {
        let mut ends = Vec::new();
        trie.common_prefixes(&word[start..], &mut ends);
        let remaining = word.len() - start;
        ends.retain(|&(len, id)| {
            let counter = trie.counter(id);
            let rest = remaining - len;
            len >= self.min_part_len
                && (rest == 0 || rest >= self.min_part_len)
                && counter.compound_flags != 0
                && !counter.attrs.contains(WordAttrs::FORBIDDEN)
        });
        Frame {
            start,
            ends,
            next: 0,
        }
    }

    fn accepts_parts(&self, trie: &RadixTrie, parts: &[CounterId]) -> bool {
        let sets: Vec<&[CompoundFlag]> = parts
            .iter()
            .map(|&id| self.flag_set(trie.counter(id).compound_flags))
            .collect();
        self.accepts(&sets)
    }

    /// True when `word` splits into stored parts accepted by a compound rule.
    pub fn check(&self, trie: &RadixTrie, word: &[CharIdx]) -> bool {
        if self.rules.is_empty() || self.max_parts < 2 || word.len() < 2 * self.min_part_len {
            return false;
        }
        let mut stack = vec![self.frame(trie, word, 0)];
        let mut parts: Vec<CounterId> = Vec::with_capacity(self.max_parts);
        while let Some(frame) = stack.last_mut() {
            let Some(&(len, id)) = frame.ends.get(frame.next) else {
                stack.pop();
                parts.pop();
                continue;
            };
            frame.next += 1;
            let end = frame.start + len;
            parts.push(id);
            if end == word.len() {
                if parts.len() >= 2 && self.accepts_parts(trie, &parts) {
                    return true;
                }
                parts.pop();
            } else if parts.len() < self.max_parts {
                let next = self.frame(trie, word, end);
                stack.push(next);
            } else {
                parts.pop();
            }
        }
        false
    }
}
