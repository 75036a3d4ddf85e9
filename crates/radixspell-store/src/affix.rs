// Affix rule condition tables
//
// All rules of one affix class share a packed bit matrix. Row
// `p * char_count + c` holds the rules that accept character `c` at position
// `p` (counted from the attachment end), row `max_len * char_count + p` holds
// the rules whose condition is complete at position `p`. Matching a word is one
// AND per position over `bit_units` words, independent of the rule count.

use radixspell_core::CharIdx;
use radixspell_core::enums::AffixKind;

use crate::StoreError;
use crate::bitset::{BitMatrix, BitSet};

/// Condition tables of one affix class.
#[derive(Debug, Clone)]
pub struct AffixTable {
    kind: AffixKind,
    condition_lens: Vec<usize>,
    max_len: usize,
    char_count: usize,
    bits: Option<BitMatrix>,
}

impl AffixTable {
    /// Register the class's rules by their condition lengths.
    ///
    /// The tables are allocated later by
    /// [`set_condition_properties`](Self::set_condition_properties).
    pub fn new(kind: AffixKind, condition_lens: Vec<usize>) -> Self {
        let max_len = condition_lens.iter().copied().max().unwrap_or(0);
        Self {
            kind,
            condition_lens,
            max_len,
            char_count: 0,
            bits: None,
        }
    }

    #[inline]
    pub fn kind(&self) -> AffixKind {
        self.kind
    }

    #[inline]
    pub fn rule_count(&self) -> usize {
        self.condition_lens.len()
    }

    #[inline]
    pub fn max_condition_len(&self) -> usize {
        self.max_len
    }

    /// True when no rule has a condition and matching skips the tables.
    #[inline]
    pub fn is_unconditional(&self) -> bool {
        self.max_len == 0
    }

    #[inline]
    fn accept_row(&self, position: usize, c: usize) -> usize {
        position * self.char_count + c
    }

    #[inline]
    fn terminate_row(&self, position: usize) -> usize {
        self.max_len * self.char_count + position
    }

    /// Allocate the matrix for an alphabet of `char_count` characters.
    ///
    /// Every rule terminates at each position from `len - 1` on and accepts
    /// any character from position `len` on. Positions inside a condition
    /// accept nothing until [`set_rule_condition`](Self::set_rule_condition)
    /// fills them.
    pub fn set_condition_properties(&mut self, char_count: usize) -> Result<(), StoreError> {
        self.char_count = char_count;
        if self.is_unconditional() {
            self.bits = None;
            return Ok(());
        }
        let rows = self
            .max_len
            .checked_mul(char_count)
            .and_then(|n| n.checked_add(self.max_len))
            .ok_or(StoreError::OutOfMemory {
                what: "affix condition table",
            })?;
        let mut bits = BitMatrix::try_new(rows, self.rule_count())?;
        for (rule, &len) in self.condition_lens.iter().enumerate() {
            for position in len.saturating_sub(1)..self.max_len {
                bits.set(self.terminate_row(position), rule);
            }
            for position in len..self.max_len {
                for c in 0..char_count {
                    bits.set(self.accept_row(position, c), rule);
                }
            }
        }
        tracing::trace!(
            kind = ?self.kind,
            rules = self.rule_count(),
            max_len = self.max_len,
            bytes = bits.memory_size(),
            "affix table allocated"
        );
        self.bits = Some(bits);
        Ok(())
    }

    /// Define which characters `rule` accepts at `position`.
    ///
    /// A positive condition accepts exactly `chars`; a negative one accepts
    /// every character except `chars`.
    pub fn set_rule_condition(
        &mut self,
        rule: usize,
        chars: &[CharIdx],
        position: usize,
        negative: bool,
    ) -> Result<(), StoreError> {
        let count = self.rule_count();
        let len = *self
            .condition_lens
            .get(rule)
            .ok_or(StoreError::RuleOutOfRange { rule, count })?;
        if position >= len {
            return Err(StoreError::PositionOutOfRange {
                rule,
                position,
                len,
            });
        }
        if self.bits.is_none() {
            return Err(StoreError::TablesNotAllocated);
        }
        if let Some(&bad) = chars.iter().find(|&&c| c as usize >= self.char_count) {
            return Err(StoreError::CharOutOfRange {
                index: bad,
                char_count: self.char_count,
            });
        }
        let base = self.accept_row(position, 0);
        let char_count = self.char_count;
        let bits = self.bits.as_mut().ok_or(StoreError::TablesNotAllocated)?;
        for c in 0..char_count {
            if negative {
                bits.set(base + c, rule);
            } else {
                bits.clear(base + c, rule);
            }
        }
        for &c in chars {
            if negative {
                bits.clear(base + c as usize, rule);
            } else {
                bits.set(base + c as usize, rule);
            }
        }
        Ok(())
    }

    /// Scratch buffer sized for [`matching_rules`](Self::matching_rules).
    pub fn scratch(&self) -> Result<BitSet, StoreError> {
        BitSet::try_new(self.rule_count())
    }

    /// Append to `out` every rule whose condition matches `word` at this
    /// class's attachment end, in ascending rule order per position.
    ///
    /// `word` is given in reading order; suffix classes read it backwards.
    pub fn matching_rules(&self, word: &[CharIdx], scratch: &mut BitSet, out: &mut Vec<usize>) {
        let Some(bits) = &self.bits else {
            out.extend(0..self.rule_count());
            return;
        };
        scratch.fill();
        let limit = word.len().min(self.max_len);
        if limit == 0 {
            self.unconditional_rules(out);
            return;
        }
        for position in 0..limit {
            if scratch.is_empty() {
                break;
            }
            let c = word[self.kind.word_position(position, word.len())] as usize;
            if c >= self.char_count {
                // Rules complete before this position were drained already,
                // except those without any condition.
                if position == 0 {
                    self.unconditional_rules(out);
                }
                break;
            }
            scratch.and_with(bits.row(self.accept_row(position, c)));
            scratch.drain_common(bits.row(self.terminate_row(position)), |rule| out.push(rule));
        }
    }

    fn unconditional_rules(&self, out: &mut Vec<usize>) {
        let rules = self.condition_lens.iter().enumerate();
        out.extend(rules.filter(|&(_, &len)| len == 0).map(|(rule, _)| rule));
    }
}
