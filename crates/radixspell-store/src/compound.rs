// Compound rule automaton
//
// A compound rule is a sequence of flag conditions, each single or
// repeatable. It is compiled into two dense tables indexed by
// `state * flag_count + flag`, where a state is a position in the condition
// sequence and state `len` means "all conditions consumed":
//
// - the jump table gives the furthest condition the flag can satisfy, skipping
//   repeatable conditions on the way;
// - the retry table gives the nearest alternative, remembered as a checkpoint.
//
// Matching carries at most one checkpoint. Grammars that need two open
// backtrack points at once can be rejected even though they would match.

use crate::StoreError;

/// Dense compound flag id. Id 0 stands for flags no rule mentions.
pub type CompoundFlag = u16;

/// One position of a compound rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CompoundCondition {
    pub flag: CompoundFlag,
    /// Matches every flag except `flag`.
    pub negative: bool,
    /// May match any number of consecutive parts, including none.
    pub repeatable: bool,
}

impl CompoundCondition {
    #[inline]
    fn accepts(&self, flag: CompoundFlag) -> bool {
        (flag == self.flag) != self.negative
    }
}

/// Jump table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Jump {
    #[default]
    NoMatch,
    /// Move `n` conditions forward (0 stays on a repeatable condition).
    Advance(u16),
    /// Move `n` conditions forward onto the end state.
    Terminal(u16),
}

/// Saved alternative for single-level backtracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    pub cond_pos: usize,
    pub index_pos: usize,
}

/// Explicit matcher state, advanced by [`CompoundRule::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchState {
    Running {
        cond_pos: usize,
        index_pos: usize,
        checkpoint: Option<Checkpoint>,
    },
    Accepted,
    Rejected,
}

impl MatchState {
    pub const START: MatchState = MatchState::Running {
        cond_pos: 0,
        index_pos: 0,
        checkpoint: None,
    };
}

/// A compiled compound rule.
#[derive(Debug, Clone)]
pub struct CompoundRule {
    len: usize,
    flag_count: usize,
    accept_from: usize,
    jumps: Vec<Jump>,
    retries: Vec<Option<u16>>,
}

impl CompoundRule {
    /// Compile `conditions` over the flag alphabet `[0, flag_count)`.
    pub fn compile(
        conditions: &[CompoundCondition],
        flag_count: usize,
    ) -> Result<Self, StoreError> {
        if conditions.is_empty() {
            return Err(StoreError::InvalidCompoundRule(
                "rule has no conditions".to_string(),
            ));
        }
        if conditions.len() >= u16::MAX as usize {
            return Err(StoreError::InvalidCompoundRule(format!(
                "rule has {} conditions",
                conditions.len()
            )));
        }
        if let Some(bad) = conditions
            .iter()
            .find(|c| c.flag as usize >= flag_count)
        {
            return Err(StoreError::InvalidCompoundRule(format!(
                "flag {} outside {} compound flags",
                bad.flag, flag_count
            )));
        }

        let len = conditions.len();
        let states = len + 1;
        let cells = states * flag_count;
        let mut jumps = Vec::new();
        crate::try_grow(&mut jumps, cells, "compound jump table")?;
        jumps.resize(cells, Jump::NoMatch);
        let mut retries = Vec::new();
        crate::try_grow(&mut retries, cells, "compound retry table")?;
        retries.resize(cells, None);

        let mut targets = Vec::with_capacity(len);
        for state in 0..len {
            for flag in 0..flag_count {
                targets.clear();
                for (k, cond) in conditions.iter().enumerate().skip(state) {
                    if cond.accepts(flag as CompoundFlag) {
                        targets.push(if cond.repeatable { k } else { k + 1 });
                    }
                    if !cond.repeatable {
                        break;
                    }
                }
                let (Some(&nearest), Some(&furthest)) = (targets.first(), targets.last()) else {
                    continue;
                };
                let delta = (furthest - state) as u16;
                let cell = state * flag_count + flag;
                jumps[cell] = if furthest == len {
                    Jump::Terminal(delta)
                } else {
                    Jump::Advance(delta)
                };
                if nearest != furthest {
                    retries[cell] = Some(nearest as u16);
                }
            }
        }

        let accept_from = conditions
            .iter()
            .rposition(|c| !c.repeatable)
            .map_or(0, |k| k + 1);

        Ok(Self {
            len,
            flag_count,
            accept_from,
            jumps,
            retries,
        })
    }

    /// Number of conditions; also the index of the end state.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// First state from which exhausted input is accepted.
    #[inline]
    pub fn accept_from(&self) -> usize {
        self.accept_from
    }

    #[inline]
    pub fn jump(&self, state: usize, flag: CompoundFlag) -> Jump {
        let flag = flag as usize;
        if state > self.len || flag >= self.flag_count {
            return Jump::NoMatch;
        }
        self.jumps[state * self.flag_count + flag]
    }

    #[inline]
    pub fn retry(&self, state: usize, flag: CompoundFlag) -> Option<usize> {
        let flag = flag as usize;
        if state > self.len || flag >= self.flag_count {
            return None;
        }
        self.retries[state * self.flag_count + flag].map(usize::from)
    }

    fn backtrack(checkpoint: Option<Checkpoint>) -> MatchState {
        match checkpoint {
            Some(cp) => MatchState::Running {
                cond_pos: cp.cond_pos,
                index_pos: cp.index_pos,
                checkpoint: None,
            },
            None => MatchState::Rejected,
        }
    }

    /// Advance the matcher by one transition over `flags`.
    pub fn step(&self, state: MatchState, flags: &[CompoundFlag]) -> MatchState {
        let MatchState::Running {
            cond_pos,
            index_pos,
            checkpoint,
        } = state
        else {
            return state;
        };
        let Some(&flag) = flags.get(index_pos) else {
            if cond_pos >= self.accept_from {
                return MatchState::Accepted;
            }
            return Self::backtrack(checkpoint);
        };
        match self.jump(cond_pos, flag) {
            Jump::NoMatch => Self::backtrack(checkpoint),
            Jump::Advance(n) | Jump::Terminal(n) => {
                let checkpoint = checkpoint.or_else(|| {
                    self.retry(cond_pos, flag).map(|cond| Checkpoint {
                        cond_pos: cond,
                        index_pos: index_pos + 1,
                    })
                });
                MatchState::Running {
                    cond_pos: cond_pos + n as usize,
                    index_pos: index_pos + 1,
                    checkpoint,
                }
            }
        }
    }

    /// True when the flag sequence is accepted by this rule.
    pub fn matches(&self, flags: &[CompoundFlag]) -> bool {
        let mut state = MatchState::START;
        loop {
            state = self.step(state, flags);
            match state {
                MatchState::Accepted => return true,
                MatchState::Rejected => return false,
                MatchState::Running { .. } => {}
            }
        }
    }
}
