// Affix condition string parsing

use crate::error::SpellError;

/// Characters accepted at one condition position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConditionSlot {
    pub chars: Vec<char>,
    /// Accept everything except `chars`. A negative slot with no characters
    /// accepts any character.
    pub negative: bool,
}

impl ConditionSlot {
    fn any() -> Self {
        Self {
            chars: Vec::new(),
            negative: true,
        }
    }

    fn literal(c: char) -> Self {
        Self {
            chars: vec![c],
            negative: false,
        }
    }
}

fn invalid(condition: &str, reason: &'static str) -> SpellError {
    SpellError::InvalidCondition {
        condition: condition.to_string(),
        reason,
    }
}

/// Split a condition into one slot per character position, in reading order.
///
/// An empty condition and a lone `.` both mean "no condition".
pub fn parse_condition(condition: &str) -> Result<Vec<ConditionSlot>, SpellError> {
    if condition.is_empty() || condition == "." {
        return Ok(Vec::new());
    }
    let mut slots = Vec::new();
    let mut chars = condition.chars();
    while let Some(c) = chars.next() {
        match c {
            '.' => slots.push(ConditionSlot::any()),
            '[' => {
                let mut set = Vec::new();
                let mut negative = false;
                let mut closed = false;
                for (i, member) in chars.by_ref().enumerate() {
                    match member {
                        ']' => {
                            closed = true;
                            break;
                        }
                        '^' if i == 0 => negative = true,
                        _ => set.push(member),
                    }
                }
                if !closed {
                    return Err(invalid(condition, "unclosed character set"));
                }
                if set.is_empty() {
                    return Err(invalid(condition, "empty character set"));
                }
                slots.push(ConditionSlot {
                    chars: set,
                    negative,
                });
            }
            ']' => return Err(invalid(condition, "unopened character set")),
            _ => slots.push(ConditionSlot::literal(c)),
        }
    }
    Ok(slots)
}
