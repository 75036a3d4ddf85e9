// Shared enums: SpellResult, AffixKind

/// Verdict of a single validity check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum SpellResult {
    /// The word is stored as a form of its own.
    Ok,
    /// The word is accepted as a compound of stored forms.
    Compound,
    /// The word is stored but explicitly marked as forbidden.
    Forbidden,
    /// The word is not accepted.
    Failed,
}

impl SpellResult {
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, SpellResult::Ok | SpellResult::Compound)
    }
}

/// Which end of a word an affix rule attaches to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AffixKind {
    Prefix,
    Suffix,
}

impl AffixKind {
    /// Position `pos` counted from the attachment end of a word of `len`
    /// characters, as an index from the start.
    #[inline]
    pub fn word_position(self, pos: usize, len: usize) -> usize {
        match self {
            AffixKind::Prefix => pos,
            AffixKind::Suffix => len - 1 - pos,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_ok_and_compound_are_valid() {
        assert!(SpellResult::Ok.is_valid());
        assert!(SpellResult::Compound.is_valid());
        assert!(!SpellResult::Forbidden.is_valid());
        assert!(!SpellResult::Failed.is_valid());
    }

    #[test]
    fn attachment_positions() {
        assert_eq!(AffixKind::Prefix.word_position(0, 4), 0);
        assert_eq!(AffixKind::Suffix.word_position(0, 4), 3);
        assert_eq!(AffixKind::Suffix.word_position(3, 4), 0);
    }
}
