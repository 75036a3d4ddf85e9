// Engine error type

use radixspell_core::AlphabetFull;
use radixspell_store::StoreError;

/// Errors surfaced by dictionary building and suggestion search.
///
/// Ordinary misspellings never produce an error. Only resource exhaustion and
/// corrupt dictionary input do.
#[derive(Debug, thiserror::Error)]
pub enum SpellError {
    #[error("dictionary structure: {0}")]
    Store(#[from] StoreError),
    #[error(transparent)]
    Alphabet(#[from] AlphabetFull),
    #[error("invalid affix condition {condition:?}: {reason}")]
    InvalidCondition {
        condition: String,
        reason: &'static str,
    },
    #[error("invalid dictionary input: {0}")]
    InvalidInput(String),
    #[error("out of memory while allocating {what}")]
    OutOfMemory { what: &'static str },
}

impl SpellError {
    /// True for allocation failures, wherever they were detected.
    pub fn is_out_of_memory(&self) -> bool {
        matches!(
            self,
            SpellError::OutOfMemory { .. } | SpellError::Store(StoreError::OutOfMemory { .. })
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn out_of_memory_from_either_layer() {
        assert!(SpellError::OutOfMemory { what: "rows" }.is_out_of_memory());
        let store: SpellError = StoreError::OutOfMemory { what: "radix node" }.into();
        assert!(store.is_out_of_memory());
        assert!(!SpellError::InvalidInput("x".into()).is_out_of_memory());
    }

    #[test]
    fn messages_name_the_problem() {
        let err = SpellError::InvalidCondition {
            condition: "[ab".into(),
            reason: "unclosed character set",
        };
        assert_eq!(
            err.to_string(),
            "invalid affix condition \"[ab\": unclosed character set"
        );
    }
}
