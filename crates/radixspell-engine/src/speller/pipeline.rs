// Top-level spell check: options and case variants

use radixspell_core::case::{CaseType, detect_case, with_case};
use radixspell_core::enums::SpellResult;

use crate::options::SpellOptions;
use crate::speller::Speller;

/// Check `word` against `speller`, honouring `options`.
///
/// The word is first checked as written. A forbidden form stays rejected.
/// Otherwise a capitalized word may also be accepted through its lowercase
/// form, and an all-uppercase word through its lowercase or capitalized form.
pub fn spell_check(word: &[char], speller: &dyn Speller, options: &SpellOptions) -> bool {
    if word.is_empty() {
        return true;
    }
    if options.ignore_numbers && word.iter().any(|c| c.is_ascii_digit()) {
        return true;
    }

    match speller.spell(word) {
        SpellResult::Ok | SpellResult::Compound => return true,
        SpellResult::Forbidden => return false,
        SpellResult::Failed => {}
    }

    match detect_case(word) {
        CaseType::FirstUpper if options.accept_first_uppercase => {
            speller.spell(&with_case(word, CaseType::AllLower)).is_valid()
        }
        CaseType::AllUpper if options.accept_all_uppercase => {
            speller.spell(&with_case(word, CaseType::AllLower)).is_valid()
                || speller.spell(&with_case(word, CaseType::FirstUpper)).is_valid()
        }
        _ => false,
    }
}
