// Spell checking module

pub mod compound;
pub mod pipeline;

use radixspell_core::enums::SpellResult;

/// Anything that can judge a single word in its exact casing.
///
/// Case variants, digits and other caller preferences are handled by
/// [`pipeline::spell_check`], which calls `spell` once per variant.
pub trait Speller {
    fn spell(&self, word: &[char]) -> SpellResult;
}
