//! Shared types for the radixspell spell-checking engine.
//!
//! Every other crate in the workspace works on dense character indices
//! rather than raw characters. This crate owns that mapping together with
//! the small enums that cross crate boundaries.
//!
//! - [`character`] -- Character index mapper and simple case conversion
//! - [`case`] -- Word case classification used by the validity pipeline
//! - [`enums`] -- Spell results and affix kinds

pub mod case;
pub mod character;
pub mod enums;

pub use character::{AlphabetFull, CharIdx, CharacterIndex};

/// Morphological flag attached to stems, affix rules and compound rules.
///
/// Flags are opaque small integers chosen by the dictionary loader.
pub type Flag = u16;
