// Character index mapping and simple case conversion

use hashbrown::HashMap;

/// Dense index of a character within a [`CharacterIndex`].
pub type CharIdx = u16;

/// Largest alphabet a [`CharacterIndex`] can hold.
///
/// One value below `u16::MAX` so that `char_count()` always fits in a
/// [`CharIdx`].
pub const MAX_ALPHABET: usize = u16::MAX as usize;

/// Returned by [`CharacterIndex::map`] when the alphabet has no room left.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("alphabet is full: at most {max} distinct characters are supported")]
pub struct AlphabetFull {
    pub max: usize,
}

/// Bijection between the characters of a language and `[0, char_count)`.
///
/// The index grows through [`map`](Self::map) while a dictionary is being
/// built. Afterwards it is only queried through the read-only accessors, and
/// characters outside the alphabet simply have no index.
#[derive(Debug, Clone, Default)]
pub struct CharacterIndex {
    to_index: HashMap<char, CharIdx>,
    to_char: Vec<char>,
}

impl CharacterIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the index of `c`, assigning the next free one if unseen.
    pub fn map(&mut self, c: char) -> Result<CharIdx, AlphabetFull> {
        if let Some(&idx) = self.to_index.get(&c) {
            return Ok(idx);
        }
        let next = self.to_char.len();
        if next >= MAX_ALPHABET {
            return Err(AlphabetFull { max: MAX_ALPHABET });
        }
        let idx = next as CharIdx;
        self.to_index.insert(c, idx);
        self.to_char.push(c);
        Ok(idx)
    }

    /// Map every character of `text`, growing the alphabet as needed.
    pub fn map_all(&mut self, text: &str) -> Result<Vec<CharIdx>, AlphabetFull> {
        text.chars().map(|c| self.map(c)).collect()
    }

    /// Index of `c`, or `None` when it is not part of the alphabet.
    #[inline]
    pub fn map_read_only(&self, c: char) -> Option<CharIdx> {
        self.to_index.get(&c).copied()
    }

    /// Map a word without growing the alphabet.
    ///
    /// Returns `None` as soon as one character is unknown: such a word cannot
    /// match anything stored under this alphabet.
    pub fn map_chars(&self, word: &[char]) -> Option<Vec<CharIdx>> {
        word.iter().map(|&c| self.map_read_only(c)).collect()
    }

    #[inline]
    pub fn char_of(&self, idx: CharIdx) -> Option<char> {
        self.to_char.get(idx as usize).copied()
    }

    /// Rebuild a string from indices. Indices outside the alphabet are skipped.
    pub fn word_of(&self, indices: &[CharIdx]) -> String {
        indices.iter().filter_map(|&i| self.char_of(i)).collect()
    }

    #[inline]
    pub fn char_count(&self) -> usize {
        self.to_char.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.to_char.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Simple case conversion
//
// One-to-one mappings only: characters whose case mapping expands to several
// characters keep the first one.
// ---------------------------------------------------------------------------

pub fn simple_lower(c: char) -> char {
    c.to_lowercase().next().unwrap_or(c)
}

pub fn simple_upper(c: char) -> char {
    c.to_uppercase().next().unwrap_or(c)
}

/// True for characters that change when lowercased.
pub fn is_upper(c: char) -> bool {
    simple_lower(c) != c
}

/// True for characters that change when uppercased.
pub fn is_lower(c: char) -> bool {
    simple_upper(c) != c
}
