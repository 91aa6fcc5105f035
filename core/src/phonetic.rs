//! Phonetic forms and symbol classes.
//!
//! A `PhoneticForm` is the transcription of a single word, stored as a
//! sequence of Unicode scalar values. Every symbol is compared on its own,
//! so a combining mark (e.g. the nasal tilde in `ɑ̃`) is a symbol of its own
//! right next to the vowel it decorates.
//!
//! `SymbolSet` is a static membership table used to classify symbols
//! (vowel / non-vowel) and, more generally, any fixed character class such
//! as punctuation or word separators.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// IPA symbols treated as vowels when validating a rhyme.
pub const IPA_VOWELS: &str = "iyuwIYoʊeɛɝθaɔəɑæɔ̃ɑ̃ɥ";

/// Orthographic vowel letters used by the syllable heuristics.
pub const ORTHOGRAPHIC_VOWELS: &str = "aeiouyéèàêùëï";

/// One word's pronunciation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct PhoneticForm {
    symbols: Vec<char>,
}

impl PhoneticForm {
    /// Build a form from a transcription. Whitespace inside the
    /// transcription is not significant and is dropped.
    pub fn new(transcription: &str) -> Self {
        Self {
            symbols: transcription.chars().filter(|c| !c.is_whitespace()).collect(),
        }
    }

    pub fn from_symbols(symbols: Vec<char>) -> Self {
        Self { symbols }
    }

    pub fn symbols(&self) -> &[char] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// The last `n` symbols (the whole form when `n >= len`).
    pub fn suffix(&self, n: usize) -> PhoneticForm {
        let start = self.symbols.len().saturating_sub(n);
        Self::from_symbols(self.symbols[start..].to_vec())
    }

    /// True if at least one symbol belongs to `set`.
    pub fn contains_any(&self, set: &SymbolSet) -> bool {
        self.symbols.iter().any(|c| set.contains(*c))
    }
}

impl fmt::Display for PhoneticForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.symbols {
            write!(f, "{}", c)?;
        }
        Ok(())
    }
}

impl From<&str> for PhoneticForm {
    fn from(s: &str) -> Self {
        Self::new(s)
    }
}

/// Fixed character class with O(1) membership.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SymbolSet {
    symbols: HashSet<char>,
}

impl SymbolSet {
    /// Every scalar value of `symbols` becomes a member.
    pub fn new(symbols: &str) -> Self {
        Self {
            symbols: symbols.chars().collect(),
        }
    }

    pub fn ipa_vowels() -> Self {
        Self::new(IPA_VOWELS)
    }

    pub fn orthographic_vowels() -> Self {
        Self::new(ORTHOGRAPHIC_VOWELS)
    }

    pub fn contains(&self, c: char) -> bool {
        self.symbols.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_is_dropped() {
        let form = PhoneticForm::new("k æ t\n");
        assert_eq!(form.to_string(), "kæt");
        assert_eq!(form.len(), 3);
    }

    #[test]
    fn suffix_clamps_to_length() {
        let form = PhoneticForm::new("mɑ̃");
        // the tilde is its own symbol
        assert_eq!(form.len(), 3);
        assert_eq!(form.suffix(2).to_string(), "ɑ̃");
        assert_eq!(form.suffix(10), form);
        assert!(form.suffix(0).is_empty());
    }

    #[test]
    fn ipa_vowel_membership() {
        let vowels = SymbolSet::ipa_vowels();
        assert!(vowels.contains('ə'));
        assert!(vowels.contains('\u{0303}'));
        assert!(!vowels.contains('t'));
        assert!(!PhoneticForm::new("st").contains_any(&vowels));
        assert!(PhoneticForm::new("ɛst").contains_any(&vowels));
    }
}
