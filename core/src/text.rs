//! Line normalization and tokenization.
//!
//! Lyrics arrive as raw lines (possibly with trailing newlines, curly
//! apostrophes and French guillemets). The normalizer:
//! - applies NFC so decomposed accents compare equal to the dictionaries,
//! - turns separator characters (hyphens, apostrophes) into spaces,
//! - drops the configured punctuation,
//! - splits on whitespace.

use crate::phonetic::SymbolSet;
use crate::utils;

/// Default punctuation stripped from every line.
pub const DEFAULT_PUNCTUATION: &str = "!?,.\"«»():;";

/// Default characters folded into word boundaries.
pub const DEFAULT_SEPARATORS: &str = "-'’";

#[derive(Debug, Clone)]
pub struct LineNormalizer {
    punctuation: SymbolSet,
    separators: SymbolSet,
}

impl Default for LineNormalizer {
    fn default() -> Self {
        Self::new(DEFAULT_PUNCTUATION, DEFAULT_SEPARATORS)
    }
}

impl LineNormalizer {
    pub fn new(punctuation: &str, separators: &str) -> Self {
        Self {
            punctuation: SymbolSet::new(punctuation),
            separators: SymbolSet::new(separators),
        }
    }

    /// Remove punctuation only; separators are kept as-is.
    ///
    /// Used for part-of-speech and vocabulary tokens, where contractions
    /// such as `don't` stay a single word.
    pub fn strip_punctuation(&self, line: &str) -> String {
        utils::normalize(line)
            .chars()
            .filter(|c| !self.punctuation.contains(*c))
            .collect()
    }

    /// Remove punctuation and replace separators with spaces.
    pub fn clean(&self, line: &str) -> String {
        utils::normalize(line)
            .chars()
            .filter(|c| !self.punctuation.contains(*c))
            .map(|c| if self.separators.contains(c) { ' ' } else { c })
            .collect()
    }

    /// Word tokens of a line after `clean`.
    pub fn tokens(&self, line: &str) -> Vec<String> {
        self.clean(line)
            .split_whitespace()
            .map(|t| t.to_string())
            .collect()
    }

    /// The lowercased last word of a line, if the line has any word.
    pub fn end_word(&self, line: &str) -> Option<String> {
        self.clean(line)
            .split_whitespace()
            .last()
            .map(|w| w.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn end_word_strips_punctuation_and_case() {
        let n = LineNormalizer::default();
        assert_eq!(n.end_word("Is this the real life?\n"), Some("life".into()));
        assert_eq!(n.end_word("« Je t'aime, MOI NON PLUS »"), Some("plus".into()));
    }

    #[test]
    fn separators_split_words() {
        let n = LineNormalizer::default();
        assert_eq!(n.end_word("rock-a-bye"), Some("bye".into()));
        assert_eq!(n.end_word("qu’il"), Some("il".into()));
        assert_eq!(n.end_word("l'amour"), Some("amour".into()));
        assert_eq!(n.tokens("Au clair-de la lune"), vec!["Au", "clair", "de", "la", "lune"]);
    }

    #[test]
    fn blank_line_has_no_end_word() {
        let n = LineNormalizer::default();
        assert_eq!(n.end_word(""), None);
        assert_eq!(n.end_word("  ?! \n"), None);
    }

    #[test]
    fn strip_keeps_apostrophes() {
        let n = LineNormalizer::default();
        assert_eq!(n.strip_punctuation("Don't stop (me) now!"), "Don't stop me now");
    }

    #[test]
    fn decomposed_accents_are_composed() {
        let n = LineNormalizer::default();
        // "été" written with combining acute accents
        let decomposed = "e\u{0301}te\u{0301}";
        assert_eq!(n.end_word(decomposed), Some("été".into()));
    }
}
