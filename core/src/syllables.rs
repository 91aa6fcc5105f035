//! Orthographic syllable estimates and per-text word/syllable counts.
//!
//! The heuristic counts vowel groups in the spelling. It is rough on purpose
//! (e.g. "somehow" comes out as three) but applies the same way to every
//! variant, which is what the comparison needs.

use serde::{Deserialize, Serialize};

use crate::phonetic::SymbolSet;

/// Which spelling rules apply on top of the vowel-group count.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SyllableRule {
    #[default]
    English,
    /// Adds a syllable for consonant + `re` endings (`libre`, `ventre`).
    French,
}

/// Vowel-group syllable estimate for one lowercased word.
pub fn syllables(word: &str, vowels: &SymbolSet) -> usize {
    let chars: Vec<char> = word.chars().collect();
    if chars.is_empty() {
        return 0;
    }

    let mut count: isize = 0;
    if vowels.contains(chars[0]) {
        count += 1;
    }
    for pair in chars.windows(2) {
        if vowels.contains(pair[1]) && !vowels.contains(pair[0]) {
            count += 1;
        }
    }
    if word.ends_with('e') {
        count -= 1;
    }
    if word.ends_with("le") {
        count += 1;
    }
    if count <= 0 {
        count = 1;
    }
    count as usize
}

/// `syllables` plus the French `-bre`/`-cre`/`-dre` correction.
pub fn syllables_fr(word: &str, vowels: &SymbolSet) -> usize {
    let mut s = syllables(word, vowels);
    let chars: Vec<char> = word.chars().collect();
    if chars.len() >= 3 && word.ends_with("re") && !vowels.contains(chars[chars.len() - 3]) {
        s += 1;
    }
    s
}

pub fn count_word(word: &str, vowels: &SymbolSet, rule: SyllableRule) -> usize {
    match rule {
        SyllableRule::English => syllables(word, vowels),
        SyllableRule::French => syllables_fr(word, vowels),
    }
}

/// Line, word and syllable totals for one text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TextCounts {
    pub lines: usize,
    pub words: usize,
    pub syllables: usize,
}

impl TextCounts {
    /// Count a text. Words are the whitespace split of each lowercased line,
    /// so contractions (`don't`, `j'ai`) count once.
    pub fn from_lines<S: AsRef<str>>(lines: &[S], vowels: &SymbolSet, rule: SyllableRule) -> Self {
        let mut counts = TextCounts {
            lines: lines.len(),
            ..Default::default()
        };
        for line in lines {
            let lower = line.as_ref().to_lowercase();
            for word in lower.split_whitespace() {
                counts.words += 1;
                counts.syllables += count_word(word, vowels, rule);
            }
        }
        counts
    }

    pub fn syllables_per_line(&self) -> f64 {
        ratio(self.syllables, self.lines)
    }

    pub fn syllables_per_word(&self) -> f64 {
        ratio(self.syllables, self.words)
    }

    pub fn words_per_line(&self) -> f64 {
        ratio(self.words, self.lines)
    }
}

fn ratio(num: usize, den: usize) -> f64 {
    if den == 0 {
        0.0
    } else {
        num as f64 / den as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn en(w: &str) -> usize {
        syllables(w, &SymbolSet::orthographic_vowels())
    }

    fn fr(w: &str) -> usize {
        syllables_fr(w, &SymbolSet::orthographic_vowels())
    }

    #[test]
    fn english_vowel_groups() {
        assert_eq!(en("cat"), 1);
        assert_eq!(en("again"), 2);
        assert_eq!(en("make"), 1);
        assert_eq!(en("little"), 2);
        assert_eq!(en("rhythm"), 1);
        assert_eq!(en("the"), 1);
        assert_eq!(en("somehow"), 3);
    }

    #[test]
    fn french_re_endings() {
        assert_eq!(fr("libre"), 2);
        assert_eq!(fr("ventre"), 2);
        assert_eq!(fr("faire"), 1);
        assert_eq!(fr("re"), 1);
        assert_eq!(fr("été"), 2);
    }

    #[test]
    fn empty_word_has_no_syllables() {
        assert_eq!(en(""), 0);
    }

    #[test]
    fn text_counts_and_ratios() {
        let lines = ["Let it be", "Let it be, let it be"];
        let c = TextCounts::from_lines(&lines, &SymbolSet::orthographic_vowels(), SyllableRule::English);
        assert_eq!(c.lines, 2);
        assert_eq!(c.words, 9);
        assert_eq!(c.syllables, 9);
        assert!((c.words_per_line() - 4.5).abs() < 1e-9);
        assert!((c.syllables_per_word() - 1.0).abs() < 1e-9);
    }

    #[test]
    fn empty_text_ratios_are_zero() {
        let c = TextCounts::from_lines::<&str>(&[], &SymbolSet::orthographic_vowels(), SyllableRule::French);
        assert_eq!(c.syllables_per_line(), 0.0);
        assert_eq!(c.words_per_line(), 0.0);
    }
}
