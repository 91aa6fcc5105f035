//! Rhyme detection between two phonetic forms.
use crate::phonetic::{PhoneticForm, SymbolSet};

/// Longest common rhyming tail of `a` and `b`.
///
/// Symbols are compared from the end of both forms until the first mismatch
/// or until the shorter form is exhausted. The shared tail only counts as a
/// rhyme when it contains at least one symbol from `vowels`, so a purely
/// consonantal ending (`kt` / `pt`) is rejected.
///
/// ```
/// use paroles_core::{sound_match, PhoneticForm, SymbolSet};
///
/// let vowels = SymbolSet::ipa_vowels();
/// let tail = sound_match(&PhoneticForm::new("kat"), &PhoneticForm::new("mat"), &vowels);
/// assert_eq!(tail.map(|t| t.to_string()), Some("at".to_string()));
/// assert!(sound_match(&PhoneticForm::new("kt"), &PhoneticForm::new("pt"), &vowels).is_none());
/// ```
pub fn sound_match(a: &PhoneticForm, b: &PhoneticForm, vowels: &SymbolSet) -> Option<PhoneticForm> {
    let shared = a
        .symbols()
        .iter()
        .rev()
        .zip(b.symbols().iter().rev())
        .take_while(|(x, y)| x == y)
        .count();

    if shared == 0 {
        return None;
    }

    let tail = a.suffix(shared);
    if tail.contains_any(vowels) {
        Some(tail)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn m(a: &str, b: &str) -> Option<String> {
        sound_match(&PhoneticForm::new(a), &PhoneticForm::new(b), &SymbolSet::ipa_vowels())
            .map(|t| t.to_string())
    }

    #[test]
    fn vowel_tail_matches() {
        assert_eq!(m("kat", "mat"), Some("at".into()));
        assert_eq!(m("lamuʁ", "tuʁ"), Some("uʁ".into()));
    }

    #[test]
    fn consonant_tail_rejected() {
        assert_eq!(m("kt", "pt"), None);
        assert_eq!(m("ʃoz", "kaz"), None);
    }

    #[test]
    fn different_lengths_use_shorter_form() {
        assert_eq!(m("a", "bla"), Some("a".into()));
        assert_eq!(m("ʒə", "ʒə"), Some("ʒə".into()));
    }

    #[test]
    fn empty_never_matches() {
        assert_eq!(m("", ""), None);
        assert_eq!(m("", "a"), None);
    }

    #[test]
    fn nasal_vowels_match_on_tilde() {
        assert_eq!(m("tɑ̃", "sɑ̃"), Some("ɑ̃".into()));
        // the tilde alone is a vowel-class symbol
        assert_eq!(m("tɔ̃", "sɑ̃"), Some("\u{0303}".into()));
    }

    #[test]
    fn symmetric_tail() {
        assert_eq!(m("bəˈlif", "lif"), m("lif", "bəˈlif"));
    }
}
