//! paroles-core
//!
//! Pronunciation lookup, rhyme clustering and lyric statistics shared by the
//! `paroles` analysis crate and the dictionary tools.
//!
//! Public API:
//! - `PronunciationLookup` - word -> phonetic transcription dictionary
//! - `PhoneticForm`, `SymbolSet` - transcriptions and symbol classes
//! - `sound_match` - longest common rhyming tail of two transcriptions
//! - `RhymeClusterer`, `RhymeScheme` - first-fit end-rhyme labelling
//! - `analyze`, `RhymeStats` - ABBA/ABAB counts, runs and label histogram
//! - `TextCounts`, `PosDistribution`, `FrequencyVector` - counting helpers
//! - `Config` - language-agnostic engine configuration
use serde::{Deserialize, Serialize};

pub mod phonetic;
pub use phonetic::{PhoneticForm, SymbolSet, IPA_VOWELS, ORTHOGRAPHIC_VOWELS};

pub mod lexicon;
pub use lexicon::{LexiconFormat, PronunciationLookup};

pub mod matcher;
pub use matcher::sound_match;

pub mod text;
pub use text::{LineNormalizer, DEFAULT_PUNCTUATION, DEFAULT_SEPARATORS};

pub mod scheme;
pub use scheme::{
    LabelAllocator, LabelOverflow, RhymeCluster, RhymeClusterer, RhymeScheme, RhymeSummary,
    SchemeError,
};

pub mod pattern;
pub use pattern::{analyze, RhymeStats};

pub mod syllables;
pub use syllables::{SyllableRule, TextCounts};

pub mod pos;
pub use pos::{LexiconTagger, PosBucket, PosDistribution, PosTagger};

pub mod vocab;
pub use vocab::{overlap, FrequencyVector, Overlap};

/// Generic configuration for the analysis core.
///
/// Only language-agnostic knobs live here. Per-variant settings (dictionary
/// path, syllable rule, corpus file names) belong in the `paroles` crate's
/// `VariantConfig`, which flattens this struct.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct Config {
    /// Characters removed from lines before tokenizing
    pub punctuation: String,
    /// Characters turned into word boundaries (hyphens, apostrophes)
    pub separators: String,
    /// Phonetic symbols that make a shared tail count as a rhyme
    pub rhyme_vowels: String,
    /// Letters counted as vowels by the syllable heuristic
    pub orthographic_vowels: String,
    /// Label for lines whose end word has no pronunciation
    pub wildcard: char,
    /// Behaviour once A-Z and a-z are all in use within one song
    pub label_overflow: LabelOverflow,
    /// Number of top words listed in vocabulary comparisons
    pub top_words: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            punctuation: DEFAULT_PUNCTUATION.to_string(),
            separators: DEFAULT_SEPARATORS.to_string(),
            rhyme_vowels: IPA_VOWELS.to_string(),
            orthographic_vowels: ORTHOGRAPHIC_VOWELS.to_string(),
            wildcard: '*',
            label_overflow: LabelOverflow::Fail,
            top_words: 10,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<std::path::Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to a TOML file.
    pub fn save_toml<P: AsRef<std::path::Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn normalizer(&self) -> LineNormalizer {
        LineNormalizer::new(&self.punctuation, &self.separators)
    }

    pub fn rhyme_vowel_set(&self) -> SymbolSet {
        SymbolSet::new(&self.rhyme_vowels)
    }

    pub fn orthographic_vowel_set(&self) -> SymbolSet {
        SymbolSet::new(&self.orthographic_vowels)
    }

    /// Reject settings the clusterer cannot work with.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.wildcard.is_whitespace() {
            anyhow::bail!("wildcard label must not be whitespace");
        }
        if self.rhyme_vowels.is_empty() {
            anyhow::bail!("rhyme_vowels must not be empty");
        }
        Ok(())
    }
}

/// Utility helpers.
pub mod utils {
    /// Normalize input strings (NFC) and trim whitespace.
    pub fn normalize(s: &str) -> String {
        use unicode_normalization::UnicodeNormalization;
        s.nfc().collect::<String>().trim().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toml_roundtrip_keeps_wildcard_and_policy() {
        let mut cfg = Config::default();
        cfg.wildcard = '?';
        cfg.label_overflow = LabelOverflow::Extend;
        let s = cfg.to_toml_string().unwrap();
        let back = Config::from_toml_str(&s).unwrap();
        assert_eq!(back, cfg);
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let cfg = Config::from_toml_str("label_overflow = \"extend\"\n").unwrap();
        assert_eq!(cfg.label_overflow, LabelOverflow::Extend);
        assert_eq!(cfg.wildcard, '*');
        assert_eq!(cfg.punctuation, DEFAULT_PUNCTUATION);
    }

    #[test]
    fn validate_rejects_blank_wildcard() {
        let mut cfg = Config::default();
        cfg.wildcard = ' ';
        assert!(cfg.validate().is_err());
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn normalize_composes_and_trims() {
        assert_eq!(utils::normalize("  cafe\u{0301}\n"), "café");
    }
}
