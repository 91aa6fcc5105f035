/// Variant-specific configuration that extends the base `Config` from core.
///
/// This configuration includes:
/// - All generic options from `paroles_core::Config` (flattened via serde)
/// - The pronunciation dictionary used for rhymes (French and Québécois
///   share one French-phonology dictionary)
/// - The syllable rule (English, or French with the `-bre`/`-dre` correction)
/// - Corpus file names for the lyrics and for the English translation used
///   in vocabulary comparison
/// - An optional word/tag table for part-of-speech distribution
///
/// # Example
///
/// ```rust
/// use paroles::{ProjectConfig, Variant};
///
/// let config = ProjectConfig::default();
/// assert_eq!(config.variant(Variant::Quebecois).lyrics_file, "qc.txt");
/// ```

use paroles_core::{Config, LexiconFormat, SyllableRule};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// The three language variants compared for every song.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum Variant {
    #[value(alias = "en")]
    English,
    #[value(alias = "fr")]
    French,
    #[value(alias = "qc")]
    Quebecois,
}

impl Variant {
    pub const ALL: [Variant; 3] = [Variant::English, Variant::French, Variant::Quebecois];

    /// Column prefix used in reports.
    pub fn code(&self) -> &'static str {
        match self {
            Variant::English => "en",
            Variant::French => "fr",
            Variant::Quebecois => "qc",
        }
    }
}

/// One value per variant.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PerVariant<T> {
    pub en: T,
    pub fr: T,
    pub qc: T,
}

impl<T> PerVariant<T> {
    pub fn get(&self, variant: Variant) -> &T {
        match variant {
            Variant::English => &self.en,
            Variant::French => &self.fr,
            Variant::Quebecois => &self.qc,
        }
    }

    pub fn map<U, F: FnMut(&T) -> U>(&self, mut f: F) -> PerVariant<U> {
        PerVariant {
            en: f(&self.en),
            fr: f(&self.fr),
            qc: f(&self.qc),
        }
    }

    pub fn try_map<U, E, F: FnMut(&T) -> Result<U, E>>(&self, mut f: F) -> Result<PerVariant<U>, E> {
        Ok(PerVariant {
            en: f(&self.en)?,
            fr: f(&self.fr)?,
            qc: f(&self.qc)?,
        })
    }

    /// Pair every value with the matching entry of `other` and map the pair.
    pub fn try_map_with<U, V, E, F>(
        &self,
        other: &PerVariant<U>,
        mut f: F,
    ) -> Result<PerVariant<V>, E>
    where
        F: FnMut(&T, &U) -> Result<V, E>,
    {
        Ok(PerVariant {
            en: f(&self.en, &other.en)?,
            fr: f(&self.fr, &other.fr)?,
            qc: f(&self.qc, &other.qc)?,
        })
    }

    /// `(variant, value)` pairs in report order.
    pub fn iter(&self) -> impl Iterator<Item = (Variant, &T)> {
        Variant::ALL.into_iter().map(move |v| (v, self.get(v)))
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct VariantConfig {
    /// Base configuration fields (punctuation, vowel sets, labels, etc.)
    #[serde(flatten)]
    pub base: Config,

    pub variant: Variant,

    /// Lyrics file inside each song folder (e.g. `fr.txt`)
    pub lyrics_file: String,
    /// English rendering of the lyrics used for vocabulary overlap
    pub translation_file: String,

    /// Pronunciation dictionary
    pub dictionary: PathBuf,
    /// Dictionary layout; detected from the extension when absent
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dictionary_format: Option<LexiconFormat>,

    pub syllable_rule: SyllableRule,

    /// `word<TAB>tag` table; part-of-speech reports need one per variant
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pos_tags: Option<PathBuf>,
}

impl VariantConfig {
    pub fn english() -> Self {
        Self {
            base: Config::default(),
            variant: Variant::English,
            lyrics_file: "en.txt".into(),
            translation_file: "en.txt".into(),
            dictionary: PathBuf::from("resources/cmudict.ipa"),
            dictionary_format: Some(LexiconFormat::Tsv),
            syllable_rule: SyllableRule::English,
            pos_tags: None,
        }
    }

    pub fn french() -> Self {
        Self {
            base: Config::default(),
            variant: Variant::French,
            lyrics_file: "fr.txt".into(),
            translation_file: "fr_trans.txt".into(),
            dictionary: PathBuf::from("resources/fr.csv"),
            dictionary_format: Some(LexiconFormat::Csv),
            syllable_rule: SyllableRule::French,
            pos_tags: None,
        }
    }

    pub fn quebecois() -> Self {
        Self {
            variant: Variant::Quebecois,
            lyrics_file: "qc.txt".into(),
            translation_file: "qc_trans.txt".into(),
            ..Self::french()
        }
    }

    /// Dictionary format, explicit or guessed from the path.
    pub fn dictionary_format(&self) -> LexiconFormat {
        self.dictionary_format
            .unwrap_or_else(|| LexiconFormat::from_path(&self.dictionary))
    }
}

/// Corpus locations plus the three variant configurations.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct ProjectConfig {
    /// One sub-folder per song
    pub songs_dir: PathBuf,
    /// Where tables and vocabulary comparisons are written
    pub results_dir: PathBuf,
    pub english: VariantConfig,
    pub french: VariantConfig,
    pub quebecois: VariantConfig,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            songs_dir: PathBuf::from("songs"),
            results_dir: PathBuf::from("results"),
            english: VariantConfig::english(),
            french: VariantConfig::french(),
            quebecois: VariantConfig::quebecois(),
        }
    }
}

impl ProjectConfig {
    /// Load configuration from a TOML file.
    pub fn load_toml<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("read config {}: {}", path.display(), e))?;
        let config = Self::from_toml_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from TOML string.
    pub fn from_toml_str(content: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    /// Serialize configuration to TOML string.
    pub fn to_toml_string(&self) -> Result<String, toml::ser::Error> {
        toml::to_string_pretty(self)
    }

    pub fn variant(&self, variant: Variant) -> &VariantConfig {
        match variant {
            Variant::English => &self.english,
            Variant::French => &self.french,
            Variant::Quebecois => &self.quebecois,
        }
    }

    /// Each section must describe the variant it is filed under.
    pub fn validate(&self) -> anyhow::Result<()> {
        for v in Variant::ALL {
            let cfg = self.variant(v);
            if cfg.variant != v {
                anyhow::bail!(
                    "[{}] section declares variant {:?}",
                    section_name(v),
                    cfg.variant
                );
            }
            cfg.base.validate()?;
        }
        Ok(())
    }
}

fn section_name(v: Variant) -> &'static str {
    match v {
        Variant::English => "english",
        Variant::French => "french",
        Variant::Quebecois => "quebecois",
    }
}
