//! Per-variant analysis engine
//!
//! An `Engine` bundles one variant's configuration with its pronunciation
//! lookup and optional part-of-speech tagger and exposes the four song-level
//! analyses: rhymes, counts, part-of-speech distribution and vocabulary.
//!
//! `EngineSet` builds the three engines of a project. Dictionaries and tag
//! tables are loaded once per path and shared through `Arc`, so French and
//! Québécois read the same French dictionary.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use paroles_core::{
    FrequencyVector, LexiconFormat, LexiconTagger, LineNormalizer, PosDistribution, PosTagger,
    PronunciationLookup, RhymeClusterer, RhymeScheme, RhymeStats, RhymeSummary, SchemeError,
    SymbolSet, TextCounts,
};
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{PerVariant, ProjectConfig, Variant, VariantConfig};

pub type SharedTagger = Arc<dyn PosTagger + Send + Sync>;

/// Rhyme scheme of one text plus the figures derived from it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RhymeAnalysis {
    pub scheme: RhymeScheme,
    pub stats: RhymeStats,
    pub summary: RhymeSummary,
}

#[derive(Clone)]
pub struct Engine {
    config: VariantConfig,
    lookup: Arc<PronunciationLookup>,
    tagger: Option<SharedTagger>,
    normalizer: LineNormalizer,
    orthographic_vowels: SymbolSet,
}

impl Engine {
    pub fn new(config: VariantConfig, lookup: Arc<PronunciationLookup>) -> Self {
        let normalizer = config.base.normalizer();
        let orthographic_vowels = config.base.orthographic_vowel_set();
        Self {
            config,
            lookup,
            tagger: None,
            normalizer,
            orthographic_vowels,
        }
    }

    pub fn with_tagger(mut self, tagger: SharedTagger) -> Self {
        self.tagger = Some(tagger);
        self
    }

    pub fn variant(&self) -> Variant {
        self.config.variant
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    pub fn lookup(&self) -> &PronunciationLookup {
        &self.lookup
    }

    pub fn has_tagger(&self) -> bool {
        self.tagger.is_some()
    }

    /// Label every line by its end rhyme and summarize the scheme.
    pub fn rhymes<S: AsRef<str>>(&self, lines: &[S]) -> Result<RhymeAnalysis, SchemeError> {
        let clusterer = RhymeClusterer::new(&self.lookup, &self.config.base);
        let scheme = clusterer.classify(lines)?;
        let stats = scheme.stats();
        let summary = scheme.summary();
        debug!(
            variant = self.variant().code(),
            labels = %scheme.labels,
            clusters = scheme.clusters.len(),
            "classified rhymes"
        );
        Ok(RhymeAnalysis {
            scheme,
            stats,
            summary,
        })
    }

    pub fn counts<S: AsRef<str>>(&self, lines: &[S]) -> TextCounts {
        TextCounts::from_lines(lines, &self.orthographic_vowels, self.config.syllable_rule)
    }

    /// `None` when no tagger is configured for this variant.
    pub fn pos_distribution<S: AsRef<str>>(&self, lines: &[S]) -> Option<PosDistribution> {
        let tagger = self.tagger.as_ref()?;
        Some(PosDistribution::from_lines(
            lines,
            tagger.as_ref(),
            &self.normalizer,
        ))
    }

    /// Stopword-filtered word counts of an English rendering of the lyrics.
    pub fn vocabulary<S: AsRef<str>>(&self, translation: &[S]) -> FrequencyVector {
        FrequencyVector::english(translation, &self.normalizer)
    }
}

/// The three engines of a project.
pub struct EngineSet {
    engines: PerVariant<Engine>,
}

impl EngineSet {
    /// Load every dictionary (and tag table, when configured) named by
    /// `config`. A path shared by several variants is read once.
    pub fn load(config: &ProjectConfig) -> anyhow::Result<Self> {
        let mut lookups: HashMap<(PathBuf, LexiconFormat), Arc<PronunciationLookup>> =
            HashMap::new();
        let mut taggers: HashMap<PathBuf, SharedTagger> = HashMap::new();

        let mut build = |cfg: &VariantConfig| -> anyhow::Result<Engine> {
            let key = (cfg.dictionary.clone(), cfg.dictionary_format());
            let lookup = match lookups.get(&key) {
                Some(lx) => lx.clone(),
                None => {
                    let lx = PronunciationLookup::load(&key.0, key.1).with_context(|| {
                        format!("load {} dictionary", cfg.variant.code())
                    })?;
                    let lx = Arc::new(lx);
                    lookups.insert(key, lx.clone());
                    lx
                }
            };

            let mut engine = Engine::new(cfg.clone(), lookup);
            if let Some(path) = &cfg.pos_tags {
                let tagger = match taggers.get(path) {
                    Some(t) => t.clone(),
                    None => {
                        let t: SharedTagger = Arc::new(LexiconTagger::load(path)?);
                        taggers.insert(path.clone(), t.clone());
                        t
                    }
                };
                engine = engine.with_tagger(tagger);
            }
            Ok(engine)
        };

        let engines = PerVariant {
            en: build(&config.english)?,
            fr: build(&config.french)?,
            qc: build(&config.quebecois)?,
        };
        info!(
            dictionaries = lookups.len(),
            tag_tables = taggers.len(),
            "engines ready"
        );
        Ok(Self { engines })
    }

    pub fn get(&self, variant: Variant) -> &Engine {
        self.engines.get(variant)
    }

    pub fn engines(&self) -> &PerVariant<Engine> {
        &self.engines
    }

    /// True when every variant can produce a part-of-speech distribution.
    pub fn can_tag(&self) -> bool {
        self.engines.iter().all(|(_, e)| e.has_tagger())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use paroles_core::PosBucket;

    fn english_engine() -> Engine {
        let mut lx = PronunciationLookup::new();
        lx.insert("night", "n aɪ t");
        lx.insert("light", "l aɪ t");
        lx.insert("day", "d eɪ");
        lx.insert("way", "w eɪ");
        Engine::new(VariantConfig::english(), Arc::new(lx))
    }

    #[test]
    fn rhymes_carry_stats_and_summary() {
        let engine = english_engine();
        let a = engine
            .rhymes(&["by day", "by night", "the light", "all the way"])
            .unwrap();
        assert_eq!(a.scheme.labels, "ABBA");
        assert_eq!(a.stats.abba, 1);
        assert_eq!(a.summary.diversity, 2);
        assert_eq!(a.summary.dominant_label, Some('A'));
        assert_eq!(a.summary.dominant_sound.as_deref(), Some("eɪ"));
    }

    #[test]
    fn pos_needs_a_tagger() {
        let engine = english_engine();
        assert!(engine.pos_distribution(&["the night"]).is_none());

        let mut tagger = LexiconTagger::new();
        tagger.insert("night", "NN");
        tagger.insert("the", "DT");
        let engine = engine.with_tagger(Arc::new(tagger));
        let dist = engine.pos_distribution(&["The night!"]).unwrap();
        assert_eq!(dist.total(), 2);
        assert_eq!(dist.count(PosBucket::Noun), 1);
        assert_eq!(dist.count(PosBucket::Other), 1);
    }

    #[test]
    fn counts_follow_the_variant_rule() {
        let mut lx = PronunciationLookup::new();
        lx.insert("arbre", "a ʁ b ʁ");
        let fr = Engine::new(VariantConfig::french(), Arc::new(lx));
        let counts = fr.counts(&["arbre"]);
        assert_eq!(counts.words, 1);
        assert_eq!(counts.syllables, 2);
    }
}
