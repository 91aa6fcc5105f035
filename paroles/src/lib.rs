//! paroles crate root
//!
//! Compares song lyrics across English, French and Québécois renderings:
//! rhyme schemes, word and syllable counts, part-of-speech distribution and
//! vocabulary overlap. The language-agnostic machinery lives in
//! `paroles-core`; this crate adds per-variant configuration, the corpus
//! layout, report writers and the `paroles` binary.
//!
//! Public API exported here:
//! - `ProjectConfig`, `VariantConfig`, `Variant`, `PerVariant` from `config`
//! - `Engine`, `EngineSet`, `RhymeAnalysis` from `engine`
//! - `Corpus`, `Song` from `corpus`
//! - `Pipeline`, `Report` from `pipeline`

pub mod config;
pub mod corpus;
pub mod engine;
pub mod pipeline;
pub mod report;

pub use config::{PerVariant, ProjectConfig, Variant, VariantConfig};
pub use corpus::{read_lines, Corpus, Song};
pub use engine::{Engine, EngineSet, RhymeAnalysis, SharedTagger};
pub use pipeline::{Pipeline, Report};

// Convenience re-exports for callers that only depend on this crate.
pub use paroles_core::{
    Config, LabelOverflow, LexiconFormat, LexiconTagger, PosBucket, PronunciationLookup,
    RhymeScheme, RhymeStats, RhymeSummary, SchemeError, SyllableRule, TextCounts,
};
