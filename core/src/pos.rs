//! Part-of-speech bucketing.
//!
//! Taggers differ per language (Penn Treebank for English, the French
//! Treebank tagset for French), so tags are folded into a small set of
//! coarse buckets before comparison. The tagger itself sits behind the
//! `PosTagger` trait; `LexiconTagger` is a table-driven implementation.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use tracing::{debug, info};

use crate::text::LineNormalizer;

/// Coarse part-of-speech class shared by both tagsets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PosBucket {
    Other,
    Adjective,
    Verb,
    Preposition,
    Noun,
    Adverb,
    Conjunction,
    Pronoun,
}

impl PosBucket {
    /// Report order.
    pub const ALL: [PosBucket; 8] = [
        PosBucket::Other,
        PosBucket::Adjective,
        PosBucket::Verb,
        PosBucket::Preposition,
        PosBucket::Noun,
        PosBucket::Adverb,
        PosBucket::Conjunction,
        PosBucket::Pronoun,
    ];

    /// Map a Penn Treebank or French Treebank tag onto a bucket.
    /// Rules are tried in order; the first one that applies wins.
    pub fn from_tag(tag: &str) -> Self {
        if tag.starts_with("ADJ") || tag.starts_with("JJ") {
            PosBucket::Adjective
        } else if tag.starts_with('V') {
            PosBucket::Verb
        } else if tag.starts_with('N') {
            PosBucket::Noun
        } else if tag.starts_with("PR") {
            PosBucket::Pronoun
        } else if tag == "CC" || tag == "CS" {
            PosBucket::Conjunction
        } else if tag.contains("RB") || tag.starts_with("ADV") {
            PosBucket::Adverb
        } else if tag == "P" || tag == "IN" {
            PosBucket::Preposition
        } else {
            PosBucket::Other
        }
    }

    /// Column name used in reports.
    pub fn name(&self) -> &'static str {
        match self {
            PosBucket::Other => "autre",
            PosBucket::Adjective => "adjectifs",
            PosBucket::Verb => "verbes",
            PosBucket::Preposition => "prépositions",
            PosBucket::Noun => "noms",
            PosBucket::Adverb => "adverbes",
            PosBucket::Conjunction => "conjonctions",
            PosBucket::Pronoun => "pronoms",
        }
    }
}

/// Anything that can tag a tokenized line.
pub trait PosTagger {
    /// Return one `(token, tag)` pair per input token, in order.
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)>;
}

/// Tag assigned by `LexiconTagger` to words it does not know.
pub const UNKNOWN_TAG: &str = "UNK";

/// Word -> tag table, case-insensitive on the word.
#[derive(Debug, Clone, Default)]
pub struct LexiconTagger {
    tags: HashMap<String, String>,
}

impl LexiconTagger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, word: &str, tag: &str) {
        self.tags.insert(word.to_lowercase(), tag.to_string());
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// Read `word<TAB>tag` rows; rows without a tag or not valid UTF-8
    /// are skipped.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut tagger = Self::new();
        for (n, row) in reader.split(b'\n').enumerate() {
            let Ok(line) = String::from_utf8(row?) else {
                debug!(row = n + 1, "skipping undecodable tag row");
                continue;
            };
            let mut parts = line.split('\t');
            if let (Some(word), Some(tag)) = (parts.next(), parts.next()) {
                let (word, tag) = (word.trim(), tag.trim());
                if !word.is_empty() && !tag.is_empty() {
                    tagger.insert(word, tag);
                }
            }
        }
        Ok(tagger)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let f = File::open(path).with_context(|| format!("open tag table {}", path.display()))?;
        let tagger = Self::from_reader(BufReader::new(f))?;
        info!(path = %path.display(), entries = tagger.len(), "loaded tag table");
        Ok(tagger)
    }
}

impl PosTagger for LexiconTagger {
    fn tag(&self, tokens: &[String]) -> Vec<(String, String)> {
        tokens
            .iter()
            .map(|t| {
                let tag = self
                    .tags
                    .get(&t.to_lowercase())
                    .cloned()
                    .unwrap_or_else(|| UNKNOWN_TAG.to_string());
                (t.clone(), tag)
            })
            .collect()
    }
}

/// Bucket counts of one text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PosDistribution {
    counts: HashMap<PosBucket, usize>,
    total: usize,
}

impl PosDistribution {
    /// Tag every line (punctuation stripped, whitespace split) and bucket
    /// the tags.
    pub fn from_lines<S, T>(lines: &[S], tagger: &T, normalizer: &LineNormalizer) -> Self
    where
        S: AsRef<str>,
        T: PosTagger + ?Sized,
    {
        let mut dist = Self::default();
        for line in lines {
            let tokens: Vec<String> = normalizer
                .strip_punctuation(line.as_ref())
                .split_whitespace()
                .map(|t| t.to_string())
                .collect();
            if tokens.is_empty() {
                continue;
            }
            for (_, tag) in tagger.tag(&tokens) {
                dist.add(PosBucket::from_tag(&tag));
            }
        }
        dist
    }

    pub fn add(&mut self, bucket: PosBucket) {
        *self.counts.entry(bucket).or_default() += 1;
        self.total += 1;
    }

    pub fn count(&self, bucket: PosBucket) -> usize {
        self.counts.get(&bucket).copied().unwrap_or(0)
    }

    pub fn total(&self) -> usize {
        self.total
    }

    /// Share of tagged tokens in `bucket` (0 for an empty text).
    pub fn share(&self, bucket: PosBucket) -> f64 {
        if self.total == 0 {
            0.0
        } else {
            self.count(bucket) as f64 / self.total as f64
        }
    }
}
