//! Rhyme scheme inference.
//!
//! Each line's last word is looked up in the pronunciation dictionary and
//! assigned to a rhyme cluster. Clusters are kept in creation order and
//! scanned first-fit: the first cluster whose stored suffix rhymes with the
//! word wins, and its suffix is narrowed to the shared tail. A word that
//! rhymes with no cluster opens a new one labelled with the next letter
//! (`A`..`Z`, then `a`..`z`). Lines whose end word is unknown get the
//! wildcard label and never touch the clusters.

use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::lexicon::PronunciationLookup;
use crate::matcher::sound_match;
use crate::pattern::{self, RhymeStats};
use crate::phonetic::{PhoneticForm, SymbolSet};
use crate::text::LineNormalizer;
use crate::Config;

/// Policy once the 52 letter labels of a song are used up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LabelOverflow {
    /// Report `SchemeError::LabelSpaceExhausted`.
    #[default]
    Fail,
    /// Keep allocating the code points that follow `z` (`{`, `|`, ...),
    /// skipping the wildcard and control characters.
    Extend,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SchemeError {
    LabelSpaceExhausted { clusters: usize },
}

impl fmt::Display for SchemeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SchemeError::LabelSpaceExhausted { clusters } => write!(
                f,
                "ran out of rhyme labels after {} distinct rhyme sounds",
                clusters
            ),
        }
    }
}

impl std::error::Error for SchemeError {}

/// The n-th letter label: `A`..`Z` for 0..26, `a`..`z` for 26..52.
pub fn letter_label(index: usize) -> Option<char> {
    match index {
        0..=25 => char::from_u32('A' as u32 + index as u32),
        26..=51 => char::from_u32('a' as u32 + (index - 26) as u32),
        _ => None,
    }
}

/// Hands out cluster labels in order for a single song.
#[derive(Debug, Clone)]
pub struct LabelAllocator {
    next: usize,
    extended: u32,
    issued: usize,
    overflow: LabelOverflow,
    wildcard: char,
}

impl LabelAllocator {
    pub fn new(overflow: LabelOverflow, wildcard: char) -> Self {
        Self {
            next: 0,
            extended: 'z' as u32,
            issued: 0,
            overflow,
            wildcard,
        }
    }

    pub fn allocate(&mut self) -> Result<char, SchemeError> {
        while let Some(label) = letter_label(self.next) {
            self.next += 1;
            if label != self.wildcard {
                self.issued += 1;
                return Ok(label);
            }
        }

        match self.overflow {
            LabelOverflow::Fail => Err(SchemeError::LabelSpaceExhausted {
                clusters: self.issued,
            }),
            LabelOverflow::Extend => loop {
                self.extended += 1;
                if let Some(c) = char::from_u32(self.extended) {
                    if c != self.wildcard && !c.is_control() {
                        self.issued += 1;
                        return Ok(c);
                    }
                }
            },
        }
    }
}

/// A group of end words sharing a rhyming tail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeCluster {
    pub label: char,
    /// Longest tail shared by every member so far.
    pub suffix: PhoneticForm,
    pub members: usize,
}

/// Headline figures of a scheme relative to the song length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RhymeSummary {
    pub dominant_label: Option<char>,
    /// Suffix of the dominant cluster; `None` when the most frequent label is
    /// the wildcard or the song is empty.
    pub dominant_sound: Option<String>,
    /// Share of lines carrying the dominant label.
    pub dominant_frequency: f64,
    /// Number of distinct labels, wildcard included.
    pub diversity: usize,
}

/// Per-song output of the clusterer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RhymeScheme {
    /// One label per input line.
    pub labels: String,
    /// Clusters in creation order.
    pub clusters: Vec<RhymeCluster>,
    pub histogram: Vec<(char, usize)>,
}

impl RhymeScheme {
    pub fn len(&self) -> usize {
        self.labels.chars().count()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn suffix_for(&self, label: char) -> Option<&PhoneticForm> {
        self.clusters
            .iter()
            .find(|c| c.label == label)
            .map(|c| &c.suffix)
    }

    pub fn stats(&self) -> RhymeStats {
        pattern::analyze(&self.labels)
    }

    pub fn summary(&self) -> RhymeSummary {
        let lines = self.len();
        match self.histogram.first() {
            Some(&(label, count)) => RhymeSummary {
                dominant_label: Some(label),
                dominant_sound: self.suffix_for(label).map(|s| s.to_string()),
                dominant_frequency: count as f64 / lines as f64,
                diversity: self.histogram.len(),
            },
            None => RhymeSummary {
                dominant_label: None,
                dominant_sound: None,
                dominant_frequency: 0.0,
                diversity: 0,
            },
        }
    }
}

/// Greedy first-fit rhyme clusterer over one pronunciation lookup.
#[derive(Debug, Clone)]
pub struct RhymeClusterer<'a> {
    lookup: &'a PronunciationLookup,
    normalizer: LineNormalizer,
    vowels: SymbolSet,
    wildcard: char,
    overflow: LabelOverflow,
}

impl<'a> RhymeClusterer<'a> {
    pub fn new(lookup: &'a PronunciationLookup, config: &Config) -> Self {
        Self {
            lookup,
            normalizer: config.normalizer(),
            vowels: config.rhyme_vowel_set(),
            wildcard: config.wildcard,
            overflow: config.label_overflow,
        }
    }

    /// Label every line by the rhyme of its last word.
    pub fn classify<S: AsRef<str>>(&self, lines: &[S]) -> Result<RhymeScheme, SchemeError> {
        let forms = lines.iter().map(|line| {
            let word = self.normalizer.end_word(line.as_ref())?;
            let form = self.lookup.lookup(&word);
            if form.is_none() {
                debug!(word = %word, "no pronunciation for end word");
            }
            form
        });
        self.classify_forms(forms)
    }

    /// Cluster already looked-up end-word forms; `None` is a lookup miss.
    pub fn classify_forms<I>(&self, forms: I) -> Result<RhymeScheme, SchemeError>
    where
        I: IntoIterator<Item = Option<PhoneticForm>>,
    {
        let mut clusters: Vec<RhymeCluster> = Vec::new();
        let mut labels = String::new();
        let mut allocator = LabelAllocator::new(self.overflow, self.wildcard);

        for form in forms {
            let form = match form {
                Some(f) if !f.is_empty() => f,
                _ => {
                    labels.push(self.wildcard);
                    continue;
                }
            };

            let hit = clusters.iter_mut().find_map(|cluster| {
                sound_match(&form, &cluster.suffix, &self.vowels).map(|tail| (cluster, tail))
            });

            match hit {
                Some((cluster, tail)) => {
                    cluster.suffix = tail;
                    cluster.members += 1;
                    labels.push(cluster.label);
                }
                None => {
                    let label = allocator.allocate()?;
                    clusters.push(RhymeCluster {
                        label,
                        suffix: form,
                        members: 1,
                    });
                    labels.push(label);
                }
            }
        }

        let seq: Vec<char> = labels.chars().collect();
        Ok(RhymeScheme {
            histogram: pattern::label_histogram(&seq),
            labels,
            clusters,
        })
    }
}
