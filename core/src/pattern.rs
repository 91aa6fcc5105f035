//! Structural statistics over a rhyme label sequence.
//!
//! The pattern scan walks 4-label windows left to right. A window that forms
//! ABBA (checked first) or ABAB is counted and skipped as a whole, otherwise
//! the cursor moves by one. Windows never overlap, and a tail shorter than
//! four labels is not scanned for patterns. Runs are computed separately over
//! the whole sequence; the wildcard is an ordinary label there.

use serde::{Deserialize, Serialize};

/// Histogram, pattern counts and longest run of one label sequence.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RhymeStats {
    /// (label, occurrences), most frequent first; ties keep first-seen order.
    pub histogram: Vec<(char, usize)>,
    pub abba: usize,
    pub abab: usize,
    pub longest_run: usize,
}

impl RhymeStats {
    /// The (abba, abab, longest run) triple.
    pub fn counts(&self) -> (usize, usize, usize) {
        (self.abba, self.abab, self.longest_run)
    }

    /// Number of distinct labels, wildcard included.
    pub fn diversity(&self) -> usize {
        self.histogram.len()
    }
}

pub fn analyze(labels: &str) -> RhymeStats {
    let seq: Vec<char> = labels.chars().collect();
    let (abba, abab) = count_patterns(&seq);
    RhymeStats {
        histogram: label_histogram(&seq),
        abba,
        abab,
        longest_run: longest_run(&seq),
    }
}

/// Occurrences per label sorted by count (descending), stable on first
/// occurrence.
pub fn label_histogram(seq: &[char]) -> Vec<(char, usize)> {
    let mut counts: Vec<(char, usize)> = Vec::new();
    for &c in seq {
        match counts.iter_mut().find(|(l, _)| *l == c) {
            Some((_, n)) => *n += 1,
            None => counts.push((c, 1)),
        }
    }
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Non-overlapping (ABBA, ABAB) window counts.
pub fn count_patterns(seq: &[char]) -> (usize, usize) {
    let mut abba = 0;
    let mut abab = 0;
    let mut i = 0;
    while i + 3 < seq.len() {
        let w = &seq[i..i + 4];
        if w[0] == w[3] && w[1] == w[2] && w[0] != w[1] {
            abba += 1;
            i += 4;
        } else if w[0] == w[2] && w[1] == w[3] && w[0] != w[1] {
            abab += 1;
            i += 4;
        } else {
            i += 1;
        }
    }
    (abba, abab)
}

/// Length of the longest span of identical consecutive labels.
pub fn longest_run(seq: &[char]) -> usize {
    let mut best = 0;
    let mut run = 0;
    let mut prev: Option<char> = None;
    for &c in seq {
        run = if prev == Some(c) { run + 1 } else { 1 };
        best = best.max(run);
        prev = Some(c);
    }
    best
}
