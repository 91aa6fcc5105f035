//! Vocabulary frequency vectors and overlap between texts.
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use crate::text::LineNormalizer;

/// Standard English stopword list. The vocabulary comparison runs on English
/// (back-)translations of every variant, so one list covers all three.
pub static ENGLISH_STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're", "you've",
        "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he", "him", "his",
        "himself", "she", "she's", "her", "hers", "herself", "it", "it's", "its", "itself",
        "they", "them", "their", "theirs", "themselves", "what", "which", "who", "whom", "this",
        "that", "that'll", "these", "those", "am", "is", "are", "was", "were", "be", "been",
        "being", "have", "has", "had", "having", "do", "does", "did", "doing", "a", "an", "the",
        "and", "but", "if", "or", "because", "as", "until", "while", "of", "at", "by", "for",
        "with", "about", "against", "between", "into", "through", "during", "before", "after",
        "above", "below", "to", "from", "up", "down", "in", "out", "on", "off", "over", "under",
        "again", "further", "then", "once", "here", "there", "when", "where", "why", "how", "all",
        "any", "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor", "not",
        "only", "own", "same", "so", "than", "too", "very", "s", "t", "can", "will", "just",
        "don", "don't", "should", "should've", "now", "d", "ll", "m", "o", "re", "ve", "y",
        "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't", "doesn", "doesn't",
        "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn", "isn't", "ma", "mightn",
        "mightn't", "mustn", "mustn't", "needn", "needn't", "shan", "shan't", "shouldn",
        "shouldn't", "wasn", "wasn't", "weren", "weren't", "won", "won't", "wouldn", "wouldn't",
    ]
    .into_iter()
    .collect()
});

/// Word counts in first-occurrence order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FrequencyVector {
    entries: Vec<(String, usize)>,
    index: HashMap<String, usize>,
}

impl FrequencyVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count punctuation-stripped, lowercased words of `lines`, skipping
    /// words for which `is_stopword` returns true.
    pub fn from_lines<S, F>(lines: &[S], normalizer: &LineNormalizer, is_stopword: F) -> Self
    where
        S: AsRef<str>,
        F: Fn(&str) -> bool,
    {
        let mut v = Self::new();
        for line in lines {
            let cleaned = normalizer.strip_punctuation(line.as_ref()).to_lowercase();
            for word in cleaned.split_whitespace() {
                if !is_stopword(word) {
                    v.add(word);
                }
            }
        }
        v
    }

    /// `from_lines` with the English stopword list.
    pub fn english<S: AsRef<str>>(lines: &[S], normalizer: &LineNormalizer) -> Self {
        Self::from_lines(lines, normalizer, |w| ENGLISH_STOPWORDS.contains(w))
    }

    pub fn add(&mut self, word: &str) {
        match self.index.get(word) {
            Some(&i) => self.entries[i].1 += 1,
            None => {
                self.index.insert(word.to_string(), self.entries.len());
                self.entries.push((word.to_string(), 1));
            }
        }
    }

    pub fn count(&self, word: &str) -> usize {
        self.index.get(word).map(|&i| self.entries[i].1).unwrap_or(0)
    }

    pub fn contains(&self, word: &str) -> bool {
        self.index.contains_key(word)
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, usize)> {
        self.entries.iter().map(|(w, n)| (w.as_str(), *n))
    }

    /// The `n` most frequent words; ties keep first-occurrence order.
    pub fn top(&self, n: usize) -> Vec<(String, usize)> {
        let mut sorted = self.entries.clone();
        sorted.sort_by(|a, b| b.1.cmp(&a.1));
        sorted.truncate(n);
        sorted
    }
}

/// Words of `left` also present in `right`, with ratios against each side.
#[derive(Debug, Clone, PartialEq)]
pub struct Overlap {
    pub shared: Vec<String>,
    pub ratio_left: f64,
    pub ratio_right: f64,
}

impl Overlap {
    pub fn len(&self) -> usize {
        self.shared.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shared.is_empty()
    }
}

pub fn overlap(left: &FrequencyVector, right: &FrequencyVector) -> Overlap {
    let shared: Vec<String> = left
        .iter()
        .filter(|(w, _)| right.contains(w))
        .map(|(w, _)| w.to_string())
        .collect();
    let ratio = |total: usize| {
        if total == 0 {
            0.0
        } else {
            shared.len() as f64 / total as f64
        }
    };
    Overlap {
        ratio_left: ratio(left.len()),
        ratio_right: ratio(right.len()),
        shared,
    }
}
