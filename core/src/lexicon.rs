//! Pronunciation lookup for paroles-core
//!
//! Maps an orthographic word form (lowercased, NFC) to its phonetic
//! transcription. A lookup is built once from a dictionary resource and is
//! read-only afterwards; engines hold it behind an `Arc` and share it across
//! songs and language variants.
//!
//! Supported sources:
//! - tab-separated `word<TAB>transcription` rows (cmudict IPA export)
//! - CSV `word,transcription` rows (French IPA lexicon)
//! - a bincode snapshot produced by `save_bincode`
//! - an fst key index plus a bincode payload vector, as written by
//!   `write_fst_bincode` (see `paroles-tools`)
//!
//! Malformed rows (missing column, empty word or empty transcription) are
//! skipped while loading. A missing file is an error.

use anyhow::{Context, Result};
use fst::{Map, MapBuilder, Streamer};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Read, Write};
use std::path::Path;
use tracing::{debug, info};

use crate::phonetic::PhoneticForm;
use crate::utils;

/// On-disk dictionary layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LexiconFormat {
    Tsv,
    Csv,
    Bincode,
}

impl LexiconFormat {
    /// Guess the format from a file extension (`.csv`, `.bincode`/`.bin`,
    /// anything else is tab-separated).
    pub fn from_path<P: AsRef<Path>>(path: P) -> Self {
        match path.as_ref().extension().and_then(|s| s.to_str()) {
            Some("csv") => LexiconFormat::Csv,
            Some("bincode") | Some("bin") => LexiconFormat::Bincode,
            _ => LexiconFormat::Tsv,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PronunciationLookup {
    map: HashMap<String, String>,
    // word -> index into `payloads`
    #[serde(skip)]
    fst_map: Option<Map<Vec<u8>>>,
    #[serde(skip)]
    payloads: Option<Vec<String>>,
}

impl PronunciationLookup {
    pub fn new() -> Self {
        Self {
            map: HashMap::new(),
            fst_map: None,
            payloads: None,
        }
    }

    /// Add or replace an entry. Returns false (and stores nothing) when the
    /// word or the transcription is empty after cleaning.
    pub fn insert(&mut self, word: &str, transcription: &str) -> bool {
        let word = utils::normalize(word);
        let phon: String = transcription.chars().filter(|c| !c.is_whitespace()).collect();
        if word.is_empty() || phon.is_empty() {
            return false;
        }
        self.map.insert(word, phon);
        true
    }

    /// Transcription of a lowercased word, if known.
    pub fn lookup(&self, word: &str) -> Option<PhoneticForm> {
        self.transcription(word).map(PhoneticForm::new)
    }

    /// Raw transcription string of a word.
    pub fn transcription(&self, word: &str) -> Option<&str> {
        if let Some(p) = self.map.get(word) {
            return Some(p.as_str());
        }
        if let (Some(map), Some(payloads)) = (&self.fst_map, &self.payloads) {
            if let Some(idx) = map.get(word) {
                return payloads.get(idx as usize).map(|s| s.as_str());
            }
        }
        None
    }

    pub fn contains(&self, word: &str) -> bool {
        self.transcription(word).is_some()
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        match &self.fst_map {
            Some(map) => {
                let extra = self.map.keys().filter(|k| !map.contains_key(k)).count();
                map.len() + extra
            }
            None => self.map.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All entries sorted by word. In-memory entries shadow fst entries.
    pub fn entries(&self) -> Vec<(String, String)> {
        let mut all: BTreeMap<String, String> = BTreeMap::new();
        if let (Some(map), Some(payloads)) = (&self.fst_map, &self.payloads) {
            let mut stream = map.stream();
            while let Some((k, idx)) = stream.next() {
                if let (Ok(word), Some(phon)) = (std::str::from_utf8(k), payloads.get(idx as usize)) {
                    all.insert(word.to_string(), phon.clone());
                }
            }
        }
        for (k, v) in &self.map {
            all.insert(k.clone(), v.clone());
        }
        all.into_iter().collect()
    }

    /// Load a dictionary file in the given format.
    pub fn load<P: AsRef<Path>>(path: P, format: LexiconFormat) -> Result<Self> {
        let path = path.as_ref();
        let lookup = match format {
            LexiconFormat::Tsv => {
                let f = File::open(path)
                    .with_context(|| format!("open dictionary {}", path.display()))?;
                Self::from_tsv_reader(BufReader::new(f))
                    .with_context(|| format!("read dictionary {}", path.display()))?
            }
            LexiconFormat::Csv => {
                let f = File::open(path)
                    .with_context(|| format!("open dictionary {}", path.display()))?;
                Self::from_csv_reader(f)
                    .with_context(|| format!("read dictionary {}", path.display()))?
            }
            LexiconFormat::Bincode => Self::load_bincode(path)?,
        };
        info!(
            path = %path.display(),
            entries = lookup.len(),
            "loaded pronunciation dictionary"
        );
        Ok(lookup)
    }

    /// Load a dictionary, picking the format from the file extension.
    pub fn load_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let format = LexiconFormat::from_path(&path);
        Self::load(path, format)
    }

    /// Parse `word<TAB>transcription` rows. Extra columns are ignored, and
    /// rows that are not valid UTF-8 are skipped like short rows.
    pub fn from_tsv_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut lookup = Self::new();
        let mut skipped = 0usize;
        for (n, row) in reader.split(b'\n').enumerate() {
            let line = match String::from_utf8(row?) {
                Ok(line) => line,
                Err(e) => {
                    debug!(row = n + 1, error = %e, "skipping undecodable dictionary row");
                    skipped += 1;
                    continue;
                }
            };
            let line = line.strip_suffix('\r').unwrap_or(&line);
            let mut parts = line.splitn(3, '\t');
            let word = parts.next().unwrap_or("");
            let accepted = match parts.next() {
                Some(phon) => lookup.insert(word, phon),
                None => false,
            };
            if !accepted {
                if !line.trim().is_empty() {
                    debug!(row = %line, "skipping malformed dictionary row");
                }
                skipped += 1;
            }
        }
        debug!(skipped, "tab-separated dictionary parsed");
        Ok(lookup)
    }

    /// Parse `word,transcription` CSV rows (no header). Rows that fail to
    /// parse are skipped like short rows.
    pub fn from_csv_reader<R: Read>(reader: R) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(reader);
        let mut lookup = Self::new();
        let mut skipped = 0usize;
        for record in rdr.records() {
            let accepted = match record {
                Ok(rec) => match (rec.get(0), rec.get(1)) {
                    (Some(word), Some(phon)) => lookup.insert(word, phon),
                    _ => false,
                },
                Err(e) => {
                    debug!(error = %e, "skipping unreadable dictionary row");
                    false
                }
            };
            if !accepted {
                skipped += 1;
            }
        }
        debug!(skipped, "csv dictionary parsed");
        Ok(lookup)
    }

    /// Save the in-memory entries to a file using bincode serialization.
    pub fn save_bincode<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let snapshot = Self {
            map: self.entries().into_iter().collect(),
            fst_map: None,
            payloads: None,
        };
        let file = File::create(path).with_context(|| format!("create {}", path.display()))?;
        bincode::serialize_into(BufWriter::new(file), &snapshot)
            .with_context(|| format!("serialize {}", path.display()))?;
        Ok(())
    }

    /// Load a lookup from a bincode file produced by `save_bincode`.
    pub fn load_bincode<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let file = File::open(path).with_context(|| format!("open {}", path.display()))?;
        let lookup: Self = bincode::deserialize_from(BufReader::new(file))
            .with_context(|| format!("deserialize {}", path.display()))?;
        Ok(lookup)
    }

    /// Write the entries as an fst key index (word -> index) plus a bincode
    /// `Vec<String>` of transcriptions in key order.
    pub fn write_fst_bincode<P: AsRef<Path>>(&self, fst_path: P, bincode_path: P) -> Result<()> {
        let entries = self.entries();

        let mut builder = MapBuilder::new(Vec::new())?;
        for (i, (word, _)) in entries.iter().enumerate() {
            builder.insert(word, i as u64)?;
        }
        let fst_bytes = builder.into_inner()?;
        let mut out = File::create(fst_path.as_ref())
            .with_context(|| format!("create {}", fst_path.as_ref().display()))?;
        out.write_all(&fst_bytes)?;

        let payloads: Vec<String> = entries.into_iter().map(|(_, phon)| phon).collect();
        let out = File::create(bincode_path.as_ref())
            .with_context(|| format!("create {}", bincode_path.as_ref().display()))?;
        bincode::serialize_into(BufWriter::new(out), &payloads)?;
        Ok(())
    }

    /// Load a lookup from fst + bincode artifacts written by `write_fst_bincode`.
    pub fn load_from_fst_bincode<P: AsRef<Path>>(fst_path: P, bincode_path: P) -> Result<Self> {
        let fst_path = fst_path.as_ref();
        let bincode_path = bincode_path.as_ref();

        let mut f = File::open(fst_path).with_context(|| format!("open fst {}", fst_path.display()))?;
        let mut buf = Vec::new();
        f.read_to_end(&mut buf)?;
        let map = Map::new(buf).with_context(|| format!("fst map {}", fst_path.display()))?;

        let f = File::open(bincode_path)
            .with_context(|| format!("open bincode {}", bincode_path.display()))?;
        let payloads: Vec<String> = bincode::deserialize_from(BufReader::new(f))
            .with_context(|| format!("deserialize bincode {}", bincode_path.display()))?;

        if map.len() != payloads.len() {
            anyhow::bail!(
                "fst has {} keys but payload has {} transcriptions",
                map.len(),
                payloads.len()
            );
        }

        Ok(Self {
            map: HashMap::new(),
            fst_map: Some(map),
            payloads: Some(payloads),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut lx = PronunciationLookup::new();
        assert!(lx.insert("love", "l ʌ v"));
        assert_eq!(lx.lookup("love").map(|p| p.to_string()), Some("lʌv".into()));
        assert!(lx.lookup("hate").is_none());
    }

    #[test]
    fn empty_fields_are_rejected() {
        let mut lx = PronunciationLookup::new();
        assert!(!lx.insert("", "a"));
        assert!(!lx.insert("a", "   "));
        assert!(lx.is_empty());
    }

    #[test]
    fn tsv_rows_strip_spaces_and_skip_malformed() {
        let data = "cat\tk æ t\nbroken-row\n\ndog\td ɔ ɡ \r\n";
        let lx = PronunciationLookup::from_tsv_reader(data.as_bytes()).unwrap();
        assert_eq!(lx.len(), 2);
        assert_eq!(lx.transcription("cat"), Some("kæt"));
        assert_eq!(lx.transcription("dog"), Some("dɔɡ"));
        assert!(!lx.contains("broken-row"));
    }

    #[test]
    fn tsv_rows_with_invalid_utf8_are_skipped() {
        let data = &b"night\tn a\xc9\xaa t\nbad\xff\tx y\nlight\tl a t\n"[..];
        let lx = PronunciationLookup::from_tsv_reader(data).unwrap();
        assert_eq!(lx.len(), 2);
        assert_eq!(lx.transcription("night"), Some("naɪt"));
        assert_eq!(lx.transcription("light"), Some("lat"));
    }

    #[test]
    fn csv_rows_last_duplicate_wins() {
        let data = "amour,a m u ʁ\nseul\njour,ʒ u ʁ\namour,amuʁ2\n";
        let lx = PronunciationLookup::from_csv_reader(data.as_bytes()).unwrap();
        assert_eq!(lx.len(), 2);
        assert_eq!(lx.transcription("amour"), Some("amuʁ2"));
        assert_eq!(lx.transcription("jour"), Some("ʒuʁ"));
    }

    #[test]
    fn format_from_extension() {
        assert_eq!(LexiconFormat::from_path("fr.csv"), LexiconFormat::Csv);
        assert_eq!(LexiconFormat::from_path("cmudict.ipa"), LexiconFormat::Tsv);
        assert_eq!(LexiconFormat::from_path("en.bincode"), LexiconFormat::Bincode);
    }

    #[test]
    fn format_keys_a_map_with_its_path() {
        use std::collections::HashSet;
        use std::path::PathBuf;

        let mut seen = HashSet::new();
        assert!(seen.insert((PathBuf::from("fr.csv"), LexiconFormat::Csv)));
        assert!(!seen.insert((PathBuf::from("fr.csv"), LexiconFormat::Csv)));
        assert!(seen.insert((PathBuf::from("fr.csv"), LexiconFormat::Tsv)));
        assert_eq!(seen.len(), 2);
    }
}
