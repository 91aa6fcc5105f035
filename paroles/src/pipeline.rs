//! Corpus-wide analyses.
//!
//! Songs are analysed in parallel with rayon (one song per task) and the
//! rows are collected back in sorted folder order before writing, so the
//! reports are identical from run to run.

use std::fs::{self, File};
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use paroles_core::FrequencyVector;
use rayon::prelude::*;
use tracing::{info, warn};

use crate::config::{PerVariant, ProjectConfig, Variant};
use crate::corpus::{Corpus, Song};
use crate::engine::EngineSet;
use crate::report::{
    self, CountsRow, PosRow, RhymeRow, COUNTS_FILE, POS_FILE, RHYMES_FILE, VOCAB_DIR,
};

/// One report of the corpus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Report {
    Rhymes,
    Counts,
    Pos,
    Vocab,
}

impl Report {
    pub const ALL: [Report; 4] = [Report::Rhymes, Report::Counts, Report::Pos, Report::Vocab];
}

pub struct Pipeline<'a> {
    config: &'a ProjectConfig,
    engines: &'a EngineSet,
    corpus: Corpus,
}

impl<'a> Pipeline<'a> {
    pub fn new(config: &'a ProjectConfig, engines: &'a EngineSet, corpus: Corpus) -> Self {
        Self {
            config,
            engines,
            corpus,
        }
    }

    fn lyric_files(&self) -> Vec<&str> {
        Variant::ALL
            .iter()
            .map(|v| self.config.variant(*v).lyrics_file.as_str())
            .collect()
    }

    fn translation_files(&self) -> Vec<&str> {
        Variant::ALL
            .iter()
            .map(|v| self.config.variant(*v).translation_file.as_str())
            .collect()
    }

    /// Songs holding every file in `files`; the others are logged and skipped.
    fn complete_songs(&self, files: &[&str], report: &str) -> Vec<&Song> {
        self.corpus
            .songs()
            .iter()
            .filter(|song| match song.first_missing(files) {
                Some(missing) => {
                    warn!(song = %song.folder, file = missing, report, "skipping song with missing file");
                    false
                }
                None => true,
            })
            .collect()
    }

    pub fn rhyme_rows(&self) -> Result<Vec<RhymeRow>> {
        self.complete_songs(&self.lyric_files(), "rhymes")
            .into_par_iter()
            .map(|song| {
                let lyrics = song.lyrics(self.config)?;
                let analyses = self.engines.engines().try_map_with(&lyrics, |engine, lines| {
                    engine.rhymes(lines).with_context(|| {
                        format!("rhyme scheme of {} ({})", song.folder, engine.variant().code())
                    })
                })?;
                Ok(RhymeRow {
                    song: song.name(),
                    analyses,
                })
            })
            .collect()
    }

    pub fn count_rows(&self) -> Result<Vec<CountsRow>> {
        self.complete_songs(&self.lyric_files(), "counts")
            .into_par_iter()
            .map(|song| {
                let lyrics = song.lyrics(self.config)?;
                let counts = self
                    .engines
                    .engines()
                    .try_map_with(&lyrics, |engine, lines| -> Result<_> {
                        Ok(engine.counts(lines))
                    })?;
                Ok(CountsRow {
                    song: song.name(),
                    counts,
                })
            })
            .collect()
    }

    pub fn pos_rows(&self) -> Result<Vec<PosRow>> {
        if !self.engines.can_tag() {
            bail!("part-of-speech report needs a `pos_tags` table for every variant");
        }
        self.complete_songs(&self.lyric_files(), "pos")
            .into_par_iter()
            .map(|song| {
                let lyrics = song.lyrics(self.config)?;
                let distributions =
                    self.engines
                        .engines()
                        .try_map_with(&lyrics, |engine, lines| {
                            engine.pos_distribution(lines).with_context(|| {
                                format!("no tagger for {}", engine.variant().code())
                            })
                        })?;
                Ok(PosRow {
                    song: song.name(),
                    distributions,
                })
            })
            .collect()
    }

    /// Vocabulary vectors of every complete song, keyed by folder.
    pub fn vocabularies(&self) -> Result<Vec<(String, PerVariant<FrequencyVector>)>> {
        self.complete_songs(&self.translation_files(), "vocab")
            .into_par_iter()
            .map(|song| {
                let texts = song.translations(self.config)?;
                let vectors = self
                    .engines
                    .engines()
                    .try_map_with(&texts, |engine, lines| -> Result<_> {
                        Ok(engine.vocabulary(lines))
                    })?;
                Ok((song.folder.clone(), vectors))
            })
            .collect()
    }

    /// Compute and write one report under `results`, returning the path
    /// written (a directory for the vocabulary comparison).
    pub fn write(&self, kind: Report, results: &Path) -> Result<PathBuf> {
        fs::create_dir_all(results)
            .with_context(|| format!("create results directory {}", results.display()))?;
        let path = match kind {
            Report::Rhymes => {
                let path = results.join(RHYMES_FILE);
                report::write_rhymes(create(&path)?, &self.rhyme_rows()?)?;
                path
            }
            Report::Counts => {
                let path = results.join(COUNTS_FILE);
                report::write_counts(create(&path)?, &self.count_rows()?)?;
                path
            }
            Report::Pos => {
                let rows = self.pos_rows()?;
                let path = results.join(POS_FILE);
                report::write_pos(create(&path)?, &rows)?;
                path
            }
            Report::Vocab => {
                let dir = results.join(VOCAB_DIR);
                fs::create_dir_all(&dir)
                    .with_context(|| format!("create {}", dir.display()))?;
                let top = self.config.english.base.top_words;
                for (folder, vectors) in self.vocabularies()? {
                    let file = dir.join(format!("{}.txt", folder));
                    report::write_vocab(create(&file)?, &vectors, top)?;
                }
                dir
            }
        };
        info!(path = %path.display(), "wrote {:?} report", kind);
        Ok(path)
    }

    /// Every report. The part-of-speech table is skipped with a warning
    /// when not every variant has a tag table.
    pub fn write_all(&self, results: &Path) -> Result<Vec<PathBuf>> {
        let mut written = Vec::new();
        for kind in Report::ALL {
            if kind == Report::Pos && !self.engines.can_tag() {
                warn!("no part-of-speech tag tables configured; skipping pos report");
                continue;
            }
            written.push(self.write(kind, results)?);
        }
        Ok(written)
    }
}

fn create(path: &Path) -> Result<BufWriter<File>> {
    let f = File::create(path).with_context(|| format!("create {}", path.display()))?;
    Ok(BufWriter::new(f))
}
