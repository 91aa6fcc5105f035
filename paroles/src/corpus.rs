//! Song corpus on disk.
//!
//! Every sub-folder of the songs directory is one song and holds one text
//! file per variant (`en.txt`, `fr.txt`, `qc.txt`) plus the English
//! renderings of the French texts (`fr_trans.txt`, `qc_trans.txt`).

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use tracing::{debug, warn};

use crate::config::{PerVariant, ProjectConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Song {
    /// Folder name, used as the song identifier in reports
    pub folder: String,
    pub dir: PathBuf,
}

impl Song {
    /// Human-readable title: the folder name with `_` read as a space.
    pub fn name(&self) -> String {
        self.folder.replace('_', " ")
    }

    pub fn path(&self, file: &str) -> PathBuf {
        self.dir.join(file)
    }

    pub fn has(&self, file: &str) -> bool {
        self.path(file).is_file()
    }

    pub fn read(&self, file: &str) -> Result<Vec<String>> {
        read_lines(self.path(file))
    }

    /// Lyrics of every variant.
    pub fn lyrics(&self, config: &ProjectConfig) -> Result<PerVariant<Vec<String>>> {
        PerVariant {
            en: config.english.lyrics_file.as_str(),
            fr: config.french.lyrics_file.as_str(),
            qc: config.quebecois.lyrics_file.as_str(),
        }
        .try_map(|f| self.read(f))
    }

    /// English renderings used for vocabulary comparison.
    pub fn translations(&self, config: &ProjectConfig) -> Result<PerVariant<Vec<String>>> {
        PerVariant {
            en: config.english.translation_file.as_str(),
            fr: config.french.translation_file.as_str(),
            qc: config.quebecois.translation_file.as_str(),
        }
        .try_map(|f| self.read(f))
    }

    /// First file in `files` that this song lacks.
    pub fn first_missing<'f>(&self, files: &[&'f str]) -> Option<&'f str> {
        files.iter().copied().find(|f| !self.has(f))
    }
}

/// All song folders under a root, sorted by folder name.
#[derive(Debug, Clone)]
pub struct Corpus {
    songs: Vec<Song>,
}

impl Corpus {
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            bail!("songs directory {} does not exist", root.display());
        }
        let mut songs = Vec::new();
        for entry in
            fs::read_dir(root).with_context(|| format!("list songs in {}", root.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_dir() {
                continue;
            }
            match entry.file_name().into_string() {
                Ok(folder) => songs.push(Song {
                    folder,
                    dir: entry.path(),
                }),
                Err(name) => warn!(folder = ?name, "skipping song folder with non UTF-8 name"),
            }
        }
        songs.sort_by(|a, b| a.folder.cmp(&b.folder));
        debug!(root = %root.display(), songs = songs.len(), "opened corpus");
        Ok(Self { songs })
    }

    pub fn songs(&self) -> &[Song] {
        &self.songs
    }

    pub fn len(&self) -> usize {
        self.songs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.songs.is_empty()
    }
}

/// Lines of a UTF-8 text file, without line terminators.
pub fn read_lines<P: AsRef<Path>>(path: P) -> Result<Vec<String>> {
    let path = path.as_ref();
    let content =
        fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    Ok(content.lines().map(|l| l.to_string()).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn songs_are_sorted_and_files_ignored() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("zebra_song")).unwrap();
        fs::create_dir(dir.path().join("a_song")).unwrap();
        fs::write(dir.path().join("notes.txt"), "not a song").unwrap();

        let corpus = Corpus::open(dir.path()).unwrap();
        let folders: Vec<&str> = corpus.songs().iter().map(|s| s.folder.as_str()).collect();
        assert_eq!(folders, vec!["a_song", "zebra_song"]);
        assert_eq!(corpus.songs()[1].name(), "zebra song");
    }

    #[test]
    fn missing_root_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Corpus::open(dir.path().join("nope")).is_err());
    }

    #[test]
    fn lines_keep_blanks_and_drop_terminators() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("en.txt");
        fs::write(&path, "one\r\n\ntwo\n").unwrap();
        assert_eq!(read_lines(&path).unwrap(), vec!["one", "", "two"]);
    }

    #[test]
    fn first_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("en.txt"), "x").unwrap();
        let song = Song {
            folder: "s".into(),
            dir: dir.path().to_path_buf(),
        };
        assert_eq!(song.first_missing(&["en.txt", "fr.txt"]), Some("fr.txt"));
        assert_eq!(song.first_missing(&["en.txt"]), None);
    }
}
