use anyhow::Result;
use paroles_core::{LexiconFormat, PronunciationLookup};
use std::path::{Path, PathBuf};

/// Merge dictionary sources into one lookup; for a word present in several
/// inputs the later input wins.
pub fn merge(inputs: &[PathBuf], format: Option<LexiconFormat>) -> Result<PronunciationLookup> {
    let mut merged = PronunciationLookup::new();
    for input in inputs {
        let format = format.unwrap_or_else(|| LexiconFormat::from_path(input));
        let lookup = PronunciationLookup::load(input, format)?;
        for (word, phon) in lookup.entries() {
            merged.insert(&word, &phon);
        }
    }
    Ok(merged)
}

pub fn run(
    inputs: &[PathBuf],
    format: Option<LexiconFormat>,
    out_fst: &Path,
    out_payload: &Path,
    snapshot: Option<&Path>,
) -> Result<usize> {
    let merged = merge(inputs, format)?;
    merged.write_fst_bincode(out_fst, out_payload)?;
    if let Some(path) = snapshot {
        merged.save_bincode(path)?;
    }
    Ok(merged.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn later_inputs_override_earlier_ones() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.tsv");
        fs::write(&a, "amour,a m u ʁ\nnuit,n ɥ i\n").unwrap();
        fs::write(&b, "amour\ta m u ː ʁ\n").unwrap();

        let fst = dir.path().join("fr.fst");
        let payload = dir.path().join("fr.payload.bincode");
        let n = run(&[a, b], None, &fst, &payload, None).unwrap();
        assert_eq!(n, 2);

        let loaded = PronunciationLookup::load_from_fst_bincode(&fst, &payload).unwrap();
        assert_eq!(loaded.transcription("amour"), Some("amuːʁ"));
        assert_eq!(loaded.transcription("nuit"), Some("nɥi"));
    }
}
