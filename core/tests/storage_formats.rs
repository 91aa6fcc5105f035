//! Dictionary and configuration storage formats: TSV/CSV sources, bincode
//! snapshots, fst + bincode artifacts and TOML configuration.

use paroles_core::{Config, LabelOverflow, LexiconFormat, PronunciationLookup};
use std::fs;

fn sample_lookup() -> PronunciationLookup {
    let mut lx = PronunciationLookup::new();
    lx.insert("amour", "a m u ʁ");
    lx.insert("toujours", "t u ʒ u ʁ");
    lx.insert("été", "e t e");
    lx
}

#[test]
fn load_tsv_and_csv_from_disk() {
    let dir = tempfile::tempdir().unwrap();

    let tsv = dir.path().join("cmudict.ipa");
    fs::write(&tsv, "night\tn aɪ t\nlight\tl aɪ t\n\nbad row\n").unwrap();
    let en = PronunciationLookup::load_path(&tsv).unwrap();
    assert_eq!(en.len(), 2);
    assert_eq!(en.transcription("night"), Some("naɪt"));

    let csv = dir.path().join("fr.csv");
    fs::write(&csv, "amour,a m u ʁ\n\"toujours\",\"t u ʒ u ʁ\"\nincomplet\n").unwrap();
    let fr = PronunciationLookup::load(&csv, LexiconFormat::Csv).unwrap();
    assert_eq!(fr.len(), 2);
    assert_eq!(fr.transcription("toujours"), Some("tuʒuʁ"));
}

#[test]
fn missing_dictionary_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let err = PronunciationLookup::load_path(dir.path().join("nope.csv")).unwrap_err();
    assert!(format!("{:#}", err).contains("nope.csv"));
}

#[test]
fn bincode_snapshot_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("fr.bincode");
    let lx = sample_lookup();
    lx.save_bincode(&path).unwrap();

    let loaded = PronunciationLookup::load_path(&path).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.entries(), lx.entries());
}

#[test]
fn fst_artifacts_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let fst_path = dir.path().join("fr.fst");
    let payload_path = dir.path().join("fr.payload.bincode");
    let lx = sample_lookup();
    lx.write_fst_bincode(&fst_path, &payload_path).unwrap();

    let mut loaded = PronunciationLookup::load_from_fst_bincode(&fst_path, &payload_path).unwrap();
    assert_eq!(loaded.len(), 3);
    assert_eq!(loaded.lookup("été").map(|p| p.to_string()), Some("ete".to_string()));
    assert!(loaded.lookup("jamais").is_none());

    // in-memory entries shadow and extend the fst entries
    loaded.insert("amour", "amuːʁ");
    loaded.insert("jamais", "ʒamɛ");
    assert_eq!(loaded.len(), 4);
    assert_eq!(loaded.transcription("amour"), Some("amuːʁ"));
    assert_eq!(loaded.entries().len(), 4);
}

#[test]
fn config_toml_file_roundtrip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("paroles.toml");
    let mut config = Config::default();
    config.label_overflow = LabelOverflow::Extend;
    config.top_words = 5;
    config.save_toml(&path).unwrap();

    let loaded = Config::load_toml(&path).unwrap();
    assert_eq!(loaded, config);
}
