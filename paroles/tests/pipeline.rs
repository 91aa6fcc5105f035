//! End-to-end runs over a small on-disk corpus.

use std::fs;
use std::path::Path;

use paroles::{Corpus, EngineSet, Pipeline, ProjectConfig, Report};

const EN_DICT: &str = "night\tn aɪ t\nlight\tl aɪ t\nday\td eɪ\nway\tw eɪ\n";
const FR_DICT: &str = "amour,a m u ʁ\ntoujours,t u ʒ u ʁ\nnuit,n ɥ i\npluie,p l ɥ i\n";
const TAGS: &str = "night\tNN\nday\tNN\nway\tNN\nlight\tNN\nthe\tDT\nin\tIN\n";

fn write_song(root: &Path, folder: &str, files: &[(&str, &str)]) {
    let dir = root.join(folder);
    fs::create_dir_all(&dir).unwrap();
    for (name, text) in files {
        fs::write(dir.join(name), text).unwrap();
    }
}

/// A project with one complete song and one song lacking `qc.txt` and the
/// translations.
fn project(root: &Path) -> ProjectConfig {
    fs::write(root.join("cmudict.ipa"), EN_DICT).unwrap();
    fs::write(root.join("fr.csv"), FR_DICT).unwrap();

    let songs = root.join("songs");
    let en = "By day\nin the night\nall the way\nthe light\n";
    write_song(
        &songs,
        "first_song",
        &[
            ("en.txt", en),
            ("fr.txt", "Mon amour\nla nuit\ntoujours\nsous la pluie\n"),
            ("qc.txt", "Mon amour\ntoujours\nla nuit\nla pluie\n"),
            ("fr_trans.txt", "My love\nthe night\nalways\nunder the rain\n"),
            ("qc_trans.txt", "My love\nalways\nthe night\nthe rain\n"),
        ],
    );
    write_song(
        &songs,
        "broken_song",
        &[("en.txt", en), ("fr.txt", "la nuit\n")],
    );

    let mut config = ProjectConfig::default();
    config.songs_dir = songs;
    config.results_dir = root.join("results");
    config.english.dictionary = root.join("cmudict.ipa");
    config.french.dictionary = root.join("fr.csv");
    config.quebecois.dictionary = root.join("fr.csv");
    config
}

fn read(path: &Path) -> String {
    fs::read_to_string(path).unwrap()
}

#[test]
fn rhymes_table_for_complete_songs_only() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());
    let engines = EngineSet::load(&config).unwrap();
    let pipeline = Pipeline::new(&config, &engines, Corpus::open(&config.songs_dir).unwrap());

    let path = pipeline.write(Report::Rhymes, &config.results_dir).unwrap();
    let text = read(&path);
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 2, "{}", text);
    assert_eq!(
        lines[0],
        "song,en_scheme,fr_scheme,qc_scheme,en_abab,fr_abab,qc_abab,en_abba,fr_abba,qc_abba,\
         en_run,fr_run,qc_run,en_common,en_freq,fr_common,fr_freq,qc_common,qc_freq,\
         en_diff,fr_diff,qc_diff"
    );
    assert_eq!(
        lines[1],
        "first song,ABAB,ABAB,AABB,1,1,0,0,0,0,1,1,2,eɪ,0.5,uʁ,0.5,uʁ,0.5,2,2,2"
    );
}

#[test]
fn all_reports_without_tag_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());
    let engines = EngineSet::load(&config).unwrap();
    let pipeline = Pipeline::new(&config, &engines, Corpus::open(&config.songs_dir).unwrap());

    let written = pipeline.write_all(&config.results_dir).unwrap();
    assert_eq!(written.len(), 3);
    assert!(!config.results_dir.join("pos.csv").exists());

    let counts = read(&config.results_dir.join("counts.csv"));
    let row = counts.lines().nth(1).unwrap();
    assert!(row.starts_with("first song,4,10,8,7,"), "{}", row);

    let vocab_dir = config.results_dir.join("content_comp");
    assert!(!vocab_dir.join("broken_song.txt").exists());
    let vocab = read(&vocab_dir.join("first_song.txt"));
    assert!(
        vocab.starts_with("top words en: day 1, night 1, way 1, light 1\n"),
        "{}",
        vocab
    );
    assert!(vocab.contains("shared en_fr: 1\n"), "{}", vocab);
    assert!(vocab.contains("shared fr_qc: 4\n"), "{}", vocab);
}

#[test]
fn pos_table_with_tag_tables() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = project(dir.path());
    let tags = dir.path().join("tags.tsv");
    fs::write(&tags, TAGS).unwrap();
    config.english.pos_tags = Some(tags.clone());
    config.french.pos_tags = Some(tags.clone());
    config.quebecois.pos_tags = Some(tags);

    let engines = EngineSet::load(&config).unwrap();
    assert!(engines.can_tag());
    let pipeline = Pipeline::new(&config, &engines, Corpus::open(&config.songs_dir).unwrap());
    let path = pipeline.write(Report::Pos, &config.results_dir).unwrap();

    let text = read(&path);
    let header: Vec<&str> = text.lines().next().unwrap().split(',').collect();
    assert_eq!(header.len(), 25);
    assert_eq!(header[1], "autre_en");

    let row: Vec<&str> = text.lines().nth(1).unwrap().split(',').collect();
    assert_eq!(row[0], "first song");
    // by the all the the | day night way light | in
    assert_eq!(&row[1..9], &["0.5", "0", "0", "0.1", "0.4", "0", "0", "0"]);
}

#[test]
fn pos_report_requires_tag_tables() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());
    let engines = EngineSet::load(&config).unwrap();
    let pipeline = Pipeline::new(&config, &engines, Corpus::open(&config.songs_dir).unwrap());
    assert!(pipeline.write(Report::Pos, &config.results_dir).is_err());
}

#[test]
fn missing_dictionary_aborts() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = project(dir.path());
    config.french.dictionary = dir.path().join("missing.csv");
    let err = EngineSet::load(&config).err().unwrap();
    assert!(format!("{:#}", err).contains("missing.csv"), "{:#}", err);
}

#[test]
fn french_variants_share_one_lookup() {
    let dir = tempfile::tempdir().unwrap();
    let config = project(dir.path());
    let engines = EngineSet::load(&config).unwrap();
    let fr = engines.get(paroles::Variant::French).lookup();
    let qc = engines.get(paroles::Variant::Quebecois).lookup();
    assert!(std::ptr::eq(fr, qc));
    assert_eq!(fr.len(), 4);
}
