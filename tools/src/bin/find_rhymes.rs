use anyhow::{bail, Result};
use clap::Parser;
use paroles_core::{sound_match, utils, Config, PhoneticForm, PronunciationLookup, SymbolSet};
use std::path::PathBuf;

/// List dictionary words that rhyme with a given word, longest shared tail first.
#[derive(Parser)]
struct Args {
    /// Word to rhyme with
    word: String,

    /// Dictionary source (TSV, CSV or bincode snapshot)
    #[arg(long, conflicts_with_all = ["fst", "payload"])]
    dictionary: Option<PathBuf>,

    /// fst key index written by convert_dictionary
    #[arg(long, requires = "payload")]
    fst: Option<PathBuf>,

    /// bincode transcriptions written by convert_dictionary
    #[arg(long, requires = "fst")]
    payload: Option<PathBuf>,

    #[arg(long, default_value_t = 20)]
    limit: usize,
}

/// Query key as dictionary keys are stored: NFC, lowercased.
fn query_key(word: &str) -> String {
    utils::normalize(word).to_lowercase()
}

/// Transcription of `word` and every other entry sharing a valid tail with
/// it, longest tail first, then alphabetical.
fn rhymes_of(
    lookup: &PronunciationLookup,
    word: &str,
    vowels: &SymbolSet,
) -> Result<(PhoneticForm, Vec<(String, String)>)> {
    let Some(target) = lookup.lookup(word) else {
        bail!("'{}' is not in the dictionary", word);
    };
    let mut hits: Vec<(String, String)> = lookup
        .entries()
        .into_iter()
        .filter(|(w, _)| w != word)
        .filter_map(|(w, phon)| {
            let form = PhoneticForm::from(phon.as_str());
            sound_match(&target, &form, vowels).map(|tail| (w, tail.to_string()))
        })
        .collect();
    hits.sort_by(|a, b| {
        b.1.chars()
            .count()
            .cmp(&a.1.chars().count())
            .then_with(|| a.0.cmp(&b.0))
    });
    Ok((target, hits))
}

fn main() -> Result<()> {
    let args = Args::parse();
    let lookup = match (&args.dictionary, &args.fst, &args.payload) {
        (Some(path), _, _) => PronunciationLookup::load_path(path)?,
        (None, Some(fst), Some(payload)) => PronunciationLookup::load_from_fst_bincode(fst, payload)?,
        _ => bail!("pass --dictionary or both --fst and --payload"),
    };

    let word = query_key(&args.word);
    let vowels = Config::default().rhyme_vowel_set();
    let (target, hits) = rhymes_of(&lookup, &word, &vowels)?;

    println!("{} /{}/: {} rhymes", word, target, hits.len());
    for (w, tail) in hits.iter().take(args.limit) {
        println!("  {}  -{}", w, tail);
    }
    Ok(())
}
