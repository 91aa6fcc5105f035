mod convert_dictionary;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use paroles_core::LexiconFormat;
use std::path::PathBuf;

#[derive(Clone, Copy, ValueEnum)]
enum InputFormat {
    Tsv,
    Csv,
    Bincode,
}

impl From<InputFormat> for LexiconFormat {
    fn from(f: InputFormat) -> Self {
        match f {
            InputFormat::Tsv => LexiconFormat::Tsv,
            InputFormat::Csv => LexiconFormat::Csv,
            InputFormat::Bincode => LexiconFormat::Bincode,
        }
    }
}

/// Convert pronunciation dictionaries into fst + bincode artifacts.
#[derive(Parser)]
struct Args {
    /// Dictionary sources, merged in order
    #[arg(long, num_args = 1.., required = true)]
    inputs: Vec<PathBuf>,

    /// Source format; detected from each file extension when omitted
    #[arg(long, value_enum)]
    format: Option<InputFormat>,

    #[arg(long, default_value = "lexicon.fst")]
    out_fst: PathBuf,

    #[arg(long, default_value = "lexicon.payload.bincode")]
    out_payload: PathBuf,

    /// Also write a whole-lookup bincode snapshot
    #[arg(long)]
    snapshot: Option<PathBuf>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let n = convert_dictionary::run(
        &args.inputs,
        args.format.map(LexiconFormat::from),
        &args.out_fst,
        &args.out_payload,
        args.snapshot.as_deref(),
    )?;

    println!(
        "Wrote {} entries: fst to {} and payload to {}",
        n,
        args.out_fst.display(),
        args.out_payload.display()
    );
    if let Some(path) = &args.snapshot {
        println!("Wrote snapshot to {}", path.display());
    }
    Ok(())
}
