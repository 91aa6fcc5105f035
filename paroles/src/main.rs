use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::info;

use paroles::{
    read_lines, Corpus, Engine, EngineSet, Pipeline, ProjectConfig, PronunciationLookup, Report,
    Variant,
};

#[derive(Parser)]
#[command(name = "paroles")]
#[command(about = "Compare rhyme, counts, part of speech and vocabulary across song translations")]
#[command(version)]
struct Cli {
    /// Project configuration (TOML); defaults are used when absent
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// More log output (-v info, -vv debug); RUST_LOG takes precedence
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(clap::Args)]
struct CorpusArgs {
    /// Songs directory (overrides the configuration)
    #[arg(long)]
    songs: Option<PathBuf>,
    /// Results directory (overrides the configuration)
    #[arg(long)]
    results: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write every report
    All(CorpusArgs),
    /// Write rhymes.csv
    Rhymes(CorpusArgs),
    /// Write counts.csv
    Counts(CorpusArgs),
    /// Write pos.csv
    Pos(CorpusArgs),
    /// Write the per-song vocabulary comparisons
    Vocab(CorpusArgs),
    /// Analyse the rhyme scheme of a single lyric file
    Scheme {
        /// Variant whose dictionary and rules apply
        #[arg(long, value_enum)]
        variant: Variant,
        /// Lyric file, one line per verse
        file: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Print the effective configuration as TOML
    Config,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn load_config(path: Option<&PathBuf>) -> Result<ProjectConfig> {
    match path {
        Some(p) => ProjectConfig::load_toml(p),
        None => Ok(ProjectConfig::default()),
    }
}

fn run_reports(config: &ProjectConfig, args: CorpusArgs, report: Option<Report>) -> Result<()> {
    let songs = args.songs.unwrap_or_else(|| config.songs_dir.clone());
    let results = args.results.unwrap_or_else(|| config.results_dir.clone());

    let engines = EngineSet::load(config)?;
    let corpus = Corpus::open(&songs)?;
    info!(songs = corpus.len(), root = %songs.display(), "analysing corpus");
    let pipeline = Pipeline::new(config, &engines, corpus);

    let written = match report {
        Some(kind) => vec![pipeline.write(kind, &results)?],
        None => pipeline.write_all(&results)?,
    };
    for path in written {
        println!("{}", path.display());
    }
    Ok(())
}

fn run_scheme(
    config: &ProjectConfig,
    variant: Variant,
    file: &Path,
    format: OutputFormat,
) -> Result<()> {
    let cfg = config.variant(variant);
    let lookup = PronunciationLookup::load(&cfg.dictionary, cfg.dictionary_format())?;
    let engine = Engine::new(cfg.clone(), Arc::new(lookup));
    let lines = read_lines(file)?;
    let analysis = engine
        .rhymes(&lines)
        .with_context(|| format!("rhyme scheme of {}", file.display()))?;

    let stdout = io::stdout();
    let mut out = stdout.lock();
    match format {
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &analysis)?;
            writeln!(out)?;
        }
        OutputFormat::Text => {
            for (line, label) in lines.iter().zip(analysis.scheme.labels.chars()) {
                writeln!(out, "{}  {}", label, line)?;
            }
            writeln!(out)?;
            writeln!(out, "scheme: {}", analysis.scheme.labels)?;
            let (abba, abab, run) = analysis.stats.counts();
            writeln!(out, "abba: {}  abab: {}  longest run: {}", abba, abab, run)?;
            let s = &analysis.summary;
            writeln!(
                out,
                "dominant: {} ({:.4})  diversity: {}",
                s.dominant_sound.as_deref().unwrap_or("-"),
                s.dominant_frequency,
                s.diversity
            )?;
            for cluster in &analysis.scheme.clusters {
                writeln!(out, "{}  {}  x{}", cluster.label, cluster.suffix, cluster.members)?;
            }
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let config = load_config(cli.config.as_ref())?;

    match cli.command {
        Commands::All(args) => run_reports(&config, args, None),
        Commands::Rhymes(args) => run_reports(&config, args, Some(Report::Rhymes)),
        Commands::Counts(args) => run_reports(&config, args, Some(Report::Counts)),
        Commands::Pos(args) => run_reports(&config, args, Some(Report::Pos)),
        Commands::Vocab(args) => run_reports(&config, args, Some(Report::Vocab)),
        Commands::Scheme {
            variant,
            file,
            format,
        } => run_scheme(&config, variant, &file, format),
        Commands::Config => {
            print!("{}", config.to_toml_string()?);
            Ok(())
        }
    }
}
