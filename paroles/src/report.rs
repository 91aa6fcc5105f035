//! Report tables and vocabulary comparison files.
//!
//! Tables are written with the `csv` crate, one row per song, variant columns
//! in `en`, `fr`, `qc` order.

use std::io::Write;

use anyhow::Result;
use paroles_core::{overlap, FrequencyVector, PosBucket, PosDistribution, TextCounts};

use crate::config::{PerVariant, Variant};
use crate::engine::RhymeAnalysis;

pub const RHYMES_FILE: &str = "rhymes.csv";
pub const COUNTS_FILE: &str = "counts.csv";
pub const POS_FILE: &str = "pos.csv";
pub const VOCAB_DIR: &str = "content_comp";

pub struct RhymeRow {
    pub song: String,
    pub analyses: PerVariant<RhymeAnalysis>,
}

pub struct CountsRow {
    pub song: String,
    pub counts: PerVariant<TextCounts>,
}

pub struct PosRow {
    pub song: String,
    pub distributions: PerVariant<PosDistribution>,
}

/// `<prefix>_<variant>` for every variant.
fn per_variant_columns(prefix: &str) -> impl Iterator<Item = String> + '_ {
    Variant::ALL
        .into_iter()
        .map(move |v| format!("{}_{}", v.code(), prefix))
}

pub fn rhyme_columns() -> Vec<String> {
    let mut cols = vec!["song".to_string()];
    for prefix in ["scheme", "abab", "abba", "run"] {
        cols.extend(per_variant_columns(prefix));
    }
    for v in Variant::ALL {
        cols.push(format!("{}_common", v.code()));
        cols.push(format!("{}_freq", v.code()));
    }
    cols.extend(per_variant_columns("diff"));
    cols
}

pub fn count_columns() -> Vec<String> {
    let mut cols = vec!["song".to_string(), "lines".to_string()];
    for prefix in ["w", "s", "spl", "spw", "wpl"] {
        cols.extend(per_variant_columns(prefix));
    }
    cols
}

pub fn pos_columns() -> Vec<String> {
    let mut cols = vec!["song".to_string()];
    for v in Variant::ALL {
        for bucket in PosBucket::ALL {
            cols.push(format!("{}_{}", bucket.name(), v.code()));
        }
    }
    cols
}

pub fn write_rhymes<W: Write>(out: W, rows: &[RhymeRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(rhyme_columns())?;
    for row in rows {
        let a = &row.analyses;
        let mut record = vec![row.song.clone()];
        record.extend(a.iter().map(|(_, x)| x.scheme.labels.clone()));
        record.extend(a.iter().map(|(_, x)| x.stats.abab.to_string()));
        record.extend(a.iter().map(|(_, x)| x.stats.abba.to_string()));
        record.extend(a.iter().map(|(_, x)| x.stats.longest_run.to_string()));
        for (_, x) in a.iter() {
            record.push(x.summary.dominant_sound.clone().unwrap_or_default());
            record.push(x.summary.dominant_frequency.to_string());
        }
        record.extend(a.iter().map(|(_, x)| x.summary.diversity.to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// The `lines` column holds the English line count; each variant's ratios
/// use that variant's own line count.
pub fn write_counts<W: Write>(out: W, rows: &[CountsRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(count_columns())?;
    for row in rows {
        let c = &row.counts;
        let mut record = vec![row.song.clone(), c.en.lines.to_string()];
        record.extend(c.iter().map(|(_, x)| x.words.to_string()));
        record.extend(c.iter().map(|(_, x)| x.syllables.to_string()));
        record.extend(c.iter().map(|(_, x)| x.syllables_per_line().to_string()));
        record.extend(c.iter().map(|(_, x)| x.syllables_per_word().to_string()));
        record.extend(c.iter().map(|(_, x)| x.words_per_line().to_string()));
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_pos<W: Write>(out: W, rows: &[PosRow]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    wtr.write_record(pos_columns())?;
    for row in rows {
        let mut record = vec![row.song.clone()];
        for (_, dist) in row.distributions.iter() {
            record.extend(PosBucket::ALL.iter().map(|b| dist.share(*b).to_string()));
        }
        wtr.write_record(&record)?;
    }
    wtr.flush()?;
    Ok(())
}

/// Plain-text vocabulary comparison of one song: the `top` most frequent
/// words per variant, then shared-word counts for every pair of variants.
pub fn write_vocab<W: Write>(
    mut out: W,
    vectors: &PerVariant<FrequencyVector>,
    top: usize,
) -> Result<()> {
    for (variant, vector) in vectors.iter() {
        let words: Vec<String> = vector
            .top(top)
            .into_iter()
            .map(|(w, n)| format!("{} {}", w, n))
            .collect();
        writeln!(out, "top words {}: {}", variant.code(), words.join(", "))?;
    }

    let pairs = [
        (Variant::English, Variant::French),
        (Variant::English, Variant::Quebecois),
        (Variant::French, Variant::Quebecois),
    ];
    for (left, right) in pairs {
        let o = overlap(vectors.get(left), vectors.get(right));
        writeln!(out)?;
        writeln!(out, "shared {}_{}: {}", left.code(), right.code(), o.len())?;
        writeln!(out, "ratio wrt {}: {:.4}", left.code(), o.ratio_left)?;
        writeln!(out, "ratio wrt {}: {:.4}", right.code(), o.ratio_right)?;
        if !o.is_empty() {
            writeln!(out, "words: {}", o.shared.join(" "))?;
        }
    }
    Ok(())
}
