use anyhow::{Context, Result};
use fst::{IntoStreamer, Map, Streamer};
use std::fs::File;
use std::io::BufReader;

fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().collect();
    if args.len() < 4 {
        eprintln!("Usage: {} <fst_path> <payload_path> <word|prefix*>", args[0]);
        std::process::exit(1);
    }

    let fst_path = &args[1];
    let payload_path = &args[2];
    let query = &args[3];

    let fst_data = std::fs::read(fst_path).with_context(|| format!("read {}", fst_path))?;
    let fst_map = Map::new(fst_data).with_context(|| format!("parse fst {}", fst_path))?;

    let f = File::open(payload_path).with_context(|| format!("open {}", payload_path))?;
    let payloads: Vec<String> = bincode::deserialize_from(BufReader::new(f))
        .with_context(|| format!("deserialize {}", payload_path))?;

    let show = |key: &str, idx: u64| match payloads.get(idx as usize) {
        Some(phon) => println!("{}\t{}\t(index {})", key, phon, idx),
        None => println!(
            "{}\tindex {} out of range (total payloads: {})",
            key,
            idx,
            payloads.len()
        ),
    };

    // `prefix*` lists every key starting with `prefix`
    if let Some(prefix) = query.strip_suffix('*') {
        let mut stream = fst_map.range().ge(prefix).into_stream();
        let mut found = 0usize;
        while let Some((k, idx)) = stream.next() {
            let key = String::from_utf8_lossy(k);
            if !key.starts_with(prefix) {
                break;
            }
            show(&key, idx);
            found += 1;
        }
        println!("{} keys with prefix '{}'", found, prefix);
    } else if let Some(idx) = fst_map.get(query) {
        show(query, idx);
    } else {
        println!("Key '{}' not found in FST", query);
    }
    Ok(())
}
