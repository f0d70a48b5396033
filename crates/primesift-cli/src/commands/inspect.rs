//! `primesift inspect` — read a data file and chart the records that pass
//! an avalanche-quality filter.

use std::path::Path;

use serde::Serialize;

use primesift_core::{PrimeRecord, RecordFile, TallySummary};

use crate::chart;

/// Summaries of one matching record, for `--output` JSON export.
#[derive(Serialize)]
struct RecordSummaryExport {
    prime: u64,
    hash: [TallySummary; 8],
    avalanche: [TallySummary; 8],
}

/// Run the inspect command.
pub fn run(file: &str, lens: &str, ava_pop_avg: &str, limit: usize, output: Option<&str>) {
    let lens = parse_lens(lens).unwrap_or_else(|| {
        eprintln!("Error: --lens wants comma-separated lengths in 1..=8, e.g. \"7,8\"");
        std::process::exit(1);
    });
    let (avg_min, avg_max) = parse_range(ava_pop_avg).unwrap_or_else(|| {
        eprintln!("Error: --ava-pop-avg wants an inclusive range, e.g. \"15..35\"");
        std::process::exit(1);
    });

    let records = match RecordFile::open(Path::new(file)) {
        Ok(f) => f,
        Err(e) => {
            eprintln!("Error opening {file}: {e}");
            std::process::exit(1);
        }
    };

    println!("file:    {file}");
    println!("size:    {} bytes", chart::thousands(records.byte_len() as u64));
    println!("records: {}", chart::thousands(records.count() as u64));

    let mut exports: Vec<RecordSummaryExport> = Vec::new();
    let mut scanned = 0usize;
    let mut printed = 0usize;

    for rec in records.records() {
        scanned += 1;

        if !record_matches(&rec, &lens, avg_min, avg_max) {
            continue;
        }

        chart::print_record(rec.prime, &rec.hash_meta, &rec.avalanche_meta);
        if output.is_some() {
            exports.push(RecordSummaryExport {
                prime: rec.prime,
                hash: rec.hash_meta,
                avalanche: rec.avalanche_meta,
            });
        }

        printed += 1;
        if printed == limit {
            break;
        }
    }

    println!();
    println!("scanned: {scanned}");
    println!("matched: {printed}");

    if let Some(path) = output {
        let json = match serde_json::to_string_pretty(&exports) {
            Ok(j) => j,
            Err(e) => {
                eprintln!("Error serializing summaries: {e}");
                std::process::exit(1);
            }
        };
        if let Err(e) = std::fs::write(path, json) {
            eprintln!("Error writing {path}: {e}");
            std::process::exit(1);
        }
        println!("wrote:   {path}");
    }
}

/// A record matches when any selected length's avalanche pop.avg falls
/// inside the accepted band. Each record is judged on its own summaries,
/// never on another record's.
fn record_matches(rec: &PrimeRecord, lens: &[usize], lo: u32, hi: u32) -> bool {
    lens.iter()
        .any(|&l| (lo..=hi).contains(&rec.avalanche_meta[l - 1].pop.avg))
}

/// Parse "7,8" into length indices, validating the 1..=8 domain.
fn parse_lens(s: &str) -> Option<Vec<usize>> {
    let mut lens = Vec::new();
    for part in s.split(',') {
        let l: usize = part.trim().parse().ok()?;
        if !(1..=8).contains(&l) {
            return None;
        }
        lens.push(l);
    }
    if lens.is_empty() { None } else { Some(lens) }
}

/// Parse an inclusive "MIN..MAX" (or "MIN..=MAX") range.
fn parse_range(s: &str) -> Option<(u32, u32)> {
    let (lo, hi) = s.split_once("..")?;
    let hi = hi.strip_prefix('=').unwrap_or(hi);
    let lo: u32 = lo.trim().parse().ok()?;
    let hi: u32 = hi.trim().parse().ok()?;
    if lo > hi {
        return None;
    }
    Some((lo, hi))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
