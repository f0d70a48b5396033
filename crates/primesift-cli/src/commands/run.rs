//! `primesift run` — sweep candidate primes and append records to disk.

use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use log::info;

use primesift_core::manifest::{RunManifest, format_iso8601};
use primesift_core::{Error, RecordWriter, list_prime_files, load_primes, sweep};

use crate::chart::thousands;
use super::make_key_set;

/// Options for one sweep run, straight from the CLI flags.
pub struct RunConfig<'a> {
    pub output: &'a str,
    pub keys_dir: Option<&'a str>,
    pub primes_dir: &'a str,
    pub max_keys: usize,
    pub batch_len: usize,
    pub threads: usize,
    pub synthetic: Option<usize>,
    pub seed: Option<u64>,
}

/// Run the sweep command.
pub fn run(cfg: RunConfig) {
    if let Err(e) = run_inner(cfg) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

fn run_inner(cfg: RunConfig) -> Result<(), Error> {
    let threads = if cfg.threads == 0 {
        std::thread::available_parallelism().map(|n| n.get()).unwrap_or(1)
    } else {
        cfg.threads
    };

    let keys = match select_key_source(cfg.keys_dir, cfg.synthetic, cfg.seed) {
        Ok(KeySource::Dir(dir)) => make_key_set(Some(dir), cfg.max_keys, None)?,
        Ok(KeySource::Synthetic { count, seed }) => make_key_set(None, count, seed)?,
        Err(msg) => {
            eprintln!("Error: {msg}");
            std::process::exit(1);
        }
    };

    let prime_files = list_prime_files(Path::new(cfg.primes_dir))?;
    if prime_files.is_empty() {
        eprintln!("Error: no prime files in {}", cfg.primes_dir);
        std::process::exit(1);
    }

    println!("Sweeping primes");
    println!("  Output:    {}", cfg.output);
    match cfg.keys_dir {
        Some(dir) => println!("  Keys:      {dir} (max {} per length)", cfg.max_keys),
        None => println!(
            "  Keys:      synthetic {} per length, {} keys total",
            if cfg.seed.is_some() { "random" } else { "sequential" },
            thousands(keys.total_keys() as u64)
        ),
    }
    println!("  Primes:    {} ({} files)", cfg.primes_dir, prime_files.len());
    println!("  Threads:   {threads}");
    println!("  Batch:     {} records", cfg.batch_len);
    println!();

    // SIGINT finishes the current batch, flushes, and marks the manifest.
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();
    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl+C handler");

    let mut manifest = RunManifest::new(cfg.output, cfg.max_keys, threads);
    let started_at = SystemTime::now();
    manifest.started_at = format_iso8601(
        started_at.duration_since(UNIX_EPOCH).unwrap_or_default(),
    );
    let run_start = Instant::now();

    let mut writer = RecordWriter::create(Path::new(cfg.output), cfg.batch_len)?;
    let mut primes_total: u64 = 0;
    let mut interrupted = false;

    'files: for path in &prime_files {
        let primes = load_primes(path)?;
        let name = path.file_name().map(|n| n.to_string_lossy().to_string());
        println!("file: {}  ({} primes)", name.as_deref().unwrap_or("?"), thousands(primes.len() as u64));
        manifest.prime_files.push(name.unwrap_or_default());

        for batch in primes.chunks(cfg.batch_len) {
            if !running.load(Ordering::SeqCst) {
                interrupted = true;
                break 'files;
            }

            let t0 = Instant::now();
            let records = sweep(batch, &keys, threads)?;
            let elapsed_ns = t0.elapsed().as_nanos() as u64;

            for rec in &records {
                writer.append(rec)?;
            }
            primes_total += batch.len() as u64;

            info!(
                "batch of {}: {} ns total, {} ns/prime",
                batch.len(),
                thousands(elapsed_ns),
                thousands(elapsed_ns / batch.len() as u64)
            );
            println!(
                "  batch: {:>6} primes  time: {:>15} ns  per prime: {:>12} ns",
                batch.len(),
                thousands(elapsed_ns),
                thousands(elapsed_ns / batch.len() as u64)
            );
        }
    }

    let records_written = writer.finish()?;

    manifest.ended_at = format_iso8601(
        SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default(),
    );
    manifest.duration_ms = run_start.elapsed().as_millis() as u64;
    manifest.primes_total = primes_total;
    manifest.records_written = records_written;
    manifest.interrupted = interrupted;
    manifest.write(Path::new(cfg.output))?;

    println!();
    if interrupted {
        println!("Interrupted; current batch flushed.");
    }
    println!(
        "Done: {} records in {}  ({})",
        thousands(records_written),
        cfg.output,
        format_elapsed(run_start.elapsed())
    );
    println!("Manifest: {}", RunManifest::path_for(Path::new(cfg.output)).display());
    Ok(())
}

/// Where the sweep's keys come from.
#[derive(Debug, PartialEq, Eq)]
enum KeySource<'a> {
    Dir(&'a str),
    Synthetic { count: usize, seed: Option<u64> },
}

/// Resolve the key flags. Synthetic keys replace the key directory, and
/// `--seed` only applies to synthetic keys — a seed alongside `--keys`
/// would silently do nothing, so it is rejected instead.
fn select_key_source(
    keys_dir: Option<&str>,
    synthetic: Option<usize>,
    seed: Option<u64>,
) -> Result<KeySource<'_>, &'static str> {
    match (keys_dir, synthetic) {
        (Some(_), Some(_)) => Err("--keys and --synthetic are mutually exclusive"),
        (Some(_), None) if seed.is_some() => {
            Err("--seed only applies to synthetic keys; drop it or use --synthetic")
        }
        (Some(dir), None) => Ok(KeySource::Dir(dir)),
        (None, Some(count)) => Ok(KeySource::Synthetic { count, seed }),
        (None, None) => Err("either --keys or --synthetic is required"),
    }
}

fn format_elapsed(d: Duration) -> String {
    let secs = d.as_secs();
    if secs >= 60 {
        format!("{}m{:02}s", secs / 60, secs % 60)
    } else {
        format!("{:.1}s", d.as_secs_f64())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_key_source_dir_alone() {
        assert_eq!(
            select_key_source(Some("keys/"), None, None),
            Ok(KeySource::Dir("keys/"))
        );
    }

    #[test]
    fn test_key_source_synthetic_with_and_without_seed() {
        assert_eq!(
            select_key_source(None, Some(500), None),
            Ok(KeySource::Synthetic {
                count: 500,
                seed: None
            })
        );
        assert_eq!(
            select_key_source(None, Some(500), Some(42)),
            Ok(KeySource::Synthetic {
                count: 500,
                seed: Some(42)
            })
        );
    }

    #[test]
    fn test_key_source_rejects_seed_with_dir() {
        // a seed next to --keys would otherwise no-op silently
        assert!(select_key_source(Some("keys/"), None, Some(42)).is_err());
    }

    #[test]
    fn test_key_source_rejects_conflicting_and_missing_flags() {
        assert!(select_key_source(Some("keys/"), Some(100), None).is_err());
        assert!(select_key_source(None, None, None).is_err());
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_secs(90)), "1m30s");
        assert_eq!(format_elapsed(Duration::from_millis(2500)), "2.5s");
    }
}
