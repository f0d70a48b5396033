//! `primesift probe` — chart a single prime without touching disk output.

use std::time::Instant;

use primesift_core::run_prime;

use crate::chart;
use super::make_key_set;

/// Run the probe command.
pub fn run(prime: u64, keys_dir: Option<&str>, max_keys: usize, seed: Option<u64>) {
    let keys = match make_key_set(keys_dir, max_keys, seed) {
        Ok(k) => k,
        Err(e) => {
            eprintln!("Error loading keys: {e}");
            std::process::exit(1);
        }
    };

    println!("Probing prime {prime}");
    println!(
        "  Keys: {} ({} total)",
        keys_dir.unwrap_or(if seed.is_some() {
            "synthetic random"
        } else {
            "synthetic sequential"
        }),
        chart::thousands(keys.total_keys() as u64)
    );

    let t0 = Instant::now();
    let record = match run_prime(prime, &keys) {
        Ok(r) => r,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    let elapsed = t0.elapsed();

    chart::print_record(record.prime, &record.hash_meta, &record.avalanche_meta);
    println!();
    println!("Time: {:.3}s", elapsed.as_secs_f64());
}
