//! Sweep execution: drive key samples through records, one prime at a time.
//!
//! A record is independent of every other record once it has its prime and
//! the shared (read-only) key set, so a batch of primes shards cleanly
//! across scoped worker threads. Ingestion within one record stays
//! sequential; workers only join to hand back finished records.

use std::sync::Mutex;

use log::debug;

use crate::error::Error;
use crate::keys::KeySet;
use crate::record::PrimeRecord;

/// Compute the full finalized record for one prime: every key in every
/// length bucket, raw and avalanche tallies, then the summary reduction.
pub fn run_prime(prime: u64, keys: &KeySet) -> Result<PrimeRecord, Error> {
    let mut rec = PrimeRecord::new(prime);
    for sample in keys.iter() {
        for key in sample.keys() {
            rec.ingest(key)?;
        }
    }
    rec.finalize()?;
    Ok(rec)
}

/// Run a batch of primes, sharded over `threads` scoped workers. Records
/// come back in the same order as `primes`; with `threads <= 1` the batch
/// runs serially on the calling thread. Results are identical either way.
pub fn sweep(primes: &[u64], keys: &KeySet, threads: usize) -> Result<Vec<PrimeRecord>, Error> {
    if threads <= 1 || primes.len() <= 1 {
        return primes.iter().map(|&p| run_prime(p, keys)).collect();
    }

    let chunk_size = primes.len().div_ceil(threads);
    let shards: Mutex<Vec<(usize, Result<Vec<PrimeRecord>, Error>)>> = Mutex::new(Vec::new());

    std::thread::scope(|s| {
        for (idx, chunk) in primes.chunks(chunk_size).enumerate() {
            let shards = &shards;
            s.spawn(move || {
                debug!("worker {idx}: {} primes", chunk.len());
                let result = chunk.iter().map(|&p| run_prime(p, keys)).collect();
                shards.lock().unwrap().push((idx, result));
            });
        }
    });

    let mut shards = shards.into_inner().unwrap();
    shards.sort_by_key(|(idx, _)| *idx);

    let mut records = Vec::with_capacity(primes.len());
    for (_, result) in shards {
        records.extend(result?);
    }
    Ok(records)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
