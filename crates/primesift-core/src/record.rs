//! Per-prime record lifecycle: ingest keys, finalize summaries.

use crate::avalanche::avalanche_into;
use crate::error::Error;
use crate::hasher::{encode_key, prime_hash};
use crate::summary::TallySummary;
use crate::tally::BitTally;

/// Smallest supported key length in bytes.
pub const KEY_LEN_MIN: usize = 1;
/// Largest supported key length in bytes (a key must fit in one `u64`).
pub const KEY_LEN_MAX: usize = 8;

/// All statistics collected for one candidate prime: a raw-hash tally and
/// an avalanche tally per key-length bucket, plus their summaries.
///
/// Lifecycle: [`PrimeRecord::new`] → any number of [`ingest`] calls →
/// [`finalize`] once → serialize via [`crate::codec`]. The record is not
/// mutated after finalization. Each record exclusively owns its tallies;
/// nothing is shared between primes.
///
/// [`ingest`]: PrimeRecord::ingest
/// [`finalize`]: PrimeRecord::finalize
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrimeRecord {
    pub prime: u64,
    /// Raw hash output tallies, indexed by key length - 1.
    pub hash_bits: [BitTally; KEY_LEN_MAX],
    /// Avalanche difference tallies, indexed by key length - 1.
    pub avalanche: [BitTally; KEY_LEN_MAX],
    /// Summaries of `hash_bits`; zero until finalized.
    pub hash_meta: [TallySummary; KEY_LEN_MAX],
    /// Summaries of `avalanche`; zero until finalized.
    pub avalanche_meta: [TallySummary; KEY_LEN_MAX],
}

impl PrimeRecord {
    /// An empty record for the given prime, all counters zeroed.
    pub fn new(prime: u64) -> Self {
        Self {
            prime,
            hash_bits: [BitTally::new(); KEY_LEN_MAX],
            avalanche: [BitTally::new(); KEY_LEN_MAX],
            hash_meta: [TallySummary::default(); KEY_LEN_MAX],
            avalanche_meta: [TallySummary::default(); KEY_LEN_MAX],
        }
    }

    /// Feed one key through the raw-hash tally and the avalanche loop for
    /// its length bucket. Rejects lengths outside 1..=8 rather than
    /// truncating the key.
    pub fn ingest(&mut self, key: &[u8]) -> Result<(), Error> {
        let len = key.len();
        if !(KEY_LEN_MIN..=KEY_LEN_MAX).contains(&len) {
            return Err(Error::InvalidKeyLength { len });
        }

        let encoded = encode_key(key);
        let hash = prime_hash(self.prime, encoded);
        let idx = len - 1;

        self.hash_bits[idx].observe(hash);
        avalanche_into(&mut self.avalanche[idx], self.prime, encoded, len, hash);
        Ok(())
    }

    /// Reduce all 16 tallies into summaries. Fails with
    /// [`Error::EmptyTally`] if any length bucket saw no keys; callers must
    /// feed at least one key per bucket before finalizing.
    pub fn finalize(&mut self) -> Result<(), Error> {
        for idx in 0..KEY_LEN_MAX {
            self.hash_meta[idx] = TallySummary::from_tally(&self.hash_bits[idx])?;
            self.avalanche_meta[idx] = TallySummary::from_tally(&self.avalanche[idx])?;
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
