//! # primesift-core
//!
//! **Sift multiplier primes by how well they hash.**
//!
//! `primesift-core` measures the statistical quality of the integer hash
//! family `hash(key) = key * prime` for candidate multiplier primes over
//! fixed key lengths of 1 to 8 bytes. For each (prime, key length) pair it
//! tallies two distributions over a bounded key sample:
//!
//! - the raw output-bit distribution of `hash(key)`, and
//! - the avalanche distribution: the bit difference produced when a single
//!   input bit of the key is flipped.
//!
//! ## Quick Start
//!
//! ```
//! use primesift_core::{KeySet, run_prime};
//!
//! // Sequential keys, 1000 per length bucket
//! let keys = KeySet::sequential(1000);
//!
//! let record = run_prime(0xff51afd7ed558ccd, &keys).unwrap();
//! let ava = &record.avalanche_meta[7]; // 8-byte keys
//! println!("avalanche pop avg: {}", ava.pop.avg);
//! ```
//!
//! ## Architecture
//!
//! Primes → PrimeRecord (16 BitTally accumulators) → summaries → record stream
//!
//! Each prime gets one [`PrimeRecord`]: a raw and an avalanche [`BitTally`]
//! per key-length bucket, reduced by [`TallySummary::from_tally`] into
//! min/max/gap/sum/avg metadata and serialized as one fixed-size
//! little-endian record ([`codec::RECORD_BYTES`] bytes, no header, no
//! framing). A data file is a flat array of such records.
//!
//! The summary reduction deliberately reproduces two quirks of the historical
//! data format (an asymmetric min/max scan and 1-based popcount weighting);
//! see [`summary`] for the details.

pub mod avalanche;
pub mod codec;
pub mod error;
pub mod hasher;
pub mod keys;
pub mod manifest;
pub mod primes;
pub mod record;
pub mod runner;
pub mod store;
pub mod summary;
pub mod tally;

pub use avalanche::avalanche_into;
pub use codec::{RECORD_BYTES, decode_record, encode_record};
pub use error::Error;
pub use hasher::{encode_key, prime_hash};
pub use keys::{KeySample, KeySet};
pub use manifest::RunManifest;
pub use primes::{list_prime_files, load_primes};
pub use record::{KEY_LEN_MAX, KEY_LEN_MIN, PrimeRecord};
pub use runner::{run_prime, sweep};
pub use store::{RecordFile, RecordWriter};
pub use summary::{AxisSummary, TallySummary};
pub use tally::{BitTally, HASH_BITS};

/// Library version (from Cargo.toml).
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
