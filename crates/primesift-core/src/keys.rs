//! Bounded key samples, one per key-length bucket.
//!
//! A [`KeySample`] owns a flat buffer of fixed-length keys concatenated with
//! no delimiter and exposes only bounds-checked access; callers can never
//! read past the sample's declared length. Samples come from key files on
//! disk (`keys.len.<L>.bin`) or from synthetic generators (sequential or
//! seeded random) for quick probes and tests.

use std::fs;
use std::path::Path;

use log::warn;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};

use crate::error::Error;
use crate::record::{KEY_LEN_MAX, KEY_LEN_MIN};

/// Default cap on keys tested per length bucket.
pub const DEFAULT_MAX_KEYS: usize = 10_000;

// ---------------------------------------------------------------------------
// KeySample
// ---------------------------------------------------------------------------

/// A bounded sample of keys of one fixed byte length.
#[derive(Debug, Clone)]
pub struct KeySample {
    bytes: Vec<u8>,
    key_len: usize,
    count: usize,
}

impl KeySample {
    /// Wrap a raw buffer of concatenated keys, keeping at most `cap` of
    /// them. A trailing partial key is ignored with a warning.
    pub fn from_bytes(bytes: Vec<u8>, key_len: usize, cap: usize) -> Result<Self, Error> {
        if !(KEY_LEN_MIN..=KEY_LEN_MAX).contains(&key_len) {
            return Err(Error::InvalidKeyLength { len: key_len });
        }
        let tail = bytes.len() % key_len;
        if tail != 0 {
            warn!("key buffer for length {key_len} has {tail} trailing bytes; ignoring them");
        }
        let count = (bytes.len() / key_len).min(cap);
        Ok(Self {
            bytes,
            key_len,
            count,
        })
    }

    /// Load a key file: raw keys of length `key_len`, no delimiter.
    pub fn from_file(path: &Path, key_len: usize, cap: usize) -> Result<Self, Error> {
        let bytes = fs::read(path)?;
        Self::from_bytes(bytes, key_len, cap)
    }

    /// Sequential keys 0, 1, 2, ... encoded little-endian, capped at `cap`
    /// and at the encoding domain `256^key_len`.
    pub fn sequential(key_len: usize, cap: usize) -> Result<Self, Error> {
        if !(KEY_LEN_MIN..=KEY_LEN_MAX).contains(&key_len) {
            return Err(Error::InvalidKeyLength { len: key_len });
        }
        let count = cap.min(domain_size(key_len));
        let mut bytes = Vec::with_capacity(count * key_len);
        for i in 0..count as u64 {
            bytes.extend_from_slice(&i.to_le_bytes()[..key_len]);
        }
        Ok(Self {
            bytes,
            key_len,
            count,
        })
    }

    /// `cap` random keys from a seeded generator (reproducible).
    pub fn random(key_len: usize, cap: usize, seed: u64) -> Result<Self, Error> {
        if !(KEY_LEN_MIN..=KEY_LEN_MAX).contains(&key_len) {
            return Err(Error::InvalidKeyLength { len: key_len });
        }
        // mix the length in so buckets don't share a byte stream
        let mut rng = StdRng::seed_from_u64(seed ^ ((key_len as u64) << 32));
        let mut bytes = vec![0u8; cap * key_len];
        rng.fill_bytes(&mut bytes);
        Ok(Self {
            bytes,
            key_len,
            count: cap,
        })
    }

    pub fn key_len(&self) -> usize {
        self.key_len
    }

    /// Number of keys in the sample (after capping).
    pub fn count(&self) -> usize {
        self.count
    }

    /// Bounds-checked access to key `idx`.
    pub fn get(&self, idx: usize) -> Option<&[u8]> {
        if idx >= self.count {
            return None;
        }
        let start = idx * self.key_len;
        self.bytes.get(start..start + self.key_len)
    }

    /// Iterate over the keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &[u8]> {
        self.bytes.chunks_exact(self.key_len).take(self.count)
    }
}

// ---------------------------------------------------------------------------
// KeySet
// ---------------------------------------------------------------------------

/// One key sample per length bucket 1..=8. Every sweep needs all eight.
#[derive(Debug, Clone)]
pub struct KeySet {
    samples: Vec<KeySample>,
}

impl KeySet {
    /// Load `keys.len.<L>.bin` for every length from `dir`. Missing files
    /// are setup errors; key counts are derived from file sizes and capped
    /// at `max_keys` per length.
    pub fn load_dir(dir: &Path, max_keys: usize) -> Result<Self, Error> {
        let mut samples = Vec::with_capacity(KEY_LEN_MAX);
        for len in KEY_LEN_MIN..=KEY_LEN_MAX {
            let path = dir.join(format!("keys.len.{len}.bin"));
            samples.push(KeySample::from_file(&path, len, max_keys)?);
        }
        Ok(Self { samples })
    }

    /// Sequential keys for every length, `max_keys` per bucket.
    pub fn sequential(max_keys: usize) -> Self {
        let samples = (KEY_LEN_MIN..=KEY_LEN_MAX)
            .map(|len| KeySample::sequential(len, max_keys))
            .collect::<Result<_, _>>()
            .expect("lengths 1..=8 are always valid");
        Self { samples }
    }

    /// Seeded random keys for every length, `max_keys` per bucket.
    pub fn random(max_keys: usize, seed: u64) -> Self {
        let samples = (KEY_LEN_MIN..=KEY_LEN_MAX)
            .map(|len| KeySample::random(len, max_keys, seed))
            .collect::<Result<_, _>>()
            .expect("lengths 1..=8 are always valid");
        Self { samples }
    }

    /// The sample for a given key length (1..=8).
    pub fn sample(&self, key_len: usize) -> Option<&KeySample> {
        if !(KEY_LEN_MIN..=KEY_LEN_MAX).contains(&key_len) {
            return None;
        }
        self.samples.get(key_len - 1)
    }

    /// Iterate samples in length order, 1 through 8.
    pub fn iter(&self) -> impl Iterator<Item = &KeySample> {
        self.samples.iter()
    }

    /// Total keys across all buckets.
    pub fn total_keys(&self) -> usize {
        self.samples.iter().map(KeySample::count).sum()
    }
}

/// Number of distinct keys of `key_len` bytes, saturating at `usize::MAX`.
fn domain_size(key_len: usize) -> usize {
    if key_len * 8 >= usize::BITS as usize {
        usize::MAX
    } else {
        1usize << (key_len * 8)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
