//! Fixed-size binary codec for [`PrimeRecord`].
//!
//! The on-disk format is a flat array of 8968-byte records with no header,
//! framing, versioning, or checksum. All fields are little-endian: counters
//! are `u32`, the prime is `u64`. Field order (matching the historical data
//! files exactly):
//!
//! ```text
//! prime                 u64
//! hash_bits[0..8]       set_count 64×u32, pop_count 64×u32, samples u32
//! avalanche[0..8]       same shape
//! hash_meta[0..8]       samples, bit{min,max,gap,sum,avg}, pop{min,max,gap,sum,avg}
//! avalanche_meta[0..8]  same shape
//! ```
//!
//! Changing any field width or order breaks interchange with existing data
//! files; don't.

use crate::error::Error;
use crate::record::{KEY_LEN_MAX, PrimeRecord};
use crate::summary::{AxisSummary, TallySummary};
use crate::tally::{BitTally, HASH_BITS};

/// Encoded size of one [`BitTally`]: 64 + 64 + 1 u32 counters.
pub const TALLY_BYTES: usize = (HASH_BITS * 2 + 1) * 4;

/// Encoded size of one [`TallySummary`]: 11 u32 fields.
pub const SUMMARY_BYTES: usize = 11 * 4;

/// Encoded size of one full record.
pub const RECORD_BYTES: usize =
    8 + KEY_LEN_MAX * 2 * TALLY_BYTES + KEY_LEN_MAX * 2 * SUMMARY_BYTES;

// ---------------------------------------------------------------------------
// Encoding
// ---------------------------------------------------------------------------

/// Append the record's canonical encoding to `out` (exactly
/// [`RECORD_BYTES`] bytes).
pub fn encode_into(rec: &PrimeRecord, out: &mut Vec<u8>) {
    out.reserve(RECORD_BYTES);
    out.extend_from_slice(&rec.prime.to_le_bytes());
    for tally in &rec.hash_bits {
        put_tally(tally, out);
    }
    for tally in &rec.avalanche {
        put_tally(tally, out);
    }
    for meta in &rec.hash_meta {
        put_summary(meta, out);
    }
    for meta in &rec.avalanche_meta {
        put_summary(meta, out);
    }
}

/// Encode a record into a fresh buffer.
pub fn encode_record(rec: &PrimeRecord) -> Vec<u8> {
    let mut out = Vec::with_capacity(RECORD_BYTES);
    encode_into(rec, &mut out);
    out
}

fn put_tally(tally: &BitTally, out: &mut Vec<u8>) {
    for &c in &tally.set_count {
        out.extend_from_slice(&c.to_le_bytes());
    }
    for &c in &tally.pop_count {
        out.extend_from_slice(&c.to_le_bytes());
    }
    out.extend_from_slice(&tally.samples.to_le_bytes());
}

fn put_summary(meta: &TallySummary, out: &mut Vec<u8>) {
    out.extend_from_slice(&meta.samples.to_le_bytes());
    put_axis(&meta.bit, out);
    put_axis(&meta.pop, out);
}

fn put_axis(axis: &AxisSummary, out: &mut Vec<u8>) {
    // stored order: min, max, gap, sum, avg (gap before sum, as declared
    // in the original record layout)
    out.extend_from_slice(&axis.min.to_le_bytes());
    out.extend_from_slice(&axis.max.to_le_bytes());
    out.extend_from_slice(&axis.gap.to_le_bytes());
    out.extend_from_slice(&axis.sum.to_le_bytes());
    out.extend_from_slice(&axis.avg.to_le_bytes());
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

/// Decode one record from a slice of exactly [`RECORD_BYTES`] bytes.
pub fn decode_record(buf: &[u8]) -> Result<PrimeRecord, Error> {
    if buf.len() != RECORD_BYTES {
        return Err(Error::BadRecordLength { len: buf.len() });
    }

    let mut r = Reader { buf, pos: 0 };
    let mut rec = PrimeRecord::new(r.u64());
    for tally in &mut rec.hash_bits {
        *tally = r.tally();
    }
    for tally in &mut rec.avalanche {
        *tally = r.tally();
    }
    for meta in &mut rec.hash_meta {
        *meta = r.summary();
    }
    for meta in &mut rec.avalanche_meta {
        *meta = r.summary();
    }
    debug_assert_eq!(r.pos, RECORD_BYTES);
    Ok(rec)
}

/// Little-endian field reader over a length-checked record slice.
struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn u32(&mut self) -> u32 {
        let v = u32::from_le_bytes([
            self.buf[self.pos],
            self.buf[self.pos + 1],
            self.buf[self.pos + 2],
            self.buf[self.pos + 3],
        ]);
        self.pos += 4;
        v
    }

    fn u64(&mut self) -> u64 {
        let mut b = [0u8; 8];
        b.copy_from_slice(&self.buf[self.pos..self.pos + 8]);
        self.pos += 8;
        u64::from_le_bytes(b)
    }

    fn tally(&mut self) -> BitTally {
        let mut t = BitTally::new();
        for slot in &mut t.set_count {
            *slot = self.u32();
        }
        for slot in &mut t.pop_count {
            *slot = self.u32();
        }
        t.samples = self.u32();
        t
    }

    fn summary(&mut self) -> TallySummary {
        TallySummary {
            samples: self.u32(),
            bit: self.axis(),
            pop: self.axis(),
        }
    }

    fn axis(&mut self) -> AxisSummary {
        AxisSummary {
            min: self.u32(),
            max: self.u32(),
            gap: self.u32(),
            sum: self.u32(),
            avg: self.u32(),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
