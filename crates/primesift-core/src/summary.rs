//! Reduction of a [`BitTally`] into min/max/gap/sum/avg metadata.
//!
//! # The asymmetric min/max scan
//!
//! The historical data format computes min and max in a single pass with an
//! `if v < min { .. } else if v > max { .. }` pair: an element that lowers
//! `min` is never also tested against `max`, and `max` only rises on a
//! *later* strictly-greater element. In particular, a tally whose first
//! examined bucket is also its true maximum reports `max = 0`, and
//! `gap = max - min` then wraps around zero.
//!
//! That scan is reproduced here exactly, in both the bit-position view and
//! the popcount view. Millions of records on disk carry summaries computed
//! this way, and whether downstream filters depend on the skewed values is
//! unknown, so compatibility wins over correctness. The same holds for the
//! 1-based `(i + 1)` weighting in `pop.sum`, which disagrees with the
//! 0-based indices reported by `pop.min`/`pop.max` over the same histogram.

use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::tally::{BitTally, HASH_BITS};

// ---------------------------------------------------------------------------
// Summary types
// ---------------------------------------------------------------------------

/// One reduced view of a tally: extremes, spread, total, truncating mean.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AxisSummary {
    pub min: u32,
    pub max: u32,
    /// `max - min`, wrapping. Wraps when the asymmetric scan leaves
    /// `max` below `min` (see module docs).
    pub gap: u32,
    pub sum: u32,
    /// `sum / samples`, truncating integer division.
    pub avg: u32,
}

/// Summary of a finalized [`BitTally`]: the set-bit-position view and the
/// popcount view. Computed once; immutable afterwards.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallySummary {
    /// Number of observed values (`BitTally::samples`).
    pub samples: u32,
    /// Over `set_count`: extremes and total of the per-bit counters.
    pub bit: AxisSummary,
    /// Over `pop_count`: extremes of the *observed popcount values*
    /// (histogram indices with nonzero counts), and the 1-based weighted
    /// total `Σ pop_count[i] * (i + 1)`.
    pub pop: AxisSummary,
}

impl TallySummary {
    /// Reduce a tally. Fails with [`Error::EmptyTally`] when no value has
    /// been observed — the truncating averages divide by the sample count.
    pub fn from_tally(tally: &BitTally) -> Result<Self, Error> {
        if tally.samples == 0 {
            return Err(Error::EmptyTally);
        }

        // Bit-position view: extremes over counter values.
        let mut bit = AxisSummary {
            min: u32::MAX,
            ..AxisSummary::default()
        };
        for &c in &tally.set_count {
            if c < bit.min {
                bit.min = c;
            } else if c > bit.max {
                // asymmetric on purpose: never reached in the iteration
                // that lowered min (module docs)
                bit.max = c;
            }
            bit.sum += c;
        }
        bit.avg = bit.sum / tally.samples;
        bit.gap = bit.max.wrapping_sub(bit.min);

        // Popcount view: extremes over occupied histogram *indices*.
        let mut pop = AxisSummary {
            min: u32::MAX,
            ..AxisSummary::default()
        };
        for i in 0..HASH_BITS {
            let idx = i as u32;
            if tally.pop_count[i] > 0 {
                if idx < pop.min {
                    pop.min = idx;
                } else if idx > pop.max {
                    pop.max = idx;
                }
            }
            // 1-based weighting, 0-based min/max; historical
            pop.sum += tally.pop_count[i] * (idx + 1);
        }
        pop.avg = pop.sum / tally.samples;
        pop.gap = pop.max.wrapping_sub(pop.min);

        Ok(Self {
            samples: tally.samples,
            bit,
            pop,
        })
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
