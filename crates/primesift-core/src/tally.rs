//! Per-bit and per-popcount tallying of observed 64-bit values.

/// Width of the hash output in bits; every tally array is sized to this.
pub const HASH_BITS: usize = 64;

/// Append-only counters over a stream of 64-bit values.
///
/// `set_count[i]` counts observed values with bit `i` set; `pop_count[p]`
/// counts observed values whose population count is `p`. A population count
/// of 64 (only `u64::MAX`) folds into the top bucket so that
/// `sum(pop_count) == samples` always holds.
///
/// Counters only ever grow; there is no removal operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitTally {
    pub set_count: [u32; HASH_BITS],
    pub pop_count: [u32; HASH_BITS],
    pub samples: u32,
}

impl BitTally {
    /// A tally with all counters at zero.
    pub const fn new() -> Self {
        Self {
            set_count: [0; HASH_BITS],
            pop_count: [0; HASH_BITS],
            samples: 0,
        }
    }

    /// Record one value: bump the sample count, the popcount bucket, and
    /// the set-bit counter for every set bit position.
    ///
    /// All 64 positions are scanned even when the caller's values can never
    /// set the high bits; always-zero positions simply accumulate zero.
    pub fn observe(&mut self, value: u64) {
        self.samples += 1;

        // popcount 64 folds into bucket 63 (reachable only via u64::MAX)
        let pop = (value.count_ones() as usize).min(HASH_BITS - 1);
        self.pop_count[pop] += 1;

        let mut v = value;
        for slot in &mut self.set_count {
            *slot += (v & 1) as u32;
            v >>= 1;
        }
    }
}

impl Default for BitTally {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_is_all_zero() {
        let t = BitTally::new();
        assert_eq!(t.samples, 0);
        assert!(t.set_count.iter().all(|&c| c == 0));
        assert!(t.pop_count.iter().all(|&c| c == 0));
    }

    #[test]
    fn test_observe_zero() {
        let mut t = BitTally::new();
        t.observe(0);
        assert_eq!(t.samples, 1);
        assert!(t.set_count.iter().all(|&c| c == 0));
        assert_eq!(t.pop_count[0], 1);
    }

    #[test]
    fn test_observe_known_bits() {
        // 11 = 0b1011: bits 0, 1, 3 set, popcount 3
        let mut t = BitTally::new();
        t.observe(11);
        assert_eq!(t.set_count[0], 1);
        assert_eq!(t.set_count[1], 1);
        assert_eq!(t.set_count[2], 0);
        assert_eq!(t.set_count[3], 1);
        assert!(t.set_count[4..].iter().all(|&c| c == 0));
        assert_eq!(t.pop_count[3], 1);
    }

    #[test]
    fn test_observe_high_bit() {
        let mut t = BitTally::new();
        t.observe(1 << 63);
        assert_eq!(t.set_count[63], 1);
        assert_eq!(t.pop_count[1], 1);
    }

    #[test]
    fn test_popcount_64_folds_to_top_bucket() {
        let mut t = BitTally::new();
        t.observe(u64::MAX);
        assert_eq!(t.pop_count[63], 1);
        assert_eq!(t.pop_count.iter().sum::<u32>(), t.samples);
        assert!(t.set_count.iter().all(|&c| c == 1));
    }

    #[test]
    fn test_pop_histogram_tracks_samples() {
        let mut t = BitTally::new();
        for v in [0u64, 1, 3, 7, 0xff, u64::MAX, 42, 11] {
            t.observe(v);
        }
        assert_eq!(t.samples, 8);
        assert_eq!(t.pop_count.iter().sum::<u32>(), 8);
        // no bit can be set more often than there are samples
        assert!(t.set_count.iter().all(|&c| c <= t.samples));
    }
}
