//! Single-bit avalanche testing.
//!
//! For a fixed key, flip each input bit in turn and tally how the hash
//! output changes. A good multiplier flips about half the output bits per
//! input-bit flip (popcount of the difference near 32 of 64); differences
//! clustered near zero indicate poor diffusion.

use crate::hasher::prime_hash;
use crate::tally::BitTally;

/// Run the avalanche loop for one key: for each of the `8 * key_len` input
/// bit positions, flip that bit in `base_key`, hash the perturbed key with
/// the same prime, and observe the XOR difference against `base_hash`.
///
/// A perturbed key that collides with the original is hashed and observed
/// like any other; the resulting zero difference is part of the measurement,
/// not noise to filter out.
pub fn avalanche_into(
    tally: &mut BitTally,
    prime: u64,
    base_key: u64,
    key_len: usize,
    base_hash: u64,
) {
    let key_bits = key_len * 8;
    let mut mask: u64 = 1;
    for _ in 0..key_bits {
        let perturbed = base_key ^ mask;
        let diff = prime_hash(prime, perturbed) ^ base_hash;
        tally.observe(diff);
        mask <<= 1;
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_observation_count_matches_key_bits() {
        for len in 1..=8usize {
            let mut t = BitTally::new();
            avalanche_into(&mut t, 0x9e3779b97f4a7c15, 0xabcd, len, 0);
            assert_eq!(t.samples, (len * 8) as u32);
        }
    }

    #[test]
    fn test_zero_key_prime_3() {
        // base key 0x00, length 1, prime 3: base hash 0. Flipping bit k
        // yields key 2^k, hash 3 * 2^k, difference 3 << k.
        let mut t = BitTally::new();
        avalanche_into(&mut t, 3, 0, 1, prime_hash(3, 0));

        assert_eq!(t.samples, 8);
        // every difference 3 << k has popcount 2
        assert_eq!(t.pop_count[2], 8);
        // 3 << k sets bits k and k+1 for k in 0..8
        assert_eq!(t.set_count[0], 1);
        for i in 1..=7 {
            assert_eq!(t.set_count[i], 2);
        }
        assert_eq!(t.set_count[8], 1);
        assert!(t.set_count[9..].iter().all(|&c| c == 0));
    }

    #[test]
    fn test_colliding_perturbation_contributes_zero_diff() {
        // prime 0: every hash is 0, so every difference is 0. Collisions
        // are observed, never skipped.
        let mut t = BitTally::new();
        avalanche_into(&mut t, 0, 0x55, 1, prime_hash(0, 0x55));
        assert_eq!(t.samples, 8);
        assert_eq!(t.pop_count[0], 8);
    }

    #[test]
    fn test_diff_keeps_full_64_bit_width() {
        // pick a prime/key where the difference has bits above 31 set
        let prime = 0xff51afd7ed558ccd_u64;
        let base_key = 0;
        let base_hash = prime_hash(prime, base_key);
        let mut t = BitTally::new();
        avalanche_into(&mut t, prime, base_key, 8, base_hash);

        // flipping bit 63 gives diff = prime << 63 ^ 0 ... at minimum the
        // high set_count positions must have registered something
        assert!(t.set_count[32..].iter().any(|&c| c > 0));
    }
}
