//! Key encoding and the multiply-by-prime hash.
//!
//! Both functions are pure and total: encoding packs up to 8 key bytes
//! little-endian into a `u64`, and the hash is a single wrapping multiply.
//! Overflow is not an error — the wraparound *is* the hash.

/// Pack a 1–8 byte key into a `u64`, little-endian: byte 0 occupies the
/// low 8 bits. Bytes beyond the eighth are ignored by the caller's contract
/// (see [`crate::record::PrimeRecord::ingest`], which rejects such keys).
#[inline]
pub fn encode_key(key: &[u8]) -> u64 {
    let mut k: u64 = 0;
    for &b in key.iter().rev() {
        k <<= 8;
        k |= u64::from(b);
    }
    k
}

/// The hash under test: `key * prime` with 64-bit wraparound.
#[inline]
pub fn prime_hash(prime: u64, key: u64) -> u64 {
    key.wrapping_mul(prime)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    // -----------------------------------------------------------------------
    // Encoding tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_encode_single_byte() {
        assert_eq!(encode_key(&[0x00]), 0);
        assert_eq!(encode_key(&[0x01]), 1);
        assert_eq!(encode_key(&[0xff]), 0xff);
    }

    #[test]
    fn test_encode_is_little_endian() {
        // byte 0 is the low byte
        assert_eq!(encode_key(&[0x01, 0x02]), 0x0201);
        assert_eq!(
            encode_key(&[0x11, 0x22, 0x33, 0x44, 0x55, 0x66, 0x77, 0x88]),
            0x8877665544332211
        );
    }

    #[test]
    fn test_encode_matches_le_bytes() {
        let v: u64 = 0xdeadbeefcafe0123;
        assert_eq!(encode_key(&v.to_le_bytes()), v);
    }

    // -----------------------------------------------------------------------
    // Hash tests
    // -----------------------------------------------------------------------

    #[test]
    fn test_hash_small_values() {
        assert_eq!(prime_hash(11, 0), 0);
        assert_eq!(prime_hash(11, 1), 11);
        assert_eq!(prime_hash(3, 1 << 7), 3 * 128);
    }

    #[test]
    fn test_hash_wraps_on_overflow() {
        let prime = 0xff51afd7ed558ccd;
        let key = u64::MAX;
        assert_eq!(prime_hash(prime, key), key.wrapping_mul(prime));
    }

    #[test]
    fn test_hash_is_deterministic() {
        let prime = 0x9e3779b97f4a7c15;
        for key in [0u64, 1, 42, u64::MAX / 2, u64::MAX] {
            assert_eq!(prime_hash(prime, key), prime_hash(prime, key));
        }
    }
}
