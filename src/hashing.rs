//! Bucket routing for the visual map, plus a cheap hasher for the integer keys
//! in the entry store. Keys are unique integers, so a full SipHash pass buys
//! nothing; one multiply spreads them across all 64 bits.

use std::{
    fmt,
    hash::{BuildHasher, Hasher},
};

use crate::Key;

/// The number of buckets in the backing array. Fixed; the digit-sum routing
/// below is defined against it.
pub const BUCKET_COUNT: usize = 10;

/// Sums the decimal digits of the key's absolute value.
pub fn digit_sum(key: Key) -> u32 {
    let mut n = key.unsigned_abs();
    let mut sum = 0;

    loop {
        sum += (n % 10) as u32;
        n /= 10;
        if n == 0 {
            break sum;
        }
    }
}

/// Routes a key to its bucket: digit sum modulo [`BUCKET_COUNT`].
pub fn bucket_index(key: Key) -> usize {
    digit_sum(key) as usize % BUCKET_COUNT
}

/// The worked arithmetic behind [`bucket_index`], shown to the user next to
/// the put form, e.g. `(1 + 9) % 10 = 0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashTrace {
    pub key: Key,
    pub digits: Vec<u32>,
    pub sum: u32,
    pub bucket: usize,
}

/// Builds the [`HashTrace`] for a key.
pub fn hash_trace(key: Key) -> HashTrace {
    let digits = key
        .unsigned_abs()
        .to_string()
        .chars()
        .filter_map(|c| c.to_digit(10))
        .collect::<Vec<_>>();
    let sum = digits.iter().sum();

    HashTrace {
        key,
        digits,
        sum,
        bucket: sum as usize % BUCKET_COUNT,
    }
}

impl fmt::Display for HashTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let terms = self
            .digits
            .iter()
            .map(|d| d.to_string())
            .collect::<Vec<_>>()
            .join(" + ");

        write!(f, "({}) % {} = {}", terms, BUCKET_COUNT, self.bucket)
    }
}

/// Fibonacci multiplier (2^64 / golden ratio). Odd, so the mix is a bijection.
const MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Hashes integer keys with a single multiply. `HashMap` picks its control
/// tag from the top bits, so those must vary even for small keys.
#[derive(Default)]
pub struct KeyHasher(u64);

impl Hasher for KeyHasher {
    fn write(&mut self, bytes: &[u8]) {
        // only reached for non-integer input; fold it in so we stay total
        for byte in bytes.iter().rev() {
            self.0 = (self.0 << 8) | *byte as u64;
        }
    }

    fn write_u64(&mut self, i: u64) {
        self.0 = i;
    }

    fn write_i64(&mut self, i: i64) {
        self.0 = i as u64;
    }

    fn finish(&self) -> u64 {
        self.0.wrapping_mul(MIX)
    }
}

/// Builds new KeyHashers on demand.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildKeyHasher;

impl BuildHasher for BuildKeyHasher {
    type Hasher = KeyHasher;

    fn build_hasher(&self) -> Self::Hasher {
        KeyHasher(0)
    }
}

#[cfg(test)]
mod tests {
    use std::hash::{BuildHasher, Hash, Hasher};

    use super::{bucket_index, digit_sum, hash_trace, BuildKeyHasher, KeyHasher, BUCKET_COUNT};

    #[test]
    fn test_hasher() {
        let mut h0 = KeyHasher(0);
        h0.write_i64(19);
        let mut h1 = BuildKeyHasher.build_hasher();
        19i64.hash(&mut h1);
        assert_eq!(h0.finish(), h1.finish());
        assert_eq!(19u64.wrapping_mul(super::MIX), h0.finish());

        let mut h2 = BuildKeyHasher.build_hasher();
        (-1i64).hash(&mut h2);
        assert_eq!(u64::MAX.wrapping_mul(super::MIX), h2.finish());
    }

    #[test]
    fn small_keys_fill_the_top_bits() {
        let hashes = (1..=64i64)
            .map(|key| {
                let mut h = BuildKeyHasher.build_hasher();
                key.hash(&mut h);
                h.finish()
            })
            .collect::<Vec<_>>();

        for (key, hash) in (1..=64).zip(&hashes) {
            assert_ne!(0, hash >> 57, "key {} has an empty top tag", key);
        }

        let mut tags = hashes.iter().map(|h| h >> 57).collect::<Vec<_>>();
        tags.sort_unstable();
        tags.dedup();
        assert_eq!(hashes.len(), tags.len());
    }

    #[test]
    fn routes_reference_keys() {
        assert_eq!(0, bucket_index(19));
        assert_eq!(5, bucket_index(14));
        assert_eq!(1, bucket_index(10));
        assert_eq!(3, bucket_index(12));
        assert_eq!(2, bucket_index(20));
    }

    #[test]
    fn negative_and_extreme_keys() {
        assert_eq!(digit_sum(123), digit_sum(-123));
        assert_eq!(0, digit_sum(0));
        assert_eq!(0, bucket_index(0));
        // 9223372036854775808 sums to 89
        assert_eq!(89, digit_sum(i64::MIN));
        assert!(bucket_index(i64::MAX) < BUCKET_COUNT);
    }

    #[test]
    fn trace_matches_routing() {
        let trace = hash_trace(19);
        assert_eq!(vec![1, 9], trace.digits);
        assert_eq!(10, trace.sum);
        assert_eq!(0, trace.bucket);
        assert_eq!("(1 + 9) % 10 = 0", trace.to_string());

        assert_eq!("(7) % 10 = 7", hash_trace(-7).to_string());
    }
}
