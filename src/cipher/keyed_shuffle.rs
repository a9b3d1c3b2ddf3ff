//! The keyed Fisher-Yates shuffle shared by the `xor`, `channelswap`, and
//! `pixelperm` primitives.
//!
//! Every one of these primitives needs a deterministic permutation derived
//! from a key: the key is hashed with [`Crc64`](crate::checksum::Crc64) and
//! the resulting `u64` seeds [`rand::rngs::StdRng`], which then shuffles an
//! identity permutation via [`SliceRandom::shuffle`]. Same key, same build →
//! same permutation, every time.

use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::checksum::{Checksum, Crc64};

/// Hashes `key` with CRC-64-ECMA to produce the PRNG seed shared by every
/// keyed-permutation primitive.
pub fn seed_from_key(key: &str) -> u64 {
    Crc64::compute(key.as_bytes())
}

/// Builds a pseudorandom permutation of `0..len`, seeded from `key`.
///
/// `perm[i]` is the source index that should move into position `i`.
pub fn keyed_permutation(key: &str, len: usize) -> Vec<usize> {
    let mut perm: Vec<usize> = (0..len).collect();
    let mut rng = StdRng::seed_from_u64(seed_from_key(key));
    perm.shuffle(&mut rng);
    perm
}

/// Computes the inverse of a permutation produced by [`keyed_permutation`]:
/// `inverse[perm[i]] == i`.
pub fn invert_permutation(perm: &[usize]) -> Vec<usize> {
    let mut inverse = vec![0usize; perm.len()];
    for (i, &p) in perm.iter().enumerate() {
        inverse[p] = i;
    }
    inverse
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_key_same_permutation() {
        let a = keyed_permutation("secret", 100);
        let b = keyed_permutation("secret", 100);
        assert_eq!(a, b);
    }

    #[test]
    fn different_key_different_permutation() {
        let a = keyed_permutation("secret", 100);
        let b = keyed_permutation("different", 100);
        assert_ne!(a, b);
    }

    #[test]
    fn permutation_is_a_bijection() {
        let perm = keyed_permutation("k", 50);
        let mut sorted = perm.clone();
        sorted.sort_unstable();
        assert_eq!(sorted, (0..50).collect::<Vec<_>>());
    }

    #[test]
    fn invert_permutation_round_trips() {
        let perm = keyed_permutation("k", 30);
        let inverse = invert_permutation(&perm);
        for i in 0..30 {
            assert_eq!(inverse[perm[i]], i);
        }
    }
}
