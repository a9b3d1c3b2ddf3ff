//! Checksum computation utilities.
//!
//! This module provides the CRC-64-ECMA checksum used to seed the keyed
//! shuffle behind the `xor`, `channelswap`, and `pixelperm` cipher
//! primitives: the primitive's key is hashed with [`Crc64`] and the
//! resulting `u64` seeds a PRNG (see `cipher::keyed_shuffle`).
//!
//! # Example
//!
//! ```rust
//! use rasterlock::checksum::{Crc64, Checksum};
//!
//! let mut crc = Crc64::new();
//! crc.update(b"Hello, ");
//! crc.update(b"World!");
//! let value = crc.finalize();
//!
//! let one_shot = Crc64::compute(b"Hello, World!");
//! assert_eq!(value, one_shot);
//! ```

/// Common trait for checksum computation.
pub trait Checksum: Default + Clone {
    /// The output type of this checksum.
    type Output: Copy + Eq + std::fmt::Debug;

    /// Creates a new checksum calculator.
    fn new() -> Self;

    /// Updates the checksum with additional data.
    fn update(&mut self, data: &[u8]);

    /// Finishes the checksum computation and returns the value.
    fn finalize(&self) -> Self::Output;

    /// Resets the checksum to its initial state.
    fn reset(&mut self);

    /// Computes the checksum of a single buffer in one call.
    fn compute(data: &[u8]) -> Self::Output {
        let mut checksum = Self::new();
        checksum.update(data);
        checksum.finalize()
    }
}

/// CRC-64-ECMA, the keyed hash behind every cipher primitive that needs a
/// stable seed derived from its key. Not a cryptographic hash — it is not
/// used anywhere a preimage-resistance guarantee would matter.
#[derive(Clone)]
pub struct Crc64 {
    hasher: crc64fast::Digest,
}

impl Default for Crc64 {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Crc64 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Crc64")
            .field("current", &self.hasher.sum64())
            .finish()
    }
}

impl Checksum for Crc64 {
    type Output = u64;

    fn new() -> Self {
        Self {
            hasher: crc64fast::Digest::new(),
        }
    }

    fn update(&mut self, data: &[u8]) {
        self.hasher.write(data);
    }

    fn finalize(&self) -> u64 {
        self.hasher.sum64()
    }

    fn reset(&mut self) {
        self.hasher = crc64fast::Digest::new();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn compute_is_deterministic() {
        assert_eq!(Crc64::compute(b"hello"), Crc64::compute(b"hello"));
    }

    #[test]
    fn different_input_differs() {
        assert_ne!(Crc64::compute(b"hello"), Crc64::compute(b"world"));
    }

    #[test]
    fn incremental_matches_one_shot() {
        let mut crc = Crc64::new();
        crc.update(b"hel");
        crc.update(b"lo");
        assert_eq!(crc.finalize(), Crc64::compute(b"hello"));
    }

    #[test]
    fn reset_returns_to_initial_state() {
        let mut crc = Crc64::new();
        crc.update(b"hello");
        crc.reset();
        crc.update(b"world");
        assert_eq!(crc.finalize(), Crc64::compute(b"world"));
    }
}
