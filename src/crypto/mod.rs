//! The shared cryptographic envelope: password-derived keys, the AES-256-CTR
//! stream cipher, and the bit-packing primitives the `aes256` image
//! primitive and both stego engines build on.
//!
//! # Key derivation
//!
//! [`derive_key`] turns `(password, salt)` into a 32-byte AES-256 key via
//! PBKDF2-HMAC-SHA256 with [`PBKDF2_ITERATIONS`] iterations.
//!
//! # Stream cipher
//!
//! [`aes256_ctr_encrypt`]/[`aes256_ctr_decrypt`] run AES-256 in CTR mode, so
//! encryption and decryption are the same keystream operation and
//! `|output| == |input|` always holds — no padding, no authentication tag.

mod password;

use aes::Aes256;
use aes::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use hmac::Hmac;
use pbkdf2::pbkdf2;
use rand::RngCore;
use sha2::Sha256;

pub use password::Password;

use crate::error::{Error, Result};

/// PBKDF2-HMAC-SHA256 iteration count used by every key derivation in this
/// crate. Fixed: changing it would silently break decryption of images
/// produced by an earlier version.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// Byte length of the derived AES-256 key.
pub const KEY_LEN: usize = 32;

/// Byte length of a PBKDF2 salt.
pub const SALT_LEN: usize = 16;

/// Byte length of an AES-CTR IV (the cipher's full 128-bit block counter).
pub const IV_LEN: usize = 16;

type Aes256Ctr = Ctr128BE<Aes256>;

/// Derives a 32-byte AES-256 key from `(password, salt)` using
/// PBKDF2-HMAC-SHA256 at [`PBKDF2_ITERATIONS`] iterations. Deterministic:
/// the same inputs always yield the same key.
pub fn derive_key(password: &Password, salt: &[u8]) -> Result<[u8; KEY_LEN]> {
    let mut key = [0u8; KEY_LEN];
    pbkdf2::<Hmac<Sha256>>(password.as_bytes(), salt, PBKDF2_ITERATIONS, &mut key)
        .map_err(|e| Error::CryptoFailure(format!("PBKDF2 key derivation failed: {e}")))?;
    Ok(key)
}

/// Fills a buffer of `n` bytes from a cryptographic RNG.
///
/// Used wherever the design calls for "a cryptographic RNG": salt/IV
/// generation for the `aes256` image primitive and both stego payload
/// pipelines.
pub fn random_bytes(n: usize) -> Vec<u8> {
    let mut buf = vec![0u8; n];
    rand::rngs::OsRng.fill_bytes(&mut buf);
    buf
}

/// Encrypts `plaintext` with AES-256-CTR under `key` and `iv`.
pub fn aes256_ctr_encrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    let mut buf = plaintext.to_vec();
    let mut cipher = Aes256Ctr::new(key.into(), iv.into());
    cipher.apply_keystream(&mut buf);
    buf
}

/// Decrypts `ciphertext` produced by [`aes256_ctr_encrypt`] under the same
/// `key` and `iv`. CTR mode makes this the identical operation; kept as a
/// distinct name for readability at call sites.
pub fn aes256_ctr_decrypt(key: &[u8; KEY_LEN], iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Vec<u8> {
    aes256_ctr_encrypt(key, iv, ciphertext)
}

/// Writes `8 * data.len()` bits into `pixels`, one bit per pixel byte,
/// MSB-first within each source byte, starting at `start_pixel`. Pixel byte
/// `p` becomes `(p & 0xFE) | bit`.
///
/// Shared by the `aes256` image primitive (salt/IV embedding) and the LSB
/// stego engine's header.
pub fn embed_bits(pixels: &mut [u8], start_pixel: usize, data: &[u8]) -> Result<()> {
    let bits = data.len() * 8;
    if start_pixel + bits > pixels.len() {
        return Err(Error::capacity(start_pixel + bits, pixels.len()));
    }
    for bit_idx in 0..bits {
        let byte_idx = bit_idx / 8;
        let bit_pos = 7 - (bit_idx % 8);
        let bit = (data[byte_idx] >> bit_pos) & 1;
        let p = &mut pixels[start_pixel + bit_idx];
        *p = (*p & 0xFE) | bit;
    }
    Ok(())
}

/// Reads `byte_count` bytes back out of `pixels` starting at `start_pixel`,
/// the inverse of [`embed_bits`].
pub fn extract_bits(pixels: &[u8], start_pixel: usize, byte_count: usize) -> Result<Vec<u8>> {
    let bits = byte_count * 8;
    if start_pixel + bits > pixels.len() {
        return Err(Error::capacity(start_pixel + bits, pixels.len()));
    }
    let mut out = vec![0u8; byte_count];
    for bit_idx in 0..bits {
        let byte_idx = bit_idx / 8;
        let bit_pos = 7 - (bit_idx % 8);
        if pixels[start_pixel + bit_idx] & 1 != 0 {
            out[byte_idx] |= 1 << bit_pos;
        }
    }
    Ok(out)
}
