//! C.2 Rot-N: a byte-wise bit rotation keyed by the first digit `1..=7`
//! found in the decimal rendering of the key's hash.

use super::Cipher;
use crate::checksum::{Checksum, Crc64};
use crate::error::{Error, Result};
use crate::image::{Channels, Image};

/// Derives the rotation amount from `key`: hash it, format the hash as a
/// decimal string, and take the first character in `'1'..='7'`.
fn rotation_amount(key: &str) -> Result<u32> {
    let hash = Crc64::compute(key.as_bytes());
    let hash_str = hash.to_string();
    hash_str
        .chars()
        .find(|c| ('1'..='7').contains(c))
        .map(|c| c.to_digit(10).unwrap())
        .ok_or_else(|| {
            Error::InvalidKey(format!(
                "rotn key '{key}' hashes to a string with no digit 1-7"
            ))
        })
}

/// C.2 Rot-N. Encrypt rotates each byte left by `n`; decrypt rotates right.
pub struct RotN;

impl Cipher for RotN {
    fn name(&self) -> &'static str {
        "rotn"
    }

    fn encrypt(&self, image: &Image, key: &str) -> Result<Image> {
        let n = rotation_amount(key)?;
        let pixels = image.pixels().iter().map(|b| b.rotate_left(n)).collect();
        Image::from_pixels(image.width(), image.height(), image.channels_enum(), pixels)
    }

    fn decrypt(&self, image: &Image, key: &str) -> Result<Image> {
        let n = rotation_amount(key)?;
        let pixels = image.pixels().iter().map(|b| b.rotate_right(n)).collect();
        Image::from_pixels(image.width(), image.height(), image.channels_enum(), pixels)
    }
}
