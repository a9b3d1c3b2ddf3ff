//! C.6 AES-256 in-image: the hardest primitive, and the only one that is
//! lossy. The salt and IV needed to decrypt are embedded into the LSBs of
//! the ciphertext's own first 256 pixel bytes, so those 256 low bits never
//! round-trip. This is intentional and documented, not a bug to be fixed —
//! the file format of previously produced images depends on it.

use super::Cipher;
use crate::crypto::{self, IV_LEN, SALT_LEN};
use crate::error::{Error, Result};
use crate::image::{Channels, Image};
use crate::crypto::Password;

/// Pixel bytes `[0, 256)` carry the salt (first 128) and IV (next 128) as
/// one bit per byte; the image must have at least this many pixel bytes.
const MIN_PIXEL_BYTES: usize = (SALT_LEN + IV_LEN) * 8;

/// C.6 AES-256 in-image.
pub struct Aes256Image;

impl Cipher for Aes256Image {
    fn name(&self) -> &'static str {
        "aes256"
    }

    fn encrypt(&self, image: &Image, key: &str) -> Result<Image> {
        if image.pixels().len() < MIN_PIXEL_BYTES {
            return Err(Error::capacity(MIN_PIXEL_BYTES, image.pixels().len()));
        }
        let salt = crypto::random_bytes(SALT_LEN);
        let iv = crypto::random_bytes(IV_LEN);
        let password = Password::new(key.to_string());
        let derived = crypto::derive_key(&password, &salt)?;
        let iv_arr: [u8; IV_LEN] = iv
            .as_slice()
            .try_into()
            .map_err(|_| Error::CryptoFailure("generated IV has the wrong length".into()))?;

        let mut pixels = crypto::aes256_ctr_encrypt(&derived, &iv_arr, image.pixels());
        crypto::embed_bits(&mut pixels, 0, &salt)?;
        crypto::embed_bits(&mut pixels, SALT_LEN * 8, &iv)?;

        Image::from_pixels(image.width(), image.height(), image.channels_enum(), pixels)
    }

    fn decrypt(&self, image: &Image, key: &str) -> Result<Image> {
        if image.pixels().len() < MIN_PIXEL_BYTES {
            return Err(Error::capacity(MIN_PIXEL_BYTES, image.pixels().len()));
        }
        let pixels_in = image.pixels();
        let salt = crypto::extract_bits(pixels_in, 0, SALT_LEN)?;
        let iv = crypto::extract_bits(pixels_in, SALT_LEN * 8, IV_LEN)?;
        let iv_arr: [u8; IV_LEN] = iv
            .try_into()
            .map_err(|_| Error::CryptoFailure("extracted IV has the wrong length".into()))?;

        let password = Password::new(key.to_string());
        let derived = crypto::derive_key(&password, &salt)?;
        let pixels = crypto::aes256_ctr_decrypt(&derived, &iv_arr, pixels_in);
        Image::from_pixels(image.width(), image.height(), image.channels_enum(), pixels)
    }
}
