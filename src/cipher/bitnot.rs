//! C.3 Bitwise NOT: a byte-wise complement. Self-inverse and ignores the key
//! entirely.

use super::Cipher;
use crate::error::Result;
use crate::image::{Channels, Image};

/// C.3 Bitwise NOT.
pub struct BitNot;

impl Cipher for BitNot {
    fn name(&self) -> &'static str {
        "bitnot"
    }

    fn encrypt(&self, image: &Image, _key: &str) -> Result<Image> {
        complement(image)
    }

    fn decrypt(&self, image: &Image, _key: &str) -> Result<Image> {
        complement(image)
    }
}

fn complement(image: &Image) -> Result<Image> {
    let pixels = image.pixels().iter().map(|b| !b).collect();
    Image::from_pixels(image.width(), image.height(), image.channels_enum(), pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encrypt_and_decrypt_are_the_same_operation() {
        let img = Image::from_pixels(1, 1, Channels::Rgb, vec![0, 128, 255]).unwrap();
        let enc = BitNot.encrypt(&img, "anything").unwrap();
        assert_eq!(enc.pixels(), &[255, 127, 0]);
        let dec = BitNot.decrypt(&enc, "anything").unwrap();
        assert_eq!(dec.pixels(), img.pixels());
    }

    #[test]
    fn ignores_the_key() {
        let img = Image::from_pixels(1, 1, Channels::Gray, vec![42]).unwrap();
        let a = BitNot.encrypt(&img, "key-a").unwrap();
        let b = BitNot.encrypt(&img, "key-b").unwrap();
        assert_eq!(a.pixels(), b.pixels());
    }

    #[test]
    fn preserves_dimensions() {
        let img = Image::new(3, 2, Channels::Gray);
        let enc = BitNot.encrypt(&img, "k").unwrap();
        assert_eq!(enc.shape(), img.shape());
    }
}
