//! C.5 Pixel permutation: the same key-seeded permutation scheme as `xor`,
//! but the move direction is reversed — `out[perm[i]] <- in[i]` rather than
//! `out[i] <- in[perm[i]]`.

use super::Cipher;
use super::keyed_shuffle::{invert_permutation, keyed_permutation};
use crate::error::Result;
use crate::image::{Channels, Image};

/// C.5 Pixel permutation.
pub struct PixelPerm;

impl Cipher for PixelPerm {
    fn name(&self) -> &'static str {
        "pixelperm"
    }

    fn encrypt(&self, image: &Image, key: &str) -> Result<Image> {
        let pixel_count = image.width() as usize * image.height() as usize;
        let channels = image.channels() as usize;
        let perm = keyed_permutation(key, pixel_count);
        Ok(scatter(image, &perm, channels))
    }

    fn decrypt(&self, image: &Image, key: &str) -> Result<Image> {
        let pixel_count = image.width() as usize * image.height() as usize;
        let channels = image.channels() as usize;
        let perm = keyed_permutation(key, pixel_count);
        let inverse = invert_permutation(&perm);
        Ok(scatter(image, &inverse, channels))
    }
}

/// `out[perm[i]] <- in[i]` for every pixel `i`.
fn scatter(image: &Image, perm: &[usize], channels: usize) -> Image {
    let src = image.pixels();
    let mut out = vec![0u8; src.len()];
    for (i, &dest) in perm.iter().enumerate() {
        out[dest * channels..(dest + 1) * channels]
            .copy_from_slice(&src[i * channels..(i + 1) * channels]);
    }
    Image::from_pixels(image.width(), image.height(), image.channels_enum(), out)
        .expect("pixel-permutation output preserves the input's pixel-buffer length")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Image {
        let mut pixels = Vec::new();
        for i in 0..16u8 {
            pixels.extend_from_slice(&[i, i, i]);
        }
        Image::from_pixels(4, 4, Channels::Rgb, pixels).unwrap()
    }

    #[test]
    fn round_trips() {
        let img = sample();
        let enc = PixelPerm.encrypt(&img, "pw").unwrap();
        assert_ne!(enc.pixels(), img.pixels());
        let dec = PixelPerm.decrypt(&enc, "pw").unwrap();
        assert_eq!(dec.pixels(), img.pixels());
    }

    #[test]
    fn preserves_dimensions() {
        let img = sample();
        let enc = PixelPerm.encrypt(&img, "pw").unwrap();
        assert_eq!(enc.shape(), img.shape());
    }

    #[test]
    fn is_a_permutation_of_pixels() {
        let img = sample();
        let enc = PixelPerm.encrypt(&img, "pw").unwrap();
        let mut sorted_src = img.pixels().to_vec();
        let mut sorted_out = enc.pixels().to_vec();
        sorted_src.sort_unstable();
        sorted_out.sort_unstable();
        assert_eq!(sorted_src, sorted_out);
    }
}
