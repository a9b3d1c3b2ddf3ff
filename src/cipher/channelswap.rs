//! C.4 Channel swap: a key-seeded permutation of the channel indices
//! `[0..channels)`, applied identically to every pixel.

use super::Cipher;
use super::keyed_shuffle::{invert_permutation, keyed_permutation};
use crate::error::Result;
use crate::image::{Channels, Image};

/// C.4 Channel swap.
pub struct ChannelSwap;

impl Cipher for ChannelSwap {
    fn name(&self) -> &'static str {
        "channelswap"
    }

    fn encrypt(&self, image: &Image, key: &str) -> Result<Image> {
        let sigma = keyed_permutation(key, image.channels() as usize);
        Ok(apply(image, &sigma))
    }

    fn decrypt(&self, image: &Image, key: &str) -> Result<Image> {
        let sigma = keyed_permutation(key, image.channels() as usize);
        let inverse = invert_permutation(&sigma);
        Ok(apply(image, &inverse))
    }
}

/// `out(x, y, c) = in(x, y, sigma(c))`.
fn apply(image: &Image, sigma: &[usize]) -> Image {
    let channels = image.channels() as usize;
    let src = image.pixels();
    let mut out = vec![0u8; src.len()];
    for (pixel_start, chunk) in src.chunks_exact(channels).enumerate() {
        let out_start = pixel_start * channels;
        for c in 0..channels {
            out[out_start + c] = chunk[sigma[c]];
        }
    }
    Image::from_pixels(image.width(), image.height(), image.channels_enum(), out)
        .expect("channel-swap output preserves the input's pixel-buffer length")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips() {
        let img = Image::from_pixels(2, 1, Channels::Rgb, vec![10, 20, 30, 40, 50, 60]).unwrap();
        let enc = ChannelSwap.encrypt(&img, "pw").unwrap();
        let dec = ChannelSwap.decrypt(&enc, "pw").unwrap();
        assert_eq!(dec.pixels(), img.pixels());
    }

    #[test]
    fn permutes_channels_within_each_pixel() {
        let img = Image::from_pixels(1, 1, Channels::Rgb, vec![10, 20, 30]).unwrap();
        let enc = ChannelSwap.encrypt(&img, "pw").unwrap();
        let mut sorted = enc.pixels().to_vec();
        sorted.sort_unstable();
        assert_eq!(sorted, vec![10, 20, 30]);
    }

    #[test]
    fn preserves_dimensions() {
        let img = Image::new(3, 3, Channels::Rgb);
        let enc = ChannelSwap.encrypt(&img, "pw").unwrap();
        assert_eq!(enc.shape(), img.shape());
    }
}
