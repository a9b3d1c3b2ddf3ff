//! C.1 `xor`: despite the name, a key-seeded whole-pixel permutation, not a
//! bitwise XOR. The name is part of the external interface — recipe
//! strings and the recipe-recovery fallback both reference it literally —
//! and must not be changed even though it misdescribes the operation.

use super::Cipher;
use super::keyed_shuffle::{invert_permutation, keyed_permutation};
use crate::error::{Error, Result};
use crate::image::{Channels, Image};

/// C.1 XOR stream (keyed pixel permutation). Requires 3-channel input.
pub struct Xor;

impl Cipher for Xor {
    fn name(&self) -> &'static str {
        "xor"
    }

    fn encrypt(&self, image: &Image, key: &str) -> Result<Image> {
        permute(image, key, Direction::Forward)
    }

    fn decrypt(&self, image: &Image, key: &str) -> Result<Image> {
        permute(image, key, Direction::Inverse)
    }
}

enum Direction {
    Forward,
    Inverse,
}

fn permute(image: &Image, key: &str, direction: Direction) -> Result<Image> {
    if image.channels() != 3 {
        return Err(Error::InputInvalid(format!(
            "xor requires 3-channel input, got {}",
            image.channels()
        )));
    }
    let pixel_count = image.width() as usize * image.height() as usize;
    let perm = keyed_permutation(key, pixel_count);
    let perm = match direction {
        Direction::Forward => perm,
        Direction::Inverse => invert_permutation(&perm),
    };

    let src = image.pixels();
    let mut out = vec![0u8; src.len()];
    // out pixel i <- src pixel perm[i]
    for (i, &source_pixel) in perm.iter().enumerate() {
        out[i * 3..i * 3 + 3].copy_from_slice(&src[source_pixel * 3..source_pixel * 3 + 3]);
    }
    Image::from_pixels(image.width(), image.height(), image.channels_enum(), out)
}
