//! The six image-to-image cipher primitives and the registry that dispatches
//! recipe steps to them by name.
//!
//! Every primitive implements [`Cipher`]: pure functions of `(image, key)`
//! that preserve `(width, height, channels)`. The registry is built once and
//! is read-only thereafter, mirroring the source's "polymorphic registry of
//! singletons" design — primitives carry no mutable state of their own.

pub mod addbit;
pub mod aes256;
pub mod bitnot;
pub mod channelswap;
pub mod keyed_shuffle;
pub mod pixelperm;
pub mod rotn;
pub mod xor;

use crate::error::{Error, Result};
use crate::image::Image;

/// An atomic image-to-image cipher primitive.
///
/// Implementations must satisfy `encrypt(img, key).pixels().len() ==
/// img.pixels().len()` and the corresponding dimension-preservation
/// invariant — any violation is a bug, not a user error, and callers detect
/// it via [`Image::assert_same_shape`].
pub trait Cipher {
    /// The canonical name used in recipe strings and the registry.
    fn name(&self) -> &'static str;

    /// Applies the primitive forward under `key`.
    fn encrypt(&self, image: &Image, key: &str) -> Result<Image>;

    /// Applies the primitive's inverse under `key`.
    fn decrypt(&self, image: &Image, key: &str) -> Result<Image>;
}

/// Canonicalizes a recipe/lookup name to its registered form, accepting the
/// historical aliases named in the external interface.
///
/// `bitnot`/`bitwise_not`, `channelswap`/`swap_channels`,
/// `pixelperm`/`pixel_permutation` all resolve to the first name in each
/// pair; every other name passes through unchanged.
pub fn canonicalize_name(name: &str) -> &str {
    match name {
        "bitwise_not" => "bitnot",
        "swap_channels" => "channelswap",
        "pixel_permutation" => "pixelperm",
        other => other,
    }
}

/// Looks up a primitive by name (accepting aliases) and returns a boxed
/// [`Cipher`]. Returns [`Error::RecipeInvalid`] for unknown names.
pub fn lookup(name: &str) -> Result<Box<dyn Cipher>> {
    match canonicalize_name(name) {
        "xor" => Ok(Box::new(xor::Xor)),
        "rotn" => Ok(Box::new(rotn::RotN)),
        "bitnot" => Ok(Box::new(bitnot::BitNot)),
        "channelswap" => Ok(Box::new(channelswap::ChannelSwap)),
        "pixelperm" => Ok(Box::new(pixelperm::PixelPerm)),
        "addbit" => Ok(Box::new(addbit::AddBit)),
        "aes256" => Ok(Box::new(aes256::Aes256Image)),
        other => Err(Error::RecipeInvalid(format!("unknown primitive: {other}"))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn canonicalize_resolves_every_documented_alias() {
        assert_eq!(canonicalize_name("bitwise_not"), "bitnot");
        assert_eq!(canonicalize_name("swap_channels"), "channelswap");
        assert_eq!(canonicalize_name("pixel_permutation"), "pixelperm");
        assert_eq!(canonicalize_name("xor"), "xor");
    }

    #[test]
    fn lookup_resolves_all_six_primitives_and_their_aliases() {
        for name in [
            "xor",
            "rotn",
            "bitnot",
            "bitwise_not",
            "channelswap",
            "swap_channels",
            "pixelperm",
            "pixel_permutation",
            "addbit",
            "aes256",
        ] {
            assert!(lookup(name).is_ok(), "expected {name} to resolve");
        }
    }

    #[test]
    fn lookup_rejects_unknown_primitive() {
        let err = lookup("not-a-real-primitive").unwrap_err();
        assert!(matches!(err, Error::RecipeInvalid(_)));
    }
}
