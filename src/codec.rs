//! The raster codec: the external collaborator that decodes/encodes
//! PNG/BMP/JPEG files to and from [`Image`], using the `image` crate. Every
//! cipher and stego operation works on [`Image`]; this module is the only
//! place file formats are touched.

use std::path::Path;

use image::{DynamicImage, GenericImageView};

use crate::error::{Error, Result};
use crate::image::{Channels, Image};

/// Decodes `path` into an [`Image`], normalizing to 3 channels (RGB) unless
/// `single_channel` is set, in which case the source is converted to
/// grayscale. Dispatch is by the `image` crate's own format sniffing, not
/// file extension, so a misnamed file still decodes.
pub fn load_image(path: impl AsRef<Path>, single_channel: bool) -> Result<Image> {
    let dynamic = image::open(path)?;
    from_dynamic(&dynamic, single_channel)
}

/// Converts an already-decoded [`DynamicImage`] (e.g. from an in-memory
/// buffer) into an [`Image`].
pub fn from_dynamic(dynamic: &DynamicImage, single_channel: bool) -> Result<Image> {
    let (width, height) = dynamic.dimensions();
    if single_channel {
        let gray = dynamic.to_luma8();
        Image::from_pixels(width, height, Channels::Gray, gray.into_raw())
    } else {
        let rgb = dynamic.to_rgb8();
        Image::from_pixels(width, height, Channels::Rgb, rgb.into_raw())
    }
}

/// Encodes `image` to `path`, dispatching the output format by the path's
/// extension (`png`, `bmp`, `jpg`/`jpeg`); anything else is rejected rather
/// than silently guessed.
pub fn save_image(path: impl AsRef<Path>, img: &Image) -> Result<()> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .ok_or_else(|| Error::InputInvalid(format!("no file extension on output path {path:?}")))?;
    if !matches!(ext.as_str(), "png" | "bmp" | "jpg" | "jpeg") {
        return Err(Error::InputInvalid(format!(
            "unsupported output extension: .{ext} (expected png, bmp, jpg, or jpeg)"
        )));
    }

    let dynamic = to_dynamic(img)?;
    dynamic.save(path)?;
    Ok(())
}

fn to_dynamic(img: &Image) -> Result<DynamicImage> {
    match img.channels_enum() {
        Channels::Gray => {
            let buf = image::GrayImage::from_raw(img.width(), img.height(), img.pixels().to_vec())
                .ok_or_else(|| Error::InputInvalid("pixel buffer does not match declared dimensions".into()))?;
            Ok(DynamicImage::ImageLuma8(buf))
        }
        Channels::Rgb => {
            let buf = image::RgbImage::from_raw(img.width(), img.height(), img.pixels().to_vec())
                .ok_or_else(|| Error::InputInvalid("pixel buffer does not match declared dimensions".into()))?;
            Ok(DynamicImage::ImageRgb8(buf))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_through_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("roundtrip.png");

        let mut img = Image::new(8, 8, Channels::Rgb);
        for (i, b) in img.pixels_mut().iter_mut().enumerate() {
            *b = (i % 256) as u8;
        }
        save_image(&path, &img).unwrap();
        let loaded = load_image(&path, false).unwrap();
        assert_eq!(loaded.shape(), img.shape());
        assert_eq!(loaded.pixels(), img.pixels());
    }

    #[test]
    fn rejects_unsupported_output_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.tiff");
        let img = Image::new(2, 2, Channels::Rgb);
        let err = save_image(&path, &img).unwrap_err();
        assert!(matches!(err, Error::InputInvalid(_)));
    }

    #[test]
    fn single_channel_load_converts_to_grayscale() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("gray.png");
        let img = Image::new(4, 4, Channels::Rgb);
        save_image(&path, &img).unwrap();

        let loaded = load_image(&path, true).unwrap();
        assert_eq!(loaded.channels(), 1);
        assert_eq!(loaded.pixels().len(), 16);
    }
}
