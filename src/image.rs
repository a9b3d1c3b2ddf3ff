//! The flat raster image buffer shared by every cipher primitive and stego
//! engine.
//!
//! An [`Image`] is a row-major, channel-interleaved byte buffer plus an
//! ordered string metadata map. It carries no codec knowledge of its own —
//! decoding PNG/BMP/JPEG into this shape, and back out, is the job of
//! [`crate::codec`].

use crate::error::{Error, Result};

/// Number of channels an [`Image`] may carry.
///
/// Cipher and stego operations that touch color require [`Channels::Rgb`];
/// a few (bitwise NOT, LSB/PVD byte-level embedding) work over either.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channels {
    /// Single-channel grayscale.
    Gray = 1,
    /// Three interleaved channels (R, G, B).
    Rgb = 3,
}

impl Channels {
    /// The numeric channel count.
    pub fn count(self) -> u32 {
        self as u32
    }
}

impl TryFrom<u32> for Channels {
    type Error = Error;

    fn try_from(value: u32) -> Result<Self> {
        match value {
            1 => Ok(Channels::Gray),
            3 => Ok(Channels::Rgb),
            other => Err(Error::InputInvalid(format!(
                "unsupported channel count: {other} (only 1 or 3 are supported)"
            ))),
        }
    }
}

/// A flat, row-major, channel-interleaved raster image with string metadata.
///
/// `pixels[((y * width) + x) * channels + c]` addresses channel `c` of pixel
/// `(x, y)`. `|pixels| == width * height * channels` is an invariant every
/// transform in this crate must preserve; see [`Image::assert_same_shape`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    channels: u32,
    pixels: Vec<u8>,
    metadata: Vec<(String, String)>,
}

impl Image {
    /// Builds a zero-filled image of the given dimensions and channel count.
    pub fn new(width: u32, height: u32, channels: Channels) -> Self {
        let channels = channels.count();
        let len = width as usize * height as usize * channels as usize;
        Self {
            width,
            height,
            channels,
            pixels: vec![0u8; len],
            metadata: Vec::new(),
        }
    }

    /// Builds an image from an existing pixel buffer, checking the
    /// `width * height * channels == pixels.len()` invariant.
    pub fn from_pixels(width: u32, height: u32, channels: Channels, pixels: Vec<u8>) -> Result<Self> {
        let channels = channels.count();
        let expected = width as usize * height as usize * channels as usize;
        if pixels.len() != expected {
            return Err(Error::InputInvalid(format!(
                "pixel buffer length {} does not match {width}x{height}x{channels} = {expected}",
                pixels.len()
            )));
        }
        Ok(Self {
            width,
            height,
            channels,
            pixels,
            metadata: Vec::new(),
        })
    }

    /// Image width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Image height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Channels per pixel (1 or 3).
    pub fn channels(&self) -> u32 {
        self.channels
    }

    /// This image's channel count as a [`Channels`] value. Infallible: every
    /// `Image` is built through [`Image::new`]/[`Image::from_pixels`] (which
    /// take `Channels`) or [`Image::deserialize`] (which validates the wire
    /// count), so `self.channels` is always 1 or 3.
    pub fn channels_enum(&self) -> Channels {
        Channels::try_from(self.channels).expect("Image invariant: channels is always 1 or 3")
    }

    /// The `(width, height, channels)` triple, used for dimension-drift checks.
    pub fn shape(&self) -> (u32, u32, u32) {
        (self.width, self.height, self.channels)
    }

    /// Read-only view of the pixel buffer.
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Mutable view of the pixel buffer.
    pub fn pixels_mut(&mut self) -> &mut [u8] {
        &mut self.pixels
    }

    /// Consumes the image, returning the raw pixel buffer.
    pub fn into_pixels(self) -> Vec<u8> {
        self.pixels
    }

    fn index(&self, x: u32, y: u32, channel: u32) -> usize {
        ((y as usize * self.width as usize) + x as usize) * self.channels as usize
            + channel as usize
    }

    /// Reads one channel byte of pixel `(x, y)`.
    pub fn get(&self, x: u32, y: u32, channel: u32) -> u8 {
        self.pixels[self.index(x, y, channel)]
    }

    /// Writes one channel byte of pixel `(x, y)`.
    pub fn set(&mut self, x: u32, y: u32, channel: u32, value: u8) {
        let idx = self.index(x, y, channel);
        self.pixels[idx] = value;
    }

    /// Asserts `(w, h, channels)` matches `other`, the invariant every
    /// cipher primitive must preserve. Returns [`Error::DimensionDrift`]
    /// on mismatch.
    pub fn assert_same_shape(&self, other: &Image) -> Result<()> {
        if self.shape() != other.shape() {
            return Err(Error::DimensionDrift {
                expected: self.shape(),
                actual: other.shape(),
            });
        }
        Ok(())
    }

    /// Sets a metadata entry, replacing any existing value for `key` in
    /// place (preserving its original insertion position).
    pub fn set_metadata(&mut self, key: impl Into<String>, value: impl Into<String>) {
        let key = key.into();
        let value = value.into();
        if let Some(entry) = self.metadata.iter_mut().find(|(k, _)| *k == key) {
            entry.1 = value;
        } else {
            self.metadata.push((key, value));
        }
    }

    /// Looks up a metadata value by key.
    pub fn metadata(&self, key: &str) -> Option<&str> {
        self.metadata
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Removes a metadata entry, if present.
    pub fn remove_metadata(&mut self, key: &str) {
        self.metadata.retain(|(k, _)| k != key);
    }

    /// Clears all metadata.
    pub fn clear_metadata(&mut self) {
        self.metadata.clear();
    }

    /// Iterates metadata entries in insertion order.
    pub fn metadata_iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.metadata.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serializes to the wire form used by the stego `hide_image`/
    /// `extract_image` paths: `[w: u32 LE][h: u32 LE][c: u32 LE][pixels...]`.
    /// Metadata is not part of this form.
    pub fn serialize(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(12 + self.pixels.len());
        out.extend_from_slice(&self.width.to_le_bytes());
        out.extend_from_slice(&self.height.to_le_bytes());
        out.extend_from_slice(&self.channels.to_le_bytes());
        out.extend_from_slice(&self.pixels);
        out
    }

    /// Inverse of [`Image::serialize`]. Fails if the buffer is shorter than
    /// the 12-byte header, or if the declared `w*h*c` exceeds the remaining
    /// bytes.
    pub fn deserialize(data: &[u8]) -> Result<Self> {
        if data.len() < 12 {
            return Err(Error::InputInvalid(
                "serialized image buffer shorter than 12-byte header".into(),
            ));
        }
        let width = u32::from_le_bytes(data[0..4].try_into().unwrap());
        let height = u32::from_le_bytes(data[4..8].try_into().unwrap());
        let channels = Channels::try_from(u32::from_le_bytes(data[8..12].try_into().unwrap()))?;
        let needed = width as usize * height as usize * channels.count() as usize;
        let rest = &data[12..];
        if needed > rest.len() {
            return Err(Error::InputInvalid(format!(
                "serialized image declares {needed} pixel bytes but only {} remain",
                rest.len()
            )));
        }
        Image::from_pixels(width, height, channels, rest[..needed].to_vec())
    }
}
