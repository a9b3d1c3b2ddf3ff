//! [MODULE E] LSB steganography: fixed-depth least-significant-bit
//! replacement with a configurable bits-per-channel depth.

use crate::crypto::Password;
use crate::error::{Error, Result};
use crate::image::{Channels, Image};
use crate::stego::{self, Envelope};

/// 20-byte reserve the capacity formula subtracts for header and alignment
/// slack.
const CAPACITY_RESERVE: usize = 20;

/// 4-byte little-endian envelope-length header embedded before the payload.
const HEADER_LEN: usize = 4;

/// Bits-per-pixel-byte depth, `1..=4`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitsPerChannel(u8);

impl BitsPerChannel {
    pub fn new(bits: u8) -> Result<Self> {
        if (1..=4).contains(&bits) {
            Ok(Self(bits))
        } else {
            Err(Error::InputInvalid(format!(
                "LSB bits_per_channel must be 1-4, got {bits}"
            )))
        }
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

/// `cap = (w*h*channels*b) / 8 - 20` bytes.
pub fn capacity(image: &Image, bits: BitsPerChannel) -> usize {
    let total_bits = image.pixels().len() * bits.get() as usize;
    (total_bits / 8).saturating_sub(CAPACITY_RESERVE)
}

/// Checks whether `payload_len` raw bytes would fit once sealed
/// (compressed, encrypted, enveloped, length-prefixed) without writing
/// anything. Returns `(fits, required_bytes, capacity_bytes)`.
pub fn can_embed(image: &Image, bits: BitsPerChannel, payload: &[u8], password: &Password) -> Result<(bool, usize, usize)> {
    let envelope = stego::seal(payload, password)?;
    let required = HEADER_LEN + envelope.to_bytes().len();
    let cap = capacity(image, bits);
    Ok((required <= cap, required, cap))
}

/// Splits `byte` into `ceil(8/bits)` chunks of `bits` bits each, low-chunk
/// first.
fn chunks_of(byte: u8, bits: u8) -> Vec<u8> {
    let mask = (1u16 << bits) - 1;
    let chunk_count = (8 + bits - 1) / bits;
    let mut out = Vec::with_capacity(chunk_count as usize);
    let mut value = byte as u16;
    for _ in 0..chunk_count {
        out.push((value & mask) as u8);
        value >>= bits;
    }
    out
}

/// Writes `data` into `pixels` starting at pixel-byte index `start`, each
/// chunk overwriting the low `bits` bits of one pixel byte. Returns the
/// number of pixel bytes consumed.
fn write_bytes(pixels: &mut [u8], start: usize, data: &[u8], bits: u8) -> Result<usize> {
    let mask = (1u8 << bits) - 1;
    let mut cursor = start;
    for &byte in data {
        for chunk in chunks_of(byte, bits) {
            if cursor >= pixels.len() {
                return Err(Error::capacity(cursor + 1, pixels.len()));
            }
            pixels[cursor] = (pixels[cursor] & !mask) | chunk;
            cursor += 1;
        }
    }
    Ok(cursor - start)
}

/// Reads `byte_count` bytes back out of `pixels` starting at `start`, the
/// inverse of [`write_bytes`].
fn read_bytes(pixels: &[u8], start: usize, byte_count: usize, bits: u8) -> Result<Vec<u8>> {
    let mask = (1u8 << bits) - 1;
    let chunk_count = (8 + bits - 1) / bits;
    let mut out = Vec::with_capacity(byte_count);
    let mut cursor = start;
    for _ in 0..byte_count {
        let mut value: u16 = 0;
        for chunk_idx in 0..chunk_count {
            if cursor >= pixels.len() {
                return Err(Error::ExtractionFailed);
            }
            let chunk = (pixels[cursor] & mask) as u16;
            value |= chunk << (chunk_idx * bits);
            cursor += 1;
        }
        out.push(value as u8);
    }
    Ok(out)
}

/// Hides `payload` inside `carrier` at the given depth. Produces an image
/// with the same dimensions as the carrier.
pub fn hide_data(carrier: &Image, payload: &[u8], bits: BitsPerChannel, password: &Password) -> Result<Image> {
    let envelope = stego::seal(payload, password)?;
    let envelope_bytes = envelope.to_bytes();
    let size = envelope_bytes.len() as u32;

    let cap = capacity(carrier, bits);
    let required = HEADER_LEN + envelope_bytes.len();
    if required > cap {
        return Err(Error::capacity(required, cap));
    }

    let mut pixels = carrier.pixels().to_vec();
    let consumed = write_bytes(&mut pixels, 0, &size.to_le_bytes(), bits.get())?;
    write_bytes(&mut pixels, consumed, &envelope_bytes, bits.get())?;

    Image::from_pixels(carrier.width(), carrier.height(), carrier.channels_enum(), pixels)
}

/// Extracts a payload hidden by [`hide_data`]. Any sub-failure collapses to
/// [`Error::ExtractionFailed`].
pub fn extract_data(stego_image: &Image, bits: BitsPerChannel, password: &Password) -> Result<Vec<u8>> {
    let pixels = stego_image.pixels();
    let header = read_bytes(pixels, 0, HEADER_LEN, bits.get()).map_err(|_| Error::ExtractionFailed)?;
    let size = u32::from_le_bytes(header.try_into().unwrap()) as usize;
    if size == 0 || size > pixels.len() {
        return Err(Error::ExtractionFailed);
    }

    let header_pixel_bytes = HEADER_LEN * ((8 + bits.get() - 1) / bits.get()) as usize;
    let envelope_bytes =
        read_bytes(pixels, header_pixel_bytes, size, bits.get()).map_err(|_| Error::ExtractionFailed)?;
    let envelope = Envelope::from_bytes(&envelope_bytes)?;
    stego::unseal(&envelope, password)
}

/// Hides a whole image `hidden` inside `carrier` by serializing `hidden` to
/// its `[w][h][c][pixels]` wire form and running it through [`hide_data`].
pub fn hide_image(carrier: &Image, hidden: &Image, bits: BitsPerChannel, password: &Password) -> Result<Image> {
    hide_data(carrier, &hidden.serialize(), bits, password)
}

/// Inverse of [`hide_image`].
pub fn extract_image(stego_image: &Image, bits: BitsPerChannel, password: &Password) -> Result<Image> {
    let bytes = extract_data(stego_image, bits, password)?;
    Image::deserialize(&bytes).map_err(|_| Error::ExtractionFailed)
}
