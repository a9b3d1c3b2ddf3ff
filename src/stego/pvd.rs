//! [MODULE F] PVD (Pixel Value Differencing) steganography with an
//! edge-aware hybrid: pixel pairs in smooth regions get extra PVD capacity,
//! pairs in textured regions fall back to plain LSB replacement on all
//! three channels (PVD's differencing trick gets visually noisier exactly
//! where edges already hide it least).

use crate::crypto::{IV_LEN, Password, SALT_LEN};
use crate::error::{Error, Result};
use crate::image::{Channels, Image};
use crate::stego::{self, Envelope};

/// Bytes consumed by the payload's own `size_u32_le || salt || iv` prefix,
/// before the ciphertext begins.
const PREFIX_LEN: usize = 4 + SALT_LEN + IV_LEN;

/// Sobel gradient-magnitude threshold above which a pixel counts as
/// "textured".
const EDGE_THRESHOLD: f32 = 100.0;

/// C.F bit-capacity table: `[0,16)->1, [16,32)->2, [32,64)->3, [64,128)->4,
/// [128,256)->5`.
fn bit_capacity(diff: u8) -> u32 {
    match diff {
        0..=15 => 1,
        16..=31 => 2,
        32..=63 => 3,
        64..=127 => 4,
        _ => 5,
    }
}

/// Lower bound of the range for a given bit capacity.
fn lo(bits: u32) -> i32 {
    match bits {
        1 => 0,
        2 => 16,
        3 => 32,
        4 => 64,
        _ => 128,
    }
}

fn luminance(image: &Image, x: u32, y: u32) -> f32 {
    0.299 * image.get(x, y, 0) as f32 + 0.587 * image.get(x, y, 1) as f32 + 0.114 * image.get(x, y, 2) as f32
}

/// Computes a `width x height` textured/not-textured map via a 3x3 Sobel
/// operator over approximate luminance. Border pixels (no full 3x3
/// neighborhood) are never textured.
fn sobel_edge_map(image: &Image) -> Vec<bool> {
    let (w, h) = (image.width(), image.height());
    let mut map = vec![false; w as usize * h as usize];
    if w < 3 || h < 3 {
        return map;
    }
    for y in 1..h - 1 {
        for x in 1..w - 1 {
            let mut gx = 0.0f32;
            let mut gy = 0.0f32;
            const KX: [[f32; 3]; 3] = [[-1.0, 0.0, 1.0], [-2.0, 0.0, 2.0], [-1.0, 0.0, 1.0]];
            const KY: [[f32; 3]; 3] = [[-1.0, -2.0, -1.0], [0.0, 0.0, 0.0], [1.0, 2.0, 1.0]];
            for (dy, row) in KX.iter().enumerate() {
                for (dx, &k) in row.iter().enumerate() {
                    let px = x + dx as u32 - 1;
                    let py = y + dy as u32 - 1;
                    let l = luminance(image, px, py);
                    gx += k * l;
                    gy += KY[dy][dx] * l;
                }
            }
            let magnitude = (gx * gx + gy * gy).sqrt();
            map[(y as usize * w as usize) + x as usize] = magnitude > EDGE_THRESHOLD;
        }
    }
    map
}

/// One embeddable unit produced by scanning the carrier: either a textured
/// pixel pair (3-bit LSB capacity) or a smooth pixel pair (PVD capacity per
/// [`bit_capacity`]).
struct Unit {
    x: u32,
    y: u32,
    textured: bool,
    bits: u32,
}

fn scan_units(image: &Image, edges: &[bool]) -> Vec<Unit> {
    let w = image.width();
    let mut units = Vec::new();
    for y in 0..image.height() {
        let mut x = 0;
        while x + 1 < w {
            let textured = edges[(y as usize * w as usize) + x as usize];
            let bits = if textured {
                3
            } else {
                let p1 = image.get(x, y, 0);
                let p2 = image.get(x + 1, y, 0);
                bit_capacity(p1.abs_diff(p2))
            };
            units.push(Unit { x, y, textured, bits });
            x += 2;
        }
    }
    units
}

/// Total embeddable payload bytes under the edge-aware hybrid scan.
pub fn capacity(image: &Image) -> usize {
    let edges = sobel_edge_map(image);
    let total_bits: u32 = scan_units(image, &edges).iter().map(|u| u.bits).sum();
    (total_bits / 8) as usize
}

/// Checks whether `payload` would fit once sealed, without writing
/// anything. Returns `(fits, required_bytes, capacity_bytes)`.
pub fn can_embed(image: &Image, payload: &[u8], password: &Password) -> Result<(bool, usize, usize)> {
    let envelope = stego::seal(payload, password)?;
    let required = PREFIX_LEN + envelope.ciphertext.len();
    let cap = capacity(image);
    Ok((required <= cap, required, cap))
}

fn bit_stream(size: u32, envelope: &Envelope) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(PREFIX_LEN + envelope.ciphertext.len());
    bytes.extend_from_slice(&size.to_le_bytes());
    bytes.extend_from_slice(&envelope.salt);
    bytes.extend_from_slice(&envelope.iv);
    bytes.extend_from_slice(&envelope.ciphertext);
    bytes
}

/// Hides `payload` inside `carrier` using the edge-aware PVD hybrid.
/// Requires a 3-channel carrier.
pub fn hide_data(carrier: &Image, payload: &[u8], password: &Password) -> Result<Image> {
    if carrier.channels() != 3 {
        return Err(Error::InputInvalid("PVD requires a 3-channel carrier".into()));
    }
    let envelope = stego::seal(payload, password)?;
    let size = envelope.ciphertext.len() as u32;
    let stream = bit_stream(size, &envelope);
    let total_bits_needed = stream.len() * 8;

    let edges = sobel_edge_map(carrier);
    let units = scan_units(carrier, &edges);
    let available_bits: usize = units.iter().map(|u| u.bits as usize).sum();
    if total_bits_needed > available_bits {
        return Err(Error::capacity((total_bits_needed + 7) / 8, available_bits / 8));
    }

    let mut out = carrier.clone();
    let mut bit_idx = 0usize;
    let next_bit = |idx: &mut usize| -> u8 {
        let bit = if *idx < total_bits_needed {
            (stream[*idx / 8] >> (*idx % 8)) & 1
        } else {
            0
        };
        *idx += 1;
        bit
    };

    for unit in &units {
        if bit_idx >= total_bits_needed {
            break;
        }
        if unit.textured {
            for c in 0..3 {
                let bit = next_bit(&mut bit_idx);
                let p = out.get(unit.x, unit.y, c);
                out.set(unit.x, unit.y, c, (p & 0xFE) | bit);
            }
        } else {
            let mut v: u32 = 0;
            for b in 0..unit.bits {
                v |= (next_bit(&mut bit_idx) as u32) << b;
            }
            let p1 = carrier.get(unit.x, unit.y, 0) as i32;
            let p2 = carrier.get(unit.x + 1, unit.y, 0) as i32;
            let new_diff = lo(unit.bits) + v as i32;
            if p1 > p2 {
                let clamped = (p2 + new_diff).clamp(0, 255);
                out.set(unit.x, unit.y, 0, clamped as u8);
            } else {
                let clamped = (p1 + new_diff).clamp(0, 255);
                out.set(unit.x + 1, unit.y, 0, clamped as u8);
            }
        }
    }
    Ok(out)
}

/// Inverse of [`hide_data`]. Any sub-failure collapses to
/// [`Error::ExtractionFailed`].
pub fn extract_data(stego_image: &Image, password: &Password) -> Result<Vec<u8>> {
    if stego_image.channels() != 3 {
        return Err(Error::ExtractionFailed);
    }
    let edges = sobel_edge_map(stego_image);
    let units = scan_units(stego_image, &edges);

    let mut bytes: Vec<u8> = Vec::new();
    let mut current: u8 = 0;
    let mut bit_pos = 0u32;
    let mut target_len: Option<usize> = None;

    let mut push_bit = |bit: u8, bytes: &mut Vec<u8>| {
        current |= bit << bit_pos;
        bit_pos += 1;
        if bit_pos == 8 {
            bytes.push(current);
            current = 0;
            bit_pos = 0;
        }
    };

    for unit in &units {
        if let Some(target) = target_len {
            if bytes.len() >= target {
                break;
            }
        }
        if unit.textured {
            for c in 0..3 {
                let bit = stego_image.get(unit.x, unit.y, c) & 1;
                push_bit(bit, &mut bytes);
            }
        } else {
            let p1 = stego_image.get(unit.x, unit.y, 0);
            let p2 = stego_image.get(unit.x + 1, unit.y, 0);
            let diff = p1.abs_diff(p2);
            let bits = bit_capacity(diff);
            let v = diff as u32 & ((1u32 << bits) - 1);
            for b in 0..bits {
                push_bit(((v >> b) & 1) as u8, &mut bytes);
            }
        }
        if target_len.is_none() && bytes.len() >= PREFIX_LEN {
            let size = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
            target_len = Some(PREFIX_LEN + size);
        }
    }

    let target = target_len.ok_or(Error::ExtractionFailed)?;
    if bytes.len() < target {
        return Err(Error::ExtractionFailed);
    }
    bytes.truncate(target);

    let size = u32::from_le_bytes(bytes[0..4].try_into().unwrap()) as usize;
    let salt = bytes[4..4 + SALT_LEN].to_vec();
    let iv = bytes[4 + SALT_LEN..4 + SALT_LEN + IV_LEN].to_vec();
    let ciphertext = bytes[4 + SALT_LEN + IV_LEN..].to_vec();
    if ciphertext.len() != size {
        return Err(Error::ExtractionFailed);
    }
    let envelope = Envelope { salt, iv, ciphertext };
    stego::unseal(&envelope, password)
}

/// Hides a whole image by serializing it to the `[w][h][c][pixels]` wire
/// form and running it through [`hide_data`].
pub fn hide_image(carrier: &Image, hidden: &Image, password: &Password) -> Result<Image> {
    hide_data(carrier, &hidden.serialize(), password)
}

/// Inverse of [`hide_image`].
pub fn extract_image(stego_image: &Image, password: &Password) -> Result<Image> {
    let bytes = extract_data(stego_image, password)?;
    Image::deserialize(&bytes).map_err(|_| Error::ExtractionFailed)
}
