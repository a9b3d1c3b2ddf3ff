//! [MODULE E]/[MODULE F] Steganography: hide and extract arbitrary payloads
//! in a carrier image. Both engines share the same
//! compress→encrypt→envelope pipeline; they differ only in how the
//! resulting bytes are packed into the carrier's pixels.

pub mod lsb;
pub mod pvd;

use std::io::{Read, Write};

use flate2::Compression;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;

use crate::crypto::{self, IV_LEN, Password, SALT_LEN};
use crate::error::{Error, Result};

/// `salt || iv || ciphertext`, the serialized form of an encrypted payload.
pub struct Envelope {
    pub salt: Vec<u8>,
    pub iv: Vec<u8>,
    pub ciphertext: Vec<u8>,
}

impl Envelope {
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.salt.len() + self.iv.len() + self.ciphertext.len());
        out.extend_from_slice(&self.salt);
        out.extend_from_slice(&self.iv);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if bytes.len() < SALT_LEN + IV_LEN {
            return Err(Error::ExtractionFailed);
        }
        Ok(Self {
            salt: bytes[..SALT_LEN].to_vec(),
            iv: bytes[SALT_LEN..SALT_LEN + IV_LEN].to_vec(),
            ciphertext: bytes[SALT_LEN + IV_LEN..].to_vec(),
        })
    }
}

/// `plaintext -> zlib compress -> AES-256-CTR encrypt with a fresh salt/iv
/// -> envelope`.
pub fn seal(plaintext: &[u8], password: &Password) -> Result<Envelope> {
    let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
    encoder.write_all(plaintext)?;
    let compressed = encoder.finish()?;

    let salt = crypto::random_bytes(SALT_LEN);
    let iv = crypto::random_bytes(IV_LEN);
    let key = crypto::derive_key(password, &salt)?;
    let iv_arr: [u8; IV_LEN] = iv
        .as_slice()
        .try_into()
        .map_err(|_| Error::CryptoFailure("generated IV has the wrong length".into()))?;
    let ciphertext = crypto::aes256_ctr_encrypt(&key, &iv_arr, &compressed);

    Ok(Envelope { salt, iv, ciphertext })
}

/// Inverse of [`seal`]. Any sub-failure (short envelope, decrypt garbage,
/// zlib error) collapses to [`Error::ExtractionFailed`] so callers cannot
/// use error shape as a wrong-password oracle.
pub fn unseal(envelope: &Envelope, password: &Password) -> Result<Vec<u8>> {
    if envelope.salt.len() != SALT_LEN || envelope.iv.len() != IV_LEN {
        return Err(Error::ExtractionFailed);
    }
    let key = crypto::derive_key(password, &envelope.salt).map_err(|_| Error::ExtractionFailed)?;
    let iv_arr: [u8; IV_LEN] = envelope
        .iv
        .as_slice()
        .try_into()
        .map_err(|_| Error::ExtractionFailed)?;
    let compressed = crypto::aes256_ctr_decrypt(&key, &iv_arr, &envelope.ciphertext);

    let mut decoder = ZlibDecoder::new(compressed.as_slice());
    let mut plaintext = Vec::new();
    decoder
        .read_to_end(&mut plaintext)
        .map_err(|_| Error::ExtractionFailed)?;
    Ok(plaintext)
}
