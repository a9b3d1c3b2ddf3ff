//! Error types for image-cipher and steganography operations.
//!
//! This module provides the [`Error`] enum which represents every failure
//! mode a caller can observe, along with the [`Result<T>`] alias used
//! throughout the crate.
//!
//! # Error Handling
//!
//! All fallible operations return `Result<T, Error>`. The CLI boundary is
//! the only place an [`Error`] is converted into a process exit code (see
//! `bin/cli/exit_codes.rs`); everywhere else it propagates via `?`.
//!
//! ```rust,no_run
//! use rasterlock::{Error, Result};
//!
//! fn do_it() -> Result<()> {
//!     Err(Error::RecipeInvalid("empty recipe".into()))
//! }
//!
//! match do_it() {
//!     Ok(()) => {}
//!     Err(Error::RecipeInvalid(reason)) => eprintln!("bad recipe: {reason}"),
//!     Err(e) => eprintln!("error: {e}"),
//! }
//! ```

use std::io;

/// The crate-wide result alias.
pub type Result<T> = std::result::Result<T, Error>;

/// All failure modes exposed by rasterlock.
///
/// Variants map directly onto the error kinds named in the design: a fatal
/// condition always stops the current operation and propagates to the
/// caller. `ExtractionFailed` intentionally collapses every stego
/// sub-failure (bad header, wrong password, corrupt ciphertext, failed
/// decompression) into one variant so callers cannot use error shape as a
/// wrong-password oracle.
#[derive(thiserror::Error, Debug)]
#[non_exhaustive]
pub enum Error {
    /// Underlying I/O failure (file not found, permission denied, ...).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Raster codec (PNG/BMP/JPEG) failure while decoding or encoding a file.
    #[error("image codec error: {0}")]
    Codec(#[from] image::ImageError),

    /// Missing input, unreadable file, empty pixel buffer, or an unsupported
    /// channel count for the requested operation.
    #[error("invalid input: {0}")]
    InputInvalid(String),

    /// Empty recipe at encrypt time, an unknown primitive name, a malformed
    /// step token, or an empty recipe at decrypt time with no recoverable
    /// `enc_steps_img` metadata.
    #[error("invalid recipe: {0}")]
    RecipeInvalid(String),

    /// A key failed to produce required derived material — e.g. a rot-N key
    /// whose hash contains no digit in `1..=7`, or an empty master password.
    #[error("invalid key: {0}")]
    InvalidKey(String),

    /// The carrier or target buffer is too small for the requested payload,
    /// header, or salt/IV embedding.
    #[error("insufficient capacity: needed {needed} bytes, have {available}")]
    InsufficientCapacity {
        /// Bytes required by the operation.
        needed: usize,
        /// Bytes actually available.
        available: usize,
    },

    /// Key derivation or cipher init/update/final failure.
    #[error("cryptographic operation failed: {0}")]
    CryptoFailure(String),

    /// Any stego extraction sub-failure. Deliberately coarse-grained: see
    /// the module-level note above.
    #[error("steganographic extraction failed")]
    ExtractionFailed,

    /// A primitive returned an image whose `(w, h, channels)` differs from
    /// its input. Always a bug in a primitive, never a user error.
    #[error("dimension drift: expected {expected:?}, got {actual:?}")]
    DimensionDrift {
        /// `(width, height, channels)` of the input.
        expected: (u32, u32, u32),
        /// `(width, height, channels)` of the output.
        actual: (u32, u32, u32),
    },
}

impl Error {
    /// Shorthand for [`Error::InsufficientCapacity`].
    pub fn capacity(needed: usize, available: usize) -> Self {
        Self::InsufficientCapacity { needed, available }
    }
}
