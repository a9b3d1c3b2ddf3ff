//! # rasterlock
//!
//! A pipelined image cipher and steganography toolkit.
//!
//! rasterlock exposes two related but independent capabilities:
//!
//! 1. **Pipelined image encryption** ([`recipe`], [`cipher`]) — apply a
//!    user-defined ordered sequence of image-transforming ciphers to a
//!    raster image and reverse it on decryption. The recipe is embedded
//!    inside the processed image, so decryption needs only the master
//!    password.
//! 2. **Steganographic embedding** ([`stego`]) — hide arbitrary payloads
//!    inside a raster carrier using fixed-depth LSB replacement or
//!    edge-aware Pixel Value Differencing. Payloads are compressed and
//!    encrypted before embedding.
//!
//! ## Quick start
//!
//! ### Encrypting an image with a recipe
//!
//! ```rust,no_run
//! use rasterlock::{codec, recipe::{self, Recipe}, Result};
//!
//! fn main() -> Result<()> {
//!     let carrier = codec::load_image("carrier.png", false)?;
//!     let steps = Recipe::parse("bitnot:1 channelswap:1 pixelperm:1")?;
//!     let mut encrypted = recipe::encrypt(&carrier, &steps, "hunter2")?;
//!     recipe::embed_recipe(&mut encrypted, &steps, "hunter2")?;
//!     codec::save_image("carrier.enc.png", &encrypted)?;
//!     Ok(())
//! }
//! ```
//!
//! ### Hiding data in a carrier
//!
//! ```rust,no_run
//! use rasterlock::{codec, crypto::Password, stego::lsb, Result};
//!
//! fn main() -> Result<()> {
//!     let carrier = codec::load_image("carrier.png", false)?;
//!     let bits = lsb::BitsPerChannel::new(2)?;
//!     let password = Password::new("hunter2");
//!     let stego = lsb::hide_data(&carrier, b"a secret payload", bits, &password)?;
//!     codec::save_image("stego.png", &stego)?;
//!     Ok(())
//! }
//! ```

pub mod checksum;
pub mod cipher;
pub mod codec;
pub mod crypto;
pub mod error;
pub mod image;
pub mod recipe;
pub mod sidecar;
pub mod stats;
pub mod stego;

pub use crypto::Password;
pub use error::{Error, Result};
pub use image::{Channels, Image};
pub use recipe::Recipe;
