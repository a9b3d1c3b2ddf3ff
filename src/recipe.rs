//! [MODULE D] The recipe engine: parses the recipe DSL, composes cipher
//! primitives in order, embeds the recipe into the output image, and
//! recovers it at decrypt time.

use base64::Engine;
use base64::engine::general_purpose::STANDARD as base64_engine;

use crate::cipher::{self, Cipher};
use crate::error::{Error, Result};
use crate::image::{Channels, Image};

/// Metadata key the recipe blob is stored under on the output image.
pub const RECIPE_METADATA_KEY: &str = "enc_steps_img";

/// One step of a [`Recipe`]: a primitive name, a repetition count, and an
/// optional override key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub algo: String,
    pub count: u32,
    pub param: Option<String>,
}

impl Step {
    /// The effective key for this step: the override `param` if present,
    /// otherwise the master password.
    fn effective_key<'a>(&'a self, master_password: &'a str) -> &'a str {
        self.param.as_deref().unwrap_or(master_password)
    }
}

/// An ordered sequence of [`Step`]s, the unit of work for encrypt/decrypt.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Recipe {
    pub steps: Vec<Step>,
}

impl Recipe {
    /// Parses a whitespace-delimited sequence of `algo[:count[:param]]`
    /// tokens. Empty tokens are skipped. A token whose second colon-field
    /// is not a decimal integer is treated as `param` with an implicit
    /// `count = 1`.
    pub fn parse(text: &str) -> Result<Self> {
        let mut steps = Vec::new();
        for token in text.split_whitespace() {
            if token.is_empty() {
                continue;
            }
            steps.push(parse_step(token)?);
        }
        Ok(Recipe { steps })
    }

    /// Serializes back to the space-separated `algo[:count[:param]]` form.
    pub fn serialize(&self) -> String {
        self.steps
            .iter()
            .map(|step| match &step.param {
                Some(param) => format!("{}:{}:{}", step.algo, step.count, param),
                None => format!("{}:{}", step.algo, step.count),
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

fn parse_step(token: &str) -> Result<Step> {
    let mut parts = token.split(':');
    let algo = parts
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| Error::RecipeInvalid(format!("empty step token: '{token}'")))?
        .to_string();

    let second = parts.next();
    let third = parts.next();

    let (count, param) = match second {
        None => (1, None),
        Some(s) => match s.parse::<u32>() {
            Ok(n) if n >= 1 => (n, third.map(str::to_string)),
            _ => (1, Some(s.to_string())),
        },
    };

    Ok(Step { algo, count, param })
}

/// Applies `recipe` to `image` front-to-back, using `primitive.encrypt`
/// `count` times per step.
pub fn encrypt(image: &Image, recipe: &Recipe, master_password: &str) -> Result<Image> {
    if recipe.is_empty() {
        return Err(Error::RecipeInvalid("empty recipe at encrypt time".into()));
    }
    let mut current = image.clone();
    for step in &recipe.steps {
        let primitive = cipher::lookup(&step.algo)?;
        let key = step.effective_key(master_password);
        for _ in 0..step.count {
            current = primitive.encrypt(&current, key)?;
        }
    }
    Ok(current)
}

/// Applies `recipe` to `image` back-to-front, using `primitive.decrypt`
/// `count` times per step.
pub fn decrypt(image: &Image, recipe: &Recipe, master_password: &str) -> Result<Image> {
    if recipe.is_empty() {
        return Err(Error::RecipeInvalid("empty recipe at decrypt time".into()));
    }
    let mut current = image.clone();
    for step in recipe.steps.iter().rev() {
        let primitive = cipher::lookup(&step.algo)?;
        let key = step.effective_key(master_password);
        for _ in 0..step.count {
            current = primitive.decrypt(&current, key)?;
        }
    }
    Ok(current)
}

/// Embeds `recipe` into `output`'s metadata under [`RECIPE_METADATA_KEY`],
/// per §4.D:
///
/// 1. Serialize the recipe to its space-separated blob.
/// 2. Turn it into a 3-channel, height-1 image of its UTF-8 bytes
///    (zero-padded to a multiple of 3 so it forms whole pixels), tagged
///    `TEXT=1`. Recovery always decrypts with `xor` (see [`recover_recipe`]),
///    which operates on whole 3-byte pixels, so the carrier must be
///    3-channel regardless of which primitive actually encrypts it here.
/// 3. Encrypt that image with the primitive named by the **first** step,
///    under the master password.
/// 4. Base64-encode the result, prepend a `width,height,channels:` header.
pub fn embed_recipe(output: &mut Image, recipe: &Recipe, master_password: &str) -> Result<()> {
    let first_step = recipe
        .steps
        .first()
        .ok_or_else(|| Error::RecipeInvalid("cannot embed an empty recipe".into()))?;

    let blob = recipe.serialize();
    let mut bytes = blob.into_bytes();
    while bytes.len() % 3 != 0 {
        bytes.push(0);
    }
    let width = (bytes.len() / 3) as u32;
    let mut text_image = Image::from_pixels(width, 1, Channels::Rgb, bytes)?;
    text_image.set_metadata("TEXT", "1");

    let primitive = cipher::lookup(&first_step.algo)?;
    let encrypted = primitive.encrypt(&text_image, master_password)?;

    let header = format!(
        "{},{},{}:",
        encrypted.width(),
        encrypted.height(),
        encrypted.channels()
    );
    let encoded = base64_engine.encode(encrypted.pixels());
    output.set_metadata(RECIPE_METADATA_KEY, format!("{header}{encoded}"));
    Ok(())
}

/// Recovers a recipe embedded by [`embed_recipe`] from `image`'s metadata.
///
/// Per §4.D this always decrypts with the hard-coded `xor` primitive
/// regardless of which primitive the recipe was actually embedded with.
/// That mismatch is intentional and documented, not fixed: recipes whose
/// first step isn't `xor` will recover garbage bytes here, same as in the
/// reference implementation.
pub fn recover_recipe(image: &Image, master_password: &str) -> Result<Recipe> {
    let raw = image
        .metadata(RECIPE_METADATA_KEY)
        .ok_or_else(|| Error::RecipeInvalid("no recoverable recipe metadata".into()))?;

    let (header, encoded) = raw
        .split_once(':')
        .ok_or_else(|| Error::RecipeInvalid("malformed enc_steps_img header".into()))?;
    let mut dims = header.split(',');
    let width: u32 = dims
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::RecipeInvalid("malformed enc_steps_img width".into()))?;
    let height: u32 = dims
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::RecipeInvalid("malformed enc_steps_img height".into()))?;
    let channels: u32 = dims
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| Error::RecipeInvalid("malformed enc_steps_img channels".into()))?;
    let channels = Channels::try_from(channels)?;

    let pixels = base64_engine
        .decode(encoded)
        .map_err(|e| Error::RecipeInvalid(format!("malformed enc_steps_img base64: {e}")))?;
    let encrypted = Image::from_pixels(width, height, channels, pixels)?;

    let fallback = cipher::lookup("xor")?;
    let decrypted = fallback.decrypt(&encrypted, master_password)?;

    let text: String = decrypted
        .pixels()
        .iter()
        .copied()
        .filter(|&b| (32..=126).contains(&b))
        .map(|b| b as char)
        .collect();

    Recipe::parse(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_algo_only() {
        let recipe = Recipe::parse("xor").unwrap();
        assert_eq!(
            recipe.steps,
            vec![Step { algo: "xor".into(), count: 1, param: None }]
        );
    }

    #[test]
    fn parses_algo_and_count() {
        let recipe = Recipe::parse("rotn:2").unwrap();
        assert_eq!(
            recipe.steps,
            vec![Step { algo: "rotn".into(), count: 2, param: None }]
        );
    }

    #[test]
    fn parses_algo_count_and_param() {
        let recipe = Recipe::parse("xor:1:override-key").unwrap();
        assert_eq!(
            recipe.steps,
            vec![Step { algo: "xor".into(), count: 1, param: Some("override-key".into()) }]
        );
    }

    #[test]
    fn non_numeric_second_token_is_treated_as_param() {
        let recipe = Recipe::parse("xor:override-key").unwrap();
        assert_eq!(
            recipe.steps,
            vec![Step { algo: "xor".into(), count: 1, param: Some("override-key".into()) }]
        );
    }

    #[test]
    fn parses_multiple_steps_skipping_blank_tokens() {
        let recipe = Recipe::parse("  bitnot:1   channelswap:1  pixelperm:1 ").unwrap();
        assert_eq!(recipe.steps.len(), 3);
    }

    #[test]
    fn encrypt_rejects_empty_recipe() {
        let img = Image::new(4, 4, Channels::Rgb);
        let recipe = Recipe::default();
        let err = encrypt(&img, &recipe, "pw").unwrap_err();
        assert!(matches!(err, Error::RecipeInvalid(_)));
    }

    #[test]
    fn single_step_recipe_round_trips() {
        let mut img = Image::new(4, 4, Channels::Rgb);
        for (i, b) in img.pixels_mut().iter_mut().enumerate() {
            *b = i as u8;
        }
        let recipe = Recipe::parse("xor:1").unwrap();
        let enc = encrypt(&img, &recipe, "pw").unwrap();
        let dec = decrypt(&enc, &recipe, "pw").unwrap();
        assert_eq!(dec.pixels(), img.pixels());
    }

    #[test]
    fn multi_step_recipe_round_trips() {
        let mut img = Image::new(6, 6, Channels::Rgb);
        for (i, b) in img.pixels_mut().iter_mut().enumerate() {
            *b = (i * 7) as u8;
        }
        let recipe = Recipe::parse("bitnot:1 channelswap:1 pixelperm:1").unwrap();
        let enc = encrypt(&img, &recipe, "pass").unwrap();
        let dec = decrypt(&enc, &recipe, "pass").unwrap();
        assert_eq!(dec.pixels(), img.pixels());
    }

    #[test]
    fn embed_and_recover_round_trip_when_first_step_is_xor() {
        let mut img = Image::new(8, 8, Channels::Rgb);
        for (i, b) in img.pixels_mut().iter_mut().enumerate() {
            *b = i as u8;
        }
        let recipe = Recipe::parse("xor:1 bitnot:1").unwrap();
        let mut enc = encrypt(&img, &recipe, "pw").unwrap();
        embed_recipe(&mut enc, &recipe, "pw").unwrap();
        assert!(enc.metadata(RECIPE_METADATA_KEY).is_some());

        let recovered = recover_recipe(&enc, "pw").unwrap();
        assert_eq!(recovered, recipe);

        let dec = decrypt(&enc, &recovered, "pw").unwrap();
        assert_eq!(dec.pixels(), img.pixels());
    }

    #[test]
    fn recover_fails_without_embedded_metadata() {
        let img = Image::new(4, 4, Channels::Rgb);
        let err = recover_recipe(&img, "pw").unwrap_err();
        assert!(matches!(err, Error::RecipeInvalid(_)));
    }
}
