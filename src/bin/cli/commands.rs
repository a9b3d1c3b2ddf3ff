//! Command implementations for the CLI tool.

use std::path::{Path, PathBuf};

use rasterlock::crypto::Password;
use rasterlock::image::Image;
use rasterlock::recipe::{self, Recipe};
use rasterlock::stego::{lsb, pvd};
use rasterlock::{Result, codec, sidecar, stats};

use crate::exit_codes::ExitCode;

/// Which steganographic algorithm a `steg` invocation uses.
#[derive(Copy, Clone, Debug, clap::ValueEnum)]
pub enum StegAlgo {
    Lsb,
    Pvd,
}

/// Configuration for the `pipeline` subcommand.
pub struct PipelineConfig<'a> {
    pub input_file: &'a Path,
    pub output_file: &'a Path,
    pub master_password: Password,
    pub decrypt: bool,
    pub steps: &'a [String],
    pub debug: bool,
}

/// Encrypts or decrypts `config.input_file` via the recipe engine.
pub fn pipeline(config: &PipelineConfig) -> ExitCode {
    match run_pipeline(config) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("error: {e}");
            crate::exit_codes::error_to_exit_code(&e)
        }
    }
}

fn run_pipeline(config: &PipelineConfig) -> Result<()> {
    let mut carrier = codec::load_image(config.input_file, false)?;
    sidecar::read_sidecar(config.input_file, &mut carrier)?;
    if config.debug {
        stats::print_image_info(&carrier, "input");
    }

    let password = config.master_password.as_str();

    let output = if config.decrypt {
        let recipe = if config.steps.is_empty() {
            log::debug!("no --steps provided, attempting recipe recovery from enc_steps_img");
            recipe::recover_recipe(&carrier, password)?
        } else {
            Recipe::parse(&config.steps.join(" "))?
        };
        recipe::decrypt(&carrier, &recipe, password)?
    } else {
        let recipe = Recipe::parse(&config.steps.join(" "))?;
        let mut encrypted = recipe::encrypt(&carrier, &recipe, password)?;
        if let Err(e) = recipe::embed_recipe(&mut encrypted, &recipe, password) {
            log::warn!("recipe embedding failed, saving image without it: {e}");
        }
        encrypted
    };

    if config.debug {
        stats::print_image_info(&output, "output");
    }
    codec::save_image(config.output_file, &output)?;
    sidecar::write_sidecar(config.output_file, &output)?;
    Ok(())
}

/// Configuration for the `steg` subcommand.
pub struct StegConfig<'a> {
    pub input_file: &'a Path,
    pub output_file: Option<&'a Path>,
    pub hide: bool,
    pub algo: StegAlgo,
    pub password: Password,
    pub data: Option<&'a str>,
    pub as_image: bool,
    pub debug: bool,
}

/// Hides or extracts a payload via the LSB or PVD steganography engines.
pub fn steg(config: &StegConfig) -> ExitCode {
    match run_steg(config) {
        Ok(()) => ExitCode::Success,
        Err(e) => {
            eprintln!("error: {e}");
            crate::exit_codes::error_to_exit_code(&e)
        }
    }
}

fn run_steg(config: &StegConfig) -> Result<()> {
    let carrier = codec::load_image(config.input_file, false)?;
    if config.debug {
        stats::print_image_info(&carrier, "carrier");
    }

    if config.hide {
        hide(config, &carrier)
    } else {
        extract(config, &carrier)
    }
}

fn hide(config: &StegConfig, carrier: &Image) -> Result<()> {
    let data_arg = config
        .data
        .ok_or_else(|| rasterlock::Error::InputInvalid("--data is required for hide".into()))?;
    let output_file = config
        .output_file
        .ok_or_else(|| rasterlock::Error::InputInvalid("--outputFile is required for hide".into()))?;

    let stego = if config.as_image {
        let hidden = codec::load_image(data_arg, false)?;
        match config.algo {
            StegAlgo::Lsb => {
                let bits = lsb::BitsPerChannel::new(2)?;
                lsb::hide_image(carrier, &hidden, bits, &config.password)?
            }
            StegAlgo::Pvd => pvd::hide_image(carrier, &hidden, &config.password)?,
        }
    } else {
        let payload = read_payload(data_arg)?;
        match config.algo {
            StegAlgo::Lsb => {
                let bits = lsb::BitsPerChannel::new(2)?;
                lsb::hide_data(carrier, &payload, bits, &config.password)?
            }
            StegAlgo::Pvd => pvd::hide_data(carrier, &payload, &config.password)?,
        }
    };

    codec::save_image(output_file, &stego)?;
    Ok(())
}

fn extract(config: &StegConfig, carrier: &Image) -> Result<()> {
    if config.as_image {
        let extracted = match config.algo {
            StegAlgo::Lsb => {
                let bits = lsb::BitsPerChannel::new(2)?;
                lsb::extract_image(carrier, bits, &config.password)?
            }
            StegAlgo::Pvd => pvd::extract_image(carrier, &config.password)?,
        };
        match config.output_file {
            Some(path) => codec::save_image(path, &extracted)?,
            None => println!(
                "extracted image: {}x{}x{}",
                extracted.width(),
                extracted.height(),
                extracted.channels()
            ),
        }
    } else {
        let extracted = match config.algo {
            StegAlgo::Lsb => {
                let bits = lsb::BitsPerChannel::new(2)?;
                lsb::extract_data(carrier, bits, &config.password)?
            }
            StegAlgo::Pvd => pvd::extract_data(carrier, &config.password)?,
        };
        match config.output_file {
            Some(path) => std::fs::write(path, &extracted)?,
            None => match String::from_utf8(extracted) {
                Ok(text) => println!("{text}"),
                Err(e) => println!("{:?}", e.into_bytes()),
            },
        }
    }
    Ok(())
}

/// Interprets `--data` as a path if it refers to an existing file, otherwise
/// as literal UTF-8 text.
fn read_payload(data_arg: &str) -> Result<Vec<u8>> {
    let path = PathBuf::from(data_arg);
    if path.is_file() {
        Ok(std::fs::read(path)?)
    } else {
        Ok(data_arg.as_bytes().to_vec())
    }
}
