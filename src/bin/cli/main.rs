//! CLI tool for pipelined image encryption and steganography.

mod commands;
mod exit_codes;
mod password;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use commands::{PipelineConfig, StegAlgo, StegConfig};
use exit_codes::ExitCode;

/// Pipelined image cipher and steganography toolkit
#[derive(Parser)]
#[command(name = "rasterlock")]
#[command(author, version, about = "Pipelined image cipher and steganography toolkit", long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable progress/debug logging
    #[arg(long, global = true)]
    debug: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Encrypt or decrypt an image via a recipe of cipher primitives
    Pipeline {
        /// Image file to read
        #[arg(long)]
        input_file: PathBuf,

        /// Image file to write (defaults to the input path when encrypting)
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// Master password (prompted for if omitted)
        #[arg(long)]
        master_password: Option<String>,

        /// Decrypt instead of encrypt
        #[arg(long)]
        decrypt: bool,

        /// Recipe steps, `algo[:count[:param]]`; repeatable. Required for
        /// encrypt, optional for decrypt (recovered from the image otherwise)
        #[arg(long = "steps")]
        steps: Vec<String>,
    },

    /// Hide or extract a steganographic payload
    Steg {
        /// Carrier image file to read
        #[arg(long)]
        input_file: PathBuf,

        /// Where to write the stego image (hide) or extracted payload
        /// (extract); printed to stdout if omitted on extract
        #[arg(long)]
        output_file: Option<PathBuf>,

        /// `hide` or `extract`
        #[arg(long, value_enum)]
        steg: StegMode,

        /// Steganographic scheme
        #[arg(long, value_enum, default_value = "lsb")]
        algo: StegAlgo,

        /// Password (prompted for if omitted)
        #[arg(long)]
        pass: Option<String>,

        /// Literal text, a file path, or (with `--image`) a carrier image
        /// path; required for `hide`
        #[arg(long)]
        data: Option<String>,

        /// Interpret `--data` (hide) or treat the payload (extract) as a
        /// whole image rather than raw bytes
        #[arg(long)]
        image: bool,
    },
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum StegMode {
    Hide,
    Extract,
}

fn main() {
    let cli = Cli::parse();

    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    }

    let exit_code = match cli.command {
        Commands::Pipeline {
            input_file,
            output_file,
            master_password,
            decrypt,
            steps,
        } => {
            let output_file = output_file.unwrap_or_else(|| input_file.clone());
            match password::get_or_prompt(master_password) {
                Some(master_password) => commands::pipeline(&PipelineConfig {
                    input_file: &input_file,
                    output_file: &output_file,
                    master_password,
                    decrypt,
                    steps: &steps,
                    debug: cli.debug,
                }),
                None => {
                    eprintln!("error: a master password is required");
                    ExitCode::BadArgs
                }
            }
        }

        Commands::Steg {
            input_file,
            output_file,
            steg,
            algo,
            pass,
            data,
            image,
        } => match password::get_or_prompt(pass) {
            Some(password) => commands::steg(&StegConfig {
                input_file: &input_file,
                output_file: output_file.as_deref(),
                hide: matches!(steg, StegMode::Hide),
                algo,
                password,
                data: data.as_deref(),
                as_image: image,
                debug: cli.debug,
            }),
            None => {
                eprintln!("error: a password is required");
                ExitCode::BadArgs
            }
        },
    };

    std::process::exit(exit_code.code());
}
