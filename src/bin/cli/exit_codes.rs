//! Exit codes for the CLI tool.

use rasterlock::Error;

/// Exit code constants.
pub const SUCCESS: i32 = 0;
/// Fatal error occurred.
pub const FATAL_ERROR: i32 = 2;
/// Invalid recipe, key, or other bad input.
pub const BAD_INPUT: i32 = 3;
/// Stego extraction failed (wrong password or corrupt carrier).
pub const EXTRACTION_FAILED: i32 = 4;
/// I/O error.
pub const IO_ERROR: i32 = 5;
/// Invalid command line arguments.
pub const BAD_ARGS: i32 = 255;

/// Exit code enum for structured handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    Success,
    FatalError,
    BadInput,
    ExtractionFailed,
    IoError,
    BadArgs,
}

impl ExitCode {
    /// Returns the numeric exit code.
    pub fn code(self) -> i32 {
        match self {
            Self::Success => SUCCESS,
            Self::FatalError => FATAL_ERROR,
            Self::BadInput => BAD_INPUT,
            Self::ExtractionFailed => EXTRACTION_FAILED,
            Self::IoError => IO_ERROR,
            Self::BadArgs => BAD_ARGS,
        }
    }
}

/// Converts a rasterlock error to an exit code.
pub fn error_to_exit_code(error: &Error) -> ExitCode {
    match error {
        Error::Io(_) => ExitCode::IoError,
        Error::Codec(_) => ExitCode::BadInput,
        Error::InputInvalid(_) | Error::RecipeInvalid(_) | Error::InvalidKey(_) => ExitCode::BadInput,
        Error::InsufficientCapacity { .. } => ExitCode::BadInput,
        Error::CryptoFailure(_) => ExitCode::FatalError,
        Error::ExtractionFailed => ExitCode::ExtractionFailed,
        Error::DimensionDrift { .. } => ExitCode::FatalError,
        // Future error variants - required by #[non_exhaustive].
        _ => ExitCode::FatalError,
    }
}
