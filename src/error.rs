// SPDX-License-Identifier: MPL-2.0
use std::fmt;

/// Error taxonomy for the editing core.
///
/// Nothing here is fatal to the process: every variant is reported to the
/// caller and control returns to the interactive loop with the session state
/// intact (or, for processing failures, with any snapshot already committed
/// kept as-is).
#[derive(Debug, Clone)]
pub enum Error {
    /// Invalid input from the user (bad dimensions, missing selection).
    /// The operation is aborted and state is unchanged.
    UserInput(String),

    /// File open/save failure.
    Io(String),

    /// An image-processing routine failed.
    Processing(String),

    /// Preset file could not be parsed.
    Config(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UserInput(e) => write!(f, "Invalid input: {}", e),
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Processing(e) => write!(f, "Processing Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
        }
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        match err {
            image::ImageError::IoError(io) => Error::Io(io.to_string()),
            other => Error::Processing(other.to_string()),
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
