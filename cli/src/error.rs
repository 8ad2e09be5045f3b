//! Error handling for growing-recs
//!
//! Fetch errors are recoverable and shown to the user; everything else ends
//! the run with a distinct exit code.

use std::path::PathBuf;

use thiserror::Error;

/// Exit code for a printed report, or a user who closed the input
pub const EXIT_OK: u8 = 0;
/// Exit code for configuration, I/O and startup failures
pub const EXIT_FAILURE: u8 = 1;
pub const EXIT_NOT_FOUND: u8 = 2;
pub const EXIT_TRANSIENT: u8 = 3;
pub const EXIT_MALFORMED: u8 = 4;

/// Errors from looking up a crop
#[derive(Error, Debug)]
pub enum FetchError {
    #[error("Crop not found: {slug}")]
    NotFound { slug: String },

    #[error("Growstuff API error: {message}")]
    Transient {
        status: Option<u16>,
        message: String,
    },

    #[error("Malformed crop response: {0}")]
    MalformedResponse(String),
}

impl FetchError {
    pub fn transient(message: impl Into<String>) -> Self {
        FetchError::Transient {
            status: None,
            message: message.into(),
        }
    }

    /// Message shown before asking for another crop
    pub fn user_message(&self) -> &'static str {
        match self {
            FetchError::NotFound { .. } => {
                "We couldn't find that crop. Please enter a crop that is in the Growstuff database."
            }
            FetchError::Transient { .. } | FetchError::MalformedResponse(_) => {
                "API error, please try again."
            }
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            FetchError::NotFound { .. } => EXIT_NOT_FOUND,
            FetchError::Transient { .. } => EXIT_TRANSIENT,
            FetchError::MalformedResponse(_) => EXIT_MALFORMED,
        }
    }
}

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Please enter a crop name")]
    BlankCrop,

    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    #[error("HTTP client error: {0}")]
    HttpClient(#[from] reqwest::Error),

    #[error("Cannot read crop file {path}: {source}")]
    CropFile {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Invalid crop file {path}: {source}")]
    InvalidCropFile {
        path: PathBuf,
        source: serde_json::Error,
    },

    #[error("Console error: {0}")]
    Console(#[from] std::io::Error),

    #[error("Cannot encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

impl AppError {
    pub fn exit_code(&self) -> u8 {
        match self {
            AppError::Fetch(err) => err.exit_code(),
            AppError::InvalidCropFile { .. } => EXIT_MALFORMED,
            AppError::BlankCrop
            | AppError::Configuration(_)
            | AppError::HttpClient(_)
            | AppError::CropFile { .. }
            | AppError::Console(_)
            | AppError::Encode(_) => EXIT_FAILURE,
        }
    }
}

/// Result type alias for the CLI
pub type AppResult<T> = Result<T, AppError>;
