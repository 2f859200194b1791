//! Error types for ac-core
//!
//! Provides a unified error type that can be converted to appropriate exit codes.

use thiserror::Error;

use crate::http::HttpFailure;

/// Result type alias for ac-core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for ac-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration file error or missing setting
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// TOML serialization error
    #[error("TOML serialization error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// URL parsing error
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    /// Request to the API failed
    #[error(transparent)]
    Http(#[from] HttpFailure),
}

impl Error {
    /// Get the appropriate exit code for this error
    pub const fn exit_code(&self) -> i32 {
        match self {
            Error::Config(_) | Error::InvalidUrl(_) => 2, // UsageError
            _ => 1,                                       // GeneralError
        }
    }

    /// The HTTP failure behind this error, if any
    pub fn as_http(&self) -> Option<&HttpFailure> {
        match self {
            Error::Http(failure) => Some(failure),
            _ => None,
        }
    }
}
