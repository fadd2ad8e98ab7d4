//! Error types for inkline.

use thiserror::Error;

/// Result type alias using inkline's Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for inkline operations.
///
/// The local classification tiers are infallible; every variant here
/// originates at the fallback-classifier boundary or in configuration.
#[derive(Error, Debug)]
pub enum Error {
    /// Inference/generation failed
    #[error("Inference error: {0}")]
    Inference(String),

    /// HTTP/network request failed
    #[error("Request error: {0}")]
    Request(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}

impl From<reqwest::Error> for Error {
    fn from(e: reqwest::Error) -> Self {
        Error::Request(e.to_string())
    }
}
