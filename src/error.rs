//! Error types for the voice assistant

use thiserror::Error;

/// Result type alias for assistant operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the voice assistant
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("configuration error: {0}")]
    Config(String),

    /// Speech recognition platform error
    #[error("recognition error: {0}")]
    Recognition(String),

    /// Speech synthesis platform error
    #[error("synthesis error: {0}")]
    Synthesis(String),

    /// Note or reminder not found
    #[error("not found: {0}")]
    NotFound(String),

    /// Rejected user input (empty form fields, malformed ids)
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// File type the image-text stub does not accept
    #[error("unsupported file: {0}")]
    UnsupportedFile(String),

    /// IO error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
