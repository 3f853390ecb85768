//! Error types for carousel generation

use thiserror::Error;

/// Result type alias for carousel operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building a carousel
#[derive(Error, Debug)]
pub enum Error {
    /// Fonts or other startup resources are missing or unusable
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// The hotel record is malformed
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// A photo could not be downloaded
    #[error("Network error: {0}")]
    NetworkError(String),

    /// A photo download exceeded its time budget
    #[error("Operation timed out after {0}ms")]
    Timeout(u64),

    /// Downloaded bytes are not a decodable image
    #[error("Failed to decode image: {0}")]
    DecodeError(String),

    /// Failed to compose a slide
    #[error("Rendering failed: {0}")]
    RenderError(String),

    /// A finished slide could not be stored
    #[error("Storage error: {0}")]
    StorageError(String),
}

impl From<image::ImageError> for Error {
    fn from(err: image::ImageError) -> Self {
        Error::DecodeError(err.to_string())
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::StorageError(err.to_string())
    }
}
