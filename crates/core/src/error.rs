//! Error types for the paragraph reconstruction pipeline.

use thiserror::Error;

/// Primary error type for paragraph extraction.
#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("extraction did not complete within the configured deadline")]
    Timeout,

    #[error("malformed input on page {page}: {reason}")]
    MalformedInput { page: usize, reason: String },

    #[error("extraction failed: {detail}")]
    Extraction { detail: String },

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience Result type alias for ExtractError.
pub type Result<T> = std::result::Result<T, ExtractError>;
