//! Error types for PNG I/O.

use std::io;
use thiserror::Error;

/// I/O operation error.
#[derive(Debug, Error)]
pub enum IoError {
    /// File I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Decoding error.
    #[error("decode error: {0}")]
    DecodeError(String),

    /// Encoding error.
    #[error("encode error: {0}")]
    EncodeError(String),

    /// Decoded layout that cannot be expressed as 8-bit RGBA.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Pixel access failed while reading or building a view.
    #[error(transparent)]
    Core(#[from] pic_core::Error),
}

/// Result type for I/O operations.
pub type IoResult<T> = Result<T, IoError>;
