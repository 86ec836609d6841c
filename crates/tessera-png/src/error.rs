//! Error types for PNG handling.

use thiserror::Error;

/// Errors that can occur when decoding PNG containers.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] tessera_common::Error),

    /// Data does not start with the PNG signature.
    #[error("not a PNG: signature mismatch")]
    InvalidSignature,

    /// Invalid or unsupported IHDR contents.
    #[error("invalid PNG header: {0}")]
    InvalidHeader(String),

    /// Requested byte range lies outside the buffer.
    #[error("PNG range {offset}+{length} exceeds buffer of {available} bytes")]
    OutOfBounds {
        offset: usize,
        length: usize,
        available: usize,
    },

    /// The decoder reported a stream fault.
    #[error("PNG decode failed: {0}")]
    Decode(#[from] png::DecodingError),
}

/// Result type for PNG operations.
pub type Result<T> = std::result::Result<T, Error>;
