//! Error types for DDS handling.

use thiserror::Error;

use crate::FourCC;

/// Errors that can occur when working with DDS files.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] tessera_common::Error),

    /// Invalid DDS magic.
    #[error("invalid DDS magic: expected 'DDS ', got {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// Invalid DDS header.
    #[error("invalid DDS header: {0}")]
    InvalidHeader(String),

    /// Compression tag other than DXT1, DXT3 or DXT5.
    #[error("unsupported DDS fourCC {0}")]
    UnsupportedFourCC(FourCC),

    /// Declared mip chain runs past the end of the buffer.
    #[error("mip chain truncated at level {level}: need {expected} bytes, {actual} available")]
    MipChainTruncated {
        level: u32,
        expected: usize,
        actual: usize,
    },
}

/// Result type for DDS operations.
pub type Result<T> = std::result::Result<T, Error>;
