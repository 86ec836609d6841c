//! Error types for ASTC handling.

use thiserror::Error;

/// Errors that can occur when parsing ASTC containers.
#[derive(Debug, Error)]
pub enum Error {
    /// Common library error.
    #[error("{0}")]
    Common(#[from] tessera_common::Error),

    /// Invalid ASTC magic.
    #[error("invalid ASTC magic: expected 13 AB A1 5C, got {0:02X?}")]
    InvalidMagic([u8; 4]),

    /// Block footprint outside the supported 2D set.
    #[error("unsupported ASTC block footprint {x}x{y}")]
    UnsupportedFootprint { x: u8, y: u8 },

    /// Invalid ASTC header.
    #[error("invalid ASTC header: {0}")]
    InvalidHeader(String),

    /// Payload extends past the end of the buffer.
    #[error("ASTC payload truncated: need {expected} bytes, {actual} available")]
    Truncated { expected: usize, actual: usize },
}

/// Result type for ASTC operations.
pub type Result<T> = std::result::Result<T, Error>;
