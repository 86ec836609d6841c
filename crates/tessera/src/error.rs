//! Error types for texture loading.

use thiserror::Error;

use crate::texture::UploadError;

/// Errors that can occur while loading a texture.
///
/// Every per-format error folds into one of these categories.
#[derive(Debug, Error)]
pub enum Error {
    /// File unreadable.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Not a recognized container.
    #[error("signature mismatch: {0}")]
    SignatureMismatch(String),

    /// Recognized container with an unrecognized sub-format.
    #[error("unsupported variant: {0}")]
    UnsupportedVariant(String),

    /// Header values inconsistent with each other or with the buffer.
    #[error("malformed header: {0}")]
    MalformedHeader(String),

    /// The raster decoder reported a stream fault.
    #[error("decode failure: {0}")]
    DecodeFailure(String),

    /// The texture target rejected a level.
    #[error("upload failed: {0}")]
    Upload(#[from] UploadError),
}

/// Result type for texture loading.
pub type Result<T> = std::result::Result<T, Error>;

impl From<tessera_common::Error> for Error {
    fn from(err: tessera_common::Error) -> Self {
        match err {
            tessera_common::Error::Io(err) => Self::Io(err),
            tessera_common::Error::InvalidMagic { .. } => Self::SignatureMismatch(err.to_string()),
            tessera_common::Error::UnexpectedEof { .. } => Self::MalformedHeader(err.to_string()),
        }
    }
}

impl From<tessera_astc::Error> for Error {
    fn from(err: tessera_astc::Error) -> Self {
        use tessera_astc::Error as Astc;
        match err {
            Astc::Common(err) => err.into(),
            Astc::InvalidMagic(_) => Self::SignatureMismatch(err.to_string()),
            Astc::UnsupportedFootprint { .. } => Self::UnsupportedVariant(err.to_string()),
            Astc::InvalidHeader(_) | Astc::Truncated { .. } => Self::MalformedHeader(err.to_string()),
        }
    }
}

impl From<tessera_dds::Error> for Error {
    fn from(err: tessera_dds::Error) -> Self {
        use tessera_dds::Error as Dds;
        match err {
            Dds::Common(err) => err.into(),
            Dds::InvalidMagic(_) => Self::SignatureMismatch(err.to_string()),
            Dds::UnsupportedFourCC(_) => Self::UnsupportedVariant(err.to_string()),
            Dds::InvalidHeader(_) | Dds::MipChainTruncated { .. } => {
                Self::MalformedHeader(err.to_string())
            }
        }
    }
}

impl From<tessera_png::Error> for Error {
    fn from(err: tessera_png::Error) -> Self {
        use tessera_png::Error as Png;
        match err {
            Png::Common(err) => err.into(),
            Png::InvalidSignature => Self::SignatureMismatch(err.to_string()),
            Png::InvalidHeader(_) | Png::OutOfBounds { .. } => Self::MalformedHeader(err.to_string()),
            Png::Decode(_) => Self::DecodeFailure(err.to_string()),
        }
    }
}
