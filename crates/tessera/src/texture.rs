//! The GPU texture seam.
//!
//! The loader never talks to a graphics API directly. It creates textures
//! through a [`TextureBackend`] and drives them through [`TextureTarget`],
//! one call per mip level.

use std::fmt;

use tessera_astc::AstcFormat;
use tessera_dds::DdsFormat;
use tessera_png::PixelLayout;
use thiserror::Error;

/// Format tag handed to the upload call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UploadFormat {
    /// ASTC blocks of the given footprint.
    Astc(AstcFormat),
    /// S3TC DXT1 (BC1) blocks.
    Dxt1,
    /// S3TC DXT3 (BC2) blocks.
    Dxt3,
    /// S3TC DXT5 (BC3) blocks.
    Dxt5,
    /// 8-bit luminance.
    Luminance,
    /// 8-bit luminance and alpha.
    LuminanceAlpha,
    /// 8-bit RGBA.
    Rgba,
}

impl UploadFormat {
    /// Whether the payload is block compressed.
    #[inline]
    pub fn is_compressed(self) -> bool {
        matches!(self, Self::Astc(_) | Self::Dxt1 | Self::Dxt3 | Self::Dxt5)
    }

    /// Encoded bytes per block, for compressed formats.
    pub fn block_size(self) -> Option<usize> {
        match self {
            Self::Astc(_) => Some(tessera_astc::ASTC_BLOCK_BYTES),
            Self::Dxt1 => Some(DdsFormat::Dxt1.block_size()),
            Self::Dxt3 => Some(DdsFormat::Dxt3.block_size()),
            Self::Dxt5 => Some(DdsFormat::Dxt5.block_size()),
            Self::Luminance | Self::LuminanceAlpha | Self::Rgba => None,
        }
    }
}

impl From<AstcFormat> for UploadFormat {
    fn from(format: AstcFormat) -> Self {
        Self::Astc(format)
    }
}

impl From<DdsFormat> for UploadFormat {
    fn from(format: DdsFormat) -> Self {
        match format {
            DdsFormat::Dxt1 => Self::Dxt1,
            DdsFormat::Dxt3 => Self::Dxt3,
            DdsFormat::Dxt5 => Self::Dxt5,
        }
    }
}

impl From<PixelLayout> for UploadFormat {
    fn from(layout: PixelLayout) -> Self {
        match layout {
            PixelLayout::Luminance => Self::Luminance,
            PixelLayout::LuminanceAlpha => Self::LuminanceAlpha,
            PixelLayout::Rgba => Self::Rgba,
        }
    }
}

impl fmt::Display for UploadFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Astc(format) => {
                let (x, y) = format.block_dims();
                write!(f, "ASTC {x}x{y}")
            }
            Self::Dxt1 => f.write_str("DXT1"),
            Self::Dxt3 => f.write_str("DXT3"),
            Self::Dxt5 => f.write_str("DXT5"),
            Self::Luminance => f.write_str("L8"),
            Self::LuminanceAlpha => f.write_str("LA8"),
            Self::Rgba => f.write_str("RGBA8"),
        }
    }
}

/// Minification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MinFilter {
    Nearest,
    Linear,
    NearestMipmapNearest,
    LinearMipmapNearest,
    NearestMipmapLinear,
    #[default]
    LinearMipmapLinear,
}

impl MinFilter {
    /// Whether sampling reads from mip levels other than 0.
    #[inline]
    pub fn uses_mipmaps(self) -> bool {
        !matches!(self, Self::Nearest | Self::Linear)
    }
}

/// Magnification filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum MagFilter {
    Nearest,
    #[default]
    Linear,
}

/// One level handed to [`TextureTarget::upload`].
#[derive(Debug, Clone, Copy)]
pub struct LevelUpload<'a> {
    pub level: u32,
    pub format: UploadFormat,
    pub width: u32,
    pub height: u32,
    pub data: &'a [u8],
}

/// A texture target refused an operation.
#[derive(Debug, Error)]
#[error("{message}")]
pub struct UploadError {
    message: String,
}

impl UploadError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A GPU texture object.
///
/// Calls arrive in the order: `bind`, filters, one `upload` per level,
/// optionally `generate_mipmaps`, then `unbind`.
pub trait TextureTarget {
    fn bind(&mut self);

    fn unbind(&mut self);

    fn set_min_filter(&mut self, filter: MinFilter);

    fn set_mag_filter(&mut self, filter: MagFilter);

    /// Upload one level of the bound texture.
    fn upload(&mut self, upload: &LevelUpload<'_>) -> Result<(), UploadError>;

    /// Build the remaining levels from level 0 on the GPU.
    fn generate_mipmaps(&mut self) -> Result<(), UploadError> {
        Ok(())
    }
}

/// Creates texture objects.
pub trait TextureBackend {
    type Texture: TextureTarget;

    fn create_texture(&mut self) -> Self::Texture;
}
