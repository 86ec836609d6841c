//! Format dispatch and the normalized texture description.

use tessera_astc::AstcImage;
use tessera_common::{Extent, MipLevel};
use tessera_dds::DdsImage;
use tessera_png::PngImage;

use crate::format::{ContainerKind, SNIFF_LEN};
use crate::texture::UploadFormat;
use crate::{Error, Result};

/// A parsed texture, ready for upload.
///
/// Compressed payloads borrow from the source buffer. A decoded PNG owns its
/// pixel buffer, which is released when this value is dropped.
#[derive(Debug)]
pub enum DecodedTexture<'a> {
    Astc(AstcImage<'a>),
    Dds(DdsImage<'a>),
    Png(PngImage),
}

impl<'a> DecodedTexture<'a> {
    /// Parse `buffer` as a container of the given kind.
    pub fn parse(kind: ContainerKind, buffer: &'a [u8]) -> Result<Self> {
        match kind {
            ContainerKind::Astc => Ok(Self::Astc(AstcImage::parse(buffer, 0)?)),
            ContainerKind::Dds => Ok(Self::Dds(DdsImage::from_file_bytes(buffer)?)),
            ContainerKind::Png => Ok(Self::Png(PngImage::parse(buffer, 0, buffer.len())?)),
            ContainerKind::Unknown => {
                let shown = &buffer[..buffer.len().min(SNIFF_LEN)];
                Err(Error::SignatureMismatch(format!(
                    "no known signature in leading bytes {shown:02X?}"
                )))
            }
        }
    }

    /// Sniff and parse an in-memory file.
    pub fn decode(buffer: &'a [u8]) -> Result<Self> {
        Self::parse(ContainerKind::sniff(buffer), buffer)
    }

    pub fn kind(&self) -> ContainerKind {
        match self {
            Self::Astc(_) => ContainerKind::Astc,
            Self::Dds(_) => ContainerKind::Dds,
            Self::Png(_) => ContainerKind::Png,
        }
    }

    pub fn format(&self) -> UploadFormat {
        match self {
            Self::Astc(image) => image.format().into(),
            Self::Dds(image) => image.format().into(),
            Self::Png(image) => image.layout().into(),
        }
    }

    /// Top-level dimensions.
    pub fn extent(&self) -> Extent {
        match self {
            Self::Astc(image) => image.extent(),
            Self::Dds(image) => image.extent(),
            Self::Png(image) => image.extent(),
        }
    }

    /// Encoded bytes per block, for compressed payloads.
    pub fn block_size(&self) -> Option<usize> {
        self.format().block_size()
    }

    /// Levels to upload, level 0 first.
    pub fn levels(&self) -> Vec<MipLevel> {
        match self {
            Self::Astc(image) => image.levels(),
            Self::Dds(image) => image.mip_chain().to_vec(),
            Self::Png(image) => image.levels(),
        }
    }

    /// The whole data span the levels index into.
    pub fn data(&self) -> &[u8] {
        match self {
            Self::Astc(image) => image.data(),
            Self::Dds(image) => image.data(),
            Self::Png(image) => image.data(),
        }
    }

    /// Payload size the container header claims, where it declares one.
    pub fn declared_payload_size(&self) -> Option<u64> {
        match self {
            Self::Dds(image) => Some(image.declared_payload_size()),
            Self::Astc(_) | Self::Png(_) => None,
        }
    }

    /// Payload bytes of one level.
    pub fn level_data(&self, level: &MipLevel) -> Option<&[u8]> {
        self.data().get(level.range())
    }

    /// With only the levels in the file available, the texture must not be
    /// sampled through a mipmapped minification filter.
    pub fn requires_linear_min_filter(&self, generates_mipmaps: bool) -> bool {
        match self {
            Self::Astc(_) => true,
            Self::Dds(image) => image.requires_linear_min_filter(),
            Self::Png(_) => !generates_mipmaps,
        }
    }
}
