//! ASTC image view.

use tessera_common::{BinaryReader, Extent, MipLevel};

use crate::{AstcFormat, AstcHeader, Error, Result, ASTC_BLOCK_BYTES, ASTC_MAGIC};

/// A parsed ASTC image borrowing its payload from the source buffer.
#[derive(Debug, Clone, Copy)]
pub struct AstcImage<'a> {
    format: AstcFormat,
    extent: Extent,
    block_depth: u8,
    block_counts: [u32; 3],
    data: &'a [u8],
}

impl<'a> AstcImage<'a> {
    /// Check if data starts with the ASTC magic.
    pub fn is_astc(data: &[u8]) -> bool {
        data.starts_with(ASTC_MAGIC)
    }

    /// Parse an ASTC header located at `offset` within `buffer`.
    ///
    /// The returned data span starts right after the 16-byte header and covers
    /// exactly `blocks_x * blocks_y * blocks_z * 16` bytes.
    pub fn parse(buffer: &'a [u8], offset: usize) -> Result<Self> {
        let mut reader = BinaryReader::new_at(buffer, offset);
        let header: AstcHeader = reader.read_struct()?;

        if &header.magic != ASTC_MAGIC {
            return Err(Error::InvalidMagic(header.magic));
        }

        // No payload size can be derived without a known footprint.
        let format = AstcFormat::from_block_dims(header.block_dim_x, header.block_dim_y).ok_or(
            Error::UnsupportedFootprint {
                x: header.block_dim_x,
                y: header.block_dim_y,
            },
        )?;

        if header.block_dim_z == 0 {
            return Err(Error::InvalidHeader("block depth is zero".into()));
        }

        let extent = Extent::new_3d(header.width(), header.height(), header.depth());
        if extent.is_empty() {
            return Err(Error::InvalidHeader(format!(
                "zero image size {}x{}x{}",
                extent.width, extent.height, extent.depth
            )));
        }

        let block_counts = [
            extent.width.div_ceil(u32::from(header.block_dim_x)),
            extent.height.div_ceil(u32::from(header.block_dim_y)),
            extent.depth.div_ceil(u32::from(header.block_dim_z)),
        ];

        let size = payload_size(block_counts).ok_or_else(|| {
            Error::InvalidHeader(format!("block grid {block_counts:?} overflows"))
        })?;

        let available = reader.remaining();
        let data = reader.read_bytes(size).map_err(|_| Error::Truncated {
            expected: size,
            actual: available,
        })?;

        Ok(Self {
            format,
            extent,
            block_depth: header.block_dim_z,
            block_counts,
            data,
        })
    }

    /// Block footprint.
    #[inline]
    pub fn format(&self) -> AstcFormat {
        self.format
    }

    /// Image dimensions in texels.
    #[inline]
    pub fn extent(&self) -> Extent {
        self.extent
    }

    /// Block dimensions (x, y, z) in texels.
    #[inline]
    pub fn block_dims(&self) -> (u8, u8, u8) {
        let (x, y) = self.format.block_dims();
        (x, y, self.block_depth)
    }

    /// Number of blocks along each axis.
    #[inline]
    pub fn block_counts(&self) -> [u32; 3] {
        self.block_counts
    }

    /// Total payload size in bytes.
    #[inline]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encoded payload.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// ASTC files carry a single level.
    pub fn levels(&self) -> Vec<MipLevel> {
        vec![MipLevel {
            level: 0,
            width: self.extent.width,
            height: self.extent.height,
            offset: 0,
            size: self.data.len(),
        }]
    }
}

fn payload_size([x, y, z]: [u32; 3]) -> Option<usize> {
    let blocks = u64::from(x)
        .checked_mul(u64::from(y))?
        .checked_mul(u64::from(z))?;
    let bytes = blocks.checked_mul(ASTC_BLOCK_BYTES as u64)?;
    usize::try_from(bytes).ok()
}
