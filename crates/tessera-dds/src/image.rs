//! DDS image view and mip chain layout.

use tessera_common::{BinaryReader, Extent, MipLevel};

use crate::header::{mipmap_size, DdsFormat, DdsHeader};
use crate::{Error, Result, DDS_MAGIC, MAX_MIPMAP_COUNT};

/// A parsed DDS image borrowing its payload from the source buffer.
#[derive(Debug, Clone)]
pub struct DdsImage<'a> {
    header: DdsHeader,
    format: DdsFormat,
    levels: Vec<MipLevel>,
    data: &'a [u8],
}

impl<'a> DdsImage<'a> {
    /// Check if data starts with the DDS magic.
    pub fn is_dds(data: &[u8]) -> bool {
        data.starts_with(DDS_MAGIC)
    }

    /// Parse a whole DDS file: verify the magic, then parse the header after it.
    pub fn from_file_bytes(data: &'a [u8]) -> Result<Self> {
        if !Self::is_dds(data) {
            let mut magic = [0u8; 4];
            let len = data.len().min(4);
            magic[..len].copy_from_slice(&data[..len]);
            return Err(Error::InvalidMagic(magic));
        }

        Self::parse(data, DDS_MAGIC.len())
    }

    /// Parse the 124-byte header located at `offset` (just past the magic).
    ///
    /// The payload is everything after the header. The declared mip chain is
    /// laid out and checked against it here, so every level returned by
    /// [`mip_chain`](Self::mip_chain) is guaranteed to be in bounds.
    pub fn parse(buffer: &'a [u8], offset: usize) -> Result<Self> {
        let mut reader = BinaryReader::new_at(buffer, offset);
        let header: DdsHeader = reader.read_struct()?;

        if header.size.get() != DdsHeader::SIZE {
            return Err(Error::InvalidHeader(format!(
                "header size {} (expected {})",
                header.size.get(),
                DdsHeader::SIZE
            )));
        }

        let four_cc = header.pixel_format.four_cc;
        let format = DdsFormat::from_four_cc(four_cc).ok_or(Error::UnsupportedFourCC(four_cc))?;

        let extent = Extent::new_2d(header.width.get(), header.height.get());
        if extent.is_empty() {
            return Err(Error::InvalidHeader(format!(
                "zero image size {}x{}",
                extent.width, extent.height
            )));
        }

        let mipmap_count = header.mipmap_count.get();
        if mipmap_count > MAX_MIPMAP_COUNT {
            return Err(Error::InvalidHeader(format!(
                "mipmap count {mipmap_count} exceeds {MAX_MIPMAP_COUNT}"
            )));
        }

        let data = reader.read_bytes(reader.remaining())?;
        let levels = walk_mip_chain(
            extent,
            mipmap_count,
            format.block_size(),
            data.len(),
        )?;

        Ok(Self {
            header,
            format,
            levels,
            data,
        })
    }

    /// The raw header.
    #[inline]
    pub fn header(&self) -> &DdsHeader {
        &self.header
    }

    /// Block compression format.
    #[inline]
    pub fn format(&self) -> DdsFormat {
        self.format
    }

    /// Top-level dimensions.
    #[inline]
    pub fn extent(&self) -> Extent {
        Extent::new_2d(self.header.width.get(), self.header.height.get())
    }

    /// Mipmap count as declared in the header.
    #[inline]
    pub fn mipmap_count(&self) -> u32 {
        self.header.mipmap_count.get()
    }

    /// Linear size of the top level as declared in the header.
    #[inline]
    pub fn linear_size(&self) -> u32 {
        self.header.pitch_or_linear_size.get()
    }

    /// Payload size implied by the header: twice the linear size when the
    /// file declares a mip chain, the linear size alone otherwise.
    pub fn declared_payload_size(&self) -> u64 {
        let linear = u64::from(self.linear_size());
        if self.mipmap_count() > 1 {
            linear * 2
        } else {
            linear
        }
    }

    /// Encoded bytes per 4x4 block.
    #[inline]
    pub fn block_size(&self) -> usize {
        self.format.block_size()
    }

    /// Without a declared chain the texture must not be sampled with a
    /// mipmapped minification filter.
    #[inline]
    pub fn requires_linear_min_filter(&self) -> bool {
        self.mipmap_count() <= 1
    }

    /// Everything after the header.
    #[inline]
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// The mip chain, level 0 first.
    #[inline]
    pub fn mip_chain(&self) -> &[MipLevel] {
        &self.levels
    }

    /// Payload bytes of a single level.
    #[inline]
    pub fn level_data(&self, level: &MipLevel) -> Option<&'a [u8]> {
        self.data.get(level.range())
    }

    /// Iterate over levels together with their payload bytes.
    pub fn levels_with_data(&self) -> impl Iterator<Item = (MipLevel, &'a [u8])> + '_ {
        self.levels
            .iter()
            .filter_map(move |level| self.level_data(level).map(|data| (*level, data)))
    }
}

/// Lay out the declared chain.
///
/// Emits one level per index in `0..=mipmap_count`, so a file declaring one
/// mipmap yields two levels and a file declaring none yields one. Each level
/// halves the previous extent, floored at 1. The chain must fit in
/// `available` bytes.
fn walk_mip_chain(
    extent: Extent,
    mipmap_count: u32,
    block_size: usize,
    available: usize,
) -> Result<Vec<MipLevel>> {
    let mut levels = Vec::new();
    let mut extent = extent;
    let mut offset = 0usize;
    let mut level = 0u32;

    while level <= mipmap_count && (extent.width != 0 || extent.height != 0) {
        let size = mipmap_size(extent.width, extent.height, block_size).ok_or_else(|| {
            Error::InvalidHeader(format!(
                "level {level} size overflows ({}x{})",
                extent.width, extent.height
            ))
        })?;

        let end = offset.checked_add(size).filter(|&end| end <= available);
        let Some(end) = end else {
            return Err(Error::MipChainTruncated {
                level,
                expected: offset.saturating_add(size),
                actual: available,
            });
        };

        levels.push(MipLevel {
            level,
            width: extent.width,
            height: extent.height,
            offset,
            size,
        });

        offset = end;
        extent = extent.next_mip();
        level = match level.checked_add(1) {
            Some(next) => next,
            None => break,
        };
    }

    Ok(levels)
}
