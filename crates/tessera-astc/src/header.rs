//! ASTC header structure.

use tessera_common::u24_from_le;
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// ASTC file header.
///
/// Every field is a byte or byte array, so the layout has no padding and no
/// alignment requirement. Sizes are reassembled from their bytes explicitly.
#[derive(Debug, Clone, Copy, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct AstcHeader {
    /// Magic (`13 AB A1 5C`).
    pub magic: [u8; 4],
    /// Block footprint along x.
    pub block_dim_x: u8,
    /// Block footprint along y.
    pub block_dim_y: u8,
    /// Block footprint along z.
    pub block_dim_z: u8,
    /// Image width, 24-bit little-endian.
    pub size_x: [u8; 3],
    /// Image height, 24-bit little-endian.
    pub size_y: [u8; 3],
    /// Image depth, 24-bit little-endian.
    pub size_z: [u8; 3],
}

impl AstcHeader {
    /// Header size in bytes.
    pub const SIZE: usize = 16;

    /// Image width in texels.
    #[inline]
    pub fn width(&self) -> u32 {
        let [b0, b1, b2] = self.size_x;
        u24_from_le(b0, b1, b2)
    }

    /// Image height in texels.
    #[inline]
    pub fn height(&self) -> u32 {
        let [b0, b1, b2] = self.size_y;
        u24_from_le(b0, b1, b2)
    }

    /// Image depth in texels.
    #[inline]
    pub fn depth(&self) -> u32 {
        let [b0, b1, b2] = self.size_z;
        u24_from_le(b0, b1, b2)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_layout() {
        assert_eq!(std::mem::size_of::<AstcHeader>(), AstcHeader::SIZE);

        let bytes = [
            0x13, 0xAB, 0xA1, 0x5C, 6, 5, 1, 0x00, 0x04, 0x00, 0x2C, 0x01, 0x00, 0x01, 0x00, 0x00,
        ];
        let header = AstcHeader::read_from_bytes(&bytes[..]).unwrap();
        assert_eq!(header.block_dim_x, 6);
        assert_eq!(header.block_dim_y, 5);
        assert_eq!(header.width(), 1024);
        assert_eq!(header.height(), 300);
        assert_eq!(header.depth(), 1);
    }
}
