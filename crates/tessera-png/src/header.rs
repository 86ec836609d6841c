//! PNG header inspection.
//!
//! Only the parts of the chunk stream that drive normalization are read here:
//! the `IHDR` fields and whether a `tRNS` chunk precedes the image data.
//! Entropy decoding and unfiltering are left to the decoder.

use tessera_common::BinaryReader;

use crate::{Error, Result, PNG_SIGNATURE};

/// Color type as declared in `IHDR`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RawColorType {
    Grayscale,
    GrayscaleAlpha,
    Rgb,
    Rgba,
    Palette,
}

impl RawColorType {
    /// Every declared color type.
    pub const ALL: [RawColorType; 5] = [
        Self::Grayscale,
        Self::GrayscaleAlpha,
        Self::Rgb,
        Self::Rgba,
        Self::Palette,
    ];

    /// Map the `IHDR` color type code.
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            0 => Some(Self::Grayscale),
            2 => Some(Self::Rgb),
            3 => Some(Self::Palette),
            4 => Some(Self::GrayscaleAlpha),
            6 => Some(Self::Rgba),
            _ => None,
        }
    }

    /// Bit depths permitted for this color type.
    pub fn allowed_bit_depths(self) -> &'static [u8] {
        match self {
            Self::Grayscale => &[1, 2, 4, 8, 16],
            Self::Palette => &[1, 2, 4, 8],
            Self::GrayscaleAlpha | Self::Rgb | Self::Rgba => &[8, 16],
        }
    }
}

/// The fields of a PNG header that drive normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PngHeader {
    pub width: u32,
    pub height: u32,
    pub bit_depth: u8,
    pub color_type: RawColorType,
    /// A `tRNS` chunk was found before the first `IDAT`.
    pub has_transparency: bool,
}

const IHDR: &[u8; 4] = b"IHDR";
const TRNS: &[u8; 4] = b"tRNS";
const IDAT: &[u8; 4] = b"IDAT";
const IEND: &[u8; 4] = b"IEND";

impl PngHeader {
    /// Read the header from a complete PNG stream.
    pub fn read(data: &[u8]) -> Result<Self> {
        let mut reader = BinaryReader::new(data);
        reader
            .expect_magic(PNG_SIGNATURE)
            .map_err(|_| Error::InvalidSignature)?;

        let length = reader.read_u32_be()? as usize;
        if reader.read_bytes(4)? != IHDR || length != 13 {
            return Err(Error::InvalidHeader("IHDR must be the first chunk".into()));
        }

        let width = reader.read_u32_be()?;
        let height = reader.read_u32_be()?;
        let bit_depth = reader.read_u8()?;
        let code = reader.read_u8()?;
        // compression, filter, interlace
        reader.advance(3);
        // crc
        reader.advance(4);

        let color_type = RawColorType::from_code(code)
            .ok_or_else(|| Error::InvalidHeader(format!("unknown color type {code}")))?;

        if !color_type.allowed_bit_depths().contains(&bit_depth) {
            return Err(Error::InvalidHeader(format!(
                "bit depth {bit_depth} is not valid for {color_type:?}"
            )));
        }

        if width == 0 || height == 0 {
            return Err(Error::InvalidHeader(format!("zero image size {width}x{height}")));
        }

        let mut has_transparency = false;
        loop {
            let length = reader.read_u32_be()? as usize;
            let kind = reader.read_bytes(4)?;
            if kind == IDAT || kind == IEND {
                break;
            }
            if kind == TRNS {
                has_transparency = true;
            }
            reader.advance(length.saturating_add(4));
        }

        Ok(Self {
            width,
            height,
            bit_depth,
            color_type,
            has_transparency,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixture::PngBuilder;

    #[test]
    fn test_read_header() {
        let data = PngBuilder::new(3, 2, 8, 2).uniform_rows(&[1, 2, 3]).build();
        let header = PngHeader::read(&data).unwrap();

        assert_eq!(header.width, 3);
        assert_eq!(header.height, 2);
        assert_eq!(header.bit_depth, 8);
        assert_eq!(header.color_type, RawColorType::Rgb);
        assert!(!header.has_transparency);
    }

    #[test]
    fn test_detects_transparency() {
        let data = PngBuilder::new(2, 1, 8, 3)
            .palette(&[255, 0, 0, 0, 255, 0])
            .transparency(&[0x80])
            .rows(vec![vec![0, 1]])
            .build();
        let header = PngHeader::read(&data).unwrap();

        assert_eq!(header.color_type, RawColorType::Palette);
        assert!(header.has_transparency);
    }

    #[test]
    fn test_rejects_invalid_depth() {
        let data = PngBuilder::new(1, 1, 8, 2).rows(vec![vec![0, 0, 0]]).declare(4, 2).build();
        assert!(matches!(PngHeader::read(&data), Err(Error::InvalidHeader(_))));

        let data = PngBuilder::new(1, 1, 8, 0).rows(vec![vec![0]]).declare(8, 5).build();
        assert!(matches!(PngHeader::read(&data), Err(Error::InvalidHeader(_))));
    }

    #[test]
    fn test_rejects_signature() {
        assert!(matches!(
            PngHeader::read(b"\x89PNG\r\n\x1a\x00rest"),
            Err(Error::InvalidSignature)
        ));
    }
}
