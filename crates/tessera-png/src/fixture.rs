//! PNG streams for tests, written by the `png` encoder.
//!
//! The builder takes packed scanlines so any color type and bit depth can be
//! produced sample for sample. Streams can be damaged after encoding to
//! exercise the error paths.

use png::{BitDepth, ColorType, Encoder};

/// Offset of the IHDR bit depth byte: signature, chunk length, chunk type,
/// width and height.
const IHDR_BIT_DEPTH: usize = 8 + 4 + 4 + 8;

pub(crate) struct PngBuilder {
    width: u32,
    height: u32,
    bit_depth: u8,
    color_type: u8,
    palette: Option<Vec<u8>>,
    transparency: Option<Vec<u8>>,
    data: Vec<u8>,
    declared: Option<(u8, u8)>,
    corrupt: bool,
}

impl PngBuilder {
    pub(crate) fn new(width: u32, height: u32, bit_depth: u8, color_type: u8) -> Self {
        Self {
            width,
            height,
            bit_depth,
            color_type,
            palette: None,
            transparency: None,
            data: Vec::new(),
            declared: None,
            corrupt: false,
        }
    }

    pub(crate) fn palette(mut self, rgb: &[u8]) -> Self {
        self.palette = Some(rgb.to_vec());
        self
    }

    pub(crate) fn transparency(mut self, trns: &[u8]) -> Self {
        self.transparency = Some(trns.to_vec());
        self
    }

    /// Packed scanlines, top row first.
    pub(crate) fn rows(mut self, rows: Vec<Vec<u8>>) -> Self {
        self.data = rows.concat();
        self
    }

    /// Repeat one scanline for every row.
    pub(crate) fn uniform_rows(self, row: &[u8]) -> Self {
        let rows = vec![row.to_vec(); self.height as usize];
        self.rows(rows)
    }

    /// Rewrite the IHDR bit depth and color type once encoded.
    pub(crate) fn declare(mut self, bit_depth: u8, color_type: u8) -> Self {
        self.declared = Some((bit_depth, color_type));
        self
    }

    /// Scramble the IDAT payload once encoded.
    pub(crate) fn corrupt_image_data(mut self) -> Self {
        self.corrupt = true;
        self
    }

    pub(crate) fn build(&self) -> Vec<u8> {
        let mut out = Vec::new();
        {
            let mut encoder = Encoder::new(&mut out, self.width, self.height);
            encoder.set_color(ColorType::from_u8(self.color_type).unwrap());
            encoder.set_depth(BitDepth::from_u8(self.bit_depth).unwrap());
            if let Some(palette) = &self.palette {
                encoder.set_palette(palette.clone());
            }
            if let Some(trns) = &self.transparency {
                encoder.set_trns(trns.clone());
            }

            let mut writer = encoder.write_header().unwrap();
            writer.write_image_data(&self.data).unwrap();
            writer.finish().unwrap();
        }

        if let Some((bit_depth, color_type)) = self.declared {
            out[IHDR_BIT_DEPTH] = bit_depth;
            out[IHDR_BIT_DEPTH + 1] = color_type;
        }
        if self.corrupt {
            let tag = out.windows(4).position(|w| w == b"IDAT").unwrap();
            for byte in &mut out[tag + 4..tag + 8] {
                *byte ^= 0xA5;
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::PNG_SIGNATURE;

    #[test]
    fn test_declare_rewrites_ihdr() {
        let data = PngBuilder::new(1, 1, 8, 0).rows(vec![vec![0]]).declare(4, 2).build();

        assert!(data.starts_with(PNG_SIGNATURE));
        assert_eq!(&data[12..16], b"IHDR");
        assert_eq!(&data[IHDR_BIT_DEPTH..IHDR_BIT_DEPTH + 2], &[4, 2]);
    }
}
