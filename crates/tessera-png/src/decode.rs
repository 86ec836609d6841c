//! PNG decoding into an upload-ready buffer.

use std::io::Cursor;

use png::{BitDepth, ColorType, Decoder};
use tessera_common::{Extent, MipLevel};

use crate::{Error, NormalizationPlan, PixelLayout, PngHeader, Result, PNG_SIGNATURE};

/// A decoded PNG, owning its normalized pixel buffer.
///
/// Rows are stored bottom-up: row 0 of [`data`](Self::data) is the last row
/// of the source image.
#[derive(Debug, Clone)]
pub struct PngImage {
    header: PngHeader,
    plan: NormalizationPlan,
    data: Vec<u8>,
}

impl PngImage {
    /// Check if data starts with the PNG signature.
    pub fn is_png(data: &[u8]) -> bool {
        data.starts_with(PNG_SIGNATURE)
    }

    /// Decode the PNG stream occupying `length` bytes at `offset`.
    ///
    /// Either the whole image decodes or an error is returned; a failed
    /// decode never leaves a partially filled buffer behind.
    pub fn parse(buffer: &[u8], offset: usize, length: usize) -> Result<Self> {
        let stream = offset
            .checked_add(length)
            .and_then(|end| buffer.get(offset..end))
            .ok_or(Error::OutOfBounds {
                offset,
                length,
                available: buffer.len(),
            })?;

        if !Self::is_png(stream) {
            return Err(Error::InvalidSignature);
        }

        let header = PngHeader::read(stream)?;
        let plan = NormalizationPlan::for_header(&header)?;

        let mut data = decode_with_plan(stream, &header, &plan)?;
        let row_bytes = header.width as usize * plan.layout.channels();
        flip_rows(&mut data, row_bytes, header.height as usize)?;

        Ok(Self { header, plan, data })
    }

    /// The header as declared in the file.
    #[inline]
    pub fn header(&self) -> &PngHeader {
        &self.header
    }

    /// The normalization that was applied.
    #[inline]
    pub fn plan(&self) -> &NormalizationPlan {
        &self.plan
    }

    /// Output pixel layout.
    #[inline]
    pub fn layout(&self) -> PixelLayout {
        self.plan.layout
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.header.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.header.height
    }

    #[inline]
    pub fn extent(&self) -> Extent {
        Extent::new_2d(self.header.width, self.header.height)
    }

    /// Bytes per output row.
    #[inline]
    pub fn row_bytes(&self) -> usize {
        self.header.width as usize * self.plan.layout.channels()
    }

    /// Decoded pixels, bottom row first.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// PNG files carry a single level.
    pub fn levels(&self) -> Vec<MipLevel> {
        vec![MipLevel {
            level: 0,
            width: self.header.width,
            height: self.header.height,
            offset: 0,
            size: self.data.len(),
        }]
    }
}

/// Run the decoder with the transformations the plan asks for, then append
/// opaque alpha where planned. The result must be 8-bit in the planned layout.
fn decode_with_plan(stream: &[u8], header: &PngHeader, plan: &NormalizationPlan) -> Result<Vec<u8>> {
    let mut decoder = Decoder::new(Cursor::new(stream));
    decoder.set_transformations(plan.transformations());
    let mut reader = decoder.read_info()?;

    let mut pixels = vec![0u8; reader.output_buffer_size()];
    let frame = reader.next_frame(&mut pixels)?;
    pixels.truncate(frame.buffer_size());

    if frame.width != header.width || frame.height != header.height {
        return Err(Error::InvalidHeader(format!(
            "decoded size {}x{} differs from header {}x{}",
            frame.width, frame.height, header.width, header.height
        )));
    }

    let mut color_type = frame.color_type;
    if plan.add_opaque_alpha && color_type == ColorType::Rgb {
        append_opaque_alpha(&mut pixels);
        color_type = ColorType::Rgba;
    }

    let produced = match color_type {
        ColorType::Grayscale => Some(PixelLayout::Luminance),
        ColorType::GrayscaleAlpha => Some(PixelLayout::LuminanceAlpha),
        ColorType::Rgba => Some(PixelLayout::Rgba),
        ColorType::Rgb | ColorType::Indexed => None,
    };
    if frame.bit_depth != BitDepth::Eight || produced != Some(plan.layout) {
        return Err(Error::InvalidHeader(format!(
            "decoder produced {:?} at {:?}, expected 8-bit {:?}",
            color_type, frame.bit_depth, plan.layout
        )));
    }

    Ok(pixels)
}

/// Widen packed RGB to RGBA with alpha 0xFF, walking back to front.
fn append_opaque_alpha(pixels: &mut Vec<u8>) {
    let count = pixels.len() / 3;
    pixels.resize(count * 4, 0xFF);
    for i in (0..count).rev() {
        pixels.copy_within(i * 3..i * 3 + 3, i * 4);
        pixels[i * 4 + 3] = 0xFF;
    }
}

/// Swap source row `i` with row `height - 1 - i`.
fn flip_rows(pixels: &mut [u8], row_bytes: usize, height: usize) -> Result<()> {
    let size = row_bytes * height;
    if pixels.len() != size {
        return Err(Error::InvalidHeader(format!(
            "decoded {} bytes, expected {size}",
            pixels.len()
        )));
    }

    for i in 0..height / 2 {
        let (top, bottom) = pixels.split_at_mut((height - 1 - i) * row_bytes);
        top[i * row_bytes..(i + 1) * row_bytes].swap_with_slice(&mut bottom[..row_bytes]);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};

    use super::*;
    use crate::fixture::PngBuilder;
    use crate::RawColorType;

    fn parse(data: &[u8]) -> Result<PngImage> {
        PngImage::parse(data, 0, data.len())
    }

    #[test]
    fn test_top_left_lands_on_last_row() {
        let mut source = RgbaImage::from_pixel(3, 4, Rgba([0, 0, 255, 255]));
        source.put_pixel(0, 0, Rgba([255, 0, 0, 255]));
        let mut encoded = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(source)
            .write_to(&mut encoded, ImageFormat::Png)
            .unwrap();

        let image = parse(encoded.get_ref()).unwrap();
        let row_bytes = image.row_bytes();

        assert_eq!(image.layout(), PixelLayout::Rgba);
        assert_eq!(image.data().len(), row_bytes * 4);
        let last_row = &image.data()[3 * row_bytes..];
        assert_eq!(&last_row[..4], &[255, 0, 0, 255]);
        assert_eq!(&image.data()[..4], &[0, 0, 255, 255]);
    }

    #[test]
    fn test_single_row_is_unchanged() {
        let data = PngBuilder::new(2, 1, 8, 6)
            .rows(vec![vec![1, 2, 3, 4, 5, 6, 7, 8]])
            .build();
        let image = parse(&data).unwrap();

        assert_eq!(image.data(), &[1, 2, 3, 4, 5, 6, 7, 8]);
    }

    #[test]
    fn test_rgb_gets_opaque_alpha() {
        let data = PngBuilder::new(1, 2, 8, 2)
            .rows(vec![vec![10, 20, 30], vec![40, 50, 60]])
            .build();
        let image = parse(&data).unwrap();

        assert_eq!(image.layout(), PixelLayout::Rgba);
        assert_eq!(image.data(), &[40, 50, 60, 255, 10, 20, 30, 255]);
    }

    #[test]
    fn test_palette_expands() {
        let data = PngBuilder::new(2, 1, 8, 3)
            .palette(&[255, 0, 0, 0, 255, 0])
            .rows(vec![vec![1, 0]])
            .build();
        let image = parse(&data).unwrap();

        assert_eq!(image.layout(), PixelLayout::Rgba);
        assert_eq!(image.data(), &[0, 255, 0, 255, 255, 0, 0, 255]);
    }

    #[test]
    fn test_palette_transparency_becomes_alpha() {
        let data = PngBuilder::new(2, 1, 8, 3)
            .palette(&[255, 0, 0, 0, 255, 0])
            .transparency(&[0x80])
            .rows(vec![vec![0, 1]])
            .build();
        let image = parse(&data).unwrap();

        assert!(image.plan().expand_transparency);
        assert_eq!(image.data(), &[255, 0, 0, 0x80, 0, 255, 0, 255]);
    }

    #[test]
    fn test_low_bit_gray_expands() {
        // 1-bit samples 1,0,1,1,0,0,0,0
        let data = PngBuilder::new(8, 1, 1, 0).rows(vec![vec![0b1011_0000]]).build();
        let image = parse(&data).unwrap();

        assert_eq!(image.layout(), PixelLayout::Luminance);
        assert_eq!(image.data(), &[255, 0, 255, 255, 0, 0, 0, 0]);
    }

    #[test]
    fn test_gray_transparency_becomes_alpha() {
        let data = PngBuilder::new(2, 1, 8, 0)
            .transparency(&[0, 0])
            .rows(vec![vec![0, 200]])
            .build();
        let image = parse(&data).unwrap();

        assert_eq!(image.layout(), PixelLayout::LuminanceAlpha);
        assert_eq!(image.data(), &[0, 0, 200, 255]);
    }

    #[test]
    fn test_sixteen_bit_scaled() {
        let data = PngBuilder::new(2, 1, 16, 0)
            .rows(vec![vec![0xFF, 0xFF, 0x00, 0x00]])
            .build();
        let image = parse(&data).unwrap();

        assert_eq!(image.layout(), PixelLayout::Luminance);
        assert_eq!(image.data(), &[255, 0]);
    }

    #[test]
    fn test_corrupt_stream_fails() {
        let data = PngBuilder::new(4, 4, 8, 6)
            .uniform_rows(&[9; 16])
            .corrupt_image_data()
            .build();
        assert!(matches!(parse(&data), Err(Error::Decode(_))));
    }

    #[test]
    fn test_every_color_type_and_depth_decodes() {
        let (width, height) = (3u32, 2u32);

        for code in [0u8, 2, 3, 4, 6] {
            let color_type = RawColorType::from_code(code).unwrap();
            let samples = match color_type {
                RawColorType::Grayscale | RawColorType::Palette => 1,
                RawColorType::GrayscaleAlpha => 2,
                RawColorType::Rgb => 3,
                RawColorType::Rgba => 4,
            };
            let trns: Option<&[u8]> = match color_type {
                RawColorType::Grayscale => Some(&[0, 0]),
                RawColorType::Rgb => Some(&[0, 0, 0, 0, 0, 0]),
                RawColorType::Palette => Some(&[0x40]),
                RawColorType::GrayscaleAlpha | RawColorType::Rgba => None,
            };

            for &depth in color_type.allowed_bit_depths() {
                for transparent in [false, true] {
                    let row_len = (width as usize * samples * depth as usize).div_ceil(8);
                    let mut builder =
                        PngBuilder::new(width, height, depth, code).uniform_rows(&vec![0; row_len]);
                    if color_type == RawColorType::Palette {
                        builder = builder.palette(&[10, 20, 30, 40, 50, 60]);
                    }
                    if transparent {
                        let Some(trns) = trns else { continue };
                        builder = builder.transparency(trns);
                    }

                    let label = format!("{color_type:?} {depth}-bit tRNS={transparent}");
                    let image = parse(&builder.build()).unwrap_or_else(|e| panic!("{label}: {e}"));

                    let expected = match color_type {
                        RawColorType::Grayscale if transparent => PixelLayout::LuminanceAlpha,
                        RawColorType::Grayscale => PixelLayout::Luminance,
                        RawColorType::GrayscaleAlpha => PixelLayout::LuminanceAlpha,
                        _ => PixelLayout::Rgba,
                    };
                    assert_eq!(image.layout(), expected, "{label}");
                    assert_eq!(
                        image.data().len(),
                        (width * height) as usize * expected.channels(),
                        "{label}"
                    );

                    let first = &image.data()[..expected.channels()];
                    let alpha = first.last().copied();
                    match (color_type, transparent) {
                        (RawColorType::Grayscale, false) => assert_eq!(first, &[0], "{label}"),
                        (RawColorType::Palette, false) => {
                            assert_eq!(first, &[10, 20, 30, 255], "{label}")
                        }
                        (RawColorType::Palette, true) => {
                            assert_eq!(first, &[10, 20, 30, 0x40], "{label}")
                        }
                        (RawColorType::Rgb, false) => assert_eq!(alpha, Some(255), "{label}"),
                        _ => assert_eq!(alpha, Some(0), "{label}"),
                    }
                }
            }
        }
    }

    #[test]
    fn test_flip_rows_in_place() {
        let mut pixels = vec![1, 1, 2, 2, 3, 3];
        flip_rows(&mut pixels, 2, 3).unwrap();
        assert_eq!(pixels, [3, 3, 2, 2, 1, 1]);

        let mut pixels = vec![1, 2, 3, 4];
        flip_rows(&mut pixels, 1, 4).unwrap();
        assert_eq!(pixels, [4, 3, 2, 1]);

        assert!(matches!(
            flip_rows(&mut [0; 5], 2, 3),
            Err(Error::InvalidHeader(_))
        ));
    }

    #[test]
    fn test_opaque_alpha_appended_in_place() {
        let mut pixels = vec![1, 2, 3, 4, 5, 6];
        append_opaque_alpha(&mut pixels);
        assert_eq!(pixels, [1, 2, 3, 255, 4, 5, 6, 255]);
    }

    #[test]
    fn test_signature_and_bounds() {
        assert!(matches!(parse(b"DDS \x7c\0\0\0"), Err(Error::InvalidSignature)));

        let data = PngBuilder::new(1, 1, 8, 0).rows(vec![vec![7]]).build();
        assert!(matches!(
            PngImage::parse(&data, 4, data.len()),
            Err(Error::OutOfBounds { .. })
        ));

        let mut padded = vec![0u8; 5];
        padded.extend_from_slice(&data);
        let image = PngImage::parse(&padded, 5, data.len()).unwrap();
        assert_eq!(image.data(), &[7]);
    }
}
