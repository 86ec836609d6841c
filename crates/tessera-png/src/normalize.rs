//! Color model normalization.

use png::Transformations;

use crate::{Error, PngHeader, RawColorType, Result};

/// Pixel layouts that leave the decoder. Palette and bare RGB never do.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelLayout {
    /// One 8-bit gray channel.
    Luminance,
    /// 8-bit gray followed by 8-bit alpha.
    LuminanceAlpha,
    /// Four 8-bit channels; alpha is 0xFF where the source had none.
    Rgba,
}

impl PixelLayout {
    /// Bytes per pixel.
    #[inline]
    pub const fn channels(self) -> usize {
        match self {
            Self::Luminance => 1,
            Self::LuminanceAlpha => 2,
            Self::Rgba => 4,
        }
    }
}

/// The transformations applied to a PNG before upload, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationPlan {
    /// Turn a `tRNS` chunk into a full alpha channel.
    pub expand_transparency: bool,
    /// Widen 1, 2 and 4-bit gray samples to 8 bits.
    pub expand_gray: bool,
    /// Look up palette indices into RGB.
    pub expand_palette: bool,
    /// Append an opaque alpha channel after the color channels.
    pub add_opaque_alpha: bool,
    /// Unpack sub-byte samples to one byte each.
    pub repack_to_8bit: bool,
    /// Reduce 16-bit samples to 8 bits.
    pub scale_16_to_8: bool,
    /// Resulting layout.
    pub layout: PixelLayout,
}

impl NormalizationPlan {
    /// Plan the normalization for a declared color type and bit depth.
    pub fn for_color(color_type: RawColorType, bit_depth: u8, has_transparency: bool) -> Result<Self> {
        if !color_type.allowed_bit_depths().contains(&bit_depth) {
            return Err(Error::InvalidHeader(format!(
                "bit depth {bit_depth} is not valid for {color_type:?}"
            )));
        }

        // tRNS is only meaningful where the source has no alpha channel.
        let expand_transparency = has_transparency
            && matches!(
                color_type,
                RawColorType::Grayscale | RawColorType::Rgb | RawColorType::Palette
            );
        let expand_gray = color_type == RawColorType::Grayscale && bit_depth < 8;
        let expand_palette = color_type == RawColorType::Palette;
        let add_opaque_alpha = matches!(color_type, RawColorType::Palette | RawColorType::Rgb)
            && !expand_transparency;

        let layout = match color_type {
            RawColorType::Grayscale if expand_transparency => PixelLayout::LuminanceAlpha,
            RawColorType::Grayscale => PixelLayout::Luminance,
            RawColorType::GrayscaleAlpha => PixelLayout::LuminanceAlpha,
            RawColorType::Rgb | RawColorType::Rgba | RawColorType::Palette => PixelLayout::Rgba,
        };

        Ok(Self {
            expand_transparency,
            expand_gray,
            expand_palette,
            add_opaque_alpha,
            repack_to_8bit: bit_depth < 8,
            scale_16_to_8: bit_depth == 16,
            layout,
        })
    }

    /// Plan the normalization for a parsed header.
    pub fn for_header(header: &PngHeader) -> Result<Self> {
        Self::for_color(header.color_type, header.bit_depth, header.has_transparency)
    }

    /// Decoder transformations that carry out this plan. The decoder has no
    /// opaque-alpha fill, so [`add_opaque_alpha`](Self::add_opaque_alpha) is
    /// applied to its output instead.
    pub fn transformations(&self) -> Transformations {
        let mut transformations = Transformations::IDENTITY;
        if self.expand_transparency || self.expand_gray || self.expand_palette || self.repack_to_8bit
        {
            transformations |= Transformations::EXPAND;
        }
        if self.scale_16_to_8 {
            transformations |= Transformations::STRIP_16;
        }
        transformations
    }
}
