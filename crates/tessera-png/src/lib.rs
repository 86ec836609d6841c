//! PNG decoding for texture upload.
//!
//! The `png` decoder does the entropy decoding and unfiltering. This crate
//! owns the policy: a [`NormalizationPlan`] picks the decoder
//! transformations so every color type and bit depth leaves as one of three
//! 8-bit layouts ([`PixelLayout`]). Rows are stored bottom-up so that row 0
//! of the output is the bottom of the picture.
//!
//! # Example
//!
//! ```no_run
//! use tessera_png::PngImage;
//!
//! let data = std::fs::read("sprite.png")?;
//! let image = PngImage::parse(&data, 0, data.len())?;
//! println!("{:?} {}x{}", image.layout(), image.width(), image.height());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod decode;
mod error;
mod header;
mod normalize;

#[cfg(test)]
mod fixture;

pub use decode::PngImage;
pub use error::{Error, Result};
pub use header::{PngHeader, RawColorType};
pub use normalize::{NormalizationPlan, PixelLayout};

/// The 8-byte PNG signature.
pub const PNG_SIGNATURE: &[u8; 8] = b"\x89PNG\r\n\x1a\n";
