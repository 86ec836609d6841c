//! ASTC texture container parsing.
//!
//! An `.astc` file is a 16-byte header followed by the compressed payload:
//! - 4 bytes: Magic (`13 AB A1 5C`)
//! - 3 bytes: Block footprint x, y, z (texels per block)
//! - 9 bytes: Image size x, y, z, each three bytes, low byte first
//! - N bytes: Encoded blocks, 16 bytes each
//!
//! The payload is handed to the GPU untouched; nothing here decodes blocks.
//!
//! # Example
//!
//! ```no_run
//! use tessera_astc::AstcImage;
//!
//! let data = std::fs::read("rock.astc")?;
//! let image = AstcImage::parse(&data, 0)?;
//! println!("{:?} {}x{}", image.format(), image.extent().width, image.extent().height);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod format;
mod header;
mod image;

pub use error::{Error, Result};
pub use format::AstcFormat;
pub use header::AstcHeader;
pub use image::AstcImage;

/// ASTC file magic bytes.
pub const ASTC_MAGIC: &[u8; 4] = &[0x13, 0xAB, 0xA1, 0x5C];

/// Encoded size of every ASTC block, regardless of footprint.
pub const ASTC_BLOCK_BYTES: usize = 16;
