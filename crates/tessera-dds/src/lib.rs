//! DDS texture container parsing.
//!
//! A `.dds` file starts with the 4-byte magic `"DDS "`, followed by a
//! 124-byte header and the block-compressed payload. The payload holds the
//! mip chain back to back, largest level first:
//!
//! - `texture.dds` - Magic, header, then level 0, level 1, ... level N
//!
//! Only the DXT1, DXT3 and DXT5 block formats are accepted. Blocks are passed
//! through to the GPU as-is.
//!
//! # Example
//!
//! ```no_run
//! use tessera_dds::DdsImage;
//!
//! let data = std::fs::read("path/to/texture.dds")?;
//! let image = DdsImage::from_file_bytes(&data)?;
//! for level in image.mip_chain() {
//!     println!("{}x{} @ {} ({} bytes)", level.width, level.height, level.offset, level.size);
//! }
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod error;
mod header;
mod image;

pub use error::{Error, Result};
pub use header::{mipmap_size, DdsFormat, DdsHeader, DdsPixelFormat, FourCC};
pub use image::DdsImage;

/// DDS file magic bytes ("DDS ").
pub const DDS_MAGIC: &[u8; 4] = b"DDS ";

/// Largest accepted `mipMapCount`. A 32-bit extent reaches 1x1 after at most
/// 31 halvings, so no real chain needs more.
pub const MAX_MIPMAP_COUNT: u32 = 32;
