//! Loader configuration.

use crate::texture::{MagFilter, MinFilter};

/// How source files are brought into memory.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReadMode {
    /// Read the whole file into a heap buffer.
    #[default]
    Buffered,
    /// Memory-map the file read-only.
    Mapped,
}

/// Options for [`TextureLoader`](crate::TextureLoader).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoaderConfig {
    pub read_mode: ReadMode,
    /// Ask the target to build the remaining levels after a raster upload.
    pub generate_raster_mipmaps: bool,
    /// Applied to every new texture before its first upload.
    pub default_min_filter: MinFilter,
    pub default_mag_filter: MagFilter,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            read_mode: ReadMode::Buffered,
            generate_raster_mipmaps: true,
            default_min_filter: MinFilter::LinearMipmapLinear,
            default_mag_filter: MagFilter::Linear,
        }
    }
}

impl LoaderConfig {
    pub fn with_read_mode(mut self, read_mode: ReadMode) -> Self {
        self.read_mode = read_mode;
        self
    }

    pub fn with_raster_mipmaps(mut self, generate: bool) -> Self {
        self.generate_raster_mipmaps = generate;
        self
    }
}
