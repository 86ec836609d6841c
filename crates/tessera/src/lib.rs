//! Tessera - texture container ingestion for real-time renderers.
//!
//! Identifies ASTC, DDS and PNG files by their signature, parses them with
//! the matching container crate and uploads every level to a texture object
//! supplied by the renderer.
//!
//! # Crates
//!
//! - [`tessera_common`] - Binary reading, extents and mip levels
//! - [`tessera_astc`] - ASTC header parsing
//! - [`tessera_dds`] - DDS header parsing and mip chain walking
//! - [`tessera_png`] - PNG decoding and color normalization
//!
//! # Example
//!
//! ```no_run
//! use tessera::prelude::*;
//!
//! let mut loader = TextureLoader::new(RecordingBackend::new());
//! if let Some(loaded) = loader.load("assets/stone.dds") {
//!     println!("{} {}x{}, {} levels", loaded.format, loaded.extent.width,
//!         loaded.extent.height, loaded.levels.len());
//! }
//! ```

mod config;
mod decoded;
pub mod diagnostics;
mod error;
pub mod format;
mod loader;
pub mod recording;
pub mod texture;

pub use tessera_astc as astc;
pub use tessera_common as common;
pub use tessera_dds as dds;
pub use tessera_png as png;

pub use config::{LoaderConfig, ReadMode};
pub use decoded::DecodedTexture;
pub use error::{Error, Result};
pub use loader::{LoadedTexture, TextureLoader};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::diagnostics::{Diagnostics, TracingDiagnostics};
    pub use crate::format::ContainerKind;
    pub use crate::recording::{RecordedTexture, RecordedUpload, RecordingBackend, TextureEvent};
    pub use crate::texture::{
        LevelUpload, MagFilter, MinFilter, TextureBackend, TextureTarget, UploadError,
        UploadFormat,
    };
    pub use crate::{DecodedTexture, LoadedTexture, LoaderConfig, ReadMode, TextureLoader};
    pub use tessera_common::{Extent, MipLevel};
}

