//! Load diagnostics.
//!
//! The parsers never log; the loader reports every outcome through a
//! [`Diagnostics`] implementation instead. [`TracingDiagnostics`] forwards to
//! `tracing`, which is what applications normally want.

use tessera_common::{Extent, MipLevel};

use crate::format::ContainerKind;
use crate::texture::{UploadError, UploadFormat};
use crate::Error;

/// Receives progress and failure reports from the loader.
///
/// All methods default to doing nothing.
pub trait Diagnostics {
    /// A source was read and classified.
    fn detected(&self, _source: &str, _kind: ContainerKind, _bytes: usize) {}

    /// A container parsed successfully.
    fn decoded(&self, _source: &str, _format: UploadFormat, _extent: Extent, _levels: usize) {}

    /// One level reached the texture target.
    fn level_uploaded(&self, _source: &str, _level: &MipLevel) {}

    /// The texture target refused a level. The asset is dropped afterwards.
    fn upload_failed(&self, _source: &str, _level: u32, _error: &UploadError) {}

    /// The asset was dropped.
    fn rejected(&self, _source: &str, _error: &Error) {}
}

/// Reports through `tracing` events.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingDiagnostics;

impl Diagnostics for TracingDiagnostics {
    fn detected(&self, source: &str, kind: ContainerKind, bytes: usize) {
        tracing::info!(source, %kind, bytes, "detected texture container");
    }

    fn decoded(&self, source: &str, format: UploadFormat, extent: Extent, levels: usize) {
        tracing::debug!(
            source,
            %format,
            width = extent.width,
            height = extent.height,
            depth = extent.depth,
            levels,
            "decoded texture"
        );
    }

    fn level_uploaded(&self, source: &str, level: &MipLevel) {
        tracing::debug!(
            source,
            level = level.level,
            width = level.width,
            height = level.height,
            offset = level.offset,
            size = level.size,
            "uploaded level"
        );
    }

    fn upload_failed(&self, source: &str, level: u32, error: &UploadError) {
        tracing::error!(source, level, %error, "texture upload failed");
    }

    fn rejected(&self, source: &str, error: &Error) {
        tracing::warn!(source, %error, "skipping texture");
    }
}

impl<D: Diagnostics + ?Sized> Diagnostics for &D {
    fn detected(&self, source: &str, kind: ContainerKind, bytes: usize) {
        (**self).detected(source, kind, bytes);
    }

    fn decoded(&self, source: &str, format: UploadFormat, extent: Extent, levels: usize) {
        (**self).decoded(source, format, extent, levels);
    }

    fn level_uploaded(&self, source: &str, level: &MipLevel) {
        (**self).level_uploaded(source, level);
    }

    fn upload_failed(&self, source: &str, level: u32, error: &UploadError) {
        (**self).upload_failed(source, level, error);
    }

    fn rejected(&self, source: &str, error: &Error) {
        (**self).rejected(source, error);
    }
}
