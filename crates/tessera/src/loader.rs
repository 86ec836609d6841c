//! The texture loading pipeline.
//!
//! One call reads a file, classifies it, parses it with the matching
//! container parser and drives the texture target once per level. Failures
//! are reported through [`Diagnostics`] and drop only the asset at hand.

use std::fs::File;
use std::io::Read;
use std::ops::Deref;
use std::path::Path;

use memmap2::Mmap;
use tessera_common::{Extent, MipLevel};

use crate::config::{LoaderConfig, ReadMode};
use crate::decoded::DecodedTexture;
use crate::diagnostics::{Diagnostics, TracingDiagnostics};
use crate::format::ContainerKind;
use crate::texture::{
    LevelUpload, MinFilter, TextureBackend, TextureTarget, UploadError, UploadFormat,
};
use crate::{Error, Result};

/// A texture that received every level of its source.
#[derive(Debug)]
pub struct LoadedTexture<T> {
    pub texture: T,
    pub kind: ContainerKind,
    pub format: UploadFormat,
    pub extent: Extent,
    /// Levels uploaded from the source, level 0 first.
    pub levels: Vec<MipLevel>,
    /// The minification filter the texture was left with.
    pub min_filter: MinFilter,
    /// Whether the target was asked to build the remaining levels.
    pub mipmaps_generated: bool,
    /// Payload size claimed by the header, for containers that declare one.
    pub declared_size: Option<u64>,
}

/// Loads texture files into textures created by a [`TextureBackend`].
pub struct TextureLoader<B, D = TracingDiagnostics> {
    backend: B,
    diagnostics: D,
    config: LoaderConfig,
}

impl<B: TextureBackend> TextureLoader<B> {
    /// Create a loader that reports through `tracing`.
    pub fn new(backend: B) -> Self {
        Self::with_diagnostics(backend, TracingDiagnostics)
    }
}

impl<B: TextureBackend, D: Diagnostics> TextureLoader<B, D> {
    pub fn with_diagnostics(backend: B, diagnostics: D) -> Self {
        Self {
            backend,
            diagnostics,
            config: LoaderConfig::default(),
        }
    }

    pub fn with_config(mut self, config: LoaderConfig) -> Self {
        self.config = config;
        self
    }

    #[inline]
    pub fn config(&self) -> &LoaderConfig {
        &self.config
    }

    #[inline]
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Load a texture file.
    ///
    /// Returns `None` when the file cannot be read, is not a supported
    /// container, fails to parse or is refused by the texture target. The
    /// reason has already been reported through the diagnostics by then.
    pub fn load<P: AsRef<Path>>(&mut self, path: P) -> Option<LoadedTexture<B::Texture>> {
        self.try_load(path).ok()
    }

    /// Like [`load`](Self::load), but hands the error back as well.
    pub fn try_load<P: AsRef<Path>>(&mut self, path: P) -> Result<LoadedTexture<B::Texture>> {
        let path = path.as_ref();
        let source = path.display().to_string();

        let result = self.load_file(path, &source);
        if let Err(err) = &result {
            self.diagnostics.rejected(&source, err);
        }
        result
    }

    /// Load a texture from an in-memory file. `name` identifies it in reports.
    pub fn load_bytes(&mut self, name: &str, bytes: &[u8]) -> Option<LoadedTexture<B::Texture>> {
        self.try_load_bytes(name, bytes).ok()
    }

    /// Like [`load_bytes`](Self::load_bytes), but hands the error back as well.
    pub fn try_load_bytes(&mut self, name: &str, bytes: &[u8]) -> Result<LoadedTexture<B::Texture>> {
        let kind = ContainerKind::sniff(bytes);
        self.diagnostics.detected(name, kind, bytes.len());

        let result = self.load_classified(name, kind, bytes);
        if let Err(err) = &result {
            self.diagnostics.rejected(name, err);
        }
        result
    }

    fn load_file(&mut self, path: &Path, source: &str) -> Result<LoadedTexture<B::Texture>> {
        let mut file = File::open(path)?;
        let kind = ContainerKind::classify(&mut file)?;
        let buffer = SourceBuffer::read(file, self.config.read_mode)?;
        self.diagnostics.detected(source, kind, buffer.len());

        // The buffer is released once every level has been uploaded.
        self.load_classified(source, kind, &buffer)
    }

    fn load_classified(
        &mut self,
        source: &str,
        kind: ContainerKind,
        bytes: &[u8],
    ) -> Result<LoadedTexture<B::Texture>> {
        let decoded = DecodedTexture::parse(kind, bytes)?;
        let format = decoded.format();
        let extent = decoded.extent();
        let levels = decoded.levels();
        self.diagnostics.decoded(source, format, extent, levels.len());

        let mut texture = self.backend.create_texture();
        texture.bind();
        let uploaded = self.upload(source, &decoded, &levels, &mut texture);
        texture.unbind();
        let (min_filter, mipmaps_generated) = uploaded?;

        Ok(LoadedTexture {
            texture,
            kind,
            format,
            extent,
            levels,
            min_filter,
            mipmaps_generated,
            declared_size: decoded.declared_payload_size(),
        })
    }

    /// Set filters and push every level to the bound texture.
    fn upload(
        &self,
        source: &str,
        decoded: &DecodedTexture<'_>,
        levels: &[MipLevel],
        texture: &mut B::Texture,
    ) -> Result<(MinFilter, bool)> {
        let generate = decoded.kind() == ContainerKind::Png && self.config.generate_raster_mipmaps;

        let mut min_filter = self.config.default_min_filter;
        if min_filter.uses_mipmaps() && decoded.requires_linear_min_filter(generate) {
            min_filter = MinFilter::Linear;
        }
        texture.set_min_filter(min_filter);
        texture.set_mag_filter(self.config.default_mag_filter);

        let format = decoded.format();
        for level in levels {
            let data = decoded.level_data(level).ok_or_else(|| {
                Error::MalformedHeader(format!(
                    "level {} spans {:?}, past the {}-byte payload",
                    level.level,
                    level.range(),
                    decoded.data().len()
                ))
            })?;

            let upload = LevelUpload {
                level: level.level,
                format,
                width: level.width,
                height: level.height,
                data,
            };
            texture
                .upload(&upload)
                .map_err(|err| self.upload_failed(source, level.level, err))?;
            self.diagnostics.level_uploaded(source, level);
        }

        if generate {
            texture
                .generate_mipmaps()
                .map_err(|err| self.upload_failed(source, 0, err))?;
        }

        Ok((min_filter, generate))
    }

    fn upload_failed(&self, source: &str, level: u32, err: UploadError) -> Error {
        self.diagnostics.upload_failed(source, level, &err);
        Error::Upload(err)
    }
}

/// File contents, either owned or mapped.
enum SourceBuffer {
    Owned(Vec<u8>),
    Mapped(Mmap),
}

impl SourceBuffer {
    /// Read `file` from its current position, which must be the start.
    fn read(mut file: File, mode: ReadMode) -> std::io::Result<Self> {
        let len = file.metadata()?.len();

        if mode == ReadMode::Mapped && len > 0 {
            let mmap = unsafe { Mmap::map(&file)? };
            return Ok(Self::Mapped(mmap));
        }

        let mut data = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
        file.read_to_end(&mut data)?;
        Ok(Self::Owned(data))
    }
}

impl Deref for SourceBuffer {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        match self {
            Self::Owned(data) => data,
            Self::Mapped(mmap) => mmap,
        }
    }
}
