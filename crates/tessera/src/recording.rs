//! A texture backend that records calls instead of reaching a GPU.
//!
//! Used by the command-line tool to inspect files without a graphics context,
//! and by tests to observe exactly what the loader sends.

use crate::texture::{
    LevelUpload, MagFilter, MinFilter, TextureBackend, TextureTarget, UploadError, UploadFormat,
};

/// One call on a [`RecordedTexture`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureEvent {
    Bind,
    Unbind,
    MinFilter(MinFilter),
    MagFilter(MagFilter),
    Upload { level: u32, format: UploadFormat },
    GenerateMipmaps,
}

/// A copy of one uploaded level.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedUpload {
    pub level: u32,
    pub format: UploadFormat,
    pub width: u32,
    pub height: u32,
    pub data: Vec<u8>,
}

#[derive(Debug, Default)]
pub struct RecordedTexture {
    id: u32,
    bound: bool,
    min_filter: Option<MinFilter>,
    mag_filter: Option<MagFilter>,
    mipmaps_generated: bool,
    uploads: Vec<RecordedUpload>,
    events: Vec<TextureEvent>,
    fail_at_level: Option<u32>,
}

impl RecordedTexture {
    /// Creation order within the backend, starting at 1.
    #[inline]
    pub fn id(&self) -> u32 {
        self.id
    }

    #[inline]
    pub fn is_bound(&self) -> bool {
        self.bound
    }

    #[inline]
    pub fn min_filter(&self) -> Option<MinFilter> {
        self.min_filter
    }

    #[inline]
    pub fn mag_filter(&self) -> Option<MagFilter> {
        self.mag_filter
    }

    #[inline]
    pub fn mipmaps_generated(&self) -> bool {
        self.mipmaps_generated
    }

    pub fn uploads(&self) -> &[RecordedUpload] {
        &self.uploads
    }

    pub fn events(&self) -> &[TextureEvent] {
        &self.events
    }
}

impl TextureTarget for RecordedTexture {
    fn bind(&mut self) {
        self.bound = true;
        self.events.push(TextureEvent::Bind);
    }

    fn unbind(&mut self) {
        self.bound = false;
        self.events.push(TextureEvent::Unbind);
    }

    fn set_min_filter(&mut self, filter: MinFilter) {
        self.min_filter = Some(filter);
        self.events.push(TextureEvent::MinFilter(filter));
    }

    fn set_mag_filter(&mut self, filter: MagFilter) {
        self.mag_filter = Some(filter);
        self.events.push(TextureEvent::MagFilter(filter));
    }

    fn upload(&mut self, upload: &LevelUpload<'_>) -> Result<(), UploadError> {
        if !self.bound {
            return Err(UploadError::new("texture is not bound"));
        }
        if self.fail_at_level == Some(upload.level) {
            return Err(UploadError::new(format!("level {} rejected", upload.level)));
        }

        self.events.push(TextureEvent::Upload {
            level: upload.level,
            format: upload.format,
        });
        self.uploads.push(RecordedUpload {
            level: upload.level,
            format: upload.format,
            width: upload.width,
            height: upload.height,
            data: upload.data.to_vec(),
        });
        Ok(())
    }

    fn generate_mipmaps(&mut self) -> Result<(), UploadError> {
        if self.uploads.is_empty() {
            return Err(UploadError::new("no base level to build mipmaps from"));
        }
        self.mipmaps_generated = true;
        self.events.push(TextureEvent::GenerateMipmaps);
        Ok(())
    }
}

/// Creates [`RecordedTexture`]s.
#[derive(Debug, Default)]
pub struct RecordingBackend {
    created: u32,
    fail_at_level: Option<u32>,
}

impl RecordingBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every texture refuse uploads of `level`.
    pub fn failing_at(level: u32) -> Self {
        Self {
            created: 0,
            fail_at_level: Some(level),
        }
    }

    /// Number of textures created so far.
    #[inline]
    pub fn created(&self) -> u32 {
        self.created
    }
}

impl TextureBackend for RecordingBackend {
    type Texture = RecordedTexture;

    fn create_texture(&mut self) -> RecordedTexture {
        self.created += 1;
        RecordedTexture {
            id: self.created,
            fail_at_level: self.fail_at_level,
            ..RecordedTexture::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_upload_requires_bind() {
        let mut texture = RecordingBackend::new().create_texture();
        let upload = LevelUpload {
            level: 0,
            format: UploadFormat::Rgba,
            width: 1,
            height: 1,
            data: &[1, 2, 3, 4],
        };

        assert!(texture.upload(&upload).is_err());
        texture.bind();
        texture.upload(&upload).unwrap();
        texture.unbind();

        assert_eq!(texture.uploads()[0].data, vec![1, 2, 3, 4]);
        assert_eq!(
            texture.events(),
            &[
                TextureEvent::Bind,
                TextureEvent::Upload {
                    level: 0,
                    format: UploadFormat::Rgba
                },
                TextureEvent::Unbind,
            ]
        );
    }

    #[test]
    fn test_backend_counts_and_fails() {
        let mut backend = RecordingBackend::failing_at(1);
        let first = backend.create_texture();
        let mut second = backend.create_texture();
        assert_eq!((first.id(), second.id(), backend.created()), (1, 2, 2));

        second.bind();
        let upload = LevelUpload {
            level: 1,
            format: UploadFormat::Dxt1,
            width: 2,
            height: 2,
            data: &[0; 8],
        };
        assert!(second.upload(&upload).is_err());
        assert!(second.generate_mipmaps().is_err());
    }
}
