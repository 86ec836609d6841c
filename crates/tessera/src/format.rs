//! Container format detection.

use std::fmt;
use std::io::{self, Read, Seek, SeekFrom};

use tessera_astc::AstcImage;
use tessera_dds::DdsImage;
use tessera_png::PngImage;

/// Longest signature any supported container uses.
pub const SNIFF_LEN: usize = 8;

/// The container kinds the loader understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerKind {
    /// ASTC block-compressed texture.
    Astc,
    /// DirectDraw Surface with DXT blocks.
    Dds,
    /// PNG raster image.
    Png,
    /// No known signature.
    Unknown,
}

impl ContainerKind {
    /// Classify a buffer by its leading bytes.
    ///
    /// The signatures are disjoint, so at most one can match.
    pub fn sniff(prefix: &[u8]) -> Self {
        if AstcImage::is_astc(prefix) {
            Self::Astc
        } else if DdsImage::is_dds(prefix) {
            Self::Dds
        } else if PngImage::is_png(prefix) {
            Self::Png
        } else {
            Self::Unknown
        }
    }

    /// Classify a stream by its first bytes.
    ///
    /// Reads from the start of the stream and rewinds to the start before
    /// returning, so the caller sees the stream positioned at offset 0
    /// either way. Streams shorter than a signature classify as
    /// [`Unknown`](Self::Unknown).
    pub fn classify<R: Read + Seek>(stream: &mut R) -> io::Result<Self> {
        stream.seek(SeekFrom::Start(0))?;

        let mut prefix = Vec::with_capacity(SNIFF_LEN);
        stream.by_ref().take(SNIFF_LEN as u64).read_to_end(&mut prefix)?;

        stream.seek(SeekFrom::Start(0))?;
        Ok(Self::sniff(&prefix))
    }

    /// Short lowercase name.
    pub fn name(self) -> &'static str {
        match self {
            Self::Astc => "astc",
            Self::Dds => "dds",
            Self::Png => "png",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for ContainerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_sniff() {
        assert_eq!(ContainerKind::sniff(&[0x13, 0xAB, 0xA1, 0x5C, 4, 4]), ContainerKind::Astc);
        assert_eq!(ContainerKind::sniff(b"DDS \x7c\0\0\0"), ContainerKind::Dds);
        assert_eq!(ContainerKind::sniff(b"\x89PNG\r\n\x1a\n"), ContainerKind::Png);
        assert_eq!(ContainerKind::sniff(b"GIF89a.."), ContainerKind::Unknown);
        assert_eq!(ContainerKind::sniff(b"\x89PNG"), ContainerKind::Unknown);
        assert_eq!(ContainerKind::sniff(b""), ContainerKind::Unknown);
    }

    #[test]
    fn test_classify_rewinds() {
        let mut stream = Cursor::new(b"DDS \x7c\0\0\0 more header".to_vec());
        stream.set_position(9);

        assert_eq!(ContainerKind::classify(&mut stream).unwrap(), ContainerKind::Dds);
        assert_eq!(stream.position(), 0);
    }

    #[test]
    fn test_classify_short_stream() {
        let mut stream = Cursor::new(vec![0x13, 0xAB]);
        assert_eq!(ContainerKind::classify(&mut stream).unwrap(), ContainerKind::Unknown);
        assert_eq!(stream.position(), 0);
    }

    struct Unreadable;

    impl Read for Unreadable {
        fn read(&mut self, _: &mut [u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "closed"))
        }
    }

    impl Seek for Unreadable {
        fn seek(&mut self, _: SeekFrom) -> io::Result<u64> {
            Ok(0)
        }
    }

    #[test]
    fn test_classify_unreadable_stream() {
        assert!(ContainerKind::classify(&mut Unreadable).is_err());
    }
}
