//! Texture geometry shared by every container kind.

/// Texture dimensions in texels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Extent {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

impl Extent {
    /// Create a 2D extent (depth 1).
    #[inline]
    pub const fn new_2d(width: u32, height: u32) -> Self {
        Self { width, height, depth: 1 }
    }

    /// Create a 3D extent.
    #[inline]
    pub const fn new_3d(width: u32, height: u32, depth: u32) -> Self {
        Self { width, height, depth }
    }

    /// Check whether any axis is zero.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0 || self.depth == 0
    }

    /// The extent of the next mip level: each axis halved, floored at 1.
    #[inline]
    pub const fn next_mip(&self) -> Self {
        Self {
            width: half_floor_one(self.width),
            height: half_floor_one(self.height),
            depth: half_floor_one(self.depth),
        }
    }
}

#[inline]
const fn half_floor_one(value: u32) -> u32 {
    let half = value >> 1;
    if half < 1 {
        1
    } else {
        half
    }
}

/// One level of a mip chain, located inside a container's data span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MipLevel {
    /// Level index, 0 is full resolution.
    pub level: u32,
    pub width: u32,
    pub height: u32,
    /// Byte offset from the start of the data span.
    pub offset: usize,
    /// Byte length of this level.
    pub size: usize,
}

impl MipLevel {
    /// Byte range of this level within the data span.
    #[inline]
    pub fn range(&self) -> std::ops::Range<usize> {
        self.offset..self.offset + self.size
    }
}
