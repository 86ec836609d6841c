//! ASTC block footprints.

/// The 2D block footprints an ASTC texture may use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AstcFormat {
    Astc4x4,
    Astc5x4,
    Astc5x5,
    Astc6x5,
    Astc6x6,
    Astc8x5,
    Astc8x6,
    Astc8x8,
    Astc10x5,
    Astc10x6,
    Astc10x8,
    Astc10x10,
    Astc12x10,
    Astc12x12,
}

/// Footprint table, keyed by block dimensions (x, y).
const FOOTPRINTS: [(AstcFormat, u8, u8); 14] = [
    (AstcFormat::Astc4x4, 4, 4),
    (AstcFormat::Astc5x4, 5, 4),
    (AstcFormat::Astc5x5, 5, 5),
    (AstcFormat::Astc6x5, 6, 5),
    (AstcFormat::Astc6x6, 6, 6),
    (AstcFormat::Astc8x5, 8, 5),
    (AstcFormat::Astc8x6, 8, 6),
    (AstcFormat::Astc8x8, 8, 8),
    (AstcFormat::Astc10x5, 10, 5),
    (AstcFormat::Astc10x6, 10, 6),
    (AstcFormat::Astc10x8, 10, 8),
    (AstcFormat::Astc10x10, 10, 10),
    (AstcFormat::Astc12x10, 12, 10),
    (AstcFormat::Astc12x12, 12, 12),
];

impl AstcFormat {
    /// All supported footprints, smallest first.
    pub const ALL: [AstcFormat; 14] = {
        let mut all = [AstcFormat::Astc4x4; 14];
        let mut i = 0;
        while i < FOOTPRINTS.len() {
            all[i] = FOOTPRINTS[i].0;
            i += 1;
        }
        all
    };

    /// Look up the footprint for a block size. The z dimension is not part
    /// of the key; only 2D footprints are mapped.
    pub fn from_block_dims(x: u8, y: u8) -> Option<Self> {
        FOOTPRINTS
            .iter()
            .find(|&&(_, fx, fy)| fx == x && fy == y)
            .map(|&(format, _, _)| format)
    }

    /// Block dimensions (x, y) in texels.
    pub fn block_dims(self) -> (u8, u8) {
        FOOTPRINTS
            .iter()
            .find(|&&(format, _, _)| format == self)
            .map(|&(_, x, y)| (x, y))
            .unwrap_or((4, 4))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_footprint_lookup() {
        assert_eq!(AstcFormat::from_block_dims(4, 4), Some(AstcFormat::Astc4x4));
        assert_eq!(AstcFormat::from_block_dims(12, 10), Some(AstcFormat::Astc12x10));
        assert_eq!(AstcFormat::from_block_dims(10, 12), None);
        assert_eq!(AstcFormat::from_block_dims(3, 3), None);
        assert_eq!(AstcFormat::from_block_dims(0, 0), None);
    }

    #[test]
    fn test_block_dims_match_table() {
        for format in AstcFormat::ALL {
            let (x, y) = format.block_dims();
            assert_eq!(AstcFormat::from_block_dims(x, y), Some(format));
        }
    }
}
