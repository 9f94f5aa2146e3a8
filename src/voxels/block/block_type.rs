//! # Block Type Module
//!
//! This module defines the different types of blocks in the voxel world
//! and the conversion from their compact integer storage form.

use num_derive::FromPrimitive;

use super::BlockTypeSize;

/// Enumerates all possible block types in the voxel world.
///
/// Each variant is stored in a single byte. The `FromPrimitive` derive allows
/// conversion back from that byte.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, FromPrimitive)]
pub enum BlockType {
    /// Nothing. Never meshed, never collided with.
    #[default]
    EMPTY = 0,

    /// Grass, with distinct top, bottom and side textures.
    GRASS = 1,

    /// Plain dirt, found under grass.
    DIRT = 2,

    /// Stone, the bulk of every column.
    STONE = 3,

    /// Water. Transparent, animated and liquid.
    WATER = 4,

    /// Lava. Animated and liquid, but opaque.
    LAVA = 5,

    /// Snow caps on high or cold terrain.
    SNOW = 6,

    /// The indestructible bottom layer at `y == 0`.
    BEDROCK = 7,

    /// Sand in the dry biome.
    SAND = 8,

    /// Ice. Transparent.
    ICE = 9,

    /// Placeholder type with an atlas cell but no colour entry.
    OTHER = 10,
}

impl BlockType {
    /// Converts a `BlockTypeSize` to a `BlockType`.
    ///
    /// # Arguments
    /// * `btype` - The block type as a `BlockTypeSize`
    ///
    /// # Returns
    /// The corresponding `BlockType`, or `None` if the value names no block.
    pub fn from_block_type_int(btype: BlockTypeSize) -> Option<Self> {
        num_traits::FromPrimitive::from_u8(btype)
    }

    /// The compact storage form of this block type.
    #[inline]
    pub fn as_int(self) -> BlockTypeSize {
        self as BlockTypeSize
    }

    /// Whether this is the empty block.
    #[inline]
    pub fn is_empty(self) -> bool {
        self == BlockType::EMPTY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn converts_from_storage_form() {
        for value in 0..=10u8 {
            let block = BlockType::from_block_type_int(value).unwrap();
            assert_eq!(block.as_int(), value);
        }
        assert_eq!(BlockType::from_block_type_int(11), None);
        assert_eq!(BlockType::from_block_type_int(255), None);
    }

    #[test]
    fn default_is_empty() {
        assert!(BlockType::default().is_empty());
        assert!(!BlockType::STONE.is_empty());
    }
}
