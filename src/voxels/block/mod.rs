//! # Block Module
//!
//! Block type definitions, face directions, and the static render attribute tables
//! (colour, texture-atlas cell, transparency, animation) every block type maps to.
//!
//! The tables are compile-time perfect-hash maps keyed by the block's storage byte. They
//! are never mutated, so they are shared freely without synchronisation. A block type
//! missing from a table is not an error: it renders magenta with the `OTHER` texture so
//! authoring mistakes are visible in game.

use phf::{phf_map, phf_set};

use block_type::BlockType;
use direction::Direction;

pub mod block_type;
pub mod direction;

/// The underlying integer type used to represent block types in memory.
pub type BlockTypeSize = u8;

/// Side length of one texture-atlas cell in UV space (the atlas is 16x16 cells).
pub const ATLAS_CELL_SIZE: f32 = 1.0 / 16.0;

/// Colour used for block types with no colour entry.
pub const MISSING_COLOR: [f32; 4] = [1.0, 0.0, 1.0, 1.0];

/// RGBA colour per block type.
static BLOCK_TYPE_TO_COLOR: phf::Map<u8, [f32; 4]> = phf_map! {
    1u8 => [95.0 / 255.0, 159.0 / 255.0, 53.0 / 255.0, 1.0], // GRASS
    2u8 => [121.0 / 255.0, 85.0 / 255.0, 58.0 / 255.0, 1.0], // DIRT
    3u8 => [0.5, 0.5, 0.5, 1.0],                             // STONE
    4u8 => [0.0, 0.0, 0.75, 0.5],                            // WATER
    5u8 => [1.0, 0.0, 0.0, 1.0],                             // LAVA
    6u8 => [1.0, 1.0, 1.0, 1.0],                             // SNOW
    7u8 => [0.0, 0.0, 0.0, 1.0],                             // BEDROCK
    8u8 => [1.0, 1.0, 0.0, 1.0],                             // SAND
    9u8 => [0.0, 0.0, 1.0, 0.5],                             // ICE
};

/// Texture-atlas cell (column, row) per block type.
///
/// The inner array is indexed by `Direction as usize`:
/// [XPOS, XNEG, YPOS, YNEG, ZPOS, ZNEG]
static BLOCK_TYPE_TO_ATLAS_CELLS: phf::Map<u8, [[u8; 2]; 6]> = phf_map! {
    1u8 => [[3, 15], [3, 15], [8, 13], [2, 15], [3, 15], [3, 15]],       // GRASS
    2u8 => [[2, 15]; 6],                                                 // DIRT
    3u8 => [[1, 15]; 6],                                                 // STONE
    4u8 => [[13, 3]; 6],                                                 // WATER
    5u8 => [[13, 1]; 6],                                                 // LAVA
    6u8 => [[2, 11]; 6],                                                 // SNOW
    7u8 => [[1, 14]; 6],                                                 // BEDROCK
    8u8 => [[0, 4]; 6],                                                  // SAND
    9u8 => [[3, 11]; 6],                                                 // ICE
    10u8 => [[7, 1]; 6],                                                 // OTHER
};

/// Block types that let the faces behind them show through.
static TRANSPARENT_BLOCK_TYPES: phf::Set<u8> = phf_set! {
    4u8, // WATER
    9u8, // ICE
};

/// Block types whose texture scrolls in the shader.
static ANIMATED_BLOCK_TYPES: phf::Set<u8> = phf_set! {
    4u8, // WATER
    5u8, // LAVA
};

/// Where a face samples the texture atlas.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct AtlasCell {
    /// Left edge of the cell in UV space
    pub u: f32,
    /// Top edge of the cell in UV space
    pub v: f32,
    /// Whether the shader should animate this face
    pub animated: bool,
}

/// Returns the RGBA colour of a block type, or magenta if it has none.
pub fn block_color(block_type: BlockType) -> [f32; 4] {
    BLOCK_TYPE_TO_COLOR
        .get(&block_type.as_int())
        .copied()
        .unwrap_or(MISSING_COLOR)
}

/// Returns the atlas cell a block type's face uses.
///
/// # Arguments
/// * `block_type` - The block being meshed
/// * `direction` - Which face of the block
///
/// # Returns
/// The block's own cell, or the `OTHER` cell (never animated) if the block type has
/// no atlas entry.
pub fn block_atlas_cell(block_type: BlockType, direction: Direction) -> AtlasCell {
    match BLOCK_TYPE_TO_ATLAS_CELLS.get(&block_type.as_int()) {
        Some(cells) => atlas_cell(cells[direction as usize], is_animated(block_type)),
        None => atlas_cell([7, 1], false),
    }
}

fn atlas_cell(cell: [u8; 2], animated: bool) -> AtlasCell {
    AtlasCell {
        u: cell[0] as f32 * ATLAS_CELL_SIZE,
        v: cell[1] as f32 * ATLAS_CELL_SIZE,
        animated,
    }
}

/// Whether faces behind this block stay visible (water and ice).
pub fn is_transparent(block_type: BlockType) -> bool {
    TRANSPARENT_BLOCK_TYPES.contains(&block_type.as_int())
}

/// Whether this block's texture is animated (water and lava).
pub fn is_animated(block_type: BlockType) -> bool {
    ANIMATED_BLOCK_TYPES.contains(&block_type.as_int())
}

/// Whether the player swims through this block instead of colliding with it.
pub fn is_liquid(block_type: BlockType) -> bool {
    matches!(block_type, BlockType::WATER | BlockType::LAVA)
}

/// Whether a face bordering `neighbor` is visible.
#[inline]
pub fn exposes_face(neighbor: BlockType) -> bool {
    neighbor.is_empty() || is_transparent(neighbor)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn grass_uses_distinct_top_and_bottom_cells() {
        let side = block_atlas_cell(BlockType::GRASS, Direction::XPOS);
        let top = block_atlas_cell(BlockType::GRASS, Direction::YPOS);
        let bottom = block_atlas_cell(BlockType::GRASS, Direction::YNEG);
        assert_eq!((side.u, side.v), (3.0 / 16.0, 15.0 / 16.0));
        assert_eq!((top.u, top.v), (8.0 / 16.0, 13.0 / 16.0));
        assert_eq!((bottom.u, bottom.v), (2.0 / 16.0, 15.0 / 16.0));
        assert_eq!(block_atlas_cell(BlockType::GRASS, Direction::ZNEG), side);
    }

    #[test]
    fn animation_follows_block_type() {
        assert!(block_atlas_cell(BlockType::WATER, Direction::YPOS).animated);
        assert!(block_atlas_cell(BlockType::LAVA, Direction::XNEG).animated);
        assert!(!block_atlas_cell(BlockType::ICE, Direction::YPOS).animated);
    }

    #[test]
    fn missing_entries_fall_back() {
        assert_eq!(block_color(BlockType::OTHER), MISSING_COLOR);
        assert_eq!(block_color(BlockType::EMPTY), MISSING_COLOR);

        let fallback = block_atlas_cell(BlockType::EMPTY, Direction::ZPOS);
        assert_eq!((fallback.u, fallback.v), (7.0 / 16.0, 1.0 / 16.0));
        assert!(!fallback.animated);
    }

    #[test]
    fn classification_sets() {
        assert!(is_transparent(BlockType::WATER));
        assert!(is_transparent(BlockType::ICE));
        assert!(!is_transparent(BlockType::LAVA));
        assert!(is_liquid(BlockType::LAVA));
        assert!(!is_liquid(BlockType::ICE));
        assert!(exposes_face(BlockType::EMPTY));
        assert!(exposes_face(BlockType::WATER));
        assert!(!exposes_face(BlockType::STONE));
    }

    #[test]
    fn colors_are_registered() {
        assert_eq!(block_color(BlockType::STONE), [0.5, 0.5, 0.5, 1.0]);
        assert_eq!(block_color(BlockType::WATER)[3], 0.5);
    }
}
