//! Spatial keys for the chunk registry.
//!
//! A key packs a chunk origin's X into the high 32 bits and its Z into the low 32 bits
//! of an `i64`. Each half is reinterpreted on the way out, so negative coordinates
//! survive the round trip.

use crate::voxels::chunk::{CHUNK_DEPTH, CHUNK_WIDTH};

/// Registry key of a chunk or terrain zone.
pub type ChunkKey = i64;

/// Side length of a terrain zone, in blocks.
pub const ZONE_SIZE: i32 = 64;

/// Packs `(x, z)` into a key.
#[inline]
pub fn key_of(x: i32, z: i32) -> ChunkKey {
    ((x as i64) << 32) | (z as u32 as i64)
}

/// Unpacks a key produced by [`key_of`].
#[inline]
pub fn coords_of(key: ChunkKey) -> (i32, i32) {
    ((key >> 32) as i32, key as i32)
}

/// Origin (lowest corner) of the chunk column containing world X/Z `(x, z)`.
#[inline]
pub fn chunk_origin(x: i32, z: i32) -> (i32, i32) {
    (
        x.div_euclid(CHUNK_WIDTH) * CHUNK_WIDTH,
        z.div_euclid(CHUNK_DEPTH) * CHUNK_DEPTH,
    )
}

/// Origin of the terrain zone containing world X/Z `(x, z)`.
#[inline]
pub fn zone_origin(x: i32, z: i32) -> (i32, i32) {
    (
        x.div_euclid(ZONE_SIZE) * ZONE_SIZE,
        z.div_euclid(ZONE_SIZE) * ZONE_SIZE,
    )
}
