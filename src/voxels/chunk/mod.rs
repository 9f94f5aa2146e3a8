//! # Chunk Module
//!
//! This module provides the `Chunk` struct: a 16x256x16 column of voxels, its links to
//! the four chunks beside it, and the two meshes compiled from its visible faces.
//!
//! ## Storage
//!
//! Blocks live in one flat array indexed by `x + 16 * y + 16 * 256 * z`. Every block is
//! one byte, so a chunk holds 64 KiB of voxel data regardless of content.
//!
//! ## Neighbours
//!
//! A chunk never owns or points at the chunks beside it. It stores their registry keys,
//! and anything that needs a neighbour's voxels resolves the key through a
//! [`ChunkLookup`] (normally the terrain registry).

use super::block::{block_type::BlockType, direction::Direction};
use super::terrain::{key_of, ChunkKey};
use crate::error::{WorldError, WorldResult};
use crate::rendering::mesh::ChunkMesh;

mod chunk_meshing;

pub use chunk_meshing::ChunkLookup;

/// Width of a chunk along X, in blocks.
pub const CHUNK_WIDTH: i32 = 16;
/// Height of a chunk along Y, in blocks.
pub const CHUNK_HEIGHT: i32 = 256;
/// Depth of a chunk along Z, in blocks.
pub const CHUNK_DEPTH: i32 = 16;
/// The total number of blocks in a chunk.
pub const CHUNK_SIZE: usize = (CHUNK_WIDTH * CHUNK_HEIGHT * CHUNK_DEPTH) as usize;

/// A 16x256x16 column of voxels.
#[derive(Debug, Clone)]
pub struct Chunk {
    min_x: i32,
    min_z: i32,
    blocks: Box<[BlockType]>,
    /// Keys of linked neighbours, indexed by `Direction::lateral_index`.
    neighbors: [Option<ChunkKey>; 4],
    mesh: ChunkMesh,
    mesh_revision: u64,
}

impl Chunk {
    /// Creates a new, completely empty chunk.
    ///
    /// # Arguments
    /// * `min_x`, `min_z` - World coordinates of the chunk's lowest corner, multiples of 16
    pub fn new(min_x: i32, min_z: i32) -> Self {
        debug_assert!(min_x.rem_euclid(CHUNK_WIDTH) == 0 && min_z.rem_euclid(CHUNK_DEPTH) == 0);
        Chunk {
            min_x,
            min_z,
            blocks: vec![BlockType::EMPTY; CHUNK_SIZE].into_boxed_slice(),
            neighbors: [None; 4],
            mesh: ChunkMesh::default(),
            mesh_revision: 0,
        }
    }

    /// World X of the chunk's lowest corner.
    pub fn min_x(&self) -> i32 {
        self.min_x
    }

    /// World Z of the chunk's lowest corner.
    pub fn min_z(&self) -> i32 {
        self.min_z
    }

    /// This chunk's key in the terrain registry.
    pub fn key(&self) -> ChunkKey {
        key_of(self.min_x, self.min_z)
    }

    /// Whether chunk-local coordinates fall inside the chunk.
    #[inline]
    pub fn contains_local(x: i32, y: i32, z: i32) -> bool {
        (0..CHUNK_WIDTH).contains(&x) && (0..CHUNK_HEIGHT).contains(&y) && (0..CHUNK_DEPTH).contains(&z)
    }

    #[inline]
    fn index_of(x: i32, y: i32, z: i32) -> WorldResult<usize> {
        if !Chunk::contains_local(x, y, z) {
            return Err(WorldError::ChunkBoundsViolation { x, y, z });
        }
        Ok((x + CHUNK_WIDTH * y + CHUNK_WIDTH * CHUNK_HEIGHT * z) as usize)
    }

    /// Gets the block at chunk-local coordinates.
    ///
    /// # Errors
    /// Returns [`WorldError::ChunkBoundsViolation`] outside 16x256x16.
    pub fn get_block_at(&self, x: i32, y: i32, z: i32) -> WorldResult<BlockType> {
        Ok(self.blocks[Chunk::index_of(x, y, z)?])
    }

    /// Overwrites the block at chunk-local coordinates.
    ///
    /// Does not touch the mesh; the owner decides when to rebuild it.
    ///
    /// # Errors
    /// Returns [`WorldError::ChunkBoundsViolation`] outside 16x256x16.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> WorldResult<()> {
        let index = Chunk::index_of(x, y, z)?;
        self.blocks[index] = block_type;
        Ok(())
    }

    /// Links this chunk and `neighbor` to each other across the `direction` side of this
    /// chunk. Does nothing if `neighbor` is `None` or `direction` is vertical.
    pub fn link_neighbor(&mut self, neighbor: Option<&mut Chunk>, direction: Direction) {
        let (Some(neighbor), Some(side), Some(opposite_side)) = (
            neighbor,
            direction.lateral_index(),
            direction.opposite().lateral_index(),
        ) else {
            return;
        };
        self.neighbors[side] = Some(neighbor.key());
        neighbor.neighbors[opposite_side] = Some(self.key());
    }

    /// Key of the chunk linked on the `direction` side, if any.
    pub fn neighbor(&self, direction: Direction) -> Option<ChunkKey> {
        direction
            .lateral_index()
            .and_then(|side| self.neighbors[side])
    }

    /// The meshes from the most recent rebuild.
    pub fn mesh(&self) -> &ChunkMesh {
        &self.mesh
    }

    /// Replaces the chunk's meshes.
    pub fn set_mesh(&mut self, mesh: ChunkMesh) {
        self.mesh = mesh;
        self.mesh_revision += 1;
    }

    /// How many times the meshes have been replaced.
    pub fn mesh_revision(&self) -> u64 {
        self.mesh_revision
    }

    /// Raw voxel data in storage order.
    pub fn blocks(&self) -> &[BlockType] {
        &self.blocks
    }
}
