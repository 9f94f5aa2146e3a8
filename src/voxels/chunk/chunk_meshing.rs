//! Face-culling mesher.
//!
//! Every non-empty voxel emits one quad per face whose neighbouring voxel is empty or
//! transparent. Neighbouring voxels past the X/Z edge of the chunk are read from the
//! linked neighbour chunk; past the top or bottom, or across a missing link, they are
//! empty.

use std::collections::HashMap;

use super::{Chunk, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::rendering::mesh::{ChunkMesh, Face};
use crate::voxels::block::{
    block_type::BlockType, direction::Direction, exposes_face, is_transparent,
};
use crate::voxels::terrain::ChunkKey;

/// Resolves chunk keys to chunks during meshing.
pub trait ChunkLookup {
    /// The chunk registered under `key`, if any.
    fn chunk_by_key(&self, key: ChunkKey) -> Option<&Chunk>;
}

impl ChunkLookup for HashMap<ChunkKey, Chunk> {
    fn chunk_by_key(&self, key: ChunkKey) -> Option<&Chunk> {
        self.get(&key)
    }
}

impl Chunk {
    /// The block at chunk-local coordinates that may lie one step outside the chunk.
    fn neighboring_block(&self, x: i32, y: i32, z: i32, lookup: &impl ChunkLookup) -> BlockType {
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return BlockType::EMPTY;
        }

        let crossing = if x < 0 {
            Some(Direction::XNEG)
        } else if x >= CHUNK_WIDTH {
            Some(Direction::XPOS)
        } else if z < 0 {
            Some(Direction::ZNEG)
        } else if z >= CHUNK_DEPTH {
            Some(Direction::ZPOS)
        } else {
            None
        };

        match crossing {
            None => self.get_block_at(x, y, z).unwrap_or_default(),
            Some(direction) => self
                .neighbor(direction)
                .and_then(|key| lookup.chunk_by_key(key))
                .and_then(|chunk| {
                    chunk
                        .get_block_at(x.rem_euclid(CHUNK_WIDTH), y, z.rem_euclid(CHUNK_DEPTH))
                        .ok()
                })
                .unwrap_or_default(),
        }
    }

    /// Compiles the chunk's visible faces into an opaque and a translucent mesh.
    ///
    /// This is a full rebuild; nothing from a previous mesh is reused.
    ///
    /// # Arguments
    /// * `lookup` - Resolves this chunk's neighbour links
    pub fn build_mesh(&self, lookup: &impl ChunkLookup) -> ChunkMesh {
        let mut mesh = ChunkMesh::default();

        for z in 0..CHUNK_DEPTH {
            for y in 0..CHUNK_HEIGHT {
                for x in 0..CHUNK_WIDTH {
                    let block_type = self.get_block_at(x, y, z).unwrap_or_default();
                    if block_type.is_empty() {
                        continue;
                    }

                    let target = if is_transparent(block_type) {
                        &mut mesh.translucent
                    } else {
                        &mut mesh.opaque
                    };

                    for direction in Direction::all() {
                        let step = direction.offset();
                        let neighbor = self.neighboring_block(x + step.x, y + step.y, z + step.z, lookup);
                        if exposes_face(neighbor) {
                            target.push_face(&Face::new(x, y, z, block_type, direction));
                        }
                    }
                }
            }
        }

        mesh
    }
}
