//! # Terrain Module
//!
//! This module provides the `Terrain` struct, the sparse registry that owns every chunk
//! in the world.
//!
//! ## Architecture
//!
//! Chunks live in a hash map keyed by their packed origin (see [`key_of`]). Alongside
//! it the terrain tracks which 64x64 terrain zones have been procedurally generated and
//! whether each chunk's mesh is up to date. Nothing is ever unloaded.
//!
//! World-space coordinates are floor-divided onto chunks, so `x = -1` lives in the
//! chunk whose origin is `-16`.
//!
//! ## Lazy work
//!
//! - [`Terrain::check_for_new_chunks`] keeps the 3x3 chunks around the player loaded and
//!   meshed.
//! - [`Terrain::generate_zone`] fills whole terrain zones with procedural terrain.
//! - [`Terrain::draw`] rebuilds stale meshes right before issuing their draw calls.

use std::collections::{hash_map::Entry, HashMap, HashSet};

use cgmath::{Point3, Vector3};
use log::{debug, trace};

use super::block::{block_type::BlockType, direction::Direction};
use super::chunk::{Chunk, ChunkLookup, CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};
use crate::error::{WorldError, WorldResult};
use crate::rendering::ChunkDrawer;

mod chunk_key;
pub mod generation;

pub use chunk_key::{chunk_origin, coords_of, key_of, zone_origin, ChunkKey, ZONE_SIZE};

/// Sparse, unbounded registry of chunks.
#[derive(Debug, Default)]
pub struct Terrain {
    /// Every loaded chunk, keyed by its origin.
    chunks: HashMap<ChunkKey, Chunk>,
    /// Origins of terrain zones that have been generated.
    generated_zones: HashSet<ChunkKey>,
    /// Whether each chunk's mesh reflects its current voxels.
    mesh_built: HashMap<ChunkKey, bool>,
}

impl ChunkLookup for Terrain {
    fn chunk_by_key(&self, key: ChunkKey) -> Option<&Chunk> {
        self.chunks.get(&key)
    }
}

impl Terrain {
    /// Creates a new terrain with no chunks.
    pub fn new() -> Self {
        Terrain::default()
    }

    /// Number of loaded chunks.
    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    /// Iterates over every loaded chunk in no particular order.
    pub fn chunks(&self) -> impl Iterator<Item = &Chunk> {
        self.chunks.values()
    }

    /// Whether a chunk exists for the column containing world `(x, z)`.
    pub fn has_chunk_at(&self, x: i32, z: i32) -> bool {
        let (min_x, min_z) = chunk_origin(x, z);
        self.chunks.contains_key(&key_of(min_x, min_z))
    }

    /// Whether the terrain zone containing world `(x, z)` has been generated.
    pub fn has_terrain_zone_at(&self, x: i32, z: i32) -> bool {
        let (zone_x, zone_z) = zone_origin(x, z);
        self.generated_zones.contains(&key_of(zone_x, zone_z))
    }

    /// The chunk containing world `(x, z)`, if loaded.
    pub fn chunk_at(&self, x: i32, z: i32) -> Option<&Chunk> {
        let (min_x, min_z) = chunk_origin(x, z);
        self.chunks.get(&key_of(min_x, min_z))
    }

    /// Mutable access to the chunk containing world `(x, z)`, if loaded.
    pub fn chunk_at_mut(&mut self, x: i32, z: i32) -> Option<&mut Chunk> {
        let (min_x, min_z) = chunk_origin(x, z);
        self.chunks.get_mut(&key_of(min_x, min_z))
    }

    /// Creates an empty chunk for the column containing world `(x, z)`.
    ///
    /// The new chunk is linked both ways to whichever of its four lateral neighbours
    /// exist, and its mesh is marked as not built. An existing chunk at the same origin
    /// is replaced.
    ///
    /// # Returns
    /// The freshly inserted chunk.
    pub fn instantiate_chunk_at(&mut self, x: i32, z: i32) -> &mut Chunk {
        let (min_x, min_z) = chunk_origin(x, z);
        let mut chunk = Chunk::new(min_x, min_z);

        for direction in Direction::lateral() {
            let step = direction.offset();
            let neighbor_key = key_of(min_x + step.x * CHUNK_WIDTH, min_z + step.z * CHUNK_DEPTH);
            chunk.link_neighbor(self.chunks.get_mut(&neighbor_key), direction);
        }

        let key = chunk.key();
        self.mesh_built.insert(key, false);
        debug!("Instantiated chunk at ( {}, {} )", min_x, min_z);

        match self.chunks.entry(key) {
            Entry::Occupied(mut slot) => {
                slot.insert(chunk);
                slot.into_mut()
            }
            Entry::Vacant(slot) => slot.insert(chunk),
        }
    }

    /// Returns the chunk containing world `(x, z)`, instantiating it if missing.
    pub fn get_or_create_chunk_at(&mut self, x: i32, z: i32) -> &mut Chunk {
        let (min_x, min_z) = chunk_origin(x, z);
        let key = key_of(min_x, min_z);
        if !self.chunks.contains_key(&key) {
            return self.instantiate_chunk_at(min_x, min_z);
        }
        self.chunks
            .entry(key)
            .or_insert_with(|| Chunk::new(min_x, min_z))
    }

    /// Gets the block at world coordinates.
    ///
    /// Heights outside `[0, 256)` are empty rather than an error.
    ///
    /// # Errors
    /// Returns [`WorldError::MissingChunk`] if no chunk backs `(x, z)`.
    pub fn get_block_at(&self, x: i32, y: i32, z: i32) -> WorldResult<BlockType> {
        let chunk = self
            .chunk_at(x, z)
            .ok_or(WorldError::MissingChunk { x, y, z })?;
        if !(0..CHUNK_HEIGHT).contains(&y) {
            return Ok(BlockType::EMPTY);
        }
        chunk.get_block_at(x - chunk.min_x(), y, z - chunk.min_z())
    }

    /// Gets the block at world coordinates, treating unloaded space as empty.
    pub fn block_or_empty(&self, x: i32, y: i32, z: i32) -> BlockType {
        self.get_block_at(x, y, z).unwrap_or_default()
    }

    /// Overwrites the block at world coordinates and marks that chunk's mesh stale.
    ///
    /// # Errors
    /// Returns [`WorldError::MissingChunk`] if no chunk backs `(x, z)`, or
    /// [`WorldError::ChunkBoundsViolation`] if `y` is outside `[0, 256)`.
    pub fn set_block_at(&mut self, x: i32, y: i32, z: i32, block_type: BlockType) -> WorldResult<()> {
        let chunk = self
            .chunk_at_mut(x, z)
            .ok_or(WorldError::MissingChunk { x, y, z })?;
        let (local_x, local_z) = (x - chunk.min_x(), z - chunk.min_z());
        chunk.set_block_at(local_x, y, local_z, block_type)?;
        let key = chunk.key();
        self.mesh_built.insert(key, false);
        Ok(())
    }

    /// Whether the mesh of the chunk containing `(x, z)` is up to date.
    pub fn is_mesh_built(&self, x: i32, z: i32) -> bool {
        let (min_x, min_z) = chunk_origin(x, z);
        self.mesh_built
            .get(&key_of(min_x, min_z))
            .copied()
            .unwrap_or(false)
    }

    /// Flags the mesh of the chunk containing `(x, z)` for a rebuild on its next draw.
    /// Does nothing if there is no chunk there.
    pub fn mark_mesh_stale(&mut self, x: i32, z: i32) {
        let (min_x, min_z) = chunk_origin(x, z);
        let key = key_of(min_x, min_z);
        if self.chunks.contains_key(&key) {
            self.mesh_built.insert(key, false);
        }
    }

    /// Rebuilds the meshes of the chunk containing `(x, z)` now.
    ///
    /// # Errors
    /// Returns [`WorldError::MissingChunk`] if there is no chunk there.
    pub fn rebuild_mesh(&mut self, x: i32, z: i32) -> WorldResult<()> {
        let (min_x, min_z) = chunk_origin(x, z);
        let key = key_of(min_x, min_z);
        let chunk = self
            .chunks
            .get(&key)
            .ok_or(WorldError::MissingChunk { x, y: 0, z })?;
        let mesh = chunk.build_mesh(&*self);

        trace!(
            "Rebuilt mesh for chunk ( {}, {} ): {} opaque / {} translucent vertices",
            min_x,
            min_z,
            mesh.opaque.vertices.len(),
            mesh.translucent.vertices.len()
        );

        if let Some(chunk) = self.chunks.get_mut(&key) {
            chunk.set_mesh(mesh);
        }
        self.mesh_built.insert(key, true);
        Ok(())
    }

    /// Ensures the chunk under `position` and the eight around it exist and are meshed.
    ///
    /// Called every tick. Missing chunks are created empty; procedural terrain arrives
    /// through zone generation.
    pub fn check_for_new_chunks(&mut self, position: Point3<f32>) -> WorldResult<()> {
        let (center_x, center_z) =
            chunk_origin(position.x.floor() as i32, position.z.floor() as i32);

        for dz in [-CHUNK_DEPTH, 0, CHUNK_DEPTH] {
            for dx in [-CHUNK_WIDTH, 0, CHUNK_WIDTH] {
                let (x, z) = (center_x + dx, center_z + dz);
                if !self.has_chunk_at(x, z) {
                    self.instantiate_chunk_at(x, z);
                }
                if !self.is_mesh_built(x, z) {
                    self.rebuild_mesh(x, z)?;
                }
            }
        }
        Ok(())
    }

    /// Draws every loaded chunk whose origin lies in `[min_x, max_x) x [min_z, max_z)`.
    ///
    /// Stale meshes are rebuilt first. Opaque meshes of the whole region are drawn before
    /// any translucent mesh.
    pub fn draw(
        &mut self,
        min_x: i32,
        max_x: i32,
        min_z: i32,
        max_z: i32,
        drawer: &mut impl ChunkDrawer,
    ) -> WorldResult<()> {
        let origins: Vec<(i32, i32)> = (min_z..max_z)
            .step_by(CHUNK_DEPTH as usize)
            .flat_map(|z| {
                (min_x..max_x)
                    .step_by(CHUNK_WIDTH as usize)
                    .map(move |x| (x, z))
            })
            .filter(|&(x, z)| self.has_chunk_at(x, z))
            .collect();

        for &(x, z) in &origins {
            if !self.is_mesh_built(x, z) {
                self.rebuild_mesh(x, z)?;
            }
        }

        for &(x, z) in &origins {
            if let Some(chunk) = self.chunk_at(x, z) {
                drawer.set_model_translation(chunk_translation(chunk));
                drawer.draw_opaque(&chunk.mesh().opaque);
            }
        }
        for &(x, z) in &origins {
            if let Some(chunk) = self.chunk_at(x, z) {
                drawer.set_model_translation(chunk_translation(chunk));
                drawer.draw_translucent(&chunk.mesh().translucent);
            }
        }
        Ok(())
    }
}

fn chunk_translation(chunk: &Chunk) -> Vector3<f32> {
    Vector3::new(chunk.min_x() as f32, 0.0, chunk.min_z() as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_negative_coordinates_floor_onto_chunks() {
        let mut terrain = Terrain::new();
        terrain.instantiate_chunk_at(-1, -1);
        assert!(terrain.has_chunk_at(-16, -16));
        assert!(terrain.has_chunk_at(-1, -16));
        assert!(!terrain.has_chunk_at(0, 0));
        assert_eq!(terrain.chunk_at(-5, -7).map(|c| (c.min_x(), c.min_z())), Some((-16, -16)));
    }

    #[test]
    fn test_instantiation_links_existing_neighbors() {
        let mut terrain = Terrain::new();
        terrain.instantiate_chunk_at(0, 0);
        terrain.instantiate_chunk_at(16, 0);
        terrain.instantiate_chunk_at(0, -16);

        let center = terrain.chunk_at(0, 0).unwrap();
        assert_eq!(center.neighbor(Direction::XPOS), Some(key_of(16, 0)));
        assert_eq!(center.neighbor(Direction::ZNEG), Some(key_of(0, -16)));
        assert_eq!(center.neighbor(Direction::XNEG), None);
        assert_eq!(terrain.chunk_at(16, 0).unwrap().neighbor(Direction::XNEG), Some(key_of(0, 0)));
        assert_eq!(terrain.chunk_at(0, -16).unwrap().neighbor(Direction::ZPOS), Some(key_of(0, 0)));
    }

    #[test]
    fn test_world_block_access() {
        let mut terrain = Terrain::new();
        terrain.instantiate_chunk_at(-16, 0);
        terrain.set_block_at(-3, 40, 5, BlockType::LAVA).unwrap();
        assert_eq!(terrain.get_block_at(-3, 40, 5).unwrap(), BlockType::LAVA);
        assert_eq!(terrain.chunk_at(-3, 5).unwrap().get_block_at(13, 40, 5).unwrap(), BlockType::LAVA);

        assert_eq!(terrain.get_block_at(-3, 300, 5).unwrap(), BlockType::EMPTY);
        assert_eq!(terrain.get_block_at(-3, -1, 5).unwrap(), BlockType::EMPTY);
        assert!(matches!(
            terrain.get_block_at(100, 40, 5),
            Err(WorldError::MissingChunk { x: 100, y: 40, z: 5 })
        ));
        assert!(terrain.set_block_at(100, 40, 5, BlockType::DIRT).is_err());
        assert_eq!(terrain.block_or_empty(100, 40, 5), BlockType::EMPTY);
    }

    #[test]
    fn test_edits_mark_mesh_stale() {
        let mut terrain = Terrain::new();
        terrain.instantiate_chunk_at(0, 0);
        assert!(!terrain.is_mesh_built(0, 0));
        terrain.rebuild_mesh(0, 0).unwrap();
        assert!(terrain.is_mesh_built(0, 0));

        terrain.set_block_at(1, 1, 1, BlockType::DIRT).unwrap();
        assert!(!terrain.is_mesh_built(0, 0));
        assert!(terrain.rebuild_mesh(64, 64).is_err());
    }

    #[test]
    fn test_check_for_new_chunks_loads_three_by_three() {
        let mut terrain = Terrain::new();
        terrain.check_for_new_chunks(Point3::new(-0.5, 140.0, 20.0)).unwrap();
        assert_eq!(terrain.chunk_count(), 9);
        for x in [-32, -16, 0] {
            for z in [0, 16, 32] {
                assert!(terrain.has_chunk_at(x, z), "missing ( {}, {} )", x, z);
                assert!(terrain.is_mesh_built(x, z));
            }
        }
    }
}
