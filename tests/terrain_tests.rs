//! # Terrain Registry Tests
//!
//! Chunk registry behaviour through the public API: key packing, floor division of
//! negative coordinates, neighbour wiring, cross-chunk face culling and the order of
//! draw calls.

use cgmath::Vector3;
use voxel_world::rendering::mesh::Mesh;
use voxel_world::voxels::block::direction::Direction;
use voxel_world::voxels::terrain::{coords_of, key_of};
use voxel_world::{BlockType, ChunkDrawer, Terrain, WorldError};

#[derive(Debug, PartialEq)]
enum DrawCall {
    Translate(Vector3<f32>),
    Opaque(usize),
    Translucent(usize),
}

#[derive(Default)]
struct RecordingDrawer {
    calls: Vec<DrawCall>,
}

impl ChunkDrawer for RecordingDrawer {
    fn set_model_translation(&mut self, translation: Vector3<f32>) {
        self.calls.push(DrawCall::Translate(translation));
    }

    fn draw_opaque(&mut self, mesh: &Mesh) {
        self.calls.push(DrawCall::Opaque(mesh.face_count()));
    }

    fn draw_translucent(&mut self, mesh: &Mesh) {
        self.calls.push(DrawCall::Translucent(mesh.face_count()));
    }
}

#[test]
fn key_packing_round_trips_signed_coordinates() {
    for (x, z) in [(0, 0), (-16, 32), (i32::MIN, i32::MAX), (i32::MAX, -1), (-1, i32::MIN)] {
        assert_eq!(coords_of(key_of(x, z)), (x, z));
    }
    assert_ne!(key_of(-16, 32), key_of(32, -16));
}

#[test]
fn negative_lookups_floor_to_chunk_and_zone() {
    let mut terrain = Terrain::new();
    terrain.instantiate_chunk_at(-16, 0);
    assert!(terrain.has_chunk_at(-1, 0));
    assert!(terrain.has_chunk_at(-16, 15));
    assert!(!terrain.has_chunk_at(0, 0));

    terrain.generate_zone(-64, 0, -64, 0).unwrap();
    assert!(terrain.has_terrain_zone_at(-1, -1));
    assert!(terrain.has_terrain_zone_at(-64, -64));
    assert!(!terrain.has_terrain_zone_at(0, -1));
    assert!(!terrain.has_terrain_zone_at(-65, -1));
}

#[test]
fn neighbours_link_in_both_directions() {
    let mut terrain = Terrain::new();
    terrain.instantiate_chunk_at(0, 0);
    terrain.instantiate_chunk_at(0, 16);
    terrain.instantiate_chunk_at(-16, 0);

    let center = terrain.chunk_at(0, 0).unwrap();
    assert_eq!(center.neighbor(Direction::ZPOS), Some(key_of(0, 16)));
    assert_eq!(center.neighbor(Direction::XNEG), Some(key_of(-16, 0)));
    assert_eq!(center.neighbor(Direction::XPOS), None);
    assert_eq!(terrain.chunk_at(0, 16).unwrap().neighbor(Direction::ZNEG), Some(key_of(0, 0)));
    assert_eq!(terrain.chunk_at(-16, 0).unwrap().neighbor(Direction::XPOS), Some(key_of(0, 0)));
}

#[test]
fn faces_cull_across_chunk_boundaries() {
    let mut terrain = Terrain::new();
    terrain.instantiate_chunk_at(0, 0);
    terrain.instantiate_chunk_at(16, 0);
    terrain.set_block_at(15, 64, 3, BlockType::STONE).unwrap();
    terrain.set_block_at(16, 64, 3, BlockType::STONE).unwrap();

    terrain.rebuild_mesh(0, 0).unwrap();
    terrain.rebuild_mesh(16, 0).unwrap();
    assert_eq!(terrain.chunk_at(0, 0).unwrap().mesh().opaque.face_count(), 5);
    assert_eq!(terrain.chunk_at(16, 0).unwrap().mesh().opaque.face_count(), 5);

    let mesh = &terrain.chunk_at(0, 0).unwrap().mesh().opaque;
    assert_eq!(mesh.vertices.len(), 20);
    assert_eq!(mesh.indices.len(), 30);
    assert_eq!(mesh.vertex_bytes().len(), 20 * 64);
}

#[test]
fn water_next_to_stone_is_translucent() {
    let mut terrain = Terrain::new();
    terrain.instantiate_chunk_at(0, 0);
    terrain.set_block_at(5, 5, 5, BlockType::WATER).unwrap();
    terrain.set_block_at(6, 5, 5, BlockType::STONE).unwrap();
    terrain.rebuild_mesh(0, 0).unwrap();

    let mesh = terrain.chunk_at(0, 0).unwrap().mesh();
    assert_eq!(mesh.translucent.face_count(), 5);
    assert_eq!(mesh.opaque.face_count(), 6);
}

#[test]
fn draw_issues_all_opaque_before_translucent() {
    let mut terrain = Terrain::new();
    terrain.instantiate_chunk_at(0, 0);
    terrain.instantiate_chunk_at(16, 0);
    terrain.set_block_at(1, 1, 1, BlockType::STONE).unwrap();
    terrain.set_block_at(17, 1, 1, BlockType::ICE).unwrap();

    let mut drawer = RecordingDrawer::default();
    terrain.draw(0, 64, 0, 64, &mut drawer).unwrap();

    assert_eq!(
        drawer.calls,
        vec![
            DrawCall::Translate(Vector3::new(0.0, 0.0, 0.0)),
            DrawCall::Opaque(6),
            DrawCall::Translate(Vector3::new(16.0, 0.0, 0.0)),
            DrawCall::Opaque(0),
            DrawCall::Translate(Vector3::new(0.0, 0.0, 0.0)),
            DrawCall::Translucent(0),
            DrawCall::Translate(Vector3::new(16.0, 0.0, 0.0)),
            DrawCall::Translucent(6),
        ]
    );
    assert!(terrain.is_mesh_built(0, 0));
    assert!(terrain.is_mesh_built(16, 0));
}

#[test]
fn missing_chunks_are_reported() {
    let mut terrain = Terrain::new();
    assert!(matches!(
        terrain.get_block_at(3, 4, 5),
        Err(WorldError::MissingChunk { x: 3, y: 4, z: 5 })
    ));
    assert!(matches!(
        terrain.set_block_at(3, 4, 5, BlockType::SAND),
        Err(WorldError::MissingChunk { .. })
    ));

    terrain.instantiate_chunk_at(0, 0);
    assert!(matches!(
        terrain.set_block_at(3, 256, 5, BlockType::SAND),
        Err(WorldError::ChunkBoundsViolation { .. })
    ));
}
