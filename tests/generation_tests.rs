//! # Procedural Generation Tests
//!
//! Zone generation through the terrain registry: determinism across fresh worlds,
//! chunk reuse, and the invariants every generated column must satisfy.

use voxel_world::voxels::terrain::generation::{ColumnSample, WATER_LEVEL};
use voxel_world::{BlockType, Terrain};

fn generated_origin_zone() -> Terrain {
    let mut terrain = Terrain::new();
    terrain.generate_zone(0, 64, 0, 64).unwrap();
    terrain
}

#[test]
fn zone_generation_is_deterministic() {
    let first = generated_origin_zone();
    let second = generated_origin_zone();

    assert_eq!(first.chunk_count(), 16);
    assert_eq!(second.chunk_count(), 16);
    for z in (0..64).step_by(16) {
        for x in (0..64).step_by(16) {
            let a = first.chunk_at(x, z).unwrap();
            let b = second.chunk_at(x, z).unwrap();
            assert!(a.blocks() == b.blocks(), "chunk ( {}, {} ) differs", x, z);
        }
    }
}

#[test]
fn every_column_has_bedrock_and_reaches_the_water_line() {
    let terrain = generated_origin_zone();
    for z in 0..64 {
        for x in 0..64 {
            assert_eq!(terrain.get_block_at(x, 0, z).unwrap(), BlockType::BEDROCK);
            let column = ColumnSample::at(x, z);
            let top = column.fill_height();
            assert!(top >= WATER_LEVEL);
            assert_eq!(terrain.get_block_at(x, top + 1, z).unwrap(), BlockType::EMPTY);
        }
    }
}

#[test]
fn generation_runs_once_per_zone() {
    let mut terrain = generated_origin_zone();
    assert!(terrain.has_terrain_zone_at(63, 63));
    assert!(!terrain.has_terrain_zone_at(64, 0));

    terrain.set_block_at(10, 250, 10, BlockType::OTHER).unwrap();
    terrain.generate_zone(0, 64, 0, 64).unwrap();
    assert_eq!(terrain.get_block_at(10, 250, 10).unwrap(), BlockType::OTHER);
    assert_eq!(terrain.chunk_count(), 16);
}

#[test]
fn generation_reuses_existing_chunks_and_marks_neighbours_stale() {
    let mut terrain = Terrain::new();
    terrain.instantiate_chunk_at(64, 0);
    terrain.rebuild_mesh(64, 0).unwrap();
    terrain.instantiate_chunk_at(0, 0);
    terrain.set_block_at(3, 255, 3, BlockType::OTHER).unwrap();

    terrain.generate_zone(0, 64, 0, 64).unwrap();

    assert_eq!(terrain.get_block_at(3, 255, 3).unwrap(), BlockType::OTHER);
    assert_eq!(terrain.chunk_count(), 17);
    assert!(!terrain.is_mesh_built(64, 0), "lateral neighbour kept a stale mesh");
}

#[test]
fn generated_chunks_mesh_without_errors() {
    let mut terrain = generated_origin_zone();
    terrain.rebuild_mesh(16, 16).unwrap();
    let mesh = terrain.chunk_at(16, 16).unwrap().mesh();
    assert!(!mesh.opaque.is_empty() || !mesh.translucent.is_empty());
    assert_eq!(mesh.opaque.indices.len(), mesh.opaque.face_count() * 6);
}
