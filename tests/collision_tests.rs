//! # Player Collision Tests
//!
//! Grid marching, per-axis velocity clamping, landing, and block targeting against a
//! hand-built terrain.

use cgmath::{InnerSpace, Point3, Vector3};
use voxel_world::player::{grid_march, WallSide};
use voxel_world::{BlockType, InputBundle, Key, KeyState, Movable, PhysicsConfig, Player, Terrain};

fn terrain_with_chunks(origins: &[(i32, i32)]) -> Terrain {
    let mut terrain = Terrain::new();
    for &(x, z) in origins {
        terrain.instantiate_chunk_at(x, z);
    }
    terrain
}

fn flyer_at(x: f32, y: f32, z: f32) -> Player {
    Player::new(Point3::new(x, y, z), true, PhysicsConfig::default())
}

#[test]
fn wall_two_blocks_ahead_clamps_velocity() {
    let mut terrain = terrain_with_chunks(&[(0, 0)]);
    for y in 129..=131 {
        for z in 8..=9 {
            terrain.set_block_at(3, y, z, BlockType::STONE).unwrap();
        }
    }

    let mut player = flyer_at(0.5, 129.0, 8.5);
    player.set_velocity(Vector3::new(5.0, 0.0, 0.0));
    player.resolve_collisions(&terrain);
    assert!(player.velocity().x <= 2.0);
    assert_eq!(player.velocity().x, 2.0);
    assert!(player.state().hugging.is_touching(WallSide::new(0, true)));

    let velocity = player.velocity();
    player.move_along_vector(velocity);
    assert_eq!(player.position(), Point3::new(2.5, 129.0, 8.5));

    player.set_velocity(Vector3::new(5.0, 0.0, 0.0));
    player.resolve_collisions(&terrain);
    assert_eq!(player.velocity().x, 0.0, "moved into a hugged wall");

    player.set_velocity(Vector3::new(-1.0, 0.0, 0.0));
    player.resolve_collisions(&terrain);
    assert_eq!(player.velocity().x, -1.0);
    assert!(!player.state().hugging.is_touching(WallSide::new(0, true)));
}

#[test]
fn idle_tick_keeps_wall_contact() {
    let mut terrain = terrain_with_chunks(&[(0, 0)]);
    for y in 10..=12 {
        for z in 8..=9 {
            terrain.set_block_at(2, y, z, BlockType::STONE).unwrap();
        }
    }

    let mut player = flyer_at(4.5, 10.0, 8.5);
    player.set_velocity(Vector3::new(-5.0, 0.0, 0.0));
    player.resolve_collisions(&terrain);
    assert_eq!(player.velocity().x, -1.0);
    let velocity = player.velocity();
    player.move_along_vector(velocity);
    assert_eq!(player.position(), Point3::new(3.5, 10.0, 8.5));
    assert!(player.state().hugging.is_touching(WallSide::new(0, false)));

    player.set_velocity(Vector3::new(0.0, 0.0, 0.0));
    player.resolve_collisions(&terrain);
    assert!(player.state().hugging.is_touching(WallSide::new(0, false)));

    player.set_velocity(Vector3::new(-0.5, 0.0, 0.0));
    player.resolve_collisions(&terrain);
    assert_eq!(player.velocity().x, 0.0, "pushed into the wall after resting");
    let velocity = player.velocity();
    player.move_along_vector(velocity);
    assert_eq!(player.position(), Point3::new(3.5, 10.0, 8.5));
}

#[test]
fn march_distance_never_exceeds_ray_length() {
    let mut terrain = terrain_with_chunks(&[(0, 0), (-16, 0), (0, -16), (-16, -16)]);
    for x in -16..16 {
        for z in -16..16 {
            terrain.set_block_at(x, 60, z, BlockType::DIRT).unwrap();
        }
    }
    terrain.set_block_at(2, 62, -3, BlockType::STONE).unwrap();

    let origin = Point3::new(0.25, 62.5, 0.75);
    for i in 0..64 {
        let angle = i as f32 * 0.37;
        let ray = Vector3::new(angle.cos(), -0.6 + (i % 7) as f32 * 0.2, angle.sin()) * (0.5 + (i % 5) as f32);
        let result = grid_march(origin, ray, &terrain, false);

        assert!(result.distance <= ray.magnitude(), "ray {} overshot", i);
        if let Some(cell) = result.hit {
            assert_ne!(terrain.block_or_empty(cell.x, cell.y, cell.z), BlockType::EMPTY);
        }
    }
}

#[test]
fn walking_player_lands_on_the_floor() {
    let mut terrain = terrain_with_chunks(&[(0, 0)]);
    for x in 4..13 {
        for z in 4..13 {
            terrain.set_block_at(x, 9, z, BlockType::STONE).unwrap();
        }
    }

    let mut player = Player::new(Point3::new(8.5, 12.0, 8.5), false, PhysicsConfig::default());
    let idle = InputBundle::new();
    for _ in 0..300 {
        player.tick(0.016, &idle, &terrain);
    }

    assert_eq!(player.position().y, 10.0);
    assert!(player.state().hugging.is_touching(WallSide::new(1, false)));
    assert!(!player.state().jumping);
}

#[test]
fn flight_toggle_needs_a_release_to_rearm() {
    let terrain = Terrain::new();
    let mut player = flyer_at(0.0, 0.0, 0.0);

    let press = InputBundle::new().with_key(Key::F, KeyState::Pressed);
    let hold = InputBundle::new().with_key(Key::F, KeyState::Held);
    let release = InputBundle::new().with_key(Key::F, KeyState::Released);

    player.tick(0.0, &press, &terrain);
    assert!(!player.flight_mode());
    player.tick(0.0, &hold, &terrain);
    player.tick(0.0, &press, &terrain);
    assert!(!player.flight_mode(), "toggled again while latched");

    player.tick(0.0, &release, &terrain);
    player.tick(0.0, &press, &terrain);
    assert!(player.flight_mode());
}

fn targeting_setup(block: BlockType) -> (Terrain, Player) {
    let mut terrain = terrain_with_chunks(&[(0, 0), (16, 0)]);
    terrain.set_block_at(8, 10, 6, block).unwrap();
    terrain.rebuild_mesh(0, 0).unwrap();
    terrain.rebuild_mesh(16, 0).unwrap();
    (terrain, flyer_at(8.5, 8.5, 8.5))
}

#[test]
fn bedrock_cannot_be_removed() {
    let (mut terrain, player) = targeting_setup(BlockType::BEDROCK);
    let revision = terrain.chunk_at(8, 6).unwrap().mesh_revision();

    assert_eq!(player.target_block(&terrain).hit, Some(Point3::new(8, 10, 6)));
    assert_eq!(player.remove_block(&mut terrain).unwrap(), None);
    assert_eq!(terrain.get_block_at(8, 10, 6).unwrap(), BlockType::BEDROCK);
    assert_eq!(terrain.chunk_at(8, 6).unwrap().mesh_revision(), revision);
    assert!(terrain.is_mesh_built(8, 6));
}

#[test]
fn removing_a_block_rebuilds_its_chunk() {
    let (mut terrain, player) = targeting_setup(BlockType::STONE);
    let revision = terrain.chunk_at(8, 6).unwrap().mesh_revision();
    let neighbor_revision = terrain.chunk_at(16, 0).unwrap().mesh_revision();

    assert_eq!(player.remove_block(&mut terrain).unwrap(), Some(Point3::new(8, 10, 6)));
    assert_eq!(terrain.get_block_at(8, 10, 6).unwrap(), BlockType::EMPTY);
    assert_eq!(terrain.chunk_at(8, 6).unwrap().mesh_revision(), revision + 1);
    assert!(terrain.is_mesh_built(8, 6));
    assert!(terrain.chunk_at(8, 6).unwrap().mesh().opaque.is_empty());
    assert_eq!(terrain.chunk_at(16, 0).unwrap().mesh_revision(), neighbor_revision);

    assert_eq!(player.remove_block(&mut terrain).unwrap(), None);
}

#[test]
fn removing_an_edge_block_rebuilds_the_neighbour() {
    let mut terrain = terrain_with_chunks(&[(0, 0), (16, 0)]);
    terrain.set_block_at(15, 10, 6, BlockType::STONE).unwrap();
    terrain.rebuild_mesh(0, 0).unwrap();
    terrain.rebuild_mesh(16, 0).unwrap();
    let neighbor_revision = terrain.chunk_at(16, 0).unwrap().mesh_revision();

    let player = flyer_at(15.5, 8.5, 8.5);
    assert_eq!(player.remove_block(&mut terrain).unwrap(), Some(Point3::new(15, 10, 6)));
    assert_eq!(terrain.chunk_at(16, 0).unwrap().mesh_revision(), neighbor_revision + 1);
}

#[test]
fn adding_places_a_copy_toward_positive_z() {
    let (mut terrain, player) = targeting_setup(BlockType::SAND);

    assert_eq!(player.add_block(&mut terrain).unwrap(), Some(Point3::new(8, 10, 7)));
    assert_eq!(terrain.get_block_at(8, 10, 7).unwrap(), BlockType::SAND);
    assert_eq!(terrain.get_block_at(8, 10, 6).unwrap(), BlockType::SAND);
    assert!(terrain.is_mesh_built(8, 7));
    assert_eq!(terrain.chunk_at(8, 6).unwrap().mesh().opaque.face_count(), 10);
}

#[test]
fn nothing_in_reach_is_a_no_op() {
    let mut terrain = terrain_with_chunks(&[(0, 0)]);
    terrain.set_block_at(8, 10, 2, BlockType::STONE).unwrap();
    let player = flyer_at(8.5, 8.5, 8.5);

    assert!(player.target_block(&terrain).hit.is_none());
    assert_eq!(player.add_block(&mut terrain).unwrap(), None);
    assert_eq!(player.remove_block(&mut terrain).unwrap(), None);
    assert_eq!(terrain.get_block_at(8, 10, 2).unwrap(), BlockType::STONE);
}
