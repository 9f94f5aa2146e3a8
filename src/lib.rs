#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

//! # Voxel World
//!
//! The procedural world core of a voxel exploration game: an unbounded grid of
//! 16x256x16 chunks filled from layered noise, face-culled chunk meshing into
//! GPU-ready vertex buffers, and a player whose movement is resolved against the
//! voxels by grid-marching rays.
//!
//! ## Key Modules
//!
//! * `voxels` - Blocks, chunks, the terrain registry and procedural generation
//! * `rendering` - Vertex layout, mesh buffers and the draw-call seam
//! * `player` - Transforms, movement state, collision and block targeting
//! * `noise` - Deterministic value, Perlin and Worley noise and fractal sums
//! * `engine` - The tick and render driver a host application owns
//!
//! ## Usage
//!
//! The host owns the window, the GPU and the frame loop. It forwards key events to an
//! [`InputManager`], ticks the [`Engine`] with the resulting [`InputBundle`], and
//! implements [`ChunkDrawer`] to upload and draw chunk meshes.
//!
//! ```rust,no_run
//! use voxel_world::{Engine, EngineConfig, InputManager};
//!
//! voxel_world::init_logging();
//! let mut engine = Engine::new(EngineConfig::default());
//! let mut input = InputManager::new();
//! engine.tick(&input.process()).unwrap();
//! ```

use log::info;

pub mod config;
pub mod engine;
pub mod error;
pub mod input;
pub mod noise;
pub mod player;
pub mod rendering;
pub mod voxels;

pub use config::{EngineConfig, PhysicsConfig};
pub use engine::{Engine, TickClock};
pub use error::{WorldError, WorldResult};
pub use input::{InputBundle, InputManager, Key, KeyState};
pub use player::{Medium, Movable, Player};
pub use rendering::{ChunkDrawer, Vertex};
pub use voxels::block::block_type::BlockType;
pub use voxels::terrain::Terrain;

/// Installs the stdout logger, filtered by `RUST_LOG`.
///
/// Does nothing if a logger is already installed.
pub fn init_logging() {
    let mut log_builder = env_logger::Builder::new();
    let installed = log_builder
        .target(env_logger::Target::Stdout)
        .parse_env("RUST_LOG")
        .try_init();

    if installed.is_ok() {
        info!("Logger initialized");
    }
}
