//! # Voxel World
//!
//! The voxel data of the world and everything that turns it into geometry.
//!
//! ## Architecture
//!
//! * **Block**: block types, face directions and the static render attribute tables
//! * **Chunk**: fixed 16x256x16 voxel grids, linked to their lateral neighbours, that
//!   compile their visible faces into opaque and translucent meshes
//! * **Terrain**: the sparse chunk registry, lazy loading around the player, and
//!   procedural zone generation
//!
//! ## Data Flow
//!
//! 1. Terrain generates zones and instantiates chunks near the player
//! 2. Edits go through terrain, which marks the affected meshes stale
//! 3. Stale meshes are rebuilt right before they are drawn

pub mod block;
pub mod chunk;
pub mod terrain;
