//! # World Errors
//!
//! All failures the terrain, chunk and configuration layers can report.
//!
//! Chunk-local bounds violations are caller logic errors; missing chunks are an expected
//! outcome at the edge of the loaded window and callers are expected to handle them.

use thiserror::Error;

/// Errors that can occur while querying or editing the voxel world.
#[derive(Error, Debug)]
pub enum WorldError {
    /// A chunk-local voxel coordinate fell outside 16x256x16.
    #[error("chunk-local coordinate ({x}, {y}, {z}) is out of range")]
    ChunkBoundsViolation {
        /// Local X that was requested.
        x: i32,
        /// Local Y that was requested.
        y: i32,
        /// Local Z that was requested.
        z: i32,
    },

    /// A world coordinate has no chunk loaded behind it.
    #[error("coordinates {x} {y} {z} have no chunk")]
    MissingChunk {
        /// World X that was requested.
        x: i32,
        /// World Y that was requested.
        y: i32,
        /// World Z that was requested.
        z: i32,
    },

    /// Engine configuration text could not be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}

/// Result type for world operations.
pub type WorldResult<T> = Result<T, WorldError>;
