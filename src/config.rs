//! # Engine Configuration
//!
//! Tunable physics and spawn settings, loaded from JSON by the host application.
//! Every field has a default, so a partial document (or `{}`) is valid.
//!
//! Noise constants and chunk dimensions are deliberately not configurable: terrain
//! generation has to stay a pure function of the column coordinates.

use log::debug;
use serde::Deserialize;

use crate::error::WorldResult;

/// Physics constants applied by the player each tick.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Fraction of last tick's velocity that survives into this tick.
    pub drag: f32,
    /// Vertical acceleration applied while walking.
    pub gravity: f32,
    /// Upward velocity given when a jump starts.
    pub jump_velocity: f32,
    /// Whole-body velocity multiplier when a collision ray touches liquid.
    pub liquid_damping: f32,
    /// Upward velocity reapplied when landing in liquid mid-jump.
    pub liquid_jump_boost: f32,
    /// Length of the block-targeting ray.
    pub reach: f32,
    /// Height of the eye (camera and targeting ray) above the feet.
    pub eye_height: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        PhysicsConfig {
            drag: 0.8,
            gravity: -1.0,
            jump_velocity: 0.5,
            liquid_damping: 7.0 / 8.0,
            liquid_jump_boost: 0.25,
            reach: 3.0,
            eye_height: 1.5,
        }
    }
}

/// Top-level engine configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Player physics constants
    pub physics: PhysicsConfig,
    /// Where the player's feet start
    pub spawn: [f32; 3],
    /// Whether the player starts in flight mode
    pub flight_mode: bool,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            physics: PhysicsConfig::default(),
            spawn: [64.0, 150.0, 64.0],
            flight_mode: true,
        }
    }
}

impl EngineConfig {
    /// Parses a configuration from JSON text.
    ///
    /// Missing fields fall back to their defaults.
    ///
    /// # Errors
    /// Returns [`crate::WorldError::InvalidConfig`] if the text is not valid JSON for this shape.
    pub fn from_json_str(text: &str) -> WorldResult<Self> {
        let config: EngineConfig = serde_json::from_str(text)?;
        debug!("Loaded engine config: {:?}", config);
        Ok(config)
    }
}
