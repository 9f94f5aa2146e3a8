//! # Engine
//!
//! The per-frame driver a host application owns: the terrain, the player, the
//! configuration they were built from, and the clock that turns wall time into tick
//! deltas.
//!
//! Each tick streams the chunks around the player, then advances the player. Each
//! frame the host calls [`Engine::render_terrain`], which generates any terrain zone
//! in the 3x3 window around the player and issues the draw calls for it.

use cgmath::Point3;
use web_time::Instant;

use crate::config::EngineConfig;
use crate::error::WorldResult;
use crate::input::InputBundle;
use crate::player::Player;
use crate::rendering::ChunkDrawer;
use crate::voxels::terrain::{zone_origin, Terrain, ZONE_SIZE};

/// Measures real time between ticks.
#[derive(Debug, Clone, Copy)]
pub struct TickClock {
    last: Instant,
}

impl Default for TickClock {
    fn default() -> Self {
        TickClock::new()
    }
}

impl TickClock {
    /// Starts the clock now.
    pub fn new() -> Self {
        TickClock { last: Instant::now() }
    }

    /// Seconds since the previous call (or since the clock started).
    pub fn tick(&mut self) -> f32 {
        let now = Instant::now();
        let dt = now.duration_since(self.last).as_secs_f32();
        self.last = now;
        dt
    }
}

/// The world simulation.
#[derive(Debug)]
pub struct Engine {
    terrain: Terrain,
    player: Player,
    config: EngineConfig,
    clock: TickClock,
}

impl Engine {
    /// Creates an empty world with the player at the configured spawn point.
    pub fn new(config: EngineConfig) -> Self {
        let [x, y, z] = config.spawn;
        let player = Player::new(Point3::new(x, y, z), config.flight_mode, config.physics);
        Engine {
            terrain: Terrain::new(),
            player,
            config,
            clock: TickClock::new(),
        }
    }

    /// Runs one tick using the real time elapsed since the previous one.
    pub fn tick(&mut self, input: &InputBundle) -> WorldResult<()> {
        let dt = self.clock.tick();
        self.tick_with_dt(dt, input)
    }

    /// Runs one tick with an explicit time step.
    ///
    /// # Errors
    /// Propagates failures from meshing the chunks around the player.
    pub fn tick_with_dt(&mut self, dt: f32, input: &InputBundle) -> WorldResult<()> {
        self.terrain.check_for_new_chunks(self.player.position())?;
        self.player.tick(dt, input, &self.terrain);
        Ok(())
    }

    /// Generates and draws the 3x3 terrain zones around the player.
    ///
    /// Zones are visited row by row and each is drawn in its own opaque and
    /// translucent pass.
    pub fn render_terrain(&mut self, drawer: &mut impl ChunkDrawer) -> WorldResult<()> {
        let position = self.player.position();
        let (center_x, center_z) = zone_origin(position.x.floor() as i32, position.z.floor() as i32);

        for z in [center_z - ZONE_SIZE, center_z, center_z + ZONE_SIZE] {
            for x in [center_x - ZONE_SIZE, center_x, center_x + ZONE_SIZE] {
                if !self.terrain.has_terrain_zone_at(x, z) {
                    self.terrain.generate_zone(x, x + ZONE_SIZE, z, z + ZONE_SIZE)?;
                }
                self.terrain.draw(x, x + ZONE_SIZE, z, z + ZONE_SIZE, drawer)?;
            }
        }
        Ok(())
    }

    /// Places a copy of the block the player is looking at. See [`Player::add_block`].
    pub fn add_block(&mut self) -> WorldResult<Option<Point3<i32>>> {
        self.player.add_block(&mut self.terrain)
    }

    /// Removes the block the player is looking at. See [`Player::remove_block`].
    pub fn remove_block(&mut self) -> WorldResult<Option<Point3<i32>>> {
        self.player.remove_block(&mut self.terrain)
    }

    /// Telemetry lines for the host's overlay: position, velocity, acceleration,
    /// look direction, chunk and terrain zone.
    pub fn telemetry(&self) -> [String; 6] {
        [
            self.player.pos_as_string(),
            self.player.vel_as_string(),
            self.player.acc_as_string(),
            self.player.look_as_string(),
            self.player.chunk_as_string(),
            self.player.zone_as_string(),
        ]
    }

    /// The world.
    pub fn terrain(&self) -> &Terrain {
        &self.terrain
    }

    /// Mutable access to the world.
    pub fn terrain_mut(&mut self) -> &mut Terrain {
        &mut self.terrain
    }

    /// The player.
    pub fn player(&self) -> &Player {
        &self.player
    }

    /// Mutable access to the player.
    pub fn player_mut(&mut self) -> &mut Player {
        &mut self.player
    }

    /// The configuration the engine was built from.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
