//! # Player Module
//!
//! The player entity: a body transform with a camera transform riding `eye_height`
//! above it, integrated velocity and acceleration, the movement state machine, and
//! the collision resolution and block targeting built on the grid march.
//!
//! ## Tick order
//!
//! 1. Key edges (flight toggle, jump, arrow-key look) update the movement state.
//! 2. Held keys set the acceleration.
//! 3. Velocity is integrated, clamped against the terrain per axis, and applied to
//!    both transforms.

use cgmath::{InnerSpace, Point3, Vector3, Zero};
use log::{debug, warn};

use crate::config::PhysicsConfig;
use crate::error::WorldResult;
use crate::input::{InputBundle, Key};
use crate::voxels::block::{block_type::BlockType, is_liquid};
use crate::voxels::chunk::{CHUNK_DEPTH, CHUNK_WIDTH};
use crate::voxels::terrain::{chunk_origin, zone_origin, Terrain};

pub mod collision;
pub mod movement_state;
mod transform;

pub use collision::{collision_vertices, grid_march, MarchResult};
pub use movement_state::{Medium, MovementState, WallContacts, WallSide};
pub use transform::{Movable, Transform};

/// Degrees turned per arrow key release.
const LOOK_STEP: f32 = 2.0;

/// The player entity.
#[derive(Debug, Clone)]
pub struct Player {
    body: Transform,
    camera: Transform,
    velocity: Vector3<f32>,
    acceleration: Vector3<f32>,
    state: MovementState,
    physics: PhysicsConfig,
}

impl Movable for Player {
    fn for_each_transform(&mut self, apply: &mut dyn FnMut(&mut Transform)) {
        apply(&mut self.body);
        apply(&mut self.camera);
    }
}

impl Player {
    /// Creates a player with its feet at `position`.
    pub fn new(position: Point3<f32>, flight_mode: bool, physics: PhysicsConfig) -> Self {
        Player {
            body: Transform::new(position),
            camera: Transform::new(position + Vector3::new(0.0, physics.eye_height, 0.0)),
            velocity: Vector3::zero(),
            acceleration: Vector3::zero(),
            state: MovementState::new(flight_mode),
            physics,
        }
    }

    /// Position of the feet.
    pub fn position(&self) -> Point3<f32> {
        self.body.position
    }

    /// The body transform.
    pub fn body(&self) -> &Transform {
        &self.body
    }

    /// The camera transform the host builds its view matrix from.
    pub fn camera(&self) -> &Transform {
        &self.camera
    }

    /// Current velocity in blocks per tick.
    pub fn velocity(&self) -> Vector3<f32> {
        self.velocity
    }

    /// Overrides the current velocity.
    pub fn set_velocity(&mut self, velocity: Vector3<f32>) {
        self.velocity = velocity;
    }

    /// Acceleration derived from the last input snapshot.
    pub fn acceleration(&self) -> Vector3<f32> {
        self.acceleration
    }

    /// The movement state flags.
    pub fn state(&self) -> &MovementState {
        &self.state
    }

    /// Mutable access to the movement state flags.
    pub fn state_mut(&mut self) -> &mut MovementState {
        &mut self.state
    }

    /// The fluid the player is currently in.
    pub fn medium(&self) -> Medium {
        self.state.medium
    }

    /// Whether the player is flying.
    pub fn flight_mode(&self) -> bool {
        self.state.flight_mode
    }

    /// Starts or stops a jump. Starting one sets the vertical velocity.
    pub fn set_jumping(&mut self, jumping: bool) {
        self.state.jumping = jumping;
        if jumping {
            self.velocity.y = self.physics.jump_velocity;
        }
    }

    /// Advances the player by one tick.
    ///
    /// # Arguments
    /// * `dt` - Seconds since the previous tick
    /// * `input` - This tick's key states
    /// * `terrain` - The world to collide against
    pub fn tick(&mut self, dt: f32, input: &InputBundle, terrain: &Terrain) {
        self.handle_key_edges(input);
        self.process_inputs(input);
        self.compute_physics(dt, terrain);
    }

    fn handle_key_edges(&mut self, input: &InputBundle) {
        let flight = input.get_key_state(Key::F);
        if flight.is_just_pressed() {
            self.state.press_flight_toggle();
        } else if flight.is_just_released() {
            self.state.release_flight_toggle();
        }

        let jump = input.get_key_state(Key::Space);
        if jump.is_just_pressed() && self.state.can_start_jump() {
            self.set_jumping(true);
        } else if jump.is_just_released() {
            self.state.release_jump();
        }

        if input.get_key_state(Key::Right).is_just_released() {
            self.rotate_on_up_global(-LOOK_STEP);
        }
        if input.get_key_state(Key::Left).is_just_released() {
            self.rotate_on_up_global(LOOK_STEP);
        }
        if input.get_key_state(Key::Up).is_just_released() {
            self.rotate_on_right_local(LOOK_STEP);
        }
        if input.get_key_state(Key::Down).is_just_released() {
            self.rotate_on_right_local(-LOOK_STEP);
        }
    }

    /// Sets the acceleration from the held movement keys.
    ///
    /// Flying accelerates along the body's own axes. Walking uses forward and right
    /// flattened onto the ground plane and adds gravity.
    pub fn process_inputs(&mut self, input: &InputBundle) {
        let mut acceleration = Vector3::zero();

        if self.state.flight_mode {
            acceleration += self.body.forward * key_axis(input, Key::W, Key::S);
            acceleration += self.body.right * key_axis(input, Key::D, Key::A);
            acceleration += self.body.up * key_axis(input, Key::E, Key::Q);
        } else {
            acceleration += flatten(self.body.forward) * key_axis(input, Key::W, Key::S);
            acceleration += flatten(self.body.right) * key_axis(input, Key::D, Key::A);
            acceleration.y = self.physics.gravity;
        }

        self.acceleration = acceleration;
    }

    /// Integrates velocity, resolves collisions, then moves.
    pub fn compute_physics(&mut self, dt: f32, terrain: &Terrain) {
        self.velocity = self.velocity * self.physics.drag + self.acceleration * dt;
        self.resolve_collisions(terrain);
        let velocity = self.velocity;
        self.move_along_vector(velocity);
    }

    /// Clamps the velocity against the terrain, one axis at a time.
    ///
    /// Each axis casts its velocity component from all twelve collision vertices. Any
    /// liquid hit damps the whole velocity once and marks the player as swimming. Any
    /// solid hit clamps that component to the shortest hit distance and records wall
    /// contact on the side of travel. The vertical axis also ends jumps and updates
    /// the medium.
    pub fn resolve_collisions(&mut self, terrain: &Terrain) {
        let position = self.body.position;
        let vertices = collision_vertices(position);
        let rays = [
            Vector3::new(self.velocity.x, 0.0, 0.0),
            Vector3::new(0.0, self.velocity.y, 0.0),
            Vector3::new(0.0, 0.0, self.velocity.z),
        ];

        for (axis, ray) in rays.iter().enumerate() {
            self.state.hugging.release_opposite(axis, ray[axis]);
        }

        for (axis, &ray) in rays.iter().enumerate() {
            // An axis at rest has no side of travel and keeps its contacts.
            let side = WallSide::new(axis, ray[axis] > 0.0);
            let hugging = self.state.hugging.is_touching(side);

            let mut solid_distance: Option<f32> = None;
            let mut liquid_hit = false;
            let mut medium = Medium::None;

            for vertex in vertices {
                let result = grid_march(vertex, ray, terrain, hugging);
                let Some(cell) = result.hit else {
                    continue;
                };

                let block = terrain.block_or_empty(cell.x, cell.y, cell.z);
                if is_liquid(block) {
                    liquid_hit = true;
                    if cell.y as f32 >= position.y {
                        medium = match (medium, block) {
                            (Medium::Lava, _) | (_, BlockType::LAVA) => Medium::Lava,
                            _ => Medium::Water,
                        };
                    }
                } else {
                    solid_distance = Some(
                        solid_distance.map_or(result.distance, |d: f32| d.min(result.distance)),
                    );
                }
            }

            if axis == 1 && (liquid_hit || solid_distance.is_some()) {
                let into_liquid = liquid_hit && solid_distance.is_none();
                if self.state.vertical_contact(into_liquid) {
                    self.velocity.y = self.physics.liquid_jump_boost;
                }
            }

            if liquid_hit {
                self.velocity *= self.physics.liquid_damping;
                self.state.swimming = true;
            }

            let wall = match solid_distance {
                Some(distance) => {
                    let component = self.velocity[axis];
                    self.velocity[axis] = component.signum() * component.abs().min(distance);
                    if !liquid_hit {
                        self.state.swimming = false;
                    }
                    true
                }
                None => false,
            };
            if ray[axis] != 0.0 {
                self.state.hugging.set(side, wall);
            }

            if axis == 1 {
                self.state.medium = medium;
            }
        }
    }

    /// Casts the block-targeting ray from eye height along the look direction.
    pub fn target_block(&self, terrain: &Terrain) -> MarchResult {
        let eye = self.body.position + Vector3::new(0.0, self.physics.eye_height, 0.0);
        let forward = self.body.forward;
        if forward.magnitude2() == 0.0 {
            return grid_march(eye, Vector3::zero(), terrain, true);
        }
        grid_march(eye, forward.normalize() * self.physics.reach, terrain, true)
    }

    /// Places a copy of the targeted block one cell toward +Z from it.
    ///
    /// # Returns
    /// Where the block was placed, or `None` if nothing is targeted.
    ///
    /// # Errors
    /// Returns an error if the placement cell has no chunk or is outside the world's
    /// height range.
    pub fn add_block(&self, terrain: &mut Terrain) -> WorldResult<Option<Point3<i32>>> {
        let Some(hit) = self.target_block(terrain).hit else {
            return Ok(None);
        };

        let block = terrain.get_block_at(hit.x, hit.y, hit.z)?;
        let placed = Point3::new(hit.x, hit.y, hit.z + 1);
        terrain.set_block_at(placed.x, placed.y, placed.z, block)?;
        debug!("Placed {:?} at ( {}, {}, {} )", block, placed.x, placed.y, placed.z);

        rebuild_around(terrain, placed.x, placed.z)?;
        Ok(Some(placed))
    }

    /// Clears the targeted block. Bedrock is left untouched.
    ///
    /// # Returns
    /// The cleared cell, or `None` if nothing removable is targeted.
    ///
    /// # Errors
    /// Returns an error if the targeted cell's chunk disappears mid-edit.
    pub fn remove_block(&self, terrain: &mut Terrain) -> WorldResult<Option<Point3<i32>>> {
        let Some(hit) = self.target_block(terrain).hit else {
            return Ok(None);
        };

        if terrain.get_block_at(hit.x, hit.y, hit.z)? == BlockType::BEDROCK {
            return Ok(None);
        }

        terrain.set_block_at(hit.x, hit.y, hit.z, BlockType::EMPTY)?;
        debug!("Removed block at ( {}, {}, {} )", hit.x, hit.y, hit.z);

        rebuild_around(terrain, hit.x, hit.z)?;
        Ok(Some(hit))
    }

    /// Feet position as `( x, y, z)`.
    pub fn pos_as_string(&self) -> String {
        vector_string(self.body.position.x, self.body.position.y, self.body.position.z)
    }

    /// Velocity as `( x, y, z)`.
    pub fn vel_as_string(&self) -> String {
        vector_string(self.velocity.x, self.velocity.y, self.velocity.z)
    }

    /// Acceleration as `( x, y, z)`.
    pub fn acc_as_string(&self) -> String {
        vector_string(self.acceleration.x, self.acceleration.y, self.acceleration.z)
    }

    /// Look direction as `( x, y, z)`.
    pub fn look_as_string(&self) -> String {
        vector_string(self.body.forward.x, self.body.forward.y, self.body.forward.z)
    }

    /// Origin of the chunk under the player as `( x, z )`.
    pub fn chunk_as_string(&self) -> String {
        let (x, z) = chunk_origin(
            self.body.position.x.floor() as i32,
            self.body.position.z.floor() as i32,
        );
        format!("( {}, {} )", x, z)
    }

    /// Origin of the terrain zone under the player as `( x, z )`.
    pub fn zone_as_string(&self) -> String {
        let (x, z) = zone_origin(
            self.body.position.x.floor() as i32,
            self.body.position.z.floor() as i32,
        );
        format!("( {}, {} )", x, z)
    }
}

fn vector_string(x: f32, y: f32, z: f32) -> String {
    format!("( {:.6}, {:.6}, {:.6})", x, y, z)
}

/// +1 if only `positive` is held, -1 if only `negative` is, 0 otherwise.
fn key_axis(input: &InputBundle, positive: Key, negative: Key) -> f32 {
    match (input.is_held(positive), input.is_held(negative)) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}

/// Projects `v` onto the XZ plane, keeping its length.
fn flatten(v: Vector3<f32>) -> Vector3<f32> {
    let flat = Vector3::new(v.x, 0.0, v.z);
    let flat_length = flat.magnitude();
    if flat_length == 0.0 {
        return Vector3::zero();
    }
    flat * (v.magnitude() / flat_length)
}

/// Rebuilds the chunk holding column `(x, z)` and any lateral neighbour that shares
/// the column's chunk edge.
fn rebuild_around(terrain: &mut Terrain, x: i32, z: i32) -> WorldResult<()> {
    terrain.rebuild_mesh(x, z)?;

    let local_x = x.rem_euclid(CHUNK_WIDTH);
    let local_z = z.rem_euclid(CHUNK_DEPTH);
    let mut neighbors = Vec::with_capacity(2);
    if local_x == 0 {
        neighbors.push((x - 1, z));
    } else if local_x == CHUNK_WIDTH - 1 {
        neighbors.push((x + 1, z));
    }
    if local_z == 0 {
        neighbors.push((x, z - 1));
    } else if local_z == CHUNK_DEPTH - 1 {
        neighbors.push((x, z + 1));
    }

    for (nx, nz) in neighbors {
        if terrain.has_chunk_at(nx, nz) {
            terrain.rebuild_mesh(nx, nz)?;
        } else {
            warn!("No chunk at ( {}, {} ) to rebuild after an edge edit", nx, nz);
        }
    }
    Ok(())
}
