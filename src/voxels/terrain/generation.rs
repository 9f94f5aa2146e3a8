//! # Procedural Generation
//!
//! Fills terrain zones with blocks. Every column is a pure function of its `(x, z)`
//! coordinates and the constants below, so regenerating a column always reproduces it.
//!
//! ## Per column
//!
//! 1. Two biome blend factors: `local` (Perlin noise at unit frequency) and `regional`
//!    (Perlin noise at 1/1024, offset to decorrelate it from `local`). Because Perlin
//!    noise vanishes on lattice points and columns sit on integer coordinates, `local`
//!    is always 0 for generated columns.
//! 2. A surface height from two warped Perlin "mountain" fields and two Worley "ridge"
//!    fields, blended by `local` and then `regional`, around a baseline of 128.
//! 3. Every voxel from bedrock up to the surface (or the water line at 138, whichever is
//!    higher) classified by biome, depth and a two-octave 3D cave field.

use cgmath::{Vector2, Vector3};
use log::info;
use web_time::Instant;

use super::{coords_of, key_of, zone_origin, Terrain, ZONE_SIZE};
use crate::error::{WorldError, WorldResult};
use crate::noise::{fbm_2d, mix, perlin_noise_2d, perlin_noise_3d, smoothstep, worley_noise_2d};
use crate::voxels::block::{block_type::BlockType, direction::Direction};
use crate::voxels::chunk::{CHUNK_DEPTH, CHUNK_HEIGHT, CHUNK_WIDTH};

/// Columns are filled at least up to this height; lower surfaces are flooded.
pub const WATER_LEVEL: i32 = 138;
/// Surface height for a zero height field.
pub const BASE_HEIGHT: f32 = 128.0;
/// Caves are only carved at or below this height.
pub const CAVE_CEILING: i32 = 128;
/// Caves at or below this height fill with lava.
pub const LAVA_LEVEL: i32 = 25;
/// Temperate rocky surfaces at or above this height are capped with snow.
pub const SNOW_LINE: i32 = 200;

/// Octaves summed by each height field.
const HEIGHT_OCTAVES: usize = 4;
/// Added to columns before sampling the regional biome field.
const BIOME_OFFSET: [f32; 2] = [1323.112, 4432.432];

/// The two biome blend factors of a column, each in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BiomeBlend {
    /// Small-scale blend between the smooth and ridged height fields
    pub local: f32,
    /// Large-scale biome selector; below 0.5 is temperate, otherwise dry or frozen
    pub regional: f32,
}

/// Everything about a column that does not depend on `y`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColumnSample {
    /// World X
    pub x: i32,
    /// World Z
    pub z: i32,
    /// Biome blend factors
    pub blend: BiomeBlend,
    /// Surface height, in `[0, 255]`
    pub surface: i32,
    /// Domain offset applied to the cave field
    pub cave_offset: Vector3<f32>,
}

impl ColumnSample {
    /// Samples all column-level noise at `(x, z)`.
    pub fn at(x: i32, z: i32) -> Self {
        let xz = Vector2::new(x as f32, z as f32);
        let blend = biome_blend(x, z);
        ColumnSample {
            x,
            z,
            blend,
            surface: calc_height(x, z, blend),
            cave_offset: Vector3::new(fbm_2d(xz / 256.0), 0.0, fbm_2d(xz / 300.0))
                + Vector3::new(1000.0, 1000.0, 1000.0),
        }
    }

    /// Highest `y` the column fill writes.
    pub fn fill_height(&self) -> i32 {
        self.surface.max(WATER_LEVEL)
    }
}

/// Computes the biome blend factors of column `(x, z)`.
pub fn biome_blend(x: i32, z: i32) -> BiomeBlend {
    let xz = Vector2::new(x as f32, z as f32);
    let offset = Vector2::new(BIOME_OFFSET[0], BIOME_OFFSET[1]);
    BiomeBlend {
        local: smoothstep(0.25, 0.75, perlin_noise_2d(xz)),
        regional: smoothstep(0.25, 0.75, perlin_noise_2d(xz / 1024.0 + offset)),
    }
}

fn perlin_octaves(xz: Vector2<f32>, warp: Vector2<f32>, wavelength: f32) -> f32 {
    let mut amplitude = 0.5;
    let mut wavelength = wavelength;
    let mut total = 0.0;
    for _ in 0..HEIGHT_OCTAVES {
        total += perlin_noise_2d((xz + warp) / wavelength) * amplitude;
        amplitude *= 0.5;
        wavelength *= 0.5;
    }
    total
}

fn worley_octaves(xz: Vector2<f32>, wavelength: f32, scale: f32) -> f32 {
    let mut amplitude = 0.5;
    let mut wavelength = wavelength;
    let mut total = 0.0;
    for _ in 0..HEIGHT_OCTAVES {
        total += worley_noise_2d(xz / wavelength) * scale * amplitude;
        amplitude *= 0.5;
        wavelength *= 0.5;
    }
    total
}

/// Computes the surface height of column `(x, z)`.
///
/// # Returns
/// The floored height, clamped to `[0, 255]`.
pub fn calc_height(x: i32, z: i32, blend: BiomeBlend) -> i32 {
    let xz = Vector2::new(x as f32, z as f32);

    let near_warp =
        (Vector2::new(fbm_2d(xz / 256.0), fbm_2d(xz / 300.0)) + Vector2::new(1000.0, 1000.0)) * 75.0;
    let near = mix(
        perlin_octaves(xz, near_warp, 256.0),
        worley_octaves(xz, 64.0, 1.0),
        blend.local,
    );

    let far_warp = Vector2::new(fbm_2d(xz / 2560.0), fbm_2d(xz / 3000.0)) * 175.0;
    let far = mix(
        perlin_octaves(xz, far_warp, 512.0),
        worley_octaves(xz, 128.0, 0.2),
        blend.local,
    );

    let height = (BASE_HEIGHT + mix(near, far, blend.regional) * BASE_HEIGHT).floor();
    (height as i32).clamp(0, CHUNK_HEIGHT - 1)
}

fn is_cave(x: i32, y: i32, z: i32, cave_offset: Vector3<f32>) -> bool {
    let p = Vector3::new(x as f32, y as f32, z as f32) + cave_offset;
    perlin_noise_3d(p / 64.0) <= -0.35 || perlin_noise_3d(p / 16.0).abs() < 0.125
}

/// Classifies the voxel at height `y` of a column.
pub fn biome_block(y: i32, column: &ColumnSample) -> BlockType {
    if y == 0 {
        return BlockType::BEDROCK;
    }

    let surface = column.surface;
    let temperate = column.blend.regional < 0.5;

    if y <= CAVE_CEILING && y <= surface {
        if !is_cave(column.x, y, column.z, column.cave_offset) {
            return BlockType::STONE;
        }
        return if y <= LAVA_LEVEL {
            BlockType::LAVA
        } else if temperate && surface < CAVE_CEILING {
            BlockType::WATER
        } else {
            BlockType::EMPTY
        };
    }

    if temperate {
        if y > surface {
            BlockType::WATER
        } else if column.blend.local < 0.5 {
            if y == surface {
                BlockType::GRASS
            } else {
                BlockType::DIRT
            }
        } else if y >= SNOW_LINE && y == surface {
            BlockType::SNOW
        } else if worley_noise_2d(Vector2::new(column.x as f32, column.z as f32) / 64.0) < 0.95 {
            BlockType::STONE
        } else {
            BlockType::DIRT
        }
    } else if column.blend.local < 0.5 {
        if y > surface {
            BlockType::EMPTY
        } else if y < surface - 3 {
            BlockType::STONE
        } else {
            BlockType::SAND
        }
    } else if y > surface {
        BlockType::ICE
    } else if y < surface - 5 {
        BlockType::STONE
    } else {
        BlockType::SNOW
    }
}

impl Terrain {
    /// Generates every terrain zone overlapping `[min_x, max_x) x [min_z, max_z)` that
    /// has not been generated yet.
    ///
    /// Zones are generated whole. Backing chunks are created where missing and reused
    /// otherwise; every chunk written to, plus its lateral neighbours, has its mesh
    /// marked stale.
    pub fn generate_zone(&mut self, min_x: i32, max_x: i32, min_z: i32, max_z: i32) -> WorldResult<()> {
        let (first_x, first_z) = zone_origin(min_x, min_z);

        for zone_z in (first_z..max_z).step_by(ZONE_SIZE as usize) {
            for zone_x in (first_x..max_x).step_by(ZONE_SIZE as usize) {
                if self.generated_zones.insert(key_of(zone_x, zone_z)) {
                    self.generate_single_zone(zone_x, zone_z)?;
                }
            }
        }
        Ok(())
    }

    fn generate_single_zone(&mut self, zone_x: i32, zone_z: i32) -> WorldResult<()> {
        let started = Instant::now();

        let mut touched = Vec::new();
        for z in (zone_z..zone_z + ZONE_SIZE).step_by(CHUNK_DEPTH as usize) {
            for x in (zone_x..zone_x + ZONE_SIZE).step_by(CHUNK_WIDTH as usize) {
                touched.push(self.get_or_create_chunk_at(x, z).key());
            }
        }

        for z in zone_z..zone_z + ZONE_SIZE {
            for x in zone_x..zone_x + ZONE_SIZE {
                self.fill_column(&ColumnSample::at(x, z))?;
            }
        }

        for key in touched {
            let (x, z) = coords_of(key);
            self.mark_mesh_stale(x, z);
            for direction in Direction::lateral() {
                let step = direction.offset();
                self.mark_mesh_stale(x + step.x * CHUNK_WIDTH, z + step.z * CHUNK_DEPTH);
            }
        }

        info!(
            "Generated terrain zone ( {}, {} ) in {:?}",
            zone_x,
            zone_z,
            started.elapsed()
        );
        Ok(())
    }

    fn fill_column(&mut self, column: &ColumnSample) -> WorldResult<()> {
        let (x, z) = (column.x, column.z);
        let chunk = self
            .chunk_at_mut(x, z)
            .ok_or(WorldError::MissingChunk { x, y: 0, z })?;
        let (local_x, local_z) = (x - chunk.min_x(), z - chunk.min_z());

        for y in 0..=column.fill_height() {
            chunk.set_block_at(local_x, y, local_z, biome_block(y, column))?;
        }
        Ok(())
    }
}
