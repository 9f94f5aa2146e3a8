//! # Grid March
//!
//! Voxel traversal raycasting against the terrain, used for collision resolution and
//! block targeting.
//!
//! The march walks from cell to cell along the ray. At each step it computes, for each
//! axis the ray moves along, the distance to the next cell boundary, and advances to
//! the nearest one (ties go to the lower axis). It stops at the first non-empty cell it
//! enters, or once the next boundary lies beyond the end of the ray. Cells in unloaded
//! chunks count as empty.
//!
//! ## Wall hugging
//!
//! A ray that starts exactly on a cell boundary is ambiguous about which cell it is in.
//! With `hugging_wall` set, the first step treats the origin as touching the boundary
//! it sits on, so the cell across it is tested at distance zero. Without it, the
//! origin counts as already inside the cell on the far side of a boundary it is
//! leaving in the negative direction.

use cgmath::{EuclideanSpace, InnerSpace, Point3, Vector3};

use crate::voxels::terrain::Terrain;

/// Outcome of a grid march.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MarchResult {
    /// Distance travelled along the ray, never more than its length
    pub distance: f32,
    /// The non-empty cell that stopped the march, if any
    pub hit: Option<Point3<i32>>,
}

impl MarchResult {
    fn miss(distance: f32) -> Self {
        MarchResult { distance, hit: None }
    }

    /// Whether the march stopped on a block.
    pub fn is_hit(&self) -> bool {
        self.hit.is_some()
    }
}

fn floor_cell(position: Vector3<f32>) -> Vector3<i32> {
    Vector3::new(
        position.x.floor() as i32,
        position.y.floor() as i32,
        position.z.floor() as i32,
    )
}

/// Marches from `origin` along `ray` through the terrain's voxel grid.
///
/// # Arguments
/// * `origin` - Where the ray starts
/// * `ray` - Direction and length of the ray
/// * `terrain` - The blocks to march through
/// * `hugging_wall` - Whether the origin is flush against the wall the ray moves toward
///
/// # Returns
/// The first non-empty cell entered and the distance to its boundary, or a miss with
/// the distance covered. A zero-length ray is a miss at distance zero.
pub fn grid_march(
    origin: Point3<f32>,
    ray: Vector3<f32>,
    terrain: &Terrain,
    hugging_wall: bool,
) -> MarchResult {
    let max_len = ray.magnitude();
    if max_len == 0.0 || !max_len.is_finite() {
        return MarchResult::miss(0.0);
    }
    let direction = ray / max_len;

    let mut position = origin.to_vec();
    let mut cell = floor_cell(position);
    let mut hugging = hugging_wall;
    let mut travelled: f32 = 0.0;

    while travelled < max_len {
        let mut min_t = f32::INFINITY;
        let mut interface: Option<(usize, i32)> = None;

        for axis in 0..3 {
            let step = direction[axis];
            if step == 0.0 {
                continue;
            }

            let positive = step > 0.0;
            let on_boundary = position[axis] == cell[axis] as f32;
            let offset = if hugging {
                hugging = false;
                if positive && !on_boundary {
                    1
                } else {
                    0
                }
            } else if on_boundary && !positive {
                -1
            } else if positive {
                1
            } else {
                0
            };

            let boundary = cell[axis] + offset;
            let axis_t = (boundary as f32 - position[axis]) / step;
            if axis_t < min_t {
                min_t = axis_t;
                interface = Some((axis, boundary));
            }
        }

        let Some((axis, boundary)) = interface else {
            return MarchResult::miss(travelled);
        };
        if travelled + min_t > max_len {
            return MarchResult::miss(max_len);
        }

        travelled += min_t;
        position += direction * min_t;
        position[axis] = boundary as f32;

        cell = floor_cell(position);
        if direction[axis] < 0.0 {
            cell[axis] -= 1;
        }

        if !terrain.block_or_empty(cell.x, cell.y, cell.z).is_empty() {
            return MarchResult {
                distance: travelled.min(max_len),
                hit: Some(Point3::from_vec(cell)),
            };
        }
    }

    MarchResult::miss(max_len)
}

/// The twelve points collision rays are cast from: the four corners of a 1x1 footprint
/// centred on `position`, at heights 0, 1 and 2 above it.
///
/// Per level the order is (+X, +Z), (-X, +Z), (-X, -Z), (+X, -Z).
pub fn collision_vertices(position: Point3<f32>) -> [Point3<f32>; 12] {
    let corners = [(0.5, 0.5), (-0.5, 0.5), (-0.5, -0.5), (0.5, -0.5)];
    let mut vertices = [position; 12];
    for level in 0..3 {
        for (corner, (dx, dz)) in corners.iter().enumerate() {
            vertices[level * 4 + corner] =
                Point3::new(position.x + dx, position.y + level as f32, position.z + dz);
        }
    }
    vertices
}
