//! Cellular (Worley) noise.

use cgmath::{InnerSpace, Vector2};

use super::hash_to_unit_vector2;

/// Distance from `uv` to the nearest feature point of the 3x3 cells around it.
///
/// Every lattice cell owns one feature point, offset from its corner by the cell's
/// hashed unit vector. Distances are capped at 1.
///
/// # Returns
/// A value in `[0, 1]`.
pub fn worley_noise_2d(uv: Vector2<f32>) -> f32 {
    let cell = Vector2::new(uv.x.floor(), uv.y.floor());
    let local = uv - cell;

    let mut min_distance: f32 = 1.0;
    for y in -1..=1 {
        for x in -1..=1 {
            let neighbor = Vector2::new(x as f32, y as f32);
            let feature = hash_to_unit_vector2(cell + neighbor);
            let distance = (neighbor + feature - local).magnitude();
            min_distance = min_distance.min(distance);
        }
    }
    min_distance
}
