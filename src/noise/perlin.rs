//! Gradient (Perlin) noise as a sum of surflets.
//!
//! Each lattice corner around the sample contributes `dot(offset, gradient)` scaled by a
//! quintic falloff per axis that reaches zero one cell away, so the field is C2-continuous
//! and vanishes exactly on lattice points.

use cgmath::{InnerSpace, Vector2, Vector3};

use super::{hash_to_unit_vector2, hash_to_unit_vector3};

/// Quintic falloff `1 - 6d^5 + 15d^4 - 10d^3` for a distance `d` in `[0, 1]`.
#[inline]
fn falloff(distance: f32) -> f32 {
    let d3 = distance * distance * distance;
    let d4 = d3 * distance;
    let d5 = d4 * distance;
    1.0 - 6.0 * d5 + 15.0 * d4 - 10.0 * d3
}

fn surflet_2d(p: Vector2<f32>, grid_point: Vector2<f32>) -> f32 {
    let weight = falloff((p.x - grid_point.x).abs()) * falloff((p.y - grid_point.y).abs());
    let gradient = hash_to_unit_vector2(grid_point);
    (p - grid_point).dot(gradient) * weight
}

fn surflet_3d(p: Vector3<f32>, grid_point: Vector3<f32>) -> f32 {
    let weight = falloff((p.x - grid_point.x).abs())
        * falloff((p.y - grid_point.y).abs())
        * falloff((p.z - grid_point.z).abs());
    let gradient = hash_to_unit_vector3(grid_point);
    (p - grid_point).dot(gradient) * weight
}

/// 2D Perlin noise from the four lattice corners around `uv`.
///
/// # Returns
/// A value roughly in `[-1, 1]`; exactly `0` on lattice points.
pub fn perlin_noise_2d(uv: Vector2<f32>) -> f32 {
    let low = Vector2::new(uv.x.floor(), uv.y.floor());
    surflet_2d(uv, low)
        + surflet_2d(uv, low + Vector2::new(1.0, 0.0))
        + surflet_2d(uv, low + Vector2::new(1.0, 1.0))
        + surflet_2d(uv, low + Vector2::new(0.0, 1.0))
}

/// 3D Perlin noise from the eight lattice corners around `p`.
///
/// # Returns
/// A value roughly in `[-1, 1]`; exactly `0` on lattice points.
pub fn perlin_noise_3d(p: Vector3<f32>) -> f32 {
    let low = Vector3::new(p.x.floor(), p.y.floor(), p.z.floor());
    let mut total = 0.0;
    for dx in 0..=1 {
        for dy in 0..=1 {
            for dz in 0..=1 {
                total += surflet_3d(p, low + Vector3::new(dx as f32, dy as f32, dz as f32));
            }
        }
    }
    total
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vanishes_on_lattice_points() {
        for x in -5..5 {
            for z in -5..5 {
                assert_eq!(perlin_noise_2d(Vector2::new(x as f32, z as f32)), 0.0);
                assert_eq!(
                    perlin_noise_3d(Vector3::new(x as f32, (x * z) as f32, z as f32)),
                    0.0
                );
            }
        }
    }

    #[test]
    fn stays_bounded_and_varies() {
        let mut distinct = 0;
        let mut last = f32::NAN;
        for i in 0..2000 {
            let t = i as f32 * 0.173;
            let v2 = perlin_noise_2d(Vector2::new(t, t * 0.61 + 3.3));
            let v3 = perlin_noise_3d(Vector3::new(t * 0.37, t * 0.11 - 8.0, t));
            assert!(v2.abs() <= 1.0, "2d sample {} out of range", v2);
            assert!(v3.abs() <= 1.0, "3d sample {} out of range", v3);
            if v2 != last {
                distinct += 1;
            }
            last = v2;
        }
        assert!(distinct > 1000);
    }

    #[test]
    fn is_continuous_across_cell_edges() {
        let before = perlin_noise_2d(Vector2::new(2.9999, 7.5));
        let after = perlin_noise_2d(Vector2::new(3.0001, 7.5));
        assert!((before - after).abs() < 1e-3);
    }
}
