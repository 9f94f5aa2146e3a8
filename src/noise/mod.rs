//! # Noise Library
//!
//! Deterministic scalar fields used by terrain generation. Every function here is pure:
//! the same coordinate always produces the same value, on every call, with no seed or
//! table stored anywhere. Reproducible worlds fall out of the coordinates alone.
//!
//! ## Contents
//!
//! * [`hash_to_unit_vector2`] / [`hash_to_unit_vector3`] - lattice point to pseudo-random direction
//! * [`value_noise_2d`] and [`fbm_2d`] - smooth lattice value noise and its 8-octave sum
//! * [`perlin_noise_2d`] / [`perlin_noise_3d`] - gradient noise built from surflets
//! * [`worley_noise_2d`] - distance to the nearest feature point of a cellular lattice
//!
//! The hashes use the classic `fract(sin(dot(p, k)) * 43758.5453)` construction. It is not
//! a good random number generator, only a cheap and stable one.

use cgmath::{InnerSpace, Vector2, Vector3};

mod perlin;
mod worley;

pub use perlin::{perlin_noise_2d, perlin_noise_3d};
pub use worley::worley_noise_2d;

/// Multiplier applied to `sin` before taking the fractional part in the lattice hashes.
const HASH_SCALE: f32 = 43758.5453;

/// Row stride of the value-noise lattice hash.
const VALUE_NOISE_STRIDE: f32 = 257.0;

/// Number of octaves summed by [`fbm_2d`].
pub const FBM_OCTAVES: usize = 8;

/// Fractional part, always in `[0, 1)` (also for negative inputs).
#[inline]
pub fn fract(x: f32) -> f32 {
    x - x.floor()
}

/// Linear interpolation between `a` and `b`.
#[inline]
pub fn mix(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite smoothstep of `x` between the two edges, clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(edge0: f32, edge1: f32, x: f32) -> f32 {
    let t = ((x - edge0) / (edge1 - edge0)).clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Maps a lattice point to a pseudo-random 2D unit vector.
pub fn hash_to_unit_vector2(p: Vector2<f32>) -> Vector2<f32> {
    let hashed = Vector2::new(
        fract(p.dot(Vector2::new(127.1, 311.7)).sin() * HASH_SCALE),
        fract(p.dot(Vector2::new(269.5, 183.3)).sin() * HASH_SCALE),
    );
    let direction = hashed * 2.0 - Vector2::new(1.0, 1.0);
    if direction.magnitude2() == 0.0 {
        return Vector2::unit_x();
    }
    direction.normalize()
}

/// Maps a lattice point to a pseudo-random 3D unit vector.
pub fn hash_to_unit_vector3(p: Vector3<f32>) -> Vector3<f32> {
    let hashed = Vector3::new(
        fract(p.dot(Vector3::new(127.1, 311.7, 321.5)).sin() * HASH_SCALE),
        fract(p.dot(Vector3::new(269.5, 183.3, 43243.0)).sin() * HASH_SCALE),
        fract(p.dot(Vector3::new(420.6, 631.2, 321.43)).sin() * HASH_SCALE),
    );
    let direction = hashed * 2.0 - Vector3::new(1.0, 1.0, 1.0);
    if direction.magnitude2() == 0.0 {
        return Vector3::unit_x();
    }
    direction.normalize()
}

/// Cubic fade applied component-wise by value noise.
#[inline]
fn cubic_fade(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Scalar hash of a value-noise lattice index, in `[0, 1)`.
#[inline]
fn lattice_value(u: f32) -> f32 {
    fract(fract(1.234_567_9 * u) * u / 0.987_654_3)
}

/// Smoothly interpolated lattice value noise.
///
/// # Returns
/// A value in `[0, 1)`.
pub fn value_noise_2d(uv: Vector2<f32>) -> f32 {
    let cell = Vector2::new(uv.x.floor(), uv.y.floor());
    let local = uv - cell;

    let u = cell.x + cell.y * VALUE_NOISE_STRIDE;
    let v00 = lattice_value(u);
    let v10 = lattice_value(u + 1.0);
    let v01 = lattice_value(u + VALUE_NOISE_STRIDE);
    let v11 = lattice_value(u + VALUE_NOISE_STRIDE + 1.0);

    let fade_x = cubic_fade(local.x);
    let fade_y = cubic_fade(local.y);
    mix(mix(v00, v10, fade_x), mix(v01, v11, fade_x), fade_y)
}

/// Fractal Brownian motion over [`value_noise_2d`].
///
/// Sums [`FBM_OCTAVES`] octaves starting at frequency 5 and amplitude 1/2, doubling the
/// frequency and halving the amplitude each octave.
///
/// # Returns
/// A value in `[0, 1)`.
pub fn fbm_2d(uv: Vector2<f32>) -> f32 {
    let mut amplitude = 0.5;
    let mut frequency = 5.0;
    let mut total = 0.0;
    for _ in 0..FBM_OCTAVES {
        total += value_noise_2d(uv * frequency) * amplitude;
        amplitude *= 0.5;
        frequency *= 2.0;
    }
    total
}
