// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Seeded 2D value noise.
//!
//! Lattice corners get a hashed value in `[0, 1]`; samples between corners
//! are smoothstep-interpolated, so the field is continuous. [`ValueNoise::fbm`]
//! sums octaves for a softer, cloud-like texture.

/// Coherent value noise over the plane.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ValueNoise {
    seed: u32,
}

impl ValueNoise {
    /// Creates a noise field. Equal seeds give equal fields.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self { seed }
    }

    /// Samples the field at `(x, y)`. Result is in `[0, 1]`.
    ///
    /// Non-finite coordinates sample the origin.
    #[must_use]
    pub fn sample(&self, x: f64, y: f64) -> f64 {
        let (x, y) = if x.is_finite() && y.is_finite() {
            (x, y)
        } else {
            (0.0, 0.0)
        };
        let fx0 = libm::floor(x);
        let fy0 = libm::floor(y);
        let sx = smoothstep(x - fx0);
        let sy = smoothstep(y - fy0);
        let (ix, iy) = (lattice_coord(fx0), lattice_coord(fy0));

        let corner = |dx: i32, dy: i32| {
            let h = hash2(ix.wrapping_add(dx), iy.wrapping_add(dy), self.seed);
            f64::from(h) / f64::from(u32::MAX)
        };
        let top = lerp(corner(0, 0), corner(1, 0), sx);
        let bottom = lerp(corner(0, 1), corner(1, 1), sx);
        lerp(top, bottom, sy)
    }

    /// Fractal sum of `octaves` samples, each at double the frequency and half
    /// the amplitude of the last. Normalized to `[0, 1]`.
    #[must_use]
    pub fn fbm(&self, x: f64, y: f64, octaves: u32) -> f64 {
        let octaves = octaves.clamp(1, 8);
        let mut sum = 0.0;
        let mut norm = 0.0;
        let mut amplitude = 1.0;
        let mut frequency = 1.0;
        for octave in 0..octaves {
            let layer = Self::new(self.seed.wrapping_add(octave.wrapping_mul(0x9E37)));
            sum += amplitude * layer.sample(x * frequency, y * frequency);
            norm += amplitude;
            amplitude *= 0.5;
            frequency *= 2.0;
        }
        sum / norm
    }
}

fn smoothstep(t: f64) -> f64 {
    t * t * (3.0 - 2.0 * t)
}

fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Wraps a floored coordinate onto the `i32` lattice.
#[expect(
    clippy::cast_possible_truncation,
    reason = "lattice coordinates wrap; only local coherence matters"
)]
fn lattice_coord(v: f64) -> i32 {
    libm::fmod(v, 2_147_483_648.0) as i32
}

fn hash_u32(mut x: u32) -> u32 {
    x ^= x >> 16;
    x = x.wrapping_mul(0x7feb_352d);
    x ^= x >> 15;
    x = x.wrapping_mul(0x846c_a68b);
    x ^= x >> 16;
    x
}

#[expect(clippy::cast_sign_loss, reason = "bit reinterpretation for hashing")]
fn hash2(ix: i32, iy: i32, seed: u32) -> u32 {
    let mut h = seed ^ 0x9e37_79b9;
    h ^= (ix as u32).wrapping_mul(0x85eb_ca6b);
    h = hash_u32(h);
    h ^= (iy as u32).wrapping_mul(0xc2b2_ae35);
    hash_u32(h)
}
