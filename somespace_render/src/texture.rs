// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ambient background texture around a clear radius.
//!
//! The texture is fully transparent within `clear_radius` world units of the
//! camera focus, ramps up to `max_opacity` across a band of
//! `band_fraction × clear_radius`, and stays flat beyond that.
//!
//! Two strategies paint it:
//!
//! - [`TextureStrategy::Noise`] samples grayscale value noise in world space
//!   per pixel. The noise cell size is `cell_size / zoom` world units, so the
//!   pattern keeps the same on-screen grain at every zoom level.
//! - [`TextureStrategy::Gradient`] paints a flat tint through the same alpha
//!   ramp, anchored at the camera's screen projection. It skips the noise
//!   lookups entirely.
//!
//! Zoom and the derived cell scale are clamped to [`MIN_SCALE`] so extreme
//! or degenerate cameras never produce NaN pixels.

use kurbo::Point;
use somespace_core::camera::{Camera, screen_to_world, world_to_screen};
use somespace_core::color::Color;

use crate::noise::ValueNoise;
use crate::surface::Surface;

/// Smallest zoom or noise scale the generator will use.
pub const MIN_SCALE: f64 = 1e-4;

/// How the texture is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TextureStrategy {
    /// Per-pixel value noise in world space.
    Noise,
    /// A flat radial ramp in screen space.
    Gradient,
}

/// Texture parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TextureConfig {
    /// Which generator runs.
    pub strategy: TextureStrategy,
    /// Opacity beyond the transition band.
    pub max_opacity: f64,
    /// Width of the transition band as a fraction of the clear radius.
    pub band_fraction: f64,
    /// On-screen size of one noise cell, in pixels.
    pub cell_size: f64,
    /// Noise octaves.
    pub octaves: u32,
    /// Noise seed.
    pub seed: u32,
    /// Color of the gradient strategy; the noise strategy is grayscale.
    pub tint: Color,
}

impl TextureConfig {
    /// Grayscale noise.
    pub const NOISE: Self = Self {
        strategy: TextureStrategy::Noise,
        max_opacity: 0.6,
        band_fraction: 0.15,
        cell_size: 48.0,
        octaves: 3,
        seed: 0x5eed,
        tint: Color::rgb(128, 128, 128),
    };

    /// The cheap radial ramp.
    pub const GRADIENT: Self = Self {
        strategy: TextureStrategy::Gradient,
        ..Self::NOISE
    };
}

impl Default for TextureConfig {
    fn default() -> Self {
        Self::NOISE
    }
}

/// Texture opacity at `distance` from the focus.
///
/// `0` inside the clear radius, linear ramp across the band, `max_opacity`
/// beyond. A zero (or invalid) clear radius puts everything beyond the focus
/// at full opacity.
#[must_use]
pub fn alpha_at(distance: f64, clear_radius: f64, config: &TextureConfig) -> f64 {
    let max = if config.max_opacity.is_finite() {
        config.max_opacity.clamp(0.0, 1.0)
    } else {
        0.0
    };
    if distance.is_nan() {
        return 0.0;
    }
    let clear = if clear_radius.is_finite() {
        clear_radius.max(0.0)
    } else {
        0.0
    };
    if distance <= clear {
        return 0.0;
    }
    let fraction = if config.band_fraction.is_finite() {
        config.band_fraction.max(0.0)
    } else {
        0.0
    };
    let band = clear * fraction;
    if band <= MIN_SCALE {
        return max;
    }
    ((distance - clear) / band).min(1.0) * max
}

/// Paints the texture for `camera` over `surface`.
pub fn paint(surface: &mut Surface, camera: &Camera, clear_radius: f64, config: &TextureConfig) {
    match config.strategy {
        TextureStrategy::Noise => paint_noise(surface, camera, clear_radius, config),
        TextureStrategy::Gradient => paint_gradient(surface, camera, clear_radius, config),
    }
}

fn effective_zoom(camera: &Camera) -> f64 {
    if camera.zoom.is_finite() {
        camera.zoom.max(MIN_SCALE)
    } else {
        MIN_SCALE
    }
}

fn paint_noise(
    surface: &mut Surface,
    camera: &Camera,
    clear_radius: f64,
    config: &TextureConfig,
) {
    let viewport = surface.size();
    let zoom = effective_zoom(camera);
    let cam = Camera { zoom, ..*camera };
    let cell_px = if config.cell_size.is_finite() {
        config.cell_size.max(MIN_SCALE)
    } else {
        MIN_SCALE
    };
    let cell_world = (cell_px / zoom).max(MIN_SCALE);
    let noise = ValueNoise::new(config.seed);
    let focus = cam.center();

    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let screen = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let world = screen_to_world(screen, &cam, viewport);
            let alpha = alpha_at(world.distance(focus), clear_radius, config);
            if alpha <= 0.0 {
                continue;
            }
            let v = noise.fbm(world.x / cell_world, world.y / cell_world, config.octaves);
            let gray = Color::BLACK.lerp(Color::WHITE, v);
            surface.blend_pixel(x, y, gray, alpha);
        }
    }
}

fn paint_gradient(
    surface: &mut Surface,
    camera: &Camera,
    clear_radius: f64,
    config: &TextureConfig,
) {
    let viewport = surface.size();
    let zoom = effective_zoom(camera);
    let cam = Camera { zoom, ..*camera };
    let anchor = world_to_screen(cam.center(), &cam, viewport);
    let clear_px = if clear_radius.is_finite() {
        (clear_radius * zoom).max(0.0)
    } else {
        0.0
    };

    for y in 0..surface.height() {
        for x in 0..surface.width() {
            let screen = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            let alpha = alpha_at(screen.distance(anchor), clear_px, config);
            if alpha > 0.0 {
                surface.blend_pixel(x, y, config.tint, alpha);
            }
        }
    }
}
