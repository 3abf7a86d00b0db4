// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Camera value type and world ↔ screen projection.
//!
//! The camera is a look-at point in world space plus a zoom factor. A world
//! point `p` lands on screen at
//!
//! ```text
//! ((p.x − camera.x) · zoom + width / 2, (p.y − camera.y) · zoom + height / 2)
//! ```
//!
//! so the camera's look-at point is always the viewport center.
//! [`screen_to_world`] is the exact algebraic inverse.
//!
//! Cameras are owned by the host. Every operation here takes a camera by value
//! and returns a new one.

use kurbo::{Affine, Point, Size, Vec2};

/// Zoom limits and wheel sensitivity.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CameraConfig {
    /// Smallest allowed zoom. Must be strictly positive.
    pub min_zoom: f64,
    /// Largest allowed zoom.
    pub max_zoom: f64,
    /// Zoom change per unit of wheel delta.
    pub zoom_speed: f64,
}

impl CameraConfig {
    /// The limits used by the stock experience.
    ///
    /// A zoom speed of `0.001` turns typical wheel deltas (tens to hundreds)
    /// into steps of a few percent.
    pub const STANDARD: Self = Self {
        min_zoom: 0.05,
        max_zoom: 5.0,
        zoom_speed: 0.001,
    };
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A 2D camera: world-space look-at point and zoom.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Camera {
    /// World-space x of the viewport center.
    pub x: f64,
    /// World-space y of the viewport center.
    pub y: f64,
    /// Screen pixels per world unit. Always strictly positive.
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            zoom: 1.0,
        }
    }
}

impl Camera {
    /// Creates a camera looking at `(x, y)`.
    #[must_use]
    pub const fn new(x: f64, y: f64, zoom: f64) -> Self {
        Self { x, y, zoom }
    }

    /// The world-space look-at point.
    #[must_use]
    pub const fn center(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Returns this camera looking at `p`, zoom unchanged.
    #[must_use]
    pub const fn looking_at(self, p: Point) -> Self {
        Self {
            x: p.x,
            y: p.y,
            ..self
        }
    }

    /// Re-validates a host-supplied camera against `config`.
    ///
    /// Non-finite positions reset to the origin; non-finite or non-positive
    /// zoom becomes `min_zoom`; everything else is clamped into range.
    #[must_use]
    pub fn clamped(self, config: &CameraConfig) -> Self {
        let finite_or_zero = |v: f64| if v.is_finite() { v } else { 0.0 };
        let zoom = if self.zoom.is_finite() && self.zoom > 0.0 {
            clamp_zoom(self.zoom, config.min_zoom, config.max_zoom)
        } else {
            safe_min(config.min_zoom)
        };
        Self {
            x: finite_or_zero(self.x),
            y: finite_or_zero(self.y),
            zoom,
        }
    }

    /// The world → screen transform for a viewport, as a [`kurbo::Affine`].
    ///
    /// Equivalent to [`world_to_screen`] for every point.
    #[must_use]
    pub fn to_affine(&self, viewport: Size) -> Affine {
        Affine::translate(Vec2::new(viewport.width / 2.0, viewport.height / 2.0))
            * Affine::scale(self.zoom)
            * Affine::translate(Vec2::new(-self.x, -self.y))
    }
}

/// Projects a world point to screen pixels.
#[must_use]
pub fn world_to_screen(p: Point, camera: &Camera, viewport: Size) -> Point {
    Point::new(
        (p.x - camera.x) * camera.zoom + viewport.width / 2.0,
        (p.y - camera.y) * camera.zoom + viewport.height / 2.0,
    )
}

/// Maps a screen pixel back to world space.
///
/// Exact inverse of [`world_to_screen`] for any strictly positive zoom.
#[must_use]
pub fn screen_to_world(p: Point, camera: &Camera, viewport: Size) -> Point {
    let zoom = safe_min(camera.zoom);
    Point::new(
        (p.x - viewport.width / 2.0) / zoom + camera.x,
        (p.y - viewport.height / 2.0) / zoom + camera.y,
    )
}

/// Drag-to-pan: moves the camera opposite to a screen-space drag.
///
/// Dragging right by `dx` pixels moves the look-at point left by
/// `dx / zoom` world units, so the content follows the pointer.
#[must_use]
pub fn pan(camera: Camera, dx: f64, dy: f64) -> Camera {
    let zoom = safe_min(camera.zoom);
    Camera {
        x: camera.x - dx / zoom,
        y: camera.y - dy / zoom,
        zoom: camera.zoom,
    }
}

/// Applies a wheel delta using [`CameraConfig::STANDARD`]'s speed.
///
/// The result always lies in `[min, max]`.
#[must_use]
pub fn zoom(camera: Camera, wheel_delta: f64, min: f64, max: f64) -> Camera {
    zoom_with_speed(camera, wheel_delta, min, max, CameraConfig::STANDARD.zoom_speed)
}

/// Applies a wheel delta using the limits and speed of `config`.
#[must_use]
pub fn zoom_with(camera: Camera, wheel_delta: f64, config: &CameraConfig) -> Camera {
    zoom_with_speed(
        camera,
        wheel_delta,
        config.min_zoom,
        config.max_zoom,
        config.zoom_speed,
    )
}

fn zoom_with_speed(camera: Camera, wheel_delta: f64, min: f64, max: f64, speed: f64) -> Camera {
    let delta = if wheel_delta.is_finite() {
        wheel_delta * speed
    } else if wheel_delta > 0.0 {
        f64::MAX
    } else if wheel_delta < 0.0 {
        f64::MIN
    } else {
        0.0
    };
    let base = if camera.zoom.is_finite() { camera.zoom } else { 1.0 };
    Camera {
        zoom: clamp_zoom(base + delta, min, max),
        ..camera
    }
}

/// Clamps `z` into `[min, max]`, keeping the result strictly positive even
/// for degenerate bounds.
fn clamp_zoom(z: f64, min: f64, max: f64) -> f64 {
    let min = safe_min(min);
    let max = if max.is_finite() && max >= min {
        max
    } else {
        min
    };
    if z.is_nan() { min } else { z.clamp(min, max) }
}

/// Smallest zoom the engine will divide by.
pub const MIN_POSITIVE_ZOOM: f64 = 1e-6;

fn safe_min(z: f64) -> f64 {
    if z.is_finite() && z >= MIN_POSITIVE_ZOOM {
        z
    } else {
        MIN_POSITIVE_ZOOM
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-9 && (a.y - b.y).abs() < 1e-9
    }

    #[test]
    fn camera_center_maps_to_viewport_center() {
        let cam = Camera::new(40.0, -10.0, 2.5);
        let vp = Size::new(800.0, 600.0);
        assert_eq!(
            world_to_screen(cam.center(), &cam, vp),
            Point::new(400.0, 300.0)
        );
    }

    #[test]
    fn projection_round_trips() {
        let vp = Size::new(1280.0, 720.0);
        for cam in [
            Camera::new(0.0, 0.0, 1.0),
            Camera::new(-350.0, 1200.0, 0.05),
            Camera::new(13.5, -7.25, 4.9),
        ] {
            for p in [
                Point::ORIGIN,
                Point::new(150.0, -150.0),
                Point::new(-9000.0, 42.0),
            ] {
                let back = screen_to_world(world_to_screen(p, &cam, vp), &cam, vp);
                assert!(close(back, p), "{p:?} via {cam:?} came back as {back:?}");
            }
        }
    }

    #[test]
    fn affine_matches_formula() {
        let cam = Camera::new(12.0, 34.0, 1.75);
        let vp = Size::new(640.0, 480.0);
        let p = Point::new(-80.0, 220.0);
        assert!(close(cam.to_affine(vp) * p, world_to_screen(p, &cam, vp)));
    }

    #[test]
    fn zero_viewport_is_well_defined() {
        let cam = Camera::new(5.0, 5.0, 2.0);
        let s = world_to_screen(Point::new(6.0, 7.0), &cam, Size::ZERO);
        assert_eq!(s, Point::new(2.0, 4.0));
        let w = screen_to_world(s, &cam, Size::ZERO);
        assert!(close(w, Point::new(6.0, 7.0)));
    }

    #[test]
    fn pan_moves_opposite_to_drag() {
        let cam = Camera::new(0.0, 0.0, 2.0);
        let moved = pan(cam, 100.0, -50.0);
        assert_eq!(moved.x, -50.0);
        assert_eq!(moved.y, 25.0);
        assert_eq!(moved.zoom, 2.0);
    }

    #[test]
    fn zoom_is_always_clamped() {
        let cam = Camera::default();
        assert_eq!(zoom(cam, 1e12, 0.1, 3.0).zoom, 3.0);
        assert_eq!(zoom(cam, -1e12, 0.1, 3.0).zoom, 0.1);
        assert_eq!(zoom(cam, f64::INFINITY, 0.1, 3.0).zoom, 3.0);
        assert_eq!(zoom(cam, f64::NAN, 0.1, 3.0).zoom, 1.0);
        let stepped = zoom(cam, 100.0, 0.1, 3.0).zoom;
        assert!((stepped - 1.1).abs() < 1e-12, "got {stepped}");
    }

    #[test]
    fn zoom_with_uses_config_bounds() {
        let config = CameraConfig::STANDARD;
        let cam = zoom_with(Camera::default(), 1e9, &config);
        assert_eq!(cam.zoom, config.max_zoom);
    }

    #[test]
    fn degenerate_bounds_stay_positive() {
        let cam = Camera::default();
        let z = zoom(cam, -500.0, 0.0, -1.0).zoom;
        assert!(z > 0.0, "zoom must stay positive, got {z}");
    }

    #[test]
    fn clamped_repairs_bad_cameras() {
        let config = CameraConfig::STANDARD;
        let cam = Camera::new(f64::NAN, 3.0, -2.0).clamped(&config);
        assert_eq!(cam, Camera::new(0.0, 3.0, config.min_zoom));
        let cam = Camera::new(1.0, 2.0, 50.0).clamped(&config);
        assert_eq!(cam.zoom, config.max_zoom);
    }
}
