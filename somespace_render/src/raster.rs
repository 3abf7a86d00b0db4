// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Shape rasterization onto a [`Surface`].
//!
//! Every routine takes an `opacity` that multiplies all of its alphas, which
//! is how per-entity opacity overrides reach the pixels. Coordinates are in
//! screen pixels; pixel `(x, y)` is sampled at its center.

use core::f64::consts::{FRAC_PI_2, PI};

use kurbo::{BezPath, Point, Rect, Shape};
use somespace_core::color::Color;
use somespace_core::style::VisualStyle;

use crate::surface::{Surface, pixel_span};

/// Peak alpha of a style glow at the shape's edge.
const GLOW_ALPHA: f64 = 0.6;

/// Star inner radius as a fraction of the outer radius.
const STAR_INNER_RATIO: f64 = 0.45;

/// Per-axis subpixel offsets for supersampled fills.
const SUBSAMPLES: [f64; 2] = [-0.25, 0.25];

/// Visits every pixel center inside `bounds` that lies on the surface.
fn for_each_pixel(
    surface: &mut Surface,
    bounds: Rect,
    mut f: impl FnMut(&mut Surface, u32, u32, Point),
) {
    let Some((x0, x1)) = pixel_span(bounds.x0, bounds.x1, surface.width()) else {
        return;
    };
    let Some((y0, y1)) = pixel_span(bounds.y0, bounds.y1, surface.height()) else {
        return;
    };
    for y in y0..y1 {
        for x in x0..x1 {
            let p = Point::new(f64::from(x) + 0.5, f64::from(y) + 0.5);
            f(surface, x, y, p);
        }
    }
}

/// `false` for zero, negatives and NaN.
fn positive(v: f64) -> bool {
    v > 0.0
}

fn square_around(center: Point, half: f64) -> Rect {
    Rect::new(center.x - half, center.y - half, center.x + half, center.y + half)
}

/// Paints a soft glow that peaks at `radius` and fades out over `blur`
/// pixels. Pixels inside the radius get the peak alpha.
pub fn glow(
    surface: &mut Surface,
    center: Point,
    radius: f64,
    blur: f64,
    color: Color,
    opacity: f64,
) {
    if !positive(blur) || radius.is_nan() || radius < 0.0 {
        return;
    }
    let bounds = square_around(center, radius + blur);
    for_each_pixel(surface, bounds, |s, x, y, p| {
        let outside = (p.distance(center) - radius).max(0.0);
        let falloff = (1.0 - outside / blur).max(0.0);
        let a = falloff * falloff * GLOW_ALPHA * opacity;
        if a > 0.0 {
            s.blend_pixel(x, y, color, a);
        }
    });
}

/// Paints a soft ring centered on `ring_radius` that leaves everything inside
/// `inner_radius` untouched.
///
/// Used for filter halos, which must not tint the entity body.
pub fn halo(
    surface: &mut Surface,
    center: Point,
    inner_radius: f64,
    ring_radius: f64,
    blur: f64,
    color: Color,
    alpha: f64,
) {
    if !positive(blur) || ring_radius.is_nan() || ring_radius < 0.0 {
        return;
    }
    let bounds = square_around(center, ring_radius + blur);
    for_each_pixel(surface, bounds, |s, x, y, p| {
        let d = p.distance(center);
        if d < inner_radius {
            return;
        }
        let falloff = (1.0 - (d - ring_radius).abs() / blur).max(0.0);
        let a = falloff * falloff * alpha;
        if a > 0.0 {
            s.blend_pixel(x, y, color, a);
        }
    });
}

/// Fills a disc with the style's radial gradient, anti-aliased at the rim.
pub fn gradient_disc(
    surface: &mut Surface,
    center: Point,
    radius: f64,
    style: &VisualStyle,
    opacity: f64,
) {
    if !positive(radius) {
        return;
    }
    let bounds = square_around(center, radius + 1.0);
    for_each_pixel(surface, bounds, |s, x, y, p| {
        let d = p.distance(center);
        let coverage = (radius + 0.5 - d).clamp(0.0, 1.0);
        if coverage > 0.0 {
            s.blend_pixel(x, y, style.gradient_at(d / radius), coverage * opacity);
        }
    });
}

/// Outline of an upright five-pointed star.
#[must_use]
pub fn star_path(center: Point, outer_radius: f64) -> BezPath {
    let inner_radius = outer_radius * STAR_INNER_RATIO;
    let mut path = BezPath::new();
    for i in 0..10_u32 {
        let r = if i % 2 == 0 { outer_radius } else { inner_radius };
        let angle = -FRAC_PI_2 + f64::from(i) * PI / 5.0;
        let p = Point::new(
            center.x + r * libm::cos(angle),
            center.y + r * libm::sin(angle),
        );
        if i == 0 {
            path.move_to(p);
        } else {
            path.line_to(p);
        }
    }
    path.close_path();
    path
}

/// Fills a star with the style's radial gradient, 2×2 supersampled.
pub fn gradient_star(
    surface: &mut Surface,
    center: Point,
    outer_radius: f64,
    style: &VisualStyle,
    opacity: f64,
) {
    if !positive(outer_radius) {
        return;
    }
    let path = star_path(center, outer_radius);
    let bounds = path.bounding_box().inflate(1.0, 1.0);
    for_each_pixel(surface, bounds, |s, x, y, p| {
        let mut hits = 0_u32;
        for dy in SUBSAMPLES {
            for dx in SUBSAMPLES {
                if path.winding(Point::new(p.x + dx, p.y + dy)) != 0 {
                    hits += 1;
                }
            }
        }
        if hits > 0 {
            let coverage = f64::from(hits) / 4.0;
            let t = p.distance(center) / outer_radius;
            s.blend_pixel(x, y, style.gradient_at(t), coverage * opacity);
        }
    });
}

/// A 5×7 question mark, one row per byte, high bit on the left.
const QUESTION_MARK: [u8; 7] = [
    0b01110, //
    0b10001, //
    0b00001, //
    0b00010, //
    0b00100, //
    0b00000, //
    0b00100, //
];

/// Draws a question-mark glyph filling a `2r × 2r` box around `center`.
pub fn question_glyph(
    surface: &mut Surface,
    center: Point,
    radius: f64,
    color: Color,
    opacity: f64,
) {
    if !positive(radius) {
        return;
    }
    // 7 rows tall, 5 columns wide, cells square.
    let cell = 2.0 * radius / 7.0;
    let origin = Point::new(center.x - 2.5 * cell, center.y - radius);
    let bounds = Rect::new(
        origin.x,
        origin.y,
        origin.x + 5.0 * cell,
        origin.y + 7.0 * cell,
    );
    for_each_pixel(surface, bounds, |s, x, y, p| {
        let col = libm::floor((p.x - origin.x) / cell);
        let row = libm::floor((p.y - origin.y) / cell);
        if glyph_bit(row, col) {
            s.blend_pixel(x, y, color, opacity);
        }
    });
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "row and column are range-checked first"
)]
fn glyph_bit(row: f64, col: f64) -> bool {
    if !(0.0..7.0).contains(&row) || !(0.0..5.0).contains(&col) {
        return false;
    }
    let bits = QUESTION_MARK[row as usize];
    bits & (1 << (4 - col as u32)) != 0
}
