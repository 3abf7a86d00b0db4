// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! RGBA8 pixel surface with source-over blending.

use alloc::vec;
use alloc::vec::Vec;

use kurbo::Size;
use somespace_core::color::Color;

/// A row-major RGBA8 pixel buffer with straight (non-premultiplied) alpha.
///
/// Byte order per pixel is `R, G, B, A`, which is what canvas `ImageData`
/// and PPM writers expect.
#[derive(Clone, PartialEq, Eq)]
pub struct Surface {
    width: u32,
    height: u32,
    pixels: Vec<u8>,
}

impl core::fmt::Debug for Surface {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

impl Surface {
    /// Creates a transparent surface. Either dimension may be zero.
    #[must_use]
    pub fn new(width: u32, height: u32) -> Self {
        let len = (width as usize) * (height as usize) * 4;
        Self {
            width,
            height,
            pixels: vec![0; len],
        }
    }

    /// Width in pixels.
    #[inline]
    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Size as a viewport.
    #[must_use]
    pub fn size(&self) -> Size {
        Size::new(f64::from(self.width), f64::from(self.height))
    }

    /// Raw RGBA bytes.
    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    /// Resizes to `width × height`, clearing to transparent.
    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
        self.pixels.clear();
        self.pixels.resize((width as usize) * (height as usize) * 4, 0);
    }

    /// Overwrites every pixel with `color`.
    pub fn clear(&mut self, color: Color) {
        for px in self.pixels.chunks_exact_mut(4) {
            px.copy_from_slice(&[color.r, color.g, color.b, color.a]);
        }
    }

    /// Reads a pixel, or `None` when out of bounds.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<Color> {
        let i = self.index(x, y)?;
        let px = &self.pixels[i..i + 4];
        Some(Color::rgba(px[0], px[1], px[2], px[3]))
    }

    /// Composites `color` over the pixel at `(x, y)` with its alpha scaled by
    /// `coverage` in `[0, 1]`. Out-of-bounds writes are ignored.
    pub fn blend_pixel(&mut self, x: u32, y: u32, color: Color, coverage: f64) {
        let Some(i) = self.index(x, y) else {
            return;
        };
        let coverage = if coverage.is_nan() {
            0.0
        } else {
            coverage.clamp(0.0, 1.0)
        };
        let sa = f64::from(color.a) / 255.0 * coverage;
        if sa <= 0.0 {
            return;
        }
        let px = &mut self.pixels[i..i + 4];
        let da = f64::from(px[3]) / 255.0;
        let out_a = sa + da * (1.0 - sa);
        let mix = |s: u8, d: u8| {
            let v = (f64::from(s) * sa + f64::from(d) * da * (1.0 - sa)) / out_a;
            to_channel(v)
        };
        px[0] = mix(color.r, px[0]);
        px[1] = mix(color.g, px[1]);
        px[2] = mix(color.b, px[2]);
        px[3] = to_channel(out_a * 255.0);
    }

    /// Composites `color` over every pixel with alpha scaled by `opacity`.
    ///
    /// Used for full-surface overlays such as a scene-change fade.
    pub fn overlay(&mut self, color: Color, opacity: f64) {
        if opacity.is_nan() || opacity <= 0.0 {
            return;
        }
        for y in 0..self.height {
            for x in 0..self.width {
                self.blend_pixel(x, y, color, opacity);
            }
        }
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        (x < self.width && y < self.height)
            .then(|| ((y as usize) * (self.width as usize) + (x as usize)) * 4)
    }
}

#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "value is rounded and clamped to 0..=255 first"
)]
fn to_channel(v: f64) -> u8 {
    if v.is_nan() {
        return 0;
    }
    libm::round(v).clamp(0.0, 255.0) as u8
}

/// Clamps a floating-point pixel span to `[0, limit)` as integer bounds.
///
/// Returns `None` if the span misses the surface entirely.
#[expect(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "values are clamped to 0..=limit first"
)]
pub(crate) fn pixel_span(min: f64, max: f64, limit: u32) -> Option<(u32, u32)> {
    if !(min.is_finite() && max.is_finite()) || limit == 0 {
        return None;
    }
    let lo = libm::floor(min).max(0.0);
    let hi = libm::ceil(max).min(f64::from(limit));
    (lo < hi).then(|| (lo as u32, hi as u32))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_surface_is_transparent() {
        let s = Surface::new(3, 2);
        assert_eq!(s.pixels().len(), 24);
        assert_eq!(s.pixel(2, 1), Some(Color::TRANSPARENT));
        assert_eq!(s.pixel(3, 0), None);
    }

    #[test]
    fn zero_sized_surface_is_fine() {
        let mut s = Surface::new(0, 10);
        s.clear(Color::WHITE);
        s.blend_pixel(0, 0, Color::BLACK, 1.0);
        assert!(s.pixels().is_empty());
        assert_eq!(s.size(), Size::new(0.0, 10.0));
    }

    #[test]
    fn opaque_source_replaces() {
        let mut s = Surface::new(1, 1);
        s.clear(Color::WHITE);
        s.blend_pixel(0, 0, Color::rgb(10, 20, 30), 1.0);
        assert_eq!(s.pixel(0, 0), Some(Color::rgb(10, 20, 30)));
    }

    #[test]
    fn half_coverage_mixes_over_opaque() {
        let mut s = Surface::new(1, 1);
        s.clear(Color::BLACK);
        s.blend_pixel(0, 0, Color::WHITE, 0.5);
        assert_eq!(s.pixel(0, 0), Some(Color::rgb(128, 128, 128)));
    }

    #[test]
    fn zero_coverage_is_noop() {
        let mut s = Surface::new(1, 1);
        s.clear(Color::BLACK);
        s.blend_pixel(0, 0, Color::WHITE, 0.0);
        s.blend_pixel(0, 0, Color::WHITE, f64::NAN);
        assert_eq!(s.pixel(0, 0), Some(Color::BLACK));
    }

    #[test]
    fn overlay_covers_everything() {
        let mut s = Surface::new(4, 4);
        s.clear(Color::rgb(200, 0, 0));
        s.overlay(Color::BLACK, 1.0);
        assert!(s.pixels().chunks_exact(4).all(|p| p == [0, 0, 0, 255]));
    }

    #[test]
    fn span_clamps_to_surface() {
        assert_eq!(pixel_span(-5.0, 2.5, 10), Some((0, 3)));
        assert_eq!(pixel_span(8.2, 50.0, 10), Some((8, 10)));
        assert_eq!(pixel_span(12.0, 20.0, 10), None);
        assert_eq!(pixel_span(f64::NAN, 2.0, 10), None);
    }
}
