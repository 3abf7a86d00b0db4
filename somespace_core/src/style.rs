// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Care → visual style resolution.
//!
//! The resolver is a total function over a closed domain with a default:
//! absent care, neutral care, and any undocumented level all resolve to
//! [`VisualStyle::NEUTRAL`]. Negative levels darken and glow harder as they
//! get stronger; positive levels warm up the same way; the dream maximum is a
//! star with a three-stop gradient and the strongest glow.

use crate::color::Color;
use crate::entity::Care;

/// Outline used for the primary shape.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    /// A filled disc with a radial gradient.
    Disc,
    /// A five-pointed star.
    Star,
}

/// One stop of a radial gradient, from the center (`0.0`) to the rim (`1.0`).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GradientStop {
    /// Position along the radius, in `[0, 1]`.
    pub offset: f64,
    /// Color at this position.
    pub color: Color,
}

/// How an entity of a given care is drawn.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct VisualStyle {
    /// Primary outline.
    pub shape: ShapeKind,
    /// Flat fill, used where gradients are not drawn (legends, glyph tint).
    pub fill: Color,
    /// Glow color.
    pub glow: Color,
    /// Glow blur radius in pixels at zoom 1; `0.0` means no glow.
    pub glow_blur: f64,
    /// Radial gradient stops ordered by offset.
    pub stops: &'static [GradientStop],
}

const fn stop(offset: f64, color: Color) -> GradientStop {
    GradientStop { offset, color }
}

impl VisualStyle {
    /// Style for absent, neutral, and undocumented care values.
    pub const NEUTRAL: Self = Self {
        shape: ShapeKind::Disc,
        fill: Color::rgb(156, 163, 175),
        glow: Color::TRANSPARENT,
        glow_blur: 0.0,
        stops: &[
            stop(0.0, Color::rgb(229, 231, 235)),
            stop(1.0, Color::rgb(107, 114, 128)),
        ],
    };

    const HATE: Self = Self {
        shape: ShapeKind::Disc,
        fill: Color::rgb(69, 10, 10),
        glow: Color::rgb(127, 29, 29),
        glow_blur: 20.0,
        stops: &[
            stop(0.0, Color::rgb(127, 29, 29)),
            stop(1.0, Color::rgb(31, 5, 5)),
        ],
    };

    const DISLIKE: Self = Self {
        shape: ShapeKind::Disc,
        fill: Color::rgb(55, 65, 81),
        glow: Color::rgb(75, 85, 99),
        glow_blur: 5.0,
        stops: &[
            stop(0.0, Color::rgb(75, 85, 99)),
            stop(1.0, Color::rgb(17, 24, 39)),
        ],
    };

    const LIKE: Self = Self {
        shape: ShapeKind::Disc,
        fill: Color::rgb(251, 191, 36),
        glow: Color::rgb(253, 230, 138),
        glow_blur: 5.0,
        stops: &[
            stop(0.0, Color::rgb(254, 243, 199)),
            stop(1.0, Color::rgb(245, 158, 11)),
        ],
    };

    const LOVE: Self = Self {
        shape: ShapeKind::Disc,
        fill: Color::rgb(249, 115, 22),
        glow: Color::rgb(251, 146, 60),
        glow_blur: 20.0,
        stops: &[
            stop(0.0, Color::rgb(255, 237, 213)),
            stop(1.0, Color::rgb(234, 88, 12)),
        ],
    };

    const DREAM: Self = Self {
        shape: ShapeKind::Star,
        fill: Color::rgb(253, 224, 71),
        glow: Color::rgb(253, 224, 71),
        glow_blur: 40.0,
        stops: &[
            stop(0.0, Color::rgb(255, 255, 255)),
            stop(0.5, Color::rgb(253, 224, 71)),
            stop(1.0, Color::rgb(245, 158, 11)),
        ],
    };

    /// Samples the gradient at `t` in `[0, 1]`.
    ///
    /// Positions before the first stop take its color, positions after the
    /// last stop take the last color. An empty stop list yields [`fill`].
    ///
    /// [`fill`]: Self::fill
    #[must_use]
    pub fn gradient_at(&self, t: f64) -> Color {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let Some(first) = self.stops.first() else {
            return self.fill;
        };
        if t <= first.offset {
            return first.color;
        }
        for pair in self.stops.windows(2) {
            let (a, b) = (pair[0], pair[1]);
            if t <= b.offset {
                let span = b.offset - a.offset;
                let local = if span > 0.0 { (t - a.offset) / span } else { 1.0 };
                return a.color.lerp(b.color, local);
            }
        }
        self.stops[self.stops.len() - 1].color
    }

    /// Returns `true` if this style draws a glow.
    #[must_use]
    pub fn has_glow(&self) -> bool {
        self.glow_blur > 0.0
    }
}

/// Resolves the draw style for a care value.
#[must_use]
pub const fn style_for(care: Option<Care>) -> VisualStyle {
    match care {
        Some(Care::Hate) => VisualStyle::HATE,
        Some(Care::Dislike) => VisualStyle::DISLIKE,
        Some(Care::Like) => VisualStyle::LIKE,
        Some(Care::Love) => VisualStyle::LOVE,
        Some(Care::Dream) => VisualStyle::DREAM,
        Some(Care::Neutral) | None => VisualStyle::NEUTRAL,
    }
}

/// Resolves the draw style for a raw ordinal level.
///
/// Levels outside the documented domain resolve to [`VisualStyle::NEUTRAL`].
#[must_use]
pub const fn style_for_level(level: i8) -> VisualStyle {
    style_for(Care::from_level(level))
}
