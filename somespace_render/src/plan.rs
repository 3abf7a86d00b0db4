// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Draw plan: the projected, culled, dispatched entities for one frame.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use somespace_core::camera::world_to_screen;
use somespace_core::color::{self, Color};
use somespace_core::entity::EntityId;
use somespace_core::style::{ShapeKind, VisualStyle, style_for};

use crate::scene::{RenderConfig, Scene};

/// Which rasterizer draws an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Glyph {
    /// Radial-gradient disc.
    Disc,
    /// Five-pointed star.
    Star,
    /// Question mark for entities without a care rating.
    Question,
}

/// A single entity ready to rasterize.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    /// The entity this item draws.
    pub id: EntityId,
    /// Screen-space center.
    pub center: Point,
    /// Screen-space radius, after zoom and the entity's scale override.
    pub radius: f64,
    /// Effective opacity in `[0, 1]`.
    pub opacity: f64,
    /// Rasterizer.
    pub glyph: Glyph,
    /// Colors and glow.
    pub style: VisualStyle,
}

/// Ordered draw items for one frame.
///
/// Items keep the input order of the entities, so later items paint over
/// earlier ones.
#[derive(Clone, Debug, Default)]
pub struct DrawPlan {
    /// Items in paint order.
    pub items: Vec<DrawItem>,
    /// Entities skipped because they were off screen.
    pub culled: usize,
    /// Halo color, present when the scene has filter colors.
    pub halo: Option<Color>,
}

impl DrawPlan {
    /// Creates an empty plan.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Clears the plan for reuse.
    pub fn clear(&mut self) {
        self.items.clear();
        self.culled = 0;
        self.halo = None;
    }

    /// Rebuilds the plan for `scene` on a `viewport`-sized surface.
    pub fn build(&mut self, config: &RenderConfig, scene: &Scene<'_>, viewport: Size) {
        self.clear();
        let zoom = if scene.camera.zoom.is_finite() {
            scene.camera.zoom.max(0.0)
        } else {
            0.0
        };
        let base = config.base_radius.max(0.0) * zoom;
        let visible = Rect::from_origin_size(Point::ORIGIN, viewport);

        for entity in scene.entities {
            let center = world_to_screen(entity.position, &scene.camera, viewport);
            let radius = base * entity.effective_scale();
            let selected = scene.selected == Some(entity.id);
            if !selected && !on_screen(visible, center, radius + config.cull_margin) {
                self.culled += 1;
                continue;
            }
            let style = style_for(entity.care);
            let glyph = match (entity.care, style.shape) {
                (None, _) => Glyph::Question,
                (Some(_), ShapeKind::Star) => Glyph::Star,
                (Some(_), ShapeKind::Disc) => Glyph::Disc,
            };
            self.items.push(DrawItem {
                id: entity.id,
                center,
                radius,
                opacity: entity.effective_opacity(),
                glyph,
                style,
            });
        }

        if !scene.filter_colors.is_empty() {
            self.halo = Some(color::blend(scene.filter_colors));
        }
    }
}

fn on_screen(visible: Rect, center: Point, reach: f64) -> bool {
    center.is_finite() && visible.inflate(reach, reach).contains(center)
}
