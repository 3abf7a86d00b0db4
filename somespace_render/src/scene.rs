// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Scene rendering: background, texture, then every visible entity.
//!
//! [`render`] is a pure function of its inputs. It fills the surface, paints
//! the background texture, builds a [`DrawPlan`] and rasterizes each item in
//! entity order:
//!
//! 1. style glow,
//! 2. the body: star for the dream level, gradient disc for any other rated
//!    entity, question mark for unrated ones,
//! 3. filter halo on top (when filter colors are supplied).
//!
//! Text and media content are never drawn. Hosts that show them place their
//! own overlay at the points returned by [`overlay_anchors`].

use alloc::vec::Vec;

use kurbo::{Point, Rect, Size};
use somespace_core::camera::{Camera, world_to_screen};
use somespace_core::color::Color;
use somespace_core::entity::{Entity, EntityId};
use somespace_core::hit;
use somespace_core::trace::RenderStatsEvent;

use crate::plan::{DrawItem, DrawPlan, Glyph};
use crate::raster;
use crate::surface::Surface;
use crate::texture::{self, TextureConfig};

/// Renderer parameters.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RenderConfig {
    /// Entity radius in world units at zoom 1 and scale 1.
    pub base_radius: f64,
    /// Extra screen pixels around the viewport inside which entities are
    /// still drawn.
    pub cull_margin: f64,
    /// Halo ring radius as a multiple of the entity radius.
    pub halo_scale: f64,
    /// Halo falloff width in pixels.
    pub halo_blur: f64,
    /// Halo peak alpha.
    pub halo_alpha: f64,
    /// Surface fill under the texture.
    pub background: Color,
    /// Background texture.
    pub texture: TextureConfig,
}

impl RenderConfig {
    /// The standard look.
    pub const STANDARD: Self = Self {
        base_radius: hit::BASE_RADIUS,
        cull_margin: 100.0,
        halo_scale: 1.2,
        halo_blur: 30.0,
        halo_alpha: 0.5,
        background: Color::rgb(12, 10, 24),
        texture: TextureConfig::NOISE,
    };
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Everything one frame depends on.
#[derive(Clone, Copy, Debug)]
pub struct Scene<'a> {
    /// Entities in paint order.
    pub entities: &'a [Entity],
    /// Camera for this frame.
    pub camera: Camera,
    /// Radius in world units kept clear of background texture.
    pub clear_radius: f64,
    /// Entity that is drawn even when off screen.
    pub selected: Option<EntityId>,
    /// Active filter colors; non-empty turns on halos.
    pub filter_colors: &'a [Color],
}

impl<'a> Scene<'a> {
    /// A scene with no selection and no filters.
    #[must_use]
    pub fn new(entities: &'a [Entity], camera: Camera, clear_radius: f64) -> Self {
        Self {
            entities,
            camera,
            clear_radius,
            selected: None,
            filter_colors: &[],
        }
    }
}

/// Counts from one [`render`] call.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderStats {
    /// Entities painted.
    pub drawn: u32,
    /// Entities skipped by culling.
    pub culled: u32,
    /// Halos painted.
    pub halos: u32,
}

impl RenderStats {
    /// Converts to a trace event for `frame_index`.
    #[must_use]
    pub fn to_event(self, frame_index: u64) -> RenderStatsEvent {
        RenderStatsEvent {
            frame_index,
            drawn: self.drawn,
            culled: self.culled,
            halos: self.halos,
        }
    }
}

/// Renders one frame with [`RenderConfig::STANDARD`].
pub fn render(
    surface: &mut Surface,
    entities: &[Entity],
    camera: &Camera,
    clear_radius: f64,
    selected: Option<EntityId>,
    filter_colors: &[Color],
) -> RenderStats {
    let scene = Scene {
        entities,
        camera: *camera,
        clear_radius,
        selected,
        filter_colors,
    };
    render_with(&RenderConfig::STANDARD, surface, &scene)
}

/// Renders one frame.
pub fn render_with(
    config: &RenderConfig,
    surface: &mut Surface,
    scene: &Scene<'_>,
) -> RenderStats {
    let mut plan = DrawPlan::new();
    render_into(config, surface, scene, &mut plan)
}

/// Renders one frame, reusing `plan`'s allocation.
///
/// On return `plan` holds the items that were drawn.
pub fn render_into(
    config: &RenderConfig,
    surface: &mut Surface,
    scene: &Scene<'_>,
    plan: &mut DrawPlan,
) -> RenderStats {
    surface.clear(config.background);
    texture::paint(surface, &scene.camera, scene.clear_radius, &config.texture);

    plan.build(config, scene, surface.size());
    let mut stats = RenderStats {
        culled: saturating_u32(plan.culled),
        ..RenderStats::default()
    };
    for item in &plan.items {
        draw_item(surface, item);
        stats.drawn += 1;
        if let Some(color) = plan.halo {
            raster::halo(
                surface,
                item.center,
                item.radius,
                item.radius * config.halo_scale,
                config.halo_blur,
                color,
                config.halo_alpha * item.opacity,
            );
            stats.halos += 1;
        }
    }
    stats
}

fn draw_item(surface: &mut Surface, item: &DrawItem) {
    let DrawItem {
        center,
        radius,
        opacity,
        style,
        ..
    } = *item;
    if style.has_glow() {
        raster::glow(surface, center, radius, style.glow_blur, style.glow, opacity);
    }
    match item.glyph {
        Glyph::Star => raster::gradient_star(surface, center, radius, &style, opacity),
        Glyph::Disc => raster::gradient_disc(surface, center, radius, &style, opacity),
        Glyph::Question => raster::question_glyph(surface, center, radius, style.fill, opacity),
    }
}

fn saturating_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}

/// Screen positions of the entities within `margin` pixels of the viewport.
///
/// Hosts pin text and media overlays to these points.
#[must_use]
pub fn overlay_anchors(
    entities: &[Entity],
    camera: &Camera,
    viewport: Size,
    margin: f64,
) -> Vec<(EntityId, Point)> {
    let margin = if margin.is_finite() { margin } else { 0.0 };
    let visible = Rect::from_origin_size(Point::ORIGIN, viewport).inflate(margin, margin);
    entities
        .iter()
        .filter_map(|e| {
            let p = world_to_screen(e.position, camera, viewport);
            visible.contains(p).then_some((e.id, p))
        })
        .collect()
}
