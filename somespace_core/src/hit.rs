// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Screen-point → topmost entity.
//!
//! Entities are tested in reverse input order, so the one painted last wins
//! when hit circles overlap. The hit radius is `base_radius × zoom` and
//! ignores per-entity scale overrides: an entity enlarged for emphasis is
//! still picked with the same footprint as its neighbours.

use kurbo::{Point, Size};

use crate::camera::{Camera, world_to_screen};
use crate::entity::{Entity, EntityId};

/// Default entity radius in world units at zoom 1.
pub const BASE_RADIUS: f64 = 20.0;

/// Returns the id of the topmost entity under `point`, if any.
#[must_use]
pub fn hit_test(
    point: Point,
    entities: &[Entity],
    camera: &Camera,
    viewport: Size,
) -> Option<EntityId> {
    hit_test_with(BASE_RADIUS, point, entities, camera, viewport)
}

/// Like [`hit_test`], with a caller-chosen base radius.
#[must_use]
pub fn hit_test_with(
    base_radius: f64,
    point: Point,
    entities: &[Entity],
    camera: &Camera,
    viewport: Size,
) -> Option<EntityId> {
    if !point.is_finite() {
        return None;
    }
    let radius = (base_radius * camera.zoom).max(0.0);
    entities
        .iter()
        .rev()
        .find(|e| world_to_screen(e.position, camera, viewport).distance(point) <= radius)
        .map(|e| e.id)
}
