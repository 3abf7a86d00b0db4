// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hexagonal ring layout.
//!
//! Item 0 sits at the origin. The remaining items fill concentric rings
//! `r = 1, 2, …`; ring `r` holds up to `6r` items (its hexagonal capacity),
//! spaced evenly by angle at radius `r × spacing`. The last ring holds
//! whatever is left over, still spread around the full circle.
//!
//! Layout is a pure mapping from `(count, bound)` to positions. Hosts call
//! [`distribute`] again whenever the entity count changes; positions are
//! never adjusted in place. Organic jitter is a separate, seeded
//! post-process ([`jitter`]) so the base layout stays exactly testable.

use alloc::vec::Vec;
use core::f64::consts::TAU;

use kurbo::{Point, Vec2};
use rand::rngs::SmallRng;
use rand::{Rng as _, SeedableRng as _};

/// Tunables for [`distribute_with`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LatticeConfig {
    /// Distance between rings, in world units.
    pub spacing: f64,
    /// Multiplier from layout bound to the background's clear radius.
    pub clear_radius_scale: f64,
}

impl LatticeConfig {
    /// The layout used by the stock experience.
    pub const STANDARD: Self = Self {
        spacing: 150.0,
        clear_radius_scale: 1.5,
    };
}

impl Default for LatticeConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// Result of a layout pass.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Lattice {
    /// One world-space position per item, in item order.
    pub positions: Vec<Point>,
    /// World-space radius around the camera focus that the background keeps
    /// clear.
    pub clear_radius: f64,
}

/// Lays out `count` items with [`LatticeConfig::STANDARD`].
#[must_use]
pub fn distribute(count: usize, bound: f64) -> Lattice {
    distribute_with(&LatticeConfig::STANDARD, count, bound)
}

/// Lays out `count` items on hexagonal rings.
#[must_use]
pub fn distribute_with(config: &LatticeConfig, count: usize, bound: f64) -> Lattice {
    let mut positions = Vec::with_capacity(count);
    if count > 0 {
        positions.push(Point::ORIGIN);
    }

    let mut remaining = count.saturating_sub(1);
    let mut ring = 1_usize;
    while remaining > 0 {
        let in_ring = (6 * ring).min(remaining);
        let radius = ring as f64 * config.spacing;
        for i in 0..in_ring {
            let angle = i as f64 / in_ring as f64 * TAU;
            positions.push(Point::new(
                radius * libm::cos(angle),
                radius * libm::sin(angle),
            ));
        }
        remaining -= in_ring;
        ring += 1;
    }

    Lattice {
        positions,
        clear_radius: clear_radius_with(config, bound),
    }
}

/// Background clear radius for a layout bound, using the standard scale.
#[must_use]
pub fn clear_radius(bound: f64) -> f64 {
    clear_radius_with(&LatticeConfig::STANDARD, bound)
}

fn clear_radius_with(config: &LatticeConfig, bound: f64) -> f64 {
    if bound.is_finite() && bound > 0.0 {
        bound * config.clear_radius_scale
    } else {
        0.0
    }
}

/// Returns the ring index item `index` lands on (`0` for the origin).
#[must_use]
pub fn ring_of(index: usize) -> usize {
    if index == 0 {
        return 0;
    }
    // Rings 1..=r hold 3r(r+1) items in total.
    let mut ring = 1;
    let mut capacity = 6;
    while index > capacity {
        ring += 1;
        capacity += 6 * ring;
    }
    ring
}

/// Offsets every point by a deterministic pseudo-random vector of length at
/// most `amplitude`.
///
/// The same `(points, amplitude, seed)` always yields the same output.
#[must_use]
pub fn jitter(points: &[Point], amplitude: f64, seed: u64) -> Vec<Point> {
    let amplitude = if amplitude.is_finite() {
        amplitude.max(0.0)
    } else {
        0.0
    };
    let mut rng = SmallRng::seed_from_u64(seed);
    points
        .iter()
        .map(|&p| {
            let angle = rng.gen_range(0.0..TAU);
            let len = rng.gen_range(0.0..=amplitude);
            p + Vec2::new(len * libm::cos(angle), len * libm::sin(angle))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    fn angle_of(p: Point) -> f64 {
        let a = libm::atan2(p.y, p.x);
        if a < -EPS { a + TAU } else { a.max(0.0) }
    }

    #[test]
    fn zero_items_is_empty() {
        assert!(distribute(0, 500.0).positions.is_empty());
    }

    #[test]
    fn single_item_is_at_origin() {
        assert_eq!(distribute(1, 500.0).positions, [Point::ORIGIN]);
    }

    #[test]
    fn seven_items_fill_first_ring() {
        let lattice = distribute(7, 500.0);
        let pts = &lattice.positions;
        assert_eq!(pts.len(), 7);
        assert_eq!(pts[0], Point::ORIGIN);

        let spacing = LatticeConfig::STANDARD.spacing;
        for (i, p) in pts[1..].iter().enumerate() {
            let r = p.to_vec2().hypot();
            assert!((r - spacing).abs() < EPS, "item {} radius {r}", i + 1);

            let expected = i as f64 * TAU / 6.0;
            let angle = angle_of(*p);
            assert!((angle - expected).abs() < EPS, "item {} angle {angle}", i + 1);
        }
    }

    #[test]
    fn partial_last_ring_spreads_evenly() {
        // 1 + 6 + 3: the second ring holds 3 items, 120° apart.
        let pts = distribute(10, 0.0).positions;
        let ring2 = &pts[7..];
        assert_eq!(ring2.len(), 3);
        for p in ring2 {
            let r = p.to_vec2().hypot();
            assert!((r - 2.0 * LatticeConfig::STANDARD.spacing).abs() < EPS);
        }
        let a = angle_of(ring2[1]);
        assert!((a - TAU / 3.0).abs() < EPS);
    }

    #[test]
    fn layout_is_deterministic() {
        assert_eq!(distribute(50, 100.0), distribute(50, 100.0));
    }

    #[test]
    fn clear_radius_is_scaled_bound() {
        assert_eq!(distribute(3, 200.0).clear_radius, 300.0);
        assert_eq!(clear_radius(-5.0), 0.0);
        assert_eq!(clear_radius(f64::NAN), 0.0);
    }

    #[test]
    fn ring_of_matches_layout() {
        assert_eq!(ring_of(0), 0);
        assert_eq!(ring_of(1), 1);
        assert_eq!(ring_of(6), 1);
        assert_eq!(ring_of(7), 2);
        assert_eq!(ring_of(18), 2);
        assert_eq!(ring_of(19), 3);
    }

    #[test]
    fn jitter_is_seeded_and_bounded() {
        let base = distribute(20, 0.0).positions;
        let a = jitter(&base, 10.0, 7);
        let b = jitter(&base, 10.0, 7);
        let c = jitter(&base, 10.0, 8);
        assert_eq!(a, b, "same seed must reproduce");
        assert_ne!(a, c, "different seed should move points differently");
        for (p, q) in base.iter().zip(&a) {
            assert!(p.distance(*q) <= 10.0 + EPS);
        }
        assert_eq!(jitter(&base, 0.0, 1), base);
    }

    #[test]
    fn jitter_handles_degenerate_input() {
        let base = distribute(7, 0.0).positions;
        assert_eq!(jitter(&base, f64::NAN, 3), base);
        assert_eq!(jitter(&base, -5.0, 3), base);
        assert!(jitter(&[], 10.0, 3).is_empty());
    }
}
