// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Curved flight between two points.
//!
//! The path is a quadratic Bézier whose control point sits above the
//! midpoint of the chord (toward −y, which is up on screen) by
//! `arc_height_ratio × chord length`. Progress along the curve is eased.
//! The sprite faces along the curve tangent.

use kurbo::{ParamCurve, ParamCurveDeriv, Point, QuadBez, Vec2};

use super::{Animation, AnimationHandle, SpriteState, start};
use crate::easing::ease_in_out_cubic;
use crate::scheduler::FrameScheduler;
use crate::time::Duration;

/// Tangents shorter than this are treated as "no direction".
const MIN_TANGENT: f64 = 1e-9;

/// Shape of a flight path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FlightConfig {
    /// Arc height as a fraction of the straight-line distance.
    pub arc_height_ratio: f64,
    /// Rotation in degrees used when the tangent has no direction, e.g. when
    /// start and end coincide.
    pub fallback_rotation: f64,
}

impl FlightConfig {
    /// A gentle arc.
    pub const STANDARD: Self = Self {
        arc_height_ratio: 0.35,
        fallback_rotation: 0.0,
    };
}

impl Default for FlightConfig {
    fn default() -> Self {
        Self::STANDARD
    }
}

/// A sprite flying from `from` to `to` along an arc.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flight {
    path: QuadBez,
    duration: Duration,
    fallback_rotation: f64,
}

impl Flight {
    /// Builds the flight path.
    #[must_use]
    pub fn new(from: Point, to: Point, duration: Duration, config: FlightConfig) -> Self {
        let ratio = if config.arc_height_ratio.is_finite() {
            config.arc_height_ratio.max(0.0)
        } else {
            0.0
        };
        let lift = from.distance(to) * ratio;
        let control = from.midpoint(to) - Vec2::new(0.0, lift);
        let fallback_rotation = if config.fallback_rotation.is_finite() {
            config.fallback_rotation
        } else {
            0.0
        };
        Self {
            path: QuadBez::new(from, control, to),
            duration,
            fallback_rotation,
        }
    }

    /// The curve the sprite follows.
    #[must_use]
    pub fn path(&self) -> QuadBez {
        self.path
    }

    /// Heading in degrees at curve parameter `t`.
    #[must_use]
    pub fn rotation_at(&self, t: f64) -> f64 {
        let tangent = self.path.deriv().eval(t).to_vec2();
        if !tangent.is_finite() || tangent.hypot() < MIN_TANGENT {
            return self.fallback_rotation;
        }
        libm::atan2(tangent.y, tangent.x).to_degrees()
    }
}

impl Animation for Flight {
    type State = SpriteState;

    fn duration(&self) -> Duration {
        self.duration
    }

    fn sample(&self, elapsed: Duration) -> SpriteState {
        let progress = self.duration.progress(elapsed);
        let t = ease_in_out_cubic(progress);
        let position = if progress >= 1.0 {
            self.path.p2
        } else {
            self.path.eval(t)
        };
        SpriteState {
            position,
            rotation: self.rotation_at(t),
            scale: 1.0,
        }
    }
}

/// Starts a [`Flight`].
pub fn start_flight(
    scheduler: &FrameScheduler,
    from: Point,
    to: Point,
    duration: Duration,
    config: FlightConfig,
    on_update: impl FnMut(SpriteState) + 'static,
    on_complete: impl FnOnce() + 'static,
) -> AnimationHandle {
    start(
        scheduler,
        Flight::new(from, to, duration, config),
        on_update,
        on_complete,
    )
}

#[cfg(test)]
mod tests {
    use super::super::testing::{Harness, Recorder};
    use super::*;

    fn flight(from: Point, to: Point) -> Flight {
        Flight::new(from, to, Duration::from_millis(1000), FlightConfig::STANDARD)
    }

    #[test]
    fn arcs_upward() {
        let f = flight(Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        let mid = f.sample(Duration::from_millis(500)).position;
        // Apex of a quadratic is halfway to the control point: 0.35 × 200 / 2.
        assert!((mid.x - 100.0).abs() < 1e-9);
        assert!((mid.y + 35.0).abs() < 1e-9, "got {mid:?}");
    }

    #[test]
    fn starts_and_ends_on_endpoints() {
        let a = Point::new(-40.0, 10.0);
        let b = Point::new(90.0, 70.0);
        let f = flight(a, b);
        assert_eq!(f.sample(Duration::ZERO).position, a);
        assert_eq!(f.sample(Duration::from_millis(1000)).position, b);
        assert_eq!(f.sample(Duration::from_millis(5000)).position, b);
    }

    #[test]
    fn faces_direction_of_travel() {
        let f = flight(Point::new(0.0, 0.0), Point::new(200.0, 0.0));
        // Climbing at the start (−y is up), level at the apex, diving at the end.
        assert!(f.rotation_at(0.0) < 0.0);
        assert!(f.rotation_at(0.5).abs() < 1e-9);
        assert!(f.rotation_at(1.0) > 0.0);

        let straight = Flight::new(
            Point::ORIGIN,
            Point::new(0.0, 100.0),
            Duration::from_millis(10),
            FlightConfig {
                arc_height_ratio: 0.0,
                ..FlightConfig::STANDARD
            },
        );
        assert!((straight.rotation_at(0.3) - 90.0).abs() < 1e-9);
    }

    #[test]
    fn coincident_endpoints_never_nan() {
        let p = Point::new(12.0, 34.0);
        let f = flight(p, p);
        for ms in [0, 1, 250, 500, 999, 1000, 2000] {
            let s = f.sample(Duration::from_millis(ms));
            assert!(s.rotation.is_finite(), "rotation NaN at {ms} ms");
            assert_eq!(s.rotation, FlightConfig::STANDARD.fallback_rotation);
            assert!(s.position.distance(p) < 1e-9);
        }
    }

    #[test]
    fn rotation_is_finite_along_any_path() {
        let f = flight(Point::new(5.0, 5.0), Point::new(-300.0, 800.0));
        for i in 0..=100 {
            let s = f.sample(Duration::from_millis(i * 10));
            assert!(s.rotation.is_finite());
            assert!(s.position.is_finite());
        }
    }

    #[test]
    fn scheduled_flight_reports_sprites() {
        let h = Harness::new();
        let rec = Recorder::new();
        let to = Point::new(100.0, 100.0);
        start_flight(
            &h.scheduler,
            Point::ORIGIN,
            to,
            Duration::from_millis(300),
            FlightConfig::STANDARD,
            rec.on_update(),
            rec.on_complete(),
        );
        h.run(Duration::from_millis(100), 3);
        assert_eq!(rec.completions.get(), 1);
        assert_eq!(rec.last().map(|s| s.position), Some(to));
    }
}
