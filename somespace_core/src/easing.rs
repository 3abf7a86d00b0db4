// Copyright 2026 the Somespace Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The shared easing curve.

/// Cubic ease-in-out.
///
/// `4t³` below the midpoint, `1 − (−2t + 2)³ / 2` above it. Input is clamped
/// to `[0, 1]`, so `ease_in_out_cubic(0.0) == 0.0` and
/// `ease_in_out_cubic(1.0) == 1.0` exactly.
#[must_use]
pub fn ease_in_out_cubic(t: f64) -> f64 {
    let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let k = -2.0 * t + 2.0;
        1.0 - k * k * k / 2.0
    }
}

/// Linear interpolation between `a` and `b`.
///
/// Returns `b` exactly at `t == 1.0`.
#[inline]
#[must_use]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    if t >= 1.0 { b } else { a + (b - a) * t }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoints_are_exact() {
        assert_eq!(ease_in_out_cubic(0.0), 0.0);
        assert_eq!(ease_in_out_cubic(1.0), 1.0);
        assert_eq!(ease_in_out_cubic(0.5), 0.5);
    }

    #[test]
    fn out_of_range_is_clamped() {
        assert_eq!(ease_in_out_cubic(-3.0), 0.0);
        assert_eq!(ease_in_out_cubic(7.0), 1.0);
        assert_eq!(ease_in_out_cubic(f64::NAN), 0.0);
    }

    #[test]
    fn curve_is_symmetric_and_monotonic() {
        let mut prev = 0.0;
        for i in 0..=100 {
            let t = f64::from(i) / 100.0;
            let v = ease_in_out_cubic(t);
            assert!(v >= prev, "not monotonic at t={t}");
            let mirrored = 1.0 - ease_in_out_cubic(1.0 - t);
            assert!((v - mirrored).abs() < 1e-12, "asymmetric at t={t}");
            prev = v;
        }
    }

    #[test]
    fn quarter_point_matches_formula() {
        assert!((ease_in_out_cubic(0.25) - 0.0625).abs() < 1e-12);
        assert!((ease_in_out_cubic(0.75) - 0.9375).abs() < 1e-12);
    }

    #[test]
    fn lerp_hits_end_exactly() {
        assert_eq!(lerp(0.1, 0.3, 1.0), 0.3);
        assert_eq!(lerp(2.0, 4.0, 0.5), 3.0);
    }
}
