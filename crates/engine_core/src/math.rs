//! Damping and angle math shared by every per-frame system.
//!
//! All smoothing in Skyring goes through [`damp`]: the camera rig, the orbit
//! speed, environment colors, and the compass needle. Keeping one primitive
//! keeps every motion framerate-independent.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

/// Exponentially approach `target` from `current`.
///
/// `rate` is the fraction of the remaining distance still left after one
/// second, so it must lie in (0, 1): smaller = snappier. The value moves
/// `1 - rate^dt` of the way each call, which composes exactly across frames
/// of any length.
pub fn damp(current: f32, target: f32, rate: f32, dt: f32) -> f32 {
    current + (target - current) * (1.0 - rate.powf(dt))
}

/// Component-wise [`damp`] for vectors.
pub fn damp_vec3(current: Vec3, target: Vec3, rate: f32, dt: f32) -> Vec3 {
    current + (target - current) * (1.0 - rate.powf(dt))
}

/// Linear interpolation.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Hermite ease (3t² − 2t³). Accelerates out of 0 and decelerates into 1.
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Normalize any angle into [0, 2π).
pub fn wrap_angle(a: f32) -> f32 {
    let w = a % TAU;
    if w < 0.0 {
        w + TAU
    } else {
        w
    }
}

/// Signed minimal rotation from `a` to `b`, in (−π, π].
///
/// Damped angle-following must use this so a needle at 0.1 rad chasing
/// 6.2 rad turns a fraction of a radian backwards instead of spinning almost
/// a full revolution forwards.
pub fn shortest_delta(a: f32, b: f32) -> f32 {
    let diff = wrap_angle(b - a);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damp_is_fixed_point_at_target() {
        for dt in [0.0, 0.004, 0.016, 0.3, 2.0] {
            assert_eq!(damp(3.5, 3.5, 0.001, dt), 3.5);
        }
    }

    #[test]
    fn damp_never_overshoots() {
        let mut v = 0.0;
        for _ in 0..500 {
            let next = damp(v, 1.0, 0.001, 0.016);
            assert!(next >= v && next <= 1.0);
            v = next;
        }
        assert!(v > 0.99);
    }

    #[test]
    fn damp_is_framerate_independent() {
        // Two half-steps land exactly where one full step does (up to f32).
        let one = damp(0.0, 10.0, 0.01, 0.032);
        let half = damp(0.0, 10.0, 0.01, 0.016);
        let two = damp(half, 10.0, 0.01, 0.016);
        assert!((one - two).abs() < 1e-4);
    }

    #[test]
    fn wrap_angle_range_and_idempotence() {
        for a in [-17.3, -TAU, -0.1, 0.0, 0.5, TAU, 100.0] {
            let w = wrap_angle(a);
            assert!((0.0..TAU).contains(&w), "wrap({a}) = {w}");
            assert!((wrap_angle(w) - w).abs() < 1e-6);
        }
    }

    #[test]
    fn shortest_delta_range_and_recomposition() {
        for (a, b) in [(0.1, 6.2), (6.2, 0.1), (0.0, PI), (3.0, 3.1), (-4.0, 9.0)] {
            let d = shortest_delta(a, b);
            assert!(d > -PI && d <= PI, "delta({a},{b}) = {d}");
            assert!((wrap_angle(a + d) - wrap_angle(b)).abs() < 1e-5);
        }
    }

    #[test]
    fn shortest_delta_prefers_backwards_across_wrap() {
        // 0.1 → 6.2 is a short negative step, not a near-full positive turn.
        assert!(shortest_delta(0.1, 6.2) < 0.0);
    }

    #[test]
    fn smoothstep_endpoints_and_midpoint() {
        assert_eq!(smoothstep(0.0), 0.0);
        assert_eq!(smoothstep(1.0), 1.0);
        assert!((smoothstep(0.5) - 0.5).abs() < 1e-6);
        // Eases: slow out of 0.
        assert!(smoothstep(0.1) < 0.1);
        assert!(smoothstep(0.9) > 0.9);
    }
}
