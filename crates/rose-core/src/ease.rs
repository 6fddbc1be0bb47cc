//! Scalar easing helpers shared by the bloom animation and the overlay.

/// Hermite ease from 0 to 1 as `x` moves from `min` to `max`.
///
/// Returns exactly 0 at or below `min` and exactly 1 at or above `max`, with
/// zero slope at both ends.
#[inline]
pub fn smoothstep(x: f32, min: f32, max: f32) -> f32 {
    if x <= min {
        return 0.0;
    }
    if x >= max {
        return 1.0;
    }
    let t = (x - min) / (max - min);
    t * t * (3.0 - 2.0 * t)
}

#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    (1.0 - t) * a + t * b
}

/// Frame-rate independent exponential approach of `current` toward `target`.
///
/// `lambda` is the rate per second. Non-finite or negative `dt` leaves the
/// value untouched so a bad frame never moves the animation backwards.
#[inline]
pub fn damp(current: f32, target: f32, lambda: f32, dt: f32) -> f32 {
    if !dt.is_finite() || dt <= 0.0 {
        return current;
    }
    lerp(current, target, 1.0 - (-lambda * dt).exp())
}

/// CSS-style cubic bezier timing curve through (0,0), (x1,y1), (x2,y2), (1,1).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CubicBezier {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
}

impl CubicBezier {
    pub const EASE_OUT: Self = Self {
        x1: 0.0,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    pub const EASE_IN_OUT: Self = Self {
        x1: 0.42,
        y1: 0.0,
        x2: 0.58,
        y2: 1.0,
    };

    fn axis(p1: f32, p2: f32, s: f32) -> f32 {
        let inv = 1.0 - s;
        3.0 * inv * inv * s * p1 + 3.0 * inv * s * s * p2 + s * s * s
    }

    /// Progress along the curve for linear time `t` in \[0, 1\].
    pub fn apply(&self, t: f32) -> f32 {
        let t = t.clamp(0.0, 1.0);
        if t == 0.0 || t == 1.0 {
            return t;
        }
        // x(s) is monotonic for x1,x2 in [0,1]; bisect for the curve parameter
        let (mut lo, mut hi) = (0.0_f32, 1.0_f32);
        let mut s = t;
        for _ in 0..32 {
            let x = Self::axis(self.x1, self.x2, s);
            if (x - t).abs() < 1e-6 {
                break;
            }
            if x < t {
                lo = s;
            } else {
                hi = s;
            }
            s = 0.5 * (lo + hi);
        }
        Self::axis(self.y1, self.y2, s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothstep_is_clamped_at_edges() {
        assert_eq!(smoothstep(-1.0, 0.0, 1.0), 0.0);
        assert_eq!(smoothstep(0.0, 0.0, 1.0), 0.0);
        assert_eq!(smoothstep(1.0, 0.0, 1.0), 1.0);
        assert_eq!(smoothstep(3.0, 0.0, 1.0), 1.0);
        assert!((smoothstep(0.5, 0.0, 1.0) - 0.5).abs() < 1e-6);
    }

    #[test]
    fn damp_ignores_bad_frames() {
        assert_eq!(damp(0.3, 1.0, 0.1, 0.0), 0.3);
        assert_eq!(damp(0.3, 1.0, 0.1, -0.5), 0.3);
        assert_eq!(damp(0.3, 1.0, 0.1, f32::NAN), 0.3);
    }

    #[test]
    fn ease_out_starts_fast_and_hits_endpoints() {
        let e = CubicBezier::EASE_OUT;
        assert_eq!(e.apply(0.0), 0.0);
        assert_eq!(e.apply(1.0), 1.0);
        assert!(e.apply(0.25) > 0.25);
        assert!(e.apply(0.25) < e.apply(0.5));
        assert!(e.apply(0.5) < e.apply(0.75));
    }

    #[test]
    fn ease_in_out_is_symmetric_about_the_midpoint() {
        let e = CubicBezier::EASE_IN_OUT;
        assert!((e.apply(0.5) - 0.5).abs() < 1e-3);
        assert!(e.apply(0.2) < 0.2);
        assert!(e.apply(0.8) > 0.8);
        for i in 0..=10 {
            let t = i as f32 / 10.0;
            assert!((e.apply(t) + e.apply(1.0 - t) - 1.0).abs() < 1e-3, "t {t}");
        }
    }
}
