//! Animation curves
//!
//! Named curves are cubic beziers with fixed control points; `Linear` is the
//! identity and `CubicBezier` accepts arbitrary control points.

/// Timing curve used by time-driven motions
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    Linear,
    #[default]
    Ease,
    EaseIn,
    EaseOut,
    EaseInOut,
    FastOutSlowIn,
    LinearOutSlowIn,
    FastOutLinearIn,
    ExtremeDeceleration,
    Sharp,
    Rhythm,
    Smooth,
    Friction,
    CubicBezier(f32, f32, f32, f32),
}

impl Curve {
    /// Control points `(x1, y1, x2, y2)`, or `None` for `Linear`
    pub fn control_points(&self) -> Option<(f32, f32, f32, f32)> {
        let points = match *self {
            Curve::Linear => return None,
            Curve::Ease => (0.25, 0.1, 0.25, 1.0),
            Curve::EaseIn => (0.42, 0.0, 1.0, 1.0),
            Curve::EaseOut => (0.0, 0.0, 0.58, 1.0),
            Curve::EaseInOut => (0.42, 0.0, 0.58, 1.0),
            Curve::FastOutSlowIn => (0.4, 0.0, 0.2, 1.0),
            Curve::LinearOutSlowIn => (0.0, 0.0, 0.2, 1.0),
            Curve::FastOutLinearIn => (0.4, 0.0, 1.0, 1.0),
            Curve::ExtremeDeceleration => (0.0, 0.0, 0.0, 1.0),
            Curve::Sharp => (0.33, 0.0, 0.67, 1.0),
            Curve::Rhythm => (0.7, 0.0, 0.2, 1.0),
            Curve::Smooth => (0.4, 0.0, 0.4, 1.0),
            Curve::Friction => (0.2, 0.0, 0.2, 1.0),
            Curve::CubicBezier(x1, y1, x2, y2) => (x1, y1, x2, y2),
        };
        Some(points)
    }

    /// Map linear progress (0.0 to 1.0) to eased progress
    pub fn apply(&self, t: f32) -> f32 {
        match self.control_points() {
            None => t.clamp(0.0, 1.0),
            Some((x1, y1, x2, y2)) => solve_bezier(t, x1, y1, x2, y2),
        }
    }
}

/// Find `y` on the bezier whose `x` equals `t`.
///
/// Newton-Raphson first, bisection when the slope flattens out. Runs in f64
/// so per-frame sampling at high refresh rates does not jitter.
fn solve_bezier(t: f32, x1: f32, y1: f32, x2: f32, y2: f32) -> f32 {
    if t <= 0.0 {
        return 0.0;
    }
    if t >= 1.0 {
        return 1.0;
    }

    let target = f64::from(t);
    let (x1, y1, x2, y2) = (f64::from(x1), f64::from(y1), f64::from(x2), f64::from(y2));

    let mut p = target;
    for _ in 0..8 {
        let err = sample(p, x1, x2) - target;
        if err.abs() < 1e-7 {
            return sample(p, y1, y2) as f32;
        }
        let slope = slope(p, x1, x2);
        if slope.abs() < 1e-7 {
            break;
        }
        p -= err / slope;
    }

    let (mut lo, mut hi) = (0.0_f64, 1.0_f64);
    p = target;
    for _ in 0..24 {
        let x = sample(p, x1, x2);
        if (x - target).abs() < 1e-7 {
            break;
        }
        if x < target {
            lo = p;
        } else {
            hi = p;
        }
        p = (lo + hi) * 0.5;
    }

    sample(p, y1, y2) as f32
}

#[inline]
fn sample(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    ((a * t + b) * t + c) * t
}

#[inline]
fn slope(t: f64, p1: f64, p2: f64) -> f64 {
    let a = 1.0 - 3.0 * p2 + 3.0 * p1;
    let b = 3.0 * p2 - 6.0 * p1;
    let c = 3.0 * p1;
    (3.0 * a * t + 2.0 * b) * t + c
}
