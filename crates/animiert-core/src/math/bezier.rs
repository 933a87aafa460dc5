//! Bezier evaluation, bisection inversion and spline control points.

use kurbo::{BezPath, CubicBez, Point};

/// Default parameter tolerance for [`solve_t_for_x`].
pub const BISECTION_TOLERANCE: f64 = 1e-4;

/// Linear interpolation between `a` and `b`.
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    a + (b - a) * t
}

/// Parameter of `v` between `a` and `b`; `None` when `a == b`.
pub fn inverse_lerp(a: f64, b: f64, v: f64) -> Option<f64> {
    let span = b - a;
    (span != 0.0).then(|| (v - a) / span)
}

/// Quadratic Bezier coordinate at `t`.
pub fn quad_point(t: f64, p0: f64, p1: f64, p2: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * p0 + 2.0 * mt * t * p1 + t * t * p2
}

/// Cubic Bezier coordinate at `t`.
pub fn cubic_point(t: f64, p0: f64, p1: f64, p2: f64, p3: f64) -> f64 {
    let mt = 1.0 - t;
    mt * mt * mt * p0 + 3.0 * mt * mt * t * p1 + 3.0 * mt * t * t * p2 + t * t * t * p3
}

/// Find `t` in `[0, 1]` with `x_of(t) == x` by bisection.
///
/// `x_of` must be monotone on `[0, 1]`; either direction works. Targets
/// outside the curve's range converge to the nearer end.
pub fn solve_t_for_x(x: f64, tolerance: f64, x_of: impl Fn(f64) -> f64) -> f64 {
    let increasing = x_of(1.0) >= x_of(0.0);
    let tolerance = if tolerance > 0.0 { tolerance } else { BISECTION_TOLERANCE };
    let (mut lower, mut upper) = (0.0_f64, 1.0_f64);
    let mut t = 0.5;
    while upper - lower > tolerance {
        let below = x_of(t) < x;
        if below == increasing {
            lower = t;
        } else {
            upper = t;
        }
        t = (lower + upper) / 2.0;
    }
    t
}

/// Cubic segments of a Catmull-Rom style spline through `points`.
///
/// Segment `i` runs from `points[i]` to `points[i + 1]`; the neighbours
/// `points[i - 1]` and `points[i + 2]` shape the tangents (clamped at the ends),
/// scaled by one sixth.
pub fn spline_segments(points: &[Point]) -> Vec<CubicBez> {
    if points.len() < 2 {
        return Vec::new();
    }
    (0..points.len() - 1)
        .map(|i| {
            let p0 = points[i.saturating_sub(1)];
            let p1 = points[i];
            let p2 = points[i + 1];
            let p3 = points.get(i + 2).copied().unwrap_or(p2);
            let c1 = p1 + (p2 - p0) / 6.0;
            let c2 = p2 - (p3 - p1) / 6.0;
            CubicBez::new(p1, c1, c2, p2)
        })
        .collect()
}

/// Path through `points` made of [`spline_segments`].
pub fn spline_path(points: &[Point]) -> BezPath {
    let mut path = BezPath::new();
    let segments = spline_segments(points);
    if let Some(first) = segments.first() {
        path.move_to(first.p0);
        for seg in &segments {
            path.curve_to(seg.p1, seg.p2, seg.p3);
        }
    }
    path
}
