//! Sampling `y = f(x)` into a path.

use kurbo::BezPath;

/// Step used when a non-positive step is requested.
const FALLBACK_STEP: f64 = 1.0;

/// Upper bound on the number of steps; wider ranges get a coarser step.
const MAX_STEPS: f64 = 1_000_000.0;

/// Polyline through `(x, f(x))` for `x` from `x0` to `x1` inclusive.
///
/// Non-finite samples split the path into separate runs so asymptotes do not
/// draw a vertical spike. A reversed range is sampled from `x1` to `x0`.
/// A range with a non-finite bound yields an empty path.
pub fn sample_function(f: impl Fn(f64) -> f64, x0: f64, x1: f64, step: f64) -> BezPath {
    let mut path = BezPath::new();
    if !x0.is_finite() || !x1.is_finite() {
        return path;
    }
    let (lo, hi) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    let step = if step > 0.0 && step.is_finite() { step } else { FALLBACK_STEP };
    let step = step.max((hi - lo) / MAX_STEPS);
    let mut pen_down = false;

    let count = ((hi - lo) / step).floor() as usize;
    let xs = (0..=count)
        .map(|i| lo + i as f64 * step)
        .chain((lo + count as f64 * step < hi).then_some(hi));

    for x in xs {
        let y = f(x);
        if !y.is_finite() {
            pen_down = false;
            continue;
        }
        if pen_down {
            path.line_to((x, y));
        } else {
            path.move_to((x, y));
            pen_down = true;
        }
    }
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::PathEl;

    fn moves(path: &BezPath) -> usize {
        path.elements().iter().filter(|el| matches!(el, PathEl::MoveTo(_))).count()
    }

    #[test]
    fn test_samples_every_step() {
        let path = sample_function(|x| 2.0 * x, 0.0, 10.0, 1.0);
        assert_eq!(path.elements().len(), 11);
        assert_eq!(moves(&path), 1);
        assert_eq!(path.elements().last(), Some(&PathEl::LineTo((10.0, 20.0).into())));
    }

    #[test]
    fn test_includes_range_end() {
        let path = sample_function(|x| x, 0.0, 2.5, 1.0);
        // 0, 1, 2 plus the closing sample at 2.5.
        assert_eq!(path.elements().len(), 4);
        assert_eq!(path.elements().last(), Some(&PathEl::LineTo((2.5, 2.5).into())));
    }

    #[test]
    fn test_non_finite_splits_runs() {
        let path = sample_function(|x| 1.0 / (x - 5.0), 0.0, 10.0, 1.0);
        assert_eq!(moves(&path), 2);
        assert_eq!(path.elements().len(), 10);
    }

    #[test]
    fn test_unbounded_range_is_empty() {
        assert!(sample_function(|x| x, 0.0, f64::INFINITY, 1.0).elements().is_empty());
        assert!(sample_function(|x| x, f64::NEG_INFINITY, 0.0, 1.0).elements().is_empty());
        assert!(sample_function(|x| x, f64::NAN, 1.0, 1.0).elements().is_empty());
    }

    #[test]
    fn test_huge_range_is_capped() {
        let path = sample_function(|x| x, 0.0, 1e15, 1.0);
        assert_eq!(path.elements().len(), 1_000_001);
        assert_eq!(path.elements().last(), Some(&PathEl::LineTo((1e15, 1e15).into())));
    }

    #[test]
    fn test_bad_step_falls_back() {
        let path = sample_function(|x| x, 0.0, 3.0, 0.0);
        assert_eq!(path.elements().len(), 4);
        let path = sample_function(|x| x, 3.0, 0.0, -2.0);
        assert_eq!(path.elements().len(), 4);
    }
}
