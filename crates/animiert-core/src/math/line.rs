//! Straight lines: slope-intercept queries and intersections.

use kurbo::{BezPath, Line, ParamCurve, Point};

use crate::error::GeometryError;

/// Points closer than this are reported once.
const MERGE_DISTANCE: f64 = 1e-7;

/// The infinite line through two points, queried as `y = m x + b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineEquation {
    pub start: Point,
    pub end: Point,
}

impl LineEquation {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    /// Slope `dy / dx`; `None` for vertical (or degenerate) lines.
    pub fn slope(&self) -> Option<f64> {
        let dx = self.end.x - self.start.x;
        (dx != 0.0).then(|| (self.end.y - self.start.y) / dx)
    }

    /// Y on the line at `x`.
    pub fn y_at(&self, x: f64) -> Result<f64, GeometryError> {
        let m = self.slope().ok_or(GeometryError::VerticalLine { x: self.start.x })?;
        let b = self.start.y - m * self.start.x;
        Ok(m * x + b)
    }

    /// X on the line at `y`.
    pub fn x_at(&self, y: f64) -> Result<f64, GeometryError> {
        match self.slope() {
            None if self.start != self.end => Ok(self.start.x),
            None => Err(GeometryError::VerticalLine { x: self.start.x }),
            Some(m) if m == 0.0 => Err(GeometryError::HorizontalLine { y: self.start.y }),
            Some(m) => {
                let b = self.start.y - m * self.start.x;
                Ok((y - b) / m)
            }
        }
    }
}

/// Intersection point of segments `a-b` and `c-d`.
///
/// Parallel and collinear segments yield `None`.
pub fn segment_intersection(a: Point, b: Point, c: Point, d: Point) -> Option<Point> {
    let r = b - a;
    let s = d - c;
    let denom = r.cross(s);
    if denom.abs() < f64::EPSILON {
        return None;
    }
    let ac = c - a;
    let t = ac.cross(s) / denom;
    let u = ac.cross(r) / denom;
    ((0.0..=1.0).contains(&t) && (0.0..=1.0).contains(&u)).then(|| a + r * t)
}

/// All points where segment `a-b` crosses `path`, ordered from `a` to `b`.
pub fn find_intersections(path: &BezPath, a: Point, b: Point) -> Vec<Point> {
    let line = Line::new(a, b);
    let mut hits: Vec<(f64, Point)> = path
        .segments()
        .flat_map(|seg| seg.intersect_line(line))
        .map(|hit| (hit.line_t, line.eval(hit.line_t)))
        .collect();
    hits.sort_by(|x, y| x.0.total_cmp(&y.0));
    hits.dedup_by(|x, y| (x.1 - y.1).hypot() < MERGE_DISTANCE);
    hits.into_iter().map(|(_, p)| p).collect()
}
