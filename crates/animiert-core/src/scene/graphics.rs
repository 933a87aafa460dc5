//! Vector drawing commands owned by shape nodes.

use kurbo::{BezPath, ParamCurveNearest, Point, Rect, Shape as KurboShape};
use serde::Serialize;

use crate::color::SerializableColor;

/// Accuracy used when flattening paths for hit testing and bounds.
const PATH_TOLERANCE: f64 = 0.1;

/// How a path interior is painted.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Paint {
    Solid(SerializableColor),
    /// Linear gradient between two points, stops in `[0, 1]`.
    LinearGradient {
        start: Point,
        end: Point,
        stops: Vec<(f64, SerializableColor)>,
    },
}

impl Paint {
    /// Two-stop vertical gradient from `y = 0` to `y = height`.
    pub fn vertical(top: SerializableColor, bottom: SerializableColor, height: f64) -> Self {
        Paint::LinearGradient {
            start: Point::ZERO,
            end: Point::new(0.0, height),
            stops: vec![(0.0, top), (1.0, bottom)],
        }
    }

    /// Two-stop horizontal gradient from `x = 0` to `x = width`.
    pub fn horizontal(left: SerializableColor, right: SerializableColor, width: f64) -> Self {
        Paint::LinearGradient {
            start: Point::ZERO,
            end: Point::new(width, 0.0),
            stops: vec![(0.0, left), (1.0, right)],
        }
    }
}

impl From<SerializableColor> for Paint {
    fn from(color: SerializableColor) -> Self {
        Paint::Solid(color)
    }
}

/// Outline style for a path.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StrokeStyle {
    pub width: f64,
    pub color: SerializableColor,
    /// Alternating dash/gap lengths.
    pub dash: Option<Vec<f64>>,
    /// Round caps and joins instead of butt/miter.
    pub round: bool,
}

impl StrokeStyle {
    pub fn new(width: f64, color: SerializableColor) -> Self {
        Self {
            width,
            color,
            dash: None,
            round: false,
        }
    }

    pub fn with_dash(mut self, dash: Option<Vec<f64>>) -> Self {
        self.dash = dash.filter(|d| !d.is_empty());
        self
    }

    pub fn rounded(mut self) -> Self {
        self.round = true;
        self
    }
}

/// A single path with optional fill and stroke.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawOp {
    pub path: BezPath,
    pub fill: Option<Paint>,
    pub stroke: Option<StrokeStyle>,
}

impl DrawOp {
    /// Bounds including half the stroke width.
    pub fn bounds(&self) -> Rect {
        let rect = self.path.bounding_box();
        match &self.stroke {
            Some(stroke) => rect.inflate(stroke.width / 2.0, stroke.width / 2.0),
            None => rect,
        }
    }

    /// Whether `point` (in the owning node's space) touches this op.
    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        if self.fill.is_none() && self.stroke.is_none() {
            return false;
        }
        if self.fill.is_some() && self.path.contains(point) {
            return true;
        }
        let reach = self.stroke.as_ref().map_or(0.0, |s| s.width / 2.0) + tolerance;
        self.path
            .segments()
            .any(|seg| seg.nearest(point, PATH_TOLERANCE).distance_sq <= reach * reach)
    }
}

/// Ordered drawing commands of a shape node, painted back to front.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Graphics {
    ops: Vec<DrawOp>,
}

impl Graphics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove all drawing commands.
    pub fn clear(&mut self) -> &mut Self {
        self.ops.clear();
        self
    }

    pub fn push(&mut self, op: DrawOp) -> &mut Self {
        self.ops.push(op);
        self
    }

    /// Fill a shape.
    pub fn fill(&mut self, shape: &impl KurboShape, paint: impl Into<Paint>) -> &mut Self {
        self.push(DrawOp {
            path: shape.to_path(PATH_TOLERANCE),
            fill: Some(paint.into()),
            stroke: None,
        })
    }

    /// Stroke a shape outline.
    pub fn stroke(&mut self, shape: &impl KurboShape, stroke: StrokeStyle) -> &mut Self {
        self.push(DrawOp {
            path: shape.to_path(PATH_TOLERANCE),
            fill: None,
            stroke: Some(stroke),
        })
    }

    /// Fill then stroke the same shape.
    pub fn fill_and_stroke(
        &mut self,
        shape: &impl KurboShape,
        paint: impl Into<Paint>,
        stroke: StrokeStyle,
    ) -> &mut Self {
        self.push(DrawOp {
            path: shape.to_path(PATH_TOLERANCE),
            fill: Some(paint.into()),
            stroke: Some(stroke),
        })
    }

    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    pub fn is_empty(&self) -> bool {
        self.ops.is_empty()
    }

    /// Union of all op bounds.
    pub fn bounds(&self) -> Option<Rect> {
        self.ops.iter().map(DrawOp::bounds).reduce(|a, b| a.union(b))
    }

    pub fn hit_test(&self, point: Point, tolerance: f64) -> bool {
        self.ops.iter().any(|op| op.hit_test(point, tolerance))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Circle, Line};

    #[test]
    fn test_stroke_hit_test() {
        let mut g = Graphics::new();
        g.stroke(
            &Line::new((0.0, 0.0), (100.0, 0.0)),
            StrokeStyle::new(2.0, SerializableColor::black()),
        );
        assert!(g.hit_test(Point::new(50.0, 0.5), 0.0));
        assert!(!g.hit_test(Point::new(50.0, 5.0), 0.0));
        assert!(g.hit_test(Point::new(50.0, 5.0), 5.0));
    }

    #[test]
    fn test_fill_hit_test() {
        let mut g = Graphics::new();
        g.fill(&Rect::new(0.0, 0.0, 10.0, 10.0), SerializableColor::white());
        assert!(g.hit_test(Point::new(5.0, 5.0), 0.0));
        assert!(!g.hit_test(Point::new(15.0, 5.0), 0.0));
        assert!(g.hit_test(Point::new(10.5, 5.0), 1.0));
    }

    #[test]
    fn test_fill_hit_test_follows_outline() {
        let mut g = Graphics::new();
        g.fill(&Circle::new((0.0, 0.0), 10.0), SerializableColor::white());
        assert!(g.hit_test(Point::new(0.0, 9.0), 0.0));
        // Inside the bounding box, outside the circle.
        assert!(!g.hit_test(Point::new(9.0, 9.0), 0.0));
    }

    #[test]
    fn test_bounds_include_stroke() {
        let mut g = Graphics::new();
        g.stroke(
            &Circle::new((0.0, 0.0), 10.0),
            StrokeStyle::new(4.0, SerializableColor::black()),
        );
        let b = g.bounds().unwrap();
        assert!((b.x0 + 12.0).abs() < 0.5);
        assert!((b.x1 - 12.0).abs() < 0.5);
    }

    #[test]
    fn test_clear() {
        let mut g = Graphics::new();
        g.fill(&Rect::new(0.0, 0.0, 1.0, 1.0), SerializableColor::black());
        assert!(!g.is_empty());
        g.clear();
        assert!(g.is_empty());
        assert!(g.bounds().is_none());
    }

    #[test]
    fn test_empty_dash_is_solid() {
        let s = StrokeStyle::new(1.0, SerializableColor::black()).with_dash(Some(vec![]));
        assert!(s.dash.is_none());
    }
}
