//! Smooth curve through a list of points.

use kurbo::Point;

use super::attach_shape;
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::math::{self, BISECTION_TOLERANCE};
use crate::scene::{NodeId, Stage, StrokeStyle};
use crate::widget::Widget;

/// Piecewise cubic curve passing through every point.
#[derive(Debug, Clone)]
pub struct SplineCurve {
    root: NodeId,
    shape: NodeId,
    points: Vec<Point>,
    color: SerializableColor,
    thickness: f64,
}

impl SplineCurve {
    /// Black spline, 2px wide.
    pub fn new(stage: &mut Stage, points: Vec<Point>) -> WidgetResult<Self> {
        Self::styled(stage, points, SerializableColor::black(), 2.0)
    }

    pub fn styled(
        stage: &mut Stage,
        points: Vec<Point>,
        color: SerializableColor,
        thickness: f64,
    ) -> WidgetResult<Self> {
        let (root, shape) = attach_shape(stage)?;
        let mut spline = Self {
            root,
            shape,
            points,
            color,
            thickness,
        };
        spline.redraw(stage)?;
        Ok(spline)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn shape(&self) -> NodeId {
        self.shape
    }

    pub fn add_point(&mut self, stage: &mut Stage, point: Point) -> WidgetResult<()> {
        self.points.push(point);
        self.redraw(stage)
    }

    /// Remove the point at `index`; out-of-range indices are ignored.
    pub fn remove_point(&mut self, stage: &mut Stage, index: usize) -> WidgetResult<()> {
        if index >= self.points.len() {
            log::warn!("spline has no point {index} to remove ({} points)", self.points.len());
            return Ok(());
        }
        self.points.remove(index);
        self.redraw(stage)
    }

    /// Move the point at `index`; out-of-range indices are ignored.
    pub fn update_point(&mut self, stage: &mut Stage, index: usize, point: Point) -> WidgetResult<()> {
        let Some(slot) = self.points.get_mut(index) else {
            log::warn!("spline has no point {index} to update ({} points)", self.points.len());
            return Ok(());
        };
        *slot = point;
        self.redraw(stage)
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.color = color;
        self.redraw(stage)
    }

    pub fn set_thickness(&mut self, stage: &mut Stage, thickness: f64) -> WidgetResult<()> {
        self.thickness = thickness;
        self.redraw(stage)
    }

    /// Y on the curve at `x`.
    ///
    /// Uses the first segment whose end points bracket `x` (left to right).
    /// `None` when no segment covers `x` or there are fewer than two points.
    pub fn y_at(&self, x: f64) -> Option<f64> {
        math::spline_segments(&self.points)
            .into_iter()
            .find(|seg| seg.p0.x <= x && x <= seg.p3.x)
            .map(|seg| {
                let t = math::solve_t_for_x(x, BISECTION_TOLERANCE, |t| {
                    math::cubic_point(t, seg.p0.x, seg.p1.x, seg.p2.x, seg.p3.x)
                });
                math::cubic_point(t, seg.p0.y, seg.p1.y, seg.p2.y, seg.p3.y)
            })
    }

    /// Where segment `a-b` crosses the curve.
    pub fn find_intersections(&self, a: Point, b: Point) -> Vec<Point> {
        math::find_intersections(&math::spline_path(&self.points), a, b)
    }
}

impl Widget for SplineCurve {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let graphics = stage.graphics_mut(self.shape)?;
        graphics.clear();
        if self.points.len() > 1 {
            graphics.stroke(
                &math::spline_path(&self.points),
                StrokeStyle::new(self.thickness, self.color),
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zigzag() -> Vec<Point> {
        vec![
            Point::new(0.0, 0.0),
            Point::new(50.0, 40.0),
            Point::new(100.0, 10.0),
            Point::new(150.0, 60.0),
        ]
    }

    #[test]
    fn test_y_at_knots() {
        let mut stage = Stage::default();
        let spline = SplineCurve::new(&mut stage, zigzag()).unwrap();
        for p in zigzag() {
            assert!((spline.y_at(p.x).unwrap() - p.y).abs() < 0.05);
        }
        assert!(spline.y_at(-1.0).is_none());
        assert!(spline.y_at(151.0).is_none());
    }

    #[test]
    fn test_y_at_between_knots_is_smooth() {
        let mut stage = Stage::default();
        let spline = SplineCurve::new(&mut stage, zigzag()).unwrap();
        let y = spline.y_at(25.0).unwrap();
        assert!(y > 0.0 && y < 40.0);
    }

    #[test]
    fn test_too_few_points() {
        let mut stage = Stage::default();
        let mut spline = SplineCurve::new(&mut stage, vec![Point::new(1.0, 1.0)]).unwrap();
        assert!(spline.y_at(1.0).is_none());
        assert!(stage.graphics(spline.shape()).unwrap().is_empty());

        spline.add_point(&mut stage, Point::new(11.0, 1.0)).unwrap();
        assert_eq!(stage.graphics(spline.shape()).unwrap().ops().len(), 1);
        assert!((spline.y_at(6.0).unwrap() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_edits() {
        let mut stage = Stage::default();
        let mut spline = SplineCurve::new(&mut stage, zigzag()).unwrap();
        spline.update_point(&mut stage, 1, Point::new(50.0, 0.0)).unwrap();
        assert_eq!(spline.points()[1], Point::new(50.0, 0.0));
        spline.remove_point(&mut stage, 0).unwrap();
        assert_eq!(spline.points().len(), 3);

        // Out of range: no change, no error.
        spline.remove_point(&mut stage, 10).unwrap();
        spline.update_point(&mut stage, 10, Point::ZERO).unwrap();
        assert_eq!(spline.points().len(), 3);
        assert_eq!(spline.points()[0], Point::new(50.0, 0.0));
    }

    #[test]
    fn test_intersections() {
        let mut stage = Stage::default();
        let spline = SplineCurve::new(&mut stage, zigzag()).unwrap();
        let hits = spline.find_intersections(Point::new(75.0, -100.0), Point::new(75.0, 100.0));
        assert_eq!(hits.len(), 1);
        assert!((hits[0].y - spline.y_at(75.0).unwrap()).abs() < 0.05);
    }
}
