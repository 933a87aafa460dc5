//! Polyline through scaled data points.

use kurbo::{BezPath, Point};

use super::attach_shape;
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::scene::{NodeId, Stage, StrokeStyle};
use crate::widget::Widget;

/// Data points joined by straight segments, each coordinate multiplied by a scale.
#[derive(Debug, Clone)]
pub struct PointsCurve {
    root: NodeId,
    shape: NodeId,
    points: Vec<Point>,
    scale_x: f64,
    scale_y: f64,
    color: SerializableColor,
    thickness: f64,
}

impl PointsCurve {
    pub fn new(
        stage: &mut Stage,
        points: Vec<Point>,
        scale_x: f64,
        scale_y: f64,
        color: SerializableColor,
    ) -> WidgetResult<Self> {
        let (root, shape) = attach_shape(stage)?;
        let mut curve = Self {
            root,
            shape,
            points,
            scale_x,
            scale_y,
            color,
            thickness: 1.0,
        };
        curve.redraw(stage)?;
        Ok(curve)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn shape(&self) -> NodeId {
        self.shape
    }

    /// Points as drawn.
    pub fn scaled_points(&self) -> impl Iterator<Item = Point> + '_ {
        self.points
            .iter()
            .map(|p| Point::new(p.x * self.scale_x, p.y * self.scale_y))
    }

    pub fn update_points(&mut self, stage: &mut Stage, points: Vec<Point>) -> WidgetResult<()> {
        self.points = points;
        self.redraw(stage)
    }

    pub fn set_scale(&mut self, stage: &mut Stage, scale_x: f64, scale_y: f64) -> WidgetResult<()> {
        self.scale_x = scale_x;
        self.scale_y = scale_y;
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
}

impl Widget for PointsCurve {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let mut path = BezPath::new();
        for (i, p) in self.scaled_points().enumerate() {
            if i == 0 {
                path.move_to(p);
            } else {
                path.line_to(p);
            }
        }
        let graphics = stage.graphics_mut(self.shape)?;
        graphics.clear();
        if !path.elements().is_empty() {
            graphics.stroke(&path, StrokeStyle::new(self.thickness, self.color));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{PathEl, Shape};

    #[test]
    fn test_scaled_polyline() {
        let mut stage = Stage::default();
        let curve = PointsCurve::new(
            &mut stage,
            vec![Point::new(0.0, 0.0), Point::new(1.0, 2.0), Point::new(2.0, 1.0)],
            10.0,
            -5.0,
            SerializableColor::black(),
        )
        .unwrap();
        let op = &stage.graphics(curve.shape()).unwrap().ops()[0];
        assert_eq!(op.path.elements().len(), 3);
        assert_eq!(op.path.elements()[1], PathEl::LineTo(Point::new(10.0, -10.0)));
    }

    #[test]
    fn test_rescale_and_replace() {
        let mut stage = Stage::default();
        let mut curve = PointsCurve::new(
            &mut stage,
            vec![Point::new(0.0, 0.0), Point::new(4.0, 4.0)],
            1.0,
            1.0,
            SerializableColor::black(),
        )
        .unwrap();
        curve.set_scale(&mut stage, 2.0, 3.0).unwrap();
        let bounds = stage.graphics(curve.shape()).unwrap().ops()[0].path.bounding_box();
        assert_eq!((bounds.x1, bounds.y1), (8.0, 12.0));

        curve.update_points(&mut stage, Vec::new()).unwrap();
        assert!(stage.graphics(curve.shape()).unwrap().is_empty());
    }
}
