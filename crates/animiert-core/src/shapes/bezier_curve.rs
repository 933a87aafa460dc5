//! Quadratic Bezier curve widget.

use kurbo::{BezPath, Circle, ParamCurve, Point, QuadBez};

use super::attach_shape;
use crate::color::SerializableColor;
use crate::error::{GeometryError, WidgetResult};
use crate::math::{self, BISECTION_TOLERANCE};
use crate::scene::{NodeId, Stage, StrokeStyle};
use crate::widget::Widget;

/// Radius of the control point marker.
const CONTROL_DOT_RADIUS: f64 = 4.0;

/// A quadratic Bezier from `start` through the pull of `control` to `end`.
#[derive(Debug, Clone)]
pub struct BezierCurve {
    root: NodeId,
    shape: NodeId,
    /// Guide polyline and control dot, present while controls are shown.
    controls: Option<NodeId>,
    start: Point,
    control: Point,
    end: Point,
    color: SerializableColor,
    thickness: f64,
}

impl BezierCurve {
    /// Black curve, 2px wide.
    pub fn new(stage: &mut Stage, start: Point, control: Point, end: Point) -> WidgetResult<Self> {
        Self::styled(stage, start, control, end, SerializableColor::black(), 2.0)
    }

    pub fn styled(
        stage: &mut Stage,
        start: Point,
        control: Point,
        end: Point,
        color: SerializableColor,
        thickness: f64,
    ) -> WidgetResult<Self> {
        let (root, shape) = attach_shape(stage)?;
        let mut curve = Self {
            root,
            shape,
            controls: None,
            start,
            control,
            end,
            color,
            thickness,
        };
        curve.redraw(stage)?;
        Ok(curve)
    }

    pub fn curve(&self) -> QuadBez {
        QuadBez::new(self.start, self.control, self.end)
    }

    pub fn shape(&self) -> NodeId {
        self.shape
    }

    pub fn controls_visible(&self) -> bool {
        self.controls.is_some()
    }

    /// Point on the curve at parameter `t`.
    pub fn point_at(&self, t: f64) -> Point {
        self.curve().eval(t)
    }

    /// Y for `x`, treating `t` as the linear position of `x` between the end points.
    ///
    /// This matches the curve exactly only when the control point sits
    /// halfway between start and end horizontally; see [`Self::y_at_exact`].
    pub fn y_at(&self, x: f64) -> Result<f64, GeometryError> {
        let t = math::inverse_lerp(self.start.x, self.end.x, x)
            .ok_or(GeometryError::ZeroWidth { x: self.start.x })?;
        Ok(math::quad_point(t, self.start.y, self.control.y, self.end.y))
    }

    /// Y for `x`, solving `x(t) = x` by bisection.
    ///
    /// Requires x to be monotone along the curve and `x` inside the
    /// horizontal span of the end points.
    pub fn y_at_exact(&self, x: f64) -> Result<f64, GeometryError> {
        if self.start.x == self.end.x {
            return Err(GeometryError::ZeroWidth { x: self.start.x });
        }
        let (min, max) = (self.start.x.min(self.end.x), self.start.x.max(self.end.x));
        if !(min..=max).contains(&x) {
            return Err(GeometryError::OutOfDomain { x, min, max });
        }
        let t = math::solve_t_for_x(x, BISECTION_TOLERANCE, |t| {
            math::quad_point(t, self.start.x, self.control.x, self.end.x)
        });
        Ok(math::quad_point(t, self.start.y, self.control.y, self.end.y))
    }

    /// Where segment `a-b` crosses the curve.
    pub fn find_intersections(&self, a: Point, b: Point) -> Vec<Point> {
        math::find_intersections(&self.path(), a, b)
    }

    pub fn set_points(&mut self, stage: &mut Stage, start: Point, control: Point, end: Point) -> WidgetResult<()> {
        self.start = start;
        self.control = control;
        self.end = end;
        self.redraw(stage)
    }

    pub fn set_control(&mut self, stage: &mut Stage, control: Point) -> WidgetResult<()> {
        self.control = control;
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

    /// Draw the control polygon and control point on top of the curve.
    pub fn show_controls(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        if self.controls.is_none() {
            let id = stage.create_shape();
            stage.add_child(self.root, id)?;
            self.controls = Some(id);
        }
        self.redraw(stage)
    }

    pub fn hide_controls(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        if let Some(id) = self.controls.take() {
            stage.destroy(id);
        }
        Ok(())
    }

    fn path(&self) -> BezPath {
        let mut path = BezPath::new();
        path.move_to(self.start);
        path.quad_to(self.control, self.end);
        path
    }
}

impl Widget for BezierCurve {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let path = self.path();
        stage
            .graphics_mut(self.shape)?
            .clear()
            .stroke(&path, StrokeStyle::new(self.thickness, self.color));

        if let Some(id) = self.controls {
            let guide = stage.theme().guide;
            let mut polygon = BezPath::new();
            polygon.move_to(self.start);
            polygon.line_to(self.control);
            polygon.line_to(self.end);
            stage
                .graphics_mut(id)?
                .clear()
                .stroke(&polygon, StrokeStyle::new(1.0, guide))
                .fill(&Circle::new(self.control, CONTROL_DOT_RADIUS), guide);
        }
        Ok(())
    }
}
