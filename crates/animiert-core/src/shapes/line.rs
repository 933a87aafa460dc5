//! Straight line widget.

use kurbo::{Point, Rect};

use super::{attach_shape, rotation_from_origin};
use crate::color::SerializableColor;
use crate::error::{GeometryError, WidgetResult};
use crate::math::LineEquation;
use crate::scene::{NodeId, Stage, StrokeStyle, Transform};
use crate::widget::Widget;

/// A stroked line from `start` to `end`.
///
/// The stroke is drawn along +x from the shape's origin; the shape node is
/// placed at `start` and turned towards `end`.
#[derive(Debug, Clone)]
pub struct Line {
    root: NodeId,
    shape: NodeId,
    start: Point,
    end: Point,
    color: SerializableColor,
    thickness: f64,
    dash: Option<Vec<f64>>,
    /// Extra rotation in degrees on top of the start-to-end angle.
    rotation_offset: f64,
    mask: Option<Rect>,
}

impl Line {
    pub const DEFAULT_COLOR: SerializableColor = SerializableColor::rgb(255, 0, 0);

    /// Red, 1px, solid line.
    pub fn new(stage: &mut Stage, start: Point, end: Point) -> WidgetResult<Self> {
        Self::styled(stage, start, end, Self::DEFAULT_COLOR, 1.0, None)
    }

    pub fn styled(
        stage: &mut Stage,
        start: Point,
        end: Point,
        color: SerializableColor,
        thickness: f64,
        dash: Option<Vec<f64>>,
    ) -> WidgetResult<Self> {
        let (root, shape) = attach_shape(stage)?;
        let mut line = Self {
            root,
            shape,
            start,
            end,
            color,
            thickness,
            dash,
            rotation_offset: 0.0,
            mask: None,
        };
        line.redraw(stage)?;
        Ok(line)
    }

    pub fn start(&self) -> Point {
        self.start
    }

    pub fn end(&self) -> Point {
        self.end
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    pub fn thickness(&self) -> f64 {
        self.thickness
    }

    /// Node carrying the stroke.
    pub fn shape(&self) -> NodeId {
        self.shape
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    /// Direction from start to end in degrees.
    pub fn angle(&self) -> f64 {
        rotation_from_origin(self.start, self.end)
    }

    pub fn set_start_end(&mut self, stage: &mut Stage, start: Point, end: Point) -> WidgetResult<()> {
        self.start = start;
        self.end = end;
        self.redraw(stage)
    }

    pub fn set_start_x(&mut self, stage: &mut Stage, x: f64) -> WidgetResult<()> {
        self.start.x = x;
        self.redraw(stage)
    }

    pub fn set_start_y(&mut self, stage: &mut Stage, y: f64) -> WidgetResult<()> {
        self.start.y = y;
        self.redraw(stage)
    }

    pub fn set_end_x(&mut self, stage: &mut Stage, x: f64) -> WidgetResult<()> {
        self.end.x = x;
        self.redraw(stage)
    }

    pub fn set_end_y(&mut self, stage: &mut Stage, y: f64) -> WidgetResult<()> {
        self.end.y = y;
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

    /// Dash pattern as alternating dash and gap lengths; `None` draws solid.
    pub fn set_dash(&mut self, stage: &mut Stage, dash: Option<Vec<f64>>) -> WidgetResult<()> {
        self.dash = dash;
        self.redraw(stage)
    }

    /// Rotation offset in degrees added to the geometric angle.
    pub fn set_rotation(&mut self, stage: &mut Stage, degrees: f64) -> WidgetResult<()> {
        self.rotation_offset = degrees;
        self.redraw(stage)
    }

    /// Y on the infinite line through start and end.
    pub fn y_at(&self, x: f64) -> Result<f64, GeometryError> {
        LineEquation::new(self.start, self.end).y_at(x)
    }

    /// X on the infinite line through start and end.
    pub fn x_at(&self, y: f64) -> Result<f64, GeometryError> {
        LineEquation::new(self.start, self.end).x_at(y)
    }

    /// Clip the line to the rectangle spanned by two corners.
    pub fn mask_with_rectangle(&mut self, stage: &mut Stage, x1: f64, y1: f64, x2: f64, y2: f64) -> WidgetResult<()> {
        self.mask = Some(Rect::new(x1, y1, x2, y2).abs());
        self.redraw(stage)
    }

    pub fn clear_mask(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        self.mask = None;
        self.redraw(stage)
    }
}

impl Widget for Line {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let stroke = StrokeStyle::new(self.thickness, self.color).with_dash(self.dash.clone());
        stage
            .graphics_mut(self.shape)?
            .clear()
            .stroke(&kurbo::Line::new(Point::ZERO, (self.length(), 0.0)), stroke);
        stage.set_transform(
            self.shape,
            Transform {
                x: self.start.x,
                y: self.start.y,
                rotation: self.angle() + self.rotation_offset,
            },
        )?;
        stage.set_mask(self.shape, self.mask)
    }
}
