//! Arrow widget: a line with a filled triangular head.

use kurbo::{BezPath, Point};

use super::{attach_shape, rotation_from_origin};
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::scene::{NodeId, Stage, StrokeStyle, Transform};
use crate::widget::Widget;

/// An arrow from `start` pointing at `end`.
#[derive(Debug, Clone)]
pub struct Arrow {
    root: NodeId,
    shape: NodeId,
    start: Point,
    end: Point,
    color: SerializableColor,
    /// Head length along the shaft.
    head_length: f64,
    /// Head width across the shaft.
    head_width: f64,
    thickness: f64,
    rotation_offset: f64,
}

impl Arrow {
    pub fn new(
        stage: &mut Stage,
        start: Point,
        end: Point,
        color: SerializableColor,
        head_length: f64,
        head_width: f64,
    ) -> WidgetResult<Self> {
        Self::with_thickness(stage, start, end, color, head_length, head_width, 1.0)
    }

    pub fn with_thickness(
        stage: &mut Stage,
        start: Point,
        end: Point,
        color: SerializableColor,
        head_length: f64,
        head_width: f64,
        thickness: f64,
    ) -> WidgetResult<Self> {
        let (root, shape) = attach_shape(stage)?;
        let mut arrow = Self {
            root,
            shape,
            start,
            end,
            color,
            head_length,
            head_width,
            thickness,
            rotation_offset: 0.0,
        };
        arrow.redraw(stage)?;
        Ok(arrow)
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

    pub fn shape(&self) -> NodeId {
        self.shape
    }

    pub fn length(&self) -> f64 {
        (self.end - self.start).hypot()
    }

    pub fn set_start_end(&mut self, stage: &mut Stage, start: Point, end: Point) -> WidgetResult<()> {
        self.start = start;
        self.end = end;
        self.redraw(stage)
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.color = color;
        self.redraw(stage)
    }

    pub fn set_head(&mut self, stage: &mut Stage, length: f64, width: f64) -> WidgetResult<()> {
        self.head_length = length;
        self.head_width = width;
        self.redraw(stage)
    }

    pub fn set_thickness(&mut self, stage: &mut Stage, thickness: f64) -> WidgetResult<()> {
        self.thickness = thickness;
        self.redraw(stage)
    }

    /// Rotation offset in degrees added to the geometric angle.
    pub fn set_rotation(&mut self, stage: &mut Stage, degrees: f64) -> WidgetResult<()> {
        self.rotation_offset = degrees;
        self.redraw(stage)
    }

    /// Head triangle in the arrow's local frame, tip first.
    fn head(&self) -> BezPath {
        let tip = self.length();
        let back = tip - self.head_length;
        let mut path = BezPath::new();
        path.move_to((tip, 0.0));
        path.line_to((back, -self.head_width / 2.0));
        path.line_to((back, self.head_width / 2.0));
        path.close_path();
        path
    }
}

impl Widget for Arrow {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let stroke = StrokeStyle::new(self.thickness, self.color);
        let shaft = kurbo::Line::new(Point::ZERO, (self.length(), 0.0));
        let head = self.head();
        stage
            .graphics_mut(self.shape)?
            .clear()
            .stroke(&shaft, stroke.clone())
            .fill_and_stroke(&head, self.color, stroke);
        stage.set_transform(
            self.shape,
            Transform {
                x: self.start.x,
                y: self.start.y,
                rotation: rotation_from_origin(self.start, self.end) + self.rotation_offset,
            },
        )
    }
}
