//! Plot of a function `y = f(x)`.

use kurbo::Point;
use std::fmt;

use super::{Equation, attach_shape};
use crate::color::SerializableColor;
use crate::error::{GeometryError, WidgetResult};
use crate::math;
use crate::scene::{NodeId, Stage, StrokeStyle};
use crate::widget::Widget;

/// Horizontal distance between samples, in pixels.
const SAMPLE_STEP: f64 = 1.0;

/// A function graph sampled every pixel across an x range.
pub struct MathCurve {
    root: NodeId,
    shape: NodeId,
    equation: Equation,
    color: SerializableColor,
    x_range: (f64, f64),
    thickness: f64,
}

impl fmt::Debug for MathCurve {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MathCurve")
            .field("root", &self.root)
            .field("color", &self.color)
            .field("x_range", &self.x_range)
            .field("thickness", &self.thickness)
            .finish_non_exhaustive()
    }
}

impl MathCurve {
    /// Plot `equation` from `x = 0` to the stage width, 2px wide.
    pub fn new(
        stage: &mut Stage,
        equation: impl Fn(f64) -> f64 + 'static,
        color: SerializableColor,
    ) -> WidgetResult<Self> {
        let width = stage.size().width;
        Self::with_range(stage, equation, color, (0.0, width))
    }

    pub fn with_range(
        stage: &mut Stage,
        equation: impl Fn(f64) -> f64 + 'static,
        color: SerializableColor,
        x_range: (f64, f64),
    ) -> WidgetResult<Self> {
        check_range(x_range.0, x_range.1)?;
        let (root, shape) = attach_shape(stage)?;
        let mut curve = Self {
            root,
            shape,
            equation: Box::new(equation),
            color,
            x_range,
            thickness: 2.0,
        };
        curve.redraw(stage)?;
        Ok(curve)
    }

    pub fn shape(&self) -> NodeId {
        self.shape
    }

    pub fn x_range(&self) -> (f64, f64) {
        self.x_range
    }

    pub fn set_equation(&mut self, stage: &mut Stage, equation: impl Fn(f64) -> f64 + 'static) -> WidgetResult<()> {
        self.equation = Box::new(equation);
        self.redraw(stage)
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.color = color;
        self.redraw(stage)
    }

    /// Replace the plotted range. Both bounds must be finite.
    pub fn set_range(&mut self, stage: &mut Stage, x0: f64, x1: f64) -> WidgetResult<()> {
        check_range(x0, x1)?;
        self.x_range = (x0, x1);
        self.redraw(stage)
    }

    pub fn set_thickness(&mut self, stage: &mut Stage, thickness: f64) -> WidgetResult<()> {
        self.thickness = thickness;
        self.redraw(stage)
    }

    /// Value of the function at `x`, restricted to the plotted range.
    pub fn y_at(&self, x: f64) -> Result<f64, GeometryError> {
        let (a, b) = self.x_range;
        let (min, max) = (a.min(b), a.max(b));
        if !(min..=max).contains(&x) {
            return Err(GeometryError::OutOfDomain { x, min, max });
        }
        Ok((self.equation)(x))
    }

    /// Where segment `a-b` crosses the plotted polyline.
    pub fn find_intersections(&self, a: Point, b: Point) -> Vec<Point> {
        let (x0, x1) = self.x_range;
        let path = math::sample_function(&self.equation, x0, x1, SAMPLE_STEP);
        math::find_intersections(&path, a, b)
    }
}

fn check_range(x0: f64, x1: f64) -> Result<(), GeometryError> {
    match [x0, x1].into_iter().find(|x| !x.is_finite()) {
        Some(x) => Err(GeometryError::OutOfDomain {
            x,
            min: f64::MIN,
            max: f64::MAX,
        }),
        None => Ok(()),
    }
}

impl Widget for MathCurve {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let (x0, x1) = self.x_range;
        let path = math::sample_function(&self.equation, x0, x1, SAMPLE_STEP);
        stage
            .graphics_mut(self.shape)?
            .clear()
            .stroke(&path, StrokeStyle::new(self.thickness, self.color));
        Ok(())
    }
}
