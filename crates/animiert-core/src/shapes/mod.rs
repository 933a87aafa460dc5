//! Drawing widgets: lines, arrows, curves and axes.

mod arrow;
mod bezier_curve;
mod coordinate_system;
mod guide_lines;
mod line;
mod math_curve;
mod points_curve;
mod spline_curve;

pub use arrow::Arrow;
pub use bezier_curve::BezierCurve;
pub use coordinate_system::{AxisSizes, CoordinateSystem};
pub use guide_lines::GuideLines;
pub use line::Line;
pub use math_curve::MathCurve;
pub use points_curve::PointsCurve;
pub use spline_curve::SplineCurve;

use kurbo::Point;

use crate::error::WidgetResult;
use crate::scene::{NodeId, Stage};

/// Boxed `y = f(x)`.
pub type Equation = Box<dyn Fn(f64) -> f64>;

/// Create a root container holding one empty shape node.
pub(crate) fn attach_shape(stage: &mut Stage) -> WidgetResult<(NodeId, NodeId)> {
    let root = stage.create_container();
    let shape = stage.create_shape();
    stage.add_child(root, shape)?;
    stage.add_root(root)?;
    Ok((root, shape))
}

/// Angle in degrees of the direction from `start` to `end`.
pub(crate) fn rotation_from_origin(start: Point, end: Point) -> f64 {
    (end - start).atan2().to_degrees()
}
