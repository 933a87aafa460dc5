//! Vertical guide from the x axis up to a function graph.

use kurbo::Point;
use std::fmt;

use super::{Equation, Line};
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::scene::{NodeId, Stage};
use crate::widget::Widget;

/// A line from `(v, 0)` to `(v, f(v))`, placed in a container at `origin`.
///
/// The guide is hidden while `f(v)` is not finite.
pub struct GuideLines {
    root: NodeId,
    line: Line,
    equation: Equation,
    value: f64,
}

impl fmt::Debug for GuideLines {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GuideLines")
            .field("root", &self.root)
            .field("line", &self.line)
            .field("value", &self.value)
            .finish_non_exhaustive()
    }
}

impl GuideLines {
    pub fn new(
        stage: &mut Stage,
        origin: Point,
        color: SerializableColor,
        equation: impl Fn(f64) -> f64 + 'static,
        value: f64,
    ) -> WidgetResult<Self> {
        Self::with_thickness(stage, origin, color, equation, value, 1.0)
    }

    pub fn with_thickness(
        stage: &mut Stage,
        origin: Point,
        color: SerializableColor,
        equation: impl Fn(f64) -> f64 + 'static,
        value: f64,
        thickness: f64,
    ) -> WidgetResult<Self> {
        let root = stage.create_container();
        stage.set_position(root, origin.x, origin.y)?;
        stage.add_root(root)?;
        let line = Line::styled(stage, Point::ZERO, Point::ZERO, color, thickness, None)?;
        stage.add_child(root, line.root())?;
        let mut guide = Self {
            root,
            line,
            equation: Box::new(equation),
            value,
        };
        guide.redraw(stage)?;
        Ok(guide)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn line(&self) -> &Line {
        &self.line
    }

    /// Move the guide to a new x value.
    pub fn set_value(&mut self, stage: &mut Stage, value: f64) -> WidgetResult<()> {
        self.value = value;
        self.redraw(stage)
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.line.set_color(stage, color)
    }
}

impl Widget for GuideLines {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let v = self.value;
        let y = (self.equation)(v);
        let finite = y.is_finite();
        stage.set_visible(self.line.root(), finite)?;
        if finite {
            self.line.set_start_end(stage, Point::new(v, 0.0), Point::new(v, y))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_follows_value() {
        let mut stage = Stage::default();
        let mut guide = GuideLines::new(
            &mut stage,
            Point::new(100.0, 300.0),
            SerializableColor::black(),
            |x| -2.0 * x,
            10.0,
        )
        .unwrap();
        assert_eq!(guide.line().end(), Point::new(10.0, -20.0));

        guide.set_value(&mut stage, 30.0).unwrap();
        assert_eq!(guide.line().start(), Point::new(30.0, 0.0));
        let tip = stage.local_to_global(guide.line().shape(), Point::new(guide.line().length(), 0.0));
        assert!((tip.x - 130.0).abs() < 1e-9);
        assert!((tip.y - 240.0).abs() < 1e-9);
    }

    #[test]
    fn test_guide_nested_under_container() {
        let mut stage = Stage::default();
        let guide =
            GuideLines::new(&mut stage, Point::ZERO, SerializableColor::black(), |x| x, 1.0).unwrap();
        assert_eq!(stage.roots(), &[guide.root()]);
        assert_eq!(stage.node(guide.line().root()).unwrap().parent(), Some(guide.root()));
    }

    #[test]
    fn test_non_finite_hides_line() {
        let mut stage = Stage::default();
        let mut guide =
            GuideLines::new(&mut stage, Point::ZERO, SerializableColor::black(), |x| 1.0 / x, 1.0).unwrap();
        guide.set_value(&mut stage, 0.0).unwrap();
        assert!(!stage.node(guide.line().root()).unwrap().visible);
        guide.set_value(&mut stage, 2.0).unwrap();
        assert!(stage.node(guide.line().root()).unwrap().visible);
    }
}
