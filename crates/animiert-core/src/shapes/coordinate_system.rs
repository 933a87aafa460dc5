//! Axes drawn as arrows from a common origin.

use kurbo::Point;

use super::Arrow;
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::scene::{NodeId, Stage};
use crate::widget::Widget;

/// Arrow lengths in each direction; zero omits that arrow.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AxisSizes {
    pub top: f64,
    pub bottom: f64,
    pub left: f64,
    pub right: f64,
}

impl AxisSizes {
    pub fn new(top: f64, bottom: f64, left: f64, right: f64) -> Self {
        Self {
            top,
            bottom,
            left,
            right,
        }
    }

    /// End points of the non-empty axes, in top, bottom, left, right order.
    fn ends(&self) -> impl Iterator<Item = Point> {
        [
            Point::new(0.0, -self.top),
            Point::new(0.0, self.bottom),
            Point::new(-self.left, 0.0),
            Point::new(self.right, 0.0),
        ]
        .into_iter()
        .filter(|p| *p != Point::ZERO)
    }
}

/// Up to four arrows pointing away from the container origin.
#[derive(Debug, Clone)]
pub struct CoordinateSystem {
    root: NodeId,
    arrows: Vec<Arrow>,
    sizes: AxisSizes,
    color: SerializableColor,
    arrow_length: f64,
    arrow_width: f64,
    thickness: f64,
}

impl CoordinateSystem {
    pub fn new(
        stage: &mut Stage,
        sizes: AxisSizes,
        color: SerializableColor,
        arrow_length: f64,
        arrow_width: f64,
    ) -> WidgetResult<Self> {
        let root = stage.create_container();
        stage.add_root(root)?;
        let mut axes = Self {
            root,
            arrows: Vec::new(),
            sizes,
            color,
            arrow_length,
            arrow_width,
            thickness: 1.0,
        };
        axes.redraw(stage)?;
        Ok(axes)
    }

    pub fn arrows(&self) -> &[Arrow] {
        &self.arrows
    }

    pub fn sizes(&self) -> AxisSizes {
        self.sizes
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.color = color;
        for arrow in &mut self.arrows {
            arrow.set_color(stage, color)?;
        }
        Ok(())
    }

    pub fn set_sizes(&mut self, stage: &mut Stage, sizes: AxisSizes) -> WidgetResult<()> {
        self.sizes = sizes;
        self.redraw(stage)
    }

    pub fn set_thickness(&mut self, stage: &mut Stage, thickness: f64) -> WidgetResult<()> {
        self.thickness = thickness;
        self.redraw(stage)
    }
}

impl Widget for CoordinateSystem {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        stage.remove_all_children(self.root)?;
        self.arrows.clear();
        for end in self.sizes.ends() {
            let arrow = Arrow::with_thickness(
                stage,
                Point::ZERO,
                end,
                self.color,
                self.arrow_length,
                self.arrow_width,
                self.thickness,
            )?;
            stage.add_child(self.root, arrow.root())?;
            self.arrows.push(arrow);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_sizes_skip_arrows() {
        let mut stage = Stage::default();
        let axes = CoordinateSystem::new(
            &mut stage,
            AxisSizes::new(100.0, 0.0, 0.0, 200.0),
            SerializableColor::black(),
            10.0,
            6.0,
        )
        .unwrap();
        assert_eq!(axes.arrows().len(), 2);
        assert_eq!(axes.arrows()[0].end(), Point::new(0.0, -100.0));
        assert_eq!(axes.arrows()[1].end(), Point::new(200.0, 0.0));
        assert_eq!(stage.roots(), &[axes.root()]);
    }

    #[test]
    fn test_resize_replaces_arrows() {
        let mut stage = Stage::default();
        let mut axes = CoordinateSystem::new(
            &mut stage,
            AxisSizes::new(50.0, 50.0, 50.0, 50.0),
            SerializableColor::black(),
            10.0,
            6.0,
        )
        .unwrap();
        let full = stage.len();
        axes.set_sizes(&mut stage, AxisSizes::new(0.0, 0.0, 0.0, 80.0)).unwrap();
        assert_eq!(axes.arrows().len(), 1);
        // Each arrow owns a container and a shape.
        assert_eq!(stage.len(), full - 6);
    }

    #[test]
    fn test_recolor() {
        let mut stage = Stage::default();
        let mut axes = CoordinateSystem::new(
            &mut stage,
            AxisSizes::new(10.0, 10.0, 10.0, 10.0),
            SerializableColor::black(),
            4.0,
            4.0,
        )
        .unwrap();
        let red = SerializableColor::rgb(255, 0, 0);
        axes.set_color(&mut stage, red).unwrap();
        assert!(axes.arrows().iter().all(|a| a.color() == red));
    }
}
