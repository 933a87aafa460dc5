//! Value/position mapping and drag tracking shared by the sliders.

use kurbo::{BezPath, Point};
use serde::{Deserialize, Serialize};

use crate::error::{WidgetError, WidgetResult};

/// Direction of a slider track.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Coordinate of `p` along the track.
    pub fn along(self, p: Point) -> f64 {
        match self {
            Orientation::Horizontal => p.x,
            Orientation::Vertical => p.y,
        }
    }

    /// Point at `offset` along the track.
    pub fn point(self, offset: f64) -> Point {
        match self {
            Orientation::Horizontal => Point::new(offset, 0.0),
            Orientation::Vertical => Point::new(0.0, offset),
        }
    }
}

/// Maps values in `[min, max]` onto offsets in `[0, size]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    /// Track length in pixels.
    pub size: f64,
}

impl SliderRange {
    /// Fails when `min > max` or either bound is NaN.
    pub fn new(min: f64, max: f64, size: f64) -> WidgetResult<Self> {
        if min.is_nan() || max.is_nan() || min > max {
            return Err(WidgetError::EmptyRange { min, max });
        }
        Ok(Self { min, max, size })
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Track offset of a value. A range with `min == max` pins everything at 0.
    pub fn offset_of(&self, value: f64) -> f64 {
        let span = self.max - self.min;
        if span == 0.0 {
            return 0.0;
        }
        (self.clamp(value) - self.min) / span * self.size
    }

    /// Value at a track offset, clamping the offset to the track.
    pub fn value_at(&self, offset: f64) -> f64 {
        if self.size <= 0.0 {
            return self.min;
        }
        let offset = offset.max(0.0).min(self.size);
        self.min + offset / self.size * (self.max - self.min)
    }
}

/// Tracks a thumb drag, keeping the distance between the pointer and the
/// thumb constant.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub(crate) struct SliderDrag {
    grab: Option<f64>,
}

impl SliderDrag {
    pub fn begin(&mut self, thumb_offset: f64, pointer: f64) {
        self.grab = Some(thumb_offset - pointer);
    }

    /// Thumb offset for a pointer coordinate, or `None` when not dragging.
    pub fn update(&self, pointer: f64) -> Option<f64> {
        self.grab.map(|grab| pointer + grab)
    }

    pub fn end(&mut self) {
        self.grab = None;
    }

    #[cfg(test)]
    pub fn is_active(&self) -> bool {
        self.grab.is_some()
    }
}

/// Closed polygon with every corner rounded by up to `radius`.
pub(crate) fn rounded_polygon(points: &[Point], radius: f64) -> BezPath {
    let mut path = BezPath::new();
    let n = points.len();
    if n < 3 {
        return path;
    }
    for i in 0..n {
        let prev = points[(i + n - 1) % n];
        let corner = points[i];
        let next = points[(i + 1) % n];
        let into = prev - corner;
        let out = next - corner;
        let r_in = radius.min(into.hypot() / 2.0);
        let r_out = radius.min(out.hypot() / 2.0);
        let entry = corner + into.normalize() * r_in;
        let exit = corner + out.normalize() * r_out;
        if i == 0 {
            path.move_to(entry);
        } else {
            path.line_to(entry);
        }
        path.quad_to(corner, exit);
    }
    path.close_path();
    path
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Shape;

    #[test]
    fn test_offset_and_value_mapping() {
        let range = SliderRange::new(10.0, 20.0, 200.0).unwrap();
        assert!((range.offset_of(15.0) - 100.0).abs() < 1e-9);
        assert!((range.value_at(50.0) - 12.5).abs() < 1e-9);
        assert!((range.offset_of(99.0) - 200.0).abs() < 1e-9);
        assert!((range.value_at(-40.0) - 10.0).abs() < 1e-9);
        assert!((range.value_at(900.0) - 20.0).abs() < 1e-9);
    }

    #[test]
    fn test_degenerate_range() {
        let range = SliderRange::new(5.0, 5.0, 100.0).unwrap();
        assert_eq!(range.offset_of(5.0), 0.0);
        assert_eq!(range.value_at(70.0), 5.0);
        assert!(matches!(
            SliderRange::new(3.0, 1.0, 100.0),
            Err(WidgetError::EmptyRange { .. })
        ));
    }

    #[test]
    fn test_drag_keeps_grab_offset() {
        let mut drag = SliderDrag::default();
        assert_eq!(drag.update(10.0), None);
        drag.begin(50.0, 46.0);
        assert_eq!(drag.update(60.0), Some(64.0));
        drag.end();
        assert!(!drag.is_active());
    }

    #[test]
    fn test_rounded_polygon_stays_inside() {
        let triangle = [Point::new(0.0, 0.0), Point::new(-10.0, 20.0), Point::new(10.0, 20.0)];
        let path = rounded_polygon(&triangle, 5.0);
        let bounds = path.bounding_box();
        assert!(bounds.x0 > -10.0 && bounds.x1 < 10.0);
        assert!(bounds.y0 > 0.0 && bounds.y1 <= 20.0 + 1e-9);
        assert!(path.contains(Point::new(0.0, 15.0)));
        assert!(rounded_polygon(&triangle[..2], 5.0).elements().is_empty());
    }
}
