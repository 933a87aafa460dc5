//! Slider with a translucent rectangular thumb.

use kurbo::{Line, Point, Rect, RoundedRect};

use super::slider::{Orientation, SliderDrag, SliderRange};
use crate::error::WidgetResult;
use crate::scene::{NodeId, Paint, Stage, StrokeStyle};
use crate::widget::{UiEvent, Widget, WidgetEvent, WidgetState};

const THUMB_RADIUS: f64 = 2.0;
const OUTLINE_WIDTH: f64 = 0.5;

/// A one pixel track with a draggable rounded thumb centered on it.
///
/// `width` and `height` describe the thumb as seen on a vertical slider; a
/// horizontal slider swaps them so the thumb stands across the track.
#[derive(Debug, Clone)]
pub struct ButtonSlider {
    root: NodeId,
    track: NodeId,
    thumb: NodeId,
    range: SliderRange,
    value: f64,
    width: f64,
    height: f64,
    orientation: Orientation,
    state: WidgetState,
    drag: SliderDrag,
}

impl ButtonSlider {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stage: &mut Stage,
        size: f64,
        width: f64,
        height: f64,
        min: f64,
        max: f64,
        value: f64,
        orientation: Orientation,
    ) -> WidgetResult<Self> {
        let range = SliderRange::new(min, max, size)?;
        let root = stage.create_container();
        let track = stage.create_shape();
        let thumb = stage.create_shape();
        stage.add_child(root, track)?;
        stage.add_child(root, thumb)?;
        stage.add_root(root)?;
        let mut slider = Self {
            root,
            track,
            thumb,
            range,
            value: range.clamp(value),
            width,
            height,
            orientation,
            state: WidgetState::Normal,
            drag: SliderDrag::default(),
        };
        slider.redraw(stage)?;
        Ok(slider)
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn range(&self) -> SliderRange {
        self.range
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn thumb(&self) -> NodeId {
        self.thumb
    }

    pub fn track(&self) -> NodeId {
        self.track
    }

    /// Thumb offset along the track.
    pub fn thumb_offset(&self) -> f64 {
        self.range.offset_of(self.value)
    }

    /// Set the value, clamped to the range. Returns the stored value.
    pub fn set_value(&mut self, stage: &mut Stage, value: f64) -> WidgetResult<f64> {
        self.value = self.range.clamp(value);
        self.redraw(stage)?;
        Ok(self.value)
    }

    /// Change the bounds, re-clamping the current value.
    pub fn set_range(&mut self, stage: &mut Stage, min: f64, max: f64) -> WidgetResult<()> {
        self.range = SliderRange::new(min, max, self.range.size)?;
        self.value = self.range.clamp(self.value);
        self.redraw(stage)
    }

    pub fn set_size(&mut self, stage: &mut Stage, size: f64) -> WidgetResult<()> {
        self.range.size = size;
        self.redraw(stage)
    }

    pub fn set_orientation(&mut self, stage: &mut Stage, orientation: Orientation) -> WidgetResult<()> {
        self.orientation = orientation;
        self.redraw(stage)
    }

    fn pointer_along(&self, stage: &Stage, position: Point) -> f64 {
        self.orientation.along(stage.global_to_local(self.root, position))
    }
}

impl Widget for ButtonSlider {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let theme = stage.theme();
        let (track_color, [gloss_top, gloss_bottom], marker) = (theme.track, theme.gloss_fill, theme.thumb_marker);
        let outline = if self.state.is_highlighted() {
            theme.accent
        } else {
            theme.thumb
        };
        let size = self.range.size;

        let (track, thumb_w, thumb_h) = match self.orientation {
            Orientation::Horizontal => (Rect::new(0.0, 0.0, size, 1.0), self.height, self.width),
            Orientation::Vertical => (Rect::new(0.0, 0.0, 1.0, size), self.width, self.height),
        };
        stage.graphics_mut(self.track)?.clear().fill(&track, track_color);

        let (gloss, marker_line) = match self.orientation {
            Orientation::Horizontal => (
                Paint::horizontal(gloss_top, gloss_bottom, thumb_w),
                Line::new((0.0, -thumb_h / 2.0), (0.0, thumb_h / 2.0)),
            ),
            Orientation::Vertical => (
                Paint::vertical(gloss_top, gloss_bottom, thumb_h),
                Line::new((-thumb_w / 2.0, 0.0), (thumb_w / 2.0, 0.0)),
            ),
        };
        let body = RoundedRect::new(-thumb_w / 2.0, -thumb_h / 2.0, thumb_w / 2.0, thumb_h / 2.0, THUMB_RADIUS);
        stage
            .graphics_mut(self.thumb)?
            .clear()
            .fill_and_stroke(&body, gloss, StrokeStyle::new(OUTLINE_WIDTH, outline).rounded())
            .stroke(&marker_line, StrokeStyle::new(OUTLINE_WIDTH, marker).rounded());

        let at = self.orientation.point(self.thumb_offset());
        stage.set_position(self.thumb, at.x, at.y)
    }

    fn on_pointer(&mut self, stage: &mut Stage, event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
        let mut reported = None;
        match *event {
            UiEvent::Enter { .. } => self.state.enter(),
            UiEvent::Leave { .. } => self.state.leave(),
            UiEvent::Press { position, target, .. } => {
                if target != self.thumb {
                    return Ok(None);
                }
                self.state.press();
                let pointer = self.pointer_along(stage, position);
                self.drag.begin(self.thumb_offset(), pointer);
            }
            UiEvent::Drag { position, .. } => {
                let Some(offset) = self.drag.update(self.pointer_along(stage, position)) else {
                    return Ok(None);
                };
                let value = self.range.value_at(offset);
                if value == self.value {
                    return Ok(None);
                }
                self.value = value;
                reported = Some(WidgetEvent::ValueChanged(value));
            }
            UiEvent::Release { inside, .. } => {
                self.drag.end();
                self.state.release(inside);
            }
            UiEvent::Click { .. } => return Ok(None),
        }
        self.redraw(stage)?;
        Ok(reported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::WidgetError;
    use std::time::Instant;

    fn slider(stage: &mut Stage, orientation: Orientation) -> ButtonSlider {
        let slider = ButtonSlider::new(stage, 200.0, 20.0, 10.0, 0.0, 100.0, 25.0, orientation).unwrap();
        stage.set_position(slider.root(), 100.0, 100.0).unwrap();
        slider
    }

    fn thumb_position(stage: &Stage, slider: &ButtonSlider) -> Point {
        let node = stage.node(slider.thumb()).unwrap();
        Point::new(node.transform.x, node.transform.y)
    }

    #[test]
    fn test_thumb_position_follows_value() {
        let mut stage = Stage::default();
        let mut s = slider(&mut stage, Orientation::Horizontal);
        assert_eq!(thumb_position(&stage, &s), Point::new(50.0, 0.0));
        assert_eq!(s.set_value(&mut stage, 150.0).unwrap(), 100.0);
        assert_eq!(thumb_position(&stage, &s), Point::new(200.0, 0.0));
        s.set_value(&mut stage, -3.0).unwrap();
        assert_eq!(s.value(), 0.0);
    }

    #[test]
    fn test_vertical_layout() {
        let mut stage = Stage::default();
        let mut s = slider(&mut stage, Orientation::Vertical);
        assert_eq!(thumb_position(&stage, &s), Point::new(0.0, 50.0));
        let track = stage.graphics(s.track()).unwrap().bounds().unwrap();
        assert!((track.height() - 200.0).abs() < 1e-9);
        s.set_orientation(&mut stage, Orientation::Horizontal).unwrap();
        assert_eq!(thumb_position(&stage, &s), Point::new(50.0, 0.0));
    }

    #[test]
    fn test_drag_keeps_offset_and_clamps() {
        let mut stage = Stage::default();
        let mut s = slider(&mut stage, Orientation::Horizontal);
        let press = UiEvent::Press {
            // Thumb sits at stage x = 150; grab it 3px right of center.
            position: Point::new(153.0, 100.0),
            target: s.thumb(),
            time: Instant::now(),
        };
        s.on_pointer(&mut stage, &press).unwrap();

        let drag = |x: f64| UiEvent::Drag {
            position: Point::new(x, 140.0),
            target: None,
        };
        let event = s.on_pointer(&mut stage, &drag(203.0)).unwrap();
        assert_eq!(event, Some(WidgetEvent::ValueChanged(50.0)));
        assert_eq!(thumb_position(&stage, &s), Point::new(100.0, 0.0));

        s.on_pointer(&mut stage, &drag(900.0)).unwrap();
        assert_eq!(s.value(), 100.0);
        assert_eq!(s.on_pointer(&mut stage, &drag(950.0)).unwrap(), None);

        let release = UiEvent::Release {
            position: Point::new(950.0, 140.0),
            inside: false,
        };
        s.on_pointer(&mut stage, &release).unwrap();
        assert_eq!(s.on_pointer(&mut stage, &drag(120.0)).unwrap(), None);
    }

    #[test]
    fn test_press_on_track_does_not_drag() {
        let mut stage = Stage::default();
        let mut s = slider(&mut stage, Orientation::Horizontal);
        let press = UiEvent::Press {
            position: Point::new(120.0, 100.0),
            target: s.track(),
            time: Instant::now(),
        };
        s.on_pointer(&mut stage, &press).unwrap();
        let drag = UiEvent::Drag {
            position: Point::new(180.0, 100.0),
            target: None,
        };
        assert_eq!(s.on_pointer(&mut stage, &drag).unwrap(), None);
        assert_eq!(s.value(), 25.0);
    }

    #[test]
    fn test_hover_outline() {
        let mut stage = Stage::default();
        let mut s = slider(&mut stage, Orientation::Horizontal);
        let outline = |stage: &Stage, s: &ButtonSlider| {
            stage.graphics(s.thumb()).unwrap().ops()[0].stroke.as_ref().unwrap().color
        };
        assert_eq!(outline(&stage, &s), stage.theme().thumb);
        s.on_pointer(&mut stage, &UiEvent::Enter { position: Point::ZERO })
            .unwrap();
        assert_eq!(outline(&stage, &s), stage.theme().accent);
    }

    #[test]
    fn test_invalid_range() {
        let mut stage = Stage::default();
        let result = ButtonSlider::new(&mut stage, 100.0, 10.0, 10.0, 5.0, 1.0, 2.0, Orientation::Horizontal);
        assert!(matches!(result, Err(WidgetError::EmptyRange { .. })));
    }
}
