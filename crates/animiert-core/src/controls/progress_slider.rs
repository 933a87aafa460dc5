//! Slider with a triangular pointer hanging off the track.

use kurbo::{Point, Rect};

use super::numeric_stepper::format_value;
use super::slider::{Orientation, SliderDrag, SliderRange, rounded_polygon};
use crate::error::WidgetResult;
use crate::scene::{Font, NodeId, Paint, Stage, StrokeStyle, TextAlign, TextBaseline, TextNode};
use crate::widget::{UiEvent, Widget, WidgetEvent, WidgetState};

const CORNER_RADIUS: f64 = 5.0;
const OUTLINE_WIDTH: f64 = 0.5;

/// A track with a rounded triangle pointing at the current value.
///
/// The triangle sits below a horizontal track and left of a vertical one.
/// An optional readout shows the value past the end of the track.
#[derive(Debug, Clone)]
pub struct ProgressSlider {
    root: NodeId,
    track: NodeId,
    thumb: NodeId,
    readout: NodeId,
    range: SliderRange,
    value: f64,
    button_size: f64,
    font: Font,
    orientation: Orientation,
    show_value: bool,
    state: WidgetState,
    drag: SliderDrag,
}

impl ProgressSlider {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        stage: &mut Stage,
        size: f64,
        button_size: f64,
        min: f64,
        max: f64,
        value: f64,
        font: Font,
        orientation: Orientation,
    ) -> WidgetResult<Self> {
        let range = SliderRange::new(min, max, size)?;
        let root = stage.create_container();
        let track = stage.create_shape();
        let thumb = stage.create_shape();
        let color = stage.theme().text;
        let readout = stage.create_text(TextNode::new("", font.clone(), color));
        for id in [track, thumb, readout] {
            stage.add_child(root, id)?;
        }
        stage.add_root(root)?;
        let mut slider = Self {
            root,
            track,
            thumb,
            readout,
            range,
            value: range.clamp(value),
            button_size,
            font,
            orientation,
            show_value: false,
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

    pub fn thumb(&self) -> NodeId {
        self.thumb
    }

    pub fn readout(&self) -> NodeId {
        self.readout
    }

    pub fn thumb_offset(&self) -> f64 {
        self.range.offset_of(self.value)
    }

    /// Set the value, clamped to the range. Returns the stored value.
    pub fn set_value(&mut self, stage: &mut Stage, value: f64) -> WidgetResult<f64> {
        self.value = self.range.clamp(value);
        self.redraw(stage)?;
        Ok(self.value)
    }

    pub fn set_range(&mut self, stage: &mut Stage, min: f64, max: f64) -> WidgetResult<()> {
        self.range = SliderRange::new(min, max, self.range.size)?;
        self.value = self.range.clamp(self.value);
        self.redraw(stage)
    }

    pub fn set_orientation(&mut self, stage: &mut Stage, orientation: Orientation) -> WidgetResult<()> {
        self.orientation = orientation;
        self.redraw(stage)
    }

    pub fn set_button_size(&mut self, stage: &mut Stage, button_size: f64) -> WidgetResult<()> {
        self.button_size = button_size;
        self.redraw(stage)
    }

    pub fn set_font(&mut self, stage: &mut Stage, font: Font) -> WidgetResult<()> {
        self.font = font;
        self.redraw(stage)
    }

    /// Show or hide the numeric readout.
    pub fn set_show_value(&mut self, stage: &mut Stage, show: bool) -> WidgetResult<()> {
        self.show_value = show;
        self.redraw(stage)
    }

    /// Triangle corners with the tip on the track at the origin.
    fn pointer_corners(&self) -> [Point; 3] {
        let s = self.button_size;
        match self.orientation {
            Orientation::Horizontal => [Point::ZERO, Point::new(-s / 2.0, s), Point::new(s / 2.0, s)],
            Orientation::Vertical => [Point::ZERO, Point::new(-s, -s / 2.0), Point::new(-s, s / 2.0)],
        }
    }
}

impl Widget for ProgressSlider {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let theme = stage.theme();
        let (outline, [top, bottom]) = if self.state.is_highlighted() {
            (theme.accent, theme.progress_hover_fill)
        } else {
            (theme.border, theme.progress_fill)
        };
        let track_color = theme.track;
        let size = self.range.size;

        let track = match self.orientation {
            Orientation::Horizontal => Rect::new(0.0, 0.0, size, 1.0),
            Orientation::Vertical => Rect::new(0.0, 0.0, 1.0, size),
        };
        stage.graphics_mut(self.track)?.clear().fill(&track, track_color);

        let pointer = rounded_polygon(&self.pointer_corners(), CORNER_RADIUS);
        stage.graphics_mut(self.thumb)?.clear().fill_and_stroke(
            &pointer,
            Paint::vertical(top, bottom, self.button_size),
            StrokeStyle::new(OUTLINE_WIDTH, outline),
        );
        let at = self.orientation.point(self.thumb_offset());
        stage.set_position(self.thumb, at.x, at.y)?;

        let (end, align, baseline) = match self.orientation {
            Orientation::Horizontal => (Point::new(size + self.button_size, 0.0), TextAlign::Left, TextBaseline::Middle),
            Orientation::Vertical => (Point::new(0.0, size + self.button_size), TextAlign::Center, TextBaseline::Top),
        };
        let readout = stage.text_mut(self.readout)?;
        readout.content = format_value(self.value);
        readout.font = self.font.clone();
        readout.align = align;
        readout.baseline = baseline;
        stage.set_position(self.readout, end.x, end.y)?;
        stage.set_visible(self.readout, self.show_value)
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
                let local = stage.global_to_local(self.root, position);
                self.drag.begin(self.thumb_offset(), self.orientation.along(local));
            }
            UiEvent::Drag { position, .. } => {
                let local = stage.global_to_local(self.root, position);
                let Some(offset) = self.drag.update(self.orientation.along(local)) else {
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
