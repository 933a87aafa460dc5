//! Push button with an optional toggle mode.

use kurbo::{Rect, RoundedRect, RoundedRectRadii};

use crate::error::WidgetResult;
use crate::scene::{Font, NodeId, Paint, Stage, StrokeStyle, TextAlign, TextBaseline, TextNode};
use crate::widget::{UiEvent, Widget, WidgetEvent, WidgetState};

/// Default corner radius.
pub const BUTTON_RADIUS: f64 = 10.0;
const OUTLINE_WIDTH: f64 = 0.5;

/// A rounded, gradient-filled button with a centered label.
///
/// In toggle mode every click flips `active`, and an active button keeps its
/// highlight after the pointer leaves.
#[derive(Debug, Clone)]
pub struct Button {
    root: NodeId,
    background: NodeId,
    label: NodeId,
    text: String,
    width: f64,
    height: f64,
    font: Font,
    radii: RoundedRectRadii,
    toggle_mode: bool,
    active: bool,
    state: WidgetState,
}

impl Button {
    pub fn new(
        stage: &mut Stage,
        text: impl Into<String>,
        width: f64,
        height: f64,
        font_family: impl Into<String>,
        font_size: f64,
    ) -> WidgetResult<Self> {
        let root = stage.create_container();
        let background = stage.create_shape();
        let font = Font::new(font_family, font_size);
        let text = text.into();
        let color = stage.theme().text;
        let label = stage.create_text(
            TextNode::new(text.clone(), font.clone(), color)
                .with_align(TextAlign::Center)
                .with_baseline(TextBaseline::Middle),
        );
        stage.add_child(root, background)?;
        stage.add_child(root, label)?;
        stage.add_root(root)?;
        let mut button = Self {
            root,
            background,
            label,
            text,
            width,
            height,
            font,
            radii: RoundedRectRadii::from_single_radius(BUTTON_RADIUS),
            toggle_mode: false,
            active: false,
            state: WidgetState::Normal,
        };
        button.redraw(stage)?;
        Ok(button)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_toggle(&self) -> bool {
        self.toggle_mode
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn background(&self) -> NodeId {
        self.background
    }

    pub fn label(&self) -> NodeId {
        self.label
    }

    /// Whether the button is drawn with the accent outline.
    pub fn is_highlighted(&self) -> bool {
        self.state.is_highlighted() || (self.toggle_mode && self.active)
    }

    pub fn set_text(&mut self, stage: &mut Stage, text: impl Into<String>) -> WidgetResult<()> {
        self.text = text.into();
        self.redraw(stage)
    }

    pub fn set_width(&mut self, stage: &mut Stage, width: f64) -> WidgetResult<()> {
        self.width = width;
        self.redraw(stage)
    }

    pub fn set_height(&mut self, stage: &mut Stage, height: f64) -> WidgetResult<()> {
        self.height = height;
        self.redraw(stage)
    }

    pub fn set_font(&mut self, stage: &mut Stage, family: impl Into<String>) -> WidgetResult<()> {
        self.font.family = family.into();
        self.redraw(stage)
    }

    pub fn set_font_size(&mut self, stage: &mut Stage, size: f64) -> WidgetResult<()> {
        self.font.size = size;
        self.redraw(stage)
    }

    /// Corner radii, clockwise from the top left.
    pub fn set_border_radii(
        &mut self,
        stage: &mut Stage,
        top_left: f64,
        top_right: f64,
        bottom_right: f64,
        bottom_left: f64,
    ) -> WidgetResult<()> {
        self.radii = RoundedRectRadii::new(top_left, top_right, bottom_right, bottom_left);
        self.redraw(stage)
    }

    pub fn set_toggle_mode(&mut self, stage: &mut Stage, toggle_mode: bool, active: bool) -> WidgetResult<()> {
        self.toggle_mode = toggle_mode;
        self.active = active;
        self.redraw(stage)
    }
}

impl Widget for Button {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let theme = stage.theme();
        let (outline, [top, bottom]) = if self.is_highlighted() {
            (theme.accent, theme.button_active_fill)
        } else {
            (theme.border, theme.button_fill)
        };
        let shape = RoundedRect::from_rect(Rect::new(0.0, 0.0, self.width, self.height), self.radii);
        stage.graphics_mut(self.background)?.clear().fill_and_stroke(
            &shape,
            Paint::vertical(top, bottom, self.height),
            StrokeStyle::new(OUTLINE_WIDTH, outline),
        );

        let label = stage.text_mut(self.label)?;
        label.content = self.text.clone();
        label.font = self.font.clone();
        stage.set_position(self.label, self.width / 2.0, self.height / 2.0)
    }

    fn on_pointer(&mut self, stage: &mut Stage, event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
        let mut reported = None;
        match event {
            UiEvent::Enter { .. } => self.state.enter(),
            UiEvent::Leave { .. } => self.state.leave(),
            UiEvent::Press { .. } => self.state.press(),
            UiEvent::Release { inside, .. } => self.state.release(*inside),
            UiEvent::Click { .. } => {
                if self.toggle_mode {
                    self.active = !self.active;
                }
                log::debug!("button {:?} clicked, active = {}", self.text, self.active);
                reported = Some(WidgetEvent::Clicked { active: self.active });
            }
            UiEvent::Drag { .. } => return Ok(None),
        }
        self.redraw(stage)?;
        Ok(reported)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Shape};
    use std::time::Instant;

    fn button(stage: &mut Stage) -> Button {
        Button::new(stage, "OK", 100.0, 40.0, "Arial", 14.0).unwrap()
    }

    fn outline(stage: &Stage, button: &Button) -> crate::color::SerializableColor {
        let op = &stage.graphics(button.background()).unwrap().ops()[0];
        op.stroke.as_ref().unwrap().color
    }

    fn click(stage: &mut Stage, button: &mut Button) -> Option<WidgetEvent> {
        let position = Point::new(50.0, 20.0);
        let target = button.background();
        let press = UiEvent::Press {
            position,
            target,
            time: Instant::now(),
        };
        button.on_pointer(stage, &press).unwrap();
        button
            .on_pointer(stage, &UiEvent::Release { position, inside: true })
            .unwrap();
        button.on_pointer(stage, &UiEvent::Click { position, target }).unwrap()
    }

    #[test]
    fn test_layout() {
        let mut stage = Stage::default();
        let b = button(&mut stage);
        let label = stage.node(b.label()).unwrap();
        assert_eq!((label.transform.x, label.transform.y), (50.0, 20.0));
        let bounds = stage.graphics(b.background()).unwrap().ops()[0].path.bounding_box();
        assert!((bounds.width() - 100.0).abs() < 1e-9);
        assert!((bounds.height() - 40.0).abs() < 1e-9);
    }

    #[test]
    fn test_hover_highlight() {
        let mut stage = Stage::default();
        let mut b = button(&mut stage);
        let position = Point::ZERO;
        assert_eq!(outline(&stage, &b), stage.theme().border);
        b.on_pointer(&mut stage, &UiEvent::Enter { position }).unwrap();
        assert_eq!(outline(&stage, &b), stage.theme().accent);
        b.on_pointer(&mut stage, &UiEvent::Leave { position }).unwrap();
        assert_eq!(outline(&stage, &b), stage.theme().border);
    }

    #[test]
    fn test_plain_click_stays_inactive() {
        let mut stage = Stage::default();
        let mut b = button(&mut stage);
        assert_eq!(click(&mut stage, &mut b), Some(WidgetEvent::Clicked { active: false }));
        assert!(!b.is_active());
    }

    #[test]
    fn test_toggle_mode() {
        let mut stage = Stage::default();
        let mut b = button(&mut stage);
        b.set_toggle_mode(&mut stage, true, false).unwrap();
        assert_eq!(click(&mut stage, &mut b), Some(WidgetEvent::Clicked { active: true }));
        b.on_pointer(&mut stage, &UiEvent::Leave { position: Point::ZERO })
            .unwrap();
        // Active toggles keep the accent after the pointer leaves.
        assert_eq!(outline(&stage, &b), stage.theme().accent);
        assert_eq!(click(&mut stage, &mut b), Some(WidgetEvent::Clicked { active: false }));
    }

    #[test]
    fn test_resize_moves_label() {
        let mut stage = Stage::default();
        let mut b = button(&mut stage);
        b.set_width(&mut stage, 60.0).unwrap();
        b.set_height(&mut stage, 30.0).unwrap();
        let label = stage.node(b.label()).unwrap();
        assert_eq!((label.transform.x, label.transform.y), (30.0, 15.0));
        b.set_font_size(&mut stage, 20.0).unwrap();
        assert!((stage.text(b.label()).unwrap().font.size - 20.0).abs() < f64::EPSILON);
    }
}
