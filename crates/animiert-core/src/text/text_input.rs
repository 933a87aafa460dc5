//! Single-line text field with a movable caret and shift selection.

use kurbo::{Point, Rect};

use super::editing::{CharFilter, EditOutcome, TextEditState};
use super::field::FieldNodes;
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::input::KeyEvent;
use crate::scene::{Font, NodeId, Stage, StrokeStyle};
use crate::widget::{UiEvent, Widget, WidgetEvent};

/// A bordered input box.
///
/// Typing inserts at the caret (numeric characters by default), Left/Right
/// and Home/End move it, and holding shift while moving selects. The pointer
/// places the caret on press and selects while dragging.
#[derive(Debug, Clone)]
pub struct TextInput {
    root: NodeId,
    nodes: FieldNodes,
    state: TextEditState,
    font: Font,
    color: SerializableColor,
    width: f64,
    focused: bool,
    /// Char index where the current pointer drag started.
    drag_anchor: Option<usize>,
}

impl TextInput {
    pub fn new(
        stage: &mut Stage,
        text: impl Into<String>,
        font: Font,
        color: SerializableColor,
        width: f64,
    ) -> WidgetResult<Self> {
        Self::with_max_length(stage, text, font, color, width, None)
    }

    pub fn with_max_length(
        stage: &mut Stage,
        text: impl Into<String>,
        font: Font,
        color: SerializableColor,
        width: f64,
        max_length: Option<usize>,
    ) -> WidgetResult<Self> {
        let root = stage.create_container();
        stage.add_root(root)?;
        let nodes = FieldNodes::create(stage, root, &font, color)?;
        let mut input = Self {
            root,
            nodes,
            state: TextEditState::new(text, CharFilter::Numeric).with_max_length(max_length),
            font,
            color,
            width,
            focused: false,
            drag_anchor: None,
        };
        input.redraw(stage)?;
        Ok(input)
    }

    pub fn text(&self) -> &str {
        self.state.text()
    }

    pub fn state(&self) -> &TextEditState {
        &self.state
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    pub fn text_node(&self) -> NodeId {
        self.nodes.text
    }

    pub fn caret(&self) -> NodeId {
        self.nodes.caret
    }

    pub fn selection(&self) -> NodeId {
        self.nodes.selection
    }

    pub fn set_text(&mut self, stage: &mut Stage, text: impl Into<String>) -> WidgetResult<()> {
        self.state.set_text(text);
        self.redraw(stage)
    }

    /// Change which characters typing accepts.
    pub fn set_filter(&mut self, stage: &mut Stage, filter: CharFilter) -> WidgetResult<()> {
        self.state.set_filter(filter);
        self.redraw(stage)
    }

    pub fn set_max_length(&mut self, stage: &mut Stage, max_length: Option<usize>) -> WidgetResult<()> {
        self.state.set_max_length(max_length);
        self.redraw(stage)
    }

    pub fn set_width(&mut self, stage: &mut Stage, width: f64) -> WidgetResult<()> {
        self.width = width;
        self.redraw(stage)
    }

    pub fn set_font(&mut self, stage: &mut Stage, font: Font) -> WidgetResult<()> {
        self.font = font;
        self.redraw(stage)
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.color = color;
        self.redraw(stage)
    }

    pub fn select_range(&mut self, stage: &mut Stage, anchor: usize, focus: usize) -> WidgetResult<()> {
        self.state.select_range(anchor, focus);
        self.redraw(stage)
    }

    fn index_at(&self, stage: &Stage, position: Point) -> usize {
        let x = stage.global_to_local(self.root, position).x;
        self.nodes.index_at(stage, &self.state, &self.font, x)
    }
}

impl Widget for TextInput {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let size = self
            .nodes
            .draw(stage, &self.state, &self.font, self.color, self.focused)?;
        let theme = stage.theme();
        let padding = theme.text_padding;
        let border = StrokeStyle::new(1.0, theme.input_border);
        let frame = Rect::new(0.0, -padding / 2.0, self.width, size.height + padding / 2.0);
        // Transparent fill so the whole box takes the pointer.
        stage
            .graphics_mut(self.nodes.frame)?
            .clear()
            .fill_and_stroke(&frame, SerializableColor::transparent(), border);
        Ok(())
    }

    fn on_pointer(&mut self, stage: &mut Stage, event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
        match *event {
            UiEvent::Press { position, .. } => {
                let index = self.index_at(stage, position);
                self.state.set_cursor(index);
                self.drag_anchor = Some(index);
            }
            UiEvent::Drag { position, .. } => {
                let Some(anchor) = self.drag_anchor else {
                    return Ok(None);
                };
                let index = self.index_at(stage, position);
                self.state.select_range(anchor, index);
            }
            UiEvent::Release { .. } => {
                self.drag_anchor = None;
                return Ok(None);
            }
            _ => return Ok(None),
        }
        self.redraw(stage)?;
        Ok(None)
    }

    fn on_key(&mut self, stage: &mut Stage, event: &KeyEvent) -> WidgetResult<Option<WidgetEvent>> {
        match self.state.apply_key(event) {
            EditOutcome::Ignored => Ok(None),
            EditOutcome::Moved => {
                self.redraw(stage)?;
                Ok(None)
            }
            EditOutcome::Edited => {
                self.redraw(stage)?;
                Ok(Some(WidgetEvent::TextChanged(self.state.text().to_string())))
            }
        }
    }

    fn accepts_focus(&self) -> bool {
        true
    }

    fn set_focused(&mut self, stage: &mut Stage, focused: bool) -> WidgetResult<()> {
        self.focused = focused;
        if !focused {
            self.state.clear_selection();
        }
        self.redraw(stage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::Key;
    use kurbo::Shape;
    use std::time::Instant;

    fn input(stage: &mut Stage, text: &str) -> TextInput {
        let mut input =
            TextInput::new(stage, text, Font::new("Arial", 20.0), SerializableColor::black(), 200.0).unwrap();
        input.set_focused(stage, true).unwrap();
        input
    }

    fn press(position: Point, target: NodeId) -> UiEvent {
        UiEvent::Press {
            position,
            target,
            time: Instant::now(),
        }
    }

    #[test]
    fn test_insert_at_caret() {
        let mut stage = Stage::default();
        let mut field = input(&mut stage, "14");
        field.on_key(&mut stage, &KeyEvent::new(Key::Left)).unwrap();
        let event = field.on_key(&mut stage, &KeyEvent::char('2')).unwrap();
        assert_eq!(event, Some(WidgetEvent::TextChanged("124".into())));
        assert_eq!(field.state().cursor(), 2);

        let caret_x = stage.node(field.caret()).unwrap().transform.x;
        let expected = stage.measure_text("12", &Font::new("Arial", 20.0)).width;
        assert!((caret_x - expected).abs() < 1e-9);
    }

    #[test]
    fn test_refuses_minus_sign() {
        let mut stage = Stage::default();
        let mut field = input(&mut stage, "3");
        assert_eq!(field.on_key(&mut stage, &KeyEvent::char('-')).unwrap(), None);
        assert_eq!(field.text(), "3");
    }

    #[test]
    fn test_max_length_refuses() {
        let mut stage = Stage::default();
        let mut field =
            TextInput::with_max_length(&mut stage, "99", Font::default(), SerializableColor::black(), 80.0, Some(2))
                .unwrap();
        assert_eq!(field.on_key(&mut stage, &KeyEvent::char('1')).unwrap(), None);
        assert_eq!(field.text(), "99");
    }

    #[test]
    fn test_shift_selection_draws_highlight() {
        let mut stage = Stage::default();
        let mut field = input(&mut stage, "123");
        field.on_key(&mut stage, &KeyEvent::shifted(Key::Left)).unwrap();
        field.on_key(&mut stage, &KeyEvent::shifted(Key::Left)).unwrap();
        assert_eq!(field.state().selected_text(), Some("23"));

        let highlight = stage.graphics(field.selection()).unwrap();
        assert_eq!(highlight.ops().len(), 1);
        let overlay = field.nodes.overlay;
        assert_eq!(stage.text(overlay).unwrap().content, "23");
        assert_eq!(stage.text(overlay).unwrap().color, stage.theme().selection_text);

        // Moving without shift collapses the selection.
        field.on_key(&mut stage, &KeyEvent::new(Key::End)).unwrap();
        assert!(stage.graphics(field.selection()).unwrap().is_empty());
        assert!(!stage.node(overlay).unwrap().visible);
    }

    #[test]
    fn test_typing_replaces_selection() {
        let mut stage = Stage::default();
        let mut field = input(&mut stage, "500");
        field.select_range(&mut stage, 0, 1).unwrap();
        field.on_key(&mut stage, &KeyEvent::char('7')).unwrap();
        assert_eq!(field.text(), "700");
    }

    #[test]
    fn test_pointer_places_caret_and_selects() {
        let mut stage = Stage::default();
        let mut field = input(&mut stage, "1111");
        stage.set_position(field.root(), 50.0, 50.0).unwrap();
        let font = Font::new("Arial", 20.0);
        let digit = stage.measure_text("1", &font).width;
        let target = field.text_node();

        let at = |chars: f64| Point::new(50.0 + digit * chars, 55.0);
        field.on_pointer(&mut stage, &press(at(1.1), target)).unwrap();
        assert_eq!(field.state().cursor(), 1);

        let drag = UiEvent::Drag {
            position: at(3.2),
            target: Some(target),
        };
        field.on_pointer(&mut stage, &drag).unwrap();
        assert_eq!(field.state().selected_range(), Some(1..3));

        let release = UiEvent::Release {
            position: at(3.2),
            inside: true,
        };
        field.on_pointer(&mut stage, &release).unwrap();
        let later = UiEvent::Drag {
            position: at(4.0),
            target: None,
        };
        field.on_pointer(&mut stage, &later).unwrap();
        assert_eq!(field.state().selected_range(), Some(1..3));
    }

    #[test]
    fn test_caret_hidden_without_focus() {
        let mut stage = Stage::default();
        let mut field = input(&mut stage, "1");
        assert!(stage.node(field.caret()).unwrap().visible);
        field.set_focused(&mut stage, false).unwrap();
        assert!(!stage.node(field.caret()).unwrap().visible);
        assert!(!field.is_focused());
    }

    #[test]
    fn test_frame_spans_width() {
        let mut stage = Stage::default();
        let field = input(&mut stage, "");
        let bounds = stage.graphics(field.nodes.frame).unwrap().ops()[0].path.bounding_box();
        assert!((bounds.width() - 200.0).abs() < 1e-9);
        let padding = stage.theme().text_padding;
        assert!((bounds.y0 + padding / 2.0).abs() < 1e-9);
    }
}
