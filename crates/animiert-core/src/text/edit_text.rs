//! Append-only numeric entry field.

use kurbo::Rect;

use super::editing::{CharFilter, EditOutcome, TextEditState};
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::input::{Key, KeyEvent};
use crate::scene::{Font, NodeId, Stage, TextNode};
use crate::widget::{Widget, WidgetEvent};

/// Gap between the end of the text and the caret.
const CARET_GAP: f64 = 2.0;

/// A line of text that grows at the end as numeric keys are typed.
///
/// Only the end of the text is editable: characters append and Backspace
/// drops the last one. The caret always sits just right of the text.
#[derive(Debug, Clone)]
pub struct EditText {
    root: NodeId,
    text_node: NodeId,
    caret: NodeId,
    state: TextEditState,
    font: Font,
    color: SerializableColor,
}

impl EditText {
    pub fn new(stage: &mut Stage, text: impl Into<String>, font: Font, color: SerializableColor) -> WidgetResult<Self> {
        let root = stage.create_container();
        let text_node = stage.create_text(TextNode::new("", font.clone(), color));
        let caret = stage.create_shape();
        stage.add_child(root, text_node)?;
        stage.add_child(root, caret)?;
        stage.add_root(root)?;
        let mut field = Self {
            root,
            text_node,
            caret,
            state: TextEditState::new(text, CharFilter::Numeric),
            font,
            color,
        };
        field.redraw(stage)?;
        Ok(field)
    }

    pub fn text(&self) -> &str {
        self.state.text()
    }

    pub fn text_node(&self) -> NodeId {
        self.text_node
    }

    pub fn caret(&self) -> NodeId {
        self.caret
    }

    pub fn set_text(&mut self, stage: &mut Stage, text: impl Into<String>) -> WidgetResult<()> {
        self.state.set_text(text);
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
}

impl Widget for EditText {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let text = stage.text_mut(self.text_node)?;
        text.content = self.state.text().to_string();
        text.font = self.font.clone();
        text.color = self.color;

        let size = stage.measure_node(self.text_node)?;
        let caret_color = stage.theme().caret;
        stage
            .graphics_mut(self.caret)?
            .clear()
            .fill(&Rect::new(0.0, 0.0, 1.0, size.height), caret_color);
        stage.set_position(self.caret, size.width + CARET_GAP, 0.0)
    }

    fn on_key(&mut self, stage: &mut Stage, event: &KeyEvent) -> WidgetResult<Option<WidgetEvent>> {
        self.state.move_end(false);
        let outcome = match event.key {
            Key::Character(c) => self.state.insert(c),
            Key::Backspace => self.state.backspace(),
            _ => EditOutcome::Ignored,
        };
        if outcome != EditOutcome::Edited {
            return Ok(None);
        }
        self.redraw(stage)?;
        Ok(Some(WidgetEvent::TextChanged(self.state.text().to_string())))
    }

    fn accepts_focus(&self) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field(stage: &mut Stage, text: &str) -> EditText {
        EditText::new(stage, text, Font::new("Arial", 16.0), SerializableColor::black()).unwrap()
    }

    #[test]
    fn test_typing_appends() {
        let mut stage = Stage::default();
        let mut edit = field(&mut stage, "3");
        let event = edit.on_key(&mut stage, &KeyEvent::char(',')).unwrap();
        assert_eq!(event, Some(WidgetEvent::TextChanged("3,".into())));
        edit.on_key(&mut stage, &KeyEvent::char('5')).unwrap();
        assert_eq!(edit.text(), "3,5");
        assert_eq!(stage.text(edit.text_node()).unwrap().content, "3,5");
    }

    #[test]
    fn test_rejects_letters_and_arrows() {
        let mut stage = Stage::default();
        let mut edit = field(&mut stage, "12");
        assert_eq!(edit.on_key(&mut stage, &KeyEvent::char('x')).unwrap(), None);
        assert_eq!(edit.on_key(&mut stage, &KeyEvent::char('-')).unwrap(), None);
        assert_eq!(edit.on_key(&mut stage, &KeyEvent::new(Key::Left)).unwrap(), None);
        // Arrows never move the insertion point away from the end.
        edit.on_key(&mut stage, &KeyEvent::char('3')).unwrap();
        assert_eq!(edit.text(), "123");
    }

    #[test]
    fn test_backspace_drops_last() {
        let mut stage = Stage::default();
        let mut edit = field(&mut stage, "7");
        edit.on_key(&mut stage, &KeyEvent::new(Key::Backspace)).unwrap();
        assert_eq!(edit.text(), "");
        assert_eq!(edit.on_key(&mut stage, &KeyEvent::new(Key::Backspace)).unwrap(), None);
    }

    #[test]
    fn test_caret_follows_text() {
        let mut stage = Stage::default();
        let mut edit = field(&mut stage, "1");
        let before = stage.node(edit.caret()).unwrap().transform.x;
        edit.on_key(&mut stage, &KeyEvent::char('0')).unwrap();
        let after = stage.node(edit.caret()).unwrap().transform.x;
        let width = stage.measure_node(edit.text_node()).unwrap().width;
        assert!(after > before);
        assert!((after - (width + CARET_GAP)).abs() < 1e-9);
    }
}
