//! Nodes shared by the single-line editable fields: text, selection and caret.

use kurbo::{Rect, Size};

use super::editing::TextEditState;
use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::scene::{Font, NodeId, Stage, TextNode};

/// Text, selection highlight, highlighted-text overlay and caret of an edit field.
///
/// The frame is drawn by the owning widget and sits below everything else.
#[derive(Debug, Clone, Copy)]
pub(crate) struct FieldNodes {
    pub frame: NodeId,
    pub text: NodeId,
    pub selection: NodeId,
    pub overlay: NodeId,
    pub caret: NodeId,
}

impl FieldNodes {
    /// Create the nodes as children of `parent`, in paint order.
    pub fn create(stage: &mut Stage, parent: NodeId, font: &Font, color: SerializableColor) -> WidgetResult<Self> {
        let frame = stage.create_shape();
        let text = stage.create_text(TextNode::new("", font.clone(), color));
        let selection = stage.create_shape();
        let overlay = stage.create_text(TextNode::new("", font.clone(), color));
        let caret = stage.create_shape();
        for id in [frame, text, selection, overlay, caret] {
            stage.add_child(parent, id)?;
        }
        Ok(Self {
            frame,
            text,
            selection,
            overlay,
            caret,
        })
    }

    /// Redraw everything except the frame. Returns the size of the full text.
    pub fn draw(
        &self,
        stage: &mut Stage,
        state: &TextEditState,
        font: &Font,
        color: SerializableColor,
        show_caret: bool,
    ) -> WidgetResult<Size> {
        let theme = stage.theme().clone();
        let node = stage.text_mut(self.text)?;
        node.content = state.text().to_string();
        node.font = font.clone();
        node.color = color;
        let size = stage.measure_node(self.text)?;
        let width_to = |stage: &Stage, index: usize| stage.measure_text(state.prefix(index), font).width;

        match state.selected_range() {
            Some(range) => {
                let start = width_to(stage, range.start);
                let end = width_to(stage, range.end);
                stage
                    .graphics_mut(self.selection)?
                    .clear()
                    .fill(&Rect::new(start, 0.0, end, size.height), theme.selection);
                let overlay = stage.text_mut(self.overlay)?;
                overlay.content = state.selected_text().unwrap_or_default().to_string();
                overlay.font = font.clone();
                overlay.color = theme.selection_text;
                stage.set_position(self.overlay, start, 0.0)?;
                stage.set_visible(self.overlay, true)?;
            }
            None => {
                stage.graphics_mut(self.selection)?.clear();
                stage.text_mut(self.overlay)?.content.clear();
                stage.set_visible(self.overlay, false)?;
            }
        }

        let caret_x = width_to(stage, state.cursor());
        stage
            .graphics_mut(self.caret)?
            .clear()
            .fill(&Rect::new(0.0, 0.0, 1.0, size.height), theme.caret);
        stage.set_position(self.caret, caret_x, 0.0)?;
        stage.set_visible(self.caret, show_caret)?;
        Ok(size)
    }

    /// Char index under a point given in the field's local space.
    pub fn index_at(&self, stage: &Stage, state: &TextEditState, font: &Font, x: f64) -> usize {
        state.cursor_index_from_x(x, |prefix| stage.measure_text(prefix, font).width)
    }
}
