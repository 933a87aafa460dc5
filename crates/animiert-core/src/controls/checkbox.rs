//! Check box with a side label.

use kurbo::{BezPath, Rect};

use super::SideLabel;
use crate::error::WidgetResult;
use crate::scene::{Font, NodeId, Stage, StrokeStyle};
use crate::widget::{UiEvent, Widget, WidgetEvent, WidgetState};

const OUTLINE_WIDTH: f64 = 0.5;
const CHECK_WIDTH: f64 = 2.0;

/// A square box showing a check mark while checked. Clicking the box or the
/// label toggles it.
#[derive(Debug, Clone)]
pub struct Checkbox {
    root: NodeId,
    frame: NodeId,
    check: NodeId,
    label_nodes: SideLabel,
    checked: bool,
    size: f64,
    label: String,
    font: Font,
    state: WidgetState,
}

impl Checkbox {
    pub fn new(
        stage: &mut Stage,
        checked: bool,
        size: f64,
        label: impl Into<String>,
        font_family: impl Into<String>,
        font_size: f64,
    ) -> WidgetResult<Self> {
        let root = stage.create_container();
        let frame = stage.create_shape();
        let check = stage.create_shape();
        stage.add_child(root, frame)?;
        stage.add_child(root, check)?;
        let label_nodes = SideLabel::create(stage, root)?;
        stage.add_root(root)?;
        let mut checkbox = Self {
            root,
            frame,
            check,
            label_nodes,
            checked,
            size,
            label: label.into(),
            font: Font::new(font_family, font_size),
            state: WidgetState::Normal,
        };
        checkbox.redraw(stage)?;
        Ok(checkbox)
    }

    pub fn is_checked(&self) -> bool {
        self.checked
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn frame(&self) -> NodeId {
        self.frame
    }

    pub fn check_mark(&self) -> NodeId {
        self.check
    }

    pub fn label_node(&self) -> NodeId {
        self.label_nodes.text
    }

    pub fn set_checked(&mut self, stage: &mut Stage, checked: bool) -> WidgetResult<()> {
        self.checked = checked;
        self.redraw(stage)
    }

    pub fn set_label(&mut self, stage: &mut Stage, label: impl Into<String>) -> WidgetResult<()> {
        self.label = label.into();
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

    pub fn set_size(&mut self, stage: &mut Stage, size: f64) -> WidgetResult<()> {
        self.size = size;
        self.redraw(stage)
    }
}

impl Widget for Checkbox {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let theme = stage.theme();
        let outline = if self.state.is_highlighted() {
            theme.accent
        } else {
            theme.border_light
        };
        let (background, accent) = (theme.background, theme.accent);
        let s = self.size;

        stage.graphics_mut(self.frame)?.clear().fill_and_stroke(
            &Rect::new(0.0, 0.0, s, s),
            background,
            StrokeStyle::new(OUTLINE_WIDTH, outline),
        );

        let mut mark = BezPath::new();
        mark.move_to((s * 0.25, s * 0.5));
        mark.line_to((s * 0.45, s * 0.7));
        mark.line_to((s * 0.75, s * 0.3));
        stage
            .graphics_mut(self.check)?
            .clear()
            .stroke(&mark, StrokeStyle::new(CHECK_WIDTH, accent));
        stage.set_visible(self.check, self.checked)?;

        self.label_nodes.draw(stage, &self.label, &self.font, s)
    }

    fn on_pointer(&mut self, stage: &mut Stage, event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
        let mut reported = None;
        match event {
            UiEvent::Enter { .. } => self.state.enter(),
            UiEvent::Leave { .. } => self.state.leave(),
            UiEvent::Press { .. } => self.state.press(),
            UiEvent::Release { inside, .. } => self.state.release(*inside),
            UiEvent::Click { .. } => {
                self.checked = !self.checked;
                log::debug!("checkbox {:?} is now {}", self.label, self.checked);
                reported = Some(WidgetEvent::Toggled(self.checked));
            }
            UiEvent::Drag { .. } => return Ok(None),
        }
        self.redraw(stage)?;
        Ok(reported)
    }
}
