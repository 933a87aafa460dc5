//! Radio buttons and the registry that groups them.

use kurbo::Circle;
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use super::SideLabel;
use crate::error::WidgetResult;
use crate::scene::{Font, NodeId, Stage, StrokeStyle};
use crate::widget::{UiEvent, Widget, WidgetEvent, WidgetState};

/// Default circle diameter.
pub const DEFAULT_RADIO_SIZE: f64 = 15.0;
const DEFAULT_FONT_SIZE: f64 = 12.0;
const OUTLINE_WIDTH: f64 = 0.5;

#[derive(Debug, Default)]
struct GroupState {
    /// `(root, dot)` of every member.
    members: Vec<(NodeId, NodeId)>,
    checked: Option<NodeId>,
}

/// Shared membership of one named group.
type Group = Rc<RefCell<GroupState>>;

/// Named radio groups. At most one button per group is checked.
#[derive(Debug, Default)]
pub struct RadioGroups {
    groups: HashMap<String, Group>,
}

impl RadioGroups {
    pub fn new() -> Self {
        Self::default()
    }

    fn join(&mut self, name: &str) -> Group {
        self.groups.entry(name.to_string()).or_default().clone()
    }

    /// Root node of the checked button in `name`, if any.
    pub fn checked(&self, name: &str) -> Option<NodeId> {
        self.groups.get(name).and_then(|g| g.borrow().checked)
    }

    /// Number of buttons registered under `name`.
    pub fn member_count(&self, name: &str) -> usize {
        self.groups.get(name).map_or(0, |g| g.borrow().members.len())
    }
}

/// A round button showing a dot while it is the checked member of its group.
///
/// Clicking an unchecked button checks it and clears every other member of
/// the group. Clicking a checked button does nothing.
#[derive(Debug, Clone)]
pub struct RadioButton {
    root: NodeId,
    circle: NodeId,
    dot: NodeId,
    label_nodes: SideLabel,
    group_name: String,
    group: Group,
    size: f64,
    label: String,
    font: Font,
    state: WidgetState,
}

impl RadioButton {
    /// A 15px button with a 12px Arial label.
    pub fn new(
        stage: &mut Stage,
        groups: &mut RadioGroups,
        group: &str,
        label: impl Into<String>,
        checked: bool,
    ) -> WidgetResult<Self> {
        Self::styled(stage, groups, group, label, checked, DEFAULT_RADIO_SIZE, "Arial", DEFAULT_FONT_SIZE)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn styled(
        stage: &mut Stage,
        groups: &mut RadioGroups,
        group: &str,
        label: impl Into<String>,
        checked: bool,
        size: f64,
        font_family: impl Into<String>,
        font_size: f64,
    ) -> WidgetResult<Self> {
        let root = stage.create_container();
        let circle = stage.create_shape();
        let dot = stage.create_shape();
        stage.add_child(root, circle)?;
        stage.add_child(root, dot)?;
        let label_nodes = SideLabel::create(stage, root)?;
        stage.add_root(root)?;

        let shared = groups.join(group);
        shared.borrow_mut().members.push((root, dot));
        let mut radio = Self {
            root,
            circle,
            dot,
            label_nodes,
            group_name: group.to_string(),
            group: shared,
            size,
            label: label.into(),
            font: Font::new(font_family, font_size),
            state: WidgetState::Normal,
        };
        radio.redraw(stage)?;
        if checked {
            radio.check(stage)?;
        }
        Ok(radio)
    }

    pub fn is_checked(&self) -> bool {
        self.group.borrow().checked == Some(self.root)
    }

    pub fn group_name(&self) -> &str {
        &self.group_name
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn circle(&self) -> NodeId {
        self.circle
    }

    pub fn dot(&self) -> NodeId {
        self.dot
    }

    pub fn label_node(&self) -> NodeId {
        self.label_nodes.text
    }

    /// Check or clear this button. Checking clears the rest of the group.
    pub fn set_checked(&mut self, stage: &mut Stage, checked: bool) -> WidgetResult<()> {
        if checked {
            self.check(stage)?;
        } else if self.is_checked() {
            self.group.borrow_mut().checked = None;
        }
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

    /// Make this the checked member and update every member's dot.
    fn check(&self, stage: &mut Stage) -> WidgetResult<bool> {
        if self.is_checked() {
            return Ok(false);
        }
        let mut group = self.group.borrow_mut();
        group.checked = Some(self.root);
        for &(root, dot) in &group.members {
            stage.set_visible(dot, root == self.root)?;
        }
        Ok(true)
    }
}

impl Widget for RadioButton {
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
        let r = self.size / 2.0;

        stage.graphics_mut(self.circle)?.clear().fill_and_stroke(
            &Circle::new((r, r), r),
            background,
            StrokeStyle::new(OUTLINE_WIDTH, outline),
        );
        stage
            .graphics_mut(self.dot)?
            .clear()
            .fill(&Circle::new((r, r), self.size / 6.0), accent);
        stage.set_visible(self.dot, self.is_checked())?;

        self.label_nodes.draw(stage, &self.label, &self.font, self.size)
    }

    fn on_pointer(&mut self, stage: &mut Stage, event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
        let mut reported = None;
        match event {
            UiEvent::Enter { .. } => self.state.enter(),
            UiEvent::Leave { .. } => self.state.leave(),
            UiEvent::Press { .. } => self.state.press(),
            UiEvent::Release { inside, .. } => self.state.release(*inside),
            UiEvent::Click { .. } => {
                if self.check(stage)? {
                    log::debug!("radio {:?} checked in group {:?}", self.label, self.group_name);
                    reported = Some(WidgetEvent::Toggled(true));
                }
            }
            UiEvent::Drag { .. } => return Ok(None),
        }
        self.redraw(stage)?;
        Ok(reported)
    }
}
