//! Widget trait, interaction events and the host that routes them.

mod host;
mod state;

pub use host::{WidgetHost, WidgetId};
pub use state::WidgetState;

use kurbo::Point;
use std::any::Any;
use std::time::Instant;

use crate::error::WidgetResult;
use crate::input::KeyEvent;
use crate::scene::{NodeId, Stage};

/// Pointer interaction routed to a single widget by the [`WidgetHost`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    /// Pointer moved onto the widget.
    Enter { position: Point },
    /// Pointer moved off the widget.
    Leave { position: Point },
    /// Button went down on `target`, one of the widget's nodes.
    Press {
        position: Point,
        target: NodeId,
        time: Instant,
    },
    /// Pointer moved while the widget holds the capture. `target` is the node
    /// under the pointer, which may belong to another widget.
    Drag {
        position: Point,
        target: Option<NodeId>,
    },
    /// Button released after a press on this widget.
    Release { position: Point, inside: bool },
    /// Press and release both landed on the widget.
    Click { position: Point, target: NodeId },
}

/// What a widget reports back after handling input.
#[derive(Debug, Clone, PartialEq)]
pub enum WidgetEvent {
    Clicked { active: bool },
    Toggled(bool),
    ValueChanged(f64),
    TextChanged(String),
}

/// Upcast helper so the host can hand out concrete widget types.
pub trait AsAny: Any {
    fn as_any(&self) -> &dyn Any;
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> AsAny for T {
    fn as_any(&self) -> &dyn Any {
        self
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// A self-drawing element living on a [`Stage`].
///
/// Widgets own their nodes exclusively. Every state change goes through
/// [`Widget::redraw`], which rebuilds the nodes from the current state.
pub trait Widget: AsAny {
    /// Top-level node of the widget.
    fn root(&self) -> NodeId;

    /// Rebuild the widget's nodes from its state.
    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()>;

    /// Whether `node` is part of this widget.
    fn contains(&self, stage: &Stage, node: NodeId) -> bool {
        stage.is_ancestor(self.root(), node)
    }

    fn on_pointer(&mut self, _stage: &mut Stage, _event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
        Ok(None)
    }

    fn on_key(&mut self, _stage: &mut Stage, _event: &KeyEvent) -> WidgetResult<Option<WidgetEvent>> {
        Ok(None)
    }

    /// Advance time-driven behaviour such as press-and-hold repeat.
    fn tick(&mut self, _stage: &mut Stage, _now: Instant) -> WidgetResult<Option<WidgetEvent>> {
        Ok(None)
    }

    /// Whether a press on this widget should give it keyboard focus.
    fn accepts_focus(&self) -> bool {
        false
    }

    /// Keyboard focus moved onto or away from this widget.
    fn set_focused(&mut self, _stage: &mut Stage, _focused: bool) -> WidgetResult<()> {
        Ok(())
    }
}
