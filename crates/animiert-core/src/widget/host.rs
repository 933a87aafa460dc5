//! Routes raw pointer and key input to the widgets on a stage.

use std::time::Instant;

use super::{UiEvent, Widget, WidgetEvent};
use crate::error::WidgetResult;
use crate::input::{InputState, KeyEvent, MouseButton, PointerEvent};
use crate::scene::{NodeId, Stage};

/// Handle to a widget registered with a [`WidgetHost`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct WidgetId(usize);

/// Owns the interactive widgets of a stage and tracks hover, capture and focus.
///
/// The host hit-tests each pointer event against the stage. It synthesizes
/// enter/leave as the pointer crosses widgets, keeps the pressed widget
/// captured until release, and reports a click when the release lands on the
/// widget that was pressed.
#[derive(Default)]
pub struct WidgetHost {
    widgets: Vec<Box<dyn Widget>>,
    input: InputState,
    hovered: Option<usize>,
    captured: Option<usize>,
    focused: Option<usize>,
}

impl WidgetHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a widget. Later widgets win hit tests over earlier ones.
    pub fn add(&mut self, widget: impl Widget) -> WidgetId {
        self.widgets.push(Box::new(widget));
        WidgetId(self.widgets.len() - 1)
    }

    pub fn len(&self) -> usize {
        self.widgets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.widgets.is_empty()
    }

    /// Typed access to a registered widget.
    pub fn get<W: Widget>(&self, id: WidgetId) -> Option<&W> {
        let widget: &dyn Widget = self.widgets.get(id.0)?.as_ref();
        widget.as_any().downcast_ref()
    }

    pub fn get_mut<W: Widget>(&mut self, id: WidgetId) -> Option<&mut W> {
        let widget: &mut dyn Widget = self.widgets.get_mut(id.0)?.as_mut();
        widget.as_any_mut().downcast_mut()
    }

    pub fn hovered(&self) -> Option<WidgetId> {
        self.hovered.map(WidgetId)
    }

    pub fn captured(&self) -> Option<WidgetId> {
        self.captured.map(WidgetId)
    }

    pub fn focused(&self) -> Option<WidgetId> {
        self.focused.map(WidgetId)
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// Widget owning `node`, preferring the most recently added.
    pub fn owner_of(&self, stage: &Stage, node: NodeId) -> Option<WidgetId> {
        self.owner(stage, node).map(WidgetId)
    }

    fn owner(&self, stage: &Stage, node: NodeId) -> Option<usize> {
        self.widgets.iter().rposition(|w| w.contains(stage, node))
    }

    fn send(
        &mut self,
        stage: &mut Stage,
        index: usize,
        event: UiEvent,
        out: &mut Vec<(WidgetId, WidgetEvent)>,
    ) -> WidgetResult<()> {
        if let Some(widget) = self.widgets.get_mut(index) {
            if let Some(reported) = widget.on_pointer(stage, &event)? {
                out.push((WidgetId(index), reported));
            }
        }
        Ok(())
    }

    /// Route a pointer event and collect what the widgets reported.
    pub fn dispatch_pointer(
        &mut self,
        stage: &mut Stage,
        event: PointerEvent,
        now: Instant,
    ) -> WidgetResult<Vec<(WidgetId, WidgetEvent)>> {
        self.input.handle_pointer_event(event);
        let position = event.position();
        let target = stage.hit_test(position);
        let owner = target.and_then(|node| self.owner(stage, node));
        let mut out = Vec::new();

        match event {
            PointerEvent::Move { .. } => {
                if let Some(captured) = self.captured {
                    self.send(stage, captured, UiEvent::Drag { position, target }, &mut out)?;
                }
            }
            PointerEvent::Down {
                button: MouseButton::Left,
                ..
            } => {
                let focus = owner.filter(|&i| self.widgets[i].accepts_focus());
                self.set_focus_index(stage, focus)?;
                if let (Some(index), Some(target)) = (owner, target) {
                    self.captured = Some(index);
                    let press = UiEvent::Press {
                        position,
                        target,
                        time: now,
                    };
                    self.send(stage, index, press, &mut out)?;
                }
            }
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => {
                if let Some(captured) = self.captured.take() {
                    let inside = owner == Some(captured);
                    self.send(stage, captured, UiEvent::Release { position, inside }, &mut out)?;
                    if let (true, Some(target)) = (inside, target) {
                        self.send(stage, captured, UiEvent::Click { position, target }, &mut out)?;
                    }
                }
            }
            PointerEvent::Down { .. } | PointerEvent::Up { .. } => {}
        }

        if owner != self.hovered {
            if let Some(old) = self.hovered {
                self.send(stage, old, UiEvent::Leave { position }, &mut out)?;
            }
            if let Some(new) = owner {
                self.send(stage, new, UiEvent::Enter { position }, &mut out)?;
            }
            self.hovered = owner;
        }
        Ok(out)
    }

    /// Deliver a key to the focused widget.
    pub fn dispatch_key(&mut self, stage: &mut Stage, event: KeyEvent) -> WidgetResult<Option<(WidgetId, WidgetEvent)>> {
        let Some(index) = self.focused else {
            return Ok(None);
        };
        let reported = self.widgets[index].on_key(stage, &event)?;
        Ok(reported.map(|e| (WidgetId(index), e)))
    }

    /// Advance every widget's clock.
    pub fn tick(&mut self, stage: &mut Stage, now: Instant) -> WidgetResult<Vec<(WidgetId, WidgetEvent)>> {
        let mut out = Vec::new();
        for (index, widget) in self.widgets.iter_mut().enumerate() {
            if let Some(reported) = widget.tick(stage, now)? {
                out.push((WidgetId(index), reported));
            }
        }
        Ok(out)
    }

    /// Move keyboard focus; `None` clears it.
    pub fn set_focus(&mut self, stage: &mut Stage, id: Option<WidgetId>) -> WidgetResult<()> {
        let index = id.map(|w| w.0).filter(|&i| i < self.widgets.len());
        self.set_focus_index(stage, index)
    }

    fn set_focus_index(&mut self, stage: &mut Stage, index: Option<usize>) -> WidgetResult<()> {
        if index == self.focused {
            return Ok(());
        }
        if let Some(old) = self.focused {
            self.widgets[old].set_focused(stage, false)?;
        }
        if let Some(new) = index {
            self.widgets[new].set_focused(stage, true)?;
        }
        log::debug!("focus moved from {:?} to {:?}", self.focused, index);
        self.focused = index;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::SerializableColor;
    use crate::input::Key;
    use kurbo::{Point, Rect};

    /// Square that records what it receives.
    struct Probe {
        root: NodeId,
        seen: Vec<&'static str>,
        focusable: bool,
        focused: bool,
    }

    impl Probe {
        fn new(stage: &mut Stage, x: f64, focusable: bool) -> Self {
            let root = stage.create_shape();
            stage.add_root(root).unwrap();
            stage.set_position(root, x, 0.0).unwrap();
            let mut probe = Self {
                root,
                seen: Vec::new(),
                focusable,
                focused: false,
            };
            probe.redraw(stage).unwrap();
            probe
        }
    }

    impl Widget for Probe {
        fn root(&self) -> NodeId {
            self.root
        }

        fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
            stage
                .graphics_mut(self.root)?
                .clear()
                .fill(&Rect::new(0.0, 0.0, 10.0, 10.0), SerializableColor::black());
            Ok(())
        }

        fn on_pointer(&mut self, _stage: &mut Stage, event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
            let name = match event {
                UiEvent::Enter { .. } => "enter",
                UiEvent::Leave { .. } => "leave",
                UiEvent::Press { .. } => "press",
                UiEvent::Drag { .. } => "drag",
                UiEvent::Release { inside: true, .. } => "release-in",
                UiEvent::Release { inside: false, .. } => "release-out",
                UiEvent::Click { .. } => {
                    self.seen.push("click");
                    return Ok(Some(WidgetEvent::Clicked { active: false }));
                }
            };
            self.seen.push(name);
            Ok(None)
        }

        fn on_key(&mut self, _stage: &mut Stage, event: &KeyEvent) -> WidgetResult<Option<WidgetEvent>> {
            match event.key {
                Key::Character(c) => Ok(Some(WidgetEvent::TextChanged(c.to_string()))),
                _ => Ok(None),
            }
        }

        fn accepts_focus(&self) -> bool {
            self.focusable
        }

        fn set_focused(&mut self, _stage: &mut Stage, focused: bool) -> WidgetResult<()> {
            self.focused = focused;
            Ok(())
        }
    }

    fn down(x: f64) -> PointerEvent {
        PointerEvent::Down {
            position: Point::new(x, 5.0),
            button: MouseButton::Left,
        }
    }

    fn up(x: f64) -> PointerEvent {
        PointerEvent::Up {
            position: Point::new(x, 5.0),
            button: MouseButton::Left,
        }
    }

    fn mv(x: f64) -> PointerEvent {
        PointerEvent::Move {
            position: Point::new(x, 5.0),
        }
    }

    #[test]
    fn test_click_sequence() {
        let mut stage = Stage::default();
        let mut host = WidgetHost::new();
        let probe = Probe::new(&mut stage, 0.0, false);
        let id = host.add(probe);
        let now = Instant::now();

        host.dispatch_pointer(&mut stage, mv(5.0), now).unwrap();
        host.dispatch_pointer(&mut stage, down(5.0), now).unwrap();
        let events = host.dispatch_pointer(&mut stage, up(5.0), now).unwrap();
        assert_eq!(events, vec![(id, WidgetEvent::Clicked { active: false })]);
        assert_eq!(
            host.get::<Probe>(id).unwrap().seen,
            vec!["enter", "press", "release-in", "click"]
        );
    }

    #[test]
    fn test_drag_out_cancels_click() {
        let mut stage = Stage::default();
        let mut host = WidgetHost::new();
        let probe = Probe::new(&mut stage, 0.0, false);
        let id = host.add(probe);
        let now = Instant::now();

        host.dispatch_pointer(&mut stage, down(5.0), now).unwrap();
        host.dispatch_pointer(&mut stage, mv(50.0), now).unwrap();
        assert_eq!(host.captured(), Some(id));
        let events = host.dispatch_pointer(&mut stage, up(50.0), now).unwrap();
        assert!(events.is_empty());
        assert_eq!(host.captured(), None);
        assert_eq!(
            host.get::<Probe>(id).unwrap().seen,
            vec!["press", "enter", "drag", "leave", "release-out"]
        );
    }

    #[test]
    fn test_hover_moves_between_widgets() {
        let mut stage = Stage::default();
        let mut host = WidgetHost::new();
        let a = Probe::new(&mut stage, 0.0, false);
        let b = Probe::new(&mut stage, 20.0, false);
        let a = host.add(a);
        let b = host.add(b);
        let now = Instant::now();

        host.dispatch_pointer(&mut stage, mv(5.0), now).unwrap();
        assert_eq!(host.hovered(), Some(a));
        host.dispatch_pointer(&mut stage, mv(25.0), now).unwrap();
        assert_eq!(host.hovered(), Some(b));
        assert_eq!(host.get::<Probe>(a).unwrap().seen, vec!["enter", "leave"]);
        assert_eq!(host.get::<Probe>(b).unwrap().seen, vec!["enter"]);
    }

    #[test]
    fn test_keys_go_to_focused_widget() {
        let mut stage = Stage::default();
        let mut host = WidgetHost::new();
        let plain = Probe::new(&mut stage, 0.0, false);
        let field = Probe::new(&mut stage, 20.0, true);
        let _plain = host.add(plain);
        let field = host.add(field);
        let now = Instant::now();

        assert!(host.dispatch_key(&mut stage, KeyEvent::char('a')).unwrap().is_none());

        host.dispatch_pointer(&mut stage, down(25.0), now).unwrap();
        host.dispatch_pointer(&mut stage, up(25.0), now).unwrap();
        assert_eq!(host.focused(), Some(field));
        assert!(host.get::<Probe>(field).unwrap().focused);
        let reported = host.dispatch_key(&mut stage, KeyEvent::char('a')).unwrap();
        assert_eq!(reported, Some((field, WidgetEvent::TextChanged("a".into()))));

        // Pressing a non-focusable widget clears focus.
        host.dispatch_pointer(&mut stage, down(5.0), now).unwrap();
        assert_eq!(host.focused(), None);
        assert!(!host.get::<Probe>(field).unwrap().focused);
    }

    #[test]
    fn test_press_on_empty_space() {
        let mut stage = Stage::default();
        let mut host = WidgetHost::new();
        let id = host.add(Probe::new(&mut stage, 0.0, false));
        let now = Instant::now();
        host.dispatch_pointer(&mut stage, down(500.0), now).unwrap();
        assert_eq!(host.captured(), None);
        host.dispatch_pointer(&mut stage, up(5.0), now).unwrap();
        assert!(host.get::<Probe>(id).unwrap().seen.iter().all(|s| *s == "enter"));
    }
}
