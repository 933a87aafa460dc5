//! Pointer and keyboard input delivered to the widget host.

use kurbo::{Point, Vec2};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Modifier keys state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Modifiers {
    pub shift: bool,
    pub ctrl: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Self = Self {
        shift: false,
        ctrl: false,
        alt: false,
        meta: false,
    };

    pub const SHIFT: Self = Self {
        shift: true,
        ..Self::NONE
    };
}

/// Pointer event in stage coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum PointerEvent {
    Down { position: Point, button: MouseButton },
    Up { position: Point, button: MouseButton },
    Move { position: Point },
}

impl PointerEvent {
    pub fn position(&self) -> Point {
        match *self {
            PointerEvent::Down { position, .. }
            | PointerEvent::Up { position, .. }
            | PointerEvent::Move { position } => position,
        }
    }
}

/// Keys the text widgets understand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    /// A printable character.
    Character(char),
    Backspace,
    Delete,
    Enter,
    Left,
    Right,
    Home,
    End,
    Escape,
}

/// A key press with the modifiers held at the time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyEvent {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn shifted(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::SHIFT,
        }
    }

    /// Shorthand for a printable character.
    pub fn char(c: char) -> Self {
        Self::new(Key::Character(c))
    }

    pub fn shift(&self) -> bool {
        self.modifiers.shift
    }
}

/// Tracks the pointer across events.
#[derive(Debug, Clone, Default)]
pub struct InputState {
    /// Current pointer position in stage coordinates.
    pub pointer_position: Point,
    /// Pointer position before the last event.
    pub previous_pointer_position: Point,
    pressed_buttons: HashSet<MouseButton>,
    /// Whether the left button is held.
    pub is_dragging: bool,
    /// Where the current drag started.
    pub drag_start: Option<Point>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process a pointer event.
    pub fn handle_pointer_event(&mut self, event: PointerEvent) {
        self.previous_pointer_position = self.pointer_position;
        self.pointer_position = event.position();
        match event {
            PointerEvent::Down { position, button } => {
                self.pressed_buttons.insert(button);
                if button == MouseButton::Left && !self.is_dragging {
                    self.is_dragging = true;
                    self.drag_start = Some(position);
                }
            }
            PointerEvent::Up { button, .. } => {
                self.pressed_buttons.remove(&button);
                if button == MouseButton::Left {
                    self.is_dragging = false;
                    self.drag_start = None;
                }
            }
            PointerEvent::Move { .. } => {}
        }
    }

    pub fn is_button_pressed(&self, button: MouseButton) -> bool {
        self.pressed_buttons.contains(&button)
    }

    /// Pointer movement caused by the last event.
    pub fn pointer_delta(&self) -> Vec2 {
        self.pointer_position - self.previous_pointer_position
    }

    /// Offset from the drag start, if dragging.
    pub fn drag_delta(&self) -> Option<Vec2> {
        self.drag_start.map(|start| self.pointer_position - start)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_tracking() {
        let mut input = InputState::new();
        input.handle_pointer_event(PointerEvent::Down {
            position: Point::new(10.0, 10.0),
            button: MouseButton::Left,
        });
        assert!(input.is_dragging);
        assert!(input.is_button_pressed(MouseButton::Left));

        input.handle_pointer_event(PointerEvent::Move {
            position: Point::new(25.0, 12.0),
        });
        assert_eq!(input.drag_delta(), Some(Vec2::new(15.0, 2.0)));
        assert_eq!(input.pointer_delta(), Vec2::new(15.0, 2.0));

        input.handle_pointer_event(PointerEvent::Up {
            position: Point::new(25.0, 12.0),
            button: MouseButton::Left,
        });
        assert!(!input.is_dragging);
        assert!(input.drag_delta().is_none());
    }

    #[test]
    fn test_right_button_does_not_drag() {
        let mut input = InputState::new();
        input.handle_pointer_event(PointerEvent::Down {
            position: Point::ZERO,
            button: MouseButton::Right,
        });
        assert!(!input.is_dragging);
        assert!(input.is_button_pressed(MouseButton::Right));
    }

    #[test]
    fn test_key_event_helpers() {
        assert!(KeyEvent::shifted(Key::Left).shift());
        assert!(!KeyEvent::char('a').shift());
        assert_eq!(KeyEvent::char('7').key, Key::Character('7'));
    }
}
