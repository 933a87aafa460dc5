//! Pointer interaction state of a control.

/// The UI state of a control.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum WidgetState {
    /// No interaction.
    #[default]
    Normal,
    /// Pointer is over the control.
    Hovered,
    /// Pointer went down on the control and has not been released yet.
    Pressed,
}

impl WidgetState {
    /// Whether the control should draw its highlight.
    pub fn is_highlighted(&self) -> bool {
        matches!(self, Self::Hovered | Self::Pressed)
    }

    pub fn is_pressed(&self) -> bool {
        matches!(self, Self::Pressed)
    }

    /// Pointer entered. A pressed control stays pressed.
    pub fn enter(&mut self) {
        if *self == Self::Normal {
            *self = Self::Hovered;
        }
    }

    /// Pointer left. A pressed control stays pressed until release.
    pub fn leave(&mut self) {
        if *self == Self::Hovered {
            *self = Self::Normal;
        }
    }

    pub fn press(&mut self) {
        *self = Self::Pressed;
    }

    /// Pointer released, `inside` telling whether it is still over the control.
    pub fn release(&mut self, inside: bool) {
        *self = if inside { Self::Hovered } else { Self::Normal };
    }
}
