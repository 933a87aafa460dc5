//! Widget theme: colors, paddings and timing knobs shared by all controls.
//!
//! A theme can be loaded from JSON; any field left out keeps its default.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::color::SerializableColor;
use crate::error::{WidgetError, WidgetResult};

/// A pair of gradient stops (top/left first).
pub type GradientPair = [SerializableColor; 2];

/// Auto-repeat timing for press-and-hold buttons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RepeatTiming {
    /// Delay before the first repeat, in milliseconds.
    pub initial_delay_ms: u64,
    /// Interval between repeats, in milliseconds.
    pub repeat_interval_ms: u64,
}

impl RepeatTiming {
    pub fn initial_delay(&self) -> Duration {
        Duration::from_millis(self.initial_delay_ms)
    }

    /// Never zero, so a hold cannot spin.
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms.max(1))
    }
}

impl Default for RepeatTiming {
    fn default() -> Self {
        Self {
            initial_delay_ms: 500,
            repeat_interval_ms: 100,
        }
    }
}

/// Look of every control.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Theme {
    /// Hover and active highlight.
    pub accent: SerializableColor,
    /// Regular control outline.
    pub border: SerializableColor,
    /// Light outline for boxes and stepper buttons.
    pub border_light: SerializableColor,
    /// Text input outline.
    pub input_border: SerializableColor,
    /// Label and text color.
    pub text: SerializableColor,
    /// Box and label backgrounds.
    pub background: SerializableColor,
    /// Slider track fill.
    pub track: SerializableColor,
    /// Button slider thumb outline at rest.
    pub thumb: SerializableColor,
    /// Center line drawn across a slider thumb.
    pub thumb_marker: SerializableColor,
    /// Text selection background.
    pub selection: SerializableColor,
    /// Text drawn on top of a selection.
    pub selection_text: SerializableColor,
    /// Caret color.
    pub caret: SerializableColor,
    /// Stepper arrow color.
    pub arrow: SerializableColor,
    /// Curve control guides.
    pub guide: SerializableColor,
    pub button_fill: GradientPair,
    pub button_active_fill: GradientPair,
    /// Translucent gloss used by slider thumbs and stepper buttons.
    pub gloss_fill: GradientPair,
    pub progress_fill: GradientPair,
    pub progress_hover_fill: GradientPair,
    /// Inner padding of text fields.
    pub text_padding: f64,
    /// Gap between a check box or radio circle and its label.
    pub label_gap: f64,
    /// Width of numeric stepper buttons.
    pub stepper_button_width: f64,
    pub repeat: RepeatTiming,
}

impl Default for Theme {
    fn default() -> Self {
        let hex = |r, g, b| SerializableColor::rgb(r, g, b);
        Self {
            accent: hex(0x22, 0x8B, 0x22),
            border: hex(0xAA, 0xAA, 0xAA),
            border_light: hex(0xCC, 0xCC, 0xCC),
            input_border: hex(0xA9, 0xA9, 0xA9),
            text: SerializableColor::black(),
            background: SerializableColor::white(),
            track: hex(0x55, 0x55, 0x55),
            thumb: hex(0x99, 0x99, 0x99),
            thumb_marker: SerializableColor::rgb(20, 20, 20).with_alpha(0.9),
            selection: hex(0x00, 0x00, 0xFF),
            selection_text: SerializableColor::white(),
            caret: SerializableColor::black(),
            arrow: hex(0x44, 0x44, 0x44),
            guide: hex(0x80, 0x80, 0x80),
            button_fill: [hex(0xFA, 0xFA, 0xFA), hex(0xEF, 0xEF, 0xEF)],
            button_active_fill: [hex(0xFF, 0xFF, 0xFF), hex(0xEF, 0xEF, 0xEF)],
            gloss_fill: [
                SerializableColor::rgb(250, 250, 250).with_alpha(0.5),
                SerializableColor::rgb(204, 204, 204).with_alpha(0.3),
            ],
            progress_fill: [hex(0xEF, 0xEF, 0xEF), hex(0xDD, 0xDD, 0xDD)],
            progress_hover_fill: [hex(0xEF, 0xEF, 0xEF), hex(0xEE, 0xEE, 0xEE)],
            text_padding: 9.0,
            label_gap: 5.0,
            stepper_button_width: 24.0,
            repeat: RepeatTiming::default(),
        }
    }
}

impl Theme {
    /// Parse a theme from JSON. Missing fields fall back to the defaults.
    pub fn from_json(json: &str) -> WidgetResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> WidgetResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load a theme file.
    pub fn load(path: impl AsRef<Path>) -> WidgetResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| WidgetError::ThemeIo {
            path: path.to_path_buf(),
            source,
        })?;
        let theme = Self::from_json(&json)?;
        log::debug!("loaded theme from {}", path.display());
        Ok(theme)
    }
}
