//! Text nodes, fonts and text measurement.

use kurbo::{Point, Rect, Size};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::color::SerializableColor;
use crate::error::WidgetError;

/// Line height as a multiple of the font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// A font description, parsed from CSS-like shorthand such as `"bold 14px Arial"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Font {
    pub family: String,
    /// Size in pixels.
    pub size: f64,
    #[serde(default)]
    pub bold: bool,
    #[serde(default)]
    pub italic: bool,
}

impl Font {
    pub fn new(family: impl Into<String>, size: f64) -> Self {
        Self {
            family: family.into(),
            size,
            bold: false,
            italic: false,
        }
    }

    /// Parse `[italic] [bold] <size>px <family>`.
    pub fn parse(input: &str) -> Result<Self, WidgetError> {
        let invalid = || WidgetError::InvalidFont(input.to_string());
        let mut bold = false;
        let mut italic = false;
        let mut size = None;
        let mut family = Vec::new();

        for token in input.split_whitespace() {
            if size.is_some() {
                family.push(token);
                continue;
            }
            match token.to_ascii_lowercase().as_str() {
                "bold" => bold = true,
                "italic" => italic = true,
                "normal" => {}
                t => {
                    let px = t.strip_suffix("px").ok_or_else(invalid)?;
                    let value: f64 = px.parse().map_err(|_| invalid())?;
                    if value <= 0.0 {
                        return Err(invalid());
                    }
                    size = Some(value);
                }
            }
        }

        let size = size.ok_or_else(invalid)?;
        let family = family.join(" ");
        let family = family.trim_matches(|c| c == '"' || c == '\'');
        if family.is_empty() {
            return Err(invalid());
        }
        Ok(Self {
            family: family.to_string(),
            size,
            bold,
            italic,
        })
    }

    /// Same font at a different pixel size.
    pub fn with_size(&self, size: f64) -> Self {
        Self {
            size,
            ..self.clone()
        }
    }

    pub fn line_height(&self) -> f64 {
        self.size * LINE_HEIGHT_FACTOR
    }
}

impl fmt::Display for Font {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.italic {
            f.write_str("italic ")?;
        }
        if self.bold {
            f.write_str("bold ")?;
        }
        write!(f, "{}px {}", self.size, self.family)
    }
}

impl Default for Font {
    fn default() -> Self {
        Self::new("Arial", 12.0)
    }
}

/// Horizontal anchor of a text node relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextAlign {
    #[default]
    Left,
    Center,
    Right,
}

/// Vertical anchor of a text node relative to its position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TextBaseline {
    #[default]
    Top,
    Middle,
    Alphabetic,
}

/// A single run of text drawn by the stage.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TextNode {
    pub content: String,
    pub font: Font,
    pub color: SerializableColor,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

impl TextNode {
    pub fn new(content: impl Into<String>, font: Font, color: SerializableColor) -> Self {
        Self {
            content: content.into(),
            font,
            color,
            align: TextAlign::Left,
            baseline: TextBaseline::Top,
        }
    }

    pub fn with_align(mut self, align: TextAlign) -> Self {
        self.align = align;
        self
    }

    pub fn with_baseline(mut self, baseline: TextBaseline) -> Self {
        self.baseline = baseline;
        self
    }

    /// Top-left corner of the text box for a measured size.
    pub fn origin(&self, size: Size) -> Point {
        let x = match self.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -size.width / 2.0,
            TextAlign::Right => -size.width,
        };
        let y = match self.baseline {
            TextBaseline::Top => 0.0,
            TextBaseline::Middle => -size.height / 2.0,
            TextBaseline::Alphabetic => -size.height * 0.8,
        };
        Point::new(x, y)
    }

    /// Local box of the text for a measured size.
    pub fn local_box(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin(size), size)
    }
}

/// Measures text extents for layout and hit testing.
pub trait TextMeasurer {
    /// Width of the text and height of one line.
    fn measure(&self, text: &str, font: &Font) -> Size;
}

/// Font-independent measurer based on per-character width classes.
///
/// Used when no real font backend is available (tests, headless layout).
#[derive(Debug, Clone, Copy, Default)]
pub struct ApproxMeasurer;

impl ApproxMeasurer {
    fn char_width(c: char) -> f64 {
        match c {
            'i' | 'j' | 'l' | '!' | '|' | '\'' | '.' | ',' | ':' | ';' => 0.28,
            ' ' | 'f' | 't' | 'r' | 'I' | '(' | ')' | '[' | ']' | '-' => 0.34,
            '0'..='9' => 0.56,
            'm' | 'w' | 'M' | 'W' => 0.83,
            c if c.is_uppercase() => 0.67,
            _ => 0.55,
        }
    }
}

impl TextMeasurer for ApproxMeasurer {
    fn measure(&self, text: &str, font: &Font) -> Size {
        let weight = if font.bold { 1.05 } else { 1.0 };
        let width: f64 = text.chars().map(Self::char_width).sum::<f64>() * font.size * weight;
        Size::new(width, font.line_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_font() {
        let f = Font::parse("bold 14px Arial").unwrap();
        assert_eq!(f.family, "Arial");
        assert!((f.size - 14.0).abs() < f64::EPSILON);
        assert!(f.bold);
        assert!(!f.italic);

        let f = Font::parse("12px 'Times New Roman'").unwrap();
        assert_eq!(f.family, "Times New Roman");
    }

    #[test]
    fn test_parse_font_errors() {
        assert!(Font::parse("Arial").is_err());
        assert!(Font::parse("12px").is_err());
        assert!(Font::parse("-3px Arial").is_err());
        assert!(Font::parse("big Arial").is_err());
    }

    #[test]
    fn test_font_display_round_trips() {
        let f = Font::parse("italic bold 20px Helvetica Neue").unwrap();
        assert_eq!(f.to_string(), "italic bold 20px Helvetica Neue");
        assert_eq!(Font::parse(&f.to_string()).unwrap(), f);
    }

    #[test]
    fn test_approx_measure_monotonic() {
        let m = ApproxMeasurer;
        let font = Font::new("Arial", 20.0);
        let a = m.measure("12", &font);
        let b = m.measure("123", &font);
        assert!(b.width > a.width);
        assert!((a.height - 24.0).abs() < 1e-9);
        assert_eq!(m.measure("", &font).width, 0.0);
    }

    #[test]
    fn test_text_origin_alignment() {
        let node = TextNode::new("x", Font::default(), SerializableColor::black())
            .with_align(TextAlign::Center)
            .with_baseline(TextBaseline::Middle);
        let origin = node.origin(Size::new(40.0, 10.0));
        assert!((origin.x + 20.0).abs() < f64::EPSILON);
        assert!((origin.y + 5.0).abs() < f64::EPSILON);
    }
}
