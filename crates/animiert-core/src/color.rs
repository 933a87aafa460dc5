//! Color representation and CSS-style color parsing.

use peniko::Color;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::WidgetError;

/// Serializable color representation (RGBA8).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct SerializableColor {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl SerializableColor {
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    pub const fn black() -> Self {
        Self::rgb(0, 0, 0)
    }

    pub const fn white() -> Self {
        Self::rgb(255, 255, 255)
    }

    pub const fn transparent() -> Self {
        Self::new(0, 0, 0, 0)
    }

    /// Same color with a float alpha in `[0, 1]`.
    pub fn with_alpha(self, alpha: f64) -> Self {
        Self {
            a: (alpha.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Parse a CSS-like color string.
    ///
    /// Accepts `#rgb`, `#rgba`, `#rrggbb`, `#rrggbbaa`, `rgb(r, g, b)`,
    /// `rgba(r, g, b, a)` with `a` in `[0, 1]`, `transparent` and a handful of
    /// named colors.
    pub fn parse(input: &str) -> Result<Self, WidgetError> {
        let s = input.trim();
        let invalid = || WidgetError::InvalidColor(input.to_string());

        if let Some(hex) = s.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(invalid);
        }

        let lower = s.to_ascii_lowercase();
        if let Some(args) = lower
            .strip_prefix("rgba(")
            .or_else(|| lower.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        {
            return parse_rgb_args(args).ok_or_else(invalid);
        }

        named(&lower).ok_or_else(invalid)
    }

    /// CSS hex form (`#rrggbb` or `#rrggbbaa` when translucent).
    pub fn to_hex(&self) -> String {
        if self.a == 255 {
            format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
        } else {
            format!("#{:02X}{:02X}{:02X}{:02X}", self.r, self.g, self.b, self.a)
        }
    }
}

fn parse_hex(hex: &str) -> Option<SerializableColor> {
    if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    let nibble = |i: usize| u8::from_str_radix(&hex[i..i + 1], 16).ok().map(|v| v * 17);
    let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).ok();
    match hex.len() {
        3 => Some(SerializableColor::rgb(nibble(0)?, nibble(1)?, nibble(2)?)),
        4 => Some(SerializableColor::new(nibble(0)?, nibble(1)?, nibble(2)?, nibble(3)?)),
        6 => Some(SerializableColor::rgb(byte(0)?, byte(2)?, byte(4)?)),
        8 => Some(SerializableColor::new(byte(0)?, byte(2)?, byte(4)?, byte(6)?)),
        _ => None,
    }
}

fn parse_rgb_args(args: &str) -> Option<SerializableColor> {
    let parts: Vec<&str> = args.split(',').map(str::trim).collect();
    let channel = |s: &str| s.parse::<f64>().ok().map(|v| v.clamp(0.0, 255.0).round() as u8);
    match parts.as_slice() {
        [r, g, b] => Some(SerializableColor::rgb(channel(r)?, channel(g)?, channel(b)?)),
        [r, g, b, a] => {
            let alpha = a.parse::<f64>().ok()?;
            Some(SerializableColor::rgb(channel(r)?, channel(g)?, channel(b)?).with_alpha(alpha))
        }
        _ => None,
    }
}

fn named(name: &str) -> Option<SerializableColor> {
    let color = match name {
        "transparent" => SerializableColor::transparent(),
        "black" => SerializableColor::black(),
        "white" => SerializableColor::white(),
        "red" => SerializableColor::rgb(255, 0, 0),
        "green" => SerializableColor::rgb(0, 128, 0),
        "blue" => SerializableColor::rgb(0, 0, 255),
        "gray" | "grey" => SerializableColor::rgb(128, 128, 128),
        "darkgray" | "darkgrey" => SerializableColor::rgb(169, 169, 169),
        "lightgray" | "lightgrey" => SerializableColor::rgb(211, 211, 211),
        "forestgreen" => SerializableColor::rgb(34, 139, 34),
        "orange" => SerializableColor::rgb(255, 165, 0),
        "yellow" => SerializableColor::rgb(255, 255, 0),
        _ => return None,
    };
    Some(color)
}

impl FromStr for SerializableColor {
    type Err = WidgetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for SerializableColor {
    type Error = WidgetError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<SerializableColor> for String {
    fn from(color: SerializableColor) -> Self {
        color.to_hex()
    }
}

impl fmt::Display for SerializableColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl From<Color> for SerializableColor {
    fn from(color: Color) -> Self {
        let rgba = color.to_rgba8();
        Self {
            r: rgba.r,
            g: rgba.g,
            b: rgba.b,
            a: rgba.a,
        }
    }
}

impl From<SerializableColor> for Color {
    fn from(color: SerializableColor) -> Self {
        Color::from_rgba8(color.r, color.g, color.b, color.a)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex_forms() {
        assert_eq!(SerializableColor::parse("#228B22").unwrap(), SerializableColor::rgb(34, 139, 34));
        assert_eq!(SerializableColor::parse("#000").unwrap(), SerializableColor::black());
        assert_eq!(
            SerializableColor::parse("#ffffff80").unwrap(),
            SerializableColor::new(255, 255, 255, 128)
        );
    }

    #[test]
    fn test_parse_rgba() {
        let c = SerializableColor::parse("rgba(250, 250, 250, 0.5)").unwrap();
        assert_eq!((c.r, c.g, c.b, c.a), (250, 250, 250, 128));
        let c = SerializableColor::parse("rgb(255,0,0)").unwrap();
        assert_eq!(c, SerializableColor::rgb(255, 0, 0));
    }

    #[test]
    fn test_parse_named() {
        assert_eq!(SerializableColor::parse("Gray").unwrap(), SerializableColor::rgb(128, 128, 128));
        assert_eq!(SerializableColor::parse("transparent").unwrap().a, 0);
    }

    #[test]
    fn test_rejects_malformed() {
        // Five hex digits is not a valid CSS color.
        assert!(matches!(
            SerializableColor::parse("#CCCCC"),
            Err(WidgetError::InvalidColor(_))
        ));
        assert!(SerializableColor::parse("rgb(1,2)").is_err());
        assert!(SerializableColor::parse("chartreuse-ish").is_err());
    }

    #[test]
    fn test_hex_display() {
        assert_eq!(SerializableColor::rgb(34, 139, 34).to_string(), "#228B22");
        assert_eq!(SerializableColor::new(0, 0, 0, 0).to_hex(), "#00000000");
    }

    #[test]
    fn test_serde_as_string() {
        let json = serde_json::to_string(&SerializableColor::rgb(255, 0, 0)).unwrap();
        assert_eq!(json, "\"#FF0000\"");
        let back: SerializableColor = serde_json::from_str("\"#f00\"").unwrap();
        assert_eq!(back, SerializableColor::rgb(255, 0, 0));
    }
}
