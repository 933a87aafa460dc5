//! Text layout with Parley, shared by the renderer and the measurer.

use animiert_core::scene::{ApproxMeasurer, Font, TextMeasurer};
use kurbo::Size;
use parley::{Alignment, AlignmentOptions, FontContext, FontStack, FontStyle, FontWeight, Layout, LayoutContext, StyleProperty};
use peniko::Brush;
use std::cell::RefCell;
use std::sync::Arc;

use crate::renderer::{RenderResult, RendererError};

/// Lay out a single run of text in one font.
pub(crate) fn build_layout(
    font_cx: &mut FontContext,
    layout_cx: &mut LayoutContext<Brush>,
    text: &str,
    font: &Font,
    brush: Brush,
) -> Layout<Brush> {
    let stack = format!("\"{}\", sans-serif", font.family);
    let mut builder = layout_cx.ranged_builder(font_cx, text, 1.0, false);
    builder.push_default(StyleProperty::FontSize(font.size as f32));
    builder.push_default(StyleProperty::Brush(brush));
    builder.push_default(StyleProperty::FontStack(FontStack::Source(stack.into())));
    if font.bold {
        builder.push_default(StyleProperty::FontWeight(FontWeight::BOLD));
    }
    if font.italic {
        builder.push_default(StyleProperty::FontStyle(FontStyle::Italic));
    }
    let mut layout = builder.build(text);
    layout.break_all_lines(None);
    layout.align(None, Alignment::Start, AlignmentOptions::default());
    layout
}

/// Register every face in a font file. Returns the number of families added.
pub(crate) fn register_fonts(font_cx: &mut FontContext, data: Vec<u8>) -> RenderResult<usize> {
    let families = font_cx
        .collection
        .register_fonts(vello::peniko::Blob::new(Arc::new(data)), None);
    if families.is_empty() {
        return Err(RendererError::NoFontFaces);
    }
    log::debug!("registered {} font families", families.len());
    Ok(families.len())
}

/// [`TextMeasurer`] backed by Parley, so widget layout matches rendered text.
///
/// Falls back to [`ApproxMeasurer`] when no registered font can shape the text.
pub struct ParleyMeasurer {
    font_cx: RefCell<FontContext>,
    layout_cx: RefCell<LayoutContext<Brush>>,
}

impl Default for ParleyMeasurer {
    fn default() -> Self {
        Self::new()
    }
}

impl ParleyMeasurer {
    pub fn new() -> Self {
        Self {
            font_cx: RefCell::new(FontContext::new()),
            layout_cx: RefCell::new(LayoutContext::new()),
        }
    }

    /// Add the faces of a TTF/OTF file.
    pub fn register_fonts(&mut self, data: Vec<u8>) -> RenderResult<usize> {
        register_fonts(self.font_cx.get_mut(), data)
    }
}

impl TextMeasurer for ParleyMeasurer {
    fn measure(&self, text: &str, font: &Font) -> Size {
        if text.is_empty() {
            return Size::new(0.0, font.line_height());
        }
        let layout = build_layout(
            &mut self.font_cx.borrow_mut(),
            &mut self.layout_cx.borrow_mut(),
            text,
            font,
            Brush::default(),
        );
        let width = layout.width() as f64;
        if width <= 0.0 {
            return ApproxMeasurer.measure(text, font);
        }
        Size::new(width, font.line_height())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_text_has_line_height() {
        let measurer = ParleyMeasurer::new();
        let font = Font::new("Arial", 10.0);
        let size = measurer.measure("", &font);
        assert_eq!(size.width, 0.0);
        assert!((size.height - font.line_height()).abs() < f64::EPSILON);
    }

    #[test]
    fn test_falls_back_without_fonts() {
        let measurer = ParleyMeasurer::new();
        let font = Font::new("Arial", 10.0);
        let size = measurer.measure("42", &font);
        let approx = ApproxMeasurer.measure("42", &font);
        assert!(size.width > 0.0);
        assert!((size.height - approx.height).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_garbage_font_data() {
        let mut measurer = ParleyMeasurer::new();
        assert!(matches!(
            measurer.register_fonts(vec![0, 1, 2, 3]),
            Err(RendererError::NoFontFaces)
        ));
    }
}
