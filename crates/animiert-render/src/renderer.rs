//! Renderer trait abstraction.

use animiert_core::scene::{Paint, StrokeStyle};
use animiert_core::Stage;
use kurbo::{Cap, Join, Size, Stroke};
use peniko::{Brush, Color, ColorStop, Gradient};
use thiserror::Error;

/// Renderer errors.
#[derive(Debug, Error)]
pub enum RendererError {
    #[error("Font data contains no usable faces")]
    NoFontFaces,
}

/// Result type for renderer operations.
pub type RenderResult<T> = Result<T, RendererError>;

/// Context for a single render frame.
pub struct RenderContext<'a> {
    /// The stage to render.
    pub stage: &'a Stage,
    /// Viewport size in physical pixels.
    pub viewport_size: Size,
    /// Device pixel ratio (for HiDPI).
    pub scale_factor: f64,
    /// Background color.
    pub background_color: Color,
}

impl<'a> RenderContext<'a> {
    /// Create a new render context.
    pub fn new(stage: &'a Stage, viewport_size: Size) -> Self {
        Self {
            stage,
            viewport_size,
            scale_factor: 1.0,
            background_color: Color::WHITE,
        }
    }

    /// Set the scale factor for HiDPI.
    pub fn with_scale_factor(mut self, scale_factor: f64) -> Self {
        self.scale_factor = scale_factor;
        self
    }

    /// Set the background color.
    pub fn with_background(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Trait for rendering backends.
pub trait Renderer: Send + Sync {
    /// Build the scene/command buffer for a frame.
    ///
    /// Called once per frame; walks the stage back to front.
    fn build_scene(&mut self, ctx: &RenderContext);

    /// Get the background color (for clearing).
    fn background_color(&self, ctx: &RenderContext) -> Color {
        ctx.background_color
    }
}

/// Brush for a fill paint. Gradient coordinates stay in the path's space.
pub fn to_brush(paint: &Paint) -> Brush {
    match paint {
        Paint::Solid(color) => Brush::Solid((*color).into()),
        Paint::LinearGradient { start, end, stops } => {
            let stops: Vec<ColorStop> = stops
                .iter()
                .map(|&(offset, color)| ColorStop::from((offset as f32, Color::from(color))))
                .collect();
            Brush::Gradient(Gradient::new_linear(*start, *end).with_stops(stops.as_slice()))
        }
    }
}

/// Kurbo stroke for an outline style, including dashes and round caps.
pub fn to_stroke(style: &StrokeStyle) -> Stroke {
    let (cap, join) = if style.round {
        (Cap::Round, Join::Round)
    } else {
        (Cap::Butt, Join::Miter)
    };
    let mut stroke = Stroke::new(style.width).with_caps(cap).with_join(join);
    if let Some(dash) = style.dash.as_ref().filter(|d| !d.is_empty()) {
        stroke = stroke.with_dashes(0.0, dash.iter().copied());
    }
    stroke
}
