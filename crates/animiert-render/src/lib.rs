//! Animiert Render Library
//!
//! Renderer abstraction for animiert stages.
//! The default implementation draws with Vello and lays text out with Parley.

mod renderer;

#[cfg(feature = "vello-renderer")]
mod text;
#[cfg(feature = "vello-renderer")]
mod vello_impl;

pub use renderer::{RenderContext, RenderResult, Renderer, RendererError, to_brush, to_stroke};

#[cfg(feature = "vello-renderer")]
pub use text::ParleyMeasurer;
#[cfg(feature = "vello-renderer")]
pub use vello_impl::VelloRenderer;
