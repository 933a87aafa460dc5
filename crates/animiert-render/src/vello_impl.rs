//! Vello-based renderer implementation.

use animiert_core::scene::{ApproxMeasurer, Graphics, NodeId, NodeKind, TextMeasurer, TextNode};
use animiert_core::Stage;
use kurbo::{Affine, Size};
use parley::layout::PositionedLayoutItem;
use parley::{FontContext, LayoutContext};
use peniko::{BlendMode, Brush, Color, Fill};
use vello::Scene;

use crate::renderer::{RenderContext, RenderResult, Renderer, to_brush, to_stroke};
use crate::text::{build_layout, register_fonts};

/// Vello-based renderer for GPU-accelerated 2D graphics.
pub struct VelloRenderer {
    /// The Vello scene being built.
    scene: Scene,
    /// Font context for text rendering (cached to avoid re-registering fonts).
    font_cx: FontContext,
    /// Layout context for text rendering.
    layout_cx: LayoutContext<Brush>,
}

impl Default for VelloRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl VelloRenderer {
    /// Create a new Vello renderer with no fonts registered.
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            font_cx: FontContext::new(),
            layout_cx: LayoutContext::new(),
        }
    }

    /// Add the faces of a TTF/OTF file for text rendering.
    pub fn register_fonts(&mut self, data: Vec<u8>) -> RenderResult<usize> {
        register_fonts(&mut self.font_cx, data)
    }

    /// Get the built scene for rendering.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Take ownership of the scene (resets internal scene).
    pub fn take_scene(&mut self) -> Scene {
        std::mem::take(&mut self.scene)
    }

    /// Render a node and its children. `parent` maps the parent's space to the viewport.
    fn render_node(&mut self, stage: &Stage, id: NodeId, parent: Affine) {
        let Some(node) = stage.node(id) else {
            return;
        };
        if !node.visible {
            return;
        }
        // Masks are expressed in the parent's space.
        if let Some(mask) = node.mask {
            self.scene.push_layer(BlendMode::default(), 1.0, parent, &mask);
        }
        let transform = parent * node.transform.to_affine();
        match &node.kind {
            NodeKind::Container => {}
            NodeKind::Shape(graphics) => self.render_graphics(graphics, transform),
            NodeKind::Text(text) => self.render_text(text, transform),
        }
        for &child in &node.children {
            self.render_node(stage, child, transform);
        }
        if node.mask.is_some() {
            self.scene.pop_layer();
        }
    }

    /// Fill then stroke every draw op, in order.
    fn render_graphics(&mut self, graphics: &Graphics, transform: Affine) {
        for op in graphics.ops() {
            if let Some(paint) = &op.fill {
                self.scene.fill(Fill::NonZero, transform, &to_brush(paint), None, &op.path);
            }
            if let Some(style) = &op.stroke {
                let color: Color = style.color.into();
                self.scene.stroke(&to_stroke(style), transform, color, None, &op.path);
            }
        }
    }

    /// Render a text node using Parley for layout.
    fn render_text(&mut self, text: &TextNode, transform: Affine) {
        if text.content.is_empty() {
            return;
        }
        let brush = Brush::Solid(text.color.into());
        let layout = build_layout(
            &mut self.font_cx,
            &mut self.layout_cx,
            &text.content,
            &text.font,
            brush.clone(),
        );
        let size = Size::new(layout.width() as f64, layout.height() as f64);
        let text_transform = transform * Affine::translate(text.origin(size).to_vec2());

        let mut glyph_count = 0;
        for line in layout.lines() {
            for item in line.items() {
                let PositionedLayoutItem::GlyphRun(glyph_run) = item else {
                    continue;
                };
                let mut x = glyph_run.offset();
                let y = glyph_run.baseline();
                let run = glyph_run.run();
                let font = run.font();
                let font_size = run.font_size();
                let synthesis = run.synthesis();
                let glyph_xform = synthesis
                    .skew()
                    .map(|angle| Affine::skew(angle.to_radians().tan() as f64, 0.0));

                let glyphs: Vec<vello::Glyph> = glyph_run
                    .glyphs()
                    .map(|glyph| {
                        let gx = x + glyph.x;
                        let gy = y - glyph.y;
                        x += glyph.advance;
                        glyph_count += 1;
                        vello::Glyph { id: glyph.id, x: gx, y: gy }
                    })
                    .collect();

                if !glyphs.is_empty() {
                    self.scene
                        .draw_glyphs(font)
                        .brush(&brush)
                        .hint(true)
                        .transform(text_transform)
                        .glyph_transform(glyph_xform)
                        .font_size(font_size)
                        .normalized_coords(run.normalized_coords())
                        .draw(Fill::NonZero, glyphs.into_iter());
                }
            }
        }

        // No usable font: mark where the text would be.
        if glyph_count == 0 {
            log::trace!("no glyphs for {:?} in {:?}", text.content, text.font.family);
            let rect = text.local_box(ApproxMeasurer.measure(&text.content, &text.font));
            let color: Color = text.color.into();
            self.scene
                .fill(Fill::NonZero, transform, color.multiply_alpha(0.3), None, &rect);
        }
    }
}

impl Renderer for VelloRenderer {
    fn build_scene(&mut self, ctx: &RenderContext) {
        self.scene.reset();
        let base = Affine::scale(ctx.scale_factor);
        for &root in ctx.stage.roots() {
            self.render_node(ctx.stage, root, base);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use animiert_core::controls::Checkbox;
    use animiert_core::shapes::Line;
    use animiert_core::{SerializableColor, Widget};
    use kurbo::{Point, Rect};

    fn build(stage: &Stage) -> VelloRenderer {
        let mut renderer = VelloRenderer::new();
        let ctx = RenderContext::new(stage, Size::new(800.0, 600.0));
        renderer.build_scene(&ctx);
        renderer
    }

    #[test]
    fn test_renderer_creation() {
        let renderer = VelloRenderer::new();
        assert!(renderer.scene().encoding().is_empty());
    }

    #[test]
    fn test_build_empty_stage() {
        let stage = Stage::default();
        assert!(build(&stage).scene().encoding().is_empty());
    }

    #[test]
    fn test_build_scene_with_widgets() {
        let mut stage = Stage::default();
        Line::styled(
            &mut stage,
            Point::new(10.0, 10.0),
            Point::new(200.0, 80.0),
            SerializableColor::black(),
            2.0,
            Some(vec![4.0, 2.0]),
        )
        .unwrap();
        Checkbox::new(&mut stage, true, 16.0, "Grid", "Arial", 12.0).unwrap();
        assert!(!build(&stage).scene().encoding().is_empty());
    }

    #[test]
    fn test_hidden_nodes_are_skipped() {
        let mut stage = Stage::default();
        let checkbox = Checkbox::new(&mut stage, false, 16.0, "", "Arial", 12.0).unwrap();
        stage.set_visible(checkbox.root(), false).unwrap();
        assert!(build(&stage).scene().encoding().is_empty());
    }

    #[test]
    fn test_masked_node_renders() {
        let mut stage = Stage::default();
        let checkbox = Checkbox::new(&mut stage, true, 16.0, "Clip", "Arial", 12.0).unwrap();
        stage
            .set_mask(checkbox.root(), Some(Rect::new(0.0, 0.0, 8.0, 8.0)))
            .unwrap();
        let mut renderer = build(&stage);
        assert!(!renderer.take_scene().encoding().is_empty());
        assert!(renderer.scene().encoding().is_empty());
    }
}
