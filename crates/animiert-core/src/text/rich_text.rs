//! Multi-line text with inline subscript and superscript runs.
//!
//! Markup: `_` toggles subscript, `^` toggles superscript. Entering one mode
//! leaves the other, so `x^2_i` sets `2` raised and `i` lowered.

use kurbo::{Point, Rect, Size};

use crate::color::SerializableColor;
use crate::error::WidgetResult;
use crate::scene::{Font, NodeId, Stage, TextAlign, TextBaseline, TextNode};
use crate::widget::Widget;

/// Vertical offset of script runs from the line center, in pixels.
pub const SCRIPT_SHIFT: f64 = 7.0;
/// How much smaller script runs are than the base font, in pixels.
pub const SCRIPT_SIZE_REDUCTION: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Script {
    #[default]
    Normal,
    Sub,
    Super,
}

impl Script {
    fn offset(self) -> f64 {
        match self {
            Script::Normal => 0.0,
            Script::Sub => SCRIPT_SHIFT,
            Script::Super => -SCRIPT_SHIFT,
        }
    }

    fn font(self, base: &Font) -> Font {
        match self {
            Script::Normal => base.clone(),
            Script::Sub | Script::Super => base.with_size((base.size - SCRIPT_SIZE_REDUCTION).max(1.0)),
        }
    }
}

/// A stretch of text drawn with one script mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Run {
    pub text: String,
    pub script: Script,
}

/// Split markup into lines of runs. Empty runs are dropped.
pub fn parse_markup(markup: &str) -> Vec<Vec<Run>> {
    markup
        .split('\n')
        .map(|line| {
            let mut runs = Vec::new();
            let mut script = Script::Normal;
            let mut current = String::new();
            for c in line.chars() {
                let toggled = match c {
                    '_' => Script::Sub,
                    '^' => Script::Super,
                    _ => {
                        current.push(c);
                        continue;
                    }
                };
                if !current.is_empty() {
                    runs.push(Run {
                        text: std::mem::take(&mut current),
                        script,
                    });
                }
                script = if script == toggled { Script::Normal } else { toggled };
            }
            if !current.is_empty() {
                runs.push(Run { text: current, script });
            }
            runs
        })
        .collect()
}

/// Static text with script markup and an optional per-run background.
///
/// Lines stack downwards from the origin; the origin sits on the vertical
/// center of the first line. Alignment positions each whole line relative to
/// the origin.
#[derive(Debug, Clone)]
pub struct RichText {
    root: NodeId,
    text: String,
    font: Font,
    color: SerializableColor,
    align: TextAlign,
    background: Option<SerializableColor>,
    measured: Size,
}

impl RichText {
    pub fn new(stage: &mut Stage, text: impl Into<String>, font: Font, color: SerializableColor) -> WidgetResult<Self> {
        Self::styled(stage, text, font, color, TextAlign::Left, None)
    }

    pub fn styled(
        stage: &mut Stage,
        text: impl Into<String>,
        font: Font,
        color: SerializableColor,
        align: TextAlign,
        background: Option<SerializableColor>,
    ) -> WidgetResult<Self> {
        let root = stage.create_container();
        stage.add_root(root)?;
        let mut rich = Self {
            root,
            text: text.into(),
            font,
            color,
            align,
            background,
            measured: Size::ZERO,
        };
        rich.redraw(stage)?;
        Ok(rich)
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn font(&self) -> &Font {
        &self.font
    }

    pub fn color(&self) -> SerializableColor {
        self.color
    }

    /// Width of the widest line.
    pub fn measured_width(&self) -> f64 {
        self.measured.width
    }

    /// Height of all lines together.
    pub fn measured_height(&self) -> f64 {
        self.measured.height
    }

    pub fn set_text(&mut self, stage: &mut Stage, text: impl Into<String>) -> WidgetResult<()> {
        self.text = text.into();
        self.redraw(stage)
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.color = color;
        self.redraw(stage)
    }

    pub fn set_font(&mut self, stage: &mut Stage, font: Font) -> WidgetResult<()> {
        self.font = font;
        self.redraw(stage)
    }

    pub fn set_align(&mut self, stage: &mut Stage, align: TextAlign) -> WidgetResult<()> {
        self.align = align;
        self.redraw(stage)
    }

    pub fn set_background(&mut self, stage: &mut Stage, background: Option<SerializableColor>) -> WidgetResult<()> {
        self.background = background;
        self.redraw(stage)
    }

    /// Place one line of runs at `y`, returning its size.
    fn layout_line(&self, stage: &mut Stage, runs: &[Run], y: f64) -> WidgetResult<Size> {
        let measured: Vec<(Font, Size)> = runs
            .iter()
            .map(|run| {
                let font = run.script.font(&self.font);
                let size = stage.measure_text(&run.text, &font);
                (font, size)
            })
            .collect();
        let width: f64 = measured.iter().map(|(_, size)| size.width).sum();
        let height = measured
            .iter()
            .map(|(_, size)| size.height)
            .fold(self.font.line_height(), f64::max);

        let mut x = match self.align {
            TextAlign::Left => 0.0,
            TextAlign::Center => -width / 2.0,
            TextAlign::Right => -width,
        };
        for (run, (font, size)) in runs.iter().zip(measured) {
            let pos = Point::new(x, y + run.script.offset());
            let node = TextNode::new(run.text.clone(), font, self.color).with_baseline(TextBaseline::Middle);
            if let Some(background) = self.background {
                let bg = stage.create_shape();
                let rect = Rect::from_origin_size(node.origin(size), size);
                stage.graphics_mut(bg)?.fill(&rect, background);
                stage.set_position(bg, pos.x, pos.y)?;
                stage.add_child_at(self.root, bg, 0)?;
            }
            let id = stage.create_text(node);
            stage.set_position(id, pos.x, pos.y)?;
            stage.add_child(self.root, id)?;
            x += size.width;
        }
        Ok(Size::new(width, height))
    }
}

impl Widget for RichText {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        stage.remove_all_children(self.root)?;
        let mut y = 0.0;
        let mut width: f64 = 0.0;
        for runs in parse_markup(&self.text) {
            let line = self.layout_line(stage, &runs, y)?;
            width = width.max(line.width);
            y += line.height;
        }
        self.measured = Size::new(width, y);
        Ok(())
    }
}
