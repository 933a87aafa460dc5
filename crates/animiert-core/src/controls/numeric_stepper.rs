//! Editable number with up/down buttons and press-and-hold repeat.

use kurbo::{BezPath, Point, Rect};
use std::time::{Duration, Instant};

use crate::color::SerializableColor;
use crate::error::{WidgetError, WidgetResult};
use crate::input::{Key, KeyEvent};
use crate::scene::{Font, NodeId, Paint, Stage, StrokeStyle};
use crate::text::{CharFilter, EditOutcome, FieldNodes, TextEditState};
use crate::widget::{UiEvent, Widget, WidgetEvent};

const OUTLINE_WIDTH: f64 = 0.5;
const ARROW_HALF_WIDTH: f64 = 3.0;
const ARROW_HEIGHT: f64 = 4.0;
/// Precision values are rounded to before display.
const DISPLAY_PRECISION: f64 = 1e9;

/// Text for a value: rounded to nine decimals, no trailing `.0`.
pub fn format_value(value: f64) -> String {
    if !value.is_finite() || value.abs() >= 1e6 {
        return value.to_string();
    }
    let rounded = (value * DISPLAY_PRECISION).round() / DISPLAY_PRECISION;
    if rounded == 0.0 {
        return "0".to_string();
    }
    rounded.to_string()
}

/// Parse stepper text. A comma counts as the decimal point.
pub fn parse_value(text: &str) -> Option<f64> {
    text.trim()
        .replace(',', ".")
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Which way a stepper button moves the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepDirection {
    Up,
    Down,
}

impl StepDirection {
    fn sign(self) -> f64 {
        match self {
            StepDirection::Up => 1.0,
            StepDirection::Down => -1.0,
        }
    }
}

/// A held button and when it fires next.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Repeat {
    direction: StepDirection,
    next: Instant,
}

/// A numeric text field with stacked up/down buttons on its right edge.
///
/// Pressing a button steps once; holding it keeps stepping after the theme's
/// initial delay, driven by [`Widget::tick`]. The text is edited like a
/// [`TextInput`](crate::text::TextInput) and committed with Enter.
#[derive(Debug, Clone)]
pub struct NumericStepper {
    root: NodeId,
    nodes: FieldNodes,
    up: NodeId,
    down: NodeId,
    state: TextEditState,
    value: f64,
    step: f64,
    min: f64,
    max: f64,
    font: Font,
    color: SerializableColor,
    width: f64,
    /// Text height from the last redraw.
    text_height: f64,
    focused: bool,
    hovered: Option<StepDirection>,
    repeat: Option<Repeat>,
    drag_anchor: Option<usize>,
}

impl NumericStepper {
    /// Unbounded stepper moving in steps of 1.
    pub fn new(
        stage: &mut Stage,
        value: f64,
        font: Font,
        color: SerializableColor,
        width: f64,
    ) -> WidgetResult<Self> {
        Self::with_limits(stage, value, font, color, width, 1.0, None, f64::NEG_INFINITY, f64::INFINITY)
    }

    #[allow(clippy::too_many_arguments)]
    pub fn with_limits(
        stage: &mut Stage,
        value: f64,
        font: Font,
        color: SerializableColor,
        width: f64,
        step: f64,
        max_length: Option<usize>,
        min: f64,
        max: f64,
    ) -> WidgetResult<Self> {
        check_bounds(min, max)?;
        let root = stage.create_container();
        stage.add_root(root)?;
        let nodes = FieldNodes::create(stage, root, &font, color)?;
        let up = stage.create_shape();
        let down = stage.create_shape();
        stage.add_child(root, up)?;
        stage.add_child(root, down)?;

        let value = value.max(min).min(max);
        let mut stepper = Self {
            root,
            nodes,
            up,
            down,
            state: TextEditState::new(format_value(value), CharFilter::Numeric).with_max_length(max_length),
            value,
            step,
            min,
            max,
            font,
            color,
            width,
            text_height: 0.0,
            focused: false,
            hovered: None,
            repeat: None,
            drag_anchor: None,
        };
        stepper.redraw(stage)?;
        Ok(stepper)
    }

    /// Last committed value.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Text currently in the field, committed or not.
    pub fn text(&self) -> &str {
        self.state.text()
    }

    pub fn state(&self) -> &TextEditState {
        &self.state
    }

    pub fn step(&self) -> f64 {
        self.step
    }

    pub fn bounds(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    pub fn up_button(&self) -> NodeId {
        self.up
    }

    pub fn down_button(&self) -> NodeId {
        self.down
    }

    pub fn text_node(&self) -> NodeId {
        self.nodes.text
    }

    pub fn caret(&self) -> NodeId {
        self.nodes.caret
    }

    pub fn selection(&self) -> NodeId {
        self.nodes.selection
    }

    pub fn frame(&self) -> NodeId {
        self.nodes.frame
    }

    /// Whether a held button is auto-repeating or waiting to.
    pub fn is_repeating(&self) -> bool {
        self.repeat.is_some()
    }

    /// Set the value, clamped to the bounds. Returns the stored value.
    pub fn set_value(&mut self, stage: &mut Stage, value: f64) -> WidgetResult<f64> {
        self.commit(value);
        self.redraw(stage)?;
        Ok(self.value)
    }

    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Change the bounds, re-clamping the current value.
    pub fn set_bounds(&mut self, stage: &mut Stage, min: f64, max: f64) -> WidgetResult<()> {
        check_bounds(min, max)?;
        self.min = min;
        self.max = max;
        self.commit(self.value);
        self.redraw(stage)
    }

    pub fn set_max_length(&mut self, max_length: Option<usize>) {
        self.state.set_max_length(max_length);
    }

    pub fn set_width(&mut self, stage: &mut Stage, width: f64) -> WidgetResult<()> {
        self.width = width;
        self.redraw(stage)
    }

    pub fn set_font(&mut self, stage: &mut Stage, font: Font) -> WidgetResult<()> {
        self.font = font;
        self.redraw(stage)
    }

    pub fn set_color(&mut self, stage: &mut Stage, color: SerializableColor) -> WidgetResult<()> {
        self.color = color;
        self.redraw(stage)
    }

    pub fn select_range(&mut self, stage: &mut Stage, anchor: usize, focus: usize) -> WidgetResult<()> {
        self.state.select_range(anchor, focus);
        self.redraw(stage)
    }

    /// Step once as if a button was clicked. Returns the new value.
    pub fn step_by(&mut self, stage: &mut Stage, direction: StepDirection) -> WidgetResult<f64> {
        self.apply_step(direction);
        self.redraw(stage)?;
        Ok(self.value)
    }

    fn clamp(&self, value: f64) -> f64 {
        value.max(self.min).min(self.max)
    }

    /// Store a clamped value and show it.
    fn commit(&mut self, value: f64) {
        self.value = self.clamp(value);
        self.state.set_text(format_value(self.value));
    }

    /// Steps from the text on screen, falling back to the committed value.
    fn apply_step(&mut self, direction: StepDirection) {
        let base = parse_value(self.state.text()).unwrap_or(self.value);
        self.commit(base + direction.sign() * self.step);
    }

    fn button_x(&self, padding: f64) -> f64 {
        self.width - padding / 2.0
    }

    fn button_height(&self, padding: f64) -> f64 {
        (self.text_height + padding) / 2.0
    }

    /// Button under a point in the stepper's local space.
    fn button_at(&self, padding: f64, button_width: f64, local: Point) -> Option<StepDirection> {
        let x = self.button_x(padding);
        if local.x < x || local.x > x + button_width {
            return None;
        }
        let h = self.button_height(padding);
        let y = local.y + padding / 2.0;
        if (0.0..h).contains(&y) {
            Some(StepDirection::Up)
        } else if (h..=2.0 * h).contains(&y) {
            Some(StepDirection::Down)
        } else {
            None
        }
    }

    fn button_under(&self, stage: &Stage, position: Point) -> Option<StepDirection> {
        let theme = stage.theme();
        let local = stage.global_to_local(self.root, position);
        self.button_at(theme.text_padding, theme.stepper_button_width, local)
    }

    fn direction_of(&self, node: NodeId) -> Option<StepDirection> {
        if node == self.up {
            Some(StepDirection::Up)
        } else if node == self.down {
            Some(StepDirection::Down)
        } else {
            None
        }
    }

    fn stop_repeat(&mut self) {
        if let Some(repeat) = self.repeat.take() {
            log::trace!("stepper repeat {:?} stopped", repeat.direction);
        }
    }

    fn index_at(&self, stage: &Stage, position: Point) -> usize {
        let x = stage.global_to_local(self.root, position).x;
        self.nodes.index_at(stage, &self.state, &self.font, x)
    }

    fn draw_button(&self, stage: &mut Stage, direction: StepDirection) -> WidgetResult<()> {
        let theme = stage.theme();
        let padding = theme.text_padding;
        let width = theme.stepper_button_width;
        let [top, bottom] = theme.gloss_fill;
        let arrow = theme.arrow;
        let outline = if self.hovered == Some(direction) {
            theme.accent
        } else {
            theme.border_light
        };
        let height = self.button_height(padding);
        let mid = width / 2.0;

        let mut triangle = BezPath::new();
        match direction {
            StepDirection::Up => {
                let apex = padding / 3.0;
                triangle.move_to((mid, apex));
                triangle.line_to((mid - ARROW_HALF_WIDTH, apex + ARROW_HEIGHT));
                triangle.line_to((mid + ARROW_HALF_WIDTH, apex + ARROW_HEIGHT));
            }
            StepDirection::Down => {
                let apex = height - padding / 3.0;
                triangle.move_to((mid, apex));
                triangle.line_to((mid + ARROW_HALF_WIDTH, apex - ARROW_HEIGHT));
                triangle.line_to((mid - ARROW_HALF_WIDTH, apex - ARROW_HEIGHT));
            }
        }
        triangle.close_path();

        let (node, y) = match direction {
            StepDirection::Up => (self.up, -padding / 2.0),
            StepDirection::Down => (self.down, height - padding / 2.0),
        };
        stage
            .graphics_mut(node)?
            .clear()
            .fill_and_stroke(
                &Rect::new(0.0, 0.0, width, height),
                Paint::vertical(top, bottom, height),
                StrokeStyle::new(OUTLINE_WIDTH, outline),
            )
            .fill(&triangle, arrow);
        stage.set_position(node, self.button_x(padding), y)
    }

    fn edit_outcome(&mut self, stage: &mut Stage, outcome: EditOutcome) -> WidgetResult<Option<WidgetEvent>> {
        if outcome != EditOutcome::Ignored {
            self.redraw(stage)?;
        }
        Ok(None)
    }
}

fn check_bounds(min: f64, max: f64) -> WidgetResult<()> {
    if min.is_nan() || max.is_nan() || min > max {
        return Err(WidgetError::EmptyRange { min, max });
    }
    Ok(())
}

impl Widget for NumericStepper {
    fn root(&self) -> NodeId {
        self.root
    }

    fn redraw(&mut self, stage: &mut Stage) -> WidgetResult<()> {
        let size = self
            .nodes
            .draw(stage, &self.state, &self.font, self.color, self.focused)?;
        self.text_height = size.height;
        let theme = stage.theme();
        let padding = theme.text_padding;
        let frame = Rect::new(
            -padding / 2.0,
            -padding / 2.0,
            self.width - padding / 2.0,
            size.height + padding / 2.0,
        );
        let (background, border) = (theme.background, theme.border_light);
        stage.graphics_mut(self.nodes.frame)?.clear().fill_and_stroke(
            &frame,
            background,
            StrokeStyle::new(OUTLINE_WIDTH, border),
        );
        self.draw_button(stage, StepDirection::Up)?;
        self.draw_button(stage, StepDirection::Down)
    }

    fn on_pointer(&mut self, stage: &mut Stage, event: &UiEvent) -> WidgetResult<Option<WidgetEvent>> {
        let mut reported = None;
        match *event {
            UiEvent::Enter { position } => self.hovered = self.button_under(stage, position),
            UiEvent::Leave { .. } => {
                self.hovered = None;
                self.stop_repeat();
            }
            UiEvent::Press { position, target, time } => match self.direction_of(target) {
                Some(direction) => {
                    let before = self.value;
                    self.apply_step(direction);
                    self.hovered = Some(direction);
                    self.repeat = Some(Repeat {
                        direction,
                        next: time + stage.theme().repeat.initial_delay(),
                    });
                    if self.value != before {
                        reported = Some(WidgetEvent::ValueChanged(self.value));
                    }
                }
                None => {
                    let local = stage.global_to_local(self.root, position);
                    if local.x >= self.button_x(stage.theme().text_padding) {
                        return Ok(None);
                    }
                    let index = self.index_at(stage, position);
                    self.state.set_cursor(index);
                    self.drag_anchor = Some(index);
                }
            },
            UiEvent::Drag { position, .. } => {
                self.hovered = self.button_under(stage, position);
                if self.repeat.is_some_and(|r| Some(r.direction) != self.hovered) {
                    self.stop_repeat();
                }
                if let Some(anchor) = self.drag_anchor {
                    let index = self.index_at(stage, position);
                    self.state.select_range(anchor, index);
                }
            }
            UiEvent::Release { position, .. } => {
                self.stop_repeat();
                self.drag_anchor = None;
                self.hovered = self.button_under(stage, position);
            }
            UiEvent::Click { .. } => return Ok(None),
        }
        self.redraw(stage)?;
        Ok(reported)
    }

    fn on_key(&mut self, stage: &mut Stage, event: &KeyEvent) -> WidgetResult<Option<WidgetEvent>> {
        match event.key {
            Key::Enter => {
                let previous = self.value;
                match parse_value(self.state.text()) {
                    Some(parsed) => self.commit(parsed),
                    None => {
                        log::warn!("stepper text {:?} is not a number, restoring {}", self.state.text(), self.value);
                        self.commit(self.value);
                    }
                }
                log::debug!("stepper committed {}", self.value);
                self.redraw(stage)?;
                Ok((self.value != previous).then_some(WidgetEvent::ValueChanged(self.value)))
            }
            Key::Escape => {
                self.commit(self.value);
                self.redraw(stage)?;
                Ok(None)
            }
            Key::Character(c) => {
                let Some(text) = self.state.preview_insert(c) else {
                    return Ok(None);
                };
                let limit = self.width - stage.theme().text_padding;
                if stage.measure_text(&text, &self.font).width > limit {
                    return Ok(None);
                }
                let outcome = self.state.insert(c);
                self.edit_outcome(stage, outcome)
            }
            _ => {
                let outcome = self.state.apply_key(event);
                self.edit_outcome(stage, outcome)
            }
        }
    }

    fn tick(&mut self, stage: &mut Stage, now: Instant) -> WidgetResult<Option<WidgetEvent>> {
        let Some(mut repeat) = self.repeat else {
            return Ok(None);
        };
        if now < repeat.next {
            return Ok(None);
        }
        let interval: Duration = stage.theme().repeat.repeat_interval();
        let before = self.value;
        while repeat.next <= now {
            self.apply_step(repeat.direction);
            repeat.next += interval;
        }
        self.repeat = Some(repeat);
        self.redraw(stage)?;
        Ok((self.value != before).then_some(WidgetEvent::ValueChanged(self.value)))
    }

    fn accepts_focus(&self) -> bool {
        true
    }

    fn set_focused(&mut self, stage: &mut Stage, focused: bool) -> WidgetResult<()> {
        self.focused = focused;
        if !focused {
            self.state.clear_selection();
        }
        self.redraw(stage)
    }
}
