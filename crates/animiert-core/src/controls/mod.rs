//! Interactive controls: buttons, check boxes, radio buttons, sliders and the
//! numeric stepper.
//!
//! Controls react to [`UiEvent`](crate::widget::UiEvent)s routed by the
//! [`WidgetHost`](crate::widget::WidgetHost) and report changes as
//! [`WidgetEvent`](crate::widget::WidgetEvent)s.

mod button;
mod button_slider;
mod checkbox;
mod numeric_stepper;
mod progress_slider;
mod radio;
mod slider;

pub use button::{BUTTON_RADIUS, Button};
pub use button_slider::ButtonSlider;
pub use checkbox::Checkbox;
pub use numeric_stepper::{NumericStepper, StepDirection, format_value, parse_value};
pub use progress_slider::ProgressSlider;
pub use radio::{DEFAULT_RADIO_SIZE, RadioButton, RadioGroups};
pub use slider::{Orientation, SliderRange};

use kurbo::Rect;

use crate::error::WidgetResult;
use crate::scene::{Font, NodeId, Stage, TextBaseline, TextNode};

/// Label to the right of a square control of side `size`, with an opaque
/// backing rectangle so the text takes the pointer too.
#[derive(Debug, Clone, Copy)]
pub(crate) struct SideLabel {
    pub backing: NodeId,
    pub text: NodeId,
}

impl SideLabel {
    pub fn create(stage: &mut Stage, parent: NodeId) -> WidgetResult<Self> {
        let backing = stage.create_shape();
        let color = stage.theme().text;
        let text = stage.create_text(TextNode::new("", Font::default(), color).with_baseline(TextBaseline::Middle));
        stage.add_child(parent, backing)?;
        stage.add_child(parent, text)?;
        Ok(Self { backing, text })
    }

    pub fn draw(&self, stage: &mut Stage, label: &str, font: &Font, size: f64) -> WidgetResult<()> {
        let theme = stage.theme();
        let x = size + theme.label_gap;
        let (color, background) = (theme.text, theme.background);
        let node = stage.text_mut(self.text)?;
        node.content = label.to_string();
        node.font = font.clone();
        node.color = color;
        stage.set_position(self.text, x, size / 2.0)?;

        let measured = stage.measure_node(self.text)?;
        let backing = Rect::from_origin_size((x, size / 2.0 - font.size / 2.0), measured);
        let graphics = stage.graphics_mut(self.backing)?.clear();
        if !label.is_empty() {
            graphics.fill(&backing, background);
        }
        Ok(())
    }
}
