//! Animiert Core Library
//!
//! Retained scene graph, curve math and the interactive widgets drawn into it.
//! Rendering lives in `animiert-render`; this crate never touches a GPU.

pub mod color;
pub mod config;
pub mod controls;
pub mod error;
pub mod input;
pub mod math;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod widget;

pub use color::SerializableColor;
pub use config::{RepeatTiming, Theme};
pub use controls::{
    Button, ButtonSlider, Checkbox, NumericStepper, Orientation, ProgressSlider, RadioButton, RadioGroups,
    StepDirection,
};
pub use error::{GeometryError, WidgetError, WidgetResult};
pub use input::{InputState, Key, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use scene::{Font, NodeId, Stage, TextMeasurer};
pub use shapes::{Arrow, BezierCurve, CoordinateSystem, GuideLines, Line, MathCurve, PointsCurve, SplineCurve};
pub use text::{EditText, RichText, TextInput};
pub use widget::{UiEvent, Widget, WidgetEvent, WidgetHost, WidgetId, WidgetState};
