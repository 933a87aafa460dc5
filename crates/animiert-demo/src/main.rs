//! Headless widget gallery.
//!
//! Builds one of every widget on a stage, replays a short script of pointer,
//! key and clock input through a [`WidgetHost`], then renders a Vello scene.
//! Pass `--dump` to print the final display tree as JSON.

use std::time::{Duration, Instant};

use animiert_core::controls::ButtonSlider;
use animiert_core::scene::Font;
use animiert_core::shapes::AxisSizes;
use animiert_core::{
    Arrow, BezierCurve, Button, Checkbox, CoordinateSystem, GuideLines, Key, KeyEvent, MathCurve, MouseButton,
    NumericStepper, Orientation, PointerEvent, ProgressSlider, RadioButton, RadioGroups, RichText,
    SerializableColor, SplineCurve, Stage, TextInput, Theme, Widget, WidgetError, WidgetEvent, WidgetHost, WidgetId,
};
use animiert_render::{ParleyMeasurer, RenderContext, Renderer, VelloRenderer};
use kurbo::{Point, Size};
use thiserror::Error;

const THEME_ENV: &str = "ANIMIERT_THEME";

#[derive(Debug, Error)]
enum DemoError {
    #[error(transparent)]
    Widget(#[from] WidgetError),
    #[error("failed to dump stage: {0}")]
    Dump(#[from] serde_json::Error),
}

/// Handles of the interactive widgets the script talks to.
struct Gallery {
    checkbox: WidgetId,
    stepper: WidgetId,
    input: WidgetId,
    slider: WidgetId,
}

fn main() {
    env_logger::init();
    log::info!("Starting animiert gallery");

    let dump = std::env::args().any(|arg| arg == "--dump");
    if let Err(err) = run(dump) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn load_theme() -> Theme {
    let Ok(path) = std::env::var(THEME_ENV) else {
        return Theme::default();
    };
    match Theme::load(&path) {
        Ok(theme) => {
            log::info!("loaded theme from {path}");
            theme
        }
        Err(err) => {
            log::warn!("{err}; using the default theme");
            Theme::default()
        }
    }
}

fn run(dump: bool) -> Result<(), DemoError> {
    let mut stage = Stage::new(800.0, 600.0)
        .with_theme(load_theme())
        .with_measurer(ParleyMeasurer::new());
    let mut host = WidgetHost::new();
    let gallery = build_gallery(&mut stage, &mut host)?;

    for (id, event) in play_script(&mut stage, &mut host, &gallery)? {
        log::info!("widget {id:?} reported {event:?}");
    }
    if let Some(stepper) = host.get::<NumericStepper>(gallery.stepper) {
        println!("stepper value: {}", stepper.value());
    }
    if let Some(input) = host.get::<TextInput>(gallery.input) {
        println!("input text: {:?}", input.text());
    }
    stage.update();

    let mut renderer = VelloRenderer::new();
    renderer.build_scene(&RenderContext::new(&stage, Size::new(800.0, 600.0)));
    println!(
        "rendered {} nodes at revision {}, scene empty: {}",
        stage.len(),
        stage.revision(),
        renderer.scene().encoding().is_empty()
    );

    if dump {
        println!("{}", stage.to_json()?);
    }
    Ok(())
}

fn build_gallery(stage: &mut Stage, host: &mut WidgetHost) -> Result<Gallery, DemoError> {
    let ink = SerializableColor::parse("#333")?;
    let accent = stage.theme().accent;

    // Plot area: axes, a sine wave, a parabola through a control point, a spline.
    let axes = CoordinateSystem::new(stage, AxisSizes::new(120.0, 120.0, 40.0, 320.0), ink, 10.0, 6.0)?;
    stage.set_position(axes.root(), 60.0, 160.0)?;
    let wave = MathCurve::with_range(stage, |x| 160.0 - 60.0 * (x / 40.0).sin(), accent, (60.0, 420.0))?;
    let bezier = BezierCurve::new(stage, Point::new(60.0, 260.0), Point::new(200.0, 20.0), Point::new(380.0, 260.0))?;
    let spline = SplineCurve::new(
        stage,
        vec![Point::new(60.0, 100.0), Point::new(150.0, 60.0), Point::new(260.0, 130.0), Point::new(380.0, 70.0)],
    )?;
    let _guide = GuideLines::new(stage, Point::new(60.0, 160.0), ink, |x| -0.5 * x, 120.0)?;
    let _arrow = Arrow::new(stage, Point::new(420.0, 40.0), Point::new(360.0, 100.0), ink, 10.0, 6.0)?;
    let label = RichText::new(stage, "y = x^2^ + a_0_", Font::new("Arial", 16.0), ink)?;
    stage.set_position(label.root(), 420.0, 30.0)?;

    if let Ok(y) = bezier.y_at(200.0) {
        log::debug!("parabola passes through (200, {y:.2})");
    }
    let level = spline.find_intersections(Point::new(60.0, 100.0), Point::new(380.0, 100.0));
    log::debug!("spline crosses y = 100 at {level:?}");
    log::debug!("sine wave at 100: {:?}", wave.y_at(100.0));

    // Controls column.
    let button = Button::new(stage, "Reset", 90.0, 28.0, "Arial", 13.0)?;
    stage.set_position(button.root(), 480.0, 320.0)?;
    host.add(button);

    let checkbox = Checkbox::new(stage, false, 16.0, "Show grid", "Arial", 12.0)?;
    stage.set_position(checkbox.root(), 480.0, 370.0)?;
    let checkbox = host.add(checkbox);

    let mut groups = RadioGroups::new();
    for (i, name) in ["sin", "cos"].into_iter().enumerate() {
        let radio = RadioButton::new(stage, &mut groups, "function", name, i == 0)?;
        stage.set_position(radio.root(), 480.0 + 70.0 * i as f64, 400.0)?;
        host.add(radio);
    }

    let slider = ButtonSlider::new(stage, 200.0, 20.0, 10.0, 0.0, 10.0, 2.5, Orientation::Horizontal)?;
    stage.set_position(slider.root(), 480.0, 440.0)?;
    let slider = host.add(slider);

    let mut progress = ProgressSlider::new(stage, 200.0, 14.0, 0.0, 1.0, 0.4, Font::new("Arial", 11.0), Orientation::Horizontal)?;
    progress.set_show_value(stage, true)?;
    stage.set_position(progress.root(), 480.0, 480.0)?;
    host.add(progress);

    let stepper = NumericStepper::with_limits(
        stage,
        3.0,
        Font::new("Arial", 14.0),
        ink,
        80.0,
        0.5,
        Some(6),
        0.0,
        10.0,
    )?;
    stage.set_position(stepper.root(), 480.0, 530.0)?;
    let stepper = host.add(stepper);

    let input = TextInput::new(stage, "42", Font::new("Arial", 14.0), ink, 100.0)?;
    stage.set_position(input.root(), 620.0, 530.0)?;
    let input = host.add(input);

    Ok(Gallery {
        checkbox,
        stepper,
        input,
        slider,
    })
}

/// Click a node's center: move, press, release.
fn click_at(
    stage: &mut Stage,
    host: &mut WidgetHost,
    at: Point,
    now: Instant,
) -> Result<Vec<(WidgetId, WidgetEvent)>, DemoError> {
    let button = MouseButton::Left;
    let mut events = host.dispatch_pointer(stage, PointerEvent::Move { position: at }, now)?;
    events.extend(host.dispatch_pointer(stage, PointerEvent::Down { position: at, button }, now)?);
    events.extend(host.dispatch_pointer(stage, PointerEvent::Up { position: at, button }, now)?);
    Ok(events)
}

fn center_of(stage: &Stage, node: animiert_core::NodeId) -> Option<Point> {
    stage.world_bounds(node).map(|r| r.center())
}

fn play_script(
    stage: &mut Stage,
    host: &mut WidgetHost,
    gallery: &Gallery,
) -> Result<Vec<(WidgetId, WidgetEvent)>, DemoError> {
    let start = Instant::now();
    let mut events = Vec::new();

    // Toggle the checkbox.
    let frame = host.get::<Checkbox>(gallery.checkbox).map(|c| c.frame());
    if let Some(at) = frame.and_then(|node| center_of(stage, node)) {
        events.extend(click_at(stage, host, at, start)?);
    }

    // Drag the slider thumb 100px to the right.
    let thumb = host.get::<ButtonSlider>(gallery.slider).map(|s| s.thumb());
    if let Some(at) = thumb.and_then(|node| center_of(stage, node)) {
        let button = MouseButton::Left;
        events.extend(host.dispatch_pointer(stage, PointerEvent::Down { position: at, button }, start)?);
        let to = at + (100.0, 0.0);
        events.extend(host.dispatch_pointer(stage, PointerEvent::Move { position: to }, start)?);
        events.extend(host.dispatch_pointer(stage, PointerEvent::Up { position: to, button }, start)?);
    }

    // Hold the stepper's up button for 800ms.
    let up = host.get::<NumericStepper>(gallery.stepper).map(|s| s.up_button());
    if let Some(at) = up.and_then(|node| center_of(stage, node)) {
        let button = MouseButton::Left;
        events.extend(host.dispatch_pointer(stage, PointerEvent::Down { position: at, button }, start)?);
        for ms in (100..=800).step_by(100) {
            events.extend(host.tick(stage, start + Duration::from_millis(ms))?);
        }
        events.extend(host.dispatch_pointer(stage, PointerEvent::Up { position: at, button }, start)?);
    }

    // Type into the text field, then commit a typed value in the stepper.
    let text = host.get::<TextInput>(gallery.input).map(|i| i.text_node());
    if let Some(at) = text.and_then(|node| center_of(stage, node)) {
        events.extend(click_at(stage, host, at, start)?);
        for key in [KeyEvent::new(Key::End), KeyEvent::char('.'), KeyEvent::char('5')] {
            events.extend(host.dispatch_key(stage, key)?);
        }
    }
    let field = host.get::<NumericStepper>(gallery.stepper).map(|s| s.text_node());
    if let Some(at) = field.and_then(|node| center_of(stage, node)) {
        events.extend(click_at(stage, host, at, start)?);
        for key in [KeyEvent::new(Key::End), KeyEvent::new(Key::Backspace), KeyEvent::char('7'), KeyEvent::new(Key::Enter)] {
            events.extend(host.dispatch_key(stage, key)?);
        }
    }
    Ok(events)
}
