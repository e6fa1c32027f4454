//! Dial: a full-circle gauge with gradient-colored unit lines.
//!
//! The dial draws 36 unit lines every 10 degrees around a circle and a
//! needle line from the center. Dragging positions the needle absolutely
//! under the pointer; wheel ticks step the value. Both endpoints of the
//! range share the 0/360 seam, so reaching `end` while closing the circle
//! wraps back to `start`. Unit lines between the needle and the seam take
//! their gradient palette entry, the rest show the plain unit color.

use crate::palette::{self, Palette};
use crate::widgets::{parse_patch, round2, Command, HIT_TOLERANCE};
use dialkit_core::{
    polar_offset, resolve_background, BackgroundProvider, BoundaryMode, ConfigError, DragMode,
    FontSpec, Gauge, GaugeInteraction, InputEvent, InteractionPolicy, ItemId, Paint, Scene, Shape,
    Sweep, ValueRange, WidgetState,
};
use dialkit_types::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option names `configure_value` accepts for a dial.
pub const DIAL_OPTION_KEYS: &[&str] = &[
    "state",
    "text",
    "start",
    "end",
    "bg",
    "width",
    "height",
    "unit_color",
    "color_gradient",
    "text_color",
    "needle_color",
    "scroll_steps",
    "scroll",
    "integer",
];

/// Construction parameters for [`Dial`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialConfig {
    // Value range
    #[serde(default = "default_start")]
    pub start: f64,
    #[serde(default = "default_end")]
    pub end: f64,

    // Geometry
    #[serde(default)]
    pub width: Option<f64>, // Defaults to (unit_length + radius) * 2
    #[serde(default)]
    pub height: Option<f64>, // Defaults to the width plus the label row
    #[serde(default)]
    pub x: Option<f64>, // Dial center; defaults to unit_length + radius
    #[serde(default)]
    pub y: Option<f64>,
    #[serde(default = "default_unit_length")]
    pub unit_length: f64,
    #[serde(default = "default_unit_width")]
    pub unit_width: f64,
    #[serde(default = "default_radius")]
    pub radius: f64,

    // Colors and label
    #[serde(default)]
    pub bg: Option<Color>, // Absent: ask the host, then fall back
    #[serde(default = "default_text")]
    pub text: String, // Label prefix; empty disables the label
    #[serde(default = "default_grey")]
    pub unit_color: Color,
    #[serde(default = "default_text_color")]
    pub text_color: Color,
    #[serde(default)]
    pub text_font: Option<FontSpec>,
    #[serde(default = "default_grey")]
    pub needle_color: Color,
    #[serde(default = "default_gradient")]
    pub color_gradient: (String, String), // Endpoint color names for the palette

    // Behavior
    #[serde(default)]
    pub integer: bool,
    #[serde(default = "default_true")]
    pub scroll: bool,
    #[serde(default = "default_scroll_steps")]
    pub scroll_steps: f64,
    #[serde(default)]
    pub state: WidgetState,
}

fn default_start() -> f64 {
    0.0
}

fn default_end() -> f64 {
    100.0
}

fn default_unit_length() -> f64 {
    10.0
}

fn default_unit_width() -> f64 {
    5.0
}

fn default_radius() -> f64 {
    50.0
}

fn default_text() -> String {
    "Value: ".to_string()
}

fn default_grey() -> Color {
    Color::from_rgba8(190, 190, 190, 255)
}

fn default_text_color() -> Color {
    Color::new(0.0, 0.0, 0.0, 1.0)
}

fn default_gradient() -> (String, String) {
    ("white".to_string(), "black".to_string())
}

fn default_true() -> bool {
    true
}

fn default_scroll_steps() -> f64 {
    1.0
}

impl Default for DialConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            width: None,
            height: None,
            x: None,
            y: None,
            unit_length: default_unit_length(),
            unit_width: default_unit_width(),
            radius: default_radius(),
            bg: None,
            text: default_text(),
            unit_color: default_grey(),
            text_color: default_text_color(),
            text_font: None,
            needle_color: default_grey(),
            color_gradient: default_gradient(),
            integer: false,
            scroll: default_true(),
            scroll_steps: default_scroll_steps(),
            state: WidgetState::default(),
        }
    }
}

/// Partial-configuration patch for [`Dial`]. Absent fields keep their
/// current value; the whole patch is validated before anything applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DialOptions {
    pub state: Option<WidgetState>,
    pub text: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub bg: Option<Color>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub unit_color: Option<Color>,
    pub color_gradient: Option<(String, String)>,
    pub text_color: Option<Color>,
    pub needle_color: Option<Color>,
    pub scroll_steps: Option<f64>,
    pub scroll: Option<bool>,
    pub integer: Option<bool>,
}

/// Full-circle gauge with gradient unit lines and an absolute-drag needle.
pub struct Dial {
    engine: GaugeInteraction,
    scene: Scene,
    palette: Palette,
    state: WidgetState,
    scroll_enabled: bool,
    unit_color: Color,
    text_title: String,
    center: (f64, f64),
    radius: f64,
    needle_id: ItemId,
    unit_ids: Vec<ItemId>,
    label_id: Option<ItemId>,
    command: Option<Command>,
}

impl Dial {
    /// Build a dial with no host background to consult.
    pub fn new(config: DialConfig) -> Result<Self, ConfigError> {
        Self::build(config, None)
    }

    /// Build a dial hosted in a container that knows its effective
    /// background.
    pub fn hosted(config: DialConfig, host: &dyn BackgroundProvider) -> Result<Self, ConfigError> {
        Self::build(config, Some(host))
    }

    fn build(config: DialConfig, host: Option<&dyn BackgroundProvider>) -> Result<Self, ConfigError> {
        let range = ValueRange::new(config.start, config.end)?;
        if config.radius <= 0.0 {
            return Err(ConfigError::invalid("radius", "must be positive"));
        }
        let palette = palette::build(&config.color_gradient.0, &config.color_gradient.1)?;

        let outer = config.unit_length + config.radius;
        let width = config.width.unwrap_or(outer * 2.0);
        let label_row = if config.text.is_empty() { 0.0 } else { 20.0 };
        let height = config.height.unwrap_or(outer * 2.0 + label_row);
        let center = (config.x.unwrap_or(outer), config.y.unwrap_or(outer));

        let mut engine = GaugeInteraction::new(
            range,
            Sweep::FullCircle,
            InteractionPolicy {
                drag: DragMode::Absolute,
                boundary: BoundaryMode::Wraparound,
            },
            center,
        );
        engine.set_steps(config.scroll_steps);
        engine.set_integer(config.integer);

        let mut scene = Scene::new(width, height, resolve_background(config.bg, host));
        let needle_id = scene.add(
            "needle",
            Shape::Line {
                from: center,
                to: polar_offset(center, config.radius, engine.angle()),
            },
            Paint {
                fill: Some(config.needle_color),
                width: config.unit_width,
                ..Paint::default()
            },
        );
        let mut unit_ids = Vec::with_capacity(palette::SEGMENT_COUNT);
        for segment in (0..360).step_by(10) {
            let angle = segment as f64;
            let id = scene.add(
                format!("unit{segment}"),
                Shape::Line {
                    from: polar_offset(center, config.radius, angle),
                    to: polar_offset(center, outer, angle),
                },
                Paint {
                    fill: Some(config.unit_color),
                    width: config.unit_width,
                    ..Paint::default()
                },
            );
            unit_ids.push(id);
        }
        let label_id = if config.text.is_empty() {
            None
        } else {
            Some(scene.add(
                "value",
                Shape::Text {
                    at: (center.0, center.1 + config.unit_length + config.radius + 10.0),
                    content: String::new(),
                },
                Paint {
                    fill: Some(config.text_color),
                    font: config.text_font.clone(),
                    ..Paint::default()
                },
            ))
        };

        let mut dial = Self {
            engine,
            scene,
            palette,
            state: config.state,
            scroll_enabled: config.scroll,
            unit_color: config.unit_color,
            text_title: config.text,
            center,
            radius: config.radius,
            needle_id,
            unit_ids,
            label_id,
            command: None,
        };
        dial.refresh();
        Ok(dial)
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    /// Register the change callback.
    pub fn set_command(&mut self, command: impl FnMut() + 'static) {
        self.command = Some(Box::new(command));
    }

    pub fn clear_command(&mut self) {
        self.command = None;
    }

    /// Apply an untyped option map; see [`DIAL_OPTION_KEYS`]. Any
    /// unrecognized key rejects the whole patch before anything applies.
    pub fn configure_value(&mut self, patch: Value) -> Result<(), ConfigError> {
        let options: DialOptions = parse_patch(patch, DIAL_OPTION_KEYS)?;
        self.configure(options)
    }

    fn display_value(&self) -> f64 {
        if self.engine.integer() {
            self.engine.value().round()
        } else {
            round2(self.engine.value())
        }
    }

    fn fire_command(&mut self) {
        if let Some(command) = self.command.as_mut() {
            command();
        }
    }

    /// Reposition the needle, recolor the unit lines and update the label
    /// for the current value.
    fn refresh(&mut self) {
        let tip = polar_offset(self.center, self.radius, self.engine.angle());
        self.scene.set_shape(
            self.needle_id,
            Shape::Line {
                from: self.center,
                to: tip,
            },
        );
        self.recolor_units();
        self.refresh_label();
    }

    /// Unit lines from the needle angle around to the seam are lit with
    /// their palette entry; the rest reset to the plain unit color.
    fn recolor_units(&mut self) {
        let needle_angle = self.engine.angle();
        for (index, id) in self.unit_ids.iter().enumerate() {
            let segment = (index * 10) as u32;
            let color = if segment as f64 >= needle_angle {
                self.palette.for_angle(segment)
            } else {
                self.unit_color
            };
            self.scene.set_fill(*id, color);
        }
    }

    fn refresh_label(&mut self) {
        if let Some(id) = self.label_id {
            let content = format!("{}{}", self.text_title, self.display_value());
            self.scene.set_text(id, &content);
        }
    }
}

impl Gauge for Dial {
    type Options = DialOptions;

    fn get(&self) -> f64 {
        self.display_value()
    }

    fn set(&mut self, value: f64) {
        if self.engine.set(value) {
            self.refresh();
            self.fire_command();
        }
    }

    fn configure(&mut self, options: DialOptions) -> Result<(), ConfigError> {
        // Validate everything fallible up front; nothing below can fail
        let range = match (options.start, options.end) {
            (None, None) => None,
            (start, end) => {
                let current = self.engine.range();
                Some(ValueRange::new(
                    start.unwrap_or(current.start),
                    end.unwrap_or(current.end),
                )?)
            }
        };
        let palette = options
            .color_gradient
            .as_ref()
            .map(|(from, to)| palette::build(from, to))
            .transpose()?;

        let value_before = self.engine.value();
        let mut repaint = false;
        let mut relabel = false;

        if let Some(range) = range {
            self.engine.set_range(range);
            repaint = true;
        }
        if let Some(palette) = palette {
            self.palette = palette;
            repaint = true;
        }
        if let Some(color) = options.unit_color {
            self.unit_color = color;
            repaint = true;
        }
        if let Some(state) = options.state {
            self.state = state;
            if !state.interactive() {
                self.engine.release();
            }
        }
        if let Some(text) = options.text {
            self.text_title = text;
            relabel = true;
        }
        if let Some(color) = options.bg {
            self.scene.set_background(color);
        }
        if options.width.is_some() || options.height.is_some() {
            let (width, height) = self.scene.size();
            self.scene.set_size(
                options.width.unwrap_or(width),
                options.height.unwrap_or(height),
            );
        }
        if let Some(color) = options.text_color {
            if let Some(id) = self.label_id {
                self.scene.set_fill(id, color);
            }
        }
        if let Some(color) = options.needle_color {
            self.scene.set_fill(self.needle_id, color);
        }
        if let Some(steps) = options.scroll_steps {
            self.engine.set_steps(steps);
        }
        if let Some(scroll) = options.scroll {
            self.scroll_enabled = scroll;
        }
        if let Some(integer) = options.integer {
            self.engine.set_integer(integer);
            relabel = true;
        }

        if repaint {
            self.refresh();
        } else if relabel {
            self.refresh_label();
        }
        // A shrunk range may have re-clamped the value
        if self.engine.value() != value_before {
            self.fire_command();
        }
        Ok(())
    }

    fn handle_event(&mut self, event: InputEvent) -> bool {
        if !self.state.interactive() {
            return false;
        }
        let changed = match event {
            InputEvent::PointerPressed { x, y } => {
                if self.scene.hit("needle", x, y, HIT_TOLERANCE) {
                    self.engine.press(x, y);
                }
                false
            }
            InputEvent::PointerMoved { x, y } => self.engine.motion(x, y),
            InputEvent::PointerReleased { .. } => {
                self.engine.release();
                false
            }
            InputEvent::Scroll { direction } if self.scroll_enabled => {
                self.engine.scroll(direction)
            }
            InputEvent::Scroll { .. } => false,
        };
        if changed {
            self.refresh();
            self.fire_command();
        }
        changed
    }

    fn scene(&self) -> &Scene {
        &self.scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dialkit_core::ScrollDirection;
    use serde_json::json;
    use std::cell::Cell;
    use std::rc::Rc;

    fn dial() -> Dial {
        Dial::new(DialConfig::default()).unwrap()
    }

    fn scroll(direction: ScrollDirection) -> InputEvent {
        InputEvent::Scroll { direction }
    }

    #[test]
    fn test_default_layout() {
        let dial = dial();
        assert_eq!(dial.scene().size(), (120.0, 140.0));
        // Needle, 36 unit lines, value label
        assert_eq!(dial.scene().items().len(), 38);
        assert_eq!(dial.get(), 0.0);
        let label = dial.scene().find("value").next().unwrap();
        match &label.shape {
            Shape::Text { content, at } => {
                assert_eq!(content, "Value: 0");
                assert_eq!(*at, (60.0, 130.0));
            }
            other => panic!("unexpected label shape {other:?}"),
        }
    }

    #[test]
    fn test_empty_text_drops_label_row() {
        let config = DialConfig {
            text: String::new(),
            ..DialConfig::default()
        };
        let dial = Dial::new(config).unwrap();
        assert_eq!(dial.scene().size(), (120.0, 120.0));
        assert_eq!(dial.scene().find("value").count(), 0);
    }

    #[test]
    fn test_set_clamps_and_rounds() {
        let mut dial = dial();
        dial.set(33.333);
        assert_eq!(dial.get(), 33.33);
        dial.set(150.0);
        assert_eq!(dial.get(), 100.0);

        let mut integer = Dial::new(DialConfig {
            integer: true,
            ..DialConfig::default()
        })
        .unwrap();
        integer.set(50.6);
        assert_eq!(integer.get(), 51.0);
    }

    #[test]
    fn test_scroll_tick_and_wraparound() {
        let mut dial = dial();
        dial.set(50.0);
        assert!(dial.handle_event(scroll(ScrollDirection::Up)));
        assert_eq!(dial.get(), 51.0);

        // At the far end the closing tick resets to start
        dial.set(100.0);
        assert!(dial.handle_event(scroll(ScrollDirection::Up)));
        assert_eq!(dial.get(), 0.0);

        // At start a down tick stops
        assert!(!dial.handle_event(scroll(ScrollDirection::Down)));
        assert_eq!(dial.get(), 0.0);
    }

    #[test]
    fn test_needle_drag_absolute() {
        let mut dial = dial();
        // Needle rests at the seam, pointing east from (60, 60) to (110, 60)
        dial.handle_event(InputEvent::PointerPressed { x: 100.0, y: 60.0 });
        assert!(dial.handle_event(InputEvent::PointerMoved { x: 60.0, y: 10.0 }));
        assert_eq!(dial.get(), 75.0);
        let needle = dial.scene().get(dial.needle_id).unwrap();
        match &needle.shape {
            Shape::Line { from, to } => {
                assert_eq!(*from, (60.0, 60.0));
                assert!((to.0 - 60.0).abs() < 1e-9);
                assert!((to.1 - 10.0).abs() < 1e-9);
            }
            other => panic!("unexpected needle shape {other:?}"),
        }
        dial.handle_event(InputEvent::PointerReleased { x: 60.0, y: 10.0 });
        // Motion after release is ignored
        assert!(!dial.handle_event(InputEvent::PointerMoved { x: 10.0, y: 60.0 }));
    }

    #[test]
    fn test_press_off_needle_does_not_drag() {
        let mut dial = dial();
        dial.handle_event(InputEvent::PointerPressed { x: 30.0, y: 95.0 });
        assert!(!dial.handle_event(InputEvent::PointerMoved { x: 60.0, y: 10.0 }));
        assert_eq!(dial.get(), 0.0);
    }

    #[test]
    fn test_colorize_tracks_needle() {
        // Yellow-to-red keeps every palette entry distinct from the grey
        // unit color, unlike the default white-to-black ramp
        let mut dial = Dial::new(DialConfig {
            color_gradient: ("yellow".to_string(), "red".to_string()),
            ..DialConfig::default()
        })
        .unwrap();
        dial.set(50.0);
        // Needle at 180 degrees: segments 180..=350 are lit
        let lit: Vec<bool> = dial
            .unit_ids
            .iter()
            .map(|id| dial.scene.get(*id).unwrap().paint.fill != Some(dial.unit_color))
            .collect();
        assert_eq!(lit.iter().filter(|on| **on).count(), 18);
        assert!(lit[18], "segment at 180 degrees should be lit");
        assert!(!lit[17], "segment at 170 degrees should be plain");
        let segment_180 = dial.scene.get(dial.unit_ids[18]).unwrap();
        assert_eq!(segment_180.paint.fill, Some(dial.palette.colors()[17]));
    }

    #[test]
    fn test_label_updates_with_prefix() {
        let mut dial = dial();
        dial.set(51.0);
        let label = dial.scene().find("value").next().unwrap();
        match &label.shape {
            Shape::Text { content, .. } => assert_eq!(content, "Value: 51"),
            other => panic!("unexpected label shape {other:?}"),
        }
    }

    #[test]
    fn test_command_fires_on_change_only() {
        let mut dial = dial();
        let fired = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&fired);
        dial.set_command(move || seen.set(seen.get() + 1));

        dial.set(10.0);
        assert_eq!(fired.get(), 1);
        dial.set(10.0);
        assert_eq!(fired.get(), 1);
        dial.handle_event(scroll(ScrollDirection::Up));
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_configure_value_unknown_key_is_atomic() {
        let mut dial = dial();
        let err = dial
            .configure_value(json!({
                "start": 10.0,
                "needle_colour": { "r": 1.0, "g": 0.0, "b": 0.0, "a": 1.0 },
            }))
            .unwrap_err();
        assert_eq!(err, ConfigError::UnknownOption("needle_colour".into()));
        // The valid key riding along was not applied
        assert_eq!(dial.engine.range().start, 0.0);
    }

    #[test]
    fn test_configure_empty_range_rejected() {
        let mut dial = dial();
        let err = dial
            .configure(DialOptions {
                start: Some(5.0),
                end: Some(5.0),
                ..DialOptions::default()
            })
            .unwrap_err();
        assert_eq!(err, ConfigError::EmptyRange(5.0));
        assert_eq!(dial.engine.range(), ValueRange::new(0.0, 100.0).unwrap());
    }

    #[test]
    fn test_configure_gradient_recolors() {
        let mut dial = dial();
        dial.configure(DialOptions {
            color_gradient: Some(("yellow".to_string(), "red".to_string())),
            ..DialOptions::default()
        })
        .unwrap();
        dial.set(100.0);
        // Fully lit: the 0 degree segment carries the end color
        let segment_0 = dial.scene.get(dial.unit_ids[0]).unwrap();
        assert_eq!(
            segment_0.paint.fill.map(|c| c.to_rgba8()),
            Some((255, 0, 0, 255))
        );
    }

    #[test]
    fn test_configure_shrunk_range_reclamps_and_fires() {
        let mut dial = dial();
        let fired = Rc::new(Cell::new(0u32));
        let seen = Rc::clone(&fired);
        dial.set_command(move || seen.set(seen.get() + 1));
        dial.set(80.0);
        assert_eq!(fired.get(), 1);

        dial.configure(DialOptions {
            end: Some(50.0),
            ..DialOptions::default()
        })
        .unwrap();
        assert_eq!(dial.get(), 50.0);
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_disabled_ignores_input_but_set_works() {
        let mut dial = dial();
        dial.configure(DialOptions {
            state: Some(WidgetState::Disabled),
            ..DialOptions::default()
        })
        .unwrap();
        assert!(!dial.handle_event(scroll(ScrollDirection::Up)));
        assert_eq!(dial.get(), 0.0);
        dial.set(20.0);
        assert_eq!(dial.get(), 20.0);
    }

    #[test]
    fn test_scroll_flag_gates_wheel_only() {
        let mut dial = dial();
        dial.configure(DialOptions {
            scroll: Some(false),
            ..DialOptions::default()
        })
        .unwrap();
        assert!(!dial.handle_event(scroll(ScrollDirection::Up)));
        // Dragging is not affected by the wheel flag
        dial.handle_event(InputEvent::PointerPressed { x: 100.0, y: 60.0 });
        assert!(dial.handle_event(InputEvent::PointerMoved { x: 60.0, y: 10.0 }));
        assert_eq!(dial.get(), 75.0);
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = DialConfig {
            end: 200.0,
            integer: true,
            color_gradient: ("cyan".to_string(), "blue".to_string()),
            ..DialConfig::default()
        };
        let json = serde_json::to_value(&config).unwrap();
        let back: DialConfig = serde_json::from_value(json).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_hosted_background() {
        struct Panel(Color);
        impl BackgroundProvider for Panel {
            fn effective_background(&self) -> Option<Color> {
                Some(self.0)
            }
        }
        let panel = Panel(Color::from_rgba8(24, 24, 24, 255));
        let config = DialConfig::default();
        let dial = Dial::hosted(config, &panel).unwrap();
        assert_eq!(dial.scene().background(), Color::from_rgba8(24, 24, 24, 255));
    }
}
