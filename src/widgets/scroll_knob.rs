//! ScrollKnob: a wheel-driven progress ring.
//!
//! Two stroked arcs share one circle: a faint full ring and a progress arc
//! that grows from `start_angle` as the value moves from `start` to `end`.
//! Thin decorative rings sit on either side of the stroke and the value
//! reads out in the middle. The knob has no draggable indicator; wheel
//! ticks are the only input, stepping by `steps` value units and clamping
//! at the range ends.

use crate::widgets::{parse_patch, round2, Command};
use dialkit_core::{
    resolve_background, BackgroundProvider, BoundaryMode, ConfigError, DragMode, FontSpec, Gauge,
    GaugeInteraction, InputEvent, InteractionPolicy, ItemId, Paint, Scene, Shape, Sweep,
    ValueRange, WidgetState,
};
use dialkit_types::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option names `configure_value` accepts for a scroll knob.
pub const KNOB_OPTION_KEYS: &[&str] = &[
    "state",
    "text",
    "start",
    "end",
    "bg",
    "width",
    "height",
    "bar_color",
    "progress_color",
    "fg",
    "inner_color",
    "outer_color",
    "steps",
    "text_color",
    "integer",
];

/// Construction parameters for [`ScrollKnob`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KnobConfig {
    // Value range
    #[serde(default = "default_start")]
    pub start: f64,
    #[serde(default = "default_end")]
    pub end: f64,

    // Geometry
    #[serde(default)]
    pub width: Option<f64>, // Defaults to radius
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_start_angle")]
    pub start_angle: f64, // Where the progress arc begins
    #[serde(default = "default_border_width")]
    pub border_width: f64, // Ring inset from the edge; the stroke width comes out of it
    #[serde(default = "default_ring_width")]
    pub inner_width: f64,
    #[serde(default = "default_ring_width")]
    pub outer_width: f64,
    #[serde(default = "default_outer_length")]
    pub outer_length: f64, // Pushes the outer ring out, thinning the stroke

    // Colors and label
    #[serde(default)]
    pub bg: Option<Color>, // Absent: ask the host, then fall back
    #[serde(default = "default_surface")]
    pub fg: Color, // Center disc fill
    #[serde(default = "default_surface")]
    pub bar_color: Color, // The faint full ring under the progress arc
    #[serde(default = "default_progress_color")]
    pub progress_color: Color,
    #[serde(default = "default_ring_color")]
    pub inner_color: Color,
    #[serde(default = "default_ring_color")]
    pub outer_color: Color,
    #[serde(default = "default_text")]
    pub text: String, // Label suffix; empty disables the label
    #[serde(default = "default_black")]
    pub text_color: Color,
    #[serde(default)]
    pub text_font: Option<FontSpec>,

    // Behavior
    #[serde(default)]
    pub integer: bool,
    #[serde(default = "default_steps")]
    pub steps: f64, // Value units per wheel tick
    #[serde(default)]
    pub state: WidgetState,
}

fn default_start() -> f64 {
    0.0
}

fn default_end() -> f64 {
    100.0
}

fn default_radius() -> f64 {
    200.0
}

fn default_start_angle() -> f64 {
    0.0
}

fn default_border_width() -> f64 {
    40.0
}

fn default_ring_width() -> f64 {
    10.0
}

fn default_outer_length() -> f64 {
    0.0
}

fn default_surface() -> Color {
    Color::from_rgba8(240, 240, 240, 255)
}

fn default_progress_color() -> Color {
    Color::from_rgba8(153, 153, 153, 255)
}

fn default_ring_color() -> Color {
    Color::from_rgba8(204, 204, 204, 255)
}

fn default_text() -> String {
    "%".to_string()
}

fn default_black() -> Color {
    Color::new(0.0, 0.0, 0.0, 1.0)
}

fn default_steps() -> f64 {
    5.0
}

impl Default for KnobConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            width: None,
            height: None,
            radius: default_radius(),
            start_angle: default_start_angle(),
            border_width: default_border_width(),
            inner_width: default_ring_width(),
            outer_width: default_ring_width(),
            outer_length: default_outer_length(),
            bg: None,
            fg: default_surface(),
            bar_color: default_surface(),
            progress_color: default_progress_color(),
            inner_color: default_ring_color(),
            outer_color: default_ring_color(),
            text: default_text(),
            text_color: default_black(),
            text_font: None,
            integer: false,
            steps: default_steps(),
            state: WidgetState::default(),
        }
    }
}

/// Partial-configuration patch for [`ScrollKnob`]. Absent fields keep
/// their current value; the whole patch is validated before anything
/// applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnobOptions {
    pub state: Option<WidgetState>,
    pub text: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub bg: Option<Color>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub bar_color: Option<Color>,
    pub progress_color: Option<Color>,
    pub fg: Option<Color>,
    pub inner_color: Option<Color>,
    pub outer_color: Option<Color>,
    pub steps: Option<f64>,
    pub text_color: Option<Color>,
    pub integer: Option<bool>,
}

/// Wheel-driven progress ring with a centered value readout.
pub struct ScrollKnob {
    engine: GaugeInteraction,
    scene: Scene,
    state: WidgetState,
    text_suffix: String,
    /// Configured tick size in value units, before the span cap.
    step_quantum: f64,
    progress_id: ItemId,
    label_id: Option<ItemId>,
    command: Option<Command>,
}

impl ScrollKnob {
    /// Build a knob with no host background to consult.
    pub fn new(config: KnobConfig) -> Result<Self, ConfigError> {
        Self::build(config, None)
    }

    /// Build a knob hosted in a container that knows its effective
    /// background.
    pub fn hosted(config: KnobConfig, host: &dyn BackgroundProvider) -> Result<Self, ConfigError> {
        Self::build(config, Some(host))
    }

    fn build(config: KnobConfig, host: Option<&dyn BackgroundProvider>) -> Result<Self, ConfigError> {
        let range = ValueRange::new(config.start, config.end)?;
        if config.radius <= 0.0 {
            return Err(ConfigError::invalid("radius", "must be positive"));
        }
        if config.outer_length > config.border_width {
            return Err(ConfigError::invalid(
                "outer_length",
                "must not exceed border_width",
            ));
        }

        let width = config.width.unwrap_or(config.radius);
        let height = config.height.unwrap_or(config.radius);
        let center = (width / 2.0, height / 2.0);
        let stroke = config.border_width - config.outer_length;
        let half = stroke / 2.0;
        let ring_rx = (width - 2.0 * config.border_width) / 2.0;
        let ring_ry = (height - 2.0 * config.border_width) / 2.0;
        // Arc items are circular; a non-square knob keeps the tighter fit
        let ring_radius = ring_rx.min(ring_ry);

        let mut engine = GaugeInteraction::new(
            range,
            Sweep::FullCircle,
            InteractionPolicy {
                drag: DragMode::Relative,
                boundary: BoundaryMode::Clamp,
            },
            center,
        );
        engine.set_steps(effective_steps(config.steps, range));
        engine.set_integer(config.integer);

        let mut scene = Scene::new(width, height, resolve_background(config.bg, host));
        scene.add(
            "bar",
            Shape::Arc {
                center,
                radius: ring_radius,
                start_deg: config.start_angle,
                extent_deg: 359.0,
            },
            Paint::stroked(config.bar_color, stroke),
        );
        let progress_id = scene.add(
            "progress",
            Shape::Arc {
                center,
                radius: ring_radius,
                start_deg: config.start_angle,
                extent_deg: 0.0,
            },
            Paint::stroked(config.progress_color, stroke),
        );
        scene.add(
            "outer",
            Shape::Oval {
                center,
                rx: ring_rx + half + config.outer_length,
                ry: ring_ry + half + config.outer_length,
            },
            Paint::stroked(config.outer_color, config.outer_width.min(config.border_width)),
        );
        scene.add(
            "inner",
            Shape::Oval {
                center,
                rx: ring_rx - half,
                ry: ring_ry - half,
            },
            Paint {
                fill: Some(config.fg),
                outline: Some(config.inner_color),
                width: config.inner_width.min(config.border_width),
                ..Paint::default()
            },
        );
        let label_id = if config.text.is_empty() {
            None
        } else {
            Some(scene.add(
                "value",
                Shape::Text {
                    at: center,
                    content: String::new(),
                },
                Paint {
                    fill: Some(config.text_color),
                    font: config.text_font.clone(),
                    ..Paint::default()
                },
            ))
        };

        let mut knob = Self {
            engine,
            scene,
            state: config.state,
            text_suffix: config.text,
            step_quantum: config.steps,
            progress_id,
            label_id,
            command: None,
        };
        knob.refresh();
        Ok(knob)
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

    /// Apply an untyped option map; see [`KNOB_OPTION_KEYS`]. Any
    /// unrecognized key rejects the whole patch before anything applies.
    pub fn configure_value(&mut self, patch: Value) -> Result<(), ConfigError> {
        let options: KnobOptions = parse_patch(patch, KNOB_OPTION_KEYS)?;
        self.configure(options)
    }

    fn display_value(&self) -> f64 {
        let rounded = round2(self.engine.value());
        if self.engine.integer() {
            rounded.trunc()
        } else {
            rounded
        }
    }

    fn fire_command(&mut self) {
        if let Some(command) = self.command.as_mut() {
            command();
        }
    }

    fn progress_extent(&self) -> f64 {
        let extent = 360.0 * self.engine.range().position(self.engine.value());
        // A full 360 degree arc item renders as empty; show 359 instead
        if extent >= 360.0 {
            359.0
        } else {
            extent
        }
    }

    fn refresh(&mut self) {
        let extent = self.progress_extent();
        self.scene.set_extent(self.progress_id, extent);
        self.refresh_label();
    }

    fn refresh_label(&mut self) {
        if let Some(id) = self.label_id {
            let content = format!("{}{}", self.display_value(), self.text_suffix);
            self.scene.set_text(id, &content);
        }
    }
}

impl Gauge for ScrollKnob {
    type Options = KnobOptions;

    fn get(&self) -> f64 {
        self.display_value()
    }

    fn set(&mut self, value: f64) {
        if self.engine.set(value) {
            self.refresh();
            self.fire_command();
        }
    }

    fn configure(&mut self, options: KnobOptions) -> Result<(), ConfigError> {
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

        let value_before = self.engine.value();
        let mut reposition = false;
        let mut relabel = false;

        if let Some(state) = options.state {
            self.state = state;
        }
        if let Some(text) = options.text {
            self.text_suffix = text;
            relabel = true;
        }
        if let Some(range) = range {
            self.engine.set_range(range);
            self.engine.set_steps(effective_steps(self.step_quantum, range));
            reposition = true;
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
        if let Some(color) = options.bar_color {
            self.scene.set_outline("bar", color);
        }
        if let Some(color) = options.progress_color {
            self.scene.set_outline("progress", color);
        }
        if let Some(color) = options.fg {
            self.scene.set_fill("inner", color);
        }
        if let Some(color) = options.inner_color {
            self.scene.set_outline("inner", color);
        }
        if let Some(color) = options.outer_color {
            self.scene.set_outline("outer", color);
        }
        if let Some(steps) = options.steps {
            self.step_quantum = steps;
            self.engine
                .set_steps(effective_steps(steps, self.engine.range()));
        }
        if let Some(color) = options.text_color {
            if let Some(id) = self.label_id {
                self.scene.set_fill(id, color);
            }
        }
        if let Some(integer) = options.integer {
            self.engine.set_integer(integer);
            relabel = true;
        }

        if reposition {
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
        // Scroll-only: the ring has no draggable indicator
        let changed = match event {
            InputEvent::Scroll { direction } => self.engine.scroll(direction),
            _ => false,
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

/// Tick size actually applied: magnitude of the configured quantum,
/// capped at the span so one tick never overshoots both ends.
fn effective_steps(raw: f64, range: ValueRange) -> f64 {
    raw.abs().min(range.span().abs())
}
