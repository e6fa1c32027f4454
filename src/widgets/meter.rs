//! Meter: an arc gauge with a rotating triangular needle.
//!
//! A round face carries minor and major scale ticks, numeric scale labels
//! and a thin scale arc; the needle pivots on a center axis across the
//! sweep from `start_angle` over `end_angle` degrees. Dragging rotates the
//! needle one scroll step per motion event in the direction of travel, and
//! wheel ticks do the same; both clamp at the range ends. Runs of minor
//! ticks can be recolored to mark zones on the scale.

use crate::widgets::{parse_patch, round2, Command, HIT_TOLERANCE};
use dialkit_core::{
    polar_offset, resolve_background, BackgroundProvider, BoundaryMode, ConfigError, DragMode,
    FontSpec, Gauge, GaugeInteraction, InputEvent, InteractionPolicy, ItemId, Paint, Scene, Shape,
    Sweep, ValueRange, WidgetState,
};
use dialkit_types::Color;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Option names `configure_value` accepts for a meter.
pub const METER_OPTION_KEYS: &[&str] = &[
    "text",
    "start",
    "end",
    "bg",
    "width",
    "height",
    "scale_color",
    "fg",
    "text_color",
    "needle_color",
    "border_color",
    "axis_color",
    "scroll_steps",
    "scroll",
    "integer",
    "state",
];

/// Upper bound on scale lines a single face will draw.
const MAX_SCALE_LINES: f64 = 10_000.0;

/// Construction parameters for [`Meter`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeterConfig {
    // Value range
    #[serde(default = "default_start")]
    pub start: f64,
    #[serde(default = "default_end")]
    pub end: f64,

    // Geometry
    #[serde(default)]
    pub width: Option<f64>, // Defaults to radius + border_width
    #[serde(default)]
    pub height: Option<f64>,
    #[serde(default = "default_radius")]
    pub radius: f64,
    #[serde(default = "default_border_width")]
    pub border_width: f64,

    // Sweep: the scale runs from start_angle over end_angle degrees,
    // negative extents sweeping clockwise
    #[serde(default = "default_start_angle")]
    pub start_angle: f64,
    #[serde(default = "default_end_angle")]
    pub end_angle: f64,

    // Scale divisions, in value units
    #[serde(default = "default_major_divisions")]
    pub major_divisions: f64,
    #[serde(default = "default_minor_divisions")]
    pub minor_divisions: f64, // Zero disables the minor scale

    // Colors and label
    #[serde(default)]
    pub bg: Option<Color>, // Absent: ask the host, then fall back
    #[serde(default = "default_fg")]
    pub fg: Color, // Face fill
    #[serde(default = "default_text")]
    pub text: String, // Label suffix; empty disables the label
    #[serde(default = "default_black")]
    pub text_color: Color,
    #[serde(default)]
    pub text_font: Option<FontSpec>,
    #[serde(default = "default_black")]
    pub scale_color: Color,
    #[serde(default = "default_needle_color")]
    pub needle_color: Color,
    #[serde(default = "default_border_color")]
    pub border_color: Color,
    #[serde(default = "default_axis_color")]
    pub axis_color: Color,

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

fn default_radius() -> f64 {
    250.0
}

fn default_border_width() -> f64 {
    1.0
}

fn default_start_angle() -> f64 {
    240.0
}

fn default_end_angle() -> f64 {
    -295.0
}

fn default_major_divisions() -> f64 {
    10.0
}

fn default_minor_divisions() -> f64 {
    1.0
}

fn default_fg() -> Color {
    Color::new(1.0, 1.0, 1.0, 1.0)
}

fn default_text() -> String {
    " ".to_string()
}

fn default_black() -> Color {
    Color::new(0.0, 0.0, 0.0, 1.0)
}

fn default_needle_color() -> Color {
    Color::from_rgba8(77, 77, 77, 255)
}

fn default_border_color() -> Color {
    Color::from_rgba8(102, 102, 102, 255)
}

fn default_axis_color() -> Color {
    Color::from_rgba8(204, 204, 204, 255)
}

fn default_true() -> bool {
    true
}

fn default_scroll_steps() -> f64 {
    1.0
}

impl Default for MeterConfig {
    fn default() -> Self {
        Self {
            start: default_start(),
            end: default_end(),
            width: None,
            height: None,
            radius: default_radius(),
            border_width: default_border_width(),
            start_angle: default_start_angle(),
            end_angle: default_end_angle(),
            major_divisions: default_major_divisions(),
            minor_divisions: default_minor_divisions(),
            bg: None,
            fg: default_fg(),
            text: default_text(),
            text_color: default_black(),
            text_font: None,
            scale_color: default_black(),
            needle_color: default_needle_color(),
            border_color: default_border_color(),
            axis_color: default_axis_color(),
            integer: false,
            scroll: default_true(),
            scroll_steps: default_scroll_steps(),
            state: WidgetState::default(),
        }
    }
}

/// Partial-configuration patch for [`Meter`]. Absent fields keep their
/// current value; the whole patch is validated before anything applies.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeterOptions {
    pub text: Option<String>,
    pub start: Option<f64>,
    pub end: Option<f64>,
    pub bg: Option<Color>,
    pub width: Option<f64>,
    pub height: Option<f64>,
    pub scale_color: Option<Color>,
    pub fg: Option<Color>,
    pub text_color: Option<Color>,
    pub needle_color: Option<Color>,
    pub border_color: Option<Color>,
    pub axis_color: Option<Color>,
    pub scroll_steps: Option<f64>,
    pub scroll: Option<bool>,
    pub integer: Option<bool>,
    pub state: Option<WidgetState>,
}

/// Arc gauge with a scale, a pivoting needle and markable minor ticks.
pub struct Meter {
    engine: GaugeInteraction,
    scene: Scene,
    state: WidgetState,
    scroll_enabled: bool,
    text_suffix: String,
    center: (f64, f64),
    /// Needle polygon at angle zero; rotated into place on refresh.
    base_points: [(f64, f64); 3],
    needle_id: ItemId,
    minor_ids: Vec<ItemId>,
    label_id: Option<ItemId>,
    command: Option<Command>,
}

impl Meter {
    /// Build a meter with no host background to consult.
    pub fn new(config: MeterConfig) -> Result<Self, ConfigError> {
        Self::build(config, None)
    }

    /// Build a meter hosted in a container that knows its effective
    /// background.
    pub fn hosted(config: MeterConfig, host: &dyn BackgroundProvider) -> Result<Self, ConfigError> {
        Self::build(config, Some(host))
    }

    fn build(config: MeterConfig, host: Option<&dyn BackgroundProvider>) -> Result<Self, ConfigError> {
        let range = ValueRange::new(config.start, config.end)?;
        if config.radius <= 0.0 {
            return Err(ConfigError::invalid("radius", "must be positive"));
        }
        if config.major_divisions <= 0.0 {
            return Err(ConfigError::invalid("major_divisions", "must be positive"));
        }
        if config.minor_divisions < 0.0 {
            return Err(ConfigError::invalid("minor_divisions", "must not be negative"));
        }
        let absolute = range.span().abs();
        if absolute / config.major_divisions > MAX_SCALE_LINES {
            return Err(ConfigError::invalid(
                "major_divisions",
                "too many scale lines for the span",
            ));
        }
        if config.minor_divisions > 0.0 && absolute / config.minor_divisions > MAX_SCALE_LINES {
            return Err(ConfigError::invalid(
                "minor_divisions",
                "too many scale lines for the span",
            ));
        }

        let width = config.width.unwrap_or(config.radius + config.border_width);
        let height = config.height.unwrap_or(config.radius + config.border_width);
        // The scale keeps its own center even under an explicit size
        let center_coord = (config.radius + config.border_width) / 2.0;
        let center = (center_coord, center_coord);
        let scale_radius = (config.radius - config.border_width) / 2.0;
        let arc_pos = scale_radius / 3.0;
        let tick_radius = scale_radius - arc_pos;
        let axis_radius = config.radius / 25.0;

        let mut engine = GaugeInteraction::new(
            range,
            Sweep::Arc {
                start_deg: config.start_angle,
                extent_deg: config.end_angle,
            },
            InteractionPolicy {
                drag: DragMode::Relative,
                boundary: BoundaryMode::Clamp,
            },
            center,
        );
        engine.set_steps(config.scroll_steps);
        engine.set_integer(config.integer);

        let mut scene = Scene::new(width, height, resolve_background(config.bg, host));
        scene.add(
            "face",
            Shape::Oval {
                center,
                rx: scale_radius,
                ry: scale_radius,
            },
            Paint {
                fill: Some(config.fg),
                outline: Some(config.border_color),
                width: config.border_width,
                ..Paint::default()
            },
        );

        let mut minor_ids = Vec::new();
        if config.minor_divisions != 0.0 {
            let lines = (absolute / config.minor_divisions) as usize + 1;
            for n in 0..lines {
                let angle = config.start_angle
                    + n as f64 * config.end_angle * config.minor_divisions / absolute;
                minor_ids.push(scene.add(
                    "min_scale",
                    Shape::Line {
                        from: polar_offset(center, tick_radius, angle),
                        to: polar_offset(center, tick_radius + arc_pos / 5.0, angle),
                    },
                    Paint::filled(config.scale_color),
                ));
            }
        }

        // On a full-circle sweep the closing major tick lands on the first
        // one and is skipped
        let lines = (absolute / config.major_divisions) as usize
            + usize::from(config.end_angle.abs() != 360.0);
        let text_radius = scale_radius - arc_pos / 2.5;
        let scale_font = FontSpec::bold((arc_pos / 5.0).trunc());
        for n in 0..lines {
            let angle = config.start_angle
                + n as f64 * config.end_angle * config.major_divisions / absolute;
            let value = config.start + n as f64 * config.major_divisions * range.direction();
            scene.add(
                "major_scale",
                Shape::Line {
                    from: polar_offset(center, tick_radius, angle),
                    to: polar_offset(center, tick_radius + arc_pos / 3.0, angle),
                },
                Paint {
                    fill: Some(config.scale_color),
                    width: 3.0,
                    ..Paint::default()
                },
            );
            scene.add(
                "scale_text",
                Shape::Text {
                    at: polar_offset(center, text_radius, angle),
                    content: value.to_string(),
                },
                Paint {
                    fill: Some(config.scale_color),
                    font: Some(scale_font.clone()),
                    ..Paint::default()
                },
            );
        }

        let ring_shape = if config.end_angle.abs() == 360.0 {
            Shape::Oval {
                center,
                rx: tick_radius,
                ry: tick_radius,
            }
        } else {
            Shape::Arc {
                center,
                radius: tick_radius,
                start_deg: config.start_angle,
                extent_deg: config.end_angle,
            }
        };
        scene.add("arc", ring_shape, Paint::stroked(config.scale_color, 2.0));

        let label_id = if config.text.is_empty() {
            None
        } else {
            Some(scene.add(
                "text",
                Shape::Text {
                    at: (center.0, center.1 + arc_pos * 4.0 / 3.0),
                    content: String::new(),
                },
                Paint {
                    fill: Some(config.text_color),
                    font: config.text_font.clone(),
                    ..Paint::default()
                },
            ))
        };

        let base_points = [
            (center.0 + 2.5 * arc_pos, center.1),
            (center.0, center.1 + 0.75 * axis_radius),
            (center.0, center.1 - 0.75 * axis_radius),
        ];
        let needle_id = scene.add(
            "needle",
            Shape::Polygon {
                points: base_points.to_vec(),
            },
            Paint::filled(config.needle_color),
        );
        scene.add(
            "axis",
            Shape::Oval {
                center,
                rx: axis_radius,
                ry: axis_radius,
            },
            Paint {
                fill: Some(config.axis_color),
                outline: Some(config.border_color),
                ..Paint::default()
            },
        );

        let mut meter = Self {
            engine,
            scene,
            state: config.state,
            scroll_enabled: config.scroll,
            text_suffix: config.text,
            center,
            base_points,
            needle_id,
            minor_ids,
            label_id,
            command: None,
        };
        meter.refresh();
        Ok(meter)
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

    /// Recolor the minor scale lines at indices `from..to` and widen them
    /// into a marker band. Later marks simply overwrite earlier ones; the
    /// original tick styling is not restored.
    pub fn set_mark(&mut self, from: usize, to: usize, color: Color) {
        let end = to.min(self.minor_ids.len());
        let begin = from.min(end);
        for id in &self.minor_ids[begin..end] {
            self.scene.set_fill(*id, color);
            self.scene.set_width(*id, 6.0);
        }
    }

    /// Apply an untyped option map; see [`METER_OPTION_KEYS`]. Any
    /// unrecognized key rejects the whole patch before anything applies.
    pub fn configure_value(&mut self, patch: Value) -> Result<(), ConfigError> {
        let options: MeterOptions = parse_patch(patch, METER_OPTION_KEYS)?;
        self.configure(options)
    }

    fn display_value(&self) -> f64 {
        if self.engine.integer() {
            self.engine.value().trunc()
        } else {
            round2(self.engine.value())
        }
    }

    fn fire_command(&mut self) {
        if let Some(command) = self.command.as_mut() {
            command();
        }
    }

    fn refresh(&mut self) {
        let points = rotate_about(self.center, &self.base_points, self.engine.angle());
        self.scene.set_shape(self.needle_id, Shape::Polygon { points });
        self.refresh_label();
    }

    fn refresh_label(&mut self) {
        if let Some(id) = self.label_id {
            let content = format!("{}{}", self.display_value(), self.text_suffix);
            self.scene.set_text(id, &content);
        }
    }
}

impl Gauge for Meter {
    type Options = MeterOptions;

    fn get(&self) -> f64 {
        self.display_value()
    }

    fn set(&mut self, value: f64) {
        if self.engine.set(value) {
            self.refresh();
            self.fire_command();
        }
    }

    fn configure(&mut self, options: MeterOptions) -> Result<(), ConfigError> {
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

        if let Some(text) = options.text {
            self.text_suffix = text;
            relabel = true;
        }
        if let Some(range) = range {
            // The painted scale keeps its construction-time numbering; only
            // the needle mapping changes
            self.engine.set_range(range);
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
        if let Some(color) = options.scale_color {
            self.scene.set_fill("min_scale", color);
            self.scene.set_fill("major_scale", color);
            self.scene.set_fill("scale_text", color);
            self.scene.set_outline("arc", color);
        }
        if let Some(color) = options.fg {
            self.scene.set_fill("face", color);
        }
        if let Some(color) = options.text_color {
            if let Some(id) = self.label_id {
                self.scene.set_fill(id, color);
            }
        }
        if let Some(color) = options.needle_color {
            self.scene.set_fill(self.needle_id, color);
        }
        if let Some(color) = options.border_color {
            self.scene.set_outline("face", color);
        }
        if let Some(color) = options.axis_color {
            self.scene.set_fill("axis", color);
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
        if let Some(state) = options.state {
            self.state = state;
            if !state.interactive() {
                self.engine.release();
            }
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

/// Rotate `points` around `center` by `angle_deg`, screen-y down.
fn rotate_about(center: (f64, f64), points: &[(f64, f64)], angle_deg: f64) -> Vec<(f64, f64)> {
    let (sin, cos) = angle_deg.to_radians().sin_cos();
    points
        .iter()
        .map(|&(x, y)| {
            let dx = x - center.0;
            let dy = y - center.1;
            (center.0 + dx * cos + dy * sin, center.1 + dy * cos - dx * sin)
        })
        .collect()
}
