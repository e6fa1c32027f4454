//! The common operation surface of the gauge widgets.

use crate::canvas::Scene;
use crate::error::ConfigError;
use crate::events::InputEvent;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Whether a gauge responds to pointer and wheel input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WidgetState {
    #[default]
    Normal,
    Disabled,
}

impl WidgetState {
    pub fn interactive(&self) -> bool {
        matches!(self, WidgetState::Normal)
    }
}

/// Operations every gauge exposes.
///
/// `Options` is the widget's typed partial-configuration patch. A patch is
/// validated as a whole before any field is applied, so a failed
/// `configure` leaves the gauge untouched.
pub trait Gauge {
    type Options;

    /// Current value, rounded the way the widget displays it.
    fn get(&self) -> f64;

    /// Clamp `value` into the range, reposition the indicator and refresh
    /// dependent visuals. Fires the change callback when the stored value
    /// actually moved. Works in any state, including disabled.
    fn set(&mut self, value: f64);

    /// Apply a typed partial-configuration patch atomically.
    fn configure(&mut self, options: Self::Options) -> Result<(), ConfigError>;

    /// Feed one input event. Returns whether the value changed. Disabled
    /// gauges ignore all events.
    fn handle_event(&mut self, event: InputEvent) -> bool;

    /// The retained scene an embedder renders from.
    fn scene(&self) -> &Scene;
}

/// Validate the keys of an untyped option map against the widget's known
/// option names, reporting the first unknown key in supplied order. Runs
/// before any parsing or application, keeping untyped configuration
/// all-or-nothing.
pub fn check_known_keys(map: &Map<String, Value>, known: &[&str]) -> Result<(), ConfigError> {
    for key in map.keys() {
        if !known.contains(&key.as_str()) {
            return Err(ConfigError::UnknownOption(key.clone()));
        }
    }
    Ok(())
}
