//! The gauge widget family: Dial, Meter and ScrollKnob.
//!
//! Each widget owns a retained [`Scene`](dialkit_core::Scene), an
//! interaction engine parameterized with its drag/boundary policy, and the
//! paint configuration of its items. Embedders construct a widget from its
//! config struct, feed pointer and wheel input through
//! [`Gauge::handle_event`](dialkit_core::Gauge::handle_event), and repaint
//! from the scene whenever its revision advances.

use dialkit_core::{check_known_keys, ConfigError};
use serde::de::DeserializeOwned;
use serde_json::Value;

mod dial;
mod meter;
mod scroll_knob;

pub use dial::{Dial, DialConfig, DialOptions};
pub use meter::{Meter, MeterConfig, MeterOptions};
pub use scroll_knob::{KnobConfig, KnobOptions, ScrollKnob};

/// Change callback invoked after every committed value change. The
/// callback takes no arguments; it reads the new value back through the
/// widget's `get`.
pub type Command = Box<dyn FnMut()>;

/// Pointer slack for indicator hit testing, in scene units.
pub(crate) const HIT_TOLERANCE: f64 = 2.0;

/// Round to the two decimals the value labels display.
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Parse an untyped option map into a typed options struct. Every key is
/// checked against `known` first, so an unrecognized key fails before any
/// value is even parsed and the whole patch is rejected.
pub(crate) fn parse_patch<T: DeserializeOwned>(
    patch: Value,
    known: &[&str],
) -> Result<T, ConfigError> {
    match &patch {
        Value::Object(map) => check_known_keys(map, known)?,
        _ => return Err(ConfigError::invalid("options", "expected a JSON object")),
    }
    serde_json::from_value(patch).map_err(|err| ConfigError::invalid("options", err.to_string()))
}
