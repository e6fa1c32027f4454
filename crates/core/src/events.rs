//! Platform-agnostic input events fed into gauges by the embedder.
//!
//! The embedder owns the real windowing toolkit; it translates whatever
//! pointer and wheel events that toolkit produces into these and forwards
//! them to the widget's `handle_event`.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// Pointer and wheel input, with coordinates in scene space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputEvent {
    PointerPressed { x: f64, y: f64 },
    PointerMoved { x: f64, y: f64 },
    PointerReleased { x: f64, y: f64 },
    Scroll { direction: ScrollDirection },
}

/// Wheel direction in value terms: `Up` steps toward `end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollDirection {
    Up,
    Down,
}

impl ScrollDirection {
    /// Interpret a raw wheel delta, positive meaning up. Zero deltas carry
    /// no direction.
    pub fn from_delta(delta: i32) -> Option<Self> {
        match delta.cmp(&0) {
            Ordering::Greater => Some(ScrollDirection::Up),
            Ordering::Less => Some(ScrollDirection::Down),
            Ordering::Equal => None,
        }
    }
}
