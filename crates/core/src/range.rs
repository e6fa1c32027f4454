//! Scalar value ranges with reversed-direction support.

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

/// Closed scalar interval from `start` to `end`.
///
/// `start > end` is a valid, reversed range: the gauge reading runs
/// backwards. `start == end` is rejected because angle conversion divides
/// by the span.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    pub start: f64,
    pub end: f64,
}

impl ValueRange {
    pub fn new(start: f64, end: f64) -> Result<Self, ConfigError> {
        if !start.is_finite() {
            return Err(ConfigError::invalid("start", "must be finite"));
        }
        if !end.is_finite() {
            return Err(ConfigError::invalid("end", "must be finite"));
        }
        if start == end {
            return Err(ConfigError::EmptyRange(start));
        }
        Ok(Self { start, end })
    }

    /// Signed span `end - start`.
    pub fn span(&self) -> f64 {
        self.end - self.start
    }

    pub fn min(&self) -> f64 {
        self.start.min(self.end)
    }

    pub fn max(&self) -> f64 {
        self.start.max(self.end)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min(), self.max())
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min() && value <= self.max()
    }

    /// `1.0` for ascending ranges, `-1.0` for reversed ones.
    pub fn direction(&self) -> f64 {
        self.span().signum()
    }

    /// Normalized position of `value` in the range: 0 at `start`, 1 at
    /// `end`, clamped.
    pub fn position(&self, value: f64) -> f64 {
        (self.clamp(value) - self.start) / self.span()
    }

    /// Value at normalized position `t` (clamped to `0..=1`).
    pub fn at(&self, t: f64) -> f64 {
        self.start + self.span() * t.clamp(0.0, 1.0)
    }
}
