//! Typed errors for gauge construction and reconfiguration.

use thiserror::Error;

/// Errors raised while constructing or reconfiguring a gauge.
///
/// Configuration patches are validated as a whole before anything is
/// applied, so any of these means the gauge is unchanged.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    /// An untyped option map carried a key no option matches. Reports the
    /// first offending key.
    #[error("unknown option: {0}")]
    UnknownOption(String),

    /// `start` and `end` must span a nonzero interval; angle conversion
    /// divides by the span.
    #[error("value range is empty: start and end are both {0}")]
    EmptyRange(f64),

    /// A recognized option carried a value the gauge cannot use.
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}

impl ConfigError {
    pub fn invalid(key: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            key,
            reason: reason.into(),
        }
    }
}
