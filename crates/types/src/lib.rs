//! dialkit-types: Shared data types for the dialkit gauge widgets.
//!
//! This crate contains pure value types (colors, color stops, gradient
//! sampling) shared across all dialkit crates. It has no widget or scene
//! dependencies, making it suitable as a foundation layer.

pub mod color;
pub mod gradient;

// Re-export commonly used types at the crate root for convenience
pub use color::{Color, ParseColorError};
pub use gradient::{lerp, sample_between, sample_stops, ColorStop};
