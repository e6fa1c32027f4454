//! dialkit-core: interaction engine, scene model and angle math for the
//! dialkit gauge widgets.
//!
//! Everything in this crate is toolkit-agnostic: the widgets in the root
//! crate assemble these pieces, and an embedder renders the resulting
//! scenes and feeds input events back in.

pub mod angle;
pub mod background;
pub mod canvas;
pub mod error;
pub mod events;
pub mod gauge;
pub mod interaction;
pub mod range;

pub use angle::{normalize_degrees, pointer_angle, polar_offset, signed_pointer_angle, Sweep};
pub use background::{resolve as resolve_background, BackgroundProvider, DEFAULT_BACKGROUND};
pub use canvas::{FontSpec, Item, ItemId, ItemSelector, Paint, Scene, Shape};
pub use error::ConfigError;
pub use events::{InputEvent, ScrollDirection};
pub use gauge::{check_known_keys, Gauge, WidgetState};
pub use interaction::{BoundaryMode, DragMode, DragState, GaugeInteraction, InteractionPolicy};
pub use range::ValueRange;

// Re-export the color type used in scene and background signatures
pub use dialkit_types::Color;
