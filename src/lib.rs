//! dialkit: headless circular gauge widgets.
//!
//! Three gauge families built on one interaction engine:
//! - [`Dial`]: full-circle needle with gradient-colored unit lines,
//!   absolute drags and wraparound wheel ticks
//! - [`Meter`]: arc scale with a pivoting needle, relative drags and
//!   clamped ticks
//! - [`ScrollKnob`]: wheel-only progress ring with a value readout
//!
//! Widgets hold no toolkit handles. Each one maintains a retained
//! [`Scene`] of shapes; an embedder renders the scene however it likes
//! and feeds [`InputEvent`]s back in. The scene's revision counter tells
//! the embedder when a redraw is due.
//!
//! ```
//! use dialkit::{Dial, DialConfig, Gauge, InputEvent, ScrollDirection};
//!
//! let mut dial = Dial::new(DialConfig::default()).unwrap();
//! dial.set(50.0);
//! dial.handle_event(InputEvent::Scroll {
//!     direction: ScrollDirection::Up,
//! });
//! assert_eq!(dial.get(), 51.0);
//! ```

pub mod palette;
pub mod widgets;

pub use palette::{Palette, SEGMENT_COUNT};
pub use widgets::{
    Command, Dial, DialConfig, DialOptions, KnobConfig, KnobOptions, Meter, MeterConfig,
    MeterOptions, ScrollKnob,
};

// The engine and scene vocabulary, re-exported so embedders need only
// this crate
pub use dialkit_core::{
    check_known_keys, normalize_degrees, pointer_angle, polar_offset, resolve_background,
    BackgroundProvider, BoundaryMode, ConfigError, DragMode, DragState, FontSpec, Gauge,
    GaugeInteraction, InputEvent, InteractionPolicy, Item, ItemId, ItemSelector, Paint, Scene,
    ScrollDirection, Shape, Sweep, ValueRange, WidgetState, DEFAULT_BACKGROUND,
};
pub use dialkit_types::{lerp, sample_between, sample_stops, Color, ColorStop, ParseColorError};
