//! Gradient palettes for segment colorization.
//!
//! A palette is one color per 10 degree unit segment, 36 in total, ordered
//! from the start endpoint around to the full circle. The common aesthetic
//! presets are built from closed-form RGB channel ramps; anything else
//! falls back to plain interpolation between the two parsed endpoint
//! colors.

use dialkit_core::ConfigError;
use dialkit_types::{sample_between, Color, ParseColorError};
use log::debug;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Unit segments per full circle, one per 10 degrees.
pub const SEGMENT_COUNT: usize = 36;

/// One RGB channel of a preset recipe: pinned to a primary level, or
/// ramped across the segments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Channel {
    Held(u8),
    Ramp,
}

impl Channel {
    fn from_code(code: u8) -> Self {
        match code {
            0 | 255 => Channel::Held(code),
            _ => Channel::Ramp,
        }
    }

    fn level(&self, index: usize, reverse: bool) -> u8 {
        match self {
            Channel::Held(level) => *level,
            Channel::Ramp => {
                let ramp = (index * 255 / (SEGMENT_COUNT - 1)) as u8;
                if reverse {
                    ramp
                } else {
                    255 - ramp
                }
            }
        }
    }
}

/// Closed-form channel ramp for one preset gradient pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Recipe {
    r: Channel,
    g: Channel,
    b: Channel,
    reverse: bool,
}

impl Recipe {
    fn color(&self, index: usize) -> Color {
        Color::from_rgba8(
            self.r.level(index, self.reverse),
            self.g.level(index, self.reverse),
            self.b.level(index, self.reverse),
            255,
        )
    }
}

/// Channel codes per named pair: 0 and 255 hold that level, 1 ramps.
#[rustfmt::skip]
static PRESET_ROWS: &[((&str, &str), (u8, u8, u8, bool))] = &[
    (("yellow", "red"),    (255, 1, 0, false)),
    (("yellow", "green"),  (1, 255, 0, false)),
    (("pink", "blue"),     (1, 0, 255, false)),
    (("pink", "red"),      (255, 0, 1, false)),
    (("cyan", "green"),    (0, 255, 1, false)),
    (("cyan", "blue"),     (0, 1, 255, false)),
    (("red", "yellow"),    (255, 1, 0, true)),
    (("red", "pink"),      (255, 0, 1, true)),
    (("blue", "cyan"),     (0, 1, 255, true)),
    (("blue", "pink"),     (1, 0, 255, true)),
    (("green", "yellow"),  (1, 255, 0, true)),
    (("green", "cyan"),    (0, 255, 1, true)),

    (("white", "white"),   (255, 255, 255, false)),
    (("white", "red"),     (255, 1, 1, false)),
    (("white", "green"),   (1, 255, 1, false)),
    (("white", "blue"),    (1, 1, 255, false)),
    (("red", "white"),     (255, 1, 1, true)),
    (("green", "white"),   (1, 255, 1, true)),
    (("blue", "white"),    (1, 1, 255, true)),
    (("yellow", "white"),  (255, 255, 1, true)),
    (("pink", "white"),    (255, 1, 255, true)),
    (("cyan", "white"),    (1, 255, 255, true)),
    (("white", "yellow"),  (255, 255, 1, false)),
    (("white", "pink"),    (255, 1, 255, false)),
    (("white", "cyan"),    (1, 255, 255, false)),

    (("black", "black"),   (0, 0, 0, false)),
    (("black", "red"),     (1, 0, 0, true)),
    (("black", "green"),   (0, 1, 0, true)),
    (("black", "blue"),    (0, 0, 1, true)),
    (("red", "black"),     (1, 0, 0, false)),
    (("green", "black"),   (0, 1, 0, false)),
    (("blue", "black"),    (0, 0, 1, false)),
    (("yellow", "black"),  (1, 1, 0, false)),
    (("pink", "black"),    (1, 0, 1, false)),
    (("cyan", "black"),    (0, 1, 1, false)),
    (("black", "yellow"),  (1, 1, 0, true)),
    (("black", "pink"),    (1, 0, 1, true)),
    (("black", "cyan"),    (0, 1, 1, true)),

    (("white", "black"),   (1, 1, 1, false)),
    (("black", "white"),   (1, 1, 1, true)),
    (("red", "red"),       (255, 0, 0, true)),
    (("green", "green"),   (0, 255, 0, false)),
    (("blue", "blue"),     (0, 0, 255, false)),
    (("cyan", "cyan"),     (0, 255, 255, true)),
    (("pink", "pink"),     (255, 0, 255, false)),
    (("yellow", "yellow"), (255, 255, 0, false)),
];

static PRESET_RECIPES: Lazy<HashMap<(&'static str, &'static str), Recipe>> = Lazy::new(|| {
    PRESET_ROWS
        .iter()
        .map(|&((from, to), (r, g, b, reverse))| {
            (
                (from, to),
                Recipe {
                    r: Channel::from_code(r),
                    g: Channel::from_code(g),
                    b: Channel::from_code(b),
                    reverse,
                },
            )
        })
        .collect()
});

/// Segment colors for one gauge, ordered from the start endpoint to the
/// full circle.
#[derive(Debug, Clone, PartialEq)]
pub struct Palette {
    colors: Vec<Color>,
}

impl Palette {
    /// All 36 entries, start to end.
    pub fn colors(&self) -> &[Color] {
        &self.colors
    }

    /// Color of the unit segment drawn at `angle_deg` (one of 0, 10, ..
    /// 350). The 0 degree segment carries the end-endpoint color.
    pub fn for_angle(&self, angle_deg: u32) -> Color {
        let index = (350 - angle_deg.min(350)) / 10;
        self.colors[index as usize]
    }
}

/// Build the palette for a `(from, to)` gradient pair of color names.
///
/// Preset pairs use their channel recipe; anything else parses both names
/// and interpolates. Unparseable names fail with `InvalidValue`.
pub fn build(from: &str, to: &str) -> Result<Palette, ConfigError> {
    let from_key = from.trim().to_ascii_lowercase();
    let to_key = to.trim().to_ascii_lowercase();
    if let Some(recipe) = PRESET_RECIPES.get(&(from_key.as_str(), to_key.as_str())) {
        debug!("building preset palette for ({from}, {to})");
        let colors = (0..SEGMENT_COUNT).map(|k| recipe.color(k)).collect();
        return Ok(Palette { colors });
    }

    let parse = |name: &str| -> Result<Color, ConfigError> {
        name.parse().map_err(|err: ParseColorError| {
            ConfigError::invalid("color_gradient", err.to_string())
        })
    };
    let from_color = parse(from)?;
    let to_color = parse(to)?;
    debug!("building interpolated palette for ({from}, {to})");
    // One extra sample for the undrawn 360 degree slot, then dropped
    let samples = sample_between(from_color, to_color, SEGMENT_COUNT + 1);
    Ok(Palette {
        colors: samples[1..].to_vec(),
    })
}
