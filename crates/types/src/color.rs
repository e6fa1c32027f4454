//! Foundational color type used throughout dialkit.
//!
//! Color is the building block for all visual configuration in the gauge
//! widgets. Gauge configs accept colors either structurally (serde) or as
//! the Tk-style name strings the original widgets were themed with, so the
//! parser here understands `"red"`, `"grey40"` and `"#rrggbb"` alike.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// RGBA color with alpha channel
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Color {
    pub r: f64,
    pub g: f64,
    pub b: f64,
    pub a: f64,
}

impl Color {
    pub fn new(r: f64, g: f64, b: f64, a: f64) -> Self {
        Self { r, g, b, a }
    }

    pub fn from_rgba8(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self {
            r: r as f64 / 255.0,
            g: g as f64 / 255.0,
            b: b as f64 / 255.0,
            a: a as f64 / 255.0,
        }
    }

    pub fn to_rgba8(&self) -> (u8, u8, u8, u8) {
        (
            (self.r * 255.0) as u8,
            (self.g * 255.0) as u8,
            (self.b * 255.0) as u8,
            (self.a * 255.0) as u8,
        )
    }

    /// Format as `#rrggbb` (alpha is dropped).
    pub fn to_hex(&self) -> String {
        let (r, g, b, _) = self.to_rgba8();
        format!("#{:02x}{:02x}{:02x}", r, g, b)
    }
}

impl Default for Color {
    fn default() -> Self {
        Self::new(0.0, 0.0, 0.0, 1.0)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

/// Failure to interpret a color specification string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unrecognized color name: {0}")]
pub struct ParseColorError(pub String);

impl FromStr for Color {
    type Err = ParseColorError;

    /// Parse a Tk-style color specification: a known name, a grey shade
    /// (`grey0`..`grey100`, `gray` spelling accepted), or `#rgb`/`#rrggbb`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let spec = s.trim();
        if let Some(hex) = spec.strip_prefix('#') {
            return parse_hex(hex).ok_or_else(|| ParseColorError(s.to_string()));
        }
        let lower = spec.to_ascii_lowercase();
        if let Some(color) = named_color(&lower) {
            return Ok(color);
        }
        if let Some(color) = grey_shade(&lower) {
            return Ok(color);
        }
        Err(ParseColorError(s.to_string()))
    }
}

fn parse_hex(hex: &str) -> Option<Color> {
    match hex.len() {
        3 => {
            let r = u8::from_str_radix(&hex[0..1], 16).ok()?;
            let g = u8::from_str_radix(&hex[1..2], 16).ok()?;
            let b = u8::from_str_radix(&hex[2..3], 16).ok()?;
            // 4-bit channels scale up by repetition: "f" -> 0xff
            Some(Color::from_rgba8(r * 17, g * 17, b * 17, 255))
        }
        6 => {
            let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
            let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
            let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
            Some(Color::from_rgba8(r, g, b, 255))
        }
        _ => None,
    }
}

fn named_color(name: &str) -> Option<Color> {
    let (r, g, b) = match name {
        "white" => (255, 255, 255),
        "black" => (0, 0, 0),
        "red" => (255, 0, 0),
        "green" => (0, 255, 0),
        "blue" => (0, 0, 255),
        "cyan" => (0, 255, 255),
        "magenta" => (255, 0, 255),
        "yellow" => (255, 255, 0),
        "pink" => (255, 192, 203),
        "grey" | "gray" => (190, 190, 190),
        _ => return None,
    };
    Some(Color::from_rgba8(r, g, b, 255))
}

/// `greyNN`/`grayNN` shades: NN percent of full white, Tk rounding.
fn grey_shade(name: &str) -> Option<Color> {
    let digits = name
        .strip_prefix("grey")
        .or_else(|| name.strip_prefix("gray"))?;
    let percent: u32 = digits.parse().ok()?;
    if percent > 100 {
        return None;
    }
    let level = (percent as f64 * 255.0 / 100.0).round() as u8;
    Some(Color::from_rgba8(level, level, level, 255))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_colors_parse() {
        let red: Color = "red".parse().unwrap();
        assert_eq!(red.to_rgba8(), (255, 0, 0, 255));
        let grey: Color = "grey".parse().unwrap();
        assert_eq!(grey.to_rgba8(), (190, 190, 190, 255));
        // Case and spelling variants
        let gray: Color = "Gray".parse().unwrap();
        assert_eq!(gray, grey);
    }

    #[test]
    fn test_grey_shades() {
        let g30: Color = "grey30".parse().unwrap();
        assert_eq!(g30.to_rgba8(), (77, 77, 77, 255));
        let g80: Color = "gray80".parse().unwrap();
        assert_eq!(g80.to_rgba8(), (204, 204, 204, 255));
        let g100: Color = "grey100".parse().unwrap();
        assert_eq!(g100.to_rgba8(), (255, 255, 255, 255));
        assert!("grey101".parse::<Color>().is_err());
    }

    #[test]
    fn test_hex_parse() {
        let c: Color = "#f0f0f0".parse().unwrap();
        assert_eq!(c.to_rgba8(), (240, 240, 240, 255));
        let short: Color = "#fff".parse().unwrap();
        assert_eq!(short.to_rgba8(), (255, 255, 255, 255));
        assert!("#f0f0".parse::<Color>().is_err());
        assert!("#zzzzzz".parse::<Color>().is_err());
    }

    #[test]
    fn test_hex_roundtrip() {
        let c = Color::from_rgba8(18, 52, 86, 255);
        assert_eq!(c.to_hex(), "#123456");
        let back: Color = c.to_hex().parse().unwrap();
        assert_eq!(back.to_rgba8(), (18, 52, 86, 255));
    }

    #[test]
    fn test_unknown_name_errors() {
        let err = "no-such-color".parse::<Color>().unwrap_err();
        assert_eq!(err, ParseColorError("no-such-color".to_string()));
    }

    #[test]
    fn test_serde_roundtrip() {
        let c = Color::from_rgba8(10, 20, 30, 255);
        let json = serde_json::to_string(&c).unwrap();
        let back: Color = serde_json::from_str(&json).unwrap();
        assert_eq!(c, back);
    }
}
