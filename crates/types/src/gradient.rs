//! Gradient building blocks: color stops, interpolation and even sampling.
//!
//! The gauge palette builder needs evenly spaced ramps between two endpoint
//! colors; embedders theming a gauge face can use the general stop-based
//! sampling as well.

use crate::color::Color;
use serde::{Deserialize, Serialize};

/// Color stop for gradients
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct ColorStop {
    pub position: f64, // 0.0 to 1.0
    pub color: Color,
}

impl ColorStop {
    pub fn new(position: f64, color: Color) -> Self {
        Self { position, color }
    }
}

/// Linear interpolation between two colors with `t` clamped to `0..=1`.
pub fn lerp(from: Color, to: Color, t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        from.r + (to.r - from.r) * t,
        from.g + (to.g - from.g) * t,
        from.b + (to.b - from.b) * t,
        from.a + (to.a - from.a) * t,
    )
}

/// Sample a stop-based gradient at position `t` (0..=1).
///
/// Stops may arrive unsorted; positions outside the covered span clamp to
/// the nearest stop. An empty stop list yields mid grey.
pub fn sample_stops(stops: &[ColorStop], t: f64) -> Color {
    if stops.is_empty() {
        return Color::new(0.5, 0.5, 0.5, 1.0);
    }
    let mut sorted: Vec<ColorStop> = stops.to_vec();
    sorted.sort_by(|a, b| {
        a.position
            .partial_cmp(&b.position)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let first = &sorted[0];
    let last = &sorted[sorted.len() - 1];
    if t <= first.position {
        return first.color;
    }
    if t >= last.position {
        return last.color;
    }
    for window in sorted.windows(2) {
        let (s0, s1) = (&window[0], &window[1]);
        if t >= s0.position && t <= s1.position {
            let segment = s1.position - s0.position;
            let local_t = if segment.abs() < f64::EPSILON {
                0.0
            } else {
                (t - s0.position) / segment
            };
            return lerp(s0.color, s1.color, local_t);
        }
    }
    last.color
}

/// `n` evenly spaced colors from `from` to `to`, both endpoints included.
pub fn sample_between(from: Color, to: Color, n: usize) -> Vec<Color> {
    match n {
        0 => Vec::new(),
        1 => vec![from],
        _ => {
            let last = n - 1;
            (0..n)
                .map(|i| {
                    // lerp at t = 1 can land an ulp short of the endpoint
                    if i == last {
                        to
                    } else {
                        lerp(from, to, i as f64 / last as f64)
                    }
                })
                .collect()
        }
    }
}
