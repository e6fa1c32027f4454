//! Angle/value conversion for full-circle and arc gauge scales.
//!
//! Angles use the Tk canvas convention: degrees, 0 at the positive x axis,
//! increasing counter-clockwise, with screen y pointing down (so the
//! pointer's y is inverted before any `atan2`).

use crate::range::ValueRange;
use serde::{Deserialize, Serialize};

/// Angular layout of a gauge scale.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Sweep {
    /// The whole circle: `start` sits at 360 degrees and `end` at 0, so the
    /// reading grows clockwise. Both endpoints share the 0/360 seam.
    FullCircle,
    /// Partial arc from `start_deg` sweeping `extent_deg` degrees. Negative
    /// extents sweep clockwise; extents beyond 360 are accepted as-is.
    Arc { start_deg: f64, extent_deg: f64 },
}

impl Sweep {
    /// Needle angle in degrees for `value`, which is clamped into `range`.
    ///
    /// For a full circle the start endpoint maps to 360, not 0; the two are
    /// the same needle position but keep segment colorization unambiguous.
    pub fn angle_of(&self, range: &ValueRange, value: f64) -> f64 {
        let t = range.position(value);
        match self {
            Sweep::FullCircle => 360.0 - 360.0 * t,
            Sweep::Arc {
                start_deg,
                extent_deg,
            } => start_deg + extent_deg * t,
        }
    }

    /// Value for a needle angle, clamped into `range`. Angles outside the
    /// sweep clamp to the nearer boundary, never extrapolate.
    pub fn value_at(&self, range: &ValueRange, angle: f64) -> f64 {
        let t = match self {
            Sweep::FullCircle => {
                let a = if (0.0..=360.0).contains(&angle) {
                    angle
                } else {
                    normalize_degrees(angle)
                };
                (360.0 - a) / 360.0
            }
            Sweep::Arc {
                start_deg,
                extent_deg,
            } => (angle - start_deg) / extent_deg,
        };
        range.at(t)
    }
}

/// Normalize any angle into `[0, 360)`.
pub fn normalize_degrees(angle: f64) -> f64 {
    let a = angle % 360.0;
    if a < 0.0 {
        a + 360.0
    } else {
        a
    }
}

/// Pointer angle around `center` in degrees within `[0, 360)`, with the
/// screen-down y axis inverted.
pub fn pointer_angle(center: (f64, f64), x: f64, y: f64) -> f64 {
    normalize_degrees(signed_pointer_angle(center, x, y))
}

/// Pointer angle around `center` in degrees within `(-180, 180]`. Relative
/// drags compare successive signed angles so that crossing the 0 degree
/// axis does not read as a jump.
pub fn signed_pointer_angle(center: (f64, f64), x: f64, y: f64) -> f64 {
    (center.1 - y).atan2(x - center.0).to_degrees()
}

/// Point at `distance` from `center` along `angle` degrees, in screen
/// coordinates (y grows downward).
pub fn polar_offset(center: (f64, f64), distance: f64, angle: f64) -> (f64, f64) {
    let rad = angle.to_radians();
    (
        center.0 + distance * rad.cos(),
        center.1 - distance * rad.sin(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_range() -> ValueRange {
        ValueRange::new(0.0, 100.0).unwrap()
    }

    #[test]
    fn test_full_circle_angles() {
        let sweep = Sweep::FullCircle;
        let range = full_range();
        assert_eq!(sweep.angle_of(&range, 0.0), 360.0);
        assert_eq!(sweep.angle_of(&range, 100.0), 0.0);
        assert!((sweep.angle_of(&range, 50.0) - 180.0).abs() < 1e-12);
        assert!((sweep.angle_of(&range, 25.0) - 270.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_circle_values() {
        let sweep = Sweep::FullCircle;
        let range = full_range();
        assert_eq!(sweep.value_at(&range, 0.0), 100.0);
        assert_eq!(sweep.value_at(&range, 360.0), 0.0);
        assert!((sweep.value_at(&range, 180.0) - 50.0).abs() < 1e-12);
        // Out-of-band input normalizes
        assert!((sweep.value_at(&range, -90.0) - 25.0).abs() < 1e-12);
    }

    #[test]
    fn test_full_circle_roundtrip() {
        let sweep = Sweep::FullCircle;
        let range = full_range();
        for v in [0.0, 0.5, 12.0, 50.0, 99.9, 100.0] {
            let back = sweep.value_at(&range, sweep.angle_of(&range, v));
            assert!((back - v).abs() < 1e-9, "value {v} came back as {back}");
        }
    }

    #[test]
    fn test_full_circle_reversed_range() {
        let sweep = Sweep::FullCircle;
        let range = ValueRange::new(100.0, 0.0).unwrap();
        assert_eq!(sweep.angle_of(&range, 100.0), 360.0);
        assert_eq!(sweep.angle_of(&range, 0.0), 0.0);
        assert!((sweep.value_at(&range, 180.0) - 50.0).abs() < 1e-12);
    }

    #[test]
    fn test_arc_angles() {
        // Meter defaults: 240 degrees start, -295 extent
        let sweep = Sweep::Arc {
            start_deg: 240.0,
            extent_deg: -295.0,
        };
        let range = full_range();
        assert_eq!(sweep.angle_of(&range, 0.0), 240.0);
        assert!((sweep.angle_of(&range, 100.0) - (-55.0)).abs() < 1e-12);
        assert!((sweep.angle_of(&range, 50.0) - 92.5).abs() < 1e-12);
    }

    #[test]
    fn test_arc_clamps_to_boundary() {
        let sweep = Sweep::Arc {
            start_deg: 240.0,
            extent_deg: -295.0,
        };
        let range = full_range();
        // Angles beyond either boundary clamp instead of extrapolating
        assert_eq!(sweep.value_at(&range, 250.0), 0.0);
        assert_eq!(sweep.value_at(&range, -80.0), 100.0);
        let back = sweep.value_at(&range, sweep.angle_of(&range, 73.0));
        assert!((back - 73.0).abs() < 1e-9);
    }

    #[test]
    fn test_normalize_degrees() {
        assert_eq!(normalize_degrees(-350.0), 10.0);
        assert_eq!(normalize_degrees(370.0), 10.0);
        assert_eq!(normalize_degrees(0.0), 0.0);
        assert_eq!(normalize_degrees(360.0), 0.0);
    }

    #[test]
    fn test_pointer_angle_quadrants() {
        let center = (50.0, 50.0);
        assert_eq!(pointer_angle(center, 60.0, 50.0), 0.0);
        assert_eq!(pointer_angle(center, 50.0, 40.0), 90.0);
        assert_eq!(pointer_angle(center, 40.0, 50.0), 180.0);
        assert_eq!(pointer_angle(center, 50.0, 60.0), 270.0);
    }

    #[test]
    fn test_polar_offset() {
        let (x, y) = polar_offset((10.0, 10.0), 5.0, 90.0);
        assert!((x - 10.0).abs() < 1e-9);
        assert!((y - 5.0).abs() < 1e-9);
    }
}
