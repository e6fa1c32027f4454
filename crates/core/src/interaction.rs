//! The shared gauge interaction engine.
//!
//! Dial, Meter and ScrollKnob all track a value that pointer drags and
//! wheel ticks move around a circular scale; they differ only in policy.
//! One engine handles all three, parameterized by [`InteractionPolicy`]:
//! drag can position the value absolutely from the pointer angle or step it
//! relative to the previous pointer angle, and boundaries can clamp or wrap
//! around the 0/360 seam.

use crate::angle::{pointer_angle, signed_pointer_angle, Sweep};
use crate::events::ScrollDirection;
use crate::range::ValueRange;
use log::{debug, trace};
use serde::{Deserialize, Serialize};

/// How pointer motion maps to the value while dragging.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DragMode {
    /// The pointer angle is the value: each motion event repositions the
    /// indicator under the pointer.
    Absolute,
    /// Each motion event compares the pointer angle to the previous one
    /// and steps the value one quantum in that direction. Used where the
    /// absolute angle is ambiguous near the sweep boundaries.
    Relative,
}

/// What happens at the ends of the value range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BoundaryMode {
    /// Stop at the boundary value.
    Clamp,
    /// Full-circle semantics: reaching `end` and pushing further resets to
    /// `start`, since both share the 0/360 seam.
    Wraparound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InteractionPolicy {
    pub drag: DragMode,
    pub boundary: BoundaryMode,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragState {
    Idle,
    Dragging,
}

/// Value/angle state for one gauge, driven by pointer and wheel input.
///
/// The stored value is kept precise; integer mode only affects the seam
/// comparison here and display rounding in the widgets.
#[derive(Debug)]
pub struct GaugeInteraction {
    range: ValueRange,
    sweep: Sweep,
    policy: InteractionPolicy,
    center: (f64, f64),
    steps: f64,
    integer: bool,
    value: f64,
    state: DragState,
    /// Which vertical half-plane the pointer last occupied; disambiguates
    /// crossings of the 0/360 seam for absolute drags. Starts true, as if
    /// the pointer had approached from the start side.
    lower_half: bool,
    /// Previous pointer angle for relative drags, recorded at press.
    last_pointer: Option<f64>,
}

impl GaugeInteraction {
    pub fn new(
        range: ValueRange,
        sweep: Sweep,
        policy: InteractionPolicy,
        center: (f64, f64),
    ) -> Self {
        Self {
            range,
            sweep,
            policy,
            center,
            steps: 1.0,
            integer: false,
            value: range.start,
            state: DragState::Idle,
            lower_half: true,
            last_pointer: None,
        }
    }

    pub fn range(&self) -> ValueRange {
        self.range
    }

    /// Swap in a new range, re-clamping the current value into it.
    pub fn set_range(&mut self, range: ValueRange) {
        self.range = range;
        self.value = range.clamp(self.value);
    }

    pub fn sweep(&self) -> Sweep {
        self.sweep
    }

    pub fn set_sweep(&mut self, sweep: Sweep) {
        self.sweep = sweep;
    }

    pub fn steps(&self) -> f64 {
        self.steps
    }

    /// Value quantum per wheel tick (and per relative drag step).
    pub fn set_steps(&mut self, steps: f64) {
        self.steps = steps;
    }

    pub fn integer(&self) -> bool {
        self.integer
    }

    pub fn set_integer(&mut self, integer: bool) {
        self.integer = integer;
    }

    /// Current value, precise.
    pub fn value(&self) -> f64 {
        self.value
    }

    /// Needle angle for the current value.
    pub fn angle(&self) -> f64 {
        self.sweep.angle_of(&self.range, self.value)
    }

    pub fn drag_state(&self) -> DragState {
        self.state
    }

    /// Clamp `value` into the range and store it. Returns whether the
    /// stored value changed. Never wraps; programmatic sets may rest
    /// exactly on either boundary.
    pub fn set(&mut self, value: f64) -> bool {
        let clamped = self.range.clamp(value);
        let changed = clamped != self.value;
        self.value = clamped;
        changed
    }

    /// Begin a drag. The caller decides whether the press actually landed
    /// on the indicator.
    pub fn press(&mut self, x: f64, y: f64) {
        self.state = DragState::Dragging;
        self.last_pointer = Some(signed_pointer_angle(self.center, x, y));
        debug!("drag started at value {}", self.value);
    }

    pub fn release(&mut self) {
        if self.state == DragState::Dragging {
            debug!("drag released at value {}", self.value);
        }
        self.state = DragState::Idle;
        self.last_pointer = None;
    }

    /// Process pointer motion. Returns whether the value changed. Motion
    /// outside a drag is ignored.
    pub fn motion(&mut self, x: f64, y: f64) -> bool {
        if self.state != DragState::Dragging {
            return false;
        }
        match self.policy.drag {
            DragMode::Absolute => self.motion_absolute(x, y),
            DragMode::Relative => self.motion_relative(x, y),
        }
    }

    /// One wheel tick; `Up` moves toward `end`. Returns whether the value
    /// changed.
    pub fn scroll(&mut self, direction: ScrollDirection) -> bool {
        let toward_end = direction == ScrollDirection::Up;
        let delta = self.steps * self.range.direction() * if toward_end { 1.0 } else { -1.0 };
        match self.policy.boundary {
            BoundaryMode::Clamp => self.set(self.value + delta),
            BoundaryMode::Wraparound => {
                if toward_end {
                    if self.value == self.range.end {
                        // Past the seam: the opposite endpoint, not a stop
                        self.value = self.range.start;
                        true
                    } else {
                        self.set(self.value + delta)
                    }
                } else if self.value == self.range.start {
                    false
                } else {
                    self.set(self.value + delta)
                }
            }
        }
    }

    fn motion_absolute(&mut self, x: f64, y: f64) -> bool {
        let mut theta = pointer_angle(self.center, x, y);
        trace!("absolute drag pointer angle {theta:.2}");

        // Crossing the 0/360 seam from the wrong vertical side snaps the
        // needle onto the seam instead of letting the value jump.
        if (theta < 90.0 && self.lower_half) || (theta > 270.0 && !self.lower_half) {
            theta = 0.0;
        }
        if theta > 0.0 && theta < 180.0 {
            self.lower_half = false;
        } else if theta > 180.0 && theta < 360.0 {
            self.lower_half = true;
        }

        let raw = self.sweep.value_at(&self.range, theta);
        let next = if self.policy.boundary == BoundaryMode::Wraparound
            && self.display_rounded(raw) == self.range.end
            && self.lower_half
        {
            // Arrived at the seam from the start side: wrap, do not rest
            // at end
            self.range.start
        } else {
            raw
        };

        let changed = next != self.value;
        self.value = next;
        changed
    }

    fn motion_relative(&mut self, x: f64, y: f64) -> bool {
        let theta = signed_pointer_angle(self.center, x, y);
        let prev = match self.last_pointer {
            Some(prev) => prev,
            None => {
                self.last_pointer = Some(theta);
                return false;
            }
        };
        if theta == prev {
            return false;
        }
        // Pointer motion along the sweep direction steps toward end; the
        // full circle sweeps clockwise (decreasing angle).
        let clockwise = theta < prev;
        let sweep_clockwise = match self.sweep {
            Sweep::FullCircle => true,
            Sweep::Arc { extent_deg, .. } => extent_deg < 0.0,
        };
        let toward_end = clockwise == sweep_clockwise;
        let delta = self.steps * self.range.direction() * if toward_end { 1.0 } else { -1.0 };
        let changed = self.set(self.value + delta);
        self.last_pointer = Some(theta);
        changed
    }

    /// Rounded the way the widget will display it; the seam comparison
    /// works on displayed values, as reaching "exactly end" within two
    /// decimals counts as the boundary.
    fn display_rounded(&self, value: f64) -> f64 {
        if self.integer {
            value.round()
        } else {
            (value * 100.0).round() / 100.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dial_engine() -> GaugeInteraction {
        let range = ValueRange::new(0.0, 100.0).unwrap();
        GaugeInteraction::new(
            range,
            Sweep::FullCircle,
            InteractionPolicy {
                drag: DragMode::Absolute,
                boundary: BoundaryMode::Wraparound,
            },
            (60.0, 60.0),
        )
    }

    fn meter_engine() -> GaugeInteraction {
        let range = ValueRange::new(0.0, 100.0).unwrap();
        GaugeInteraction::new(
            range,
            Sweep::Arc {
                start_deg: 240.0,
                extent_deg: -295.0,
            },
            InteractionPolicy {
                drag: DragMode::Relative,
                boundary: BoundaryMode::Clamp,
            },
            (125.5, 125.5),
        )
    }

    #[test]
    fn test_set_clamps_and_reports_change() {
        let mut engine = dial_engine();
        assert!(engine.set(50.0));
        assert_eq!(engine.value(), 50.0);
        // Idempotent: same value, no change reported
        assert!(!engine.set(50.0));
        assert!(engine.set(150.0));
        assert_eq!(engine.value(), 100.0);
        assert!(engine.set(-3.0));
        assert_eq!(engine.value(), 0.0);
    }

    #[test]
    fn test_scroll_steps_toward_end_and_start() {
        let mut engine = dial_engine();
        engine.set(50.0);
        assert!(engine.scroll(ScrollDirection::Up));
        assert_eq!(engine.value(), 51.0);
        assert!(engine.scroll(ScrollDirection::Down));
        assert_eq!(engine.value(), 50.0);
    }

    #[test]
    fn test_scroll_wraps_at_end() {
        let mut engine = dial_engine();
        engine.set(100.0);
        assert!(engine.scroll(ScrollDirection::Up));
        assert_eq!(engine.value(), 0.0);
    }

    #[test]
    fn test_scroll_noop_at_start() {
        let mut engine = dial_engine();
        assert!(!engine.scroll(ScrollDirection::Down));
        assert_eq!(engine.value(), 0.0);
    }

    #[test]
    fn test_scroll_clamp_mode_rests_at_bounds() {
        let mut engine = meter_engine();
        engine.set_steps(7.0);
        engine.set(98.0);
        assert!(engine.scroll(ScrollDirection::Up));
        assert_eq!(engine.value(), 100.0);
        // Further ticks keep it there
        assert!(!engine.scroll(ScrollDirection::Up));
        assert_eq!(engine.value(), 100.0);
    }

    #[test]
    fn test_scroll_reversed_range() {
        let range = ValueRange::new(100.0, 0.0).unwrap();
        let mut engine = GaugeInteraction::new(
            range,
            Sweep::FullCircle,
            InteractionPolicy {
                drag: DragMode::Absolute,
                boundary: BoundaryMode::Wraparound,
            },
            (60.0, 60.0),
        );
        // Up still means toward end, numerically downward here
        assert!(engine.scroll(ScrollDirection::Up));
        assert_eq!(engine.value(), 99.0);
    }

    #[test]
    fn test_absolute_drag_positions_under_pointer() {
        let _ = env_logger::builder().is_test(true).try_init();
        let mut engine = dial_engine();
        engine.press(60.0, 10.0);
        // Straight up is 90 degrees, which reads 75 on a 0..100 dial
        assert!(engine.motion(60.0, 10.0));
        assert_eq!(engine.value(), 75.0);
        // Straight left is 180 degrees
        engine.motion(10.0, 60.0);
        assert_eq!(engine.value(), 50.0);
        engine.release();
        assert_eq!(engine.drag_state(), DragState::Idle);
    }

    #[test]
    fn test_motion_ignored_when_idle() {
        let mut engine = dial_engine();
        assert!(!engine.motion(60.0, 10.0));
        assert_eq!(engine.value(), 0.0);
    }

    #[test]
    fn test_seam_crossing_from_start_side_wraps() {
        let mut engine = dial_engine();
        engine.press(110.0, 70.0);
        // Just below east: low value, pointer in the lower half
        engine.motion(110.0, 70.0);
        assert!(engine.value() < 10.0);
        // Crossing upward over the seam snaps to it and wraps to start
        engine.motion(110.0, 55.0);
        assert_eq!(engine.value(), 0.0);
    }

    #[test]
    fn test_seam_approach_from_above_rests_at_end() {
        let mut engine = dial_engine();
        engine.press(60.0, 10.0);
        engine.motion(60.0, 10.0); // upper half, 75
        engine.motion(110.0, 59.0); // just above east, close to end
        assert!(engine.value() > 95.0);
        // Crossing downward pins at end instead of jumping to low values
        engine.motion(110.0, 61.0);
        assert_eq!(engine.value(), 100.0);
    }

    #[test]
    fn test_relative_drag_steps_by_quantum() {
        let mut engine = meter_engine();
        engine.set(40.0);
        engine.set_steps(2.0);
        engine.press(200.0, 125.5);
        // Clockwise motion (decreasing angle) on a clockwise sweep steps up
        engine.motion(200.0, 135.0);
        assert_eq!(engine.value(), 42.0);
        engine.motion(200.0, 145.0);
        assert_eq!(engine.value(), 44.0);
        // Reversing direction steps back down
        engine.motion(200.0, 135.0);
        assert_eq!(engine.value(), 42.0);
    }

    #[test]
    fn test_relative_first_motion_uses_press_angle() {
        let mut engine = meter_engine();
        engine.set(40.0);
        engine.press(200.0, 125.5);
        // No motion yet, pointer has not moved: nothing steps
        assert!(!engine.motion(200.0, 125.5));
        assert_eq!(engine.value(), 40.0);
    }

    #[test]
    fn test_drag_continues_normally_after_wrap() {
        let mut engine = dial_engine();
        engine.press(110.0, 70.0);
        engine.motion(110.0, 70.0); // lower half, low value
        engine.motion(110.0, 55.0); // across the seam, wraps to start
        assert_eq!(engine.value(), 0.0);
        engine.motion(60.0, 10.0); // straight up
        assert_eq!(engine.value(), 75.0);
    }

    #[test]
    fn test_range_swap_reclamps() {
        let mut engine = dial_engine();
        engine.set(80.0);
        engine.set_range(ValueRange::new(0.0, 50.0).unwrap());
        assert_eq!(engine.value(), 50.0);
    }
}
