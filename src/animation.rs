//! Rotation and grow animation for the carousel.
//!
//! The [`AnimationController`] owns two independent tracks:
//!
//! * a **rotation track** that eases the ring's current rotation towards a
//!   target over a fixed duration, and
//! * a **grow track**, a one-shot scale pulse fired when a slot is
//!   selected.
//!
//! Time never comes from an internal clock — every call takes the current
//! [`Instant`] — so the controller advances only when the frame loop ticks
//! it and is fully deterministic under test.

use crate::easing::{clamp01, ease_in_out_cubic, lerp, pulse};
use std::time::{Duration, Instant};

/// Shape of the grow pulse: maps normalized time in `[0, 1]` to a value in
/// `[0, 1]` that scales the configured overshoot.
pub type GrowCurve = fn(f32) -> f32;

/// Default peak scale of the selection pulse (1.0 → 1.15 → 1.0).
pub const DEFAULT_GROW_PEAK: f32 = 1.15;

/// State of the rotation track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotationState {
    /// At rest; the current rotation equals the target.
    Idle,
    /// Interpolating towards the target.
    Animating,
}

/// Drives the ring rotation and the selection pulse.
#[derive(Debug, Clone)]
pub struct AnimationController {
    duration: Duration,

    // Rotation track.  `segment_start` is the rotation value at the moment
    // the current segment began; retargeting mid-flight restarts the
    // segment from `current` so the motion never jumps.
    current: f32,
    target: f32,
    segment_start: f32,
    rotation_started: Option<Instant>,

    // Grow track.  `last_grow_scale` caches the value computed by the most
    // recent tick so `grow_scale` stays a cheap accessor.
    grow_started: Option<Instant>,
    grow_peak: f32,
    grow_curve: GrowCurve,
    last_grow_scale: f32,
}

impl AnimationController {
    /// Create a controller at rest at rotation zero.
    pub fn new(duration: Duration) -> Self {
        Self {
            duration,
            current: 0.0,
            target: 0.0,
            segment_start: 0.0,
            rotation_started: None,
            grow_started: None,
            grow_peak: DEFAULT_GROW_PEAK,
            grow_curve: pulse,
            last_grow_scale: 1.0,
        }
    }

    /// Replace the grow pulse shape and peak scale.
    ///
    /// `curve` maps normalized time to `[0, 1]`; the exposed scale is
    /// `1 + (peak − 1) · curve(t)`.
    pub fn set_grow(&mut self, curve: GrowCurve, peak: f32) {
        self.grow_curve = curve;
        self.grow_peak = peak;
    }

    //  Rotation track

    /// Current (possibly mid-animation) rotation in radians.
    pub fn rotation(&self) -> f32 {
        self.current
    }

    /// Target rotation in radians.
    pub fn target(&self) -> f32 {
        self.target
    }

    /// Rotation track state.
    pub fn rotation_state(&self) -> RotationState {
        if self.rotation_started.is_some() {
            RotationState::Animating
        } else {
            RotationState::Idle
        }
    }

    /// Begin animating towards `target`.
    ///
    /// If a segment is already in flight, the new segment starts from the
    /// current interpolated value rather than the old target, preserving
    /// continuity of motion.
    pub fn retarget(&mut self, target: f32, now: Instant) {
        if target == self.current {
            self.target = target;
            self.rotation_started = None;
            return;
        }
        self.segment_start = self.current;
        self.target = target;
        self.rotation_started = Some(now);
    }

    /// Stop all animation and pin the rotation to `rotation`.
    ///
    /// Used on activation to open the carousel already centered on the
    /// active workspace, and on deactivation to reset.
    pub fn snap_to(&mut self, rotation: f32) {
        self.current = rotation;
        self.target = rotation;
        self.segment_start = rotation;
        self.rotation_started = None;
        self.grow_started = None;
        self.last_grow_scale = 1.0;
    }

    //  Grow track

    /// Start the one-shot selection pulse.
    pub fn start_grow(&mut self, now: Instant) {
        self.grow_started = Some(now);
        self.last_grow_scale = 1.0;
    }

    /// Whether the selection pulse is still running.
    pub fn grow_active(&self) -> bool {
        self.grow_started.is_some()
    }

    /// Current scale multiplier from the grow track (`1.0` when inactive).
    pub fn grow_scale(&self) -> f32 {
        match self.grow_started {
            Some(_) => self.last_grow_scale,
            None => 1.0,
        }
    }

    //  Tick

    /// Advance both tracks to `now`.
    ///
    /// Pure arithmetic; cheap enough to call every frame.  When the
    /// rotation segment completes, the current value snaps exactly onto the
    /// target and the track returns to [`RotationState::Idle`].
    pub fn tick(&mut self, now: Instant) {
        if let Some(started) = self.rotation_started {
            let t = self.progress(started, now);
            if t >= 1.0 {
                self.current = self.target;
                self.rotation_started = None;
            } else {
                self.current = lerp(self.segment_start, self.target, ease_in_out_cubic(t));
            }
        }

        if let Some(started) = self.grow_started {
            let t = self.progress(started, now);
            if t >= 1.0 {
                self.grow_started = None;
                self.last_grow_scale = 1.0;
            } else {
                self.last_grow_scale = 1.0 + (self.grow_peak - 1.0) * (self.grow_curve)(t);
            }
        }
    }

    /// Normalized progress of a track started at `started`, clamped to
    /// `[0, 1]`.
    fn progress(&self, started: Instant, now: Instant) -> f32 {
        let elapsed = now.saturating_duration_since(started);
        clamp01(elapsed.as_secs_f32() / self.duration.as_secs_f32())
    }
}

//  Tests

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    const DURATION: Duration = Duration::from_millis(300);

    fn controller() -> (AnimationController, Instant) {
        (AnimationController::new(DURATION), Instant::now())
    }

    #[test]
    fn starts_idle_at_zero() {
        let (ctl, _) = controller();
        assert_eq!(ctl.rotation(), 0.0);
        assert_eq!(ctl.rotation_state(), RotationState::Idle);
        assert_eq!(ctl.grow_scale(), 1.0);
    }

    #[test]
    fn retarget_begins_animating() {
        let (mut ctl, t0) = controller();
        ctl.retarget(PI, t0);
        assert_eq!(ctl.rotation_state(), RotationState::Animating);
        assert_eq!(ctl.rotation(), 0.0, "no motion before the first tick");
    }

    #[test]
    fn full_duration_snaps_exactly_onto_target() {
        let (mut ctl, t0) = controller();
        ctl.retarget(PI, t0);
        ctl.tick(t0 + DURATION);
        assert_eq!(ctl.rotation(), PI, "must be exact, not approximate");
        assert_eq!(ctl.rotation_state(), RotationState::Idle);
    }

    #[test]
    fn midpoint_is_half_way() {
        let (mut ctl, t0) = controller();
        ctl.retarget(PI, t0);
        ctl.tick(t0 + DURATION / 2);
        // Ease-in-out cubic passes through 0.5 at t = 0.5.
        assert!((ctl.rotation() - PI / 2.0).abs() < 1e-4);
        assert_eq!(ctl.rotation_state(), RotationState::Animating);
    }

    #[test]
    fn eased_motion_is_slow_at_the_start() {
        let (mut ctl, t0) = controller();
        ctl.retarget(PI, t0);
        ctl.tick(t0 + DURATION / 10);
        // 4·0.1³ = 0.004 of the distance.
        assert!(ctl.rotation() < 0.05 * PI);
    }

    #[test]
    fn overshooting_the_duration_stays_on_target() {
        let (mut ctl, t0) = controller();
        ctl.retarget(1.0, t0);
        ctl.tick(t0 + DURATION * 5);
        assert_eq!(ctl.rotation(), 1.0);
        ctl.tick(t0 + DURATION * 6);
        assert_eq!(ctl.rotation(), 1.0);
    }

    #[test]
    fn retarget_mid_flight_continues_from_current_value() {
        let (mut ctl, t0) = controller();
        ctl.retarget(PI, t0);
        ctl.tick(t0 + DURATION / 2);
        let mid = ctl.rotation();
        assert!(mid > 0.0 && mid < PI);

        // New target while animating: the next segment starts where the
        // ring actually is, not at the abandoned target.
        let t1 = t0 + DURATION / 2;
        ctl.retarget(-PI, t1);
        assert_eq!(ctl.rotation(), mid, "no jump at retarget");
        ctl.tick(t1);
        assert_eq!(ctl.rotation(), mid, "tick at segment start keeps value");
        ctl.tick(t1 + DURATION);
        assert_eq!(ctl.rotation(), -PI);
    }

    #[test]
    fn retarget_to_current_value_is_idle() {
        let (mut ctl, t0) = controller();
        ctl.retarget(0.0, t0);
        assert_eq!(ctl.rotation_state(), RotationState::Idle);
    }

    #[test]
    fn snap_to_resets_everything() {
        let (mut ctl, t0) = controller();
        ctl.retarget(PI, t0);
        ctl.start_grow(t0);
        ctl.snap_to(2.0);
        assert_eq!(ctl.rotation(), 2.0);
        assert_eq!(ctl.target(), 2.0);
        assert_eq!(ctl.rotation_state(), RotationState::Idle);
        assert!(!ctl.grow_active());
    }

    #[test]
    fn grow_pulse_rises_and_returns_to_one() {
        let (mut ctl, t0) = controller();
        ctl.start_grow(t0);
        ctl.tick(t0);
        assert!((ctl.grow_scale() - 1.0).abs() < 1e-6);

        ctl.tick(t0 + DURATION / 2);
        assert!((ctl.grow_scale() - DEFAULT_GROW_PEAK).abs() < 1e-4);

        ctl.tick(t0 + DURATION);
        assert_eq!(ctl.grow_scale(), 1.0);
        assert!(!ctl.grow_active());
    }

    #[test]
    fn grow_curve_is_configurable() {
        let (mut ctl, t0) = controller();
        // A square pulse: full overshoot for the whole duration.
        fn square(_t: f32) -> f32 {
            1.0
        }
        ctl.set_grow(square, 1.5);
        ctl.start_grow(t0);
        ctl.tick(t0 + DURATION / 4);
        assert!((ctl.grow_scale() - 1.5).abs() < 1e-6);
        ctl.tick(t0 + DURATION);
        assert_eq!(ctl.grow_scale(), 1.0);
    }

    #[test]
    fn grow_and_rotation_are_independent() {
        let (mut ctl, t0) = controller();
        ctl.retarget(PI, t0);
        // Grow starts half-way through the rotation.
        ctl.tick(t0 + DURATION / 2);
        ctl.start_grow(t0 + DURATION / 2);
        ctl.tick(t0 + DURATION);
        assert_eq!(ctl.rotation(), PI);
        assert!(ctl.grow_active(), "grow still has half its duration left");
        ctl.tick(t0 + DURATION + DURATION / 2);
        assert!(!ctl.grow_active());
    }
}
