//! Scalar easing curves for carousel animation.

use std::f32::consts::PI;

/// Linear interpolation between `a` and `b` at parameter `t`.
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Clamp `t` to the unit interval.
pub fn clamp01(t: f32) -> f32 {
    t.max(0.0).min(1.0)
}

/// Ease-in-out cubic.
///
/// `4t³` for the first half, `1 − (−2t + 2)³ / 2` for the second; slow at
/// both ends, fast through the middle.  Input outside `[0, 1]` is clamped.
pub fn ease_in_out_cubic(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        4.0 * t * t * t
    } else {
        let u = -2.0 * t + 2.0;
        1.0 - u * u * u / 2.0
    }
}

/// One-shot pulse: rises from 0 at `t == 0` to 1 at `t == 0.5`, then falls
/// back to 0 at `t == 1`, with an eased ramp on both sides.
///
/// This is the default curve for the selection "grow" effect; the mirrored
/// halves reuse [`ease_in_out_cubic`] so the pop matches the rotation feel.
pub fn pulse(t: f32) -> f32 {
    let t = clamp01(t);
    if t < 0.5 {
        ease_in_out_cubic(2.0 * t)
    } else {
        ease_in_out_cubic(2.0 - 2.0 * t)
    }
}

/// A softer sine-shaped pulse, usable as an alternative grow curve.
pub fn sine_pulse(t: f32) -> f32 {
    (clamp01(t) * PI).sin()
}
