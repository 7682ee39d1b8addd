//! Carousel layout solver.
//!
//! [`solve`] is a pure function from `(slot count, selection, rotation,
//! config, viewport)` to per-slot render parameters: azimuth, perspective
//! projected screen box, and opacity.  It has no hidden state — identical
//! inputs yield bit-identical outputs — which keeps the geometry testable
//! in isolation from the animation and the renderer.
//!
//! The ring lives in a simple cylindrical model: slot `i` of `n` sits at
//! azimuth `2π·i/n − rotation` (scaled by the configured spacing), depth is
//! `sin(azimuth) · radius`, and a fixed-focal-length perspective divide
//! shrinks far slots.

use crate::config::CarouselConfig;
use std::f32::consts::TAU;

/// Distance of the virtual camera, in the same pixel units as the radius.
const FOCAL_LENGTH: f32 = 2000.0;

/// Unprojected thumbnail size in pixels.
const THUMBNAIL_WIDTH: f32 = 400.0;
const THUMBNAIL_HEIGHT: f32 = 300.0;

/// Opacity floor for non-selected slots; nothing on the ring ever becomes
/// fully invisible.
const MIN_ALPHA: f32 = 0.3;

/// Output area the carousel is centered in.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Viewport {
    /// Center point `(x, y)`.
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }
}

/// An axis-aligned screen rectangle in pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBox {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Solved render parameters for one slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlotLayout {
    /// Azimuth around the ring's vertical axis, in radians.
    pub angle: f32,
    /// Perspective-projected screen rectangle.
    pub screen_box: ScreenBox,
    /// Opacity in `[0.3, 1.0]`; exactly `1.0` for the selected slot.
    pub alpha: f32,
    /// Whether this slot is the current selection.
    pub is_selected: bool,
}

/// Rotation value that centers slot `index` of `count` at azimuth zero.
///
/// This is the target the animation steers towards after a navigation
/// event.
pub fn target_rotation(index: usize, count: usize) -> f32 {
    if count == 0 {
        return 0.0;
    }
    TAU * index as f32 / count as f32
}

/// Compute the layout of every slot on the ring.
///
/// `rotation` is the *current* rotation — mid-animation it lags the value
/// that corresponds to `selected`, which is what produces the smooth turn.
/// A single-slot ring is degenerate: the sole slot is pinned at azimuth
/// zero regardless of rotation.
pub fn solve(
    count: usize,
    selected: usize,
    rotation: f32,
    config: &CarouselConfig,
    viewport: &Viewport,
) -> Vec<SlotLayout> {
    let (center_x, center_y) = viewport.center();
    let mut layouts = Vec::with_capacity(count);

    for i in 0..count {
        let azimuth = if count == 1 {
            0.0
        } else {
            config.spacing * (TAU * i as f32 / count as f32 - rotation)
        };

        let z = azimuth.sin() * config.radius;
        let perspective = 1.0 / (1.0 + z / FOCAL_LENGTH);

        let x = center_x + azimuth.cos() * config.radius * perspective;
        let y = center_y;
        let width = THUMBNAIL_WIDTH * perspective;
        let height = THUMBNAIL_HEIGHT * perspective;

        let is_selected = count == 1 || i == selected;
        let alpha = if is_selected {
            1.0
        } else {
            let depth_alpha = 1.0 - z.abs() / config.radius * config.transparency_gradient;
            depth_alpha.max(MIN_ALPHA)
        };

        layouts.push(SlotLayout {
            angle: azimuth,
            screen_box: ScreenBox {
                x: x - width / 2.0,
                y: y - height / 2.0,
                width,
                height,
            },
            alpha,
            is_selected,
        });
    }

    layouts
}

//  Tests
