//! Carousel tuning (`[carousel]` in `mansion.toml`)

use mansion_animation::Easing;
use serde::{Deserialize, Serialize};

/// How wheel input moves the carousel
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WheelMode {
    /// Deltas accumulate until a threshold, then animate exactly one item
    #[default]
    SingleStep,
    /// Deltas move the offset directly; snaps once the wheel goes quiet
    Continuous,
}

/// Gesture and animation constants.
///
/// The defaults are hand-tuned values; a previously generated feel can only
/// be reproduced with the same numbers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CarouselConfig {
    pub wheel_mode: WheelMode,

    /// Single-step accumulator gain per wheel pixel (trackpad)
    pub trackpad_sensitivity: f32,
    /// Single-step accumulator gain per wheel pixel (mouse wheel)
    pub mouse_sensitivity: f32,
    /// Continuous mode offset per wheel pixel (trackpad)
    pub continuous_trackpad_sensitivity: f32,
    /// Continuous mode offset per wheel pixel (mouse wheel)
    pub continuous_mouse_sensitivity: f32,
    /// Vertical deltas below this are assumed to come from a trackpad
    pub trackpad_delta_limit: f32,
    /// Accumulated magnitude that triggers a step
    pub wheel_threshold: f32,
    /// Fraction of the excess over the threshold carried to the next step
    pub wheel_carry: f32,
    /// Wheel input stays ignored this long after a step animation ends
    pub wheel_cooldown_ms: f32,
    /// Continuous mode snaps after this much wheel silence
    pub continuous_snap_delay_ms: f32,

    pub snap_duration_ms: f32,
    pub snap_easing: Easing,

    /// Drag gain numerator; the gain is this over the viewport height
    pub touch_sensitivity: f32,
    /// Exponent (< 1) compressing long drags
    pub drag_exponent: f32,
    /// Converts finger speed in px/ms to offset per frame
    pub touch_velocity_scale: f32,
    /// Weight of the newest sample in the velocity moving average
    pub velocity_smoothing: f32,
    /// Release velocity needed for a fling
    pub fling_min_velocity: f32,
    /// Samples older than this at release carry no velocity
    pub fling_max_idle_ms: f32,
    /// Share of the release velocity the fling starts with
    pub fling_velocity_factor: f32,
    /// Per-frame velocity multiplier while flinging
    pub inertia_damping: f32,
    /// Fling ends below this speed
    pub inertia_min_velocity: f32,

    /// Offset gained per unit dragged past an end
    pub overscroll_resistance: f32,
    /// Furthest the offset may stretch past either end
    pub max_overscroll: f32,

    /// Items within this distance of the offset are rendered
    pub render_radius: f32,
    /// Jumps longer than this ask the renderer to preload the target
    pub jump_preload_distance: usize,

    /// Width fraction on the right edge reserved for the index control
    pub edge_strip: f32,
    pub viewport_width: f32,
    pub viewport_height: f32,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            wheel_mode: WheelMode::SingleStep,
            trackpad_sensitivity: 0.008,
            mouse_sensitivity: 0.004,
            continuous_trackpad_sensitivity: 0.006,
            continuous_mouse_sensitivity: 0.003,
            trackpad_delta_limit: 50.0,
            wheel_threshold: 0.8,
            wheel_carry: 0.5,
            wheel_cooldown_ms: 50.0,
            continuous_snap_delay_ms: 150.0,
            snap_duration_ms: 300.0,
            snap_easing: Easing::EaseInOutCubic,
            touch_sensitivity: 3.5,
            drag_exponent: 0.9,
            touch_velocity_scale: 0.05,
            velocity_smoothing: 0.3,
            fling_min_velocity: 0.02,
            fling_max_idle_ms: 100.0,
            fling_velocity_factor: 0.5,
            inertia_damping: 0.92,
            inertia_min_velocity: 0.01,
            overscroll_resistance: 0.5,
            max_overscroll: 0.3,
            render_radius: 2.0,
            jump_preload_distance: 3,
            edge_strip: 0.03,
            viewport_width: 375.0,
            viewport_height: 800.0,
        }
    }
}

impl CarouselConfig {
    /// Default tuning with continuous wheel scrolling
    pub fn continuous() -> Self {
        Self {
            wheel_mode: WheelMode::Continuous,
            ..Default::default()
        }
    }

    /// Offset change per dragged pixel
    pub fn drag_gain(&self) -> f32 {
        self.touch_sensitivity / self.viewport_height.max(1.0)
    }

    /// Set the viewport size; non-positive or non-finite sizes are ignored
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        if width.is_finite() && width > 0.0 {
            self.viewport_width = width;
        }
        if height.is_finite() && height > 0.0 {
            self.viewport_height = height;
        }
    }
}
