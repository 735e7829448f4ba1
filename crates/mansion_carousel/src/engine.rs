//! Carousel engine
//!
//! Owns the scroll offset over `n` items and turns wheel deltas, touch drags
//! and navigation requests into motion. Motion is advanced only by
//! [`Animated::tick`], so the engine is independent of how frames are
//! scheduled.
//!
//! At most one motion runs at a time. Starting a snap, a fling or a direct
//! jump replaces the previous motion, which is how in-flight animations are
//! cancelled.

use mansion_animation::{Animated, Decay, Tween};
use mansion_core::event_types::*;
use mansion_core::{EventType, TransitionLog};
use smallvec::SmallVec;

use crate::config::{CarouselConfig, WheelMode};
use crate::state::{CarouselPhase, ScrollState};
use crate::window::{item_transforms, visible_window, ItemTransform, WindowIndices};

#[derive(Clone, Copy, Debug, PartialEq)]
enum Motion {
    None,
    Tween { tween: Tween, target: usize },
    Inertia(Decay),
    /// Continuous wheel input, snapping once `remaining_ms` of silence pass
    PendingSnap { remaining_ms: f32 },
}

/// Touch in progress
#[derive(Clone, Copy, Debug, PartialEq)]
struct Drag {
    start_offset: f32,
    /// Previous sample as `(y, elapsed_ms)`
    last_sample: Option<(f32, f32)>,
    has_velocity: bool,
}

#[derive(Debug)]
pub struct CarouselEngine {
    config: CarouselConfig,
    item_count: usize,
    offset: f32,
    current_index: usize,
    velocity: f32,
    accumulator: f32,
    cooldown_ms: f32,
    motion: Motion,
    drag: Option<Drag>,
    phase: TransitionLog<CarouselPhase>,
    preload: Option<usize>,
}

impl CarouselEngine {
    pub fn new(item_count: usize, config: CarouselConfig) -> Self {
        Self {
            config,
            item_count,
            offset: 0.0,
            current_index: 0,
            velocity: 0.0,
            accumulator: 0.0,
            cooldown_ms: 0.0,
            motion: Motion::None,
            drag: None,
            phase: TransitionLog::new(CarouselPhase::Idle),
            preload: None,
        }
    }

    pub fn config(&self) -> &CarouselConfig {
        &self.config
    }

    /// Update the viewport; affects drag gain and item placement
    pub fn set_viewport(&mut self, width: f32, height: f32) {
        self.config.set_viewport(width, height);
    }

    pub fn item_count(&self) -> usize {
        self.item_count
    }

    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn current_index(&self) -> usize {
        self.current_index
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase.current()
    }

    /// Recent phase transitions, oldest first
    pub fn phase_history(&self) -> &[(CarouselPhase, EventType, CarouselPhase)] {
        self.phase.history()
    }

    /// Pending single-step wheel input
    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    pub fn is_animating(&self) -> bool {
        !self.phase.current().is_idle()
    }

    pub fn state(&self) -> ScrollState {
        ScrollState {
            offset: self.offset,
            current_index: self.current_index,
            is_animating: self.is_animating(),
            velocity: self.velocity,
        }
    }

    /// Items the renderer should materialize
    pub fn visible_window(&self) -> WindowIndices {
        visible_window(self.offset, self.item_count, self.config.render_radius)
    }

    /// Placement of every visible item, plus a pending jump target
    pub fn item_transforms(&self) -> SmallVec<[ItemTransform; 8]> {
        item_transforms(
            self.offset,
            self.current_index,
            self.item_count,
            self.config.render_radius,
            self.config.viewport_height,
            self.preload,
        )
    }

    /// The next two items after the current one, for image prefetching
    pub fn preload_indices(&self) -> SmallVec<[usize; 2]> {
        (self.current_index + 1..self.current_index + 3)
            .filter(|&i| i < self.item_count)
            .collect()
    }

    /// Target of the last long jump, until the renderer takes it
    pub fn preload_hint(&self) -> Option<usize> {
        self.preload
    }

    pub fn take_preload_hint(&mut self) -> Option<usize> {
        self.preload.take()
    }

    fn max_index(&self) -> f32 {
        self.item_count.saturating_sub(1) as f32
    }

    fn clamp_index(&self, offset: f32) -> usize {
        offset.round().clamp(0.0, self.max_index()) as usize
    }

    /// A list with fewer than two items has nowhere to go
    fn is_navigable(&self) -> bool {
        self.item_count > 1
    }

    // =========================================================================
    // Wheel input
    // =========================================================================

    /// Feed one wheel delta. `is_precision` marks trackpad-like devices.
    pub fn apply_wheel_delta(&mut self, raw_delta: f32, is_precision: bool) {
        if !raw_delta.is_finite() || !self.is_navigable() {
            return;
        }
        if self.phase.is_in(CarouselPhase::Dragging) {
            return;
        }

        match self.config.wheel_mode {
            WheelMode::SingleStep => self.wheel_step(raw_delta, is_precision),
            WheelMode::Continuous => self.wheel_scroll(raw_delta, is_precision),
        }
    }

    fn wheel_step(&mut self, raw_delta: f32, is_precision: bool) {
        // One gesture moves one item: input during a step and its cooldown
        // is dropped, not queued.
        if self.phase.is_in(CarouselPhase::Animating) || self.cooldown_ms > 0.0 {
            tracing::trace!("wheel delta {:.1} ignored while stepping", raw_delta);
            return;
        }

        let sensitivity = if is_precision {
            self.config.trackpad_sensitivity
        } else {
            self.config.mouse_sensitivity
        };
        self.accumulator += raw_delta * sensitivity;

        let threshold = self.config.wheel_threshold;
        if self.accumulator.abs() < threshold {
            return;
        }

        let direction = self.accumulator.signum();
        let current = (self.offset + 0.5).floor().clamp(0.0, self.max_index()) as usize;
        let target = (current as f32 + direction).clamp(0.0, self.max_index()) as usize;

        if target == current {
            self.accumulator = 0.0;
            return;
        }

        self.accumulator = direction * (self.accumulator.abs() - threshold) * self.config.wheel_carry;
        self.start_tween(target, WHEEL_STEP);
    }

    fn wheel_scroll(&mut self, raw_delta: f32, is_precision: bool) {
        let sensitivity = if is_precision {
            self.config.continuous_trackpad_sensitivity
        } else {
            self.config.continuous_mouse_sensitivity
        };
        let previous = self.offset;
        self.offset = (self.offset + raw_delta * sensitivity).clamp(0.0, self.max_index());
        self.velocity = 0.0;
        self.motion = Motion::PendingSnap {
            remaining_ms: self.config.continuous_snap_delay_ms,
        };
        self.phase.send(WHEEL_SCROLL);
        tracing::trace!("wheel scroll offset: {:.3} -> {:.3}", previous, self.offset);
    }

    // =========================================================================
    // Touch input
    // =========================================================================

    /// A finger touched down. Stops any running motion.
    pub fn begin_touch(&mut self) {
        if !self.is_navigable() {
            return;
        }
        self.motion = Motion::None;
        self.velocity = 0.0;
        self.drag = Some(Drag {
            start_offset: self.offset,
            last_sample: None,
            has_velocity: false,
        });
        self.phase.send(TOUCH_START);
    }

    /// Move the offset with a drag from `start_y` to `current_y`, `elapsed_ms`
    /// after the touch began. Begins a touch implicitly if none is active.
    pub fn apply_touch_drag(&mut self, start_y: f32, current_y: f32, elapsed_ms: f32) {
        if !start_y.is_finite() || !current_y.is_finite() || !self.is_navigable() {
            return;
        }
        if self.drag.is_none() {
            self.begin_touch();
        }
        let Some(mut drag) = self.drag else {
            return;
        };

        // Sub-linear response so long drags do not fly past several items
        let delta = start_y - current_y;
        let eased = delta.signum() * delta.abs().powf(self.config.drag_exponent);
        let previous = self.offset;
        self.offset = self.elastic(drag.start_offset + eased * self.config.drag_gain());

        let (last_y, last_ms) = drag.last_sample.unwrap_or((start_y, 0.0));
        let dt = elapsed_ms - last_ms;
        if elapsed_ms.is_finite() && dt > 0.0 {
            // Finger moving up advances the carousel
            let instant = -(current_y - last_y) / dt * self.config.touch_velocity_scale;
            self.velocity = if drag.has_velocity {
                let alpha = self.config.velocity_smoothing;
                self.velocity * (1.0 - alpha) + instant * alpha
            } else {
                instant
            };
            drag.has_velocity = true;
            drag.last_sample = Some((current_y, elapsed_ms));
        } else if drag.last_sample.is_none() {
            drag.last_sample = Some((current_y, 0.0));
        }
        self.drag = Some(drag);

        tracing::trace!(
            "drag delta={:.1} offset: {:.3} -> {:.3} velocity={:.4}",
            delta,
            previous,
            self.offset,
            self.velocity
        );
    }

    /// Finger lifted right after the last sample
    pub fn release_touch(&mut self) {
        self.release_touch_after(0.0);
    }

    /// Finger lifted `idle_ms` after the last sample. A stale sample means the
    /// finger stopped before lifting, so no fling happens.
    pub fn release_touch_after(&mut self, idle_ms: f32) {
        if self.drag.take().is_none() {
            return;
        }

        let fresh = idle_ms.is_finite() && idle_ms < self.config.fling_max_idle_ms;
        if fresh && self.velocity.abs() > self.config.fling_min_velocity {
            let decay = Decay::new(
                self.velocity * self.config.fling_velocity_factor,
                self.config.inertia_damping,
                self.config.inertia_min_velocity,
            );
            self.velocity = decay.velocity();
            self.motion = Motion::Inertia(decay);
            self.phase.send(TOUCH_FLING);
            tracing::debug!("fling from {:.3} at {:.4}/frame", self.offset, self.velocity);
        } else {
            self.phase.send(TOUCH_END);
            self.snap_to_nearest();
        }
    }

    /// Rubber band past either end, capped at `max_overscroll`
    fn elastic(&self, raw: f32) -> f32 {
        let max = self.max_index();
        let resistance = self.config.overscroll_resistance;
        let limit = self.config.max_overscroll;
        if raw < 0.0 {
            (raw * resistance).max(-limit)
        } else if raw > max {
            max + ((raw - max) * resistance).min(limit)
        } else {
            raw
        }
    }

    // =========================================================================
    // Navigation
    // =========================================================================

    /// Ease to `target` over the snap duration. A no-op when already at rest
    /// on `target`.
    pub fn animate_to(&mut self, target: usize) {
        if self.item_count == 0 {
            return;
        }
        let target = target.min(self.item_count - 1);
        if self.phase.is_in(CarouselPhase::Idle)
            && self.current_index == target
            && self.offset == target as f32
        {
            return;
        }
        self.start_tween(target, ANIMATE);
    }

    /// Move to `index` without animation. Returns the index when the jump is
    /// long enough that the renderer should preload it.
    pub fn jump_to(&mut self, index: usize) -> Option<usize> {
        if self.item_count == 0 {
            return None;
        }
        let index = index.min(self.item_count - 1);
        let distance = index.abs_diff(self.current_index);
        self.preload = (distance > self.config.jump_preload_distance).then_some(index);

        self.drag = None;
        self.accumulator = 0.0;
        self.phase.send(CANCEL);
        self.settle(index);
        tracing::debug!("jumped to {} (distance {})", index, distance);
        self.preload
    }

    /// Forget all position state; call whenever the item list is replaced
    pub fn reset_for_filter_change(&mut self, item_count: usize) {
        self.item_count = item_count;
        self.offset = 0.0;
        self.current_index = 0;
        self.velocity = 0.0;
        self.accumulator = 0.0;
        self.cooldown_ms = 0.0;
        self.motion = Motion::None;
        self.drag = None;
        self.preload = None;
        self.phase.send(CANCEL);
        tracing::debug!("carousel reset for {} items", item_count);
    }

    fn start_tween(&mut self, target: usize, event: EventType) {
        let tween = Tween::new(
            self.offset,
            target as f32,
            self.config.snap_duration_ms,
            self.config.snap_easing,
        );
        self.motion = Motion::Tween { tween, target };
        self.drag = None;
        self.velocity = 0.0;
        self.preload = None;
        self.phase.send(event);
        tracing::debug!("snap {:.3} -> {}", self.offset, target);
    }

    fn snap_to_nearest(&mut self) {
        let index = self.clamp_index(self.offset);
        self.settle(index);
    }

    fn settle(&mut self, index: usize) {
        self.offset = index as f32;
        self.current_index = index;
        self.velocity = 0.0;
        self.motion = Motion::None;
        self.phase.send(SETTLED);
    }

    /// True while ticks still change something
    pub fn needs_frame(&self) -> bool {
        self.motion != Motion::None || self.cooldown_ms > 0.0
    }
}

impl Animated for CarouselEngine {
    fn tick(&mut self, dt_ms: f32) -> bool {
        let dt = if dt_ms.is_finite() && dt_ms > 0.0 {
            dt_ms
        } else {
            0.0
        };
        if self.cooldown_ms > 0.0 {
            self.cooldown_ms = (self.cooldown_ms - dt).max(0.0);
        }

        let previous = self.offset;
        match self.motion {
            Motion::None => {}
            Motion::Tween { mut tween, target } => {
                self.offset = tween.advance(dt);
                if tween.is_finished() {
                    self.settle(target);
                    self.cooldown_ms = self.config.wheel_cooldown_ms;
                } else {
                    self.motion = Motion::Tween { tween, target };
                }
            }
            Motion::Inertia(mut decay) => match decay.step() {
                Some(delta) => {
                    let next = self.offset + delta;
                    let max = self.max_index();
                    if next < 0.0 || next > max {
                        self.offset = next.clamp(0.0, max);
                        self.snap_to_nearest();
                    } else {
                        self.offset = next;
                        self.velocity = decay.velocity();
                        self.motion = Motion::Inertia(decay);
                    }
                }
                None => self.snap_to_nearest(),
            },
            Motion::PendingSnap { remaining_ms } => {
                let remaining_ms = remaining_ms - dt;
                if remaining_ms <= 0.0 {
                    let target = self.clamp_index(self.offset);
                    self.start_tween(target, ANIMATE);
                } else {
                    self.motion = Motion::PendingSnap { remaining_ms };
                }
            }
        }

        if self.offset != previous {
            tracing::trace!("tick dt={:.1} offset: {:.3} -> {:.3}", dt, previous, self.offset);
        }
        self.needs_frame()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mansion_animation::Easing;

    fn engine(n: usize) -> CarouselEngine {
        CarouselEngine::new(n, CarouselConfig::default())
    }

    fn run_to_rest(engine: &mut CarouselEngine) -> usize {
        let mut frames = 0;
        while engine.tick(16.0) {
            frames += 1;
            assert!(frames < 10_000, "engine never settled");
        }
        frames
    }

    #[test]
    fn test_single_mouse_event_accumulates() {
        let mut e = engine(5);
        e.apply_wheel_delta(100.0, false);
        assert!((e.accumulator() - 0.4).abs() < 1e-6);
        assert_eq!(e.current_index(), 0);
        assert_eq!(e.phase(), CarouselPhase::Idle);
        assert!(!e.needs_frame());
    }

    #[test]
    fn test_two_mouse_events_step_once() {
        let mut e = engine(5);
        e.apply_wheel_delta(100.0, false);
        e.apply_wheel_delta(100.0, false);
        assert_eq!(e.phase(), CarouselPhase::Animating);
        assert!(e.accumulator().abs() < 1e-6);

        run_to_rest(&mut e);
        assert_eq!(e.current_index(), 1);
        assert_eq!(e.offset(), 1.0);
        assert!(!e.state().is_animating);
    }

    #[test]
    fn test_wheel_ignored_during_step_and_cooldown() {
        let mut e = engine(5);
        e.apply_wheel_delta(200.0, false);
        assert_eq!(e.phase(), CarouselPhase::Animating);
        e.apply_wheel_delta(1000.0, false);
        e.apply_wheel_delta(1000.0, false);

        // Tween alone: 300ms at 16ms per frame
        for _ in 0..19 {
            e.tick(16.0);
        }
        assert_eq!(e.current_index(), 1);
        assert_eq!(e.phase(), CarouselPhase::Idle);

        // Still cooling down
        e.apply_wheel_delta(1000.0, false);
        assert_eq!(e.phase(), CarouselPhase::Idle);

        run_to_rest(&mut e);
        e.apply_wheel_delta(1000.0, false);
        assert_eq!(e.phase(), CarouselPhase::Animating);
        run_to_rest(&mut e);
        assert_eq!(e.current_index(), 2);
    }

    #[test]
    fn test_remainder_is_halved() {
        let mut e = engine(5);
        // 0.004 * 300 = 1.2, excess 0.4, carried 0.2
        e.apply_wheel_delta(300.0, false);
        assert!((e.accumulator() - 0.2).abs() < 1e-6);

        let mut e = engine(5);
        e.apply_wheel_delta(-300.0, false);
        // Already at the first item: nothing to do, nothing carried
        assert_eq!(e.accumulator(), 0.0);
        assert_eq!(e.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn test_trackpad_sensitivity() {
        let mut e = engine(5);
        e.apply_wheel_delta(40.0, true);
        assert!((e.accumulator() - 0.32).abs() < 1e-6);
    }

    #[test]
    fn test_touch_drag_scenario() {
        let mut e = engine(5);
        e.begin_touch();
        e.apply_touch_drag(600.0, 400.0, 300.0);
        let expected = 200f32.powf(0.9) * 3.5 / 800.0;
        assert!((e.offset() - expected).abs() < 1e-5);
        assert!((e.offset() - 0.515).abs() < 0.01);
        assert_eq!(e.phase(), CarouselPhase::Dragging);

        // Finger rested before lifting
        e.release_touch_after(150.0);
        assert_eq!(e.current_index(), 1);
        assert_eq!(e.offset(), 1.0);
        assert_eq!(e.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn test_drag_overscroll_is_bounded() {
        let mut e = engine(3);
        e.apply_touch_drag(100.0, 700.0, 100.0);
        assert!(e.offset() < 0.0);
        assert!(e.offset() >= -0.3);

        e.apply_touch_drag(100.0, 2000.0, 200.0);
        assert_eq!(e.offset(), -0.3);
        e.release_touch_after(500.0);
        assert_eq!(e.offset(), 0.0);
        assert_eq!(e.current_index(), 0);
    }

    #[test]
    fn test_fling_decays_and_snaps() {
        let mut e = engine(10);
        e.begin_touch();
        // 40px every 16ms upward
        for i in 1..=5 {
            e.apply_touch_drag(700.0, 700.0 - 40.0 * i as f32, 16.0 * i as f32);
        }
        assert!(e.state().velocity > 0.1);
        e.release_touch();
        assert_eq!(e.phase(), CarouselPhase::InertiaDecaying);

        let released_at = e.offset();
        run_to_rest(&mut e);
        assert!(e.offset() > released_at);
        assert_eq!(e.offset(), e.current_index() as f32);
        assert_eq!(e.phase(), CarouselPhase::Idle);
    }

    #[test]
    fn test_fling_stops_at_edge() {
        let mut e = engine(2);
        e.begin_touch();
        for i in 1..=5 {
            e.apply_touch_drag(700.0, 700.0 - 80.0 * i as f32, 10.0 * i as f32);
        }
        e.release_touch();
        run_to_rest(&mut e);
        assert_eq!(e.current_index(), 1);
        assert_eq!(e.offset(), 1.0);
    }

    #[test]
    fn test_animate_to_is_idempotent_at_rest() {
        let mut e = engine(5);
        e.animate_to(0);
        assert_eq!(e.phase(), CarouselPhase::Idle);
        assert!(!e.needs_frame());
        assert!(e.phase_history().is_empty());

        e.animate_to(3);
        run_to_rest(&mut e);
        let history = e.phase_history().len();
        e.animate_to(3);
        assert_eq!(e.phase_history().len(), history);
        assert_eq!(e.state().offset, 3.0);
    }

    #[test]
    fn test_snap_easing_shapes_animation() {
        let offset_at_quarter = |easing: Easing| {
            let config = CarouselConfig {
                snap_easing: easing,
                ..CarouselConfig::default()
            };
            let mut e = CarouselEngine::new(5, config);
            e.animate_to(2);
            e.tick(75.0);
            e.offset()
        };
        assert!((offset_at_quarter(Easing::Linear) - 0.5).abs() < 1e-5);
        assert!((offset_at_quarter(Easing::EaseInOutCubic) - 0.125).abs() < 1e-5);
        assert!((offset_at_quarter(Easing::EaseOutCubic) - 1.15625).abs() < 1e-5);
    }

    #[test]
    fn test_animate_to_clamps_target() {
        let mut e = engine(4);
        e.animate_to(99);
        run_to_rest(&mut e);
        assert_eq!(e.current_index(), 3);
    }

    #[test]
    fn test_new_animation_replaces_running_one() {
        let mut e = engine(10);
        e.animate_to(5);
        e.tick(100.0);
        e.animate_to(2);
        run_to_rest(&mut e);
        assert_eq!(e.current_index(), 2);
        assert_eq!(e.offset(), 2.0);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut e = engine(10);
        e.animate_to(7);
        e.tick(50.0);
        e.apply_touch_drag(0.0, 300.0, 16.0);
        e.reset_for_filter_change(4);
        let state = e.state();
        assert_eq!(state.offset, 0.0);
        assert_eq!(state.current_index, 0);
        assert_eq!(state.velocity, 0.0);
        assert!(!state.is_animating);
        assert_eq!(e.accumulator(), 0.0);
        assert_eq!(e.item_count(), 4);
        assert!(!e.needs_frame());
    }

    #[test]
    fn test_single_item_ignores_navigation() {
        let mut e = engine(1);
        e.apply_wheel_delta(1000.0, false);
        e.apply_touch_drag(500.0, 100.0, 50.0);
        e.release_touch();
        e.animate_to(4);
        run_to_rest(&mut e);
        assert_eq!(e.current_index(), 0);
        assert_eq!(e.offset(), 0.0);
    }

    #[test]
    fn test_malformed_input_is_ignored() {
        let mut e = engine(5);
        e.apply_wheel_delta(f32::NAN, false);
        e.apply_wheel_delta(f32::INFINITY, true);
        e.apply_touch_drag(f32::NAN, 10.0, 16.0);
        assert_eq!(e.state(), ScrollState::default());
        assert!(!e.tick(f32::NAN));

        let mut empty = engine(0);
        empty.animate_to(2);
        assert_eq!(empty.jump_to(3), None);
        assert!(empty.visible_window().is_empty());
    }

    #[test]
    fn test_jump_and_preload() {
        let mut e = engine(20);
        assert_eq!(e.jump_to(2), None);
        assert_eq!(e.current_index(), 2);
        assert_eq!(e.offset(), 2.0);
        assert_eq!(e.preload_indices().into_vec(), vec![3, 4]);

        assert_eq!(e.jump_to(12), Some(12));
        assert_eq!(e.preload_hint(), Some(12));
        assert_eq!(e.take_preload_hint(), Some(12));
        assert_eq!(e.preload_hint(), None);

        e.jump_to(19);
        assert!(e.preload_indices().is_empty());
    }

    #[test]
    fn test_continuous_mode_snaps_after_silence() {
        let mut e = CarouselEngine::new(5, CarouselConfig::continuous());
        e.apply_wheel_delta(100.0, false);
        e.apply_wheel_delta(100.0, false);
        assert!((e.offset() - 0.6).abs() < 1e-6);
        assert_eq!(e.phase(), CarouselPhase::Scrolling);

        // Not yet quiet for long enough
        e.tick(100.0);
        assert_eq!(e.phase(), CarouselPhase::Scrolling);
        e.tick(60.0);
        assert_eq!(e.phase(), CarouselPhase::Animating);

        run_to_rest(&mut e);
        assert_eq!(e.current_index(), 1);
        assert_eq!(e.offset(), 1.0);
    }
}
