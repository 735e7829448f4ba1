//! Routes raw gesture events to the engine

use mansion_core::{GestureEvent, TouchPoint};

use crate::engine::CarouselEngine;
use crate::state::CarouselPhase;

/// Heuristic used by browsers' wheel events: trackpads produce small vertical
/// deltas or any horizontal component, mouse wheels produce coarse vertical
/// notches.
pub fn is_precision_wheel(delta_x: f32, delta_y: f32, delta_limit: f32) -> bool {
    delta_y.abs() < delta_limit || delta_x != 0.0
}

#[derive(Clone, Copy, Debug)]
struct TouchTrack {
    start: TouchPoint,
    last: TouchPoint,
}

/// Per-gesture bookkeeping between [`GestureEvent`]s and [`CarouselEngine`]
#[derive(Debug, Default)]
pub struct GestureRouter {
    touch: Option<TouchTrack>,
}

impl GestureRouter {
    pub fn new() -> Self {
        Self::default()
    }

    /// True while a touch that started outside the reserved strip is down
    pub fn is_tracking_touch(&self) -> bool {
        self.touch.is_some()
    }

    /// Feed one event. Returns false when the event was left for the host
    /// (zoom chords, touches in the edge strip, stray moves).
    pub fn handle(&mut self, engine: &mut CarouselEngine, event: GestureEvent) -> bool {
        match event {
            GestureEvent::Wheel {
                delta_x,
                delta_y,
                modifiers,
            } => {
                if modifiers.is_zoom_chord() {
                    return false;
                }
                let precision =
                    is_precision_wheel(delta_x, delta_y, engine.config().trackpad_delta_limit);
                engine.apply_wheel_delta(delta_y, precision);
                true
            }

            GestureEvent::TouchStart(point) => {
                let config = engine.config();
                let strip_start = config.viewport_width * (1.0 - config.edge_strip);
                if point.x > strip_start {
                    tracing::trace!("touch at x={:.0} belongs to the index strip", point.x);
                    self.touch = None;
                    return false;
                }
                self.touch = Some(TouchTrack {
                    start: point,
                    last: point,
                });
                engine.begin_touch();
                true
            }

            GestureEvent::TouchMove(point) => {
                let Some(track) = self.touch.as_mut() else {
                    return false;
                };
                // Navigation took over mid-touch; the rest of this touch is stale
                if engine.phase() != CarouselPhase::Dragging {
                    self.touch = None;
                    return false;
                }
                let elapsed = (point.timestamp_ms - track.start.timestamp_ms) as f32;
                engine.apply_touch_drag(track.start.y, point.y, elapsed);
                track.last = point;
                true
            }

            GestureEvent::TouchEnd { timestamp_ms } => {
                let Some(track) = self.touch.take() else {
                    return false;
                };
                let idle = (timestamp_ms - track.last.timestamp_ms) as f32;
                engine.release_touch_after(idle);
                true
            }
        }
    }
}
