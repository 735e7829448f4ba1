//! Couples the engine with a real-time frame clock

use mansion_animation::FrameClock;
use mansion_core::GestureEvent;

use crate::engine::CarouselEngine;
use crate::gesture::GestureRouter;

/// Host-facing wrapper: feed events with [`input`](Self::input) and call
/// [`frame`](Self::frame) once per display refresh.
#[derive(Debug)]
pub struct CarouselDriver {
    engine: CarouselEngine,
    router: GestureRouter,
    clock: FrameClock,
}

impl CarouselDriver {
    pub fn new(engine: CarouselEngine) -> Self {
        Self {
            engine,
            router: GestureRouter::new(),
            clock: FrameClock::new(),
        }
    }

    pub fn engine(&self) -> &CarouselEngine {
        &self.engine
    }

    pub fn engine_mut(&mut self) -> &mut CarouselEngine {
        &mut self.engine
    }

    /// Route a gesture event; returns whether the carousel consumed it
    pub fn input(&mut self, event: GestureEvent) -> bool {
        let was_resting = !self.engine.needs_frame();
        let consumed = self.router.handle(&mut self.engine, event);
        if was_resting && self.engine.needs_frame() {
            // Time spent at rest must not become the first frame's delta
            self.clock.reset();
        }
        consumed
    }

    /// Advance by the real time since the previous frame. Returns whether
    /// another frame should be scheduled.
    pub fn frame(&mut self) -> bool {
        if !self.engine.needs_frame() {
            self.clock.reset();
            return false;
        }
        self.clock.drive(&mut self.engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;

    #[test]
    fn test_frames_until_settled() {
        let mut config = CarouselConfig::default();
        config.snap_duration_ms = 0.0;
        config.wheel_cooldown_ms = 0.0;
        let mut driver = CarouselDriver::new(CarouselEngine::new(3, config));

        assert!(!driver.frame());
        assert!(driver.input(GestureEvent::wheel(400.0)));
        assert!(driver.engine().needs_frame());

        let mut frames = 0;
        while driver.frame() {
            frames += 1;
            assert!(frames < 100);
        }
        assert_eq!(driver.engine().current_index(), 1);
    }
}
