//! Frame pacing
//!
//! Separates "what is the next value" (pure, inside each [`Animated`]
//! implementation) from "when does the next frame run" (the host's clock).

use std::time::Instant;

/// Something advanced once per frame by the elapsed milliseconds
pub trait Animated {
    /// Advance by `dt_ms`. Returns true while more frames are needed.
    fn tick(&mut self, dt_ms: f32) -> bool;
}

/// Longest frame delta forwarded to animations; longer gaps (a suspended
/// tab, a debugger pause) are treated as one slow frame
const MAX_FRAME_MS: f32 = 100.0;

/// Measures real time between frames and forwards it to animations
#[derive(Debug)]
pub struct FrameClock {
    last_frame: Instant,
}

impl FrameClock {
    pub fn new() -> Self {
        Self {
            last_frame: Instant::now(),
        }
    }

    /// Restart measurement, e.g. after the host was idle
    pub fn reset(&mut self) {
        self.last_frame = Instant::now();
    }

    /// Milliseconds since the previous call, capped at [`MAX_FRAME_MS`]
    pub fn elapsed_ms(&mut self) -> f32 {
        let now = Instant::now();
        let dt = (now - self.last_frame).as_secs_f32() * 1000.0;
        self.last_frame = now;
        dt.min(MAX_FRAME_MS)
    }

    /// Tick one animation with the measured frame delta
    pub fn drive<A: Animated + ?Sized>(&mut self, target: &mut A) -> bool {
        let dt = self.elapsed_ms();
        tracing::trace!("frame dt={:.2}ms", dt);
        target.tick(dt)
    }
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Counter {
        remaining: u32,
        total_ms: f32,
    }

    impl Animated for Counter {
        fn tick(&mut self, dt_ms: f32) -> bool {
            self.total_ms += dt_ms;
            self.remaining = self.remaining.saturating_sub(1);
            self.remaining > 0
        }
    }

    #[test]
    fn test_drive_until_done() {
        let mut clock = FrameClock::new();
        let mut counter = Counter {
            remaining: 3,
            total_ms: 0.0,
        };
        let mut frames = 1;
        while clock.drive(&mut counter) {
            frames += 1;
        }
        assert_eq!(frames, 3);
        assert!(counter.total_ms >= 0.0);
        assert!(counter.total_ms <= 3.0 * MAX_FRAME_MS);
    }

    #[test]
    fn test_long_gap_is_capped() {
        let mut clock = FrameClock::new();
        std::thread::sleep(std::time::Duration::from_millis(120));
        assert_eq!(clock.elapsed_ms(), MAX_FRAME_MS);
        assert!(clock.elapsed_ms() < MAX_FRAME_MS);
    }
}
