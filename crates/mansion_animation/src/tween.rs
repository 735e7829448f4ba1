//! Fixed-duration eased interpolation

use crate::easing::Easing;

/// Interpolates from `start` to `end` over `duration_ms` with an easing curve.
///
/// The tween owns only its elapsed time; callers advance it with frame
/// deltas and read the value back.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    start: f32,
    end: f32,
    duration_ms: f32,
    elapsed_ms: f32,
    easing: Easing,
}

impl Tween {
    pub fn new(start: f32, end: f32, duration_ms: f32, easing: Easing) -> Self {
        Self {
            start,
            end,
            duration_ms: duration_ms.max(0.0),
            elapsed_ms: 0.0,
            easing,
        }
    }

    /// Linear progress in `[0, 1]`
    pub fn progress(&self) -> f32 {
        if self.duration_ms <= 0.0 {
            return 1.0;
        }
        (self.elapsed_ms / self.duration_ms).min(1.0)
    }

    /// Value at an arbitrary elapsed time, without mutating the tween
    pub fn value_at(&self, elapsed_ms: f32) -> f32 {
        let progress = if self.duration_ms <= 0.0 {
            1.0
        } else {
            (elapsed_ms / self.duration_ms).clamp(0.0, 1.0)
        };
        if progress >= 1.0 {
            return self.end;
        }
        self.start + (self.end - self.start) * self.easing.apply(progress)
    }

    pub fn value(&self) -> f32 {
        self.value_at(self.elapsed_ms)
    }

    /// Advance by `dt_ms` and return the new value
    pub fn advance(&mut self, dt_ms: f32) -> f32 {
        if dt_ms.is_finite() && dt_ms > 0.0 {
            self.elapsed_ms = (self.elapsed_ms + dt_ms).min(self.duration_ms);
        }
        self.value()
    }

    pub fn is_finished(&self) -> bool {
        self.progress() >= 1.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tween_reaches_end_exactly() {
        let mut tween = Tween::new(0.0, 1.0, 300.0, Easing::EaseInOutCubic);
        let mut frames = 0;
        while !tween.is_finished() {
            tween.advance(16.0);
            frames += 1;
        }
        assert_eq!(frames, 19);
        assert_eq!(tween.value(), 1.0);
    }

    #[test]
    fn test_midpoint_of_symmetric_curve() {
        let tween = Tween::new(2.0, 4.0, 300.0, Easing::EaseInOutCubic);
        assert!((tween.value_at(150.0) - 3.0).abs() < 1e-5);
        assert_eq!(tween.value_at(0.0), 2.0);
    }

    #[test]
    fn test_zero_duration_is_immediately_finished() {
        let tween = Tween::new(0.0, 3.0, 0.0, Easing::Linear);
        assert!(tween.is_finished());
        assert_eq!(tween.value(), 3.0);
    }

    #[test]
    fn test_invalid_deltas_are_ignored() {
        let mut tween = Tween::new(0.0, 1.0, 100.0, Easing::Linear);
        tween.advance(f32::NAN);
        tween.advance(-10.0);
        assert_eq!(tween.progress(), 0.0);
        assert_eq!(tween.value(), 0.0);
    }
}
