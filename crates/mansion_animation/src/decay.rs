//! Multiplicative velocity decay
//!
//! A fling keeps moving by its velocity each frame while the velocity is
//! multiplied by a damping factor. Motion stops once the velocity magnitude
//! drops under `min_velocity`.

/// Frame-stepped inertia
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decay {
    velocity: f32,
    damping: f32,
    min_velocity: f32,
}

impl Decay {
    /// `damping` is clamped into `[0, 1)` so the motion always terminates
    pub fn new(velocity: f32, damping: f32, min_velocity: f32) -> Self {
        Self {
            velocity: if velocity.is_finite() { velocity } else { 0.0 },
            damping: damping.clamp(0.0, 0.999),
            min_velocity: min_velocity.abs(),
        }
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_settled(&self) -> bool {
        self.velocity.abs() < self.min_velocity
    }

    /// Displacement for this frame, or None once settled.
    ///
    /// Velocity is damped after being applied, so the first step moves by
    /// the full initial velocity.
    pub fn step(&mut self) -> Option<f32> {
        if self.is_settled() {
            return None;
        }
        let delta = self.velocity;
        self.velocity *= self.damping;
        Some(delta)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_step_uses_full_velocity() {
        let mut decay = Decay::new(0.1, 0.92, 0.01);
        assert_eq!(decay.step(), Some(0.1));
        assert!((decay.velocity() - 0.092).abs() < 1e-6);
    }

    #[test]
    fn test_decay_terminates() {
        let mut decay = Decay::new(-0.5, 0.92, 0.01);
        let mut steps = 0;
        while decay.step().is_some() {
            steps += 1;
            assert!(steps < 1000);
        }
        assert!(decay.is_settled());
        // 0.5 * 0.92^n < 0.01  =>  n = 47
        assert_eq!(steps, 47);
    }

    #[test]
    fn test_below_minimum_never_moves() {
        let mut decay = Decay::new(0.005, 0.92, 0.01);
        assert_eq!(decay.step(), None);
        assert!(decay.is_settled());
    }

    #[test]
    fn test_non_finite_velocity_is_zeroed() {
        let decay = Decay::new(f32::NAN, 0.92, 0.01);
        assert_eq!(decay.velocity(), 0.0);
        assert!(decay.is_settled());
    }

    #[test]
    fn test_steps_keep_the_sign() {
        let mut decay = Decay::new(-0.2, 0.92, 0.01);
        while let Some(delta) = decay.step() {
            assert!(delta < 0.0);
        }
        assert!(decay.velocity() <= 0.0);
    }
}
