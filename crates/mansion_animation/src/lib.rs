//! Mansion Animation
//!
//! Time-based motion primitives for the dish carousel.
//!
//! # Features
//!
//! - **Easing**: Linear and cubic curves, selectable from configuration
//! - **Tweens**: Fixed-duration eased interpolation between two values
//! - **Decay**: Per-frame multiplicative velocity damping for flings
//! - **Frame clock**: Measures frame deltas and drives [`Animated`] targets
//!
//! Everything except [`FrameClock`] is pure: the caller supplies elapsed
//! time, so the same inputs always produce the same motion.

pub mod decay;
pub mod easing;
pub mod scheduler;
pub mod tween;

pub use decay::Decay;
pub use easing::Easing;
pub use scheduler::{Animated, FrameClock};
pub use tween::Tween;
