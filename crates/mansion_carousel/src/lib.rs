//! Mansion Carousel
//!
//! A vertical, one-item-per-screen carousel driven by wheel and touch input.
//!
//! # Model
//!
//! Position is a single continuous `offset`: item `i` is centered when
//! `offset == i`. Input moves the offset, and every gesture ends by snapping
//! back to an integer. Only items near the offset are rendered
//! ([`visible_window`]), each with a transform derived from its distance to
//! the offset ([`ItemTransform`]).
//!
//! - Wheel: single-step (one item per gesture, accumulated with a threshold)
//!   or continuous (offset follows the wheel, snap after a pause)
//! - Touch: eased drag with rubber-band overscroll, optional fling with
//!   decaying inertia
//! - Navigation: eased [`animate_to`](CarouselEngine::animate_to) and instant
//!   [`jump_to`](CarouselEngine::jump_to)
//!
//! The engine has no clock of its own. Hosts call
//! [`Animated::tick`](mansion_animation::Animated::tick) with frame deltas,
//! or wrap it in a [`CarouselDriver`].
//!
//! # Example
//!
//! ```
//! use mansion_animation::Animated;
//! use mansion_carousel::{CarouselConfig, CarouselEngine};
//!
//! let mut carousel = CarouselEngine::new(10, CarouselConfig::default());
//! carousel.apply_wheel_delta(100.0, false);
//! carousel.apply_wheel_delta(100.0, false);
//! while carousel.tick(16.0) {}
//! assert_eq!(carousel.current_index(), 1);
//! assert_eq!(carousel.offset(), 1.0);
//! ```

pub mod config;
pub mod driver;
pub mod engine;
pub mod gesture;
pub mod state;
pub mod theme;
pub mod window;

pub use config::{CarouselConfig, WheelMode};
pub use driver::CarouselDriver;
pub use engine::CarouselEngine;
pub use gesture::{is_precision_wheel, GestureRouter};
pub use state::{CarouselPhase, ScrollState};
pub use theme::{category_palette, BackgroundTheme, ThemeResolver};
pub use window::{item_transforms, visible_window, ItemTransform, WindowIndices};
