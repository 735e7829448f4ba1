//! Gesture input events
//!
//! Platform-agnostic wheel and touch input consumed by the carousel. Hosts
//! translate their native events (DOM, winit, mobile touch) into
//! [`GestureEvent`] values.

/// Event type identifier used by state transition tables
pub type EventType = u32;

/// Event types driving the carousel phase machine
pub mod event_types {
    use super::EventType;

    /// Wheel input crossed the step threshold and requested a snap
    pub const WHEEL_STEP: EventType = 1;
    /// Continuous wheel input moved the offset directly
    pub const WHEEL_SCROLL: EventType = 2;
    /// A finger touched down on the gesture surface
    pub const TOUCH_START: EventType = 10;
    /// Touch released with enough velocity to fling
    pub const TOUCH_FLING: EventType = 11;
    /// Touch released without enough velocity
    pub const TOUCH_END: EventType = 12;
    /// A tween animation toward a target index started
    pub const ANIMATE: EventType = 20;
    /// Motion reached its target (tween finished or inertia decayed)
    pub const SETTLED: EventType = 21;
    /// Motion cancelled by a reset or a direct jump
    pub const CANCEL: EventType = 22;
}

/// Keyboard modifier flags held during a gesture
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Modifiers {
    bits: u8,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers { bits: 0 };
    pub const SHIFT: u8 = 0b0001;
    pub const CTRL: u8 = 0b0010;
    pub const ALT: u8 = 0b0100;
    pub const META: u8 = 0b1000; // Cmd on macOS, Win on Windows

    /// Create new modifiers from flags
    pub const fn new(shift: bool, ctrl: bool, alt: bool, meta: bool) -> Self {
        let mut bits = 0;
        if shift {
            bits |= Self::SHIFT;
        }
        if ctrl {
            bits |= Self::CTRL;
        }
        if alt {
            bits |= Self::ALT;
        }
        if meta {
            bits |= Self::META;
        }
        Self { bits }
    }

    pub const fn ctrl(&self) -> bool {
        self.bits & Self::CTRL != 0
    }

    pub const fn meta(&self) -> bool {
        self.bits & Self::META != 0
    }

    /// Ctrl or Meta held; browsers reserve these wheel events for zoom
    pub const fn is_zoom_chord(&self) -> bool {
        self.ctrl() || self.meta()
    }
}

/// A single touch sample in screen coordinates
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TouchPoint {
    pub x: f32,
    pub y: f32,
    /// Milliseconds on the host's monotonic clock
    pub timestamp_ms: f64,
}

impl TouchPoint {
    pub fn new(x: f32, y: f32, timestamp_ms: f64) -> Self {
        Self { x, y, timestamp_ms }
    }
}

/// Raw gesture input delivered by the host
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum GestureEvent {
    Wheel {
        delta_x: f32,
        delta_y: f32,
        modifiers: Modifiers,
    },
    TouchStart(TouchPoint),
    TouchMove(TouchPoint),
    TouchEnd {
        timestamp_ms: f64,
    },
}

impl GestureEvent {
    /// Convenience constructor for an unmodified vertical wheel event
    pub fn wheel(delta_y: f32) -> Self {
        Self::Wheel {
            delta_x: 0.0,
            delta_y,
            modifiers: Modifiers::NONE,
        }
    }
}
