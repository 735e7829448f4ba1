//! Scroll state and the carousel phase machine

use mansion_core::event_types::*;
use mansion_core::{EventType, StateTransitions};
use serde::Serialize;

/// Snapshot of the carousel position handed to renderers
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScrollState {
    /// Continuous position; integers denote a settled item
    pub offset: f32,
    /// Last settled item
    pub current_index: usize,
    /// True while anything other than rest is going on
    pub is_animating: bool,
    /// Signed offset change per frame (drag estimate or fling speed)
    pub velocity: f32,
}

/// What is currently moving the offset
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CarouselPhase {
    /// At rest on `current_index`
    #[default]
    Idle,
    /// Continuous wheel input is moving the offset
    Scrolling,
    /// A finger is on the surface
    Dragging,
    /// Eased snap toward a target index
    Animating,
    /// Released fling losing speed every frame
    InertiaDecaying,
}

impl StateTransitions for CarouselPhase {
    fn on_event(&self, event: EventType) -> Option<Self> {
        use CarouselPhase::*;

        match (self, event) {
            (Idle | Scrolling | InertiaDecaying, WHEEL_STEP) => Some(Animating),
            (Idle | Scrolling | Dragging | InertiaDecaying, ANIMATE) => Some(Animating),
            (Idle | Animating | InertiaDecaying, WHEEL_SCROLL) => Some(Scrolling),
            (Idle | Scrolling | Animating | InertiaDecaying, TOUCH_START) => Some(Dragging),

            (Dragging, TOUCH_FLING) => Some(InertiaDecaying),
            (Dragging, TOUCH_END) => Some(Idle),

            (Scrolling | Animating | InertiaDecaying, SETTLED) => Some(Idle),
            (Scrolling | Dragging | Animating | InertiaDecaying, CANCEL) => Some(Idle),

            _ => None,
        }
    }
}

impl CarouselPhase {
    pub fn is_idle(&self) -> bool {
        matches!(self, CarouselPhase::Idle)
    }

    /// Phases advanced by frame ticks
    pub fn is_animating(&self) -> bool {
        matches!(
            self,
            CarouselPhase::Scrolling | CarouselPhase::Animating | CarouselPhase::InertiaDecaying
        )
    }
}
