//! State transitions
//!
//! Flat state machines expressed as `Copy` enums. Each state decides which
//! events it reacts to; unknown events leave the state unchanged. A small
//! bounded history is kept alongside for debugging.

use crate::events::EventType;

/// Trait for phase enums driven by [`EventType`] values
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + std::hash::Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// Maximum number of transitions kept in a [`TransitionLog`]
const MAX_HISTORY: usize = 32;

/// Current state plus a bounded history of `(from, event, to)` transitions
#[derive(Clone, Debug)]
pub struct TransitionLog<S: StateTransitions> {
    current: S,
    history: Vec<(S, EventType, S)>,
}

impl<S: StateTransitions> TransitionLog<S> {
    pub fn new(initial: S) -> Self {
        Self {
            current: initial,
            history: Vec::new(),
        }
    }

    /// Get the current state
    pub fn current(&self) -> S {
        self.current
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.current == state
    }

    /// Send an event, returning the (possibly unchanged) state
    pub fn send(&mut self, event: EventType) -> S {
        let Some(next) = self.current.on_event(event) else {
            return self.current;
        };

        if self.history.len() == MAX_HISTORY {
            self.history.remove(0);
        }
        self.history.push((self.current, event, next));
        tracing::debug!("{:?} --{}--> {:?}", self.current, event, next);
        self.current = next;
        next
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }
}
