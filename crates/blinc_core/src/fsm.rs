//! State Machine Runtime
//!
//! Widgets describe their interaction states as small `Copy` enums and map
//! event ids onto transitions by implementing [`StateTransitions`].
//! [`Fsm`] holds the current state and a bounded transition history for
//! debugging.
//!
//! ```rust
//! use blinc_core::events::event_types::*;
//! use blinc_core::fsm::{Fsm, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Grip {
//!     Released,
//!     Held,
//! }
//!
//! impl StateTransitions for Grip {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Grip::Released, POINTER_DOWN) => Some(Grip::Held),
//!             (Grip::Held, POINTER_UP) => Some(Grip::Released),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut fsm = Fsm::new(Grip::Released);
//! assert!(fsm.send(POINTER_DOWN));
//! assert_eq!(fsm.state(), Grip::Held);
//! assert!(!fsm.send(POINTER_DOWN));
//! ```

use std::hash::Hash;

use smallvec::SmallVec;

use crate::events::{event_name, EventType};

/// Maximum number of transitions kept in [`Fsm::history`]
pub const HISTORY_LIMIT: usize = 16;

/// Trait for user-defined state types
///
/// Return `Some(next)` to transition, `None` to ignore the event.
pub trait StateTransitions:
    Clone + Copy + PartialEq + Eq + Hash + Send + Sync + std::fmt::Debug + 'static
{
    /// Handle an event and return the new state, or None if no transition
    fn on_event(&self, event: EventType) -> Option<Self>;
}

/// A state machine instance over a [`StateTransitions`] enum
#[derive(Debug, Clone)]
pub struct Fsm<S: StateTransitions> {
    state: S,
    /// History of state transitions (for debugging)
    history: SmallVec<[(S, EventType, S); 4]>,
}

impl<S: StateTransitions> Fsm<S> {
    pub fn new(initial: S) -> Self {
        Self {
            state: initial,
            history: SmallVec::new(),
        }
    }

    /// Get the current state
    pub fn state(&self) -> S {
        self.state
    }

    /// Check if we're in a specific state
    pub fn is_in(&self, state: S) -> bool {
        self.state == state
    }

    /// Check if an event would trigger a transition from the current state
    pub fn can_send(&self, event: EventType) -> bool {
        self.state.on_event(event).is_some()
    }

    /// Send an event, returning true when the state changed
    pub fn send(&mut self, event: EventType) -> bool {
        let Some(next) = self.state.on_event(event) else {
            return false;
        };
        let prev = self.state;
        self.state = next;

        if self.history.len() == HISTORY_LIMIT {
            self.history.remove(0);
        }
        self.history.push((prev, event, next));

        tracing::trace!(
            "fsm {:?} --{}--> {:?}",
            prev,
            event_name(event),
            next
        );
        prev != next
    }

    /// Get transition history
    pub fn history(&self) -> &[(S, EventType, S)] {
        &self.history
    }
}

impl<S: StateTransitions + Default> Default for Fsm<S> {
    fn default() -> Self {
        Self::new(S::default())
    }
}
