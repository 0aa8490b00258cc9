//! Blinc Core
//!
//! Shared primitives for Blinc widgets:
//!
//! - **Event Types**: the `u32` event vocabulary widgets react to
//! - **State Machines**: flat interaction state machines driven by those events
//!
//! # Example
//!
//! ```rust
//! use blinc_core::events::event_types::*;
//! use blinc_core::fsm::{Fsm, StateTransitions};
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
//! enum Hover {
//!     Out,
//!     Over,
//! }
//!
//! impl StateTransitions for Hover {
//!     fn on_event(&self, event: u32) -> Option<Self> {
//!         match (self, event) {
//!             (Hover::Out, POINTER_ENTER) => Some(Hover::Over),
//!             (Hover::Over, POINTER_LEAVE) => Some(Hover::Out),
//!             _ => None,
//!         }
//!     }
//! }
//!
//! let mut hover = Fsm::new(Hover::Out);
//! assert!(hover.send(POINTER_ENTER));
//! assert!(hover.is_in(Hover::Over));
//! ```

pub mod events;
pub mod fsm;

pub use events::{event_name, event_types, EventType};
pub use fsm::{Fsm, StateTransitions};
