//! Application layer coordinating state, events, and actions.
//!
//! This layer sits between a host (the Zellij plugin in main.rs, or any
//! embedding program) and the domain/store/engine layers.
//!
//! # Architecture
//!
//! ```text
//! Host Input → Events → Event Handler → Checklist Mutations → Actions → Host
//!                           ↑                    ↓                       │
//!                           │                Listeners                   │
//!                           └────────── Timer / Removal Reports ─────────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: Side effect commands emitted by the event handler
//! - [`handler`]: Event processing and state transition coordinator
//! - [`modes`]: Input mode state
//! - [`state`]: Central checklist container and view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

#[cfg(test)]
mod properties;
#[cfg(test)]
mod scenarios;

pub use actions::{Action, REMOVAL_GRACE_PERIOD};
pub use handler::{handle_event, Event};
pub use modes::InputMode;
pub use state::{Checklist, Row, Texts};
