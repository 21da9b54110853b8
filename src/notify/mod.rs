//! Event notification layer.
//!
//! Pure dispatch: nothing in this module mutates checklist state.
//!
//! # Modules
//!
//! - [`listeners`]: Optional per-event listener registry
//! - [`debounce`]: Last-write-wins debounce for the delayed search hook

pub mod debounce;
pub mod listeners;

pub use debounce::{ScheduledTimer, SearchDebouncer, TimerToken, SEARCH_INPUT_DELAY};
pub use listeners::Listeners;
