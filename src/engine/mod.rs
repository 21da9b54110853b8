//! Selection and filter engines.
//!
//! # Modules
//!
//! - [`state_engine`]: State cycling for items, groups and the visible set
//! - [`filter`]: Text filter and derived visibility

pub mod filter;
pub mod state_engine;

pub use filter::{item_matches, FilterEngine, FilterOutcome, SearchStatus};
pub use state_engine::{GroupTransition, ItemTransition, StateEngine};
