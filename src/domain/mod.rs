//! Domain layer for the checklist engine.
//!
//! This module contains the core domain types, independent of the host
//! environment and of rendering.
//!
//! # Organization
//!
//! - [`error`]: Error types and result aliases
//! - [`item`]: The checklist item model
//! - [`states`]: State values, the state cycle and the selection mode
//!
//! # Examples
//!
//! ```
//! use tickbox::domain::{Item, Result, StateSet};
//!
//! fn create_item() -> Result<Item> {
//!     let states = StateSet::new([0, 1, 2])?;
//!     Ok(Item::new("a", "Apple", "Fruit", states.unselected()))
//! }
//! ```

pub mod error;
pub mod item;
pub mod states;

pub use error::{Result, TickboxError};
pub use item::Item;
pub use states::{SelectMode, StateSet, StateValue};
