//! Item store layer.
//!
//! This module owns the checklist items and the mapping from raw input
//! records to typed items.
//!
//! # Modules
//!
//! - `field_map`: Field-name mapping and its resolved accessor form
//! - `item_store`: The owned, insertion-ordered item container

pub mod field_map;
pub mod item_store;

pub use field_map::{FieldMap, MappedRecord, RecordMapper};
pub use item_store::ItemStore;
