//! Checklist item domain model.
//!
//! An [`Item`] is one selectable entry of the checklist. Items are created by
//! the item store from raw input records and are only ever mutated through the
//! store, which keeps the value invariant (`value` belongs to the configured
//! state set) in one place.

use super::states::{StateSet, StateValue};
use serde::{Deserialize, Serialize};

/// One selectable entry.
///
/// # Fields
///
/// - `key`: unique identifier, string-coerced from the input record
/// - `label`: display text, matched case-insensitively by the filter
/// - `group`: group name, the configured default group when absent
/// - `value`: current state, always a member of the configured state set
/// - `disabled`: frozen flag declared by the input record
/// - `visible`: whether the item passed the last filter pass
/// - `pending_removal`: set while the removal grace period runs
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub key: String,
    pub label: String,
    pub group: String,
    pub value: StateValue,
    pub disabled: bool,
    pub visible: bool,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub pending_removal: bool,
}

impl Item {
    /// Creates a visible, enabled item.
    ///
    /// # Examples
    ///
    /// ```
    /// use tickbox::domain::{Item, StateValue};
    ///
    /// let item = Item::new("a", "Apple", "Fruit", StateValue(0));
    /// assert!(item.visible);
    /// assert!(!item.disabled);
    /// ```
    #[must_use]
    pub fn new(
        key: impl Into<String>,
        label: impl Into<String>,
        group: impl Into<String>,
        value: StateValue,
    ) -> Self {
        Self {
            key: key.into(),
            label: label.into(),
            group: group.into(),
            value,
            disabled: false,
            visible: true,
            pending_removal: false,
        }
    }

    #[must_use]
    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Whether the item counts as selected.
    ///
    /// An item waiting out its removal grace period is never selected, even
    /// though it is still present in the store.
    #[must_use]
    pub fn is_selected(&self, states: &StateSet) -> bool {
        !self.pending_removal && !states.is_unselected(self.value)
    }

    /// Whether the item is checked for display purposes.
    #[must_use]
    pub fn is_checked(&self, states: &StateSet) -> bool {
        !states.is_unselected(self.value)
    }
}
