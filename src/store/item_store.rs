//! Owned item container with upsert semantics.
//!
//! [`ItemStore`] is the single owner of every [`Item`]. All other components
//! read items through its query methods and mutate them through its
//! crate-internal setters, which enforce the value and disabled invariants.

use super::field_map::RecordMapper;
use crate::domain::error::{Result, TickboxError};
use crate::domain::{Item, StateSet, StateValue};
use serde_json::Value;
use std::collections::HashMap;

/// Insertion-ordered item container keyed by item key.
///
/// Re-adding an existing key overwrites the item in place, keeping its
/// original position.
#[derive(Debug, Clone)]
pub struct ItemStore {
    items: Vec<Item>,
    index: HashMap<String, usize>,
    mapper: RecordMapper,
    states: StateSet,
    default_group: String,
    keep_removed_states: bool,
    removed_values: HashMap<String, StateValue>,
}

impl ItemStore {
    /// Creates an empty store.
    ///
    /// # Parameters
    ///
    /// * `mapper` - Resolved field map used by [`ItemStore::add`]
    /// * `states` - Allowed state values
    /// * `default_group` - Group assigned to records without one
    /// * `keep_removed_states` - Remember values of removed items and reapply
    ///   them when the key is re-added without an explicit value
    #[must_use]
    pub fn new(
        mapper: RecordMapper,
        states: StateSet,
        default_group: impl Into<String>,
        keep_removed_states: bool,
    ) -> Self {
        Self {
            items: Vec::new(),
            index: HashMap::new(),
            mapper,
            states,
            default_group: default_group.into(),
            keep_removed_states,
            removed_values: HashMap::new(),
        }
    }

    #[must_use]
    pub const fn states(&self) -> &StateSet {
        &self.states
    }

    #[must_use]
    pub fn default_group(&self) -> &str {
        &self.default_group
    }

    /// Adds or overwrites one item from a raw record.
    ///
    /// # Errors
    ///
    /// Returns [`TickboxError::InvalidItem`] if `record` is not a JSON object.
    ///
    /// # Example
    ///
    /// ```
    /// use tickbox::domain::StateSet;
    /// use tickbox::store::{FieldMap, ItemStore, RecordMapper};
    /// use serde_json::json;
    ///
    /// let mapper = RecordMapper::new(&FieldMap::default())?;
    /// let mut store = ItemStore::new(mapper, StateSet::binary(), "Default", false);
    /// store.add(&json!({"id": 5, "label": "X"}))?;
    /// store.add(&json!({"id": 5, "label": "Y"}))?;
    /// assert_eq!(store.size(), 1);
    /// assert_eq!(store.get("5").unwrap().label, "Y");
    /// # Ok::<(), tickbox::TickboxError>(())
    /// ```
    pub fn add(&mut self, record: &Value) -> Result<&Item> {
        let Some(fields) = record.as_object() else {
            return Err(TickboxError::InvalidItem(format!(
                "expected an object, got {}",
                json_kind(record)
            )));
        };

        let mapped = self.mapper.map(fields);
        let value = mapped
            .value
            .or_else(|| self.removed_values.get(&mapped.key).copied());

        let item = Item {
            value: self.states.normalize(value),
            group: mapped.group.unwrap_or_else(|| self.default_group.clone()),
            key: mapped.key,
            label: mapped.label,
            disabled: mapped.disabled,
            visible: true,
            pending_removal: false,
        };

        if value.is_some() && Some(item.value) != value {
            tracing::debug!(key = %item.key, "state value outside configured states, reset");
        }

        Ok(self.upsert(item))
    }

    /// Adds every record of a sequence in input order.
    ///
    /// Elements that are not objects are skipped with a warning so that one
    /// bad record does not block the rest of the batch.
    ///
    /// # Errors
    ///
    /// Returns [`TickboxError::InvalidItems`] if `records` is not a JSON array.
    pub fn add_multiple(&mut self, records: &Value) -> Result<usize> {
        let Some(records) = records.as_array() else {
            return Err(TickboxError::InvalidItems(format!(
                "expected an array, got {}",
                json_kind(records)
            )));
        };

        let mut added = 0;
        for (position, record) in records.iter().enumerate() {
            match self.add(record) {
                Ok(_) => added += 1,
                Err(e) => tracing::warn!(position, error = %e, "skipping malformed record"),
            }
        }

        tracing::debug!(added, total = self.items.len(), "batch add complete");
        Ok(added)
    }

    /// Adds or overwrites a typed item, normalizing its value.
    pub fn insert(&mut self, mut item: Item) -> &Item {
        item.value = self.states.normalize(Some(item.value));
        item.pending_removal = false;
        self.upsert(item)
    }

    fn upsert(&mut self, item: Item) -> &Item {
        self.removed_values.remove(&item.key);

        let idx = if let Some(&idx) = self.index.get(&item.key) {
            self.items[idx] = item;
            idx
        } else {
            let idx = self.items.len();
            self.index.insert(item.key.clone(), idx);
            self.items.push(item);
            idx
        };

        &self.items[idx]
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Item> {
        self.index.get(key).map(|&idx| &self.items[idx])
    }

    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Removes an item. Returns `false` if the key was absent.
    pub fn remove(&mut self, key: &str) -> bool {
        let Some(idx) = self.index.remove(key) else {
            return false;
        };

        let item = self.items.remove(idx);
        if self.keep_removed_states {
            self.removed_values.insert(item.key, item.value);
        }
        self.reindex_from(idx);
        true
    }

    /// First phase of a delayed removal.
    ///
    /// Marks the item so selection queries ignore it while it stays in the
    /// store. Returns `false` if the key is absent or already marked.
    pub fn mark_for_removal(&mut self, key: &str) -> bool {
        match self.index.get(key) {
            Some(&idx) if !self.items[idx].pending_removal => {
                self.items[idx].pending_removal = true;
                true
            }
            _ => false,
        }
    }

    /// Second phase of a delayed removal; deletes the item.
    pub fn commit_removal(&mut self, key: &str) -> bool {
        self.remove(key)
    }

    /// Removes every item.
    pub fn remove_all(&mut self) {
        if self.keep_removed_states {
            for item in self.items.drain(..) {
                self.removed_values.insert(item.key, item.value);
            }
        } else {
            self.items.clear();
        }
        self.index.clear();
    }

    fn reindex_from(&mut self, start: usize) {
        for (idx, item) in self.items.iter().enumerate().skip(start) {
            self.index.insert(item.key.clone(), idx);
        }
    }

    /// Iterates items in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &Item> {
        self.items.iter()
    }

    /// Distinct group names in first-seen order.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for item in &self.items {
            if !names.contains(&item.group) {
                names.push(item.group.clone());
            }
        }
        names
    }

    /// Items partitioned by group, groups in first-seen order.
    #[must_use]
    pub fn grouped_items(&self) -> Vec<(String, Vec<&Item>)> {
        let mut groups: Vec<(String, Vec<&Item>)> = Vec::new();
        for item in &self.items {
            match groups.iter_mut().find(|(name, _)| *name == item.group) {
                Some((_, members)) => members.push(item),
                None => groups.push((item.group.clone(), vec![item])),
            }
        }
        groups
    }

    #[must_use]
    pub fn items_in_group(&self, group: &str) -> Vec<&Item> {
        self.items.iter().filter(|item| item.group == group).collect()
    }

    /// Items whose value differs from the unselected state.
    #[must_use]
    pub fn selected_items(&self) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.is_selected(&self.states))
            .collect()
    }

    #[must_use]
    pub fn selected_keys(&self) -> Vec<String> {
        self.selected_items()
            .into_iter()
            .map(|item| item.key.clone())
            .collect()
    }

    /// Items that passed the last filter pass.
    #[must_use]
    pub fn visible_items(&self, include_disabled: bool) -> Vec<&Item> {
        self.items
            .iter()
            .filter(|item| item.visible && (include_disabled || !item.disabled))
            .collect()
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Sets an item's value.
    ///
    /// Refuses disabled items and values outside the state set. Returns
    /// whether the value was written.
    pub(crate) fn set_value(&mut self, key: &str, value: StateValue) -> bool {
        if !self.states.contains(value) {
            return false;
        }
        match self.index.get(key) {
            Some(&idx) if !self.items[idx].disabled => {
                self.items[idx].value = value;
                true
            }
            _ => false,
        }
    }

    /// Puts an item back to the unselected state, disabled or not.
    ///
    /// Only the single-select reset uses this; every other write goes
    /// through [`ItemStore::set_value`]. Returns whether the value changed.
    pub(crate) fn reset_value(&mut self, key: &str) -> bool {
        let unselected = self.states.unselected();
        match self.index.get(key) {
            Some(&idx) if self.items[idx].value != unselected => {
                self.items[idx].value = unselected;
                true
            }
            _ => false,
        }
    }

    /// Recomputes visibility of every item with `predicate`.
    ///
    /// Returns the number of visible items afterwards.
    pub(crate) fn recompute_visibility(&mut self, predicate: impl Fn(&Item) -> bool) -> usize {
        let mut visible = 0;
        for item in &mut self.items {
            item.visible = predicate(item);
            if item.visible {
                visible += 1;
            }
        }
        visible
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
