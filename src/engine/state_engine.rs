//! State cycling for single items, groups and the visible set.
//!
//! # Rules
//!
//! - Advancing an item moves it to the next configured state, wrapping around.
//! - In single-select mode advancing an item resets every other item to the
//!   unselected state, disabled ones included, and aggregate operations do
//!   nothing.
//! - The aggregate state of a set ignores disabled items. If the remaining
//!   items share one value that value is returned, otherwise the set counts as
//!   unselected. An empty set is unselected.
//! - Aggregate advances assign one target value to every enabled item of the
//!   set rather than cycling each item individually.
//! - Apart from the single-select reset, disabled items are never written.

use crate::domain::{Item, SelectMode, StateSet, StateValue};
use crate::store::ItemStore;

/// Result of advancing a single item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemTransition {
    pub key: String,
    pub value: StateValue,
    /// `true` when `value` is not the unselected state.
    pub selected: bool,
}

/// Result of an aggregate advance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupTransition {
    pub value: StateValue,
    /// Keys of the enabled items that received `value`.
    pub keys: Vec<String>,
    pub selected: bool,
}

/// Applies the state cycle to items held in an [`ItemStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StateEngine {
    mode: SelectMode,
}

impl StateEngine {
    #[must_use]
    pub const fn new(mode: SelectMode) -> Self {
        Self { mode }
    }

    #[must_use]
    pub const fn mode(&self) -> SelectMode {
        self.mode
    }

    /// Advances one item to its next state.
    ///
    /// Returns `None` (and changes nothing) if the key is unknown or the item
    /// is disabled.
    ///
    /// # Example
    ///
    /// ```
    /// use tickbox::domain::{Item, SelectMode, StateSet, StateValue};
    /// use tickbox::engine::StateEngine;
    /// use tickbox::store::{FieldMap, ItemStore, RecordMapper};
    ///
    /// let mapper = RecordMapper::new(&FieldMap::default())?;
    /// let mut store = ItemStore::new(mapper, StateSet::binary(), "Default", false);
    /// store.insert(Item::new("a", "Apple", "g1", StateValue(0)));
    ///
    /// let engine = StateEngine::new(SelectMode::Multiple);
    /// let transition = engine.advance_item(&mut store, "a").unwrap();
    /// assert_eq!(transition.value, StateValue(1));
    /// assert!(transition.selected);
    /// # Ok::<(), tickbox::TickboxError>(())
    /// ```
    pub fn advance_item(&self, store: &mut ItemStore, key: &str) -> Option<ItemTransition> {
        let Some(item) = store.get(key) else {
            tracing::warn!(key = %key, "advance requested for unknown item");
            return None;
        };

        if item.disabled {
            tracing::debug!(key = %key, "ignoring advance of disabled item");
            return None;
        }

        let states = store.states().clone();
        let next = states.next_after(item.value);
        store.set_value(key, next);

        if self.mode == SelectMode::Single {
            let others: Vec<String> = store
                .iter()
                .filter(|other| other.key != key && !states.is_unselected(other.value))
                .map(|other| other.key.clone())
                .collect();
            for other in &others {
                store.reset_value(other);
            }
            if !others.is_empty() {
                tracing::debug!(key = %key, reset = others.len(), "single mode reset other items");
            }
        }

        tracing::debug!(key = %key, value = %next, "item advanced");

        Some(ItemTransition {
            key: key.to_string(),
            value: next,
            selected: !states.is_unselected(next),
        })
    }

    /// Resolves the aggregate state of a set of items.
    ///
    /// Mixed values collapse to the unselected state.
    #[must_use]
    pub fn resolve_aggregate_state<'a, I>(states: &StateSet, items: I) -> StateValue
    where
        I: IntoIterator<Item = &'a Item>,
    {
        let mut enabled = items.into_iter().filter(|item| !item.disabled);

        let Some(first) = enabled.next() else {
            return states.unselected();
        };

        if enabled.all(|item| item.value == first.value) {
            first.value
        } else {
            states.unselected()
        }
    }

    /// Advances a set of items as one unit.
    ///
    /// Resolves the aggregate state of `keys`, moves it one step along the
    /// cycle and assigns the result to every enabled item. Returns `None` in
    /// single-select mode.
    pub fn advance_group(&self, store: &mut ItemStore, keys: &[String]) -> Option<GroupTransition> {
        if self.mode == SelectMode::Single {
            tracing::debug!("aggregate advance ignored in single mode");
            return None;
        }

        let states = store.states().clone();
        let current = Self::resolve_aggregate_state(&states, keys.iter().filter_map(|k| store.get(k)));
        let next = states.next_after(current);

        tracing::debug!(current = %current, next = %next, items = keys.len(), "advancing item set");

        Some(Self::assign(store, &states, keys, next))
    }

    /// Drives a set of items toward an explicit target state.
    ///
    /// If every enabled item already holds `target` (vacuously true for an
    /// empty set) the set is cleared to the unselected state, otherwise every
    /// enabled item receives `target`. Returns `None` in single-select mode or
    /// when `target` is not a configured state.
    pub fn toggle_toward(
        &self,
        store: &mut ItemStore,
        keys: &[String],
        target: StateValue,
    ) -> Option<GroupTransition> {
        if self.mode == SelectMode::Single {
            tracing::debug!("bulk toggle ignored in single mode");
            return None;
        }

        let states = store.states().clone();
        if !states.contains(target) {
            tracing::warn!(target = %target, "bulk toggle target is not a configured state");
            return None;
        }

        let all_in_target = keys
            .iter()
            .filter_map(|k| store.get(k))
            .filter(|item| !item.disabled)
            .all(|item| item.value == target);

        let value = if all_in_target { states.unselected() } else { target };

        Some(Self::assign(store, &states, keys, value))
    }

    fn assign(store: &mut ItemStore, states: &StateSet, keys: &[String], value: StateValue) -> GroupTransition {
        let keys: Vec<String> = keys
            .iter()
            .filter(|key| store.set_value(key, value))
            .cloned()
            .collect();

        GroupTransition {
            value,
            keys,
            selected: !states.is_unselected(value),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{FieldMap, RecordMapper};

    fn store(states: StateSet, items: Vec<Item>) -> ItemStore {
        let mapper = RecordMapper::new(&FieldMap::default()).unwrap();
        let mut store = ItemStore::new(mapper, states, "Default", false);
        for item in items {
            store.insert(item);
        }
        store
    }

    fn keys(store: &ItemStore) -> Vec<String> {
        store.iter().map(|i| i.key.clone()).collect()
    }

    fn value(store: &ItemStore, key: &str) -> StateValue {
        store.get(key).unwrap().value
    }

    #[test]
    fn test_advance_item_cycles_through_states() {
        let mut store = store(
            StateSet::new([0, 1, 2]).unwrap(),
            vec![Item::new("a", "Apple", "g1", StateValue(0))],
        );
        let engine = StateEngine::new(SelectMode::Multiple);

        for expected in [1, 2, 0, 1] {
            let t = engine.advance_item(&mut store, "a").unwrap();
            assert_eq!(t.value, StateValue(expected));
        }
    }

    #[test]
    fn test_advance_item_ignores_disabled_and_missing() {
        let mut store = store(
            StateSet::binary(),
            vec![Item::new("a", "Apple", "g1", StateValue(0)).with_disabled(true)],
        );
        let engine = StateEngine::new(SelectMode::Multiple);

        assert!(engine.advance_item(&mut store, "a").is_none());
        assert!(engine.advance_item(&mut store, "zzz").is_none());
        assert_eq!(value(&store, "a"), StateValue(0));
    }

    #[test]
    fn test_single_mode_resets_other_items() {
        let mut store = store(
            StateSet::binary(),
            vec![
                Item::new("a", "Apple", "g1", StateValue(0)),
                Item::new("b", "Banana", "g1", StateValue(0)),
            ],
        );
        let engine = StateEngine::new(SelectMode::Single);

        engine.advance_item(&mut store, "a");
        engine.advance_item(&mut store, "b");

        assert_eq!(value(&store, "a"), StateValue(0));
        assert_eq!(value(&store, "b"), StateValue(1));
    }

    #[test]
    fn test_single_mode_reset_includes_disabled_items() {
        let mut store = store(
            StateSet::binary(),
            vec![
                Item::new("d", "Dill", "g1", StateValue(1)).with_disabled(true),
                Item::new("a", "Apple", "g1", StateValue(0)),
            ],
        );
        let engine = StateEngine::new(SelectMode::Single);

        engine.advance_item(&mut store, "a");

        assert_eq!(value(&store, "d"), StateValue(0));
        assert_eq!(store.selected_keys(), vec!["a"]);
    }

    #[test]
    fn test_aggregate_of_empty_set_is_unselected() {
        let states = StateSet::new([3, 4]).unwrap();
        let empty: Vec<Item> = vec![];
        assert_eq!(StateEngine::resolve_aggregate_state(&states, &empty), StateValue(3));
    }

    #[test]
    fn test_aggregate_common_and_mixed() {
        let states = StateSet::new([0, 1, 2]).unwrap();
        let same = vec![
            Item::new("a", "A", "g", StateValue(2)),
            Item::new("b", "B", "g", StateValue(2)),
            Item::new("c", "C", "g", StateValue(1)).with_disabled(true),
        ];
        assert_eq!(StateEngine::resolve_aggregate_state(&states, &same), StateValue(2));

        let mixed = vec![
            Item::new("a", "A", "g", StateValue(2)),
            Item::new("b", "B", "g", StateValue(1)),
        ];
        assert_eq!(StateEngine::resolve_aggregate_state(&states, &mixed), StateValue(0));
    }

    #[test]
    fn test_advance_group_skips_disabled_members() {
        let mut store = store(
            StateSet::binary(),
            vec![
                Item::new("a", "A", "g1", StateValue(0)).with_disabled(true),
                Item::new("b", "B", "g1", StateValue(0)),
            ],
        );
        let engine = StateEngine::new(SelectMode::Multiple);
        let all = keys(&store);

        let t = engine.advance_group(&mut store, &all).unwrap();
        assert_eq!(t.value, StateValue(1));
        assert_eq!(t.keys, vec!["b".to_string()]);
        assert_eq!(value(&store, "a"), StateValue(0));
        assert_eq!(value(&store, "b"), StateValue(1));
    }

    #[test]
    fn test_advance_group_from_mixed_selects_all() {
        let mut store = store(
            StateSet::binary(),
            vec![
                Item::new("a", "A", "g1", StateValue(1)),
                Item::new("b", "B", "g1", StateValue(0)),
            ],
        );
        let engine = StateEngine::new(SelectMode::Multiple);
        let all = keys(&store);

        let t = engine.advance_group(&mut store, &all).unwrap();
        assert!(t.selected);

        let t = engine.advance_group(&mut store, &all).unwrap();
        assert!(!t.selected);
        assert_eq!(value(&store, "a"), StateValue(0));
    }

    #[test]
    fn test_aggregate_operations_disabled_in_single_mode() {
        let mut store = store(
            StateSet::binary(),
            vec![Item::new("a", "A", "g1", StateValue(0))],
        );
        let engine = StateEngine::new(SelectMode::Single);
        let all = keys(&store);

        assert!(engine.advance_group(&mut store, &all).is_none());
        assert!(engine.toggle_toward(&mut store, &all, StateValue(1)).is_none());
        assert_eq!(value(&store, "a"), StateValue(0));
    }

    #[test]
    fn test_toggle_toward_clears_when_all_in_target() {
        let mut store = store(
            StateSet::new([0, 1, 2]).unwrap(),
            vec![
                Item::new("a", "A", "g1", StateValue(2)),
                Item::new("b", "B", "g1", StateValue(0)),
            ],
        );
        let engine = StateEngine::new(SelectMode::Multiple);
        let all = keys(&store);

        let t = engine.toggle_toward(&mut store, &all, StateValue(2)).unwrap();
        assert_eq!(t.value, StateValue(2));

        let t = engine.toggle_toward(&mut store, &all, StateValue(2)).unwrap();
        assert_eq!(t.value, StateValue(0));
        assert_eq!(value(&store, "a"), StateValue(0));
    }

    #[test]
    fn test_toggle_toward_rejects_unknown_target() {
        let mut store = store(
            StateSet::binary(),
            vec![Item::new("a", "A", "g1", StateValue(0))],
        );
        let engine = StateEngine::new(SelectMode::Multiple);
        let all = keys(&store);
        assert!(engine.toggle_toward(&mut store, &all, StateValue(2)).is_none());
    }
}
