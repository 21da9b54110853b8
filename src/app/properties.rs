//! Invariants that must hold under arbitrary operation sequences.

use crate::app::Checklist;
use crate::domain::{SelectMode, StateValue};
use crate::{initialize, Config};
use proptest::prelude::*;
use serde_json::{json, Value};

const GROUPS: [&str; 3] = ["Fruit", "Veg", "Nuts"];
const LABELS: [&str; 6] = ["Apple", "Banana", "Carrot", "Date", "Endive", "Fig"];

#[derive(Debug, Clone)]
enum Op {
    Toggle(usize),
    ToggleGroup(usize),
    ToggleAll,
    Bulk(bool),
    Search(String),
    Collapse(usize),
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => (0..LABELS.len()).prop_map(Op::Toggle),
        2 => (0..GROUPS.len()).prop_map(Op::ToggleGroup),
        1 => Just(Op::ToggleAll),
        1 => any::<bool>().prop_map(Op::Bulk),
        2 => "[a-f]{0,2}".prop_map(Op::Search),
        1 => (0..GROUPS.len()).prop_map(Op::Collapse),
    ]
}

/// (group index, disabled, initial value) per label.
fn items_strategy() -> impl Strategy<Value = Vec<(usize, bool, i64)>> {
    proptest::collection::vec((0..GROUPS.len(), any::<bool>(), 0i64..3), LABELS.len())
}

fn build(mode: SelectMode, items: &[(usize, bool, i64)], with_values: bool) -> Checklist {
    let config = Config {
        states: vec![0, 1, 2],
        select_mode: mode,
        ..Config::default()
    };
    let mut checklist = initialize(&config).unwrap();
    let records: Vec<Value> = items
        .iter()
        .enumerate()
        .map(|(idx, &(group, disabled, value))| {
            json!({
                "id": idx,
                "label": LABELS[idx],
                "optgroup": GROUPS[group],
                "disabled": disabled,
                "value": if with_values { value } else { 0 },
            })
        })
        .collect();
    checklist.add_items(&Value::Array(records)).unwrap();
    checklist
}

/// Applies one operation. Returns whether an item was advanced.
fn apply(checklist: &mut Checklist, op: &Op) -> bool {
    match op {
        Op::Toggle(idx) => return checklist.toggle_item(&idx.to_string()).is_some(),
        Op::ToggleGroup(idx) => {
            checklist.toggle_group(GROUPS[*idx]);
        }
        Op::ToggleAll => {
            checklist.toggle_all_visible();
        }
        Op::Bulk(alternate) => {
            checklist.toggle_visible_items(*alternate);
        }
        Op::Search(query) => {
            checklist.search_input(query);
        }
        Op::Collapse(idx) => {
            checklist.toggle_group_collapse(GROUPS[*idx]);
        }
    }
    false
}

fn visibility(checklist: &Checklist) -> Vec<bool> {
    (0..LABELS.len())
        .map(|idx| checklist.item(&idx.to_string()).is_some_and(|item| item.visible))
        .collect()
}

proptest! {
    #[test]
    fn single_mode_never_selects_two_items(
        items in items_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut checklist = build(SelectMode::Single, &items, true);
        // preloaded values may select several items until the first advance
        let mut advanced = false;
        for op in &ops {
            advanced |= apply(&mut checklist, op);
            if advanced {
                prop_assert!(checklist.selected_items().len() <= 1, "selected: {:?}", checklist.selected_keys());
            }
        }
    }

    #[test]
    fn disabled_items_keep_their_value(
        items in items_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut checklist = build(SelectMode::Multiple, &items, true);
        let before: Vec<(String, StateValue)> = (0..LABELS.len())
            .filter_map(|idx| checklist.item(&idx.to_string()))
            .filter(|item| item.disabled)
            .map(|item| (item.key.clone(), item.value))
            .collect();

        for op in &ops {
            apply(&mut checklist, op);
        }

        for (key, value) in before {
            prop_assert_eq!(checklist.item(&key).unwrap().value, value);
        }
    }

    #[test]
    fn values_always_stay_in_the_state_set(
        items in items_strategy(),
        ops in proptest::collection::vec(op_strategy(), 0..40),
    ) {
        let mut checklist = build(SelectMode::Multiple, &items, true);
        for op in &ops {
            apply(&mut checklist, op);
        }
        for idx in 0..LABELS.len() {
            let value = checklist.item(&idx.to_string()).unwrap().value;
            prop_assert!(checklist.states().contains(value));
        }
    }

    #[test]
    fn same_filter_twice_is_idempotent(items in items_strategy(), query in "[a-z]{0,3}") {
        let mut checklist = build(SelectMode::Multiple, &items, false);
        checklist.search_input(&query);
        let first = visibility(&checklist);
        checklist.search_input(&query);
        prop_assert_eq!(first, visibility(&checklist));
    }

    #[test]
    fn clearing_twice_shows_everything(items in items_strategy(), query in "[a-z]{0,3}") {
        let mut checklist = build(SelectMode::Multiple, &items, false);
        checklist.search_input(&query);
        checklist.clear_search();
        checklist.clear_search();
        prop_assert!(visibility(&checklist).into_iter().all(|visible| visible));
    }

    #[test]
    fn unknown_values_normalize_to_unselected(value in any::<i64>()) {
        let mut checklist = initialize(&Config::default()).unwrap();
        checklist.add_item(&json!({"id": "x", "label": "X", "value": value})).unwrap();
        let stored = checklist.item("x").unwrap().value;
        if value == 0 || value == 1 {
            prop_assert_eq!(stored, StateValue(value));
        } else {
            prop_assert_eq!(stored, StateValue(0));
        }
    }
}
