//! End-to-end checklist sessions driven through the public entry points.

use crate::app::{handle_event, Action, Checklist, Event};
use crate::domain::{Item, SelectMode, StateValue, TickboxError};
use crate::notify::Listeners;
use crate::{initialize, initialize_with_listeners, Config};
use serde_json::json;
use std::cell::RefCell;
use std::rc::Rc;

fn fruit(config: &Config, listeners: Listeners) -> Checklist {
    let mut checklist = initialize_with_listeners(config, listeners).unwrap();
    checklist
        .add_items(&json!([
            {"id": "a", "label": "Apple", "optgroup": "g1"},
            {"id": "b", "label": "Banana", "optgroup": "g1"},
        ]))
        .unwrap();
    checklist
}

#[test]
fn test_advancing_an_item_fires_on_select() {
    let selected = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&selected);
    let listeners = Listeners::new().on_select(move |_, key, _| sink.borrow_mut().push(key.to_string()));

    let mut checklist = fruit(&Config::default(), listeners);
    checklist.toggle_item("a");

    assert_eq!(checklist.item("a").unwrap().value, StateValue(1));
    assert_eq!(checklist.item("b").unwrap().value, StateValue(0));
    assert_eq!(*selected.borrow(), vec!["a"]);
}

#[test]
fn test_single_mode_keeps_one_selection() {
    let config = Config {
        select_mode: SelectMode::Single,
        ..Config::default()
    };
    let mut checklist = fruit(&config, Listeners::new());

    checklist.toggle_item("a");
    checklist.toggle_item("b");

    assert_eq!(checklist.item("a").unwrap().value, StateValue(0));
    assert_eq!(checklist.item("b").unwrap().value, StateValue(1));
    assert!(checklist.toggle_group("g1").is_none());
    assert!(checklist.toggle_all_visible().is_none());
}

#[test]
fn test_single_mode_resets_a_preselected_disabled_item() {
    let config = Config {
        select_mode: SelectMode::Single,
        ..Config::default()
    };
    let mut checklist = initialize(&config).unwrap();
    checklist
        .add_items(&json!([
            {"id": "d", "label": "Dill", "disabled": true, "value": 1},
            {"id": "a", "label": "Apple"},
        ]))
        .unwrap();
    assert_eq!(checklist.selected_keys(), vec!["d"]);

    checklist.toggle_item("a");

    assert_eq!(checklist.selected_keys(), vec!["a"]);
    assert_eq!(checklist.item("d").unwrap().value, StateValue(0));
}

#[test]
fn test_group_advance_skips_disabled_members() {
    let mut checklist = initialize(&Config::default()).unwrap();
    checklist
        .add_items(&json!([
            {"id": "a", "label": "Apple", "optgroup": "g1", "disabled": true, "value": 0},
            {"id": "b", "label": "Banana", "optgroup": "g1", "value": 0},
        ]))
        .unwrap();

    let transition = checklist.toggle_group("g1").unwrap();

    assert_eq!(transition.value, StateValue(1));
    assert_eq!(checklist.item("a").unwrap().value, StateValue(0));
    assert_eq!(checklist.item("b").unwrap().value, StateValue(1));
}

#[test]
fn test_local_search_reports_query_and_selection() {
    let results: Rc<RefCell<Vec<(String, Vec<String>)>>> = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&results);
    let listeners = Listeners::new().on_local_search_result(move |query, selected: &[Item]| {
        let keys = selected.iter().map(|item| item.key.clone()).collect();
        sink.borrow_mut().push((query.to_string(), keys));
    });

    let mut checklist = fruit(&Config::default(), listeners);
    checklist.toggle_item("a");
    checklist.search_input("ban");

    let visible: Vec<&str> = checklist.visible_items(true).iter().map(|item| item.label.as_str()).collect();
    assert_eq!(visible, vec!["Banana"]);
    assert_eq!(*results.borrow(), vec![("ban".to_string(), vec!["a".to_string()])]);
}

#[test]
fn test_remove_all_empties_the_store() {
    let mut checklist = fruit(&Config::default(), Listeners::new());
    let actions = checklist.remove_all_items();

    assert_eq!(checklist.size(), 0);
    assert!(checklist.group_names().is_empty());
    assert_eq!(actions, vec![Action::ShowStatus("No items available".to_string())]);
}

#[test]
fn test_adding_the_same_key_twice_upserts() {
    let mut checklist = initialize(&Config::default()).unwrap();
    checklist.add_item(&json!({"id": 5, "label": "X"})).unwrap();
    checklist.add_item(&json!({"id": 5, "label": "Y"})).unwrap();

    assert_eq!(checklist.size(), 1);
    assert_eq!(checklist.item("5").unwrap().label, "Y");
}

#[test]
fn test_out_of_range_values_fall_back_to_unselected() {
    let config = Config {
        states: vec![0, 1, 2],
        ..Config::default()
    };
    let mut checklist = initialize(&config).unwrap();
    checklist
        .add_items(&json!([
            {"id": "a", "label": "A", "value": 7},
            {"id": "b", "label": "B", "value": "2"},
            {"id": "c", "label": "C", "value": 2},
        ]))
        .unwrap();

    assert_eq!(checklist.item("a").unwrap().value, StateValue(0));
    assert_eq!(checklist.item("b").unwrap().value, StateValue(0));
    assert_eq!(checklist.item("c").unwrap().value, StateValue(2));
}

#[test]
fn test_aggregate_state_of_mixed_and_empty_sets() {
    let mut checklist = fruit(&Config::default(), Listeners::new());
    let keys = vec!["a".to_string(), "b".to_string()];

    assert_eq!(checklist.aggregate_state(&[]), StateValue(0));
    assert_eq!(checklist.aggregate_state(&keys), StateValue(0));

    checklist.toggle_item("a");
    assert_eq!(checklist.aggregate_state(&keys), StateValue(0));
    assert_eq!(checklist.group_state("g1"), StateValue(0));

    checklist.toggle_item("b");
    assert_eq!(checklist.aggregate_state(&keys), StateValue(1));
}

#[test]
fn test_bulk_add_rejects_non_arrays() {
    let mut checklist = initialize(&Config::default()).unwrap();
    assert!(matches!(
        checklist.add_items(&json!({"id": 1})),
        Err(TickboxError::InvalidItems(_))
    ));
    assert!(matches!(checklist.add_item(&json!("x")), Err(TickboxError::InvalidItem(_))));
}

#[test]
fn test_custom_field_map_reads_renamed_fields() {
    let config = Config::from_toml_str(
        r#"
[field_map]
key_field = "code"
label_field = "name"
optgroup_field = "category"
"#,
    )
    .unwrap();
    let mut checklist = initialize(&config).unwrap();
    checklist
        .add_item(&json!({"code": "x1", "name": "Widget", "category": "Parts"}))
        .unwrap();

    let item = checklist.item("x1").unwrap();
    assert_eq!(item.label, "Widget");
    assert_eq!(item.group, "Parts");
}

#[test]
fn test_removed_states_are_restored_on_re_add() {
    let config = Config {
        keep_removed_states: true,
        ..Config::default()
    };
    let mut checklist = fruit(&config, Listeners::new());
    checklist.toggle_item("a");

    checklist.remove_item("a");
    checklist.commit_removal("a");
    assert!(checklist.item("a").is_none());

    checklist.add_item(&json!({"id": "a", "label": "Apple", "optgroup": "g1"})).unwrap();
    assert_eq!(checklist.item("a").unwrap().value, StateValue(1));
}

#[test]
fn test_filtering_hides_groups_without_matches() {
    let mut checklist = initialize(&Config::default()).unwrap();
    checklist
        .add_items(&json!([
            {"id": "a", "label": "Apple", "optgroup": "Fruit"},
            {"id": "c", "label": "Carrot", "optgroup": "Veg"},
        ]))
        .unwrap();

    checklist.search_input("carr");
    assert!(!checklist.group_visible("Fruit"));
    assert!(checklist.group_visible("Veg"));

    checklist.search_input("veg");
    assert!(checklist.group_visible("Veg"));
    assert_eq!(checklist.visible_items(true).len(), 1);
}

#[test]
fn test_event_driven_session() {
    let config = Config {
        states: vec![0, 1, 2],
        ..Config::default()
    };
    let mut checklist = initialize(&config).unwrap();

    let events = vec![
        Event::AddItems(json!([
            {"id": "a", "label": "Apple", "optgroup": "Fruit"},
            {"id": "b", "label": "Banana", "optgroup": "Fruit"},
            {"id": "c", "label": "Cherry", "optgroup": "Fruit", "disabled": true},
        ])),
        Event::SearchMode,
        Event::Char('a'),
        Event::Char('n'),
        Event::ToggleVisibleItems { alternate: true },
    ];
    for event in &events {
        handle_event(&mut checklist, event).unwrap();
    }

    assert_eq!(checklist.item("b").unwrap().value, StateValue(2));
    assert_eq!(checklist.item("a").unwrap().value, StateValue(0));
    assert_eq!(checklist.item("c").unwrap().value, StateValue(0));
    assert_eq!(checklist.query(), "");
}
