//! Text filter and the visibility it derives.

use crate::domain::Item;
use crate::store::ItemStore;

/// Whether a filter pass left anything to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Empty,
    HasResults,
}

/// Summary of one filter pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterOutcome {
    pub query: String,
    pub visible_count: usize,
}

impl FilterOutcome {
    #[must_use]
    pub const fn status(&self) -> SearchStatus {
        if self.visible_count == 0 {
            SearchStatus::Empty
        } else {
            SearchStatus::HasResults
        }
    }
}

/// Case-insensitive substring match on label or group name.
///
/// `lower_query` must already be lowercase.
#[must_use]
pub fn item_matches(item: &Item, lower_query: &str) -> bool {
    item.label.to_lowercase().contains(lower_query) || item.group.to_lowercase().contains(lower_query)
}

/// Holds the last-run query and recomputes visibility from it.
#[derive(Debug, Clone, Default)]
pub struct FilterEngine {
    query: String,
    lower_query: String,
}

impl FilterEngine {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The query of the last filter pass.
    #[must_use]
    pub fn query(&self) -> &str {
        &self.query
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        !self.query.is_empty()
    }

    /// Runs a filter pass, overwriting the visibility of every item.
    ///
    /// # Example
    ///
    /// ```
    /// use tickbox::domain::{Item, StateSet, StateValue};
    /// use tickbox::engine::{FilterEngine, SearchStatus};
    /// use tickbox::store::{FieldMap, ItemStore, RecordMapper};
    ///
    /// let mapper = RecordMapper::new(&FieldMap::default())?;
    /// let mut store = ItemStore::new(mapper, StateSet::binary(), "Default", false);
    /// store.insert(Item::new("a", "Apple", "g1", StateValue(0)));
    /// store.insert(Item::new("b", "Banana", "g1", StateValue(0)));
    ///
    /// let mut filter = FilterEngine::new();
    /// let outcome = filter.apply(&mut store, "BAN");
    /// assert_eq!(outcome.visible_count, 1);
    /// assert_eq!(outcome.status(), SearchStatus::HasResults);
    /// # Ok::<(), tickbox::TickboxError>(())
    /// ```
    pub fn apply(&mut self, store: &mut ItemStore, query: &str) -> FilterOutcome {
        let _span = tracing::debug_span!("apply_filter",
            total_items = store.size(),
            query_len = query.len()
        )
        .entered();

        self.query = query.to_string();
        self.lower_query = query.to_lowercase();

        let lower = &self.lower_query;
        let visible_count = store.recompute_visibility(|item| item_matches(item, lower));

        tracing::debug!(visible_count, "filter applied");

        FilterOutcome {
            query: self.query.clone(),
            visible_count,
        }
    }

    /// Resets the query, making every item visible.
    pub fn clear(&mut self, store: &mut ItemStore) -> FilterOutcome {
        self.apply(store, "")
    }

    /// Re-runs the current query, e.g. after items were added.
    pub fn reapply(&mut self, store: &mut ItemStore) -> FilterOutcome {
        let query = std::mem::take(&mut self.query);
        self.apply(store, &query)
    }

    /// Whether a group should be shown under the current query.
    ///
    /// A group is shown if it has a visible item or its own name matches.
    #[must_use]
    pub fn group_visible(&self, store: &ItemStore, group: &str) -> bool {
        group.to_lowercase().contains(&self.lower_query)
            || store.iter().any(|item| item.group == group && item.visible)
    }

    /// Names of the groups shown under the current query, in first-seen order.
    #[must_use]
    pub fn visible_groups(&self, store: &ItemStore) -> Vec<String> {
        store
            .group_names()
            .into_iter()
            .filter(|group| self.group_visible(store, group))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{StateSet, StateValue};
    use crate::store::{FieldMap, RecordMapper};

    fn store() -> ItemStore {
        let mapper = RecordMapper::new(&FieldMap::default()).unwrap();
        let mut store = ItemStore::new(mapper, StateSet::binary(), "Default", false);
        store.insert(Item::new("a", "Apple", "Fruit", StateValue(0)));
        store.insert(Item::new("b", "Banana", "Fruit", StateValue(1)));
        store.insert(Item::new("c", "Carrot", "Vegetables", StateValue(0)));
        store
    }

    fn visible_keys(store: &ItemStore) -> Vec<String> {
        store.visible_items(true).iter().map(|i| i.key.clone()).collect()
    }

    #[test]
    fn test_filter_matches_label_case_insensitively() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        filter.apply(&mut store, "bAn");
        assert_eq!(visible_keys(&store), vec!["b"]);
    }

    #[test]
    fn test_filter_matches_group_name() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        filter.apply(&mut store, "veg");
        assert_eq!(visible_keys(&store), vec!["c"]);
    }

    #[test]
    fn test_empty_query_shows_everything() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        filter.apply(&mut store, "zzz");
        assert!(visible_keys(&store).is_empty());

        filter.clear(&mut store);
        filter.clear(&mut store);
        assert_eq!(store.visible_items(true).len(), 3);
    }

    #[test]
    fn test_same_filter_twice_is_idempotent() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        filter.apply(&mut store, "a");
        let first = visible_keys(&store);
        filter.apply(&mut store, "a");
        assert_eq!(visible_keys(&store), first);
    }

    #[test]
    fn test_visibility_does_not_depend_on_value() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        filter.apply(&mut store, "an");
        assert_eq!(visible_keys(&store), vec!["b"]);
    }

    #[test]
    fn test_status_reports_empty_result() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        assert_eq!(filter.apply(&mut store, "zzz").status(), SearchStatus::Empty);
        assert_eq!(filter.apply(&mut store, "").status(), SearchStatus::HasResults);
    }

    #[test]
    fn test_group_visible_by_name_without_visible_items() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        filter.apply(&mut store, "ban");
        assert!(filter.group_visible(&store, "Fruit"));
        assert!(!filter.group_visible(&store, "Vegetables"));

        // name-only match keeps an otherwise empty group shown
        assert!(filter.group_visible(&store, "Bandits"));
    }

    #[test]
    fn test_reapply_covers_new_items() {
        let mut store = store();
        let mut filter = FilterEngine::new();
        filter.apply(&mut store, "ban");
        store.insert(Item::new("d", "Bandana", "Clothes", StateValue(0)));
        filter.reapply(&mut store);
        assert_eq!(visible_keys(&store), vec!["b", "d"]);
        assert_eq!(filter.query(), "ban");
    }
}
