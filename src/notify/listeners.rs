//! Optional listener registry, one slot per event kind.
//!
//! Every hook is optional. Dispatching to an empty slot is a no-op. Hooks get
//! read-only access to the store as their context; they cannot mutate the
//! checklist while it is being updated.
//!
//! # Argument shapes
//!
//! | Hook | Arguments |
//! |------|-----------|
//! | `on_select`, `on_deselect` | store, item key, item |
//! | `on_select_group`, `on_deselect_group` | store, group name, group items |
//! | `on_select_all`, `on_deselect_all` | store, affected items |
//! | `on_collapse_group`, `on_expand_group` | store, group name, group items |
//! | `on_search_input`, `on_search_input_delay` | query, selected items |
//! | `on_local_search_result` | query, selected items |
//! | `on_clear_search` | selected items |

use crate::domain::Item;
use crate::store::ItemStore;
use std::fmt;

pub type ItemListener = Box<dyn FnMut(&ItemStore, &str, &Item)>;
pub type GroupListener = Box<dyn FnMut(&ItemStore, &str, &[Item])>;
pub type SetListener = Box<dyn FnMut(&ItemStore, &[Item])>;
pub type SearchListener = Box<dyn FnMut(&str, &[Item])>;
pub type ClearListener = Box<dyn FnMut(&[Item])>;

/// Registered callbacks.
///
/// # Example
///
/// ```
/// use std::cell::RefCell;
/// use std::rc::Rc;
/// use tickbox::notify::Listeners;
///
/// let selected = Rc::new(RefCell::new(Vec::new()));
/// let sink = Rc::clone(&selected);
/// let listeners = Listeners::new().on_select(move |_store, key, _item| {
///     sink.borrow_mut().push(key.to_string());
/// });
/// assert!(listeners.is_registered("on_select"));
/// ```
#[derive(Default)]
pub struct Listeners {
    on_select: Option<ItemListener>,
    on_deselect: Option<ItemListener>,
    on_select_group: Option<GroupListener>,
    on_deselect_group: Option<GroupListener>,
    on_select_all: Option<SetListener>,
    on_deselect_all: Option<SetListener>,
    on_collapse_group: Option<GroupListener>,
    on_expand_group: Option<GroupListener>,
    on_search_input: Option<SearchListener>,
    on_search_input_delay: Option<SearchListener>,
    on_local_search_result: Option<SearchListener>,
    on_clear_search: Option<ClearListener>,
}

macro_rules! listener_builders {
    ($( $name:ident($($arg:ty),*) ),* $(,)?) => {
        impl Listeners {
            $(
                #[doc = concat!("Registers the `", stringify!($name), "` hook, replacing any previous one.")]
                #[must_use]
                pub fn $name(mut self, listener: impl FnMut($($arg),*) + 'static) -> Self {
                    self.$name = Some(Box::new(listener));
                    self
                }
            )*

            /// Whether a hook with the given name is registered.
            #[must_use]
            pub fn is_registered(&self, name: &str) -> bool {
                match name {
                    $( stringify!($name) => self.$name.is_some(), )*
                    _ => false,
                }
            }

            fn registered_names(&self) -> Vec<&'static str> {
                let mut names = Vec::new();
                $( if self.$name.is_some() { names.push(stringify!($name)); } )*
                names
            }
        }
    };
}

listener_builders! {
    on_select(&ItemStore, &str, &Item),
    on_deselect(&ItemStore, &str, &Item),
    on_select_group(&ItemStore, &str, &[Item]),
    on_deselect_group(&ItemStore, &str, &[Item]),
    on_select_all(&ItemStore, &[Item]),
    on_deselect_all(&ItemStore, &[Item]),
    on_collapse_group(&ItemStore, &str, &[Item]),
    on_expand_group(&ItemStore, &str, &[Item]),
    on_search_input(&str, &[Item]),
    on_search_input_delay(&str, &[Item]),
    on_local_search_result(&str, &[Item]),
    on_clear_search(&[Item]),
}

impl fmt::Debug for Listeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Listeners")
            .field("registered", &self.registered_names())
            .finish()
    }
}

impl Listeners {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fires `on_select` or `on_deselect` for a single item.
    pub(crate) fn item_changed(&mut self, store: &ItemStore, item: &Item, selected: bool) {
        let slot = if selected { &mut self.on_select } else { &mut self.on_deselect };
        if let Some(listener) = slot {
            listener(store, &item.key, item);
        }
    }

    /// Fires `on_select_group` or `on_deselect_group`.
    pub(crate) fn group_changed(&mut self, store: &ItemStore, group: &str, items: &[Item], selected: bool) {
        let slot = if selected {
            &mut self.on_select_group
        } else {
            &mut self.on_deselect_group
        };
        if let Some(listener) = slot {
            listener(store, group, items);
        }
    }

    /// Fires `on_select_all` or `on_deselect_all`.
    pub(crate) fn all_changed(&mut self, store: &ItemStore, items: &[Item], selected: bool) {
        let slot = if selected {
            &mut self.on_select_all
        } else {
            &mut self.on_deselect_all
        };
        if let Some(listener) = slot {
            listener(store, items);
        }
    }

    /// Fires `on_collapse_group` or `on_expand_group`.
    pub(crate) fn group_collapsed(&mut self, store: &ItemStore, group: &str, items: &[Item], collapsed: bool) {
        let slot = if collapsed {
            &mut self.on_collapse_group
        } else {
            &mut self.on_expand_group
        };
        if let Some(listener) = slot {
            listener(store, group, items);
        }
    }

    pub(crate) fn search_input(&mut self, query: &str, selected: &[Item]) {
        if let Some(listener) = &mut self.on_search_input {
            listener(query, selected);
        }
    }

    pub(crate) fn search_input_delay(&mut self, query: &str, selected: &[Item]) {
        if let Some(listener) = &mut self.on_search_input_delay {
            listener(query, selected);
        }
    }

    pub(crate) fn local_search_result(&mut self, query: &str, selected: &[Item]) {
        if let Some(listener) = &mut self.on_local_search_result {
            listener(query, selected);
        }
    }

    pub(crate) fn clear_search(&mut self, selected: &[Item]) {
        if let Some(listener) = &mut self.on_clear_search {
            listener(selected);
        }
    }

    /// Whether a delayed search hook exists; no timer is scheduled otherwise.
    #[must_use]
    pub const fn wants_search_delay(&self) -> bool {
        self.on_search_input_delay.is_some()
    }
}
