//! Selection queries and mutations over a built collection.

use log::trace;
use trellis_collections::{Collection, ItemStates, Key, Node, NodeType};

use crate::mode::SelectionMode;
use crate::selection::{SelectedKeys, Selection};
use crate::state::SelectionStore;

/// Modifier state of a selection gesture.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SelectModifiers {
    /// Extend from the anchor (Shift+click).
    pub shift: bool,
    /// Replace the selection instead of toggling (plain click in lists that
    /// use replace behavior).
    pub replace: bool,
}

/// A borrowed view combining a collection and a selection store.
///
/// The manager keeps no state of its own: the anchor lives in the store's
/// [`Selection`], so a manager can be recreated on every pass. Invalid
/// mutations (disabled keys, operations the mode does not allow) are
/// silent no-ops.
///
/// Ranges are computed over the collection's traversal order and include
/// only `item` nodes.
pub struct SelectionManager<'a, C: ?Sized, S: ?Sized> {
    collection: &'a C,
    state: &'a mut S,
}

impl<'a, T, C, S> SelectionManager<'a, C, S>
where
    C: Collection<Item = Node<T>> + ?Sized,
    S: SelectionStore + ?Sized,
{
    pub fn new(collection: &'a C, state: &'a mut S) -> Self {
        Self { collection, state }
    }

    pub fn collection(&self) -> &C {
        self.collection
    }

    pub fn selection_mode(&self) -> SelectionMode {
        self.state.selection_mode()
    }

    pub fn disallow_empty_selection(&self) -> bool {
        self.state.disallow_empty_selection()
    }

    // -------------------------------------------------------------------------
    // Focus
    // -------------------------------------------------------------------------

    /// Whether the owning component has focus.
    pub fn has_focus(&self) -> bool {
        self.state.has_focus()
    }

    pub fn set_has_focus(&mut self, focused: bool) {
        self.state.set_has_focus(focused);
    }

    pub fn focused_key(&self) -> Option<&Key> {
        self.state.focused_key()
    }

    /// Move focus. Disabled keys can be focused.
    pub fn set_focused_key(&mut self, key: Option<Key>) {
        self.state.set_focused_key(key);
    }

    pub fn is_focused(&self, key: &Key) -> bool {
        self.state.is_key_focused(key)
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn is_disabled(&self, key: &Key) -> bool {
        self.state.is_disabled(key)
    }

    /// True if `key` is selected and not disabled.
    ///
    /// Under select-all every non-disabled key not explicitly excluded is
    /// selected.
    pub fn is_selected(&self, key: &Key) -> bool {
        self.state.is_selected(key)
    }

    /// Derived flags for `key`.
    pub fn item_states(&self, key: &Key) -> ItemStates {
        self.state.item_states(key)
    }

    /// True if no selectable key is selected.
    pub fn is_empty(&self) -> bool {
        !self.has_selectable(&self.state.selection().keys)
    }

    /// True if every selectable item of the collection is selected.
    pub fn is_select_all(&self) -> bool {
        if self.selection_mode() != SelectionMode::Multiple {
            return false;
        }
        let mut any = false;
        for key in self.selectable_items() {
            if !self.is_selected(key) {
                return false;
            }
            any = true;
        }
        any
    }

    /// Selected items of the collection, in traversal order.
    pub fn selected_keys(&self) -> Vec<Key> {
        self.selectable_items()
            .filter(|key| self.is_selected(key))
            .cloned()
            .collect()
    }

    // -------------------------------------------------------------------------
    // Mutations
    // -------------------------------------------------------------------------

    /// Flip the selection of `key` and anchor range selection on it.
    ///
    /// In single mode this replaces the selection, or clears it when `key`
    /// is already selected.
    pub fn toggle_selection(&mut self, key: &Key) {
        if !self.can_select(key, "toggle") {
            return;
        }

        if self.selection_mode() == SelectionMode::Single {
            if !self.is_selected(key) {
                self.replace_selection(key);
            } else if !self.disallow_empty_selection() {
                self.state.set_selection(Selection::new());
            }
            return;
        }

        let mut selection = self.state.selection().clone();
        if selection.keys.contains(key) {
            selection.keys.remove(key);
            if self.disallow_empty_selection() && !self.has_selectable(&selection.keys) {
                trace!("Ignoring toggle of '{}': selection may not become empty", key);
                return;
            }
        } else {
            selection.keys.insert(key.clone());
        }
        selection.anchor_key = Some(key.clone());
        selection.current_key = Some(key.clone());
        self.state.set_selection(selection);
    }

    /// Make `key` the only selected key.
    pub fn replace_selection(&mut self, key: &Key) {
        if !self.can_select(key, "replace") {
            return;
        }
        self.state.set_selection(Selection::single(key.clone()));
    }

    /// Select exactly the items between the anchor and `key`, minus
    /// disabled keys.
    ///
    /// Refused when the range holds no selectable key and empty selection
    /// is disallowed.
    ///
    /// Without an anchor, `key` becomes the anchor. In single mode this is
    /// the same as [`replace_selection`](Self::replace_selection).
    pub fn extend_selection_to(&mut self, key: &Key) {
        match self.selection_mode() {
            SelectionMode::None => {
                trace!("Ignoring extend to '{}': selection mode is none", key);
            }
            SelectionMode::Single => self.replace_selection(key),
            SelectionMode::Multiple => {
                let anchor = self
                    .state
                    .selection()
                    .anchor_key
                    .clone()
                    .unwrap_or_else(|| key.clone());
                let range = self.key_range(&anchor, key);
                if range.is_empty() {
                    trace!("Ignoring extend to '{}': no range from '{}'", key, anchor);
                    return;
                }
                let keys = SelectedKeys::Explicit(
                    range.into_iter().filter(|k| !self.is_disabled(k)).collect(),
                );
                if self.disallow_empty_selection() && !self.has_selectable(&keys) {
                    trace!("Ignoring extend to '{}': selection may not become empty", key);
                    return;
                }
                self.state.set_selection(Selection {
                    keys,
                    anchor_key: Some(anchor),
                    current_key: Some(key.clone()),
                });
            }
        }
    }

    /// Apply a selection gesture on `key`.
    pub fn select(&mut self, key: &Key, modifiers: SelectModifiers) {
        match self.selection_mode() {
            SelectionMode::None => {}
            SelectionMode::Single => self.toggle_selection(key),
            SelectionMode::Multiple if modifiers.shift => self.extend_selection_to(key),
            SelectionMode::Multiple if modifiers.replace => self.replace_selection(key),
            SelectionMode::Multiple => self.toggle_selection(key),
        }
    }

    /// Select every key. Disabled keys still report unselected.
    pub fn select_all(&mut self) {
        if self.selection_mode() != SelectionMode::Multiple {
            trace!("Ignoring select all: selection mode is {}", self.selection_mode());
            return;
        }
        self.state.set_selection(Selection::with_keys(SelectedKeys::all()));
    }

    pub fn clear_selection(&mut self) {
        if self.disallow_empty_selection() {
            trace!("Ignoring clear: selection may not become empty");
            return;
        }
        if !self.state.selection().keys.is_empty() {
            self.state.set_selection(Selection::new());
        }
    }

    pub fn toggle_select_all(&mut self) {
        if self.is_select_all() {
            self.clear_selection();
        } else {
            self.select_all();
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn can_select(&self, key: &Key, op: &str) -> bool {
        if self.selection_mode() == SelectionMode::None {
            trace!("Ignoring {} of '{}': selection mode is none", op, key);
            return false;
        }
        if self.is_disabled(key) {
            trace!("Ignoring {} of disabled '{}'", op, key);
            return false;
        }
        true
    }

    /// Whether `keys` would select at least one key that is not disabled.
    fn has_selectable(&self, keys: &SelectedKeys) -> bool {
        match keys {
            SelectedKeys::Explicit(keys) => keys.iter().any(|key| !self.is_disabled(key)),
            SelectedKeys::AllExcept(_) => self.selectable_items().any(|key| keys.contains(key)),
        }
    }

    fn selectable_items(&self) -> impl Iterator<Item = &Key> + '_ {
        self.collection
            .keys()
            .filter(move |key| self.is_item(key) && !self.is_disabled(key))
    }

    fn is_item(&self, key: &Key) -> bool {
        self.collection
            .get_item(key)
            .is_some_and(|node| node.node_type == NodeType::Item)
    }

    /// Item keys from `from` to `to` inclusive, in traversal order,
    /// whichever of the two comes first.
    fn key_range(&self, from: &Key, to: &Key) -> Vec<Key> {
        self.walk_forward(from, to)
            .or_else(|| self.walk_forward(to, from))
            .unwrap_or_default()
    }

    fn walk_forward(&self, from: &Key, to: &Key) -> Option<Vec<Key>> {
        self.collection.get_item(from)?;
        let mut keys = Vec::new();
        let mut current = Some(from);
        while let Some(key) = current {
            if self.is_item(key) {
                keys.push(key.clone());
            }
            if key == to {
                return Some(keys);
            }
            current = self.collection.get_key_after(key);
        }
        None
    }
}
