//! Selection stores and their configuration.

use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use trellis_collections::{ItemStates, Key};

use crate::mode::SelectionMode;
use crate::selection::{SelectedKeys, Selection};

/// Per-component selection configuration.
///
/// # Examples
///
/// ```ignore
/// let config = SelectionConfig::new(SelectionMode::Multiple)
///     .disallow_empty_selection()
///     .disabled_keys(["archived"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SelectionConfig {
    /// How many keys may be selected.
    pub selection_mode: SelectionMode,

    /// Refuse mutations that would leave nothing selected.
    pub disallow_empty_selection: bool,

    /// Keys that can be focused but never selected.
    pub disabled_keys: HashSet<Key>,

    /// Selection the store starts with.
    pub default_selected_keys: SelectedKeys,
}

impl SelectionConfig {
    pub fn new(selection_mode: SelectionMode) -> Self {
        Self {
            selection_mode,
            ..Default::default()
        }
    }

    pub fn disallow_empty_selection(mut self) -> Self {
        self.disallow_empty_selection = true;
        self
    }

    pub fn disabled_keys<K: Into<Key>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.disabled_keys = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn default_selected_keys(mut self, keys: SelectedKeys) -> Self {
        self.default_selected_keys = keys;
        self
    }
}

/// The narrow interface between the selection manager and whoever owns the
/// selection.
///
/// The owner stays the single source of truth: the manager only reads
/// through this trait and requests changes with `set_selection` and
/// `set_focused_key`.
pub trait SelectionStore {
    fn selection_mode(&self) -> SelectionMode;

    fn disallow_empty_selection(&self) -> bool;

    fn selection(&self) -> &Selection;

    fn set_selection(&mut self, selection: Selection);

    fn disabled_keys(&self) -> &HashSet<Key>;

    fn focused_key(&self) -> Option<&Key>;

    fn set_focused_key(&mut self, key: Option<Key>);

    /// Whether the owning component has focus.
    fn has_focus(&self) -> bool;

    fn set_has_focus(&mut self, focused: bool);

    fn is_disabled(&self, key: &Key) -> bool {
        self.disabled_keys().contains(key)
    }

    /// Selected in the store, selectable in this mode, and not disabled.
    fn is_selected(&self, key: &Key) -> bool {
        self.selection_mode() != SelectionMode::None
            && !self.is_disabled(key)
            && self.selection().keys.contains(key)
    }

    fn is_key_focused(&self, key: &Key) -> bool {
        self.focused_key() == Some(key)
    }

    /// Derived flags for `key`, as merged into nodes at build time.
    fn item_states(&self, key: &Key) -> ItemStates {
        ItemStates {
            is_selected: self.is_selected(key),
            is_disabled: self.is_disabled(key),
            is_focused: self.is_key_focused(key),
            is_expanded: false,
        }
    }
}

type ChangeHandler = Box<dyn FnMut(&SelectedKeys)>;

/// Stock [`SelectionStore`] owned by a component.
pub struct MultipleSelectionState {
    selection_mode: SelectionMode,
    disallow_empty_selection: bool,
    selection: Selection,
    disabled_keys: HashSet<Key>,
    focused_key: Option<Key>,
    has_focus: bool,
    on_selection_change: Option<ChangeHandler>,
}

impl MultipleSelectionState {
    pub fn new(config: SelectionConfig) -> Self {
        Self {
            selection_mode: config.selection_mode,
            disallow_empty_selection: config.disallow_empty_selection,
            selection: Selection::with_keys(config.default_selected_keys),
            disabled_keys: config.disabled_keys,
            focused_key: None,
            has_focus: false,
            on_selection_change: None,
        }
    }

    /// Called with the new keys whenever they change.
    pub fn on_selection_change(mut self, handler: impl FnMut(&SelectedKeys) + 'static) -> Self {
        self.on_selection_change = Some(Box::new(handler));
        self
    }

    pub fn set_selection_mode(&mut self, mode: SelectionMode) {
        self.selection_mode = mode;
    }

    pub fn set_disabled_keys<K: Into<Key>>(&mut self, keys: impl IntoIterator<Item = K>) {
        self.disabled_keys = keys.into_iter().map(Into::into).collect();
    }

    pub fn selected_keys(&self) -> &SelectedKeys {
        &self.selection.keys
    }
}

impl Default for MultipleSelectionState {
    fn default() -> Self {
        Self::new(SelectionConfig::default())
    }
}

impl fmt::Debug for MultipleSelectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MultipleSelectionState")
            .field("selection_mode", &self.selection_mode)
            .field("disallow_empty_selection", &self.disallow_empty_selection)
            .field("selection", &self.selection)
            .field("disabled_keys", &self.disabled_keys)
            .field("focused_key", &self.focused_key)
            .field("has_focus", &self.has_focus)
            .finish_non_exhaustive()
    }
}

impl SelectionStore for MultipleSelectionState {
    fn selection_mode(&self) -> SelectionMode {
        self.selection_mode
    }

    fn disallow_empty_selection(&self) -> bool {
        self.disallow_empty_selection
    }

    fn selection(&self) -> &Selection {
        &self.selection
    }

    fn set_selection(&mut self, selection: Selection) {
        let changed = selection.keys != self.selection.keys;
        self.selection = selection;
        if changed && let Some(handler) = self.on_selection_change.as_mut() {
            handler(&self.selection.keys);
        }
    }

    fn disabled_keys(&self) -> &HashSet<Key> {
        &self.disabled_keys
    }

    fn focused_key(&self) -> Option<&Key> {
        self.focused_key.as_ref()
    }

    fn set_focused_key(&mut self, key: Option<Key>) {
        self.focused_key = key;
    }

    fn has_focus(&self) -> bool {
        self.has_focus
    }

    fn set_has_focus(&mut self, focused: bool) {
        self.has_focus = focused;
    }
}
