//! Raw selection values.
//!
//! Selection is tracked by key so it stays stable when the collection is
//! rebuilt. "Select all" is its own variant rather than a sentinel key, so
//! exclusions under select-all are explicit.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use trellis_collections::Key;

/// The set of selected keys.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectedKeys {
    /// Exactly these keys.
    Explicit(HashSet<Key>),
    /// Every key except these.
    AllExcept(HashSet<Key>),
}

impl Default for SelectedKeys {
    fn default() -> Self {
        SelectedKeys::Explicit(HashSet::new())
    }
}

impl SelectedKeys {
    /// Select every key.
    pub fn all() -> Self {
        SelectedKeys::AllExcept(HashSet::new())
    }

    pub fn from_keys<K: Into<Key>>(keys: impl IntoIterator<Item = K>) -> Self {
        SelectedKeys::Explicit(keys.into_iter().map(Into::into).collect())
    }

    /// Raw membership; disabled keys are not considered here.
    pub fn contains(&self, key: &Key) -> bool {
        match self {
            SelectedKeys::Explicit(keys) => keys.contains(key),
            SelectedKeys::AllExcept(excluded) => !excluded.contains(key),
        }
    }

    pub fn is_all(&self) -> bool {
        matches!(self, SelectedKeys::AllExcept(_))
    }

    /// True only for an empty explicit set.
    pub fn is_empty(&self) -> bool {
        matches!(self, SelectedKeys::Explicit(keys) if keys.is_empty())
    }

    pub fn insert(&mut self, key: Key) {
        match self {
            SelectedKeys::Explicit(keys) => {
                keys.insert(key);
            }
            SelectedKeys::AllExcept(excluded) => {
                excluded.remove(&key);
            }
        }
    }

    pub fn remove(&mut self, key: &Key) {
        match self {
            SelectedKeys::Explicit(keys) => {
                keys.remove(key);
            }
            SelectedKeys::AllExcept(excluded) => {
                excluded.insert(key.clone());
            }
        }
    }
}

/// Selected keys plus the keys range selection is anchored on.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    /// Currently selected keys.
    pub keys: SelectedKeys,
    /// Starting point of range selection (the last explicitly touched key).
    pub anchor_key: Option<Key>,
    /// End point of the last range selection.
    pub current_key: Option<Key>,
}

impl Selection {
    /// Create a new empty selection.
    pub fn new() -> Self {
        Self::default()
    }

    /// A selection of exactly `key`, anchored on it.
    pub fn single(key: Key) -> Self {
        Self {
            keys: SelectedKeys::Explicit(HashSet::from([key.clone()])),
            anchor_key: Some(key.clone()),
            current_key: Some(key),
        }
    }

    pub fn with_keys(keys: SelectedKeys) -> Self {
        Self {
            keys,
            ..Self::default()
        }
    }
}
