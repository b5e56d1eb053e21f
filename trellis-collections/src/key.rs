//! Node keys.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Identifier of a node inside a collection.
///
/// Callers key nodes with integers or strings. Keys the builder derives are
/// structured instead, so they never equal a caller's key even when both
/// display the same: a synthesized key records the parent and sibling
/// position, and a scoped key records the parent and the child's own key.
/// Rebuilding from the same input yields the same keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
    /// Synthesized from the sibling position, under `parent` or at the root.
    Position {
        parent: Option<Box<Key>>,
        position: usize,
    },
    /// An explicit child key namespaced under its parent.
    Scoped { parent: Box<Key>, key: Box<Key> },
}

impl Key {
    /// Key for the node at `position` among the root nodes.
    pub fn root_position(position: usize) -> Self {
        Key::Position {
            parent: None,
            position,
        }
    }

    /// Key for the node at `position` among the children of `parent`.
    pub fn child_position(parent: &Key, position: usize) -> Self {
        Key::Position {
            parent: Some(Box::new(parent.clone())),
            position,
        }
    }

    /// Explicit child key namespaced under its parent.
    pub fn scoped(parent: &Key, child: &Key) -> Self {
        Key::Scoped {
            parent: Box::new(parent.clone()),
            key: Box::new(child.clone()),
        }
    }

    /// The string form, if this is a string key.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Key::Str(s) => Some(s),
            _ => None,
        }
    }

    /// True for keys the builder derived rather than received.
    pub fn is_derived(&self) -> bool {
        matches!(self, Key::Position { .. } | Key::Scoped { .. })
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{n}"),
            Key::Str(s) => f.write_str(s),
            Key::Position {
                parent: None,
                position,
            } => write!(f, "$.{position}"),
            Key::Position {
                parent: Some(parent),
                position,
            } => write!(f, "{parent}.{position}"),
            Key::Scoped { parent, key } => write!(f, "{parent}:{key}"),
        }
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

impl From<&String> for Key {
    fn from(s: &String) -> Self {
        Key::Str(s.clone())
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<&Key> for Key {
    fn from(key: &Key) -> Self {
        key.clone()
    }
}
