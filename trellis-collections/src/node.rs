//! Finalized collection nodes.

use std::any::Any;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, Result};
use crate::key::Key;

/// The closed set of node types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeType {
    Section,
    Item,
    Column,
    Cell,
}

impl NodeType {
    pub const ALL: [NodeType; 4] = [
        NodeType::Section,
        NodeType::Item,
        NodeType::Column,
        NodeType::Cell,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            NodeType::Section => "section",
            NodeType::Item => "item",
            NodeType::Column => "column",
            NodeType::Cell => "cell",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NodeType {
    type Err = CollectionError;

    fn from_str(s: &str) -> Result<Self> {
        NodeType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CollectionError::invalid_node_type(s))
    }
}

/// Derived per-node state flags.
///
/// These are never authoritative: they are projected from the selection
/// store when a collection is built.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ItemStates {
    pub is_selected: bool,
    pub is_expanded: bool,
    pub is_disabled: bool,
    pub is_focused: bool,
}

/// Opaque display payload of a node.
///
/// The collection never looks inside; renderers downcast to whatever they
/// stored. Plain strings are common enough to get helpers.
#[derive(Clone)]
pub struct Rendered(Arc<dyn Any + Send + Sync>);

impl Rendered {
    pub fn new<V: Any + Send + Sync>(value: V) -> Self {
        Self(Arc::new(value))
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::new(text.into())
    }

    pub fn downcast_ref<V: Any>(&self) -> Option<&V> {
        self.0.downcast_ref::<V>()
    }

    /// The payload as a string, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        self.downcast_ref::<String>()
            .map(String::as_str)
            .or_else(|| self.downcast_ref::<&'static str>().copied())
    }
}

impl fmt::Debug for Rendered {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(s) => f.debug_tuple("Rendered").field(&s).finish(),
            None => f.write_str("Rendered(..)"),
        }
    }
}

/// One flattened, addressable entry of a collection.
///
/// `parent_key`, `prev_key` and `next_key` are lookups through the owning
/// collection, never references. `prev_key`/`next_key` walk the whole
/// collection in document order, crossing subtree boundaries.
#[derive(Debug, Clone)]
pub struct Node<T> {
    pub node_type: NodeType,
    pub key: Key,
    pub value: Option<T>,
    pub level: usize,
    pub has_child_nodes: bool,
    pub child_nodes: Vec<Key>,
    pub rendered: Option<Rendered>,
    pub text_value: String,
    pub aria_label: Option<String>,
    pub index: usize,
    pub parent_key: Option<Key>,
    pub prev_key: Option<Key>,
    pub next_key: Option<Key>,
    pub states: ItemStates,
}

impl<T> Node<T> {
    /// Create a node with no links, payload or state.
    ///
    /// Fails if `has_child_nodes` is set without a child sequence.
    pub fn new(
        node_type: NodeType,
        key: Key,
        has_child_nodes: bool,
        child_nodes: Option<Vec<Key>>,
    ) -> Result<Self> {
        if has_child_nodes && child_nodes.is_none() {
            return Err(CollectionError::MissingChildNodes(key));
        }
        Ok(Self {
            node_type,
            key,
            value: None,
            level: 0,
            has_child_nodes,
            child_nodes: child_nodes.unwrap_or_default(),
            rendered: None,
            text_value: String::new(),
            aria_label: None,
            index: 0,
            parent_key: None,
            prev_key: None,
            next_key: None,
            states: ItemStates::default(),
        })
    }

    pub fn is_selected(&self) -> bool {
        self.states.is_selected
    }

    pub fn is_disabled(&self) -> bool {
        self.states.is_disabled
    }

    pub fn is_focused(&self) -> bool {
        self.states.is_focused
    }

    pub fn is_expanded(&self) -> bool {
        self.states.is_expanded
    }
}
