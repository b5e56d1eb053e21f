//! Materialized collections.

use std::collections::HashMap;

use crate::key::Key;
use crate::node::Node;

/// Read-only, key-indexed view over an ordered set of items.
pub trait Collection {
    type Item;

    /// Number of items.
    fn size(&self) -> usize;

    /// All keys in traversal order.
    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_>;

    fn get_item(&self, key: &Key) -> Option<&Self::Item>;

    fn get_key_before(&self, key: &Key) -> Option<&Key>;

    fn get_key_after(&self, key: &Key) -> Option<&Key>;

    fn first_key(&self) -> Option<&Key>;

    fn last_key(&self) -> Option<&Key>;
}

/// A flattened tree of [`Node`]s in document order.
///
/// Built by [`CollectionBuilder`](crate::CollectionBuilder) and immutable
/// afterwards. Any change to the content or to the state projected into
/// the nodes produces a new collection.
#[derive(Debug, Clone)]
pub struct TreeCollection<T> {
    nodes: Vec<Node<T>>,
    positions: HashMap<Key, usize>,
    roots: Vec<Key>,
}

impl<T> Default for TreeCollection<T> {
    fn default() -> Self {
        Self {
            nodes: Vec::new(),
            positions: HashMap::new(),
            roots: Vec::new(),
        }
    }
}

impl<T> TreeCollection<T> {
    pub(crate) fn from_parts(nodes: Vec<Node<T>>, positions: HashMap<Key, usize>, roots: Vec<Key>) -> Self {
        Self {
            nodes,
            positions,
            roots,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// All nodes in traversal order.
    pub fn iter(&self) -> std::slice::Iter<'_, Node<T>> {
        self.nodes.iter()
    }

    /// Nodes at level 0, in order.
    pub fn root_nodes(&self) -> impl Iterator<Item = &Node<T>> + '_ {
        self.roots.iter().filter_map(move |key| self.node(key))
    }

    /// Materialized children of `key`, in order. Restartable: every call
    /// walks from the first child again.
    pub fn child_nodes<'a>(&'a self, key: &Key) -> impl Iterator<Item = &'a Node<T>> + use<'a, T> {
        self.node(key)
            .map(|node| node.child_nodes.as_slice())
            .unwrap_or_default()
            .iter()
            .filter_map(move |child| self.node(child))
    }

    pub fn parent(&self, key: &Key) -> Option<&Node<T>> {
        self.node(key)
            .and_then(|node| node.parent_key.as_ref())
            .and_then(|parent| self.node(parent))
    }

    /// Position of `key` in traversal order.
    pub fn position(&self, key: &Key) -> Option<usize> {
        self.positions.get(key).copied()
    }

    pub fn contains_key(&self, key: &Key) -> bool {
        self.positions.contains_key(key)
    }

    fn node(&self, key: &Key) -> Option<&Node<T>> {
        self.positions.get(key).map(|&at| &self.nodes[at])
    }
}

impl<T> Collection for TreeCollection<T> {
    type Item = Node<T>;

    fn size(&self) -> usize {
        self.nodes.len()
    }

    fn keys(&self) -> Box<dyn Iterator<Item = &Key> + '_> {
        Box::new(self.nodes.iter().map(|node| &node.key))
    }

    fn get_item(&self, key: &Key) -> Option<&Node<T>> {
        self.node(key)
    }

    fn get_key_before(&self, key: &Key) -> Option<&Key> {
        self.node(key).and_then(|node| node.prev_key.as_ref())
    }

    fn get_key_after(&self, key: &Key) -> Option<&Key> {
        self.node(key).and_then(|node| node.next_key.as_ref())
    }

    fn first_key(&self) -> Option<&Key> {
        self.nodes.first().map(|node| &node.key)
    }

    fn last_key(&self) -> Option<&Key> {
        self.nodes.last().map(|node| &node.key)
    }
}

impl<'a, T> IntoIterator for &'a TreeCollection<T> {
    type Item = &'a Node<T>;
    type IntoIter = std::slice::Iter<'a, Node<T>>;

    fn into_iter(self) -> Self::IntoIter {
        self.nodes.iter()
    }
}
