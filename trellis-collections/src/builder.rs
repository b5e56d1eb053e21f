//! Flattening of content descriptors into a linked collection.
//!
//! The builder walks the descriptor tree depth-first in pre-order. Every
//! node gets a key, a level, a same-type sibling index and its
//! `prev_key`/`next_key` links as soon as it is visited, so the links form
//! a single document-order list across subtree boundaries.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use log::{debug, trace};

use crate::collection::TreeCollection;
use crate::context::{BuildContext, Column};
use crate::descriptor::{CollectionNodes, PartialNodes};
use crate::error::{CollectionError, Result};
use crate::key::Key;
use crate::node::{ItemStates, Node, NodeType};
use crate::partial::{Element, KeyFn, PartialNode, Source};

/// Which items have their nested items materialized.
///
/// Sections always expand. Non-item children of an item, such as cells,
/// are materialized whether or not the item is expanded.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Expansion {
    #[default]
    All,
    Keys(HashSet<Key>),
}

impl Expansion {
    pub fn is_expanded(&self, key: &Key) -> bool {
        match self {
            Expansion::All => true,
            Expansion::Keys(keys) => keys.contains(key),
        }
    }
}

/// Builds [`TreeCollection`]s from content descriptors.
///
/// The builder holds configuration only; every build starts from scratch
/// and yields a fresh collection. Keys are deterministic, so rebuilding
/// the same content yields the same keys in the same order.
///
/// # Example
///
/// ```ignore
/// let content = Content::from_items(people, |p| Element::new(Item::new(p.name.clone())));
/// let collection = CollectionBuilder::new()
///     .item_key(|p: &Person| Key::from(p.id))
///     .build(&content)?;
/// ```
pub struct CollectionBuilder<T> {
    item_key: Option<KeyFn<T>>,
    context: BuildContext,
    expansion: Expansion,
}

impl<T> Default for CollectionBuilder<T> {
    fn default() -> Self {
        Self {
            item_key: None,
            context: BuildContext::default(),
            expansion: Expansion::default(),
        }
    }
}

impl<T: Clone + 'static> CollectionBuilder<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Derive keys of rendered values that carry no explicit key.
    pub fn item_key(mut self, item_key: impl Fn(&T) -> Key + 'static) -> Self {
        self.item_key = Some(Arc::new(item_key));
        self
    }

    /// Set the ambient column set.
    pub fn columns(mut self, columns: impl Into<Arc<[Column]>>) -> Self {
        self.context = self.context.with_columns(columns);
        self
    }

    pub fn context(mut self, context: BuildContext) -> Self {
        self.context = context;
        self
    }

    pub fn expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    /// Build a collection with default item states.
    pub fn build<C>(&self, content: &C) -> Result<TreeCollection<T>>
    where
        C: CollectionNodes<T> + ?Sized,
    {
        self.build_with_states(content, |_| ItemStates::default())
    }

    /// Build a collection, merging `projector(key)` into every node.
    ///
    /// The projector is called exactly once per materialized node.
    pub fn build_with_states<C, P>(&self, content: &C, projector: P) -> Result<TreeCollection<T>>
    where
        C: CollectionNodes<T> + ?Sized,
        P: Fn(&Key) -> ItemStates,
    {
        debug!("Building collection");
        let mut walk = Walk {
            builder: self,
            projector: &projector,
            nodes: Vec::new(),
            positions: HashMap::new(),
        };
        let roots = walk.visit_all(content.produce_nodes(&self.context), None)?;
        debug!(
            "Built collection: {} nodes, {} roots",
            walk.nodes.len(),
            roots.len()
        );
        Ok(TreeCollection::from_parts(walk.nodes, walk.positions, roots))
    }
}

/// The node whose children are being walked.
struct Parent {
    key: Key,
    level: usize,
    node_type: NodeType,
    expanded: bool,
}

/// Counters shared by one group of siblings.
#[derive(Default)]
struct Siblings {
    position: usize,
    per_type: [usize; 4],
}

/// State of a single build.
struct Walk<'b, T> {
    builder: &'b CollectionBuilder<T>,
    projector: &'b dyn Fn(&Key) -> ItemStates,
    nodes: Vec<Node<T>>,
    positions: HashMap<Key, usize>,
}

impl<T: Clone + 'static> Walk<'_, T> {
    /// Visit one sibling group. Returns the keys of the nodes it produced.
    fn visit_all(&mut self, partials: PartialNodes<T>, parent: Option<&Parent>) -> Result<Vec<Key>> {
        let mut siblings = Siblings::default();
        let mut keys = Vec::new();
        for partial in partials {
            let mut partial = partial?;
            if let Some(parent) = parent {
                // Nested items always follow the other children.
                if !parent.expanded && partial.node_type == Some(NodeType::Item) {
                    trace!("Skipping nested items of collapsed '{}'", parent.key);
                    break;
                }
                partial.key = partial.key.map(|key| Key::scoped(&parent.key, &key));
            }
            keys.extend(self.visit(partial, parent, &mut siblings)?);
        }
        Ok(keys)
    }

    fn visit(
        &mut self,
        mut partial: PartialNode<T>,
        parent: Option<&Parent>,
        siblings: &mut Siblings,
    ) -> Result<Vec<Key>> {
        match partial.source.take() {
            Some(Source::Element(element)) => self.expand(partial, element, parent, siblings),
            Some(Source::Renderer(renderer)) => {
                let Some(value) = partial.value.as_ref() else {
                    return Err(CollectionError::missing_dependency(
                        "a rendered node needs a value to render",
                    ));
                };
                let mut element = renderer(value);
                if element.key.is_none() {
                    element.key = self.value_key(&partial, value);
                }
                self.expand(partial, element, parent, siblings)
            }
            None => Ok(vec![self.materialize(partial, parent, siblings)?]),
        }
    }

    /// Expand an element in place of `outer`, filling gaps in each produced
    /// node from `outer` and the element.
    fn expand(
        &mut self,
        outer: PartialNode<T>,
        element: Element<T>,
        parent: Option<&Parent>,
        siblings: &mut Siblings,
    ) -> Result<Vec<Key>> {
        let mut keys = Vec::new();
        for child in element.produce_nodes(&self.builder.context) {
            let mut child = child?;
            if child.key.is_none() && child.source.is_none() {
                child.key = element.key.clone().or_else(|| outer.key.clone());
            }
            if child.value.is_none() {
                child.value = outer.value.clone();
            }
            if child.index.is_none() {
                child.index = outer.index.map(|index| index + keys.len());
            }
            if child.text_value.is_none() {
                child.text_value = outer.text_value.clone();
            }
            if child.aria_label.is_none() {
                child.aria_label = outer.aria_label.clone();
            }
            if child.item_key.is_none() {
                child.item_key = outer.item_key.clone();
            }

            let produced = self.visit(child, parent, siblings)?;
            if let Some(expected) = outer.node_type {
                self.check_types(&produced, expected, parent)?;
            }
            keys.extend(produced);
        }
        Ok(keys)
    }

    fn check_types(&self, keys: &[Key], expected: NodeType, parent: Option<&Parent>) -> Result<()> {
        for key in keys {
            let found = self.nodes[self.positions[key]].node_type;
            if found != expected {
                return Err(CollectionError::UnsupportedType {
                    found,
                    parent: parent.map_or_else(
                        || "collection".to_string(),
                        |p| p.node_type.to_string(),
                    ),
                    expected,
                });
            }
        }
        Ok(())
    }

    fn value_key(&self, partial: &PartialNode<T>, value: &T) -> Option<Key> {
        partial
            .item_key
            .as_ref()
            .or(self.builder.item_key.as_ref())
            .map(|item_key| item_key(value))
    }

    /// Turn a partial node into a linked node and walk its children.
    fn materialize(
        &mut self,
        partial: PartialNode<T>,
        parent: Option<&Parent>,
        siblings: &mut Siblings,
    ) -> Result<Key> {
        let node_type = partial
            .node_type
            .ok_or_else(|| CollectionError::invalid_node_type("<unspecified>"))?;

        let position = siblings.position;
        siblings.position += 1;

        let key = match (&partial.key, &partial.value) {
            (Some(key), _) => key.clone(),
            (None, Some(value)) => self
                .value_key(&partial, value)
                .unwrap_or_else(|| synthesized_key(parent, position)),
            (None, None) => synthesized_key(parent, position),
        };
        if self.positions.contains_key(&key) {
            return Err(CollectionError::duplicate_key(key));
        }

        let slot = node_type.slot();
        let index = partial.index.unwrap_or(siblings.per_type[slot]);
        siblings.per_type[slot] = index + 1;

        let mut node = Node::new(
            node_type,
            key.clone(),
            partial.has_child_nodes,
            partial.child_nodes.as_ref().map(|_| Vec::new()),
        )?;
        node.level = parent.map_or(0, |p| p.level + 1);
        node.parent_key = parent.map(|p| p.key.clone());
        node.index = index;
        node.text_value = partial
            .text_value
            .or_else(|| {
                partial
                    .rendered
                    .as_ref()
                    .and_then(|r| r.as_str())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
            })
            .or_else(|| partial.aria_label.clone())
            .unwrap_or_default();
        node.rendered = partial.rendered;
        node.aria_label = partial.aria_label;
        node.value = partial.value;
        node.states = (self.projector)(&key);

        if let Some(prev) = self.nodes.last_mut() {
            prev.next_key = Some(key.clone());
            node.prev_key = Some(prev.key.clone());
        }
        trace!("Visited {} '{}' at level {}", node_type, key, node.level);

        let at = self.nodes.len();
        let level = node.level;
        self.nodes.push(node);
        self.positions.insert(key.clone(), at);

        if let Some(child_nodes) = partial.child_nodes.filter(|_| partial.has_child_nodes) {
            let me = Parent {
                key: key.clone(),
                level,
                node_type,
                expanded: node_type != NodeType::Item || self.builder.expansion.is_expanded(&key),
            };
            let children = self.visit_all(child_nodes.produce(&self.builder.context), Some(&me))?;
            self.nodes[at].child_nodes = children;
        }
        Ok(key)
    }
}

fn synthesized_key(parent: Option<&Parent>, position: usize) -> Key {
    match parent {
        Some(parent) => Key::child_position(&parent.key, position),
        None => Key::root_position(position),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, Item, Section};
    use crate::descriptor;
    use crate::partial::ChildNodes;
    use crate::Collection;

    fn keys<T>(collection: &TreeCollection<T>) -> Vec<String> {
        collection.keys().map(|k| k.to_string()).collect()
    }

    #[test]
    fn test_synthesized_keys_follow_position() {
        let content = Content::<()>::from_elements([
            Element::new(Item::new("a")),
            Element::new(Item::new("b")),
        ]);
        let collection = CollectionBuilder::new().build(&content).unwrap();
        assert_eq!(keys(&collection), vec!["$.0", "$.1"]);
        assert_eq!(collection.get_item(&Key::root_position(1)).unwrap().text_value, "b");
    }

    #[test]
    fn test_section_children_levels_and_indices() {
        let content = Content::<()>::from_elements([Element::new(
            Section::new(Content::from_elements([
                Element::new(Item::new("one")).with_key("one"),
                Element::new(Item::new("two")).with_key("two"),
            ]))
            .title("Numbers"),
        )
        .with_key("numbers")]);
        let collection = CollectionBuilder::new().build(&content).unwrap();

        assert_eq!(keys(&collection), vec!["numbers", "one", "two"]);
        let two = collection.get_item(&Key::from("two")).unwrap();
        assert_eq!(two.level, 1);
        assert_eq!(two.index, 1);
        assert_eq!(two.parent_key, Some(Key::from("numbers")));
        let section = collection.get_item(&Key::from("numbers")).unwrap();
        assert_eq!(section.child_nodes, vec![Key::from("one"), Key::from("two")]);
        assert_eq!(section.text_value, "Numbers");
    }

    #[test]
    fn test_item_key_applies_to_mapped_values() {
        let content = Content::from_items(vec![10i64, 20, 30], |n: &i64| {
            Element::new(Item::new(n.to_string()))
        });
        let collection = CollectionBuilder::new()
            .item_key(|n: &i64| Key::from(*n))
            .build(&content)
            .unwrap();
        assert_eq!(keys(&collection), vec!["10", "20", "30"]);
        assert_eq!(collection.get_item(&Key::from(20)).unwrap().value, Some(20));
    }

    #[test]
    fn test_unsupported_type_in_section() {
        let content = Content::<()>::from_elements([Element::new(Section::new(
            Content::from_elements([Element::new(Section::new(Content::Static(vec![])))]),
        ))]);
        let err = CollectionBuilder::new().build(&content).unwrap_err();
        assert_eq!(
            err,
            CollectionError::UnsupportedType {
                found: NodeType::Section,
                parent: "section".to_string(),
                expected: NodeType::Item,
            }
        );
    }

    #[test]
    fn test_collapsed_item_skips_nested_items() {
        let content = Content::<()>::from_elements([Element::new(
            Item::new("parent").child_items(Content::from_elements([
                Element::new(Item::new("child")).with_key("child"),
            ])),
        )
        .with_key("parent")]);

        let collapsed = CollectionBuilder::new()
            .expansion(Expansion::Keys(HashSet::new()))
            .build(&content)
            .unwrap();
        assert_eq!(keys(&collapsed), vec!["parent"]);
        assert!(collapsed.get_item(&Key::from("parent")).unwrap().has_child_nodes);

        let expanded = CollectionBuilder::new()
            .expansion(Expansion::Keys(HashSet::from([Key::from("parent")])))
            .build(&content)
            .unwrap();
        assert_eq!(keys(&expanded), vec!["parent", "child"]);
    }

    #[test]
    fn test_projector_runs_once_per_node() {
        let content = Content::<()>::from_elements([
            Element::new(Item::new("a")).with_key("a"),
            Element::new(Item::new("b")).with_key("b"),
        ]);
        let calls = std::cell::Cell::new(0);
        let collection = CollectionBuilder::new()
            .build_with_states(&content, |key| {
                calls.set(calls.get() + 1);
                ItemStates {
                    is_selected: key == &Key::from("b"),
                    ..Default::default()
                }
            })
            .unwrap();
        assert_eq!(calls.get(), 2);
        assert!(!collection.get_item(&Key::from("a")).unwrap().is_selected());
        assert!(collection.get_item(&Key::from("b")).unwrap().is_selected());
    }

    /// An item with two cells keyed `x` and `y`.
    struct Pair;

    impl CollectionNodes<()> for Pair {
        fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<()> {
            let node = PartialNode::new(NodeType::Item).with_child_nodes(ChildNodes::new(|_| {
                Box::new(
                    ["x", "y"]
                        .into_iter()
                        .map(|k| Ok(PartialNode::new(NodeType::Cell).with_key(k))),
                )
            }));
            Box::new(std::iter::once(Ok(node)))
        }
    }

    #[test]
    fn test_child_keys_are_scoped_to_parent() {
        let content = Content::from_elements([
            Element::new(Pair).with_key("r1"),
            Element::new(Pair).with_key("r2"),
        ]);
        let collection = CollectionBuilder::new().build(&content).unwrap();
        assert_eq!(keys(&collection), vec!["r1", "r1:x", "r1:y", "r2", "r2:x", "r2:y"]);
    }

    #[test]
    fn test_scoped_keys_do_not_collide_with_lookalikes() {
        let content = Content::from_elements([
            Element::new(Pair).with_key(1i64),
            Element::new(Pair).with_key("1"),
            Element::new(Pair).with_key("r"),
            Element::new(Item::new("explicit")).with_key("r:x"),
        ]);
        let collection = CollectionBuilder::new().build(&content).unwrap();
        assert_eq!(collection.size(), 10);

        let int_cell = Key::scoped(&Key::from(1), &Key::from("x"));
        let str_cell = Key::scoped(&Key::from("1"), &Key::from("x"));
        assert_ne!(int_cell, str_cell);
        assert_eq!(collection.get_item(&int_cell).unwrap().parent_key, Some(Key::from(1)));
        assert_eq!(collection.get_item(&str_cell).unwrap().parent_key, Some(Key::from("1")));
        assert_eq!(
            collection.get_item(&Key::from("r:x")).unwrap().node_type,
            NodeType::Item
        );
    }

    #[test]
    fn test_synthesized_keys_do_not_collide_with_lookalikes() {
        let content = Content::<()>::from_elements([
            Element::new(Item::new("explicit")).with_key("$.1"),
            Element::new(Item::new("synthesized")),
        ]);
        let collection = CollectionBuilder::new().build(&content).unwrap();
        assert_eq!(collection.get_item(&Key::from("$.1")).unwrap().text_value, "explicit");
        assert_eq!(
            collection.get_item(&Key::root_position(1)).unwrap().text_value,
            "synthesized"
        );
    }

    #[test]
    fn test_sections_expand_even_when_nothing_is_expanded() {
        let content = Content::<()>::from_elements([Element::new(Section::new(
            Content::from_elements([
                Element::new(Item::new("one")).with_key("one"),
                Element::new(Item::new("two").child_items(Content::from_elements([
                    Element::new(Item::new("nested")).with_key("nested"),
                ])))
                .with_key("two"),
            ]),
        ))
        .with_key("numbers")]);

        let collection = CollectionBuilder::new()
            .expansion(Expansion::Keys(HashSet::new()))
            .build(&content)
            .unwrap();
        assert_eq!(keys(&collection), vec!["numbers", "one", "two"]);
        assert_eq!(
            collection.get_item(&Key::from("numbers")).unwrap().child_nodes,
            vec![Key::from("one"), Key::from("two")]
        );
    }

    #[test]
    fn test_missing_node_type_is_rejected() {
        struct Untyped;
        impl CollectionNodes<()> for Untyped {
            fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<()> {
                Box::new(std::iter::once(Ok(PartialNode::default())))
            }
        }
        let err = CollectionBuilder::new().build(&Untyped).unwrap_err();
        assert!(matches!(err, CollectionError::InvalidNodeType(_)));
    }

    #[test]
    fn test_descriptor_error_aborts_build() {
        struct Broken;
        impl CollectionNodes<()> for Broken {
            fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<()> {
                descriptor::fail(CollectionError::missing_dependency("columns"))
            }
        }
        let content = Content::from_elements([
            Element::new(Item::new("ok")),
            Element::new(Broken),
        ]);
        let err = CollectionBuilder::new().build(&content).unwrap_err();
        assert_eq!(err, CollectionError::missing_dependency("columns"));
    }
}
