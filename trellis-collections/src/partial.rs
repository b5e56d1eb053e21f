//! Node descriptions produced while a collection is being built.

use std::fmt;
use std::sync::Arc;

use crate::context::BuildContext;
use crate::descriptor::{CollectionNodes, PartialNodes};
use crate::key::Key;
use crate::node::{NodeType, Rendered};

/// Renders a raw value into a declarative element.
pub type Renderer<T> = Arc<dyn Fn(&T) -> Element<T>>;

/// Extracts a stable key from a value.
pub type KeyFn<T> = Arc<dyn Fn(&T) -> Key>;

/// A declarative child: some content type plus an optional key.
///
/// The builder expands an element by asking its content for nodes.
pub struct Element<T> {
    pub key: Option<Key>,
    content: Arc<dyn CollectionNodes<T>>,
}

impl<T> Element<T> {
    pub fn new(content: impl CollectionNodes<T> + 'static) -> Self {
        Self {
            key: None,
            content: Arc::new(content),
        }
    }

    /// Give the element an explicit key.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Ask the wrapped content for its nodes.
    pub fn produce_nodes(&self, context: &BuildContext) -> PartialNodes<T> {
        self.content.produce_nodes(context)
    }
}

impl<T> Clone for Element<T> {
    fn clone(&self) -> Self {
        Self {
            key: self.key.clone(),
            content: Arc::clone(&self.content),
        }
    }
}

impl<T> fmt::Debug for Element<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element").field("key", &self.key).finish_non_exhaustive()
    }
}

/// Where a partial node's content comes from: never both.
pub enum Source<T> {
    /// A pre-built element.
    Element(Element<T>),
    /// A callback applied to the partial node's `value`.
    Renderer(Renderer<T>),
}

impl<T> Clone for Source<T> {
    fn clone(&self) -> Self {
        match self {
            Source::Element(element) => Source::Element(element.clone()),
            Source::Renderer(renderer) => Source::Renderer(Arc::clone(renderer)),
        }
    }
}

/// Restartable producer of a node's children.
///
/// Every call starts a fresh walk, so the same node can be flattened
/// again on the next build.
pub struct ChildNodes<T>(Arc<dyn Fn(&BuildContext) -> PartialNodes<T>>);

impl<T> ChildNodes<T> {
    /// Wrap a child producer.
    pub fn new(produce: impl Fn(&BuildContext) -> PartialNodes<T> + 'static) -> Self {
        Self(Arc::new(produce))
    }

    /// Start a fresh walk over the children.
    pub fn produce(&self, context: &BuildContext) -> PartialNodes<T> {
        (self.0)(context)
    }
}

impl<T> Clone for ChildNodes<T> {
    fn clone(&self) -> Self {
        Self(Arc::clone(&self.0))
    }
}

/// A not-yet-finalized node.
///
/// Anything left empty is filled in by the builder: the key, level, index
/// and links. A partial node with a `source` is expanded instead of being
/// materialized directly; `node_type` then names the only type the
/// expansion may produce.
pub struct PartialNode<T> {
    pub node_type: Option<NodeType>,
    pub key: Option<Key>,
    pub value: Option<T>,
    pub source: Option<Source<T>>,
    pub rendered: Option<Rendered>,
    pub text_value: Option<String>,
    pub aria_label: Option<String>,
    pub index: Option<usize>,
    pub item_key: Option<KeyFn<T>>,
    pub has_child_nodes: bool,
    pub child_nodes: Option<ChildNodes<T>>,
}

impl<T> Default for PartialNode<T> {
    fn default() -> Self {
        Self {
            node_type: None,
            key: None,
            value: None,
            source: None,
            rendered: None,
            text_value: None,
            aria_label: None,
            index: None,
            item_key: None,
            has_child_nodes: false,
            child_nodes: None,
        }
    }
}

impl<T> PartialNode<T> {
    /// A node of the given type, to be materialized as-is.
    pub fn new(node_type: NodeType) -> Self {
        Self {
            node_type: Some(node_type),
            ..Default::default()
        }
    }

    /// A node expanded from an element.
    pub fn from_element(element: Element<T>) -> Self {
        Self {
            source: Some(Source::Element(element)),
            ..Default::default()
        }
    }

    /// A node rendered from a raw value.
    pub fn from_value(value: T, renderer: Renderer<T>) -> Self {
        Self {
            value: Some(value),
            source: Some(Source::Renderer(renderer)),
            ..Default::default()
        }
    }

    /// Restrict an element expansion to a single node type.
    pub fn expect_type(mut self, node_type: NodeType) -> Self {
        self.node_type = Some(node_type);
        self
    }

    /// Set an explicit key.
    pub fn with_key(mut self, key: impl Into<Key>) -> Self {
        self.key = Some(key.into());
        self
    }

    /// Attach the domain value.
    pub fn with_value(mut self, value: T) -> Self {
        self.value = Some(value);
        self
    }

    /// Set the opaque rendered payload.
    pub fn with_rendered(mut self, rendered: Rendered) -> Self {
        self.rendered = Some(rendered);
        self
    }

    /// Set the plain-text representation.
    pub fn with_text_value(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }

    /// Set the accessibility label.
    pub fn with_aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Set the index among same-type siblings.
    pub fn with_index(mut self, index: usize) -> Self {
        self.index = Some(index);
        self
    }

    /// Derive keys of this node's values with `item_key`.
    pub fn with_item_key(mut self, item_key: KeyFn<T>) -> Self {
        self.item_key = Some(item_key);
        self
    }

    /// Attach a child producer and mark the node as having children.
    pub fn with_child_nodes(mut self, child_nodes: ChildNodes<T>) -> Self {
        self.has_child_nodes = true;
        self.child_nodes = Some(child_nodes);
        self
    }
}

impl<T: fmt::Debug> fmt::Debug for PartialNode<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartialNode")
            .field("node_type", &self.node_type)
            .field("key", &self.key)
            .field("value", &self.value)
            .field("index", &self.index)
            .field("has_child_nodes", &self.has_child_nodes)
            .finish_non_exhaustive()
    }
}
