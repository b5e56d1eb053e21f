//! Generic content types: collection content, items and sections.

use std::sync::Arc;

use crate::context::BuildContext;
use crate::descriptor::{self, CollectionNodes, PartialNodes};
use crate::node::{NodeType, Rendered};
use crate::partial::{ChildNodes, Element, PartialNode, Renderer};

/// The children of a collection, a section or an item.
///
/// Either explicit elements in document order, or a list of values each
/// rendered through the same callback.
pub enum Content<T> {
    Static(Vec<Element<T>>),
    Mapped { items: Vec<T>, renderer: Renderer<T> },
}

impl<T> Content<T> {
    /// Explicit elements in document order.
    pub fn from_elements(elements: impl IntoIterator<Item = Element<T>>) -> Self {
        Content::Static(elements.into_iter().collect())
    }

    /// `items` rendered one by one through `renderer`.
    pub fn from_items(items: Vec<T>, renderer: impl Fn(&T) -> Element<T> + 'static) -> Self {
        Content::Mapped {
            items,
            renderer: Arc::new(renderer),
        }
    }

    /// Number of elements or items.
    pub fn len(&self) -> usize {
        match self {
            Content::Static(elements) => elements.len(),
            Content::Mapped { items, .. } => items.len(),
        }
    }

    /// Returns `true` if there is nothing to render.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<T: Clone + 'static> Content<T> {
    /// Walk this content as partial nodes, optionally restricted to one type.
    pub fn partials(self: &Arc<Self>, expected: Option<NodeType>) -> PartialNodes<T> {
        let content = Arc::clone(self);
        Box::new((0..content.len()).map(move |i| {
            let partial = match content.as_ref() {
                Content::Static(elements) => PartialNode::from_element(elements[i].clone()),
                Content::Mapped { items, renderer } => {
                    PartialNode::from_value(items[i].clone(), Arc::clone(renderer))
                }
            };
            Ok(match expected {
                Some(node_type) => partial.expect_type(node_type),
                None => partial,
            })
        }))
    }
}

impl<T: Clone> Clone for Content<T> {
    fn clone(&self) -> Self {
        match self {
            Content::Static(elements) => Content::Static(elements.clone()),
            Content::Mapped { items, renderer } => Content::Mapped {
                items: items.clone(),
                renderer: Arc::clone(renderer),
            },
        }
    }
}

impl<T: Clone + 'static> CollectionNodes<T> for Arc<Content<T>> {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<T> {
        self.partials(None)
    }
}

impl<T: Clone + 'static> CollectionNodes<T> for Content<T> {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<T> {
        Arc::new(self.clone()).partials(None)
    }
}

/// A list item, optionally with nested child items.
pub struct Item<T> {
    pub title: Option<Rendered>,
    pub text_value: Option<String>,
    pub aria_label: Option<String>,
    pub child_items: Option<Arc<Content<T>>>,
    pub has_child_items: Option<bool>,
}

impl<T> Item<T> {
    /// An item titled with plain text.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Rendered::text(title)),
            text_value: None,
            aria_label: None,
            child_items: None,
            has_child_items: None,
        }
    }

    /// An item whose title is an arbitrary payload.
    pub fn rendered(title: Rendered) -> Self {
        Self {
            title: Some(title),
            ..Self::new("")
        }
    }

    /// Set the plain-text representation used for typeahead.
    pub fn text_value(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }

    /// Set the accessibility label.
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Nested items, materialized while this item is expanded.
    pub fn child_items(mut self, children: Content<T>) -> Self {
        self.child_items = Some(Arc::new(children));
        self
    }

    /// Report children without providing them yet.
    pub fn has_child_items(mut self, has_children: bool) -> Self {
        self.has_child_items = Some(has_children);
        self
    }
}

impl<T: Clone + 'static> CollectionNodes<T> for Item<T> {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<T> {
        let mut node = PartialNode::new(NodeType::Item);
        node.rendered = self.title.clone();
        node.text_value = self.text_value.clone();
        node.aria_label = self.aria_label.clone();

        let children = self.child_items.clone();
        let has_children = self
            .has_child_items
            .unwrap_or_else(|| children.as_ref().is_some_and(|c| !c.is_empty()));
        if has_children {
            node = node.with_child_nodes(ChildNodes::new(move |_context| match &children {
                Some(children) => children.partials(Some(NodeType::Item)),
                None => descriptor::empty(),
            }));
        }
        Box::new(std::iter::once(Ok(node)))
    }
}

/// A titled group of items.
pub struct Section<T> {
    pub title: Option<Rendered>,
    pub aria_label: Option<String>,
    pub children: Arc<Content<T>>,
}

impl<T> Section<T> {
    /// An untitled section over `children`.
    pub fn new(children: Content<T>) -> Self {
        Self {
            title: None,
            aria_label: None,
            children: Arc::new(children),
        }
    }

    /// Set the section heading.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(Rendered::text(title));
        self
    }

    /// Set the accessibility label.
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }
}

impl<T: Clone + 'static> CollectionNodes<T> for Section<T> {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<T> {
        let mut node = PartialNode::new(NodeType::Section);
        node.rendered = self.title.clone();
        node.aria_label = self.aria_label.clone();

        let children = Arc::clone(&self.children);
        let node = node.with_child_nodes(ChildNodes::new(move |_context| {
            children.partials(Some(NodeType::Item))
        }));
        Box::new(std::iter::once(Ok(node)))
    }
}
