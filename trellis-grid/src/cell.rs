//! Table cells.

use trellis_collections::{BuildContext, CollectionNodes, NodeType, PartialNode, PartialNodes, Rendered};

/// A single cell of a row.
#[derive(Debug, Clone)]
pub struct Cell {
    pub content: Rendered,
    pub text_value: Option<String>,
    pub aria_label: Option<String>,
}

impl Cell {
    /// A cell showing plain text.
    pub fn new(text: impl Into<String>) -> Self {
        Self::rendered(Rendered::text(text))
    }

    /// A cell with an arbitrary payload. Set a text value for typeahead.
    pub fn rendered(content: Rendered) -> Self {
        Self {
            content,
            text_value: None,
            aria_label: None,
        }
    }

    /// Set the plain-text representation.
    pub fn text_value(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }

    /// Set the accessibility label.
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }
}

impl<T: 'static> CollectionNodes<T> for Cell {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<T> {
        let mut node = PartialNode::new(NodeType::Cell).with_rendered(self.content.clone());
        node.text_value = self.text_value.clone();
        node.aria_label = self.aria_label.clone();
        Box::new(std::iter::once(Ok(node)))
    }
}
