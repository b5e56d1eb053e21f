//! Table headers and their columns.

use std::sync::Arc;

use trellis_collections::descriptor;
use trellis_collections::{
    BuildContext, ChildNodes, CollectionError, CollectionNodes, Column, Content, Element, Key,
    KeyFn, Node, NodeType, PartialNode, PartialNodes, Rendered, Renderer, TreeCollection,
};

/// How a header gets its columns.
pub enum HeaderColumns<C> {
    /// Explicit column elements.
    Static(Vec<Element<C>>),
    /// Column values rendered through one callback. `columns` must be
    /// provided for the header to build.
    Mapped {
        columns: Option<Arc<Vec<C>>>,
        renderer: Renderer<C>,
    },
}

/// The header of a table: a flat or grouped list of column nodes.
pub struct TableHeader<C> {
    pub columns: HeaderColumns<C>,
    pub column_key: Option<KeyFn<C>>,
}

impl<C> TableHeader<C> {
    /// A header over explicit column elements.
    pub fn new(columns: Vec<Element<C>>) -> Self {
        Self {
            columns: HeaderColumns::Static(columns),
            column_key: None,
        }
    }

    /// A header rendering each of `columns` through `renderer`.
    pub fn mapped(columns: Option<Vec<C>>, renderer: impl Fn(&C) -> Element<C> + 'static) -> Self {
        Self {
            columns: HeaderColumns::Mapped {
                columns: columns.map(Arc::new),
                renderer: Arc::new(renderer),
            },
            column_key: None,
        }
    }

    /// Derive the key of each mapped column from its value.
    pub fn column_key(mut self, column_key: impl Fn(&C) -> Key + 'static) -> Self {
        self.column_key = Some(Arc::new(column_key));
        self
    }
}

impl<C: Clone + 'static> CollectionNodes<C> for TableHeader<C> {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<C> {
        match &self.columns {
            HeaderColumns::Static(elements) => {
                let elements = elements.clone();
                Box::new(elements.into_iter().enumerate().map(|(index, element)| {
                    Ok(PartialNode::from_element(element)
                        .expect_type(NodeType::Column)
                        .with_index(index))
                }))
            }
            HeaderColumns::Mapped { columns: None, .. } => descriptor::fail(
                CollectionError::missing_dependency(
                    "TableHeader renders columns from a function but no columns were provided",
                ),
            ),
            HeaderColumns::Mapped {
                columns: Some(columns),
                renderer,
            } => {
                let columns = Arc::clone(columns);
                let renderer = Arc::clone(renderer);
                let column_key = self.column_key.clone();
                Box::new((0..columns.len()).map(move |index| {
                    let mut node = PartialNode::from_value(columns[index].clone(), Arc::clone(&renderer))
                        .expect_type(NodeType::Column)
                        .with_index(index);
                    node.item_key = column_key.clone();
                    Ok(node)
                }))
            }
        }
    }
}

/// A column element, optionally grouping child columns.
pub struct TableColumn<C> {
    pub title: Option<Rendered>,
    pub text_value: Option<String>,
    pub aria_label: Option<String>,
    pub child_columns: Option<Arc<Content<C>>>,
}

impl<C> TableColumn<C> {
    /// A column titled with plain text.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: Some(Rendered::text(title)),
            text_value: None,
            aria_label: None,
            child_columns: None,
        }
    }

    /// Set the plain-text representation of the title.
    pub fn text_value(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }

    /// Set the accessibility label.
    pub fn aria_label(mut self, label: impl Into<String>) -> Self {
        self.aria_label = Some(label.into());
        self
    }

    /// Make this column a group over `children`.
    pub fn child_columns(mut self, children: Content<C>) -> Self {
        self.child_columns = Some(Arc::new(children));
        self
    }
}

impl<C: Clone + 'static> CollectionNodes<C> for TableColumn<C> {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<C> {
        let mut node = PartialNode::new(NodeType::Column);
        node.rendered = self.title.clone();
        node.text_value = self.text_value.clone();
        node.aria_label = self.aria_label.clone();
        if let Some(children) = self.child_columns.clone() {
            node = node.with_child_nodes(ChildNodes::new(move |_context| {
                children.partials(Some(NodeType::Column))
            }));
        }
        Box::new(std::iter::once(Ok(node)))
    }
}

/// The leaf columns of a built header, in order, as an ambient column set
/// for rows.
pub fn columns_from_header<C>(header: &TreeCollection<C>) -> Vec<Column> {
    header
        .iter()
        .filter(|node| node.node_type == NodeType::Column && node.child_nodes.is_empty())
        .map(column_from_node)
        .collect()
}

fn column_from_node<C>(node: &Node<C>) -> Column {
    let column = Column::new(node.key.clone());
    if node.text_value.is_empty() {
        column
    } else {
        column.text_value(node.text_value.clone())
    }
}
