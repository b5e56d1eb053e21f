//! Table rows.

use std::sync::Arc;

use trellis_collections::descriptor;
use trellis_collections::{
    BuildContext, ChildNodes, CollectionNodes, Column, Content, Element, NodeType, PartialNode,
    PartialNodes,
};

/// Renders the cell of a row for one column.
pub type CellRenderer<T> = Arc<dyn Fn(&Column) -> Element<T>>;

/// How a row gets its cells.
pub enum RowCells<T> {
    /// Explicit cell elements, in column order.
    Static(Vec<Element<T>>),
    /// One cell per ambient column, keyed by the column key.
    Mapped(CellRenderer<T>),
}

impl<T> Clone for RowCells<T> {
    fn clone(&self) -> Self {
        match self {
            RowCells::Static(cells) => RowCells::Static(cells.clone()),
            RowCells::Mapped(render) => RowCells::Mapped(Arc::clone(render)),
        }
    }
}

/// A table row: an item whose children are its cells, optionally followed
/// by nested rows.
///
/// # Examples
///
/// ```ignore
/// // One cell per column of the table.
/// let row = Row::mapped(move |column| Element::new(Cell::new(user.field(&column.key))));
///
/// // Explicit cells.
/// let row = Row::new(vec![Element::new(Cell::new("Ada")), Element::new(Cell::new("42"))]);
/// ```
pub struct Row<T> {
    pub cells: RowCells<T>,
    pub child_items: Option<Arc<Content<T>>>,
    pub text_value: Option<String>,
    pub aria_label: Option<String>,
}

impl<T> Row<T> {
    /// A row with explicit cells, in column order.
    pub fn new(cells: Vec<Element<T>>) -> Self {
        Self::with_cells(RowCells::Static(cells))
    }

    /// A row rendering one cell per ambient column.
    pub fn mapped(render: impl Fn(&Column) -> Element<T> + 'static) -> Self {
        Self::with_cells(RowCells::Mapped(Arc::new(render)))
    }

    fn with_cells(cells: RowCells<T>) -> Self {
        Self {
            cells,
            child_items: None,
            text_value: None,
            aria_label: None,
        }
    }

    /// Nested rows, for tree tables.
    pub fn child_items(mut self, children: Content<T>) -> Self {
        self.child_items = Some(Arc::new(children));
        self
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
}

impl<T: Clone + 'static> CollectionNodes<T> for Row<T> {
    fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<T> {
        let cells = self.cells.clone();
        let child_items = self.child_items.clone();

        let mut node = PartialNode::new(NodeType::Item).with_child_nodes(ChildNodes::new(move |context| {
            // Cells come first so they never interleave with nested rows.
            let nested = match &child_items {
                Some(children) => children.partials(Some(NodeType::Item)),
                None => descriptor::empty(),
            };
            Box::new(cell_nodes(&cells, context).chain(nested))
        }));
        node.text_value = self.text_value.clone();
        node.aria_label = self.aria_label.clone();
        Box::new(std::iter::once(Ok(node)))
    }
}

fn cell_nodes<T: 'static>(cells: &RowCells<T>, context: &BuildContext) -> PartialNodes<T> {
    match cells {
        RowCells::Static(elements) => {
            let elements = elements.clone();
            Box::new(elements.into_iter().enumerate().map(|(index, element)| {
                Ok(PartialNode::from_element(element)
                    .expect_type(NodeType::Cell)
                    .with_index(index))
            }))
        }
        RowCells::Mapped(render) => {
            let columns = match context.require_columns("Row") {
                Ok(columns) => columns,
                Err(err) => return descriptor::fail(err),
            };
            let render = Arc::clone(render);
            Box::new((0..columns.len()).map(move |index| {
                let column = &columns[index];
                Ok(PartialNode::from_element(render(column))
                    .expect_type(NodeType::Cell)
                    .with_key(column.key.clone())
                    .with_index(index))
            }))
        }
    }
}
