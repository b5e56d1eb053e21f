//! Grid content types and grid state.
//!
//! Rows, cells and table headers implement the collection descriptor
//! protocol, so a table is built by the same [`CollectionBuilder`] as any
//! list. Rows that render cells from a function get one cell per ambient
//! column; the column set usually comes from a built header via
//! [`columns_from_header`].
//!
//! [`GridStateCache`] ties the pieces together: it builds the row
//! collection with the selection state of a store merged into the nodes,
//! and reuses it until its inputs change.
//!
//! # Example
//!
//! ```ignore
//! let header = TableHeader::new(vec![
//!     Element::new(TableColumn::new("Name")).with_key("name"),
//!     Element::new(TableColumn::new("Age")).with_key("age"),
//! ]);
//! let columns = columns_from_header(&CollectionBuilder::new().build(&header)?);
//!
//! let rows = Content::from_items(people, |p: &Person| {
//!     let p = p.clone();
//!     Element::new(Row::mapped(move |column| Element::new(Cell::new(p.field(&column.key)))))
//! });
//! let props = GridProps::new(rows, columns).item_key(|p: &Person| Key::from(p.id));
//!
//! let mut cache = GridStateCache::new();
//! let grid = cache.state(&props, &store)?;
//! grid.selection_manager(&mut store).toggle_selection(&Key::from(1));
//! ```
//!
//! [`CollectionBuilder`]: trellis_collections::CollectionBuilder

pub mod cell;
pub mod header;
pub mod row;
pub mod state;

pub use cell::Cell;
pub use header::{HeaderColumns, TableColumn, TableHeader, columns_from_header};
pub use row::{CellRenderer, Row, RowCells};
pub use state::{GridProps, GridState, GridStateCache};
