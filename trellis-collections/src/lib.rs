//! Flattening of declarative, nested list and grid content into linked,
//! key-indexed collections.
//!
//! Content types implement [`CollectionNodes`] and lazily describe
//! themselves as [`PartialNode`]s. [`CollectionBuilder`] walks those
//! descriptions depth-first and produces a [`TreeCollection`] whose
//! [`Node`]s carry stable keys, levels, sibling indices and document-order
//! links.

pub mod builder;
pub mod collection;
pub mod content;
pub mod context;
pub mod descriptor;
pub mod error;
pub mod key;
pub mod node;
pub mod partial;

pub use builder::{CollectionBuilder, Expansion};
pub use collection::{Collection, TreeCollection};
pub use content::{Content, Item, Section};
pub use context::{BuildContext, Column};
pub use descriptor::{CollectionNodes, PartialNodes};
pub use error::{CollectionError, Result};
pub use key::Key;
pub use node::{ItemStates, Node, NodeType, Rendered};
pub use partial::{ChildNodes, Element, KeyFn, PartialNode, Renderer, Source};

pub mod prelude {
    pub use crate::builder::{CollectionBuilder, Expansion};
    pub use crate::collection::{Collection, TreeCollection};
    pub use crate::content::{Content, Item, Section};
    pub use crate::context::{BuildContext, Column};
    pub use crate::descriptor::{CollectionNodes, PartialNodes};
    pub use crate::error::CollectionError;
    pub use crate::key::Key;
    pub use crate::node::{ItemStates, Node, NodeType, Rendered};
    pub use crate::partial::{ChildNodes, Element, PartialNode};
}
