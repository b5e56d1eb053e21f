//! Errors raised while building a collection.

use crate::key::Key;
use crate::node::NodeType;

/// Error type for collection builds and node construction.
///
/// Any of these aborts a build; a caller never sees a partially built
/// collection.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CollectionError {
    /// A descriptor needs ambient context that was not supplied.
    #[error("Missing dependency: {what}")]
    MissingDependency { what: String },

    /// Two nodes resolved to the same key.
    #[error("Duplicate key '{0}' in collection")]
    DuplicateKey(Key),

    /// A node type outside the closed set.
    #[error("Invalid node type '{0}'; expected one of section, item, column, cell")]
    InvalidNodeType(String),

    /// A node claims children but has no child sequence.
    #[error("Node '{0}' has child nodes but no child sequence")]
    MissingChildNodes(Key),

    /// An element produced a node of a type its slot does not accept.
    #[error("Unsupported type <{found}> in <{parent}>. Only <{expected}> is supported.")]
    UnsupportedType {
        found: NodeType,
        parent: String,
        expected: NodeType,
    },
}

impl CollectionError {
    /// Creates a new missing dependency error.
    pub fn missing_dependency(what: impl Into<String>) -> Self {
        Self::MissingDependency { what: what.into() }
    }

    /// Creates a new duplicate key error.
    pub fn duplicate_key(key: impl Into<Key>) -> Self {
        Self::DuplicateKey(key.into())
    }

    /// Creates a new invalid node type error.
    pub fn invalid_node_type(found: impl Into<String>) -> Self {
        Self::InvalidNodeType(found.into())
    }
}

pub type Result<T> = std::result::Result<T, CollectionError>;
