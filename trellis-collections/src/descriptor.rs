//! The node-producing protocol implemented by declarative content types.

use crate::context::BuildContext;
use crate::error::{CollectionError, Result};
use crate::partial::PartialNode;

/// Lazy, pull-based sequence of partial nodes.
///
/// The builder may stop pulling at any point. Every yielded node is
/// independent of the ones after it.
pub type PartialNodes<T> = Box<dyn Iterator<Item = Result<PartialNode<T>>>>;

/// A declarative content type that can describe itself as collection nodes.
///
/// Implementations decide their shape once, when they are constructed
/// (explicit children vs. a function crossed with an ambient set), and
/// only walk that shape here.
///
/// # Example
///
/// ```ignore
/// struct Divider;
///
/// impl<T: 'static> CollectionNodes<T> for Divider {
///     fn produce_nodes(&self, _context: &BuildContext) -> PartialNodes<T> {
///         Box::new(std::iter::once(Ok(PartialNode::new(NodeType::Item))))
///     }
/// }
/// ```
pub trait CollectionNodes<T> {
    /// Produce the nodes this content describes.
    ///
    /// `context` carries builder-level shared state such as the ambient
    /// column set. Errors are yielded in-sequence and abort the build.
    fn produce_nodes(&self, context: &BuildContext) -> PartialNodes<T>;
}

/// A sequence with no nodes.
pub fn empty<T: 'static>() -> PartialNodes<T> {
    Box::new(std::iter::empty())
}

/// Wrap a single error as a node sequence.
pub fn fail<T: 'static>(error: CollectionError) -> PartialNodes<T> {
    Box::new(std::iter::once(Err(error)))
}
