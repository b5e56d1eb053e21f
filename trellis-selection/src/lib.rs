//! Selection state layered over [`trellis_collections`] collections.
//!
//! The raw selection lives in a [`SelectionStore`] owned by the component.
//! [`SelectionManager`] borrows that store together with a built collection
//! and answers per-key queries (selected, disabled, focused) and selection
//! gestures (toggle, range extension, select all, clear).

pub mod manager;
pub mod mode;
pub mod selection;
pub mod state;

pub use manager::{SelectModifiers, SelectionManager};
pub use mode::{ParseSelectionModeError, SelectionMode};
pub use selection::{SelectedKeys, Selection};
pub use state::{MultipleSelectionState, SelectionConfig, SelectionStore};
