//! Grid state assembly: building the grid collection with selection state
//! merged in, and rebuilding it only when its inputs change.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use log::debug;
use trellis_collections::{
    Collection, CollectionBuilder, Column, Content, Expansion, ItemStates, Key, KeyFn, Result,
    TreeCollection,
};
use trellis_selection::{SelectedKeys, SelectionManager, SelectionMode, SelectionStore};

/// Inputs of a grid.
///
/// `content` and `columns` are compared by identity: hand the cache the same
/// `Arc`s to reuse the collection, new ones to rebuild it.
pub struct GridProps<T> {
    pub content: Arc<Content<T>>,
    pub columns: Arc<[Column]>,
    pub item_key: Option<KeyFn<T>>,
    pub expansion: Expansion,
}

impl<T> GridProps<T> {
    /// Props for `content` laid out over `columns`, everything expanded.
    pub fn new(content: Content<T>, columns: impl Into<Arc<[Column]>>) -> Self {
        Self {
            content: Arc::new(content),
            columns: columns.into(),
            item_key: None,
            expansion: Expansion::default(),
        }
    }

    /// Derive row keys from row values.
    pub fn item_key(mut self, item_key: impl Fn(&T) -> Key + 'static) -> Self {
        self.item_key = Some(Arc::new(item_key));
        self
    }

    /// Items whose nested rows are shown.
    pub fn expanded_keys<K: Into<Key>>(mut self, keys: impl IntoIterator<Item = K>) -> Self {
        self.expansion = Expansion::Keys(keys.into_iter().map(Into::into).collect());
        self
    }

    /// Set the expansion directly.
    pub fn expansion(mut self, expansion: Expansion) -> Self {
        self.expansion = expansion;
        self
    }

    fn same_as(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.content, &other.content)
            && Arc::ptr_eq(&self.columns, &other.columns)
            && match (&self.item_key, &other.item_key) {
                (Some(a), Some(b)) => Arc::ptr_eq(a, b),
                (None, None) => true,
                _ => false,
            }
            && self.expansion == other.expansion
    }
}

impl<T> Clone for GridProps<T> {
    fn clone(&self) -> Self {
        Self {
            content: Arc::clone(&self.content),
            columns: Arc::clone(&self.columns),
            item_key: self.item_key.clone(),
            expansion: self.expansion.clone(),
        }
    }
}

/// A built grid: the collection plus access to its selection.
pub struct GridState<T> {
    collection: Arc<TreeCollection<T>>,
}

impl<T> Clone for GridState<T> {
    fn clone(&self) -> Self {
        Self {
            collection: Arc::clone(&self.collection),
        }
    }
}

impl<T> fmt::Debug for GridState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GridState")
            .field("size", &self.collection.size())
            .finish_non_exhaustive()
    }
}

impl<T> GridState<T> {
    /// The built collection, shared with the cache.
    pub fn collection(&self) -> &Arc<TreeCollection<T>> {
        &self.collection
    }

    /// A selection manager over this grid's collection and `store`.
    pub fn selection_manager<'a, S>(&'a self, store: &'a mut S) -> SelectionManager<'a, TreeCollection<T>, S>
    where
        S: SelectionStore + ?Sized,
    {
        SelectionManager::new(self.collection.as_ref(), store)
    }
}

/// The parts of a selection store that end up in node states.
#[derive(Debug, Clone, PartialEq, Eq)]
struct SelectionInputs {
    mode: SelectionMode,
    keys: SelectedKeys,
    focused: Option<Key>,
    disabled: HashSet<Key>,
}

impl SelectionInputs {
    fn capture<S: SelectionStore + ?Sized>(store: &S) -> Self {
        Self {
            mode: store.selection_mode(),
            keys: store.selection().keys.clone(),
            focused: store.focused_key().cloned(),
            disabled: store.disabled_keys().clone(),
        }
    }
}

struct Cached<T> {
    props: GridProps<T>,
    inputs: SelectionInputs,
    collection: Arc<TreeCollection<T>>,
}

/// Memoizes the grid collection across passes.
///
/// The collection is rebuilt when the content, the column set, the item key
/// or the expanded keys change, or when the selected keys, focused key,
/// disabled keys or selection mode of the store change. Otherwise the
/// previous collection is handed out again.
pub struct GridStateCache<T> {
    cached: Option<Cached<T>>,
}

impl<T> Default for GridStateCache<T> {
    fn default() -> Self {
        Self { cached: None }
    }
}

impl<T: Clone + 'static> GridStateCache<T> {
    /// An empty cache; the first call builds.
    pub fn new() -> Self {
        Self::default()
    }

    /// The grid state for `props` and `store`, rebuilt only if needed.
    ///
    /// A failed build leaves the previous collection cached.
    pub fn state<S>(&mut self, props: &GridProps<T>, store: &S) -> Result<GridState<T>>
    where
        S: SelectionStore + ?Sized,
    {
        let inputs = SelectionInputs::capture(store);
        if let Some(cached) = &self.cached
            && cached.props.same_as(props)
            && cached.inputs == inputs
        {
            debug!("Reusing grid collection ({} nodes)", cached.collection.size());
            return Ok(GridState {
                collection: Arc::clone(&cached.collection),
            });
        }

        debug!("Rebuilding grid collection");
        let collection = Arc::new(build(props, store)?);
        self.cached = Some(Cached {
            props: props.clone(),
            inputs,
            collection: Arc::clone(&collection),
        });
        Ok(GridState { collection })
    }

    /// Drop the cached collection; the next call rebuilds.
    pub fn invalidate(&mut self) {
        self.cached = None;
    }
}

fn build<T, S>(props: &GridProps<T>, store: &S) -> Result<TreeCollection<T>>
where
    T: Clone + 'static,
    S: SelectionStore + ?Sized,
{
    let mut builder = CollectionBuilder::new()
        .columns(Arc::clone(&props.columns))
        .expansion(props.expansion.clone());
    if let Some(item_key) = props.item_key.clone() {
        builder = builder.item_key(move |value| item_key(value));
    }
    builder.build_with_states(&props.content, |key| ItemStates {
        is_expanded: props.expansion.is_expanded(key),
        ..store.item_states(key)
    })
}
