//! Shared state available to descriptors while a collection is built.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::error::{CollectionError, Result};
use crate::key::Key;

/// One entry of the ambient column set.
///
/// Rows that render their cells from a function get one cell per column,
/// keyed by the column key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Column {
    pub key: Key,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text_value: Option<String>,
}

impl Column {
    /// A column entry keyed `key`.
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            text_value: None,
        }
    }

    /// Set the column's plain-text label.
    pub fn text_value(mut self, text: impl Into<String>) -> Self {
        self.text_value = Some(text.into());
        self
    }
}

/// Builder-level context handed to every descriptor.
#[derive(Debug, Clone, Default)]
pub struct BuildContext {
    columns: Option<Arc<[Column]>>,
}

impl BuildContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the ambient column set.
    pub fn with_columns(mut self, columns: impl Into<Arc<[Column]>>) -> Self {
        self.columns = Some(columns.into());
        self
    }

    /// The ambient column set, if any.
    pub fn columns(&self) -> Option<&Arc<[Column]>> {
        self.columns.as_ref()
    }

    /// The ambient column set, or `MissingDependency` naming `consumer`.
    pub fn require_columns(&self, consumer: &str) -> Result<Arc<[Column]>> {
        self.columns.clone().ok_or_else(|| {
            CollectionError::missing_dependency(format!(
                "{consumer} renders cells from a function but no columns were provided"
            ))
        })
    }
}
