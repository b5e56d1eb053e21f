//! Selection modes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How many keys a component lets the user select.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// No selection allowed.
    #[default]
    None,
    /// At most one key; selecting replaces the whole selection.
    Single,
    /// Any number of keys (toggle, range extension, select all).
    Multiple,
}

impl SelectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            SelectionMode::None => "none",
            SelectionMode::Single => "single",
            SelectionMode::Multiple => "multiple",
        }
    }
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing an unknown selection mode.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown selection mode '{0}'; expected none, single or multiple")]
pub struct ParseSelectionModeError(pub String);

impl FromStr for SelectionMode {
    type Err = ParseSelectionModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" => Ok(SelectionMode::None),
            "single" => Ok(SelectionMode::Single),
            "multiple" => Ok(SelectionMode::Multiple),
            other => Err(ParseSelectionModeError(other.to_string())),
        }
    }
}
