//! Option identifiers.
//!
//! An option is nothing more than a name; the selected/unselected flag lives
//! in [`SelectionState`](crate::selection::SelectionState).

use std::borrow::Borrow;
use std::fmt;

use serde::{Deserialize, Serialize};

/// Opaque identifier for a binary option.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OptionId(String);

impl OptionId {
    /// Create an identifier from anything string-like.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for OptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for OptionId {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

impl From<String> for OptionId {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl From<&OptionId> for OptionId {
    fn from(id: &OptionId) -> Self {
        id.clone()
    }
}

impl AsRef<str> for OptionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

// Lets maps keyed by `OptionId` be queried with a plain `&str`.
impl Borrow<str> for OptionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
