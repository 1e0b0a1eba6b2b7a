//! Domain entities: identifiers, input rows and report rows

use std::fmt;

use serde::{Deserialize, Serialize};

/// Stable identifier of a row in the allocation table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Input document describing the initial table.
///
/// ```toml
/// [[rows]]
/// id = "ops"
/// label = "Operations"
///
///   [[rows.children]]
///   id = "rent"
///   label = "Rent"
///   value = 1200.0
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TableSpec {
    #[serde(default)]
    pub rows: Vec<RowSpec>,
}

/// One row of the input document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowSpec {
    pub id: String,
    pub label: String,
    /// Authoritative for leaves, ignored (derived) for rows with children
    #[serde(default)]
    pub value: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<RowSpec>>,
}

impl RowSpec {
    pub fn leaf(id: impl Into<String>, label: impl Into<String>, value: f64) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value,
            children: None,
        }
    }

    pub fn group(id: impl Into<String>, label: impl Into<String>, children: Vec<RowSpec>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            value: 0.0,
            children: Some(children),
        }
    }

    /// Rows with no children, or an empty children list, are leaves.
    pub fn child_rows(&self) -> &[RowSpec] {
        self.children.as_deref().unwrap_or(&[])
    }
}

/// Flattened row for presentation, in display order.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub id: NodeId,
    pub label: String,
    /// Nesting level, 0 for roots
    pub depth: usize,
    pub value: f64,
    /// Percentage change against the baseline
    pub variance: f64,
    pub is_leaf: bool,
}

/// Result of a requested allocation.
#[derive(Debug, Clone)]
pub enum Allocation<T> {
    /// The new, fully aggregated snapshot
    Applied(T),
    /// The request would not change anything (percentage of 0)
    Unchanged,
    /// A value of 0 must be confirmed before it is applied
    ConfirmationRequired,
}

impl<T> Allocation<T> {
    pub fn is_applied(&self) -> bool {
        matches!(self, Allocation::Applied(_))
    }

    pub fn applied(self) -> Option<T> {
        match self {
            Allocation::Applied(tree) => Some(tree),
            _ => None,
        }
    }

    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Allocation<U> {
        match self {
            Allocation::Applied(tree) => Allocation::Applied(f(tree)),
            Allocation::Unchanged => Allocation::Unchanged,
            Allocation::ConfirmationRequired => Allocation::ConfirmationRequired,
        }
    }
}
