//! Tree builder turning an input table document into an allocation forest.

use std::collections::HashSet;

use generational_arena::Index;
use tracing::{debug, instrument, warn};

use crate::domain::aggregate::aggregate;
use crate::domain::arena::{NodeData, TreeArena};
use crate::domain::entities::{NodeId, RowSpec, TableSpec};
use crate::domain::error::DomainError;

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

/// Constructs the allocation forest from nested row specifications.
pub struct TreeBuilder {
    visited_ids: HashSet<NodeId>,
}

impl Default for TreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeBuilder {
    pub fn new() -> Self {
        Self {
            visited_ids: HashSet::new(),
        }
    }

    /// Build the forest and derive every subtotal from its leaves.
    #[instrument(level = "debug", skip(self, spec), fields(roots = spec.rows.len()))]
    pub fn build(&mut self, spec: &TableSpec) -> TreeResult<TreeArena> {
        self.visited_ids.clear();

        let mut tree = TreeArena::new();
        // Reverse so that popping yields rows in document order
        let mut stack: Vec<(&RowSpec, Option<Index>)> =
            spec.rows.iter().rev().map(|row| (row, None)).collect();

        while let Some((row, parent_idx)) = stack.pop() {
            let id = self.check_row(row)?;

            let node_data = NodeData {
                id,
                label: row.label.clone(),
            };
            let current_idx = tree.insert_node(node_data, row.value, parent_idx);

            for child in row.child_rows().iter().rev() {
                stack.push((child, Some(current_idx)));
            }
        }

        let tree = aggregate(&tree);
        // Finite leaves can still sum past f64::MAX
        if let Some((_, node, _)) = tree.iter().find(|(_, node, _)| !node.value.is_finite()) {
            return Err(DomainError::InvalidValue {
                id: node.id().clone(),
                value: node.value,
            });
        }
        self.warn_on_stated_subtotals(spec, &tree);
        debug!("built tree with {} rows", tree.len());
        Ok(tree)
    }

    fn check_row(&mut self, row: &RowSpec) -> TreeResult<NodeId> {
        if row.id.trim().is_empty() {
            return Err(DomainError::EmptyId {
                label: row.label.clone(),
            });
        }
        let id = NodeId::new(row.id.clone());
        if !row.value.is_finite() || row.value < 0.0 {
            return Err(DomainError::InvalidValue {
                id,
                value: row.value,
            });
        }
        // Uniqueness
        if !self.visited_ids.insert(id.clone()) {
            return Err(DomainError::DuplicateId(id));
        }
        Ok(id)
    }

    /// Values stated on group rows are ignored; flag the ones that disagree.
    fn warn_on_stated_subtotals(&self, spec: &TableSpec, tree: &TreeArena) {
        let mut stack: Vec<&RowSpec> = spec.rows.iter().collect();
        while let Some(row) = stack.pop() {
            if row.child_rows().is_empty() {
                continue;
            }
            let id = NodeId::new(row.id.clone());
            if let Some(derived) = tree.value_of(&id) {
                if row.value != 0.0 && row.value != derived {
                    warn!(
                        "row '{}' states {} but its children sum to {}; using the sum",
                        id, row.value, derived
                    );
                }
            }
            stack.extend(row.child_rows());
        }
    }
}
