//! Read side: totals and display rows.

use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::entities::TableRow;
use crate::domain::variance::{variance_of, Baseline};

/// Sum over all leaves.
///
/// Subtotals are ignored, so the result holds even when they are stale or
/// carry rounding residue.
#[instrument(level = "debug", skip(tree))]
pub fn grand_total(tree: &TreeArena) -> f64 {
    tree.leaf_nodes()
        .into_iter()
        .filter_map(|idx| tree.get_node(idx))
        .map(|node| node.value)
        .sum()
}

/// Flatten the forest in display order (pre-order, siblings in order).
pub fn table_rows(tree: &TreeArena, baseline: &Baseline) -> Vec<TableRow> {
    tree.iter()
        .map(|(_, node, depth)| TableRow {
            id: node.id().clone(),
            label: node.data.label.clone(),
            depth,
            value: node.value,
            variance: variance_of(node.id(), node.value, baseline),
            is_leaf: node.is_leaf(),
        })
        .collect()
}
