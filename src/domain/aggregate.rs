//! Bottom-up subtotal derivation and invariant checks.

use generational_arena::Index;
use tracing::{instrument, trace};

use crate::domain::arena::TreeArena;
use crate::domain::entities::NodeId;

/// Recompute every internal node as the sum of its children.
///
/// Children are resolved before their parent (post-order). Leaves pass
/// through untouched, and nodes whose subtotal is already correct stay
/// shared with `tree`.
#[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
pub fn aggregate(tree: &TreeArena) -> TreeArena {
    let mut next = tree.clone();
    let order: Vec<Index> = tree.iter_postorder().map(|(idx, _)| idx).collect();

    for idx in order {
        let Some(node) = next.get_node(idx) else {
            continue;
        };
        if node.is_leaf() {
            continue;
        }
        let sum = children_sum(&next, &node.children);
        if node.value != sum {
            trace!("subtotal {}: {} -> {}", node.id(), node.value, sum);
            if let Some(node) = next.node_mut(idx) {
                node.value = sum;
            }
        }
    }
    next
}

pub(crate) fn children_sum(tree: &TreeArena, children: &[Index]) -> f64 {
    children
        .iter()
        .filter_map(|&child| tree.get_node(child))
        .map(|child| child.value)
        .sum()
}

/// Internal node whose value drifted from the sum of its children.
#[derive(Debug, Clone, PartialEq)]
pub struct SubtotalViolation {
    pub id: NodeId,
    pub value: f64,
    pub children_sum: f64,
}

/// Internal nodes deviating by more than `tolerance` per child.
pub fn subtotal_violations(tree: &TreeArena, tolerance: f64) -> Vec<SubtotalViolation> {
    tree.iter()
        .filter(|(_, node, _)| !node.is_leaf())
        .filter_map(|(_, node, _)| {
            let sum = children_sum(tree, &node.children);
            let allowed = tolerance * node.children.len() as f64;
            ((node.value - sum).abs() > allowed).then(|| SubtotalViolation {
                id: node.id().clone(),
                value: node.value,
                children_sum: sum,
            })
        })
        .collect()
}
