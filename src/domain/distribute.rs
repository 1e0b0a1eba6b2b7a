//! Pushing a requested value onto a node and spreading it over its children.

use generational_arena::Index;
use tracing::{debug, instrument};

use crate::domain::aggregate::{aggregate, children_sum};
use crate::domain::arena::TreeArena;
use crate::domain::entities::{Allocation, NodeId};
use crate::domain::error::InputError;
use crate::domain::rounding::RoundingPolicy;

/// Rewrite the node at `idx` to `new_value` and its direct children to their
/// shares of it.
///
/// With a zero child total every child gets an equal share, otherwise shares
/// follow each child's current contribution. Shares are rounded, the node
/// itself is not. Grandchildren are left alone, so internal children are
/// stale until the next [`aggregate`] pass.
#[instrument(level = "debug", skip(tree, policy))]
pub fn distribute(
    tree: &TreeArena,
    idx: Index,
    new_value: f64,
    policy: &RoundingPolicy,
) -> TreeArena {
    let mut next = tree.clone();
    let Some(node) = tree.get_node(idx) else {
        return next;
    };

    if !node.is_leaf() {
        let total = children_sum(tree, &node.children);
        let count = node.children.len() as f64;
        for &child_idx in &node.children {
            let Some(child) = next.node_mut(child_idx) else {
                continue;
            };
            child.value = if total == 0.0 {
                policy.round(new_value / count)
            } else {
                policy.round(child.value / total * new_value)
            };
        }
    }

    if let Some(node) = next.node_mut(idx) {
        node.value = new_value;
    }
    next
}

fn validate(what: &'static str, value: f64) -> Result<(), InputError> {
    if !value.is_finite() {
        return Err(InputError::NotFinite { what, value });
    }
    if value < 0.0 {
        return Err(InputError::Negative { what, value });
    }
    Ok(())
}

fn locate(tree: &TreeArena, id: &NodeId) -> Result<Index, InputError> {
    tree.index_of(id)
        .ok_or_else(|| InputError::UnknownNode(id.clone()))
}

/// Distribute and aggregate, refusing snapshots that overflowed `f64`.
fn reconcile(
    tree: &TreeArena,
    idx: Index,
    new_value: f64,
    policy: &RoundingPolicy,
) -> Result<Allocation<TreeArena>, InputError> {
    if !new_value.is_finite() {
        return Err(InputError::NotFinite {
            what: "result",
            value: new_value,
        });
    }
    let next = aggregate(&distribute(tree, idx, new_value, policy));
    if let Some((_, node, _)) = next.iter().find(|(_, node, _)| !node.value.is_finite()) {
        debug!("{} overflowed to {}", node.id(), node.value);
        return Err(InputError::NotFinite {
            what: "subtotal",
            value: node.value,
        });
    }
    Ok(Allocation::Applied(next))
}

/// Raise (or keep) the node's value by `percentage` percent, then reconcile.
///
/// A percentage of exactly 0 changes nothing and yields
/// [`Allocation::Unchanged`].
#[instrument(level = "debug", skip(tree, policy))]
pub fn set_by_percentage(
    tree: &TreeArena,
    id: &NodeId,
    percentage: f64,
    policy: &RoundingPolicy,
) -> Result<Allocation<TreeArena>, InputError> {
    validate("percentage", percentage)?;
    let idx = locate(tree, id)?;
    if percentage == 0.0 {
        debug!("0% requested for {}, nothing to do", id);
        return Ok(Allocation::Unchanged);
    }

    let old_value = tree.get_node(idx).map(|node| node.value).unwrap_or_default();
    let new_value = old_value * (1.0 + percentage / 100.0);
    debug!("{}: {} -> {}", id, old_value, new_value);

    reconcile(tree, idx, new_value, policy)
}

/// Set the node to `value`, then reconcile.
///
/// A value of 0 is only applied with `confirmed`; otherwise
/// [`Allocation::ConfirmationRequired`] is returned and nothing changes.
#[instrument(level = "debug", skip(tree, policy))]
pub fn set_by_absolute_value(
    tree: &TreeArena,
    id: &NodeId,
    value: f64,
    confirmed: bool,
    policy: &RoundingPolicy,
) -> Result<Allocation<TreeArena>, InputError> {
    validate("value", value)?;
    let idx = locate(tree, id)?;
    if value == 0.0 && !confirmed {
        return Ok(Allocation::ConfirmationRequired);
    }

    reconcile(tree, idx, value, policy)
}
