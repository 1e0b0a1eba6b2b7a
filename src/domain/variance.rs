//! Baseline snapshot and variance against it.

use std::collections::BTreeMap;

use tracing::instrument;

use crate::domain::arena::TreeArena;
use crate::domain::entities::NodeId;

/// Percentage change from `baseline` to `current`; 0 when the baseline is 0.
pub fn variance(current: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (current - baseline) / baseline * 100.0
}

/// Values of every node as captured once, right after the tree was built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Baseline {
    values: BTreeMap<NodeId, f64>,
}

impl Baseline {
    #[instrument(level = "debug", skip(tree), fields(nodes = tree.len()))]
    pub fn capture(tree: &TreeArena) -> Self {
        let values = tree
            .iter()
            .map(|(_, node, _)| (node.id().clone(), node.value))
            .collect();
        Self { values }
    }

    pub fn get(&self, id: &NodeId) -> Option<f64> {
        self.values.get(id).copied()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Variance of `current` for the node `id`. Ids missing from the baseline
/// count as a zero baseline.
pub fn variance_of(id: &NodeId, current: f64, baseline: &Baseline) -> f64 {
    variance(current, baseline.get(id).unwrap_or(0.0))
}
