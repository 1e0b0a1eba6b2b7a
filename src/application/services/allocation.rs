//! Allocation session service
//!
//! Owns the current tree snapshot and the baseline captured at load, and
//! applies allocation requests all-or-nothing.

use itertools::Itertools;
use tracing::{debug, info, instrument, warn};

use crate::application::ApplicationResult;
use crate::domain::{
    grand_total, set_by_absolute_value, set_by_percentage, subtotal_violations, table_rows,
    variance_of, Allocation, Baseline, NodeId, RoundingPolicy, TableRow, TreeArena,
};

/// Stateful allocation table: current snapshot plus immutable baseline.
#[derive(Debug, Clone)]
pub struct AllocationService {
    tree: TreeArena,
    baseline: Baseline,
    policy: RoundingPolicy,
}

impl AllocationService {
    /// Start a session; the baseline is captured from `tree` right here.
    pub fn new(tree: TreeArena, policy: RoundingPolicy) -> Self {
        let baseline = Baseline::capture(&tree);
        Self {
            tree,
            baseline,
            policy,
        }
    }

    pub fn tree(&self) -> &TreeArena {
        &self.tree
    }

    pub fn baseline(&self) -> &Baseline {
        &self.baseline
    }

    pub fn policy(&self) -> &RoundingPolicy {
        &self.policy
    }

    /// Increase the node `id` by `percentage` percent.
    #[instrument(level = "debug", skip(self))]
    pub fn set_by_percentage(
        &mut self,
        id: &NodeId,
        percentage: f64,
    ) -> ApplicationResult<Allocation<()>> {
        let outcome = set_by_percentage(&self.tree, id, percentage, &self.policy)?;
        Ok(self.commit(id, outcome))
    }

    /// Set the node `id` to `value`; a value of 0 needs `confirmed`.
    #[instrument(level = "debug", skip(self))]
    pub fn set_by_absolute_value(
        &mut self,
        id: &NodeId,
        value: f64,
        confirmed: bool,
    ) -> ApplicationResult<Allocation<()>> {
        let outcome = set_by_absolute_value(&self.tree, id, value, confirmed, &self.policy)?;
        Ok(self.commit(id, outcome))
    }

    fn commit(&mut self, id: &NodeId, outcome: Allocation<TreeArena>) -> Allocation<()> {
        outcome.map(|next| {
            let violations = subtotal_violations(&next, self.policy.unit());
            if !violations.is_empty() {
                warn!(
                    "subtotals off after allocating {}: {}",
                    id,
                    violations.iter().map(|v| &v.id).join(", ")
                );
            }
            for v in &violations {
                debug!("{}: value {} vs children {}", v.id, v.value, v.children_sum);
            }
            self.tree = next;
            info!(
                "allocated {}: now {}, grand total {}",
                id,
                self.value_of(id).unwrap_or_default(),
                self.grand_total()
            );
        })
    }

    pub fn value_of(&self, id: &NodeId) -> Option<f64> {
        self.tree.value_of(id)
    }

    /// Variance of the node's current value against its baseline.
    pub fn variance_of(&self, id: &NodeId) -> Option<f64> {
        self.value_of(id)
            .map(|current| variance_of(id, current, &self.baseline))
    }

    pub fn grand_total(&self) -> f64 {
        grand_total(&self.tree)
    }

    pub fn rows(&self) -> Vec<TableRow> {
        table_rows(&self.tree, &self.baseline)
    }
}
