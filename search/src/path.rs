//! `Path`: the route from start to goal, and its reconstruction.
//!
//! The path is a stack: the goal sits at the bottom and the step adjacent to
//! the start on top, so a movement consumer pops the next step first.

use tilepath_kernel::graph::NodeId;
use tilepath_kernel::proof::canon::{canonical_json_bytes, CanonError};
use tilepath_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::error::SearchError;
use crate::record::NodeRecord;
use crate::state::SearchState;

/// One node on the path with its cost from the start.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathStep {
    pub node: NodeId,
    pub cost_so_far: f64,
}

/// Ordered steps from the node after `start` up to and including the goal.
///
/// Empty when start and goal coincide.
#[derive(Debug, Clone, PartialEq)]
pub struct Path {
    start: NodeId,
    /// Goal first, start-adjacent step last.
    stack: Vec<PathStep>,
    total_cost: f64,
}

impl Path {
    #[must_use]
    pub fn start(&self) -> NodeId {
        self.start
    }

    /// Cost of the whole route, fixed at construction.
    #[must_use]
    pub fn total_cost(&self) -> f64 {
        self.total_cost
    }

    /// Remaining steps.
    #[must_use]
    pub fn len(&self) -> usize {
        self.stack.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }

    /// The next step without consuming it.
    #[must_use]
    pub fn peek(&self) -> Option<&PathStep> {
        self.stack.last()
    }

    /// Consume the next step.
    pub fn pop(&mut self) -> Option<PathStep> {
        self.stack.pop()
    }

    /// Remaining steps in travel order.
    pub fn iter(&self) -> impl DoubleEndedIterator<Item = &PathStep> + '_ {
        self.stack.iter().rev()
    }

    /// Remaining nodes in travel order.
    #[must_use]
    pub fn nodes(&self) -> Vec<NodeId> {
        self.iter().map(|s| s.node).collect()
    }

    /// Last node of the route (the start if the path is empty).
    #[must_use]
    pub fn goal(&self) -> NodeId {
        self.stack.first().map_or(self.start, |s| s.node)
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        let steps: Vec<serde_json::Value> = self
            .iter()
            .map(|s| serde_json::json!({"cost_so_far": s.cost_so_far, "node": s.node.0}))
            .collect();
        serde_json::json!({
            "start": self.start.0,
            "steps": steps,
            "total_cost": self.total_cost,
        })
    }

    /// Content hash over the canonical JSON form.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a cost is not finite.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = canonical_json_bytes(&self.to_json_value())?;
        Ok(canonical_hash(HashDomain::SearchPath, &bytes))
    }
}

/// Walk predecessor links from `terminal` back to `start`.
///
/// Predecessors are resolved through the record store, which holds the sole
/// record of every discovered node whether it is currently open or closed.
///
/// # Errors
///
/// Returns [`SearchError::MalformedRecord`] if a predecessor is missing or
/// the chain is longer than the number of records (a cycle).
pub fn reconstruct_path(
    state: &SearchState,
    terminal: &NodeRecord,
    start: NodeId,
) -> Result<Path, SearchError> {
    let limit = state.records().len();
    let mut stack = Vec::new();
    let mut current = terminal;

    while current.node != start {
        if stack.len() >= limit {
            return Err(SearchError::MalformedRecord {
                detail: format!(
                    "predecessor chain from {} exceeds {limit} records",
                    terminal.node
                ),
            });
        }
        stack.push(PathStep {
            node: current.node,
            cost_so_far: current.cost_so_far,
        });
        let predecessor = current
            .predecessor
            .ok_or_else(|| SearchError::MalformedRecord {
                detail: format!("{} has no predecessor but is not the start", current.node),
            })?;
        current = state
            .record(predecessor)
            .ok_or_else(|| SearchError::MalformedRecord {
                detail: format!("predecessor {predecessor} of {} has no record", current.node),
            })?;
    }

    Ok(Path {
        start,
        stack,
        total_cost: terminal.cost_so_far,
    })
}
