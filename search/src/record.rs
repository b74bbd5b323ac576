//! Node records and the frontier ordering key.

use tilepath_kernel::graph::NodeId;

/// Per-search bookkeeping for exactly one node.
///
/// Invariant: `estimated_total_cost >= cost_so_far >= 0`. The difference is the
/// heuristic component, computed once when the record is created and carried
/// through every later update (including re-opening).
#[derive(Debug, Clone, PartialEq)]
pub struct NodeRecord {
    /// The node this record describes.
    pub node: NodeId,
    /// Cost of the best known route from the start.
    pub cost_so_far: f64,
    /// Node this record was reached from (`None` for the start record).
    pub predecessor: Option<NodeId>,
    /// `cost_so_far + heuristic component`; the frontier ordering key.
    pub estimated_total_cost: f64,
}

impl NodeRecord {
    /// The start record: cost 0, no predecessor.
    #[must_use]
    pub fn start(node: NodeId, heuristic: f64) -> Self {
        Self {
            node,
            cost_so_far: 0.0,
            predecessor: None,
            estimated_total_cost: heuristic,
        }
    }

    /// A freshly discovered node.
    #[must_use]
    pub fn discovered(node: NodeId, cost_so_far: f64, predecessor: NodeId, heuristic: f64) -> Self {
        Self {
            node,
            cost_so_far,
            predecessor: Some(predecessor),
            estimated_total_cost: cost_so_far + heuristic,
        }
    }

    /// The heuristic part of the estimate, reused on improvement instead of
    /// calling the heuristic again.
    #[must_use]
    pub fn heuristic_component(&self) -> f64 {
        (self.estimated_total_cost - self.cost_so_far).max(0.0)
    }

    /// Record a cheaper route through `predecessor`, keeping the heuristic component.
    pub fn improve(&mut self, cost_so_far: f64, predecessor: NodeId) {
        let heuristic = self.heuristic_component();
        self.cost_so_far = cost_so_far;
        self.predecessor = Some(predecessor);
        self.estimated_total_cost = cost_so_far + heuristic;
    }
}

/// The frontier ordering key: `(estimated_total_cost, sequence)`.
///
/// Lower estimate first; ties go to the record that entered the open set
/// first. `sequence` is assigned on insertion and kept across in-place
/// updates, so the order matches a first-found-wins scan of an open list.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrontierKey {
    pub estimated_total_cost: f64,
    pub sequence: u64,
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.estimated_total_cost
            .total_cmp(&other.estimated_total_cost)
            .then(self.sequence.cmp(&other.sequence))
    }
}
