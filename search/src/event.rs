//! Search events, termination reasons and the recorded trace.
//!
//! Events are the observable decision surface of a search: their order is a
//! pure function of the graph, endpoints and algorithm. A recorded trace is
//! serialised to canonical JSON and hashed for determinism checks.

use tilepath_kernel::graph::NodeId;
use tilepath_kernel::proof::canon::{canonical_json_bytes, CanonError};
use tilepath_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};

use crate::path::Path;

/// One suspension point of a search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchEvent {
    /// `node` was extracted from the frontier as the current node.
    NodeActivated {
        node: NodeId,
        cost_so_far: f64,
        estimated_total_cost: f64,
    },
    /// `node` entered the frontier, either for the first time or re-opened
    /// from the closed set.
    NodeOpened {
        node: NodeId,
        cost_so_far: f64,
        estimated_total_cost: f64,
        reopened: bool,
    },
    /// An open `node` was given a cheaper route and keeps its place in the
    /// frontier under the lower key.
    NodeUpdated {
        node: NodeId,
        cost_so_far: f64,
        estimated_total_cost: f64,
    },
    /// All connections of `node` were examined.
    NodeClosed { node: NodeId },
    /// The goal was activated. Terminal.
    PathFound { path: Path },
    /// The frontier ran dry before reaching the goal. Terminal.
    SearchFailed,
    /// Cancelled or over budget. Terminal.
    SearchAborted { reason: TerminationReason },
}

impl SearchEvent {
    /// Whether no further events follow this one.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::PathFound { .. } | Self::SearchFailed | Self::SearchAborted { .. }
        )
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        match self {
            Self::NodeActivated {
                node,
                cost_so_far,
                estimated_total_cost,
            } => serde_json::json!({
                "cost_so_far": cost_so_far,
                "estimated_total_cost": estimated_total_cost,
                "node": node.0,
                "type": "node_activated",
            }),
            Self::NodeOpened {
                node,
                cost_so_far,
                estimated_total_cost,
                reopened,
            } => serde_json::json!({
                "cost_so_far": cost_so_far,
                "estimated_total_cost": estimated_total_cost,
                "node": node.0,
                "reopened": reopened,
                "type": "node_opened",
            }),
            Self::NodeUpdated {
                node,
                cost_so_far,
                estimated_total_cost,
            } => serde_json::json!({
                "cost_so_far": cost_so_far,
                "estimated_total_cost": estimated_total_cost,
                "node": node.0,
                "type": "node_updated",
            }),
            Self::NodeClosed { node } => serde_json::json!({"node": node.0, "type": "node_closed"}),
            Self::PathFound { path } => {
                serde_json::json!({"path": path.to_json_value(), "type": "path_found"})
            }
            Self::SearchFailed => serde_json::json!({"type": "search_failed"}),
            Self::SearchAborted { reason } => {
                serde_json::json!({"reason": reason.to_json_value(), "type": "search_aborted"})
            }
        }
    }
}

/// Final status of a search that did not fault.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchStatus {
    Succeeded,
    /// No path exists. A normal outcome, not an error.
    Failed,
    /// Stopped early; no path was produced.
    Aborted,
}

impl SearchStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Succeeded => "succeeded",
            Self::Failed => "failed",
            Self::Aborted => "aborted",
        }
    }
}

impl std::fmt::Display for SearchStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    GoalReached { goal: NodeId },
    FrontierExhausted,
    /// `max_expansions` nodes were expanded without reaching the goal.
    ExpansionBudgetExceeded { limit: u64 },
    Cancelled,
}

impl TerminationReason {
    #[must_use]
    pub fn status(self) -> SearchStatus {
        match self {
            Self::GoalReached { .. } => SearchStatus::Succeeded,
            Self::FrontierExhausted => SearchStatus::Failed,
            Self::ExpansionBudgetExceeded { .. } | Self::Cancelled => SearchStatus::Aborted,
        }
    }

    pub fn to_json_value(self) -> serde_json::Value {
        match self {
            Self::GoalReached { goal } => {
                serde_json::json!({"goal": goal.0, "type": "goal_reached"})
            }
            Self::FrontierExhausted => serde_json::json!({"type": "frontier_exhausted"}),
            Self::ExpansionBudgetExceeded { limit } => {
                serde_json::json!({"limit": limit, "type": "expansion_budget_exceeded"})
            }
            Self::Cancelled => serde_json::json!({"type": "cancelled"}),
        }
    }
}

/// Receives events while a search runs.
///
/// Observers see events; they cannot influence the search. A search runs
/// identically with or without one.
pub trait SearchObserver {
    fn on_event(&mut self, event: &SearchEvent);
}

impl<F: FnMut(&SearchEvent)> SearchObserver for F {
    fn on_event(&mut self, event: &SearchEvent) {
        self(event);
    }
}

/// Observer that keeps every event, for replay at the consumer's own pace.
#[derive(Debug, Default)]
pub struct TraceRecorder {
    events: Vec<SearchEvent>,
}

impl TraceRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn into_trace(self) -> SearchTraceV1 {
        SearchTraceV1 {
            events: self.events,
        }
    }
}

impl SearchObserver for TraceRecorder {
    fn on_event(&mut self, event: &SearchEvent) {
        self.events.push(event.clone());
    }
}

/// Ordered events of one search.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchTraceV1 {
    pub events: Vec<SearchEvent>,
}

impl SearchTraceV1 {
    /// Nodes in activation order (re-activations included).
    #[must_use]
    pub fn activation_order(&self) -> Vec<NodeId> {
        self.events
            .iter()
            .filter_map(|e| match e {
                SearchEvent::NodeActivated { node, .. } => Some(*node),
                _ => None,
            })
            .collect()
    }

    /// Number of `NodeOpened` events flagged as re-openings.
    #[must_use]
    pub fn reopen_count(&self) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e, SearchEvent::NodeOpened { reopened: true, .. }))
            .count()
    }

    #[must_use]
    pub fn terminal(&self) -> Option<&SearchEvent> {
        self.events.last().filter(|e| e.is_terminal())
    }

    pub fn to_json_value(&self) -> serde_json::Value {
        let events: Vec<serde_json::Value> =
            self.events.iter().map(SearchEvent::to_json_value).collect();
        serde_json::json!({
            "event_count": self.events.len(),
            "events": events,
            "schema_version": "search_trace.v1",
        })
    }

    /// Serialize the trace to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a recorded cost is not finite.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if a recorded cost is not finite.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::SearchTrace, &bytes))
    }
}
