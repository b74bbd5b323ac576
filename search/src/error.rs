//! Typed search errors.
//!
//! `SearchError` covers pre-flight rejections and internal faults only. A
//! search that simply finds no path is not an error: it ends with
//! [`crate::event::TerminationReason::FrontierExhausted`] inside an ordinary
//! [`crate::search::SearchOutcome`].

use tilepath_kernel::graph::NodeId;

/// Rejected inputs, detected before any expansion.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// The start node is not part of the graph.
    StartNotInGraph { node: NodeId },
    /// The goal node is not part of the graph.
    GoalNotInGraph { node: NodeId },
    /// A heuristic needs a position the graph does not provide.
    MissingPosition { node: NodeId },
    /// A heuristic weight must be finite and non-negative.
    InvalidHeuristicWeight { weight: f64 },
    /// `max_expansions = Some(0)` could never expand anything.
    ZeroExpansionBudget,
}

/// Failure of a single search.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError {
    /// Start, goal, heuristic or options were rejected. No search steps were taken.
    InvalidInput(InvalidInput),
    /// Record bookkeeping broke an invariant (e.g. a predecessor without a
    /// record during path reconstruction). Indicates a bug; only the current
    /// search is abandoned.
    MalformedRecord { detail: String },
    /// The graph broke the [`tilepath_kernel::graph::TileGraph`] contract
    /// mid-search (dangling connection, negative or non-finite cost).
    GraphContract { detail: String },
    /// A heuristic returned a negative or non-finite estimate.
    HeuristicContract { node: NodeId, value: f64 },
}

impl From<InvalidInput> for SearchError {
    fn from(input: InvalidInput) -> Self {
        Self::InvalidInput(input)
    }
}

impl std::fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StartNotInGraph { node } => write!(f, "start node {node} is not in the graph"),
            Self::GoalNotInGraph { node } => write!(f, "goal node {node} is not in the graph"),
            Self::MissingPosition { node } => write!(f, "node {node} has no position"),
            Self::InvalidHeuristicWeight { weight } => {
                write!(f, "heuristic weight {weight} must be finite and >= 0")
            }
            Self::ZeroExpansionBudget => write!(f, "expansion budget of 0 is not allowed"),
        }
    }
}

impl std::fmt::Display for SearchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidInput(input) => write!(f, "invalid search input: {input}"),
            Self::MalformedRecord { detail } => write!(f, "malformed node record: {detail}"),
            Self::GraphContract { detail } => write!(f, "graph contract violation: {detail}"),
            Self::HeuristicContract { node, value } => {
                write!(f, "heuristic returned {value} for node {node}")
            }
        }
    }
}

impl std::error::Error for SearchError {}
