//! Heuristic strategies: estimates of the remaining cost to the goal.

use tilepath_kernel::graph::Position;

use crate::error::{InvalidInput, SearchError};

/// Default weight of the cross-product tie-breaking term.
///
/// An empirical value tuned for unit-spaced grids; it does not carry over to
/// arbitrary graphs, hence [`CrossProductHeuristic::new`].
pub const DEFAULT_CROSS_PRODUCT_WEIGHT: f64 = 0.001;

/// Trait for remaining-cost estimates.
///
/// Implementations must be pure: the same positions always give the same
/// finite, non-negative value, with no shared mutable state, so one heuristic
/// can serve concurrent searches.
pub trait Heuristic: Send + Sync {
    /// Estimate the cost from `candidate` to `goal`. `start` is the search origin.
    fn estimate(&self, start: Position, candidate: Position, goal: Position) -> f64;

    /// Whether the estimate never exceeds the true remaining cost on graphs
    /// whose edge costs are at least the planar distance they span. Searches
    /// with a non-admissible heuristic may return non-optimal paths.
    fn is_admissible(&self) -> bool {
        true
    }

    /// Short stable identifier used in traces and reports.
    fn name(&self) -> &'static str;
}

/// Manhattan (L1) distance between two positions.
#[must_use]
pub fn manhattan(a: Position, b: Position) -> f64 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Always 0: A* with this heuristic expands in Dijkstra order.
#[derive(Debug, Clone, Copy, Default)]
pub struct ZeroHeuristic;

impl Heuristic for ZeroHeuristic {
    fn estimate(&self, _start: Position, _candidate: Position, _goal: Position) -> f64 {
        0.0
    }

    fn name(&self) -> &'static str {
        "zero"
    }
}

/// `|candidate.x - goal.x| + |candidate.y - goal.y|`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ManhattanHeuristic;

impl Heuristic for ManhattanHeuristic {
    fn estimate(&self, _start: Position, candidate: Position, goal: Position) -> f64 {
        manhattan(candidate, goal)
    }

    fn name(&self) -> &'static str {
        "manhattan"
    }
}

/// Manhattan distance plus `weight * |(candidate - goal) × (start - goal)|`.
///
/// The cross-product term grows with the distance from the straight start-goal
/// line, so among equally short routes the search prefers the straight one and
/// expands fewer nodes. The extra term can overestimate, so this heuristic is
/// **not** admissible and paths may be slightly longer than optimal.
#[derive(Debug, Clone, Copy)]
pub struct CrossProductHeuristic {
    weight: f64,
}

impl CrossProductHeuristic {
    /// # Errors
    ///
    /// Returns [`InvalidInput::InvalidHeuristicWeight`] unless `weight` is
    /// finite and non-negative.
    pub fn new(weight: f64) -> Result<Self, SearchError> {
        if !(weight.is_finite() && weight >= 0.0) {
            return Err(InvalidInput::InvalidHeuristicWeight { weight }.into());
        }
        Ok(Self { weight })
    }

    #[must_use]
    pub fn weight(&self) -> f64 {
        self.weight
    }
}

impl Default for CrossProductHeuristic {
    fn default() -> Self {
        Self {
            weight: DEFAULT_CROSS_PRODUCT_WEIGHT,
        }
    }
}

impl Heuristic for CrossProductHeuristic {
    fn estimate(&self, start: Position, candidate: Position, goal: Position) -> f64 {
        let (dx1, dy1) = (candidate.x - goal.x, candidate.y - goal.y);
        let (dx2, dy2) = (start.x - goal.x, start.y - goal.y);
        let cross = (dx1 * dy2 - dx2 * dy1).abs();
        manhattan(candidate, goal) + cross * self.weight
    }

    fn is_admissible(&self) -> bool {
        // A zero weight degenerates to plain Manhattan.
        self.weight == 0.0
    }

    fn name(&self) -> &'static str {
        "cross_product"
    }
}
