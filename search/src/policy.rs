//! Search configuration: algorithm selection, options, cancellation.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::error::{InvalidInput, SearchError};
use crate::heuristic::Heuristic;

/// Which best-first variant to run.
#[derive(Clone, Copy)]
pub enum Algorithm<'h> {
    /// Uniform-cost search: ordering key is the cost so far.
    Dijkstra,
    /// A*: ordering key is cost so far plus the heuristic estimate.
    AStar(&'h dyn Heuristic),
}

impl Algorithm<'_> {
    /// Stable identifier used in traces and reports.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Dijkstra => "dijkstra",
            Self::AStar(_) => "astar",
        }
    }

    /// The heuristic, `None` for Dijkstra.
    #[must_use]
    pub fn heuristic(&self) -> Option<&dyn Heuristic> {
        match self {
            Self::Dijkstra => None,
            Self::AStar(h) => Some(*h),
        }
    }

    /// Whether the first path found is guaranteed to be a cheapest one.
    #[must_use]
    pub fn is_optimal(&self) -> bool {
        self.heuristic().map_or(true, Heuristic::is_admissible)
    }
}

impl std::fmt::Debug for Algorithm<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Dijkstra => f.write_str("Dijkstra"),
            Self::AStar(h) => write!(f, "AStar({})", h.name()),
        }
    }
}

/// Shared flag for aborting a running search from outside.
///
/// The engine checks the flag at every suspension point. Clones share the flag.
#[derive(Debug, Clone, Default)]
pub struct CancelToken(Arc<AtomicBool>);

impl CancelToken {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::Release);
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Per-invocation search options.
#[derive(Debug, Clone, Default)]
pub struct SearchOptions {
    /// Record every event into a [`crate::event::SearchTraceV1`] on the outcome.
    pub emit_trace: bool,
    /// Hard cap on node expansions (`None` = unbounded).
    pub max_expansions: Option<u64>,
    /// External abort signal.
    pub cancel: Option<CancelToken>,
}

impl SearchOptions {
    /// Options that also record a trace.
    #[must_use]
    pub fn traced() -> Self {
        Self {
            emit_trace: true,
            ..Self::default()
        }
    }

    /// # Errors
    ///
    /// Returns [`InvalidInput::ZeroExpansionBudget`] for `max_expansions = Some(0)`.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.max_expansions == Some(0) {
            return Err(InvalidInput::ZeroExpansionBudget.into());
        }
        Ok(())
    }

    pub(crate) fn is_cancelled(&self) -> bool {
        self.cancel.as_ref().is_some_and(CancelToken::is_cancelled)
    }
}
