//! Search entry points and the expansion loop.
//!
//! [`SearchStepper`] runs the loop one suspension point at a time: every
//! activation, every frontier insertion and every closing is a separate call
//! to [`SearchStepper::step`]. [`search`] and [`search_observed`] drive a
//! stepper to completion.

use std::time::{Duration, Instant};

use log::{debug, trace, warn};
use tilepath_kernel::graph::{Connection, NodeId, Position, TileGraph};

use crate::error::{InvalidInput, SearchError};
use crate::event::{SearchEvent, SearchObserver, SearchStatus, SearchTraceV1, TerminationReason};
use crate::path::{reconstruct_path, Path};
use crate::policy::{Algorithm, SearchOptions};
use crate::record::NodeRecord;
use crate::state::SearchState;

/// Per-search diagnostics, reported once when the search ends.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchStats {
    /// Nodes moved to the closed set (a re-opened node counts again).
    pub nodes_expanded: u64,
    /// Frontier extractions, including the goal's.
    pub nodes_activated: u64,
    /// Records created for newly discovered nodes.
    pub nodes_opened: u64,
    /// Closed nodes moved back to the frontier.
    pub nodes_reopened: u64,
    /// Open nodes given a cheaper route in place.
    pub nodes_updated: u64,
    pub frontier_high_water: u64,
    pub closed_count: u64,
    /// Wall-clock time from construction to termination. Never hashed.
    pub elapsed: Duration,
}

/// Result of a search that did not fault.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub status: SearchStatus,
    pub termination: TerminationReason,
    /// Present exactly when `status` is [`SearchStatus::Succeeded`].
    pub path: Option<Path>,
    pub stats: SearchStats,
    /// Present when [`SearchOptions::emit_trace`] was set.
    pub trace: Option<SearchTraceV1>,
}

impl SearchOutcome {
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status == SearchStatus::Succeeded
    }

    /// Cost of the path to the goal.
    #[must_use]
    pub fn total_cost(&self) -> Option<f64> {
        self.path.as_ref().map(Path::total_cost)
    }
}

/// Where the loop resumes on the next step.
#[derive(Debug, Clone, Copy)]
enum Cursor {
    /// Extract the next node from the frontier.
    Extract,
    /// `node` was activated; test it against the goal, then relax its edges.
    GoalCheck { node: NodeId },
    /// Relax connection `next` onward of `node`.
    Relax { node: NodeId, next: usize },
}

#[derive(Debug, Clone, Copy)]
enum Phase {
    Expanding(Cursor),
    Finished(TerminationReason),
    Faulted,
}

/// A search in progress, advanced one event at a time.
///
/// Owns its [`SearchState`]; dropping the stepper between two events abandons
/// the search and releases the state without producing a path.
pub struct SearchStepper<'a, G: TileGraph + ?Sized> {
    graph: &'a G,
    start: NodeId,
    goal: NodeId,
    algorithm: Algorithm<'a>,
    /// Start and goal positions, looked up once for A*.
    endpoints: Option<(Position, Position)>,
    options: SearchOptions,
    state: SearchState,
    phase: Phase,
    stats: SearchStats,
    started: Instant,
    path: Option<Path>,
    fault: Option<SearchError>,
    trace: Option<Vec<SearchEvent>>,
}

impl<'a, G: TileGraph + ?Sized> SearchStepper<'a, G> {
    /// Validate the inputs and open the start record.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::InvalidInput`] if start or goal is not in the
    /// graph, A* lacks their positions, or the options are invalid, and
    /// [`SearchError::HeuristicContract`] if the start estimate is unusable.
    pub fn new(
        graph: &'a G,
        start: NodeId,
        goal: NodeId,
        algorithm: Algorithm<'a>,
        options: SearchOptions,
    ) -> Result<Self, SearchError> {
        options.validate()?;
        if !graph.contains(start) {
            return Err(InvalidInput::StartNotInGraph { node: start }.into());
        }
        if !graph.contains(goal) {
            return Err(InvalidInput::GoalNotInGraph { node: goal }.into());
        }
        let endpoints = match algorithm.heuristic() {
            None => None,
            Some(_) => {
                let s = graph
                    .position(start)
                    .ok_or(InvalidInput::MissingPosition { node: start })?;
                let g = graph
                    .position(goal)
                    .ok_or(InvalidInput::MissingPosition { node: goal })?;
                Some((s, g))
            }
        };

        let trace = options.emit_trace.then(Vec::new);
        let mut stepper = Self {
            graph,
            start,
            goal,
            algorithm,
            endpoints,
            options,
            state: SearchState::new(graph.node_count()),
            phase: Phase::Expanding(Cursor::Extract),
            stats: SearchStats::default(),
            started: Instant::now(),
            path: None,
            fault: None,
            trace,
        };
        let h = stepper.heuristic_for(start)?;
        stepper.state.open_new(NodeRecord::start(start, h))?;
        Ok(stepper)
    }

    /// Advance to the next suspension point.
    ///
    /// Returns `Ok(None)` once the search has terminated. The cancel token is
    /// checked before any work is done.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedRecord`], [`SearchError::GraphContract`]
    /// or [`SearchError::HeuristicContract`] on a fault. The stepper is then
    /// finished and yields nothing further.
    pub fn step(&mut self) -> Result<Option<SearchEvent>, SearchError> {
        let Phase::Expanding(cursor) = self.phase else {
            return Ok(None);
        };
        let result = if self.options.is_cancelled() {
            let reason = TerminationReason::Cancelled;
            Ok(self.terminate(reason, SearchEvent::SearchAborted { reason }))
        } else {
            self.advance(cursor)
        };
        match result {
            Ok(event) => {
                if let Some(trace) = self.trace.as_mut() {
                    trace.push(event.clone());
                }
                Ok(Some(event))
            }
            Err(err) => {
                warn!(
                    "{} search {} -> {} faulted after {} expansions: {err}",
                    self.algorithm.name(),
                    self.start,
                    self.goal,
                    self.stats.nodes_expanded
                );
                self.phase = Phase::Faulted;
                self.stats.elapsed = self.started.elapsed();
                self.fault = Some(err.clone());
                Err(err)
            }
        }
    }

    /// Stop the search now. Returns the `SearchAborted` event, or `None` if
    /// the search had already terminated.
    pub fn abort(&mut self) -> Option<SearchEvent> {
        if !matches!(self.phase, Phase::Expanding(_)) {
            return None;
        }
        let reason = TerminationReason::Cancelled;
        let event = self.terminate(reason, SearchEvent::SearchAborted { reason });
        if let Some(trace) = self.trace.as_mut() {
            trace.push(event.clone());
        }
        Some(event)
    }

    /// Run the remaining steps and produce the outcome.
    ///
    /// # Errors
    ///
    /// Returns the fault that stopped the search, if any.
    pub fn finish(mut self) -> Result<SearchOutcome, SearchError> {
        while self.step()?.is_some() {}
        self.into_outcome()
    }

    /// Current status; `None` while the search is running or after a fault.
    #[must_use]
    pub fn status(&self) -> Option<SearchStatus> {
        match self.phase {
            Phase::Finished(reason) => Some(reason.status()),
            Phase::Expanding(_) | Phase::Faulted => None,
        }
    }

    #[must_use]
    pub fn is_finished(&self) -> bool {
        !matches!(self.phase, Phase::Expanding(_))
    }

    /// Live frontier, closed set and records, for observers between steps.
    #[must_use]
    pub fn state(&self) -> &SearchState {
        &self.state
    }

    #[must_use]
    pub fn stats(&self) -> &SearchStats {
        &self.stats
    }

    fn advance(&mut self, cursor: Cursor) -> Result<SearchEvent, SearchError> {
        match cursor {
            Cursor::Extract => self.extract(),
            Cursor::GoalCheck { node } if node == self.goal => self.succeed(node),
            Cursor::GoalCheck { node } => self.relax_from(node, 0),
            Cursor::Relax { node, next } => self.relax_from(node, next),
        }
    }

    /// Pop the best open node. An empty frontier fails the search; a spent
    /// budget aborts it unless the popped node is the goal.
    fn extract(&mut self) -> Result<SearchEvent, SearchError> {
        let Some(current) = self.state.extract_min()? else {
            return Ok(self.terminate(
                TerminationReason::FrontierExhausted,
                SearchEvent::SearchFailed,
            ));
        };
        if let Some(limit) = self.options.max_expansions {
            if current.node != self.goal && self.stats.nodes_expanded >= limit {
                let reason = TerminationReason::ExpansionBudgetExceeded { limit };
                return Ok(self.terminate(reason, SearchEvent::SearchAborted { reason }));
            }
        }
        self.stats.nodes_activated += 1;
        trace!(
            "activate {} cost={} estimate={}",
            current.node,
            current.cost_so_far,
            current.estimated_total_cost
        );
        self.phase = Phase::Expanding(Cursor::GoalCheck { node: current.node });
        Ok(SearchEvent::NodeActivated {
            node: current.node,
            cost_so_far: current.cost_so_far,
            estimated_total_cost: current.estimated_total_cost,
        })
    }

    fn succeed(&mut self, goal: NodeId) -> Result<SearchEvent, SearchError> {
        let terminal = self
            .state
            .record(goal)
            .ok_or_else(|| SearchError::MalformedRecord {
                detail: format!("activated goal {goal} has no record"),
            })?;
        let path = reconstruct_path(&self.state, terminal, self.start)?;
        self.path = Some(path.clone());
        Ok(self.terminate(
            TerminationReason::GoalReached { goal },
            SearchEvent::PathFound { path },
        ))
    }

    /// Relax the connections of `node` from index `next` until one of them
    /// produces an event; close `node` when none is left.
    fn relax_from(&mut self, node: NodeId, mut next: usize) -> Result<SearchEvent, SearchError> {
        let cost_so_far = self
            .state
            .record(node)
            .map(|r| r.cost_so_far)
            .ok_or_else(|| SearchError::MalformedRecord {
                detail: format!("current node {node} has no record"),
            })?;
        let graph = self.graph;
        let connections = graph.connections(node);
        while let Some(&connection) = connections.get(next) {
            next += 1;
            if let Some(event) = self.relax(node, cost_so_far, connection)? {
                self.phase = Phase::Expanding(Cursor::Relax { node, next });
                return Ok(event);
            }
        }
        self.state.close(node);
        self.stats.nodes_expanded += 1;
        self.phase = Phase::Expanding(Cursor::Extract);
        Ok(SearchEvent::NodeClosed { node })
    }

    /// Examine one connection. Returns an event when the neighbour enters the
    /// frontier or an open neighbour gets a cheaper route.
    fn relax(
        &mut self,
        from: NodeId,
        from_cost: f64,
        connection: Connection,
    ) -> Result<Option<SearchEvent>, SearchError> {
        let Connection { to, cost } = connection;
        if !(cost.is_finite() && cost >= 0.0) {
            return Err(SearchError::GraphContract {
                detail: format!("connection {from} -> {to} has cost {cost}"),
            });
        }
        if !self.graph.contains(to) {
            return Err(SearchError::GraphContract {
                detail: format!("connection {from} -> {to} leaves the graph"),
            });
        }
        let tentative = from_cost + cost;
        if !tentative.is_finite() {
            return Err(SearchError::GraphContract {
                detail: format!("route to {to} via {from} overflows to {tentative}"),
            });
        }

        if let Some(existing) = self.state.record(to) {
            if existing.cost_so_far <= tentative {
                return Ok(None);
            }
            let reopened = self.state.improve(to, tentative, from)?;
            let estimated_total_cost = self
                .state
                .find_open(to)
                .map_or(tentative, |r| r.estimated_total_cost);
            if !reopened {
                self.stats.nodes_updated += 1;
                return Ok(Some(SearchEvent::NodeUpdated {
                    node: to,
                    cost_so_far: tentative,
                    estimated_total_cost,
                }));
            }
            self.stats.nodes_reopened += 1;
            return Ok(Some(SearchEvent::NodeOpened {
                node: to,
                cost_so_far: tentative,
                estimated_total_cost,
                reopened: true,
            }));
        }

        let h = self.heuristic_for(to)?;
        let record = NodeRecord::discovered(to, tentative, from, h);
        let event = SearchEvent::NodeOpened {
            node: to,
            cost_so_far: record.cost_so_far,
            estimated_total_cost: record.estimated_total_cost,
            reopened: false,
        };
        self.state.open_new(record)?;
        self.stats.nodes_opened += 1;
        Ok(Some(event))
    }

    /// Heuristic component for a new record of `node`; 0 under Dijkstra.
    fn heuristic_for(&self, node: NodeId) -> Result<f64, SearchError> {
        let (Some(heuristic), Some((start, goal))) = (self.algorithm.heuristic(), self.endpoints)
        else {
            return Ok(0.0);
        };
        let position = self
            .graph
            .position(node)
            .ok_or_else(|| SearchError::GraphContract {
                detail: format!("{node} has no position"),
            })?;
        let value = heuristic.estimate(start, position, goal);
        if value.is_finite() && value >= 0.0 {
            Ok(value)
        } else {
            Err(SearchError::HeuristicContract { node, value })
        }
    }

    /// Enter a terminal phase and return the terminal event.
    fn terminate(&mut self, reason: TerminationReason, event: SearchEvent) -> SearchEvent {
        self.phase = Phase::Finished(reason);
        self.stats.elapsed = self.started.elapsed();
        self.stats.frontier_high_water = self.state.frontier().high_water();
        self.stats.closed_count = self.state.closed().len() as u64;
        debug!(
            "{} search {} -> {} {}: {:?}, {} expanded in {:?}, path length {}",
            self.algorithm.name(),
            self.start,
            self.goal,
            reason.status(),
            reason,
            self.stats.nodes_expanded,
            self.stats.elapsed,
            self.path.as_ref().map_or(0, Path::len)
        );
        event
    }

    fn into_outcome(self) -> Result<SearchOutcome, SearchError> {
        let termination = match self.phase {
            Phase::Finished(reason) => reason,
            Phase::Expanding(_) | Phase::Faulted => {
                return Err(self.fault.unwrap_or_else(|| SearchError::MalformedRecord {
                    detail: "search ended without terminating".into(),
                }));
            }
        };
        Ok(SearchOutcome {
            status: termination.status(),
            termination,
            path: self.path,
            stats: self.stats,
            trace: self.trace.map(|events| SearchTraceV1 { events }),
        })
    }
}

impl<G: TileGraph + ?Sized> Iterator for SearchStepper<'_, G> {
    type Item = Result<SearchEvent, SearchError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.step().transpose()
    }
}

impl<G: TileGraph + ?Sized> std::fmt::Debug for SearchStepper<'_, G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchStepper")
            .field("start", &self.start)
            .field("goal", &self.goal)
            .field("algorithm", &self.algorithm)
            .field("phase", &self.phase)
            .field("stats", &self.stats)
            .finish_non_exhaustive()
    }
}

/// Run a search from `start` to `goal` to completion.
///
/// Every runtime termination (goal reached, frontier exhausted, cancelled,
/// over budget) returns `Ok`; inspect [`SearchOutcome::status`].
///
/// # Errors
///
/// Returns [`SearchError::InvalidInput`] before any expansion for rejected
/// inputs, or the fault that aborted the search.
pub fn search<G: TileGraph + ?Sized>(
    graph: &G,
    start: NodeId,
    goal: NodeId,
    algorithm: Algorithm<'_>,
    options: SearchOptions,
) -> Result<SearchOutcome, SearchError> {
    SearchStepper::new(graph, start, goal, algorithm, options)?.finish()
}

/// [`search`], reporting every event to `observer` as it happens.
///
/// # Errors
///
/// As [`search`].
pub fn search_observed<G, O>(
    graph: &G,
    start: NodeId,
    goal: NodeId,
    algorithm: Algorithm<'_>,
    options: SearchOptions,
    observer: &mut O,
) -> Result<SearchOutcome, SearchError>
where
    G: TileGraph + ?Sized,
    O: SearchObserver + ?Sized,
{
    let mut stepper = SearchStepper::new(graph, start, goal, algorithm, options)?;
    while let Some(event) = stepper.step()? {
        observer.on_event(&event);
    }
    stepper.finish()
}
