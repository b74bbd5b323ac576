//! Harness runner: runs a world through the search engine and packages the
//! outcome as a deterministic report.
//!
//! # Pipeline
//!
//! ```text
//! ScenarioV1 → build_world() → resolve heuristic
//!   → search(emit_trace) → graph/trace/path digests → ScenarioReportV1
//! ```
//!
//! Report digests exclude wall-clock time, so two runs of the same scenario
//! produce identical report bytes on any machine.

use log::info;

use tilepath_kernel::graph::NodeId;
use tilepath_kernel::proof::canon::{canonical_json_bytes, CanonError};
use tilepath_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use tilepath_kernel::proof::snapshot::graph_digest;
use tilepath_search::error::SearchError;
use tilepath_search::event::{SearchStatus, TerminationReason};
use tilepath_search::path::Path;
use tilepath_search::policy::{Algorithm, SearchOptions};
use tilepath_search::search::{search, SearchStats};

use crate::contract::SearchWorldV1;
use crate::scenario::{AlgorithmChoice, ScenarioError, ScenarioV1};

pub const REPORT_SCHEMA_VERSION: &str = "scenario_report.v1";

/// Error during a harness run.
#[derive(Debug, Clone, PartialEq)]
pub enum RunError {
    /// The scenario or its world was rejected.
    Scenario(ScenarioError),
    /// The search rejected its inputs or faulted.
    Search(SearchError),
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
}

impl From<ScenarioError> for RunError {
    fn from(e: ScenarioError) -> Self {
        Self::Scenario(e)
    }
}

impl From<SearchError> for RunError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CanonError> for RunError {
    fn from(e: CanonError) -> Self {
        Self::CanonFailed {
            detail: e.to_string(),
        }
    }
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Scenario(e) => write!(f, "{e}"),
            Self::Search(e) => write!(f, "search failed: {e}"),
            Self::CanonFailed { detail } => write!(f, "canonical JSON failed: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Outcome of one harness run.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioReportV1 {
    pub world_id: String,
    pub algorithm: &'static str,
    /// Heuristic name for A* runs.
    pub heuristic: Option<&'static str>,
    pub status: SearchStatus,
    pub termination: TerminationReason,
    pub total_cost: Option<f64>,
    /// Path nodes after the start, in travel order. Empty unless succeeded.
    pub path_nodes: Vec<NodeId>,
    /// Grid cells of `path_nodes`, for grid worlds.
    pub path_cells: Option<Vec<(u32, u32)>>,
    /// Includes `elapsed`, which is left out of the canonical form.
    pub stats: SearchStats,
    pub graph_digest: ContentHash,
    pub trace_digest: ContentHash,
    pub path_digest: Option<ContentHash>,
    /// Set by [`run_scenario`].
    pub scenario_digest: Option<ContentHash>,
}

impl ScenarioReportV1 {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let nodes: Vec<u32> = self.path_nodes.iter().map(|n| n.0).collect();
        let cells = self
            .path_cells
            .as_ref()
            .map(|cells| cells.iter().map(|(x, y)| [*x, *y]).collect::<Vec<_>>());
        serde_json::json!({
            "algorithm": self.algorithm,
            "graph_digest": self.graph_digest.as_str(),
            "heuristic": self.heuristic,
            "path": {
                "cells": cells,
                "digest": self.path_digest.as_ref().map(ContentHash::as_str),
                "nodes": nodes,
            },
            "scenario_digest": self.scenario_digest.as_ref().map(ContentHash::as_str),
            "schema_version": REPORT_SCHEMA_VERSION,
            "stats": {
                "closed_count": self.stats.closed_count,
                "frontier_high_water": self.stats.frontier_high_water,
                "nodes_activated": self.stats.nodes_activated,
                "nodes_expanded": self.stats.nodes_expanded,
                "nodes_opened": self.stats.nodes_opened,
                "nodes_reopened": self.stats.nodes_reopened,
                "nodes_updated": self.stats.nodes_updated,
            },
            "status": self.status.as_str(),
            "termination": self.termination.to_json_value(),
            "total_cost": self.total_cost,
            "trace_digest": self.trace_digest.as_str(),
            "world_id": self.world_id,
        })
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if a cost is not finite.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// # Errors
    ///
    /// Returns [`CanonError`] if a cost is not finite.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(HashDomain::ScenarioReport, &bytes))
    }
}

/// Run `algorithm` on `world` with tracing enabled and build the report.
///
/// All search terminations (including no path and budget exhaustion) yield a
/// report; check [`ScenarioReportV1::status`].
///
/// # Errors
///
/// Returns [`RunError::Search`] if the search rejected its inputs or faulted.
pub fn run_world(
    world: &dyn SearchWorldV1,
    algorithm: Algorithm<'_>,
    max_expansions: Option<u64>,
) -> Result<ScenarioReportV1, RunError> {
    let graph = world.graph();
    let options = SearchOptions {
        emit_trace: true,
        max_expansions,
        cancel: None,
    };
    let outcome = search(graph, world.start(), world.goal(), algorithm, options)?;

    let total_cost = outcome.total_cost();
    let trace = outcome.trace.unwrap_or_default();
    let path_nodes = outcome.path.as_ref().map(Path::nodes).unwrap_or_default();
    let path_cells = world.cell_of(world.start()).and_then(|_| {
        path_nodes
            .iter()
            .map(|n| world.cell_of(*n))
            .collect::<Option<Vec<_>>>()
    });
    let path_digest = outcome.path.as_ref().map(Path::digest).transpose()?;

    let report = ScenarioReportV1 {
        world_id: world.world_id().to_string(),
        algorithm: algorithm.name(),
        heuristic: algorithm.heuristic().map(|h| h.name()),
        status: outcome.status,
        termination: outcome.termination,
        total_cost,
        path_nodes,
        path_cells,
        stats: outcome.stats,
        graph_digest: graph_digest(graph)?,
        trace_digest: trace.digest()?,
        path_digest,
        scenario_digest: None,
    };
    info!(
        "{} {}: {} cost={:?} expanded={} elapsed={:?}",
        report.world_id,
        report.algorithm,
        report.status,
        report.total_cost,
        report.stats.nodes_expanded,
        report.stats.elapsed
    );
    Ok(report)
}

/// Build the scenario's world, run the configured search and report.
///
/// # Errors
///
/// Returns [`RunError::Scenario`] for an invalid world, otherwise as [`run_world`].
pub fn run_scenario(scenario: &ScenarioV1) -> Result<ScenarioReportV1, RunError> {
    let world = scenario.build_world()?;
    let heuristic = scenario.heuristic.build()?;
    let algorithm = match scenario.algorithm {
        AlgorithmChoice::Dijkstra => Algorithm::Dijkstra,
        AlgorithmChoice::AStar => Algorithm::AStar(heuristic.as_ref()),
    };
    let mut report = run_world(&world, algorithm, scenario.max_expansions)?;
    report.scenario_digest = Some(scenario.digest()?);
    Ok(report)
}

/// Dijkstra and A* reports for the same world.
#[derive(Debug, Clone, PartialEq)]
pub struct AlgorithmComparisonV1 {
    pub dijkstra: ScenarioReportV1,
    pub astar: ScenarioReportV1,
}

impl AlgorithmComparisonV1 {
    /// Both found a path of the same cost, or neither found one.
    #[must_use]
    pub fn costs_agree(&self) -> bool {
        match (self.dijkstra.total_cost, self.astar.total_cost) {
            (Some(d), Some(a)) => (d - a).abs() <= 1e-9 * d.abs().max(1.0),
            (None, None) => true,
            _ => false,
        }
    }

    /// Expansions A* saved over Dijkstra (negative if it needed more).
    #[must_use]
    pub fn expansions_saved(&self) -> i128 {
        i128::from(self.dijkstra.stats.nodes_expanded) - i128::from(self.astar.stats.nodes_expanded)
    }
}

/// Run the scenario's world under Dijkstra and under A* with the scenario's
/// heuristic, regardless of the scenario's own algorithm choice.
///
/// # Errors
///
/// As [`run_scenario`].
pub fn compare_algorithms(scenario: &ScenarioV1) -> Result<AlgorithmComparisonV1, RunError> {
    let world = scenario.build_world()?;
    let heuristic = scenario.heuristic.build()?;
    let scenario_digest = scenario.digest()?;

    let mut dijkstra = run_world(&world, Algorithm::Dijkstra, scenario.max_expansions)?;
    let mut astar = run_world(
        &world,
        Algorithm::AStar(heuristic.as_ref()),
        scenario.max_expansions,
    )?;
    dijkstra.scenario_digest = Some(scenario_digest.clone());
    astar.scenario_digest = Some(scenario_digest);

    let comparison = AlgorithmComparisonV1 { dijkstra, astar };
    info!(
        "{}: dijkstra expanded {} in {:?}, astar({}) expanded {} in {:?}, costs agree: {}",
        scenario.scenario_id,
        comparison.dijkstra.stats.nodes_expanded,
        comparison.dijkstra.stats.elapsed,
        scenario.heuristic.name(),
        comparison.astar.stats.nodes_expanded,
        comparison.astar.stats.elapsed,
        comparison.costs_agree()
    );
    Ok(comparison)
}
