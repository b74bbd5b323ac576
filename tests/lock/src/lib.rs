//! Single source of truth for the fixture runs.
//!
//! Used by both the `search_fixture` binary and the in-process lock tests.
//! Any change here changes both, so the cross-process harness and the
//! in-process expectations cannot drift apart.
//!
//! Fixtures: every grid world under Dijkstra and A* (Manhattan), plus the
//! re-opening world under Dijkstra and A* with its node-table heuristic.

use tilepath_harness::runner::{run_world, ScenarioReportV1};
use tilepath_harness::worlds::grid::{maze, open_3x3, walled_3x3};
use tilepath_harness::worlds::reopening::ReopeningWorld;
use tilepath_search::heuristic::ManhattanHeuristic;
use tilepath_search::policy::Algorithm;

/// Run every fixture and return the reports in a fixed order.
///
/// # Panics
///
/// Panics if a fixture world fails to build or a search faults
/// (indicates an engine bug, not a usage error).
#[must_use]
pub fn fixture_reports() -> Vec<ScenarioReportV1> {
    let grids = [
        open_3x3().expect("open_3x3 builds"),
        walled_3x3().expect("walled_3x3 builds"),
        maze().expect("maze builds"),
    ];
    let mut reports = Vec::new();
    for world in &grids {
        for algorithm in [Algorithm::Dijkstra, Algorithm::AStar(&ManhattanHeuristic)] {
            reports.push(run_world(world, algorithm, None).expect("grid fixture search"));
        }
    }

    let reopening = ReopeningWorld::new().expect("reopening world builds");
    for algorithm in [Algorithm::Dijkstra, Algorithm::AStar(reopening.heuristic())] {
        reports.push(run_world(&reopening, algorithm, None).expect("reopening fixture search"));
    }
    reports
}

/// Deterministic `key=value` lines for every fixture report.
///
/// Keys are `<world_id>.<algorithm>.<field>`. Timings are never printed.
///
/// # Panics
///
/// As [`fixture_reports`], or if a report cannot be canonicalized.
#[must_use]
pub fn fixture_lines() -> Vec<String> {
    let mut lines = Vec::new();
    for report in fixture_reports() {
        let prefix = format!("{}.{}", report.world_id, report.algorithm);
        let termination = report.termination.to_json_value();
        let termination_type = termination["type"].as_str().unwrap_or("unknown").to_string();
        let total_cost = report
            .total_cost
            .map_or_else(|| "none".to_string(), |c| c.to_string());
        let report_digest = report.digest().expect("report canonicalizes");

        lines.push(format!("{prefix}.graph_digest={}", report.graph_digest.as_str()));
        lines.push(format!("{prefix}.trace_digest={}", report.trace_digest.as_str()));
        lines.push(format!("{prefix}.report_digest={}", report_digest.as_str()));
        lines.push(format!("{prefix}.termination={termination_type}"));
        lines.push(format!("{prefix}.total_cost={total_cost}"));
        lines.push(format!("{prefix}.nodes_expanded={}", report.stats.nodes_expanded));
        lines.push(format!("{prefix}.nodes_reopened={}", report.stats.nodes_reopened));
    }
    lines
}
