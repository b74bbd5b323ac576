//! Auditable benchmark report harness.
//!
//! Uses `std::time::Instant` for wall-clock timing, NOT Criterion.
//! Emits a versioned `bench_report_v1` JSON artifact to `target/bench_reports/`.
//!
//! Measures both "engine throughput" (`search()` only) and "report throughput"
//! (`run_world()` end-to-end) for each regime × algorithm combination. Every
//! engine result carries the outcome's guard digest, so a timing change can be
//! checked against a behaviour change.
//!
//! Run via `cargo bench --bench auditable_report`.

// Numeric casts in timing harness are intentional and benign:
// - u128→f64 for microseconds (precision loss negligible at μs scale)
// - usize→f64 for percentile indexing
// - f64→usize for percentile index (always non-negative, bounded)
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]

use std::fs;
use std::time::Instant;

use serde::Serialize;

use tilepath_benchmarks::{outcome_guard, run_engine, standard_regimes, Regime};
use tilepath_harness::runner::run_world;
use tilepath_search::heuristic::{CrossProductHeuristic, ManhattanHeuristic};
use tilepath_search::policy::{Algorithm, SearchOptions};
use tilepath_search::search::SearchOutcome;

// ---------------------------------------------------------------------------
// Report schema
// ---------------------------------------------------------------------------

#[derive(Serialize)]
struct BenchReport {
    version: &'static str,
    timestamp_utc: String,
    machine: MachineInfo,
    definitions: Definitions,
    results: Vec<BenchResult>,
}

#[derive(Serialize)]
struct MachineInfo {
    os: &'static str,
    arch: &'static str,
    rust_version: String,
}

/// Pin definitions so future readers know what the numbers mean.
#[derive(Serialize)]
struct Definitions {
    expansion_definition: &'static str,
    p95_method: &'static str,
    warmup_iterations: usize,
    timed_iterations: usize,
}

#[derive(Serialize)]
struct BenchResult {
    name: String,
    regime: String,
    algorithm: String,
    measurement: String,
    iterations: usize,
    mean_us: f64,
    p50_us: f64,
    p95_us: f64,
    min_us: f64,
    max_us: f64,
    outcome: Option<OutcomeMetadata>,
}

#[derive(Serialize)]
struct OutcomeMetadata {
    status: &'static str,
    total_cost: Option<f64>,
    nodes_expanded: u64,
    nodes_activated: u64,
    nodes_reopened: u64,
    frontier_high_water: u64,
    guard_digest: String,
}

impl OutcomeMetadata {
    fn from_outcome(outcome: &SearchOutcome) -> Self {
        Self {
            status: outcome.status.as_str(),
            total_cost: outcome.total_cost(),
            nodes_expanded: outcome.stats.nodes_expanded,
            nodes_activated: outcome.stats.nodes_activated,
            nodes_reopened: outcome.stats.nodes_reopened,
            frontier_high_water: outcome.stats.frontier_high_water,
            guard_digest: outcome_guard(outcome).as_str().to_string(),
        }
    }
}

// ---------------------------------------------------------------------------
// Timing helpers
// ---------------------------------------------------------------------------

const WARMUP_ITERATIONS: usize = 5;
const TIMED_ITERATIONS: usize = 50;

fn percentile(sorted: &[f64], pct: f64) -> f64 {
    if sorted.is_empty() {
        return 0.0;
    }
    let idx = (pct / 100.0 * (sorted.len() - 1) as f64).round() as usize;
    sorted[idx.min(sorted.len() - 1)]
}

fn statistics(durations_us: &mut [f64]) -> (f64, f64, f64, f64, f64) {
    durations_us.sort_by(f64::total_cmp);
    let sum: f64 = durations_us.iter().sum();
    let mean = sum / durations_us.len() as f64;
    let p50 = percentile(durations_us, 50.0);
    let p95 = percentile(durations_us, 95.0);
    let min = durations_us.first().copied().unwrap_or(0.0);
    let max = durations_us.last().copied().unwrap_or(0.0);
    (mean, p50, p95, min, max)
}

/// Warm up, then time `f` `TIMED_ITERATIONS` times. Returns the sorted-stat
/// tuple and the last value `f` produced.
fn time_iterations<T>(mut f: impl FnMut() -> T) -> ((f64, f64, f64, f64, f64), Option<T>) {
    for _ in 0..WARMUP_ITERATIONS {
        let _ = f();
    }
    let mut durations_us = Vec::with_capacity(TIMED_ITERATIONS);
    let mut last = None;
    for _ in 0..TIMED_ITERATIONS {
        let start = Instant::now();
        let value = f();
        durations_us.push(start.elapsed().as_micros() as f64);
        last = Some(value);
    }
    (statistics(&mut durations_us), last)
}

// ---------------------------------------------------------------------------
// Regime runner
// ---------------------------------------------------------------------------

fn run_regime_benchmarks(regime: &Regime) -> Vec<BenchResult> {
    let mut results = Vec::new();
    let cross = CrossProductHeuristic::default();
    let algorithms = [
        ("dijkstra", Algorithm::Dijkstra),
        ("astar_manhattan", Algorithm::AStar(&ManhattanHeuristic)),
        ("astar_cross_product", Algorithm::AStar(&cross)),
    ];

    for (label, algorithm) in algorithms {
        // -- Engine throughput (search() only) --
        let ((mean, p50, p95, min, max), last) =
            time_iterations(|| run_engine(regime, algorithm, SearchOptions::default()));
        results.push(BenchResult {
            name: format!("{}/{label}/engine", regime.name),
            regime: regime.name.clone(),
            algorithm: label.to_string(),
            measurement: "search_only".to_string(),
            iterations: TIMED_ITERATIONS,
            mean_us: mean,
            p50_us: p50,
            p95_us: p95,
            min_us: min,
            max_us: max,
            outcome: last.as_ref().map(OutcomeMetadata::from_outcome),
        });

        // -- Report throughput (run_world() end-to-end) --
        let ((mean, p50, p95, min, max), _) = time_iterations(|| {
            run_world(&regime.world, algorithm, None).expect("run_world")
        });
        results.push(BenchResult {
            name: format!("{}/{label}/report", regime.name),
            regime: regime.name.clone(),
            algorithm: label.to_string(),
            measurement: "run_world_e2e".to_string(),
            iterations: TIMED_ITERATIONS,
            mean_us: mean,
            p50_us: p50,
            p95_us: p95,
            min_us: min,
            max_us: max,
            outcome: None,
        });
    }

    results
}

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

fn main() {
    let regimes = standard_regimes();

    let mut all_results = Vec::new();
    for regime in &regimes {
        eprintln!("Benchmarking regime: {} ...", regime.name);
        let results = run_regime_benchmarks(regime);
        for r in &results {
            eprintln!(
                "  {}: mean={:.0}us p50={:.0}us p95={:.0}us",
                r.name, r.mean_us, r.p50_us, r.p95_us,
            );
        }
        all_results.extend(results);
    }

    let rust_version = option_env!("RUSTC_VERSION")
        .unwrap_or(env!("CARGO_PKG_VERSION"))
        .to_string();

    let report = BenchReport {
        version: "bench_report_v1",
        timestamp_utc: {
            let since_epoch = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .unwrap_or_default();
            format!("epoch:{}", since_epoch.as_secs())
        },
        machine: MachineInfo {
            os: std::env::consts::OS,
            arch: std::env::consts::ARCH,
            rust_version,
        },
        definitions: Definitions {
            expansion_definition: "nodes_expanded counts moves into the closed set; a node \
                re-opened and closed again counts twice. nodes_activated counts frontier \
                extractions, including the goal's.",
            p95_method: "Sort all iteration durations ascending, take value at index \
                round(0.95 * (N-1)) where N = timed_iterations.",
            warmup_iterations: WARMUP_ITERATIONS,
            timed_iterations: TIMED_ITERATIONS,
        },
        results: all_results,
    };

    // Write to target/bench_reports/
    let report_dir = concat!(env!("CARGO_MANIFEST_DIR"), "/../target/bench_reports");
    fs::create_dir_all(report_dir).expect("create bench_reports dir");

    let report_path = format!("{report_dir}/bench_report_v1_latest.json");
    let json = serde_json::to_string_pretty(&report).expect("serialize report");
    fs::write(&report_path, &json).expect("write report");

    eprintln!("\nReport written to: {report_path}");
    eprintln!(
        "({} results across {} regimes)",
        report.results.len(),
        regimes.len()
    );
}
