//! Shared helpers for tilepath benchmark suites.
//!
//! A *regime* is a grid world shaped to stress one part of the engine:
//!
//! - `open`: no walls. A* with Manhattan expands a thin band; Dijkstra floods.
//! - `serpentine`: wall rows with alternating gaps. The heuristic is misleading
//!   and both algorithms expand most of the grid.
//! - `dead_end`: the goal is sealed off. Every algorithm exhausts the frontier.

use tilepath_harness::contract::SearchWorldV1;
use tilepath_harness::worlds::grid::GridWorld;
use tilepath_kernel::graph::grid::GridGraph;
use tilepath_kernel::proof::canon::canonical_json_bytes;
use tilepath_kernel::proof::hash::{canonical_hash, ContentHash, HashDomain};
use tilepath_search::path::Path;
use tilepath_search::policy::{Algorithm, SearchOptions};
use tilepath_search::search::{search, SearchOutcome};

/// A named benchmark world.
pub struct Regime {
    pub name: String,
    pub world: GridWorld,
}

/// `size × size` grid without walls, corner to corner.
///
/// # Panics
///
/// Panics if `size` is zero. Benchmark setup failures are fatal.
#[must_use]
pub fn regime_open(size: u32) -> Regime {
    let grid = GridGraph::new(size, size, 1.0).expect("open grid");
    let world = GridWorld::new(format!("open_{size}"), grid, (0, 0), (size - 1, size - 1))
        .expect("open world");
    Regime {
        name: format!("open_{size}"),
        world,
    }
}

/// Every odd row is a wall with one gap, alternating between the right and
/// left edge, so the only route zig-zags through the whole grid.
///
/// # Panics
///
/// Panics if `size` is even or below 3.
#[must_use]
pub fn regime_serpentine(size: u32) -> Regime {
    assert!(size >= 3 && size % 2 == 1, "serpentine size must be odd and >= 3");
    let rows: Vec<String> = (0..size)
        .map(|y| {
            if y % 2 == 0 {
                return ".".repeat(size as usize);
            }
            let gap = if (y / 2) % 2 == 0 { size - 1 } else { 0 };
            (0..size).map(|x| if x == gap { '.' } else { '#' }).collect()
        })
        .collect();
    let grid = GridGraph::from_ascii(rows.as_slice(), 1.0).expect("serpentine grid");
    let world = GridWorld::new(
        format!("serpentine_{size}"),
        grid,
        (0, 0),
        (size - 1, size - 1),
    )
    .expect("serpentine world");
    Regime {
        name: format!("serpentine_{size}"),
        world,
    }
}

/// Open grid whose goal corner is walled in on both sides.
///
/// # Panics
///
/// Panics if `size` is below 3.
#[must_use]
pub fn regime_dead_end(size: u32) -> Regime {
    assert!(size >= 3, "dead_end size must be >= 3");
    let mut grid = GridGraph::new(size, size, 1.0).expect("dead-end grid");
    grid.set_wall(size - 2, size - 1);
    grid.set_wall(size - 1, size - 2);
    let world = GridWorld::new(
        format!("dead_end_{size}"),
        grid,
        (0, 0),
        (size - 1, size - 1),
    )
    .expect("dead-end world");
    Regime {
        name: format!("dead_end_{size}"),
        world,
    }
}

/// The standard regime set used by every suite.
#[must_use]
pub fn standard_regimes() -> Vec<Regime> {
    vec![
        regime_open(32),
        regime_open(96),
        regime_serpentine(31),
        regime_serpentine(63),
        regime_dead_end(64),
    ]
}

/// Run the engine once on `regime` without a trace.
///
/// # Panics
///
/// Panics if the search rejects its inputs or faults. Benchmark runs are
/// expected to terminate normally.
#[must_use]
pub fn run_engine(regime: &Regime, algorithm: Algorithm<'_>, options: SearchOptions) -> SearchOutcome {
    let world = &regime.world;
    search(world.grid(), world.start(), world.goal(), algorithm, options)
        .expect("search should terminate normally in benchmarks")
}

/// Fingerprint of everything deterministic in an outcome (no timings).
///
/// Suites record it next to their timings so a regression in speed can be
/// told apart from a change in behaviour.
///
/// # Panics
///
/// Panics if the outcome cannot be canonicalized.
#[must_use]
pub fn outcome_guard(outcome: &SearchOutcome) -> ContentHash {
    let value = serde_json::json!({
        "nodes_expanded": outcome.stats.nodes_expanded,
        "nodes_reopened": outcome.stats.nodes_reopened,
        "path": outcome.path.as_ref().map(Path::to_json_value),
        "status": outcome.status.as_str(),
        "termination": outcome.termination.to_json_value(),
    });
    let bytes = canonical_json_bytes(&value).expect("canon");
    canonical_hash(HashDomain::BenchGuard, &bytes)
}
