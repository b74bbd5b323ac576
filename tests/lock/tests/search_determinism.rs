//! In-process determinism locks: repeated runs, fresh graph instances, the
//! stepper against the one-shot entry point, and the re-opening trace.

use tilepath_harness::contract::SearchWorldV1;
use tilepath_harness::runner::{compare_algorithms, run_scenario, run_world};
use tilepath_harness::scenario::ScenarioV1;
use tilepath_harness::worlds::grid::maze;
use tilepath_harness::worlds::reopening::{self, ReopeningWorld};
use tilepath_search::event::{SearchEvent, SearchStatus, TerminationReason};
use tilepath_search::heuristic::ManhattanHeuristic;
use tilepath_search::policy::{Algorithm, SearchOptions};
use tilepath_search::search::{search, SearchStepper};

#[test]
fn search_determinism_inproc_n10() {
    let world = maze().unwrap();
    let algorithm = Algorithm::AStar(&ManhattanHeuristic);
    let first = search(world.graph(), world.start(), world.goal(), algorithm, SearchOptions::traced())
        .unwrap();
    let first_bytes = first.trace.as_ref().unwrap().to_canonical_json_bytes().unwrap();

    for _ in 1..10 {
        let again = search(world.graph(), world.start(), world.goal(), algorithm, SearchOptions::traced())
            .unwrap();
        let bytes = again.trace.as_ref().unwrap().to_canonical_json_bytes().unwrap();
        assert_eq!(first_bytes, bytes, "trace bytes differ between runs");
        assert_eq!(first.path, again.path);
    }
}

#[test]
fn fresh_world_instances_produce_identical_reports() {
    let a = run_world(&maze().unwrap(), Algorithm::Dijkstra, None).unwrap();
    let b = run_world(&maze().unwrap(), Algorithm::Dijkstra, None).unwrap();
    assert_eq!(a.digest().unwrap(), b.digest().unwrap());
    assert_eq!(a.graph_digest, b.graph_digest);
    assert_eq!(a.trace_digest, b.trace_digest);
}

#[test]
fn fixture_lines_are_stable_in_process() {
    assert_eq!(lock_tests::fixture_lines(), lock_tests::fixture_lines());
}

#[test]
fn stepper_events_equal_one_shot_trace() {
    let world = maze().unwrap();
    let algorithm = Algorithm::AStar(&ManhattanHeuristic);
    let one_shot = search(world.graph(), world.start(), world.goal(), algorithm, SearchOptions::traced())
        .unwrap()
        .trace
        .unwrap();

    let stepper = SearchStepper::new(
        world.graph(),
        world.start(),
        world.goal(),
        algorithm,
        SearchOptions::default(),
    )
    .unwrap();
    let stepped: Vec<SearchEvent> = stepper.map(Result::unwrap).collect();
    assert_eq!(stepped, one_shot.events);
}

#[test]
fn reopening_world_locks_activation_order_and_cost() {
    let world = ReopeningWorld::new().unwrap();
    let outcome = search(
        world.graph(),
        world.start(),
        world.goal(),
        Algorithm::AStar(world.heuristic()),
        SearchOptions::traced(),
    )
    .unwrap();
    assert_eq!(outcome.status, SearchStatus::Succeeded);
    assert_eq!(
        outcome.termination,
        TerminationReason::GoalReached {
            goal: reopening::GOAL
        }
    );
    assert!((outcome.total_cost().unwrap() - reopening::SHORTEST_COST).abs() < 1e-12);
    assert_eq!(
        outcome.path.unwrap().nodes(),
        vec![reopening::VIA_B, reopening::JUNCTION, reopening::GOAL]
    );
    assert_eq!(outcome.stats.nodes_reopened, 1);

    let trace = outcome.trace.unwrap();
    let order: Vec<u32> = trace.activation_order().iter().map(|n| n.0).collect();
    assert_eq!(order, vec![0, 1, 3, 2, 3, 4]);
    assert_eq!(trace.reopen_count(), 1);
}

#[test]
fn scenario_reports_are_stable_across_parses() {
    let raw = br#"{
        "schema_version": "scenario.v1",
        "scenario_id": "corridor",
        "map": ["....#", ".##.#", "....."],
        "start": [0, 0],
        "goal": [4, 2],
        "algorithm": "astar",
        "heuristic": {"kind": "manhattan"}
    }"#;
    let first = run_scenario(&ScenarioV1::from_json_bytes(raw).unwrap()).unwrap();
    let second = run_scenario(&ScenarioV1::from_json_bytes(raw).unwrap()).unwrap();
    assert_eq!(first.digest().unwrap(), second.digest().unwrap());
    assert_eq!(first.total_cost, Some(6.0));

    let comparison = compare_algorithms(&ScenarioV1::from_json_bytes(raw).unwrap()).unwrap();
    assert!(comparison.costs_agree());
    assert!(comparison.expansions_saved() >= 0);
    assert_ne!(comparison.dijkstra.trace_digest, comparison.astar.trace_digest);
}
