//! Engine property locks over generated grids: optimality against an
//! independent shortest-path oracle, A* and Dijkstra agreement, event-trace
//! shape, and path consistency.

use tilepath_kernel::graph::grid::GridGraph;
use tilepath_kernel::graph::{NodeId, TileGraph};
use tilepath_search::event::{SearchEvent, SearchStatus};
use tilepath_search::heuristic::{CrossProductHeuristic, ManhattanHeuristic};
use tilepath_search::policy::{Algorithm, SearchOptions};
use tilepath_search::search::search;

/// Deterministic generator so every run checks the same grids.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, bound: u64) -> u64 {
        self.next() % bound
    }
}

struct Case {
    grid: GridGraph,
    start: NodeId,
    goal: NodeId,
}

/// Random grid with roughly a quarter of the tiles walled; corners stay open.
fn generate(rng: &mut Lcg) -> Case {
    let width = 4 + rng.below(6) as u32;
    let height = 3 + rng.below(5) as u32;
    let spacing = [1.0, 0.5, 2.0][rng.below(3) as usize];
    let rows: Vec<String> = (0..height)
        .map(|y| {
            (0..width)
                .map(|x| {
                    let corner = (x, y) == (0, 0) || (x, y) == (width - 1, height - 1);
                    if !corner && rng.below(4) == 0 {
                        '#'
                    } else {
                        '.'
                    }
                })
                .collect()
        })
        .collect();
    let grid = GridGraph::from_ascii(rows.as_slice(), spacing).unwrap();
    let start = grid.node_at(0, 0).unwrap();
    let goal = grid.node_at(width - 1, height - 1).unwrap();
    Case { grid, start, goal }
}

/// Bellman-Ford distances from `start`; `None` for unreachable nodes.
fn oracle_distance(graph: &dyn TileGraph, start: NodeId, goal: NodeId) -> Option<f64> {
    let n = graph.node_count();
    let mut dist = vec![f64::INFINITY; n];
    dist[start.index()] = 0.0;
    for _ in 0..n {
        let mut changed = false;
        for from in 0..n {
            let node = NodeId(u32::try_from(from).unwrap());
            if !graph.contains(node) || dist[from].is_infinite() {
                continue;
            }
            for connection in graph.connections(node) {
                let candidate = dist[from] + connection.cost;
                if candidate < dist[connection.to.index()] {
                    dist[connection.to.index()] = candidate;
                    changed = true;
                }
            }
        }
        if !changed {
            break;
        }
    }
    let d = dist[goal.index()];
    d.is_finite().then_some(d)
}

fn assert_close(a: f64, b: f64, context: &str) {
    assert!((a - b).abs() <= 1e-9, "{context}: {a} != {b}");
}

#[test]
fn dijkstra_matches_oracle_on_generated_grids() {
    let mut rng = Lcg(0x5eed);
    for case_index in 0..60 {
        let case = generate(&mut rng);
        let outcome = search(
            &case.grid,
            case.start,
            case.goal,
            Algorithm::Dijkstra,
            SearchOptions::default(),
        )
        .unwrap();
        match oracle_distance(&case.grid, case.start, case.goal) {
            Some(expected) => {
                assert_eq!(outcome.status, SearchStatus::Succeeded, "case {case_index}");
                assert_close(outcome.total_cost().unwrap(), expected, "dijkstra cost");
            }
            None => {
                assert_eq!(outcome.status, SearchStatus::Failed, "case {case_index}");
                assert!(outcome.path.is_none());
            }
        }
    }
}

#[test]
fn astar_manhattan_agrees_with_dijkstra_and_expands_no_more() {
    let mut rng = Lcg(0xa57a);
    for case_index in 0..60 {
        let case = generate(&mut rng);
        let dijkstra = search(
            &case.grid,
            case.start,
            case.goal,
            Algorithm::Dijkstra,
            SearchOptions::default(),
        )
        .unwrap();
        let astar = search(
            &case.grid,
            case.start,
            case.goal,
            Algorithm::AStar(&ManhattanHeuristic),
            SearchOptions::default(),
        )
        .unwrap();
        assert_eq!(dijkstra.status, astar.status, "case {case_index}");
        if let (Some(d), Some(a)) = (dijkstra.total_cost(), astar.total_cost()) {
            assert_close(a, d, "astar cost");
        }
        assert!(
            astar.stats.nodes_expanded <= dijkstra.stats.nodes_expanded,
            "case {case_index}: astar expanded {} > dijkstra {}",
            astar.stats.nodes_expanded,
            dijkstra.stats.nodes_expanded
        );
        assert_eq!(astar.stats.nodes_reopened, 0, "manhattan is consistent on grids");
    }
}

#[test]
fn cross_product_tiebreak_finds_a_path_whenever_one_exists() {
    let mut rng = Lcg(0xc055);
    let heuristic = CrossProductHeuristic::default();
    for case_index in 0..40 {
        let case = generate(&mut rng);
        let outcome = search(
            &case.grid,
            case.start,
            case.goal,
            Algorithm::AStar(&heuristic),
            SearchOptions::default(),
        )
        .unwrap();
        let expected = oracle_distance(&case.grid, case.start, case.goal);
        assert_eq!(outcome.is_success(), expected.is_some(), "case {case_index}");
    }
}

#[test]
fn activation_keys_never_decrease_under_consistent_heuristics() {
    let mut rng = Lcg(0x0bde);
    for _ in 0..30 {
        let case = generate(&mut rng);
        for algorithm in [Algorithm::Dijkstra, Algorithm::AStar(&ManhattanHeuristic)] {
            let outcome = search(
                &case.grid,
                case.start,
                case.goal,
                algorithm,
                SearchOptions::traced(),
            )
            .unwrap();
            let trace = outcome.trace.unwrap();
            let mut last = f64::NEG_INFINITY;
            for event in &trace.events {
                if let SearchEvent::NodeActivated {
                    estimated_total_cost,
                    ..
                } = event
                {
                    assert!(*estimated_total_cost >= last - 1e-9);
                    last = *estimated_total_cost;
                }
            }
        }
    }
}

#[test]
fn trace_has_exactly_one_terminal_event_at_the_end() {
    let mut rng = Lcg(0x7e12);
    for _ in 0..30 {
        let case = generate(&mut rng);
        let outcome = search(
            &case.grid,
            case.start,
            case.goal,
            Algorithm::AStar(&ManhattanHeuristic),
            SearchOptions::traced(),
        )
        .unwrap();
        let trace = outcome.trace.unwrap();
        let terminal_count = trace.events.iter().filter(|e| e.is_terminal()).count();
        assert_eq!(terminal_count, 1);
        assert!(trace.events.last().unwrap().is_terminal());
        let closed = trace
            .events
            .iter()
            .filter(|e| matches!(e, SearchEvent::NodeClosed { .. }))
            .count();
        assert_eq!(u64::try_from(closed).unwrap(), outcome.stats.nodes_expanded);
    }
}

#[test]
fn found_paths_follow_real_edges_and_sum_to_total_cost() {
    let mut rng = Lcg(0x9a7d);
    for _ in 0..40 {
        let case = generate(&mut rng);
        let outcome = search(
            &case.grid,
            case.start,
            case.goal,
            Algorithm::AStar(&ManhattanHeuristic),
            SearchOptions::default(),
        )
        .unwrap();
        let Some(path) = outcome.path else {
            continue;
        };
        assert_eq!(path.start(), case.start);
        assert_eq!(path.goal(), case.goal);

        let mut previous = case.start;
        let mut sum = 0.0;
        for step in path.iter() {
            let edge = case
                .grid
                .connections(previous)
                .iter()
                .find(|c| c.to == step.node)
                .unwrap_or_else(|| panic!("no edge {previous} -> {}", step.node));
            sum += edge.cost;
            assert_close(step.cost_so_far, sum, "cost_so_far");
            previous = step.node;
        }
        assert_close(path.total_cost(), sum, "total_cost");
    }
}

#[test]
fn popping_a_path_walks_from_start_to_goal() {
    let grid = GridGraph::new(4, 1, 1.0).unwrap();
    let start = grid.node_at(0, 0).unwrap();
    let goal = grid.node_at(3, 0).unwrap();
    let outcome = search(&grid, start, goal, Algorithm::Dijkstra, SearchOptions::default()).unwrap();
    let mut path = outcome.path.unwrap();
    let mut popped = Vec::new();
    while let Some(step) = path.pop() {
        popped.push(step.node.0);
    }
    assert_eq!(popped, vec![1, 2, 3]);
    assert!(path.is_empty());
}
