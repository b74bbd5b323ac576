//! `ReopeningWorld`: a five-node graph whose paired heuristic forces a closed
//! node back onto the frontier.
//!
//! ```text
//!        1.0        3.0
//!   S ───────▶ A ───────▶ C ──10.0──▶ G
//!   │                     ▲
//!   └──1.0──▶ B ──1.0─────┘
//! ```
//!
//! [`NodeTableHeuristic`] scores B at 8 and everything else at 0. B still
//! never overestimates (its true remaining cost is 11) but the estimate is
//! inconsistent, so A* closes C via A (cost 4) before B reveals the cost-2
//! route and C is re-opened.

use tilepath_kernel::graph::adjacency::AdjacencyGraph;
use tilepath_kernel::graph::{NodeId, Position, TileGraph};
use tilepath_search::heuristic::Heuristic;

use crate::contract::{SearchWorldV1, WorldError};

pub const START: NodeId = NodeId(0);
pub const VIA_A: NodeId = NodeId(1);
pub const VIA_B: NodeId = NodeId(2);
pub const JUNCTION: NodeId = NodeId(3);
pub const GOAL: NodeId = NodeId(4);

/// Cost of the shortest route S → B → C → G.
pub const SHORTEST_COST: f64 = 12.0;

/// Heuristic looked up by node: node `i` sits at `x = i`, and its estimate is
/// `table[i]` (0 for nodes outside the table).
#[derive(Debug, Clone)]
pub struct NodeTableHeuristic {
    table: Vec<f64>,
}

impl NodeTableHeuristic {
    #[must_use]
    pub fn new(table: Vec<f64>) -> Self {
        Self { table }
    }
}

impl Heuristic for NodeTableHeuristic {
    fn estimate(&self, _start: Position, candidate: Position, _goal: Position) -> f64 {
        if !(candidate.x.is_finite() && candidate.x >= 0.0) {
            return 0.0;
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let index = candidate.x as usize;
        self.table.get(index).copied().unwrap_or(0.0)
    }

    fn is_admissible(&self) -> bool {
        false
    }

    fn name(&self) -> &'static str {
        "node_table"
    }
}

#[derive(Debug, Clone)]
pub struct ReopeningWorld {
    graph: AdjacencyGraph,
    heuristic: NodeTableHeuristic,
}

impl ReopeningWorld {
    /// # Errors
    ///
    /// Never fails for the fixed edge list; the `Result` mirrors the graph builder.
    pub fn new() -> Result<Self, WorldError> {
        let mut builder = AdjacencyGraph::builder();
        for i in 0..5u32 {
            builder.add_node(Position::new(f64::from(i), 0.0))?;
        }
        builder
            .add_edge(START, VIA_A, 1.0)
            .add_edge(START, VIA_B, 1.0)
            .add_edge(VIA_A, JUNCTION, 3.0)
            .add_edge(VIA_B, JUNCTION, 1.0)
            .add_edge(JUNCTION, GOAL, 10.0);
        Ok(Self {
            graph: builder.build()?,
            heuristic: NodeTableHeuristic::new(vec![0.0, 0.0, 8.0, 0.0, 0.0]),
        })
    }

    /// The heuristic that triggers re-opening under A*.
    #[must_use]
    pub fn heuristic(&self) -> &NodeTableHeuristic {
        &self.heuristic
    }
}

impl SearchWorldV1 for ReopeningWorld {
    #[allow(clippy::unnecessary_literal_bound)]
    fn world_id(&self) -> &str {
        "reopening"
    }

    fn graph(&self) -> &dyn TileGraph {
        &self.graph
    }

    fn start(&self) -> NodeId {
        START
    }

    fn goal(&self) -> NodeId {
        GOAL
    }
}
