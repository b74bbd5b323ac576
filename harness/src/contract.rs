//! World contract: the minimal trait a world must implement.
//!
//! A world is a graph plus a start and a goal. Worlds do not run searches,
//! hash anything or build reports; those are runner concerns.

use tilepath_kernel::graph::{GraphBuildError, NodeId, TileGraph};

/// Typed failure while assembling a world.
#[derive(Debug, Clone, PartialEq)]
pub enum WorldError {
    /// The graph itself could not be built.
    Graph(GraphBuildError),
    /// A start or goal cell lies outside the grid.
    CellOutOfBounds { role: &'static str, x: u32, y: u32 },
    /// A start or goal cell is a wall.
    CellIsWall { role: &'static str, x: u32, y: u32 },
}

impl From<GraphBuildError> for WorldError {
    fn from(e: GraphBuildError) -> Self {
        Self::Graph(e)
    }
}

impl std::fmt::Display for WorldError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Graph(e) => write!(f, "world graph: {e}"),
            Self::CellOutOfBounds { role, x, y } => {
                write!(f, "{role} cell ({x}, {y}) is outside the grid")
            }
            Self::CellIsWall { role, x, y } => write!(f, "{role} cell ({x}, {y}) is a wall"),
        }
    }
}

impl std::error::Error for WorldError {}

/// The contract a world must implement to be run by the harness runner.
pub trait SearchWorldV1 {
    /// Unique world identifier (e.g., `"open_3x3"`).
    fn world_id(&self) -> &str;

    /// The graph searched. Stable for the lifetime of the borrow.
    fn graph(&self) -> &dyn TileGraph;

    fn start(&self) -> NodeId;

    fn goal(&self) -> NodeId;

    /// Grid coordinates of `node`, for worlds laid out on a grid.
    fn cell_of(&self, _node: NodeId) -> Option<(u32, u32)> {
        None
    }
}
