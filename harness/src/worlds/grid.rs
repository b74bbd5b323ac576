//! `GridWorld`: a tile grid with start and goal cells, plus the grid fixtures.
//!
//! Fixtures:
//! - `open_3x3`: 3×3 grid without walls, (0,0) → (2,2). Shortest cost 4.
//! - `walled_3x3`: the same grid with column 1 walled off. No path.
//! - `maze`: [`MAZE_MAP`], (0,0) → (7,5).

use tilepath_kernel::graph::grid::GridGraph;
use tilepath_kernel::graph::{NodeId, TileGraph};

use crate::contract::{SearchWorldV1, WorldError};

/// ASCII map of the maze fixture. `#` is a wall.
pub const MAZE_MAP: [&str; 6] = [
    "..#.....",
    "..#.##..",
    "....#...",
    ".##.#.#.",
    "......#.",
    ".####...",
];

/// A grid plus resolved start and goal nodes.
#[derive(Debug, Clone)]
pub struct GridWorld {
    world_id: String,
    grid: GridGraph,
    start: NodeId,
    goal: NodeId,
}

impl GridWorld {
    /// # Errors
    ///
    /// Returns [`WorldError::CellOutOfBounds`] or [`WorldError::CellIsWall`]
    /// if start or goal is not a floor tile.
    pub fn new(
        world_id: impl Into<String>,
        grid: GridGraph,
        start: (u32, u32),
        goal: (u32, u32),
    ) -> Result<Self, WorldError> {
        let start = floor_node(&grid, "start", start)?;
        let goal = floor_node(&grid, "goal", goal)?;
        Ok(Self {
            world_id: world_id.into(),
            grid,
            start,
            goal,
        })
    }

    #[must_use]
    pub fn grid(&self) -> &GridGraph {
        &self.grid
    }
}

fn floor_node(grid: &GridGraph, role: &'static str, (x, y): (u32, u32)) -> Result<NodeId, WorldError> {
    let node = grid
        .node_at(x, y)
        .ok_or(WorldError::CellOutOfBounds { role, x, y })?;
    if grid.is_wall(x, y) {
        return Err(WorldError::CellIsWall { role, x, y });
    }
    Ok(node)
}

impl SearchWorldV1 for GridWorld {
    fn world_id(&self) -> &str {
        &self.world_id
    }

    fn graph(&self) -> &dyn TileGraph {
        &self.grid
    }

    fn start(&self) -> NodeId {
        self.start
    }

    fn goal(&self) -> NodeId {
        self.goal
    }

    fn cell_of(&self, node: NodeId) -> Option<(u32, u32)> {
        self.grid.cell_of(node)
    }
}

/// # Errors
///
/// Never fails for the fixed dimensions; the `Result` mirrors [`GridWorld::new`].
pub fn open_3x3() -> Result<GridWorld, WorldError> {
    GridWorld::new("open_3x3", GridGraph::new(3, 3, 1.0)?, (0, 0), (2, 2))
}

/// # Errors
///
/// Never fails for the fixed dimensions; the `Result` mirrors [`GridWorld::new`].
pub fn walled_3x3() -> Result<GridWorld, WorldError> {
    let grid = GridGraph::from_ascii(&[".#.", ".#.", ".#."], 1.0)?;
    GridWorld::new("walled_3x3", grid, (0, 0), (2, 2))
}

/// # Errors
///
/// Never fails for the fixed map; the `Result` mirrors [`GridWorld::new`].
pub fn maze() -> Result<GridWorld, WorldError> {
    let grid = GridGraph::from_ascii(&MAZE_MAP, 1.0)?;
    GridWorld::new("maze", grid, (0, 0), (7, 5))
}
