//! Uniform 4-connected tile grid.
//!
//! Tile `(x, y)` has id `y * width + x` and sits at position
//! `(x * spacing, y * spacing)`. Every edge between orthogonal neighbours costs
//! `spacing`, so Manhattan distance over positions is an admissible estimate.

use std::collections::BTreeSet;

use super::{node_id_for, Connection, GraphBuildError, NodeId, Position, TileGraph};

/// Neighbour offsets in connection order: east, south, west, north.
const OFFSETS: [(i64, i64); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// Wall character in ASCII maps. Every other character is floor.
pub const WALL: char = '#';

/// A rectangular grid of tiles with optional walls and cut edges.
#[derive(Debug, Clone)]
pub struct GridGraph {
    width: u32,
    height: u32,
    spacing: f64,
    walls: Vec<bool>,
    cut: BTreeSet<(NodeId, NodeId)>,
    adjacency: Vec<Vec<Connection>>,
}

impl GridGraph {
    /// An open `width` × `height` grid.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError::InvalidSpacing`] unless `spacing` is finite and
    /// positive, and [`GraphBuildError::TooManyNodes`] if the tile count does not
    /// fit a `u32` id.
    pub fn new(width: u32, height: u32, spacing: f64) -> Result<Self, GraphBuildError> {
        if !(spacing.is_finite() && spacing > 0.0) {
            return Err(GraphBuildError::InvalidSpacing { spacing });
        }
        let len = width as usize * height as usize;
        if len > 0 {
            node_id_for(len - 1)?;
        }
        let mut grid = Self {
            width,
            height,
            spacing,
            walls: vec![false; len],
            cut: BTreeSet::new(),
            adjacency: Vec::new(),
        };
        grid.rebuild();
        Ok(grid)
    }

    /// Parse a grid from ASCII rows. `#` is a wall, anything else is floor.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError::MalformedMap`] if there are no rows, a row is
    /// empty, or rows differ in width, plus the errors of [`GridGraph::new`].
    pub fn from_ascii<S: AsRef<str>>(rows: &[S], spacing: f64) -> Result<Self, GraphBuildError> {
        let Some(first) = rows.first() else {
            return Err(GraphBuildError::MalformedMap {
                detail: "map has no rows".into(),
            });
        };
        let width = first.as_ref().chars().count();
        if width == 0 {
            return Err(GraphBuildError::MalformedMap {
                detail: "map rows are empty".into(),
            });
        }
        for (y, row) in rows.iter().enumerate() {
            let w = row.as_ref().chars().count();
            if w != width {
                return Err(GraphBuildError::MalformedMap {
                    detail: format!("row {y} has width {w}, expected {width}"),
                });
            }
        }
        let too_many = |_| GraphBuildError::TooManyNodes {
            count: width.saturating_mul(rows.len()),
        };
        let w = u32::try_from(width).map_err(too_many)?;
        let h = u32::try_from(rows.len()).map_err(too_many)?;

        let mut grid = Self::new(w, h, spacing)?;
        for (y, row) in rows.iter().enumerate() {
            for (x, ch) in row.as_ref().chars().enumerate() {
                if ch == WALL {
                    grid.walls[y * width + x] = true;
                }
            }
        }
        grid.rebuild();
        Ok(grid)
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Distance between neighbouring tiles, also the cost of every edge.
    #[must_use]
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    /// Id of tile `(x, y)`, `None` outside the grid. Walls still have ids.
    #[must_use]
    pub fn node_at(&self, x: u32, y: u32) -> Option<NodeId> {
        if x >= self.width || y >= self.height {
            return None;
        }
        // In range by construction: new() checked width * height fits a u32.
        Some(NodeId(y * self.width + x))
    }

    /// Tile coordinates of `node`, `None` outside the grid.
    #[must_use]
    pub fn cell_of(&self, node: NodeId) -> Option<(u32, u32)> {
        if node.index() >= self.walls.len() {
            return None;
        }
        Some((node.0 % self.width, node.0 / self.width))
    }

    /// Whether tile `(x, y)` is a wall. Out-of-grid tiles count as walls.
    #[must_use]
    pub fn is_wall(&self, x: u32, y: u32) -> bool {
        self.node_at(x, y).map_or(true, |n| self.walls[n.index()])
    }

    /// Turn tile `(x, y)` into a wall, dropping every edge that touches it.
    /// Returns `false` if the tile is outside the grid.
    pub fn set_wall(&mut self, x: u32, y: u32) -> bool {
        let Some(node) = self.node_at(x, y) else {
            return false;
        };
        self.walls[node.index()] = true;
        self.rebuild();
        true
    }

    /// Remove the edges between two tiles in both directions.
    /// Returns `false` if either tile is outside the grid.
    pub fn cut_between(&mut self, a: NodeId, b: NodeId) -> bool {
        if self.cell_of(a).is_none() || self.cell_of(b).is_none() {
            return false;
        }
        self.cut.insert((a, b));
        self.cut.insert((b, a));
        self.rebuild();
        true
    }

    /// Number of floor tiles.
    #[must_use]
    pub fn floor_count(&self) -> usize {
        self.walls.iter().filter(|w| !**w).count()
    }

    fn rebuild(&mut self) {
        let len = self.walls.len();
        let mut adjacency = vec![Vec::new(); len];
        for (index, edges) in adjacency.iter_mut().enumerate() {
            if self.walls[index] {
                continue;
            }
            let from = NodeId(u32::try_from(index).unwrap_or(u32::MAX));
            let (x, y) = (i64::from(from.0 % self.width), i64::from(from.0 / self.width));
            for (dx, dy) in OFFSETS {
                let (nx, ny) = (x + dx, y + dy);
                let (Ok(nx), Ok(ny)) = (u32::try_from(nx), u32::try_from(ny)) else {
                    continue;
                };
                let Some(to) = self.node_at(nx, ny) else {
                    continue;
                };
                if self.walls[to.index()] || self.cut.contains(&(from, to)) {
                    continue;
                }
                edges.push(Connection::new(to, self.spacing));
            }
        }
        self.adjacency = adjacency;
    }
}

impl TileGraph for GridGraph {
    fn node_count(&self) -> usize {
        self.walls.len()
    }

    fn contains(&self, node: NodeId) -> bool {
        self.walls.get(node.index()).is_some_and(|wall| !wall)
    }

    fn position(&self, node: NodeId) -> Option<Position> {
        if !self.contains(node) {
            return None;
        }
        let (x, y) = self.cell_of(node)?;
        Some(Position::new(
            f64::from(x) * self.spacing,
            f64::from(y) * self.spacing,
        ))
    }

    fn connections(&self, node: NodeId) -> &[Connection] {
        self.adjacency.get(node.index()).map_or(&[], Vec::as_slice)
    }
}
