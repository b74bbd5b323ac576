//! Explicit adjacency-list graph with per-edge costs.

use super::{node_id_for, valid_cost, Connection, GraphBuildError, NodeId, Position, TileGraph};

/// A graph of positioned nodes and directed, individually weighted edges.
///
/// Built through [`AdjacencyGraphBuilder`], which validates every edge once so
/// the search can rely on the [`TileGraph`] contract.
#[derive(Debug, Clone)]
pub struct AdjacencyGraph {
    positions: Vec<Position>,
    adjacency: Vec<Vec<Connection>>,
}

impl AdjacencyGraph {
    #[must_use]
    pub fn builder() -> AdjacencyGraphBuilder {
        AdjacencyGraphBuilder::default()
    }

    /// Total number of directed edges.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.adjacency.iter().map(Vec::len).sum()
    }
}

impl TileGraph for AdjacencyGraph {
    fn node_count(&self) -> usize {
        self.positions.len()
    }

    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.positions.len()
    }

    fn position(&self, node: NodeId) -> Option<Position> {
        self.positions.get(node.index()).copied()
    }

    fn connections(&self, node: NodeId) -> &[Connection] {
        self.adjacency.get(node.index()).map_or(&[], Vec::as_slice)
    }
}

/// Incremental builder for [`AdjacencyGraph`].
///
/// Edges keep insertion order, which is the order the search visits them.
#[derive(Debug, Clone, Default)]
pub struct AdjacencyGraphBuilder {
    positions: Vec<Position>,
    edges: Vec<(NodeId, NodeId, f64)>,
}

impl AdjacencyGraphBuilder {
    /// Add a node at `position` and return its id.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError::TooManyNodes`] once the `u32` id space is used up.
    pub fn add_node(&mut self, position: Position) -> Result<NodeId, GraphBuildError> {
        let id = node_id_for(self.positions.len())?;
        self.positions.push(position);
        Ok(id)
    }

    /// Add a directed edge. Validation happens in [`AdjacencyGraphBuilder::build`].
    pub fn add_edge(&mut self, from: NodeId, to: NodeId, cost: f64) -> &mut Self {
        self.edges.push((from, to, cost));
        self
    }

    /// Add edges in both directions with the same cost.
    pub fn add_undirected(&mut self, a: NodeId, b: NodeId, cost: f64) -> &mut Self {
        self.add_edge(a, b, cost);
        self.add_edge(b, a, cost)
    }

    /// Validate all edges and freeze the graph.
    ///
    /// # Errors
    ///
    /// Returns [`GraphBuildError::UnknownNode`] for an edge endpoint that was
    /// never added and [`GraphBuildError::InvalidCost`] for a negative or
    /// non-finite cost.
    pub fn build(&self) -> Result<AdjacencyGraph, GraphBuildError> {
        let mut adjacency = vec![Vec::new(); self.positions.len()];
        for &(from, to, cost) in &self.edges {
            for node in [from, to] {
                if node.index() >= self.positions.len() {
                    return Err(GraphBuildError::UnknownNode { node });
                }
            }
            if !valid_cost(cost) {
                return Err(GraphBuildError::InvalidCost { from, to, cost });
            }
            adjacency[from.index()].push(Connection::new(to, cost));
        }
        Ok(AdjacencyGraph {
            positions: self.positions.clone(),
            adjacency,
        })
    }
}
