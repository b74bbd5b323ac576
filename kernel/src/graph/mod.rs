//! Graph model: node identities, planar positions, and weighted connections.
//!
//! The search never owns a graph. It borrows one through [`TileGraph`] for the
//! duration of a single invocation and reads it only.

pub mod adjacency;
pub mod grid;

/// Opaque identity of a traversable node.
///
/// Identities are dense: a graph with `n` nodes uses ids `0..n`. Two requests
/// for the same node always produce equal ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub u32);

impl NodeId {
    /// The id as a slice index.
    #[must_use]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl std::fmt::Display for NodeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "n{}", self.0)
    }
}

/// Planar coordinates of a node. Only heuristics look at these.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// A directed edge to `to` with a non-negative traversal cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Connection {
    pub to: NodeId,
    pub cost: f64,
}

impl Connection {
    #[must_use]
    pub const fn new(to: NodeId, cost: f64) -> Self {
        Self { to, cost }
    }
}

/// The graph collaborator contract.
///
/// # Contract
///
/// - Node ids are dense in `0..node_count()`; `contains` may still reject ids in
///   that range (e.g. wall tiles of a grid).
/// - `connections` is O(1) per node and stable for the lifetime of the borrow.
///   Nodes outside the graph have no connections.
/// - Every connection targets a node for which `contains` is true, with a finite
///   cost `>= 0`. The search reports a violation as a fault rather than
///   guessing.
/// - `position` is `Some` for every contained node.
pub trait TileGraph {
    /// Upper bound (exclusive) of node ids.
    fn node_count(&self) -> usize;

    /// Whether `node` is a traversable part of this graph.
    fn contains(&self, node: NodeId) -> bool;

    /// Planar position of `node`, `None` when it is not part of the graph.
    fn position(&self, node: NodeId) -> Option<Position>;

    /// Outgoing connections of `node` in a deterministic order.
    fn connections(&self, node: NodeId) -> &[Connection];
}

impl<G: TileGraph + ?Sized> TileGraph for &G {
    fn node_count(&self) -> usize {
        (**self).node_count()
    }

    fn contains(&self, node: NodeId) -> bool {
        (**self).contains(node)
    }

    fn position(&self, node: NodeId) -> Option<Position> {
        (**self).position(node)
    }

    fn connections(&self, node: NodeId) -> &[Connection] {
        (**self).connections(node)
    }
}

/// Why a graph could not be built.
#[derive(Debug, Clone, PartialEq)]
pub enum GraphBuildError {
    /// An edge endpoint is not a node of the graph.
    UnknownNode { node: NodeId },
    /// An edge cost is negative, NaN or infinite.
    InvalidCost { from: NodeId, to: NodeId, cost: f64 },
    /// Grid spacing must be finite and strictly positive.
    InvalidSpacing { spacing: f64 },
    /// The ASCII map is empty or its rows have different widths.
    MalformedMap { detail: String },
    /// Too many nodes to be addressed by a `u32` id.
    TooManyNodes { count: usize },
}

impl std::fmt::Display for GraphBuildError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownNode { node } => write!(f, "edge references unknown node {node}"),
            Self::InvalidCost { from, to, cost } => {
                write!(f, "edge {from} -> {to} has invalid cost {cost}")
            }
            Self::InvalidSpacing { spacing } => write!(f, "invalid grid spacing {spacing}"),
            Self::MalformedMap { detail } => write!(f, "malformed map: {detail}"),
            Self::TooManyNodes { count } => write!(f, "{count} nodes exceed the u32 id space"),
        }
    }
}

impl std::error::Error for GraphBuildError {}

pub(crate) fn valid_cost(cost: f64) -> bool {
    cost.is_finite() && cost >= 0.0
}

pub(crate) fn node_id_for(index: usize) -> Result<NodeId, GraphBuildError> {
    u32::try_from(index)
        .map(NodeId)
        .map_err(|_| GraphBuildError::TooManyNodes { count: index + 1 })
}
