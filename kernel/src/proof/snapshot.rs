//! Graph snapshots: a canonical JSON projection of a [`TileGraph`] and its digest.
//!
//! A snapshot binds a search result to the exact graph it ran on. Two graphs
//! with the same nodes, positions and connections (in the same order) have the
//! same digest regardless of their concrete type.

use crate::graph::{NodeId, TileGraph};

use super::canon::{canonical_json_bytes, CanonError};
use super::hash::{canonical_hash, ContentHash, HashDomain};

/// Canonical JSON value of every contained node with its position and
/// outgoing connections, ordered by node id.
#[must_use]
pub fn graph_snapshot_value<G: TileGraph + ?Sized>(graph: &G) -> serde_json::Value {
    let nodes: Vec<serde_json::Value> = (0..graph.node_count())
        .filter_map(|index| u32::try_from(index).ok().map(NodeId))
        .filter(|&node| graph.contains(node))
        .map(|node| {
            let connections: Vec<serde_json::Value> = graph
                .connections(node)
                .iter()
                .map(|c| serde_json::json!({"cost": c.cost, "to": c.to.0}))
                .collect();
            let position = graph
                .position(node)
                .map(|p| serde_json::json!([p.x, p.y]));
            serde_json::json!({
                "connections": connections,
                "id": node.0,
                "position": position,
            })
        })
        .collect();
    serde_json::json!({
        "node_count": graph.node_count(),
        "nodes": nodes,
    })
}

/// Digest of [`graph_snapshot_value`] under [`HashDomain::GraphSnapshot`].
///
/// # Errors
///
/// Returns [`CanonError`] if the graph carries a non-finite cost or position.
pub fn graph_digest<G: TileGraph + ?Sized>(graph: &G) -> Result<ContentHash, CanonError> {
    let bytes = canonical_json_bytes(&graph_snapshot_value(graph))?;
    Ok(canonical_hash(HashDomain::GraphSnapshot, &bytes))
}
