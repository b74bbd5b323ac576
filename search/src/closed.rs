//! Closed set: nodes whose outgoing connections have all been examined.
//!
//! Membership only; the record itself stays in the
//! [`crate::store::NodeRecordStore`], so re-opening never duplicates it.

use std::collections::BTreeSet;

use tilepath_kernel::graph::NodeId;

#[derive(Debug, Clone, Default)]
pub struct ClosedSet {
    members: BTreeSet<NodeId>,
}

impl ClosedSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mark `node` as fully expanded. Returns `false` if it already was.
    pub fn add(&mut self, node: NodeId) -> bool {
        self.members.insert(node)
    }

    /// Take `node` out for re-opening. Returns `false` if it was not closed.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.members.remove(&node)
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains(&node)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Closed nodes in node-id order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.iter().copied()
    }
}
