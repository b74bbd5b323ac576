//! Node record store: the sole mutable copy of every record in one search.
//!
//! Records live in a flat slot per node id, so lookup is O(1) and iteration
//! is in node-id order. Frontier and closed set only track membership; they
//! never hold a second copy of a record.

use tilepath_kernel::graph::NodeId;

use crate::error::SearchError;
use crate::record::NodeRecord;

#[derive(Debug, Clone, Default)]
pub struct NodeRecordStore {
    slots: Vec<Option<NodeRecord>>,
    len: usize,
}

impl NodeRecordStore {
    /// A store sized for node ids `0..node_count`.
    #[must_use]
    pub fn with_capacity(node_count: usize) -> Self {
        Self {
            slots: vec![None; node_count],
            len: 0,
        }
    }

    #[must_use]
    pub fn get(&self, node: NodeId) -> Option<&NodeRecord> {
        self.slots.get(node.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, node: NodeId) -> Option<&mut NodeRecord> {
        self.slots.get_mut(node.index()).and_then(Option::as_mut)
    }

    /// Store a record for a node that has none yet.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedRecord`] if the node already has a record
    /// (a duplicate would break the one-record-per-node invariant).
    pub fn insert(&mut self, record: NodeRecord) -> Result<(), SearchError> {
        let index = record.node.index();
        if index >= self.slots.len() {
            self.slots.resize(index + 1, None);
        }
        let slot = &mut self.slots[index];
        if slot.is_some() {
            return Err(SearchError::MalformedRecord {
                detail: format!("duplicate record for {}", record.node),
            });
        }
        *slot = Some(record);
        self.len += 1;
        Ok(())
    }

    /// Number of records created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// All records in node-id order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeRecord> {
        self.slots.iter().filter_map(Option::as_ref)
    }
}
