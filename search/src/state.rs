//! `SearchState`: frontier, closed set and record store of one search.
//!
//! Owned by exactly one [`crate::search::SearchStepper`] and dropped with it.
//! Every membership change goes through this type so the three parts cannot
//! disagree: a node is open, closed, or neither, and has at most one record.

use tilepath_kernel::graph::NodeId;

use crate::closed::ClosedSet;
use crate::error::SearchError;
use crate::frontier::Frontier;
use crate::record::NodeRecord;
use crate::store::NodeRecordStore;

#[derive(Debug, Default)]
pub struct SearchState {
    records: NodeRecordStore,
    frontier: Frontier,
    closed: ClosedSet,
}

impl SearchState {
    /// Empty state with record slots for `node_count` nodes.
    #[must_use]
    pub fn new(node_count: usize) -> Self {
        Self {
            records: NodeRecordStore::with_capacity(node_count),
            frontier: Frontier::new(),
            closed: ClosedSet::new(),
        }
    }

    #[must_use]
    pub fn records(&self) -> &NodeRecordStore {
        &self.records
    }

    #[must_use]
    pub fn frontier(&self) -> &Frontier {
        &self.frontier
    }

    #[must_use]
    pub fn closed(&self) -> &ClosedSet {
        &self.closed
    }

    /// The record of an open node.
    #[must_use]
    pub fn find_open(&self, node: NodeId) -> Option<&NodeRecord> {
        if self.frontier.contains(node) {
            self.records.get(node)
        } else {
            None
        }
    }

    /// The record of a closed node.
    #[must_use]
    pub fn find_closed(&self, node: NodeId) -> Option<&NodeRecord> {
        if self.closed.contains(node) {
            self.records.get(node)
        } else {
            None
        }
    }

    /// Any record of `node`, whether open, closed, or currently being expanded.
    #[must_use]
    pub fn record(&self, node: NodeId) -> Option<&NodeRecord> {
        self.records.get(node)
    }

    /// Add a brand-new record to the frontier.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedRecord`] if the node already has a record.
    pub fn open_new(&mut self, record: NodeRecord) -> Result<(), SearchError> {
        let node = record.node;
        self.records.insert(record)?;
        if let Some(stored) = self.records.get(node) {
            self.frontier.insert(stored);
        }
        Ok(())
    }

    /// Apply a cheaper route to an existing record and make sure it is open.
    ///
    /// A closed record is moved back to the frontier (re-opening); an open
    /// record keeps its place and gets a lower key. Returns `true` if the node
    /// was re-opened from the closed set.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedRecord`] if the node has no record.
    pub fn improve(
        &mut self,
        node: NodeId,
        cost_so_far: f64,
        predecessor: NodeId,
    ) -> Result<bool, SearchError> {
        let record = self
            .records
            .get_mut(node)
            .ok_or_else(|| SearchError::MalformedRecord {
                detail: format!("improving {node} which has no record"),
            })?;
        record.improve(cost_so_far, predecessor);
        let reopened = self.closed.remove(node);
        self.frontier.insert(record);
        Ok(reopened)
    }

    /// Pop the best open node and return a copy of its record.
    ///
    /// # Errors
    ///
    /// Returns [`SearchError::MalformedRecord`] if the frontier holds a node
    /// without a record.
    pub fn extract_min(&mut self) -> Result<Option<NodeRecord>, SearchError> {
        let Some(node) = self.frontier.extract_min() else {
            return Ok(None);
        };
        self.records
            .get(node)
            .cloned()
            .map(Some)
            .ok_or_else(|| SearchError::MalformedRecord {
                detail: format!("open node {node} has no record"),
            })
    }

    /// Move an expanded node to the closed set.
    pub fn close(&mut self, node: NodeId) {
        self.frontier.remove(node);
        self.closed.add(node);
    }
}
