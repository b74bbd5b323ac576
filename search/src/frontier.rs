//! Best-first frontier (open set) with in-place key updates.
//!
//! A `BinaryHeap` gives O(log n) extraction. Decrease-key pushes a fresh heap
//! entry and bumps the member's version; superseded entries are skipped when
//! they surface. Membership uses a `BTreeMap` for deterministic iteration.
//!
//! Extraction order is identical to scanning an open list for the smallest
//! estimate with first-inserted-wins ties.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use tilepath_kernel::graph::NodeId;

use crate::record::{FrontierKey, NodeRecord};

#[derive(Debug)]
struct FrontierEntry {
    key: FrontierKey,
    node: NodeId,
    version: u64,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == std::cmp::Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.key
            .cmp(&other.key)
            .then(self.version.cmp(&other.version))
    }
}

#[derive(Debug, Clone, Copy)]
struct Member {
    key: FrontierKey,
    version: u64,
}

/// The open set.
///
/// Maintains:
/// - A `BinaryHeap` (min-ordered via `Reverse`) of possibly stale entries
/// - A `BTreeMap` of live members with their current key and version
/// - A high-water mark of the live size
#[derive(Debug, Default)]
pub struct Frontier {
    heap: BinaryHeap<Reverse<FrontierEntry>>,
    members: BTreeMap<NodeId, Member>,
    next_sequence: u64,
    next_version: u64,
    high_water: u64,
}

impl Frontier {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `record`, or update its key in place if it is already open.
    ///
    /// Returns `true` if the node was not open before.
    pub fn insert(&mut self, record: &NodeRecord) -> bool {
        let version = self.next_version;
        self.next_version += 1;

        let (key, inserted) = match self.members.get(&record.node) {
            Some(member) => (
                FrontierKey {
                    estimated_total_cost: record.estimated_total_cost,
                    sequence: member.key.sequence,
                },
                false,
            ),
            None => {
                let sequence = self.next_sequence;
                self.next_sequence += 1;
                (
                    FrontierKey {
                        estimated_total_cost: record.estimated_total_cost,
                        sequence,
                    },
                    true,
                )
            }
        };

        self.members.insert(record.node, Member { key, version });
        self.heap.push(Reverse(FrontierEntry {
            key,
            node: record.node,
            version,
        }));

        let size = self.members.len() as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        inserted
    }

    /// Remove and return the open node with the smallest key.
    pub fn extract_min(&mut self) -> Option<NodeId> {
        while let Some(Reverse(entry)) = self.heap.pop() {
            let live = self
                .members
                .get(&entry.node)
                .is_some_and(|m| m.version == entry.version);
            if live {
                self.members.remove(&entry.node);
                return Some(entry.node);
            }
        }
        None
    }

    #[must_use]
    pub fn contains(&self, node: NodeId) -> bool {
        self.members.contains_key(&node)
    }

    /// Drop `node` from the open set. Its heap entries become stale.
    pub fn remove(&mut self, node: NodeId) -> bool {
        self.members.remove(&node).is_some()
    }

    /// Open nodes in node-id order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.members.keys().copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.members.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// High-water mark of open set size.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }
}
