//! Tilepath Search: deterministic best-first search over tile graphs.
//!
//! Dijkstra and A* share one engine. The only difference between them is the
//! heuristic component of each record's ordering key (zero for Dijkstra).
//!
//! # Crate dependency graph
//!
//! ```text
//! tilepath_kernel  ←  tilepath_search  ←  tilepath_harness
//! (graph, hashing)    (records, engine)   (scenarios, reports)
//! ```
//!
//! # Key types
//!
//! - [`record::NodeRecord`]: per-node bookkeeping (cost so far, predecessor, estimate)
//! - [`frontier::Frontier`] / [`closed::ClosedSet`]: open and closed sets
//! - [`heuristic::Heuristic`]: pluggable remaining-cost estimate
//! - [`search::SearchStepper`]: the engine as a lazy producer of [`event::SearchEvent`]s
//! - [`search::search`]: run to completion, returning a [`search::SearchOutcome`]
//! - [`path::Path`]: LIFO path whose pop yields the next step first

#![forbid(unsafe_code)]

pub mod closed;
pub mod error;
pub mod event;
pub mod frontier;
pub mod heuristic;
pub mod path;
pub mod policy;
pub mod record;
pub mod search;
pub mod state;
pub mod store;
